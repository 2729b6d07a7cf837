use std::fmt::Display;
use std::io::{BufRead, Write};
use std::ops::ControlFlow;

use colored::Colorize;
use snafu::{ResultExt, Snafu};
use tracing::{debug, info, warn};

use crate::application::RuntimeConfig;
use crate::console::{ConsoleCommand, ConsoleCommandError};
use crate::filesystem::DirectoryManager;

const BANNER_RULE: &str =
    "-----------------------------------------------------------------------";
const ERROR_RULE: &str = "/////////////////////////////////////////////";
const LIST_HEADER: &str = "/////////// LIST OF DIRECTORIES ///////////////////";
const PROMPT: &str = "What action would you like to take? ";

const INSTRUCTIONS: [&str; 6] = [
    "The Directory Explorer allows you to list, create, move, and delete directories.",
    "To list all directories, type \"LIST\"",
    "To create a new directory, type \"CREATE\" followed by the name of the new directory. You may use \"/\" to create nested directories. Ex. \"CREATE my/nested/directory\"",
    "To move a directory, type \"MOVE\" followed by the name of the directory you wish to move and then the new location. You may use \"/\" to move a directory nested inside of another. Ex. \"MOVE my/nested/directory my/new/location\"",
    "To delete a directory, type \"DELETE\" followed by the name of the directory you wish to delete. You may use \"/\" to delete a directory nested inside of another. Ex. \"DELETE my/nested/directory\"",
    "To exit the application, type \"EXIT\".",
];

/// Interactive loop that reads commands line by line and applies them to a
/// [`DirectoryManager`].
///
/// Tree errors are reported and the loop keeps going. Only I/O failures on
/// the input or output stream end it early.
pub struct Console<D, R, W> {
    manager: D,
    input: R,
    output: W,
    show_banner: bool,
}

impl<D, R, W> Console<D, R, W>
where
    D: DirectoryManager,
    R: BufRead,
    W: Write,
{
    pub fn new(manager: D, input: R, output: W, config: &RuntimeConfig) -> Self {
        Self {
            manager,
            input,
            output,
            show_banner: config.show_banner,
        }
    }

    /// Runs until `EXIT` is entered or the input is exhausted.
    pub fn run(&mut self) -> Result<(), ConsoleError> {
        if self.show_banner {
            self.print_banner()?;
        }

        let mut line = String::new();
        loop {
            write!(self.output, "{PROMPT}").context(WriteSnafu)?;
            self.output.flush().context(WriteSnafu)?;

            line.clear();
            let bytes_read = self.input.read_line(&mut line).context(ReadSnafu)?;
            if bytes_read == 0 {
                debug!("Reached end of input");
                self.emit("")?;
                break;
            }

            match ConsoleCommand::try_from(line.as_str()) {
                Ok(command) => {
                    if self.execute(command)?.is_break() {
                        break;
                    }
                }
                Err(ConsoleCommandError::MissingAction) => continue,
                Err(error) => {
                    warn!("Rejected input line {:?}: {}", line.trim(), error);
                    self.emit(format!("{error}\n"))?;
                }
            }
        }

        Ok(())
    }

    /// Applies one command. `Break` ends the session.
    fn execute(&mut self, command: ConsoleCommand) -> Result<ControlFlow<()>, ConsoleError> {
        debug!("Executing {:?}", command);

        let result = match &command {
            ConsoleCommand::Exit => {
                info!("Exit requested");
                return Ok(ControlFlow::Break(()));
            }
            ConsoleCommand::List => {
                self.print_listing()?;
                return Ok(ControlFlow::Continue(()));
            }
            ConsoleCommand::Create { path } => self.manager.create_directory(path),
            ConsoleCommand::Delete { path } => self.manager.delete_directory(path),
            ConsoleCommand::Move { from, to } => self.manager.move_directory(from, to),
        };

        match result {
            Ok(()) => self.emit("")?,
            Err(error) => {
                warn!("Command {:?} failed: {}", command, error);
                self.print_error(&error)?;
            }
        }
        Ok(ControlFlow::Continue(()))
    }

    fn print_banner(&mut self) -> Result<(), ConsoleError> {
        self.emit("")?;
        self.emit(BANNER_RULE)?;
        self.emit("Welcome to the Directory Explorer!".bold())?;
        self.emit("Please follow the steps outlined to explore and modify directories.")?;
        self.emit(BANNER_RULE)?;
        for instruction in INSTRUCTIONS {
            self.emit(instruction)?;
        }
        self.emit("")
    }

    fn print_listing(&mut self) -> Result<(), ConsoleError> {
        let listing = self.manager.list_directories();
        self.emit("")?;
        self.emit(LIST_HEADER.bold())?;
        self.emit(listing)
    }

    fn print_error(&mut self, error: &dyn Display) -> Result<(), ConsoleError> {
        self.emit("")?;
        self.emit(ERROR_RULE)?;
        self.emit(error.to_string().red())?;
        self.emit(ERROR_RULE)?;
        self.emit("")
    }

    fn emit(&mut self, text: impl Display) -> Result<(), ConsoleError> {
        writeln!(self.output, "{text}").context(WriteSnafu)
    }
}

#[derive(Debug, Snafu)]
pub enum ConsoleError {
    #[snafu(display("Failed to read from the console input"))]
    ReadError { source: std::io::Error },
    #[snafu(display("Failed to write to the console output"))]
    WriteError { source: std::io::Error },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filesystem::{DirectoryForest, DirectoryTreeError};
    use std::io::{self, Cursor};

    fn quiet_config() -> RuntimeConfig {
        RuntimeConfig { show_banner: false }
    }

    fn run_session(script: &str) -> String {
        run_session_with(DirectoryForest::new(), script, &quiet_config())
    }

    fn run_session_with<D: DirectoryManager>(
        manager: D,
        script: &str,
        config: &RuntimeConfig,
    ) -> String {
        let mut output = Vec::new();
        Console::new(manager, Cursor::new(script), &mut output, config)
            .run()
            .expect("Console session should not fail on in-memory streams");
        String::from_utf8(output).expect("Console output should be valid UTF-8")
    }

    /// Records every call so tests can check what the console dispatched.
    #[derive(Default)]
    struct RecordingManager {
        calls: Vec<String>,
    }

    impl DirectoryManager for &mut RecordingManager {
        fn list_directories(&self) -> String {
            String::from("recorded\n")
        }

        fn create_directory(&mut self, path: &str) -> Result<(), DirectoryTreeError> {
            self.calls.push(format!("create {path}"));
            Ok(())
        }

        fn delete_directory(&mut self, path: &str) -> Result<(), DirectoryTreeError> {
            self.calls.push(format!("delete {path}"));
            Ok(())
        }

        fn move_directory(&mut self, from: &str, to: &str) -> Result<(), DirectoryTreeError> {
            self.calls.push(format!("move {from} {to}"));
            Ok(())
        }
    }

    #[test]
    fn dispatches_commands_to_the_manager() {
        let mut recorder = RecordingManager::default();

        let output = run_session_with(
            &mut recorder,
            "create a/b\nMOVE a/b c\nDelete c\nLIST\n",
            &quiet_config(),
        );

        assert_eq!(
            recorder.calls,
            vec!["create a/b", "move a/b c", "delete c"]
        );
        assert!(output.contains("recorded\n"));
    }

    #[test]
    fn list_prints_header_and_tree() {
        let output = run_session("CREATE fruits/apples\nCREATE vegetables\nLIST\nEXIT\n");

        assert!(output.contains(LIST_HEADER));
        assert!(output.contains("fruits\n--apples\nvegetables\n"));
    }

    #[test]
    fn session_replays_a_full_script() {
        let script = "\
CREATE fruits
CREATE vegetables
CREATE grains
CREATE fruits/apples
CREATE fruits/apples/fuji
LIST
CREATE grains/squash
MOVE grains/squash vegetables
CREATE foods
MOVE grains foods
MOVE fruits foods
MOVE vegetables foods
LIST
DELETE fruits/apples
DELETE foods/fruits/apples
LIST
";
        let output = run_session(script);

        assert!(output.contains("fruits\n--apples\n----fuji\ngrains\nvegetables\n"));
        assert!(output.contains(
            "foods\n--fruits\n----apples\n------fuji\n--grains\n--vegetables\n----squash\n"
        ));
        assert!(output.contains("Cannot delete fruits/apples - fruits does not exist"));
        assert!(output.contains("foods\n--fruits\n--grains\n--vegetables\n----squash\n"));
    }

    #[test]
    fn errors_are_framed_and_the_session_continues() {
        let output = run_session("DELETE missing\nCREATE a\nLIST\n");

        let error_at = output
            .find("Cannot delete missing - missing does not exist")
            .expect("Error should be reported");
        assert!(output[..error_at].contains(ERROR_RULE));
        assert!(output[error_at..].contains(ERROR_RULE));
        assert!(output.contains("a\n"));
    }

    #[test]
    fn missing_argument_is_reported_as_invalid_path() {
        let output = run_session("CREATE\n");

        assert!(output.contains("Invalid directory path provided to create."));
    }

    #[test]
    fn unknown_action_is_reported() {
        let output = run_session("RENAME a b\nLIST\n");

        assert!(output.contains("Invalid action requested (RENAME)"));
        assert!(output.contains(LIST_HEADER));
    }

    #[test]
    fn exit_stops_reading() {
        let output = run_session("CREATE a\nEXIT\nCREATE b\nLIST\n");

        assert!(!output.contains(LIST_HEADER));
    }

    #[test]
    fn exit_ends_the_session_without_output() {
        let mut output = Vec::new();
        let mut console = Console::new(
            DirectoryForest::new(),
            Cursor::new(""),
            &mut output,
            &quiet_config(),
        );

        let flow = console.execute(ConsoleCommand::Exit).unwrap();
        let other = console
            .execute(ConsoleCommand::Create { path: "a".into() })
            .unwrap();
        drop(console);

        assert!(flow.is_break());
        assert!(other.is_continue());
        assert_eq!(String::from_utf8(output).unwrap(), "\n");
    }

    #[test]
    fn blank_lines_only_prompt_again() {
        let output = run_session("\n\n");

        assert_eq!(output.matches(PROMPT).count(), 3);
        assert!(!output.contains(ERROR_RULE));
    }

    #[test]
    fn banner_is_shown_unless_quiet() {
        let loud = run_session_with(
            DirectoryForest::new(),
            "EXIT\n",
            &RuntimeConfig { show_banner: true },
        );
        let quiet = run_session("EXIT\n");

        assert!(loud.contains("Welcome to the Directory Explorer!"));
        assert!(loud.contains(INSTRUCTIONS[5]));
        assert!(!quiet.contains("Welcome to the Directory Explorer!"));
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn output_failure_ends_the_session() {
        let result = Console::new(
            DirectoryForest::new(),
            Cursor::new("LIST\n"),
            FailingWriter,
            &quiet_config(),
        )
        .run();

        assert!(matches!(result, Err(ConsoleError::WriteError { .. })));
    }
}
