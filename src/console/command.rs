use std::str::SplitWhitespace;

use clap::ValueEnum;
use snafu::prelude::*;

/// Action keywords understood by the console, matched case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Action {
    List,
    Create,
    Move,
    Delete,
    Exit,
}

/// A parsed console line.
///
/// Missing path arguments are kept as empty strings so that the tree itself
/// reports them as invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    List,
    Create { path: String },
    Delete { path: String },
    Move { from: String, to: String },
    Exit,
}

impl TryFrom<&str> for ConsoleCommand {
    type Error = ConsoleCommandError;

    fn try_from(line: &str) -> Result<Self, Self::Error> {
        let mut parameters = line.split_whitespace();
        let keyword = parameters.next().context(MissingActionSnafu)?;
        let action = <Action as ValueEnum>::from_str(keyword, true)
            .map_err(|_| UnknownActionSnafu { action: keyword }.build())?;

        let command = match action {
            Action::List => ConsoleCommand::List,
            Action::Create => ConsoleCommand::Create {
                path: next_path(&mut parameters),
            },
            Action::Delete => ConsoleCommand::Delete {
                path: next_path(&mut parameters),
            },
            Action::Move => ConsoleCommand::Move {
                from: next_path(&mut parameters),
                to: next_path(&mut parameters),
            },
            Action::Exit => ConsoleCommand::Exit,
        };

        Ok(command)
    }
}

fn next_path(parameters: &mut SplitWhitespace<'_>) -> String {
    parameters.next().map(str::to_owned).unwrap_or_default()
}

#[derive(Debug, Snafu)]
pub enum ConsoleCommandError {
    #[snafu(display("No action given"))]
    MissingAction,
    #[snafu(display(
        "Invalid action requested ({action}). Valid actions are LIST, CREATE, DELETE, MOVE, and EXIT. Please try again."
    ))]
    UnknownAction { action: String },
}
