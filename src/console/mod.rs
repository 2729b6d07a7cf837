mod command;
mod console_runner;

pub use command::{ConsoleCommand, ConsoleCommandError};
pub use console_runner::{Console, ConsoleError};
