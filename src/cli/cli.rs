use clap::Parser;

use crate::application::data::{ColorMode, LogLevel};

/// Explore and modify an in-memory directory tree from the console.
#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity of the diagnostics written to stderr
    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,

    /// When to colorize console output
    #[clap(long, default_value = "auto", value_enum)]
    pub color: ColorMode,

    /// Skip the welcome banner and usage instructions
    #[clap(long, short)]
    pub quiet: bool,
}
