use crate::cli::Cli;

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub show_banner: bool,
}

impl From<Cli> for RuntimeConfig {
    fn from(cli: Cli) -> Self {
        Self {
            show_banner: !cli.quiet,
        }
    }
}
