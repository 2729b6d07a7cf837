use clap::ValueEnum;
use supports_color::Stream;

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Resolves `Auto` against the capabilities of stdout.
    pub fn should_colorize(&self) -> bool {
        match self {
            ColorMode::Auto => supports_color::on(Stream::Stdout).is_some(),
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_modes_ignore_the_terminal() {
        assert!(ColorMode::Always.should_colorize());
        assert!(!ColorMode::Never.should_colorize());
    }
}
