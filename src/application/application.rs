use std::io;

use snafu::Snafu;
use snafu::prelude::*;
use tracing::{debug, info};

use crate::application::RuntimeConfig;
use crate::console::{Console, ConsoleError};
use crate::filesystem::DirectoryForest;

pub struct Application;

impl Application {
    pub fn run(app_config: impl Into<RuntimeConfig>) -> Result<(), ApplicationError> {
        let app_config: RuntimeConfig = app_config.into();
        debug!("Runtime config: {:?}", app_config);

        let stdin = io::stdin().lock();
        let stdout = io::stdout().lock();

        Console::new(DirectoryForest::new(), stdin, stdout, &app_config)
            .run()
            .context(ConsoleSnafu)?;
        info!("Console session finished");

        Ok(())
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Critical failure encountered while running the console"))]
    ConsoleError { source: ConsoleError },
}
