//! Opens bookmark URLs in an external program.

use std::process::Command;

use crate::config::Config;
use crate::platform;
use crate::types::errors::ViewerError;

/// Hands a URL to something that can display it.
pub trait Viewer {
    fn open(&self, url: &str) -> Result<(), ViewerError>;
}

/// Viewer that runs the configured command, or the platform's default handler.
#[derive(Debug, Clone, Default)]
pub struct SystemViewer {
    command: Option<String>,
}

impl SystemViewer {
    pub fn new(command: Option<String>) -> Self {
        Self { command }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.settings().viewer_command.clone())
    }

    fn build_command(&self, url: &str) -> Command {
        match &self.command {
            Some(program) => {
                let mut cmd = Command::new(program);
                cmd.arg(url);
                cmd
            }
            None => platform::open_url_command(url),
        }
    }
}

impl Viewer for SystemViewer {
    fn open(&self, url: &str) -> Result<(), ViewerError> {
        let mut cmd = self.build_command(url);
        log::debug!("opening {} with {:?}", url, cmd.get_program());
        let status = cmd
            .status()
            .map_err(|e| ViewerError::Spawn(format!("{:?}: {}", cmd.get_program(), e)))?;
        if status.success() {
            Ok(())
        } else {
            Err(ViewerError::Failed(format!("{} ({})", url, status)))
        }
    }
}
