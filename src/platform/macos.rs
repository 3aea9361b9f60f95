// sbm platform paths for macOS
// Config: ~/Library/Application Support/sbm

use std::env;
use std::path::PathBuf;
use std::process::Command;

/// Returns the home directory on macOS.
fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

/// Returns the configuration directory for sbm on macOS.
/// `~/Library/Application Support/sbm`
pub fn get_config_dir() -> PathBuf {
    home_dir()
        .join("Library")
        .join("Application Support")
        .join("sbm")
}

pub fn open_url_command(url: &str) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(url);
    cmd
}
