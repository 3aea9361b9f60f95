// sbm platform paths for Windows
// Config: %APPDATA%/sbm

use std::env;
use std::path::PathBuf;
use std::process::Command;

/// Returns the configuration directory for sbm on Windows.
/// `%APPDATA%/sbm`
pub fn get_config_dir() -> PathBuf {
    let appdata =
        env::var("APPDATA").unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Roaming"));
    PathBuf::from(appdata).join("sbm")
}

/// `start` treats its first quoted argument as a window title, hence the empty one.
pub fn open_url_command(url: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", "start", ""]).arg(url);
    cmd
}
