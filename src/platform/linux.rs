// sbm platform paths for Linux
// Config: ~/.config/sbm

use std::env;
use std::path::PathBuf;
use std::process::Command;

/// Returns the configuration directory for sbm on Linux.
/// Uses `$XDG_CONFIG_HOME/sbm` if set, otherwise `~/.config/sbm`.
pub fn get_config_dir() -> PathBuf {
    match env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg).join("sbm"),
        _ => {
            let home = env::var("HOME").unwrap_or_else(|_| String::from("/tmp"));
            PathBuf::from(home).join(".config").join("sbm")
        }
    }
}

pub fn open_url_command(url: &str) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(url);
    cmd
}
