// sbm platform abstraction
// Provides the per-OS configuration directory and the command used to open
// a URL in the user's default viewer.
//
// Uses `cfg(target_os)` for conditional compilation to select the correct
// platform-specific implementation at compile time.

use std::path::PathBuf;
use std::process::Command;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "windows")]
mod windows;

/// Returns the platform-specific configuration directory for sbm.
///
/// - **Linux**: `~/.config/sbm` (or `$XDG_CONFIG_HOME/sbm`)
/// - **macOS**: `~/Library/Application Support/sbm`
/// - **Windows**: `%APPDATA%/sbm`
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_config_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_config_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_config_dir()
    }
}

/// Builds the command that hands `url` to the desktop's default handler.
///
/// - **Linux**: `xdg-open <url>`
/// - **macOS**: `open <url>`
/// - **Windows**: `cmd /C start "" <url>`
pub fn open_url_command(url: &str) -> Command {
    #[cfg(target_os = "linux")]
    {
        linux::open_url_command(url)
    }
    #[cfg(target_os = "macos")]
    {
        macos::open_url_command(url)
    }
    #[cfg(target_os = "windows")]
    {
        windows::open_url_command(url)
    }
}
