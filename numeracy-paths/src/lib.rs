//! XDG Base Directory paths for numeracy.
//!
//! The CLI uses XDG paths on every platform so config and rule files live in
//! the same place regardless of OS.

use std::path::PathBuf;

/// Get the numeracy config directory.
///
/// Returns `$XDG_CONFIG_HOME/numeracy` if set, otherwise `~/.config/numeracy`.
/// The user config file lives here.
///
/// # Examples
///
/// ```
/// use numeracy_paths::config_dir;
///
/// let config = config_dir();
/// let config_file = config.join("config.toml");
/// ```
pub fn config_dir() -> PathBuf {
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg_config).join("numeracy")
    } else if let Some(home) = dirs::home_dir() {
        home.join(".config/numeracy")
    } else {
        PathBuf::from(".config/numeracy")
    }
}

/// Fallback directory for task rule files: `<config_dir>/rules`.
pub fn rules_dir() -> PathBuf {
    config_dir().join("rules")
}
