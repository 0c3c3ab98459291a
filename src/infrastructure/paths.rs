//! Platform path resolution.
//!
//! CineMagic keeps its watchlist and trace files under the platform data
//! directory and reads its configuration from the platform config directory:
//!
//! | Platform | Data                                   | Config                                      |
//! |----------|----------------------------------------|---------------------------------------------|
//! | Linux    | `~/.local/share/cinemagic`             | `~/.config/cinemagic/config.toml`           |
//! | macOS    | `~/Library/Application Support/cinemagic` | same as data                             |
//! | Windows  | `%APPDATA%\cinemagic`                  | same as data                                |

use std::path::{Path, PathBuf};

/// Directory name used under the platform data and config roots.
pub const APP_DIR_NAME: &str = "cinemagic";

/// File name of the key/value store holding the watchlist.
pub const STORAGE_FILE_NAME: &str = "storage.json";

/// File name of the OTLP trace log.
pub const TRACE_FILE_NAME: &str = "cinemagic-traces.json";

/// Returns the data directory for CineMagic storage.
///
/// Falls back to `./cinemagic` when the platform reports no data directory.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

/// Returns the default configuration file path.
#[must_use]
pub fn default_config_file() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
        .join("config.toml")
}

/// Path of the watchlist store inside `data_dir`.
#[must_use]
pub fn storage_file(data_dir: &Path) -> PathBuf {
    data_dir.join(STORAGE_FILE_NAME)
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading tilde, and every path when no home directory is
/// known, are returned unchanged.
///
/// # Examples
///
/// ```
/// use cinemagic::infrastructure::expand_tilde;
/// use std::path::PathBuf;
///
/// assert_eq!(expand_tilde("/absolute/path"), PathBuf::from("/absolute/path"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    let home = dirs::home_dir();
    match (path, home) {
        ("~", Some(home)) => home,
        (p, Some(home)) if p.starts_with("~/") => home.join(&p[2..]),
        (p, _) => PathBuf::from(p),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_home_prefix() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        assert_eq!(expand_tilde("~"), home);
        assert_eq!(expand_tilde("~/movies/theme.toml"), home.join("movies/theme.toml"));
    }

    #[test]
    fn leaves_other_paths_alone() {
        assert_eq!(expand_tilde("relative/dir"), PathBuf::from("relative/dir"));
        assert_eq!(expand_tilde("~user/dir"), PathBuf::from("~user/dir"));
    }

    #[test]
    fn data_paths_end_in_app_dir() {
        assert!(get_data_dir().ends_with(APP_DIR_NAME));
        assert!(default_config_file().ends_with("cinemagic/config.toml"));
        assert_eq!(
            storage_file(Path::new("/tmp/cm")),
            PathBuf::from("/tmp/cm/storage.json")
        );
    }
}
