//! Config file discovery

use std::path::{Path, PathBuf};

/// Name of the config file looked up in the working and home directories
pub const CONFIG_FILE: &str = ".gh-queue-scaler.toml";

/// Load config file content from CWD first, then home directory
///
/// Searches for `.gh-queue-scaler.toml` in:
/// 1. Current working directory
/// 2. Home directory
///
/// Returns the path and content if found, None otherwise.
pub fn load_config_file() -> Option<(PathBuf, String)> {
    // Try current directory first
    if let Some(found) = read_if_exists(Path::new(CONFIG_FILE)) {
        return Some(found);
    }

    // Try home directory
    get_home_config_path().and_then(|path| read_if_exists(&path))
}

fn read_if_exists(path: &Path) -> Option<(PathBuf, String)> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            log::debug!("Loaded config from {}", path.display());
            Some((path.to_path_buf(), content))
        }
        Err(_) => None,
    }
}

/// Get the path to the config file in the home directory
fn get_home_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_FILE))
}
