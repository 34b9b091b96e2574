// src/infra/paths.rs — Config and data locations
//
// HACKEVAL_HOME overrides everything: config lives directly under it and
// data under $HACKEVAL_HOME/data. Otherwise config is ~/.hackeval/ and data
// follows XDG_DATA_HOME/hackeval.

use directories::{BaseDirs, ProjectDirs};
use std::path::PathBuf;

fn hackeval_home() -> Option<PathBuf> {
    std::env::var_os("HACKEVAL_HOME").map(PathBuf::from)
}

/// Home directory, or the working directory when none can be determined.
pub fn dirs_home() -> PathBuf {
    BaseDirs::new()
        .map(|b| b.home_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Configuration directory: $HACKEVAL_HOME/ or ~/.hackeval/
pub fn config_dir() -> PathBuf {
    if let Some(home) = hackeval_home() {
        return home;
    }
    dirs_home().join(".hackeval")
}

/// Data directory: $HACKEVAL_HOME/data/ or ~/.local/share/hackeval/
pub fn data_dir() -> PathBuf {
    if let Some(home) = hackeval_home() {
        return home.join("data");
    }
    ProjectDirs::from("", "", "hackeval")
        .map(|p| p.data_local_dir().to_path_buf())
        .unwrap_or_else(|| config_dir().join("data"))
}

pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

pub fn db_path() -> PathBuf {
    data_dir().join("hackeval.db")
}
