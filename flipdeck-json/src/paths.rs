use directories::ProjectDirs;
use std::path::{Path, PathBuf};

pub const STORE_FILE: &str = "flipdeck.json";
pub const BACKUPS_DIR: &str = "backups";
pub const LOG_FILE: &str = "flipdeck.log";

pub fn data_root() -> PathBuf {
    if let Some(pd) = ProjectDirs::from("com", "flipdeck", "FlipDeck") {
        pd.data_dir().to_path_buf()
    } else {
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    }
}

/// Store file and backups directory under `root`.
pub fn store_files(root: &Path) -> (PathBuf, PathBuf) {
    (root.join(STORE_FILE), root.join(BACKUPS_DIR))
}
