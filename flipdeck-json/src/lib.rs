use chrono::{DateTime, Utc};
use flipdeck_core::{DeckError, KeyValueStore};
use log::{debug, warn};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tempfile::NamedTempFile;

pub mod paths;

const FILE_VERSION: u32 = 1;
pub const DEFAULT_MAX_BACKUPS: usize = 10;

#[derive(Clone, Serialize, Deserialize)]
struct FileImage {
    version: u32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    entries: BTreeMap<String, String>,
}

impl FileImage {
    fn new_empty() -> Self {
        let now = Utc::now();
        Self {
            version: FILE_VERSION,
            created_at: now,
            updated_at: now,
            entries: BTreeMap::new(),
        }
    }
}

/// Key-value store persisted as a single JSON document.
///
/// Reads are served from memory. Every write rewrites the whole file
/// atomically and, when `max_backups > 0`, drops a timestamped copy into the
/// backups directory, keeping only the newest `max_backups` copies.
pub struct JsonFileStore {
    path: PathBuf,
    backups_dir: PathBuf,
    max_backups: usize,
    image: RwLock<FileImage>,
    // Orders backups written within the same millisecond.
    backup_seq: AtomicU64,
}

impl JsonFileStore {
    /// Opens the store rooted at `dir` (store file plus `backups/`).
    pub fn open_in(dir: &Path, max_backups: usize) -> Result<Self, DeckError> {
        let (file, backups) = paths::store_files(dir);
        Self::open_with(file, backups, max_backups)
    }

    pub fn open_with(path: PathBuf, backups_dir: PathBuf, max_backups: usize) -> Result<Self, DeckError> {
        ensure_parent_dirs(&path)?;
        if max_backups > 0 {
            ensure_dir(&backups_dir)?;
        }
        let image = load_or_init(&path)?;
        debug!(
            "event=store_open path={} entries={} max_backups={max_backups}",
            path.display(),
            image.entries.len()
        );
        Ok(Self {
            path,
            backups_dir,
            max_backups,
            image: RwLock::new(image),
            backup_seq: AtomicU64::new(0),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<(), DeckError> {
        let snapshot = {
            let mut img = self.image.write();
            img.updated_at = Utc::now();
            img.clone()
        };
        let seq = self.backup_seq.fetch_add(1, Ordering::Relaxed);
        write_with_backup(&self.path, &self.backups_dir, self.max_backups, seq, &snapshot).map_err(|err| {
            warn!("event=store_write path={} status=error error={err}", self.path.display());
            DeckError::Storage("io")
        })
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, DeckError> {
        Ok(self.image.read().entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), DeckError> {
        {
            let mut img = self.image.write();
            img.entries.insert(key.to_string(), value.to_string());
        }
        self.save()
    }

    fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), DeckError> {
        {
            let mut img = self.image.write();
            for (key, value) in entries {
                img.entries.insert(key.to_string(), value.to_string());
            }
        }
        self.save()
    }
}

fn ensure_parent_dirs(path: &Path) -> Result<(), DeckError> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    Ok(())
}

fn ensure_dir(path: &Path) -> Result<(), DeckError> {
    fs::create_dir_all(path).map_err(|_| DeckError::Storage("io"))
}

fn load_or_init(path: &Path) -> Result<FileImage, DeckError> {
    if !path.exists() {
        let img = FileImage::new_empty();
        write_atomic(path, &encode(&img)?).map_err(|_| DeckError::Storage("io"))?;
        return Ok(img);
    }

    let buf = fs::read_to_string(path).map_err(|_| DeckError::Storage("io"))?;
    match serde_json::from_str::<FileImage>(&buf) {
        Ok(img) => Ok(img),
        Err(err) => {
            // Keep the unreadable file for inspection and start over.
            let aside = path.with_extension("json.corrupt");
            warn!(
                "event=store_open path={} status=corrupt moved_to={} error={err}",
                path.display(),
                aside.display()
            );
            fs::rename(path, &aside).map_err(|_| DeckError::Storage("io"))?;
            let img = FileImage::new_empty();
            write_atomic(path, &encode(&img)?).map_err(|_| DeckError::Storage("io"))?;
            Ok(img)
        }
    }
}

fn encode(img: &FileImage) -> Result<Vec<u8>, DeckError> {
    serde_json::to_vec_pretty(img).map_err(|_| DeckError::Storage("encode"))
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), std::io::Error> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir)?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

fn write_with_backup(
    path: &Path,
    backups_dir: &Path,
    max_backups: usize,
    seq: u64,
    img: &FileImage,
) -> Result<(), std::io::Error> {
    let json = serde_json::to_vec_pretty(img)?;
    write_atomic(path, &json)?;

    if max_backups == 0 {
        return Ok(());
    }

    fs::create_dir_all(backups_dir)?;
    let ts = chrono::Local::now().format("%Y%m%d-%H%M%S%.3f");
    let backup_path = backups_dir.join(format!("flipdeck-{ts}-{seq:06}.json"));
    write_atomic(&backup_path, &json)?;

    rotate_backups(backups_dir, max_backups)
}

fn rotate_backups(dir: &Path, keep: usize) -> Result<(), std::io::Error> {
    let mut entries: Vec<_> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("json"))
        .collect();
    // Names embed the timestamp and sequence, so lexical order is age order.
    entries.sort_by_key(|e| e.file_name());
    if entries.len() > keep {
        for e in &entries[0..entries.len() - keep] {
            let _ = fs::remove_file(e.path());
        }
    }
    Ok(())
}
