//! Key-value persistence with file locking.
//!
//! Entities are persisted as JSON-serialized arrays under fixed string keys.
//! The file-backed implementation writes one `<key>.json` file per key with
//! shared locks on read and an exclusive lock plus atomic temp-file rename
//! on write.

use crate::Result;
use fs2::FileExt;
use std::fs::File;
use std::io::{Read, Write};
use std::path::PathBuf;
use tempfile::NamedTempFile;

pub const KEY_CYCLES: &str = "cycles";
pub const KEY_FP_LOGS: &str = "fpLogs";
pub const KEY_SEX_LOGS: &str = "sexLogs";
pub const KEY_FAVORITE_FOODS: &str = "favoriteFoods";

/// String key-value store for JSON-serialized entity lists
pub trait KvStore {
    /// Read the value for a key; None if absent
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write the value for a key
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// File-backed store keeping one JSON file per key in a data directory
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KvStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let file = File::open(&path)?;
        file.lock_shared()?;

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        let read_result = reader.read_to_string(&mut contents);
        file.unlock()?;
        read_result?;

        tracing::debug!("Read {} bytes for key '{}'", contents.len(), key);
        Ok(Some(contents))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;

        // Unique temp file in the same directory for atomic rename
        let temp = NamedTempFile::new_in(&self.dir)?;
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            writer.write_all(value.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(self.key_path(key))
            .map_err(|e| crate::Error::Io(e.error))?;

        tracing::debug!("Wrote {} bytes for key '{}'", value.len(), key);
        Ok(())
    }
}
