use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::Result;
use crate::store::backend::Storage;

/// Filesystem backend: one file per key (`<dir>/<key>.json`).
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open (and create, if needed) a storage directory.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        debug!("file storage at {}", dir.display());
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn load(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Resolve the data directory: `POLLBOOTH_DATA_DIR` wins, otherwise the
/// platform data dir plus `pollbooth`, with a dotdir fallback for platforms
/// where no data dir is known.
pub fn resolve_data_dir() -> PathBuf {
    match std::env::var("POLLBOOTH_DATA_DIR") {
        Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => dirs::data_dir()
            .map(|base| base.join("pollbooth"))
            .unwrap_or_else(|| Path::new(".pollbooth").to_path_buf()),
    }
}
