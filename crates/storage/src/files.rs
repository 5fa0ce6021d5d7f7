use std::{
    fs, io,
    path::{Path, PathBuf},
};

use gymlog_domain::StorageError;
use log::debug;

/// Stores each key as a JSON file inside a directory.
///
/// A value is written to a temporary file first and then renamed over the previous file, so a
/// reader sees either the old or the new value.
#[derive(Debug, Clone)]
pub struct Files {
    dir: PathBuf,
}

impl Files {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl super::Backend for Files {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(io_error(err)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path(key);
        let tmp_path = self.dir.join(format!(".{key}.json.tmp"));
        fs::create_dir_all(&self.dir).map_err(io_error)?;
        fs::write(&tmp_path, value).map_err(io_error)?;
        fs::rename(&tmp_path, &path).map_err(io_error)?;
        debug!("wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }
}

fn io_error(err: io::Error) -> StorageError {
    StorageError::Other(Box::new(err))
}
