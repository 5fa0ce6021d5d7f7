use gloo_storage::Storage as GlooStorage;
use gymlog_domain::StorageError;

/// Browser local storage.
pub struct LocalStorage;

impl super::Backend for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match gloo_storage::LocalStorage::get::<serde_json::Value>(key) {
            Ok(value) => Ok(Some(value.to_string())),
            Err(err) => match err {
                gloo_storage::errors::StorageError::KeyNotFound(_) => Ok(None),
                gloo_storage::errors::StorageError::SerdeError(err) => {
                    Err(StorageError::Corrupt(err.to_string()))
                }
                err => Err(StorageError::Other(Box::new(err))),
            },
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let value = serde_json::from_str::<serde_json::Value>(value)
            .map_err(|err| StorageError::Other(Box::new(err)))?;
        gloo_storage::LocalStorage::set(key, value).map_err(|err| StorageError::Other(Box::new(err)))
    }
}
