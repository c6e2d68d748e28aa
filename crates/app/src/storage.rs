//! File-backed cart storage.

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use storefront::storage::{CartStorage, StorageError};
use tempfile::NamedTempFile;

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open storage rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();

        fs::create_dir_all(&dir)?;

        Ok(Self { dir })
    }

    /// Directory holding the stored entries.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        if key.is_empty()
            || key == "."
            || key.contains("..")
            || key.contains(['/', '\\'])
            || key.contains('\0')
        {
            return Err(StorageError::InvalidKey(key.to_string()));
        }

        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl CartStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let bytes = match fs::read(self.path_for(key)?) {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(error.into()),
        };

        String::from_utf8(bytes)
            .map(Some)
            .map_err(|error| StorageError::Corrupt {
                key: key.to_string(),
                reason: error.to_string(),
            })
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let mut tmp = NamedTempFile::new_in(&self.dir)?;

        tmp.write_all(value.as_bytes())?;
        tmp.persist(&path).map_err(io::Error::from)?;

        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)?) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::EUR;
    use storefront::store::{CART_STORAGE_KEY, CartStore};
    use testresult::TestResult;

    use super::*;

    #[test]
    fn open_creates_directory() -> TestResult {
        let root = tempfile::tempdir()?;
        let dir = root.path().join("profile").join("default");

        let storage = FileStorage::open(&dir)?;

        assert!(storage.dir().is_dir());

        Ok(())
    }

    #[test]
    fn missing_key_reads_none() -> TestResult {
        let root = tempfile::tempdir()?;
        let storage = FileStorage::open(root.path())?;

        assert_eq!(storage.get("cart")?, None);

        Ok(())
    }

    #[test]
    fn set_writes_one_file_per_key() -> TestResult {
        let root = tempfile::tempdir()?;
        let mut storage = FileStorage::open(root.path())?;

        storage.set("cart", "{\"items\":[]}")?;
        storage.set("cart", "{\"items\":[1]}")?;

        assert_eq!(storage.get("cart")?.as_deref(), Some("{\"items\":[1]}"));
        assert!(root.path().join("cart.json").is_file());
        assert_eq!(fs::read_dir(root.path())?.count(), 1);

        Ok(())
    }

    #[test]
    fn remove_is_idempotent() -> TestResult {
        let root = tempfile::tempdir()?;
        let mut storage = FileStorage::open(root.path())?;

        storage.set("cart", "{}")?;
        storage.remove("cart")?;
        storage.remove("cart")?;

        assert_eq!(storage.get("cart")?, None);
        assert!(!root.path().join("cart.json").exists());

        Ok(())
    }

    #[test]
    fn rejects_keys_escaping_the_directory() -> TestResult {
        let root = tempfile::tempdir()?;
        let mut storage = FileStorage::open(root.path())?;

        for key in ["", ".", "../cart", "nested/cart", "nested\\cart"] {
            assert!(
                matches!(storage.set(key, "{}"), Err(StorageError::InvalidKey(_))),
                "{key:?} should be rejected"
            );
        }

        Ok(())
    }

    #[test]
    fn non_utf8_entry_reads_as_corrupt() -> TestResult {
        let root = tempfile::tempdir()?;
        let storage = FileStorage::open(root.path())?;

        fs::write(root.path().join("cart.json"), [0xff, 0xfe, 0x00, 0x7b])?;

        assert!(matches!(
            storage.get("cart"),
            Err(StorageError::Corrupt { key, .. }) if key == "cart"
        ));

        Ok(())
    }

    #[test]
    fn load_discards_non_utf8_cart_file() -> TestResult {
        let root = tempfile::tempdir()?;
        let path = root.path().join(format!("{CART_STORAGE_KEY}.json"));

        fs::write(&path, [0xff, 0xfe, 0x00, 0x7b])?;

        let store = CartStore::load(FileStorage::open(root.path())?, EUR)?;

        assert!(store.cart().is_empty());
        assert!(!path.exists());

        Ok(())
    }
}
