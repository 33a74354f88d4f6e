//! Byte-oriented persistence used by [crate::Buffer].
//!
//! A [Storage] moves whole byte slices to and from a path. It never
//! interprets content: the meaning of the bytes is defined entirely by the
//! sequence of encode calls that produced them.
//!
//! Two implementations are provided:
//! - [Fs] writes to the local filesystem (creating or truncating files).
//! - [Memory] keeps files in a shared in-process map, which is useful for
//!   staging dumps or for exercising persistence without touching disk.

use std::{
    collections::BTreeMap,
    fs::{self, File},
    io::{self, Read},
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard},
};

/// Interface to a store of whole files addressed by path.
pub trait Storage {
    /// Writes all of `data` to `path`, creating or truncating it.
    fn write_all(&self, path: &Path, data: &[u8]) -> Result<(), io::Error>;

    /// Returns the size in bytes of the file at `path`.
    ///
    /// This is a sizing hint: [Storage::read_all] may still observe a different length.
    fn size(&self, path: &Path) -> Result<u64, io::Error>;

    /// Appends the entire content of `path` to `dst`, returning the number of bytes read.
    fn read_all(&self, path: &Path, dst: &mut Vec<u8>) -> Result<usize, io::Error>;
}

/// Filesystem-backed [Storage].
#[derive(Clone, Copy, Debug, Default)]
pub struct Fs;

impl Storage for Fs {
    fn write_all(&self, path: &Path, data: &[u8]) -> Result<(), io::Error> {
        fs::write(path, data)
    }

    fn size(&self, path: &Path) -> Result<u64, io::Error> {
        Ok(fs::metadata(path)?.len())
    }

    fn read_all(&self, path: &Path, dst: &mut Vec<u8>) -> Result<usize, io::Error> {
        let mut file = File::open(path)?;
        file.read_to_end(dst)
    }
}

/// In-memory [Storage]. Clones share the same files.
#[derive(Clone, Debug, Default)]
pub struct Memory {
    files: Arc<Mutex<BTreeMap<PathBuf, Vec<u8>>>>,
}

impl Memory {
    fn files(&self) -> Result<MutexGuard<'_, BTreeMap<PathBuf, Vec<u8>>>, io::Error> {
        self.files
            .lock()
            .map_err(|_| io::Error::other("memory storage lock poisoned"))
    }

    /// Returns a copy of the file at `path`, if it exists.
    pub fn get(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        self.files().ok()?.get(path.as_ref()).cloned()
    }

    /// Removes the file at `path`, returning whether it existed.
    pub fn remove(&self, path: impl AsRef<Path>) -> bool {
        match self.files() {
            Ok(mut files) => files.remove(path.as_ref()).is_some(),
            Err(_) => false,
        }
    }
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("no such file: {}", path.display()),
    )
}

impl Storage for Memory {
    fn write_all(&self, path: &Path, data: &[u8]) -> Result<(), io::Error> {
        self.files()?.insert(path.to_path_buf(), data.to_vec());
        Ok(())
    }

    fn size(&self, path: &Path) -> Result<u64, io::Error> {
        let files = self.files()?;
        let content = files.get(path).ok_or_else(|| not_found(path))?;
        Ok(content.len() as u64)
    }

    fn read_all(&self, path: &Path, dst: &mut Vec<u8>) -> Result<usize, io::Error> {
        let files = self.files()?;
        let content = files.get(path).ok_or_else(|| not_found(path))?;
        dst.extend_from_slice(content);
        Ok(content.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_write_read() {
        let storage = Memory::default();
        let path = Path::new("dump.bin");
        storage.write_all(path, &[1, 2, 3]).unwrap();
        assert_eq!(storage.size(path).unwrap(), 3);

        let mut dst = vec![9];
        assert_eq!(storage.read_all(path, &mut dst).unwrap(), 3);
        assert_eq!(dst, vec![9, 1, 2, 3]);

        // Overwrite truncates
        storage.write_all(path, &[4]).unwrap();
        assert_eq!(storage.get(path), Some(vec![4]));
    }

    #[test]
    fn test_memory_shared_between_clones() {
        let storage = Memory::default();
        let clone = storage.clone();
        clone.write_all(Path::new("a"), b"hello").unwrap();
        assert_eq!(storage.get("a"), Some(b"hello".to_vec()));
        assert!(storage.remove("a"));
        assert!(!clone.remove("a"));
    }

    #[test]
    fn test_memory_missing() {
        let storage = Memory::default();
        let path = Path::new("missing");
        assert_eq!(
            storage.size(path).unwrap_err().kind(),
            io::ErrorKind::NotFound
        );
        let mut dst = Vec::new();
        assert_eq!(
            storage.read_all(path, &mut dst).unwrap_err().kind(),
            io::ErrorKind::NotFound
        );
        assert!(dst.is_empty());
    }

    #[test]
    fn test_fs_write_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dump.bin");
        Fs.write_all(&path, &[0xAA; 10]).unwrap();
        assert_eq!(Fs.size(&path).unwrap(), 10);

        let mut dst = Vec::new();
        assert_eq!(Fs.read_all(&path, &mut dst).unwrap(), 10);
        assert_eq!(dst, vec![0xAA; 10]);

        // Missing file
        let missing = dir.path().join("missing.bin");
        assert_eq!(
            Fs.read_all(&missing, &mut dst).unwrap_err().kind(),
            io::ErrorKind::NotFound
        );
    }
}
