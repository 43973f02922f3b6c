//! Slot backends for the durable collection document
//!
//! The durable representation is a single named slot holding a UTF-8
//! text document. The embedding application decides where the bytes
//! live: a file under the local data directory, or process memory for
//! tests and hosts that move bytes themselves.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

/// A single named slot holding a UTF-8 text document
///
/// Every write fully overwrites the previous contents; there is no
/// partial update.
pub trait SlotBackend {
    /// Read the slot contents, `None` if nothing has been written yet
    fn read(&self) -> io::Result<Option<String>>;

    /// Overwrite the slot with `contents`
    fn write(&self, contents: &str) -> io::Result<()>;
}

/// Slot stored as a single file
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Default slot location under the platform-local data directory
    pub fn default_path() -> io::Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join("mneme").join("collection.json"))
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no local data directory"))
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl SlotBackend for FileSlot {
    fn read(&self) -> io::Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&self.path).map(Some)
    }

    fn write(&self, contents: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, contents)
    }
}

/// Slot held in process memory
#[derive(Default)]
pub struct MemorySlot {
    contents: Mutex<Option<String>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SlotBackend for MemorySlot {
    fn read(&self) -> io::Result<Option<String>> {
        let contents = self
            .contents
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "slot lock poisoned"))?;
        Ok(contents.clone())
    }

    fn write(&self, contents: &str) -> io::Result<()> {
        let mut slot = self
            .contents
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "slot lock poisoned"))?;
        *slot = Some(contents.to_string());
        Ok(())
    }
}
