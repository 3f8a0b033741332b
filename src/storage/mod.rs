//! Flash filesystem abstraction.
//!
//! The bootstrap core only ever touches storage through the [`Storage`]
//! trait, so the credential store and the orchestrator can be tested on the
//! host without hardware.
//!
//! # Components
//!
//! - [`DirStorage`] - `std::fs` implementation rooted at a directory
//! - [`spiffs`] - SPIFFS mount/format via the ESP-IDF VFS (ESP32 only)
//!
//! The filesystem is exclusively owned by the single thread of control for
//! the device's entire uptime; the underlying SPIFFS driver is not documented
//! as reentrant-safe, so any future multi-threaded extension must serialize
//! access behind one mutual-exclusion point.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

#[cfg(feature = "esp32")]
pub mod spiffs;

#[cfg(feature = "esp32")]
pub use spiffs::SpiffsStorage;

/// A mounted flash filesystem holding small named documents.
pub trait Storage {
    /// Whether a document exists at `path`.
    fn exists(&self, path: &str) -> bool;

    /// Read the whole document at `path`.
    fn read(&mut self, path: &str) -> io::Result<Vec<u8>>;

    /// Create-or-truncate the document at `path` and write `data`.
    ///
    /// Returns the number of bytes the backend accepted, which may be fewer
    /// than `data.len()` on a short write. There is no atomic replace: a
    /// failure mid-write can leave a partial document behind.
    fn write(&mut self, path: &str, data: &[u8]) -> io::Result<usize>;

    /// Erase every stored document.
    fn format(&mut self) -> io::Result<()>;
}

/// `std::fs`-backed storage rooted at a directory.
///
/// On device this is the data plane over the mounted SPIFFS partition, which
/// ESP-IDF exposes through the std VFS; on the host it works against any
/// directory.
pub struct DirStorage {
    root: PathBuf,
}

impl DirStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_start_matches('/'))
    }
}

impl Storage for DirStorage {
    fn exists(&self, path: &str) -> bool {
        self.resolve(path).exists()
    }

    fn read(&mut self, path: &str) -> io::Result<Vec<u8>> {
        let mut file = fs::File::open(self.resolve(path))?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;
        Ok(data)
    }

    fn write(&mut self, path: &str, data: &[u8]) -> io::Result<usize> {
        let mut file = fs::File::create(self.resolve(path))?;
        let written = file.write(data)?;
        file.flush()?;
        Ok(written)
    }

    fn format(&mut self) -> io::Result<()> {
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            let path = entry.path();
            if path.is_dir() {
                fs::remove_dir_all(&path)?;
            } else {
                fs::remove_file(&path)?;
            }
        }
        Ok(())
    }
}

/// Create a uniquely-named scratch directory for host tests.
#[cfg(test)]
pub(crate) fn scratch_dir(tag: &str) -> PathBuf {
    use std::sync::atomic::{AtomicU32, Ordering};
    static COUNTER: AtomicU32 = AtomicU32::new(0);

    let dir = std::env::temp_dir().join(format!(
        "wifi-bootstrap-{}-{}-{}",
        tag,
        std::process::id(),
        COUNTER.fetch_add(1, Ordering::Relaxed)
    ));
    fs::create_dir_all(&dir).expect("failed to create scratch dir");
    dir
}
