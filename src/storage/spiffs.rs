//! SPIFFS-backed storage for ESP32.
//!
//! Mounts the SPIFFS partition through the ESP-IDF VFS so regular `std::fs`
//! calls work against it, and exposes the whole-partition format call used by
//! the factory-reset escape hatch.

use super::{DirStorage, Storage};
use esp_idf_sys::{esp, esp_spiffs_format, esp_vfs_spiffs_conf_t, esp_vfs_spiffs_register, EspError};
use log::info;
use std::ffi::CString;
use std::io;
use std::ptr;

/// Default VFS mount point for the SPIFFS partition.
pub const DEFAULT_MOUNT_POINT: &str = "/spiffs";

/// Maximum number of simultaneously open files on the partition.
const MAX_OPEN_FILES: usize = 4;

/// Storage over the mounted SPIFFS partition.
///
/// File I/O goes through the std VFS via [`DirStorage`]; `format()` wipes
/// every document on the partition and leaves it mounted.
pub struct SpiffsStorage {
    dir: DirStorage,
    // Keeps the mount-point string alive for the lifetime of the mount.
    _base_path: CString,
}

impl SpiffsStorage {
    /// Mount the default SPIFFS partition at `mount_point`.
    ///
    /// If the partition cannot be mounted it is formatted and mounted again;
    /// only an unrecoverable driver error is returned, and the caller treats
    /// it as fatal for this boot cycle.
    pub fn mount(mount_point: &str) -> Result<Self, EspError> {
        let base_path = CString::new(mount_point).map_err(|_| {
            EspError::from_infallible::<{ esp_idf_sys::ESP_ERR_INVALID_ARG }>()
        })?;

        let conf = esp_vfs_spiffs_conf_t {
            base_path: base_path.as_ptr(),
            partition_label: ptr::null(),
            max_files: MAX_OPEN_FILES,
            format_if_mount_failed: true,
        };
        esp!(unsafe { esp_vfs_spiffs_register(&conf) })?;

        info!("SPIFFS mounted at {}", mount_point);
        Ok(Self {
            dir: DirStorage::new(mount_point),
            _base_path: base_path,
        })
    }

    fn format_partition(&mut self) -> Result<(), EspError> {
        esp!(unsafe { esp_spiffs_format(ptr::null()) })
    }
}

impl Storage for SpiffsStorage {
    fn exists(&self, path: &str) -> bool {
        self.dir.exists(path)
    }

    fn read(&mut self, path: &str) -> io::Result<Vec<u8>> {
        self.dir.read(path)
    }

    fn write(&mut self, path: &str, data: &[u8]) -> io::Result<usize> {
        self.dir.write(path, data)
    }

    fn format(&mut self) -> io::Result<()> {
        self.format_partition()
            .map_err(|e| io::Error::other(format!("SPIFFS format failed: {e}")))
    }
}
