//! Test doubles shared by the unit tests: in-memory storage, a recording
//! radio, and a scripted console.

use crate::console::Console;
use crate::storage::Storage;
use crate::wifi::{ApName, Radio};
use std::collections::{HashMap, VecDeque};
use std::convert::Infallible;
use std::io;

/// In-memory document store with switchable failure modes.
#[derive(Default)]
pub struct MemStorage {
    files: HashMap<String, Vec<u8>>,
    /// Every write fails as if the file could not be opened.
    pub fail_writes: bool,
    /// Writes accept only half the data, leaving a partial document.
    pub short_writes: bool,
}

impl MemStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a raw document directly, bypassing the write path.
    pub fn insert(&mut self, path: &str, data: Vec<u8>) {
        self.files.insert(path.to_string(), data);
    }
}

impl Storage for MemStorage {
    fn exists(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    fn read(&mut self, path: &str) -> io::Result<Vec<u8>> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such document"))
    }

    fn write(&mut self, path: &str, data: &[u8]) -> io::Result<usize> {
        if self.fail_writes {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "write refused",
            ));
        }
        let accepted = if self.short_writes {
            data.len() / 2
        } else {
            data.len()
        };
        self.files
            .insert(path.to_string(), data[..accepted].to_vec());
        Ok(accepted)
    }

    fn format(&mut self) -> io::Result<()> {
        self.files.clear();
        Ok(())
    }
}

/// Radio that records every request instead of touching hardware.
#[derive(Default)]
pub struct FakeRadio {
    /// `(ssid, psk)` pairs passed to `join`, in order.
    pub joins: Vec<(String, String)>,
    /// `(ap_ssid, ap_passphrase)` pairs passed to `enter_setup_mode`.
    pub setup_entries: Vec<(String, String)>,
    /// Names returned by every scan.
    pub scan_results: Vec<ApName>,
    /// Number of scans performed.
    pub scans: usize,
}

impl FakeRadio {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Radio for FakeRadio {
    type Error = Infallible;

    fn join(&mut self, ssid: &str, psk: &str) -> Result<(), Infallible> {
        self.joins.push((ssid.to_string(), psk.to_string()));
        Ok(())
    }

    fn enter_setup_mode(&mut self, ap_ssid: &str, ap_passphrase: &str) -> Result<(), Infallible> {
        self.setup_entries
            .push((ap_ssid.to_string(), ap_passphrase.to_string()));
        Ok(())
    }

    fn scan(&mut self) -> Result<Vec<ApName>, Infallible> {
        self.scans += 1;
        Ok(self.scan_results.clone())
    }

    fn log_diagnostics(&self) {}
}

/// Console fed from a fixed byte script; "closed" once exhausted.
pub struct ScriptedConsole {
    bytes: VecDeque<u8>,
}

impl ScriptedConsole {
    pub fn new(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.iter().copied().collect(),
        }
    }

    pub fn empty() -> Self {
        Self::new(&[])
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len()
    }
}

impl Console for ScriptedConsole {
    fn read_byte(&mut self) -> Option<u8> {
        self.bytes.pop_front()
    }
}
