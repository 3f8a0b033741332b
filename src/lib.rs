//! WiFi bootstrap firmware library.
//!
//! A minimal device-provisioning bootstrap for an ESP32: credentials persist
//! as a JSON document on the SPIFFS partition, a valid record triggers a
//! station join on boot, and an empty or corrupt record drops the device
//! into a combined access-point/station setup mode.
//!
//! Hardware drivers live behind the `esp32` cargo feature; everything else
//! is platform-independent and tested on the host machine.

pub mod boot;
pub mod config;
pub mod console;
pub mod persistence;
pub mod storage;
pub mod wifi;

#[cfg(test)]
pub(crate) mod testutil;

// Re-export commonly used items
pub use boot::{BootState, DeviceContext};
pub use config::{BoundedString, CredentialRecord, MAX_AP_NAME_LEN, MAX_CREDENTIAL_LEN};
pub use console::{Console, StdinConsole};
pub use storage::{DirStorage, Storage};
pub use wifi::{ApName, Radio};
