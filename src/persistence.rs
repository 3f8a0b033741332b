//! Credential persistence.
//!
//! This module stores the WiFi credential record as a small JSON document at
//! a fixed path on the flash filesystem so it survives reboots. The document
//! is the single source of truth: the orchestrator re-reads it on every boot
//! decision and never caches a record across cycles.
//!
//! All recoverable failures (missing file, open error, malformed document)
//! collapse into the invalid-record sentinel so the caller can route to
//! provisioning without special cases.
//!
//! # Usage
//!
//! ```ignore
//! use wifi_bootstrap_esp32::persistence;
//!
//! let record = persistence::load_credentials(&mut storage);
//! if record.valid {
//!     radio.join(record.ssid.as_str(), record.psk.as_str())?;
//! }
//! ```

use crate::config::CredentialRecord;
use crate::storage::Storage;
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use std::io;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Fixed storage path of the credential document.
pub const CREDENTIAL_PATH: &str = "/wifi.json";

/// Fixed size of the serialization buffer. If the two fields plus JSON
/// structural overhead exceed this, the write fails.
const DOC_BUFFER_LEN: usize = 256;

/// Owned form of the persisted document, used during deserialization.
/// The PSK is sensitive, so the whole document is zeroed on drop.
#[derive(Deserialize, Zeroize, ZeroizeOnDrop)]
struct CredentialDoc {
    #[serde(default)]
    ssid: String,
    #[serde(default)]
    psk: String,
}

/// Borrowed form of the document, used during serialization.
#[derive(Serialize)]
struct CredentialDocRef<'a> {
    ssid: &'a str,
    psk: &'a str,
}

/// Load the credential record from storage.
///
/// Returns the invalid-record sentinel if the document is missing, cannot be
/// opened, or fails to parse; none of these are fatal. On success the record
/// has `valid == true` and each field truncated (not rejected) to its bound.
pub fn load_credentials<S: Storage>(storage: &mut S) -> CredentialRecord {
    if !storage.exists(CREDENTIAL_PATH) {
        info!("Config file not found");
        return CredentialRecord::invalid();
    }

    let data = match storage.read(CREDENTIAL_PATH) {
        Ok(data) => data,
        Err(e) => {
            warn!("Failed to open config file for reading: {e}");
            return CredentialRecord::invalid();
        }
    };

    let doc: CredentialDoc = match serde_json::from_slice(&data) {
        Ok(doc) => doc,
        Err(e) => {
            warn!("Failed to deserialize config file: {e}");
            return CredentialRecord::invalid();
        }
    };

    info!("Read config successfully");
    CredentialRecord::new(&doc.ssid, &doc.psk)
}

/// Save the credential record to storage.
///
/// Returns `true` only after a fully successful serialize, write and close.
/// On `false` the stored document may be in a partial state: there is no
/// atomic replace on this filesystem, an accepted limitation of the target.
pub fn save_credentials<S: Storage>(storage: &mut S, record: &CredentialRecord) -> bool {
    let doc = CredentialDocRef {
        ssid: record.ssid.as_str(),
        psk: record.psk.as_str(),
    };

    let mut buf = [0u8; DOC_BUFFER_LEN];
    let len = {
        let mut cursor = io::Cursor::new(&mut buf[..]);
        if let Err(e) = serde_json::to_writer(&mut cursor, &doc) {
            error!("Failed to serialize config: {e}");
            return false;
        }
        cursor.position() as usize
    };

    match storage.write(CREDENTIAL_PATH, &buf[..len]) {
        Ok(written) if written == len => {
            info!("Wrote config successfully");
            true
        }
        Ok(written) => {
            error!("Short write to config file: {written} of {len} bytes");
            false
        }
        Err(e) => {
            error!("Failed to open config file for writing: {e}");
            false
        }
    }
}
