//! Device configuration types.
//!
//! This module contains platform-independent types for the persisted WiFi
//! configuration that can be tested on the host machine.
//!
//! # Components
//!
//! - [`credentials`] - bounded strings and the credential record

mod credentials;

pub use credentials::{BoundedString, CredentialRecord, MAX_AP_NAME_LEN, MAX_CREDENTIAL_LEN};
