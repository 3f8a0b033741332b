//! WiFi credential data structures.
//!
//! The credential record is the single persisted input to the boot decision.
//! Its string fields are bounded types: the maximum length is part of the
//! type, and the only lossy constructor truncates instead of failing, so a
//! record loaded from storage can never overrun a field regardless of what
//! the document contains.
//!
//! # Example
//!
//! ```
//! use wifi_bootstrap_esp32::config::CredentialRecord;
//!
//! let record = CredentialRecord::new("MyNetwork", "MyPassword");
//! assert!(record.valid);
//! assert_eq!(record.ssid.as_str(), "MyNetwork");
//! ```

use std::fmt;

/// Maximum stored length of the network SSID and pre-shared key, in bytes.
pub const MAX_CREDENTIAL_LEN: usize = 127;

/// Maximum length of an access-point name reported by a scan, in bytes.
/// One byte of the radio driver's 32-byte name field is reserved for the
/// terminator.
pub const MAX_AP_NAME_LEN: usize = 31;

/// A string that never exceeds `N` bytes.
///
/// Backed by a fixed-capacity [`heapless::String`]; construction from
/// arbitrary input goes through [`from_truncated`](Self::from_truncated),
/// which cuts the input at the largest char boundary that fits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundedString<const N: usize>(heapless::String<N>);

impl<const N: usize> BoundedString<N> {
    /// Create an empty bounded string.
    pub const fn new() -> Self {
        Self(heapless::String::new())
    }

    /// Copy `s` into a bounded string, truncating to at most `N` bytes.
    ///
    /// Truncation lands on a char boundary, so the result is always valid
    /// UTF-8 and may be shorter than `N` for multibyte input.
    pub fn from_truncated(s: &str) -> Self {
        let mut end = s.len().min(N);
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        let mut inner = heapless::String::new();
        // Cannot fail: end <= N by construction.
        let _ = inner.push_str(&s[..end]);
        Self(inner)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<const N: usize> AsRef<str> for BoundedString<N> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl<const N: usize> fmt::Display for BoundedString<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<const N: usize> PartialEq<&str> for BoundedString<N> {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// The persisted WiFi credential pair plus its validity sentinel.
///
/// `valid` is true only when the record was successfully parsed from storage
/// or explicitly constructed with [`new`](Self::new). An invalid record must
/// never be used to attempt a connection; the orchestrator routes it to
/// provisioning instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialRecord {
    /// Network SSID, 0-127 bytes.
    pub ssid: BoundedString<MAX_CREDENTIAL_LEN>,
    /// Pre-shared key, 0-127 bytes. Empty means an open network.
    pub psk: BoundedString<MAX_CREDENTIAL_LEN>,
    /// True only for a usable record.
    pub valid: bool,
}

impl CredentialRecord {
    /// Construct a valid record, truncating oversized fields.
    pub fn new(ssid: &str, psk: &str) -> Self {
        Self {
            ssid: BoundedString::from_truncated(ssid),
            psk: BoundedString::from_truncated(psk),
            valid: true,
        }
    }

    /// The "no usable record" sentinel: empty fields, `valid == false`.
    pub fn invalid() -> Self {
        Self::default()
    }
}
