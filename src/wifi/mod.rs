//! WiFi radio abstraction.
//!
//! The orchestrator drives the radio through the [`Radio`] trait so the boot
//! decision logic stays host-testable.
//!
//! # Components
//!
//! - [`esp`] - ESP-IDF driver implementation (ESP32 only)

use crate::config::{BoundedString, MAX_AP_NAME_LEN};

#[cfg(feature = "esp32")]
pub mod esp;

#[cfg(feature = "esp32")]
pub use esp::EspRadio;

/// Broadcast name of one visible access point, as reported by a scan.
///
/// Bounded to the radio driver's advertised-name limit; produced as a finite
/// ordered sequence, rendered into log lines, then dropped. Never persisted.
pub type ApName = BoundedString<MAX_AP_NAME_LEN>;

/// Control surface of the WiFi radio.
pub trait Radio {
    type Error: std::fmt::Display;

    /// Issue a non-blocking request to join `ssid` as a station.
    ///
    /// Connection status is not reported back: the caller fires the request
    /// and moves on. A join that later fails leaves the device unreachable
    /// until the next power cycle.
    fn join(&mut self, ssid: &str, psk: &str) -> Result<(), Self::Error>;

    /// Switch to combined access-point and station mode, broadcasting
    /// `ap_ssid`/`ap_passphrase` so an operator's device can associate.
    fn enter_setup_mode(&mut self, ap_ssid: &str, ap_passphrase: &str)
        -> Result<(), Self::Error>;

    /// Perform one blocking scan of visible networks.
    fn scan(&mut self) -> Result<Vec<ApName>, Self::Error>;

    /// Emit a human-readable diagnostic dump to the log.
    fn log_diagnostics(&self);
}
