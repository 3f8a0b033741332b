//! Diagnostic transport input.
//!
//! The monitor loop waits on this for operator input; a blocking read
//! replaces the original firmware's busy-poll while preserving the
//! "any byte triggers erase" contract.

use std::io::Read;

/// Byte-oriented operator input on the diagnostic transport.
pub trait Console {
    /// Block until one byte arrives.
    ///
    /// Returns `None` when the transport is closed; on device hardware the
    /// UART console never closes, so this only ends host-side sessions.
    fn read_byte(&mut self) -> Option<u8>;
}

/// Console over standard input (the UART console under ESP-IDF).
#[derive(Default)]
pub struct StdinConsole;

impl StdinConsole {
    pub fn new() -> Self {
        Self
    }
}

impl Console for StdinConsole {
    fn read_byte(&mut self) -> Option<u8> {
        let mut byte = [0u8; 1];
        match std::io::stdin().lock().read(&mut byte) {
            Ok(1) => Some(byte[0]),
            _ => None,
        }
    }
}
