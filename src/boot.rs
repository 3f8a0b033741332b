//! Boot orchestration.
//!
//! One pass per power cycle: read the stored credential record and either
//! fire a station join or drop into setup mode. The decision is re-evaluated
//! on every pass, never cached; the persisted document is the only input.
//!
//! Setup mode is a dead end in this core: the configuration server that
//! would complete provisioning does not exist, so leaving it takes an
//! external credential write followed by a power cycle.

use crate::config::CredentialRecord;
use crate::console::Console;
use crate::persistence;
use crate::storage::Storage;
use crate::wifi::Radio;
use log::{info, warn};

/// Network name broadcast while in setup mode. Identical across all devices
/// running this firmware, a known weakness of this core.
pub const SETUP_SSID: &str = "WIFI_SETUP";

/// Passphrase of the setup network.
pub const SETUP_PASSPHRASE: &str = "WIFI_SETUP";

/// Everything the orchestrator owns for the process lifetime: the mounted
/// filesystem, the radio and the diagnostic transport. Passed by reference
/// into each operation; there is no ambient global device state.
pub struct DeviceContext<S, R, C> {
    pub storage: S,
    pub radio: R,
    pub console: C,
}

/// State entered by one boot decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootState {
    /// A valid record exists; a join request has been issued.
    StationConnecting,
    /// No usable record; the device is broadcasting the setup network.
    Provisioning,
}

/// Run the boot decision and the entered state's actions.
///
/// With a valid record this issues exactly the stored SSID/PSK pair to the
/// radio and emits the diagnostic dump. Otherwise it switches to combined
/// access-point and station mode and logs one scan of visible networks.
/// With no valid record, no join request is ever issued.
pub fn boot_step<S, R, C>(ctx: &mut DeviceContext<S, R, C>) -> BootState
where
    S: Storage,
    R: Radio,
    C: Console,
{
    let record = persistence::load_credentials(&mut ctx.storage);
    if record.valid {
        connect_station(ctx, &record)
    } else {
        enter_provisioning(ctx)
    }
}

fn connect_station<S, R, C>(
    ctx: &mut DeviceContext<S, R, C>,
    record: &CredentialRecord,
) -> BootState
where
    S: Storage,
    R: Radio,
    C: Console,
{
    info!("Connecting to WiFi: {}", record.ssid);
    if let Err(e) = ctx.radio.join(record.ssid.as_str(), record.psk.as_str()) {
        // No retry and no state change: a failed join leaves the device
        // unreachable until the next power cycle.
        warn!("Join request failed: {e}");
    }
    ctx.radio.log_diagnostics();
    BootState::StationConnecting
}

fn enter_provisioning<S, R, C>(ctx: &mut DeviceContext<S, R, C>) -> BootState
where
    S: Storage,
    R: Radio,
    C: Console,
{
    info!("No usable WiFi config, entering setup mode");
    if let Err(e) = ctx.radio.enter_setup_mode(SETUP_SSID, SETUP_PASSPHRASE) {
        warn!("Failed to enter setup mode: {e}");
    }

    match ctx.radio.scan() {
        Ok(networks) => {
            info!("Discovered {} networks:", networks.len());
            for name in &networks {
                info!("  {}", name);
            }
        }
        Err(e) => warn!("Network scan failed: {e}"),
    }

    BootState::Provisioning
}

/// Factory-reset escape hatch, reached only after a station join.
///
/// Blocks on the diagnostic transport; any received byte erases the entire
/// flash filesystem (all stored documents, not just the credential record)
/// and the wait continues. Returns only when the transport closes, which on
/// device hardware never happens.
pub fn monitor<S, R, C>(ctx: &mut DeviceContext<S, R, C>)
where
    S: Storage,
    R: Radio,
    C: Console,
{
    while ctx.console.read_byte().is_some() {
        match ctx.storage.format() {
            Ok(()) => info!("Formatted flash filesystem"),
            Err(e) => warn!("Failed to format flash filesystem: {e}"),
        }
    }
}

/// One full boot pass: decide, act, and hold in the monitor loop on the
/// station path. The firmware entry point calls this in a loop so the
/// config check re-runs whenever a pass returns.
pub fn run<S, R, C>(ctx: &mut DeviceContext<S, R, C>) -> BootState
where
    S: Storage,
    R: Radio,
    C: Console,
{
    let state = boot_step(ctx);
    if state == BootState::StationConnecting {
        monitor(ctx);
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{load_credentials, save_credentials};
    use crate::testutil::{FakeRadio, MemStorage, ScriptedConsole};
    use crate::wifi::ApName;

    fn ctx_with(
        storage: MemStorage,
        console: ScriptedConsole,
    ) -> DeviceContext<MemStorage, FakeRadio, ScriptedConsole> {
        DeviceContext {
            storage,
            radio: FakeRadio::new(),
            console,
        }
    }

    #[test]
    fn test_valid_record_selects_station() {
        let mut storage = MemStorage::new();
        save_credentials(&mut storage, &CredentialRecord::new("Home", "secret123"));
        let mut ctx = ctx_with(storage, ScriptedConsole::empty());

        assert_eq!(boot_step(&mut ctx), BootState::StationConnecting);
        assert_eq!(
            ctx.radio.joins,
            vec![("Home".to_string(), "secret123".to_string())]
        );
        assert!(ctx.radio.setup_entries.is_empty());
        assert_eq!(ctx.radio.scans, 0);
    }

    #[test]
    fn test_empty_store_selects_provisioning() {
        let mut ctx = ctx_with(MemStorage::new(), ScriptedConsole::empty());
        ctx.radio.scan_results = vec![
            ApName::from_truncated("CoffeeShop"),
            ApName::from_truncated("Neighbor5G"),
        ];

        assert_eq!(boot_step(&mut ctx), BootState::Provisioning);
        assert!(ctx.radio.joins.is_empty());
        assert_eq!(
            ctx.radio.setup_entries,
            vec![(SETUP_SSID.to_string(), SETUP_PASSPHRASE.to_string())]
        );
        assert_eq!(ctx.radio.scans, 1);
    }

    #[test]
    fn test_invalid_document_selects_provisioning() {
        let mut storage = MemStorage::new();
        storage.insert(crate::persistence::CREDENTIAL_PATH, b"not json".to_vec());
        let mut ctx = ctx_with(storage, ScriptedConsole::empty());

        assert_eq!(boot_step(&mut ctx), BootState::Provisioning);
        assert!(ctx.radio.joins.is_empty());
    }

    #[test]
    fn test_decision_rechecked_each_step() {
        let mut storage = MemStorage::new();
        save_credentials(&mut storage, &CredentialRecord::new("Home", "secret123"));
        let mut ctx = ctx_with(storage, ScriptedConsole::empty());

        assert_eq!(boot_step(&mut ctx), BootState::StationConnecting);

        ctx.storage.format().unwrap();
        assert_eq!(boot_step(&mut ctx), BootState::Provisioning);
    }

    #[test]
    fn test_monitor_erases_on_any_byte() {
        let mut storage = MemStorage::new();
        save_credentials(&mut storage, &CredentialRecord::new("Home", "secret123"));
        let mut ctx = ctx_with(storage, ScriptedConsole::new(b"x"));

        monitor(&mut ctx);

        let record = load_credentials(&mut ctx.storage);
        assert!(!record.valid);
        assert!(record.ssid.is_empty());
    }

    #[test]
    fn test_monitor_without_input_erases_nothing() {
        let mut storage = MemStorage::new();
        save_credentials(&mut storage, &CredentialRecord::new("Home", "secret123"));
        let mut ctx = ctx_with(storage, ScriptedConsole::empty());

        monitor(&mut ctx);

        assert!(load_credentials(&mut ctx.storage).valid);
    }

    #[test]
    fn test_monitor_keeps_waiting_after_erase() {
        let mut storage = MemStorage::new();
        save_credentials(&mut storage, &CredentialRecord::new("Home", "secret123"));
        // Three bytes, three erases; the loop only ends when input does.
        let mut ctx = ctx_with(storage, ScriptedConsole::new(b"abc"));

        monitor(&mut ctx);

        assert_eq!(ctx.console.remaining(), 0);
        assert!(!load_credentials(&mut ctx.storage).valid);
    }

    #[test]
    fn test_run_station_path_reaches_monitor() {
        let mut storage = MemStorage::new();
        save_credentials(&mut storage, &CredentialRecord::new("Home", "secret123"));
        let mut ctx = ctx_with(storage, ScriptedConsole::new(b"!"));

        assert_eq!(run(&mut ctx), BootState::StationConnecting);
        assert!(!load_credentials(&mut ctx.storage).valid);
    }

    #[test]
    fn test_run_provisioning_path_skips_monitor() {
        let mut ctx = ctx_with(MemStorage::new(), ScriptedConsole::new(b"!"));

        assert_eq!(run(&mut ctx), BootState::Provisioning);
        // Monitor never ran: the scripted byte is still queued.
        assert_eq!(ctx.console.remaining(), 1);
    }
}
