//! WiFi bootstrap firmware binary.

#[cfg(feature = "esp32")]
fn main() {
    use esp_idf_hal::peripherals::Peripherals;
    use esp_idf_svc::eventloop::EspSystemEventLoop;
    use wifi_bootstrap_esp32::boot::{self, DeviceContext};
    use wifi_bootstrap_esp32::console::StdinConsole;
    use wifi_bootstrap_esp32::storage::spiffs::{SpiffsStorage, DEFAULT_MOUNT_POINT};
    use wifi_bootstrap_esp32::wifi::EspRadio;

    // Link ESP-IDF patches (must be first!)
    esp_idf_sys::link_patches();

    // Initialize ESP-IDF logger for log crate integration
    esp_idf_svc::log::EspLogger::initialize_default();

    // Mount failure is fatal for this boot cycle: no retry, no degraded mode.
    let storage = match SpiffsStorage::mount(DEFAULT_MOUNT_POINT) {
        Ok(storage) => storage,
        Err(e) => {
            log::error!("SPIFFS mount failed: {e}");
            return;
        }
    };

    let peripherals = match Peripherals::take() {
        Ok(peripherals) => peripherals,
        Err(e) => {
            log::error!("Failed to take peripherals: {e}");
            return;
        }
    };
    let sysloop = match EspSystemEventLoop::take() {
        Ok(sysloop) => sysloop,
        Err(e) => {
            log::error!("Failed to take system event loop: {e}");
            return;
        }
    };
    let radio = match EspRadio::new(peripherals.modem, sysloop) {
        Ok(radio) => radio,
        Err(e) => {
            log::error!("Failed to initialize WiFi driver: {e}");
            return;
        }
    };

    let mut ctx = DeviceContext {
        storage,
        radio,
        console: StdinConsole::new(),
    };

    // The station path holds inside run() until the transport closes (never,
    // on hardware); the provisioning path returns and gets re-checked.
    loop {
        boot::run(&mut ctx);
    }
}

#[cfg(not(feature = "esp32"))]
fn main() {
    println!("This binary requires the 'esp32' feature.");
    println!("Use 'cargo test' for host testing.");
}
