//! ESP-IDF WiFi driver wrapper.
//!
//! Thin adapter from the [`Radio`] trait onto `esp_idf_svc::wifi::EspWifi`.
//! Join requests are fired without waiting for the connection or DHCP to
//! come up; the boot design treats "connecting" as terminal until the next
//! power cycle.

use super::{ApName, Radio};
use crate::config::BoundedString;
use esp_idf_hal::modem::Modem;
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::wifi::{
    AccessPointConfiguration, AuthMethod, ClientConfiguration, Configuration, EspWifi,
};
use esp_idf_sys::EspError;
use log::info;

/// WiFi radio backed by the ESP-IDF driver.
pub struct EspRadio<'a> {
    wifi: EspWifi<'a>,
}

impl<'a> EspRadio<'a> {
    /// Create a new radio wrapper from the modem peripheral.
    pub fn new(modem: Modem, sysloop: EspSystemEventLoop) -> Result<Self, EspError> {
        let wifi = EspWifi::new(modem, sysloop, None)?;
        Ok(Self { wifi })
    }
}

/// Convert a credential string into the driver's fixed-capacity form.
fn driver_str<const N: usize>(s: &str) -> Result<heapless::String<N>, EspError> {
    s.try_into()
        .map_err(|_| EspError::from_infallible::<{ esp_idf_sys::ESP_ERR_INVALID_ARG }>())
}

impl<'a> Radio for EspRadio<'a> {
    type Error = EspError;

    fn join(&mut self, ssid: &str, psk: &str) -> Result<(), EspError> {
        let auth_method = if psk.is_empty() {
            AuthMethod::None
        } else {
            AuthMethod::WPA2Personal
        };

        self.wifi
            .set_configuration(&Configuration::Client(ClientConfiguration {
                ssid: driver_str(ssid)?,
                password: driver_str(psk)?,
                auth_method,
                ..Default::default()
            }))?;

        self.wifi.start()?;
        // Fire the join request; status is deliberately not awaited.
        self.wifi.connect()?;
        Ok(())
    }

    fn enter_setup_mode(&mut self, ap_ssid: &str, ap_passphrase: &str) -> Result<(), EspError> {
        self.wifi.set_configuration(&Configuration::Mixed(
            ClientConfiguration::default(),
            AccessPointConfiguration {
                ssid: driver_str(ap_ssid)?,
                password: driver_str(ap_passphrase)?,
                auth_method: AuthMethod::WPA2Personal,
                ..Default::default()
            },
        ))?;

        self.wifi.start()?;
        info!("Setup access point started: {}", ap_ssid);
        Ok(())
    }

    fn scan(&mut self) -> Result<Vec<ApName>, EspError> {
        let aps = self.wifi.scan()?;
        Ok(aps
            .iter()
            .map(|ap| BoundedString::from_truncated(ap.ssid.as_str()))
            .collect())
    }

    fn log_diagnostics(&self) {
        info!("----------   WiFi Info --------");
        match self.wifi.get_configuration() {
            Ok(Configuration::Client(client)) => {
                info!(
                    "mode: station, ssid: {}, auth: {:?}, channel: {:?}",
                    client.ssid, client.auth_method, client.channel
                );
            }
            Ok(Configuration::Mixed(_, ap)) => {
                info!("mode: station + access point, ap ssid: {}", ap.ssid);
            }
            Ok(Configuration::AccessPoint(ap)) => info!("mode: access point, ssid: {}", ap.ssid),
            Ok(Configuration::None) => info!("mode: none"),
            Err(e) => info!("configuration unavailable: {e}"),
        }
        info!("driver started: {}", self.wifi.is_started().unwrap_or(false));
        info!("----------   WiFi Info --------");
    }
}
