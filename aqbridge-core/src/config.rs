//! Device Configuration
//!
//! Static per-device settings, read once when the device is set up and never
//! re-read while it runs. Field names in serialized form match the keys of
//! the hosting plugin's config file:
//!
//! ```json
//! {
//!   "devType": "awair-r2",
//!   "devId": "12345",
//!   "token": "eyJ...",
//!   "polling_interval": 900,
//!   "carbonDioxideThreshold": 1200,
//!   "voc_mixture_mw": 72.66578273019740,
//!   "endpoint": "15-min-avg",
//!   "limit": 12,
//!   "logging": false
//! }
//! ```
//!
//! Every key except `devType`, `devId` and `token` is optional.

use alloc::format;
use alloc::string::String;
use core::fmt;
use core::time::Duration;

use crate::constants::physics::DEFAULT_VOC_MOLECULAR_WEIGHT_G_PER_MOL;
use crate::constants::polling::{
    DEFAULT_API_BASE_URL, DEFAULT_MANUFACTURER, DEFAULT_POLLING_INTERVAL_S,
    DEFAULT_RESULT_LIMIT, NO_CO2_DEVICE_TYPE,
};
use crate::cycle::CycleSettings;
use crate::errors::ConfigError;

/// Averaging endpoint of the air-data API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Endpoint {
    /// 15-minute averages
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "15-min-avg"))]
    FifteenMinuteAverage,
    /// 5-minute averages
    #[cfg_attr(feature = "serde", serde(rename = "5-min-avg"))]
    FiveMinuteAverage,
    /// Raw 10-second samples
    #[cfg_attr(feature = "serde", serde(rename = "raw"))]
    Raw,
    /// Most recent sample only
    #[cfg_attr(feature = "serde", serde(rename = "latest"))]
    Latest,
}

impl Endpoint {
    /// Path segment used in the API URL
    pub const fn path(&self) -> &'static str {
        match self {
            Endpoint::FifteenMinuteAverage => "15-min-avg",
            Endpoint::FiveMinuteAverage => "5-min-avg",
            Endpoint::Raw => "raw",
            Endpoint::Latest => "latest",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Configuration for one air-quality device
#[derive(Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct DeviceConfig {
    /// Device type, e.g. `awair-r2` or `awair-mint`
    #[cfg_attr(feature = "serde", serde(rename = "devType"))]
    pub device_type: String,

    /// Device id within its type
    #[cfg_attr(feature = "serde", serde(rename = "devId"))]
    pub device_id: String,

    /// Bearer token for the data API
    pub token: String,

    /// Seconds between cycles; 0 or less runs only the initial cycle
    #[cfg_attr(feature = "serde", serde(default = "default_polling_interval"))]
    pub polling_interval: i64,

    /// CO2 detection threshold in ppm; 0 disables detection
    #[cfg_attr(feature = "serde", serde(rename = "carbonDioxideThreshold", default))]
    pub co2_threshold_ppm: f64,

    /// Molecular weight (g/mol) of the reference VOC mixture
    #[cfg_attr(feature = "serde", serde(rename = "voc_mixture_mw", default = "default_voc_mw"))]
    pub voc_molecular_weight: f64,

    #[cfg_attr(feature = "serde", serde(default))]
    pub endpoint: Endpoint,

    /// Number of reading periods requested per fetch
    #[cfg_attr(feature = "serde", serde(default = "default_limit"))]
    pub limit: u32,

    /// Verbose per-cycle logging
    #[cfg_attr(feature = "serde", serde(default))]
    pub logging: bool,

    #[cfg_attr(feature = "serde", serde(default = "default_manufacturer"))]
    pub manufacturer: String,

    /// Serial number; defaults to `{devType}_{devId}`
    #[cfg_attr(feature = "serde", serde(default))]
    pub serial: Option<String>,

    /// Full data URL, replacing the one derived from type, id and endpoint
    #[cfg_attr(feature = "serde", serde(default))]
    pub url: Option<String>,
}

#[cfg(feature = "serde")]
fn default_polling_interval() -> i64 {
    DEFAULT_POLLING_INTERVAL_S
}

#[cfg(feature = "serde")]
fn default_voc_mw() -> f64 {
    DEFAULT_VOC_MOLECULAR_WEIGHT_G_PER_MOL
}

#[cfg(feature = "serde")]
fn default_limit() -> u32 {
    DEFAULT_RESULT_LIMIT
}

#[cfg(feature = "serde")]
fn default_manufacturer() -> String {
    String::from(DEFAULT_MANUFACTURER)
}

impl fmt::Debug for DeviceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceConfig")
            .field("device_type", &self.device_type)
            .field("device_id", &self.device_id)
            .field("token", &"<redacted>")
            .field("polling_interval", &self.polling_interval)
            .field("co2_threshold_ppm", &self.co2_threshold_ppm)
            .field("voc_molecular_weight", &self.voc_molecular_weight)
            .field("endpoint", &self.endpoint)
            .field("limit", &self.limit)
            .field("logging", &self.logging)
            .field("manufacturer", &self.manufacturer)
            .field("serial", &self.serial)
            .field("url", &self.url)
            .finish()
    }
}

impl DeviceConfig {
    /// Create configuration with defaults for every optional key
    pub fn new(
        device_type: impl Into<String>,
        device_id: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            device_type: device_type.into(),
            device_id: device_id.into(),
            token: token.into(),
            polling_interval: DEFAULT_POLLING_INTERVAL_S,
            co2_threshold_ppm: 0.0,
            voc_molecular_weight: DEFAULT_VOC_MOLECULAR_WEIGHT_G_PER_MOL,
            endpoint: Endpoint::default(),
            limit: DEFAULT_RESULT_LIMIT,
            logging: false,
            manufacturer: String::from(DEFAULT_MANUFACTURER),
            serial: None,
            url: None,
        }
    }

    /// Set polling interval in seconds (0 disables periodic polling)
    pub fn polling_interval_secs(mut self, secs: i64) -> Self {
        self.polling_interval = secs;
        self
    }

    /// Set CO2 detection threshold in ppm (0 disables detection)
    pub fn co2_threshold(mut self, ppm: f64) -> Self {
        self.co2_threshold_ppm = ppm;
        self
    }

    /// Set reference VOC molecular weight in g/mol
    pub fn voc_molecular_weight(mut self, grams_per_mol: f64) -> Self {
        self.voc_molecular_weight = grams_per_mol;
        self
    }

    pub fn endpoint(mut self, endpoint: Endpoint) -> Self {
        self.endpoint = endpoint;
        self
    }

    /// Set number of reading periods per fetch
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn logging(mut self, enabled: bool) -> Self {
        self.logging = enabled;
        self
    }

    pub fn serial_number(mut self, serial: impl Into<String>) -> Self {
        self.serial = Some(serial.into());
        self
    }

    /// Override the derived data URL
    pub fn data_url_override(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Reject values no cycle could work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.device_type.trim().is_empty() {
            return Err(ConfigError::InvalidConfig {
                field: "devType",
                reason: "must not be empty",
            });
        }
        if self.device_id.trim().is_empty() {
            return Err(ConfigError::InvalidConfig {
                field: "devId",
                reason: "must not be empty",
            });
        }
        if !self.voc_molecular_weight.is_finite() || self.voc_molecular_weight <= 0.0 {
            return Err(ConfigError::InvalidConfig {
                field: "voc_mixture_mw",
                reason: "must be a positive number",
            });
        }
        if self.co2_threshold_ppm.is_nan() {
            return Err(ConfigError::InvalidConfig {
                field: "carbonDioxideThreshold",
                reason: "must be a number",
            });
        }
        Ok(())
    }

    /// Whether this device variant has CO2 hardware
    pub fn has_co2_channel(&self) -> bool {
        self.device_type != NO_CO2_DEVICE_TYPE
    }

    /// Serial number, falling back to `{devType}_{devId}`
    pub fn serial(&self) -> String {
        match &self.serial {
            Some(serial) => serial.clone(),
            None => format!("{}_{}", self.device_type, self.device_id),
        }
    }

    /// URL the data source is read from
    pub fn data_url(&self) -> String {
        match &self.url {
            Some(url) => url.clone(),
            None => format!(
                "{}/{}/{}/air-data/{}?limit={}&desc=true",
                DEFAULT_API_BASE_URL, self.device_type, self.device_id, self.endpoint, self.limit
            ),
        }
    }

    /// Period between cycles, or `None` when periodic polling is disabled
    pub fn polling_period(&self) -> Option<Duration> {
        u64::try_from(self.polling_interval)
            .ok()
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// Parameters the per-cycle derivation needs
    pub fn cycle_settings(&self) -> CycleSettings {
        CycleSettings {
            co2_threshold_ppm: self.co2_threshold_ppm,
            voc_molecular_weight: self.voc_molecular_weight,
            has_co2_channel: self.has_co2_channel(),
            logging: self.logging,
            serial: self.serial(),
        }
    }

    /// Accessory information for hosts that publish device metadata
    pub fn device_info(&self) -> DeviceInfo {
        DeviceInfo {
            manufacturer: self.manufacturer.clone(),
            model: self.device_type.clone(),
            serial: self.serial(),
            firmware_revision: String::from(crate::VERSION),
        }
    }
}

/// Descriptive metadata about the bridged device
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DeviceInfo {
    pub manufacturer: String,
    pub model: String,
    pub serial: String,
    pub firmware_revision: String,
}
