//! Polling and Data-Source Defaults
//!
//! Values applied when a device configuration leaves a key unset.

/// Seconds between polling cycles (15 minutes).
///
/// Matches the coarsest averaging endpoint, so each cycle sees fresh data.
pub const DEFAULT_POLLING_INTERVAL_S: i64 = 900;

/// Number of reading periods requested per fetch.
pub const DEFAULT_RESULT_LIMIT: u32 = 12;

/// Manufacturer reported in accessory information.
pub const DEFAULT_MANUFACTURER: &str = "Awair";

/// Base of the developer REST API.
pub const DEFAULT_API_BASE_URL: &str = "http://developer-apis.awair.is/v1/users/self/devices";

/// Device type whose hardware has no CO2 sensor.
pub const NO_CO2_DEVICE_TYPE: &str = "awair-mint";
