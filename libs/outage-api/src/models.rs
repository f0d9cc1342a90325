//! Wire models for the outage service.
//!
//! All timestamps are UTC instants serialized in RFC 3339 with millisecond
//! precision and a `Z` suffix, exactly as the service emits them.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A reported unavailability window for one device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outage {
    /// Identifier of the device the outage was reported for.
    pub id: String,
    /// Start of the unavailability window.
    pub begin: DateTime<Utc>,
    /// End of the unavailability window. Not validated against `begin`;
    /// both are passed through unchanged.
    pub end: DateTime<Utc>,
}

/// A device registered to a site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    /// Device identifier, unique within one site's registry.
    pub id: String,
    /// Human-readable label.
    pub name: String,
}

/// The device registry for one site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteInfo {
    /// Devices registered to the site. A response without a `devices`
    /// field is treated as an empty registry.
    #[serde(default)]
    pub devices: Vec<Device>,
}

impl SiteInfo {
    /// Device id to display name mapping. Later entries win on duplicate ids.
    #[must_use]
    pub fn device_names(&self) -> HashMap<&str, &str> {
        self.devices
            .iter()
            .map(|device| (device.id.as_str(), device.name.as_str()))
            .collect()
    }
}

/// An outage enriched with the owning device's display name, as submitted
/// back to the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteOutage {
    /// Identifier of the device the outage belongs to.
    pub id: String,
    /// Display name of the device.
    pub name: String,
    /// Start of the unavailability window.
    pub begin: DateTime<Utc>,
    /// End of the unavailability window.
    pub end: DateTime<Utc>,
}
