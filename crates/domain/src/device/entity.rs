use super::{DeviceIdentifier, EnrolmentStatus, OwnershipType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Latitude/longitude pair reported by a device.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoLocation {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Generic, device-type independent view of a managed device.
///
/// This is the shape exchanged with the host framework. Device-type specific
/// persistence works on [`MobileDeviceRecord`](super::MobileDeviceRecord)
/// and converts through the translator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub identifier: DeviceIdentifier,
    pub device_type: String,
    pub ownership: OwnershipType,
    pub status: EnrolmentStatus,
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
    #[serde(default)]
    pub location: Option<GeoLocation>,
}

impl Device {
    pub fn new(identifier: DeviceIdentifier, device_type: impl Into<String>) -> Self {
        Self {
            identifier,
            device_type: device_type.into(),
            ownership: OwnershipType::default(),
            status: EnrolmentStatus::default(),
            properties: BTreeMap::new(),
            location: None,
        }
    }

    pub fn with_enrolment(mut self, ownership: OwnershipType, status: EnrolmentStatus) -> Self {
        self.ownership = ownership;
        self.status = status;
        self
    }

    pub fn with_location(mut self, latitude: f64, longitude: f64) -> Self {
        self.location = Some(GeoLocation::new(latitude, longitude));
        self
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }
}
