use super::{DeviceIdentifier, EnrolmentStatus, OwnershipType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Persisted projection of a mobile device.
///
/// Hardware fields are lifted out of well-known properties so stores can
/// index them; `properties` still holds the complete property bag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MobileDeviceRecord {
    pub id: DeviceIdentifier,
    pub device_type: String,
    pub ownership: OwnershipType,
    pub status: EnrolmentStatus,
    pub vendor: Option<String>,
    pub model: Option<String>,
    pub os_version: Option<String>,
    pub imei: Option<String>,
    pub imsi: Option<String>,
    pub serial: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub properties: BTreeMap<String, String>,
}

impl MobileDeviceRecord {
    /// Overlay the fields a device reports about itself (location and
    /// properties) onto this record. Enrolment status and ownership are left
    /// untouched.
    pub fn merge_reported_info(&mut self, reported: &MobileDeviceRecord) {
        self.latitude = reported.latitude;
        self.longitude = reported.longitude;
        self.properties = reported.properties.clone();
    }
}
