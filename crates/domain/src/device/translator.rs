//! Pure conversions between [`Device`] and [`MobileDeviceRecord`].

use super::{Device, GeoLocation, MobileDeviceRecord};

pub const PROPERTY_IMEI: &str = "IMEI";
pub const PROPERTY_IMSI: &str = "IMSI";
pub const PROPERTY_VENDOR: &str = "VENDOR";
pub const PROPERTY_MODEL: &str = "MODEL";
pub const PROPERTY_OS_VERSION: &str = "OS_VERSION";
pub const PROPERTY_SERIAL: &str = "SERIAL";

pub fn to_stored_record(device: &Device) -> MobileDeviceRecord {
    let lookup = |name: &str| device.property(name).map(str::to_string);

    MobileDeviceRecord {
        id: device.identifier.clone(),
        device_type: device.device_type.clone(),
        ownership: device.ownership,
        status: device.status,
        vendor: lookup(PROPERTY_VENDOR),
        model: lookup(PROPERTY_MODEL),
        os_version: lookup(PROPERTY_OS_VERSION),
        imei: lookup(PROPERTY_IMEI),
        imsi: lookup(PROPERTY_IMSI),
        serial: lookup(PROPERTY_SERIAL),
        latitude: device.location.map(|l| l.latitude),
        longitude: device.location.map(|l| l.longitude),
        properties: device.properties.clone(),
    }
}

pub fn to_generic_device(record: &MobileDeviceRecord) -> Device {
    let location = match (record.latitude, record.longitude) {
        (Some(latitude), Some(longitude)) => Some(GeoLocation::new(latitude, longitude)),
        _ => None,
    };

    Device {
        identifier: record.id.clone(),
        device_type: record.device_type.clone(),
        ownership: record.ownership,
        status: record.status,
        properties: record.properties.clone(),
        location,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{DeviceIdentifier, EnrolmentStatus, OwnershipType};

    fn sample_device() -> Device {
        Device::new(DeviceIdentifier::new("A1").unwrap(), "android")
            .with_enrolment(OwnershipType::Cod, EnrolmentStatus::Created)
            .with_location(6.9, 79.8)
            .with_property(PROPERTY_IMEI, "356938035643809")
            .with_property(PROPERTY_VENDOR, "Samsung")
            .with_property("battery", "87")
    }

    #[test]
    fn test_well_known_properties_are_lifted() {
        let record = to_stored_record(&sample_device());

        assert_eq!(record.id.as_str(), "A1");
        assert_eq!(record.imei.as_deref(), Some("356938035643809"));
        assert_eq!(record.vendor.as_deref(), Some("Samsung"));
        assert_eq!(record.model, None);
        assert_eq!(record.latitude, Some(6.9));
        assert_eq!(record.longitude, Some(79.8));
        assert_eq!(record.ownership, OwnershipType::Cod);
        assert_eq!(record.status, EnrolmentStatus::Created);
        // The bag is kept whole, lifted keys included
        assert_eq!(record.properties.len(), 3);
    }

    #[test]
    fn test_record_converts_back_to_same_device() {
        let device = sample_device();
        assert_eq!(to_generic_device(&to_stored_record(&device)), device);
    }

    #[test]
    fn test_device_without_location() {
        let device = Device::new(DeviceIdentifier::new("A2").unwrap(), "android");
        let record = to_stored_record(&device);

        assert_eq!(record.latitude, None);
        assert_eq!(record.longitude, None);
        assert_eq!(to_generic_device(&record).location, None);
    }

    #[test]
    fn test_half_location_is_dropped() {
        let mut record = to_stored_record(&sample_device());
        record.longitude = None;

        assert_eq!(to_generic_device(&record).location, None);
    }

    #[test]
    fn test_merge_reported_info_keeps_enrolment() {
        let mut current = to_stored_record(&sample_device());
        let reported = to_stored_record(
            &Device::new(DeviceIdentifier::new("A1").unwrap(), "android")
                .with_enrolment(OwnershipType::Byod, EnrolmentStatus::Blocked)
                .with_location(7.0, 80.0)
                .with_property("imei", "999"),
        );

        current.merge_reported_info(&reported);

        assert_eq!(current.latitude, Some(7.0));
        assert_eq!(current.longitude, Some(80.0));
        assert_eq!(current.properties, reported.properties);
        assert_eq!(current.ownership, OwnershipType::Cod);
        assert_eq!(current.status, EnrolmentStatus::Created);
    }
}
