mod entity;
mod enrolment;
mod identifier;
mod management;
mod record;
mod store;
pub mod translator;

pub use entity::{Device, GeoLocation};
pub use enrolment::{EnrolmentStatus, OwnershipType};
pub use identifier::DeviceIdentifier;
pub use management::{
    Application, ApplicationManager, DeviceManagementService, Feature, FeatureManager, Operation,
};
pub use record::MobileDeviceRecord;
pub use store::{RecordStore, RecordTransaction};

#[cfg(any(test, feature = "mock"))]
pub use store::MockRecordStore;
