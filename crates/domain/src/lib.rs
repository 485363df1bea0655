//! Domain layer - Pure device lifecycle model with no external dependencies
//!
//! This crate contains:
//! - Value objects (DeviceIdentifier, EnrolmentStatus, OwnershipType)
//! - The generic device and its stored mobile record
//! - The translator between the two
//! - Store and capability interfaces (traits)
//!
//! Principles:
//! - No dependencies on infrastructure
//! - Conversions are pure and infallible
//! - Testable in isolation

pub mod device;
pub mod error;

// Re-export commonly used types
pub use device::{Device, DeviceIdentifier, MobileDeviceRecord};
pub use error::{
    ApplicationError, DomainError, FeatureError, LifecycleError, LifecycleOperation, StorageError,
};
