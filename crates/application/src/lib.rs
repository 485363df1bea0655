//! Application layer - Device lifecycle use cases

pub mod device;

pub use device::{AndroidDeviceManager, ProviderRegistry};
