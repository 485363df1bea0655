pub mod fixed_result;
mod manager;
mod registry;
mod unsupported;

pub use manager::{ANDROID_PROVIDER_TYPE, AndroidDeviceManager};
pub use registry::ProviderRegistry;
pub use unsupported::{UnsupportedApplicationManager, UnsupportedFeatureManager};
