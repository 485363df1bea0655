use super::{Device, DeviceIdentifier, EnrolmentStatus, OwnershipType};
use crate::error::{ApplicationError, FeatureError, LifecycleError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Capability surface one device family exposes to the host framework.
///
/// Implementations are registered by [`provider_type`](Self::provider_type).
#[async_trait]
pub trait DeviceManagementService: Send + Sync {
    /// Stable device-type tag, e.g. `"android"`.
    fn provider_type(&self) -> &str;

    fn feature_manager(&self) -> Arc<dyn FeatureManager>;

    fn application_manager(&self) -> Arc<dyn ApplicationManager>;

    async fn enroll_device(&self, device: &Device) -> Result<bool, LifecycleError>;

    async fn modify_enrollment(&self, device: &Device) -> Result<bool, LifecycleError>;

    async fn disenroll_device(&self, id: &DeviceIdentifier) -> Result<bool, LifecycleError>;

    async fn is_enrolled(&self, id: &DeviceIdentifier) -> Result<bool, LifecycleError>;

    async fn is_active(&self, id: &DeviceIdentifier) -> Result<bool, LifecycleError>;

    async fn set_active(&self, id: &DeviceIdentifier, active: bool)
    -> Result<bool, LifecycleError>;

    async fn get_device(&self, id: &DeviceIdentifier) -> Result<Device, LifecycleError>;

    async fn set_ownership(
        &self,
        id: &DeviceIdentifier,
        ownership: OwnershipType,
    ) -> Result<bool, LifecycleError>;

    async fn is_claimable(&self, id: &DeviceIdentifier) -> Result<bool, LifecycleError>;

    async fn set_status(
        &self,
        id: &DeviceIdentifier,
        current_user: &str,
        status: EnrolmentStatus,
    ) -> Result<bool, LifecycleError>;

    async fn update_device_info(
        &self,
        id: &DeviceIdentifier,
        device: &Device,
    ) -> Result<bool, LifecycleError>;

    async fn get_all_devices(&self) -> Result<Vec<Device>, LifecycleError>;
}

/// A capability a device type advertises (lock, wipe, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
}

pub trait FeatureManager: Send + Sync {
    fn features(&self) -> Result<Vec<Feature>, FeatureError>;

    fn feature(&self, code: &str) -> Result<Option<Feature>, FeatureError>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub package_name: String,
    pub name: String,
    pub version: String,
}

/// A command queued for one or more devices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub code: String,
    #[serde(default)]
    pub payload: serde_json::Value,
}

#[async_trait]
pub trait ApplicationManager: Send + Sync {
    async fn get_applications(
        &self,
        platform: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Application>, ApplicationError>;

    async fn update_application_status(
        &self,
        id: &DeviceIdentifier,
        application: &Application,
        status: &str,
    ) -> Result<(), ApplicationError>;

    async fn get_application_status(
        &self,
        id: &DeviceIdentifier,
        application: &Application,
    ) -> Result<Option<String>, ApplicationError>;

    async fn install_application(
        &self,
        operation: &Operation,
        devices: &[DeviceIdentifier],
    ) -> Result<(), ApplicationError>;
}
