use async_trait::async_trait;

use domain::device::{
    Application, ApplicationManager, DeviceIdentifier, Feature, FeatureManager, Operation,
};
use domain::{ApplicationError, FeatureError};

/// Feature manager for providers that do not enumerate features.
#[derive(Debug, Clone)]
pub struct UnsupportedFeatureManager {
    provider: String,
}

impl UnsupportedFeatureManager {
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
        }
    }

    fn not_implemented(&self, operation: &'static str) -> FeatureError {
        FeatureError::NotImplemented {
            provider: self.provider.clone(),
            operation,
        }
    }
}

impl FeatureManager for UnsupportedFeatureManager {
    fn features(&self) -> Result<Vec<Feature>, FeatureError> {
        Err(self.not_implemented("features"))
    }

    fn feature(&self, _code: &str) -> Result<Option<Feature>, FeatureError> {
        Err(self.not_implemented("feature"))
    }
}

/// Application manager for providers without application deployment.
#[derive(Debug, Clone)]
pub struct UnsupportedApplicationManager {
    provider: String,
}

impl UnsupportedApplicationManager {
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
        }
    }

    fn not_implemented(&self, operation: &'static str) -> ApplicationError {
        ApplicationError::NotImplemented {
            provider: self.provider.clone(),
            operation,
        }
    }
}

#[async_trait]
impl ApplicationManager for UnsupportedApplicationManager {
    async fn get_applications(
        &self,
        _platform: &str,
        _offset: usize,
        _limit: usize,
    ) -> Result<Vec<Application>, ApplicationError> {
        Err(self.not_implemented("get_applications"))
    }

    async fn update_application_status(
        &self,
        _id: &DeviceIdentifier,
        _application: &Application,
        _status: &str,
    ) -> Result<(), ApplicationError> {
        Err(self.not_implemented("update_application_status"))
    }

    async fn get_application_status(
        &self,
        _id: &DeviceIdentifier,
        _application: &Application,
    ) -> Result<Option<String>, ApplicationError> {
        Err(self.not_implemented("get_application_status"))
    }

    async fn install_application(
        &self,
        _operation: &Operation,
        _devices: &[DeviceIdentifier],
    ) -> Result<(), ApplicationError> {
        Err(self.not_implemented("install_application"))
    }
}
