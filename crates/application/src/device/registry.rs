use std::collections::HashMap;
use std::sync::Arc;

use domain::DomainError;
use domain::device::DeviceManagementService;
use tracing::info;

/// Device management providers keyed by their type tag.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: HashMap<String, Arc<dyn DeviceManagementService>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider under its own `provider_type()`. A second provider
    /// for the same tag is rejected.
    pub fn register(
        &mut self,
        provider: Arc<dyn DeviceManagementService>,
    ) -> Result<(), DomainError> {
        let provider_type = provider.provider_type().to_string();
        if self.providers.contains_key(&provider_type) {
            return Err(DomainError::DuplicateProvider(provider_type));
        }

        info!(provider_type = %provider_type, "Registered device management provider");
        self.providers.insert(provider_type, provider);
        Ok(())
    }

    pub fn get(&self, provider_type: &str) -> Option<Arc<dyn DeviceManagementService>> {
        self.providers.get(provider_type).cloned()
    }

    pub fn provider_types(&self) -> Vec<String> {
        let mut types: Vec<String> = self.providers.keys().cloned().collect();
        types.sort();
        types
    }
}
