use crate::error::{DomainError, Result};
use serde::{Deserialize, Serialize};

const MAX_LEN: usize = 255;

/// Value object identifying a device within one device-type namespace
///
/// Rules:
/// - Must be non-empty
/// - No leading or trailing whitespace
/// - Max length 255 characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DeviceIdentifier(String);

impl DeviceIdentifier {
    /// Create a new DeviceIdentifier with validation
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();

        if id.is_empty() {
            return Err(DomainError::InvalidDeviceId(
                "Device identifier cannot be empty".to_string(),
            ));
        }

        let chars = id.chars().count();
        if chars > MAX_LEN {
            return Err(DomainError::InvalidDeviceId(format!(
                "Device identifier too long: {chars} chars (max {MAX_LEN})"
            )));
        }

        if id.trim() != id {
            return Err(DomainError::InvalidDeviceId(format!(
                "Device identifier '{id}' has surrounding whitespace"
            )));
        }

        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DeviceIdentifier {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<DeviceIdentifier> for String {
    fn from(id: DeviceIdentifier) -> Self {
        id.0
    }
}

impl std::fmt::Display for DeviceIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
