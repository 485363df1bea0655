use thiserror::Error;

/// Domain-level validation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid device identifier: {0}")]
    InvalidDeviceId(String),

    #[error("Unknown enrolment status: {0}")]
    UnknownEnrolmentStatus(String),

    #[error("Unknown ownership type: {0}")]
    UnknownOwnershipType(String),

    #[error("Device provider already registered: {0}")]
    DuplicateProvider(String),
}

pub type Result<T> = std::result::Result<T, DomainError>;

/// Failures raised by a record store implementation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Storage query failed: {0}")]
    Query(String),

    #[error("Stored record is unreadable: {0}")]
    Corrupt(String),
}

/// Lifecycle operations, used to give failures their context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleOperation {
    Enroll,
    ModifyEnrollment,
    Disenroll,
    IsEnrolled,
    GetDevice,
    GetAllDevices,
    UpdateDeviceInfo,
}

impl LifecycleOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Enroll => "enroll",
            Self::ModifyEnrollment => "modify enrollment",
            Self::Disenroll => "disenroll",
            Self::IsEnrolled => "check enrollment",
            Self::GetDevice => "get device",
            Self::GetAllDevices => "get all devices",
            Self::UpdateDeviceInfo => "update device info",
        }
    }
}

impl std::fmt::Display for LifecycleOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The only error surfaced by lifecycle operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LifecycleError {
    #[error("Failed to {operation} for device {}: {source}", device_id.as_deref().unwrap_or("<all>"))]
    Storage {
        operation: LifecycleOperation,
        device_id: Option<String>,
        #[source]
        source: StorageError,
    },

    #[error("Device not found: {0}")]
    DeviceNotFound(String),
}

impl LifecycleError {
    pub fn storage(
        operation: LifecycleOperation,
        device_id: Option<&str>,
        source: StorageError,
    ) -> Self {
        Self::Storage {
            operation,
            device_id: device_id.map(str::to_string),
            source,
        }
    }
}

/// Errors of the feature-management collaborator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FeatureError {
    #[error("Feature management is not implemented for provider {provider}: {operation}")]
    NotImplemented {
        provider: String,
        operation: &'static str,
    },
}

/// Errors of the application-management collaborator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApplicationError {
    #[error("Application management is not implemented for provider {provider}: {operation}")]
    NotImplemented {
        provider: String,
        operation: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_failure_message_names_operation_and_device() {
        let err = LifecycleError::storage(
            LifecycleOperation::Enroll,
            Some("A1"),
            StorageError::Constraint("duplicate key".to_string()),
        );
        assert_eq!(
            err.to_string(),
            "Failed to enroll for device A1: Constraint violation: duplicate key"
        );
    }

    #[test]
    fn test_storage_failure_without_device() {
        let err = LifecycleError::storage(
            LifecycleOperation::GetAllDevices,
            None,
            StorageError::Unavailable("pool closed".to_string()),
        );
        assert!(err.to_string().contains("<all>"));
    }

    #[test]
    fn test_storage_failure_keeps_source() {
        use std::error::Error;

        let err = LifecycleError::storage(
            LifecycleOperation::Disenroll,
            Some("A1"),
            StorageError::Query("boom".to_string()),
        );
        let source = err.source().expect("source should be kept");
        assert_eq!(source.to_string(), "Storage query failed: boom");
    }
}
