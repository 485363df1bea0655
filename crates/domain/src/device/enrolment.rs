use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Enrolment status of a managed device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnrolmentStatus {
    Active,
    Inactive,
    Removed,
    Blocked,
    /// Record exists but the device has not completed enrolment
    Created,
    Unclaimed,
}

impl EnrolmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
            Self::Removed => "REMOVED",
            Self::Blocked => "BLOCKED",
            Self::Created => "CREATED",
            Self::Unclaimed => "UNCLAIMED",
        }
    }
}

impl Default for EnrolmentStatus {
    fn default() -> Self {
        Self::Active
    }
}

impl FromStr for EnrolmentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ACTIVE" => Ok(Self::Active),
            "INACTIVE" => Ok(Self::Inactive),
            "REMOVED" => Ok(Self::Removed),
            "BLOCKED" => Ok(Self::Blocked),
            "CREATED" => Ok(Self::Created),
            "UNCLAIMED" => Ok(Self::Unclaimed),
            _ => Err(DomainError::UnknownEnrolmentStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for EnrolmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who owns the device hardware
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OwnershipType {
    /// Bring your own device
    Byod,
    /// Corporate owned device
    Cod,
}

impl OwnershipType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Byod => "BYOD",
            Self::Cod => "COD",
        }
    }
}

impl Default for OwnershipType {
    fn default() -> Self {
        Self::Byod
    }
}

impl FromStr for OwnershipType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "BYOD" => Ok(Self::Byod),
            "COD" => Ok(Self::Cod),
            _ => Err(DomainError::UnknownOwnershipType(s.to_string())),
        }
    }
}

impl std::fmt::Display for OwnershipType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
