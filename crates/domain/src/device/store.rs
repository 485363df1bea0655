use super::{DeviceIdentifier, MobileDeviceRecord};
use crate::StorageError;
use async_trait::async_trait;

/// Persistence contract for device records.
///
/// Reads go straight to the store. Mutations are only reachable through a
/// [`RecordTransaction`] obtained from [`RecordStore::begin`], so every
/// write sequence has an explicit commit or rollback.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Open a transaction scope for one unit of work.
    async fn begin(&self) -> Result<Box<dyn RecordTransaction>, StorageError>;

    /// Fetch a record; absence is not an error.
    async fn get(&self, id: &DeviceIdentifier)
    -> Result<Option<MobileDeviceRecord>, StorageError>;

    /// All records ordered by identifier, or `None` when the store is empty.
    async fn list_all(&self) -> Result<Option<Vec<MobileDeviceRecord>>, StorageError>;
}

/// A begin/commit/rollback bounded unit of work.
///
/// Writes are invisible to other readers until [`commit`](Self::commit)
/// succeeds. Dropping a transaction without committing discards it.
#[async_trait]
pub trait RecordTransaction: Send {
    /// Insert a new record. Fails with [`StorageError::Constraint`] when the
    /// identifier is already taken.
    async fn create(&mut self, record: &MobileDeviceRecord) -> Result<bool, StorageError>;

    /// Replace the record with the same identifier. `false` if none matched.
    async fn update(&mut self, record: &MobileDeviceRecord) -> Result<bool, StorageError>;

    /// Remove a record. `false` if none matched.
    async fn delete(&mut self, id: &DeviceIdentifier) -> Result<bool, StorageError>;

    async fn commit(self: Box<Self>) -> Result<(), StorageError>;

    async fn rollback(self: Box<Self>) -> Result<(), StorageError>;
}
