use async_trait::async_trait;
use domain::StorageError;
use domain::device::{DeviceIdentifier, MobileDeviceRecord, RecordStore, RecordTransaction};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

type Records = BTreeMap<DeviceIdentifier, MobileDeviceRecord>;

enum Change {
    Insert(MobileDeviceRecord),
    Put(MobileDeviceRecord),
    Remove(DeviceIdentifier),
}

/// Process-local record store.
///
/// Transactions journal their writes and apply them in one step at commit,
/// so readers never observe uncommitted or rolled-back changes.
#[derive(Clone, Default)]
pub struct InMemoryRecordStore {
    records: Arc<RwLock<Records>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

pub struct InMemoryTransaction {
    records: Arc<RwLock<Records>>,
    journal: Vec<Change>,
}

impl InMemoryTransaction {
    /// Whether `id` exists as seen from inside this transaction.
    async fn exists(&self, id: &DeviceIdentifier) -> bool {
        for change in self.journal.iter().rev() {
            match change {
                Change::Insert(record) | Change::Put(record) if &record.id == id => return true,
                Change::Remove(removed) if removed == id => return false,
                _ => {}
            }
        }
        self.records.read().await.contains_key(id)
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn begin(&self) -> Result<Box<dyn RecordTransaction>, StorageError> {
        Ok(Box::new(InMemoryTransaction {
            records: self.records.clone(),
            journal: Vec::new(),
        }))
    }

    async fn get(
        &self,
        id: &DeviceIdentifier,
    ) -> Result<Option<MobileDeviceRecord>, StorageError> {
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn list_all(&self) -> Result<Option<Vec<MobileDeviceRecord>>, StorageError> {
        let records = self.records.read().await;
        if records.is_empty() {
            return Ok(None);
        }
        Ok(Some(records.values().cloned().collect()))
    }
}

#[async_trait]
impl RecordTransaction for InMemoryTransaction {
    async fn create(&mut self, record: &MobileDeviceRecord) -> Result<bool, StorageError> {
        if self.exists(&record.id).await {
            return Err(StorageError::Constraint(format!(
                "Device {} is already enrolled",
                record.id
            )));
        }
        self.journal.push(Change::Insert(record.clone()));
        Ok(true)
    }

    async fn update(&mut self, record: &MobileDeviceRecord) -> Result<bool, StorageError> {
        if !self.exists(&record.id).await {
            return Ok(false);
        }
        self.journal.push(Change::Put(record.clone()));
        Ok(true)
    }

    async fn delete(&mut self, id: &DeviceIdentifier) -> Result<bool, StorageError> {
        if !self.exists(id).await {
            return Ok(false);
        }
        self.journal.push(Change::Remove(id.clone()));
        Ok(true)
    }

    async fn commit(self: Box<Self>) -> Result<(), StorageError> {
        let Self { records, journal } = *self;
        let mut records = records.write().await;

        // Apply to a copy so a conflicting insert leaves the store untouched
        let mut staged = records.clone();
        for change in journal {
            match change {
                Change::Insert(record) => {
                    if staged.contains_key(&record.id) {
                        return Err(StorageError::Constraint(format!(
                            "Device {} was enrolled concurrently",
                            record.id
                        )));
                    }
                    staged.insert(record.id.clone(), record);
                }
                // Like an SQL UPDATE, a row removed by another commit is not revived
                Change::Put(record) => {
                    if let Some(current) = staged.get_mut(&record.id) {
                        *current = record;
                    }
                }
                Change::Remove(id) => {
                    staged.remove(&id);
                }
            }
        }
        *records = staged;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), StorageError> {
        Ok(())
    }
}
