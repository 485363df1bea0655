use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use domain::device::translator::{to_generic_device, to_stored_record};
use domain::device::{
    ApplicationManager, Device, DeviceIdentifier, DeviceManagementService, EnrolmentStatus,
    FeatureManager, MobileDeviceRecord, OwnershipType, RecordStore,
};
use domain::{LifecycleError, LifecycleOperation, StorageError};

use crate::device::fixed_result;
use crate::device::unsupported::{UnsupportedApplicationManager, UnsupportedFeatureManager};

pub const ANDROID_PROVIDER_TYPE: &str = "android";

/// The single store mutation a lifecycle operation performs.
enum Write<'a> {
    Create(&'a MobileDeviceRecord),
    Update(&'a MobileDeviceRecord),
    Delete(&'a DeviceIdentifier),
}

/// Lifecycle management for Android devices.
///
/// Every mutation runs in its own transaction obtained from the injected
/// store; nothing is cached between calls.
pub struct AndroidDeviceManager {
    store: Arc<dyn RecordStore>,
    feature_manager: Arc<dyn FeatureManager>,
    application_manager: Arc<dyn ApplicationManager>,
}

impl AndroidDeviceManager {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            feature_manager: Arc::new(UnsupportedFeatureManager::new(ANDROID_PROVIDER_TYPE)),
            application_manager: Arc::new(UnsupportedApplicationManager::new(
                ANDROID_PROVIDER_TYPE,
            )),
        }
    }

    /// begin -> write -> commit. A failed write is rolled back; a failed
    /// rollback is only logged so the write error is what the caller sees.
    async fn transact(
        &self,
        operation: LifecycleOperation,
        id: &DeviceIdentifier,
        write: Write<'_>,
    ) -> Result<bool, LifecycleError> {
        let mut tx = self
            .store
            .begin()
            .await
            .map_err(|e| Self::failure(operation, Some(id), e))?;

        let outcome = match write {
            Write::Create(record) => tx.create(record).await,
            Write::Update(record) => tx.update(record).await,
            Write::Delete(target) => tx.delete(target).await,
        };

        match outcome {
            Ok(status) => {
                tx.commit()
                    .await
                    .map_err(|e| Self::failure(operation, Some(id), e))?;
                Ok(status)
            }
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!(
                        device_id = %id,
                        operation = %operation,
                        error = %rollback_err,
                        "Failed to roll back transaction"
                    );
                }
                Err(Self::failure(operation, Some(id), e))
            }
        }
    }

    fn failure(
        operation: LifecycleOperation,
        id: Option<&DeviceIdentifier>,
        cause: StorageError,
    ) -> LifecycleError {
        let device_id = id.map(DeviceIdentifier::as_str);
        error!(
            device_id = device_id.unwrap_or("<all>"),
            operation = %operation,
            error = %cause,
            "Android device lifecycle operation failed"
        );
        LifecycleError::storage(operation, device_id, cause)
    }

    async fn find_record(
        &self,
        operation: LifecycleOperation,
        id: &DeviceIdentifier,
    ) -> Result<Option<MobileDeviceRecord>, LifecycleError> {
        self.store
            .get(id)
            .await
            .map_err(|e| Self::failure(operation, Some(id), e))
    }
}

#[async_trait]
impl DeviceManagementService for AndroidDeviceManager {
    fn provider_type(&self) -> &str {
        ANDROID_PROVIDER_TYPE
    }

    fn feature_manager(&self) -> Arc<dyn FeatureManager> {
        self.feature_manager.clone()
    }

    fn application_manager(&self) -> Arc<dyn ApplicationManager> {
        self.application_manager.clone()
    }

    async fn enroll_device(&self, device: &Device) -> Result<bool, LifecycleError> {
        let record = to_stored_record(device);
        debug!(device_id = %device.identifier, "Enrolling a new Android device");

        let status = self
            .transact(
                LifecycleOperation::Enroll,
                &device.identifier,
                Write::Create(&record),
            )
            .await?;

        info!(device_id = %device.identifier, status, "Android device enrolled");
        Ok(status)
    }

    async fn modify_enrollment(&self, device: &Device) -> Result<bool, LifecycleError> {
        let record = to_stored_record(device);
        debug!(device_id = %device.identifier, "Modifying Android device enrollment data");

        let status = self
            .transact(
                LifecycleOperation::ModifyEnrollment,
                &device.identifier,
                Write::Update(&record),
            )
            .await?;

        info!(device_id = %device.identifier, status, "Android device enrollment modified");
        Ok(status)
    }

    async fn disenroll_device(&self, id: &DeviceIdentifier) -> Result<bool, LifecycleError> {
        debug!(device_id = %id, "Dis-enrolling Android device");

        let status = self
            .transact(LifecycleOperation::Disenroll, id, Write::Delete(id))
            .await?;

        info!(device_id = %id, status, "Android device dis-enrolled");
        Ok(status)
    }

    async fn is_enrolled(&self, id: &DeviceIdentifier) -> Result<bool, LifecycleError> {
        debug!(device_id = %id, "Checking enrollment of Android device");

        Ok(self
            .find_record(LifecycleOperation::IsEnrolled, id)
            .await?
            .is_some())
    }

    async fn is_active(&self, id: &DeviceIdentifier) -> Result<bool, LifecycleError> {
        debug!(device_id = %id, "is_active has no backing state; fixed result");
        Ok(fixed_result::IS_ACTIVE)
    }

    async fn set_active(
        &self,
        id: &DeviceIdentifier,
        active: bool,
    ) -> Result<bool, LifecycleError> {
        debug!(device_id = %id, active, "set_active has no backing state; fixed result");
        Ok(fixed_result::SET_ACTIVE)
    }

    async fn get_device(&self, id: &DeviceIdentifier) -> Result<Device, LifecycleError> {
        debug!(device_id = %id, "Getting details of Android device");

        self.find_record(LifecycleOperation::GetDevice, id)
            .await?
            .map(|record| to_generic_device(&record))
            .ok_or_else(|| LifecycleError::DeviceNotFound(id.to_string()))
    }

    async fn set_ownership(
        &self,
        id: &DeviceIdentifier,
        ownership: OwnershipType,
    ) -> Result<bool, LifecycleError> {
        debug!(device_id = %id, %ownership, "set_ownership has no backing state; fixed result");
        Ok(fixed_result::SET_OWNERSHIP)
    }

    async fn is_claimable(&self, id: &DeviceIdentifier) -> Result<bool, LifecycleError> {
        debug!(device_id = %id, "is_claimable has no backing state; fixed result");
        Ok(fixed_result::IS_CLAIMABLE)
    }

    async fn set_status(
        &self,
        id: &DeviceIdentifier,
        current_user: &str,
        status: EnrolmentStatus,
    ) -> Result<bool, LifecycleError> {
        debug!(
            device_id = %id,
            current_user,
            %status,
            "set_status has no backing state; fixed result"
        );
        Ok(fixed_result::SET_STATUS)
    }

    /// Only location and properties are taken from `device`. Status and
    /// ownership changes it carries are dropped; use `modify_enrollment` for
    /// those.
    async fn update_device_info(
        &self,
        id: &DeviceIdentifier,
        device: &Device,
    ) -> Result<bool, LifecycleError> {
        let mut current = match self
            .find_record(LifecycleOperation::UpdateDeviceInfo, id)
            .await?
        {
            Some(record) => record,
            None => return Err(LifecycleError::DeviceNotFound(id.to_string())),
        };
        current.merge_reported_info(&to_stored_record(device));

        debug!(device_id = %id, "Updating details of Android device");

        let status = self
            .transact(
                LifecycleOperation::UpdateDeviceInfo,
                id,
                Write::Update(&current),
            )
            .await?;

        info!(device_id = %id, status, "Android device info updated");
        Ok(status)
    }

    async fn get_all_devices(&self) -> Result<Vec<Device>, LifecycleError> {
        debug!("Fetching details of all Android devices");

        let records = self
            .store
            .list_all()
            .await
            .map_err(|e| Self::failure(LifecycleOperation::GetAllDevices, None, e))?;

        Ok(records
            .unwrap_or_default()
            .iter()
            .map(to_generic_device)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::device::{MockRecordStore, RecordTransaction};
    use std::sync::Mutex;

    /// Transaction double that records calls into a shared log.
    struct LoggingTransaction {
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    #[async_trait]
    impl RecordTransaction for LoggingTransaction {
        async fn create(&mut self, _record: &MobileDeviceRecord) -> Result<bool, StorageError> {
            self.log.lock().unwrap().push("create");
            Ok(true)
        }

        async fn update(&mut self, _record: &MobileDeviceRecord) -> Result<bool, StorageError> {
            self.log.lock().unwrap().push("update");
            Ok(true)
        }

        async fn delete(&mut self, _id: &DeviceIdentifier) -> Result<bool, StorageError> {
            self.log.lock().unwrap().push("delete");
            Ok(false)
        }

        async fn commit(self: Box<Self>) -> Result<(), StorageError> {
            self.log.lock().unwrap().push("commit");
            Ok(())
        }

        async fn rollback(self: Box<Self>) -> Result<(), StorageError> {
            self.log.lock().unwrap().push("rollback");
            Ok(())
        }
    }

    fn id(value: &str) -> DeviceIdentifier {
        DeviceIdentifier::new(value).unwrap()
    }

    fn device(value: &str) -> Device {
        Device::new(id(value), ANDROID_PROVIDER_TYPE).with_location(6.9, 79.8)
    }

    fn store_with_log(log: &Arc<Mutex<Vec<&'static str>>>) -> MockRecordStore {
        let mut store = MockRecordStore::new();
        let log = log.clone();
        store.expect_begin().times(1).returning(move || {
            Ok(Box::new(LoggingTransaction { log: log.clone() }) as Box<dyn RecordTransaction>)
        });
        store
    }

    #[tokio::test]
    async fn test_enroll_runs_create_then_commit() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let manager = AndroidDeviceManager::new(Arc::new(store_with_log(&log)));

        assert!(manager.enroll_device(&device("A1")).await.unwrap());
        assert_eq!(*log.lock().unwrap(), vec!["create", "commit"]);
    }

    #[tokio::test]
    async fn test_disenroll_reports_store_status() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let manager = AndroidDeviceManager::new(Arc::new(store_with_log(&log)));

        assert!(!manager.disenroll_device(&id("A1")).await.unwrap());
        assert_eq!(*log.lock().unwrap(), vec!["delete", "commit"]);
    }

    #[tokio::test]
    async fn test_begin_failure_surfaces_lifecycle_error() {
        let mut store = MockRecordStore::new();
        store
            .expect_begin()
            .times(1)
            .returning(|| Err(StorageError::Unavailable("pool closed".to_string())));
        let manager = AndroidDeviceManager::new(Arc::new(store));

        let err = manager.enroll_device(&device("A1")).await.unwrap_err();
        assert_eq!(
            err,
            LifecycleError::storage(
                LifecycleOperation::Enroll,
                Some("A1"),
                StorageError::Unavailable("pool closed".to_string()),
            )
        );
    }

    #[tokio::test]
    async fn test_is_enrolled_reflects_presence() {
        let mut store = MockRecordStore::new();
        store
            .expect_get()
            .withf(|id| id.as_str() == "A1")
            .returning(|id| Ok(Some(to_stored_record(&device(id.as_str())))));
        store
            .expect_get()
            .withf(|id| id.as_str() == "B2")
            .returning(|_| Ok(None));
        let manager = AndroidDeviceManager::new(Arc::new(store));

        assert!(manager.is_enrolled(&id("A1")).await.unwrap());
        assert!(!manager.is_enrolled(&id("B2")).await.unwrap());
    }

    #[tokio::test]
    async fn test_get_device_not_found() {
        let mut store = MockRecordStore::new();
        store.expect_get().returning(|_| Ok(None));
        let manager = AndroidDeviceManager::new(Arc::new(store));

        let err = manager.get_device(&id("ghost")).await.unwrap_err();
        assert_eq!(err, LifecycleError::DeviceNotFound("ghost".to_string()));
    }

    #[tokio::test]
    async fn test_read_failure_has_no_transaction() {
        let mut store = MockRecordStore::new();
        store
            .expect_get()
            .returning(|_| Err(StorageError::Query("timeout".to_string())));
        store.expect_begin().never();
        let manager = AndroidDeviceManager::new(Arc::new(store));

        let err = manager.get_device(&id("A1")).await.unwrap_err();
        assert!(matches!(
            err,
            LifecycleError::Storage {
                operation: LifecycleOperation::GetDevice,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_update_info_for_unknown_device_never_writes() {
        let mut store = MockRecordStore::new();
        store.expect_get().returning(|_| Ok(None));
        store.expect_begin().never();
        let manager = AndroidDeviceManager::new(Arc::new(store));

        let err = manager
            .update_device_info(&id("ghost"), &device("ghost"))
            .await
            .unwrap_err();
        assert_eq!(err, LifecycleError::DeviceNotFound("ghost".to_string()));
    }

    #[tokio::test]
    async fn test_get_all_devices_on_empty_store() {
        let mut store = MockRecordStore::new();
        store.expect_list_all().returning(|| Ok(None));
        let manager = AndroidDeviceManager::new(Arc::new(store));

        assert!(manager.get_all_devices().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_all_devices_failure() {
        let mut store = MockRecordStore::new();
        store
            .expect_list_all()
            .returning(|| Err(StorageError::Unavailable("down".to_string())));
        let manager = AndroidDeviceManager::new(Arc::new(store));

        let err = manager.get_all_devices().await.unwrap_err();
        assert_eq!(
            err,
            LifecycleError::storage(
                LifecycleOperation::GetAllDevices,
                None,
                StorageError::Unavailable("down".to_string()),
            )
        );
    }

    #[tokio::test]
    async fn test_fixed_result_operations_never_touch_store() {
        let mut store = MockRecordStore::new();
        store.expect_begin().never();
        store.expect_get().never();
        store.expect_list_all().never();
        let manager = AndroidDeviceManager::new(Arc::new(store));
        let a1 = id("A1");

        assert!(manager.is_active(&a1).await.unwrap());
        assert!(manager.set_active(&a1, false).await.unwrap());
        assert!(manager.set_ownership(&a1, OwnershipType::Cod).await.unwrap());
        assert!(!manager.is_claimable(&a1).await.unwrap());
        assert!(
            !manager
                .set_status(&a1, "admin", EnrolmentStatus::Blocked)
                .await
                .unwrap()
        );
    }

    #[test]
    fn test_provider_type() {
        let manager = AndroidDeviceManager::new(Arc::new(MockRecordStore::new()));
        assert_eq!(manager.provider_type(), "android");
    }
}
