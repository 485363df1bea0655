use crate::database::entities::mobile_devices;
use async_trait::async_trait;
use chrono::Utc;
use domain::StorageError;
use domain::device::{DeviceIdentifier, MobileDeviceRecord, RecordStore, RecordTransaction};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, SqlErr, TransactionTrait,
};
use std::collections::BTreeMap;

/// Record store backed by a sea-orm connection (PostgreSQL or SQLite).
#[derive(Clone)]
pub struct SeaOrmRecordStore {
    db: DatabaseConnection,
}

impl SeaOrmRecordStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// One database transaction; rolled back by the driver if dropped uncommitted.
pub struct SeaOrmRecordTransaction {
    txn: DatabaseTransaction,
}

fn storage_error(err: DbErr) -> StorageError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => return StorageError::Constraint(msg),
        Some(SqlErr::ForeignKeyConstraintViolation(msg)) => return StorageError::Constraint(msg),
        _ => {}
    }

    match &err {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => StorageError::Unavailable(err.to_string()),
        _ => StorageError::Query(err.to_string()),
    }
}

fn model_to_record(model: mobile_devices::Model) -> Result<MobileDeviceRecord, StorageError> {
    let corrupt = |e: domain::DomainError| StorageError::Corrupt(e.to_string());

    let id = DeviceIdentifier::new(model.id).map_err(corrupt)?;
    let ownership = model.ownership.parse().map_err(corrupt)?;
    let status = model.status.parse().map_err(corrupt)?;
    let properties: BTreeMap<String, String> = serde_json::from_value(model.properties)
        .map_err(|e| StorageError::Corrupt(format!("Invalid property bag for {id}: {e}")))?;

    Ok(MobileDeviceRecord {
        id,
        device_type: model.device_type,
        ownership,
        status,
        vendor: model.vendor,
        model: model.model,
        os_version: model.os_version,
        imei: model.imei,
        imsi: model.imsi,
        serial: model.serial,
        latitude: model.latitude,
        longitude: model.longitude,
        properties,
    })
}

/// Column values shared by insert and update. `created_at` is left unset.
fn record_to_active_model(
    record: &MobileDeviceRecord,
) -> Result<mobile_devices::ActiveModel, StorageError> {
    let properties = serde_json::to_value(&record.properties)
        .map_err(|e| StorageError::Query(format!("Cannot encode property bag: {e}")))?;

    Ok(mobile_devices::ActiveModel {
        id: Set(record.id.as_str().to_string()),
        device_type: Set(record.device_type.clone()),
        ownership: Set(record.ownership.as_str().to_string()),
        status: Set(record.status.as_str().to_string()),
        vendor: Set(record.vendor.clone()),
        model: Set(record.model.clone()),
        os_version: Set(record.os_version.clone()),
        imei: Set(record.imei.clone()),
        imsi: Set(record.imsi.clone()),
        serial: Set(record.serial.clone()),
        latitude: Set(record.latitude),
        longitude: Set(record.longitude),
        properties: Set(properties),
        created_at: NotSet,
        updated_at: Set(Utc::now().fixed_offset()),
    })
}

#[async_trait]
impl RecordStore for SeaOrmRecordStore {
    async fn begin(&self) -> Result<Box<dyn RecordTransaction>, StorageError> {
        let txn = self.db.begin().await.map_err(storage_error)?;
        Ok(Box::new(SeaOrmRecordTransaction { txn }))
    }

    async fn get(
        &self,
        id: &DeviceIdentifier,
    ) -> Result<Option<MobileDeviceRecord>, StorageError> {
        let model = mobile_devices::Entity::find_by_id(id.as_str().to_string())
            .one(&self.db)
            .await
            .map_err(storage_error)?;

        model.map(model_to_record).transpose()
    }

    async fn list_all(&self) -> Result<Option<Vec<MobileDeviceRecord>>, StorageError> {
        let models = mobile_devices::Entity::find()
            .order_by_asc(mobile_devices::Column::Id)
            .all(&self.db)
            .await
            .map_err(storage_error)?;

        if models.is_empty() {
            return Ok(None);
        }

        models
            .into_iter()
            .map(model_to_record)
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }
}

#[async_trait]
impl RecordTransaction for SeaOrmRecordTransaction {
    async fn create(&mut self, record: &MobileDeviceRecord) -> Result<bool, StorageError> {
        let mut active_model = record_to_active_model(record)?;
        active_model.created_at = active_model.updated_at.clone();

        let inserted = mobile_devices::Entity::insert(active_model)
            .exec_without_returning(&self.txn)
            .await
            .map_err(storage_error)?;

        Ok(inserted > 0)
    }

    async fn update(&mut self, record: &MobileDeviceRecord) -> Result<bool, StorageError> {
        let mut active_model = record_to_active_model(record)?;
        // The key is the filter, not a column to rewrite
        active_model.id = NotSet;

        let result = mobile_devices::Entity::update_many()
            .set(active_model)
            .filter(mobile_devices::Column::Id.eq(record.id.as_str()))
            .exec(&self.txn)
            .await
            .map_err(storage_error)?;

        Ok(result.rows_affected > 0)
    }

    async fn delete(&mut self, id: &DeviceIdentifier) -> Result<bool, StorageError> {
        let result = mobile_devices::Entity::delete_by_id(id.as_str().to_string())
            .exec(&self.txn)
            .await
            .map_err(storage_error)?;

        Ok(result.rows_affected > 0)
    }

    async fn commit(self: Box<Self>) -> Result<(), StorageError> {
        let Self { txn } = *self;
        txn.commit().await.map_err(storage_error)
    }

    async fn rollback(self: Box<Self>) -> Result<(), StorageError> {
        let Self { txn } = *self;
        txn.rollback().await.map_err(storage_error)
    }
}
