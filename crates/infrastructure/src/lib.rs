//! Infrastructure layer - Record store backends and configuration

pub mod config;
pub mod database;
pub mod repositories;

pub use config::{DatabaseConfig, ManagerConfig};
pub use database::{SeaOrmRecordStore, connect};
pub use repositories::InMemoryRecordStore;
