use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MobileDevices::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MobileDevices::Id)
                            .string_len(255)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MobileDevices::DeviceType).string().not_null())
                    .col(
                        ColumnDef::new(MobileDevices::Ownership)
                            .string()
                            .not_null()
                            .default("BYOD"),
                    )
                    .col(
                        ColumnDef::new(MobileDevices::Status)
                            .string()
                            .not_null()
                            .default("ACTIVE"),
                    )
                    .col(ColumnDef::new(MobileDevices::Vendor).string())
                    .col(ColumnDef::new(MobileDevices::Model).string())
                    .col(ColumnDef::new(MobileDevices::OsVersion).string())
                    .col(ColumnDef::new(MobileDevices::Imei).string())
                    .col(ColumnDef::new(MobileDevices::Imsi).string())
                    .col(ColumnDef::new(MobileDevices::Serial).string())
                    .col(ColumnDef::new(MobileDevices::Latitude).double())
                    .col(ColumnDef::new(MobileDevices::Longitude).double())
                    .col(ColumnDef::new(MobileDevices::Properties).json().not_null())
                    .col(
                        ColumnDef::new(MobileDevices::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(MobileDevices::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_mobile_devices_imei")
                    .table(MobileDevices::Table)
                    .col(MobileDevices::Imei)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MobileDevices::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum MobileDevices {
    Table,
    Id,
    DeviceType,
    Ownership,
    Status,
    Vendor,
    Model,
    OsVersion,
    Imei,
    Imsi,
    Serial,
    Latitude,
    Longitude,
    Properties,
    CreatedAt,
    UpdatedAt,
}
