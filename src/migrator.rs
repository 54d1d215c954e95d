//! Inline schema migrations for the database backend.

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_inventory_tables::Migration),
            Box::new(m20240101_000002_create_bank_tables::Migration),
            Box::new(m20240101_000003_create_document_tables::Migration),
            Box::new(m20240101_000004_create_catalog_tables::Migration),
            Box::new(m20240101_000005_create_users_table::Migration),
        ]
    }
}

mod m20240101_000001_create_inventory_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000001_create_inventory_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(InventoryItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(InventoryItems::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(InventoryItems::Manufacturer)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(InventoryItems::Category).string().not_null())
                        .col(ColumnDef::new(InventoryItems::TrimLevel).string().null())
                        .col(
                            ColumnDef::new(InventoryItems::EngineCapacity)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(InventoryItems::Year).integer().not_null())
                        .col(
                            ColumnDef::new(InventoryItems::ExteriorColor)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryItems::InteriorColor)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryItems::ImportType)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryItems::OwnershipType)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(InventoryItems::Location).string().not_null())
                        .col(
                            ColumnDef::new(InventoryItems::ChassisNumber)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryItems::Price)
                                .decimal_len(12, 2)
                                .null(),
                        )
                        .col(ColumnDef::new(InventoryItems::Status).string().not_null())
                        .col(
                            ColumnDef::new(InventoryItems::IsSold)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(ColumnDef::new(InventoryItems::Images).json().not_null())
                        .col(ColumnDef::new(InventoryItems::Notes).string().null())
                        .col(
                            ColumnDef::new(InventoryItems::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryItems::UpdatedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_inventory_items_status")
                        .table(InventoryItems::Table)
                        .col(InventoryItems::Status)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_inventory_items_manufacturer")
                        .table(InventoryItems::Table)
                        .col(InventoryItems::Manufacturer)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Locations::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Locations::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Locations::Name).string().not_null())
                        .col(ColumnDef::new(Locations::Description).string().null())
                        .col(
                            ColumnDef::new(Locations::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(Locations::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Locations::UpdatedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(LocationTransfers::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(LocationTransfers::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(LocationTransfers::InventoryItemId)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(LocationTransfers::FromLocation)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(LocationTransfers::ToLocation)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(LocationTransfers::TransferredBy)
                                .string()
                                .null(),
                        )
                        .col(ColumnDef::new(LocationTransfers::Notes).string().null())
                        .col(
                            ColumnDef::new(LocationTransfers::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_location_transfers_item")
                        .table(LocationTransfers::Table)
                        .col(LocationTransfers::InventoryItemId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(LocationTransfers::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Locations::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(InventoryItems::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum InventoryItems {
        Table,
        Id,
        Manufacturer,
        Category,
        TrimLevel,
        EngineCapacity,
        Year,
        ExteriorColor,
        InteriorColor,
        ImportType,
        OwnershipType,
        Location,
        ChassisNumber,
        Price,
        Status,
        IsSold,
        Images,
        Notes,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum Locations {
        Table,
        Id,
        Name,
        Description,
        IsActive,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum LocationTransfers {
        Table,
        Id,
        InventoryItemId,
        FromLocation,
        ToLocation,
        TransferredBy,
        Notes,
        CreatedAt,
    }
}

mod m20240101_000002_create_bank_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000002_create_bank_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Banks::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Banks::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Banks::BankName).string().not_null())
                        .col(ColumnDef::new(Banks::NameEn).string().null())
                        .col(ColumnDef::new(Banks::AccountName).string().not_null())
                        .col(ColumnDef::new(Banks::AccountNumber).string().not_null())
                        .col(ColumnDef::new(Banks::Iban).string().not_null())
                        .col(ColumnDef::new(Banks::BankType).string().not_null())
                        .col(ColumnDef::new(Banks::Logo).string().null())
                        .col(
                            ColumnDef::new(Banks::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(Banks::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Banks::UpdatedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_banks_bank_type")
                        .table(Banks::Table)
                        .col(Banks::BankType)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(BankInterestRates::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(BankInterestRates::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(BankInterestRates::BankId)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(BankInterestRates::DurationMonths)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(BankInterestRates::RatePercent)
                                .decimal_len(6, 3)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(BankInterestRates::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(BankInterestRates::UpdatedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_bank_interest_rates_bank_id")
                        .table(BankInterestRates::Table)
                        .col(BankInterestRates::BankId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(FinancingRates::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(FinancingRates::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(FinancingRates::BankName).string().not_null())
                        .col(
                            ColumnDef::new(FinancingRates::FinancingType)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(FinancingRates::DurationMonths)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(FinancingRates::RatePercent)
                                .decimal_len(6, 3)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(FinancingRates::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(FinancingRates::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(FinancingRates::UpdatedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(FinancingRates::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(BankInterestRates::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Banks::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Banks {
        Table,
        Id,
        BankName,
        NameEn,
        AccountName,
        AccountNumber,
        Iban,
        BankType,
        Logo,
        IsActive,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum BankInterestRates {
        Table,
        Id,
        BankId,
        DurationMonths,
        RatePercent,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum FinancingRates {
        Table,
        Id,
        BankName,
        FinancingType,
        DurationMonths,
        RatePercent,
        IsActive,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000003_create_document_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000003_create_document_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Quotations::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Quotations::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Quotations::QuoteNumber).string().not_null())
                        .col(
                            ColumnDef::new(Quotations::CustomerName)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Quotations::CustomerPhone).string().null())
                        .col(ColumnDef::new(Quotations::CustomerEmail).string().null())
                        .col(ColumnDef::new(Quotations::Vehicle).json().not_null())
                        .col(
                            ColumnDef::new(Quotations::BasePrice)
                                .decimal_len(12, 2)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Quotations::FinalPrice)
                                .decimal_len(12, 2)
                                .not_null(),
                        )
                        .col(ColumnDef::new(Quotations::Status).string().not_null())
                        .col(
                            ColumnDef::new(Quotations::ValidUntil)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(ColumnDef::new(Quotations::Notes).string().null())
                        .col(ColumnDef::new(Quotations::CompanySnapshot).json().null())
                        .col(
                            ColumnDef::new(Quotations::RepresentativeSnapshot)
                                .json()
                                .null(),
                        )
                        .col(ColumnDef::new(Quotations::PricingDetails).json().null())
                        .col(ColumnDef::new(Quotations::Appearance).json().null())
                        .col(
                            ColumnDef::new(Quotations::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Quotations::UpdatedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Invoices::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Invoices::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(Invoices::InvoiceNumber)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Invoices::CustomerName).string().not_null())
                        .col(ColumnDef::new(Invoices::CustomerPhone).string().null())
                        .col(ColumnDef::new(Invoices::CustomerEmail).string().null())
                        .col(ColumnDef::new(Invoices::Vehicle).json().not_null())
                        .col(
                            ColumnDef::new(Invoices::BasePrice)
                                .decimal_len(12, 2)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Invoices::FinalPrice)
                                .decimal_len(12, 2)
                                .not_null(),
                        )
                        .col(ColumnDef::new(Invoices::Status).string().not_null())
                        .col(
                            ColumnDef::new(Invoices::Paid)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(ColumnDef::new(Invoices::PaymentMethod).string().null())
                        .col(ColumnDef::new(Invoices::Notes).string().null())
                        .col(ColumnDef::new(Invoices::CompanySnapshot).json().null())
                        .col(
                            ColumnDef::new(Invoices::RepresentativeSnapshot)
                                .json()
                                .null(),
                        )
                        .col(ColumnDef::new(Invoices::PricingDetails).json().null())
                        .col(ColumnDef::new(Invoices::Appearance).json().null())
                        .col(
                            ColumnDef::new(Invoices::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Invoices::UpdatedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Invoices::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Quotations::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Quotations {
        Table,
        Id,
        QuoteNumber,
        CustomerName,
        CustomerPhone,
        CustomerEmail,
        Vehicle,
        BasePrice,
        FinalPrice,
        Status,
        ValidUntil,
        Notes,
        CompanySnapshot,
        RepresentativeSnapshot,
        PricingDetails,
        Appearance,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum Invoices {
        Table,
        Id,
        InvoiceNumber,
        CustomerName,
        CustomerPhone,
        CustomerEmail,
        Vehicle,
        BasePrice,
        FinalPrice,
        Status,
        Paid,
        PaymentMethod,
        Notes,
        CompanySnapshot,
        RepresentativeSnapshot,
        PricingDetails,
        Appearance,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000004_create_catalog_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000004_create_catalog_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Manufacturers::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Manufacturers::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Manufacturers::Name).string().not_null())
                        .col(ColumnDef::new(Manufacturers::NameEn).string().null())
                        .col(ColumnDef::new(Manufacturers::Logo).string().null())
                        .col(ColumnDef::new(Manufacturers::Categories).json().not_null())
                        .col(
                            ColumnDef::new(Manufacturers::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(Manufacturers::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Manufacturers::UpdatedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_manufacturers_name")
                        .table(Manufacturers::Table)
                        .col(Manufacturers::Name)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Companies::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Companies::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Companies::Name).string().not_null())
                        .col(ColumnDef::new(Companies::Logo).string().null())
                        .col(ColumnDef::new(Companies::Address).string().null())
                        .col(ColumnDef::new(Companies::Phone).string().null())
                        .col(ColumnDef::new(Companies::Email).string().null())
                        .col(
                            ColumnDef::new(Companies::RegistrationNumber)
                                .string()
                                .null(),
                        )
                        .col(ColumnDef::new(Companies::TaxNumber).string().null())
                        .col(
                            ColumnDef::new(Companies::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(Companies::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Companies::UpdatedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Companies::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Manufacturers::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Manufacturers {
        Table,
        Id,
        Name,
        NameEn,
        Logo,
        Categories,
        IsActive,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum Companies {
        Table,
        Id,
        Name,
        Logo,
        Address,
        Phone,
        Email,
        RegistrationNumber,
        TaxNumber,
        IsActive,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000005_create_users_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000005_create_users_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Users::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Users::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Users::Username).string().not_null())
                        .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                        .col(ColumnDef::new(Users::Role).string().not_null())
                        .col(
                            ColumnDef::new(Users::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Users::UpdatedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_users_username")
                        .table(Users::Table)
                        .col(Users::Username)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Users::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Users {
        Table,
        Id,
        Username,
        PasswordHash,
        Role,
        CreatedAt,
        UpdatedAt,
    }
}
