//! Storage façade: one uniform CRUD boundary per entity type.
//!
//! Every entity `X` gets the same method group: full-snapshot list, get by
//! id (`Ok(None)` for a miss, never an error), create (assigns the next
//! integer id and applies declared defaults), update (shallow merge,
//! `Ok(None)` on a missing id) and delete (`Ok(bool)` found signal). No
//! method checks cross-entity references and nothing is transactional
//! across entities; two concurrent updates to one record are last-write-
//! wins. The backend is selected by configuration: [`MemStorage`] keeps
//! everything in process memory, [`DbStorage`] speaks sea-orm.

pub mod database;
pub mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::{
    bank, bank_interest_rate, company, financing_rate, inventory_item, invoice, location,
    location_transfer, manufacturer, quotation, user,
};
use crate::entities::{BankType, VehicleStatus};
use crate::errors::ServiceError;

pub use database::DbStorage;
pub use memory::MemStorage;

/// Build the backend the configuration asks for. `MemStorage` needs no
/// setup; the database backend connects and optionally migrates first.
pub async fn build_storage(
    cfg: &crate::config::AppConfig,
) -> anyhow::Result<std::sync::Arc<dyn Storage>> {
    match cfg.storage_backend.as_str() {
        "database" => {
            let pool = crate::db::establish_connection(cfg).await?;
            if cfg.auto_migrate {
                crate::db::run_migrations(&pool).await?;
            }
            Ok(std::sync::Arc::new(DbStorage::new(std::sync::Arc::new(
                pool,
            ))))
        }
        _ => Ok(std::sync::Arc::new(MemStorage::new())),
    }
}

/// Equality filter over inventory items. `None` fields do not constrain.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct InventoryFilter {
    pub manufacturer: Option<String>,
    pub category: Option<String>,
    pub status: Option<VehicleStatus>,
    pub import_type: Option<String>,
    pub location: Option<String>,
    pub year: Option<i32>,
}

impl InventoryFilter {
    pub fn is_empty(&self) -> bool {
        self.manufacturer.is_none()
            && self.category.is_none()
            && self.status.is_none()
            && self.import_type.is_none()
            && self.location.is_none()
            && self.year.is_none()
    }

    pub fn matches(&self, item: &inventory_item::Model) -> bool {
        self.manufacturer
            .as_ref()
            .map_or(true, |m| &item.manufacturer == m)
            && self.category.as_ref().map_or(true, |c| &item.category == c)
            && self.status.map_or(true, |s| item.status == s)
            && self
                .import_type
                .as_ref()
                .map_or(true, |t| &item.import_type == t)
            && self.location.as_ref().map_or(true, |l| &item.location == l)
            && self.year.map_or(true, |y| item.year == y)
    }
}

/// Case-insensitive substring match over the searchable text fields.
pub fn search_matches(item: &inventory_item::Model, term: &str) -> bool {
    let needle = term.to_lowercase();
    let mut haystacks: Vec<&str> = vec![
        &item.manufacturer,
        &item.category,
        &item.chassis_number,
        &item.exterior_color,
        &item.interior_color,
    ];
    if let Some(trim) = item.trim_level.as_deref() {
        haystacks.push(trim);
    }
    if let Some(notes) = item.notes.as_deref() {
        haystacks.push(notes);
    }
    haystacks
        .iter()
        .any(|h| h.to_lowercase().contains(&needle))
}

/// Aggregate counts over the whole inventory collection.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct InventoryStats {
    pub total: u64,
    pub available: u64,
    pub in_transit: u64,
    pub in_maintenance: u64,
    pub reserved: u64,
    pub sold: u64,
}

/// Per-manufacturer inventory counts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ManufacturerStats {
    pub manufacturer: String,
    pub total: u64,
    pub available: u64,
    pub sold: u64,
}

/// Per-location inventory counts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LocationStats {
    pub location: String,
    pub total: u64,
}

/// Compute aggregate stats from a full snapshot. Both backends share this
/// so the numbers cannot drift between them.
pub fn compute_inventory_stats(items: &[inventory_item::Model]) -> InventoryStats {
    let mut stats = InventoryStats {
        total: items.len() as u64,
        ..Default::default()
    };
    for item in items {
        match item.status {
            VehicleStatus::Available => stats.available += 1,
            VehicleStatus::InTransit => stats.in_transit += 1,
            VehicleStatus::InMaintenance => stats.in_maintenance += 1,
            VehicleStatus::Reserved => stats.reserved += 1,
            VehicleStatus::Sold => stats.sold += 1,
        }
        if item.is_sold && item.status != VehicleStatus::Sold {
            stats.sold += 1;
        }
    }
    stats
}

pub fn compute_manufacturer_stats(items: &[inventory_item::Model]) -> Vec<ManufacturerStats> {
    let mut groups: Vec<ManufacturerStats> = Vec::new();
    for item in items {
        let entry = match groups
            .iter_mut()
            .find(|g| g.manufacturer == item.manufacturer)
        {
            Some(entry) => entry,
            None => {
                groups.push(ManufacturerStats {
                    manufacturer: item.manufacturer.clone(),
                    total: 0,
                    available: 0,
                    sold: 0,
                });
                groups.last_mut().expect("just pushed")
            }
        };
        entry.total += 1;
        match item.status {
            VehicleStatus::Available => entry.available += 1,
            VehicleStatus::Sold => entry.sold += 1,
            _ => {}
        }
    }
    groups.sort_by(|a, b| a.manufacturer.cmp(&b.manufacturer));
    groups
}

pub fn compute_location_stats(items: &[inventory_item::Model]) -> Vec<LocationStats> {
    let mut groups: Vec<LocationStats> = Vec::new();
    for item in items {
        match groups.iter_mut().find(|g| g.location == item.location) {
            Some(entry) => entry.total += 1,
            None => groups.push(LocationStats {
                location: item.location.clone(),
                total: 1,
            }),
        }
    }
    groups.sort_by(|a, b| a.location.cmp(&b.location));
    groups
}

/// The storage façade. Implementations must keep the contract documented
/// at module level; handlers translate `None`/`false` misses into 404s.
#[async_trait]
pub trait Storage: Send + Sync {
    // Inventory items
    async fn inventory_items(&self) -> Result<Vec<inventory_item::Model>, ServiceError>;
    async fn inventory_item(&self, id: i32)
        -> Result<Option<inventory_item::Model>, ServiceError>;
    async fn create_inventory_item(
        &self,
        new: inventory_item::NewInventoryItem,
    ) -> Result<inventory_item::Model, ServiceError>;
    async fn update_inventory_item(
        &self,
        id: i32,
        patch: inventory_item::InventoryItemPatch,
    ) -> Result<Option<inventory_item::Model>, ServiceError>;
    async fn delete_inventory_item(&self, id: i32) -> Result<bool, ServiceError>;
    async fn filter_inventory_items(
        &self,
        filter: &InventoryFilter,
    ) -> Result<Vec<inventory_item::Model>, ServiceError>;
    async fn search_inventory_items(
        &self,
        term: &str,
    ) -> Result<Vec<inventory_item::Model>, ServiceError>;
    async fn sold_inventory_items(&self) -> Result<Vec<inventory_item::Model>, ServiceError>;
    async fn inventory_stats(&self) -> Result<InventoryStats, ServiceError>;
    async fn inventory_manufacturer_stats(&self) -> Result<Vec<ManufacturerStats>, ServiceError>;
    async fn inventory_location_stats(&self) -> Result<Vec<LocationStats>, ServiceError>;

    // Locations
    async fn locations(&self) -> Result<Vec<location::Model>, ServiceError>;
    async fn location(&self, id: i32) -> Result<Option<location::Model>, ServiceError>;
    async fn create_location(
        &self,
        new: location::NewLocation,
    ) -> Result<location::Model, ServiceError>;
    async fn update_location(
        &self,
        id: i32,
        patch: location::LocationPatch,
    ) -> Result<Option<location::Model>, ServiceError>;
    async fn delete_location(&self, id: i32) -> Result<bool, ServiceError>;

    // Location transfers (append-only)
    async fn location_transfers(
        &self,
        inventory_item_id: Option<i32>,
    ) -> Result<Vec<location_transfer::Model>, ServiceError>;
    async fn create_location_transfer(
        &self,
        new: location_transfer::NewLocationTransfer,
    ) -> Result<location_transfer::Model, ServiceError>;

    // Banks
    async fn banks(&self) -> Result<Vec<bank::Model>, ServiceError>;
    async fn bank(&self, id: i32) -> Result<Option<bank::Model>, ServiceError>;
    async fn banks_by_type(&self, bank_type: BankType) -> Result<Vec<bank::Model>, ServiceError>;
    async fn create_bank(&self, new: bank::NewBank) -> Result<bank::Model, ServiceError>;
    async fn update_bank(
        &self,
        id: i32,
        patch: bank::BankPatch,
    ) -> Result<Option<bank::Model>, ServiceError>;
    async fn delete_bank(&self, id: i32) -> Result<bool, ServiceError>;

    // Bank interest rates
    async fn bank_interest_rates(
        &self,
        bank_id: Option<i32>,
    ) -> Result<Vec<bank_interest_rate::Model>, ServiceError>;
    async fn create_bank_interest_rate(
        &self,
        new: bank_interest_rate::NewBankInterestRate,
    ) -> Result<bank_interest_rate::Model, ServiceError>;

    // Companies
    async fn companies(&self) -> Result<Vec<company::Model>, ServiceError>;
    async fn company(&self, id: i32) -> Result<Option<company::Model>, ServiceError>;
    async fn create_company(
        &self,
        new: company::NewCompany,
    ) -> Result<company::Model, ServiceError>;
    async fn update_company(
        &self,
        id: i32,
        patch: company::CompanyPatch,
    ) -> Result<Option<company::Model>, ServiceError>;
    async fn delete_company(&self, id: i32) -> Result<bool, ServiceError>;

    // Quotations
    async fn quotations(&self) -> Result<Vec<quotation::Model>, ServiceError>;
    async fn quotation(&self, id: i32) -> Result<Option<quotation::Model>, ServiceError>;
    async fn create_quotation(
        &self,
        new: quotation::NewQuotation,
    ) -> Result<quotation::Model, ServiceError>;
    async fn update_quotation(
        &self,
        id: i32,
        patch: quotation::QuotationPatch,
    ) -> Result<Option<quotation::Model>, ServiceError>;
    async fn delete_quotation(&self, id: i32) -> Result<bool, ServiceError>;

    // Invoices
    async fn invoices(&self) -> Result<Vec<invoice::Model>, ServiceError>;
    async fn invoice(&self, id: i32) -> Result<Option<invoice::Model>, ServiceError>;
    async fn create_invoice(&self, new: invoice::NewInvoice)
        -> Result<invoice::Model, ServiceError>;
    async fn update_invoice(
        &self,
        id: i32,
        patch: invoice::InvoicePatch,
    ) -> Result<Option<invoice::Model>, ServiceError>;
    async fn delete_invoice(&self, id: i32) -> Result<bool, ServiceError>;

    // Manufacturers
    async fn manufacturers(&self) -> Result<Vec<manufacturer::Model>, ServiceError>;
    async fn manufacturer(&self, id: i32) -> Result<Option<manufacturer::Model>, ServiceError>;
    async fn manufacturer_by_name(
        &self,
        name: &str,
    ) -> Result<Option<manufacturer::Model>, ServiceError>;
    async fn create_manufacturer(
        &self,
        new: manufacturer::NewManufacturer,
    ) -> Result<manufacturer::Model, ServiceError>;
    async fn update_manufacturer(
        &self,
        id: i32,
        patch: manufacturer::ManufacturerPatch,
    ) -> Result<Option<manufacturer::Model>, ServiceError>;
    async fn delete_manufacturer(&self, id: i32) -> Result<bool, ServiceError>;

    // Users
    async fn users(&self) -> Result<Vec<user::Model>, ServiceError>;
    async fn user(&self, id: i32) -> Result<Option<user::Model>, ServiceError>;
    async fn user_by_username(&self, username: &str)
        -> Result<Option<user::Model>, ServiceError>;
    async fn create_user(
        &self,
        credentials: user::UserCredentials,
    ) -> Result<user::Model, ServiceError>;
    async fn update_user(
        &self,
        id: i32,
        patch: user::UserRecordPatch,
    ) -> Result<Option<user::Model>, ServiceError>;
    async fn delete_user(&self, id: i32) -> Result<bool, ServiceError>;

    // Financing rates
    async fn financing_rates(&self) -> Result<Vec<financing_rate::Model>, ServiceError>;
    async fn financing_rate(&self, id: i32)
        -> Result<Option<financing_rate::Model>, ServiceError>;
    async fn create_financing_rate(
        &self,
        new: financing_rate::NewFinancingRate,
    ) -> Result<financing_rate::Model, ServiceError>;
    async fn update_financing_rate(
        &self,
        id: i32,
        patch: financing_rate::FinancingRatePatch,
    ) -> Result<Option<financing_rate::Model>, ServiceError>;
    async fn delete_financing_rate(&self, id: i32) -> Result<bool, ServiceError>;
}
