//! In-memory storage backend: one concurrent map per entity keyed by an
//! auto-incrementing integer id. The default backend, and the test double.

use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use crate::entities::{
    bank, bank_interest_rate, company, financing_rate, inventory_item, invoice, location,
    location_transfer, manufacturer, quotation, user,
};
use crate::entities::BankType;
use crate::errors::ServiceError;

use super::{
    compute_inventory_stats, compute_location_stats, compute_manufacturer_stats, search_matches,
    InventoryFilter, InventoryStats, LocationStats, ManufacturerStats, Storage,
};

#[derive(Default)]
pub struct MemStorage {
    inventory_items: DashMap<i32, inventory_item::Model>,
    inventory_seq: AtomicI32,
    locations: DashMap<i32, location::Model>,
    location_seq: AtomicI32,
    location_transfers: DashMap<i32, location_transfer::Model>,
    transfer_seq: AtomicI32,
    banks: DashMap<i32, bank::Model>,
    bank_seq: AtomicI32,
    bank_interest_rates: DashMap<i32, bank_interest_rate::Model>,
    interest_rate_seq: AtomicI32,
    companies: DashMap<i32, company::Model>,
    company_seq: AtomicI32,
    quotations: DashMap<i32, quotation::Model>,
    quotation_seq: AtomicI32,
    invoices: DashMap<i32, invoice::Model>,
    invoice_seq: AtomicI32,
    manufacturers: DashMap<i32, manufacturer::Model>,
    manufacturer_seq: AtomicI32,
    users: DashMap<i32, user::Model>,
    user_seq: AtomicI32,
    financing_rates: DashMap<i32, financing_rate::Model>,
    financing_rate_seq: AtomicI32,
}

impl MemStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

fn next_id(seq: &AtomicI32) -> i32 {
    seq.fetch_add(1, Ordering::SeqCst) + 1
}

fn snapshot<T: Clone>(map: &DashMap<i32, T>) -> Vec<T> {
    let mut items: Vec<(i32, T)> = map
        .iter()
        .map(|entry| (*entry.key(), entry.value().clone()))
        .collect();
    items.sort_by_key(|(id, _)| *id);
    items.into_iter().map(|(_, value)| value).collect()
}

fn get_cloned<T: Clone>(map: &DashMap<i32, T>, id: i32) -> Option<T> {
    map.get(&id).map(|entry| entry.value().clone())
}

fn remove<T>(map: &DashMap<i32, T>, id: i32) -> bool {
    map.remove(&id).is_some()
}

#[async_trait]
impl Storage for MemStorage {
    // Inventory items

    async fn inventory_items(&self) -> Result<Vec<inventory_item::Model>, ServiceError> {
        Ok(snapshot(&self.inventory_items))
    }

    async fn inventory_item(
        &self,
        id: i32,
    ) -> Result<Option<inventory_item::Model>, ServiceError> {
        Ok(get_cloned(&self.inventory_items, id))
    }

    async fn create_inventory_item(
        &self,
        new: inventory_item::NewInventoryItem,
    ) -> Result<inventory_item::Model, ServiceError> {
        let id = next_id(&self.inventory_seq);
        let model = new.into_model(id, Utc::now());
        self.inventory_items.insert(id, model.clone());
        Ok(model)
    }

    async fn update_inventory_item(
        &self,
        id: i32,
        patch: inventory_item::InventoryItemPatch,
    ) -> Result<Option<inventory_item::Model>, ServiceError> {
        let Some(mut entry) = self.inventory_items.get_mut(&id) else {
            return Ok(None);
        };
        patch.apply(&mut entry);
        entry.updated_at = Some(Utc::now());
        Ok(Some(entry.clone()))
    }

    async fn delete_inventory_item(&self, id: i32) -> Result<bool, ServiceError> {
        Ok(remove(&self.inventory_items, id))
    }

    async fn filter_inventory_items(
        &self,
        filter: &InventoryFilter,
    ) -> Result<Vec<inventory_item::Model>, ServiceError> {
        Ok(snapshot(&self.inventory_items)
            .into_iter()
            .filter(|item| filter.matches(item))
            .collect())
    }

    async fn search_inventory_items(
        &self,
        term: &str,
    ) -> Result<Vec<inventory_item::Model>, ServiceError> {
        Ok(snapshot(&self.inventory_items)
            .into_iter()
            .filter(|item| search_matches(item, term))
            .collect())
    }

    async fn sold_inventory_items(&self) -> Result<Vec<inventory_item::Model>, ServiceError> {
        Ok(snapshot(&self.inventory_items)
            .into_iter()
            .filter(|item| item.is_sold)
            .collect())
    }

    async fn inventory_stats(&self) -> Result<InventoryStats, ServiceError> {
        Ok(compute_inventory_stats(&snapshot(&self.inventory_items)))
    }

    async fn inventory_manufacturer_stats(
        &self,
    ) -> Result<Vec<ManufacturerStats>, ServiceError> {
        Ok(compute_manufacturer_stats(&snapshot(&self.inventory_items)))
    }

    async fn inventory_location_stats(&self) -> Result<Vec<LocationStats>, ServiceError> {
        Ok(compute_location_stats(&snapshot(&self.inventory_items)))
    }

    // Locations

    async fn locations(&self) -> Result<Vec<location::Model>, ServiceError> {
        Ok(snapshot(&self.locations))
    }

    async fn location(&self, id: i32) -> Result<Option<location::Model>, ServiceError> {
        Ok(get_cloned(&self.locations, id))
    }

    async fn create_location(
        &self,
        new: location::NewLocation,
    ) -> Result<location::Model, ServiceError> {
        let id = next_id(&self.location_seq);
        let model = new.into_model(id, Utc::now());
        self.locations.insert(id, model.clone());
        Ok(model)
    }

    async fn update_location(
        &self,
        id: i32,
        patch: location::LocationPatch,
    ) -> Result<Option<location::Model>, ServiceError> {
        let Some(mut entry) = self.locations.get_mut(&id) else {
            return Ok(None);
        };
        patch.apply(&mut entry);
        entry.updated_at = Some(Utc::now());
        Ok(Some(entry.clone()))
    }

    async fn delete_location(&self, id: i32) -> Result<bool, ServiceError> {
        Ok(remove(&self.locations, id))
    }

    // Location transfers

    async fn location_transfers(
        &self,
        inventory_item_id: Option<i32>,
    ) -> Result<Vec<location_transfer::Model>, ServiceError> {
        Ok(snapshot(&self.location_transfers)
            .into_iter()
            .filter(|t| inventory_item_id.map_or(true, |id| t.inventory_item_id == id))
            .collect())
    }

    async fn create_location_transfer(
        &self,
        new: location_transfer::NewLocationTransfer,
    ) -> Result<location_transfer::Model, ServiceError> {
        let now = Utc::now();
        let id = next_id(&self.transfer_seq);
        let model = new.into_model(id, now);
        // The one cross-entity side effect: move the referenced vehicle.
        // A missing item is not an error.
        if let Some(mut item) = self.inventory_items.get_mut(&model.inventory_item_id) {
            item.location = model.to_location.clone();
            item.updated_at = Some(now);
        }
        self.location_transfers.insert(id, model.clone());
        Ok(model)
    }

    // Banks

    async fn banks(&self) -> Result<Vec<bank::Model>, ServiceError> {
        Ok(snapshot(&self.banks))
    }

    async fn bank(&self, id: i32) -> Result<Option<bank::Model>, ServiceError> {
        Ok(get_cloned(&self.banks, id))
    }

    async fn banks_by_type(&self, bank_type: BankType) -> Result<Vec<bank::Model>, ServiceError> {
        Ok(snapshot(&self.banks)
            .into_iter()
            .filter(|b| b.bank_type == bank_type)
            .collect())
    }

    async fn create_bank(&self, new: bank::NewBank) -> Result<bank::Model, ServiceError> {
        let id = next_id(&self.bank_seq);
        let model = new.into_model(id, Utc::now());
        self.banks.insert(id, model.clone());
        Ok(model)
    }

    async fn update_bank(
        &self,
        id: i32,
        patch: bank::BankPatch,
    ) -> Result<Option<bank::Model>, ServiceError> {
        let Some(mut entry) = self.banks.get_mut(&id) else {
            return Ok(None);
        };
        patch.apply(&mut entry);
        entry.updated_at = Some(Utc::now());
        Ok(Some(entry.clone()))
    }

    async fn delete_bank(&self, id: i32) -> Result<bool, ServiceError> {
        Ok(remove(&self.banks, id))
    }

    // Bank interest rates

    async fn bank_interest_rates(
        &self,
        bank_id: Option<i32>,
    ) -> Result<Vec<bank_interest_rate::Model>, ServiceError> {
        Ok(snapshot(&self.bank_interest_rates)
            .into_iter()
            .filter(|r| bank_id.map_or(true, |id| r.bank_id == id))
            .collect())
    }

    async fn create_bank_interest_rate(
        &self,
        new: bank_interest_rate::NewBankInterestRate,
    ) -> Result<bank_interest_rate::Model, ServiceError> {
        let id = next_id(&self.interest_rate_seq);
        let model = new.into_model(id, Utc::now());
        self.bank_interest_rates.insert(id, model.clone());
        Ok(model)
    }

    // Companies

    async fn companies(&self) -> Result<Vec<company::Model>, ServiceError> {
        Ok(snapshot(&self.companies))
    }

    async fn company(&self, id: i32) -> Result<Option<company::Model>, ServiceError> {
        Ok(get_cloned(&self.companies, id))
    }

    async fn create_company(
        &self,
        new: company::NewCompany,
    ) -> Result<company::Model, ServiceError> {
        let id = next_id(&self.company_seq);
        let model = new.into_model(id, Utc::now());
        self.companies.insert(id, model.clone());
        Ok(model)
    }

    async fn update_company(
        &self,
        id: i32,
        patch: company::CompanyPatch,
    ) -> Result<Option<company::Model>, ServiceError> {
        let Some(mut entry) = self.companies.get_mut(&id) else {
            return Ok(None);
        };
        patch.apply(&mut entry);
        entry.updated_at = Some(Utc::now());
        Ok(Some(entry.clone()))
    }

    async fn delete_company(&self, id: i32) -> Result<bool, ServiceError> {
        Ok(remove(&self.companies, id))
    }

    // Quotations

    async fn quotations(&self) -> Result<Vec<quotation::Model>, ServiceError> {
        Ok(snapshot(&self.quotations))
    }

    async fn quotation(&self, id: i32) -> Result<Option<quotation::Model>, ServiceError> {
        Ok(get_cloned(&self.quotations, id))
    }

    async fn create_quotation(
        &self,
        new: quotation::NewQuotation,
    ) -> Result<quotation::Model, ServiceError> {
        let id = next_id(&self.quotation_seq);
        let model = new.into_model(id, Utc::now());
        self.quotations.insert(id, model.clone());
        Ok(model)
    }

    async fn update_quotation(
        &self,
        id: i32,
        patch: quotation::QuotationPatch,
    ) -> Result<Option<quotation::Model>, ServiceError> {
        let Some(mut entry) = self.quotations.get_mut(&id) else {
            return Ok(None);
        };
        patch.apply(&mut entry);
        entry.updated_at = Some(Utc::now());
        Ok(Some(entry.clone()))
    }

    async fn delete_quotation(&self, id: i32) -> Result<bool, ServiceError> {
        Ok(remove(&self.quotations, id))
    }

    // Invoices

    async fn invoices(&self) -> Result<Vec<invoice::Model>, ServiceError> {
        Ok(snapshot(&self.invoices))
    }

    async fn invoice(&self, id: i32) -> Result<Option<invoice::Model>, ServiceError> {
        Ok(get_cloned(&self.invoices, id))
    }

    async fn create_invoice(
        &self,
        new: invoice::NewInvoice,
    ) -> Result<invoice::Model, ServiceError> {
        let id = next_id(&self.invoice_seq);
        let model = new.into_model(id, Utc::now());
        self.invoices.insert(id, model.clone());
        Ok(model)
    }

    async fn update_invoice(
        &self,
        id: i32,
        patch: invoice::InvoicePatch,
    ) -> Result<Option<invoice::Model>, ServiceError> {
        let Some(mut entry) = self.invoices.get_mut(&id) else {
            return Ok(None);
        };
        patch.apply(&mut entry);
        entry.updated_at = Some(Utc::now());
        Ok(Some(entry.clone()))
    }

    async fn delete_invoice(&self, id: i32) -> Result<bool, ServiceError> {
        Ok(remove(&self.invoices, id))
    }

    // Manufacturers

    async fn manufacturers(&self) -> Result<Vec<manufacturer::Model>, ServiceError> {
        Ok(snapshot(&self.manufacturers))
    }

    async fn manufacturer(
        &self,
        id: i32,
    ) -> Result<Option<manufacturer::Model>, ServiceError> {
        Ok(get_cloned(&self.manufacturers, id))
    }

    async fn manufacturer_by_name(
        &self,
        name: &str,
    ) -> Result<Option<manufacturer::Model>, ServiceError> {
        Ok(snapshot(&self.manufacturers)
            .into_iter()
            .find(|m| m.name == name))
    }

    async fn create_manufacturer(
        &self,
        new: manufacturer::NewManufacturer,
    ) -> Result<manufacturer::Model, ServiceError> {
        let id = next_id(&self.manufacturer_seq);
        let model = new.into_model(id, Utc::now());
        self.manufacturers.insert(id, model.clone());
        Ok(model)
    }

    async fn update_manufacturer(
        &self,
        id: i32,
        patch: manufacturer::ManufacturerPatch,
    ) -> Result<Option<manufacturer::Model>, ServiceError> {
        let Some(mut entry) = self.manufacturers.get_mut(&id) else {
            return Ok(None);
        };
        patch.apply(&mut entry);
        entry.updated_at = Some(Utc::now());
        Ok(Some(entry.clone()))
    }

    async fn delete_manufacturer(&self, id: i32) -> Result<bool, ServiceError> {
        Ok(remove(&self.manufacturers, id))
    }

    // Users

    async fn users(&self) -> Result<Vec<user::Model>, ServiceError> {
        Ok(snapshot(&self.users))
    }

    async fn user(&self, id: i32) -> Result<Option<user::Model>, ServiceError> {
        Ok(get_cloned(&self.users, id))
    }

    async fn user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<user::Model>, ServiceError> {
        Ok(snapshot(&self.users)
            .into_iter()
            .find(|u| u.username == username))
    }

    async fn create_user(
        &self,
        credentials: user::UserCredentials,
    ) -> Result<user::Model, ServiceError> {
        let id = next_id(&self.user_seq);
        let model = credentials.into_model(id, Utc::now());
        self.users.insert(id, model.clone());
        Ok(model)
    }

    async fn update_user(
        &self,
        id: i32,
        patch: user::UserRecordPatch,
    ) -> Result<Option<user::Model>, ServiceError> {
        let Some(mut entry) = self.users.get_mut(&id) else {
            return Ok(None);
        };
        patch.apply(&mut entry);
        entry.updated_at = Some(Utc::now());
        Ok(Some(entry.clone()))
    }

    async fn delete_user(&self, id: i32) -> Result<bool, ServiceError> {
        Ok(remove(&self.users, id))
    }

    // Financing rates

    async fn financing_rates(&self) -> Result<Vec<financing_rate::Model>, ServiceError> {
        Ok(snapshot(&self.financing_rates))
    }

    async fn financing_rate(
        &self,
        id: i32,
    ) -> Result<Option<financing_rate::Model>, ServiceError> {
        Ok(get_cloned(&self.financing_rates, id))
    }

    async fn create_financing_rate(
        &self,
        new: financing_rate::NewFinancingRate,
    ) -> Result<financing_rate::Model, ServiceError> {
        let id = next_id(&self.financing_rate_seq);
        let model = new.into_model(id, Utc::now());
        self.financing_rates.insert(id, model.clone());
        Ok(model)
    }

    async fn update_financing_rate(
        &self,
        id: i32,
        patch: financing_rate::FinancingRatePatch,
    ) -> Result<Option<financing_rate::Model>, ServiceError> {
        let Some(mut entry) = self.financing_rates.get_mut(&id) else {
            return Ok(None);
        };
        patch.apply(&mut entry);
        entry.updated_at = Some(Utc::now());
        Ok(Some(entry.clone()))
    }

    async fn delete_financing_rate(&self, id: i32) -> Result<bool, ServiceError> {
        Ok(remove(&self.financing_rates, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::inventory_item::{InventoryItemPatch, NewInventoryItem};
    use crate::entities::location_transfer::NewLocationTransfer;
    use crate::entities::VehicleStatus;

    fn new_item(manufacturer: &str, chassis: &str, status: VehicleStatus) -> NewInventoryItem {
        NewInventoryItem {
            manufacturer: manufacturer.to_string(),
            category: "كامري".to_string(),
            trim_level: None,
            engine_capacity: "2.5L".to_string(),
            year: 2023,
            exterior_color: "أبيض".to_string(),
            interior_color: "بيج".to_string(),
            import_type: "شركة".to_string(),
            ownership_type: "معرض".to_string(),
            location: "المعرض".to_string(),
            chassis_number: chassis.to_string(),
            price: None,
            status: Some(status),
            is_sold: None,
            images: None,
            notes: None,
        }
    }

    #[tokio::test]
    async fn create_assigns_sequential_ids_and_defaults() {
        let storage = MemStorage::new();
        let first = storage
            .create_inventory_item(new_item("تويوتا", "ABC123", VehicleStatus::Available))
            .await
            .unwrap();
        let second = storage
            .create_inventory_item(new_item("نيسان", "DEF456", VehicleStatus::InTransit))
            .await
            .unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert!(!first.is_sold);
        assert!(first.images.0.is_empty());

        let fetched = storage.inventory_item(1).await.unwrap().unwrap();
        assert_eq!(fetched, first);
    }

    #[tokio::test]
    async fn update_missing_id_returns_none_and_leaves_collection_alone() {
        let storage = MemStorage::new();
        storage
            .create_inventory_item(new_item("تويوتا", "ABC123", VehicleStatus::Available))
            .await
            .unwrap();

        let result = storage
            .update_inventory_item(99, InventoryItemPatch::default())
            .await
            .unwrap();
        assert!(result.is_none());
        assert_eq!(storage.inventory_items().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn delete_missing_id_is_a_noop() {
        let storage = MemStorage::new();
        storage
            .create_bank(crate::entities::bank::NewBank {
                bank_name: "مصرف الراجحي".to_string(),
                name_en: None,
                account_name: "الشركة".to_string(),
                account_number: "123".to_string(),
                iban: "SA000000".to_string(),
                bank_type: BankType::Company,
                logo: None,
                is_active: None,
            })
            .await
            .unwrap();

        assert!(!storage.delete_bank(42).await.unwrap());
        assert_eq!(storage.banks().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn marking_sold_moves_item_into_sold_queries() {
        let storage = MemStorage::new();
        let item = storage
            .create_inventory_item(new_item("تويوتا", "ABC123", VehicleStatus::Available))
            .await
            .unwrap();

        let before = storage.inventory_stats().await.unwrap();
        assert_eq!(before.sold, 0);

        storage
            .update_inventory_item(
                item.id,
                InventoryItemPatch {
                    status: Some(VehicleStatus::Sold),
                    is_sold: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        let sold = storage.sold_inventory_items().await.unwrap();
        assert_eq!(sold.len(), 1);
        assert_eq!(sold[0].id, item.id);

        let after = storage.inventory_stats().await.unwrap();
        assert_eq!(after.sold, before.sold + 1);
    }

    #[tokio::test]
    async fn banks_by_type_partitions_the_collection() {
        let storage = MemStorage::new();
        for (name, bank_type) in [
            ("مصرف الراجحي", BankType::Company),
            ("البنك الأهلي", BankType::Personal),
        ] {
            storage
                .create_bank(crate::entities::bank::NewBank {
                    bank_name: name.to_string(),
                    name_en: None,
                    account_name: "حساب".to_string(),
                    account_number: "1".to_string(),
                    iban: "SA1".to_string(),
                    bank_type,
                    logo: None,
                    is_active: None,
                })
                .await
                .unwrap();
        }

        let company = storage.banks_by_type(BankType::Company).await.unwrap();
        assert_eq!(company.len(), 1);
        assert_eq!(company[0].bank_name, "مصرف الراجحي");
        let personal = storage.banks_by_type(BankType::Personal).await.unwrap();
        assert_eq!(personal.len(), 1);
        assert_eq!(personal[0].bank_name, "البنك الأهلي");
    }

    #[tokio::test]
    async fn transfer_moves_the_referenced_vehicle() {
        let storage = MemStorage::new();
        let item = storage
            .create_inventory_item(new_item("تويوتا", "ABC123", VehicleStatus::InTransit))
            .await
            .unwrap();

        storage
            .create_location_transfer(NewLocationTransfer {
                inventory_item_id: item.id,
                from_location: "الميناء".to_string(),
                to_location: "المعرض الرئيسي".to_string(),
                transferred_by: None,
                notes: None,
            })
            .await
            .unwrap();

        let moved = storage.inventory_item(item.id).await.unwrap().unwrap();
        assert_eq!(moved.location, "المعرض الرئيسي");

        let log = storage.location_transfers(Some(item.id)).await.unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].from_location, "الميناء");
    }

    #[tokio::test]
    async fn transfer_for_missing_item_still_appends_to_log() {
        let storage = MemStorage::new();
        let transfer = storage
            .create_location_transfer(NewLocationTransfer {
                inventory_item_id: 404,
                from_location: "أ".to_string(),
                to_location: "ب".to_string(),
                transferred_by: None,
                notes: None,
            })
            .await
            .unwrap();
        assert_eq!(transfer.inventory_item_id, 404);
        assert_eq!(storage.location_transfers(None).await.unwrap().len(), 1);
    }
}
