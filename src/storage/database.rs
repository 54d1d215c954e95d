//! sea-orm storage backend. Same façade contract as [`super::MemStorage`];
//! Postgres in production, SQLite for local runs and migration smoke tests.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    IntoActiveModel, QueryFilter, Set,
};

use crate::entities::{
    bank, bank_interest_rate, company, financing_rate, inventory_item, invoice, location,
    location_transfer, manufacturer, quotation, user,
};
use crate::entities::BankType;
use crate::errors::ServiceError;

use super::{
    compute_inventory_stats, compute_location_stats, compute_manufacturer_stats,
    InventoryFilter, InventoryStats, LocationStats, ManufacturerStats, Storage,
};

#[derive(Clone)]
pub struct DbStorage {
    db: Arc<DatabaseConnection>,
}

impl DbStorage {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn conn(&self) -> &DatabaseConnection {
        self.db.as_ref()
    }
}

#[async_trait]
impl Storage for DbStorage {
    // Inventory items

    async fn inventory_items(&self) -> Result<Vec<inventory_item::Model>, ServiceError> {
        Ok(inventory_item::Entity::find().all(self.conn()).await?)
    }

    async fn inventory_item(
        &self,
        id: i32,
    ) -> Result<Option<inventory_item::Model>, ServiceError> {
        Ok(inventory_item::Entity::find_by_id(id)
            .one(self.conn())
            .await?)
    }

    async fn create_inventory_item(
        &self,
        new: inventory_item::NewInventoryItem,
    ) -> Result<inventory_item::Model, ServiceError> {
        let mut active = new.into_model(0, Utc::now()).into_active_model().reset_all();
        active.id = ActiveValue::NotSet;
        Ok(active.insert(self.conn()).await?)
    }

    async fn update_inventory_item(
        &self,
        id: i32,
        patch: inventory_item::InventoryItemPatch,
    ) -> Result<Option<inventory_item::Model>, ServiceError> {
        let Some(mut model) = inventory_item::Entity::find_by_id(id).one(self.conn()).await?
        else {
            return Ok(None);
        };
        patch.apply(&mut model);
        model.updated_at = Some(Utc::now());
        Ok(Some(
            model.into_active_model().reset_all().update(self.conn()).await?,
        ))
    }

    async fn delete_inventory_item(&self, id: i32) -> Result<bool, ServiceError> {
        let result = inventory_item::Entity::delete_by_id(id)
            .exec(self.conn())
            .await?;
        Ok(result.rows_affected > 0)
    }

    async fn filter_inventory_items(
        &self,
        filter: &InventoryFilter,
    ) -> Result<Vec<inventory_item::Model>, ServiceError> {
        let mut condition = Condition::all();
        if let Some(manufacturer) = &filter.manufacturer {
            condition = condition.add(inventory_item::Column::Manufacturer.eq(manufacturer));
        }
        if let Some(category) = &filter.category {
            condition = condition.add(inventory_item::Column::Category.eq(category));
        }
        if let Some(status) = filter.status {
            condition = condition.add(inventory_item::Column::Status.eq(status));
        }
        if let Some(import_type) = &filter.import_type {
            condition = condition.add(inventory_item::Column::ImportType.eq(import_type));
        }
        if let Some(location) = &filter.location {
            condition = condition.add(inventory_item::Column::Location.eq(location));
        }
        if let Some(year) = filter.year {
            condition = condition.add(inventory_item::Column::Year.eq(year));
        }
        Ok(inventory_item::Entity::find()
            .filter(condition)
            .all(self.conn())
            .await?)
    }

    async fn search_inventory_items(
        &self,
        term: &str,
    ) -> Result<Vec<inventory_item::Model>, ServiceError> {
        let condition = Condition::any()
            .add(inventory_item::Column::Manufacturer.contains(term))
            .add(inventory_item::Column::Category.contains(term))
            .add(inventory_item::Column::TrimLevel.contains(term))
            .add(inventory_item::Column::ChassisNumber.contains(term))
            .add(inventory_item::Column::ExteriorColor.contains(term))
            .add(inventory_item::Column::InteriorColor.contains(term))
            .add(inventory_item::Column::Notes.contains(term));
        Ok(inventory_item::Entity::find()
            .filter(condition)
            .all(self.conn())
            .await?)
    }

    async fn sold_inventory_items(&self) -> Result<Vec<inventory_item::Model>, ServiceError> {
        Ok(inventory_item::Entity::find()
            .filter(inventory_item::Column::IsSold.eq(true))
            .all(self.conn())
            .await?)
    }

    async fn inventory_stats(&self) -> Result<InventoryStats, ServiceError> {
        let items = self.inventory_items().await?;
        Ok(compute_inventory_stats(&items))
    }

    async fn inventory_manufacturer_stats(
        &self,
    ) -> Result<Vec<ManufacturerStats>, ServiceError> {
        let items = self.inventory_items().await?;
        Ok(compute_manufacturer_stats(&items))
    }

    async fn inventory_location_stats(&self) -> Result<Vec<LocationStats>, ServiceError> {
        let items = self.inventory_items().await?;
        Ok(compute_location_stats(&items))
    }

    // Locations

    async fn locations(&self) -> Result<Vec<location::Model>, ServiceError> {
        Ok(location::Entity::find().all(self.conn()).await?)
    }

    async fn location(&self, id: i32) -> Result<Option<location::Model>, ServiceError> {
        Ok(location::Entity::find_by_id(id).one(self.conn()).await?)
    }

    async fn create_location(
        &self,
        new: location::NewLocation,
    ) -> Result<location::Model, ServiceError> {
        let mut active = new.into_model(0, Utc::now()).into_active_model().reset_all();
        active.id = ActiveValue::NotSet;
        Ok(active.insert(self.conn()).await?)
    }

    async fn update_location(
        &self,
        id: i32,
        patch: location::LocationPatch,
    ) -> Result<Option<location::Model>, ServiceError> {
        let Some(mut model) = location::Entity::find_by_id(id).one(self.conn()).await? else {
            return Ok(None);
        };
        patch.apply(&mut model);
        model.updated_at = Some(Utc::now());
        Ok(Some(
            model.into_active_model().reset_all().update(self.conn()).await?,
        ))
    }

    async fn delete_location(&self, id: i32) -> Result<bool, ServiceError> {
        let result = location::Entity::delete_by_id(id).exec(self.conn()).await?;
        Ok(result.rows_affected > 0)
    }

    // Location transfers

    async fn location_transfers(
        &self,
        inventory_item_id: Option<i32>,
    ) -> Result<Vec<location_transfer::Model>, ServiceError> {
        let mut query = location_transfer::Entity::find();
        if let Some(item_id) = inventory_item_id {
            query = query.filter(location_transfer::Column::InventoryItemId.eq(item_id));
        }
        Ok(query.all(self.conn()).await?)
    }

    async fn create_location_transfer(
        &self,
        new: location_transfer::NewLocationTransfer,
    ) -> Result<location_transfer::Model, ServiceError> {
        let now = Utc::now();
        let mut active = new.into_model(0, now).into_active_model().reset_all();
        active.id = ActiveValue::NotSet;
        let transfer = active.insert(self.conn()).await?;

        // Move the referenced vehicle; a missing item is not an error.
        if let Some(item) = inventory_item::Entity::find_by_id(transfer.inventory_item_id)
            .one(self.conn())
            .await?
        {
            let mut item = item.into_active_model();
            item.location = Set(transfer.to_location.clone());
            item.updated_at = Set(Some(now));
            item.update(self.conn()).await?;
        }

        Ok(transfer)
    }

    // Banks

    async fn banks(&self) -> Result<Vec<bank::Model>, ServiceError> {
        Ok(bank::Entity::find().all(self.conn()).await?)
    }

    async fn bank(&self, id: i32) -> Result<Option<bank::Model>, ServiceError> {
        Ok(bank::Entity::find_by_id(id).one(self.conn()).await?)
    }

    async fn banks_by_type(&self, bank_type: BankType) -> Result<Vec<bank::Model>, ServiceError> {
        Ok(bank::Entity::find()
            .filter(bank::Column::BankType.eq(bank_type))
            .all(self.conn())
            .await?)
    }

    async fn create_bank(&self, new: bank::NewBank) -> Result<bank::Model, ServiceError> {
        let mut active = new.into_model(0, Utc::now()).into_active_model().reset_all();
        active.id = ActiveValue::NotSet;
        Ok(active.insert(self.conn()).await?)
    }

    async fn update_bank(
        &self,
        id: i32,
        patch: bank::BankPatch,
    ) -> Result<Option<bank::Model>, ServiceError> {
        let Some(mut model) = bank::Entity::find_by_id(id).one(self.conn()).await? else {
            return Ok(None);
        };
        patch.apply(&mut model);
        model.updated_at = Some(Utc::now());
        Ok(Some(
            model.into_active_model().reset_all().update(self.conn()).await?,
        ))
    }

    async fn delete_bank(&self, id: i32) -> Result<bool, ServiceError> {
        let result = bank::Entity::delete_by_id(id).exec(self.conn()).await?;
        Ok(result.rows_affected > 0)
    }

    // Bank interest rates

    async fn bank_interest_rates(
        &self,
        bank_id: Option<i32>,
    ) -> Result<Vec<bank_interest_rate::Model>, ServiceError> {
        let mut query = bank_interest_rate::Entity::find();
        if let Some(bank_id) = bank_id {
            query = query.filter(bank_interest_rate::Column::BankId.eq(bank_id));
        }
        Ok(query.all(self.conn()).await?)
    }

    async fn create_bank_interest_rate(
        &self,
        new: bank_interest_rate::NewBankInterestRate,
    ) -> Result<bank_interest_rate::Model, ServiceError> {
        let mut active = new.into_model(0, Utc::now()).into_active_model().reset_all();
        active.id = ActiveValue::NotSet;
        Ok(active.insert(self.conn()).await?)
    }

    // Companies

    async fn companies(&self) -> Result<Vec<company::Model>, ServiceError> {
        Ok(company::Entity::find().all(self.conn()).await?)
    }

    async fn company(&self, id: i32) -> Result<Option<company::Model>, ServiceError> {
        Ok(company::Entity::find_by_id(id).one(self.conn()).await?)
    }

    async fn create_company(
        &self,
        new: company::NewCompany,
    ) -> Result<company::Model, ServiceError> {
        let mut active = new.into_model(0, Utc::now()).into_active_model().reset_all();
        active.id = ActiveValue::NotSet;
        Ok(active.insert(self.conn()).await?)
    }

    async fn update_company(
        &self,
        id: i32,
        patch: company::CompanyPatch,
    ) -> Result<Option<company::Model>, ServiceError> {
        let Some(mut model) = company::Entity::find_by_id(id).one(self.conn()).await? else {
            return Ok(None);
        };
        patch.apply(&mut model);
        model.updated_at = Some(Utc::now());
        Ok(Some(
            model.into_active_model().reset_all().update(self.conn()).await?,
        ))
    }

    async fn delete_company(&self, id: i32) -> Result<bool, ServiceError> {
        let result = company::Entity::delete_by_id(id).exec(self.conn()).await?;
        Ok(result.rows_affected > 0)
    }

    // Quotations

    async fn quotations(&self) -> Result<Vec<quotation::Model>, ServiceError> {
        Ok(quotation::Entity::find().all(self.conn()).await?)
    }

    async fn quotation(&self, id: i32) -> Result<Option<quotation::Model>, ServiceError> {
        Ok(quotation::Entity::find_by_id(id).one(self.conn()).await?)
    }

    async fn create_quotation(
        &self,
        new: quotation::NewQuotation,
    ) -> Result<quotation::Model, ServiceError> {
        // The generated document number needs the assigned id, so insert
        // first and patch the number afterwards when it was omitted.
        let explicit_number = new.quote_number.is_some();
        let mut active = new.into_model(0, Utc::now()).into_active_model().reset_all();
        active.id = ActiveValue::NotSet;
        let model = active.insert(self.conn()).await?;

        if explicit_number {
            return Ok(model);
        }
        let number = format!("QT-{:06}", model.id);
        let mut active = model.into_active_model();
        active.quote_number = Set(number);
        Ok(active.update(self.conn()).await?)
    }

    async fn update_quotation(
        &self,
        id: i32,
        patch: quotation::QuotationPatch,
    ) -> Result<Option<quotation::Model>, ServiceError> {
        let Some(mut model) = quotation::Entity::find_by_id(id).one(self.conn()).await? else {
            return Ok(None);
        };
        patch.apply(&mut model);
        model.updated_at = Some(Utc::now());
        Ok(Some(
            model.into_active_model().reset_all().update(self.conn()).await?,
        ))
    }

    async fn delete_quotation(&self, id: i32) -> Result<bool, ServiceError> {
        let result = quotation::Entity::delete_by_id(id).exec(self.conn()).await?;
        Ok(result.rows_affected > 0)
    }

    // Invoices

    async fn invoices(&self) -> Result<Vec<invoice::Model>, ServiceError> {
        Ok(invoice::Entity::find().all(self.conn()).await?)
    }

    async fn invoice(&self, id: i32) -> Result<Option<invoice::Model>, ServiceError> {
        Ok(invoice::Entity::find_by_id(id).one(self.conn()).await?)
    }

    async fn create_invoice(
        &self,
        new: invoice::NewInvoice,
    ) -> Result<invoice::Model, ServiceError> {
        let explicit_number = new.invoice_number.is_some();
        let mut active = new.into_model(0, Utc::now()).into_active_model().reset_all();
        active.id = ActiveValue::NotSet;
        let model = active.insert(self.conn()).await?;

        if explicit_number {
            return Ok(model);
        }
        let number = format!("INV-{:06}", model.id);
        let mut active = model.into_active_model();
        active.invoice_number = Set(number);
        Ok(active.update(self.conn()).await?)
    }

    async fn update_invoice(
        &self,
        id: i32,
        patch: invoice::InvoicePatch,
    ) -> Result<Option<invoice::Model>, ServiceError> {
        let Some(mut model) = invoice::Entity::find_by_id(id).one(self.conn()).await? else {
            return Ok(None);
        };
        patch.apply(&mut model);
        model.updated_at = Some(Utc::now());
        Ok(Some(
            model.into_active_model().reset_all().update(self.conn()).await?,
        ))
    }

    async fn delete_invoice(&self, id: i32) -> Result<bool, ServiceError> {
        let result = invoice::Entity::delete_by_id(id).exec(self.conn()).await?;
        Ok(result.rows_affected > 0)
    }

    // Manufacturers

    async fn manufacturers(&self) -> Result<Vec<manufacturer::Model>, ServiceError> {
        Ok(manufacturer::Entity::find().all(self.conn()).await?)
    }

    async fn manufacturer(
        &self,
        id: i32,
    ) -> Result<Option<manufacturer::Model>, ServiceError> {
        Ok(manufacturer::Entity::find_by_id(id).one(self.conn()).await?)
    }

    async fn manufacturer_by_name(
        &self,
        name: &str,
    ) -> Result<Option<manufacturer::Model>, ServiceError> {
        Ok(manufacturer::Entity::find()
            .filter(manufacturer::Column::Name.eq(name))
            .one(self.conn())
            .await?)
    }

    async fn create_manufacturer(
        &self,
        new: manufacturer::NewManufacturer,
    ) -> Result<manufacturer::Model, ServiceError> {
        let mut active = new.into_model(0, Utc::now()).into_active_model().reset_all();
        active.id = ActiveValue::NotSet;
        Ok(active.insert(self.conn()).await?)
    }

    async fn update_manufacturer(
        &self,
        id: i32,
        patch: manufacturer::ManufacturerPatch,
    ) -> Result<Option<manufacturer::Model>, ServiceError> {
        let Some(mut model) = manufacturer::Entity::find_by_id(id).one(self.conn()).await?
        else {
            return Ok(None);
        };
        patch.apply(&mut model);
        model.updated_at = Some(Utc::now());
        Ok(Some(
            model.into_active_model().reset_all().update(self.conn()).await?,
        ))
    }

    async fn delete_manufacturer(&self, id: i32) -> Result<bool, ServiceError> {
        let result = manufacturer::Entity::delete_by_id(id).exec(self.conn()).await?;
        Ok(result.rows_affected > 0)
    }

    // Users

    async fn users(&self) -> Result<Vec<user::Model>, ServiceError> {
        Ok(user::Entity::find().all(self.conn()).await?)
    }

    async fn user(&self, id: i32) -> Result<Option<user::Model>, ServiceError> {
        Ok(user::Entity::find_by_id(id).one(self.conn()).await?)
    }

    async fn user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<user::Model>, ServiceError> {
        Ok(user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(self.conn())
            .await?)
    }

    async fn create_user(
        &self,
        credentials: user::UserCredentials,
    ) -> Result<user::Model, ServiceError> {
        let mut active = credentials
            .into_model(0, Utc::now())
            .into_active_model()
            .reset_all();
        active.id = ActiveValue::NotSet;
        Ok(active.insert(self.conn()).await?)
    }

    async fn update_user(
        &self,
        id: i32,
        patch: user::UserRecordPatch,
    ) -> Result<Option<user::Model>, ServiceError> {
        let Some(mut model) = user::Entity::find_by_id(id).one(self.conn()).await? else {
            return Ok(None);
        };
        patch.apply(&mut model);
        model.updated_at = Some(Utc::now());
        Ok(Some(
            model.into_active_model().reset_all().update(self.conn()).await?,
        ))
    }

    async fn delete_user(&self, id: i32) -> Result<bool, ServiceError> {
        let result = user::Entity::delete_by_id(id).exec(self.conn()).await?;
        Ok(result.rows_affected > 0)
    }

    // Financing rates

    async fn financing_rates(&self) -> Result<Vec<financing_rate::Model>, ServiceError> {
        Ok(financing_rate::Entity::find().all(self.conn()).await?)
    }

    async fn financing_rate(
        &self,
        id: i32,
    ) -> Result<Option<financing_rate::Model>, ServiceError> {
        Ok(financing_rate::Entity::find_by_id(id).one(self.conn()).await?)
    }

    async fn create_financing_rate(
        &self,
        new: financing_rate::NewFinancingRate,
    ) -> Result<financing_rate::Model, ServiceError> {
        let mut active = new.into_model(0, Utc::now()).into_active_model().reset_all();
        active.id = ActiveValue::NotSet;
        Ok(active.insert(self.conn()).await?)
    }

    async fn update_financing_rate(
        &self,
        id: i32,
        patch: financing_rate::FinancingRatePatch,
    ) -> Result<Option<financing_rate::Model>, ServiceError> {
        let Some(mut model) = financing_rate::Entity::find_by_id(id).one(self.conn()).await?
        else {
            return Ok(None);
        };
        patch.apply(&mut model);
        model.updated_at = Some(Utc::now());
        Ok(Some(
            model.into_active_model().reset_all().update(self.conn()).await?,
        ))
    }

    async fn delete_financing_rate(&self, id: i32) -> Result<bool, ServiceError> {
        let result = financing_rate::Entity::delete_by_id(id).exec(self.conn()).await?;
        Ok(result.rows_affected > 0)
    }
}
