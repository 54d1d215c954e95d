use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Vehicle availability status.
///
/// Wire and column values are the Arabic business terms used on dealership
/// documents; the variants give them typed names inside the codebase.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    strum::Display,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum VehicleStatus {
    #[sea_orm(string_value = "متوفر")]
    #[serde(rename = "متوفر")]
    #[strum(serialize = "متوفر")]
    Available,

    #[sea_orm(string_value = "في الطريق")]
    #[serde(rename = "في الطريق")]
    #[strum(serialize = "في الطريق")]
    InTransit,

    #[sea_orm(string_value = "قيد الصيانة")]
    #[serde(rename = "قيد الصيانة")]
    #[strum(serialize = "قيد الصيانة")]
    InMaintenance,

    #[sea_orm(string_value = "محجوز")]
    #[serde(rename = "محجوز")]
    #[strum(serialize = "محجوز")]
    Reserved,

    #[sea_orm(string_value = "مباع")]
    #[serde(rename = "مباع")]
    #[strum(serialize = "مباع")]
    Sold,
}

impl Default for VehicleStatus {
    fn default() -> Self {
        Self::Available
    }
}

/// Ordered list of image URLs, stored as a JSON column.
#[derive(
    Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult,
)]
pub struct ImageList(pub Vec<String>);

/// Inventory item entity: one physical vehicle in stock.
///
/// `chassis_number` is the business key but uniqueness is deliberately not
/// enforced at this layer; manufacturer/category/location are plain strings
/// matched against the catalogs by name, never by foreign key.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inventory_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Manufacturer name as it appears in the catalog (e.g. "تويوتا")
    pub manufacturer: String,

    /// Category (model line) under the manufacturer (e.g. "كامري")
    pub category: String,

    /// Trim level within the category
    pub trim_level: Option<String>,

    /// Engine capacity label (e.g. "2.5L", "V6")
    pub engine_capacity: String,

    /// Model year
    pub year: i32,

    pub exterior_color: String,
    pub interior_color: String,

    /// Import channel (e.g. "شخصي", "شركة", "مستعمل شخصي")
    pub import_type: String,

    /// Ownership classification of the vehicle
    pub ownership_type: String,

    /// Current location name; updated by location transfers
    pub location: String,

    /// Chassis number (VIN); business key, uniqueness unenforced
    pub chassis_number: String,

    /// Listed price; absent while the vehicle is unpriced
    #[sea_orm(column_type = "Decimal(Some((12, 2)))", nullable)]
    pub price: Option<Decimal>,

    pub status: VehicleStatus,

    /// Sold flag; kept alongside `status` exactly as the source system does
    pub is_sold: bool,

    /// Ordered image URLs
    #[sea_orm(column_type = "Json")]
    pub images: ImageList,

    pub notes: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Insert variant: fields required at creation. Optional fields receive the
/// declared defaults (`images: []`, `is_sold: false`, `status: Available`).
#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
pub struct NewInventoryItem {
    #[validate(length(min = 1, message = "manufacturer is required"))]
    pub manufacturer: String,
    #[validate(length(min = 1, message = "category is required"))]
    pub category: String,
    pub trim_level: Option<String>,
    #[validate(length(min = 1, message = "engine capacity is required"))]
    pub engine_capacity: String,
    #[validate(range(min = 1980, max = 2100, message = "year out of range"))]
    pub year: i32,
    pub exterior_color: String,
    pub interior_color: String,
    pub import_type: String,
    pub ownership_type: String,
    #[validate(length(min = 1, message = "location is required"))]
    pub location: String,
    #[validate(length(min = 1, message = "chassis number is required"))]
    pub chassis_number: String,
    pub price: Option<Decimal>,
    #[serde(default)]
    pub status: Option<VehicleStatus>,
    #[serde(default)]
    pub is_sold: Option<bool>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    pub notes: Option<String>,
}

impl NewInventoryItem {
    /// Materialise a stored record from the insert variant, applying the
    /// declared defaults. The id is assigned by the storage backend.
    pub fn into_model(self, id: i32, now: DateTime<Utc>) -> Model {
        Model {
            id,
            manufacturer: self.manufacturer,
            category: self.category,
            trim_level: self.trim_level,
            engine_capacity: self.engine_capacity,
            year: self.year,
            exterior_color: self.exterior_color,
            interior_color: self.interior_color,
            import_type: self.import_type,
            ownership_type: self.ownership_type,
            location: self.location,
            chassis_number: self.chassis_number,
            price: self.price,
            status: self.status.unwrap_or_default(),
            is_sold: self.is_sold.unwrap_or(false),
            images: ImageList(self.images.unwrap_or_default()),
            notes: self.notes,
            created_at: now,
            updated_at: None,
        }
    }
}

/// Shallow-merge patch: present fields overwrite, absent fields are kept.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct InventoryItemPatch {
    pub manufacturer: Option<String>,
    pub category: Option<String>,
    pub trim_level: Option<String>,
    pub engine_capacity: Option<String>,
    pub year: Option<i32>,
    pub exterior_color: Option<String>,
    pub interior_color: Option<String>,
    pub import_type: Option<String>,
    pub ownership_type: Option<String>,
    pub location: Option<String>,
    pub chassis_number: Option<String>,
    pub price: Option<Decimal>,
    pub status: Option<VehicleStatus>,
    pub is_sold: Option<bool>,
    pub images: Option<Vec<String>>,
    pub notes: Option<String>,
}

impl InventoryItemPatch {
    pub fn apply(self, item: &mut Model) {
        if let Some(v) = self.manufacturer {
            item.manufacturer = v;
        }
        if let Some(v) = self.category {
            item.category = v;
        }
        if let Some(v) = self.trim_level {
            item.trim_level = Some(v);
        }
        if let Some(v) = self.engine_capacity {
            item.engine_capacity = v;
        }
        if let Some(v) = self.year {
            item.year = v;
        }
        if let Some(v) = self.exterior_color {
            item.exterior_color = v;
        }
        if let Some(v) = self.interior_color {
            item.interior_color = v;
        }
        if let Some(v) = self.import_type {
            item.import_type = v;
        }
        if let Some(v) = self.ownership_type {
            item.ownership_type = v;
        }
        if let Some(v) = self.location {
            item.location = v;
        }
        if let Some(v) = self.chassis_number {
            item.chassis_number = v;
        }
        if let Some(v) = self.price {
            item.price = Some(v);
        }
        if let Some(v) = self.status {
            item.status = v;
        }
        if let Some(v) = self.is_sold {
            item.is_sold = v;
        }
        if let Some(v) = self.images {
            item.images = ImageList(v);
        }
        if let Some(v) = self.notes {
            item.notes = Some(v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_item() -> NewInventoryItem {
        NewInventoryItem {
            manufacturer: "تويوتا".to_string(),
            category: "كامري".to_string(),
            trim_level: None,
            engine_capacity: "2.5L".to_string(),
            year: 2023,
            exterior_color: "أبيض".to_string(),
            interior_color: "بيج".to_string(),
            import_type: "شركة".to_string(),
            ownership_type: "ملكية الشركة".to_string(),
            location: "المعرض".to_string(),
            chassis_number: "ABC123".to_string(),
            price: None,
            status: None,
            is_sold: None,
            images: None,
            notes: None,
        }
    }

    #[test]
    fn defaults_applied_on_create() {
        let model = new_item().into_model(1, Utc::now());
        assert_eq!(model.id, 1);
        assert_eq!(model.status, VehicleStatus::Available);
        assert!(!model.is_sold);
        assert_eq!(model.images, ImageList(vec![]));
        assert!(model.updated_at.is_none());
    }

    #[test]
    fn patch_merges_only_present_fields() {
        let mut model = new_item().into_model(1, Utc::now());
        let patch = InventoryItemPatch {
            status: Some(VehicleStatus::Sold),
            is_sold: Some(true),
            ..Default::default()
        };
        patch.apply(&mut model);
        assert_eq!(model.status, VehicleStatus::Sold);
        assert!(model.is_sold);
        // untouched fields keep their values
        assert_eq!(model.manufacturer, "تويوتا");
        assert_eq!(model.chassis_number, "ABC123");
    }

    #[test]
    fn status_serialises_to_arabic_wire_value() {
        let json = serde_json::to_string(&VehicleStatus::Available).unwrap();
        assert_eq!(json, "\"متوفر\"");
        let back: VehicleStatus = serde_json::from_str("\"مباع\"").unwrap();
        assert_eq!(back, VehicleStatus::Sold);
    }
}
