use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Append-only log of a vehicle moving between locations.
///
/// Transfers reference the inventory item by id but from/to are plain
/// location names copied at transfer time; renaming a location later does
/// not rewrite history.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "location_transfers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub inventory_item_id: i32,
    pub from_location: String,
    pub to_location: String,
    pub transferred_by: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
pub struct NewLocationTransfer {
    pub inventory_item_id: i32,
    #[validate(length(min = 1, message = "from location is required"))]
    pub from_location: String,
    #[validate(length(min = 1, message = "to location is required"))]
    pub to_location: String,
    pub transferred_by: Option<String>,
    pub notes: Option<String>,
}

impl NewLocationTransfer {
    pub fn into_model(self, id: i32, now: DateTime<Utc>) -> Model {
        Model {
            id,
            inventory_item_id: self.inventory_item_id,
            from_location: self.from_location,
            to_location: self.to_location,
            transferred_by: self.transferred_by,
            notes: self.notes,
            created_at: now,
        }
    }
}
