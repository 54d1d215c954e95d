use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Location registry entry (showroom, warehouse, port, workshop, ...).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "locations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
pub struct NewLocation {
    #[validate(length(min = 1, message = "location name is required"))]
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl NewLocation {
    pub fn into_model(self, id: i32, now: DateTime<Utc>) -> Model {
        Model {
            id,
            name: self.name,
            description: self.description,
            is_active: self.is_active.unwrap_or(true),
            created_at: now,
            updated_at: None,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct LocationPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

impl LocationPatch {
    pub fn apply(self, location: &mut Model) {
        if let Some(v) = self.name {
            location.name = v;
        }
        if let Some(v) = self.description {
            location.description = Some(v);
        }
        if let Some(v) = self.is_active {
            location.is_active = v;
        }
    }
}
