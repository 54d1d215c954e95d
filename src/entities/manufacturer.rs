use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Category names registered under a manufacturer, stored as a JSON column.
#[derive(
    Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult,
)]
pub struct CategoryList(pub Vec<String>);

impl CategoryList {
    pub fn contains(&self, category: &str) -> bool {
        self.0.iter().any(|c| c == category)
    }
}

/// Manufacturer catalog entry.
///
/// The manufacturer -> category hierarchy is the reference data the
/// `fix-hierarchy` maintenance binary reconciles inventory against.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "manufacturers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,
    pub name_en: Option<String>,
    pub logo: Option<String>,
    #[sea_orm(column_type = "Json")]
    pub categories: CategoryList,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
pub struct NewManufacturer {
    #[validate(length(min = 1, message = "manufacturer name is required"))]
    pub name: String,
    pub name_en: Option<String>,
    pub logo: Option<String>,
    #[serde(default)]
    pub categories: Option<Vec<String>>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl NewManufacturer {
    pub fn into_model(self, id: i32, now: DateTime<Utc>) -> Model {
        Model {
            id,
            name: self.name,
            name_en: self.name_en,
            logo: self.logo,
            categories: CategoryList(self.categories.unwrap_or_default()),
            is_active: self.is_active.unwrap_or(true),
            created_at: now,
            updated_at: None,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ManufacturerPatch {
    pub name: Option<String>,
    pub name_en: Option<String>,
    pub logo: Option<String>,
    pub categories: Option<Vec<String>>,
    pub is_active: Option<bool>,
}

impl ManufacturerPatch {
    pub fn apply(self, manufacturer: &mut Model) {
        if let Some(v) = self.name {
            manufacturer.name = v;
        }
        if let Some(v) = self.name_en {
            manufacturer.name_en = Some(v);
        }
        if let Some(v) = self.logo {
            manufacturer.logo = Some(v);
        }
        if let Some(v) = self.categories {
            manufacturer.categories = CategoryList(v);
        }
        if let Some(v) = self.is_active {
            manufacturer.is_active = v;
        }
    }
}
