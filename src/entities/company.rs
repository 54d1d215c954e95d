use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Issuing company whose letterhead appears on quotations and invoices.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "companies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,
    pub logo: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub registration_number: Option<String>,
    pub tax_number: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
pub struct NewCompany {
    #[validate(length(min = 1, message = "company name is required"))]
    pub name: String,
    pub logo: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    #[validate(email(message = "invalid email"))]
    pub email: Option<String>,
    pub registration_number: Option<String>,
    pub tax_number: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl NewCompany {
    pub fn into_model(self, id: i32, now: DateTime<Utc>) -> Model {
        Model {
            id,
            name: self.name,
            logo: self.logo,
            address: self.address,
            phone: self.phone,
            email: self.email,
            registration_number: self.registration_number,
            tax_number: self.tax_number,
            is_active: self.is_active.unwrap_or(true),
            created_at: now,
            updated_at: None,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct CompanyPatch {
    pub name: Option<String>,
    pub logo: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub registration_number: Option<String>,
    pub tax_number: Option<String>,
    pub is_active: Option<bool>,
}

impl CompanyPatch {
    pub fn apply(self, company: &mut Model) {
        if let Some(v) = self.name {
            company.name = v;
        }
        if let Some(v) = self.logo {
            company.logo = Some(v);
        }
        if let Some(v) = self.address {
            company.address = Some(v);
        }
        if let Some(v) = self.phone {
            company.phone = Some(v);
        }
        if let Some(v) = self.email {
            company.email = Some(v);
        }
        if let Some(v) = self.registration_number {
            company.registration_number = Some(v);
        }
        if let Some(v) = self.tax_number {
            company.tax_number = Some(v);
        }
        if let Some(v) = self.is_active {
            company.is_active = v;
        }
    }
}
