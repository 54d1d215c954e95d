use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Published financing rate shown on the financing calculator page.
///
/// Carries the bank name denormalised; the banks table is the payment-
/// instruction registry and the two are deliberately not linked.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "financing_rates")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub bank_name: String,
    /// Financing product (e.g. "تمويل شخصي", "تمويل شركات")
    pub financing_type: String,
    pub duration_months: i32,
    #[sea_orm(column_type = "Decimal(Some((6, 3)))")]
    pub rate_percent: Decimal,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
pub struct NewFinancingRate {
    #[validate(length(min = 1, message = "bank name is required"))]
    pub bank_name: String,
    #[validate(length(min = 1, message = "financing type is required"))]
    pub financing_type: String,
    #[validate(range(min = 1, max = 120, message = "duration out of range"))]
    pub duration_months: i32,
    pub rate_percent: Decimal,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl NewFinancingRate {
    pub fn into_model(self, id: i32, now: DateTime<Utc>) -> Model {
        Model {
            id,
            bank_name: self.bank_name,
            financing_type: self.financing_type,
            duration_months: self.duration_months,
            rate_percent: self.rate_percent,
            is_active: self.is_active.unwrap_or(true),
            created_at: now,
            updated_at: None,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct FinancingRatePatch {
    pub bank_name: Option<String>,
    pub financing_type: Option<String>,
    pub duration_months: Option<i32>,
    pub rate_percent: Option<Decimal>,
    pub is_active: Option<bool>,
}

impl FinancingRatePatch {
    pub fn apply(self, rate: &mut Model) {
        if let Some(v) = self.bank_name {
            rate.bank_name = v;
        }
        if let Some(v) = self.financing_type {
            rate.financing_type = v;
        }
        if let Some(v) = self.duration_months {
            rate.duration_months = v;
        }
        if let Some(v) = self.rate_percent {
            rate.rate_percent = v;
        }
        if let Some(v) = self.is_active {
            rate.is_active = v;
        }
    }
}
