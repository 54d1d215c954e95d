use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Interest rate a bank offers for a given financing duration.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bank_interest_rates")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Bank id this rate belongs to; not a foreign key, matched by value
    pub bank_id: i32,
    pub duration_months: i32,
    #[sea_orm(column_type = "Decimal(Some((6, 3)))")]
    pub rate_percent: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
pub struct NewBankInterestRate {
    pub bank_id: i32,
    #[validate(range(min = 1, max = 120, message = "duration out of range"))]
    pub duration_months: i32,
    pub rate_percent: Decimal,
}

impl NewBankInterestRate {
    pub fn into_model(self, id: i32, now: DateTime<Utc>) -> Model {
        Model {
            id,
            bank_id: self.bank_id,
            duration_months: self.duration_months,
            rate_percent: self.rate_percent,
            created_at: now,
            updated_at: None,
        }
    }
}
