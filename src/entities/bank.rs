use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Bank account classification. Wire values are the Arabic business terms.
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
pub enum BankType {
    #[sea_orm(string_value = "شخصي")]
    #[serde(rename = "شخصي")]
    #[strum(serialize = "شخصي")]
    Personal,

    #[sea_orm(string_value = "شركة")]
    #[serde(rename = "شركة")]
    #[strum(serialize = "شركة")]
    Company,
}

/// Bank account used on quotations and invoices for payment instructions.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "banks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub bank_name: String,
    pub name_en: Option<String>,
    pub account_name: String,
    pub account_number: String,
    pub iban: String,
    #[serde(rename = "type")]
    pub bank_type: BankType,
    pub logo: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
pub struct NewBank {
    #[validate(length(min = 1, message = "bank name is required"))]
    pub bank_name: String,
    pub name_en: Option<String>,
    #[validate(length(min = 1, message = "account name is required"))]
    pub account_name: String,
    #[validate(length(min = 1, message = "account number is required"))]
    pub account_number: String,
    #[validate(length(min = 1, message = "iban is required"))]
    pub iban: String,
    #[serde(rename = "type")]
    pub bank_type: BankType,
    pub logo: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl NewBank {
    pub fn into_model(self, id: i32, now: DateTime<Utc>) -> Model {
        Model {
            id,
            bank_name: self.bank_name,
            name_en: self.name_en,
            account_name: self.account_name,
            account_number: self.account_number,
            iban: self.iban,
            bank_type: self.bank_type,
            logo: self.logo,
            is_active: self.is_active.unwrap_or(true),
            created_at: now,
            updated_at: None,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct BankPatch {
    pub bank_name: Option<String>,
    pub name_en: Option<String>,
    pub account_name: Option<String>,
    pub account_number: Option<String>,
    pub iban: Option<String>,
    #[serde(rename = "type")]
    pub bank_type: Option<BankType>,
    pub logo: Option<String>,
    pub is_active: Option<bool>,
}

impl BankPatch {
    pub fn apply(self, bank: &mut Model) {
        if let Some(v) = self.bank_name {
            bank.bank_name = v;
        }
        if let Some(v) = self.name_en {
            bank.name_en = Some(v);
        }
        if let Some(v) = self.account_name {
            bank.account_name = v;
        }
        if let Some(v) = self.account_number {
            bank.account_number = v;
        }
        if let Some(v) = self.iban {
            bank.iban = v;
        }
        if let Some(v) = self.bank_type {
            bank.bank_type = v;
        }
        if let Some(v) = self.logo {
            bank.logo = Some(v);
        }
        if let Some(v) = self.is_active {
            bank.is_active = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bank_type_round_trips_arabic_values() {
        let json = serde_json::to_string(&BankType::Company).unwrap();
        assert_eq!(json, "\"شركة\"");
        let back: BankType = serde_json::from_str("\"شخصي\"").unwrap();
        assert_eq!(back, BankType::Personal);
    }
}
