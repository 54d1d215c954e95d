use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Immutable copy of the vehicle details taken when a quotation or invoice
/// is issued. A document must keep describing the vehicle as it was at
/// issue time, so this is a value object serialised into the row and never
/// back-filled from the live inventory record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct VehicleSnapshot {
    pub manufacturer: String,
    pub category: String,
    pub trim_level: Option<String>,
    pub year: i32,
    pub engine_capacity: Option<String>,
    pub exterior_color: Option<String>,
    pub interior_color: Option<String>,
    pub chassis_number: String,
    pub import_type: Option<String>,
}

/// Price quotation issued to a customer.
///
/// `company_snapshot`, `representative_snapshot`, `pricing_details` and
/// `appearance` are opaque JSON blobs owned by the document templates;
/// they are stored as given and parsed on read.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "quotations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Human-readable document number (generated `QT-<id>` when omitted)
    pub quote_number: String,

    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,

    #[sea_orm(column_type = "Json")]
    pub vehicle: VehicleSnapshot,

    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub base_price: Decimal,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub final_price: Decimal,

    pub status: String,
    pub valid_until: Option<DateTime<Utc>>,
    pub notes: Option<String>,

    #[sea_orm(column_type = "Json", nullable)]
    pub company_snapshot: Option<Json>,
    #[sea_orm(column_type = "Json", nullable)]
    pub representative_snapshot: Option<Json>,
    #[sea_orm(column_type = "Json", nullable)]
    pub pricing_details: Option<Json>,
    #[sea_orm(column_type = "Json", nullable)]
    pub appearance: Option<Json>,

    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
pub struct NewQuotation {
    /// Document number; generated from the assigned id when omitted
    pub quote_number: Option<String>,
    #[validate(length(min = 1, message = "customer name is required"))]
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub vehicle: VehicleSnapshot,
    pub base_price: Decimal,
    pub final_price: Decimal,
    #[serde(default)]
    pub status: Option<String>,
    pub valid_until: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub company_snapshot: Option<Json>,
    pub representative_snapshot: Option<Json>,
    pub pricing_details: Option<Json>,
    pub appearance: Option<Json>,
}

impl NewQuotation {
    pub fn into_model(self, id: i32, now: DateTime<Utc>) -> Model {
        Model {
            id,
            quote_number: self
                .quote_number
                .unwrap_or_else(|| format!("QT-{id:06}")),
            customer_name: self.customer_name,
            customer_phone: self.customer_phone,
            customer_email: self.customer_email,
            vehicle: self.vehicle,
            base_price: self.base_price,
            final_price: self.final_price,
            status: self.status.unwrap_or_else(|| "مسودة".to_string()),
            valid_until: self.valid_until,
            notes: self.notes,
            company_snapshot: self.company_snapshot,
            representative_snapshot: self.representative_snapshot,
            pricing_details: self.pricing_details,
            appearance: self.appearance,
            created_at: now,
            updated_at: None,
        }
    }
}

/// Shallow-merge patch. The vehicle snapshot can only be replaced whole,
/// never field-by-field.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct QuotationPatch {
    pub quote_number: Option<String>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub vehicle: Option<VehicleSnapshot>,
    pub base_price: Option<Decimal>,
    pub final_price: Option<Decimal>,
    pub status: Option<String>,
    pub valid_until: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub company_snapshot: Option<Json>,
    pub representative_snapshot: Option<Json>,
    pub pricing_details: Option<Json>,
    pub appearance: Option<Json>,
}

impl QuotationPatch {
    pub fn apply(self, quotation: &mut Model) {
        if let Some(v) = self.quote_number {
            quotation.quote_number = v;
        }
        if let Some(v) = self.customer_name {
            quotation.customer_name = v;
        }
        if let Some(v) = self.customer_phone {
            quotation.customer_phone = Some(v);
        }
        if let Some(v) = self.customer_email {
            quotation.customer_email = Some(v);
        }
        if let Some(v) = self.vehicle {
            quotation.vehicle = v;
        }
        if let Some(v) = self.base_price {
            quotation.base_price = v;
        }
        if let Some(v) = self.final_price {
            quotation.final_price = v;
        }
        if let Some(v) = self.status {
            quotation.status = v;
        }
        if let Some(v) = self.valid_until {
            quotation.valid_until = Some(v);
        }
        if let Some(v) = self.notes {
            quotation.notes = Some(v);
        }
        if let Some(v) = self.company_snapshot {
            quotation.company_snapshot = Some(v);
        }
        if let Some(v) = self.representative_snapshot {
            quotation.representative_snapshot = Some(v);
        }
        if let Some(v) = self.pricing_details {
            quotation.pricing_details = Some(v);
        }
        if let Some(v) = self.appearance {
            quotation.appearance = Some(v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    pub(crate) fn snapshot() -> VehicleSnapshot {
        VehicleSnapshot {
            manufacturer: "تويوتا".to_string(),
            category: "كامري".to_string(),
            trim_level: Some("GLE".to_string()),
            year: 2023,
            engine_capacity: Some("2.5L".to_string()),
            exterior_color: None,
            interior_color: None,
            chassis_number: "ABC123".to_string(),
            import_type: None,
        }
    }

    #[test]
    fn quote_number_generated_from_id_when_absent() {
        let new = NewQuotation {
            quote_number: None,
            customer_name: "عميل".to_string(),
            customer_phone: None,
            customer_email: None,
            vehicle: snapshot(),
            base_price: dec!(100000),
            final_price: dec!(97500),
            status: None,
            valid_until: None,
            notes: None,
            company_snapshot: None,
            representative_snapshot: None,
            pricing_details: None,
            appearance: None,
        };
        let model = new.into_model(42, Utc::now());
        assert_eq!(model.quote_number, "QT-000042");
        assert_eq!(model.status, "مسودة");
    }

    #[test]
    fn explicit_quote_number_is_kept_verbatim() {
        let new = NewQuotation {
            quote_number: Some("Q-2023-17".to_string()),
            customer_name: "عميل".to_string(),
            customer_phone: None,
            customer_email: None,
            vehicle: snapshot(),
            base_price: dec!(100000),
            final_price: dec!(100000),
            status: None,
            valid_until: None,
            notes: None,
            company_snapshot: None,
            representative_snapshot: None,
            pricing_details: None,
            appearance: None,
        };
        assert_eq!(new.into_model(1, Utc::now()).quote_number, "Q-2023-17");
    }
}
