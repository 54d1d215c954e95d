use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::quotation::VehicleSnapshot;

/// Sales invoice. Same document shape as a quotation plus payment state;
/// vehicle details are an issue-time snapshot, not a live reference.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "invoices")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Human-readable document number (generated `INV-<id>` when omitted)
    pub invoice_number: String,

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
    pub paid: bool,
    pub payment_method: Option<String>,
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
pub struct NewInvoice {
    pub invoice_number: Option<String>,
    #[validate(length(min = 1, message = "customer name is required"))]
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub vehicle: VehicleSnapshot,
    pub base_price: Decimal,
    pub final_price: Decimal,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub paid: Option<bool>,
    pub payment_method: Option<String>,
    pub notes: Option<String>,
    pub company_snapshot: Option<Json>,
    pub representative_snapshot: Option<Json>,
    pub pricing_details: Option<Json>,
    pub appearance: Option<Json>,
}

impl NewInvoice {
    pub fn into_model(self, id: i32, now: DateTime<Utc>) -> Model {
        Model {
            id,
            invoice_number: self
                .invoice_number
                .unwrap_or_else(|| format!("INV-{id:06}")),
            customer_name: self.customer_name,
            customer_phone: self.customer_phone,
            customer_email: self.customer_email,
            vehicle: self.vehicle,
            base_price: self.base_price,
            final_price: self.final_price,
            status: self.status.unwrap_or_else(|| "مسودة".to_string()),
            paid: self.paid.unwrap_or(false),
            payment_method: self.payment_method,
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

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct InvoicePatch {
    pub invoice_number: Option<String>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub vehicle: Option<VehicleSnapshot>,
    pub base_price: Option<Decimal>,
    pub final_price: Option<Decimal>,
    pub status: Option<String>,
    pub paid: Option<bool>,
    pub payment_method: Option<String>,
    pub notes: Option<String>,
    pub company_snapshot: Option<Json>,
    pub representative_snapshot: Option<Json>,
    pub pricing_details: Option<Json>,
    pub appearance: Option<Json>,
}

impl InvoicePatch {
    pub fn apply(self, invoice: &mut Model) {
        if let Some(v) = self.invoice_number {
            invoice.invoice_number = v;
        }
        if let Some(v) = self.customer_name {
            invoice.customer_name = v;
        }
        if let Some(v) = self.customer_phone {
            invoice.customer_phone = Some(v);
        }
        if let Some(v) = self.customer_email {
            invoice.customer_email = Some(v);
        }
        if let Some(v) = self.vehicle {
            invoice.vehicle = v;
        }
        if let Some(v) = self.base_price {
            invoice.base_price = v;
        }
        if let Some(v) = self.final_price {
            invoice.final_price = v;
        }
        if let Some(v) = self.status {
            invoice.status = v;
        }
        if let Some(v) = self.paid {
            invoice.paid = v;
        }
        if let Some(v) = self.payment_method {
            invoice.payment_method = Some(v);
        }
        if let Some(v) = self.notes {
            invoice.notes = Some(v);
        }
        if let Some(v) = self.company_snapshot {
            invoice.company_snapshot = Some(v);
        }
        if let Some(v) = self.representative_snapshot {
            invoice.representative_snapshot = Some(v);
        }
        if let Some(v) = self.pricing_details {
            invoice.pricing_details = Some(v);
        }
        if let Some(v) = self.appearance {
            invoice.appearance = Some(v);
        }
    }
}
