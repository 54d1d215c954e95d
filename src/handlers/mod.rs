//! HTTP handlers: one module per REST resource, each exporting a
//! `*_routes()` router. Handlers stay thin — validate, call the storage
//! façade, emit a change event, translate misses into 404s.

pub mod auth;
pub mod banks;
pub mod common;
pub mod companies;
pub mod events;
pub mod financing_rates;
pub mod inventory;
pub mod invoices;
pub mod locations;
pub mod manufacturers;
pub mod quotations;
pub mod users;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;
