//! Showroom API Library
//!
//! Back-office service for vehicle dealerships: inventory, quotations and
//! invoices, banks and financing rates, manufacturer catalogs, locations
//! and user administration behind a uniform CRUD storage façade.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod auth;
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod events;
pub mod handlers;
pub mod health;
pub mod metrics;
pub mod migrator;
pub mod openapi;
pub mod storage;

use std::sync::Arc;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

/// Shared application state: the configuration, the configured storage
/// backend behind the façade trait, and both ends of the event pipeline.
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn storage::Storage>,
    pub config: config::AppConfig,
    pub event_sender: events::EventSender,
    pub events: events::EventBroadcast,
}

/// The `/api` surface: REST resources matching the storage façade 1:1,
/// plus login and the SSE change feed.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/inventory", handlers::inventory::inventory_routes())
        .nest("/locations", handlers::locations::location_routes())
        .nest(
            "/location-transfers",
            handlers::locations::location_transfer_routes(),
        )
        .nest("/banks", handlers::banks::bank_routes())
        .nest(
            "/bank-interest-rates",
            handlers::banks::bank_interest_rate_routes(),
        )
        .nest("/companies", handlers::companies::company_routes())
        .nest("/quotations", handlers::quotations::quotation_routes())
        .nest("/invoices", handlers::invoices::invoice_routes())
        .nest(
            "/manufacturers",
            handlers::manufacturers::manufacturer_routes(),
        )
        .nest("/users", handlers::users::user_routes())
        .nest(
            "/financing-rates",
            handlers::financing_rates::financing_rate_routes(),
        )
        .nest("/auth", handlers::auth::auth_routes())
        .nest("/events", handlers::events::event_routes())
}

/// Status, health and metrics endpoints mounted next to `/api`.
pub fn service_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { "showroom-api up" }))
        .route("/status", get(api_status))
        .route("/health", get(health::health))
        .route("/health/live", get(health::live))
        .route("/health/ready", get(health::ready))
        .route(
            "/metrics",
            get(|| async {
                match metrics::render() {
                    Ok(body) => (axum::http::StatusCode::OK, body),
                    Err(_) => (
                        axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                        String::from("metrics error"),
                    ),
                }
            }),
        )
}

async fn api_status() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "showroom-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
