//! One-shot repair pass over the manufacturer/category catalog hierarchy.
//!
//! Inventory items reference the catalog by name only, so manual edits and
//! imports leave items whose manufacturer or category is missing from the
//! catalog. This walks every inventory item, creates missing manufacturer
//! rows, registers missing categories, and reports per-row failures
//! without aborting the pass. Exits 0 when every row was clean or
//! repaired, 1 when any row failed.

use clap::Parser;
use tracing::{error, info};

use showroom_api::entities::inventory_item;
use showroom_api::entities::manufacturer::{ManufacturerPatch, NewManufacturer};
use showroom_api::errors::ServiceError;
use showroom_api::storage::Storage;

#[derive(Parser)]
#[command(
    name = "fix-hierarchy",
    version,
    about = "Repair the manufacturer/category catalog against current inventory"
)]
struct Cli {}

#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    CreatedManufacturer,
    RegisteredCategory,
    AlreadyConsistent,
}

#[tokio::main]
async fn main() {
    Cli::parse();

    let code = match run().await {
        Ok(failed_rows) if failed_rows == 0 => 0,
        Ok(failed_rows) => {
            error!(failed_rows, "hierarchy repair finished with failures");
            1
        }
        Err(err) => {
            error!("hierarchy repair aborted: {}", err);
            1
        }
    };
    std::process::exit(code);
}

async fn run() -> anyhow::Result<u64> {
    let cfg = showroom_api::config::load_config()?;
    showroom_api::config::init_tracing(cfg.log_level(), cfg.log_json);

    let storage = showroom_api::storage::build_storage(&cfg).await?;
    let items = storage.inventory_items().await?;
    info!(total = items.len(), "starting hierarchy repair");

    let mut created_manufacturers: u64 = 0;
    let mut registered_categories: u64 = 0;
    let mut consistent: u64 = 0;
    let mut failed: u64 = 0;

    for item in &items {
        match repair_item(storage.as_ref(), item).await {
            Ok(Outcome::CreatedManufacturer) => {
                info!(
                    item_id = item.id,
                    manufacturer = %item.manufacturer,
                    category = %item.category,
                    "created missing manufacturer"
                );
                created_manufacturers += 1;
            }
            Ok(Outcome::RegisteredCategory) => {
                info!(
                    item_id = item.id,
                    manufacturer = %item.manufacturer,
                    category = %item.category,
                    "registered missing category"
                );
                registered_categories += 1;
            }
            Ok(Outcome::AlreadyConsistent) => consistent += 1,
            Err(err) => {
                error!(item_id = item.id, "row repair failed: {}", err);
                failed += 1;
            }
        }
    }

    info!(
        created_manufacturers,
        registered_categories, consistent, failed, "hierarchy repair summary"
    );
    Ok(failed)
}

/// Ensure the item's manufacturer exists and carries the item's category.
async fn repair_item(
    storage: &dyn Storage,
    item: &inventory_item::Model,
) -> Result<Outcome, ServiceError> {
    match storage.manufacturer_by_name(&item.manufacturer).await? {
        None => {
            storage
                .create_manufacturer(NewManufacturer {
                    name: item.manufacturer.clone(),
                    name_en: None,
                    logo: None,
                    categories: Some(vec![item.category.clone()]),
                    is_active: None,
                })
                .await?;
            Ok(Outcome::CreatedManufacturer)
        }
        Some(existing) if !existing.categories.contains(&item.category) => {
            let mut categories = existing.categories.0.clone();
            categories.push(item.category.clone());
            storage
                .update_manufacturer(
                    existing.id,
                    ManufacturerPatch {
                        categories: Some(categories),
                        ..Default::default()
                    },
                )
                .await?
                .ok_or_else(|| {
                    ServiceError::NotFound(format!("manufacturer {} vanished", existing.id))
                })?;
            Ok(Outcome::RegisteredCategory)
        }
        Some(_) => Ok(Outcome::AlreadyConsistent),
    }
}
