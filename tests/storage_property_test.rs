//! Property tests for the storage façade invariants: id assignment,
//! create/get round-trips, shallow-merge updates, delete accounting, and
//! filter purity.

use proptest::prelude::*;

use showroom_api::entities::inventory_item::{InventoryItemPatch, NewInventoryItem};
use showroom_api::entities::VehicleStatus;
use showroom_api::storage::{InventoryFilter, MemStorage, Storage};

const MANUFACTURERS: [&str; 3] = ["تويوتا", "نيسان", "هيونداي"];
const LOCATIONS: [&str; 3] = ["المعرض", "الميناء", "المستودع"];

fn status_strategy() -> impl Strategy<Value = VehicleStatus> {
    prop_oneof![
        Just(VehicleStatus::Available),
        Just(VehicleStatus::InTransit),
        Just(VehicleStatus::InMaintenance),
        Just(VehicleStatus::Reserved),
        Just(VehicleStatus::Sold),
    ]
}

fn item_strategy() -> impl Strategy<Value = NewInventoryItem> {
    (
        0usize..MANUFACTURERS.len(),
        0usize..LOCATIONS.len(),
        "[A-Z0-9]{8}",
        status_strategy(),
        1990i32..2030,
    )
        .prop_map(|(m, l, chassis, status, year)| NewInventoryItem {
            manufacturer: MANUFACTURERS[m].to_string(),
            category: "كامري".to_string(),
            trim_level: None,
            engine_capacity: "2.5L".to_string(),
            year,
            exterior_color: "أبيض".to_string(),
            interior_color: "بيج".to_string(),
            import_type: "شركة".to_string(),
            ownership_type: "ملكية الشركة".to_string(),
            location: LOCATIONS[l].to_string(),
            chassis_number: chassis,
            price: None,
            status: Some(status),
            is_sold: Some(status == VehicleStatus::Sold),
            images: None,
            notes: None,
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn collection_size_is_creates_minus_deletes(
        items in prop::collection::vec(item_strategy(), 1..16),
        delete_ids in prop::collection::vec(1i32..24, 0..16),
    ) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let storage = MemStorage::new();
            for item in items.clone() {
                storage.create_inventory_item(item).await.unwrap();
            }

            let mut removed = 0usize;
            for id in delete_ids {
                // deleting the same id twice must only count once
                if storage.delete_inventory_item(id).await.unwrap() {
                    removed += 1;
                }
            }

            let all = storage.inventory_items().await.unwrap();
            prop_assert_eq!(all.len(), items.len() - removed);
            Ok(())
        })?;
    }

    #[test]
    fn create_then_get_returns_input_plus_defaults(item in item_strategy()) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let storage = MemStorage::new();
            let created = storage.create_inventory_item(item.clone()).await.unwrap();
            let fetched = storage.inventory_item(created.id).await.unwrap().unwrap();

            prop_assert_eq!(&fetched, &created);
            prop_assert_eq!(fetched.manufacturer, item.manufacturer);
            prop_assert_eq!(fetched.chassis_number, item.chassis_number);
            prop_assert!(fetched.images.0.is_empty());
            prop_assert!(fetched.updated_at.is_none());
            Ok(())
        })?;
    }

    #[test]
    fn update_changes_only_patched_keys(
        item in item_strategy(),
        new_year in 1990i32..2030,
    ) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let storage = MemStorage::new();
            let created = storage.create_inventory_item(item).await.unwrap();

            let updated = storage
                .update_inventory_item(
                    created.id,
                    InventoryItemPatch { year: Some(new_year), ..Default::default() },
                )
                .await
                .unwrap()
                .unwrap();

            prop_assert_eq!(updated.year, new_year);
            prop_assert_eq!(updated.manufacturer, created.manufacturer);
            prop_assert_eq!(updated.chassis_number, created.chassis_number);
            prop_assert_eq!(updated.status, created.status);
            prop_assert_eq!(updated.location, created.location);
            prop_assert!(updated.updated_at.is_some());
            Ok(())
        })?;
    }

    #[test]
    fn filters_are_pure_and_consistent_with_the_snapshot(
        items in prop::collection::vec(item_strategy(), 0..16),
        manufacturer_idx in 0usize..MANUFACTURERS.len(),
        status in status_strategy(),
    ) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let storage = MemStorage::new();
            for item in items {
                storage.create_inventory_item(item).await.unwrap();
            }

            let filter = InventoryFilter {
                manufacturer: Some(MANUFACTURERS[manufacturer_idx].to_string()),
                status: Some(status),
                ..Default::default()
            };

            let first = storage.filter_inventory_items(&filter).await.unwrap();
            let second = storage.filter_inventory_items(&filter).await.unwrap();
            // same inputs, same output set, no side effects
            prop_assert_eq!(&first, &second);

            let all = storage.inventory_items().await.unwrap();
            let expected: Vec<_> =
                all.into_iter().filter(|item| filter.matches(item)).collect();
            prop_assert_eq!(first, expected);
            Ok(())
        })?;
    }
}
