mod common;

use axum::http::Method;
use serde_json::json;

use common::{response_json, TestApp};

fn camry(chassis: &str, status: &str) -> serde_json::Value {
    json!({
        "manufacturer": "تويوتا",
        "category": "كامري",
        "engine_capacity": "2.5L",
        "year": 2023,
        "exterior_color": "أبيض",
        "interior_color": "بيج",
        "import_type": "شركة",
        "ownership_type": "ملكية الشركة",
        "location": "المعرض",
        "chassis_number": chassis,
        "status": status
    })
}

#[tokio::test]
async fn inventory_item_lifecycle() {
    let app = TestApp::new().await;

    // Create: first id is 1, declared defaults applied
    let response = app
        .request(Method::POST, "/api/inventory", Some(camry("ABC123", "متوفر")))
        .await;
    assert_eq!(response.status(), 201);
    let item = response_json(response).await;
    assert_eq!(item["id"], 1);
    assert_eq!(item["is_sold"], false);
    assert_eq!(item["images"], json!([]));
    assert_eq!(item["status"], "متوفر");

    // Read back
    let response = app.request(Method::GET, "/api/inventory/1", None).await;
    assert_eq!(response.status(), 200);
    let fetched = response_json(response).await;
    assert_eq!(fetched["chassis_number"], "ABC123");

    // Update: shallow merge changes only the patched keys
    let response = app
        .request(
            Method::PUT,
            "/api/inventory/1",
            Some(json!({ "price": "115000.00", "notes": "عرض خاص" })),
        )
        .await;
    assert_eq!(response.status(), 200);
    let updated = response_json(response).await;
    assert_eq!(updated["price"], "115000.00");
    assert_eq!(updated["notes"], "عرض خاص");
    assert_eq!(updated["manufacturer"], "تويوتا");

    // Delete, then the id is gone
    let response = app.request(Method::DELETE, "/api/inventory/1", None).await;
    assert_eq!(response.status(), 204);
    let response = app.request(Method::GET, "/api/inventory/1", None).await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn missing_ids_map_to_404() {
    let app = TestApp::new().await;

    let response = app.request(Method::GET, "/api/inventory/99", None).await;
    assert_eq!(response.status(), 404);
    let body = response_json(response).await;
    assert_eq!(body["error"], "Not Found");

    let response = app
        .request(Method::PUT, "/api/inventory/99", Some(json!({ "year": 2024 })))
        .await;
    assert_eq!(response.status(), 404);

    let response = app.request(Method::DELETE, "/api/inventory/99", None).await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn create_rejects_missing_required_fields() {
    let app = TestApp::new().await;
    let response = app
        .request(
            Method::POST,
            "/api/inventory",
            Some(json!({
                "manufacturer": "",
                "category": "كامري",
                "engine_capacity": "2.5L",
                "year": 2023,
                "exterior_color": "أبيض",
                "interior_color": "بيج",
                "import_type": "شركة",
                "ownership_type": "ملكية الشركة",
                "location": "المعرض",
                "chassis_number": "ABC123"
            })),
        )
        .await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn filter_returns_exactly_the_matching_items() {
    let app = TestApp::new().await;
    app.request(Method::POST, "/api/inventory", Some(camry("AV-1", "متوفر")))
        .await;
    app.request(Method::POST, "/api/inventory", Some(camry("TR-1", "في الطريق")))
        .await;

    let response = app
        .request(
            Method::GET,
            "/api/inventory?manufacturer=%D8%AA%D9%88%D9%8A%D9%88%D8%AA%D8%A7&status=%D9%85%D8%AA%D9%88%D9%81%D8%B1",
            None,
        )
        .await;
    assert_eq!(response.status(), 200);
    let items = response_json(response).await;
    let items = items.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["chassis_number"], "AV-1");
}

#[tokio::test]
async fn search_matches_chassis_substring() {
    let app = TestApp::new().await;
    app.request(Method::POST, "/api/inventory", Some(camry("JTDBE32K0", "متوفر")))
        .await;
    app.request(Method::POST, "/api/inventory", Some(camry("WDD210361", "متوفر")))
        .await;

    let response = app
        .request(Method::GET, "/api/inventory/search?q=jtdbe", None)
        .await;
    assert_eq!(response.status(), 200);
    let items = response_json(response).await;
    assert_eq!(items.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn marking_sold_updates_stats_and_sold_list() {
    let app = TestApp::new().await;
    app.request(Method::POST, "/api/inventory", Some(camry("ABC123", "متوفر")))
        .await;

    let response = app.request(Method::GET, "/api/inventory/stats", None).await;
    let before = response_json(response).await;
    assert_eq!(before["total"], 1);
    assert_eq!(before["sold"], 0);

    let response = app
        .request(
            Method::PUT,
            "/api/inventory/1",
            Some(json!({ "status": "مباع", "is_sold": true })),
        )
        .await;
    assert_eq!(response.status(), 200);

    let response = app.request(Method::GET, "/api/inventory/sold", None).await;
    let sold = response_json(response).await;
    assert_eq!(sold.as_array().unwrap().len(), 1);

    let response = app.request(Method::GET, "/api/inventory/stats", None).await;
    let after = response_json(response).await;
    assert_eq!(after["sold"], 1);
    assert_eq!(after["available"], 0);
}

#[tokio::test]
async fn grouped_stats_cover_manufacturers_and_locations() {
    let app = TestApp::new().await;
    app.request(Method::POST, "/api/inventory", Some(camry("A-1", "متوفر")))
        .await;
    let mut patrol = camry("B-1", "متوفر");
    patrol["manufacturer"] = json!("نيسان");
    patrol["category"] = json!("باترول");
    patrol["location"] = json!("الميناء");
    app.request(Method::POST, "/api/inventory", Some(patrol))
        .await;

    let response = app
        .request(Method::GET, "/api/inventory/manufacturer-stats", None)
        .await;
    let by_manufacturer = response_json(response).await;
    assert_eq!(by_manufacturer.as_array().unwrap().len(), 2);

    let response = app
        .request(Method::GET, "/api/inventory/location-stats", None)
        .await;
    let by_location = response_json(response).await;
    let locations: Vec<&str> = by_location
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["location"].as_str().unwrap())
        .collect();
    assert!(locations.contains(&"المعرض"));
    assert!(locations.contains(&"الميناء"));
}
