mod common;

use axum::http::Method;
use serde_json::json;

use common::{response_json, TestApp};

#[tokio::test]
async fn location_crud() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/api/locations",
            Some(json!({ "name": "المعرض الرئيسي", "description": "صالة العرض" })),
        )
        .await;
    assert_eq!(response.status(), 201);
    let location = response_json(response).await;
    assert_eq!(location["id"], 1);
    assert_eq!(location["is_active"], true);

    let response = app
        .request(
            Method::PUT,
            "/api/locations/1",
            Some(json!({ "name": "المستودع" })),
        )
        .await;
    assert_eq!(response_json(response).await["name"], "المستودع");

    let response = app.request(Method::DELETE, "/api/locations/1", None).await;
    assert_eq!(response.status(), 204);
    let response = app.request(Method::GET, "/api/locations", None).await;
    assert!(response_json(response).await.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn transfer_moves_vehicle_and_appends_to_log() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/api/inventory",
            Some(json!({
                "manufacturer": "تويوتا",
                "category": "لاندكروزر",
                "engine_capacity": "4.0L",
                "year": 2024,
                "exterior_color": "أسود",
                "interior_color": "بني",
                "import_type": "شركة",
                "ownership_type": "ملكية الشركة",
                "location": "الميناء",
                "chassis_number": "LC300-001",
                "status": "في الطريق"
            })),
        )
        .await;
    let item = response_json(response).await;
    let item_id = item["id"].as_i64().unwrap();

    let response = app
        .request(
            Method::POST,
            "/api/location-transfers",
            Some(json!({
                "inventory_item_id": item_id,
                "from_location": "الميناء",
                "to_location": "المعرض الرئيسي",
                "transferred_by": "سالم"
            })),
        )
        .await;
    assert_eq!(response.status(), 201);

    // The referenced vehicle moved
    let response = app
        .request(Method::GET, &format!("/api/inventory/{item_id}"), None)
        .await;
    let moved = response_json(response).await;
    assert_eq!(moved["location"], "المعرض الرئيسي");

    // The log keeps the record and filters by item
    let response = app
        .request(
            Method::GET,
            &format!("/api/location-transfers?inventory_item_id={item_id}"),
            None,
        )
        .await;
    let log = response_json(response).await;
    let log = log.as_array().unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0]["from_location"], "الميناء");
    assert_eq!(log[0]["transferred_by"], "سالم");

    let response = app
        .request(Method::GET, "/api/location-transfers?inventory_item_id=999", None)
        .await;
    assert!(response_json(response).await.as_array().unwrap().is_empty());
}
