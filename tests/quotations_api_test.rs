mod common;

use axum::http::Method;
use serde_json::json;

use common::{response_json, TestApp};

fn quotation_payload() -> serde_json::Value {
    json!({
        "customer_name": "محمد العتيبي",
        "customer_phone": "0550000000",
        "vehicle": {
            "manufacturer": "تويوتا",
            "category": "كامري",
            "trim_level": "GLE",
            "year": 2023,
            "engine_capacity": "2.5L",
            "chassis_number": "ABC123"
        },
        "base_price": "110000.00",
        "final_price": "105000.00",
        "pricing_details": { "vat": "15750.00", "plate_fees": "500.00" }
    })
}

#[tokio::test]
async fn quotation_number_generated_and_snapshot_kept() {
    let app = TestApp::new().await;

    // Seed the live inventory record the quote is based on
    let response = app
        .request(
            Method::POST,
            "/api/inventory",
            Some(json!({
                "manufacturer": "تويوتا",
                "category": "كامري",
                "trim_level": "GLE",
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
    let item_id = response_json(response).await["id"].as_i64().unwrap();

    let response = app
        .request(Method::POST, "/api/quotations", Some(quotation_payload()))
        .await;
    assert_eq!(response.status(), 201);
    let quotation = response_json(response).await;
    assert_eq!(quotation["quote_number"], "QT-000001");
    assert_eq!(quotation["status"], "مسودة");
    assert_eq!(quotation["vehicle"]["chassis_number"], "ABC123");
    assert_eq!(quotation["pricing_details"]["vat"], "15750.00");

    // Mutate the live inventory record; the issued document must not move
    let response = app
        .request(
            Method::PUT,
            &format!("/api/inventory/{item_id}"),
            Some(json!({ "exterior_color": "أسود", "trim_level": "SE" })),
        )
        .await;
    assert_eq!(response.status(), 200);

    let response = app.request(Method::GET, "/api/quotations/1", None).await;
    let unchanged = response_json(response).await;
    assert_eq!(unchanged["vehicle"]["trim_level"], "GLE");
}

#[tokio::test]
async fn explicit_quote_number_wins_over_generation() {
    let app = TestApp::new().await;
    let mut payload = quotation_payload();
    payload["quote_number"] = json!("Q-2024-007");

    let response = app.request(Method::POST, "/api/quotations", Some(payload)).await;
    let quotation = response_json(response).await;
    assert_eq!(quotation["quote_number"], "Q-2024-007");
}

#[tokio::test]
async fn quotation_update_and_delete() {
    let app = TestApp::new().await;
    app.request(Method::POST, "/api/quotations", Some(quotation_payload()))
        .await;

    let response = app
        .request(
            Method::PUT,
            "/api/quotations/1",
            Some(json!({ "status": "مقبول", "final_price": "103000.00" })),
        )
        .await;
    assert_eq!(response.status(), 200);
    let updated = response_json(response).await;
    assert_eq!(updated["status"], "مقبول");
    assert_eq!(updated["final_price"], "103000.00");
    assert_eq!(updated["customer_name"], "محمد العتيبي");

    let response = app.request(Method::DELETE, "/api/quotations/1", None).await;
    assert_eq!(response.status(), 204);
    let response = app.request(Method::GET, "/api/quotations/1", None).await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn invoice_lifecycle_with_payment_state() {
    let app = TestApp::new().await;

    let mut payload = quotation_payload();
    payload["payment_method"] = json!("تحويل بنكي");
    let response = app.request(Method::POST, "/api/invoices", Some(payload)).await;
    assert_eq!(response.status(), 201);
    let invoice = response_json(response).await;
    assert_eq!(invoice["invoice_number"], "INV-000001");
    assert_eq!(invoice["paid"], false);

    let response = app
        .request(Method::PUT, "/api/invoices/1", Some(json!({ "paid": true })))
        .await;
    assert_eq!(response_json(response).await["paid"], true);

    let response = app.request(Method::GET, "/api/invoices", None).await;
    assert_eq!(response_json(response).await.as_array().unwrap().len(), 1);
}
