mod common;

use axum::http::Method;
use serde_json::json;

use common::{response_json, TestApp};

fn rajhi() -> serde_json::Value {
    json!({
        "bank_name": "مصرف الراجحي",
        "name_en": "Al Rajhi Bank",
        "account_name": "شركة المعرض للسيارات",
        "account_number": "575608010000000",
        "iban": "SA0380000000608010000000",
        "type": "شركة",
        "logo": null
    })
}

fn ahli() -> serde_json::Value {
    json!({
        "bank_name": "البنك الأهلي",
        "account_name": "حساب شخصي",
        "account_number": "123456789",
        "iban": "SA4410000001234567891234",
        "type": "شخصي"
    })
}

#[tokio::test]
async fn bank_lifecycle_and_type_partition() {
    let app = TestApp::new().await;

    let response = app.request(Method::POST, "/api/banks", Some(rajhi())).await;
    assert_eq!(response.status(), 201);
    let bank = response_json(response).await;
    assert_eq!(bank["id"], 1);
    assert_eq!(bank["is_active"], true);
    assert_eq!(bank["type"], "شركة");

    app.request(Method::POST, "/api/banks", Some(ahli())).await;

    // Type partition: each list contains exactly its own kind
    let response = app
        .request(
            Method::GET,
            "/api/banks/type/%D8%B4%D8%B1%D9%83%D8%A9",
            None,
        )
        .await;
    assert_eq!(response.status(), 200);
    let company_banks = response_json(response).await;
    let company_banks = company_banks.as_array().unwrap();
    assert_eq!(company_banks.len(), 1);
    assert_eq!(company_banks[0]["bank_name"], "مصرف الراجحي");

    let response = app
        .request(
            Method::GET,
            "/api/banks/type/%D8%B4%D8%AE%D8%B5%D9%8A",
            None,
        )
        .await;
    let personal_banks = response_json(response).await;
    assert_eq!(personal_banks.as_array().unwrap().len(), 1);

    // Unknown type value is a 400, not an empty list
    let response = app.request(Method::GET, "/api/banks/type/corporate", None).await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn update_merges_and_delete_missing_is_404() {
    let app = TestApp::new().await;
    app.request(Method::POST, "/api/banks", Some(rajhi())).await;

    let response = app
        .request(
            Method::PUT,
            "/api/banks/1",
            Some(json!({ "is_active": false })),
        )
        .await;
    assert_eq!(response.status(), 200);
    let updated = response_json(response).await;
    assert_eq!(updated["is_active"], false);
    assert_eq!(updated["bank_name"], "مصرف الراجحي");

    // Deleting a bank id that does not exist leaves the collection alone
    let response = app.request(Method::DELETE, "/api/banks/42", None).await;
    assert_eq!(response.status(), 404);
    let response = app.request(Method::GET, "/api/banks", None).await;
    assert_eq!(response_json(response).await.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn interest_rates_filter_by_bank() {
    let app = TestApp::new().await;
    app.request(Method::POST, "/api/banks", Some(rajhi())).await;
    app.request(Method::POST, "/api/banks", Some(ahli())).await;

    for (bank_id, months, rate) in [(1, 12, "2.5"), (1, 24, "2.9"), (2, 12, "3.1")] {
        let response = app
            .request(
                Method::POST,
                "/api/bank-interest-rates",
                Some(json!({
                    "bank_id": bank_id,
                    "duration_months": months,
                    "rate_percent": rate
                })),
            )
            .await;
        assert_eq!(response.status(), 201);
    }

    let response = app
        .request(Method::GET, "/api/bank-interest-rates?bank_id=1", None)
        .await;
    let rates = response_json(response).await;
    assert_eq!(rates.as_array().unwrap().len(), 2);

    let response = app
        .request(Method::GET, "/api/bank-interest-rates", None)
        .await;
    assert_eq!(response_json(response).await.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn financing_rates_crud() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/api/financing-rates",
            Some(json!({
                "bank_name": "مصرف الراجحي",
                "financing_type": "تمويل شخصي",
                "duration_months": 60,
                "rate_percent": "3.25"
            })),
        )
        .await;
    assert_eq!(response.status(), 201);
    let rate = response_json(response).await;
    assert_eq!(rate["is_active"], true);

    let response = app
        .request(
            Method::PUT,
            "/api/financing-rates/1",
            Some(json!({ "rate_percent": "2.95" })),
        )
        .await;
    assert_eq!(response.status(), 200);
    assert_eq!(response_json(response).await["rate_percent"], "2.95");

    let response = app
        .request(Method::DELETE, "/api/financing-rates/1", None)
        .await;
    assert_eq!(response.status(), 204);
    let response = app.request(Method::GET, "/api/financing-rates", None).await;
    assert!(response_json(response).await.as_array().unwrap().is_empty());
}
