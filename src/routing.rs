//! Application router configuration.

use std::any::Any;

use axum::{
    Json, Router,
    http::{Method, StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as AnyOrigin, CorsLayer},
};

use crate::{
    AppState, endpoints,
    not_found::get_404_not_found,
    status::{get_root, get_test_db},
    voucher::{
        create_voucher_endpoint, delete_voucher_endpoint, get_categories_endpoint,
        get_names_endpoint, get_vouchers_endpoint, update_voucher_endpoint,
    },
};

/// Return a router with all the app's routes.
///
/// Any origin may call the API. A handler that panics is answered with a
/// generic 500 error instead of dropping the connection.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_root))
        .route(endpoints::VOUCHERS, post(create_voucher_endpoint))
        .route(
            endpoints::VOUCHER,
            get(get_vouchers_endpoint)
                .put(update_voucher_endpoint)
                .delete(delete_voucher_endpoint),
        )
        .route(endpoints::CATEGORIES, get(get_categories_endpoint))
        .route(endpoints::NAMES, get(get_names_endpoint))
        .route(endpoints::TEST_DB, get(get_test_db))
        .fallback(get_404_not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors_layer())
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE])
}

/// Log the panic and send the client a generic error without the panic message.
fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(message) = panic.downcast_ref::<String>() {
        message.as_str()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        message
    } else {
        "unknown panic payload"
    };
    tracing::error!("A request handler panicked: {details}");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Internal server error" })),
    )
        .into_response()
}

#[cfg(test)]
mod router_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{Value, json};

    use crate::{
        AppState, endpoints,
        test_utils::{format_endpoint, get_header, get_test_store, response_json},
    };

    use super::{build_router, handle_panic};

    fn get_test_server() -> TestServer {
        let app = build_router(AppState::new(get_test_store()));

        TestServer::try_new(app).expect("Could not create test server.")
    }

    fn january_voucher() -> Value {
        json!({
            "voucherNumber": "V1",
            "date": "2024-01-01",
            "name": "A",
            "bank": "X",
            "chequeNumber": "100",
            "amount": 50.5,
            "category": "Fees",
            "month": "January",
            "year": "2024"
        })
    }

    #[tokio::test]
    async fn root_returns_message() {
        let server = get_test_server();

        let response = server.get(endpoints::ROOT).await;

        response.assert_status_ok();
        response.assert_json(&json!({ "message": "Voucher service is running" }));
    }

    #[tokio::test]
    async fn created_voucher_is_listed_for_its_month() {
        let server = get_test_server();

        let response = server
            .post(endpoints::VOUCHERS)
            .json(&january_voucher())
            .await;
        response.assert_status_ok();
        response.assert_json(&json!({ "success": true }));

        let response = server
            .get(&format_endpoint(endpoints::VOUCHER, "January"))
            .add_query_param("year", "2024")
            .await;
        response.assert_status_ok();

        let vouchers = response.json::<Vec<Value>>();
        assert_eq!(vouchers.len(), 1);
        let mut voucher = vouchers[0].clone();
        let id = voucher
            .as_object_mut()
            .unwrap()
            .remove("id")
            .expect("voucher should have an id");
        assert!(id.as_i64().unwrap() > 0);
        assert_eq!(voucher, january_voucher());
    }

    #[tokio::test]
    async fn list_for_other_year_is_empty() {
        let server = get_test_server();
        server
            .post(endpoints::VOUCHERS)
            .json(&january_voucher())
            .await
            .assert_status_ok();

        let response = server
            .get(&format_endpoint(endpoints::VOUCHER, "January"))
            .add_query_param("year", "2025")
            .await;

        response.assert_status_ok();
        response.assert_json(&json!([]));
    }

    #[tokio::test]
    async fn list_without_year_is_empty() {
        let server = get_test_server();
        server
            .post(endpoints::VOUCHERS)
            .json(&january_voucher())
            .await
            .assert_status_ok();

        let response = server
            .get(&format_endpoint(endpoints::VOUCHER, "January"))
            .await;

        response.assert_status_ok();
        response.assert_json(&json!([]));
    }

    #[tokio::test]
    async fn update_existing_voucher_is_reflected_in_list() {
        let server = get_test_server();
        server
            .post(endpoints::VOUCHERS)
            .json(&january_voucher())
            .await
            .assert_status_ok();
        let mut updated = january_voucher();
        updated["name"] = json!("B");
        updated["amount"] = json!(75);

        let response = server
            .put(&format_endpoint(endpoints::VOUCHER, 1))
            .json(&updated)
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({ "success": true }));
        let vouchers = server
            .get(&format_endpoint(endpoints::VOUCHER, "January"))
            .add_query_param("year", "2024")
            .await
            .json::<Vec<Value>>();
        assert_eq!(vouchers.len(), 1);
        assert_eq!(vouchers[0]["id"], 1);
        assert_eq!(vouchers[0]["name"], "B");
        assert_eq!(vouchers[0]["amount"], 75.0);
    }

    #[tokio::test]
    async fn update_nonexistent_voucher_succeeds_without_effect() {
        let server = get_test_server();
        let mut payload = january_voucher();
        payload["month"] = json!("June");

        let response = server
            .put(&format_endpoint(endpoints::VOUCHER, 999999))
            .json(&payload)
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({ "success": true }));
        server
            .get(&format_endpoint(endpoints::VOUCHER, "June"))
            .add_query_param("year", "2024")
            .await
            .assert_json(&json!([]));
    }

    #[tokio::test]
    async fn delete_twice_succeeds_both_times() {
        let server = get_test_server();
        server
            .post(endpoints::VOUCHERS)
            .json(&january_voucher())
            .await
            .assert_status_ok();

        for _ in 0..2 {
            let response = server
                .delete(&format_endpoint(endpoints::VOUCHER, 1))
                .await;

            response.assert_status_ok();
            response.assert_json(&json!({ "success": true }));
        }

        server
            .get(&format_endpoint(endpoints::VOUCHER, "January"))
            .add_query_param("year", "2024")
            .await
            .assert_json(&json!([]));
    }

    #[tokio::test]
    async fn categories_and_names_are_distinct_and_sorted() {
        let server = get_test_server();
        for (name, category) in [("Zoe", "Rent"), ("Amy", ""), ("Amy", "Fees")] {
            let mut voucher = january_voucher();
            voucher["name"] = json!(name);
            voucher["category"] = json!(category);
            server
                .post(endpoints::VOUCHERS)
                .json(&voucher)
                .await
                .assert_status_ok();
        }
        server
            .post(endpoints::VOUCHERS)
            .json(&json!({ "month": "January" }))
            .await
            .assert_status_ok();

        server
            .get(endpoints::CATEGORIES)
            .await
            .assert_json(&json!(["Fees", "Rent"]));
        server
            .get(endpoints::NAMES)
            .await
            .assert_json(&json!(["Amy", "Zoe"]));
    }

    #[tokio::test]
    async fn test_db_reports_success() {
        let server = get_test_server();

        let response = server.get(endpoints::TEST_DB).await;

        response.assert_status_ok();
        response.assert_json(&json!({
            "success": true,
            "message": "Database connection successful"
        }));
    }

    #[tokio::test]
    async fn non_numeric_id_succeeds_without_effect() {
        let server = get_test_server();
        server
            .post(endpoints::VOUCHERS)
            .json(&january_voucher())
            .await
            .assert_status_ok();

        let response = server
            .put(&format_endpoint(endpoints::VOUCHER, "abc"))
            .json(&json!({ "name": "B", "month": "January", "year": "2024" }))
            .await;
        response.assert_status_ok();
        response.assert_json(&json!({ "success": true }));

        let response = server
            .delete(&format_endpoint(endpoints::VOUCHER, "abc"))
            .await;
        response.assert_status_ok();
        response.assert_json(&json!({ "success": true }));

        let vouchers = server
            .get(&format_endpoint(endpoints::VOUCHER, "January"))
            .add_query_param("year", "2024")
            .await
            .json::<Vec<Value>>();
        assert_eq!(vouchers.len(), 1);
        assert_eq!(vouchers[0]["name"], "A");
    }

    #[tokio::test]
    async fn numeric_text_fields_are_stored_as_text() {
        let server = get_test_server();

        server
            .post(endpoints::VOUCHERS)
            .json(&json!({
                "name": 123,
                "month": "January",
                "year": 2024,
                "chequeNumber": 100
            }))
            .await
            .assert_status_ok();

        let vouchers = server
            .get(&format_endpoint(endpoints::VOUCHER, "January"))
            .add_query_param("year", "2024")
            .await
            .json::<Vec<Value>>();
        assert_eq!(vouchers.len(), 1);
        assert_eq!(vouchers[0]["name"], "123");
        assert_eq!(vouchers[0]["year"], "2024");
        assert_eq!(vouchers[0]["chequeNumber"], "100");
    }

    #[tokio::test]
    async fn non_numeric_amount_is_stored_as_sent() {
        let server = get_test_server();

        server
            .post(endpoints::VOUCHERS)
            .json(&json!({ "amount": "lots", "month": "January", "year": "2024" }))
            .await
            .assert_status_ok();

        let vouchers = server
            .get(&format_endpoint(endpoints::VOUCHER, "January"))
            .add_query_param("year", "2024")
            .await
            .json::<Vec<Value>>();
        assert_eq!(vouchers.len(), 1);
        assert_eq!(vouchers[0]["amount"], "lots");
        assert!(vouchers[0]["name"].is_null());
    }

    #[tokio::test]
    async fn body_that_is_not_json_is_bad_request() {
        let server = get_test_server();

        let response = server
            .post(endpoints::VOUCHERS)
            .content_type("application/json")
            .bytes("{not json".into())
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(response.json::<Value>()["error"].is_string());
    }

    #[tokio::test]
    async fn unknown_route_is_not_found_json() {
        let server = get_test_server();

        let response = server.get("/nope").await;

        response.assert_status(StatusCode::NOT_FOUND);
        response.assert_json(&json!({ "error": "Not found" }));
    }

    #[tokio::test]
    async fn responses_allow_any_origin() {
        let server = get_test_server();

        let response = server.get(endpoints::ROOT).await;

        assert_eq!(response.header("access-control-allow-origin"), "*");
    }

    #[tokio::test]
    async fn panic_is_reported_as_generic_error() {
        let response = handle_panic(Box::new("secret details".to_owned()));

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(get_header(&response, "content-type"), "application/json");
        let body = response_json(response).await;
        assert_eq!(body, json!({ "error": "Internal server error" }));
    }
}
