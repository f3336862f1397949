mod common;

use chrono::{Duration, Utc};
use http::StatusCode;
use serde_json::{Value, json};

use common::TestApp;

fn assert_no_private_fields(body: &Value) {
    let order = body["order"].as_object().expect("order object");
    assert!(!order.contains_key("email"));
    assert!(!order.contains_key("admin_notes"));
    let raw = body.to_string();
    assert!(!raw.contains("VIP customer"));
    assert!(!raw.contains("@example.com"));
}

#[tokio::test]
async fn unknown_order_number_is_a_uniform_not_found() {
    let app = TestApp::new();
    for query in ["LCI-20200101-9999", "LCI-20991231-0000", "nobody@example.com"] {
        let (status, body) = app.track(query).await;
        assert_eq!(status, StatusCode::OK, "query {query}");
        assert_eq!(body, json!({ "order": null, "tracking": [] }));
    }
}

#[tokio::test]
async fn malformed_queries_are_rejected_before_storage() {
    let app = TestApp::new();
    for query in [
        "not-an-email-or-ordernum",
        "LCI-2025010-1234",
        "LCI-20250101-12345",
        "lci-20250101-1234",
        "LCI-20250101-1234 OR 1=1",
        "%@%",
        "buyer@example",
        "' OR ''='",
    ] {
        let (status, body) = app.track(query).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "query {query}");
        assert_eq!(
            body["error"],
            "Invalid format. Please enter a valid email or order number (e.g., LCI-20250101-1234)"
        );
    }
    assert_eq!(app.store.call_count(), 0);
}

#[tokio::test]
async fn missing_or_blank_query_is_rejected() {
    let app = TestApp::new();
    let (status, body) = app.post_json("/api/track-order", json!({}), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Search query is required");

    let (status, _) = app.track("    ").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(app.store.call_count(), 0);
}

#[tokio::test]
async fn lookup_never_exposes_email_or_admin_notes() {
    let app = TestApp::new();
    let inquiry = app
        .seed_inquiry("meera@example.com", "LCI-20250101-1234", Utc::now())
        .await;

    let (status, by_number) = app.track("LCI-20250101-1234").await;
    assert_eq!(status, StatusCode::OK);
    assert_no_private_fields(&by_number);
    assert_eq!(by_number["order"]["id"], inquiry.id.to_string());
    assert_eq!(by_number["order"]["order_number"], "LCI-20250101-1234");
    assert_eq!(by_number["order"]["name"], "Meera Patil");
    assert_eq!(by_number["order"]["product_interest"], "Leather wallets");
    assert_eq!(by_number["order"]["order_status"], "pending");
    assert_eq!(by_number["tracking"], json!([]));

    // Keyed by email, the email still is not echoed back
    let (status, by_email) = app.track("  meera@example.com ").await;
    assert_eq!(status, StatusCode::OK);
    assert_no_private_fields(&by_email);
    assert_eq!(by_email["order"]["order_number"], "LCI-20250101-1234");
}

#[tokio::test]
async fn email_lookup_returns_most_recent_inquiry() {
    let app = TestApp::new();
    let now = Utc::now();
    app.seed_inquiry("repeat@example.com", "LCI-20250101-0001", now - Duration::days(30))
        .await;
    app.seed_inquiry("repeat@example.com", "LCI-20250301-0002", now)
        .await;
    app.seed_inquiry("repeat@example.com", "LCI-20250201-0003", now - Duration::days(3))
        .await;

    let (status, body) = app.track("repeat@example.com").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["order"]["order_number"], "LCI-20250301-0002");

    // Email match is exact
    let (_, body) = app.track("Repeat@example.com").await;
    assert_eq!(body["order"], Value::Null);
}

#[tokio::test]
async fn overlong_query_is_truncated_before_classification() {
    let app = TestApp::new();
    // 100 chars of a valid email shape followed by junk past the cap
    let local = "a".repeat(88);
    let email = format!("{local}@example.com");
    assert_eq!(email.len(), 100);
    let (status, body) = app.track(&format!("{email} trailing junk past the cap")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["order"], Value::Null);
}

#[tokio::test]
async fn storage_failure_is_generic_500() {
    let app = TestApp::new();
    app.store.set_unavailable(true);

    let (status, body) = app.track("LCI-20250101-1234").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Failed to search for order" }));
}

#[tokio::test]
async fn repeated_reads_return_the_same_ordering() {
    let app = TestApp::new();
    app.seed_inquiry("meera@example.com", "LCI-20250101-1234", Utc::now())
        .await;
    let token = app.admin_token();

    for status in ["confirmed", "processing", "shipped"] {
        let (code, _) = app
            .post_json(
                "/api/admin/order-update",
                json!({
                    "email": "meera@example.com",
                    "name": "Meera Patil",
                    "orderNumber": "LCI-20250101-1234",
                    "status": status,
                }),
                Some(&token),
            )
            .await;
        assert_eq!(code, StatusCode::OK);
    }

    let (_, first) = app.track("LCI-20250101-1234").await;
    let (_, second) = app.track("LCI-20250101-1234").await;
    assert_eq!(first["tracking"], second["tracking"]);

    let tracking = first["tracking"].as_array().unwrap();
    let statuses: Vec<&str> = tracking
        .iter()
        .map(|e| e["status"].as_str().unwrap())
        .collect();
    assert_eq!(statuses, ["confirmed", "processing", "shipped"]);

    let times: Vec<chrono::DateTime<Utc>> = tracking
        .iter()
        .map(|e| e["created_at"].as_str().unwrap().parse().unwrap())
        .collect();
    assert!(times.windows(2).all(|w| w[0] <= w[1]));
    // Public entries carry no actor
    assert!(tracking.iter().all(|e| e.get("created_by").is_none()));
}

#[tokio::test]
async fn cors_preflight_is_permissive() {
    let app = TestApp::new();
    for uri in ["/api/track-order", "/api/admin/order-update"] {
        let request = http::Request::builder()
            .method("OPTIONS")
            .uri(uri)
            .header("origin", "https://lecrafto.example")
            .header("access-control-request-method", "POST")
            .header("access-control-request-headers", "authorization, content-type")
            .body(axum::body::Body::empty())
            .unwrap();
        let response = tower::ServiceExt::oneshot(app.router.clone(), request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK, "preflight {uri}");
        assert!(
            response
                .headers()
                .contains_key("access-control-allow-origin")
        );
    }
}
