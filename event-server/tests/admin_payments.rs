//! 端到端：管理面板登录、付款审核、权限边界、仪表盘

mod common;

use http::StatusCode;
use serde_json::json;

const SUPER_ADMIN: (&str, &str) = ("admin@beventx.com", "Admin123!");
const SUPPORT: (&str, &str) = ("support@beventx.com", "Support123!");

async fn submit_payment(server: &common::TestServer, email: &str, amount: i64) -> String {
    let (status, payment) = server
        .request(
            "POST",
            "/api/payments",
            None,
            Some(json!({
                "user_email": email,
                "amount": amount,
                "payment_method": "bank_transfer",
                "transaction_id": format!("TX-{amount}"),
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "payment submit failed: {payment}");
    assert_eq!(payment["status"], "pending");
    payment["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn login_rejects_bad_credentials_with_unified_message() {
    let server = common::spawn().await;

    let (status, body) = server
        .request(
            "POST",
            "/api/admin/login",
            None,
            Some(json!({ "email": "admin@beventx.com", "password": "wrong" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid email or password");

    // Unknown account gets the exact same message
    let (status, body) = server
        .request(
            "POST",
            "/api/admin/login",
            None,
            Some(json!({ "email": "ghost@beventx.com", "password": "wrong" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid email or password");
}

#[tokio::test]
async fn admin_routes_require_a_token() {
    let server = common::spawn().await;

    let (status, _) = server
        .request("GET", "/api/admin/payments", None, None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = server
        .request("GET", "/api/admin/me", Some("not-a-jwt"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn payment_review_happy_path_and_conflicts() {
    let server = common::spawn().await;
    let token = server.admin_token(SUPER_ADMIN.0, SUPER_ADMIN.1).await;

    let first = submit_payment(&server, "dana@example.com", 199).await;
    let second = submit_payment(&server, "noa@example.com", 399).await;

    let (status, payments) = server
        .request("GET", "/api/admin/payments", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(payments.as_array().unwrap().len(), 2);

    // Approve the first
    let (status, approved) = server
        .request(
            "POST",
            &format!("/api/admin/payments/{first}/approve"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(approved["status"], "approved");

    // Re-review is a conflict
    let (status, _) = server
        .request(
            "POST",
            &format!("/api/admin/payments/{first}/approve"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Reject needs a reason
    let (status, _) = server
        .request(
            "POST",
            &format!("/api/admin/payments/{second}/reject"),
            Some(&token),
            Some(json!({ "reason": "  " })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, rejected) = server
        .request(
            "POST",
            &format!("/api/admin/payments/{second}/reject"),
            Some(&token),
            Some(json!({ "reason": "Transfer reference not found" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rejected["status"], "rejected");
    assert_eq!(
        rejected["refund_data"]["refund_reason"],
        "Transfer reference not found"
    );
}

#[tokio::test]
async fn support_role_can_view_but_not_review() {
    let server = common::spawn().await;
    let token = server.admin_token(SUPPORT.0, SUPPORT.1).await;

    let payment = submit_payment(&server, "dana@example.com", 199).await;

    let (status, _) = server
        .request("GET", "/api/admin/payments", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = server
        .request(
            "POST",
            &format!("/api/admin/payments/{payment}/approve"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Audit logs need manage_settings, which support lacks
    let (status, _) = server
        .request("GET", "/api/admin/logs", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn dashboard_counts_revenue_from_approved_payments_only() {
    let server = common::spawn().await;
    let token = server.admin_token(SUPER_ADMIN.0, SUPER_ADMIN.1).await;

    let first = submit_payment(&server, "dana@example.com", 199).await;
    submit_payment(&server, "noa@example.com", 699).await;

    server
        .request(
            "POST",
            &format!("/api/admin/payments/{first}/approve"),
            Some(&token),
            None,
        )
        .await;

    let (status, stats) = server
        .request("GET", "/api/admin/statistics", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["total_revenue"], "199");
    assert_eq!(stats["pending_payments"], 1);
    // Static identity double registers two hosts
    assert_eq!(stats["total_users"], 2);
}

#[tokio::test]
async fn payment_submission_validates_input() {
    let server = common::spawn().await;

    let (status, _) = server
        .request(
            "POST",
            "/api/payments",
            None,
            Some(json!({
                "user_email": "not-an-email",
                "amount": 199,
                "payment_method": "bank_transfer",
                "transaction_id": "TX-1",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = server
        .request(
            "POST",
            "/api/payments",
            None,
            Some(json!({
                "user_email": "dana@example.com",
                "amount": 0,
                "payment_method": "bank_transfer",
                "transaction_id": "TX-1",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn me_returns_the_logged_in_admin() {
    let server = common::spawn().await;
    let token = server.admin_token(SUPER_ADMIN.0, SUPER_ADMIN.1).await;

    let (status, me) = server
        .request("GET", "/api/admin/me", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["email"], "admin@beventx.com");
    assert_eq!(me["role"], "super_admin");
    assert!(
        me["permissions"]
            .as_array()
            .unwrap()
            .iter()
            .any(|p| p == "manage_payments")
    );
}
