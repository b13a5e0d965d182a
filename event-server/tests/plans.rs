//! 端到端：套餐目录与选择

mod common;

use http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn catalog_lists_the_three_tiers() {
    let server = common::spawn().await;

    let (status, catalog) = server.request("GET", "/api/plans", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let catalog = catalog.as_array().unwrap();
    assert_eq!(catalog.len(), 3);
    assert_eq!(catalog[0]["id"], "basic");
    assert_eq!(catalog[0]["price"], 199);
    assert_eq!(catalog[2]["id"], "ultimate");
    assert_eq!(catalog[2]["price"], 699);
}

#[tokio::test]
async fn selecting_a_plan_upserts_per_host() {
    let server = common::spawn().await;

    // No plan yet
    let (status, plan) = server
        .request("GET", "/api/plans/mine", Some(common::HOST_TOKEN), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(plan.is_null());

    // Unknown plan id is rejected
    let (status, _) = server
        .request(
            "POST",
            "/api/plans",
            Some(common::HOST_TOKEN),
            Some(json!({ "plan_type": "diamond" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, plan) = server
        .request(
            "POST",
            "/api/plans",
            Some(common::HOST_TOKEN),
            Some(json!({ "plan_type": "basic" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(plan["plan_type"], "basic");
    assert_eq!(plan["status"], "active");

    // Upgrading replaces the record instead of adding one
    let (_, upgraded) = server
        .request(
            "POST",
            "/api/plans",
            Some(common::HOST_TOKEN),
            Some(json!({ "plan_type": "premium" })),
        )
        .await;
    assert_eq!(upgraded["plan_type"], "premium");
    assert_eq!(upgraded["id"], plan["id"]);

    let (_, mine) = server
        .request("GET", "/api/plans/mine", Some(common::HOST_TOKEN), None)
        .await;
    assert_eq!(mine["plan_type"], "premium");

    // Plans are per host
    let (status, _) = server
        .request("GET", "/api/plans/mine", None, None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
