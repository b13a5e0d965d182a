//! 端到端：人脸扫描分组与命名确认

mod common;

use http::StatusCode;
use serde_json::json;

async fn setup_event_with_photos(server: &common::TestServer) -> (String, String) {
    let (_, event) = server
        .request(
            "POST",
            "/api/events",
            Some(common::HOST_TOKEN),
            Some(json!({ "title": "Brit of Ariel", "type": "brit" })),
        )
        .await;
    let event_id = event["id"].as_str().unwrap().to_string();
    let code = event["code"].as_str().unwrap().to_string();

    let (_, identity) = server
        .request(
            "POST",
            "/api/guests/join",
            None,
            Some(json!({ "code": code, "name": "Maria" })),
        )
        .await;
    let guest_id = identity["guest_id"].as_str().unwrap().to_string();

    // Two photos with the shared face, one solo, one video (ignored by scans)
    for (post_type, url) in [
        ("photo", "/api/media/pair-a.jpg"),
        ("photo", "/api/media/pair-b.jpg"),
        ("photo", "/api/media/solo.jpg"),
        ("video", "/api/media/dance.mp4"),
    ] {
        let (status, _) = server
            .request(
                "POST",
                "/api/posts",
                None,
                Some(json!({
                    "event_id": event_id,
                    "type": post_type,
                    "media_url": url,
                    "guest_name": "Maria",
                    "guest_id": guest_id,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    (event_id, code)
}

#[tokio::test]
async fn scan_groups_faces_across_photos() {
    let server = common::spawn().await;
    let (event_id, _) = setup_event_with_photos(&server).await;

    let (status, groups) = server
        .request(
            "POST",
            &format!("/api/events/{event_id}/face-scan"),
            Some(common::HOST_TOKEN),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK, "scan failed: {groups}");

    let groups = groups.as_array().unwrap();
    assert_eq!(groups.len(), 2);
    // Sorted by face_id, so the shared face comes first
    assert_eq!(groups[0]["face_id"], "face-shared");
    assert_eq!(groups[0]["instances"].as_array().unwrap().len(), 2);
    assert_eq!(groups[1]["face_id"], "face-solo");
    assert_eq!(groups[1]["instances"].as_array().unwrap().len(), 1);
    // Nothing is persisted until the host confirms a name
    assert_eq!(groups[0]["person_name"], "");
}

#[tokio::test]
async fn scan_is_owner_only() {
    let server = common::spawn().await;
    let (event_id, _) = setup_event_with_photos(&server).await;

    let (status, _) = server
        .request(
            "POST",
            &format!("/api/events/{event_id}/face-scan"),
            Some(common::OTHER_TOKEN),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = server
        .request(
            "POST",
            &format!("/api/events/{event_id}/face-scan"),
            None,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn confirming_a_group_persists_named_tags() {
    let server = common::spawn().await;
    let (event_id, _) = setup_event_with_photos(&server).await;

    let (_, groups) = server
        .request(
            "POST",
            &format!("/api/events/{event_id}/face-scan"),
            Some(common::HOST_TOKEN),
            None,
        )
        .await;
    let shared = &groups.as_array().unwrap()[0];

    // Blank names are rejected
    let (status, _) = server
        .request(
            "POST",
            "/api/face-tags/confirm",
            Some(common::HOST_TOKEN),
            Some(json!({
                "event_id": event_id,
                "face_id": shared["face_id"],
                "person_name": "  ",
                "instances": shared["instances"],
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, tags) = server
        .request(
            "POST",
            "/api/face-tags/confirm",
            Some(common::HOST_TOKEN),
            Some(json!({
                "event_id": event_id,
                "face_id": shared["face_id"],
                "person_name": "Grandma Rivka",
                "instances": shared["instances"],
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "confirm failed: {tags}");
    assert_eq!(tags.as_array().unwrap().len(), 2);
    assert_eq!(tags[0]["person_name"], "Grandma Rivka");

    // Confirmed tags are listed per event
    let (status, listed) = server
        .request(
            "GET",
            &format!("/api/events/{event_id}/face-tags"),
            None,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 2);
    assert!(listed.iter().all(|t| t["person_name"] == "Grandma Rivka"));
    assert!(listed.iter().all(|t| t["face_id"] == "face-shared"));
}
