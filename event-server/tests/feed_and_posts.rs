//! 端到端：发帖、信息流排序、瞬态互动、主办方删帖

mod common;

use http::StatusCode;
use serde_json::json;

async fn setup_event(server: &common::TestServer) -> (String, String, String) {
    let (_, event) = server
        .request(
            "POST",
            "/api/events",
            Some(common::HOST_TOKEN),
            Some(json!({ "title": "Dana & Yoni", "type": "wedding" })),
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

    (event_id, code, guest_id)
}

#[tokio::test]
async fn feed_lists_posts_newest_first_with_moment_types() {
    let server = common::spawn().await;
    let (event_id, code, guest_id) = setup_event(&server).await;

    let (status, first) = server
        .request(
            "POST",
            "/api/posts",
            None,
            Some(json!({
                "event_id": event_id,
                "type": "text",
                "caption": "Mazal tov!",
                "guest_name": "Maria",
                "guest_id": guest_id,
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "text post failed: {first}");

    let (status, second) = server
        .request(
            "POST",
            "/api/posts",
            None,
            Some(json!({
                "event_id": event_id,
                "type": "photo",
                "media_url": "/api/media/abc.jpg",
                "guest_name": "Maria",
                "guest_id": guest_id,
                "moment_type": "ceremony",
                "filter": "vintage",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "photo post failed: {second}");

    let (status, feed) = server
        .request("GET", &format!("/api/feed/{code}"), None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(feed["event"]["code"], code.as_str());

    let posts = feed["posts"].as_array().unwrap();
    assert_eq!(posts.len(), 2);
    // Newest first: the photo came after the text post
    assert_eq!(posts[0]["type"], "photo");
    assert_eq!(posts[1]["type"], "text");
    assert_eq!(feed["moment_types"], json!(["ceremony"]));
}

#[tokio::test]
async fn post_creation_enforces_type_rules() {
    let server = common::spawn().await;
    let (event_id, _, guest_id) = setup_event(&server).await;

    // Photo without media_url
    let (status, _) = server
        .request(
            "POST",
            "/api/posts",
            None,
            Some(json!({
                "event_id": event_id,
                "type": "photo",
                "guest_name": "Maria",
                "guest_id": guest_id,
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Text without caption
    let (status, _) = server
        .request(
            "POST",
            "/api/posts",
            None,
            Some(json!({
                "event_id": event_id,
                "type": "text",
                "guest_name": "Maria",
                "guest_id": guest_id,
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Unknown type
    let (status, _) = server
        .request(
            "POST",
            "/api/posts",
            None,
            Some(json!({
                "event_id": event_id,
                "type": "gif",
                "media_url": "/api/media/x.gif",
                "guest_name": "Maria",
                "guest_id": guest_id,
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Unknown event
    let (status, _) = server
        .request(
            "POST",
            "/api/posts",
            None,
            Some(json!({
                "event_id": "event:missing",
                "type": "text",
                "caption": "hello",
                "guest_name": "Maria",
                "guest_id": guest_id,
            })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn registered_guest_name_overrides_request_name() {
    let server = common::spawn().await;
    let (event_id, _, guest_id) = setup_event(&server).await;

    let (_, post) = server
        .request(
            "POST",
            "/api/posts",
            None,
            Some(json!({
                "event_id": event_id,
                "type": "text",
                "caption": "hi",
                "guest_name": "Spoofed Name",
                "guest_id": guest_id,
            })),
        )
        .await;
    // The name registered at join time wins
    assert_eq!(post["guest_name"], "Maria");
}

#[tokio::test]
async fn transient_interactions_and_reset_on_delete() {
    let server = common::spawn().await;
    let (event_id, code, guest_id) = setup_event(&server).await;

    let (_, post) = server
        .request(
            "POST",
            "/api/posts",
            None,
            Some(json!({
                "event_id": event_id,
                "type": "text",
                "caption": "like me",
                "guest_name": "Maria",
                "guest_id": guest_id,
            })),
        )
        .await;
    let post_id = post["id"].as_str().unwrap().to_string();

    // Like, then verify the snapshot from two perspectives
    let (status, snap) = server
        .request(
            "POST",
            &format!("/api/posts/{post_id}/like"),
            None,
            Some(json!({ "guest_id": guest_id })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snap["like_count"], 1);
    assert_eq!(snap["liked"], true);

    let (_, other_view) = server
        .request(
            "GET",
            &format!("/api/posts/{post_id}/interactions?guest_id=guest_other"),
            None,
            None,
        )
        .await;
    assert_eq!(other_view["like_count"], 1);
    assert_eq!(other_view["liked"], false);

    // Liking twice is idempotent; DELETE removes the like
    let (_, snap) = server
        .request(
            "POST",
            &format!("/api/posts/{post_id}/like"),
            None,
            Some(json!({ "guest_id": guest_id })),
        )
        .await;
    assert_eq!(snap["like_count"], 1);

    let (_, snap) = server
        .request(
            "DELETE",
            &format!("/api/posts/{post_id}/like"),
            None,
            Some(json!({ "guest_id": guest_id })),
        )
        .await;
    assert_eq!(snap["like_count"], 0);
    assert_eq!(snap["liked"], false);

    // Comments accumulate in order
    let (status, comment) = server
        .request(
            "POST",
            &format!("/api/posts/{post_id}/comments"),
            None,
            Some(json!({ "guest_id": guest_id, "guest_name": "Maria", "text": "so pretty" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(comment["text"], "so pretty");

    // Only the event owner can delete
    let (status, _) = server
        .request(
            "DELETE",
            &format!("/api/posts/{post_id}"),
            Some(common::OTHER_TOKEN),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, deleted) = server
        .request(
            "DELETE",
            &format!("/api/posts/{post_id}"),
            Some(common::HOST_TOKEN),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["deleted"], true);

    // Gone from the feed, and interactions on it 404
    let (_, feed) = server
        .request("GET", &format!("/api/feed/{code}"), None, None)
        .await;
    assert!(feed["posts"].as_array().unwrap().is_empty());

    let (status, _) = server
        .request(
            "GET",
            &format!("/api/posts/{post_id}/interactions?guest_id={guest_id}"),
            None,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
