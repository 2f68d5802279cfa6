//! End-to-end API tests
//!
//! Each test boots a fresh server over in-memory storage and drives it
//! through the HTTP surface with the gateway identity header.

use anyhow::Result;
use integration_tests::{assert_json, assert_status, seed_inactive_user, seed_user, TestServer};
use reqwest::StatusCode;
use serde_json::{json, Value};

const ALICE: i64 = 1;
const BOB: i64 = 2;
const CAROL: i64 = 3;

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_endpoints() -> Result<()> {
    let server = TestServer::start().await?;

    let body: Value = assert_json(server.get_anon("/health").await?, StatusCode::OK).await?;
    assert_eq!(body["status"], "ok");

    let body: Value = assert_json(server.get_anon("/health/ready").await?, StatusCode::OK).await?;
    assert_eq!(body["status"], "ready");

    Ok(())
}

// ============================================================================
// Identity
// ============================================================================

#[tokio::test]
async fn test_missing_identity_rejected() -> Result<()> {
    let server = TestServer::start().await?;

    let response = server.get_anon("/api/v1/notifications").await?;
    let body: Value = assert_json(response, StatusCode::UNAUTHORIZED).await?;
    assert_eq!(body["error"]["code"], "MISSING_IDENTITY");

    Ok(())
}

#[tokio::test]
async fn test_invalid_identity_rejected() -> Result<()> {
    let server = TestServer::start().await?;

    let url = format!("{}/api/v1/notifications", server.base_url());
    let response = server
        .client
        .get(&url)
        .header("X-User-Id", "not-a-snowflake")
        .send()
        .await?;
    let body: Value = assert_json(response, StatusCode::UNAUTHORIZED).await?;
    assert_eq!(body["error"]["code"], "INVALID_IDENTITY");

    Ok(())
}

// ============================================================================
// Posts
// ============================================================================

#[tokio::test]
async fn test_create_post_fans_out_to_followers() -> Result<()> {
    let server = TestServer::start().await?;
    seed_user(&server.ctx, ALICE, "alice").await;
    seed_user(&server.ctx, BOB, "bob").await;

    // bob follows alice
    let response = server.post_empty(&format!("/api/v1/users/{ALICE}/follow"), BOB).await?;
    assert_status(response, StatusCode::NO_CONTENT).await?;

    let response = server
        .post("/api/v1/posts", ALICE, &json!({"content": "hello world"}))
        .await?;
    let body: Value = assert_json(response, StatusCode::CREATED).await?;
    assert_eq!(body["post"]["content"], "hello world");
    assert_eq!(body["post"]["author_id"], ALICE.to_string());
    assert_eq!(body["delivery"]["created"], 1);
    assert_eq!(body["delivery"]["skipped"], 0);
    assert_eq!(body["delivery"]["failed"], 0);

    // follower's inbox received the announcement
    let response = server.get("/api/v1/notifications", BOB).await?;
    let inbox: Value = assert_json(response, StatusCode::OK).await?;
    assert_eq!(inbox["total"], 1);
    let first = &inbox["notifications"][0];
    assert_eq!(first["kind"], "post_update");
    assert_eq!(first["sender"]["username"], "alice");
    assert_eq!(first["data"]["postId"], body["post"]["id"]);

    Ok(())
}

#[tokio::test]
async fn test_create_post_skips_inactive_followers() -> Result<()> {
    let server = TestServer::start().await?;
    seed_user(&server.ctx, ALICE, "alice").await;
    seed_user(&server.ctx, BOB, "bob").await;
    seed_inactive_user(&server.ctx, CAROL, "carol").await;

    let response = server.post_empty(&format!("/api/v1/users/{ALICE}/follow"), BOB).await?;
    assert_status(response, StatusCode::NO_CONTENT).await?;
    let response = server.post_empty(&format!("/api/v1/users/{ALICE}/follow"), CAROL).await?;
    assert_status(response, StatusCode::NO_CONTENT).await?;

    let response = server
        .post("/api/v1/posts", ALICE, &json!({"content": "for the active only"}))
        .await?;
    let body: Value = assert_json(response, StatusCode::CREATED).await?;
    assert_eq!(body["delivery"]["created"], 1);
    assert_eq!(body["delivery"]["skipped"], 1);

    Ok(())
}

#[tokio::test]
async fn test_create_post_rejects_empty_content() -> Result<()> {
    let server = TestServer::start().await?;
    seed_user(&server.ctx, ALICE, "alice").await;

    let response = server.post("/api/v1/posts", ALICE, &json!({"content": ""})).await?;
    assert_status(response, StatusCode::BAD_REQUEST).await?;

    Ok(())
}

// ============================================================================
// Likes
// ============================================================================

#[tokio::test]
async fn test_like_is_idempotent_and_notifies_author() -> Result<()> {
    let server = TestServer::start().await?;
    seed_user(&server.ctx, ALICE, "alice").await;
    seed_user(&server.ctx, BOB, "bob").await;

    let response = server
        .post("/api/v1/posts", ALICE, &json!({"content": "like me"}))
        .await?;
    let created: Value = assert_json(response, StatusCode::CREATED).await?;
    let post_id = created["post"]["id"].as_str().unwrap().to_string();

    let response = server.post_empty(&format!("/api/v1/posts/{post_id}/like"), BOB).await?;
    let counters: Value = assert_json(response, StatusCode::OK).await?;
    assert_eq!(counters["likes"], 1);

    // repeated like does not double-count
    let response = server.post_empty(&format!("/api/v1/posts/{post_id}/like"), BOB).await?;
    let counters: Value = assert_json(response, StatusCode::OK).await?;
    assert_eq!(counters["likes"], 1);

    // author got exactly one like notification
    let response = server.get("/api/v1/notifications/unread-count", ALICE).await?;
    let body: Value = assert_json(response, StatusCode::OK).await?;
    assert_eq!(body["unread_count"], 1);

    let response = server.get("/api/v1/notifications?kind=like", ALICE).await?;
    let inbox: Value = assert_json(response, StatusCode::OK).await?;
    assert_eq!(inbox["total"], 1);
    assert_eq!(inbox["notifications"][0]["title"], "New Like");

    Ok(())
}

#[tokio::test]
async fn test_unlike_restores_counter() -> Result<()> {
    let server = TestServer::start().await?;
    seed_user(&server.ctx, ALICE, "alice").await;
    seed_user(&server.ctx, BOB, "bob").await;

    let response = server
        .post("/api/v1/posts", ALICE, &json!({"content": "fleeting fame"}))
        .await?;
    let created: Value = assert_json(response, StatusCode::CREATED).await?;
    let post_id = created["post"]["id"].as_str().unwrap().to_string();

    server.post_empty(&format!("/api/v1/posts/{post_id}/like"), BOB).await?;

    let response = server.delete(&format!("/api/v1/posts/{post_id}/like"), BOB).await?;
    let counters: Value = assert_json(response, StatusCode::OK).await?;
    assert_eq!(counters["likes"], 0);

    // removing an absent like is a no-op
    let response = server.delete(&format!("/api/v1/posts/{post_id}/like"), BOB).await?;
    let counters: Value = assert_json(response, StatusCode::OK).await?;
    assert_eq!(counters["likes"], 0);

    Ok(())
}

#[tokio::test]
async fn test_like_unknown_post_returns_not_found() -> Result<()> {
    let server = TestServer::start().await?;
    seed_user(&server.ctx, BOB, "bob").await;

    let response = server.post_empty("/api/v1/posts/999999/like", BOB).await?;
    assert_status(response, StatusCode::NOT_FOUND).await?;

    Ok(())
}

// ============================================================================
// Comments
// ============================================================================

#[tokio::test]
async fn test_comment_creates_and_counts() -> Result<()> {
    let server = TestServer::start().await?;
    seed_user(&server.ctx, ALICE, "alice").await;
    seed_user(&server.ctx, BOB, "bob").await;

    let response = server
        .post("/api/v1/posts", ALICE, &json!({"content": "discuss"}))
        .await?;
    let created: Value = assert_json(response, StatusCode::CREATED).await?;
    let post_id = created["post"]["id"].as_str().unwrap().to_string();

    let response = server
        .post(
            &format!("/api/v1/posts/{post_id}/comments"),
            BOB,
            &json!({"content": "great take"}),
        )
        .await?;
    let comment: Value = assert_json(response, StatusCode::CREATED).await?;
    assert_eq!(comment["post_id"], post_id);
    assert_eq!(comment["author_id"], BOB.to_string());
    assert_eq!(comment["content"], "great take");

    let response = server
        .post_empty(&format!("/api/v1/posts/{post_id}/resync"), ALICE)
        .await?;
    let counters: Value = assert_json(response, StatusCode::OK).await?;
    assert_eq!(counters["comments"], 1);

    // author got a comment notification
    let response = server.get("/api/v1/notifications?kind=comment", ALICE).await?;
    let inbox: Value = assert_json(response, StatusCode::OK).await?;
    assert_eq!(inbox["total"], 1);

    Ok(())
}

#[tokio::test]
async fn test_blank_comment_rejected() -> Result<()> {
    let server = TestServer::start().await?;
    seed_user(&server.ctx, ALICE, "alice").await;

    let response = server
        .post("/api/v1/posts", ALICE, &json!({"content": "quiet please"}))
        .await?;
    let created: Value = assert_json(response, StatusCode::CREATED).await?;
    let post_id = created["post"]["id"].as_str().unwrap().to_string();

    let response = server
        .post(
            &format!("/api/v1/posts/{post_id}/comments"),
            ALICE,
            &json!({"content": "   "}),
        )
        .await?;
    assert_status(response, StatusCode::BAD_REQUEST).await?;

    Ok(())
}

// ============================================================================
// Follows
// ============================================================================

#[tokio::test]
async fn test_follow_lifecycle() -> Result<()> {
    let server = TestServer::start().await?;
    seed_user(&server.ctx, ALICE, "alice").await;
    seed_user(&server.ctx, BOB, "bob").await;

    // unfollow before following is an error
    let response = server.delete(&format!("/api/v1/users/{ALICE}/follow"), BOB).await?;
    assert_status(response, StatusCode::NOT_FOUND).await?;

    let response = server.post_empty(&format!("/api/v1/users/{ALICE}/follow"), BOB).await?;
    assert_status(response, StatusCode::NO_CONTENT).await?;

    // repeated follow stays idempotent
    let response = server.post_empty(&format!("/api/v1/users/{ALICE}/follow"), BOB).await?;
    assert_status(response, StatusCode::NO_CONTENT).await?;

    let response = server
        .post_empty(&format!("/api/v1/users/{ALICE}/resync"), ALICE)
        .await?;
    let counters: Value = assert_json(response, StatusCode::OK).await?;
    assert_eq!(counters["followers"], 1);

    // one follow notification despite the retry
    let response = server.get("/api/v1/notifications?kind=follow", ALICE).await?;
    let inbox: Value = assert_json(response, StatusCode::OK).await?;
    assert_eq!(inbox["total"], 1);
    assert_eq!(inbox["notifications"][0]["title"], "New Follower");

    let response = server.delete(&format!("/api/v1/users/{ALICE}/follow"), BOB).await?;
    assert_status(response, StatusCode::NO_CONTENT).await?;

    let response = server
        .post_empty(&format!("/api/v1/users/{ALICE}/resync"), ALICE)
        .await?;
    let counters: Value = assert_json(response, StatusCode::OK).await?;
    assert_eq!(counters["followers"], 0);

    Ok(())
}

#[tokio::test]
async fn test_self_follow_rejected() -> Result<()> {
    let server = TestServer::start().await?;
    seed_user(&server.ctx, ALICE, "alice").await;

    let response = server.post_empty(&format!("/api/v1/users/{ALICE}/follow"), ALICE).await?;
    assert_status(response, StatusCode::BAD_REQUEST).await?;

    Ok(())
}

// ============================================================================
// Notification read state
// ============================================================================

#[tokio::test]
async fn test_notification_read_state_flow() -> Result<()> {
    let server = TestServer::start().await?;
    seed_user(&server.ctx, ALICE, "alice").await;
    seed_user(&server.ctx, BOB, "bob").await;
    seed_user(&server.ctx, CAROL, "carol").await;

    let response = server
        .post("/api/v1/posts", ALICE, &json!({"content": "popular"}))
        .await?;
    let created: Value = assert_json(response, StatusCode::CREATED).await?;
    let post_id = created["post"]["id"].as_str().unwrap().to_string();

    server.post_empty(&format!("/api/v1/posts/{post_id}/like"), BOB).await?;
    server
        .post(
            &format!("/api/v1/posts/{post_id}/comments"),
            CAROL,
            &json!({"content": "nice"}),
        )
        .await?;

    let response = server.get("/api/v1/notifications", ALICE).await?;
    let inbox: Value = assert_json(response, StatusCode::OK).await?;
    assert_eq!(inbox["total"], 2);
    assert_eq!(inbox["unread_count"], 2);
    assert_eq!(inbox["has_next"], false);
    let first_id = inbox["notifications"][0]["id"].as_str().unwrap().to_string();

    // marking an unknown id fails
    let response = server.put("/api/v1/notifications/424242/read", ALICE).await?;
    assert_status(response, StatusCode::NOT_FOUND).await?;

    // another user cannot mark someone else's notification
    let response = server.put(&format!("/api/v1/notifications/{first_id}/read"), BOB).await?;
    assert_status(response, StatusCode::NOT_FOUND).await?;

    let response = server
        .put(&format!("/api/v1/notifications/{first_id}/read"), ALICE)
        .await?;
    assert_status(response, StatusCode::NO_CONTENT).await?;

    let response = server.get("/api/v1/notifications/unread-count", ALICE).await?;
    let body: Value = assert_json(response, StatusCode::OK).await?;
    assert_eq!(body["unread_count"], 1);

    let response = server.put("/api/v1/notifications/mark-all-read", ALICE).await?;
    let body: Value = assert_json(response, StatusCode::OK).await?;
    assert_eq!(body["updated"], 1);

    let response = server.get("/api/v1/notifications/stats", ALICE).await?;
    let stats: Value = assert_json(response, StatusCode::OK).await?;
    assert_eq!(stats["total"], 2);
    assert_eq!(stats["unread"], 0);
    assert_eq!(stats["recent"], 2);

    // unread-only listing is now empty
    let response = server.get("/api/v1/notifications?unread_only=true", ALICE).await?;
    let inbox: Value = assert_json(response, StatusCode::OK).await?;
    assert_eq!(inbox["total"], 0);

    Ok(())
}

#[tokio::test]
async fn test_delete_notification() -> Result<()> {
    let server = TestServer::start().await?;
    seed_user(&server.ctx, ALICE, "alice").await;
    seed_user(&server.ctx, BOB, "bob").await;

    let response = server
        .post("/api/v1/posts", ALICE, &json!({"content": "ephemeral"}))
        .await?;
    let created: Value = assert_json(response, StatusCode::CREATED).await?;
    let post_id = created["post"]["id"].as_str().unwrap().to_string();
    server.post_empty(&format!("/api/v1/posts/{post_id}/like"), BOB).await?;

    let response = server.get("/api/v1/notifications", ALICE).await?;
    let inbox: Value = assert_json(response, StatusCode::OK).await?;
    let id = inbox["notifications"][0]["id"].as_str().unwrap().to_string();

    let response = server.delete(&format!("/api/v1/notifications/{id}"), ALICE).await?;
    assert_status(response, StatusCode::NO_CONTENT).await?;

    let response = server.delete(&format!("/api/v1/notifications/{id}"), ALICE).await?;
    assert_status(response, StatusCode::NOT_FOUND).await?;

    Ok(())
}

#[tokio::test]
async fn test_system_notification_broadcast() -> Result<()> {
    let server = TestServer::start().await?;
    seed_user(&server.ctx, ALICE, "alice").await;
    seed_user(&server.ctx, BOB, "bob").await;
    seed_inactive_user(&server.ctx, CAROL, "carol").await;

    let response = server
        .post(
            "/api/v1/notifications/system",
            ALICE,
            &json!({
                "recipient_ids": [ALICE.to_string(), BOB.to_string(), CAROL.to_string()],
                "title": "Maintenance",
                "message": "Scheduled downtime tonight"
            }),
        )
        .await?;
    let body: Value = assert_json(response, StatusCode::CREATED).await?;
    assert_eq!(body["created"], 2);
    assert_eq!(body["skipped"], 1);

    let response = server.get("/api/v1/notifications?kind=system", BOB).await?;
    let inbox: Value = assert_json(response, StatusCode::OK).await?;
    assert_eq!(inbox["total"], 1);
    assert_eq!(inbox["notifications"][0]["title"], "Maintenance");
    assert!(inbox["notifications"][0]["sender"].is_null());

    Ok(())
}

#[tokio::test]
async fn test_cleanup_keeps_recent_notifications() -> Result<()> {
    let server = TestServer::start().await?;
    seed_user(&server.ctx, ALICE, "alice").await;
    seed_user(&server.ctx, BOB, "bob").await;

    let response = server
        .post("/api/v1/posts", ALICE, &json!({"content": "fresh"}))
        .await?;
    let created: Value = assert_json(response, StatusCode::CREATED).await?;
    let post_id = created["post"]["id"].as_str().unwrap().to_string();
    server.post_empty(&format!("/api/v1/posts/{post_id}/like"), BOB).await?;

    // days below the retention floor gets clamped; nothing is recent enough
    let response = server.delete("/api/v1/notifications/cleanup?days=1", ALICE).await?;
    let body: Value = assert_json(response, StatusCode::OK).await?;
    assert_eq!(body["deleted"], 0);

    let response = server.get("/api/v1/notifications/unread-count", ALICE).await?;
    let body: Value = assert_json(response, StatusCode::OK).await?;
    assert_eq!(body["unread_count"], 1);

    Ok(())
}

// ============================================================================
// Trending feed
// ============================================================================

#[tokio::test]
async fn test_trending_orders_by_engagement() -> Result<()> {
    let server = TestServer::start().await?;
    seed_user(&server.ctx, ALICE, "alice").await;
    seed_user(&server.ctx, BOB, "bob").await;
    seed_user(&server.ctx, CAROL, "carol").await;

    let response = server
        .post("/api/v1/posts", ALICE, &json!({"content": "modest"}))
        .await?;
    let created: Value = assert_json(response, StatusCode::CREATED).await?;
    let quiet_id = created["post"]["id"].as_str().unwrap().to_string();

    let response = server
        .post("/api/v1/posts", ALICE, &json!({"content": "viral"}))
        .await?;
    let created: Value = assert_json(response, StatusCode::CREATED).await?;
    let hot_id = created["post"]["id"].as_str().unwrap().to_string();

    server.post_empty(&format!("/api/v1/posts/{quiet_id}/like"), BOB).await?;
    server.post_empty(&format!("/api/v1/posts/{hot_id}/like"), BOB).await?;
    server.post_empty(&format!("/api/v1/posts/{hot_id}/like"), CAROL).await?;

    let response = server.get("/api/v1/feed/trending", BOB).await?;
    let page: Value = assert_json(response, StatusCode::OK).await?;
    assert_eq!(page["total"], 2);
    assert_eq!(page["window_hours"], 72);
    assert_eq!(page["posts"][0]["id"], hot_id);
    assert_eq!(page["posts"][1]["id"], quiet_id);
    assert_eq!(page["posts"][0]["trending"], true);
    assert!(page["posts"][0]["score"].as_f64().unwrap() > page["posts"][1]["score"].as_f64().unwrap());

    Ok(())
}

#[tokio::test]
async fn test_trending_excludes_untouched_posts() -> Result<()> {
    let server = TestServer::start().await?;
    seed_user(&server.ctx, ALICE, "alice").await;

    let response = server
        .post("/api/v1/posts", ALICE, &json!({"content": "nobody saw this"}))
        .await?;
    assert_json::<Value>(response, StatusCode::CREATED).await?;

    let response = server.get("/api/v1/feed/trending", ALICE).await?;
    let page: Value = assert_json(response, StatusCode::OK).await?;
    assert_eq!(page["total"], 0);
    assert_eq!(page["has_next"], false);

    Ok(())
}
