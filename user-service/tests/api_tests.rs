mod common;

use auth::TokenIssuer;
use auth::TokenSettings;
use chrono::Duration;
use chrono::Utc;
use common::TestApp;
use common::PASSWORD;
use common::SECRET;
use reqwest::StatusCode;
use serde_json::json;
use serde_json::Value;

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/auth/register")
        .json(&json!({
            "username": "storyteller",
            "email": "story@example.com",
            "password": PASSWORD,
            "wallet_address": "0x5290aB1c2d3E4f5a6B7c8D9e0F1a2B3c4D5e6EE7",
            "profile": { "bio": "Writes at night" }
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["username"], "storyteller");
    assert_eq!(body["data"]["email"], "story@example.com");
    assert_eq!(body["data"]["role"], "reader");
    assert_eq!(
        body["data"]["wallet_address"],
        "0x5290aB1c2d3E4f5a6B7c8D9e0F1a2B3c4D5e6EE7"
    );
    assert_eq!(body["data"]["profile"]["bio"], "Writes at night");
    assert_eq!(body["data"]["profile"]["avatar"], "");
    assert_eq!(body["data"]["profile"]["preferences"], json!({}));
    assert!(body["data"]["id"].is_string());
    assert!(body["data"]["created_at"].is_string());
    assert!(body["data"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_weak_password() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/auth/register")
        .json(&json!({
            "username": "storyteller",
            "email": "story@example.com",
            "password": "abcdefg1"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().contains("upper-case"));
}

#[tokio::test]
async fn test_register_invalid_username() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/auth/register")
        .json(&json!({
            "username": "n",
            "email": "story@example.com",
            "password": PASSWORD
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_duplicates() {
    let app = TestApp::spawn().await;
    app.register("storyteller", "story@example.com").await;

    let same_name = app
        .post("/auth/register")
        .json(&json!({
            "username": "storyteller",
            "email": "other@example.com",
            "password": PASSWORD
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(same_name.status(), StatusCode::CONFLICT);

    let same_email = app
        .post("/auth/register")
        .json(&json!({
            "username": "another_writer",
            "email": "story@example.com",
            "password": PASSWORD
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(same_email.status(), StatusCode::CONFLICT);

    let body: Value = same_email.json().await.expect("Failed to parse response");
    assert!(body["message"].as_str().unwrap().contains("already exists"));
}

#[tokio::test]
async fn test_login_and_current_user() {
    let app = TestApp::spawn().await;
    let registered = app.register("storyteller", "story@example.com").await;

    let response = app
        .post("/auth/login")
        .json(&json!({
            "username": "storyteller",
            "password": PASSWORD
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["user"]["id"], registered["id"]);
    let token = body["data"]["access_token"].as_str().unwrap().to_string();

    let me = app
        .get_authenticated("/users/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(me.status(), StatusCode::OK);
    let body: Value = me.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["username"], "storyteller");
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::spawn().await;
    app.register("storyteller", "story@example.com").await;

    let mut bodies = Vec::new();
    for (username, password) in [("storyteller", "Wrong!pass1"), ("nobody_here", PASSWORD)] {
        let response = app
            .post("/auth/login")
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: Value = response.json().await.expect("Failed to parse response");
        bodies.push(body);
    }

    assert_eq!(bodies[0], bodies[1]);
    assert_eq!(bodies[0]["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_gate_rejections() {
    let app = TestApp::spawn().await;

    let missing = app
        .get("/users")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);
    let body: Value = missing.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Missing Authorization header");

    let wrong_scheme = app
        .get("/users")
        .header("Authorization", "Token abc")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(wrong_scheme.status(), StatusCode::UNAUTHORIZED);

    let garbage = app
        .get_authenticated("/users", "not-a-jwt")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(garbage.status(), StatusCode::UNAUTHORIZED);
    let body: Value = garbage.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Invalid token: malformed");
}

#[tokio::test]
async fn test_expired_and_foreign_tokens() {
    let app = TestApp::spawn().await;
    let user = app.register("storyteller", "story@example.com").await;
    let subject = user["id"].as_str().unwrap();

    let expired = app
        .token_issuer
        .issue_at(subject, "reader", Utc::now() - Duration::days(2))
        .unwrap();
    let response = app
        .get_authenticated("/users/me", &expired)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Invalid token: expired");

    let foreign_settings = TokenSettings::new(SECRET, "someone-else").unwrap();
    let foreign = TokenIssuer::new(&foreign_settings)
        .issue(subject, "reader")
        .unwrap();
    let response = app
        .get_authenticated("/users/me", &foreign)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Invalid token: bad issuer");
}

#[tokio::test]
async fn test_lookups() {
    let app = TestApp::spawn().await;
    app.register("storyteller", "story@example.com").await;
    app.register("bookworm_99", "worm@example.com").await;
    let token = app.login("storyteller").await;

    let response = app
        .get_authenticated("/users", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let response = app
        .get_authenticated("/users/email/worm@example.com", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["username"], "bookworm_99");

    let response = app
        .get_authenticated("/users/username/bookworm_99", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .get_authenticated("/users/username/nobody_here", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_requires_owner_or_admin() {
    let app = TestApp::spawn().await;
    app.register("storyteller", "story@example.com").await;
    let victim = app.register("bookworm_99", "worm@example.com").await;
    let victim_id = victim["id"].as_str().unwrap();
    let token = app.login("storyteller").await;

    let response = app
        .put_authenticated(&format!("/users/{}", victim_id), &token)
        .json(&json!({ "email": "hijacked@example.com" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let admin_token = app.token_issuer.issue("some-admin", "admin").unwrap();
    let response = app
        .put_authenticated(&format!("/users/{}", victim_id), &admin_token)
        .json(&json!({ "email": "moved@example.com" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["email"], "moved@example.com");
}

#[tokio::test]
async fn test_password_change_and_delete_self() {
    let app = TestApp::spawn().await;
    let user = app.register("storyteller", "story@example.com").await;
    let user_id = user["id"].as_str().unwrap();
    let token = app.login("storyteller").await;

    let weak = app
        .put_authenticated(&format!("/users/{}", user_id), &token)
        .json(&json!({ "password": "short" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(weak.status(), StatusCode::BAD_REQUEST);

    let changed = app
        .put_authenticated(&format!("/users/{}", user_id), &token)
        .json(&json!({ "password": "New!Secret9" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(changed.status(), StatusCode::OK);

    let relogin = app
        .post("/auth/login")
        .json(&json!({ "username": "storyteller", "password": "New!Secret9" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(relogin.status(), StatusCode::OK);

    let deleted = app
        .delete_authenticated(&format!("/users/{}", user_id), &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(deleted.status(), StatusCode::OK);
    let body: Value = deleted.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], true);
    assert!(body.get("data").is_none());

    let me = app
        .get_authenticated("/users/me", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(me.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_profile_and_wallet() {
    let app = TestApp::spawn().await;
    let user = app.register("storyteller", "story@example.com").await;
    assert_eq!(user["wallet_address"], "");
    assert_eq!(user["profile"]["bio"], "");
    let token = app.login("storyteller").await;
    let path = format!("/users/{}", user["id"].as_str().unwrap());

    let response = app
        .put_authenticated(&path, &token)
        .json(&json!({
            "wallet_address": "0xABC123",
            "profile": { "avatar": "https://cdn.example.com/a.png", "preferences": { "theme": "dark" } }
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let me: Value = app
        .get_authenticated("/users/me", &token)
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(me["data"]["wallet_address"], "0xABC123");
    assert_eq!(me["data"]["profile"]["avatar"], "https://cdn.example.com/a.png");
    assert_eq!(me["data"]["profile"]["bio"], "");
    assert_eq!(me["data"]["profile"]["preferences"], json!({ "theme": "dark" }));

    let response = app
        .put_authenticated(&path, &token)
        .json(&json!({ "profile": { "preferences": "dark" } }))
        .send()
        .await
        .expect("Failed to execute request");
    assert!(response.status().is_client_error());
}
