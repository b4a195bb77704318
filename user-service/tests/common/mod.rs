use std::sync::Arc;

use auth::Authenticator;
use auth::BcryptHasher;
use auth::TokenIssuer;
use auth::TokenSettings;
use serde_json::json;
use serde_json::Value;
use user_service::domain::user::service::UserService;
use user_service::inbound::http::router::create_router;
use user_service::outbound::repositories::InMemoryUserRepository;

pub const SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const ISSUER: &str = "story-platform";
pub const PASSWORD: &str = "Abcdefg!1";

/// Test application that spawns a real server over an in-memory directory
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub token_issuer: TokenIssuer,
}

#[allow(dead_code)]
impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let settings = TokenSettings::new(SECRET, ISSUER).expect("Invalid token settings");

        // Cheap bcrypt cost keeps the suite fast
        let authenticator = Arc::new(Authenticator::with_hasher(
            &settings,
            Box::new(BcryptHasher::with_cost(4)),
        ));
        let user_repo = Arc::new(InMemoryUserRepository::new());
        let user_service = Arc::new(UserService::new(user_repo, Arc::clone(&authenticator)));

        let router = create_router(user_service, authenticator);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            token_issuer: TokenIssuer::new(&settings),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(&format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(&format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Register a user with the default password and return the `data` object
    pub async fn register(&self, username: &str, email: &str) -> Value {
        let response = self
            .post("/auth/register")
            .json(&json!({
                "username": username,
                "email": email,
                "password": PASSWORD
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"].clone()
    }

    /// Log in with the default password and return the access token
    pub async fn login(&self, username: &str) -> String {
        let response = self
            .post("/auth/login")
            .json(&json!({
                "username": username,
                "password": PASSWORD
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"]["access_token"]
            .as_str()
            .expect("Missing access token")
            .to_string()
    }
}
