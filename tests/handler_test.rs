//! HTTP handler tests
//!
//! Drives the router in-process with axum-test and hand-written AI clients.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum_test::TestServer;
use hashtag_server::config::AiSettings;
use hashtag_server::domain::hashtag::{AiClientTrait, ChatCompletionClient};
use hashtag_server::error::AppError;
use hashtag_server::{create_router, AppState};
use serde_json::json;

/// Returns a fixed completion and records every prompt it receives
struct MockAiClientSuccess {
    response: String,
    prompts: Arc<Mutex<Vec<String>>>,
    calls: Arc<AtomicUsize>,
}

impl MockAiClientSuccess {
    fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            prompts: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait::async_trait]
impl AiClientTrait for MockAiClientSuccess {
    async fn complete(&self, prompt: &str) -> Result<String, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.response.clone())
    }

    async fn health_check(&self) -> Result<String, AppError> {
        Ok("ok".to_string())
    }
}

/// Fails every call with the error produced by `make_error`
struct MockAiClientError {
    make_error: fn() -> AppError,
}

impl MockAiClientError {
    fn new(make_error: fn() -> AppError) -> Self {
        Self { make_error }
    }
}

#[async_trait::async_trait]
impl AiClientTrait for MockAiClientError {
    async fn complete(&self, _prompt: &str) -> Result<String, AppError> {
        Err((self.make_error)())
    }

    async fn health_check(&self) -> Result<String, AppError> {
        Err((self.make_error)())
    }
}

fn server_with(client: impl AiClientTrait + 'static) -> TestServer {
    let state = AppState::new(Arc::new(client)).unwrap();
    TestServer::new(create_router(state)).unwrap()
}

const TEN_TAGS: &str = "#SustainableTravel #EcoTravel #GreenTravel #TravelResponsibly #SlowTravel #EcoTourism #ZeroWasteTravel #ConsciousTravel #GreenLiving #ResponsibleTourism";

mod generate_handler {
    use super::*;

    #[tokio::test]
    async fn should_return_hashtags_in_model_order() {
        // Arrange
        let server = server_with(MockAiClientSuccess::new(TEN_TAGS));

        // Act
        let response = server
            .post("/api/hashtags/generate")
            .json(&json!({ "content": "sustainable travel", "count": 10 }))
            .await;

        // Assert
        response.assert_status_ok();
        response.assert_json_contains(&json!({
            "isSuccess": true,
            "code": "COMMON200",
            "message": "Success."
        }));

        let body: serde_json::Value = response.json();
        let expected: Vec<&str> = TEN_TAGS.split(' ').collect();
        assert_eq!(body["result"]["hashtags"], json!(expected));
        assert_eq!(body["result"]["hashtagsText"], TEN_TAGS);
        assert_eq!(body["result"]["count"], 10);
        assert_eq!(body["result"]["requestedCount"], 10);
        assert!(body["result"]["tip"].is_null());
    }

    #[tokio::test]
    async fn should_default_count_to_ten() {
        let mock = MockAiClientSuccess::new(TEN_TAGS);
        let prompts = mock.prompts.clone();
        let server = server_with(mock);

        let response = server
            .post("/api/hashtags/generate")
            .json(&json!({ "content": "sustainable travel" }))
            .await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["result"]["requestedCount"], 10);

        let prompts = prompts.lock().unwrap();
        assert!(prompts[0].contains("exactly 10"));
        assert!(prompts[0].contains("sustainable travel"));
    }

    #[tokio::test]
    async fn should_drop_extra_hashtags() {
        let server = server_with(MockAiClientSuccess::new(TEN_TAGS));

        let response = server
            .post("/api/hashtags/generate")
            .json(&json!({ "content": "sustainable travel", "count": 5 }))
            .await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["result"]["count"], 5);
        assert_eq!(body["result"]["hashtags"][0], "#SustainableTravel");
        assert_eq!(body["result"]["hashtags"][4], "#SlowTravel");
    }

    #[tokio::test]
    async fn should_normalize_model_output() {
        let server = server_with(MockAiClientSuccess::new(
            "Here you go:\n#Coffee, #coffee ##Latte! #Espresso. #Barista #Cafe",
        ));

        let response = server
            .post("/api/hashtags/generate")
            .json(&json!({ "content": "coffee shop", "count": 5 }))
            .await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(
            body["result"]["hashtags"],
            json!(["#Coffee", "#Latte", "#Espresso", "#Barista", "#Cafe"])
        );
    }

    #[tokio::test]
    async fn should_reject_count_below_minimum_without_calling_ai() {
        // Arrange
        let mock = MockAiClientSuccess::new(TEN_TAGS);
        let calls = mock.calls.clone();
        let server = server_with(mock);

        // Act
        let response = server
            .post("/api/hashtags/generate")
            .json(&json!({ "content": "sustainable travel", "count": 4 }))
            .await;

        // Assert
        response.assert_status_bad_request();
        response.assert_json_contains(&json!({
            "isSuccess": false,
            "code": "COMMON400"
        }));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn should_reject_count_above_maximum_without_calling_ai() {
        let mock = MockAiClientSuccess::new(TEN_TAGS);
        let calls = mock.calls.clone();
        let server = server_with(mock);

        let response = server
            .post("/api/hashtags/generate")
            .json(&json!({ "content": "sustainable travel", "count": 21 }))
            .await;

        response.assert_status_bad_request();
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn should_accept_count_bounds() {
        for count in [5, 20] {
            let server = server_with(MockAiClientSuccess::new(TEN_TAGS));

            let response = server
                .post("/api/hashtags/generate")
                .json(&json!({ "content": "sustainable travel", "count": count }))
                .await;

            response.assert_status_ok();
        }
    }

    #[tokio::test]
    async fn should_reject_empty_content() {
        let server = server_with(MockAiClientSuccess::new(TEN_TAGS));

        let response = server
            .post("/api/hashtags/generate")
            .json(&json!({ "content": "", "count": 10 }))
            .await;

        response.assert_status_bad_request();
        response.assert_json_contains(&json!({ "code": "COMMON400" }));
    }

    #[tokio::test]
    async fn should_reject_whitespace_content_without_calling_ai() {
        let mock = MockAiClientSuccess::new(TEN_TAGS);
        let calls = mock.calls.clone();
        let server = server_with(mock);

        let response = server
            .post("/api/hashtags/generate")
            .json(&json!({ "content": "   ", "count": 10 }))
            .await;

        response.assert_status_bad_request();
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn should_reject_malformed_json() {
        let server = server_with(MockAiClientSuccess::new(TEN_TAGS));

        let response = server
            .post("/api/hashtags/generate")
            .text("{ not json")
            .content_type("application/json")
            .await;

        response.assert_status_bad_request();
        response.assert_json_contains(&json!({
            "isSuccess": false,
            "code": "COMMON400"
        }));
    }

    #[tokio::test]
    async fn should_reject_unknown_platform() {
        let server = server_with(MockAiClientSuccess::new(TEN_TAGS));

        let response = server
            .post("/api/hashtags/generate")
            .json(&json!({ "content": "travel", "platform": "MYSPACE" }))
            .await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn should_use_platform_prompt_and_return_tip() {
        // Arrange
        let mock = MockAiClientSuccess::new(TEN_TAGS);
        let prompts = mock.prompts.clone();
        let server = server_with(mock);

        // Act
        let response = server
            .post("/api/hashtags/generate")
            .json(&json!({
                "content": "quarterly hiring update",
                "count": 10,
                "platform": "LINKEDIN",
                "category": "BUSINESS"
            }))
            .await;

        // Assert
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["result"]["platform"], "LINKEDIN");
        assert_eq!(body["result"]["category"], "BUSINESS");
        assert_eq!(
            body["result"]["tip"],
            "LinkedIn performs best with 3-5 hashtags for maximum reach!"
        );

        let prompts = prompts.lock().unwrap();
        assert!(prompts[0].contains("Platform-specific requirements for LinkedIn"));
        assert!(prompts[0].contains("quarterly hiring update"));
    }

    #[tokio::test]
    async fn resubmitting_should_call_ai_again() {
        let mock = MockAiClientSuccess::new(TEN_TAGS);
        let calls = mock.calls.clone();
        let prompts = mock.prompts.clone();
        let server = server_with(mock);
        let request = json!({ "content": "sustainable travel", "count": 10 });

        server.post("/api/hashtags/generate").json(&request).await.assert_status_ok();
        server.post("/api/hashtags/generate").json(&request).await.assert_status_ok();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        let prompts = prompts.lock().unwrap();
        assert_eq!(prompts[0], prompts[1]);
    }
}

mod generate_failures {
    use super::*;

    #[tokio::test]
    async fn missing_credential_should_return_503() {
        // Arrange
        let client = ChatCompletionClient::new(&AiSettings::default());
        let server = server_with(client);

        // Act
        let response = server
            .post("/api/hashtags/generate")
            .json(&json!({ "content": "sustainable travel", "count": 10 }))
            .await;

        // Assert
        response.assert_status(axum::http::StatusCode::SERVICE_UNAVAILABLE);
        response.assert_json_contains(&json!({
            "isSuccess": false,
            "code": "HASHTAG_001"
        }));
        let body: serde_json::Value = response.json();
        assert!(body["message"].as_str().unwrap().contains("GEMINI_API_KEY"));
    }

    #[tokio::test]
    async fn upstream_error_should_return_502_without_details() {
        let server = server_with(MockAiClientError::new(|| {
            AppError::UpstreamError("connection reset by peer".to_string())
        }));

        let response = server
            .post("/api/hashtags/generate")
            .json(&json!({ "content": "sustainable travel", "count": 10 }))
            .await;

        response.assert_status(axum::http::StatusCode::BAD_GATEWAY);
        response.assert_json_contains(&json!({ "code": "HASHTAG_002" }));
        let body: serde_json::Value = response.json();
        assert!(!body["message"]
            .as_str()
            .unwrap()
            .contains("connection reset"));
    }

    #[tokio::test]
    async fn empty_completion_should_return_502() {
        let server = server_with(MockAiClientSuccess::new("   "));

        let response = server
            .post("/api/hashtags/generate")
            .json(&json!({ "content": "sustainable travel", "count": 10 }))
            .await;

        response.assert_status(axum::http::StatusCode::BAD_GATEWAY);
        response.assert_json_contains(&json!({ "code": "HASHTAG_006" }));
    }

    #[tokio::test]
    async fn completion_without_hashtags_should_return_502() {
        let server = server_with(MockAiClientSuccess::new("I cannot help with that."));

        let response = server
            .post("/api/hashtags/generate")
            .json(&json!({ "content": "sustainable travel", "count": 10 }))
            .await;

        response.assert_status(axum::http::StatusCode::BAD_GATEWAY);
        response.assert_json_contains(&json!({ "code": "HASHTAG_002" }));
    }

    #[tokio::test]
    async fn timeout_should_return_504() {
        let server = server_with(MockAiClientError::new(|| AppError::UpstreamTimeout));

        let response = server
            .post("/api/hashtags/generate")
            .json(&json!({ "content": "sustainable travel", "count": 10 }))
            .await;

        response.assert_status(axum::http::StatusCode::GATEWAY_TIMEOUT);
        response.assert_json_contains(&json!({ "code": "HASHTAG_003" }));
    }

    #[tokio::test]
    async fn upstream_rate_limit_should_return_503() {
        let server = server_with(MockAiClientError::new(|| AppError::UpstreamRateLimited));

        let response = server
            .post("/api/hashtags/generate")
            .json(&json!({ "content": "sustainable travel", "count": 10 }))
            .await;

        response.assert_status(axum::http::StatusCode::SERVICE_UNAVAILABLE);
        response.assert_json_contains(&json!({ "code": "HASHTAG_005" }));
    }
}

mod catalog_handler {
    use super::*;

    #[tokio::test]
    async fn should_list_platforms_and_categories() {
        let server = server_with(MockAiClientSuccess::new(TEN_TAGS));

        let response = server.get("/api/hashtags/platforms").await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        let result = &body["result"];
        assert_eq!(result["platforms"].as_array().unwrap().len(), 5);
        assert_eq!(result["categories"].as_array().unwrap().len(), 8);
        assert_eq!(result["minCount"], 5);
        assert_eq!(result["maxCount"], 20);
        assert_eq!(result["defaultCount"], 10);
        assert_eq!(result["platforms"][0]["platform"], "INSTAGRAM");
        assert_eq!(result["platforms"][0]["optimalMin"], 8);
    }
}

mod extract_handler {
    use super::*;

    #[tokio::test]
    async fn should_reject_invalid_url() {
        let server = server_with(MockAiClientSuccess::new(TEN_TAGS));

        let response = server
            .post("/api/hashtags/extract")
            .json(&json!({ "url": "ftp://example.com/file" }))
            .await;

        response.assert_status_bad_request();
        response.assert_json_contains(&json!({ "code": "COMMON400" }));
    }

    #[tokio::test]
    async fn should_reject_private_address() {
        let server = server_with(MockAiClientSuccess::new(TEN_TAGS));

        let response = server
            .post("/api/hashtags/extract")
            .json(&json!({ "url": "http://169.254.169.254/latest/meta-data/" }))
            .await;

        response.assert_status_bad_request();
        response.assert_json_contains(&json!({ "code": "COMMON400" }));
    }

    #[tokio::test]
    async fn should_reject_empty_url() {
        let server = server_with(MockAiClientSuccess::new(TEN_TAGS));

        let response = server
            .post("/api/hashtags/extract")
            .json(&json!({ "url": "" }))
            .await;

        response.assert_status_bad_request();
    }
}

mod health_handler {
    use super::*;

    #[tokio::test]
    async fn should_report_healthy_upstream() {
        let server = server_with(MockAiClientSuccess::new(TEN_TAGS));

        let response = server.get("/health").await;

        response.assert_status_ok();
        response.assert_json_contains(&json!({
            "status": "healthy",
            "version": env!("CARGO_PKG_VERSION"),
            "checks": { "upstream": { "status": true } }
        }));
    }

    #[tokio::test]
    async fn missing_credential_should_be_unhealthy() {
        let server = server_with(ChatCompletionClient::new(&AiSettings::default()));

        let response = server.get("/health").await;

        response.assert_status(axum::http::StatusCode::SERVICE_UNAVAILABLE);
        response.assert_json_contains(&json!({
            "status": "unhealthy",
            "checks": { "upstream": { "status": false } }
        }));
    }
}
