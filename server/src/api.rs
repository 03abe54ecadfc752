//! HTTP presentation layer - the orchestrate endpoint and its envelopes
//!
//! One route, permissive CORS, JSON in and out. Per-provider failures are
//! flattened into `"Error: ..."` strings inside the success envelope; only
//! input and internal faults surface as top-level error responses.

use axum::{
    Json, Router,
    extract::State,
    http::{Method, StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use council_application::{RunCouncilError, RunCouncilInput, RunCouncilUseCase};
use council_domain::{ApiKeySet, CouncilOutcome, Provider, ProviderAnswer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::error;

/// Shared handler state: the single use case behind the endpoint.
pub struct AppState {
    pub run_council: RunCouncilUseCase,
}

/// Build the application router.
///
/// CORS mirrors the public-facing deployment: any origin, POST plus
/// preflight OPTIONS, `Content-Type` allowed. Non-POST requests to the
/// endpoint get a JSON 405.
pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route(
            "/api/orchestrate",
            post(orchestrate).fallback(method_not_allowed),
        )
        .layer(cors)
        .with_state(state)
}

/// Incoming request body. Both fields are required; individual key fields
/// default to empty strings and flow through to the adapters unchecked.
#[derive(Debug, Deserialize)]
pub struct OrchestrateRequest {
    #[serde(default)]
    problem: Option<String>,
    #[serde(rename = "apiKeys", default)]
    api_keys: Option<ApiKeysBody>,
}

/// The `apiKeys` object is keyed by upstream service name, while the
/// response `responses` object is keyed by council slot.
#[derive(Default, Deserialize)]
pub struct ApiKeysBody {
    #[serde(default)]
    openai: String,
    #[serde(default)]
    anthropic: String,
    #[serde(default)]
    google: String,
    #[serde(default)]
    perplexity: String,
}

// Raw keys pass through this body; Debug reports slot presence only.
impl fmt::Debug for ApiKeysBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeysBody")
            .field("openai", &key_state(&self.openai))
            .field("anthropic", &key_state(&self.anthropic))
            .field("google", &key_state(&self.google))
            .field("perplexity", &key_state(&self.perplexity))
            .finish()
    }
}

fn key_state(key: &str) -> &'static str {
    if key.is_empty() { "unset" } else { "set" }
}

/// Success envelope: one string per council slot, always all four.
#[derive(Debug, Serialize)]
pub struct OrchestrateResponse {
    success: bool,
    responses: SlotResponses,
}

#[derive(Debug, Serialize)]
struct SlotResponses {
    gpt4: String,
    claude: String,
    gemini: String,
    perplexity: String,
}

impl OrchestrateResponse {
    fn from_outcome(outcome: &CouncilOutcome) -> Self {
        Self {
            success: true,
            responses: SlotResponses {
                gpt4: slot_text(outcome, Provider::Gpt4),
                claude: slot_text(outcome, Provider::Claude),
                gemini: slot_text(outcome, Provider::Gemini),
                perplexity: slot_text(outcome, Provider::Perplexity),
            },
        }
    }
}

fn slot_text(outcome: &CouncilOutcome, provider: Provider) -> String {
    match outcome.answer(provider) {
        Some(ProviderAnswer::Success { text }) => text.clone(),
        Some(ProviderAnswer::Failure { message }) => format!("Error: {message}"),
        None => format!("Error: {} unavailable", provider.service_name()),
    }
}

async fn orchestrate(
    State(state): State<Arc<AppState>>,
    Json(request): Json<OrchestrateRequest>,
) -> Result<Json<OrchestrateResponse>, ApiError> {
    let (problem, keys) = match (request.problem, request.api_keys) {
        (Some(problem), Some(keys)) => (problem, keys),
        _ => return Err(ApiError::missing_input()),
    };

    let keys = ApiKeySet::new(keys.openai, keys.anthropic, keys.google, keys.perplexity);

    let outcome = state
        .run_council
        .execute(RunCouncilInput::new(problem, keys))
        .await?;

    Ok(Json(OrchestrateResponse::from_outcome(&outcome)))
}

async fn method_not_allowed() -> ApiError {
    ApiError {
        status: StatusCode::METHOD_NOT_ALLOWED,
        message: "Method not allowed".to_string(),
    }
}

/// Top-level error envelope, `{"error": "..."}` with a matching status.
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn missing_input() -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: RunCouncilError::MissingInput.to_string(),
        }
    }
}

impl From<RunCouncilError> for ApiError {
    fn from(e: RunCouncilError) -> Self {
        let status = match e {
            RunCouncilError::MissingInput => StatusCode::BAD_REQUEST,
            RunCouncilError::NoProviders => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: e.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!("Orchestration error: {}", self.message);
        }
        (self.status, Json(ErrorResponse { error: self.message })).into_response()
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use council_application::ports::provider_gateway::{GatewayError, ProviderGateway};
    use council_domain::Problem;
    use serde_json::{Value, json};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::ServiceExt;

    // ==================== Test Mocks ====================

    struct StubGateway {
        provider: Provider,
        reply: Result<String, GatewayError>,
        calls: Arc<AtomicUsize>,
    }

    impl StubGateway {
        fn answering(provider: Provider, text: &str) -> Self {
            Self {
                provider,
                reply: Ok(text.to_string()),
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn failing(provider: Provider, error: GatewayError) -> Self {
            Self {
                provider,
                reply: Err(error),
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn call_counter(&self) -> Arc<AtomicUsize> {
            Arc::clone(&self.calls)
        }
    }

    #[async_trait]
    impl ProviderGateway for StubGateway {
        fn provider(&self) -> Provider {
            self.provider
        }

        async fn complete(
            &self,
            _problem: &Problem,
            _api_key: &str,
        ) -> Result<String, GatewayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply.clone()
        }
    }

    fn test_app(gateways: Vec<Arc<dyn ProviderGateway>>) -> Router {
        app(Arc::new(AppState {
            run_council: RunCouncilUseCase::new(gateways),
        }))
    }

    fn full_roster() -> Vec<Arc<dyn ProviderGateway>> {
        vec![
            Arc::new(StubGateway::answering(Provider::Gpt4, "Yes")),
            Arc::new(StubGateway::answering(Provider::Claude, "No")),
            Arc::new(StubGateway::answering(Provider::Gemini, "Maybe")),
            Arc::new(StubGateway::answering(Provider::Perplexity, "Yes")),
        ]
    }

    fn post_request(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/orchestrate")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn read_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn valid_body() -> Value {
        json!({
            "problem": "Should I take the job offer?",
            "apiKeys": {
                "openai": "sk-a",
                "anthropic": "sk-b",
                "google": "sk-c",
                "perplexity": "sk-d"
            }
        })
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_orchestrate_returns_every_slot() {
        let response = test_app(full_roster())
            .oneshot(post_request(valid_body()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(
            body,
            json!({
                "success": true,
                "responses": {
                    "gpt4": "Yes",
                    "claude": "No",
                    "gemini": "Maybe",
                    "perplexity": "Yes"
                }
            })
        );
    }

    #[tokio::test]
    async fn test_failed_slot_is_flattened_to_an_error_string() {
        let response = test_app(vec![
            Arc::new(StubGateway::answering(Provider::Gpt4, "Yes")),
            Arc::new(StubGateway::failing(
                Provider::Claude,
                GatewayError::rejected(Provider::Claude, "invalid x-api-key"),
            )),
            Arc::new(StubGateway::answering(Provider::Gemini, "Maybe")),
            Arc::new(StubGateway::answering(Provider::Perplexity, "Yes")),
        ])
        .oneshot(post_request(valid_body()))
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["success"], json!(true));
        assert_eq!(
            body["responses"]["claude"],
            json!("Error: Anthropic error: invalid x-api-key")
        );
        assert_eq!(body["responses"]["gpt4"], json!("Yes"));
    }

    #[tokio::test]
    async fn test_missing_problem_is_rejected_without_upstream_calls() {
        let gpt4 = StubGateway::answering(Provider::Gpt4, "Yes");
        let calls = gpt4.call_counter();

        let response = test_app(vec![Arc::new(gpt4)])
            .oneshot(post_request(json!({ "apiKeys": {} })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = read_json(response).await;
        assert_eq!(body, json!({ "error": "Missing problem or API keys" }));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_api_keys_object_is_rejected() {
        let response = test_app(full_roster())
            .oneshot(post_request(json!({ "problem": "Should I?" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = read_json(response).await;
        assert_eq!(body, json!({ "error": "Missing problem or API keys" }));
    }

    #[tokio::test]
    async fn test_empty_roster_surfaces_as_internal_error() {
        let response = test_app(vec![])
            .oneshot(post_request(valid_body()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = read_json(response).await;
        assert_eq!(body, json!({ "error": "No providers configured" }));
    }

    #[tokio::test]
    async fn test_partial_api_keys_default_to_empty_and_still_run() {
        // Absent key fields are not an input error; they surface upstream.
        let response = test_app(full_roster())
            .oneshot(post_request(json!({
                "problem": "Should I take the job offer?",
                "apiKeys": { "openai": "sk-a" }
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["responses"]["claude"], json!("No"));
    }

    #[tokio::test]
    async fn test_get_is_method_not_allowed() {
        let request = Request::builder()
            .method("GET")
            .uri("/api/orchestrate")
            .body(Body::empty())
            .unwrap();

        let response = test_app(full_roster()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        let body = read_json(response).await;
        assert_eq!(body, json!({ "error": "Method not allowed" }));
    }

    #[tokio::test]
    async fn test_preflight_options_is_answered_directly() {
        let request = Request::builder()
            .method("OPTIONS")
            .uri("/api/orchestrate")
            .header(header::ORIGIN, "https://example.com")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap();

        let response = test_app(full_roster()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let allowed = response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_METHODS)
            .map(|v| v.to_str().unwrap().to_string())
            .unwrap_or_default();
        assert!(allowed.contains("POST"));
    }

    #[tokio::test]
    async fn test_cors_headers_allow_any_origin() {
        let mut request = post_request(valid_body());
        request
            .headers_mut()
            .insert(header::ORIGIN, "https://example.com".parse().unwrap());

        let response = test_app(full_roster()).oneshot(request).await.unwrap();

        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .map(|v| v.to_str().unwrap()),
            Some("*")
        );
    }

    #[test]
    fn test_request_debug_never_prints_key_material() {
        let request: OrchestrateRequest = serde_json::from_value(json!({
            "problem": "Should I take the job offer?",
            "apiKeys": { "openai": "sk-secret-openai", "google": "g-secret" }
        }))
        .unwrap();

        let debug = format!("{:?}", request);
        assert!(!debug.contains("secret"));
        assert!(debug.contains("openai: \"set\""));
        assert!(debug.contains("anthropic: \"unset\""));
    }
}
