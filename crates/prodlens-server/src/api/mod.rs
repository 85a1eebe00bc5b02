mod products;

use std::sync::Arc;

use axum::{
    extract::rejection::JsonRejection,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use prodlens_client::{ClientError, PerplexityClient};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::request_id;

#[derive(Clone)]
pub struct AppState {
    pub perplexity: Arc<PerplexityClient>,
}

/// Error response in the `{"detail": "..."}` shape the product client reads.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    detail: &'a str,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct RootMessage {
    message: &'static str,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, detail)
    }

    /// Maps a malformed or missing JSON body to 422, matching validation
    /// failures elsewhere in the API.
    pub fn from_rejection(request_id: &str, rejection: &JsonRejection) -> Self {
        tracing::debug!(request_id, error = %rejection, "rejected request body");
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (
            self.status,
            Json(ErrorBody {
                detail: &self.detail,
            }),
        )
            .into_response()
    }
}

/// Translates a provider failure into an HTTP error.
///
/// Upstream statuses pass through, transport failures become 502 (504 on
/// timeout), and anything left over is a 500.
pub(super) fn map_client_error(request_id: &str, error: ClientError) -> ApiError {
    let mapped = match &error {
        ClientError::Validation(message) => ApiError::bad_request(message.clone()),
        ClientError::Provider { status, message } => ApiError::new(
            StatusCode::from_u16(*status)
                .ok()
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::BAD_GATEWAY),
            message.clone(),
        ),
        ClientError::Http(e) if e.is_timeout() => ApiError::new(
            StatusCode::GATEWAY_TIMEOUT,
            "Perplexity API request timed out",
        ),
        ClientError::Http(_) => {
            ApiError::new(StatusCode::BAD_GATEWAY, "Perplexity API is unreachable")
        }
        ClientError::Deserialize { .. } => ApiError::new(
            StatusCode::BAD_GATEWAY,
            "Perplexity API returned an unreadable response",
        ),
        ClientError::MissingApiKey | ClientError::InvalidBaseUrl { .. } => ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "server is misconfigured",
        ),
    };

    if mapped.status.is_server_error() {
        tracing::error!(request_id, error = %error, status = mapped.status.as_u16(), "provider call failed");
    } else {
        tracing::warn!(request_id, error = %error, status = mapped.status.as_u16(), "provider call rejected");
    }
    mapped
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-request-id"),
        ])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/compare", post(products::compare_products))
        .route("/api/find", post(products::find_products))
        .route("/api/updates", post(products::get_product_updates))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn root() -> impl IntoResponse {
    Json(RootMessage {
        message: "Product Analyzer API is running",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;
    use wiremock::matchers::{header as header_matcher, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_app(server: &MockServer) -> Router {
        let client = PerplexityClient::with_url(
            "pplx-test-key",
            5,
            &format!("{}/chat/completions", server.uri()),
        )
        .expect("client construction should not fail");
        build_app(AppState {
            perplexity: Arc::new(client),
        })
    }

    fn post_json(uri: &str, body: &serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        serde_json::from_slice(&body).expect("json parse")
    }

    async fn mount_answer(server: &MockServer, content: &str) {
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header_matcher("authorization", "Bearer pplx-test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": content}}]
            })))
            .mount(server)
            .await;
    }

    #[test]
    fn bad_request_maps_to_400() {
        let response = ApiError::bad_request("criteria is required").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn provider_status_passes_through() {
        let err = map_client_error(
            "req-1",
            ClientError::Provider {
                status: 429,
                message: "Perplexity API error: rate limited".into(),
            },
        );
        assert_eq!(err.status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(err.detail, "Perplexity API error: rate limited");
    }

    #[test]
    fn out_of_range_provider_status_becomes_bad_gateway() {
        let err = map_client_error(
            "req-1",
            ClientError::Provider {
                status: 200,
                message: "odd".into(),
            },
        );
        assert_eq!(err.status, StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn root_reports_running() {
        let server = MockServer::start().await;
        let response = test_app(&server)
            .oneshot(Request::builder().uri("/").body(Body::empty()).expect("request"))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"message": "Product Analyzer API is running"})
        );
    }

    #[tokio::test]
    async fn request_id_is_echoed() {
        let server = MockServer::start().await;
        let response = test_app(&server)
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header("x-request-id", "abc-123")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(
            response.headers().get("x-request-id").and_then(|v| v.to_str().ok()),
            Some("abc-123")
        );
    }

    #[tokio::test]
    async fn find_returns_extracted_products() {
        let server = MockServer::start().await;
        mount_answer(
            &server,
            "```json\n[{\"id\": 1, \"name\": \"SoundMax\", \"price\": \"$249-$299\"}]\n```",
        )
        .await;

        let response = test_app(&server)
            .oneshot(post_json(
                "/api/find",
                &serde_json::json!({"criteria": "headphones"}),
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json[0]["id"], "1");
        assert_eq!(json[0]["name"], "SoundMax");
    }

    #[tokio::test]
    async fn compare_with_prose_answer_is_unprocessable() {
        let server = MockServer::start().await;
        mount_answer(&server, "Both phones are great.").await;

        let response = test_app(&server)
            .oneshot(post_json(
                "/api/compare",
                &serde_json::json!({"product1": "A", "product2": "B"}),
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"detail": "Could not parse structured data"})
        );
    }

    #[tokio::test]
    async fn blank_category_is_bad_request_without_upstream_call() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let response = test_app(&server)
            .oneshot(post_json(
                "/api/updates",
                &serde_json::json!({"category": "  "}),
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_field_is_unprocessable() {
        let server = MockServer::start().await;
        let response = test_app(&server)
            .oneshot(post_json("/api/compare", &serde_json::json!({"product1": "A"})))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = body_json(response).await;
        assert!(json["detail"].is_string());
    }

    #[tokio::test]
    async fn upstream_error_status_is_forwarded() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "error": {"message": "Invalid API key"}
            })))
            .mount(&server)
            .await;

        let response = test_app(&server)
            .oneshot(post_json(
                "/api/updates",
                &serde_json::json!({"category": "Audio"}),
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"detail": "Perplexity API error: Invalid API key"})
        );
    }
}
