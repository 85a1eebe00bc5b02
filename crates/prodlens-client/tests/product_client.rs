//! Integration tests for `ProductClient` using wiremock HTTP mocks.

use prodlens_client::{ClientError, ErrorKind, Operation, PerplexityClient, ProductClient};
use prodlens_core::{PriceRange, ProductFilters};
use wiremock::matchers::{body_json, body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn backend_client(server: &MockServer) -> ProductClient {
    ProductClient::with_base_url(&format!("{}/api", server.uri()), 30)
        .expect("client construction should not fail")
}

fn perplexity_client(server: &MockServer) -> ProductClient {
    let client = PerplexityClient::with_url(
        "pplx-test-key",
        30,
        &format!("{}/chat/completions", server.uri()),
    )
    .expect("client construction should not fail");
    ProductClient::perplexity(client)
}

fn chat_answer(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-1",
        "model": "sonar",
        "choices": [
            {"index": 0, "message": {"role": "assistant", "content": content}}
        ]
    })
}

// ---------------------------------------------------------------------------
// Backend proxy mode
// ---------------------------------------------------------------------------

#[tokio::test]
async fn find_posts_criteria_and_normalizes_products() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/find"))
        .and(body_json(serde_json::json!({
            "criteria": "headphones with price range $0-$500"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "id": 1,
                "name": "SoundMax Wireless Headphones",
                "price": "$249-$299",
                "category": "Audio",
                "brand": "SoundMax",
                "rating": 4.4
            },
            {
                "id": 2,
                "name": "Studio Reference Headphones",
                "price": "$1200",
                "category": "Audio",
                "brand": "PhotoPro"
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = backend_client(&server);
    let products = client
        .find("headphones with price range $0-$500")
        .await
        .expect("should find products");

    assert_eq!(products.len(), 2);
    assert_eq!(products[0].id, "1");
    assert_eq!(products[1].rating, None);
    assert_eq!(products[1].release_date, "N/A");

    let filters = ProductFilters {
        price_range: PriceRange::new(0, 500).unwrap(),
        ..ProductFilters::default()
    };
    let kept = filters.apply(products);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].price, "$249-$299");
}

#[tokio::test]
async fn provider_detail_becomes_notification_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/find"))
        .respond_with(ResponseTemplate::new(422).set_body_json(serde_json::json!({
            "detail": "Failed to parse product data from API response"
        })))
        .mount(&server)
        .await;

    let err = backend_client(&server)
        .find("headphones")
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Provider { status: 422, .. }));
    assert_eq!(err.kind(), ErrorKind::Provider);
    assert_eq!(
        err.notification(Operation::Find),
        "Failed to parse product data from API response"
    );
}

#[tokio::test]
async fn provider_error_without_body_uses_generic_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/updates"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = backend_client(&server)
        .get_updates("Audio")
        .await
        .unwrap_err();

    assert_eq!(
        err.notification(Operation::Updates),
        "Failed to get product updates. Please try again."
    );
}

#[tokio::test]
async fn closed_port_is_a_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let client = ProductClient::with_base_url(&format!("http://{addr}/api"), 5)
        .expect("client construction should not fail");
    let err = client.compare("A", "B").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Network);
    assert_eq!(
        err.notification(Operation::Compare),
        "Failed to compare products. Check your connection and try again."
    );
}

#[tokio::test]
async fn blank_input_sends_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let client = backend_client(&server);
    assert!(matches!(
        client.compare("", "Galaxy S21").await,
        Err(ClientError::Validation(_))
    ));
    assert!(matches!(
        client.find("   ").await,
        Err(ClientError::Validation(_))
    ));
}

#[tokio::test]
async fn compare_without_metrics_has_empty_metrics() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/compare"))
        .and(body_json(serde_json::json!({"product1": "A", "product2": "B"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "product1": {"name": "A", "pros": ["Cheap"]},
            "product2": {"name": "B"}
        })))
        .mount(&server)
        .await;

    let result = backend_client(&server)
        .compare("A", "B")
        .await
        .expect("should compare");

    assert!(!result.has_metrics());
    assert_eq!(result.product1.pros, vec!["Cheap"]);
    assert!(result.product2.cons.is_empty());
}

#[tokio::test]
async fn updates_accept_wrapped_single_record() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/updates"))
        .and(body_json(serde_json::json!({"category": "Audio"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "updates": [{"id": "u1", "productName": "Earbuds 3", "updateType": "Price Change"}]
        })))
        .mount(&server)
        .await;

    let updates = backend_client(&server)
        .get_updates("Audio")
        .await
        .expect("should load updates");

    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].category, "Audio");
    assert_eq!(updates[0].update_type.to_string(), "Price Change");
}

// ---------------------------------------------------------------------------
// Direct Perplexity mode
// ---------------------------------------------------------------------------

#[tokio::test]
async fn perplexity_fenced_answer_is_extracted() {
    let server = MockServer::start().await;

    let content = "Here are the best matches:\n```json\n[\
        {\"id\": 1, \"name\": \"SoundMax Wireless Headphones\", \"price\": \"$249-$299\"},\
        {\"id\": 2, \"name\": \"FitTrack Smart Watch\", \"price\": \"$199-$249\"}\
    ]\n```\nLet me know if you need more.";

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer pplx-test-key"))
        .and(body_partial_json(serde_json::json!({
            "model": "sonar",
            "max_tokens": 1000,
            "search_recency_filter": "month"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_answer(content)))
        .expect(1)
        .mount(&server)
        .await;

    let products = perplexity_client(&server)
        .find("wireless audio")
        .await
        .expect("should parse fenced answer");

    assert_eq!(products.len(), 2);
    assert_eq!(products[1].id, "2");
    assert_eq!(products[1].name, "FitTrack Smart Watch");
}

#[tokio::test]
async fn perplexity_prose_answer_is_unparsable() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(chat_answer("I could not find any matching products.")),
        )
        .mount(&server)
        .await;

    let err = perplexity_client(&server)
        .compare("A", "B")
        .await
        .unwrap_err();

    match err {
        ClientError::Provider { status, message } => {
            assert_eq!(status, 422);
            assert_eq!(message, "Could not parse structured data");
        }
        other => panic!("expected provider error, got {other:?}"),
    }
}

#[tokio::test]
async fn perplexity_scalar_answer_is_unparsable() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_answer("\"5\"")))
        .expect(2)
        .mount(&server)
        .await;

    let client = perplexity_client(&server);
    let err = client.find("headphones").await.unwrap_err();
    match err {
        ClientError::Provider { status, message } => {
            assert_eq!(status, 422);
            assert_eq!(message, "Failed to parse product data from API response");
        }
        other => panic!("expected provider error, got {other:?}"),
    }

    let err = client.get_updates("Audio").await.unwrap_err();
    match err {
        ClientError::Provider { status, message } => {
            assert_eq!(status, 422);
            assert_eq!(message, "Failed to parse product updates from API response");
        }
        other => panic!("expected provider error, got {other:?}"),
    }
}

#[tokio::test]
async fn perplexity_error_message_is_surfaced() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": {"message": "Invalid API key", "type": "invalid_request_error"}
        })))
        .mount(&server)
        .await;

    let err = perplexity_client(&server)
        .get_updates("Audio")
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Provider { status: 401, .. }));
    assert_eq!(
        err.notification(Operation::Updates),
        "Perplexity API error: Invalid API key"
    );
}

#[test]
fn perplexity_mode_without_key_is_rejected() {
    let err = PerplexityClient::with_url("", 30, "https://api.perplexity.ai/chat/completions")
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "API key not found. Please set your Perplexity API key first."
    );
}
