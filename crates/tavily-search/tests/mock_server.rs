// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! End-to-end tests against the in-process mock Tavily endpoint.

use std::time::Duration;

use reqwest::StatusCode;
use tavily_search::{
	CancellationToken, ClientConfig, SearchContext, SearchDepth, SearchOptions, TavilyClient,
	TavilyError,
};
use tavily_search_testing::{
	MockBehavior, MockTavilyServer, MOCK_ANSWER, MOCK_RAW_CONTENT, MOCK_TITLE, MOCK_URL,
};

fn client_for(server: &MockTavilyServer) -> TavilyClient {
	let config = ClientConfig::new("A fake API Key")
		.unwrap()
		.with_base_url(server.url());
	TavilyClient::new(config).unwrap()
}

#[tokio::test]
async fn test_basic_search_with_defaults() {
	let server = MockTavilyServer::start().await.unwrap();
	let client = client_for(&server);

	let response = client.search("A Pretend Query", None).await.unwrap();

	assert_eq!(response.query, "A Pretend Query");
	assert_eq!(response.results.len(), 1);
	assert_eq!(response.results[0].title, MOCK_TITLE);
	assert_eq!(response.results[0].url, MOCK_URL);
	assert_eq!(response.results[0].raw_content, None);
	assert_eq!(response.answer, None);

	let sent = server.last_request().unwrap();
	assert_eq!(sent.api_key, "A fake API Key");
	assert_eq!(sent.search_depth, Some(SearchDepth::Basic));
	assert_eq!(sent.max_results, Some(1));
	assert!(!sent.include_answer);
}

#[tokio::test]
async fn test_config_changes_reach_the_wire() {
	let server = MockTavilyServer::start().await.unwrap();
	let mut config = ClientConfig::new("key").unwrap().with_base_url(server.url());
	config.set_search_depth("advanced").unwrap();
	config.set_max_results(3);
	assert!(config.set_search_depth("fast").is_err());
	config.set_max_results(0);
	let client = TavilyClient::new(config).unwrap();

	let response = client.search("rust", None).await.unwrap();
	assert_eq!(response.results.len(), 3);

	let sent = server.last_request().unwrap();
	assert_eq!(sent.search_depth, Some(SearchDepth::Advanced));
	assert_eq!(sent.max_results, Some(3));
}

#[tokio::test]
async fn test_overrides_round_trip_through_server() {
	let server = MockTavilyServer::start().await.unwrap();
	let client = client_for(&server);

	let options = SearchOptions::new()
		.with_search_depth(SearchDepth::Advanced)
		.with_images(true)
		.with_answer(true)
		.with_raw_content(true)
		.with_max_results(2)
		.with_include_domains(["docs.rs", "crates.io"])
		.with_exclude_domains(["example.com"]);

	let response = client.search("serde flatten", Some(options)).await.unwrap();

	let sent = server.last_request().unwrap();
	assert_eq!(sent.query, "serde flatten");
	assert_eq!(sent.search_depth, Some(SearchDepth::Advanced));
	assert!(sent.include_images);
	assert!(sent.include_answer);
	assert!(sent.include_raw_content);
	assert_eq!(sent.max_results, Some(2));
	assert_eq!(sent.include_domains, vec!["docs.rs", "crates.io"]);
	assert_eq!(sent.exclude_domains, vec!["example.com"]);

	assert_eq!(response.results.len(), 2);
	assert_eq!(response.answer.as_deref(), Some(MOCK_ANSWER));
	assert_eq!(response.images.len(), 1);
	assert!(response
		.results
		.iter()
		.all(|r| r.raw_content.as_deref() == Some(MOCK_RAW_CONTENT)));
}

#[tokio::test]
async fn test_qna_search_returns_answer() {
	let server = MockTavilyServer::start().await.unwrap();
	let client = client_for(&server);

	let answer = client
		.qna_search("Where does Messi play right now?", None)
		.await
		.unwrap();
	assert_eq!(answer, MOCK_ANSWER);

	let sent = server.last_request().unwrap();
	assert!(sent.include_answer);
	assert_eq!(sent.search_depth, Some(SearchDepth::Advanced));
}

#[tokio::test]
async fn test_qna_search_honors_depth_override_only() {
	let server = MockTavilyServer::start().await.unwrap();
	let client = client_for(&server);

	let options = SearchOptions::new()
		.with_search_depth(SearchDepth::Basic)
		.with_answer(false)
		.with_max_results(4);
	let answer = client.qna_search("query", Some(options)).await.unwrap();
	assert_eq!(answer, MOCK_ANSWER);

	let sent = server.last_request().unwrap();
	assert!(sent.include_answer);
	assert_eq!(sent.search_depth, Some(SearchDepth::Basic));
	assert_eq!(sent.max_results, Some(4));
}

#[tokio::test]
async fn test_qna_search_empty_answer() {
	let server = MockTavilyServer::start().await.unwrap();
	server.set_behavior(MockBehavior::RawBody(
		r#"{"query": "q", "response_time": 0.1, "results": []}"#.to_string(),
	));
	let client = client_for(&server);

	let answer = client.qna_search("q", None).await.unwrap();
	assert_eq!(answer, "");
}

#[tokio::test]
async fn test_search_with_depth() {
	let server = MockTavilyServer::start().await.unwrap();
	let client = client_for(&server);

	let response = client.search_with_depth("query", "advanced").await.unwrap();
	assert_eq!(response.answer.as_deref(), Some(MOCK_ANSWER));

	let sent = server.last_request().unwrap();
	assert_eq!(sent.search_depth, Some(SearchDepth::Advanced));
	assert!(sent.include_answer);
	assert_eq!(sent.max_results, Some(1));
}

#[tokio::test]
async fn test_search_with_depth_rejects_unknown_without_request() {
	let server = MockTavilyServer::start().await.unwrap();
	let client = client_for(&server);

	let result = client.search_with_depth("query", "Advanced").await;
	assert!(matches!(result, Err(TavilyError::InvalidDepth(_))));
	assert!(server.requests().is_empty());
}

#[tokio::test]
async fn test_search_with_result_count() {
	let server = MockTavilyServer::start().await.unwrap();
	let client = client_for(&server);

	let response = client.search_with_result_count("query", 4).await.unwrap();
	assert_eq!(response.results.len(), 4);

	let response = client.search_with_result_count("query", 0).await.unwrap();
	assert_eq!(response.results.len(), 1);
}

#[tokio::test]
async fn test_search_with_domain_filters() {
	let server = MockTavilyServer::start().await.unwrap();
	let client = client_for(&server);

	client
		.search_with_domain_filters("query", ["tokio.rs"], ["reddit.com", "x.com"])
		.await
		.unwrap();

	let sent = server.last_request().unwrap();
	assert_eq!(sent.include_domains, vec!["tokio.rs"]);
	assert_eq!(sent.exclude_domains, vec!["reddit.com", "x.com"]);
	assert_eq!(sent.search_depth, Some(SearchDepth::Basic));
}

#[tokio::test]
async fn test_unauthorized_message() {
	let server = MockTavilyServer::start().await.unwrap();
	server.respond_with_status(StatusCode::UNAUTHORIZED);
	let client = client_for(&server);

	let err = client.search("query", None).await.unwrap_err();
	assert_eq!(err.to_string(), "Your API key is wrong");
	assert_eq!(err.status(), Some(401));
}

#[tokio::test]
async fn test_rate_limited_message() {
	let server = MockTavilyServer::start().await.unwrap();
	server.respond_with_status(StatusCode::TOO_MANY_REQUESTS);
	let client = client_for(&server);

	let err = client.qna_search("query", None).await.unwrap_err();
	assert_eq!(
		err.to_string(),
		"You're requesting too many results; Slow down!"
	);
}

#[tokio::test]
async fn test_unlisted_status_is_remote_error() {
	let server = MockTavilyServer::start().await.unwrap();
	server.respond_with_status(StatusCode::IM_A_TEAPOT);
	let client = client_for(&server);

	let err = client.search("query", None).await.unwrap_err();
	assert!(matches!(err, TavilyError::Remote { status: 418, .. }));
}

#[tokio::test]
async fn test_redirect_is_not_followed() {
	let server = MockTavilyServer::start().await.unwrap();
	server.set_behavior(MockBehavior::Redirect(server.moved_url()));
	let client = client_for(&server);

	let err = client.search("query", None).await.unwrap_err();
	assert!(matches!(err, TavilyError::Remote { status: 302, .. }));
	assert_eq!(err.to_string(), "Unexpected response status: 302");
	assert_eq!(server.moved_hits(), 0);

	let err = client.qna_search("query", None).await.unwrap_err();
	assert_eq!(err.status(), Some(302));
	assert_eq!(server.moved_hits(), 0);
}

#[tokio::test]
async fn test_malformed_body_is_decoding_error() {
	let server = MockTavilyServer::start().await.unwrap();
	server.set_behavior(MockBehavior::RawBody("<html>oops</html>".to_string()));
	let client = client_for(&server);

	let err = client.search("query", None).await.unwrap_err();
	assert!(matches!(err, TavilyError::Decoding(_)));
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
	let server = MockTavilyServer::start().await.unwrap();
	let client = client_for(&server);
	drop(server);
	tokio::time::sleep(Duration::from_millis(50)).await;

	let err = client.search("query", None).await.unwrap_err();
	assert!(matches!(err, TavilyError::Transport(_)));
}

#[tokio::test]
async fn test_transport_timeout() {
	let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
	let addr = listener.local_addr().unwrap();
	let hold = tokio::spawn(async move {
		let mut held = Vec::new();
		while let Ok((socket, _)) = listener.accept().await {
			held.push(socket);
		}
	});

	let config = ClientConfig::new("key")
		.unwrap()
		.with_base_url(format!("http://{addr}/search"))
		.with_timeout(Duration::from_millis(200));
	let client = TavilyClient::new(config).unwrap();

	let err = client.search("query", None).await.unwrap_err();
	assert!(matches!(err, TavilyError::Transport(_)));
	assert!(err.is_timeout());

	hold.abort();
}

#[tokio::test]
async fn test_cancelled_context() {
	let server = MockTavilyServer::start().await.unwrap();
	let client = client_for(&server);
	let token = CancellationToken::new();
	token.cancel();

	let result = client
		.scoped(SearchContext::background().with_cancellation(token))
		.search("query", None)
		.await;
	assert!(matches!(result, Err(TavilyError::Cancelled)));
	assert!(server.requests().is_empty());
}

#[tokio::test]
async fn test_scoped_search_with_generous_deadline() {
	let server = MockTavilyServer::start().await.unwrap();
	let client = client_for(&server);

	let scoped = client.scoped(SearchContext::background().with_timeout(Duration::from_secs(30)));
	let answer = scoped.qna_search("query", None).await.unwrap();
	assert_eq!(answer, MOCK_ANSWER);
}

#[tokio::test]
async fn test_concurrent_searches_share_client() {
	let server = MockTavilyServer::start().await.unwrap();
	let client = client_for(&server);

	let handles: Vec<_> = (0..5)
		.map(|i| {
			let client = client.clone();
			tokio::spawn(async move { client.search(&format!("query {i}"), None).await })
		})
		.collect();

	for handle in handles {
		let response = handle.await.unwrap().unwrap();
		assert_eq!(response.results.len(), 1);
	}
	assert_eq!(server.requests().len(), 5);
}
