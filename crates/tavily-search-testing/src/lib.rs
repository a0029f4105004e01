// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! In-process stand-in for the Tavily search endpoint.
//!
//! [`MockTavilyServer`] binds an ephemeral localhost port and answers search
//! requests with deterministic results (random relevance scores aside). It
//! records every request it decodes so tests can inspect what the client
//! sent.
//!
//! ```ignore
//! let server = MockTavilyServer::start().await?;
//! let config = ClientConfig::new("key")?.with_base_url(server.url());
//! let client = TavilyClient::new(config)?;
//! let response = client.search("A Pretend Query", None).await?;
//! assert_eq!(server.last_request().unwrap().query, "A Pretend Query");
//! ```

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use axum::{
	body::Bytes,
	extract::State,
	http::{header, Method, StatusCode},
	response::{IntoResponse, Response},
	routing::any,
	Json, Router,
};
use rand::Rng;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use tavily_search::{SearchRequest, SearchResponse, SearchResult};

pub const MOCK_TITLE: &str = "A nice title";
pub const MOCK_URL: &str = "https://github.com/lwileczek/tavily";
pub const MOCK_CONTENT: &str = "Some modified page content";
pub const MOCK_RAW_CONTENT: &str = "<div>Some modified page content</div>";
pub const MOCK_ANSWER: &str = "A valid answer";
pub const MOCK_IMAGE: &str = "https://github.com/lwileczek/tavily/image.png";

/// Body served at [`MockTavilyServer::moved_url`].
pub const MOVED_BODY: &str = "<html>moved</html>";

const MOVED_PATH: &str = "/page";

/// Result count used when a request does not name one.
pub const MOCK_DEFAULT_RESULTS: u32 = 5;

/// How the mock answers the next requests.
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
	/// Decode the request and answer with generated results.
	Echo,
	/// Answer every request with this status and a small JSON error body.
	Status(StatusCode),
	/// Answer every request with 200 and this body verbatim.
	RawBody(String),
	/// Answer every request with `302 Found` pointing at this location.
	Redirect(String),
}

#[derive(Debug)]
struct MockState {
	requests: Mutex<Vec<SearchRequest>>,
	behavior: Mutex<MockBehavior>,
	moved_hits: AtomicUsize,
}

impl MockState {
	fn behavior(&self) -> MockBehavior {
		self
			.behavior
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.clone()
	}

	fn record(&self, request: SearchRequest) {
		self
			.requests
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.push(request);
	}
}

/// A running mock Tavily endpoint. Shuts down when dropped.
pub struct MockTavilyServer {
	addr: SocketAddr,
	state: Arc<MockState>,
	shutdown: Option<oneshot::Sender<()>>,
	handle: JoinHandle<()>,
}

impl MockTavilyServer {
	/// Starts the server on `127.0.0.1` with an OS-assigned port.
	pub async fn start() -> std::io::Result<Self> {
		let state = Arc::new(MockState {
			requests: Mutex::new(Vec::new()),
			behavior: Mutex::new(MockBehavior::Echo),
			moved_hits: AtomicUsize::new(0),
		});

		let app = router(state.clone());
		let listener = TcpListener::bind("127.0.0.1:0").await?;
		let addr = listener.local_addr()?;
		let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

		let handle = tokio::spawn(async move {
			let server = axum::serve(listener, app).with_graceful_shutdown(async {
				let _ = shutdown_rx.await;
			});
			if let Err(e) = server.await {
				warn!(error = %e, "mock Tavily server stopped with error");
			}
		});

		debug!(addr = %addr, "mock Tavily server listening");

		Ok(Self {
			addr,
			state,
			shutdown: Some(shutdown_tx),
			handle,
		})
	}

	/// Returns the search endpoint URL, suitable for
	/// `ClientConfig::with_base_url`.
	pub fn url(&self) -> String {
		format!("http://{}/search", self.addr)
	}

	/// Returns the URL of a page outside the search API, used as a
	/// redirect target.
	pub fn moved_url(&self) -> String {
		format!("http://{}{MOVED_PATH}", self.addr)
	}

	/// Number of requests that reached [`Self::moved_url`].
	pub fn moved_hits(&self) -> usize {
		self.state.moved_hits.load(Ordering::SeqCst)
	}

	pub fn set_behavior(&self, behavior: MockBehavior) {
		*self
			.state
			.behavior
			.lock()
			.unwrap_or_else(PoisonError::into_inner) = behavior;
	}

	/// Makes every following request fail with `status`.
	pub fn respond_with_status(&self, status: StatusCode) {
		self.set_behavior(MockBehavior::Status(status));
	}

	/// Returns every request decoded so far, oldest first.
	pub fn requests(&self) -> Vec<SearchRequest> {
		self
			.state
			.requests
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.clone()
	}

	pub fn last_request(&self) -> Option<SearchRequest> {
		self.requests().pop()
	}
}

impl Drop for MockTavilyServer {
	fn drop(&mut self) {
		if let Some(tx) = self.shutdown.take() {
			let _ = tx.send(());
		}
		self.handle.abort();
	}
}

fn router(state: Arc<MockState>) -> Router {
	Router::new()
		.route("/", any(handle_search))
		.route("/search", any(handle_search))
		.route(MOVED_PATH, any(handle_moved))
		.with_state(state)
}

async fn handle_moved(State(state): State<Arc<MockState>>) -> Response {
	state.moved_hits.fetch_add(1, Ordering::SeqCst);
	(
		StatusCode::OK,
		[(header::CONTENT_TYPE, "text/html")],
		MOVED_BODY,
	)
		.into_response()
}

async fn handle_search(
	State(state): State<Arc<MockState>>,
	method: Method,
	body: Bytes,
) -> Response {
	if method != Method::POST {
		return (
			StatusCode::METHOD_NOT_ALLOWED,
			"Only POST requests are allowed",
		)
			.into_response();
	}

	let behavior = state.behavior();
	match &behavior {
		MockBehavior::Status(status) => {
			let reason = status.canonical_reason().unwrap_or("error");
			return (
				*status,
				Json(serde_json::json!({ "detail": { "error": reason } })),
			)
				.into_response();
		}
		MockBehavior::Redirect(location) => {
			return (StatusCode::FOUND, [(header::LOCATION, location.clone())]).into_response();
		}
		MockBehavior::Echo | MockBehavior::RawBody(_) => {}
	}

	let request: SearchRequest = match serde_json::from_slice(&body) {
		Ok(request) => request,
		Err(e) => {
			return (
				StatusCode::BAD_REQUEST,
				format!("Invalid JSON request: {e}"),
			)
				.into_response();
		}
	};

	debug!(request = ?request, "mock Tavily server received request");
	state.record(request.clone());

	if request.api_key.is_empty() {
		return (StatusCode::UNAUTHORIZED, "Invalid API key").into_response();
	}

	if let MockBehavior::RawBody(body) = behavior {
		return (
			StatusCode::OK,
			[(header::CONTENT_TYPE, "application/json")],
			body,
		)
			.into_response();
	}

	let started = Instant::now();
	let mut response = mock_search(&request);
	response.response_time = started.elapsed().as_secs_f64();

	Json(response).into_response()
}

/// Builds the response the mock returns for `request`.
pub fn mock_search(request: &SearchRequest) -> SearchResponse {
	let mut rng = rand::thread_rng();
	let count = request.max_results.unwrap_or(MOCK_DEFAULT_RESULTS);

	let results = (0..count)
		.map(|_| SearchResult {
			title: MOCK_TITLE.to_string(),
			url: MOCK_URL.to_string(),
			content: MOCK_CONTENT.to_string(),
			raw_content: request
				.include_raw_content
				.then(|| MOCK_RAW_CONTENT.to_string()),
			score: rng.gen::<f64>(),
		})
		.collect();

	SearchResponse {
		answer: request.include_answer.then(|| MOCK_ANSWER.to_string()),
		query: request.query.clone(),
		response_time: 0.0,
		images: if request.include_images {
			vec![MOCK_IMAGE.to_string()]
		} else {
			Vec::new()
		},
		follow_up_questions: Vec::new(),
		results,
	}
}
