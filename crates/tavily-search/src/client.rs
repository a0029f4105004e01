// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Tavily search API client implementation.

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::{debug, instrument, trace};

use crate::config::ClientConfig;
use crate::context::SearchContext;
use crate::depth::SearchDepth;
use crate::error::{Result, TavilyError};
use crate::types::{SearchOptions, SearchRequest, SearchResponse};

/// Client for the Tavily search API.
///
/// Each call sends exactly one request; there is no retry. Cloning is cheap
/// and clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct TavilyClient {
	http_client: Client,
	config: ClientConfig,
}

impl TavilyClient {
	/// Creates a client from `config`. The config is fixed for the lifetime
	/// of the client.
	pub fn new(config: ClientConfig) -> Result<Self> {
		let http_client = crate::http::new_client_with_timeout(config.timeout())?;

		debug!(
			base_url = %config.base_url(),
			max_results = config.max_results(),
			search_depth = %config.search_depth(),
			timeout_ms = config.timeout().as_millis() as u64,
			"Initialized Tavily client"
		);

		Ok(Self {
			http_client,
			config,
		})
	}

	/// Creates a client configured from the environment. See
	/// [`ClientConfig::from_env`].
	pub fn from_env() -> Result<Self> {
		Self::new(ClientConfig::from_env()?)
	}

	pub fn config(&self) -> &ClientConfig {
		&self.config
	}

	/// Returns the configuration so it can be changed and a new client built.
	pub fn into_config(self) -> ClientConfig {
		self.config
	}

	/// Returns a view of this client whose calls honor `ctx`.
	pub fn scoped(&self, ctx: SearchContext) -> ScopedClient<'_> {
		ScopedClient { client: self, ctx }
	}

	/// Searches with the client defaults, overlaid by `options` when given.
	pub async fn search(&self, query: &str, options: Option<SearchOptions>) -> Result<SearchResponse> {
		self
			.scoped(SearchContext::background())
			.search(query, options)
			.await
	}

	/// Asks a question and returns only the generated answer.
	///
	/// Runs an advanced search with answers enabled unless `options`
	/// overrides the depth. Only depth, result count and domain filters are
	/// taken from `options`.
	pub async fn qna_search(&self, query: &str, options: Option<SearchOptions>) -> Result<String> {
		self
			.scoped(SearchContext::background())
			.qna_search(query, options)
			.await
	}

	/// Searches at the named depth with answers enabled.
	pub async fn search_with_depth(&self, query: &str, depth: &str) -> Result<SearchResponse> {
		self
			.scoped(SearchContext::background())
			.search_with_depth(query, depth)
			.await
	}

	/// Searches for `n` results instead of the configured default.
	pub async fn search_with_result_count(&self, query: &str, n: u32) -> Result<SearchResponse> {
		self
			.scoped(SearchContext::background())
			.search_with_result_count(query, n)
			.await
	}

	/// Searches restricted to `include` domains and skipping `exclude`
	/// domains.
	pub async fn search_with_domain_filters(
		&self,
		query: &str,
		include: impl IntoIterator<Item = impl Into<String>>,
		exclude: impl IntoIterator<Item = impl Into<String>>,
	) -> Result<SearchResponse> {
		self
			.scoped(SearchContext::background())
			.search_with_domain_filters(query, include, exclude)
			.await
	}

	fn default_request(&self, query: &str) -> SearchRequest {
		let mut request = SearchRequest::new(self.config.api_key().expose(), query);
		request.max_results = Some(self.config.max_results());
		request.search_depth = Some(self.config.search_depth());
		request
	}

	pub(crate) fn search_request(&self, query: &str, options: Option<&SearchOptions>) -> SearchRequest {
		let mut request = self.default_request(query);
		if let Some(options) = options {
			request.apply(options);
		}
		request
	}

	pub(crate) fn qna_request(&self, query: &str, options: Option<&SearchOptions>) -> SearchRequest {
		let mut request = self.default_request(query);
		request.include_answer = true;
		request.search_depth = Some(SearchDepth::Advanced);
		if let Some(options) = options {
			request.apply(&options.answer_fields());
		}
		request
	}

	pub(crate) fn depth_request(&self, query: &str, depth: &str) -> Result<SearchRequest> {
		let depth: SearchDepth = depth.parse()?;
		let mut request = self.default_request(query);
		request.search_depth = Some(depth);
		request.include_answer = true;
		Ok(request)
	}

	async fn send(&self, request: &SearchRequest) -> Result<SearchResponse> {
		let body = serde_json::to_vec(request).map_err(|e| {
			debug!(error = %e, "Unable to encode search request");
			TavilyError::Encoding(e)
		})?;

		debug!(url = %self.config.base_url(), "Sending search request to Tavily");
		trace!(request = ?request, "Search parameters");

		let response = self
			.http_client
			.post(self.config.base_url())
			.header(CONTENT_TYPE, "application/json")
			.body(body)
			.send()
			.await
			.map_err(|e| {
				debug!(error = %e, timeout = e.is_timeout(), "Unable to reach Tavily");
				TavilyError::Transport(e)
			})?;

		let status = response.status();
		debug!(status = %status, "Received response from Tavily");

		if !status.is_success() {
			let err = TavilyError::from_status(status);
			debug!(status = status.as_u16(), error = %err, "Tavily returned an error status");
			return Err(err);
		}

		let body = response.bytes().await.map_err(|e| {
			debug!(error = %e, "Unable to read response body");
			TavilyError::Transport(e)
		})?;

		trace!(body_len = body.len(), "Response body");

		let search_response: SearchResponse = serde_json::from_slice(&body).map_err(|e| {
			debug!(error = %e, "Unable to decode Tavily response");
			TavilyError::Decoding(e)
		})?;

		debug!(
			result_count = search_response.results.len(),
			response_time = search_response.response_time,
			"Search completed successfully"
		);

		Ok(search_response)
	}
}

/// A [`TavilyClient`] bound to a [`SearchContext`].
///
/// Calls fail with [`TavilyError::Cancelled`] or
/// [`TavilyError::DeadlineExceeded`] when the context ends first.
#[derive(Debug, Clone)]
pub struct ScopedClient<'a> {
	client: &'a TavilyClient,
	ctx: SearchContext,
}

impl ScopedClient<'_> {
	#[instrument(skip(self, options), fields(query = %query))]
	pub async fn search(&self, query: &str, options: Option<SearchOptions>) -> Result<SearchResponse> {
		let request = self.client.search_request(query, options.as_ref());
		self.execute(&request).await
	}

	#[instrument(skip(self, options), fields(query = %query))]
	pub async fn qna_search(&self, query: &str, options: Option<SearchOptions>) -> Result<String> {
		let request = self.client.qna_request(query, options.as_ref());
		match self.execute(&request).await {
			Ok(response) => Ok(response.answer_text().to_string()),
			Err(e) => {
				debug!(error = %e, "Unable to complete question-answer search");
				Err(e)
			}
		}
	}

	#[instrument(skip(self), fields(query = %query))]
	pub async fn search_with_depth(&self, query: &str, depth: &str) -> Result<SearchResponse> {
		let request = self.client.depth_request(query, depth)?;
		self.execute(&request).await
	}

	#[instrument(skip(self), fields(query = %query))]
	pub async fn search_with_result_count(&self, query: &str, n: u32) -> Result<SearchResponse> {
		let options = SearchOptions::new().with_max_results(n);
		let request = self.client.search_request(query, Some(&options));
		self.execute(&request).await
	}

	#[instrument(skip(self, include, exclude), fields(query = %query))]
	pub async fn search_with_domain_filters(
		&self,
		query: &str,
		include: impl IntoIterator<Item = impl Into<String>>,
		exclude: impl IntoIterator<Item = impl Into<String>>,
	) -> Result<SearchResponse> {
		let options = SearchOptions::new()
			.with_include_domains(include)
			.with_exclude_domains(exclude);
		let request = self.client.search_request(query, Some(&options));
		self.execute(&request).await
	}

	async fn execute(&self, request: &SearchRequest) -> Result<SearchResponse> {
		self.ctx.run(self.client.send(request)).await
	}
}
