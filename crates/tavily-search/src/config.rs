// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Client configuration.
//!
//! A [`ClientConfig`] holds the API key and the defaults applied to every
//! request. It is handed to [`TavilyClient::new`](crate::TavilyClient::new)
//! by value, so a running client never observes a configuration change;
//! build a new client to pick up new settings.

use std::time::Duration;

use tracing::debug;

use crate::depth::SearchDepth;
use crate::error::{Result, TavilyError};
use crate::secret::ApiKey;

/// Production search endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.tavily.com/search";
/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(30_000);
/// Default number of results per search.
pub const DEFAULT_MAX_RESULTS: u32 = 1;

pub const API_KEY_ENV: &str = "TAVILY_API_KEY";
pub const API_KEY_FILE_ENV: &str = "TAVILY_API_KEY_FILE";
pub const BASE_URL_ENV: &str = "TAVILY_BASE_URL";

/// Settings shared by every search issued through a client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
	api_key: ApiKey,
	max_results: u32,
	search_depth: SearchDepth,
	timeout: Duration,
	base_url: String,
}

impl ClientConfig {
	/// Creates a configuration with the default result count (1), basic
	/// depth and a 30 second timeout.
	pub fn new(api_key: impl Into<ApiKey>) -> Result<Self> {
		let api_key = api_key.into();
		if api_key.is_empty() {
			return Err(TavilyError::InvalidCredential);
		}

		Ok(Self {
			api_key,
			max_results: DEFAULT_MAX_RESULTS,
			search_depth: SearchDepth::Basic,
			timeout: DEFAULT_TIMEOUT,
			base_url: DEFAULT_BASE_URL.to_string(),
		})
	}

	/// Loads the configuration from the process environment.
	///
	/// The key is read from `TAVILY_API_KEY`, or from the file named by
	/// `TAVILY_API_KEY_FILE` when that is set. `TAVILY_BASE_URL` overrides
	/// the endpoint.
	pub fn from_env() -> Result<Self> {
		Self::from_lookup(|name| std::env::var(name).ok())
	}

	/// Same as [`ClientConfig::from_env`] with a custom variable source.
	pub fn from_lookup<F>(lookup: F) -> Result<Self>
	where
		F: Fn(&str) -> Option<String>,
	{
		let api_key = match lookup(API_KEY_FILE_ENV).filter(|p| !p.is_empty()) {
			Some(path) => {
				debug!(path = %path, "reading Tavily API key from file");
				let contents = std::fs::read_to_string(&path).map_err(|e| {
					TavilyError::Configuration(format!("failed to read {API_KEY_FILE_ENV} ({path}): {e}"))
				})?;
				contents.trim_end_matches(['\r', '\n']).to_string()
			}
			None => lookup(API_KEY_ENV).unwrap_or_default(),
		};

		let mut config = Self::new(api_key)?;
		if let Some(base_url) = lookup(BASE_URL_ENV).filter(|u| !u.is_empty()) {
			config.set_base_url(base_url);
		}

		Ok(config)
	}

	pub fn api_key(&self) -> &ApiKey {
		&self.api_key
	}

	pub fn max_results(&self) -> u32 {
		self.max_results
	}

	pub fn search_depth(&self) -> SearchDepth {
		self.search_depth
	}

	pub fn timeout(&self) -> Duration {
		self.timeout
	}

	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	/// Sets the default result count. Zero is ignored and the previous
	/// value is kept.
	pub fn set_max_results(&mut self, n: u32) {
		if n > 0 {
			self.max_results = n;
		}
	}

	/// Sets the request timeout.
	pub fn set_timeout(&mut self, timeout: Duration) {
		self.timeout = timeout;
	}

	/// Sets the request timeout in milliseconds.
	pub fn set_timeout_ms(&mut self, ms: u64) {
		self.timeout = Duration::from_millis(ms);
	}

	/// Sets the default depth from its wire name. Unknown names are
	/// rejected and the previous depth is kept.
	pub fn set_search_depth(&mut self, depth: &str) -> Result<()> {
		self.search_depth = depth.parse()?;
		Ok(())
	}

	/// Sets a custom endpoint (useful for testing).
	pub fn set_base_url(&mut self, base_url: impl Into<String>) {
		self.base_url = base_url.into();
	}

	pub fn with_max_results(mut self, n: u32) -> Self {
		self.set_max_results(n);
		self
	}

	pub fn with_search_depth(mut self, depth: SearchDepth) -> Self {
		self.search_depth = depth;
		self
	}

	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}

	pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
		self.base_url = base_url.into();
		self
	}
}
