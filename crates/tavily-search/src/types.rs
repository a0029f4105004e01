// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Tavily wire types and per-call overrides.

use serde::{Deserialize, Deserializer, Serialize};

use crate::depth::SearchDepth;
use crate::secret::REDACTED;

/// Request body sent to the Tavily search endpoint.
///
/// Unset, false, zero and empty fields are left out of the JSON; `api_key`
/// and `query` are always present.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
	#[serde(default)]
	pub api_key: String,
	pub query: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub search_depth: Option<SearchDepth>,
	#[serde(default, skip_serializing_if = "std::ops::Not::not")]
	pub include_images: bool,
	#[serde(default, skip_serializing_if = "std::ops::Not::not")]
	pub include_answer: bool,
	#[serde(default, skip_serializing_if = "std::ops::Not::not")]
	pub include_raw_content: bool,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub max_results: Option<u32>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub include_domains: Vec<String>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub exclude_domains: Vec<String>,
}

impl SearchRequest {
	pub fn new(api_key: impl Into<String>, query: impl Into<String>) -> Self {
		Self {
			api_key: api_key.into(),
			query: query.into(),
			search_depth: None,
			include_images: false,
			include_answer: false,
			include_raw_content: false,
			max_results: None,
			include_domains: Vec::new(),
			exclude_domains: Vec::new(),
		}
	}

	/// Overlays the fields set in `options` onto this request.
	///
	/// A result count of zero and empty domain lists count as unset. Flags
	/// take whatever value the override carries, including `false`.
	pub fn apply(&mut self, options: &SearchOptions) {
		if let Some(depth) = options.search_depth {
			self.search_depth = Some(depth);
		}
		if let Some(n) = options.max_results.filter(|n| *n > 0) {
			self.max_results = Some(n);
		}
		if let Some(include) = options.include_images {
			self.include_images = include;
		}
		if let Some(include) = options.include_answer {
			self.include_answer = include;
		}
		if let Some(include) = options.include_raw_content {
			self.include_raw_content = include;
		}
		if let Some(domains) = options.include_domains.as_ref().filter(|d| !d.is_empty()) {
			self.include_domains = domains.clone();
		}
		if let Some(domains) = options.exclude_domains.as_ref().filter(|d| !d.is_empty()) {
			self.exclude_domains = domains.clone();
		}
	}
}

impl std::fmt::Debug for SearchRequest {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SearchRequest")
			.field("api_key", &REDACTED)
			.field("query", &self.query)
			.field("search_depth", &self.search_depth)
			.field("include_images", &self.include_images)
			.field("include_answer", &self.include_answer)
			.field("include_raw_content", &self.include_raw_content)
			.field("max_results", &self.max_results)
			.field("include_domains", &self.include_domains)
			.field("exclude_domains", &self.exclude_domains)
			.finish()
	}
}

/// Per-call overrides for the client defaults.
///
/// Every field is optional; `None` leaves the default request untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchOptions {
	pub search_depth: Option<SearchDepth>,
	pub include_images: Option<bool>,
	pub include_answer: Option<bool>,
	pub include_raw_content: Option<bool>,
	pub max_results: Option<u32>,
	pub include_domains: Option<Vec<String>>,
	pub exclude_domains: Option<Vec<String>>,
}

impl SearchOptions {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_search_depth(mut self, depth: SearchDepth) -> Self {
		self.search_depth = Some(depth);
		self
	}

	pub fn with_max_results(mut self, n: u32) -> Self {
		self.max_results = Some(n);
		self
	}

	pub fn with_images(mut self, include: bool) -> Self {
		self.include_images = Some(include);
		self
	}

	pub fn with_answer(mut self, include: bool) -> Self {
		self.include_answer = Some(include);
		self
	}

	pub fn with_raw_content(mut self, include: bool) -> Self {
		self.include_raw_content = Some(include);
		self
	}

	pub fn with_include_domains<I, S>(mut self, domains: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.include_domains = Some(domains.into_iter().map(Into::into).collect());
		self
	}

	pub fn with_exclude_domains<I, S>(mut self, domains: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.exclude_domains = Some(domains.into_iter().map(Into::into).collect());
		self
	}

	/// Keeps only the fields a question-answer search honors: depth, result
	/// count and domain filters.
	pub fn answer_fields(&self) -> Self {
		Self {
			search_depth: self.search_depth,
			max_results: self.max_results,
			include_domains: self.include_domains.clone(),
			exclude_domains: self.exclude_domains.clone(),
			..Self::default()
		}
	}
}

/// Response body returned by the Tavily search endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
	#[serde(default)]
	pub answer: Option<String>,
	pub query: String,
	/// Server-side processing time in seconds.
	#[serde(default)]
	pub response_time: f64,
	#[serde(default, deserialize_with = "null_as_default")]
	pub images: Vec<String>,
	#[serde(default, deserialize_with = "null_as_default")]
	pub follow_up_questions: Vec<String>,
	#[serde(default, deserialize_with = "null_as_default")]
	pub results: Vec<SearchResult>,
}

impl SearchResponse {
	/// Returns the generated answer, or an empty string when none was
	/// produced.
	pub fn answer_text(&self) -> &str {
		self.answer.as_deref().unwrap_or_default()
	}
}

/// A single ranked search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
	pub title: String,
	pub url: String,
	pub content: String,
	/// Full page content, only present when requested.
	#[serde(default)]
	pub raw_content: Option<String>,
	/// Relevance score assigned by Tavily.
	pub score: f64,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
	D: Deserializer<'de>,
	T: Default + Deserialize<'de>,
{
	Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
