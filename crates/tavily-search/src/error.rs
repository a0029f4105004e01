// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the Tavily search client.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur when configuring or calling the Tavily API.
#[derive(Debug, Error)]
pub enum TavilyError {
	/// No API key was provided.
	#[error("No API Key was provided")]
	InvalidCredential,

	/// Search depth was not one of the recognized values.
	#[error("Unknown search depth '{0}', use 'basic' or 'advanced'")]
	InvalidDepth(String),

	/// Configuration could not be loaded.
	#[error("configuration error: {0}")]
	Configuration(String),

	/// The request could not be serialized.
	#[error("failed to encode search request: {0}")]
	Encoding(#[source] serde_json::Error),

	/// Network-level error, including timeouts and body read failures.
	#[error("transport error: {0}")]
	Transport(#[from] reqwest::Error),

	/// Tavily answered with a non-success status.
	#[error("{message}")]
	Remote { status: u16, message: String },

	/// The response body was not valid search response JSON.
	#[error("failed to decode search response: {0}")]
	Decoding(#[source] serde_json::Error),

	/// The caller cancelled the request.
	#[error("search request was cancelled")]
	Cancelled,

	/// The caller-supplied deadline elapsed before a response arrived.
	#[error("search request deadline exceeded")]
	DeadlineExceeded,
}

impl TavilyError {
	/// Builds the error for a non-success status returned by Tavily.
	///
	/// Known statuses carry Tavily's documented message; anything else
	/// reports the raw status code.
	pub fn from_status(status: StatusCode) -> Self {
		let message = match remote_message(status) {
			Some(message) => message.to_string(),
			None => format!("Unexpected response status: {}", status.as_u16()),
		};

		TavilyError::Remote {
			status: status.as_u16(),
			message,
		}
	}

	/// Returns the HTTP status for remote errors and transport errors that
	/// carry one.
	pub fn status(&self) -> Option<u16> {
		match self {
			TavilyError::Remote { status, .. } => Some(*status),
			TavilyError::Transport(e) => e.status().map(|s| s.as_u16()),
			_ => None,
		}
	}

	/// Returns `true` if the transport gave up waiting for Tavily.
	pub fn is_timeout(&self) -> bool {
		match self {
			TavilyError::Transport(e) => e.is_timeout(),
			TavilyError::DeadlineExceeded => true,
			_ => false,
		}
	}
}

/// Fixed messages for the statuses Tavily documents.
pub fn remote_message(status: StatusCode) -> Option<&'static str> {
	let message = match status {
		StatusCode::BAD_REQUEST => "Your request is invalid",
		StatusCode::UNAUTHORIZED => "Your API key is wrong",
		StatusCode::FORBIDDEN => "The endpoint requested is hidden for administrators only",
		StatusCode::NOT_FOUND => "The specified endpoint could not be found",
		StatusCode::METHOD_NOT_ALLOWED => "You tried to access an endpoint with an invalid method",
		StatusCode::TOO_MANY_REQUESTS => "You're requesting too many results; Slow down!",
		StatusCode::INTERNAL_SERVER_ERROR => "We had a problem with our server. Try again later",
		StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => {
			"We're temporarily offline for maintenance. Please try again later"
		}
		_ => return None,
	};

	Some(message)
}

/// Result type alias for Tavily operations.
pub type Result<T> = std::result::Result<T, TavilyError>;
