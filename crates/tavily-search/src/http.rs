// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! HTTP client construction with a consistent User-Agent header.

use std::time::Duration;

use reqwest::{redirect, Client, ClientBuilder};

/// Creates an HTTP client builder with the standard User-Agent header.
///
/// Redirects are not followed: a 3xx from the search endpoint is returned
/// as-is so it can be classified like any other non-2xx status.
pub fn builder() -> ClientBuilder {
	Client::builder()
		.user_agent(user_agent())
		.redirect(redirect::Policy::none())
}

/// Creates an HTTP client bounded by `timeout` with the standard User-Agent.
pub fn new_client_with_timeout(timeout: Duration) -> reqwest::Result<Client> {
	builder().timeout(timeout).build()
}

/// Returns the User-Agent sent with every request.
///
/// Format: `tavily-search/{version}`
pub fn user_agent() -> String {
	format!("tavily-search/{}", env!("CARGO_PKG_VERSION"))
}
