// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! API key wrapper that keeps the key out of logs.

use zeroize::Zeroize;

/// Placeholder printed instead of the key.
pub const REDACTED: &str = "[REDACTED]";

/// A Tavily API key.
///
/// `Debug` and `Display` print [`REDACTED`]; the key is only reachable
/// through [`ApiKey::expose`]. The buffer is zeroed on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
	pub fn new(key: impl Into<String>) -> Self {
		Self(key.into())
	}

	/// Returns the raw key.
	pub fn expose(&self) -> &str {
		&self.0
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl Drop for ApiKey {
	fn drop(&mut self) {
		self.0.zeroize();
	}
}

impl std::fmt::Debug for ApiKey {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_tuple("ApiKey").field(&REDACTED).finish()
	}
}

impl std::fmt::Display for ApiKey {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(REDACTED)
	}
}

impl From<String> for ApiKey {
	fn from(key: String) -> Self {
		Self(key)
	}
}

impl From<&str> for ApiKey {
	fn from(key: &str) -> Self {
		Self(key.to_string())
	}
}
