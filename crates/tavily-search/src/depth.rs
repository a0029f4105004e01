// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Search depth tiers.

use serde::{Deserialize, Serialize};

use crate::error::TavilyError;

/// The quality/cost tier Tavily uses for a query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchDepth {
	/// Fast, cheaper search.
	#[default]
	Basic,
	/// Slower search that reads more of each source.
	Advanced,
}

impl SearchDepth {
	/// Returns the wire representation ("basic" or "advanced").
	pub fn as_str(&self) -> &'static str {
		match self {
			SearchDepth::Basic => "basic",
			SearchDepth::Advanced => "advanced",
		}
	}
}

impl std::fmt::Display for SearchDepth {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

impl std::str::FromStr for SearchDepth {
	type Err = TavilyError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"basic" => Ok(SearchDepth::Basic),
			"advanced" => Ok(SearchDepth::Advanced),
			_ => Err(TavilyError::InvalidDepth(s.to_string())),
		}
	}
}
