// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Tavily web search API client.
//!
//! This crate provides a typed Rust client for the Tavily search API,
//! encapsulating request construction, HTTP communication and response
//! parsing.
//!
//! # Example
//!
//! ```ignore
//! use tavily_search::{ClientConfig, SearchOptions, TavilyClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), tavily_search::TavilyError> {
//!     let mut config = ClientConfig::new(std::env::var("TAVILY_API_KEY").unwrap_or_default())?;
//!     config.set_max_results(5);
//!     let client = TavilyClient::new(config)?;
//!
//!     let answer = client.qna_search("Where does Messi play right now?", None).await?;
//!     println!("{answer}");
//!
//!     let options = SearchOptions::new().with_include_domains(["docs.rs"]);
//!     let response = client.search("tokio select macro", Some(options)).await?;
//!     for result in response.results {
//!         println!("{} ({:.2}) {}", result.title, result.score, result.url);
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod context;
pub mod depth;
pub mod error;
pub mod http;
pub mod secret;
pub mod types;

pub use client::{ScopedClient, TavilyClient};
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use context::SearchContext;
pub use depth::SearchDepth;
pub use error::{Result, TavilyError};
pub use secret::ApiKey;
pub use tokio_util::sync::CancellationToken;
pub use types::{SearchOptions, SearchRequest, SearchResponse, SearchResult};
