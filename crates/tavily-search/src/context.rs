// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Per-call cancellation and deadlines.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::{Result, TavilyError};

/// Caller-supplied bounds for a single search.
///
/// [`SearchContext::background`] carries no token and no deadline, leaving
/// the call bounded only by the client timeout.
#[derive(Debug, Clone, Default)]
pub struct SearchContext {
	cancel: Option<CancellationToken>,
	deadline: Option<Instant>,
}

impl SearchContext {
	pub fn background() -> Self {
		Self::default()
	}

	pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
		self.cancel = Some(token);
		self
	}

	pub fn with_deadline(mut self, deadline: Instant) -> Self {
		self.deadline = Some(deadline);
		self
	}

	/// Sets the deadline to `timeout` from now.
	pub fn with_timeout(self, timeout: Duration) -> Self {
		self.with_deadline(Instant::now() + timeout)
	}

	/// Drives `fut` until it completes, the token is cancelled, or the
	/// deadline passes, whichever happens first.
	pub async fn run<F, T>(&self, fut: F) -> Result<T>
	where
		F: Future<Output = Result<T>>,
	{
		let cancelled = async {
			match &self.cancel {
				Some(token) => token.cancelled().await,
				None => std::future::pending().await,
			}
		};
		let expired = async {
			match self.deadline {
				Some(deadline) => tokio::time::sleep_until(deadline).await,
				None => std::future::pending().await,
			}
		};

		tokio::select! {
			biased;
			_ = cancelled => Err(TavilyError::Cancelled),
			_ = expired => Err(TavilyError::DeadlineExceeded),
			result = fut => result,
		}
	}
}
