// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Command line front end for the Tavily search client.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tavily_search::{ClientConfig, SearchDepth, SearchOptions, SearchResponse, TavilyClient};

#[derive(Parser, Debug)]
#[command(name = "tavily", version, about, long_about = None)]
struct Args {
	/// Tavily API key
	#[arg(long, env = "TAVILY_API_KEY", hide_env_values = true)]
	api_key: Option<String>,

	/// Search endpoint (overrides the production endpoint)
	#[arg(long, env = "TAVILY_BASE_URL")]
	base_url: Option<String>,

	/// Request timeout in milliseconds
	#[arg(long, default_value = "30000")]
	timeout_ms: u64,

	/// Log level (overridden by RUST_LOG)
	#[arg(short, long, default_value = "warn")]
	log_level: String,

	/// Output logs as JSON
	#[arg(long)]
	json_logs: bool,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Search the web and print ranked results
	Search {
		query: String,
		#[command(flatten)]
		filters: FilterArgs,
		/// Include image URLs in the response
		#[arg(long)]
		images: bool,
		/// Include the full page content of each result
		#[arg(long)]
		raw_content: bool,
		/// Ask Tavily to generate an answer
		#[arg(long)]
		answer: bool,
		/// Output the raw JSON response
		#[arg(long)]
		json: bool,
	},
	/// Ask a question and print only the answer
	Qna {
		query: String,
		#[command(flatten)]
		filters: FilterArgs,
	},
}

#[derive(ClapArgs, Debug)]
struct FilterArgs {
	/// Search depth
	#[arg(long, value_enum)]
	depth: Option<DepthArg>,
	/// Number of results to request
	#[arg(short = 'n', long)]
	max_results: Option<u32>,
	/// Only search this domain (repeatable)
	#[arg(long = "include-domain", value_name = "DOMAIN")]
	include_domains: Vec<String>,
	/// Never search this domain (repeatable)
	#[arg(long = "exclude-domain", value_name = "DOMAIN")]
	exclude_domains: Vec<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum DepthArg {
	Basic,
	Advanced,
}

impl From<DepthArg> for SearchDepth {
	fn from(arg: DepthArg) -> Self {
		match arg {
			DepthArg::Basic => SearchDepth::Basic,
			DepthArg::Advanced => SearchDepth::Advanced,
		}
	}
}

impl FilterArgs {
	fn to_options(&self) -> SearchOptions {
		SearchOptions {
			search_depth: self.depth.map(SearchDepth::from),
			max_results: self.max_results,
			include_domains: Some(self.include_domains.clone()),
			exclude_domains: Some(self.exclude_domains.clone()),
			..SearchOptions::default()
		}
	}
}

fn init_tracing(level: &str, json: bool) {
	let filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(format!("tavily={level},tavily_search={level}")));

	if json {
		tracing_subscriber::registry()
			.with(filter)
			.with(fmt::layer().json().with_writer(std::io::stderr))
			.init();
	} else {
		tracing_subscriber::registry()
			.with(filter)
			.with(fmt::layer().compact().with_writer(std::io::stderr))
			.init();
	}
}

fn build_client(args: &Args) -> Result<TavilyClient> {
	let api_key = args
		.api_key
		.clone()
		.context("no API key provided; pass --api-key or set TAVILY_API_KEY")?;

	let mut config = ClientConfig::new(api_key)?.with_timeout(Duration::from_millis(args.timeout_ms));
	if let Some(base_url) = &args.base_url {
		config.set_base_url(base_url.clone());
	}

	Ok(TavilyClient::new(config)?)
}

fn print_results(response: &SearchResponse) {
	if let Some(answer) = response.answer.as_deref().filter(|a| !a.is_empty()) {
		println!("{answer}\n");
	}

	for (i, result) in response.results.iter().enumerate() {
		println!("{}. {} ({:.2})", i + 1, result.title, result.score);
		println!("   {}", result.url);
		println!("   {}", result.content);
	}

	for image in &response.images {
		println!("image: {image}");
	}
}

#[tokio::main]
async fn main() -> Result<()> {
	let args = Args::parse();
	init_tracing(&args.log_level, args.json_logs);

	let client = build_client(&args)?;
	debug!(command = ?args.command, "running command");

	match &args.command {
		Command::Search {
			query,
			filters,
			images,
			raw_content,
			answer,
			json,
		} => {
			let options = SearchOptions {
				include_images: Some(*images),
				include_raw_content: Some(*raw_content),
				include_answer: Some(*answer),
				..filters.to_options()
			};

			let response = client
				.search(query, Some(options))
				.await
				.context("search failed")?;

			if *json {
				println!("{}", serde_json::to_string_pretty(&response)?);
			} else {
				print_results(&response);
			}
		}
		Command::Qna { query, filters } => {
			let answer = client
				.qna_search(query, Some(filters.to_options()))
				.await
				.context("unable to get an answer")?;
			println!("{answer}");
		}
	}

	Ok(())
}
