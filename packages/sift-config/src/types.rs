use std::path::PathBuf;

use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub corpus: Corpus,
	pub providers: Providers,
	pub search: Search,
	#[serde(default)]
	pub ingest: Ingest,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Corpus {
	/// JSON file holding the precomputed profiles and their embeddings.
	pub path: PathBuf,
	/// Optional. CSV file whose first column lists the profile URLs to ingest.
	pub links_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
pub struct Providers {
	pub embedding: EmbeddingProviderConfig,
	pub llm: LlmProviderConfig,
	#[serde(default)]
	pub retry: RetryPolicy,
}

#[derive(Debug, Deserialize)]
pub struct EmbeddingProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	#[serde(default = "default_small_model")]
	pub small_model: String,
	#[serde(default = "default_large_model")]
	pub large_model: String,
	#[serde(default)]
	pub size: ModelSize,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}
impl EmbeddingProviderConfig {
	pub fn model_for(&self, size: ModelSize) -> &str {
		match size {
			ModelSize::Small => &self.small_model,
			ModelSize::Large => &self.large_model,
		}
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelSize {
	Small,
	#[default]
	Large,
}
impl ModelSize {
	/// Vector length produced by the provider for this size.
	pub fn dimensions(self) -> usize {
		match self {
			Self::Small => 1_536,
			Self::Large => 3_072,
		}
	}
}

#[derive(Debug, Deserialize)]
pub struct LlmProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	#[serde(default)]
	pub temperature: f32,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
	pub max_attempts: u32,
	pub base_backoff_ms: u64,
	pub max_backoff_ms: u64,
}
impl Default for RetryPolicy {
	fn default() -> Self {
		Self { max_attempts: 3, base_backoff_ms: 500, max_backoff_ms: 30_000 }
	}
}

#[derive(Debug, Deserialize)]
pub struct Search {
	/// Noun used in the query prefix and the verification prompt, e.g. "lawyer".
	#[serde(default = "default_entity")]
	pub entity: String,
	pub cutoff: f32,
	pub max_concurrency: u32,
	pub verify_timeout_ms: u64,
	#[serde(default)]
	pub batch_mode: BatchMode,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchMode {
	#[default]
	Sequential,
	Concurrent,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Ingest {
	pub max_concurrency: u32,
	pub fetch_timeout_ms: u64,
	pub user_agent: String,
}
impl Default for Ingest {
	fn default() -> Self {
		Self {
			max_concurrency: 8,
			fetch_timeout_ms: 30_000,
			user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36".to_string(),
		}
	}
}

fn default_entity() -> String {
	"lawyer".to_string()
}

fn default_small_model() -> String {
	"text-embedding-3-small".to_string()
}

fn default_large_model() -> String {
	"text-embedding-3-large".to_string()
}
