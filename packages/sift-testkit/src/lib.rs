use std::{
	collections::HashMap,
	path::PathBuf,
	sync::{
		Arc,
		atomic::{AtomicUsize, Ordering},
	},
	time::Duration,
};

use serde_json::Map;

use sift_config::{
	BatchMode, Config, Corpus, EmbeddingProviderConfig, Ingest, LlmProviderConfig, ModelSize,
	Providers as ProviderConfigs, RetryPolicy, Search, Service,
};
use sift_domain::Candidate;
use sift_providers::{
	Error as ProviderError, Result as ProviderResult, completion::CompletionRequest,
};
use sift_service::{
	BoxFuture, CompletionProvider, EmbeddingProvider, PageFetcher, Providers, SiftService,
};

type Responder = dyn Fn(&CompletionRequest) -> ProviderResult<String> + Send + Sync;

/// Embedding stub keyed by exact input text.
#[derive(Default)]
pub struct StubEmbedding {
	vectors: HashMap<String, Vec<f32>>,
	fallback: Option<Vec<f32>>,
	failure: Option<u16>,
	calls: AtomicUsize,
}
impl StubEmbedding {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with(mut self, text: impl Into<String>, vector: Vec<f32>) -> Self {
		self.vectors.insert(text.into(), vector);

		self
	}

	/// Vector returned for any text without an explicit entry.
	pub fn fallback(mut self, vector: Vec<f32>) -> Self {
		self.fallback = Some(vector);

		self
	}

	/// Every call fails with the given HTTP status.
	pub fn failing(mut self, status: u16) -> Self {
		self.failure = Some(status);

		self
	}

	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}
impl EmbeddingProvider for StubEmbedding {
	fn embed<'a>(
		&'a self,
		_: &'a EmbeddingProviderConfig,
		texts: &'a [String],
		_: ModelSize,
	) -> BoxFuture<'a, ProviderResult<Vec<Vec<f32>>>> {
		Box::pin(async move {
			self.calls.fetch_add(1, Ordering::SeqCst);

			if let Some(status) = self.failure {
				return Err(ProviderError::Status { status, body: "stub failure".to_string() });
			}

			texts
				.iter()
				.map(|text| {
					self.vectors.get(text).or(self.fallback.as_ref()).cloned().ok_or_else(|| {
						ProviderError::InvalidResponse {
							message: format!("No stub vector for {text:?}."),
						}
					})
				})
				.collect()
		})
	}
}

/// Completion stub answering through a closure, optionally after a fixed delay.
pub struct StubCompletion {
	respond: Box<Responder>,
	delay: Option<Duration>,
	calls: AtomicUsize,
	completed: AtomicUsize,
	in_flight: AtomicUsize,
	max_in_flight: AtomicUsize,
}
impl StubCompletion {
	pub fn new<F>(respond: F) -> Self
	where
		F: Fn(&CompletionRequest) -> ProviderResult<String> + Send + Sync + 'static,
	{
		Self {
			respond: Box::new(respond),
			delay: None,
			calls: AtomicUsize::new(0),
			completed: AtomicUsize::new(0),
			in_flight: AtomicUsize::new(0),
			max_in_flight: AtomicUsize::new(0),
		}
	}

	/// Always answers with the given verdict.
	pub fn verdict(answer: &'static str) -> Self {
		Self::new(move |_| Ok(verdict_reply(answer)))
	}

	pub fn with_delay(mut self, delay: Duration) -> Self {
		self.delay = Some(delay);

		self
	}

	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}

	/// Calls that ran to the end instead of being dropped mid-flight.
	pub fn completed(&self) -> usize {
		self.completed.load(Ordering::SeqCst)
	}

	/// Highest number of calls observed running at once.
	pub fn max_in_flight(&self) -> usize {
		self.max_in_flight.load(Ordering::SeqCst)
	}
}
impl CompletionProvider for StubCompletion {
	fn complete<'a>(
		&'a self,
		_: &'a LlmProviderConfig,
		request: &'a CompletionRequest,
	) -> BoxFuture<'a, ProviderResult<String>> {
		Box::pin(async move {
			self.calls.fetch_add(1, Ordering::SeqCst);

			let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;

			self.max_in_flight.fetch_max(current, Ordering::SeqCst);

			if let Some(delay) = self.delay {
				tokio::time::sleep(delay).await;
			}

			self.in_flight.fetch_sub(1, Ordering::SeqCst);
			self.completed.fetch_add(1, Ordering::SeqCst);

			(self.respond)(request)
		})
	}
}

/// Page fetcher serving canned HTML; unknown URLs answer 404.
#[derive(Default)]
pub struct StubFetcher {
	pages: HashMap<String, String>,
	calls: AtomicUsize,
}
impl StubFetcher {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_page(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
		self.pages.insert(url.into(), html.into());

		self
	}

	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}
impl PageFetcher for StubFetcher {
	fn fetch<'a>(&'a self, _: &'a Ingest, url: &'a str) -> BoxFuture<'a, ProviderResult<String>> {
		Box::pin(async move {
			self.calls.fetch_add(1, Ordering::SeqCst);

			self.pages
				.get(url)
				.cloned()
				.ok_or_else(|| ProviderError::Status { status: 404, body: "not found".to_string() })
		})
	}
}

/// Reply in the verifier's expected tag format.
pub fn verdict_reply(answer: &str) -> String {
	format!("<thinking>Checked the profile.</thinking>\n<answer>{answer}</answer>")
}

/// Configuration with fast timeouts and no real endpoints behind it.
pub fn test_config(cutoff: f32) -> Config {
	Config {
		service: Service { log_level: "info".to_string() },
		corpus: Corpus { path: PathBuf::from("sift_test_corpus.json"), links_path: None },
		providers: ProviderConfigs {
			embedding: EmbeddingProviderConfig {
				provider_id: "stub".to_string(),
				api_base: "http://127.0.0.1:9".to_string(),
				api_key: "test-key".to_string(),
				path: "/embeddings".to_string(),
				small_model: "small".to_string(),
				large_model: "large".to_string(),
				size: ModelSize::Large,
				timeout_ms: 1_000,
				default_headers: Map::new(),
			},
			llm: LlmProviderConfig {
				provider_id: "stub".to_string(),
				api_base: "http://127.0.0.1:9".to_string(),
				api_key: "test-key".to_string(),
				path: "/chat/completions".to_string(),
				model: "mini".to_string(),
				temperature: 0.0,
				timeout_ms: 1_000,
				default_headers: Map::new(),
			},
			retry: RetryPolicy { max_attempts: 1, base_backoff_ms: 1, max_backoff_ms: 1 },
		},
		search: Search {
			entity: "lawyer".to_string(),
			cutoff,
			max_concurrency: 16,
			verify_timeout_ms: 5_000,
			batch_mode: BatchMode::Sequential,
		},
		ingest: Ingest {
			max_concurrency: 4,
			fetch_timeout_ms: 1_000,
			user_agent: "sift-test".to_string(),
		},
	}
}

pub fn service(
	cfg: Config,
	embedding: Arc<StubEmbedding>,
	completion: Arc<StubCompletion>,
	fetcher: Arc<StubFetcher>,
) -> SiftService {
	SiftService::with_providers(cfg, Providers::new(embedding, completion, fetcher))
}

/// Corpus entry whose verifier text is `profile`.
pub fn candidate(id: &str, profile: &str, embedding: Vec<f32>) -> Candidate {
	Candidate {
		id: id.to_string(),
		raw_content: profile.to_string(),
		structured_data: Map::new(),
		embedding,
		fetched_at: None,
	}
}
