pub mod ingest;
pub mod rank;
pub mod search;
pub mod verify;

mod error;

pub use error::{Error, Result};
pub use ingest::{IngestOutcome, IngestReport, IngestStatus};
pub use rank::query_phrase;
pub use search::{CandidateVerification, SearchReport, VerificationStatus};
pub use verify::VerificationOutcome;

use std::{future::Future, pin::Pin, sync::Arc};

use tokio::sync::Semaphore;

use sift_config::{
	Config, EmbeddingProviderConfig, Ingest, LlmProviderConfig, ModelSize, RetryPolicy,
};
use sift_domain::Corpus;
use sift_providers::{
	completion::{self, CompletionRequest},
	embedding, fetch, retry,
};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait EmbeddingProvider
where
	Self: Send + Sync,
{
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
		size: ModelSize,
	) -> BoxFuture<'a, sift_providers::Result<Vec<Vec<f32>>>>;
}

pub trait CompletionProvider
where
	Self: Send + Sync,
{
	fn complete<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		request: &'a CompletionRequest,
	) -> BoxFuture<'a, sift_providers::Result<String>>;
}

pub trait PageFetcher
where
	Self: Send + Sync,
{
	fn fetch<'a>(
		&'a self,
		cfg: &'a Ingest,
		url: &'a str,
	) -> BoxFuture<'a, sift_providers::Result<String>>;
}

#[derive(Clone)]
pub struct Providers {
	pub embedding: Arc<dyn EmbeddingProvider>,
	pub completion: Arc<dyn CompletionProvider>,
	pub fetcher: Arc<dyn PageFetcher>,
}
impl Providers {
	pub fn new(
		embedding: Arc<dyn EmbeddingProvider>,
		completion: Arc<dyn CompletionProvider>,
		fetcher: Arc<dyn PageFetcher>,
	) -> Self {
		Self { embedding, completion, fetcher }
	}

	/// HTTP providers, each call wrapped in the given retry policy.
	pub fn http(retry: RetryPolicy) -> Self {
		let provider = Arc::new(HttpProviders { retry });

		Self { embedding: provider.clone(), completion: provider.clone(), fetcher: provider }
	}
}
impl Default for Providers {
	fn default() -> Self {
		Self::http(RetryPolicy::default())
	}
}

pub struct SiftService {
	pub cfg: Config,
	pub providers: Providers,
	verify_permits: Semaphore,
}
impl SiftService {
	pub fn new(cfg: Config) -> Self {
		let providers = Providers::http(cfg.providers.retry.clone());

		Self::with_providers(cfg, providers)
	}

	pub fn with_providers(cfg: Config, providers: Providers) -> Self {
		let verify_permits = Semaphore::new(cfg.search.max_concurrency.max(1) as usize);

		Self { cfg, providers, verify_permits }
	}

	pub fn load_corpus(&self) -> Result<Corpus> {
		Ok(sift_storage::corpus::load(&self.cfg.corpus.path)?)
	}

	pub fn save_corpus(&self, corpus: &Corpus) -> Result<()> {
		Ok(sift_storage::corpus::save(&self.cfg.corpus.path, corpus)?)
	}

	pub fn load_links(&self) -> Result<Vec<String>> {
		let Some(path) = self.cfg.corpus.links_path.as_deref() else {
			return Err(Error::Validation {
				message: "corpus.links_path must be set to ingest profiles.".to_string(),
			});
		};

		Ok(sift_storage::links::load_links(path)?)
	}
}

struct HttpProviders {
	retry: RetryPolicy,
}

impl EmbeddingProvider for HttpProviders {
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
		size: ModelSize,
	) -> BoxFuture<'a, sift_providers::Result<Vec<Vec<f32>>>> {
		Box::pin(retry::with_backoff(&self.retry, "embedding", move || {
			embedding::embed(cfg, texts, size)
		}))
	}
}

impl CompletionProvider for HttpProviders {
	fn complete<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		request: &'a CompletionRequest,
	) -> BoxFuture<'a, sift_providers::Result<String>> {
		Box::pin(retry::with_backoff(&self.retry, "completion", move || {
			completion::complete(cfg, request)
		}))
	}
}

impl PageFetcher for HttpProviders {
	fn fetch<'a>(
		&'a self,
		cfg: &'a Ingest,
		url: &'a str,
	) -> BoxFuture<'a, sift_providers::Result<String>> {
		Box::pin(retry::with_backoff(&self.retry, "fetch", move || fetch::fetch_page(cfg, url)))
	}
}
