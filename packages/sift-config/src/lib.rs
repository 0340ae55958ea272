mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	BatchMode, Config, Corpus, EmbeddingProviderConfig, Ingest, LlmProviderConfig, ModelSize,
	Providers, RetryPolicy, Search, Service,
};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}
	if cfg.corpus.path.as_os_str().is_empty() {
		return Err(Error::Validation { message: "corpus.path must be non-empty.".to_string() });
	}
	if !cfg.search.cutoff.is_finite() {
		return Err(Error::Validation {
			message: "search.cutoff must be a finite number.".to_string(),
		});
	}
	if !(-1.0..=1.0).contains(&cfg.search.cutoff) {
		return Err(Error::Validation {
			message: "search.cutoff must be in the range -1.0-1.0.".to_string(),
		});
	}
	if cfg.search.entity.is_empty() {
		return Err(Error::Validation { message: "search.entity must be non-empty.".to_string() });
	}
	if cfg.search.max_concurrency == 0 {
		return Err(Error::Validation {
			message: "search.max_concurrency must be greater than zero.".to_string(),
		});
	}
	if cfg.search.verify_timeout_ms == 0 {
		return Err(Error::Validation {
			message: "search.verify_timeout_ms must be greater than zero.".to_string(),
		});
	}
	if !cfg.providers.llm.temperature.is_finite() {
		return Err(Error::Validation {
			message: "providers.llm.temperature must be a finite number.".to_string(),
		});
	}
	if !(0.0..=2.0).contains(&cfg.providers.llm.temperature) {
		return Err(Error::Validation {
			message: "providers.llm.temperature must be in the range 0.0-2.0.".to_string(),
		});
	}
	if cfg.providers.retry.max_attempts == 0 {
		return Err(Error::Validation {
			message: "providers.retry.max_attempts must be greater than zero.".to_string(),
		});
	}
	if cfg.providers.retry.base_backoff_ms > cfg.providers.retry.max_backoff_ms {
		return Err(Error::Validation {
			message: "providers.retry.base_backoff_ms must not exceed providers.retry.max_backoff_ms."
				.to_string(),
		});
	}
	if cfg.ingest.max_concurrency == 0 {
		return Err(Error::Validation {
			message: "ingest.max_concurrency must be greater than zero.".to_string(),
		});
	}
	if cfg.ingest.fetch_timeout_ms == 0 {
		return Err(Error::Validation {
			message: "ingest.fetch_timeout_ms must be greater than zero.".to_string(),
		});
	}

	for (label, key, timeout_ms) in [
		("embedding", &cfg.providers.embedding.api_key, cfg.providers.embedding.timeout_ms),
		("llm", &cfg.providers.llm.api_key, cfg.providers.llm.timeout_ms),
	] {
		if key.trim().is_empty() {
			return Err(Error::Validation {
				message: format!("Provider {label} api_key must be non-empty."),
			});
		}
		if timeout_ms == 0 {
			return Err(Error::Validation {
				message: format!("Provider {label} timeout_ms must be greater than zero."),
			});
		}
	}

	for (label, model) in [
		("providers.embedding.small_model", &cfg.providers.embedding.small_model),
		("providers.embedding.large_model", &cfg.providers.embedding.large_model),
		("providers.llm.model", &cfg.providers.llm.model),
	] {
		if model.trim().is_empty() {
			return Err(Error::Validation { message: format!("{label} must be non-empty.") });
		}
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	cfg.search.entity = cfg.search.entity.trim().to_string();

	for api_base in [&mut cfg.providers.embedding.api_base, &mut cfg.providers.llm.api_base] {
		let trimmed = api_base.trim().trim_end_matches('/').to_string();

		*api_base = trimmed;
	}

	if cfg.corpus.links_path.as_deref().map(|path| path.as_os_str().is_empty()).unwrap_or(false) {
		cfg.corpus.links_path = None;
	}
}
