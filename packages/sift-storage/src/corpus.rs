use std::{collections::BTreeMap, fs, io::ErrorKind, path::Path};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use time::OffsetDateTime;

use sift_domain::{Candidate, Corpus};

use crate::{Error, Result};

/// On-disk shape of one profile; the file maps identifiers to records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusRecord {
	pub raw_content: String,
	#[serde(default)]
	pub structured_data: Map<String, Value>,
	pub embedding: Vec<f32>,
	#[serde(
		default,
		skip_serializing_if = "Option::is_none",
		with = "time::serde::rfc3339::option"
	)]
	pub fetched_at: Option<OffsetDateTime>,
}
impl CorpusRecord {
	pub fn into_candidate(self, id: String) -> Candidate {
		Candidate {
			id,
			raw_content: self.raw_content,
			structured_data: self.structured_data,
			embedding: self.embedding,
			fetched_at: self.fetched_at,
		}
	}
}
impl From<&Candidate> for CorpusRecord {
	fn from(candidate: &Candidate) -> Self {
		Self {
			raw_content: candidate.raw_content.clone(),
			structured_data: candidate.structured_data.clone(),
			embedding: candidate.embedding.clone(),
			fetched_at: candidate.fetched_at,
		}
	}
}

/// Loads the whole corpus. A missing or blank file is an empty corpus.
pub fn load(path: &Path) -> Result<Corpus> {
	let raw = match fs::read_to_string(path) {
		Ok(raw) => raw,
		Err(err) if err.kind() == ErrorKind::NotFound => {
			tracing::info!(path = %path.display(), "Corpus file not found. Starting empty.");

			return Ok(Corpus::new());
		},
		Err(source) => return Err(Error::Io { path: path.to_path_buf(), source }),
	};

	if raw.trim().is_empty() {
		return Ok(Corpus::new());
	}

	let records: BTreeMap<String, CorpusRecord> = serde_json::from_str(&raw)
		.map_err(|source| Error::Json { path: path.to_path_buf(), source })?;
	let corpus =
		Corpus::from_candidates(records.into_iter().map(|(id, record)| record.into_candidate(id)))
			.map_err(|err| Error::Validation {
				message: format!("Corpus file at {} is invalid: {err}", path.display()),
			})?;

	tracing::info!(
		path = %path.display(),
		candidates = corpus.len(),
		dimensions = corpus.dimensions().unwrap_or(0),
		"Loaded corpus."
	);

	Ok(corpus)
}

/// Writes the corpus next to `path` and renames it into place.
pub fn save(path: &Path, corpus: &Corpus) -> Result<()> {
	let records: BTreeMap<&str, CorpusRecord> =
		corpus.iter().map(|candidate| (candidate.id.as_str(), CorpusRecord::from(candidate))).collect();
	let payload = serde_json::to_string_pretty(&records)
		.map_err(|source| Error::Json { path: path.to_path_buf(), source })?;
	let mut tmp_name = path.file_name().map(|name| name.to_os_string()).unwrap_or_default();

	tmp_name.push(".tmp");

	let tmp_path = path.with_file_name(tmp_name);

	fs::write(&tmp_path, payload).map_err(|source| Error::Io { path: tmp_path.clone(), source })?;
	fs::rename(&tmp_path, path).map_err(|source| Error::Io { path: path.to_path_buf(), source })?;

	tracing::info!(path = %path.display(), candidates = corpus.len(), "Saved corpus.");

	Ok(())
}
