use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use sift_config::{EmbeddingProviderConfig, ModelSize};

use crate::{Error, Result};

/// Flattens line breaks and tabs to spaces, trims, and drops inputs that end up empty.
pub fn normalize_inputs(texts: &[String]) -> Vec<String> {
	texts
		.iter()
		.map(|text| text.replace(['\n', '\r', '\t'], " ").trim().to_string())
		.filter(|text| !text.is_empty())
		.collect()
}

/// Embeds every non-empty input; the output aligns with [`normalize_inputs`], not with `texts`.
pub async fn embed(
	cfg: &EmbeddingProviderConfig,
	texts: &[String],
	size: ModelSize,
) -> Result<Vec<Vec<f32>>> {
	let inputs = normalize_inputs(texts);

	if inputs.is_empty() {
		return Ok(Vec::new());
	}

	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let body = serde_json::json!({
		"model": cfg.model_for(size),
		"input": inputs,
	});
	let res = client
		.post(url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let json = crate::read_json(res).await?;
	let vectors = parse_embedding_response(json)?;

	if vectors.len() != inputs.len() {
		return Err(Error::InvalidResponse {
			message: format!(
				"Embedding response has {} vectors for {} inputs.",
				vectors.len(),
				inputs.len()
			),
		});
	}
	if let Some(vec) = vectors.iter().find(|vec| vec.len() != size.dimensions()) {
		return Err(Error::InvalidResponse {
			message: format!(
				"Embedding vector has {} dimensions; expected {}.",
				vec.len(),
				size.dimensions()
			),
		});
	}

	tracing::debug!(count = vectors.len(), model = cfg.model_for(size), "Embedded texts.");

	Ok(vectors)
}

fn parse_embedding_response(json: Value) -> Result<Vec<Vec<f32>>> {
	let data = json.get("data").and_then(|v| v.as_array()).ok_or_else(|| {
		Error::InvalidResponse { message: "Embedding response is missing data array.".to_string() }
	})?;

	let mut indexed: Vec<(usize, Vec<f32>)> = Vec::with_capacity(data.len());

	for (fallback_index, item) in data.iter().enumerate() {
		let index = item
			.get("index")
			.and_then(|v| v.as_u64())
			.map(|v| v as usize)
			.unwrap_or(fallback_index);
		let embedding = item.get("embedding").and_then(|v| v.as_array()).ok_or_else(|| {
			Error::InvalidResponse { message: "Embedding item missing embedding array.".to_string() }
		})?;
		let mut vec = Vec::with_capacity(embedding.len());

		for value in embedding {
			let number = value.as_f64().ok_or_else(|| Error::InvalidResponse {
				message: "Embedding value must be numeric.".to_string(),
			})?;

			vec.push(number as f32);
		}

		indexed.push((index, vec));
	}

	indexed.sort_by_key(|(index, _)| *index);

	Ok(indexed.into_iter().map(|(_, vec)| vec).collect())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_embeddings_in_index_order() {
		let json = serde_json::json!({
			"data": [
				{ "index": 1, "embedding": [2.0, 3.0] },
				{ "index": 0, "embedding": [0.5, 1.5] }
			]
		});
		let parsed = parse_embedding_response(json).expect("parse failed");

		assert_eq!(parsed.len(), 2);
		assert_eq!(parsed[0], vec![0.5, 1.5]);
		assert_eq!(parsed[1], vec![2.0, 3.0]);
	}

	#[test]
	fn rejects_non_numeric_values() {
		let json = serde_json::json!({ "data": [{ "index": 0, "embedding": ["x"] }] });

		assert!(parse_embedding_response(json).is_err());
	}

	#[test]
	fn normalizes_and_drops_empty_inputs() {
		let texts = vec![
			"line one\nline two\ttabbed".to_string(),
			"   ".to_string(),
			String::new(),
			"  padded  ".to_string(),
		];

		assert_eq!(normalize_inputs(&texts), vec!["line one line two tabbed", "padded"]);
	}
}
