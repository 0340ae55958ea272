use std::time::Duration;

use reqwest::Client;
use serde_json::{Map, Value};

use sift_config::LlmProviderConfig;

use crate::{Error, Result};

/// One chat completion call. Unset prompts are left out of the message list.
#[derive(Debug, Clone, Default)]
pub struct CompletionRequest {
	/// Overrides the configured model when set.
	pub model: Option<String>,
	pub system_prompt: Option<String>,
	pub user_prompt: Option<String>,
	pub assistant_prompt: Option<String>,
	/// Keys laid over the request body as-is, e.g. `temperature` or `max_tokens`.
	pub params: Option<Map<String, Value>>,
}
impl CompletionRequest {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn model(mut self, model: impl Into<String>) -> Self {
		self.model = Some(model.into());

		self
	}

	pub fn system(mut self, prompt: impl Into<String>) -> Self {
		self.system_prompt = Some(prompt.into());

		self
	}

	pub fn user(mut self, prompt: impl Into<String>) -> Self {
		self.user_prompt = Some(prompt.into());

		self
	}

	pub fn assistant(mut self, prompt: impl Into<String>) -> Self {
		self.assistant_prompt = Some(prompt.into());

		self
	}

	pub fn params(mut self, params: Map<String, Value>) -> Self {
		self.params = Some(params);

		self
	}
}

pub async fn complete(cfg: &LlmProviderConfig, request: &CompletionRequest) -> Result<String> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let body = build_body(cfg, request);
	let res = client
		.post(url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let json = crate::read_json(res).await?;

	parse_completion_content(json)
}

pub fn build_messages(request: &CompletionRequest) -> Vec<Value> {
	let mut messages = Vec::with_capacity(3);

	for (role, content) in [
		("system", &request.system_prompt),
		("assistant", &request.assistant_prompt),
		("user", &request.user_prompt),
	] {
		if let Some(content) = content.as_deref().filter(|content| !content.is_empty()) {
			messages.push(serde_json::json!({ "role": role, "content": content }));
		}
	}

	messages
}

pub fn build_body(cfg: &LlmProviderConfig, request: &CompletionRequest) -> Value {
	let mut body = Map::new();

	body.insert(
		"model".to_string(),
		Value::String(request.model.clone().unwrap_or_else(|| cfg.model.clone())),
	);
	body.insert("messages".to_string(), Value::Array(build_messages(request)));
	body.insert("temperature".to_string(), serde_json::json!(cfg.temperature));

	if let Some(params) = &request.params {
		for (key, value) in params {
			body.insert(key.clone(), value.clone());
		}
	}

	Value::Object(body)
}

fn parse_completion_content(json: Value) -> Result<String> {
	json.get("choices")
		.and_then(|v| v.as_array())
		.and_then(|arr| arr.first())
		.and_then(|choice| choice.get("message"))
		.and_then(|msg| msg.get("content"))
		.and_then(|c| c.as_str())
		.map(str::to_string)
		.ok_or_else(|| Error::InvalidResponse {
			message: "Completion response is missing message content.".to_string(),
		})
}
