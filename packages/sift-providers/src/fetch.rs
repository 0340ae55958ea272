use std::time::Duration;

use reqwest::{
	Client,
	header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, USER_AGENT},
};

use sift_config::Ingest;

use crate::{Error, Result};

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";
const ACCEPT_LANGUAGE_EN: &str = "en-US,en;q=0.5";

pub fn browser_headers(user_agent: &str) -> Result<HeaderMap> {
	let mut headers = HeaderMap::new();

	headers.insert(USER_AGENT, user_agent.parse()?);
	headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));
	headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGE_EN));

	Ok(headers)
}

/// Downloads a profile page and returns its HTML body.
pub async fn fetch_page(cfg: &Ingest, url: &str) -> Result<String> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.fetch_timeout_ms)).build()?;
	let res = client.get(url).headers(browser_headers(&cfg.user_agent)?).send().await?;
	let status = res.status();

	if !status.is_success() {
		return Err(Error::Status { status: status.as_u16(), body: String::new() });
	}

	let html = res.text().await?;

	if html.trim().is_empty() {
		return Err(Error::InvalidResponse { message: format!("Page at {url} is empty.") });
	}

	Ok(html)
}
