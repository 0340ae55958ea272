use std::{collections::HashSet, path::Path};

use crate::{Error, Result};

/// Profile URLs from the first column of a header-less CSV file, deduplicated in file order.
pub fn load_links(path: &Path) -> Result<Vec<String>> {
	let mut reader = csv::ReaderBuilder::new()
		.has_headers(false)
		.flexible(true)
		.from_path(path)
		.map_err(|source| Error::Csv { path: path.to_path_buf(), source })?;
	let mut seen = HashSet::new();
	let mut links = Vec::new();

	for record in reader.records() {
		let record = record.map_err(|source| Error::Csv { path: path.to_path_buf(), source })?;
		let Some(link) = record.get(0).map(str::trim).filter(|link| !link.is_empty()) else {
			continue;
		};

		if seen.insert(link.to_string()) {
			links.push(link.to_string());
		}
	}

	tracing::debug!(path = %path.display(), count = links.len(), "Loaded profile links.");

	Ok(links)
}
