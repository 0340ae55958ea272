use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use serde_json::Map;
use time::macros::datetime;

use sift_domain::{Candidate, Corpus};
use sift_storage::{Error, corpus, links};

fn temp_path(extension: &str) -> PathBuf {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System time must be valid.")
		.as_nanos();
	let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
	let mut path = env::temp_dir();

	path.push(format!("sift_storage_test_{nanos}_{}_{ordinal}.{extension}", std::process::id()));

	path
}

#[test]
fn missing_and_blank_files_load_empty() {
	let path = temp_path("json");

	assert!(corpus::load(&path).expect("Missing file must load.").is_empty());

	fs::write(&path, "  \n").expect("Failed to write corpus.");

	let loaded = corpus::load(&path);

	fs::remove_file(&path).expect("Failed to remove corpus.");

	assert!(loaded.expect("Blank file must load.").is_empty());
}

#[test]
fn reads_files_without_timestamps() {
	let path = temp_path("json");
	let payload = serde_json::json!({
		"http://example.com/lawyer1": {
			"raw_content": "Worked on major cases for ABC Network and NBC",
			"structured_data": { "name": "John Smith", "education": "Yale Law School" },
			"embedding": [0.1, 0.2, 0.3]
		}
	});

	fs::write(&path, payload.to_string()).expect("Failed to write corpus.");

	let loaded = corpus::load(&path);

	fs::remove_file(&path).expect("Failed to remove corpus.");

	let loaded = loaded.expect("Corpus must load.");
	let candidate = loaded.get("http://example.com/lawyer1").expect("Missing candidate.");

	assert_eq!(candidate.structured_data["name"], "John Smith");
	assert_eq!(candidate.fetched_at, None);
	assert!(candidate.profile_text().contains("Yale Law School"));
}

#[test]
fn saved_corpus_loads_back() {
	let path = temp_path("json");
	let mut fields = Map::new();

	fields.insert("name".to_string(), serde_json::json!("Jane Doe"));

	let original = Corpus::from_candidates([Candidate {
		id: "http://example.com/lawyer2".to_string(),
		raw_content: "Corporate lawyer specializing in mergers".to_string(),
		structured_data: fields,
		embedding: vec![0.5, -0.25],
		fetched_at: Some(datetime!(2026-10-01 12:00 UTC)),
	}])
	.expect("Corpus must build.");

	corpus::save(&path, &original).expect("Failed to save corpus.");

	let loaded = corpus::load(&path);

	fs::remove_file(&path).expect("Failed to remove corpus.");

	let loaded = loaded.expect("Corpus must load.");

	assert_eq!(loaded.get("http://example.com/lawyer2"), original.get("http://example.com/lawyer2"));
}

#[test]
fn mixed_dimensions_are_rejected() {
	let path = temp_path("json");
	let payload = serde_json::json!({
		"a": { "raw_content": "a", "embedding": [0.1, 0.2] },
		"b": { "raw_content": "b", "embedding": [0.1, 0.2, 0.3] }
	});

	fs::write(&path, payload.to_string()).expect("Failed to write corpus.");

	let result = corpus::load(&path);

	fs::remove_file(&path).expect("Failed to remove corpus.");

	assert!(matches!(result, Err(Error::Validation { .. })));
}

#[test]
fn links_use_first_column_once() {
	let path = temp_path("csv");

	fs::write(
		&path,
		"https://firm.example/a\n\nhttps://firm.example/b,partner\nhttps://firm.example/a\n",
	)
	.expect("Failed to write links.");

	let loaded = links::load_links(&path);

	fs::remove_file(&path).expect("Failed to remove links.");

	assert_eq!(
		loaded.expect("Links must load."),
		vec!["https://firm.example/a".to_string(), "https://firm.example/b".to_string()]
	);
}
