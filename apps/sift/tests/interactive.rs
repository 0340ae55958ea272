use std::sync::Arc;

use sift::interactive;
use sift_domain::Corpus;
use sift_testkit::{StubCompletion, StubEmbedding, StubFetcher, candidate, service, test_config};

fn unit(x: f32) -> Vec<f32> {
	vec![x, (1.0 - x * x).sqrt()]
}

async fn session(input: &str, completion: Arc<StubCompletion>) -> String {
	let embedding = Arc::new(StubEmbedding::new().with("Find a lawyer: went to Yale", vec![1.0, 0.0]));
	let sift = service(test_config(0.8), embedding, completion, Arc::new(StubFetcher::new()));
	let corpus = Corpus::from_candidates([
		candidate("https://firm.test/a", "Yale Law School", unit(0.91)),
		candidate("https://firm.test/b", "State University", unit(0.3)),
	])
	.expect("Corpus must be valid.");
	let mut out = Vec::new();

	interactive::run_loop(&sift, &corpus, input.as_bytes(), &mut out)
		.await
		.expect("Session must finish.");

	String::from_utf8(out).expect("Output must be UTF-8.")
}

#[tokio::test]
async fn single_query_prints_a_result_block() {
	let out = session("Single\nwent to Yale\nQ\n", Arc::new(StubCompletion::verdict("Pass"))).await;

	assert!(out.contains("Search Results for: 'went to Yale'"));
	assert!(out.contains("- https://firm.test/a\n"));
	assert!(!out.contains("https://firm.test/b"));
}

#[tokio::test]
async fn malformed_list_reprompts_until_valid() {
	let completion = Arc::new(StubCompletion::verdict("Fail"));
	let out = session("List\n['went to Yale'\n['went to Yale']\nQ\n", completion.clone()).await;

	assert_eq!(out.matches("Error parsing input").count(), 1);
	assert_eq!(out.matches("or 'Q' to exit").count(), 2);
	assert!(out.contains("No matches found"));
	assert_eq!(completion.calls(), 1);
}

#[tokio::test]
async fn list_can_be_aborted_and_unknown_commands_are_reported() {
	let completion = Arc::new(StubCompletion::verdict("Pass"));
	let out = session("List\nQ\nsearch\nQ\n", completion.clone()).await;

	assert!(out.contains("Invalid command. Please try again."));
	assert!(!out.contains("Search Results"));
	assert_eq!(out.matches("Available commands:").count(), 3);
	assert_eq!(completion.calls(), 0);
}

#[tokio::test]
async fn search_failure_keeps_the_loop_running() {
	let out = session("Single\n   \nQ\n", Arc::new(StubCompletion::verdict("Pass"))).await;

	assert!(out.contains("Search failed: Invalid request: Query must be non-empty."));
	assert_eq!(out.matches("Available commands:").count(), 2);
}

#[tokio::test]
async fn end_of_input_ends_the_session() {
	let out = session("Single\n", Arc::new(StubCompletion::verdict("Pass"))).await;

	assert!(out.ends_with("Enter your query:\n"));
}
