use std::collections::HashSet;

use serde_json::Map;

use sift_domain::{Candidate, Corpus, Verdict, similarity, verdict};

fn corpus() -> Corpus {
	let vectors: [(&str, [f32; 3]); 6] = [
		("https://firm.example/a", [0.9, 0.1, 0.0]),
		("https://firm.example/b", [0.1, 0.9, 0.2]),
		("https://firm.example/c", [0.5, 0.5, 0.5]),
		("https://firm.example/d", [-0.7, 0.1, 0.3]),
		("https://firm.example/e", [0.0, 0.0, 1.0]),
		("https://firm.example/f", [0.8, -0.2, 0.1]),
	];

	Corpus::from_candidates(vectors.into_iter().map(|(id, embedding)| Candidate {
		id: id.to_string(),
		raw_content: String::new(),
		structured_data: Map::new(),
		embedding: embedding.to_vec(),
		fetched_at: None,
	}))
	.expect("Corpus must build.")
}

#[test]
fn higher_cutoffs_only_narrow_the_result() {
	let corpus = corpus();
	let query = [1.0_f32, 0.2, 0.1];
	let cutoffs = [-1.0_f32, -0.5, 0.0, 0.25, 0.5, 0.75, 0.9, 1.0];
	let mut previous: Option<HashSet<String>> = None;

	for cutoff in cutoffs {
		let ranked = similarity::rank(&query, corpus.embeddings(), cutoff).expect("rank failed");
		let current: HashSet<_> = ranked.iter().map(|item| item.id.clone()).collect();

		assert!(ranked.iter().all(|item| item.score >= cutoff));
		assert!(ranked.windows(2).all(|pair| pair[0].score >= pair[1].score));

		if let Some(previous) = &previous {
			assert!(current.is_subset(previous), "cutoff {cutoff} widened the result");
		}

		previous = Some(current);
	}
}

#[test]
fn ranking_is_idempotent() {
	let corpus = corpus();
	let query = [0.3_f32, 0.3, 0.3];
	let first = similarity::rank(&query, corpus.embeddings(), 0.1).expect("rank failed");
	let second = similarity::rank(&query, corpus.embeddings(), 0.1).expect("rank failed");

	assert_eq!(first, second);
	assert!(!first.is_empty());
}

#[test]
fn verdict_contract() {
	assert!(verdict::parse_verdict("<thinking>ok</thinking><answer>Pass</answer>").is_pass());
	assert!(!verdict::parse_verdict("<answer>Fail</answer>").is_pass());
	assert!(!verdict::parse_verdict("<answer> pass </answer>").is_pass());
	assert!(matches!(verdict::parse_verdict("I think so."), Verdict::Malformed { .. }));
}
