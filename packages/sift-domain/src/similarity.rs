use std::cmp::Ordering;

use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
	pub id: String,
	pub score: f32,
}

/// Scores every candidate against `query` and keeps those at or above `cutoff`.
///
/// Candidates with a zero-norm embedding never match. Results are sorted by descending score,
/// ties broken by ascending identifier so the order is stable across runs.
pub fn rank<'a, I>(query: &[f32], candidates: I, cutoff: f32) -> Result<Vec<ScoredCandidate>>
where
	I: IntoIterator<Item = (&'a str, &'a [f32])>,
{
	if !cutoff.is_finite() || !(-1.0..=1.0).contains(&cutoff) {
		return Err(Error::InvalidCutoff { cutoff });
	}

	let query_norm = norm(query);

	if query_norm <= f32::EPSILON {
		return Err(Error::ZeroNormQuery);
	}

	let mut seen = 0_usize;
	let mut out = Vec::new();

	for (id, embedding) in candidates {
		seen += 1;

		if embedding.len() != query.len() {
			return Err(Error::DimensionMismatch {
				id: id.to_string(),
				expected: query.len(),
				actual: embedding.len(),
			});
		}

		let Some(score) = cosine(query, query_norm, embedding) else {
			continue;
		};

		if score >= cutoff {
			out.push(ScoredCandidate { id: id.to_string(), score });
		}
	}

	if seen == 0 {
		return Err(Error::EmptyCorpus);
	}

	out.sort_by(|left, right| {
		cmp_f32_desc(left.score, right.score).then_with(|| left.id.cmp(&right.id))
	});

	Ok(out)
}

pub fn cmp_f32_desc(a: f32, b: f32) -> Ordering {
	match (a.is_nan(), b.is_nan()) {
		(true, true) => Ordering::Equal,
		(true, false) => Ordering::Greater,
		(false, true) => Ordering::Less,
		(false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
	}
}

/// Cosine of two equal-length vectors given the first one's norm; `None` when `rhs` is zero.
fn cosine(lhs: &[f32], lhs_norm: f32, rhs: &[f32]) -> Option<f32> {
	let rhs_norm = norm(rhs);

	if rhs_norm <= f32::EPSILON {
		return None;
	}

	Some((dot(lhs, rhs) / (lhs_norm * rhs_norm)).clamp(-1.0, 1.0))
}

fn dot(lhs: &[f32], rhs: &[f32]) -> f32 {
	lhs.iter().zip(rhs).map(|(l, r)| l * r).sum()
}

fn norm(vec: &[f32]) -> f32 {
	dot(vec, vec).sqrt()
}
