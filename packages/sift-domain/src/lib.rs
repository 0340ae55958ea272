pub mod candidate;
pub mod contact;
pub mod html;
pub mod similarity;
pub mod structured;
pub mod verdict;

mod error;

pub use candidate::{Candidate, Corpus};
pub use error::{Error, Result};
pub use similarity::ScoredCandidate;
pub use verdict::Verdict;
