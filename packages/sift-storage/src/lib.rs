pub mod corpus;
pub mod links;

mod error;

pub use error::{Error, Result};
