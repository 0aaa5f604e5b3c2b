//! Token library comparison and replacement suggestions.

mod name_similarity;
mod suggest;
mod tokens;

pub use name_similarity::{name_similarity, normalize_name};
pub use suggest::{suggest_tokens, suggest_tokens_default};
pub use tokens::{compare_tokens, compare_tokens_with, TokenCompareOptions};
