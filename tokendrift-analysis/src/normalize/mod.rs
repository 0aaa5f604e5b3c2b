//! Value normalization: parse the many surface spellings of colors and
//! spacing into canonical forms that can be compared numerically.

pub mod color;
pub mod spacing;

pub use color::{color_similarity, normalize_color};
pub use spacing::{normalize_spacing, spacing_parts, spacing_similarity};
