//! Per-dialect extraction strategies behind the `FileExtractor` trait.
//!
//! Each dialect module turns one source file into components (or design
//! tokens) plus raw style signals. The private modules hold the parsing
//! helpers the dialects share: decorator and class-field scanning,
//! dependency collection, style-value extraction, and variant
//! expansion.

pub mod fast;
pub mod lit;
pub mod react;
pub mod stencil;
pub mod svelte;
pub mod templates;
pub mod token_files;
pub mod traits;

mod dependencies;
mod fields;
mod style_values;
mod variants;

pub use fast::FastExtractor;
pub use lit::LitExtractor;
pub use react::ReactExtractor;
pub use stencil::StencilExtractor;
pub use svelte::SvelteExtractor;
pub use templates::TemplateExtractor;
pub use token_files::{TokenFileExtractor, TokenUsageIndex};
pub use traits::{FileExtractor, FileOutput};
