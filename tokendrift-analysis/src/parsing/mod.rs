//! Hand-written parsing primitives shared by every extractor.
//!
//! No syntax trees anywhere: extraction rests on one balanced-delimiter
//! scanner that is honest about strings and comments, plus small helpers
//! for destructuring patterns, type bodies, naming, and doc comments.

pub mod balanced;
pub mod comments;
pub mod naming;
pub mod props;

pub use balanced::{CODE_DELIMS, DelimTable, TYPE_DELIMS, extract_balanced, matching_close,
    read_until_unnested, split_top_level};
pub use comments::{contains_deprecated, doc_block_above, line_of_offset};
pub use naming::component_name_from_path;
pub use props::{ParsedProp, TypeField, find_type_body, parse_destructured_props,
    parse_type_fields};
