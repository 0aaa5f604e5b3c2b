//! Re-exports of performance-oriented collection types.

pub use rustc_hash::{FxHashMap, FxHashSet};
pub use smallvec::SmallVec;
pub use std::collections::BTreeMap;

/// SmallVec optimized for token aliases (usually <2).
pub type SmallVec2<T> = SmallVec<[T; 2]>;

/// SmallVec optimized for component tags (usually <4).
pub type SmallVec4<T> = SmallVec<[T; 4]>;
