//! # tokendrift-analysis
//!
//! Analysis engine for the tokendrift design-token drift scanner.
//! Contains the scanner substrate, lightweight source parsing,
//! framework extractors, signal collection, token normalization,
//! comparison, and the drift detection engine.

#![allow(clippy::module_inception)]

pub mod compare;
pub mod drift;
pub mod extractors;
pub mod normalize;
pub mod orchestrator;
pub mod parsing;
pub mod scanner;
pub mod signals;

pub use orchestrator::{ProjectScan, ProjectScanner};
pub use scanner::{FileScanner, ScanCancellation};
