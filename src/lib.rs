//! Atribuir - codebase attribution reporter
//!
//! This library attributes portions of a source tree to topical categories
//! (keyword matching over file paths and content) and to contributor groups
//! (per-line blame authorship), recursively aggregated from files up through
//! directories to the tree root.

pub mod attribution;
pub mod attribution_set;
pub mod blame;
pub mod cli;
pub mod csv_output;
pub mod definitions;
pub mod json_output;
pub mod keywords;
pub mod paths;
pub mod scoring;
pub mod walker;
