//! Command implementations for family-loader CLI

pub mod completions;
pub mod run;
pub mod version;
