//! family-loader - headless content definition loader
//!
//! Discovers resource packages in a working directory, merges the content
//! definition of each into one target document inside a transaction per
//! package, and saves the document as a single artifact file.
//!
//! The entry point is [`importer::ImportPipeline`]; a failed package never
//! stops the run, and the artifact is written only if at least one merged.

pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod error;
pub mod hash;
pub mod host;
pub mod importer;
pub mod path_utils;
pub mod trace;
pub mod transaction;
pub mod ui;
