//! Per-resource outcomes and the overall run result

use std::path::PathBuf;

use crate::error::LoaderError;

/// Result of one resource-processing cycle. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    pub resource_path: PathBuf,
    /// Path relative to the working directory, forward slashes
    pub display_path: String,
    pub success: bool,
    pub error_kind: Option<&'static str>,
    pub error_detail: Option<String>,
    pub definition: Option<String>,
    pub instance_count: usize,
    pub digest: Option<String>,
}

impl MergeOutcome {
    pub fn merged(
        resource_path: PathBuf,
        display_path: String,
        definition: String,
        instance_count: usize,
        digest: Option<String>,
    ) -> Self {
        Self {
            resource_path,
            display_path,
            success: true,
            error_kind: None,
            error_detail: None,
            definition: Some(definition),
            instance_count,
            digest,
        }
    }

    pub fn failed(
        resource_path: PathBuf,
        display_path: String,
        error: &LoaderError,
        digest: Option<String>,
    ) -> Self {
        Self {
            resource_path,
            display_path,
            success: false,
            error_kind: Some(error.kind()),
            error_detail: Some(error.to_string()),
            definition: None,
            instance_count: 0,
            digest,
        }
    }
}

/// Outcome of a whole pipeline run
#[derive(Debug)]
pub struct RunResult {
    pub success: bool,
    pub merged_count: usize,
    pub outcomes: Vec<MergeOutcome>,
    /// Artifact location, set only when the artifact was written
    pub artifact_path: Option<PathBuf>,
    /// Fatal error that ended the run
    pub failure: Option<LoaderError>,
}

impl RunResult {
    pub fn succeeded(outcomes: Vec<MergeOutcome>, artifact_path: PathBuf) -> Self {
        let merged_count = outcomes.iter().filter(|o| o.success).count();
        Self {
            success: true,
            merged_count,
            outcomes,
            artifact_path: Some(artifact_path),
            failure: None,
        }
    }

    pub fn failed(outcomes: Vec<MergeOutcome>, failure: LoaderError) -> Self {
        let merged_count = outcomes.iter().filter(|o| o.success).count();
        Self {
            success: false,
            merged_count,
            outcomes,
            artifact_path: None,
            failure: Some(failure),
        }
    }

    /// Taxonomy name of the fatal error, if any
    pub fn reason(&self) -> Option<&'static str> {
        self.failure.as_ref().map(LoaderError::kind)
    }

    pub fn failed_outcomes(&self) -> impl Iterator<Item = &MergeOutcome> {
        self.outcomes.iter().filter(|o| !o.success)
    }
}
