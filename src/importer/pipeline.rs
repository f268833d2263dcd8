//! Import pipeline orchestration
//!
//! This module handles:
//! - Creating the target document from the host template
//! - Discovering resource packages under the working directory
//! - Running one isolated open → extract → merge → close cycle per package
//! - Saving the artifact once, only when at least one package merged
//!
//! Per-package errors are traced, recorded as a failed [`MergeOutcome`], and
//! never stop the loop. Fatal errors end the run with a failed [`RunResult`].

use std::path::{Path, PathBuf};

use crate::config::PipelineConfig;
use crate::domain::{MergeOutcome, RunResult, TargetDocument};
use crate::error::{
    LoaderError, Result, all_resources_failed, no_resources_found, precondition_failed,
};
use crate::hash::hash_file;
use crate::host::DocumentHost;
use crate::path_utils::{display_relative, to_forward_slashes};
use crate::trace::TraceSink;
use crate::ui::ProgressReporter;

use super::discovery::{DiscoveredResource, GlobDiscovery, ResourceDiscovery};
use super::merge::{ContentMerger, MergeResult};
use super::subdocument::SubDocumentContext;
use super::writer::ArtifactWriter;

/// Top-level orchestrator of one run
pub struct ImportPipeline<'a> {
    /// Automation host; a run without one fails its precondition check
    host: Option<&'a dyn DocumentHost>,
    config: &'a PipelineConfig,
    trace: &'a mut dyn TraceSink,
    discovery: Box<dyn ResourceDiscovery + 'a>,
    merger: ContentMerger,
    writer: ArtifactWriter,
    progress: Option<&'a mut dyn ProgressReporter>,
}

impl<'a> ImportPipeline<'a> {
    pub fn new(
        host: Option<&'a dyn DocumentHost>,
        config: &'a PipelineConfig,
        trace: &'a mut dyn TraceSink,
    ) -> Self {
        Self {
            host,
            config,
            trace,
            discovery: Box::new(GlobDiscovery::new(&config.pattern)),
            merger: ContentMerger::new(config.on_duplicate),
            writer: ArtifactWriter::new(),
            progress: None,
        }
    }

    /// Replace the glob discovery configured from `pattern`
    pub fn with_discovery(mut self, discovery: impl ResourceDiscovery + 'a) -> Self {
        self.discovery = Box::new(discovery);
        self
    }

    pub fn with_progress(mut self, progress: &'a mut dyn ProgressReporter) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Run the pipeline against `working_dir`.
    ///
    /// Never returns an error: fatal failures are traced and reported through
    /// [`RunResult::failure`].
    #[tracing::instrument(skip_all, fields(working_dir = %working_dir.display()))]
    pub fn run(&mut self, working_dir: &Path) -> RunResult {
        let mut outcomes = Vec::new();
        match self.execute(working_dir, &mut outcomes) {
            Ok(artifact) => {
                if let Some(progress) = self.progress.as_deref_mut() {
                    progress.finish();
                }
                tracing::info!(
                    merged = outcomes.iter().filter(|o| o.success).count(),
                    failed = outcomes.iter().filter(|o| !o.success).count(),
                    "run succeeded"
                );
                RunResult::succeeded(outcomes, artifact)
            }
            Err(err) => {
                if let Some(progress) = self.progress.as_deref_mut() {
                    progress.abandon();
                }
                self.trace.error(&err);
                tracing::warn!(reason = err.kind(), "run failed");
                RunResult::failed(outcomes, err)
            }
        }
    }

    fn execute(&mut self, working_dir: &Path, outcomes: &mut Vec<MergeOutcome>) -> Result<PathBuf> {
        let host = self.check_preconditions(working_dir)?;

        let template = host.template(self.config.unit_system);
        self.trace.info(&format!(
            "Creating a new target document from template `{}` ... ",
            template.name
        ));
        let mut target = host.new_target_document(&template)?;
        self.trace.info(" - DONE.");

        self.trace.info("Getting resource packages ... ");
        let resources = self.discover(working_dir)?;
        self.trace.info(&format!(
            " - Found {} resource package{}.",
            resources.len(),
            if resources.len() == 1 { "" } else { "s" }
        ));

        if let Some(progress) = self.progress.as_deref_mut() {
            progress.start(resources.len() as u64);
        }

        let total = resources.len();
        for (index, resource) in resources.iter().enumerate() {
            let shown = display_relative(&resource.absolute_path, working_dir);
            if let Some(progress) = self.progress.as_deref_mut() {
                progress.update_resource(&shown, index + 1, total);
            }

            let outcome = self.load_resource(host, &mut target, resource, shown);
            outcomes.push(outcome);

            if let Some(progress) = self.progress.as_deref_mut() {
                progress.inc_resource();
            }
        }

        let merged = outcomes.iter().filter(|o| o.success).count();
        if merged == 0 {
            self.trace
                .info("Cannot load any resource package into the target document");
            return Err(all_resources_failed(outcomes.len()));
        }

        let output = working_dir.join(&self.config.output_file);
        self.trace.info(" Saving changes to target document ... ");
        self.writer.save(&target, &output)?;
        self.trace.info(" - DONE.");

        Ok(output)
    }

    fn check_preconditions(&self, working_dir: &Path) -> Result<&'a dyn DocumentHost> {
        let Some(host) = self.host else {
            return Err(precondition_failed("no automation host is available"));
        };
        if !working_dir.is_dir() {
            return Err(precondition_failed(format!(
                "working directory {} does not exist",
                working_dir.display()
            )));
        }
        Ok(host)
    }

    /// Discover candidates, honouring `first_only`; none at all is fatal
    fn discover(&self, working_dir: &Path) -> Result<Vec<DiscoveredResource>> {
        let root = if self.config.resources_dir == Path::new(".") {
            working_dir.to_path_buf()
        } else {
            working_dir.join(&self.config.resources_dir)
        };
        let mut resources = self.discovery.discover(&root)?;

        if resources.is_empty() {
            return Err(no_resources_found(
                to_forward_slashes(&root),
                self.discovery.describe(),
            ));
        }

        if self.config.first_only && resources.len() > 1 {
            tracing::info!(
                skipped = resources.len() - 1,
                "first_only is set, processing the first resource package only"
            );
            resources.truncate(1);
        }
        Ok(resources)
    }

    /// One isolated resource cycle; errors become a failed outcome
    fn load_resource(
        &mut self,
        host: &dyn DocumentHost,
        target: &mut TargetDocument,
        resource: &DiscoveredResource,
        shown: String,
    ) -> MergeOutcome {
        self.trace.info(&format!("Loading `{shown}` ... "));

        let digest = match hash_file(&resource.absolute_path) {
            Ok(digest) => Some(digest),
            Err(err) => {
                tracing::debug!(path = %shown, error = %err, "resource not hashed");
                None
            }
        };

        match self.merge_resource(host, target, resource, &shown, digest.clone()) {
            Ok(result) => {
                self.trace.info(" - DONE.");
                MergeOutcome::merged(
                    resource.absolute_path.clone(),
                    shown,
                    result.definition,
                    result.instance_count,
                    digest,
                )
            }
            Err(err) => {
                self.trace_resource_error(&err, &shown);
                MergeOutcome::failed(resource.absolute_path.clone(), shown, &err, digest)
            }
        }
    }

    fn merge_resource(
        &self,
        host: &dyn DocumentHost,
        target: &mut TargetDocument,
        resource: &DiscoveredResource,
        shown: &str,
        digest: Option<String>,
    ) -> Result<MergeResult> {
        let mut context = SubDocumentContext::open(host, &resource.absolute_path, shown, digest)?;
        let definition = context.extract_definition()?;
        let result = self.merger.merge(target, &definition, &context);
        context.close();
        result
    }

    fn trace_resource_error(&mut self, err: &LoaderError, shown: &str) {
        self.trace.error(err);
        self.trace.info(&format!("Failed to load `{shown}`"));
        tracing::debug!(
            path = %shown,
            kind = err.kind(),
            recoverable = err.is_recoverable(),
            "resource skipped"
        );
    }
}

#[cfg(test)]
mod tests;
