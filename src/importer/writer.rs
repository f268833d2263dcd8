//! Artifact writing for the assembled target document
//!
//! This module handles:
//! - Validating the document before it is saved
//! - Serializing it as pretty JSON
//! - Replacing the destination atomically (temporary file, then persist)

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tempfile::NamedTempFile;

use crate::domain::{ContentDefinition, PlacementInstance, SourceRecord, TargetDocument, UnitSystem};
use crate::error::{Result, persist_failed};

/// On-disk shape of the artifact
#[derive(Debug, Serialize)]
struct ArtifactDocument<'a> {
    format_version: u32,
    template: &'a str,
    unit_system: UnitSystem,
    definitions: Vec<&'a ContentDefinition>,
    instances: &'a [PlacementInstance],
    sources: &'a [SourceRecord],
}

/// Persists a target document
#[derive(Debug, Clone, Copy, Default)]
pub struct ArtifactWriter;

impl ArtifactWriter {
    pub fn new() -> Self {
        Self
    }

    /// Save `target` to `output`, overwriting any existing file
    pub fn save(&self, target: &TargetDocument, output: &Path) -> Result<()> {
        let shown = output.display().to_string();

        validate(target).map_err(|reason| persist_failed(&shown, reason))?;

        let artifact = ArtifactDocument {
            format_version: target.format_version(),
            template: target.template(),
            unit_system: target.unit_system(),
            definitions: target.definitions().collect(),
            instances: target.instances(),
            sources: target.sources(),
        };
        let mut json = serde_json::to_string_pretty(&artifact)
            .map_err(|e| persist_failed(&shown, e.to_string()))?;
        json.push('\n');

        let parent = match output.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        if !parent.is_dir() {
            return Err(persist_failed(
                &shown,
                format!("directory {} does not exist", parent.display()),
            ));
        }

        let mut temp =
            NamedTempFile::new_in(parent).map_err(|e| persist_failed(&shown, e.to_string()))?;
        temp.write_all(json.as_bytes())
            .and_then(|()| temp.flush())
            .map_err(|e| persist_failed(&shown, e.to_string()))?;
        temp.persist(output)
            .map_err(|e| persist_failed(&shown, e.error.to_string()))?;

        tracing::info!(
            path = %shown,
            definitions = artifact.definitions.len(),
            instances = artifact.instances.len(),
            "artifact saved"
        );
        Ok(())
    }
}

/// Every instance must reference an existing, active variant
fn validate(target: &TargetDocument) -> std::result::Result<(), String> {
    for instance in target.instances() {
        let Some(definition) = target.definition(&instance.definition) else {
            return Err(format!(
                "instance {} references unknown definition '{}'",
                instance.id, instance.definition
            ));
        };
        match definition.variant(&instance.variant) {
            Some(variant) if variant.is_active() => {}
            Some(_) => {
                return Err(format!(
                    "instance {} references inactive variant '{}' of '{}'",
                    instance.id, instance.variant, instance.definition
                ));
            }
            None => {
                return Err(format!(
                    "instance {} references unknown variant '{}' of '{}'",
                    instance.id, instance.variant, instance.definition
                ));
            }
        }
    }
    Ok(())
}
