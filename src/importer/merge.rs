//! Transactional merge of a content definition into the target document
//!
//! One merge is one [`Transaction`]: import, activate every variant, place
//! one instance per variant. Any failure drops the transaction uncommitted,
//! which restores the target document to its state before the call.

use crate::config::DuplicatePolicy;
use crate::domain::{
    ContentDefinition, ElementId, PlacementCategory, PlacementInstance, PlacementKind,
    SourceRecord, TargetDocument, Xyz,
};
use crate::error::{Result, import_failed, placement_failed};
use crate::transaction::Transaction;

use super::subdocument::SubDocumentContext;

/// What a successful merge produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeResult {
    /// Name of the target-local definition
    pub definition: String,
    pub instance_count: usize,
    /// Variants activated by this merge (already-active ones excluded)
    pub activated: usize,
    pub instance_ids: Vec<ElementId>,
}

/// Merges content definitions into a target document
#[derive(Debug, Clone, Default)]
pub struct ContentMerger {
    on_duplicate: DuplicatePolicy,
}

impl ContentMerger {
    pub fn new(on_duplicate: DuplicatePolicy) -> Self {
        Self { on_duplicate }
    }

    /// Merge `definition`, extracted from `source`, into `target`.
    ///
    /// On error `target` is left exactly as it was before the call.
    pub fn merge(
        &self,
        target: &mut TargetDocument,
        definition: &ContentDefinition,
        source: &SubDocumentContext,
    ) -> Result<MergeResult> {
        let mut transaction = Transaction::start(target, format!("Load {}", definition.name));

        self.import(transaction.document_mut(), definition, source)?;
        let activated = activate_variants(transaction.document_mut(), definition)?;
        let instance_ids = place_instances(transaction.document_mut(), definition)?;

        transaction.commit();

        tracing::debug!(
            definition = %definition.name,
            instances = instance_ids.len(),
            activated,
            "definition merged"
        );
        Ok(MergeResult {
            definition: definition.name.clone(),
            instance_count: instance_ids.len(),
            activated,
            instance_ids,
        })
    }

    /// Attach a target-local copy of `definition`
    fn import(
        &self,
        document: &mut TargetDocument,
        definition: &ContentDefinition,
        source: &SubDocumentContext,
    ) -> Result<()> {
        if definition.format_version > document.format_version() {
            return Err(import_failed(
                &definition.name,
                format!(
                    "authored with format version {}, target document supports {}",
                    definition.format_version,
                    document.format_version()
                ),
            ));
        }

        match document.definition_mut(&definition.name) {
            Some(existing) => match self.on_duplicate {
                DuplicatePolicy::Reject => {
                    return Err(import_failed(
                        &definition.name,
                        "a definition with the same name is already loaded",
                    ));
                }
                DuplicatePolicy::Overwrite => overwrite_definition(existing, definition),
            },
            None => {
                let mut local = definition.clone();
                for variant in &mut local.variants {
                    variant.deactivate();
                }
                document.insert_definition(local);
            }
        }

        document.record_source(SourceRecord {
            path: source.display_path().to_string(),
            definition: definition.name.clone(),
            digest: source.digest().map(str::to_string),
        });
        Ok(())
    }
}

/// Reload an already-loaded definition over the existing one.
///
/// Variants whose parameters changed must regenerate, so they are deactivated;
/// unchanged variants keep their state. New variants are appended inactive.
fn overwrite_definition(existing: &mut ContentDefinition, incoming: &ContentDefinition) {
    existing.category.clone_from(&incoming.category);
    existing.placement = incoming.placement;
    existing.format_version = incoming.format_version;

    for variant in &incoming.variants {
        match existing.variant_mut(&variant.name) {
            Some(current) if current.parameters == variant.parameters => {}
            Some(current) => {
                current.parameters.clone_from(&variant.parameters);
                current.deactivate();
            }
            None => {
                let mut added = variant.clone();
                added.deactivate();
                existing.variants.push(added);
            }
        }
    }
}

fn activate_variants(document: &mut TargetDocument, definition: &ContentDefinition) -> Result<usize> {
    let Some(local) = document.definition_mut(&definition.name) else {
        return Err(import_failed(&definition.name, "definition missing after import"));
    };

    let mut activated = 0;
    for name in definition.variant_names() {
        let Some(variant) = local.variant_mut(&name) else {
            return Err(import_failed(
                &definition.name,
                format!("variant '{name}' missing after import"),
            ));
        };
        if variant.activate(&definition.name)? {
            activated += 1;
        }
    }
    Ok(activated)
}

fn place_instances(
    document: &mut TargetDocument,
    definition: &ContentDefinition,
) -> Result<Vec<ElementId>> {
    let Some(local) = document.definition(&definition.name) else {
        return Err(import_failed(&definition.name, "definition missing after import"));
    };

    let mut variants = Vec::with_capacity(definition.variants.len());
    for incoming in &definition.variants {
        let active = local
            .variant(&incoming.name)
            .is_some_and(|v| v.is_active());
        if !active {
            return Err(placement_failed(
                &definition.name,
                &incoming.name,
                "variant is not active",
            ));
        }
        if local.placement == PlacementKind::Hosted {
            return Err(placement_failed(
                &definition.name,
                &incoming.name,
                "hosted content needs a host element, the document has none",
            ));
        }
        variants.push(incoming.name.clone());
    }

    Ok(variants
        .into_iter()
        .map(|variant| {
            document.push_instance(PlacementInstance {
                id: ElementId(0),
                definition: definition.name.clone(),
                variant,
                location: Xyz::ORIGIN,
                category: PlacementCategory::NonStructural,
            })
        })
        .collect())
}
