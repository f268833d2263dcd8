//! The target document assembled across a run

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::definition::ContentDefinition;
use super::placement::{ElementId, PlacementInstance};

/// Unit system of a document, fixed at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitSystem::Metric => write!(f, "metric"),
            UnitSystem::Imperial => write!(f, "imperial"),
        }
    }
}

impl FromStr for UnitSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "metric" => Ok(UnitSystem::Metric),
            "imperial" => Ok(UnitSystem::Imperial),
            other => Err(format!(
                "unknown unit system '{other}' (expected metric or imperial)"
            )),
        }
    }
}

/// Host-provided template a target document is created from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub name: String,
    pub unit_system: UnitSystem,
    /// Newest package format the created document accepts
    pub format_version: u32,
}

/// Where a merged definition came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceRecord {
    /// Resource path relative to the working directory
    pub path: String,
    pub definition: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

/// Mutable contents of a target document, captured for rollback
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentState {
    definitions: BTreeMap<String, ContentDefinition>,
    instances: Vec<PlacementInstance>,
    sources: Vec<SourceRecord>,
    next_id: u64,
}

/// The single document built during a run
///
/// Only [`crate::transaction::Transaction`] hands out mutable access, so
/// every mutation happens inside a transaction.
#[derive(Debug)]
pub struct TargetDocument {
    template: String,
    unit_system: UnitSystem,
    format_version: u32,
    state: DocumentState,
}

impl TargetDocument {
    /// Create an empty document from a template
    pub fn from_template(template: &Template) -> Self {
        Self {
            template: template.name.clone(),
            unit_system: template.unit_system,
            format_version: template.format_version,
            state: DocumentState {
                definitions: BTreeMap::new(),
                instances: Vec::new(),
                sources: Vec::new(),
                next_id: 1,
            },
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn unit_system(&self) -> UnitSystem {
        self.unit_system
    }

    pub fn format_version(&self) -> u32 {
        self.format_version
    }

    pub fn definition(&self, name: &str) -> Option<&ContentDefinition> {
        self.state.definitions.get(name)
    }

    /// Definitions in name order
    pub fn definitions(&self) -> impl Iterator<Item = &ContentDefinition> {
        self.state.definitions.values()
    }

    pub fn definition_names(&self) -> Vec<String> {
        self.state.definitions.keys().cloned().collect()
    }

    pub fn instances(&self) -> &[PlacementInstance] {
        &self.state.instances
    }

    pub fn instance_count(&self) -> usize {
        self.state.instances.len()
    }

    pub fn sources(&self) -> &[SourceRecord] {
        &self.state.sources
    }

    pub(crate) fn definition_mut(&mut self, name: &str) -> Option<&mut ContentDefinition> {
        self.state.definitions.get_mut(name)
    }

    pub(crate) fn insert_definition(&mut self, definition: ContentDefinition) {
        self.state
            .definitions
            .insert(definition.name.clone(), definition);
    }

    pub(crate) fn push_instance(&mut self, mut instance: PlacementInstance) -> ElementId {
        let id = ElementId(self.state.next_id);
        self.state.next_id += 1;
        instance.id = id;
        self.state.instances.push(instance);
        id
    }

    pub(crate) fn record_source(&mut self, source: SourceRecord) {
        self.state.sources.push(source);
    }

    pub(crate) fn snapshot(&self) -> DocumentState {
        self.state.clone()
    }

    pub(crate) fn restore(&mut self, state: DocumentState) {
        self.state = state;
    }
}
