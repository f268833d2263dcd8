//! Content definitions and their instantiable variants

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{Result, activation_failed};

/// How instances of a definition attach to the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlacementKind {
    /// Placed freely at a point
    #[default]
    Free,
    /// Requires a host element (wall, floor, ...) to be placed
    Hosted,
}

/// One selectable sub-type of a content definition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstantiableVariant {
    pub name: String,

    /// Numeric driving parameters (lengths, counts)
    pub parameters: BTreeMap<String, f64>,

    active: bool,
}

impl InstantiableVariant {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: BTreeMap::new(),
            active: false,
        }
    }

    pub fn with_parameter(mut self, name: impl Into<String>, value: f64) -> Self {
        self.parameters.insert(name.into(), value);
        self
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Activate the variant so instances can be created from it.
    ///
    /// Returns `true` when the variant was activated by this call and `false`
    /// when it was already active. Activation regenerates the variant, which
    /// fails for negative or non-finite parameters.
    pub fn activate(&mut self, definition: &str) -> Result<bool> {
        if self.active {
            return Ok(false);
        }

        if let Some((param, value)) = self
            .parameters
            .iter()
            .find(|(_, value)| !value.is_finite() || **value < 0.0)
        {
            return Err(activation_failed(
                definition,
                &self.name,
                format!("parameter '{param}' cannot regenerate with value {value}"),
            ));
        }

        self.active = true;
        Ok(true)
    }

    pub(crate) fn deactivate(&mut self) {
        self.active = false;
    }
}

/// A named, self-contained unit of reusable content
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentDefinition {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    pub placement: PlacementKind,

    /// Package format version the definition was authored with
    pub format_version: u32,

    pub variants: Vec<InstantiableVariant>,
}

impl ContentDefinition {
    pub fn new(name: impl Into<String>, format_version: u32) -> Self {
        Self {
            name: name.into(),
            category: None,
            placement: PlacementKind::Free,
            format_version,
            variants: Vec::new(),
        }
    }

    pub fn with_variant(mut self, variant: InstantiableVariant) -> Self {
        self.variants.push(variant);
        self
    }

    pub fn with_placement(mut self, placement: PlacementKind) -> Self {
        self.placement = placement;
        self
    }

    pub fn variant(&self, name: &str) -> Option<&InstantiableVariant> {
        self.variants.iter().find(|v| v.name == name)
    }

    pub fn variant_mut(&mut self, name: &str) -> Option<&mut InstantiableVariant> {
        self.variants.iter_mut().find(|v| v.name == name)
    }

    pub fn variant_names(&self) -> Vec<String> {
        self.variants.iter().map(|v| v.name.clone()).collect()
    }

    /// Check the definition is usable: named, with at least one uniquely named variant
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("definition name cannot be empty".to_string());
        }
        if self.variants.is_empty() {
            return Err(format!("definition '{}' has no variants", self.name));
        }

        let mut seen = HashSet::new();
        for variant in &self.variants {
            if variant.name.trim().is_empty() {
                return Err(format!("definition '{}' has an unnamed variant", self.name));
            }
            if !seen.insert(variant.name.as_str()) {
                return Err(format!(
                    "definition '{}' declares variant '{}' more than once",
                    self.name, variant.name
                ));
            }
        }

        Ok(())
    }
}
