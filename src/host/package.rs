//! Resource package file format
//!
//! Packages are YAML documents:
//!
//! ```yaml
//! format_version: 1
//! kind: definition
//! definition:
//!   name: Desk
//!   category: Furniture
//!   placement: free
//!   variants:
//!     - name: 1200x600
//!       parameters: { width: 1.2, depth: 0.6 }
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::domain::{ContentDefinition, InstantiableVariant, PlacementKind};
use crate::error::{Result, extraction_failed, open_failed};

/// Newest package format this host understands
pub const PACKAGE_FORMAT_VERSION: u32 = 1;

/// Document kind holding a content definition
pub const DEFINITION_KIND: &str = "definition";

/// A parsed resource package
#[derive(Debug, Clone, Deserialize)]
pub struct PackageFile {
    pub format_version: u32,

    #[serde(default = "default_kind")]
    pub kind: String,

    #[serde(default)]
    pub definition: Option<PackageDefinition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PackageDefinition {
    pub name: String,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub placement: PlacementKind,

    #[serde(default)]
    pub variants: Vec<PackageVariant>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PackageVariant {
    pub name: String,

    #[serde(default)]
    pub parameters: BTreeMap<String, f64>,
}

fn default_kind() -> String {
    DEFINITION_KIND.to_string()
}

impl PackageFile {
    /// Parse package content; anything that is not a package document is an open failure
    pub fn parse(content: &str, path: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Err(open_failed(path, "file is empty"));
        }
        serde_yaml::from_str(content).map_err(|e| open_failed(path, e.to_string()))
    }

    /// Build the content definition the package carries
    pub fn to_definition(&self, path: &str) -> Result<ContentDefinition> {
        if self.kind != DEFINITION_KIND {
            return Err(extraction_failed(
                path,
                format!("document kind '{}' holds no content definition", self.kind),
            ));
        }

        let Some(package) = &self.definition else {
            return Err(extraction_failed(path, "document has no definition section"));
        };

        let definition = ContentDefinition {
            name: package.name.clone(),
            category: package.category.clone(),
            placement: package.placement,
            format_version: self.format_version,
            variants: package
                .variants
                .iter()
                .map(|v| {
                    let mut variant = InstantiableVariant::new(&v.name);
                    variant.parameters = v.parameters.clone();
                    variant
                })
                .collect(),
        };

        definition
            .validate()
            .map_err(|reason| extraction_failed(path, reason))?;

        Ok(definition)
    }
}
