//! Placement instances

use std::fmt;

use serde::Serialize;

/// Identifier of an element inside a target document
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ElementId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A point in model coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Xyz {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Xyz {
    pub const ORIGIN: Xyz = Xyz {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
}

/// Structural role of a placed instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlacementCategory {
    #[default]
    NonStructural,
    Structural,
}

/// A concrete instance of an activated variant placed in the target document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacementInstance {
    pub id: ElementId,
    pub definition: String,
    pub variant: String,
    pub location: Xyz,
    pub category: PlacementCategory,
}
