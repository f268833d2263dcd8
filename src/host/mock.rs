//! Scripted host for tests
//!
//! Documents are registered per path; every open and close is counted so
//! tests can check that each opened document is closed exactly once.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use super::{DocumentHost, HostDocument, default_template};
use crate::domain::{ContentDefinition, TargetDocument, Template, UnitSystem};
use crate::error::{Result, extraction_failed, open_failed};

/// What opening a registered path yields
#[derive(Debug, Clone)]
pub(crate) enum MockPackage {
    Definition(ContentDefinition),
    Corrupt,
    NoDefinition,
}

#[derive(Debug, Default)]
pub(crate) struct MockStats {
    pub opened: usize,
    pub closed: usize,
    /// Close calls per path, including repeated ones
    pub close_calls: HashMap<PathBuf, usize>,
}

#[derive(Debug, Default)]
pub(crate) struct MockHost {
    packages: HashMap<PathBuf, MockPackage>,
    stats: Rc<RefCell<MockStats>>,
}

impl MockHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_package(mut self, path: impl Into<PathBuf>, package: MockPackage) -> Self {
        self.packages.insert(path.into(), package);
        self
    }

    pub fn opened(&self) -> usize {
        self.stats.borrow().opened
    }

    pub fn closed(&self) -> usize {
        self.stats.borrow().closed
    }

    pub fn close_calls(&self, path: &Path) -> usize {
        self.stats
            .borrow()
            .close_calls
            .get(path)
            .copied()
            .unwrap_or(0)
    }
}

impl DocumentHost for MockHost {
    fn template(&self, unit_system: UnitSystem) -> Template {
        default_template(unit_system, 1)
    }

    fn new_target_document(&self, template: &Template) -> Result<TargetDocument> {
        Ok(TargetDocument::from_template(template))
    }

    fn open_document(&self, path: &Path) -> Result<Box<dyn HostDocument>> {
        let display = path.display().to_string();
        match self.packages.get(path) {
            None | Some(MockPackage::Corrupt) => Err(open_failed(display, "corrupt package")),
            Some(package) => {
                self.stats.borrow_mut().opened += 1;
                Ok(Box::new(MockDocument {
                    path: path.to_path_buf(),
                    title: display,
                    package: package.clone(),
                    open: true,
                    stats: Rc::clone(&self.stats),
                }))
            }
        }
    }
}

struct MockDocument {
    path: PathBuf,
    title: String,
    package: MockPackage,
    open: bool,
    stats: Rc<RefCell<MockStats>>,
}

impl HostDocument for MockDocument {
    fn title(&self) -> &str {
        &self.title
    }

    fn extract_definition(&self) -> Result<ContentDefinition> {
        match &self.package {
            MockPackage::Definition(definition) => Ok(definition.clone()),
            _ => Err(extraction_failed(&self.title, "no definition in document")),
        }
    }

    fn close(&mut self) {
        let mut stats = self.stats.borrow_mut();
        *stats.close_calls.entry(self.path.clone()).or_insert(0) += 1;
        if self.open {
            self.open = false;
            stats.closed += 1;
        }
    }
}
