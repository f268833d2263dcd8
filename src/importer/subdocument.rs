//! Scoped lifetime of one opened resource package
//!
//! A definition cannot be merged straight from a file path: the package is
//! opened as a live document, the definition is pulled out, and the document
//! is closed again. [`SubDocumentContext`] owns that document and closes it
//! exactly once, on every exit path, including unwinding.

use std::path::Path;

use crate::domain::ContentDefinition;
use crate::error::{Result, extraction_failed};
use crate::host::{DocumentHost, HostDocument};

pub struct SubDocumentContext {
    display_path: String,
    digest: Option<String>,
    document: Option<Box<dyn HostDocument>>,
    /// Name of the extracted definition, set once extraction succeeded
    extracted: Option<String>,
}

impl SubDocumentContext {
    /// Open `path` through the host
    pub fn open(
        host: &dyn DocumentHost,
        path: &Path,
        display_path: impl Into<String>,
        digest: Option<String>,
    ) -> Result<Self> {
        let document = host.open_document(path)?;
        Ok(Self {
            display_path: display_path.into(),
            digest,
            document: Some(document),
            extracted: None,
        })
    }

    /// Pull the content definition out of the open document
    pub fn extract_definition(&mut self) -> Result<ContentDefinition> {
        let Some(document) = self.document.as_ref() else {
            return Err(extraction_failed(
                &self.display_path,
                "document is already closed",
            ));
        };
        let definition = document.extract_definition()?;
        self.extracted = Some(definition.name.clone());
        Ok(definition)
    }

    pub fn title(&self) -> Option<&str> {
        self.document.as_ref().map(|d| d.title())
    }

    /// Path relative to the working directory, forward slashes
    pub fn display_path(&self) -> &str {
        &self.display_path
    }

    pub fn digest(&self) -> Option<&str> {
        self.digest.as_deref()
    }

    pub fn extracted_definition(&self) -> Option<&str> {
        self.extracted.as_deref()
    }

    pub fn is_open(&self) -> bool {
        self.document.is_some()
    }

    /// Close the document without saving. Later calls do nothing.
    pub fn close(&mut self) {
        if let Some(mut document) = self.document.take() {
            document.close();
            tracing::debug!(path = %self.display_path, "sub-document released");
        }
    }
}

impl Drop for SubDocumentContext {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for SubDocumentContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubDocumentContext")
            .field("display_path", &self.display_path)
            .field("open", &self.is_open())
            .field("extracted", &self.extracted)
            .finish()
    }
}
