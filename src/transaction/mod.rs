//! Transaction support for atomic document mutations
//!
//! This module provides a transaction pattern for target document changes,
//! ensuring a failed merge never leaves a half-imported definition behind.
//!
//! ## Usage
//!
//! ```ignore
//! let mut transaction = Transaction::start(&mut document, "Load Desk");
//!
//! // Perform operations...
//! transaction.document_mut().insert_definition(definition);
//!
//! // On success:
//! transaction.commit();
//!
//! // On error (automatic via Drop if not committed):
//! // rollback happens automatically
//! ```

use crate::domain::{DocumentState, TargetDocument};

/// A transaction over the target document
#[derive(Debug)]
pub struct Transaction<'doc> {
    /// Name shown in diagnostics
    name: String,

    /// Document being mutated
    document: &'doc mut TargetDocument,

    /// State captured when the transaction started
    snapshot: Option<DocumentState>,

    /// Whether the transaction has been committed
    committed: bool,
}

impl<'doc> Transaction<'doc> {
    /// Start a transaction, capturing the current document state
    pub fn start(document: &'doc mut TargetDocument, name: impl Into<String>) -> Self {
        let name = name.into();
        tracing::debug!(transaction = %name, "transaction started");
        let snapshot = Some(document.snapshot());
        Self {
            name,
            document,
            snapshot,
            committed: false,
        }
    }

    pub fn document(&self) -> &TargetDocument {
        &*self.document
    }

    pub fn document_mut(&mut self) -> &mut TargetDocument {
        &mut *self.document
    }

    /// Commit the transaction (prevent rollback)
    pub fn commit(mut self) {
        self.committed = true;
        self.snapshot = None;
        tracing::debug!(transaction = %self.name, "transaction committed");
    }

    /// Manually trigger a rollback
    ///
    /// Restores the document to the state captured at start. Calling it more
    /// than once, or after commit, does nothing.
    pub fn rollback(&mut self) {
        if self.committed {
            return;
        }

        if let Some(state) = self.snapshot.take() {
            self.document.restore(state);
            tracing::debug!(transaction = %self.name, "transaction rolled back");
        }
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        if !self.committed {
            // Automatic rollback on drop if not committed
            self.rollback();
        }
    }
}
