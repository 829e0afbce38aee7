//! Traits abstracting the document store

use async_trait::async_trait;

use crate::error::{EditError, StoreError};

/// A pure text transform applied to a whole document by
/// [`DocumentStore::process_document`]
pub type DocumentTransform = Box<dyn FnOnce(&str) -> Result<String, EditError> + Send>;

/// The collection of text documents tasks are scanned from.
///
/// A store only deals in whole documents: an enumeration, a full-text read,
/// and a transactional read-modify-write. The read-modify-write is atomic
/// per document, but the store gives no ordering guarantee between
/// operations on two different documents.
#[async_trait]
pub trait DocumentStore {
    /// Paths of every text document in the corpus
    async fn list_documents(&self) -> Result<Vec<String>, StoreError>;

    /// The full text of one document
    async fn read_document(&self, path: &str) -> Result<String, StoreError>;

    /// Reads `path`, applies `transform`, and persists the result, as one
    /// indivisible step. Nothing is persisted when the transform fails.
    async fn process_document(
        &self,
        path: &str,
        transform: DocumentTransform,
    ) -> Result<(), EditError>;
}
