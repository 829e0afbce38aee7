//! An in-memory document store
//!
//! This is what integration tests run against, and what an embedding host
//! can use to feed documents it already holds in memory.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::{EditError, StoreError};
use crate::mock_behaviour::MockBehaviour;
use crate::traits::{DocumentStore, DocumentTransform};

/// Stores documents in a map of path → text.
///
/// Interior mutability keeps the trait's `&self` contract: edits to two
/// different documents can proceed independently, like against the real
/// folder-backed store. Enumeration order is the sorted path order.
#[derive(Default, Debug)]
pub struct MemoryStore {
    documents: Mutex<BTreeMap<String, String>>,
    mock_behaviour: Option<Arc<Mutex<MockBehaviour>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that consults `mock_behaviour` before every operation
    pub fn new_with_mock_behaviour(mock_behaviour: Arc<Mutex<MockBehaviour>>) -> Self {
        Self {
            documents: Mutex::new(BTreeMap::new()),
            mock_behaviour: Some(mock_behaviour),
        }
    }

    pub fn insert_document(&self, path: &str, text: &str) {
        self.documents
            .lock()
            .unwrap()
            .insert(path.to_string(), text.to_string());
    }

    pub fn remove_document(&self, path: &str) {
        self.documents.lock().unwrap().remove(path);
    }

    /// Current text of a document, bypassing the mock behaviour
    pub fn document_text(&self, path: &str) -> Option<String> {
        self.documents.lock().unwrap().get(path).cloned()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn list_documents(&self) -> Result<Vec<String>, StoreError> {
        if let Some(mock) = &self.mock_behaviour {
            mock.lock().unwrap().can_list_documents()?;
        }
        Ok(self.documents.lock().unwrap().keys().cloned().collect())
    }

    async fn read_document(&self, path: &str) -> Result<String, StoreError> {
        if let Some(mock) = &self.mock_behaviour {
            mock.lock().unwrap().can_read_document()?;
        }
        self.documents
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(path.to_string()))
    }

    async fn process_document(
        &self,
        path: &str,
        transform: DocumentTransform,
    ) -> Result<(), EditError> {
        if let Some(mock) = &self.mock_behaviour {
            mock.lock()
                .unwrap()
                .can_process_document()
                .map_err(EditError::Store)?;
        }

        let mut documents = self.documents.lock().unwrap();
        let text = documents
            .get(path)
            .ok_or_else(|| EditError::DocumentNotFound(path.to_string()))?;
        let updated = transform(text)?;
        documents.insert(path.to_string(), updated);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn documents_round_trip() {
        let store = MemoryStore::new();
        store.insert_document("b.md", "second");
        store.insert_document("a.md", "first");

        assert_eq!(store.list_documents().await.unwrap(), vec!["a.md", "b.md"]);
        assert_eq!(store.read_document("a.md").await.unwrap(), "first");

        store
            .process_document("a.md", Box::new(|text| Ok(text.to_uppercase())))
            .await
            .unwrap();
        assert_eq!(store.document_text("a.md").unwrap(), "FIRST");
    }

    #[tokio::test]
    async fn failing_transforms_leave_the_document_untouched() {
        let store = MemoryStore::new();
        store.insert_document("a.md", "original");

        let result = store
            .process_document(
                "a.md",
                Box::new(|_| Err(EditError::DocumentNotFound(String::from("a.md")))),
            )
            .await;
        assert!(result.is_err());
        assert_eq!(store.document_text("a.md").unwrap(), "original");
    }

    #[tokio::test]
    async fn mock_behaviour_injects_failures() {
        let behaviour = Arc::new(Mutex::new(MockBehaviour::fail_now(1)));
        let store = MemoryStore::new_with_mock_behaviour(behaviour.clone());
        store.insert_document("a.md", "text");

        assert!(store.list_documents().await.is_err());
        assert!(store.list_documents().await.is_ok());

        behaviour.lock().unwrap().process_document_behaviour = (0, 1);
        let result = store
            .process_document("a.md", Box::new(|text| Ok(text.to_string())))
            .await;
        assert!(result.is_err());
        assert_eq!(store.document_text("a.md").unwrap(), "text");
    }
}
