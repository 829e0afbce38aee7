//! A document store backed by a folder of markdown files

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::{EditError, StoreError};
use crate::traits::{DocumentStore, DocumentTransform};

/// Serves the `.md` files found under a root directory, recursively.
///
/// Document paths are relative to the root. Filtering is by extension only;
/// there are no other exclusion rules. Enumeration order is sorted, so two
/// scans of an unchanged folder see the documents in the same order.
#[derive(Debug)]
pub struct FolderStore {
    root: PathBuf,
}

impl FolderStore {
    pub fn new(root: &Path) -> Self {
        Self {
            root: PathBuf::from(root),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn full_path(&self, document_path: &str) -> PathBuf {
        self.root.join(document_path)
    }
}

#[async_trait]
impl DocumentStore for FolderStore {
    async fn list_documents(&self) -> Result<Vec<String>, StoreError> {
        let mut pending = vec![self.root.clone()];
        let mut paths = Vec::new();

        while let Some(dir) = pending.pop() {
            let mut entries = tokio::fs::read_dir(&dir).await?;
            while let Some(entry) = entries.next_entry().await? {
                let path = entry.path();
                if entry.file_type().await?.is_dir() {
                    pending.push(path);
                } else if path.extension().map(|ext| ext == "md").unwrap_or(false) {
                    if let Ok(relative) = path.strip_prefix(&self.root) {
                        paths.push(relative.to_string_lossy().into_owned());
                    }
                }
            }
        }

        paths.sort();
        Ok(paths)
    }

    async fn read_document(&self, path: &str) -> Result<String, StoreError> {
        match tokio::fs::read_to_string(self.full_path(path)).await {
            Ok(text) => Ok(text),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                Err(StoreError::NotFound(path.to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn process_document(
        &self,
        path: &str,
        transform: DocumentTransform,
    ) -> Result<(), EditError> {
        let full = self.full_path(path);
        let text = match tokio::fs::read_to_string(&full).await {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(EditError::DocumentNotFound(path.to_string()))
            }
            Err(err) => return Err(EditError::Store(err.into())),
        };

        let updated = transform(&text)?;

        tokio::fs::write(&full, updated)
            .await
            .map_err(|err| EditError::Store(StoreError::from(err)))?;
        Ok(())
    }
}
