use crate::domain::models::ConsistencyGroup;
use crate::services::CheckError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Deserialize)]
struct MetadataDoc {
    consistency_checks: Vec<ConsistencyGroup>,
}

/// Keyed lookup over `<corpus>/test/duplicate_consistency/<key>.yml`
/// documents, where `key = "<scheme>_<implementation>"`. Presence of a
/// document is opt-in; most pairs have none.
pub struct MetadataStore {
    dir: PathBuf,
}

impl MetadataStore {
    pub fn new(corpus: &Path) -> Self {
        Self {
            dir: corpus.join("test").join("duplicate_consistency"),
        }
    }

    pub fn document_key(scheme: &str, implementation: &str) -> String {
        format!("{}_{}", scheme, implementation)
    }

    pub fn document_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.yml", key))
    }

    pub fn has_document(&self, key: &str) -> bool {
        self.document_path(key).is_file()
    }

    pub fn load_document(&self, key: &str) -> Result<Vec<ConsistencyGroup>, CheckError> {
        let path = self.document_path(key);
        let raw = std::fs::read_to_string(&path).map_err(|source| CheckError::Io {
            path: path.clone(),
            source,
        })?;
        let doc: MetadataDoc =
            serde_yaml::from_str(&raw).map_err(|e| CheckError::MetadataFormat {
                document: key.to_string(),
                reason: e.to_string(),
            })?;
        for (index, group) in doc.consistency_checks.iter().enumerate() {
            if group.files.is_empty() {
                return Err(CheckError::MetadataFormat {
                    document: key.to_string(),
                    reason: format!("consistency_checks[{}] declares no files", index),
                });
            }
        }
        Ok(doc.consistency_checks)
    }
}
