use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

/// One concrete variant of a scheme, with the filesystem root its sources
/// live under and the namespace prefix its identifiers carry.
#[derive(Debug, Clone, Serialize)]
pub struct Implementation {
    pub scheme: String,
    pub name: String,
    pub path: PathBuf,
    pub namespace_prefix: String,
}

/// One declared duplicate-file relationship from a metadata document:
/// the named source implementation holds the canonical copy of `files`.
#[derive(Debug, Clone, Deserialize)]
pub struct ConsistencyGroup {
    pub source: SourceRef,
    pub files: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceRef {
    pub scheme: String,
    pub implementation: String,
}

/// Unit of work: compare `files` between the target and source roots
/// after each side strips its own namespace prefix.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonTask {
    pub id: String,
    pub document: String,
    pub target: Implementation,
    pub source: Implementation,
    pub files: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileMismatch {
    pub file: String,
    pub diff: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MismatchReport {
    pub entries: Vec<FileMismatch>,
}

impl MismatchReport {
    pub fn is_clean(&self) -> bool {
        self.entries.is_empty()
    }

    /// Aggregate failure message: every per-file diff, each prefixed by
    /// the relative path that differed.
    pub fn message(&self) -> String {
        let parts: Vec<String> = self
            .entries
            .iter()
            .map(|e| format!("{} differed:\n{}", e.file, e.diff))
            .collect();
        format!("Files differed:\n{}", parts.join("\n"))
    }
}

#[derive(Serialize, Clone)]
pub struct TaskItem {
    pub id: String,
    pub document: String,
    pub target: String,
    pub source: String,
    pub file_count: usize,
}

#[derive(Serialize)]
pub struct TaskResult {
    pub id: String,
    pub status: String,
    pub file_count: usize,
    pub detail: Option<String>,
}

#[derive(Serialize, Default)]
pub struct RunReport {
    pub results: Vec<TaskResult>,
    pub passed: usize,
    pub failed: usize,
    pub errors: usize,
    pub skipped: usize,
    pub xfailed: usize,
    pub xpassed: usize,
}

impl RunReport {
    pub fn ok(&self) -> bool {
        self.failed == 0 && self.errors == 0
    }
}

#[derive(Serialize, Clone)]
pub struct ValidationIssue {
    pub document: String,
    pub error: String,
}

#[derive(Serialize)]
pub struct ValidateReport {
    pub documents: usize,
    pub tasks: usize,
    pub issues: Vec<ValidationIssue>,
}
