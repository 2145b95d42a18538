use crate::domain::models::{ComparisonTask, FileMismatch, MismatchReport};
use crate::services::diff::unified_diff;
use crate::services::CheckError;
use std::path::Path;

/// Compare every declared file between the task's two implementation
/// roots, after each side strips its own namespace prefix as a literal
/// substring. Read failures are fatal for the task and abort before the
/// remaining files; drift is accumulated into the report instead.
pub fn compare_task(task: &ComparisonTask) -> Result<MismatchReport, CheckError> {
    let mut report = MismatchReport::default();
    for file in &task.files {
        let this_path = task.target.path.join(file);
        let target_path = task.source.path.join(file);
        let this_src = file_get_contents(&this_path)?;
        let target_src = file_get_contents(&target_path)?;

        let this_transformed = this_src.replace(&task.target.namespace_prefix, "");
        let target_transformed = target_src.replace(&task.source.namespace_prefix, "");

        if this_transformed != target_transformed {
            let diff = unified_diff(
                &this_transformed,
                &target_transformed,
                &this_path.display().to_string(),
                &target_path.display().to_string(),
            );
            report.entries.push(FileMismatch {
                file: file.clone(),
                diff,
            });
        }
    }
    Ok(report)
}

fn file_get_contents(path: &Path) -> Result<String, CheckError> {
    std::fs::read_to_string(path).map_err(|source| CheckError::Io {
        path: path.to_path_buf(),
        source,
    })
}
