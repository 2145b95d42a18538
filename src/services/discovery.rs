use crate::domain::models::ComparisonTask;
use crate::services::metadata::MetadataStore;
use crate::services::registry::Registry;
use crate::services::CheckError;

#[derive(Debug)]
pub struct DiscoveryProblem {
    pub document: String,
    pub error: CheckError,
}

#[derive(Debug, Default)]
pub struct Discovered {
    pub tasks: Vec<ComparisonTask>,
    pub problems: Vec<DiscoveryProblem>,
}

/// Flatten the corpus into comparison tasks: for every
/// (scheme, implementation) pair with a metadata document, one task per
/// declared consistency group. A broken document or an unresolvable
/// source aborts only the affected group, recorded as a problem so valid
/// tasks still run.
pub fn discover_tasks(registry: &Registry, store: &MetadataStore) -> Discovered {
    let mut out = Discovered::default();
    for scheme in registry.schemes() {
        for impl_name in &scheme.implementations {
            let key = MetadataStore::document_key(&scheme.name, impl_name);
            if !store.has_document(&key) {
                continue;
            }
            let groups = match store.load_document(&key) {
                Ok(groups) => groups,
                Err(error) => {
                    out.problems.push(DiscoveryProblem {
                        document: key,
                        error,
                    });
                    continue;
                }
            };
            let target = match registry.resolve(&scheme.name, impl_name) {
                Ok(target) => target.clone(),
                Err(error) => {
                    out.problems.push(DiscoveryProblem {
                        document: key,
                        error,
                    });
                    continue;
                }
            };
            for (index, group) in groups.into_iter().enumerate() {
                let source =
                    match registry.resolve(&group.source.scheme, &group.source.implementation) {
                        Ok(source) => source.clone(),
                        Err(error) => {
                            out.problems.push(DiscoveryProblem {
                                document: key.clone(),
                                error,
                            });
                            continue;
                        }
                    };
                out.tasks.push(ComparisonTask {
                    id: format!("{}[{}]", key, index),
                    document: key.clone(),
                    target: target.clone(),
                    source,
                    files: group.files,
                });
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::discover_tasks;
    use crate::services::metadata::MetadataStore;
    use crate::services::registry::Registry;
    use crate::services::CheckError;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn make_corpus() -> TempDir {
        let tmp = TempDir::new().expect("temp corpus");
        for path in ["crypto_kem/kyber512/avx2", "crypto_kem/kyber512/clean"] {
            fs::create_dir_all(tmp.path().join(path)).expect("create impl dir");
        }
        fs::create_dir_all(tmp.path().join("test/duplicate_consistency"))
            .expect("create metadata dir");
        tmp
    }

    fn write_doc(corpus: &Path, key: &str, body: &str) {
        fs::write(
            corpus
                .join("test/duplicate_consistency")
                .join(format!("{}.yml", key)),
            body,
        )
        .expect("write metadata doc");
    }

    fn discover(corpus: &Path) -> super::Discovered {
        let registry = Registry::scan(corpus, "PQCLEAN").expect("scan");
        let store = MetadataStore::new(corpus);
        discover_tasks(&registry, &store)
    }

    #[test]
    fn pair_without_document_contributes_no_tasks() {
        let corpus = make_corpus();
        let discovered = discover(corpus.path());
        assert!(discovered.tasks.is_empty());
        assert!(discovered.problems.is_empty());
    }

    #[test]
    fn empty_check_list_contributes_no_tasks() {
        let corpus = make_corpus();
        write_doc(corpus.path(), "kyber512_avx2", "consistency_checks: []\n");
        let discovered = discover(corpus.path());
        assert!(discovered.tasks.is_empty());
        assert!(discovered.problems.is_empty());
    }

    #[test]
    fn one_task_per_group_with_stable_ids() {
        let corpus = make_corpus();
        write_doc(
            corpus.path(),
            "kyber512_avx2",
            "consistency_checks:\n\
             - source:\n    scheme: kyber512\n    implementation: clean\n  files:\n    - reduce.c\n    - ntt.h\n\
             - source:\n    scheme: kyber512\n    implementation: clean\n  files:\n    - verify.c\n",
        );
        let discovered = discover(corpus.path());

        assert_eq!(discovered.tasks.len(), 2);
        let task = &discovered.tasks[0];
        assert_eq!(task.id, "kyber512_avx2[0]");
        assert_eq!(task.target.name, "avx2");
        assert_eq!(task.source.name, "clean");
        assert_eq!(task.source.namespace_prefix, "PQCLEAN_KYBER512_CLEAN_");
        assert_eq!(task.files, ["reduce.c", "ntt.h"]);
        assert_eq!(discovered.tasks[1].id, "kyber512_avx2[1]");
    }

    #[test]
    fn unresolvable_source_breaks_only_its_group() {
        let corpus = make_corpus();
        write_doc(
            corpus.path(),
            "kyber512_avx2",
            "consistency_checks:\n\
             - source:\n    scheme: kyber1024\n    implementation: clean\n  files:\n    - reduce.c\n\
             - source:\n    scheme: kyber512\n    implementation: clean\n  files:\n    - verify.c\n",
        );
        let discovered = discover(corpus.path());

        assert_eq!(discovered.tasks.len(), 1);
        assert_eq!(discovered.tasks[0].files, ["verify.c"]);
        assert_eq!(discovered.problems.len(), 1);
        assert!(matches!(
            discovered.problems[0].error,
            CheckError::Resolution { .. }
        ));
    }

    #[test]
    fn malformed_document_is_reported_not_skipped() {
        let corpus = make_corpus();
        write_doc(corpus.path(), "kyber512_avx2", "not_the_right_key: 1\n");
        let discovered = discover(corpus.path());

        assert!(discovered.tasks.is_empty());
        assert_eq!(discovered.problems.len(), 1);
        assert_eq!(discovered.problems[0].document, "kyber512_avx2");
        assert!(matches!(
            discovered.problems[0].error,
            CheckError::MetadataFormat { .. }
        ));
    }
}
