use crate::domain::models::Implementation;
use crate::services::CheckError;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub const CATEGORIES: [&str; 2] = ["crypto_kem", "crypto_sign"];

#[derive(Debug, Clone)]
pub struct SchemeEntry {
    pub name: String,
    pub category: String,
    pub implementations: Vec<String>,
}

/// Lookup table over the corpus, built once at startup. Scheme iteration
/// order and implementation order are sorted so discovery output is stable.
#[derive(Debug, Default)]
pub struct Registry {
    schemes: Vec<SchemeEntry>,
    implementations: BTreeMap<(String, String), Implementation>,
}

impl Registry {
    pub fn scan(corpus: &Path, namespace: &str) -> anyhow::Result<Registry> {
        let mut registry = Registry::default();
        for category in CATEGORIES {
            let category_dir = corpus.join(category);
            if !category_dir.is_dir() {
                continue;
            }
            for scheme_name in sorted_subdirs(&category_dir)? {
                let scheme_dir = category_dir.join(&scheme_name);
                let implementations = sorted_subdirs(&scheme_dir)?;
                for impl_name in &implementations {
                    registry.implementations.insert(
                        (scheme_name.clone(), impl_name.clone()),
                        Implementation {
                            scheme: scheme_name.clone(),
                            name: impl_name.clone(),
                            path: scheme_dir.join(impl_name),
                            namespace_prefix: namespace_prefix(
                                namespace,
                                &scheme_name,
                                impl_name,
                            ),
                        },
                    );
                }
                registry.schemes.push(SchemeEntry {
                    name: scheme_name,
                    category: category.to_string(),
                    implementations,
                });
            }
        }
        Ok(registry)
    }

    pub fn schemes(&self) -> &[SchemeEntry] {
        &self.schemes
    }

    pub fn resolve(
        &self,
        scheme: &str,
        implementation: &str,
    ) -> Result<&Implementation, CheckError> {
        self.implementations
            .get(&(scheme.to_string(), implementation.to_string()))
            .ok_or_else(|| CheckError::Resolution {
                scheme: scheme.to_string(),
                implementation: implementation.to_string(),
            })
    }
}

/// `{NS}_{scheme}_{impl}_` uppercased with dashes removed, the convention
/// the corpus uses to namespace identifiers per implementation.
pub fn namespace_prefix(namespace: &str, scheme: &str, implementation: &str) -> String {
    format!("{}_{}_{}_", namespace, scheme, implementation)
        .replace('-', "")
        .to_uppercase()
}

fn sorted_subdirs(dir: &Path) -> anyhow::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if name.starts_with('.') {
            continue;
        }
        names.push(name);
    }
    names.sort();
    Ok(names)
}
