use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Case-filtering policy, keyed by task id. `skip` entries never run;
/// `xfail` entries run but an observed mismatch does not fail the suite.
#[derive(Debug, Default, Deserialize)]
pub struct FilterPolicy {
    #[serde(default)]
    pub skip: Vec<String>,
    #[serde(default)]
    pub xfail: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Disposition {
    Run,
    Skip,
    Xfail,
}

impl FilterPolicy {
    pub fn load(explicit: Option<&Path>, corpus: &Path) -> anyhow::Result<FilterPolicy> {
        let path: PathBuf = match explicit {
            Some(p) => {
                if !p.is_file() {
                    anyhow::bail!("policy file not found: {}", p.display());
                }
                p.to_path_buf()
            }
            None => {
                let default = corpus.join("test/duplicate_consistency/policy.toml");
                if !default.is_file() {
                    return Ok(FilterPolicy::default());
                }
                default
            }
        };
        let raw = std::fs::read_to_string(&path)?;
        Ok(toml::from_str(&raw)?)
    }

    pub fn disposition(&self, id: &str) -> Disposition {
        if self.skip.iter().any(|x| x == id) {
            Disposition::Skip
        } else if self.xfail.iter().any(|x| x == id) {
            Disposition::Xfail
        } else {
            Disposition::Run
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Disposition, FilterPolicy};

    #[test]
    fn skip_wins_over_xfail() {
        let policy: FilterPolicy = toml::from_str(
            r#"skip = ["kyber512_avx2[0]"]
xfail = ["kyber512_avx2[0]", "kyber512_avx2[1]"]
"#,
        )
        .expect("parse policy");

        assert_eq!(policy.disposition("kyber512_avx2[0]"), Disposition::Skip);
        assert_eq!(policy.disposition("kyber512_avx2[1]"), Disposition::Xfail);
        assert_eq!(policy.disposition("kyber512_avx2[2]"), Disposition::Run);
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let policy: FilterPolicy = toml::from_str("").expect("parse empty policy");
        assert_eq!(policy.disposition("anything"), Disposition::Run);
    }
}
