use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct TestEnv {
    _tmp: TempDir,
    pub corpus: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let corpus = make_fixture_corpus(tmp.path());
        Self { _tmp: tmp, corpus }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("dupecheck");
        cmd.arg("--corpus").arg(&self.corpus);
        cmd
    }

    pub fn run_json(&self, args: &[&str]) -> Value {
        let out = self
            .cmd()
            .arg("--json")
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    pub fn run_json_failure(&self, args: &[&str]) -> Value {
        let out = self
            .cmd()
            .arg("--json")
            .args(args)
            .assert()
            .failure()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    pub fn write(&self, rel: &str, content: &str) {
        let path = self.corpus.join(rel);
        fs::create_dir_all(path.parent().expect("relative path has parent"))
            .expect("create parent dirs");
        fs::write(path, content).expect("write fixture file");
    }

    pub fn remove(&self, rel: &str) {
        fs::remove_file(self.corpus.join(rel)).expect("remove fixture file");
    }
}

pub fn make_fixture_corpus(base: &Path) -> PathBuf {
    let corpus = base.join("corpus");
    let clean = corpus.join("crypto_kem/kyber512/clean");
    let avx2 = corpus.join("crypto_kem/kyber512/avx2");

    fs::create_dir_all(&clean).expect("create clean impl");
    fs::create_dir_all(&avx2).expect("create avx2 impl");
    fs::create_dir_all(corpus.join("test/duplicate_consistency")).expect("create metadata dir");

    fs::write(
        clean.join("reduce.c"),
        "int PQCLEAN_KYBER512_CLEAN_reduce(int a) {\n  return a; // shared comment\n}\n",
    )
    .expect("write clean reduce.c");
    fs::write(
        avx2.join("reduce.c"),
        "int PQCLEAN_KYBER512_AVX2_reduce(int a) {\n  return a; // shared comment\n}\n",
    )
    .expect("write avx2 reduce.c");

    fs::write(clean.join("ntt.h"), "#define NTT_N 256\n").expect("write clean ntt.h");
    fs::write(avx2.join("ntt.h"), "#define NTT_N 256\n").expect("write avx2 ntt.h");

    fs::write(
        corpus.join("test/duplicate_consistency/kyber512_avx2.yml"),
        r#"consistency_checks:
- source:
    scheme: kyber512
    implementation: clean
  files:
  - reduce.c
  - ntt.h
"#,
    )
    .expect("write metadata document");

    corpus
}
