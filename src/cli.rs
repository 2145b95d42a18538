use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub const DEFAULT_NAMESPACE: &str = "PQCLEAN";

#[derive(Parser, Debug)]
#[command(
    name = "dupecheck",
    version,
    about = "Checks that files duplicated across scheme implementations stay consistent modulo namespacing"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        default_value = ".",
        help = "Corpus root (directory containing crypto_kem/ and crypto_sign/)"
    )]
    pub corpus: PathBuf,
    #[arg(
        long,
        global = true,
        default_value = DEFAULT_NAMESPACE,
        help = "Namespace token used to derive implementation prefixes"
    )]
    pub namespace: String,
    #[arg(
        long,
        global = true,
        help = "Filter policy file (defaults to <corpus>/test/duplicate_consistency/policy.toml)"
    )]
    pub policy: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List every discovered comparison task.
    List,
    /// Show one task's declared files and endpoints.
    Show { task: String },
    /// Run all tasks, or a single one by id.
    Run { task: Option<String> },
    /// Load every metadata document and report format and resolution
    /// problems without comparing any files.
    Validate,
}
