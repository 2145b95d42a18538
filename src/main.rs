use clap::Parser;

mod cli;
mod commands;
mod domain;
mod services;

use cli::Cli;
use services::CheckError;

fn main() {
    let cli = Cli::parse();
    if let Err(err) = commands::handle_check_commands(&cli) {
        if cli.json {
            let payload = serde_json::json!({
                "ok": false,
                "error": { "code": error_code(&err), "message": err.to_string() }
            });
            println!("{}", payload);
        } else {
            eprintln!("error: {:#}", err);
        }
        std::process::exit(1);
    }
}

fn error_code(err: &anyhow::Error) -> &'static str {
    match err.downcast_ref::<CheckError>() {
        Some(CheckError::Resolution { .. }) => "RESOLUTION",
        Some(CheckError::MetadataFormat { .. }) => "METADATA_FORMAT",
        Some(CheckError::Io { .. }) => "IO",
        None => "RUNTIME",
    }
}
