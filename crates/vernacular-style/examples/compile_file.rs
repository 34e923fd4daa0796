//! Compile a localized source file to canonical stylesheet text.
//!
//! Run with: cargo run -p vernacular-style --example compile_file -- page.vss [vernacular.toml]
//!
//! Warnings go to stderr through the tracing subscriber; the canonical text
//! goes to stdout.

use std::process::ExitCode;

use vernacular_style::prelude::*;

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let Some(source_path) = args.next() else {
        eprintln!("usage: compile_file <source> [config.toml]");
        return ExitCode::FAILURE;
    };

    match run(&source_path, args.next().as_deref()) {
        Ok(canonical) => {
            print!("{canonical}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(source_path: &str, config_path: Option<&str>) -> vernacular_style::Result<String> {
    let config = match config_path {
        Some(path) => VernacularConfig::from_file(path)?,
        None => VernacularConfig::default(),
    };
    let source = std::fs::read_to_string(source_path)
        .map_err(|e| vernacular_style::Error::io(source_path, e))?;

    let compiler = Compiler::new(&config)?;
    let output = compiler.compile(&source);

    for warning in &output.warnings {
        tracing::warn!("{source_path}:{warning}");
    }
    tracing::info!(
        rules = output.rules.len(),
        decorations = output.decorations.len(),
        "compiled {source_path}"
    );

    Ok(output.canonical)
}
