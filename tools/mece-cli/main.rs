use clap::Parser;
use mece::prelude::*;
use std::fs;
use std::process::ExitCode;

/// Structural validator for MECE decomposition JSON documents
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the decomposition JSON file to validate
    path: String,

    /// Write the JSON report to this file instead of stdout
    #[arg(short, long)]
    output: Option<String>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let raw = fs::read_to_string(&cli.path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to read file '{}': {}", cli.path, e)));

    let data: serde_json::Value = serde_json::from_str(&raw)
        .unwrap_or_else(|e| exit_with_error(&format!("Invalid JSON: {}", e)));

    let report = validate(&data);
    let output = report.to_output();

    let json = serde_json::to_string_pretty(&output)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to serialize report: {}", e)));

    match &cli.output {
        Some(path) => {
            fs::write(path, &json).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to write report to '{}': {}", path, e))
            });
            println!("Validation report written to: {}", path);
        }
        None => println!("{}", json),
    }

    let status = if output.valid { "PASS" } else { "FAIL" };
    eprintln!(
        "\n[{}] {} errors, {} warnings, {} info | {} nodes ({} atoms, {} branches) | max depth: {}, max fan-out: {}",
        status,
        output.summary.errors,
        output.summary.warnings,
        output.summary.info,
        output.summary.total_nodes,
        output.summary.total_atoms,
        output.summary.total_branches,
        output.summary.max_depth,
        output.summary.max_fan_out,
    );

    if output.valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
