//! CLI tool for stickygrid - evaluates a measured layout snapshot and outputs JSON
//!
//! Usage:
//!   stickygrid_cli <snapshot.json>              # Output layout JSON to stdout
//!   stickygrid_cli <snapshot.json> -o out.json  # Output layout JSON to file
//!   stickygrid_cli <snapshot.json> -v           # Also log debug diagnostics

#![allow(clippy::exit)]

use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};
use std::env;
use std::fs;
use std::io::{self, Write};
use stickygrid::{LayoutSnapshot, Result};

struct Args {
    input: String,
    output: Option<String>,
    verbose: bool,
}

fn parse_args(args: &[String]) -> Result<Args> {
    let program = args.first().map_or("stickygrid_cli", String::as_str);
    let Some(input) = args.get(1).filter(|a| !a.starts_with('-')) else {
        return Err(format!("Usage: {program} <snapshot.json> [-o output.json] [-v]").into());
    };
    let output = match args.iter().position(|a| a == "-o") {
        Some(i) => Some(args.get(i + 1).cloned().ok_or("-o requires an output path")?),
        None => None,
    };
    Ok(Args {
        input: input.clone(),
        output,
        verbose: args.iter().any(|a| a == "-v"),
    })
}

fn run(args: &Args) -> Result<()> {
    // Read and parse snapshot
    let data = fs::read_to_string(&args.input)?;
    let snapshot = LayoutSnapshot::from_json(&data)?;

    // Evaluate and serialize
    let json = serde_json::to_string_pretty(&snapshot.evaluate())?;

    // Output
    match &args.output {
        Some(path) => {
            fs::write(path, &json)?;
            eprintln!("Written: {}", path);
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let args = match parse_args(&args) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let _ = TermLogger::init(
        level,
        ConfigBuilder::new().build(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
