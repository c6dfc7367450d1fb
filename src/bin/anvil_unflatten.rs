//! anvil-unflatten: Rebuild nested JSON from delimiter-flattened property names
//!
//! Usage:
//!   # Read from file, output to stdout
//!   anvil-unflatten data.json
//!
//!   # Read from stdin, output to stdout
//!   echo '{"config__version": 3}' | anvil-unflatten
//!
//!   # Process NDJSON line by line
//!   anvil-unflatten --ndjson events.jsonl
//!
//!   # Custom delimiter, pretty output
//!   anvil-unflatten --delimiter "." --pretty settings.json

// Use MiMalloc allocator for better performance (recommended by simd-json)
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anvil::reshape::{unflatten_recursive, DEFAULT_DELIMITER};
use anvil::unflatten_stream;
use anyhow::{Context, Result};
use clap::Parser;
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, Read, Write};

#[derive(Parser, Debug)]
#[command(name = "anvil-unflatten")]
#[command(about = "Rebuild nested JSON from delimiter-flattened property names", long_about = None)]
struct Args {
    /// Input file (use stdin if omitted)
    #[arg(value_name = "FILE")]
    input: Option<String>,

    /// Process newline-delimited JSON (one JSON object per line)
    #[arg(long)]
    ndjson: bool,

    /// Delimiter separating container and field in flattened names
    #[arg(long, default_value = DEFAULT_DELIMITER)]
    delimiter: String,

    /// Pretty-print the output
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if args.ndjson {
        match args.input {
            Some(path) => {
                let file = File::open(&path)
                    .context(format!("Failed to open file: {}", path))?;
                unflatten_stream(BufReader::new(file), &mut out, &args.delimiter)?;
            }
            None => {
                let stdin = std::io::stdin();
                unflatten_stream(stdin.lock(), &mut out, &args.delimiter)?;
            }
        }
        return Ok(());
    }

    // Whole-input mode: parse with simd-json, then hand each object to the
    // reshaper
    let mut content = Vec::new();
    match args.input {
        Some(path) => {
            File::open(&path)
                .context(format!("Failed to open file: {}", path))?
                .read_to_end(&mut content)
                .context("Failed to read input")?;
        }
        None => {
            std::io::stdin()
                .read_to_end(&mut content)
                .context("Failed to read stdin")?;
        }
    }

    match simd_json::to_owned_value(&mut content).context("Failed to parse JSON")? {
        simd_json::OwnedValue::Array(items) => {
            // Treat a top-level array as a stream of objects
            for item in items.iter() {
                // Convert simd_json value to serde_json::Value
                let json_str = simd_json::to_string(item)?;
                let value: Value = serde_json::from_str(&json_str)?;
                write_unflattened(&mut out, value, &args.delimiter, args.pretty)?;
            }
        }
        other => {
            let json_str = simd_json::to_string(&other)?;
            let value: Value = serde_json::from_str(&json_str)?;
            write_unflattened(&mut out, value, &args.delimiter, args.pretty)?;
        }
    }

    Ok(())
}

/// Unflatten one value and write it to the output
fn write_unflattened<W: Write>(
    writer: &mut W,
    mut value: Value,
    delimiter: &str,
    pretty: bool,
) -> Result<()> {
    if let Value::Object(obj) = &mut value {
        unflatten_recursive(obj, delimiter);
    }

    let json = if pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };

    writeln!(writer, "{}", json).context("Failed to write output")?;
    Ok(())
}
