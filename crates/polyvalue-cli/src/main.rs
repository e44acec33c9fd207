//! `polyvalue` CLI — encode, decode and check polymorphic values from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Encode a JSON wire value as a YAML fragment (stdin → stdout)
//! echo '{"loss":"10%","ports":[80,443]}' | polyvalue encode
//!
//! # Encode through the number-or-string type
//! echo '"25%"' | polyvalue encode --number-or-string
//!
//! # Decode a YAML manifest into pretty-printed JSON
//! polyvalue decode -i manifest.yaml
//!
//! # Check that a manifest survives decode → encode unchanged
//! polyvalue check -i manifest.yaml
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use polyvalue::{decode, decode_number_or_string, encode, encode_number_or_string, WireValue};
use std::io::{self, Read};
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "polyvalue",
    version,
    about = "Polymorphic configuration value encoder/decoder"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log filter directive (e.g. "debug", "polyvalue=trace")
    #[arg(long, global = true, env = "POLYVALUE_LOG", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a JSON wire value as a YAML fragment
    Encode {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Decode through the number-or-string type instead of the dynamic one
        #[arg(long)]
        number_or_string: bool,
    },
    /// Decode a YAML fragment into pretty-printed JSON
    Decode {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Re-encode a YAML fragment and report whether it survives unchanged
    Check {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    match cli.command {
        Commands::Encode {
            input,
            output,
            number_or_string,
        } => {
            let json = read_input(input.as_deref())?;
            let wire = WireValue::from_json_str(&json).context("Failed to parse JSON input")?;
            let yaml = if number_or_string {
                let value = decode_number_or_string(&wire)
                    .context("Failed to decode number-or-string value")?;
                encode_number_or_string(&value).context("Failed to encode value as YAML")?
            } else {
                let value = decode(&wire).context("Failed to decode value")?;
                encode(&value).context("Failed to encode value as YAML")?
            };
            write_output(output.as_deref(), &yaml)?;
        }
        Commands::Decode { input, output } => {
            let yaml = read_input(input.as_deref())?;
            let wire = WireValue::from_yaml_str(&yaml).context("Failed to parse YAML input")?;
            let value = decode(&wire).context("Failed to decode value")?;
            let pretty = serde_json::to_string_pretty(&value)?;
            write_output(output.as_deref(), &pretty)?;
        }
        Commands::Check { input } => {
            let yaml = read_input(input.as_deref())?;
            let wire = WireValue::from_yaml_str(&yaml).context("Failed to parse YAML input")?;
            let value = decode(&wire).context("Failed to decode value")?;
            let encoded = encode(&value).context("Failed to encode value as YAML")?;
            let reparsed = WireValue::from_yaml_str(&encoded)
                .context("Failed to re-parse encoded YAML")?;
            let roundtripped = decode(&reparsed).context("Failed to decode re-parsed value")?;

            println!("Nodes:      {}", value.node_count());
            println!(
                "Text:       {}",
                if encoded == yaml { "identical" } else { "reformatted" }
            );
            if roundtripped == value {
                println!("Value:      preserved");
            } else {
                println!("Value:      CHANGED");
                tracing::error!("re-encoded value differs from the input");
                process::exit(1);
            }
        }
    }

    Ok(())
}

/// Install a stderr subscriber so stdout stays reserved for command output.
fn init_logging(directive: &str) -> Result<()> {
    let filter = EnvFilter::try_new(directive)
        .with_context(|| format!("Invalid log filter: {}", directive))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    Ok(())
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
