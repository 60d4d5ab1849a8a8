#![forbid(unsafe_code)]

//! PlantDraw CLI - convert PlantUML diagrams to draw.io files.
//!
//! # Commands
//!
//! - `convert`: Convert one or more PlantUML files to draw.io XML
//! - `detect`: Show the detected diagram type
//! - `parse`: Output the parsed diagram model as JSON for tooling/debugging

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use pd_parser::{detect_type, parse};
use serde::Serialize;
use tracing::{info, warn};

/// PlantDraw CLI - convert PlantUML diagrams to draw.io files.
#[derive(Debug, Parser)]
#[command(
    name = "plantdraw",
    version,
    about = "Convert PlantUML diagrams to draw.io XML",
    long_about = "Converts PlantUML source files into editable draw.io documents.\n\n\
        Supports sequence, class, use case, and activity diagrams."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose logging (can be repeated for more detail: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Convert PlantUML files to draw.io XML.
    Convert {
        /// Input file paths.
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output file path. Only valid with a single input; by default each
        /// output lands next to its input with a .drawio extension.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Detect the diagram type of an input.
    Detect {
        /// Input file path or "-" for stdin.
        #[arg(default_value = "-")]
        input: String,
    },

    /// Parse a diagram and output its model as JSON.
    Parse {
        /// Input file path or "-" for stdin.
        #[arg(default_value = "-")]
        input: String,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
}

#[derive(Debug, Serialize)]
struct DetectResult {
    diagram_type: String,
    supported: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        Command::Convert { inputs, output } => cmd_convert(&inputs, output.as_deref()),
        Command::Detect { input } => cmd_detect(&input),
        Command::Parse { input, pretty } => cmd_parse(&input, pretty),
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .try_init();
}

fn cmd_convert(inputs: &[PathBuf], output: Option<&Path>) -> Result<()> {
    if output.is_some() && inputs.len() > 1 {
        bail!("--output is only valid with a single input file");
    }

    let mut converted = 0usize;
    for input in inputs {
        match convert_file(input, output) {
            Ok(destination) => {
                converted += 1;
                info!("converted {} -> {}", input.display(), destination.display());
            }
            Err(err) => {
                warn!("skipped {}: {err:#}", input.display());
            }
        }
    }

    println!("converted {converted}/{} file(s)", inputs.len());
    if converted < inputs.len() {
        bail!("{} file(s) failed to convert", inputs.len() - converted);
    }
    Ok(())
}

/// Convert a single file, returning the path written to.
fn convert_file(input: &Path, output: Option<&Path>) -> Result<PathBuf> {
    let source = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read file: {}", input.display()))?;

    let model = parse(&source)?;
    let generated = pd_layout::generate(&model);
    for diagnostic in &generated.diagnostics {
        warn!("{}: {diagnostic}", input.display());
    }

    let xml = pd_render_drawio::render(&generated.document);
    let destination = match output {
        Some(path) => path.to_path_buf(),
        None => input.with_extension("drawio"),
    };
    std::fs::write(&destination, xml)
        .with_context(|| format!("failed to write to: {}", destination.display()))?;
    Ok(destination)
}

fn cmd_detect(input: &str) -> Result<()> {
    let source = load_input(input)?;
    let diagram_type = detect_type(&source);
    let result = DetectResult {
        diagram_type: diagram_type.as_str().to_string(),
        supported: diagram_type != pd_core::DiagramType::Unknown,
    };
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn cmd_parse(input: &str, pretty: bool) -> Result<()> {
    let source = load_input(input)?;
    let model = parse(&source)?;
    let json = if pretty {
        serde_json::to_string_pretty(&model)?
    } else {
        serde_json::to_string(&model)?
    };
    io::stdout()
        .write_all(json.as_bytes())
        .context("failed to write to stdout")?;
    println!();
    Ok(())
}

fn load_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read from stdin")?;
        Ok(buffer)
    } else {
        std::fs::read_to_string(input).with_context(|| format!("failed to read file: {input}"))
    }
}
