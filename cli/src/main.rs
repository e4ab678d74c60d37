//! letterform CLI - letter text to house-style HTML

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;

use letterform::{
    classify, ConvertOptions, ConvertOutcome, DocumentType, ExtractorRegistry, Letterform,
};

#[derive(Parser)]
#[command(name = "letterform")]
#[command(version)]
#[command(about = "Convert extracted letter text to template HTML", long_about = None)]
struct Cli {
    /// Input text file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output HTML file (stdout if not specified)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Force a document type instead of classifying
    #[arg(long, value_name = "TYPE")]
    doc_type: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a letter to HTML
    Convert {
        /// Input text file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output HTML file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Force a document type instead of classifying
        #[arg(long, value_name = "TYPE")]
        doc_type: Option<String>,

        /// Wrap the output in a container div
        #[arg(long)]
        wrap: bool,
    },

    /// Convert and emit the JSON delivery envelope
    Json {
        /// Input text file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output JSON file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Force a document type instead of classifying
        #[arg(long, value_name = "TYPE")]
        doc_type: Option<String>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show classification and conversion statistics
    Info {
        /// Input text file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Convert {
            input,
            output,
            doc_type,
            wrap,
        }) => cmd_convert(&input, output.as_deref(), doc_type.as_deref(), wrap),
        Some(Commands::Json {
            input,
            output,
            doc_type,
            compact,
        }) => cmd_json(&input, output.as_deref(), doc_type.as_deref(), compact),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            if let Some(input) = cli.input {
                cmd_convert(&input, cli.output.as_deref(), cli.doc_type.as_deref(), false)
            } else {
                println!("{}", "Usage: letterform <FILE> [-o OUTPUT]".yellow());
                println!("       letterform --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn parse_doc_type(value: Option<&str>) -> Result<Option<DocumentType>, Box<dyn std::error::Error>> {
    match value {
        Some(s) => Ok(Some(s.parse::<DocumentType>()?)),
        None => Ok(None),
    }
}

fn read_input(input: &Path) -> Result<String, Box<dyn std::error::Error>> {
    let registry = ExtractorRegistry::with_defaults();
    Ok(registry.extract_file(input)?)
}

fn cmd_convert(
    input: &Path,
    output: Option<&Path>,
    doc_type: Option<&str>,
    wrap: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = read_input(input)?;

    let mut converter = Letterform::new().wrap_container(wrap);
    if let Some(explicit) = parse_doc_type(doc_type)? {
        converter = converter.doc_type(explicit);
    }
    let result = converter.convert(&text)?;

    if let Some(path) = output {
        fs::write(path, &result.html)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", result.html);
    }

    Ok(())
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    doc_type: Option<&str>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = read_input(input)?;

    let options = ConvertOptions {
        doc_type: parse_doc_type(doc_type)?,
        ..Default::default()
    };
    let outcome: ConvertOutcome = letterform::convert(&text, &options).into();

    let json = if compact {
        serde_json::to_string(&outcome)?
    } else {
        serde_json::to_string_pretty(&outcome)?
    };

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let text = read_input(input)?;
    let doc_type = classify(&text);
    let result = Letterform::new().convert(&text)?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Document type".bold(), doc_type);
    println!(
        "{}: {}",
        "Paragraphs".bold(),
        result.metadata.paragraph_count
    );
    println!("{}: {}", "Blocks".bold(), result.metadata.block_count);
    println!("{}: {}", "HTML bytes".bold(), result.html.len());

    Ok(())
}

fn cmd_version() {
    println!(
        "{} {}",
        "letterform".cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("Letter text to template HTML converter");
}
