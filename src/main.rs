use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use civic_normalize::{
    classify, normalize_address, normalize_name, normalize_phone, sanitize, JurisdictionRegistry,
    RosterExtractor,
};

/// Normalize scraped records of Canadian elected officials
#[derive(Parser, Debug)]
#[command(name = "civic-normalize", version)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Collapse whitespace and fix encoding artifacts
    Sanitize { text: String },
    /// Strip honorifics from a person's name
    Name { text: String },
    /// Format a North American phone number
    Phone { text: String },
    /// Abbreviate the province and format the postal code
    Address { text: String },
    /// Classify a raw contact label and normalize its value
    Classify {
        #[arg(long)]
        label: String,
        #[arg(long)]
        value: String,
        #[arg(long, default_value = "")]
        note: String,
    },
    /// Extract people from a CSV roster
    Roster {
        file: PathBuf,
        #[arg(long)]
        jurisdiction: String,
        /// URL recorded as each person's source (defaults to the file path)
        #[arg(long)]
        source: Option<String>,
        /// Role for rows without a Role/Title column
        #[arg(long, default_value = "Councillor")]
        role: String,
    },
    /// List the known jurisdictions
    Jurisdictions,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Sanitize { text } => println!("{}", sanitize(&text)),
        Command::Name { text } => println!("{}", normalize_name(&text)),
        Command::Phone { text } => println!("{}", normalize_phone(&text)),
        Command::Address { text } => println!("{}", normalize_address(&text)),
        Command::Classify { label, value, note } => {
            let detail = classify(&label, &value, &note)?;
            println!("{}", serde_json::to_string_pretty(&detail)?);
        }
        Command::Roster {
            file,
            jurisdiction,
            source,
            role,
        } => run_roster(file, &jurisdiction, source, role)?,
        Command::Jurisdictions => {
            let registry = JurisdictionRegistry::new();
            println!("{}", serde_json::to_string_pretty(&registry.all())?);
        }
    }

    Ok(())
}

fn run_roster(file: PathBuf, jurisdiction_id: &str, source: Option<String>, role: String) -> Result<()> {
    let mut registry = JurisdictionRegistry::new();
    let jurisdiction = registry
        .get(jurisdiction_id)
        .cloned()
        .with_context(|| format!("Unknown jurisdiction: {}", jurisdiction_id))?;

    let document = fs::read_to_string(&file)
        .with_context(|| format!("Failed to read roster: {}", file.display()))?;
    let source = source.unwrap_or_else(|| file.display().to_string());

    let extractor = RosterExtractor::new(jurisdiction, source).with_default_role(role);
    registry.register_extractor(Box::new(extractor))?;

    let people = registry.extract(jurisdiction_id, &document)?;
    info!(count = people.len(), jurisdiction = jurisdiction_id, "roster normalized");

    println!("{}", serde_json::to_string_pretty(&people)?);
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(default_level))
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}
