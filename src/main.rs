//! Persona Lens - descriptive user personas from public Reddit activity
//!
//! Fetches the recent comments and posts of a Reddit account and writes a
//! persona report, either from keyword heuristics or through an LLM.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use persona_lens::{
    analysis::{CitationPolicy, CitationSelector, PersonaAssembler},
    config::{resolve_credential, PersonaLensConfig},
    corpus::{display_subject, resolve_subject, Corpus},
    fetch::{CorpusSource, FileSource, RedditClient},
    llm::{self, LlmPersonaGenerator},
    persona::{render_summary, write_report, Persona, ReportFormat},
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "persona-lens")]
#[command(author = "A3S Lab Team")]
#[command(version)]
#[command(about = "Descriptive user personas from public Reddit activity")]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "PERSONA_LENS_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a Reddit account and generate its persona
    Generate {
        /// Profile URL (https://www.reddit.com/user/<name>/) or username
        profile: String,

        /// Maximum comments and posts fetched (each, 0 = no limit)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Fetch the whole history, ignoring any limit
        #[arg(long, conflicts_with = "limit")]
        all: bool,

        /// Generation mode
        #[arg(short, long, value_enum, default_value_t = Mode::Heuristic)]
        mode: Mode,

        /// Report output directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Report format
        #[arg(short, long, value_enum)]
        format: Option<Format>,

        /// Also save the fetched corpus as JSON
        #[arg(long)]
        save_corpus: Option<PathBuf>,
    },

    /// Generate a persona from a saved corpus file (no Reddit access)
    Analyze {
        /// Corpus JSON file
        corpus: PathBuf,

        /// Account name shown in the persona
        #[arg(short, long)]
        name: Option<String>,

        /// Generation mode
        #[arg(short, long, value_enum, default_value_t = Mode::Heuristic)]
        mode: Mode,

        /// Report output directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Report format
        #[arg(short, long, value_enum)]
        format: Option<Format>,
    },

    /// Run diagnostics
    Doctor,

    /// Show configuration
    Config {
        /// Show default configuration
        #[arg(long)]
        default: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Keyword and indicator heuristics, offline
    Heuristic,
    /// LLM analysis
    Llm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

impl From<Format> for ReportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => ReportFormat::Text,
            Format::Json => ReportFormat::Json,
        }
    }
}

/// Where and how a report is written
struct ReportTarget {
    output: Option<PathBuf>,
    format: Option<Format>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Credentials may live in a local .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("persona_lens={}", log_level).into());
    let registry = tracing_subscriber::registry().with(filter);
    if cli.json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    // Load configuration
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Generate {
            profile,
            limit,
            all,
            mode,
            output,
            format,
            save_corpus,
        } => {
            let limit = if all {
                None
            } else {
                config.reddit.effective_limit(limit)
            };
            run_generate(
                &config,
                &profile,
                limit,
                mode,
                ReportTarget { output, format },
                save_corpus,
            )
            .await?;
        }
        Commands::Analyze {
            corpus,
            name,
            mode,
            output,
            format,
        } => {
            run_analyze(&config, &corpus, name, mode, ReportTarget { output, format }).await?;
        }
        Commands::Doctor => {
            run_doctor(&config, cli.config.as_deref());
        }
        Commands::Config { default } => {
            show_config(if default { None } else { Some(&config) })?;
        }
    }

    Ok(())
}

fn load_config(explicit: Option<&Path>) -> Result<PersonaLensConfig> {
    if let Some(path) = explicit {
        return Ok(PersonaLensConfig::load(path)?);
    }
    match PersonaLensConfig::default_path() {
        Some(path) if path.exists() => {
            tracing::debug!(path = %path.display(), "Using configuration file");
            Ok(PersonaLensConfig::load(&path)?)
        }
        _ => Ok(PersonaLensConfig::default()),
    }
}

async fn run_generate(
    config: &PersonaLensConfig,
    profile: &str,
    limit: Option<usize>,
    mode: Mode,
    target: ReportTarget,
    save_corpus: Option<PathBuf>,
) -> Result<()> {
    let username = resolve_subject(profile)
        .with_context(|| format!("Not a Reddit profile URL or username: {}", profile))?;
    tracing::info!(username = %username, ?mode, "Generating persona");

    let source = RedditClient::from_config(config.reddit.clone())?;
    tracing::debug!(source = source.name(), ?limit, "Fetching corpus");
    let corpus = source.fetch(&username, limit).await?;

    if let Some(path) = save_corpus {
        tokio::fs::write(&path, corpus.to_json_pretty()?)
            .await
            .with_context(|| format!("Failed to save corpus to {}", path.display()))?;
        println!("Corpus saved to {}", path.display());
    }

    println!(
        "Found {} comments and {} posts for u/{}",
        corpus.comments.len(),
        corpus.posts.len(),
        username
    );
    if corpus.is_empty() {
        tracing::warn!(username = %username, "No public activity found");
    }

    let persona = build_persona(config, mode, Some(&username), &corpus).await?;
    finish(config, &persona, &username, target)
}

async fn run_analyze(
    config: &PersonaLensConfig,
    corpus_path: &Path,
    name: Option<String>,
    mode: Mode,
    target: ReportTarget,
) -> Result<()> {
    let corpus = FileSource::new(corpus_path).fetch("", None).await?;
    let subject = name.as_deref().and_then(display_subject);
    let persona = build_persona(config, mode, subject.as_deref(), &corpus).await?;

    let file_stem = subject.unwrap_or_else(|| "offline".to_string());
    finish(config, &persona, &file_stem, target)
}

async fn build_persona(
    config: &PersonaLensConfig,
    mode: Mode,
    subject: Option<&str>,
    corpus: &Corpus,
) -> Result<Persona> {
    match mode {
        Mode::Heuristic => {
            let indicators = Arc::new(config.indicators.clone());
            let assembler = PersonaAssembler::from_config(&config.analysis, indicators);
            Ok(assembler.assemble(subject, corpus))
        }
        Mode::Llm => {
            let client = llm::client_from_config(&config.llm)?;
            let citations = CitationSelector::new(CitationPolicy::FirstN)
                .per_kind(config.analysis.citations_per_kind)
                .max_chars(config.analysis.citation_chars)
                .permalink_base(config.analysis.permalink_base.clone());
            let generator = LlmPersonaGenerator::new(client).with_citations(citations);
            Ok(generator.generate(subject.unwrap_or_default(), corpus).await?)
        }
    }
}

fn finish(
    config: &PersonaLensConfig,
    persona: &Persona,
    username: &str,
    target: ReportTarget,
) -> Result<()> {
    println!("{}", render_summary(persona));

    let dir = target.output.unwrap_or_else(|| config.report.output_dir.clone());
    let format = target.format.map(ReportFormat::from).unwrap_or(config.report.format);
    let path = write_report(persona, username, &dir, format, chrono::Local::now())?;
    println!("Persona saved to {}", path.display());
    Ok(())
}

fn run_doctor(config: &PersonaLensConfig, explicit: Option<&Path>) {
    println!("Persona Lens Doctor");
    println!();

    println!("Checking configuration...");
    let path = explicit
        .map(Path::to_path_buf)
        .or_else(PersonaLensConfig::default_path);
    match path {
        Some(path) if path.exists() => {
            println!("  ✓ Configuration file found: {}", path.display())
        }
        Some(path) => {
            println!("  ℹ No configuration file at {} (using defaults)", path.display())
        }
        None => println!("  ℹ No configuration directory (using defaults)"),
    }

    println!();
    println!("Checking credentials...");
    for reference in [
        &config.reddit.client_id_ref,
        &config.reddit.client_secret_ref,
        &config.llm.api_key_ref,
    ] {
        match resolve_credential(reference) {
            Ok(_) => println!("  ✓ {} is set", reference),
            Err(_) => println!("  ✗ {} is not set", reference),
        }
    }

    println!();
    println!("Doctor check complete!");
}

fn show_config(config: Option<&PersonaLensConfig>) -> Result<()> {
    let config = config.cloned().unwrap_or_default();
    println!("{}", config.to_toml()?);
    Ok(())
}
