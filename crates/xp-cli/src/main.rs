use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use xp_core::ScoreFn;
use xp_corpus::{CorpusSource, JsonFileSource};
use xp_detect::CrosspostDetector;

mod config;
mod output;

#[derive(Parser, Debug)]
#[command(author, version, about = "Find crossposted and duplicated Reddit posts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a corpus file and print or write the report
    Analyze(AnalyzeArgs),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    Json,
    Summary,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum ScoreFnArg {
    Levenshtein,
    Jaccard,
}

impl From<ScoreFnArg> for ScoreFn {
    fn from(arg: ScoreFnArg) -> Self {
        match arg {
            ScoreFnArg::Levenshtein => ScoreFn::Levenshtein,
            ScoreFnArg::Jaccard => ScoreFn::Jaccard,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Corpus file: JSON array, {"posts": [...]}, or NDJSON
    #[arg(long, short)]
    input: PathBuf,

    /// Detector config (TOML)
    #[arg(long, env = "XPOST_CONFIG")]
    config: Option<PathBuf>,

    /// Write the report here instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Summary)]
    format: OutputFormat,

    /// Title similarity threshold in [0, 1]
    #[arg(long, env = "XPOST_THRESHOLD")]
    threshold: Option<f64>,

    /// Compare only the top N posts by score
    #[arg(long, env = "XPOST_CANDIDATE_LIMIT")]
    candidate_limit: Option<usize>,

    #[arg(long, value_enum)]
    score_fn: Option<ScoreFnArg>,

    /// Jaccard: ignore words of this many characters or fewer
    #[arg(long)]
    min_word_length: Option<usize>,

    /// Length of each top-N list in the report
    #[arg(long)]
    top_n: Option<usize>,

    /// Skip posts scoring below this
    #[arg(long)]
    min_score: Option<i64>,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {e:#}");
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    init_tracing()?;
    let cli = Cli::parse();
    match cli.command {
        Command::Analyze(args) => analyze(args).await,
    }
}

async fn analyze(args: AnalyzeArgs) -> Result<()> {
    let config = config::resolve_config(&args)?;
    info!(
        input = %args.input.display(),
        threshold = config.title_similarity_threshold,
        candidate_limit = ?config.candidate_limit,
        score_fn = ?config.score_fn,
        "Configuration loaded"
    );

    let source = JsonFileSource::new(&args.input);
    let posts = source
        .load()
        .await
        .with_context(|| format!("Failed to load corpus from {}", args.input.display()))?;

    let detector = CrosspostDetector::new(config);
    let report = detector.analyze(&posts);

    let rendered = match args.format {
        OutputFormat::Json => {
            let input = args.input.display().to_string();
            let envelope = output::ReportEnvelope::new(&input, &detector.config, &report);
            serde_json::to_string_pretty(&envelope)?
        }
        OutputFormat::Summary => output::render_summary(&report),
    };

    match &args.output {
        Some(path) => {
            tokio::fs::write(path, rendered)
                .await
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            info!(path = %path.display(), "Report written");
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| matches!(v.to_lowercase().as_str(), "json" | "structured"))
        .unwrap_or(false);

    // logs go to stderr so stdout stays clean for the report
    if use_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests;
