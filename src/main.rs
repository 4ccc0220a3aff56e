use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use toonrec::{
    evaluate, load_csv, EvalConfig, Error, Model, ModelConfig, Recommendation, SampleStrategy,
};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Content-based webtoon recommender
#[derive(Parser, Debug)]
#[command(name = "toonrec")]
#[command(about = "Content-based webtoon recommendations", long_about = None)]
struct Args {
    /// JSON model config; missing fields use defaults
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Recommend titles similar to a query title
    Recommend {
        /// Path to the webtoon CSV
        #[arg(short, long)]
        data: PathBuf,

        /// Query title, matched exactly
        #[arg(short, long)]
        title: String,

        /// Number of recommendations
        #[arg(short, default_value_t = toonrec::DEFAULT_K)]
        k: usize,

        /// Show the shared terms behind each score
        #[arg(long)]
        explain: bool,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Aggregate diversity, coverage and quality over sample queries
    Evaluate {
        #[arg(short, long)]
        data: PathBuf,

        #[arg(short, default_value_t = toonrec::DEFAULT_K)]
        k: usize,

        /// Number of queries
        #[arg(long, default_value_t = 10)]
        sample: usize,

        /// Draw the sample at random with this seed instead of the first rows
        #[arg(long)]
        seed: Option<u64>,

        /// Explicit query titles; overrides --sample and --seed
        #[arg(long, num_args = 1..)]
        titles: Vec<String>,
    },
    /// Show the fitted vocabulary
    Vocab {
        #[arg(short, long)]
        data: PathBuf,

        /// Number of terms to print
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = match &args.config {
        Some(path) => ModelConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ModelConfig::default(),
    };

    match args.command {
        Command::Recommend { data, title, k, explain, json } => {
            let model = build_model(&data, config)?;
            match run_recommend(&model, &title, k, explain, json) {
                Ok(()) => Ok(ExitCode::SUCCESS),
                Err(Error::ItemNotFound(_)) => {
                    eprintln!("Title '{}' not found in dataset", title);
                    Ok(ExitCode::FAILURE)
                }
                Err(e) => Err(e.into()),
            }
        }
        Command::Evaluate { data, k, sample, seed, titles } => {
            let model = build_model(&data, config)?;
            let sample = if !titles.is_empty() {
                SampleStrategy::Titles(titles)
            } else if let Some(seed) = seed {
                SampleStrategy::Random { n: sample, seed }
            } else {
                SampleStrategy::Head(sample)
            };

            let report = evaluate(&model, &EvalConfig { k, sample })?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Vocab { data, limit } => {
            let model = build_model(&data, config)?;
            let vocab = model.vectorizer().vocabulary();
            println!("Vocabulary size: {}", vocab.len());
            for term in vocab.terms().iter().take(limit) {
                println!("{}", term);
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn build_model(data: &Path, config: ModelConfig) -> anyhow::Result<Model> {
    let items = load_csv(data).with_context(|| format!("reading {}", data.display()))?;
    let model = Model::build(items, config)?;
    info!("Model ready: {} items", model.len());
    Ok(model)
}

fn run_recommend(model: &Model, title: &str, k: usize, explain: bool, json: bool) -> toonrec::Result<()> {
    if !explain {
        let recs = model.recommend(title, k)?;
        if json {
            println!("{}", to_json(&recs)?);
        } else {
            println!("Recommendations for '{}':", title);
            for rec in &recs {
                print_row(rec);
            }
        }
        return Ok(());
    }

    let response = model.recommend_explained(title, k, 5)?;
    if json {
        println!("{}", to_json(&response)?);
        return Ok(());
    }
    println!("Recommendations for '{}':", response.query);
    for r in &response.result {
        print_row(&r.recommendation);
        let terms: Vec<String> = r
            .shared_terms
            .iter()
            .map(|t| format!("{} ({:.3})", t.term, t.contribution))
            .collect();
        println!("     shared: {}", terms.join(", "));
    }
    Ok(())
}

fn print_row(rec: &Recommendation<'_>) {
    println!(
        "{:>3}. {:<40} {:<15} {:.4}",
        rec.rank, rec.item.title, rec.item.genre, rec.score
    );
}

fn to_json<T: serde::Serialize>(value: &T) -> toonrec::Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| Error::Serialization(e.to_string()))
}
