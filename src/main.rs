//! CLI for the tweet tokenizer
//!
//! Usage:
//! ```bash
//! cargo run -- --help
//! cargo run -- tokenize --brand Apple --text "I love my Apple watch :)"
//! cargo run -- vectorize --table scikit_testtrain_apple --data-dir data
//! cargo run -- vectorize --input tweets.csv --transform validation.csv -o out.json
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::BufRead;
use std::path::{Path, PathBuf};
use tracing::info;
use tweet_tokenizer::{
    config::{load_config, load_config_from_env},
    corpus::load_tweets,
    logging::setup_logging,
    nlp::decode_entities,
    AppConfig, DictVectorizer, Documents, LabeledCorpus, MatrixReport, TweetTokenizer,
    Vectorizer,
};

#[derive(Parser)]
#[command(name = "tweet_tokenizer")]
#[command(version = "0.1.0")]
#[command(about = "Tweet tokenization and bag-of-words vectorization", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (TOML or JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (overrides the configuration)
    #[arg(short, long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Tokenize text and print the tokens as JSON
    Tokenize {
        /// Text to tokenize; lines of stdin are used when absent
        #[arg(short, long)]
        text: Option<String>,

        /// Tracked brand name
        #[arg(short, long)]
        brand: Option<String>,

        /// Lower-case tokens (emoticons keep their case)
        #[arg(long)]
        lowercase: bool,

        /// Remove links before tokenizing
        #[arg(long)]
        strip_urls: bool,

        /// Print token kinds as well
        #[arg(long)]
        verbose: bool,
    },

    /// Decode HTML entities in text
    Decode {
        #[arg(short, long)]
        text: String,
    },

    /// Fit a vocabulary on tweets and print the document-term matrix summary
    Vectorize {
        /// Labeled corpus name (<table>_in_class.csv / <table>_out_class.csv)
        #[arg(long, conflicts_with = "input", required_unless_present = "input")]
        table: Option<String>,

        /// Single tweet_id,tweet_text CSV to fit on
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Directory holding the labeled corpus files
        #[arg(short, long, default_value = "data")]
        data_dir: PathBuf,

        /// Tracked brand name
        #[arg(short, long)]
        brand: Option<String>,

        /// Tweets to transform with the fitted vocabulary
        #[arg(long)]
        transform: Option<PathBuf>,

        /// Write feature names, targets and matrices to this JSON file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => {
            let mut config = load_config(path)
                .with_context(|| format!("Failed to load config: {:?}", path))?;
            config.apply_env_overrides();
            config
        }
        None => load_config_from_env(),
    };
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    setup_logging(&config.logging.level);

    match cli.command {
        Commands::Tokenize {
            text,
            brand,
            lowercase,
            strip_urls,
            verbose,
        } => {
            if let Some(brand) = brand {
                config.tokenizer.brand = brand;
            }
            if lowercase {
                config.tokenizer.preserve_case = false;
            }
            if strip_urls {
                config.tokenizer.strip_urls = true;
            }
            run_tokenize(&config, text, verbose)?;
        }
        Commands::Decode { text } => {
            println!("{}", decode_entities(&text));
        }
        Commands::Vectorize {
            table,
            input,
            data_dir,
            brand,
            transform,
            output,
        } => {
            if let Some(brand) = brand {
                config.tokenizer.brand = brand;
            }
            let (texts, targets) = match (table, input) {
                (Some(table), _) => {
                    let corpus = load_corpus(&data_dir, &table)?;
                    (corpus.texts, Some(corpus.targets))
                }
                (None, Some(path)) => {
                    let texts = load_tweets(&path)
                        .with_context(|| format!("Failed to load tweets from {:?}", path))?;
                    (texts, None)
                }
                (None, None) => anyhow::bail!("either --table or --input is required"),
            };
            run_vectorize(&config, &texts, targets, transform.as_deref(), output.as_deref())?;
        }
    }

    Ok(())
}

fn run_tokenize(config: &AppConfig, text: Option<String>, verbose: bool) -> Result<()> {
    let tokenizer = TweetTokenizer::from_config(&config.tokenizer)?;

    let print = |line: &str| -> Result<()> {
        let json = if verbose {
            serde_json::to_string(&tokenizer.tokenize_tokens(line))?
        } else {
            serde_json::to_string(&tokenizer.tokenize(line))?
        };
        println!("{}", json);
        Ok(())
    };

    match text {
        Some(text) => print(&text)?,
        None => {
            for line in std::io::stdin().lock().lines() {
                print(&line.context("Failed to read stdin")?)?;
            }
        }
    }

    Ok(())
}

fn load_corpus(data_dir: &Path, table: &str) -> Result<LabeledCorpus> {
    let corpus = LabeledCorpus::load(data_dir, table)
        .with_context(|| format!("Failed to load corpus {} from {:?}", table, data_dir))?;
    info!(
        documents = corpus.len(),
        in_class = corpus.n_in_class(),
        "loaded corpus"
    );
    Ok(corpus)
}

fn run_vectorize(
    config: &AppConfig,
    texts: &[String],
    targets: Option<Vec<u8>>,
    transform: Option<&Path>,
    output: Option<&Path>,
) -> Result<()> {
    let tokenizer = TweetTokenizer::from_config(&config.tokenizer)?;
    let mut vectorizer = DictVectorizer::new(tokenizer);
    let dtm = vectorizer.fit_transform(Documents::from(texts));

    let names = vectorizer.get_feature_names();
    println!(
        "Feature names (first 20): {:?} ...",
        &names[..names.len().min(20)]
    );
    println!("Vectorized {} features", names.len());

    let mut report = MatrixReport::new(&dtm);
    if let Some(targets) = targets {
        report = report.with_targets(targets);
    }

    if let Some(path) = transform {
        let tweets = load_tweets(path)
            .with_context(|| format!("Failed to load tweets from {:?}", path))?;
        let transformed = vectorizer.transform(Documents::from(tweets.as_slice()));
        println!(
            "Transformed {} documents over {} features",
            transformed.n_documents(),
            transformed.n_terms()
        );
        report = report.with_transformed(&transformed);
    }

    if let Some(path) = output {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        report.write_json(std::io::BufWriter::new(file))?;
        println!("Matrix {}x{} written to {:?}", dtm.n_documents(), dtm.n_terms(), path);
    }

    Ok(())
}
