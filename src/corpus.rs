//! Tweet corpus loading
//!
//! Corpora are CSV files with a `tweet_id,tweet_text` header. A labeled
//! training set is a pair of such files: tweets about the brand (in class)
//! and tweets that only mention the word (out of class).

use crate::error::{Error, Result};
use csv::ReaderBuilder;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;

const HEADER: [&str; 2] = ["tweet_id", "tweet_text"];

/// Read tweet texts from CSV; texts are trimmed and empty ones skipped
pub fn read_tweets<R: Read>(reader: R) -> Result<Vec<String>> {
    let mut csv = ReaderBuilder::new().has_headers(true).from_reader(reader);

    let headers = csv.headers()?;
    if headers.iter().ne(HEADER) {
        return Err(Error::InvalidCorpus(format!(
            "expected header {:?}, found {:?}",
            HEADER,
            headers.iter().collect::<Vec<_>>()
        )));
    }

    let mut tweets = Vec::new();
    for record in csv.records() {
        let record = record?;
        let text = record.get(1).unwrap_or_default().trim();
        if !text.is_empty() {
            tweets.push(text.to_string());
        }
    }
    Ok(tweets)
}

/// Read tweet texts from a CSV file
pub fn load_tweets<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let file = File::open(path.as_ref())?;
    let tweets = read_tweets(file)?;
    info!(path = %path.as_ref().display(), tweets = tweets.len(), "loaded tweets");
    Ok(tweets)
}

/// Two-class training corpus: out-of-class tweets first, then in-class ones
#[derive(Debug, Clone, Default)]
pub struct LabeledCorpus {
    /// Tweet texts
    pub texts: Vec<String>,
    /// 1 for in class (about the brand), 0 otherwise
    pub targets: Vec<u8>,
}

impl LabeledCorpus {
    pub fn new(out_class: Vec<String>, in_class: Vec<String>) -> Self {
        let targets = std::iter::repeat(0)
            .take(out_class.len())
            .chain(std::iter::repeat(1).take(in_class.len()))
            .collect();
        let mut texts = out_class;
        texts.extend(in_class);
        Self { texts, targets }
    }

    /// Load `<table>_in_class.csv` and `<table>_out_class.csv` from `data_dir`
    pub fn load<P: AsRef<Path>>(data_dir: P, table: &str) -> Result<Self> {
        let (in_path, out_path) = Self::paths(data_dir, table);
        let in_class = load_tweets(in_path)?;
        let out_class = load_tweets(out_path)?;
        Ok(Self::new(out_class, in_class))
    }

    /// Locations of the in-class and out-of-class files for `table`
    pub fn paths<P: AsRef<Path>>(data_dir: P, table: &str) -> (PathBuf, PathBuf) {
        let dir = data_dir.as_ref();
        (
            dir.join(format!("{table}_in_class.csv")),
            dir.join(format!("{table}_out_class.csv")),
        )
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    /// Number of in-class tweets
    pub fn n_in_class(&self) -> usize {
        self.targets.iter().filter(|&&t| t == 1).count()
    }
}
