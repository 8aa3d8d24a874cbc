//! Data types shared by the tokenizer and the vectorizer

use crate::error::Result;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Write;

/// Token (result of tokenization)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    /// Text as matched in the decoded input
    pub original: String,
    /// Text after case folding
    pub normalized: String,
    /// Position in the token sequence
    pub position: usize,
    /// Rule category that produced the token
    pub kind: TokenKind,
}

/// Rule category of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Phone number (555-1234, +1 (800) 555 1234)
    Phone,
    /// Emoticon (:-) ;D <:P)
    Emoticon,
    /// HTML tag (<br>)
    HtmlTag,
    /// Mention (@user)
    Mention,
    /// Hashtag (#topic)
    Hashtag,
    /// Word, with or without apostrophes and dashes
    Word,
    /// Number, fraction or decimal
    Number,
    /// Run of dots, possibly separated by whitespace
    Ellipsis,
    /// Any other single non-whitespace character
    Symbol,
    /// Synthetic brand capitalization tag
    BrandTag,
}

/// Occurrence counts of tokens within one document.
///
/// Equality ignores order, but iteration yields tokens in the order they were
/// first added so that vocabulary indices can be assigned deterministically.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<(String, usize)>", into = "Vec<(String, usize)>")]
pub struct TokenCounts {
    entries: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl TokenCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more occurrence of `token`
    pub fn add(&mut self, token: &str) {
        self.add_n(token, 1);
    }

    /// Count `n` more occurrences of `token`
    pub fn add_n(&mut self, token: &str, n: usize) {
        match self.index.get(token) {
            Some(&slot) => self.entries[slot].1 += n,
            None => {
                self.index.insert(token.to_string(), self.entries.len());
                self.entries.push((token.to_string(), n));
            }
        }
    }

    /// Number of occurrences of `token` (0 if absent)
    pub fn get(&self, token: &str) -> usize {
        self.index
            .get(token)
            .map(|&slot| self.entries[slot].1)
            .unwrap_or(0)
    }

    /// Number of distinct tokens
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of occurrences across all tokens
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, n)| n).sum()
    }

    /// Tokens with their counts, in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.entries.iter().map(|(t, n)| (t.as_str(), *n))
    }
}

impl PartialEq for TokenCounts {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(t, n)| other.get(t) == n)
    }
}

impl Eq for TokenCounts {}

impl<S: AsRef<str>> FromIterator<S> for TokenCounts {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut counts = Self::new();
        for token in iter {
            counts.add(token.as_ref());
        }
        counts
    }
}

impl From<Vec<(String, usize)>> for TokenCounts {
    fn from(pairs: Vec<(String, usize)>) -> Self {
        let mut counts = Self::new();
        for (token, n) in pairs {
            counts.add_n(&token, n);
        }
        counts
    }
}

impl From<TokenCounts> for Vec<(String, usize)> {
    fn from(counts: TokenCounts) -> Self {
        counts.entries
    }
}

/// Input of the vectorizer: raw texts or documents that were already counted
#[derive(Debug, Clone)]
pub enum Documents<'a> {
    /// Raw texts, tokenized before counting
    Raw(Vec<&'a str>),
    /// Counted documents, used as they are
    PreCounted(Vec<TokenCounts>),
}

impl<'a> Documents<'a> {
    /// Build a raw document set from anything that yields string references
    pub fn raw<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = &'a S>,
        S: AsRef<str> + ?Sized + 'a,
    {
        Documents::Raw(texts.into_iter().map(AsRef::as_ref).collect())
    }

    /// Number of documents
    pub fn len(&self) -> usize {
        match self {
            Documents::Raw(texts) => texts.len(),
            Documents::PreCounted(counts) => counts.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'a> From<&'a [String]> for Documents<'a> {
    fn from(texts: &'a [String]) -> Self {
        Documents::raw(texts)
    }
}

impl<'a> From<&'a [&'a str]> for Documents<'a> {
    fn from(texts: &'a [&'a str]) -> Self {
        Documents::Raw(texts.to_vec())
    }
}

impl From<Vec<TokenCounts>> for Documents<'_> {
    fn from(counts: Vec<TokenCounts>) -> Self {
        Documents::PreCounted(counts)
    }
}

/// Document-term count matrix
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentTermMatrix {
    /// Column names (index -> token)
    pub terms: Vec<String>,
    /// Counts [documents x terms]
    pub matrix: Array2<usize>,
}

impl DocumentTermMatrix {
    /// Zero-filled matrix for `n_documents` rows over `terms`
    pub fn zeros(n_documents: usize, terms: Vec<String>) -> Self {
        let matrix = Array2::zeros((n_documents, terms.len()));
        Self { terms, matrix }
    }

    /// Number of documents
    pub fn n_documents(&self) -> usize {
        self.matrix.nrows()
    }

    /// Number of terms
    pub fn n_terms(&self) -> usize {
        self.matrix.ncols()
    }

    /// Count of term `term_idx` in document `doc_idx`
    pub fn get(&self, doc_idx: usize, term_idx: usize) -> Option<usize> {
        self.matrix.get((doc_idx, term_idx)).copied()
    }

    /// Get document vector
    pub fn row(&self, doc_idx: usize) -> Option<Vec<usize>> {
        (doc_idx < self.n_documents()).then(|| self.matrix.row(doc_idx).to_vec())
    }

    /// Rows as nested vectors, for serialization
    pub fn to_rows(&self) -> Vec<Vec<usize>> {
        self.matrix.rows().into_iter().map(|r| r.to_vec()).collect()
    }
}

/// Result of a vectorization run, as written to disk
#[derive(Debug, Clone, Serialize)]
pub struct MatrixReport {
    pub feature_names: Vec<String>,
    /// Class labels of the fitted documents, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub targets: Option<Vec<u8>>,
    /// Counts of the fitted documents
    pub matrix: Vec<Vec<usize>>,
    /// Counts of further documents over the fitted vocabulary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transformed: Option<Vec<Vec<usize>>>,
}

impl MatrixReport {
    pub fn new(fitted: &DocumentTermMatrix) -> Self {
        Self {
            feature_names: fitted.terms.clone(),
            targets: None,
            matrix: fitted.to_rows(),
            transformed: None,
        }
    }

    pub fn with_targets(mut self, targets: Vec<u8>) -> Self {
        self.targets = Some(targets);
        self
    }

    pub fn with_transformed(mut self, transformed: &DocumentTermMatrix) -> Self {
        self.transformed = Some(transformed.to_rows());
        self
    }

    /// Serialize the report as JSON
    pub fn write_json<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer(writer, self)?;
        Ok(())
    }
}
