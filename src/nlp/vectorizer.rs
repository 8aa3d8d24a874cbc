//! Text vectorization
//!
//! Turns documents into bag-of-words counts and maps them onto a feature
//! vocabulary, producing the document-term matrix consumed by a classifier.

use super::tokenizer::TweetTokenizer;
use crate::models::{DocumentTermMatrix, Documents, TokenCounts};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

/// Trait for vectorizers
pub trait Vectorizer {
    /// Learn the vocabulary of a corpus
    fn fit(&mut self, documents: Documents<'_>);

    /// Map documents onto the learned vocabulary
    fn transform(&self, documents: Documents<'_>) -> DocumentTermMatrix;

    /// Learn the vocabulary and map the same documents onto it
    fn fit_transform(&mut self, documents: Documents<'_>) -> DocumentTermMatrix;

    /// Vocabulary terms in column order
    fn get_feature_names(&self) -> &[String];
}

/// Feature vocabulary: token -> stable column index
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Vocabulary {
    /// Token -> index
    index: HashMap<String, usize>,
    /// Index -> token
    terms: Vec<String>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of features
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Column of `token`, if it is known
    pub fn index_of(&self, token: &str) -> Option<usize> {
        self.index.get(token).copied()
    }

    /// Terms in index order
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Add unseen tokens of `counts`, in the order they were first seen.
    /// Returns how many features were added.
    pub fn extend(&mut self, counts: &TokenCounts) -> usize {
        let before = self.terms.len();
        for (token, _) in counts.iter() {
            if !self.index.contains_key(token) {
                self.index.insert(token.to_string(), self.terms.len());
                self.terms.push(token.to_string());
            }
        }
        self.terms.len() - before
    }

    /// Count vector of `counts` over the current features; unknown tokens are dropped
    pub fn row(&self, counts: &TokenCounts) -> Vec<usize> {
        let mut row = vec![0; self.terms.len()];
        for (token, n) in counts.iter() {
            if let Some(idx) = self.index_of(token) {
                row[idx] += n;
            }
        }
        row
    }

    /// Fill a document-term matrix with `rows` of counts
    pub fn matrix(&self, rows: &[TokenCounts]) -> DocumentTermMatrix {
        let mut dtm = DocumentTermMatrix::zeros(rows.len(), self.terms.clone());
        for (doc_idx, counts) in rows.iter().enumerate() {
            for (token, n) in counts.iter() {
                if let Some(term_idx) = self.index_of(token) {
                    dtm.matrix[[doc_idx, term_idx]] += n;
                }
            }
        }
        dtm
    }
}

impl From<Vec<String>> for Vocabulary {
    fn from(terms: Vec<String>) -> Self {
        let mut vocabulary = Self::new();
        for term in terms {
            if !vocabulary.index.contains_key(&term) {
                vocabulary.index.insert(term.clone(), vocabulary.terms.len());
                vocabulary.terms.push(term);
            }
        }
        vocabulary
    }
}

impl From<Vocabulary> for Vec<String> {
    fn from(vocabulary: Vocabulary) -> Self {
        vocabulary.terms
    }
}

/// Bag-of-words vectorizer over tweet tokens
#[derive(Debug, Clone)]
pub struct DictVectorizer {
    tokenizer: TweetTokenizer,
    vocabulary: Vocabulary,
}

impl DictVectorizer {
    /// Vectorizer with an empty vocabulary
    pub fn new(tokenizer: TweetTokenizer) -> Self {
        Self::with_vocabulary(tokenizer, Vocabulary::new())
    }

    /// Vectorizer that continues from an existing vocabulary
    pub fn with_vocabulary(tokenizer: TweetTokenizer, vocabulary: Vocabulary) -> Self {
        Self {
            tokenizer,
            vocabulary,
        }
    }

    pub fn tokenizer(&self) -> &TweetTokenizer {
        &self.tokenizer
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Give the vocabulary back to the caller
    pub fn into_vocabulary(self) -> Vocabulary {
        self.vocabulary
    }

    /// One token-count mapping per document. Counted documents pass through.
    pub fn split_for_dict_vectorizer(&self, documents: Documents<'_>) -> Vec<TokenCounts> {
        match documents {
            Documents::Raw(texts) => texts
                .into_iter()
                .map(|text| self.tokenizer.count_tokens(text))
                .collect(),
            Documents::PreCounted(counts) => counts,
        }
    }

    fn fit_counts(&mut self, counts: &[TokenCounts]) {
        let added: usize = counts.iter().map(|c| self.vocabulary.extend(c)).sum();
        info!(
            documents = counts.len(),
            added,
            features = self.vocabulary.len(),
            "fitted vocabulary"
        );
    }
}

impl Vectorizer for DictVectorizer {
    fn fit(&mut self, documents: Documents<'_>) {
        let counts = self.split_for_dict_vectorizer(documents);
        self.fit_counts(&counts);
    }

    fn transform(&self, documents: Documents<'_>) -> DocumentTermMatrix {
        let counts = self.split_for_dict_vectorizer(documents);
        debug!(
            documents = counts.len(),
            features = self.vocabulary.len(),
            "transforming documents"
        );
        self.vocabulary.matrix(&counts)
    }

    fn fit_transform(&mut self, documents: Documents<'_>) -> DocumentTermMatrix {
        let counts = self.split_for_dict_vectorizer(documents);
        self.fit_counts(&counts);
        self.vocabulary.matrix(&counts)
    }

    fn get_feature_names(&self) -> &[String] {
        self.vocabulary.terms()
    }
}
