//! # Tweet Tokenizer
//!
//! Tokenizer for noisy social-media text, built to feed a brand-vs-word
//! classifier (is a tweet about Apple the company, or about apples?).
//!
//! ## Modules
//!
//! - `nlp` - Entity decoding, lexical rules, tokenization, vectorization
//! - `models` - Tokens, token counts and the document-term matrix
//! - `corpus` - Loading `tweet_id,tweet_text` CSV corpora
//! - `config` - Application configuration
//! - `error` - Error types
//!
//! ## Example
//!
//! ```rust
//! use tweet_tokenizer::{DictVectorizer, Documents, TweetTokenizer, Vectorizer};
//!
//! let tokenizer = TweetTokenizer::new("Apple").unwrap();
//! let tokens = tokenizer.tokenize("I love my Apple watch :)");
//! assert_eq!(tokens.last().map(String::as_str), Some("CAPITALIZED_BRAND"));
//!
//! let mut vectorizer = DictVectorizer::new(tokenizer);
//! let dtm = vectorizer.fit_transform(Documents::raw(&["apple pie", "Apple stock"]));
//! assert_eq!(dtm.n_documents(), 2);
//! ```

pub mod config;
pub mod corpus;
pub mod error;
pub mod logging;
pub mod models;
pub mod nlp;

pub use config::{AppConfig, TokenizerConfig};
pub use corpus::LabeledCorpus;
pub use error::{Error, Result};
pub use models::{DocumentTermMatrix, Documents, MatrixReport, Token, TokenCounts, TokenKind};
pub use nlp::{DictVectorizer, TweetTokenizer, Vectorizer, Vocabulary, CAPITALIZED_BRAND};
