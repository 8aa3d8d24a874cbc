//! Natural language processing for tweets
//!
//! Includes:
//! - HTML entity decoding
//! - Ordered lexical rules (phone numbers, emoticons, mentions, hashtags, ...)
//! - Tokenization with brand capitalization tagging
//! - Bag-of-words vectorization

pub mod entities;
pub mod patterns;
mod tokenizer;
mod vectorizer;

pub use entities::decode_entities;
pub use tokenizer::{coerce_text, TweetTokenizer, CAPITALIZED_BRAND};
pub use vectorizer::{DictVectorizer, Vectorizer, Vocabulary};
