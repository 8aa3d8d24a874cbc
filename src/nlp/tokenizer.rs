//! Tweet tokenizer
//!
//! Splits tweet text into tokens (phone numbers, emoticons, HTML tags,
//! mentions, hashtags, words, numbers, ellipses, symbols) and tags the
//! sequence when the capitalized brand name appears in it.

use super::entities::decode_entities;
use super::patterns::{contains_emoticon, matched_kind, strip_urls, TOKEN_REGEX};
use crate::config::TokenizerConfig;
use crate::error::{Error, Result};
use crate::models::{Token, TokenCounts, TokenKind};
use std::borrow::Cow;
use tracing::debug;

/// Sentinel appended when the capitalized brand appears among the tokens
pub const CAPITALIZED_BRAND: &str = "CAPITALIZED_BRAND";

/// Tweet tokenizer
#[derive(Debug, Clone)]
pub struct TweetTokenizer {
    /// Tracked brand name
    brand: String,
    /// Brand with first letter uppercase and the rest lowercase
    capitalized_brand: String,
    /// Keep the case of the input
    preserve_case: bool,
    /// Remove links before matching
    strip_urls: bool,
}

impl TweetTokenizer {
    /// Create a tokenizer for `brand` that preserves case
    pub fn new(brand: impl Into<String>) -> Result<Self> {
        let brand = brand.into();
        if brand.trim().is_empty() {
            return Err(Error::InvalidConfig("brand must not be empty".to_string()));
        }
        let capitalized_brand = capitalize(&brand);

        Ok(Self {
            brand,
            capitalized_brand,
            preserve_case: true,
            strip_urls: false,
        })
    }

    /// Create a tokenizer from configuration
    pub fn from_config(config: &TokenizerConfig) -> Result<Self> {
        Ok(Self::new(config.brand.clone())?
            .with_preserve_case(config.preserve_case)
            .with_url_stripping(config.strip_urls))
    }

    /// Keep the case of tokens (default) or lower-case everything but emoticons
    pub fn with_preserve_case(mut self, preserve: bool) -> Self {
        self.preserve_case = preserve;
        self
    }

    /// Remove links before tokenizing (off by default)
    pub fn with_url_stripping(mut self, strip: bool) -> Self {
        self.strip_urls = strip;
        self
    }

    pub fn brand(&self) -> &str {
        &self.brand
    }

    pub fn preserve_case(&self) -> bool {
        self.preserve_case
    }

    /// Tokenize text, keeping the kind of rule that produced each token
    pub fn tokenize_tokens(&self, text: &str) -> Vec<Token> {
        let decoded = decode_entities(text);
        let source: Cow<'_, str> = if self.strip_urls {
            Cow::Owned(strip_urls(&decoded))
        } else {
            decoded
        };

        let mut tokens: Vec<Token> = TOKEN_REGEX
            .captures_iter(&source)
            .enumerate()
            .map(|(position, caps)| {
                let original = caps[0].to_string();
                let normalized = if self.preserve_case || contains_emoticon(&original) {
                    original.clone()
                } else {
                    original.to_lowercase()
                };
                Token {
                    original,
                    normalized,
                    position,
                    kind: matched_kind(&caps),
                }
            })
            .collect();

        // Checked after folding, so a lower-cased sequence never carries the tag
        if tokens.iter().any(|t| t.normalized == self.capitalized_brand) {
            tokens.push(Token {
                original: CAPITALIZED_BRAND.to_string(),
                normalized: CAPITALIZED_BRAND.to_string(),
                position: tokens.len(),
                kind: TokenKind::BrandTag,
            });
        }

        debug!(tokens = tokens.len(), chars = text.len(), "tokenized text");
        tokens
    }

    /// Tokenize text into the normalized token strings
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.tokenize_tokens(text)
            .into_iter()
            .map(|t| t.normalized)
            .collect()
    }

    /// Tokenize input that is not known to be UTF-8.
    ///
    /// When the bytes are not valid UTF-8 the whole input is escaped (see
    /// [`coerce_text`]) and the escaped text is tokenized instead.
    pub fn tokenize_bytes(&self, bytes: &[u8]) -> Result<Vec<String>> {
        let text = coerce_text(bytes)?;
        Ok(self.tokenize(&text))
    }

    /// Token occurrence counts for one document
    pub fn count_tokens(&self, text: &str) -> TokenCounts {
        self.tokenize_tokens(text)
            .iter()
            .map(|t| t.normalized.as_str())
            .collect()
    }
}

/// First character uppercase, the rest lowercase
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => {
            let mut capitalized: String = first.to_uppercase().collect();
            capitalized.push_str(&chars.as_str().to_lowercase());
            capitalized
        }
    }
}

/// Best-effort conversion of raw bytes to text.
///
/// Valid UTF-8 is borrowed as-is. Otherwise every byte is escaped: `\\`,
/// `'`, `\t`, `\n` and `\r` get a backslash escape, other bytes outside
/// printable ASCII become `\xNN`, and everything else (double quotes
/// included) is kept.
pub fn coerce_text(bytes: &[u8]) -> Result<Cow<'_, str>> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Ok(Cow::Borrowed(text)),
        Err(err) => {
            debug!(valid_up_to = err.valid_up_to(), "input is not UTF-8, escaping");
            String::from_utf8(escape_bytes(bytes))
                .map(Cow::Owned)
                .map_err(|e| Error::Encoding(e.to_string()))
        }
    }
}

fn escape_bytes(bytes: &[u8]) -> Vec<u8> {
    let mut escaped = Vec::with_capacity(bytes.len());
    for &byte in bytes {
        match byte {
            b'\\' => escaped.extend_from_slice(b"\\\\"),
            b'\'' => escaped.extend_from_slice(b"\\'"),
            b'\t' => escaped.extend_from_slice(b"\\t"),
            b'\n' => escaped.extend_from_slice(b"\\n"),
            b'\r' => escaped.extend_from_slice(b"\\r"),
            b' '..=b'~' => escaped.push(byte),
            _ => escaped.extend(std::ascii::escape_default(byte)),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apple() -> TweetTokenizer {
        TweetTokenizer::new("Apple").unwrap()
    }

    #[test]
    fn test_empty_input() {
        let tokenizer = apple();
        assert!(tokenizer.tokenize_tokens("").is_empty());
        assert!(tokenizer.tokenize_tokens("   \t\n").is_empty());
    }

    #[test]
    fn test_twitter_tokens_in_order() {
        let tokens = apple().tokenize_tokens("@user #topic :) 555-1234");

        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Mention,
                TokenKind::Hashtag,
                TokenKind::Emoticon,
                TokenKind::Phone
            ]
        );
        let positions: Vec<_> = tokens.iter().map(|t| t.position).collect();
        assert_eq!(positions, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_fold_keeps_emoticons() {
        let tokenizer = apple().with_preserve_case(false);
        assert_eq!(
            tokenizer.tokenize("Happy :D HAPPY"),
            vec!["happy", ":D", "happy"]
        );
    }

    #[test]
    fn test_preserve_case_by_default() {
        assert_eq!(
            apple().tokenize("Happy :D HAPPY"),
            vec!["Happy", ":D", "HAPPY"]
        );
    }

    #[test]
    fn test_brand_tag() {
        let tokenizer = apple();

        let tagged = tokenizer.tokenize("I love my Apple watch");
        assert_eq!(tagged.last().map(String::as_str), Some(CAPITALIZED_BRAND));

        let untagged = tokenizer.tokenize("i love my apple watch");
        assert!(!untagged.iter().any(|t| t == CAPITALIZED_BRAND));
    }

    #[test]
    fn test_brand_tag_requires_exact_capitalization() {
        let tokenizer = apple();
        assert!(!tokenizer
            .tokenize("APPLE stock")
            .contains(&CAPITALIZED_BRAND.to_string()));
        // the brand is capitalized before comparing, whatever case it was given in
        let lower = TweetTokenizer::new("apple").unwrap();
        assert!(lower
            .tokenize("Apple stock")
            .contains(&CAPITALIZED_BRAND.to_string()));
    }

    #[test]
    fn test_folding_suppresses_brand_tag() {
        let tokenizer = apple().with_preserve_case(false);
        let tokens = tokenizer.tokenize("I love my Apple watch");
        assert!(!tokens.contains(&CAPITALIZED_BRAND.to_string()));
        assert!(tokens.contains(&"apple".to_string()));
    }

    #[test]
    fn test_brand_tag_token_kind() {
        let tokens = apple().tokenize_tokens("Apple");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].kind, TokenKind::BrandTag);
        assert_eq!(tokens[1].position, 1);
    }

    #[test]
    fn test_entities_decoded_before_matching() {
        let tokens = apple().tokenize("Tom &amp; Jerry&hellip; it&#39;s");
        assert_eq!(tokens, vec!["Tom", "and", "Jerry", "…", "it's"]);
    }

    #[test]
    fn test_urls_kept_by_default() {
        let tokens = apple().tokenize("see http://t.co/x");
        assert!(tokens.contains(&"http".to_string()));

        let stripped = apple()
            .with_url_stripping(true)
            .tokenize("see http://t.co/x");
        assert_eq!(stripped, vec!["see"]);
    }

    #[test]
    fn test_idempotent() {
        let tokenizer = apple().with_preserve_case(false);
        let text = "RT @Apple: new #iPhone ... $199.99 :-)";
        assert_eq!(tokenizer.tokenize_tokens(text), tokenizer.tokenize_tokens(text));
    }

    #[test]
    fn test_empty_brand_rejected() {
        assert!(matches!(
            TweetTokenizer::new("  "),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("aPPLE"), "Apple");
        assert_eq!(capitalize("éclair"), "Éclair");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_tokenize_bytes() {
        let tokenizer = apple();
        assert_eq!(
            tokenizer.tokenize_bytes(b"Apple pie").unwrap(),
            vec!["Apple", "pie", CAPITALIZED_BRAND]
        );

        let tokens = tokenizer.tokenize_bytes(b"caf\xe9 ok").unwrap();
        assert_eq!(tokens, vec!["caf", "\\", "xe9", "ok"]);
    }

    #[test]
    fn test_escaped_bytes_keep_double_quotes() {
        let tokens = apple().tokenize_bytes(b"\"hi\" \xff").unwrap();
        assert_eq!(tokens, vec!["\"", "hi", "\"", "\\", "xff"]);
    }

    #[test]
    fn test_escape_bytes() {
        assert_eq!(escape_bytes(b"a\"b"), b"a\"b".to_vec());
        assert_eq!(escape_bytes(b"it's\t\\"), b"it\\'s\\t\\\\".to_vec());
        assert_eq!(escape_bytes(b"\xe9\x00"), b"\\xe9\\x00".to_vec());
    }

    #[test]
    fn test_count_tokens() {
        let counts = apple().count_tokens("go go Apple :) :)");
        assert_eq!(counts.get("go"), 2);
        assert_eq!(counts.get(":)"), 2);
        assert_eq!(counts.get(CAPITALIZED_BRAND), 1);
    }
}
