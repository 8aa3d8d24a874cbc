//! Lexical rules for tweet text
//!
//! The rules are kept in a fixed priority order and compiled into a single
//! case-insensitive alternation. The regex engine uses leftmost-first
//! semantics, so at any position the earliest rule that matches wins: an
//! emoticon such as `:@` is claimed before the mention rule sees the `@`.

use crate::models::TokenKind;
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Phone numbers: optional country prefix and area code, exchange, base
const PHONE: &str = concat!(
    r"(?:\+?[01][\-\s.]*)?",   // international
    r"(?:\(?\d{3}[\-\s.)]*)?", // area code
    r"\d{3}",                  // exchange
    r"[\-\s.]*",
    r"\d{4}", // base
);

/// Emoticons, written eyes-nose-mouth or mirrored
const EMOTICON: &str = concat!(
    r"(?:",
    r"[<>]?",
    r"[:;=8]",                    // eyes
    r"[\-o*']?",                  // optional nose
    r"[)\](\[dDpP/:}{@|\\]",      // mouth
    r"|",
    r"[)\](\[dDpP/:}{@|\\]",      // mouth
    r"[\-o*']?",                  // optional nose
    r"[:;=8]",                    // eyes
    r"[<>]?",
    r")",
);

const HTML_TAG: &str = r"<[^>]+>";

const MENTION: &str = r"@\w+";

const HASHTAG: &str = r"#+\w+[\w'\-]*\w+";

/// Words containing apostrophes or dashes
const APOSTROPHE_WORD: &str = r"[a-z][a-z'\-_]+[a-z]";

/// Numbers, including fractions and decimals
const NUMBER: &str = r"[+\-]?\d+[,/.:\-]\d+[+\-]?";

/// Words without apostrophes or dashes
const WORD: &str = r"\w+";

/// Ellipsis dots
const ELLIPSIS: &str = r"\.(?:\s*\.)+";

/// Everything else that isn't whitespace
const SYMBOL: &str = r"\S";

/// An ordered lexical rule; its priority is its position in [`RULES`]
#[derive(Debug, Clone, Copy)]
pub struct PatternRule {
    /// Capture group name inside the combined pattern
    pub name: &'static str,
    pub pattern: &'static str,
    pub kind: TokenKind,
}

/// Rules in priority order
pub const RULES: &[PatternRule] = &[
    PatternRule { name: "phone", pattern: PHONE, kind: TokenKind::Phone },
    PatternRule { name: "emoticon", pattern: EMOTICON, kind: TokenKind::Emoticon },
    PatternRule { name: "html_tag", pattern: HTML_TAG, kind: TokenKind::HtmlTag },
    PatternRule { name: "mention", pattern: MENTION, kind: TokenKind::Mention },
    PatternRule { name: "hashtag", pattern: HASHTAG, kind: TokenKind::Hashtag },
    PatternRule { name: "apostrophe_word", pattern: APOSTROPHE_WORD, kind: TokenKind::Word },
    PatternRule { name: "number", pattern: NUMBER, kind: TokenKind::Number },
    PatternRule { name: "word", pattern: WORD, kind: TokenKind::Word },
    PatternRule { name: "ellipsis", pattern: ELLIPSIS, kind: TokenKind::Ellipsis },
    PatternRule { name: "symbol", pattern: SYMBOL, kind: TokenKind::Symbol },
];

/// Build the combined alternation, one named group per rule
fn combined_pattern() -> String {
    let alternatives: Vec<String> = RULES
        .iter()
        .map(|rule| format!("(?P<{}>{})", rule.name, rule.pattern))
        .collect();
    format!("(?i){}", alternatives.join("|"))
}

/// The core tokenizing regex
pub static TOKEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&combined_pattern()).expect("valid token regex"));

/// Emoticons on their own, to keep their case when folding
pub static EMOTICON_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("(?i){}", EMOTICON)).expect("valid emoticon regex"));

/// Angle-bracketed links such as `<http://t.co/abc>`
static BRACKETED_URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<http.+?>").expect("valid bracketed url regex"));

/// Bare links: scheme, `www` prefix or `domain.tld/`
static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)\b(?:https?://|www\d{0,3}[.]|[a-z0-9.\-]+[.][a-z]{2,4}/)",
        r"(?:[^\s()<>]+|\((?:[^\s()<>]+|\([^\s()<>]+\))*\))+",
        r#"(?:\((?:[^\s()<>]+|\([^\s()<>]+\))*\)|[^\s`!()\[\]{};:'".,<>?«»“”‘’])"#,
    ))
    .expect("valid url regex")
});

/// Rule kind of the alternative that produced a match
pub fn matched_kind(caps: &Captures) -> TokenKind {
    RULES
        .iter()
        .find(|rule| caps.name(rule.name).is_some())
        .map(|rule| rule.kind)
        .unwrap_or(TokenKind::Symbol)
}

/// Whether an emoticon occurs anywhere in `token`
pub fn contains_emoticon(token: &str) -> bool {
    EMOTICON_REGEX.is_match(token)
}

/// Remove links from `text`. Not applied unless the tokenizer enables it.
pub fn strip_urls(text: &str) -> String {
    let without_bracketed = BRACKETED_URL_REGEX.replace_all(text, "");
    URL_REGEX.replace_all(&without_bracketed, "").into_owned()
}
