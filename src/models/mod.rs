//! Data models

mod types;

pub use types::{DocumentTermMatrix, Documents, MatrixReport, Token, TokenCounts, TokenKind};
