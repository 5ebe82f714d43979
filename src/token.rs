//! The token model shared by every stage of the repair pipeline.

use std::fmt::{self, Debug, Display, Formatter};

/// The lexical category a [`Token`] belongs to.
///
/// `kind` unambiguously determines how [`crate::finalize::Finalizer`] renders
/// a token back into JSON text, so rules that change a token's semantic role
/// must also update its `kind` — never leave it implied by `value` alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    LParen,
    RParen,
    Colon,
    Comma,
    Assign,
    String,
    Number,
    Boolean,
    Null,
    BareWord,
    Date,
    Unknown,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(self, f)
    }
}

impl TokenKind {
    /// Token kinds a value (as opposed to a key, separator or bracket) can start with.
    pub fn is_value_starter(self) -> bool {
        matches!(
            self,
            TokenKind::String
                | TokenKind::Number
                | TokenKind::Boolean
                | TokenKind::Null
                | TokenKind::BareWord
                | TokenKind::Date
                | TokenKind::LBrace
                | TokenKind::LBracket
        )
    }

    /// Token kinds a value (or a closed container) can end with.
    pub fn is_value_ender(self) -> bool {
        matches!(
            self,
            TokenKind::String
                | TokenKind::Number
                | TokenKind::Boolean
                | TokenKind::Null
                | TokenKind::BareWord
                | TokenKind::Date
                | TokenKind::RBrace
                | TokenKind::RBracket
        )
    }
}

/// The atomic unit produced by [`crate::tokenizer::TolerantTokenizer`] and
/// mutated in place by every [`crate::rule::RuleDef`].
///
/// `value` is the literal text as it will appear in the emitted JSON (for
/// `String` tokens this includes the surrounding quotes once a rule has
/// normalized them); `raw_value` is the original lexeme, kept for
/// diagnostics and for rules that need to inspect what the tokenizer first
/// saw before any rewrite ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub raw_value: String,
    pub position: usize,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>, position: usize) -> Self {
        let value = value.into();
        Self {
            kind,
            raw_value: value.clone(),
            value,
            position,
            line: 0,
            column: 0,
        }
    }

    pub fn at(kind: TokenKind, value: impl Into<String>, position: usize, line: usize, column: usize) -> Self {
        let value = value.into();
        Self {
            kind,
            raw_value: value.clone(),
            value,
            position,
            line,
            column,
        }
    }

    /// A synthetic token inserted by a rule rather than produced by the tokenizer
    /// (e.g. a brace [`crate::rules::cleanup::WrapRootObject`] wraps the stream with).
    pub fn synthetic(kind: TokenKind, value: impl Into<String>) -> Self {
        Self::new(kind, value, 0)
    }
}
