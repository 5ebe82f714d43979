//! [`TolerantTokenizer`]: a longest-match regex lexer that never fails.
//!
//! The tokenizer tries a fixed, ordered list of patterns at every position.
//! The order itself is the disambiguation policy and is load-bearing: paths
//! and URLs must be tried before punctuation swallows their `:` and `/`,
//! date-shaped literals must be tried before plain numbers so `2026-01-01`
//! doesn't fragment into `2026 MINUS 01 MINUS 01`, and boolean/null keywords
//! must be tried before bare words so `true` isn't left as an identifier.
//! Residual characters become [`TokenKind::Unknown`] rather than an error —
//! higher layers decide what to do with them.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::token::{Token, TokenKind};

struct Pattern {
    kind: TokenKind,
    regex: Regex,
}

static PATTERNS: Lazy<Vec<Pattern>> = Lazy::new(|| {
    // Order matters: see the module doc comment.
    vec![
        // 1. Filesystem-like paths, ahead of COLON (`C:\x`) and slashes.
        Pattern {
            kind: TokenKind::String,
            regex: Regex::new(r#"^(?:[A-Za-z]:\\[^\s,\]}"']+|/[A-Za-z0-9_.\-]+(?:/[A-Za-z0-9_.\-]+)+)"#)
                .unwrap(),
        },
        // 2. Absolute URLs, ahead of COLON.
        Pattern {
            kind: TokenKind::String,
            regex: Regex::new(r#"^https?://[^\s,\]}"']+"#).unwrap(),
        },
        // 3. Date-shaped literals, ahead of NUMBER to avoid subtraction-like fragmentation.
        Pattern {
            kind: TokenKind::Date,
            regex: Regex::new(r"^(?:\d{4}-\d{2}-\d{2}|\d{2}-\d{2}-\d{4}|\d{3}-\d{3}-\d{4}|\d{3}-\d{4})")
                .unwrap(),
        },
        // 4. Double-quoted strings, with backslash escapes.
        Pattern {
            kind: TokenKind::String,
            regex: Regex::new(r#"^"(?:\\.|[^"\\])*""#).unwrap(),
        },
        // 5. Single-quoted strings (finalizer rewrites these to double quotes).
        Pattern {
            kind: TokenKind::String,
            regex: Regex::new(r"^'(?:\\.|[^'\\])*'").unwrap(),
        },
        // 6. Leading-zero digit runs, ahead of the strict NUMBER grammar below
        //    so `00851` tokenizes as one NUMBER rather than fragmenting into
        //    `0`, `0`, `851` (JSON numbers never have a leading zero, so the
        //    strict pattern alone would only ever consume the first `0`).
        Pattern {
            kind: TokenKind::Number,
            regex: Regex::new(r"^0\d+").unwrap(),
        },
        // 7. Signed decimal / scientific numbers, ahead of BOOLEAN/NULL words.
        Pattern {
            kind: TokenKind::Number,
            regex: Regex::new(r"^-?(?:0|[1-9]\d*)(?:\.\d+)?(?:[eE][+-]?\d+)?").unwrap(),
        },
        // 8. Case-insensitive boolean words.
        Pattern {
            kind: TokenKind::Boolean,
            regex: Regex::new(r"(?i)^(?:true|false|si|no|yes|on|off)\b").unwrap(),
        },
        // 9. Case-insensitive null words.
        Pattern {
            kind: TokenKind::Null,
            regex: Regex::new(r"(?i)^(?:null|none|nil)\b").unwrap(),
        },
        // 10. Structural punctuation.
        Pattern { kind: TokenKind::LBrace, regex: Regex::new(r"^\{").unwrap() },
        Pattern { kind: TokenKind::RBrace, regex: Regex::new(r"^\}").unwrap() },
        Pattern { kind: TokenKind::LBracket, regex: Regex::new(r"^\[").unwrap() },
        Pattern { kind: TokenKind::RBracket, regex: Regex::new(r"^\]").unwrap() },
        Pattern { kind: TokenKind::LParen, regex: Regex::new(r"^\(").unwrap() },
        Pattern { kind: TokenKind::RParen, regex: Regex::new(r"^\)").unwrap() },
        Pattern { kind: TokenKind::Colon, regex: Regex::new(r"^:").unwrap() },
        Pattern { kind: TokenKind::Assign, regex: Regex::new(r"^=").unwrap() },
        Pattern { kind: TokenKind::Comma, regex: Regex::new(r"^,").unwrap() },
        // 11. Bare identifiers: letter/underscore (incl. Latin-1 accented range), then word chars or `-`.
        Pattern {
            kind: TokenKind::BareWord,
            regex: Regex::new(r"^[A-Za-z_\u{00C0}-\u{00FF}][A-Za-z0-9_\-\u{00C0}-\u{00FF}]*").unwrap(),
        },
        // 12. Anything else, one character at a time.
        Pattern { kind: TokenKind::Unknown, regex: Regex::new(r"^.").unwrap() },
    ]
});

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s+").unwrap());

/// A regex-based longest-match lexer producing a token vector from arbitrary text.
///
/// `TolerantTokenizer` never fails: a character matching none of the
/// structured patterns falls through to [`TokenKind::Unknown`] rather than
/// raising, so a parse always has a token stream to work with.
#[derive(Debug, Default, Clone, Copy)]
pub struct TolerantTokenizer;

impl TolerantTokenizer {
    pub fn new() -> Self {
        Self
    }

    /// Split `text` into a token vector, tracking byte offset, line and column.
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut pos = 0usize;
        let mut line = 1usize;
        let mut column = 1usize;

        while pos < text.len() {
            let rest = &text[pos..];

            if let Some(m) = WHITESPACE.find(rest) {
                let ws = m.as_str();
                let newlines = ws.matches('\n').count();
                if newlines > 0 {
                    line += newlines;
                    column = ws.rsplit('\n').next().map_or(1, |tail| tail.chars().count() + 1);
                } else {
                    column += ws.chars().count();
                }
                pos += ws.len();
                continue;
            }

            let mut matched = false;
            for pattern in PATTERNS.iter() {
                if let Some(m) = pattern.regex.find(rest) {
                    if m.start() != 0 {
                        continue;
                    }
                    let lexeme = m.as_str();
                    tokens.push(Token::at(pattern.kind, lexeme, pos, line, column));
                    column += lexeme.chars().count();
                    pos += lexeme.len();
                    matched = true;
                    break;
                }
            }

            if !matched {
                // Unreachable in practice: the Unknown pattern (`.`) matches any
                // single non-whitespace character. Guard against an infinite
                // loop on a char boundary mismatch anyway.
                let next = rest.chars().next().map(|c| c.len_utf8()).unwrap_or(1);
                pos += next;
                column += 1;
            }
        }

        tokens
    }
}
