//! Collapsing runs of adjacent string tokens left over from word-by-word
//! bare-word quoting, e.g. `"John" "Smith"` -> `"John Smith"`.

use crate::context::Context;
use crate::rule::RuleDef;
use crate::token::{Token, TokenKind};

fn inner(value: &str) -> &str {
    value.strip_prefix('"').and_then(|v| v.strip_suffix('"')).unwrap_or(value)
}

/// The length of the run of STRING tokens starting at `start` that is safe to
/// merge: stops before the run's own end if a trailing member is immediately
/// followed by a COLON, since that member is then the start of the next key
/// rather than a continuation of the current value.
fn safe_run_len(tokens: &[Token], start: usize) -> usize {
    let mut end = start;
    while end < tokens.len() && tokens[end].kind == TokenKind::String {
        end += 1;
    }
    let mut len = end - start;
    if len >= 2 && tokens.get(end).is_some_and(|t| t.kind == TokenKind::Colon) {
        len -= 1;
    }
    len
}

fn applies(ctx: &Context) -> bool {
    let tokens = &ctx.tokens;
    let mut i = 0;
    while i < tokens.len() {
        if tokens[i].kind == TokenKind::String {
            let run = safe_run_len(tokens, i);
            if run >= 2 {
                return true;
            }
            i += run.max(1);
        } else {
            i += 1;
        }
    }
    false
}

fn apply(ctx: &mut Context) {
    let tokens = std::mem::take(&mut ctx.tokens);
    let mut out = Vec::with_capacity(tokens.len());
    let mut changed = false;
    let mut i = 0;

    while i < tokens.len() {
        if tokens[i].kind == TokenKind::String {
            let run = safe_run_len(&tokens, i);
            if run >= 2 {
                let merged = tokens[i..i + run].iter().map(|t| inner(&t.value)).collect::<Vec<_>>().join(" ");
                out.push(Token::new(TokenKind::String, format!("\"{merged}\""), tokens[i].position));
                changed = true;
                i += run;
                continue;
            }
        }
        out.push(tokens[i].clone());
        i += 1;
    }

    if changed {
        ctx.tokens = out;
        ctx.mark_changed();
    } else {
        ctx.tokens = tokens;
    }
}

pub static MERGE_ADJACENT_STRINGS: RuleDef = RuleDef::new(
    "MergeAdjacentStrings",
    65,
    &["values", "normalization"],
    applies,
    apply,
);

pub static RULES: &[RuleDef] = &[MERGE_ADJACENT_STRINGS];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Token;

    fn tok(kind: TokenKind, value: &str) -> Token {
        Token::new(kind, value, 0)
    }

    #[test]
    fn merges_a_plain_run_of_strings() {
        let mut c = Context::new("", vec![tok(TokenKind::String, "\"John\""), tok(TokenKind::String, "\"Smith\"")]);
        assert!(applies(&c));
        apply(&mut c);
        assert_eq!(c.tokens.len(), 1);
        assert_eq!(c.tokens[0].value, "\"John Smith\"");
    }

    #[test]
    fn protects_trailing_member_that_starts_the_next_key() {
        let mut c = Context::new(
            "",
            vec![
                tok(TokenKind::Colon, ":"),
                tok(TokenKind::String, "\"stray\""),
                tok(TokenKind::String, "\"nextkey\""),
                tok(TokenKind::Colon, ":"),
            ],
        );
        apply(&mut c);
        // Only two strings in the run and the run shrinks to 1, so nothing merges.
        assert_eq!(c.tokens.len(), 4);
        assert!(!c.changed());
    }

    #[test]
    fn merges_all_but_the_next_key_in_a_longer_run() {
        let mut c = Context::new(
            "",
            vec![
                tok(TokenKind::String, "\"John\""),
                tok(TokenKind::String, "\"Smith\""),
                tok(TokenKind::String, "\"nextkey\""),
                tok(TokenKind::Colon, ":"),
            ],
        );
        apply(&mut c);
        assert_eq!(c.tokens.len(), 2);
        assert_eq!(c.tokens[0].value, "\"John Smith\"");
        assert_eq!(c.tokens[1].value, "\"nextkey\"");
    }
}
