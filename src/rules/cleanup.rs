//! Coarse, structural cleanup: trimming garbage, closing the root, balancing brackets.

use crate::context::Context;
use crate::rule::RuleDef;
use crate::token::{Token, TokenKind};

fn remove_trailing_commas_applies(ctx: &Context) -> bool {
    ctx.tokens.windows(2).any(|w| {
        w[0].kind == TokenKind::Comma
            && matches!(w[1].kind, TokenKind::RBrace | TokenKind::RBracket)
    })
}

fn remove_trailing_commas_apply(ctx: &mut Context) {
    let tokens = std::mem::take(&mut ctx.tokens);
    let mut kept = Vec::with_capacity(tokens.len());
    let mut i = 0;
    while i < tokens.len() {
        if tokens[i].kind == TokenKind::Comma
            && tokens
                .get(i + 1)
                .is_some_and(|t| matches!(t.kind, TokenKind::RBrace | TokenKind::RBracket))
        {
            i += 1;
            continue;
        }
        kept.push(tokens[i].clone());
        i += 1;
    }
    ctx.tokens = kept;
    ctx.mark_changed();
}

pub static REMOVE_TRAILING_COMMAS: RuleDef = RuleDef::new(
    "RemoveTrailingCommas",
    0,
    &["structure", "cleanup"],
    remove_trailing_commas_applies,
    remove_trailing_commas_apply,
);

/// Finds the index where real JSON content begins, or `None` if the stream
/// already starts there (nothing to strip).
fn garbage_start_index(tokens: &[Token]) -> Option<usize> {
    if tokens.len() < 2 {
        return None;
    }
    if matches!(tokens[0].kind, TokenKind::LBrace | TokenKind::LBracket) {
        return None;
    }
    // A leading `WORD :` pair is already a valid object start, not garbage.
    if tokens[0].kind == TokenKind::BareWord
        && tokens
            .get(1)
            .is_some_and(|t| matches!(t.kind, TokenKind::Colon | TokenKind::Assign))
    {
        return None;
    }
    for (i, tok) in tokens.iter().enumerate().skip(1) {
        if matches!(tok.kind, TokenKind::LBrace | TokenKind::LBracket) {
            return Some(i);
        }
        if tok.kind == TokenKind::BareWord
            && tokens.get(i + 1).is_some_and(|t| t.kind == TokenKind::Colon)
        {
            return Some(i);
        }
    }
    None
}

fn strip_prefix_garbage_applies(ctx: &Context) -> bool {
    garbage_start_index(&ctx.tokens).is_some()
}

fn strip_prefix_garbage_apply(ctx: &mut Context) {
    if let Some(start) = garbage_start_index(&ctx.tokens) {
        ctx.tokens.drain(0..start);
        ctx.mark_changed();
    }
}

pub static STRIP_PREFIX_GARBAGE: RuleDef = RuleDef::new(
    "StripPrefixGarbage",
    0,
    &["structure", "cleanup"],
    strip_prefix_garbage_applies,
    strip_prefix_garbage_apply,
);

fn wrap_root_object_applies(ctx: &Context) -> bool {
    match ctx.tokens.first() {
        None => false,
        Some(first) => {
            if matches!(first.kind, TokenKind::LBrace | TokenKind::LBracket) {
                false
            } else {
                ctx.tokens
                    .iter()
                    .any(|t| matches!(t.kind, TokenKind::Colon | TokenKind::Assign))
            }
        }
    }
}

fn wrap_root_object_apply(ctx: &mut Context) {
    ctx.tokens.insert(0, Token::synthetic(TokenKind::LBrace, "{"));
    ctx.tokens.push(Token::synthetic(TokenKind::RBrace, "}"));
    ctx.mark_changed();
}

pub static WRAP_ROOT_OBJECT: RuleDef = RuleDef::new(
    "WrapRootObject",
    1,
    &["structure", "pre_repair", "bootstrap"],
    wrap_root_object_applies,
    wrap_root_object_apply,
);

fn opener_for(kind: TokenKind) -> Option<TokenKind> {
    match kind {
        TokenKind::LBrace => Some(TokenKind::RBrace),
        TokenKind::LBracket => Some(TokenKind::RBracket),
        _ => None,
    }
}

fn unmatched_openers(tokens: &[Token]) -> Vec<TokenKind> {
    let mut stack = Vec::new();
    for tok in tokens {
        match tok.kind {
            TokenKind::LBrace | TokenKind::LBracket => stack.push(tok.kind),
            TokenKind::RBrace | TokenKind::RBracket => {
                if stack.last().and_then(|&o| opener_for(o)) == Some(tok.kind) {
                    stack.pop();
                }
            }
            _ => {}
        }
    }
    stack
}

fn balance_brackets_applies(ctx: &Context) -> bool {
    !unmatched_openers(&ctx.tokens).is_empty()
}

fn balance_brackets_apply(ctx: &mut Context) {
    let openers = unmatched_openers(&ctx.tokens);
    for opener in openers.into_iter().rev() {
        let closer = opener_for(opener).expect("only brace/bracket openers are pushed");
        let value = match closer {
            TokenKind::RBrace => "}",
            TokenKind::RBracket => "]",
            _ => unreachable!(),
        };
        ctx.tokens.push(Token::synthetic(closer, value));
    }
    ctx.mark_changed();
}

pub static BALANCE_BRACKETS: RuleDef = RuleDef::new(
    "BalanceBrackets",
    95,
    &["structure", "cleanup"],
    balance_brackets_applies,
    balance_brackets_apply,
);

pub static RULES: &[RuleDef] = &[
    REMOVE_TRAILING_COMMAS,
    STRIP_PREFIX_GARBAGE,
    WRAP_ROOT_OBJECT,
    BALANCE_BRACKETS,
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::TolerantTokenizer;

    fn ctx(text: &str) -> Context {
        Context::new(text, TolerantTokenizer::new().tokenize(text))
    }

    #[test]
    fn removes_trailing_comma_before_rbrace() {
        let mut c = ctx(r#"{"a":1,}"#);
        assert!(remove_trailing_commas_applies(&c));
        remove_trailing_commas_apply(&mut c);
        assert!(!c.tokens.iter().any(|t| t.kind == TokenKind::Comma));
    }

    #[test]
    fn strips_leading_narrative_garbage() {
        let mut c = ctx(r#"here is the data {"a":1}"#);
        assert!(strip_prefix_garbage_applies(&c));
        strip_prefix_garbage_apply(&mut c);
        assert_eq!(c.tokens.first().unwrap().kind, TokenKind::LBrace);
    }

    #[test]
    fn does_not_strip_when_stream_already_starts_with_a_key() {
        let c = ctx("user: admin");
        assert!(!strip_prefix_garbage_applies(&c));
    }

    #[test]
    fn wraps_loose_pairs_in_braces() {
        let mut c = ctx(r#""a":1,"b":2"#);
        assert!(wrap_root_object_applies(&c));
        wrap_root_object_apply(&mut c);
        assert_eq!(c.tokens.first().unwrap().kind, TokenKind::LBrace);
        assert_eq!(c.tokens.last().unwrap().kind, TokenKind::RBrace);
    }

    #[test]
    fn refuses_to_wrap_already_wrapped_stream() {
        let c = ctx(r#"{"a":1}"#);
        assert!(!wrap_root_object_applies(&c));
    }

    #[test]
    fn balances_unmatched_openers() {
        let mut c = ctx(r#"{"a":[1,2"#);
        assert!(balance_brackets_applies(&c));
        balance_brackets_apply(&mut c);
        let tail: Vec<_> = c.tokens.iter().rev().take(2).map(|t| t.kind).collect();
        assert_eq!(tail, vec![TokenKind::RBrace, TokenKind::RBracket]);
    }
}
