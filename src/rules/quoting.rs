//! Turning bare identifiers into properly quoted JSON strings.

use crate::context::Context;
use crate::rule::RuleDef;
use crate::token::TokenKind;

fn is_already_quoted(value: &str) -> bool {
    value.len() >= 2 && value.starts_with('"') && value.ends_with('"')
}

fn quote(raw: &str) -> String {
    format!("\"{}\"", raw.replace('"', "\\\""))
}

fn quote_keys_applies(ctx: &Context) -> bool {
    ctx.tokens.windows(2).any(|w| {
        matches!(w[0].kind, TokenKind::BareWord | TokenKind::String)
            && w[1].kind == TokenKind::Colon
            && !(w[0].kind == TokenKind::String && is_already_quoted(&w[0].value))
    })
}

fn quote_keys_apply(ctx: &mut Context) {
    let mut changed = false;
    let len = ctx.tokens.len();
    for i in 0..len {
        let is_key = matches!(ctx.tokens[i].kind, TokenKind::BareWord | TokenKind::String)
            && ctx.tokens.get(i + 1).is_some_and(|t| t.kind == TokenKind::Colon);
        if !is_key {
            continue;
        }
        let tok = &mut ctx.tokens[i];
        if tok.kind == TokenKind::String && is_already_quoted(&tok.value) {
            continue;
        }
        let inner = tok.value.trim_matches('"');
        tok.value = quote(inner);
        tok.kind = TokenKind::String;
        changed = true;
    }
    if changed {
        ctx.mark_changed();
    }
}

pub static QUOTE_KEYS: RuleDef = RuleDef::new(
    "QuoteKeys",
    30,
    &["structure", "normalization"],
    quote_keys_applies,
    quote_keys_apply,
);

fn quote_bare_words_applies(ctx: &Context) -> bool {
    ctx.tokens.iter().any(|t| t.kind == TokenKind::BareWord)
}

fn quote_bare_words_apply(ctx: &mut Context) {
    let mut changed = false;
    let len = ctx.tokens.len();
    for i in 0..len {
        if ctx.tokens[i].kind != TokenKind::BareWord {
            continue;
        }
        let is_key = ctx
            .tokens
            .get(i + 1)
            .is_some_and(|t| matches!(t.kind, TokenKind::Colon | TokenKind::Assign));
        if is_key {
            continue;
        }
        let tok = &mut ctx.tokens[i];
        tok.value = quote(&tok.value);
        tok.kind = TokenKind::String;
        changed = true;
    }
    if changed {
        ctx.mark_changed();
    }
}

pub static QUOTE_BARE_WORDS: RuleDef = RuleDef::new(
    "QuoteBareWords",
    60,
    &["values", "normalization"],
    quote_bare_words_applies,
    quote_bare_words_apply,
);

pub static RULES: &[RuleDef] = &[QUOTE_KEYS, QUOTE_BARE_WORDS];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::TolerantTokenizer;

    fn ctx(text: &str) -> Context {
        Context::new(text, TolerantTokenizer::new().tokenize(text))
    }

    #[test]
    fn quotes_bare_key() {
        let mut c = ctx("user: 1");
        assert!(quote_keys_applies(&c));
        quote_keys_apply(&mut c);
        assert_eq!(c.tokens[0].value, "\"user\"");
        assert_eq!(c.tokens[0].kind, TokenKind::String);
    }

    #[test]
    fn idempotent_on_already_quoted_keys() {
        let mut c = ctx(r#""user":1"#);
        assert!(!quote_keys_applies(&c));
        quote_keys_apply(&mut c);
        assert!(!c.changed());
    }

    #[test]
    fn quotes_bare_value_but_not_key() {
        let mut c = ctx("user: admin");
        quote_bare_words_apply(&mut c);
        assert_eq!(c.tokens[0].kind, TokenKind::BareWord);
        assert_eq!(c.tokens[2].value, "\"admin\"");
    }
}
