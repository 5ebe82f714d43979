//! Separator and structural-coercion rules: `=` to `:`, `(...)` to `[...]`,
//! and missing commas between adjacent pairs.

use crate::context::Context;
use crate::rule::RuleDef;
use crate::token::{Token, TokenKind};

fn equal_to_colon_applies(ctx: &Context) -> bool {
    ctx.tokens.iter().any(|t| t.kind == TokenKind::Assign)
}

fn equal_to_colon_apply(ctx: &mut Context) {
    for tok in ctx.tokens.iter_mut() {
        if tok.kind == TokenKind::Assign {
            tok.kind = TokenKind::Colon;
            tok.value = ":".to_string();
        }
    }
    ctx.mark_changed();
}

pub static EQUAL_TO_COLON: RuleDef = RuleDef::new(
    "EqualToColon",
    10,
    &["structure", "pre_repair"],
    equal_to_colon_applies,
    equal_to_colon_apply,
);

const VALUE_ENDERS: [TokenKind; 7] = [
    TokenKind::String,
    TokenKind::Number,
    TokenKind::Boolean,
    TokenKind::Null,
    TokenKind::RBrace,
    TokenKind::RBracket,
    TokenKind::BareWord,
];

const VALUE_STARTERS: [TokenKind; 7] = [
    TokenKind::String,
    TokenKind::Number,
    TokenKind::Boolean,
    TokenKind::Null,
    TokenKind::LBrace,
    TokenKind::LBracket,
    TokenKind::BareWord,
];

fn add_missing_commas_applies(_ctx: &Context) -> bool {
    // The engine's change detection decides whether this pass actually did
    // anything; scanning twice here would be redundant work for no benefit.
    true
}

fn add_missing_commas_apply(ctx: &mut Context) {
    let tokens = std::mem::take(&mut ctx.tokens);
    let mut out = Vec::with_capacity(tokens.len());
    let mut inserted = false;

    for (i, tok) in tokens.iter().enumerate() {
        let position = tok.position + tok.raw_value.len();
        out.push(tok.clone());

        let Some(next) = tokens.get(i + 1) else { continue };
        if !(VALUE_ENDERS.contains(&tok.kind) && VALUE_STARTERS.contains(&next.kind)) {
            continue;
        }
        let next_is_a_key = tokens.get(i + 2).is_some_and(|t| t.kind == TokenKind::Colon);
        if next_is_a_key {
            out.push(Token::new(TokenKind::Comma, ",", position));
            inserted = true;
        }
    }

    if inserted {
        ctx.tokens = out;
        ctx.mark_changed();
    } else {
        ctx.tokens = tokens;
    }
}

pub static ADD_MISSING_COMMAS: RuleDef = RuleDef::new(
    "AddMissingCommas",
    20,
    &["structure"],
    add_missing_commas_applies,
    add_missing_commas_apply,
);

fn tuple_to_list_applies(ctx: &Context) -> bool {
    ctx.tokens
        .iter()
        .any(|t| matches!(t.kind, TokenKind::LParen | TokenKind::RParen))
}

fn tuple_to_list_apply(ctx: &mut Context) {
    for tok in ctx.tokens.iter_mut() {
        match tok.kind {
            TokenKind::LParen => {
                tok.kind = TokenKind::LBracket;
                tok.value = "[".to_string();
            }
            TokenKind::RParen => {
                tok.kind = TokenKind::RBracket;
                tok.value = "]".to_string();
            }
            _ => {}
        }
    }
    ctx.mark_changed();
}

pub static TUPLE_TO_LIST: RuleDef = RuleDef::new(
    "TupleToList",
    22,
    &["structure"],
    tuple_to_list_applies,
    tuple_to_list_apply,
);

pub static RULES: &[RuleDef] = &[EQUAL_TO_COLON, ADD_MISSING_COMMAS, TUPLE_TO_LIST];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::TolerantTokenizer;

    fn ctx(text: &str) -> Context {
        Context::new(text, TolerantTokenizer::new().tokenize(text))
    }

    #[test]
    fn equal_becomes_colon() {
        let mut c = ctx("key=value");
        assert!(equal_to_colon_applies(&c));
        equal_to_colon_apply(&mut c);
        assert!(c.tokens.iter().any(|t| t.kind == TokenKind::Colon));
        assert!(!c.tokens.iter().any(|t| t.kind == TokenKind::Assign));
    }

    #[test]
    fn parens_become_brackets() {
        let mut c = ctx("(1, 2, 3)");
        tuple_to_list_apply(&mut c);
        assert_eq!(c.tokens.first().unwrap().kind, TokenKind::LBracket);
        assert_eq!(c.tokens.last().unwrap().kind, TokenKind::RBracket);
    }

    #[test]
    fn inserts_comma_between_adjacent_pairs() {
        let mut c = ctx(r#""a":1 "b":2"#);
        add_missing_commas_apply(&mut c);
        assert!(c.tokens.iter().any(|t| t.kind == TokenKind::Comma));
    }

    #[test]
    fn no_comma_inserted_when_next_token_is_not_a_key() {
        let mut c = ctx(r#""a":1 2"#);
        let before = c.tokens.len();
        add_missing_commas_apply(&mut c);
        assert_eq!(c.tokens.len(), before);
    }
}
