//! Schema-free type inference from key-name hints.
//!
//! Lets a bare integer next to a key named `zip` stay a string, and a bare
//! word next to a key named `count` become a number, without any schema.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::context::Context;
use crate::rule::RuleDef;
use crate::token::TokenKind;

static STRING_HINTS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(date|time|at|timestamp|created|updated|birth|email|mail|user|login|id|uuid|key|code|phone|cel|mobile|zip|postal|name|title|desc|content|url|uri|path|file)",
    )
    .unwrap()
});

static NUMBER_HINTS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(count|amount|total|price|cost|qty|quantity|lat|lng|longitude|latitude|score|weight|height|width|size)")
        .unwrap()
});

fn key_name(value: &str) -> String {
    value.trim_matches('"').to_lowercase()
}

fn applies(ctx: &Context) -> bool {
    let tokens = &ctx.tokens;
    if tokens.len() < 3 {
        return false;
    }
    for i in 0..tokens.len() - 2 {
        let key = &tokens[i];
        let sep = &tokens[i + 1];
        let is_key = matches!(key.kind, TokenKind::String | TokenKind::BareWord);
        let is_sep = matches!(sep.kind, TokenKind::Colon | TokenKind::Assign);
        if !(is_key && is_sep) {
            continue;
        }
        let val = &tokens[i + 2];
        if matches!(val.kind, TokenKind::BareWord | TokenKind::Number) {
            let name = key_name(&key.value);
            if STRING_HINTS.is_match(&name) || NUMBER_HINTS.is_match(&name) {
                return true;
            }
        }
    }
    false
}

fn apply(ctx: &mut Context) {
    let mut changed = false;
    let len = ctx.tokens.len();
    if len < 3 {
        return;
    }
    for i in 0..len - 2 {
        let is_key = matches!(ctx.tokens[i].kind, TokenKind::String | TokenKind::BareWord);
        let is_sep = matches!(ctx.tokens[i + 1].kind, TokenKind::Colon | TokenKind::Assign);
        if !(is_key && is_sep) {
            continue;
        }
        let name = key_name(&ctx.tokens[i].value);
        let val_kind = ctx.tokens[i + 2].kind;

        if STRING_HINTS.is_match(&name) {
            match val_kind {
                TokenKind::BareWord => {
                    let val = &mut ctx.tokens[i + 2];
                    val.value = format!("\"{}\"", val.value);
                    val.kind = TokenKind::String;
                    changed = true;
                }
                TokenKind::Number => {
                    let looks_like_date = {
                        let v = &ctx.tokens[i + 2].value;
                        v.len() == 10 && v.as_bytes().get(4) == Some(&b'-') && v.as_bytes().get(7) == Some(&b'-')
                    };
                    if !looks_like_date {
                        let val = &mut ctx.tokens[i + 2];
                        val.value = format!("\"{}\"", val.value);
                        val.kind = TokenKind::String;
                        changed = true;
                    }
                }
                _ => {}
            }
        } else if NUMBER_HINTS.is_match(&name) {
            if val_kind == TokenKind::BareWord {
                let is_digits = ctx.tokens[i + 2].value.chars().all(|c| c.is_ascii_digit())
                    && !ctx.tokens[i + 2].value.is_empty();
                if is_digits {
                    ctx.tokens[i + 2].kind = TokenKind::Number;
                    changed = true;
                }
            }
        }
    }
    if changed {
        ctx.mark_changed();
    }
}

pub static SMART_TYPING: RuleDef = RuleDef::new("SmartTyping", 55, &["values", "smart"], applies, apply);

pub static RULES: &[RuleDef] = &[SMART_TYPING];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::TolerantTokenizer;

    fn ctx(text: &str) -> Context {
        Context::new(text, TolerantTokenizer::new().tokenize(text))
    }

    #[test]
    fn zip_code_stays_a_string_despite_looking_numeric() {
        let mut c = ctx("zip: admin");
        apply(&mut c);
        assert_eq!(c.tokens[2].kind, TokenKind::String);
    }

    #[test]
    fn count_hint_with_non_digit_bareword_is_left_alone() {
        let mut c = ctx("count: abc");
        apply(&mut c);
        assert_eq!(c.tokens[2].kind, TokenKind::BareWord);
    }

    #[test]
    fn unrelated_key_names_are_untouched() {
        let c = ctx("widget: admin");
        assert!(!applies(&c));
    }
}
