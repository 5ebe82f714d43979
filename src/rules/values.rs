//! Scalar-value normalization: leading-zero identifiers, stray date numbers,
//! and boolean-word canonicalization.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::context::Context;
use crate::rule::RuleDef;
use crate::token::TokenKind;

fn looks_like_identifier_number(value: &str) -> bool {
    value.len() > 1 && value.starts_with('0') && !value.starts_with("0.") && !value.to_lowercase().contains('e')
}

fn leading_zero_applies(ctx: &Context) -> bool {
    ctx.tokens
        .iter()
        .any(|t| t.kind == TokenKind::Number && looks_like_identifier_number(&t.value))
}

fn leading_zero_apply(ctx: &mut Context) {
    let mut changed = false;
    let mut issues = Vec::new();
    for tok in ctx.tokens.iter_mut() {
        if tok.kind == TokenKind::Number && looks_like_identifier_number(&tok.value) {
            issues.push(format!("leading_zero_numeric_identifier: {}", tok.value));
            tok.value = format!("\"{}\"", tok.value);
            tok.kind = TokenKind::String;
            changed = true;
        }
    }
    if changed {
        ctx.report.detected_issues.extend(issues);
        ctx.mark_changed();
    }
}

pub static LEADING_ZERO_IDENTIFIER: RuleDef = RuleDef::new(
    "LeadingZeroIdentifier",
    45,
    &["values", "normalization"],
    leading_zero_applies,
    leading_zero_apply,
);

static DATE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

/// A backstop for stray date-shaped literals the tokenizer's [`TokenKind::Date`]
/// pattern already catches in the common case — a rule upstream may still
/// have produced a bare `NUMBER` that happens to look like a date (e.g. a
/// fused compound value), and this rewrites it to `STRING` the same way the
/// source system does.
fn date_applies(ctx: &Context) -> bool {
    ctx.tokens
        .iter()
        .any(|t| t.kind == TokenKind::Number && DATE_PATTERN.is_match(&t.value))
}

fn date_apply(ctx: &mut Context) {
    let mut changed = false;
    for tok in ctx.tokens.iter_mut() {
        if tok.kind == TokenKind::Number && DATE_PATTERN.is_match(&tok.value) {
            tok.value = format!("\"{}\"", tok.value);
            tok.kind = TokenKind::String;
            changed = true;
        }
    }
    if changed {
        ctx.mark_changed();
    }
}

pub static DATE_LITERAL_TO_STRING: RuleDef = RuleDef::new(
    "DateLiteralToString",
    45,
    &["values", "dates"],
    date_applies,
    date_apply,
);

const TRUE_WORDS: [&str; 4] = ["si", "yes", "on", "true"];
const FALSE_WORDS: [&str; 3] = ["no", "off", "false"];

fn normalize_booleans_applies(ctx: &Context) -> bool {
    ctx.tokens.iter().any(|t| t.kind == TokenKind::Boolean)
}

fn normalize_booleans_apply(ctx: &mut Context) {
    let mut changed = false;
    for tok in ctx.tokens.iter_mut() {
        if tok.kind != TokenKind::Boolean {
            continue;
        }
        let lower = tok.value.to_lowercase();
        if TRUE_WORDS.contains(&lower.as_str()) && tok.value != "true" {
            tok.value = "true".to_string();
            changed = true;
        } else if FALSE_WORDS.contains(&lower.as_str()) && tok.value != "false" {
            tok.value = "false".to_string();
            changed = true;
        }
    }
    if changed {
        ctx.mark_changed();
    }
}

pub static NORMALIZE_BOOLEANS: RuleDef = RuleDef::new(
    "NormalizeBooleans",
    50,
    &["values", "normalization"],
    normalize_booleans_applies,
    normalize_booleans_apply,
);

pub static RULES: &[RuleDef] = &[LEADING_ZERO_IDENTIFIER, DATE_LITERAL_TO_STRING, NORMALIZE_BOOLEANS];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::TolerantTokenizer;

    fn ctx(text: &str) -> Context {
        Context::new(text, TolerantTokenizer::new().tokenize(text))
    }

    #[test]
    fn leading_zero_number_becomes_string_with_issue() {
        let mut c = ctx("0123");
        assert!(leading_zero_applies(&c));
        leading_zero_apply(&mut c);
        assert_eq!(c.tokens[0].kind, TokenKind::String);
        assert_eq!(c.tokens[0].value, "\"0123\"");
        assert!(c.report.detected_issues.iter().any(|i| i.contains("0123")));
    }

    #[test]
    fn zero_alone_is_untouched() {
        let c = ctx("0");
        assert!(!leading_zero_applies(&c));
    }

    #[test]
    fn decimal_and_scientific_are_untouched() {
        assert!(!leading_zero_applies(&ctx("0.5")));
        assert!(!leading_zero_applies(&ctx("0e5")));
    }

    #[test]
    fn boolean_words_normalize_to_canonical_spelling() {
        let mut c = ctx("si");
        normalize_booleans_apply(&mut c);
        assert_eq!(c.tokens[0].value, "true");

        let mut c = ctx("OFF");
        normalize_booleans_apply(&mut c);
        assert_eq!(c.tokens[0].value, "false");
    }
}
