//! Fusing multi-word bare keys (`deposito fecha :`) into one snake_case key.

use crate::context::Context;
use crate::rule::RuleDef;
use crate::token::{Token, TokenKind};

fn applies(ctx: &Context) -> bool {
    ctx.tokens
        .windows(2)
        .any(|w| w[0].kind == TokenKind::BareWord && w[1].kind == TokenKind::BareWord)
}

fn apply(ctx: &mut Context) {
    let tokens = std::mem::take(&mut ctx.tokens);
    let mut out: Vec<Token> = Vec::with_capacity(tokens.len());
    let mut changed = false;
    let mut i = 0;

    while i < tokens.len() {
        let current = &tokens[i];

        let prev_is_separator = out
            .last()
            .is_some_and(|t: &Token| matches!(t.kind, TokenKind::Colon | TokenKind::Assign));

        if current.kind == TokenKind::BareWord && !prev_is_separator {
            let mut j = i + 1;
            let mut words = vec![current];
            let mut ends_in_colon = false;
            while j < tokens.len() {
                match tokens[j].kind {
                    TokenKind::BareWord => {
                        words.push(&tokens[j]);
                        j += 1;
                    }
                    TokenKind::Colon => {
                        ends_in_colon = true;
                        break;
                    }
                    _ => break,
                }
            }

            if ends_in_colon && words.len() > 1 {
                let merged = words.iter().map(|w| w.value.as_str()).collect::<Vec<_>>().join("_");
                out.push(Token::new(TokenKind::BareWord, merged, current.position));
                changed = true;
                i = j;
                continue;
            }
        }

        out.push(current.clone());
        i += 1;
    }

    if changed {
        ctx.tokens = out;
        ctx.mark_changed();
    } else {
        ctx.tokens = tokens;
    }
}

pub static MERGE_COMPOUND_KEYS: RuleDef = RuleDef::new(
    "MergeCompoundKeys",
    25,
    &["structure", "normalization"],
    applies,
    apply,
);

pub static RULES: &[RuleDef] = &[MERGE_COMPOUND_KEYS];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::TolerantTokenizer;

    fn ctx(text: &str) -> Context {
        Context::new(text, TolerantTokenizer::new().tokenize(text))
    }

    #[test]
    fn fuses_multiword_key() {
        let mut c = ctx("deposito fecha: 1");
        assert!(applies(&c));
        apply(&mut c);
        assert_eq!(c.tokens[0].value, "deposito_fecha");
        assert_eq!(c.tokens[1].kind, TokenKind::Colon);
    }

    #[test]
    fn does_not_fuse_a_multiword_value() {
        let c = ctx(r#""key": hello world"#);
        // `hello world` never terminates in COLON, so no merge should fire.
        let mut ctx2 = c;
        apply(&mut ctx2);
        assert!(!ctx2.changed());
    }
}
