//! Text-level cleanup that runs once, before tokenization.

/// Normalizes line endings and trims outer whitespace.
///
/// This is the only stage that touches raw text rather than tokens; every
/// later stage operates on the [`crate::token::Token`] vector it produces.
#[derive(Debug, Default, Clone, Copy)]
pub struct PreNormalizer;

impl PreNormalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn process(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }
        text.replace("\r\n", "\n").replace('\r', "\n").trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_crlf_and_trims() {
        let out = PreNormalizer::new().process("\r\n  {\"a\":1}\r\n  ");
        assert_eq!(out, "{\"a\":1}");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(PreNormalizer::new().process(""), "");
        assert_eq!(PreNormalizer::new().process("   \n  "), "");
    }
}
