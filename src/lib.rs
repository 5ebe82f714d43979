//! A tolerant JSON repair engine: a token-level rewrite pipeline that turns
//! near-JSON text — the output of a chat model, a hand-edited config, a log
//! line — into strict [RFC 8259](https://www.rfc-editor.org/rfc/rfc8259) JSON.
//!
//! # Pipeline
//!
//! ```text
//! PreNormalize -> Tokenize -> RepairLoop{BootstrapFlow, user Flows} -> Finalize -> strict parse -> Report
//! ```
//!
//! [`PreNormalizer`] strips line-ending noise. [`TolerantTokenizer`] splits
//! text into a [`Token`] vector that never fails — unrecognized characters
//! become [`token::TokenKind::Unknown`] rather than an error. [`Repair`]
//! drives a bounded fixed-point loop of [`flow::Flow`]s, each resolving a
//! tag set from the process-wide [`registry::RuleRegistry`] and running the
//! matching [`RuleDef`]s to convergence. [`Finalizer`] renders the repaired
//! token vector back into text, which is parsed with [`serde_json`] and
//! scored by [`QualityEvaluator`].
//!
//! # Example
//!
//! ```
//! use jrepair::loads;
//!
//! let value = loads(r#"user: "admin", active: si"#, Default::default()).unwrap();
//! assert_eq!(value["user"], "admin");
//! assert_eq!(value["active"], true);
//! ```
//!
//! # License
//! [jrepair](crate) is provided under the MIT license.

mod context;
pub mod engine;
mod error;
pub mod finalize;
pub mod flow;
mod pre_normalize;
mod quality;
pub mod registry;
pub mod repair;
pub mod report;
pub mod rule;
pub mod rules;
pub mod selector;
pub mod token;
pub mod tokenizer;

pub use context::Context;
pub use error::RepairError;
pub use finalize::Finalizer;
pub use pre_normalize::PreNormalizer;
pub use quality::QualityEvaluator;
pub use repair::{Repair, RepairMode, RepairOptions};
pub use report::{Modification, RepairReport, RepairStatus};
pub use rule::RuleDef;
pub use token::{Token, TokenKind};
pub use tokenizer::TolerantTokenizer;

/// Parses `text` into a [`serde_json::Value`], repairing it first.
///
/// In [`RepairMode::Strict`], a repair that cannot reach valid JSON raises a
/// [`RepairError::Decode`]. In the default [`RepairMode::Lax`], it instead
/// returns the fallback value (almost always an empty object) that
/// [`RepairReport::parsed_object`] would also carry.
pub fn loads(text: &str, options: RepairOptions) -> Result<serde_json::Value, RepairError> {
    let mode = options.mode;
    let report = Repair::new(options).parse(text, None);
    if !report.success && mode == RepairMode::Strict {
        let message = report.errors.last().cloned().unwrap_or_else(|| "unrecoverable input".to_string());
        return Err(RepairError::decode(message, &report.json_text, report.iterations));
    }
    Ok(report.parsed_object)
}

/// Reads `path` and delegates to [`loads`].
pub fn load(path: impl AsRef<std::path::Path>, options: RepairOptions) -> std::io::Result<Result<serde_json::Value, RepairError>> {
    let text = std::fs::read_to_string(path)?;
    Ok(loads(&text, options))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_repairs_loose_pairs_into_a_value() {
        let value = loads(r#"user: "admin", active: si"#, RepairOptions::default()).unwrap();
        assert_eq!(value["user"], "admin");
        assert_eq!(value["active"], true);
    }

    #[test]
    fn strict_mode_propagates_a_decode_error() {
        let options = RepairOptions {
            mode: RepairMode::Strict,
            ..RepairOptions::default()
        };
        let result = loads(r#"{"a": }"#, options);
        assert!(result.is_err());
    }
}
