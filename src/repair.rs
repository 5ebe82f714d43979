//! The repair orchestrator: ties every stage together into one `parse` call.

use tracing::{debug, debug_span, warn};

use crate::context::Context;
use crate::finalize::Finalizer;
use crate::flow::{BootstrapFlow, Flow, MinimalFlow, StandardFlow};
use crate::pre_normalize::PreNormalizer;
use crate::quality::QualityEvaluator;
use crate::report::{RepairReport, RepairStatus};
use crate::token::TokenKind;
use crate::tokenizer::TolerantTokenizer;

/// Whether a failed repair raises at the façade boundary (`Strict`) or falls
/// back to an empty object with a warning status (`Lax`, the default).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepairMode {
    Lax,
    Strict,
}

impl Default for RepairMode {
    fn default() -> Self {
        Self::Lax
    }
}

/// Construction-time knobs for a [`Repair`] instance.
#[derive(Debug, Clone, Copy)]
pub struct RepairOptions {
    /// Registers [`StandardFlow`] as the sole user flow when true. When
    /// false, the caller must [`Repair::add_flow`] their own before parsing.
    pub auto_flows: bool,
    pub dry_run: bool,
    pub mode: RepairMode,
}

impl Default for RepairOptions {
    fn default() -> Self {
        Self {
            auto_flows: true,
            dry_run: false,
            mode: RepairMode::default(),
        }
    }
}

/// The engine handle: owns the user-registered flows and runs the full
/// pipeline for each `parse` call. [`crate::registry::RuleRegistry`] is
/// shared process-wide and read-only; a `Repair` instance itself holds no
/// per-parse state between calls, so it is cheap to reuse or to construct
/// fresh for every input.
pub struct Repair {
    options: RepairOptions,
    user_flows: Vec<Box<dyn Flow>>,
    max_iterations: u32,
}

impl Repair {
    pub fn new(options: RepairOptions) -> Self {
        let mut repair = Self {
            options,
            user_flows: Vec::new(),
            max_iterations: 10,
        };
        if options.auto_flows {
            repair.add_flow(Box::new(StandardFlow));
        }
        repair
    }

    pub fn add_flow(&mut self, flow: Box<dyn Flow>) {
        self.user_flows.push(flow);
    }

    /// Runs the full pipeline: normalize, tokenize, repair to a fixed point,
    /// finalize, strict-parse, fall back if needed, score, and assemble a
    /// report.
    ///
    /// This is infallible by design: a repair that still fails to
    /// strict-parse comes back as a [`RepairStatus::PartialRepair`] or
    /// [`RepairStatus::FailedUnrecoverable`] report with `success = false`
    /// and `errors` populated, never as an `Err`. Only the [`crate::loads`]
    /// façade, in [`RepairMode::Strict`], turns that into a raised
    /// [`crate::RepairError`] at its own boundary.
    pub fn parse(&self, text: &str, dry_run: Option<bool>) -> RepairReport {
        let dry_run = dry_run.unwrap_or(self.options.dry_run);
        let span = debug_span!("repair", mode = ?self.options.mode, dry_run);
        let _enter = span.enter();

        let normalized = PreNormalizer::new().process(text);
        if normalized.is_empty() {
            let mut report = RepairReport::new();
            report.success = true;
            report.status = RepairStatus::SuccessEmptyInput;
            report.json_text = "{}".to_string();
            report.parsed_object = serde_json::json!({});
            report.quality_score = 1.0;
            report.was_dry_run = dry_run;
            return report;
        }

        let tokens = TolerantTokenizer::new().tokenize(&normalized);
        debug!(chars = normalized.len(), tokens = tokens.len(), "tokenized input");
        let has_structure = tokens.iter().any(|t| {
            matches!(t.kind, TokenKind::LBrace | TokenKind::LBracket | TokenKind::Colon | TokenKind::Assign)
        });
        if !has_structure {
            let mut report = RepairReport::new();
            report.status = RepairStatus::FailureNoStructure;
            report.json_text = "{}".to_string();
            report.parsed_object = serde_json::json!({});
            report.was_dry_run = dry_run;
            return report;
        }

        let mut ctx = Context::new(normalized, tokens);
        ctx.dry_run = dry_run;
        ctx.max_iterations = self.max_iterations;

        let bootstrap = BootstrapFlow;
        let mut converged = false;
        for iteration in 0..self.max_iterations {
            ctx.current_iteration = iteration;
            let mut changed = bootstrap.run_with_retries(&mut ctx);
            for flow in &self.user_flows {
                changed |= flow.run_with_retries(&mut ctx);
            }
            debug!(iteration, changed, "repair iteration complete");
            if !changed {
                converged = true;
                break;
            }
        }
        if !converged {
            warn!(max_iterations = self.max_iterations, "repair loop did not converge before the iteration bound");
        }

        let mut json_text = Finalizer::new().finalize(&ctx.tokens);
        debug!(json = %json_text, "finalized token stream before strict parse");
        let mut parse_result: Result<serde_json::Value, serde_json::Error> = serde_json::from_str(&json_text);

        if parse_result.is_err() && looks_like_an_incomplete_close(&json_text) {
            let retried = format!("{json_text}}}");
            if let Ok(value) = serde_json::from_str::<serde_json::Value>(&retried) {
                json_text = retried;
                parse_result = Ok(value);
            }
        }

        let (quality_score, mut issues) = QualityEvaluator::new().evaluate(&ctx.tokens);

        let mut report = ctx.report;
        report.was_dry_run = dry_run;
        report.iterations = ctx.current_iteration + 1;
        report.quality_score = quality_score;
        report.detected_issues.append(&mut issues);

        match parse_result {
            Ok(value) => {
                report.success = true;
                report.json_text = json_text;
                report.parsed_object = value;
                report.status = if quality_score >= 1.0 {
                    RepairStatus::SuccessStrictJson
                } else {
                    RepairStatus::SuccessWithWarnings
                };
                report
            }
            Err(parse_err) => {
                report.errors.push(parse_err.to_string());
                if self.options.mode == RepairMode::Strict {
                    // The core never raises — it records the would-be decode
                    // error and status table entry and hands back a failed
                    // report. Only `loads`'s strict boundary turns this into
                    // a raised `RepairError`.
                    report.json_text = json_text;
                    report.success = false;
                    report.status = if report.applied_rules.is_empty() {
                        RepairStatus::FailedUnrecoverable
                    } else {
                        RepairStatus::PartialRepair
                    };
                    return report;
                }
                warn!(error = %parse_err, "falling back to empty object after failed strict parse");
                report.json_text = "{}".to_string();
                report.parsed_object = serde_json::json!({});
                report.success = true;
                report.status = RepairStatus::SuccessWithWarnings;
                report
                    .detected_issues
                    .push("unable to repair — irrecoverable or incomplete".to_string());
                report
            }
        }
    }
}

impl Default for Repair {
    fn default() -> Self {
        Self::new(RepairOptions::default())
    }
}

fn looks_like_an_incomplete_close(text: &str) -> bool {
    let trimmed = text.trim_end();
    trimmed.ends_with('{') || trimmed.ends_with(',') || trimmed.ends_with(':')
}

/// A `Repair` preconfigured with [`MinimalFlow`] instead of the default
/// [`StandardFlow`] — structural repair only, no value coercion.
pub fn minimal_repair() -> Repair {
    let mut repair = Repair::new(RepairOptions {
        auto_flows: false,
        ..RepairOptions::default()
    });
    repair.add_flow(Box::new(MinimalFlow));
    repair
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_short_circuits() {
        let report = Repair::default().parse("", None);
        assert_eq!(report.status, RepairStatus::SuccessEmptyInput);
        assert_eq!(report.json_text, "{}");
    }

    #[test]
    fn no_structural_tokens_fails_fast() {
        let report = Repair::default().parse("just some prose", None);
        assert_eq!(report.status, RepairStatus::FailureNoStructure);
    }

    #[test]
    fn canonical_json_is_strict_success() {
        let report = Repair::default().parse(r#"{"a":1,"b":true}"#, None);
        assert_eq!(report.status, RepairStatus::SuccessStrictJson);
        assert_eq!(report.quality_score, 1.0);
        assert!(report.applied_rules.is_empty());
    }

    #[test]
    fn loose_pairs_repair_to_a_strict_object() {
        let report = Repair::default().parse(r#"user: "admin", active: si"#, None);
        assert!(report.success);
        assert_eq!(report.parsed_object["user"], "admin");
        assert_eq!(report.parsed_object["active"], true);
        assert!(report.applied_rules.contains(&"WrapRootObject".to_string()));
        assert!(report.applied_rules.contains(&"NormalizeBooleans".to_string()));
    }

    #[test]
    fn equals_sign_assignment_repairs() {
        let report = Repair::default().parse("user=admin, active=no", None);
        assert_eq!(report.parsed_object["user"], "admin");
        assert_eq!(report.parsed_object["active"], false);
    }

    #[test]
    fn strict_mode_reports_failure_without_raising() {
        let repair = Repair::new(RepairOptions {
            mode: RepairMode::Strict,
            ..RepairOptions::default()
        });
        // A key with no value at all: structural repair can balance the
        // brackets but there is nothing to insert for the missing value.
        // The core itself never raises — only `loads`'s strict boundary does.
        let report = repair.parse(r#"{"a": }"#, None);
        assert!(!report.success);
        assert!(matches!(
            report.status,
            RepairStatus::PartialRepair | RepairStatus::FailedUnrecoverable
        ));
        assert!(!report.errors.is_empty());
    }

    #[test]
    fn strict_mode_distinguishes_partial_repair_from_no_rules_fired() {
        let repair = Repair::new(RepairOptions {
            mode: RepairMode::Strict,
            ..RepairOptions::default()
        });
        // No root braces at all, so WrapRootObject and friends fire — but
        // the dangling trailing colon still has no value to finalize, so
        // this is a partial repair, not a from-scratch failure.
        let report = repair.parse(r#"user: "admin", active:"#, None);
        assert!(!report.applied_rules.is_empty());
        assert_eq!(report.status, RepairStatus::PartialRepair);
    }

    #[test]
    fn lax_mode_falls_back_to_empty_object_on_unrecoverable_input() {
        let report = Repair::default().parse("{{{{{", None);
        assert!(report.success);
        assert_eq!(report.status, RepairStatus::SuccessWithWarnings);
    }

    #[test]
    fn debug_spans_and_events_are_observable_under_a_test_subscriber() {
        // The crate never installs a subscriber itself; a caller that wants
        // to see the `repair` span and its per-stage events wires one up.
        let subscriber = tracing_subscriber::fmt().with_test_writer().finish();
        let _guard = tracing::subscriber::set_default(subscriber);
        let report = Repair::default().parse("user: admin, active: si", None);
        assert!(report.success);
    }
}
