//! The diagnostic report assembled across a single parse.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The outcome bucket a [`RepairReport`] settles into once a parse finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepairStatus {
    SuccessStrictJson,
    SuccessWithWarnings,
    SuccessEmptyInput,
    FailureNoStructure,
    PartialRepair,
    FailedUnrecoverable,
}

/// One rule firing that changed the token stream, recorded for the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modification {
    pub rule_name: String,
    pub diff_preview: String,
}

/// Accumulates across a run: which rules fired, what they changed, the final
/// quality score, and — on failure — why the final parse still rejected the
/// input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepairReport {
    pub success: bool,
    pub status: RepairStatus,
    pub json_text: String,
    pub parsed_object: Value,
    pub quality_score: f64,
    pub iterations: u32,
    pub applied_rules: Vec<String>,
    pub modifications: Vec<Modification>,
    pub detected_issues: Vec<String>,
    pub errors: Vec<String>,
    pub was_dry_run: bool,
}

impl RepairReport {
    pub(crate) fn new() -> Self {
        Self {
            success: false,
            status: RepairStatus::FailedUnrecoverable,
            json_text: String::new(),
            parsed_object: Value::Null,
            quality_score: 0.0,
            iterations: 0,
            applied_rules: Vec::new(),
            modifications: Vec::new(),
            detected_issues: Vec::new(),
            errors: Vec::new(),
            was_dry_run: false,
        }
    }

    /// Records a rule firing, preserving first-application order and never
    /// duplicating an already-recorded name.
    pub(crate) fn record_rule(&mut self, rule_name: &str) {
        if !self.applied_rules.iter().any(|r| r == rule_name) {
            self.applied_rules.push(rule_name.to_string());
        }
    }

    pub(crate) fn record_modification(&mut self, rule_name: &str, diff_preview: String) {
        self.modifications.push(Modification {
            rule_name: rule_name.to_string(),
            diff_preview,
        });
    }
}
