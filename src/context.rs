//! Per-parse mutable state shared by every stage after tokenization.

use crate::report::RepairReport;
use crate::token::Token;

/// Owns the token stream exclusively for the lifetime of one parse.
///
/// A `Context` is created per parse and destroyed once its [`RepairReport`]
/// is returned. All rules mutate `tokens` in place through `&mut Context`;
/// there is no aliasing of individual tokens across rules.
pub struct Context {
    /// The pre-normalized input, kept for rules that need source-span extraction.
    pub initial_text: String,
    pub tokens: Vec<Token>,
    pub report: RepairReport,
    pub current_iteration: u32,
    pub max_iterations: u32,
    changed: bool,
    pub dry_run: bool,
}

impl Context {
    pub fn new(initial_text: impl Into<String>, tokens: Vec<Token>) -> Self {
        Self {
            initial_text: initial_text.into(),
            tokens,
            report: RepairReport::new(),
            current_iteration: 0,
            max_iterations: 10,
            changed: false,
            dry_run: false,
        }
    }

    /// The concatenation of every token's `value`, used by the engine to
    /// detect whether a rule actually changed anything.
    pub fn tokens_as_string(&self) -> String {
        self.tokens.iter().map(|t| t.value.as_str()).collect()
    }

    pub fn mark_changed(&mut self) {
        self.changed = true;
    }

    pub fn reset_changed_flag(&mut self) {
        self.changed = false;
    }

    pub fn changed(&self) -> bool {
        self.changed
    }

    /// Records that `rule_name` fired this pass. Rules call this from `apply`
    /// only when they choose to report a side effect beyond the mutation
    /// itself (e.g. an issue string); the engine is responsible for recording
    /// the firing itself once it observes a change.
    pub fn record_rule(&mut self, rule_name: &str) {
        self.report.record_rule(rule_name);
    }
}
