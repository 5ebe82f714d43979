//! Bounded fixed-point iteration over a tag-selected rule list.

use tracing::debug;

use crate::context::Context;
use crate::engine::RuleEngine;
use crate::selector::RuleSelector;

/// Runs a selected rule list to a fixed point: up to `max_passes` times,
/// stopping early the first pass that makes no change.
pub trait Flow {
    fn tags(&self) -> &'static [&'static str];
    fn max_passes(&self) -> u32 {
        10
    }
    fn name(&self) -> &'static str;

    /// Runs this flow's rule list against `ctx`, returning whether any pass
    /// changed the stream.
    fn run_with_retries(&self, ctx: &mut Context) -> bool {
        let rules = RuleSelector::new().add_tags(self.tags()).resolve();
        let engine = RuleEngine::new();
        let mut any_change = false;

        for pass in 0..self.max_passes() {
            let changed = engine.run_rules(ctx, &rules);
            if changed {
                any_change = true;
            }
            debug!(flow = self.name(), pass, changed, "flow pass complete");
            if !changed {
                break;
            }
        }

        any_change
    }
}

/// Mandatory, runs first every outer iteration: ensures the stream carries a
/// root object or array, balances brackets, strips prefix garbage.
pub struct BootstrapFlow;

impl Flow for BootstrapFlow {
    fn tags(&self) -> &'static [&'static str] {
        &["structure", "pre_repair"]
    }
    fn max_passes(&self) -> u32 {
        5
    }
    fn name(&self) -> &'static str {
        "BootstrapFlow"
    }
}

/// The default user-facing flow.
pub struct StandardFlow;

impl Flow for StandardFlow {
    fn tags(&self) -> &'static [&'static str] {
        &["structure", "pre_repair", "values", "smart", "normalization", "cleanup"]
    }
    fn name(&self) -> &'static str {
        "StandardFlow"
    }
}

/// Structural repair only — no value coercion.
pub struct MinimalFlow;

impl Flow for MinimalFlow {
    fn tags(&self) -> &'static [&'static str] {
        &["structure", "pre_repair"]
    }
    fn name(&self) -> &'static str {
        "MinimalFlow"
    }
}

/// Every registered rule.
pub struct AggressiveFlow;

impl Flow for AggressiveFlow {
    fn tags(&self) -> &'static [&'static str] {
        &["all"]
    }
    fn name(&self) -> &'static str {
        "AggressiveFlow"
    }
}
