//! Applies a resolved rule list to a [`Context`] and records what changed.

use tracing::trace;

use crate::context::Context;
use crate::rule::RuleDef;

const DIFF_PREVIEW_LIMIT: usize = 200;

/// A diagnostic-only, truncated preview of what a rule's `apply` changed.
///
/// This is intentionally not a true unified diff — the report only needs
/// enough to show a human what moved, not enough to reconstruct a patch.
fn diff_preview(before: &str, after: &str) -> String {
    let common_prefix = before
        .chars()
        .zip(after.chars())
        .take_while(|(a, b)| a == b)
        .count();
    let before_tail: String = before.chars().skip(common_prefix).collect();
    let after_tail: String = after.chars().skip(common_prefix).collect();
    let preview = format!("-{before_tail}\n+{after_tail}");
    if preview.chars().count() > DIFF_PREVIEW_LIMIT {
        preview.chars().take(DIFF_PREVIEW_LIMIT).collect()
    } else {
        preview
    }
}

/// Runs a `RuleEngine` pass over an already-resolved, priority-sorted rule
/// list.
#[derive(Debug, Default, Clone, Copy)]
pub struct RuleEngine;

impl RuleEngine {
    pub fn new() -> Self {
        Self
    }

    /// Applies every rule whose `applies` predicate holds, in order. Returns
    /// whether any rule changed the stream. In dry-run, a rule that fires
    /// more than once in the same pass only gets one modification entry.
    pub fn run_rules(&self, ctx: &mut Context, rules: &[&'static RuleDef]) -> bool {
        ctx.reset_changed_flag();

        for rule in rules {
            if !(rule.applies)(ctx) {
                continue;
            }
            let before = ctx.tokens_as_string();
            (rule.apply)(ctx);
            let after = ctx.tokens_as_string();

            if before == after {
                continue;
            }

            ctx.mark_changed();
            ctx.record_rule(rule.name);
            trace!(rule = rule.name, "rule changed the token stream");

            let already_logged_this_pass =
                ctx.dry_run && ctx.report.modifications.iter().any(|m| m.rule_name == rule.name);
            if !already_logged_this_pass {
                ctx.report.record_modification(rule.name, diff_preview(&before, &after));
            }
        }

        ctx.changed()
    }

    /// Resolves `tags` against the global registry and runs the resulting
    /// rule list as one pass.
    pub fn run_flow(&self, ctx: &mut Context, tags: &[&'static str]) -> bool {
        let rules = crate::selector::RuleSelector::new().add_tags(tags).resolve();
        self.run_rules(ctx, &rules)
    }
}
