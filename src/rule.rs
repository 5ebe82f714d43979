//! The rule contract: a stateless, priority-ordered, tagged rewrite.
//!
//! Per the redesign note on abstract-method polymorphism, a rule here is a
//! plain value carrying two function pointers rather than a trait object —
//! there is no per-instance state, so there is nothing a `dyn Trait` would
//! buy beyond indirection. `applies` is a cheap predicate; `apply` performs
//! the mutation. The engine — not the rule — detects whether `apply` changed
//! anything.

use crate::context::Context;

/// An atomic rewrite over a [`Context`]'s token stream.
///
/// Rules are stateless and shared across parses; any iteration-local state
/// lives on the `Context`, not on the rule. A rule must not assume `applies`
/// was just called before `apply` — the engine does call them in that order,
/// but a rule must be idempotent under re-application once the stream has
/// reached a fixed point (running it twice on an unchanged stream must
/// produce no further change).
#[derive(Clone, Copy)]
pub struct RuleDef {
    /// Stable identity used in [`crate::report::RepairReport::applied_rules`]
    /// and diagnostics. Never displayed to end users as prose.
    pub name: &'static str,
    /// Lower priority numbers run earlier within a pass.
    pub priority: u32,
    pub tags: &'static [&'static str],
    pub applies: fn(&Context) -> bool,
    pub apply: fn(&mut Context),
}

impl RuleDef {
    pub const fn new(
        name: &'static str,
        priority: u32,
        tags: &'static [&'static str],
        applies: fn(&Context) -> bool,
        apply: fn(&mut Context),
    ) -> Self {
        Self { name, priority, tags, applies, apply }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| *t == tag)
    }
}

impl std::fmt::Debug for RuleDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleDef")
            .field("name", &self.name)
            .field("priority", &self.priority)
            .field("tags", &self.tags)
            .finish()
    }
}

impl PartialEq for RuleDef {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}
impl Eq for RuleDef {}

impl std::hash::Hash for RuleDef {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}
