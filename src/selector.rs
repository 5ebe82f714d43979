//! A builder for picking which rules a [`crate::flow::Flow`] runs.

use crate::registry::RuleRegistry;
use crate::rule::RuleDef;

/// Accumulates tags and individual rule names, then resolves them against the
/// [`RuleRegistry`] into one priority-sorted, deduplicated rule list.
#[derive(Default)]
pub struct RuleSelector {
    tags: Vec<&'static str>,
    include_names: Vec<&'static str>,
    exclude_names: Vec<&'static str>,
}

impl RuleSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_tags(mut self, tags: &[&'static str]) -> Self {
        self.tags.extend_from_slice(tags);
        self
    }

    pub fn add_rules(mut self, names: &[&'static str]) -> Self {
        self.include_names.extend_from_slice(names);
        self
    }

    pub fn exclude_rules(mut self, names: &[&'static str]) -> Self {
        self.exclude_names.extend_from_slice(names);
        self
    }

    /// Collects every rule named by a tag or explicit name, drops excluded
    /// names, deduplicates by name, and sorts ascending by priority (stable
    /// on registration order for ties).
    pub fn resolve(&self) -> Vec<&'static RuleDef> {
        let registry = RuleRegistry::global();
        let mut picked: Vec<&'static RuleDef> = Vec::new();

        for tag in &self.tags {
            for rule in registry.get(tag) {
                if !picked.iter().any(|r| r.name == rule.name) {
                    picked.push(rule);
                }
            }
        }
        for name in &self.include_names {
            if let Some(rule) = registry.get("all").into_iter().find(|r| &r.name == name) {
                if !picked.iter().any(|r| r.name == rule.name) {
                    picked.push(rule);
                }
            }
        }

        picked.retain(|r| !self.exclude_names.contains(&r.name));
        picked.sort_by_key(|r| r.priority);
        picked
    }
}
