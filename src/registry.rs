//! The process-wide tag -> rule index, built once from the rule catalog.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::rule::RuleDef;
use crate::rules;

/// Maps every tag a rule carries, plus the synthetic `"all"` tag, to the
/// rules registered under it.
///
/// Built once from [`rules::ALL`]; there is no dynamic re-registration
/// during a parse. Rules come back sorted by priority ascending, stable on
/// catalog order for ties, so two rules at the same priority always apply in
/// the order they're declared in [`rules::mod`].
pub struct RuleRegistry {
    by_tag: HashMap<&'static str, Vec<&'static RuleDef>>,
}

static REGISTRY: Lazy<RuleRegistry> = Lazy::new(RuleRegistry::build);

impl RuleRegistry {
    fn build() -> Self {
        let mut by_tag: HashMap<&'static str, Vec<&'static RuleDef>> = HashMap::new();
        for rule in rules::ALL.iter() {
            by_tag.entry("all").or_default().push(rule);
            for tag in rule.tags {
                by_tag.entry(tag).or_default().push(rule);
            }
        }
        for bucket in by_tag.values_mut() {
            bucket.sort_by_key(|r| r.priority);
        }
        Self { by_tag }
    }

    pub fn global() -> &'static RuleRegistry {
        &REGISTRY
    }

    /// Rules registered under `tag`, sorted ascending by priority. Empty if
    /// the tag has no rules rather than an error — an unused tag isn't a
    /// mistake the registry needs to reject.
    pub fn get(&self, tag: &str) -> Vec<&'static RuleDef> {
        self.by_tag.get(tag).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_bucket_contains_every_registered_rule() {
        let reg = RuleRegistry::global();
        assert_eq!(reg.get("all").len(), rules::ALL.len());
    }

    #[test]
    fn structure_tag_is_sorted_by_priority() {
        let reg = RuleRegistry::global();
        let structure = reg.get("structure");
        assert!(!structure.is_empty());
        let priorities: Vec<u32> = structure.iter().map(|r| r.priority).collect();
        let mut sorted = priorities.clone();
        sorted.sort();
        assert_eq!(priorities, sorted);
    }

    #[test]
    fn unknown_tag_yields_empty_vec() {
        assert!(RuleRegistry::global().get("nonexistent-tag").is_empty());
    }
}
