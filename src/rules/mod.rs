//! The rule catalog, grouped into one module per concern.
//!
//! Each submodule exposes its rules both individually (for direct reference
//! in tests) and as a `RULES` slice; [`ALL`] is the flattened catalog the
//! [`crate::registry::RuleRegistry`] indexes at startup.

pub mod cleanup;
pub mod compound_keys;
pub mod quoting;
pub mod separators;
pub mod smart_typing;
pub mod strings;
pub mod values;

use once_cell::sync::Lazy;

use crate::rule::RuleDef;

pub static ALL: Lazy<Vec<RuleDef>> = Lazy::new(|| {
    let mut all = Vec::new();
    all.extend_from_slice(cleanup::RULES);
    all.extend_from_slice(separators::RULES);
    all.extend_from_slice(compound_keys::RULES);
    all.extend_from_slice(quoting::RULES);
    all.extend_from_slice(values::RULES);
    all.extend_from_slice(smart_typing::RULES);
    all.extend_from_slice(strings::RULES);
    all
});
