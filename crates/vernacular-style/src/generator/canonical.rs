//! Canonical stylesheet output.

use std::fmt::Write as _;

use crate::generator::{merge_shorthand, ordering};
use crate::rules::RuleMap;

/// Options for canonical generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Append `!important` to every declaration.
    pub use_important: bool,
}

impl GenerateOptions {
    /// Options with `!important` on every declaration.
    pub fn important() -> Self {
        Self { use_important: true }
    }
}

pub(crate) fn generate(rules: &RuleMap, options: &GenerateOptions) -> String {
    let mut out = String::new();

    for rule in rules.iter() {
        let mut properties = rule.properties.clone();
        merge_shorthand(&mut properties);
        if properties.is_empty() {
            continue;
        }

        if !out.is_empty() {
            out.push('\n');
        }
        let _ = writeln!(out, "{} {{", rule.selector);
        for (property, value) in ordering::sorted(&properties) {
            let marker = if options.use_important && !value.ends_with("!important") {
                " !important"
            } else {
                ""
            };
            let _ = writeln!(out, "  {property}: {value}{marker};");
        }
        out.push_str("}\n");
    }

    out
}
