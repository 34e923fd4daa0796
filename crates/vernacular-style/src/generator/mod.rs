//! Source generation from rule maps.
//!
//! The [`Generator`] produces two texts from a [`RuleMap`](crate::rules::RuleMap):
//!
//! - localized source for redisplay, grouped under `# <category>` headers,
//!   which parses back to the same rules;
//! - canonical stylesheet text for application, with shorthands merged and
//!   declarations in a fixed priority order.

mod canonical;
mod localized;
pub mod ordering;
mod shorthand;

pub use canonical::GenerateOptions;
pub use shorthand::{collapse_box, expand_box, merge_shorthand};

use crate::rules::RuleMap;
use crate::translate::ValueTranslator;

/// Generates localized and canonical text.
#[derive(Debug, Clone)]
pub struct Generator {
    translator: ValueTranslator,
}

impl Generator {
    /// Create a generator that formats values with `translator`.
    pub fn new(translator: ValueTranslator) -> Self {
        Self { translator }
    }

    /// Generate localized source.
    pub fn to_localized(&self, rules: &RuleMap) -> String {
        localized::generate(&self.translator, rules)
    }

    /// Generate canonical stylesheet text.
    pub fn to_canonical(&self, rules: &RuleMap, options: &GenerateOptions) -> String {
        canonical::generate(rules, options)
    }
}
