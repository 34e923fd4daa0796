//! Decoration blocks and their synthetic nodes.
//!
//! `@<element>:<decoration> { ... }` blocks are pulled out of the source
//! before parsing ([`DecorationParser`]), and the resulting rules are
//! materialized on matching page elements through a [`DocumentHost`] by the
//! [`DecorationEngine`].

mod engine;
mod host;
mod rule;

pub use engine::{DecorationEngine, FlushReport, RuleDiff, RuleTable, diff_rules};
pub use host::{DocumentHost, ElementHandle, MemoryDocument, MemoryElement, MemoryNode, NodeHandle};
pub use rule::{CONTAIN_OVERFLOW, DecorationParser, DecorationRule, Extraction, class_name_for};
