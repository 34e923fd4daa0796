//! Decoration reconciliation.
//!
//! The engine keeps two rule tables: the one last applied to the document
//! and the one most recently requested. [`DecorationEngine::reconcile`] only
//! replaces the requested table, so it is cheap to call on every compile;
//! [`DecorationEngine::flush`] diffs the two and touches the document once.
//! A changed rule is removed and re-added rather than patched, so there is
//! never more than one node per (rule, element) and nothing stale survives.

use std::collections::{BTreeMap, BTreeSet};

use slotmap::SecondaryMap;
use vernacular_core::logging::targets;

use crate::decoration::host::{DocumentHost, ElementHandle};
use crate::decoration::rule::DecorationRule;

const TARGET: &str = targets::DECORATION;

/// Decoration rules keyed by id.
pub type RuleTable = BTreeMap<String, DecorationRule>;

/// Difference between two rule tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleDiff {
    /// Ids only in the previous table.
    pub removed: Vec<String>,
    /// Ids only in the next table.
    pub added: Vec<String>,
    /// Ids in both whose content differs.
    pub changed: Vec<String>,
}

impl RuleDiff {
    /// Whether the tables are identical.
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.added.is_empty() && self.changed.is_empty()
    }
}

/// Compare two rule tables by id.
pub fn diff_rules(previous: &RuleTable, next: &RuleTable) -> RuleDiff {
    let mut diff = RuleDiff::default();
    for (id, rule) in previous {
        match next.get(id) {
            None => diff.removed.push(id.clone()),
            Some(new_rule) if new_rule != rule => diff.changed.push(id.clone()),
            Some(_) => {}
        }
    }
    for id in next.keys() {
        if !previous.contains_key(id) {
            diff.added.push(id.clone());
        }
    }
    diff
}

/// What a flush did to the document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlushReport {
    /// The rule-level difference that was applied.
    pub diff: RuleDiff,
    /// Synthetic nodes created.
    pub created: usize,
    /// Synthetic nodes removed.
    pub removed: usize,
}

/// Rule ids materialized on one live anchor element.
///
/// Only used to avoid inserting the same decoration twice; the rule tables
/// decide which rules exist.
#[derive(Debug, Clone, Default)]
struct AnchorRecord {
    rules: BTreeSet<String>,
    contained: bool,
}

/// Applies decoration rules to a [`DocumentHost`] with minimal churn.
#[derive(Debug, Default)]
pub struct DecorationEngine {
    applied: RuleTable,
    desired: RuleTable,
    pending: bool,
    anchors: SecondaryMap<ElementHandle, AnchorRecord>,
}

impl DecorationEngine {
    /// Create an engine with nothing applied.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a new rule set. Nothing changes until [`flush`](Self::flush).
    pub fn reconcile<I>(&mut self, rules: I)
    where
        I: IntoIterator<Item = DecorationRule>,
    {
        self.desired = rules.into_iter().map(|r| (r.id.clone(), r)).collect();
        self.pending = true;
        tracing::trace!(target: TARGET, rules = self.desired.len(), "decoration rules requested");
    }

    /// Whether a requested rule set has not been flushed yet.
    pub fn has_pending(&self) -> bool {
        self.pending
    }

    /// The rules currently applied.
    pub fn applied(&self) -> &RuleTable {
        &self.applied
    }

    /// Apply the requested rule set to the document.
    #[tracing::instrument(skip_all, target = "vernacular_style::decoration", level = "trace")]
    pub fn flush<H: DocumentHost + ?Sized>(&mut self, host: &mut H) -> FlushReport {
        if !self.pending {
            return FlushReport::default();
        }
        self.pending = false;

        let diff = diff_rules(&self.applied, &self.desired);
        let mut report = FlushReport::default();
        if diff.is_empty() {
            return report;
        }

        let mut touched = BTreeSet::new();
        for id in diff.removed.iter().chain(&diff.changed) {
            report.removed += host.remove_decorations(id);
            for (element, record) in self.anchors.iter_mut() {
                if record.rules.remove(id) {
                    touched.insert(element);
                }
            }
        }

        self.applied = self.desired.clone();
        for id in diff.added.iter().chain(&diff.changed) {
            if let Some(rule) = self.applied.get(id) {
                report.created += materialize(&mut self.anchors, host, rule, &mut touched);
            }
        }

        for element in touched {
            sync_overflow(&mut self.anchors, &self.applied, host, element);
        }
        self.prune(host);

        tracing::debug!(
            target: TARGET,
            added = diff.added.len(),
            removed = diff.removed.len(),
            changed = diff.changed.len(),
            created = report.created,
            "decorations flushed"
        );
        report.diff = diff;
        report
    }

    /// Materialize applied rules on elements that appeared since the last
    /// flush. Returns the number of nodes created.
    pub fn materialize_new<H: DocumentHost + ?Sized>(&mut self, host: &mut H) -> usize {
        self.prune(host);
        let mut touched = BTreeSet::new();
        let mut created = 0;
        for rule in self.applied.values() {
            created += materialize(&mut self.anchors, host, rule, &mut touched);
        }
        for element in touched {
            sync_overflow(&mut self.anchors, &self.applied, host, element);
        }
        if created > 0 {
            tracing::debug!(target: TARGET, created, "decorations materialized on new elements");
        }
        created
    }

    /// Remove every decoration and forget all rules.
    pub fn clear<H: DocumentHost + ?Sized>(&mut self, host: &mut H) -> usize {
        let removed = host.remove_all_decorations();
        let elements: Vec<ElementHandle> = self.anchors.keys().collect();
        self.applied.clear();
        self.desired.clear();
        self.pending = false;
        for element in elements {
            if let Some(record) = self.anchors.get_mut(element) {
                record.rules.clear();
            }
            sync_overflow(&mut self.anchors, &self.applied, host, element);
        }
        self.anchors.clear();
        tracing::debug!(target: TARGET, removed, "all decorations cleared");
        removed
    }

    /// Number of live anchor records.
    pub fn anchor_count(&self) -> usize {
        self.anchors.len()
    }

    fn prune<H: DocumentHost + ?Sized>(&mut self, host: &H) {
        self.anchors
            .retain(|element, record| !record.rules.is_empty() && host.is_connected(element));
    }
}

fn materialize<H: DocumentHost + ?Sized>(
    anchors: &mut SecondaryMap<ElementHandle, AnchorRecord>,
    host: &mut H,
    rule: &DecorationRule,
    touched: &mut BTreeSet<ElementHandle>,
) -> usize {
    let styles = rule.node_styles();
    let mut created = 0;
    for element in host.select(&rule.selector) {
        let has_rule = anchors
            .get(element)
            .is_some_and(|record| record.rules.contains(&rule.id));
        if has_rule {
            continue;
        }
        if host
            .insert_decoration(element, &rule.id, &rule.class_name, &styles)
            .is_none()
        {
            continue;
        }
        if !anchors.contains_key(element) {
            anchors.insert(element, AnchorRecord::default());
        }
        if let Some(record) = anchors.get_mut(element) {
            record.rules.insert(rule.id.clone());
        }
        touched.insert(element);
        created += 1;
    }
    created
}

/// Contain the element's overflow if any of its rules asks for it, and
/// undo containment once none does.
fn sync_overflow<H: DocumentHost + ?Sized>(
    anchors: &mut SecondaryMap<ElementHandle, AnchorRecord>,
    applied: &RuleTable,
    host: &mut H,
    element: ElementHandle,
) {
    let Some(record) = anchors.get_mut(element) else {
        return;
    };
    let contain = record
        .rules
        .iter()
        .any(|id| applied.get(id).is_some_and(|r| r.contain_overflow));

    if contain {
        host.set_inline_style(element, "overflow", "hidden");
        host.set_inline_style(element, "position", "relative");
    } else {
        let overflow = if record.rules.is_empty() { "" } else { "visible" };
        host.set_inline_style(element, "overflow", overflow);
        if record.contained {
            host.set_inline_style(element, "position", "");
        }
    }
    record.contained = contain;
}
