//! Cross-document frequency counting of rule violations.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::report::{RuleViolation, ValidationReport};

/// Shared mapping from violation identity to occurrence count.
///
/// Created empty by the caller before a batch, mutated only through
/// [`ViolationTally::fold`], read after all folds complete. Counts never
/// decrease and entries are never evicted. Synchronization is the caller's
/// concern: wrap it in a mutex or drain a channel of reports into a single
/// owner — increment-or-insert is not atomic by construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViolationTally {
    counts: HashMap<RuleViolation, u64>,
}

/// One tally entry in snapshot form, for console and JSON reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViolationCount {
    #[serde(flatten)]
    pub violation: RuleViolation,
    pub occurrences: u64,
}

impl ViolationTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold every violation of `report` into the tally.
    ///
    /// Each violation's count is incremented by one, inserting with count 1
    /// when absent. The violation values already carry their family tag, so
    /// nothing is recomputed here. Folds commute: any order over the same
    /// reports yields the same final counts.
    pub fn fold(&mut self, report: &ValidationReport) {
        for violation in &report.violations {
            *self.counts.entry(violation.clone()).or_insert(0) += 1;
        }
    }

    /// Occurrence count for one violation value, zero when never seen.
    pub fn count(&self, violation: &RuleViolation) -> u64 {
        self.counts.get(violation).copied().unwrap_or(0)
    }

    /// Number of distinct violation values seen.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Total occurrences across all distinct violations.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate entries in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&RuleViolation, u64)> {
        self.counts.iter().map(|(violation, &count)| (violation, count))
    }

    /// Snapshot of all entries, most frequent first; ties are ordered by
    /// specification, clause and test number so output is deterministic.
    pub fn to_sorted_entries(&self) -> Vec<ViolationCount> {
        let mut entries: Vec<ViolationCount> = self
            .counts
            .iter()
            .map(|(violation, &occurrences)| ViolationCount {
                violation: violation.clone(),
                occurrences,
            })
            .collect();
        entries.sort_by(|a, b| {
            b.occurrences
                .cmp(&a.occurrences)
                .then_with(|| a.violation.specification.cmp(&b.violation.specification))
                .then_with(|| a.violation.clause.cmp(&b.violation.clause))
                .then_with(|| a.violation.test_number.cmp(&b.violation.test_number))
        });
        entries
    }
}
