//! Row selection policy.
//!
//! The selection is an ordered set of 1-based algorithm row indices. Its
//! valid shape depends on the analysis mode. Two transitions exist:
//!
//! - [`SelectionPolicy::toggle`]: a user checks or unchecks one row.
//! - [`SelectionPolicy::reconcile`]: re-derive a valid selection after the
//!   mode or the table shape changed.
//!
//! Both are pure functions. `reconcile` is idempotent, so callers can run it
//! after every mutation without guarding against re-entry.

use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisMode;

/// Ordered, duplicate-free list of selected algorithm rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection(Vec<usize>);

impl Selection {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Build from indices, dropping repeats while keeping first occurrences.
    pub fn from_indices(indices: impl IntoIterator<Item = usize>) -> Self {
        let mut selection = Self::new();
        for index in indices {
            selection.insert(index);
        }
        selection
    }

    /// Every algorithm row of a table with `row_count` rows.
    pub fn all_rows(row_count: usize) -> Self {
        Self((1..row_count).collect())
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.0.contains(&index)
    }

    fn insert(&mut self, index: usize) {
        if !self.contains(index) {
            self.0.push(index);
        }
    }

    fn without(&self, index: usize) -> Self {
        Self(self.0.iter().copied().filter(|row| *row != index).collect())
    }

    fn truncated(&self, capacity: usize) -> Self {
        Self(self.0.iter().copied().take(capacity).collect())
    }
}

impl From<Vec<usize>> for Selection {
    fn from(indices: Vec<usize>) -> Self {
        Self::from_indices(indices)
    }
}

/// Maps (mode, user intent, table shape) to the selected algorithm rows.
pub struct SelectionPolicy;

impl SelectionPolicy {
    /// Apply a user checkbox change on `row`.
    ///
    /// In pairwise mode the selection is a sliding window of two: checking a
    /// third row drops the oldest. Control mode behaves like a radio button.
    /// All mode ignores the intent and returns the computed full selection.
    pub fn toggle(
        mode: AnalysisMode,
        current: &Selection,
        row: usize,
        checked: bool,
        row_count: usize,
    ) -> Selection {
        match mode {
            AnalysisMode::Pairwise => {
                if !checked {
                    return current.without(row);
                }
                if current.contains(row) {
                    return current.clone();
                }
                match current.indices() {
                    [_, newest] => Selection(vec![*newest, row]),
                    [] | [_] => {
                        let mut next = current.clone();
                        next.insert(row);
                        next
                    }
                    // Over capacity only happens before reconciliation ran.
                    [.., newest] => Selection(vec![*newest, row]),
                }
            }
            AnalysisMode::Control => {
                if checked {
                    Selection(vec![row])
                } else {
                    current.without(row)
                }
            }
            AnalysisMode::All => Selection::all_rows(row_count),
        }
    }

    /// Re-derive a valid selection for `mode` on a table of `row_count` rows
    /// (header row included).
    ///
    /// Indices outside `1..row_count` are dropped before the mode rules
    /// apply, so a seeded pairwise selection is never emptied afterwards.
    pub fn reconcile(mode: AnalysisMode, current: &Selection, row_count: usize) -> Selection {
        if row_count <= 1 {
            return Selection::new();
        }
        let in_range = Selection::from_indices(
            current
                .indices()
                .iter()
                .copied()
                .filter(|index| *index >= 1 && *index < row_count),
        );
        match mode {
            AnalysisMode::Pairwise => {
                if in_range.len() > 2 {
                    in_range.truncated(2)
                } else if in_range.is_empty() {
                    Selection(vec![1])
                } else {
                    in_range
                }
            }
            AnalysisMode::Control => in_range.truncated(1),
            AnalysisMode::All => Selection::all_rows(row_count),
        }
    }

    /// Reconcile in place and report whether anything changed.
    ///
    /// The new value is committed only when it differs from the current one.
    pub fn reconcile_in_place(
        mode: AnalysisMode,
        selection: &mut Selection,
        row_count: usize,
    ) -> bool {
        let next = Self::reconcile(mode, selection, row_count);
        if next == *selection {
            return false;
        }
        *selection = next;
        true
    }
}
