//! Per-path attribution sets and their merge algebra
//!
//! An `AttributionSet` maps every declared label (plus the UNKNOWN sentinel)
//! to a `WeightedAttribution` for one filesystem node. Sets for unrelated
//! paths can be added together; the result lands on the nearest common
//! ancestor computed by path reconciliation.

use crate::attribution::{AttributionError, WeightedAttribution, UNKNOWN_LABEL};
use crate::paths::{self, PathResolver};
use serde::{Deserialize, Serialize};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Whether ranking may select the UNKNOWN sentinel as the winner
///
/// Categorisation ranking includes UNKNOWN; contribution ranking excludes it
/// before taking the maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnknownPolicy {
    Include,
    Exclude,
}

/// Serialized form of an attribution set for JSON reports
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributionDocument {
    pub path: String,
    /// Per-label weights in lexicographic label order
    pub weights: BTreeMap<String, u64>,
    pub total: u64,
    pub best_label: String,
    pub best_weight: u64,
}

/// Label → attribution mapping bound to one normalized path
///
/// The backing map is a `BTreeMap`, so iteration and serialization always
/// follow the lexicographic sort of labels; UNKNOWN sorts with the rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributionSet {
    path: PathBuf,
    store: BTreeMap<String, WeightedAttribution>,
}

impl AttributionSet {
    /// Create a zero-initialized set for `path` over `labels` plus UNKNOWN
    ///
    /// Fails with `InvalidPath` when the path does not exist under the
    /// resolver's base directory.
    pub fn new(
        resolver: &PathResolver,
        path: &Path,
        labels: &[String],
    ) -> Result<Self, AttributionError> {
        let path = resolver.normalize(path)?;
        Ok(Self::at_path(path, labels))
    }

    /// Zero-initialized set pinned to an already-normalized path
    ///
    /// Used internally by `add`, whose reconciled result path is an ancestor
    /// of two existing paths and needs no fresh filesystem check.
    fn at_path(path: PathBuf, labels: &[String]) -> Self {
        let mut store = BTreeMap::new();
        for label in labels {
            store.insert(label.clone(), WeightedAttribution::zero(label.clone()));
        }
        store.insert(
            UNKNOWN_LABEL.to_string(),
            WeightedAttribution::zero(UNKNOWN_LABEL),
        );

        Self { path, store }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Declared labels in lexicographic order
    pub fn labels(&self) -> Vec<&str> {
        self.store.keys().map(String::as_str).collect()
    }

    pub fn get(&self, label: &str) -> Option<&WeightedAttribution> {
        self.store.get(label)
    }

    /// Fold an attribution into this set
    ///
    /// An existing entry for the same label is replaced by the sum; a
    /// previously-undeclared label grows the set rather than erroring.
    pub fn insert(&mut self, attribution: WeightedAttribution) -> Result<(), AttributionError> {
        match self.store.entry(attribution.label().to_string()) {
            Entry::Occupied(mut entry) => {
                let merged = entry.get().add(&attribution)?;
                entry.insert(merged);
            }
            Entry::Vacant(entry) => {
                entry.insert(attribution);
            }
        }
        Ok(())
    }

    /// Element-wise sum of two sets, assigned to their reconciled path
    ///
    /// The result's label set is the union of both operands'; a label missing
    /// on one side contributes zero. Neither operand is mutated.
    pub fn add(&self, other: &Self) -> Result<Self, AttributionError> {
        let path = paths::reconcile(&self.path, &other.path);

        let mut store = self.store.clone();
        for attribution in other.store.values() {
            match store.entry(attribution.label().to_string()) {
                Entry::Occupied(mut entry) => {
                    let merged = entry.get().add(attribution)?;
                    entry.insert(merged);
                }
                Entry::Vacant(entry) => {
                    entry.insert(attribution.clone());
                }
            }
        }

        Ok(Self { path, store })
    }

    /// Maximum-weight attribution under the given UNKNOWN policy
    ///
    /// Ties break to the lexicographically smallest label.
    pub fn best(&self, policy: UnknownPolicy) -> Option<&WeightedAttribution> {
        let mut best: Option<&WeightedAttribution> = None;
        for attribution in self.store.values() {
            if policy == UnknownPolicy::Exclude && attribution.label() == UNKNOWN_LABEL {
                continue;
            }
            // Strictly-greater keeps the first (lexically smallest) label on ties
            let wins = best.map_or(true, |current| {
                attribution.cmp_weight(current) == std::cmp::Ordering::Greater
            });
            if wins {
                best = Some(attribution);
            }
        }
        best
    }

    /// Sum of all declared weights, UNKNOWN included
    pub fn total(&self) -> u64 {
        self.store.values().map(WeightedAttribution::weight).sum()
    }

    /// Winner under the policy, falling back to the full pool (and then to a
    /// zero UNKNOWN) when exclusion empties the candidates
    fn ranked(&self, policy: UnknownPolicy) -> (String, u64) {
        self.best(policy)
            .or_else(|| self.best(UnknownPolicy::Include))
            .map(|attribution| (attribution.label().to_string(), attribution.weight()))
            .unwrap_or_else(|| (UNKNOWN_LABEL.to_string(), 0))
    }

    /// Report document: path, per-label weights, total, and the winner
    pub fn to_document(&self, policy: UnknownPolicy) -> AttributionDocument {
        let (best_label, best_weight) = self.ranked(policy);

        AttributionDocument {
            path: self.path.display().to_string(),
            weights: self
                .store
                .iter()
                .map(|(label, attribution)| (label.clone(), attribution.weight()))
                .collect(),
            total: self.total(),
            best_label,
            best_weight,
        }
    }

    /// CSV header matching `to_row`: fixed columns then sorted labels
    pub fn header_row(&self) -> Vec<String> {
        let mut header = vec![
            "path".to_string(),
            "total".to_string(),
            "best_weight".to_string(),
            "best_label".to_string(),
        ];
        header.extend(self.store.keys().cloned());
        header
    }

    /// CSV row: path, total, winner, then per-label weights in label order
    pub fn to_row(&self, policy: UnknownPolicy) -> Vec<String> {
        let (best_label, best_weight) = self.ranked(policy);

        let mut row = vec![
            self.path.display().to_string(),
            self.total().to_string(),
            best_weight.to_string(),
            best_label,
        ];
        row.extend(
            self.store
                .values()
                .map(|attribution| attribution.weight().to_string()),
        );
        row
    }
}
