//! Weighted attribution values and the core error taxonomy
//!
//! A `WeightedAttribution` binds a score to a label (a category name or a
//! contributor group name). Values are immutable: combining two attributions
//! returns a new one and is only defined when the labels agree.

use std::cmp::Ordering;
use std::path::PathBuf;
use thiserror::Error;

/// Sentinel label for unmatched/unattributable content
pub const UNKNOWN_LABEL: &str = "UNKNOWN";

/// Errors raised by the attribution core
#[derive(Debug, Error)]
pub enum AttributionError {
    /// Addition attempted between attributions carrying different labels
    #[error("label mismatch: cannot add '{right}' to '{left}'")]
    LabelMismatch { left: String, right: String },

    /// A path handed to set or walker construction does not exist
    #[error("invalid path: '{path}' does not exist under '{base}'")]
    InvalidPath { path: PathBuf, base: PathBuf },
}

/// An immutable (label, weight) pair
///
/// Weight semantics depend on the scorer that produced the value: matched
/// character count for categorisation, line count for contribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightedAttribution {
    label: String,
    weight: u64,
}

impl WeightedAttribution {
    /// Create an attribution for a specific label
    pub fn new(label: impl Into<String>, weight: u64) -> Self {
        Self {
            label: label.into(),
            weight,
        }
    }

    /// Create an attribution for the UNKNOWN sentinel label
    pub fn unknown(weight: u64) -> Self {
        Self::new(UNKNOWN_LABEL, weight)
    }

    /// A zero-weight attribution, used to initialize set entries
    pub fn zero(label: impl Into<String>) -> Self {
        Self::new(label, 0)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn weight(&self) -> u64 {
        self.weight
    }

    /// Sum two attributions of the same label into a new value
    ///
    /// Fails with `LabelMismatch` when the labels differ; callers must not
    /// continue with a partial sum.
    pub fn add(&self, other: &Self) -> Result<Self, AttributionError> {
        if self.label != other.label {
            return Err(AttributionError::LabelMismatch {
                left: self.label.clone(),
                right: other.label.clone(),
            });
        }

        Ok(Self {
            label: self.label.clone(),
            weight: self.weight + other.weight,
        })
    }

    /// Order by weight only; labels are never compared
    pub fn cmp_weight(&self, other: &Self) -> Ordering {
        self.weight.cmp(&other.weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stores_label_and_weight() {
        let attribution = WeightedAttribution::new("payments", 12);
        assert_eq!(attribution.label(), "payments");
        assert_eq!(attribution.weight(), 12);
    }

    #[test]
    fn test_unknown_uses_sentinel_label() {
        let attribution = WeightedAttribution::unknown(3);
        assert_eq!(attribution.label(), UNKNOWN_LABEL);
        assert_eq!(attribution.weight(), 3);
    }

    #[test]
    fn test_zero_has_no_weight() {
        let attribution = WeightedAttribution::zero("payments");
        assert_eq!(attribution.weight(), 0);
    }

    #[test]
    fn test_add_sums_weights_for_matching_labels() {
        let a = WeightedAttribution::new("payments", 5);
        let b = WeightedAttribution::new("payments", 7);

        let sum = a.add(&b).unwrap();
        assert_eq!(sum.label(), "payments");
        assert_eq!(sum.weight(), 12);
    }

    #[test]
    fn test_add_is_commutative() {
        let a = WeightedAttribution::new("payments", 5);
        let b = WeightedAttribution::new("payments", 7);

        assert_eq!(a.add(&b).unwrap(), b.add(&a).unwrap());
    }

    #[test]
    fn test_add_does_not_mutate_operands() {
        let a = WeightedAttribution::new("payments", 5);
        let b = WeightedAttribution::new("payments", 7);
        let _ = a.add(&b).unwrap();

        assert_eq!(a.weight(), 5);
        assert_eq!(b.weight(), 7);
    }

    #[test]
    fn test_add_rejects_mismatched_labels() {
        let a = WeightedAttribution::new("payments", 5);
        let b = WeightedAttribution::new("billing", 7);

        let err = a.add(&b).unwrap_err();
        assert!(matches!(err, AttributionError::LabelMismatch { .. }));
        assert!(err.to_string().contains("payments"));
        assert!(err.to_string().contains("billing"));
    }

    #[test]
    fn test_cmp_weight_ignores_labels() {
        let a = WeightedAttribution::new("payments", 5);
        let b = WeightedAttribution::new("billing", 7);
        let c = WeightedAttribution::new("zebra", 5);

        assert_eq!(a.cmp_weight(&b), Ordering::Less);
        assert_eq!(b.cmp_weight(&a), Ordering::Greater);
        assert_eq!(a.cmp_weight(&c), Ordering::Equal);
    }
}
