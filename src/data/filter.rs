use std::collections::BTreeSet;

use super::model::Datapoint;

// ---------------------------------------------------------------------------
// Predicate capabilities
// ---------------------------------------------------------------------------

/// A pure test over a single datapoint, used by [`Dataset::filter`].
///
/// Any `Fn(&Datapoint) -> bool` closure is a row predicate.
///
/// [`Dataset::filter`]: super::model::Dataset::filter
pub trait RowPredicate {
    fn matches(&self, datapoint: &Datapoint) -> bool;
}

/// A pure test over a label token, used by
/// [`Dataset::count_label_predicate`](super::model::Dataset::count_label_predicate).
///
/// Any `Fn(&str) -> bool` closure is a label predicate.
pub trait LabelPredicate {
    fn matches(&self, label: &str) -> bool;
}

impl<F> RowPredicate for F
where
    F: Fn(&Datapoint) -> bool,
{
    fn matches(&self, datapoint: &Datapoint) -> bool {
        self(datapoint)
    }
}

impl<F> LabelPredicate for F
where
    F: Fn(&str) -> bool,
{
    fn matches(&self, label: &str) -> bool {
        self(label)
    }
}

// ---------------------------------------------------------------------------
// Row predicates
// ---------------------------------------------------------------------------

/// Passes datapoints whose feature `index` equals `value`.
///
/// An index beyond the datapoint's width never matches; callers that need
/// an error for that case check the index against the schema first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureEquals {
    pub index: usize,
    pub value: bool,
}

impl FeatureEquals {
    pub fn new(index: usize, value: bool) -> Self {
        Self { index, value }
    }
}

impl RowPredicate for FeatureEquals {
    fn matches(&self, datapoint: &Datapoint) -> bool {
        datapoint.features().get(self.index) == Some(&self.value)
    }
}

// ---------------------------------------------------------------------------
// Label predicates
// ---------------------------------------------------------------------------

/// Passes labels that are one of a fixed set of tokens (exact match).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelIn {
    labels: BTreeSet<String>,
}

impl LabelIn {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }
}

impl LabelPredicate for LabelIn {
    fn matches(&self, label: &str) -> bool {
        self.labels.contains(label)
    }
}

/// Passes labels denoting a rating `>= 0` (`"0"`, `"+1"`, `"2"`, ...).
///
/// Labels that are not signed integers never match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NonNegativeRating;

impl LabelPredicate for NonNegativeRating {
    fn matches(&self, label: &str) -> bool {
        matches!(label.trim().parse::<i64>(), Ok(r) if r >= 0)
    }
}

// ---------------------------------------------------------------------------
// Negation
// ---------------------------------------------------------------------------

/// Logical complement of a row or label predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Not<P>(pub P);

impl<P: RowPredicate> RowPredicate for Not<P> {
    fn matches(&self, datapoint: &Datapoint) -> bool {
        !self.0.matches(datapoint)
    }
}

impl<L: LabelPredicate> LabelPredicate for Not<L> {
    fn matches(&self, label: &str) -> bool {
        !self.0.matches(label)
    }
}
