use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::filter::{LabelPredicate, RowPredicate};
use crate::error::{DatasetError, Result};

// ---------------------------------------------------------------------------
// Datapoint – one labelled observation
// ---------------------------------------------------------------------------

/// A single labelled row: `k` boolean features plus a rating label.
///
/// The label is kept verbatim; whether it belongs to a rating vocabulary is
/// the caller's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Datapoint {
    features: Vec<bool>,
    label: String,
}

impl Datapoint {
    pub fn new(features: Vec<bool>, label: impl Into<String>) -> Self {
        Self {
            features,
            label: label.into(),
        }
    }

    /// Value of feature `i`.
    pub fn feature_value(&self, i: usize) -> Result<bool> {
        self.features
            .get(i)
            .copied()
            .ok_or_else(|| DatasetError::index_out_of_range("feature", i, self.features.len()))
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn features(&self) -> &[bool] {
        &self.features
    }

    pub fn feature_count(&self) -> usize {
        self.features.len()
    }
}

// ---------------------------------------------------------------------------
// Dataset – ordered, immutable collection sharing one schema
// ---------------------------------------------------------------------------

/// An ordered collection of [`Datapoint`]s over a fixed feature schema.
///
/// Datasets are never mutated. [`Dataset::filter`] returns a new view that
/// shares both the schema and the selected datapoints by reference count.
#[derive(Debug, Clone)]
pub struct Dataset {
    feature_names: Arc<[String]>,
    datapoints: Vec<Arc<Datapoint>>,
}

impl Dataset {
    /// Build a dataset, checking every datapoint against the schema width.
    pub fn new(feature_names: Vec<String>, datapoints: Vec<Datapoint>) -> Result<Self> {
        let k = feature_names.len();
        if let Some((row, dp)) = datapoints
            .iter()
            .enumerate()
            .find(|(_, dp)| dp.feature_count() != k)
        {
            return Err(DatasetError::schema(
                0,
                format!(
                    "datapoint {row} has {} features, schema declares {k}",
                    dp.feature_count()
                ),
            ));
        }
        Ok(Self {
            feature_names: feature_names.into(),
            datapoints: datapoints.into_iter().map(Arc::new).collect(),
        })
    }

    /// A dataset with the given schema and no rows.
    pub fn empty(feature_names: Vec<String>) -> Self {
        Self {
            feature_names: feature_names.into(),
            datapoints: Vec::new(),
        }
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Number of features (`k`).
    pub fn feature_count(&self) -> usize {
        self.feature_names.len()
    }

    /// Position of the feature called `name`, if any.
    pub fn feature_index(&self, name: &str) -> Option<usize> {
        self.feature_names.iter().position(|n| n == name)
    }

    /// Number of datapoints.
    pub fn size(&self) -> usize {
        self.datapoints.len()
    }

    pub fn len(&self) -> usize {
        self.size()
    }

    pub fn is_empty(&self) -> bool {
        self.datapoints.is_empty()
    }

    pub fn datapoint(&self, i: usize) -> Result<&Datapoint> {
        self.datapoints
            .get(i)
            .map(Arc::as_ref)
            .ok_or_else(|| DatasetError::index_out_of_range("datapoint", i, self.size()))
    }

    /// Feature `j` of datapoint `i`.
    pub fn feature_value(&self, i: usize, j: usize) -> Result<bool> {
        self.datapoint(i)?.feature_value(j)
    }

    pub fn feature_values(&self, i: usize) -> Result<&[bool]> {
        Ok(self.datapoint(i)?.features())
    }

    pub fn label(&self, i: usize) -> Result<&str> {
        Ok(self.datapoint(i)?.label())
    }

    /// Datapoints in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Datapoint> + '_ {
        self.datapoints.iter().map(Arc::as_ref)
    }

    /// Keep the datapoints matching `predicate`, in their original order.
    pub fn filter<P>(&self, predicate: &P) -> Dataset
    where
        P: RowPredicate + ?Sized,
    {
        let datapoints = self
            .datapoints
            .iter()
            .filter(|dp| RowPredicate::matches(predicate, dp))
            .cloned()
            .collect();
        Dataset {
            feature_names: Arc::clone(&self.feature_names),
            datapoints,
        }
    }

    /// Count datapoints whose label satisfies `predicate`.
    ///
    /// Same result as filtering by label and taking the size, without
    /// building the intermediate dataset.
    pub fn count_label_predicate<L>(&self, predicate: &L) -> usize
    where
        L: LabelPredicate + ?Sized,
    {
        self.datapoints
            .iter()
            .filter(|dp| LabelPredicate::matches(predicate, dp.label()))
            .count()
    }

    /// Occurrences of each distinct label.
    pub fn label_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for dp in &self.datapoints {
            *counts.entry(dp.label().to_string()).or_insert(0) += 1;
        }
        counts
    }

    /// Whether `other` is a view over the same schema allocation.
    #[cfg(test)]
    fn shares_schema_with(&self, other: &Dataset) -> bool {
        Arc::ptr_eq(&self.feature_names, &other.feature_names)
    }
}
