//! Label histograms conditioned on a single feature value.
//!
//! For a feature `i`, a value `v` and a label predicate `P`, a
//! [`HistogramReport`] holds how many datapoints with `feature[i] == v`
//! have a label satisfying `P`, and how many do not. These are the counts a
//! split criterion would be computed from.

use serde::Serialize;

use crate::data::filter::{FeatureEquals, LabelPredicate};
use crate::data::model::Dataset;
use crate::error::{DatasetError, Result};

/// Counts for one `(feature, value, predicate)` triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistogramReport {
    pub feature_index: usize,
    pub feature_name: String,
    pub value: bool,
    /// Datapoints whose feature equals `value`.
    pub total: usize,
    /// Of those, labels satisfying the predicate.
    pub satisfying: usize,
    /// `total - satisfying`.
    pub not_satisfying: usize,
}

impl HistogramReport {
    /// Split `dataset` on `feature_index == value` and count `predicate` on
    /// the matching side.
    ///
    /// Fails with [`DatasetError::IndexOutOfRange`] when `feature_index` is
    /// not below the dataset's feature count, even if the dataset is empty.
    pub fn compute<L>(
        dataset: &Dataset,
        feature_index: usize,
        value: bool,
        predicate: &L,
    ) -> Result<Self>
    where
        L: LabelPredicate + ?Sized,
    {
        let feature_name = dataset
            .feature_names()
            .get(feature_index)
            .cloned()
            .ok_or_else(|| {
                DatasetError::index_out_of_range("feature", feature_index, dataset.feature_count())
            })?;

        let matched = dataset.filter(&FeatureEquals::new(feature_index, value));
        let total = matched.size();
        let satisfying = matched.count_label_predicate(predicate);

        Ok(Self {
            feature_index,
            feature_name,
            value,
            total,
            satisfying,
            not_satisfying: total - satisfying,
        })
    }

    /// Fraction of the matched datapoints satisfying the predicate, or
    /// `None` when nothing matched.
    pub fn satisfying_ratio(&self) -> Option<f64> {
        (self.total > 0).then(|| self.satisfying as f64 / self.total as f64)
    }
}

/// Both sides of one feature: `value = true` and `value = false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureHistogram {
    pub when_true: HistogramReport,
    pub when_false: HistogramReport,
}

impl FeatureHistogram {
    pub fn compute<L>(dataset: &Dataset, feature_index: usize, predicate: &L) -> Result<Self>
    where
        L: LabelPredicate + ?Sized,
    {
        Ok(Self {
            when_true: HistogramReport::compute(dataset, feature_index, true, predicate)?,
            when_false: HistogramReport::compute(dataset, feature_index, false, predicate)?,
        })
    }

    pub fn feature_name(&self) -> &str {
        &self.when_true.feature_name
    }
}

/// One [`FeatureHistogram`] per feature, in schema order.
pub fn feature_histograms<L>(dataset: &Dataset, predicate: &L) -> Result<Vec<FeatureHistogram>>
where
    L: LabelPredicate + ?Sized,
{
    (0..dataset.feature_count())
        .map(|i| FeatureHistogram::compute(dataset, i, predicate))
        .collect()
}
