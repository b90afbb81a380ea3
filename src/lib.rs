//! Labelled boolean-feature datasets and conditional label histograms.
//!
//! A rating table pairs each observation's yes/no features with an ordinal
//! rating label:
//!
//! ```text
//! Rating easy ai systems
//! +2     y    y  n
//! -1     n    y  y
//! ```
//!
//! [`Dataset`] holds such a table immutably. [`Dataset::filter`] selects
//! subsets by row predicate and [`Dataset::count_label_predicate`] counts
//! labels, which [`HistogramReport`] combines into the per-feature counts a
//! decision-tree split would be scored on.
//!
//! ```
//! use rating_tree::{parse_rating_str, HistogramReport, NonNegativeRating};
//!
//! let ds = parse_rating_str("Rating f1 f2\n+1 y n\n-2 n n\n0 y y\n").unwrap();
//! let report = HistogramReport::compute(&ds, 0, true, &NonNegativeRating).unwrap();
//! assert_eq!((report.total, report.satisfying, report.not_satisfying), (2, 2, 0));
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod report;

pub use config::LoadOptions;
pub use data::filter::{FeatureEquals, LabelIn, LabelPredicate, NonNegativeRating, Not, RowPredicate};
pub use data::loader::{
    decode_feature, load_file, load_file_with, parse_csv, parse_json, parse_rating_str,
    parse_rating_table, write_csv, write_json, write_rating_table,
};
pub use data::model::{Datapoint, Dataset};
pub use error::{DatasetError, Result};
pub use report::{feature_histograms, FeatureHistogram, HistogramReport};
