//! Loading rating tables from disk.

use std::io::Write;
use std::path::PathBuf;

use rating_tree::{
    feature_histograms, load_file, load_file_with, write_csv, write_json, DatasetError, LabelIn,
    LoadOptions, NonNegativeRating, RowPredicate,
};
use tempfile::{tempdir, NamedTempFile};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

fn write_temp(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn literal_scenario() {
    let file = write_temp(".txt", "Rating f1 f2\n+1 y n\n-2 n n\n0 y y\n");
    let ds = load_file(file.path()).unwrap();

    assert_eq!(ds.feature_count(), 2);
    assert_eq!(ds.feature_names(), ["f1", "f2"]);
    assert_eq!(ds.size(), 3);
    assert!(ds.datapoint(0).unwrap().feature_value(0).unwrap());
    assert!(!ds.datapoint(1).unwrap().feature_value(0).unwrap());
    assert_eq!(ds.count_label_predicate(&|l: &str| l == "+1" || l == "0"), 2);

    let sub = ds.filter(&|dp: &rating_tree::Datapoint| dp.feature_value(0).unwrap_or(false));
    assert_eq!(sub.size(), 2);
    assert_eq!(sub.datapoint(0).unwrap(), ds.datapoint(0).unwrap());
    assert_eq!(sub.datapoint(1).unwrap(), ds.datapoint(2).unwrap());
}

#[test]
fn malformed_row_aborts_load() {
    let file = write_temp(".txt", "Rating f1 f2\n+1 y\n");
    let err = load_file(file.path()).unwrap_err();
    assert!(matches!(err, DatasetError::Schema { line: 2, .. }), "{err}");
}

#[test]
fn wrong_header_aborts_load() {
    let file = write_temp(".txt", "Label f1\n+1 y\n");
    assert!(load_file(file.path()).unwrap_err().is_schema());
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let err = load_file(&dir.path().join("nope.txt")).unwrap_err();
    assert!(matches!(err, DatasetError::Io(_)));
}

#[test]
fn csv_by_extension() {
    let file = write_temp(".csv", "Rating,f1,f2\n+1,y,n\n-2,n,n\n0,y,y\n");
    let ds = load_file(file.path()).unwrap();
    assert_eq!(ds.size(), 3);
    assert_eq!(ds.count_label_predicate(&LabelIn::new(["+1", "0"])), 2);
}

#[test]
fn json_by_extension() {
    let source = load_file(&fixture("course_ratings.txt")).unwrap();
    let dir = tempdir().unwrap();
    let path = dir.path().join("ratings.json");
    write_json(&source, std::fs::File::create(&path).unwrap()).unwrap();

    let ds = load_file(&path).unwrap();
    assert_eq!(ds.feature_names(), source.feature_names());
    assert_eq!(ds.label_counts(), source.label_counts());
}

#[test]
fn csv_written_file_loads_back() {
    let source = load_file(&fixture("course_ratings.txt")).unwrap();
    let dir = tempdir().unwrap();
    let path = dir.path().join("ratings.csv");
    write_csv(&source, std::fs::File::create(&path).unwrap()).unwrap();

    let ds = load_file(&path).unwrap();
    assert_eq!(ds.feature_names(), source.feature_names());
    assert_eq!(ds.size(), source.size());
    for i in 0..ds.size() {
        assert_eq!(ds.datapoint(i).unwrap(), source.datapoint(i).unwrap());
    }
}

#[test]
fn permissive_tokens_with_vocabulary() {
    let file = write_temp(".txt", "Rating a b\n+3 YES Y\nmeh n maybe\n");
    let opts = LoadOptions::default().with_label_vocabulary(["-2", "-1", "0", "+1", "+2"]);
    let ds = load_file_with(file.path(), &opts).unwrap();
    assert_eq!(ds.feature_values(0).unwrap(), [false, true]);
    assert_eq!(ds.feature_values(1).unwrap(), [false, false]);
    assert_eq!(ds.label(1).unwrap(), "meh");
}

#[test]
fn course_fixture_histograms() {
    let ds = load_file(&fixture("course_ratings.txt")).unwrap();
    assert_eq!(ds.size(), 20);
    assert_eq!(ds.feature_count(), 6);
    assert_eq!(ds.count_label_predicate(&NonNegativeRating), 12);

    let hists = feature_histograms(&ds, &NonNegativeRating).unwrap();
    assert_eq!(hists.len(), 6);

    let systems = &hists[ds.feature_index("systems").unwrap()];
    assert_eq!(systems.when_true.total, 10);
    assert_eq!(systems.when_true.satisfying, 2);
    assert_eq!(systems.when_false.total, 10);
    assert_eq!(systems.when_false.satisfying, 10);

    for h in &hists {
        for side in [&h.when_true, &h.when_false] {
            assert_eq!(side.satisfying + side.not_satisfying, side.total);
        }
        assert_eq!(h.when_true.total + h.when_false.total, ds.size());
    }
}

#[test]
fn filtered_views_are_independent() {
    let ds = load_file(&fixture("course_ratings.txt")).unwrap();
    let easy = ds.feature_index("easy").unwrap();
    let ai = ds.feature_index("ai").unwrap();

    let easy_view = ds.filter(&rating_tree::FeatureEquals::new(easy, true));
    let easy_ai = easy_view.filter(&rating_tree::FeatureEquals::new(ai, true));

    assert!(easy_ai.size() <= easy_view.size());
    assert!(easy_ai
        .iter()
        .all(|dp| rating_tree::FeatureEquals::new(easy, true).matches(dp)));
    assert_eq!(ds.size(), 20);
}
