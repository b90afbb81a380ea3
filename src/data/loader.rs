use std::fs::File;
use std::io::{BufRead, BufReader, Read, Write};
use std::path::Path;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::model::{Datapoint, Dataset};
use crate::config::LoadOptions;
use crate::error::{DatasetError, Result};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a rating table with default [`LoadOptions`].
pub fn load_file(path: &Path) -> Result<Dataset> {
    load_file_with(path, &LoadOptions::default())
}

/// Load a rating table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – comma-separated rating table
/// * `.json` – `{ "feature_names": [...], "datapoints": [{ "label", "features" }] }`
/// * anything else – whitespace-separated rating table
///
/// The file is closed on every exit path. A schema violation anywhere in
/// the source aborts the whole load.
pub fn load_file_with(path: &Path, options: &LoadOptions) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    debug!("loading rating table {} (.{ext})", path.display());
    let file = File::open(path)?;

    let dataset = match ext.as_str() {
        "csv" => parse_csv(file, options)?,
        "json" => parse_json(file, options)?,
        _ => parse_rating_table(BufReader::new(file), options)?,
    };

    info!(
        "loaded {} datapoints with {} features from {}",
        dataset.size(),
        dataset.feature_count(),
        path.display()
    );
    Ok(dataset)
}

/// Decode a feature token: `y` in any case is `true`, everything else `false`.
pub fn decode_feature(token: &str) -> bool {
    token.eq_ignore_ascii_case("y")
}

// ---------------------------------------------------------------------------
// Shared row assembly
// ---------------------------------------------------------------------------

/// Accumulates rows against the schema declared by a header line.
struct TableBuilder<'a> {
    options: &'a LoadOptions,
    feature_names: Vec<String>,
    datapoints: Vec<Datapoint>,
}

impl<'a> TableBuilder<'a> {
    fn from_header<'t>(
        line: usize,
        mut tokens: impl Iterator<Item = &'t str>,
        options: &'a LoadOptions,
    ) -> Result<Self> {
        match tokens.next() {
            Some(marker) if marker == options.header_marker => {}
            Some(other) => {
                return Err(DatasetError::schema(
                    line,
                    format!(
                        "header must start with '{}', found '{other}'",
                        options.header_marker
                    ),
                ));
            }
            None => return Err(DatasetError::schema(line, "empty header")),
        }
        Ok(Self {
            options,
            feature_names: tokens.map(str::to_string).collect(),
            datapoints: Vec::new(),
        })
    }

    fn push_row(&mut self, line: usize, tokens: &[&str]) -> Result<()> {
        let expected = self.feature_names.len() + 1;
        if tokens.len() != expected {
            return Err(DatasetError::schema(
                line,
                format!("expected {expected} tokens, found {}", tokens.len()),
            ));
        }

        let label = tokens[0];
        self.check_label(line, label);

        let features = tokens[1..]
            .iter()
            .enumerate()
            .map(|(j, tok)| {
                if self.options.report_unexpected_tokens
                    && !tok.eq_ignore_ascii_case("y")
                    && !tok.eq_ignore_ascii_case("n")
                {
                    warn!(
                        "line {line}: feature '{}' has token '{tok}', reading as false",
                        self.feature_names[j]
                    );
                }
                decode_feature(tok)
            })
            .collect();

        self.datapoints.push(Datapoint::new(features, label));
        Ok(())
    }

    fn check_label(&self, line: usize, label: &str) {
        if !self.options.label_known(label) {
            warn!("line {line}: label '{label}' is not in the configured vocabulary");
        }
    }

    fn finish(self) -> Result<Dataset> {
        Dataset::new(self.feature_names, self.datapoints)
    }
}

// ---------------------------------------------------------------------------
// Whitespace table
// ---------------------------------------------------------------------------

/// Parse a whitespace-separated rating table.
///
/// ```text
/// Rating f1 f2
/// +1 y n
/// -2 n n
/// ```
///
/// The first line is the header; blank lines after it are skipped.
pub fn parse_rating_table<R: BufRead>(reader: R, options: &LoadOptions) -> Result<Dataset> {
    let mut lines = reader.lines();

    let header = match lines.next() {
        Some(line) => line?,
        None => return Err(DatasetError::schema(1, "missing header")),
    };
    let mut table = TableBuilder::from_header(1, header.split_whitespace(), options)?;

    for (i, line) in lines.enumerate() {
        let line = line?;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }
        table.push_row(i + 2, &tokens)?;
    }

    table.finish()
}

/// Parse a whitespace rating table held in memory, with default options.
pub fn parse_rating_str(text: &str) -> Result<Dataset> {
    parse_rating_table(text.as_bytes(), &LoadOptions::default())
}

/// Reject labels and feature names that would not survive a re-parse.
fn check_writable(dataset: &Dataset) -> Result<()> {
    let unsplittable = |token: &str| !token.is_empty() && !token.contains(char::is_whitespace);

    if let Some(name) = dataset.feature_names().iter().find(|n| !unsplittable(n.as_str())) {
        return Err(DatasetError::schema(
            1,
            format!("feature name '{name}' is empty or contains whitespace"),
        ));
    }
    if let Some((row, dp)) = dataset
        .iter()
        .enumerate()
        .find(|(_, dp)| !unsplittable(dp.label()))
    {
        return Err(DatasetError::schema(
            row + 2,
            format!("label '{}' is empty or contains whitespace", dp.label()),
        ));
    }
    Ok(())
}

/// Write `dataset` as a whitespace rating table (`y`/`n` feature tokens).
///
/// Nothing is written if a label or feature name is empty or contains
/// whitespace.
pub fn write_rating_table<W: Write>(dataset: &Dataset, mut writer: W) -> Result<()> {
    check_writable(dataset)?;

    write!(writer, "Rating")?;
    for name in dataset.feature_names() {
        write!(writer, " {name}")?;
    }
    writeln!(writer)?;

    for dp in dataset.iter() {
        write!(writer, "{}", dp.label())?;
        for &value in dp.features() {
            write!(writer, " {}", if value { 'y' } else { 'n' })?;
        }
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}

// ---------------------------------------------------------------------------
// CSV table
// ---------------------------------------------------------------------------

/// Parse a comma-separated rating table (same layout as the whitespace form).
pub fn parse_csv<R: Read>(reader: R, options: &LoadOptions) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = reader.records();
    let header = match records.next() {
        Some(record) => record?,
        None => return Err(DatasetError::schema(1, "missing header")),
    };
    let header_line = header.position().map_or(1, |p| p.line() as usize);
    let mut table = TableBuilder::from_header(header_line, header.iter(), options)?;

    for record in records {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line() as usize);
        let tokens: Vec<&str> = record.iter().collect();
        table.push_row(line, &tokens)?;
    }

    table.finish()
}

/// Write `dataset` as a comma-separated rating table, as read by [`parse_csv`].
pub fn write_csv<W: Write>(dataset: &Dataset, writer: W) -> Result<()> {
    check_writable(dataset)?;

    let mut writer = csv::Writer::from_writer(writer);
    let mut header = vec!["Rating"];
    header.extend(dataset.feature_names().iter().map(String::as_str));
    writer.write_record(&header)?;

    for dp in dataset.iter() {
        let mut row = vec![dp.label()];
        row.extend(dp.features().iter().map(|&v| if v { "y" } else { "n" }));
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

// ---------------------------------------------------------------------------
// JSON table
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct DatasetRecord {
    feature_names: Vec<String>,
    datapoints: Vec<Datapoint>,
}

#[derive(Serialize)]
struct DatasetRecordRef<'a> {
    feature_names: &'a [String],
    datapoints: Vec<&'a Datapoint>,
}

/// Parse a JSON dataset. Feature values are already booleans here, so no
/// token decoding happens; row widths and labels are checked as for text.
pub fn parse_json<R: Read>(reader: R, options: &LoadOptions) -> Result<Dataset> {
    let record: DatasetRecord = serde_json::from_reader(reader)?;
    let dataset = Dataset::new(record.feature_names, record.datapoints)?;

    for (row, dp) in dataset.iter().enumerate() {
        if !options.label_known(dp.label()) {
            warn!(
                "datapoint {row}: label '{}' is not in the configured vocabulary",
                dp.label()
            );
        }
    }
    Ok(dataset)
}

/// Write `dataset` in the JSON layout read by [`parse_json`].
pub fn write_json<W: Write>(dataset: &Dataset, mut writer: W) -> Result<()> {
    let record = DatasetRecordRef {
        feature_names: dataset.feature_names(),
        datapoints: dataset.iter().collect(),
    };
    serde_json::to_writer_pretty(&mut writer, &record)?;
    writer.flush()?;
    Ok(())
}
