use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde_json::Value as JsonValue;

use super::error::LoadError;
use super::model::{CellValue, Column, Dataset, Record};

/// Cell texts read as missing values: pandas' default `na_values`.
const NA_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the sequence table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv` / `.txt` – comma-delimited, first row is the header
/// * `.json`         – `[{ "End Day": "Day 2", "End point seq": "High", ... }, ...]`
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" | "txt" => load_csv(path)?,
        "json" => load_json(path)?,
        other => return Err(LoadError::UnsupportedExtension(other.to_string())),
    };

    log::info!(
        "Loaded {} rows from {} with columns {:?}",
        dataset.len(),
        path.display(),
        dataset.columns
    );
    Ok(dataset)
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_cell(raw: &str) -> CellValue {
    if NA_MARKERS.contains(&raw) {
        CellValue::Missing
    } else {
        CellValue::Text(raw.to_string())
    }
}

// ---------------------------------------------------------------------------
// Header normalisation
// ---------------------------------------------------------------------------

/// Trim every header and disambiguate repeats the way pandas does:
/// the second `H` becomes `H.1`, the third `H.2`, ...
fn normalize_headers<'a>(raw: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut seen: BTreeMap<String, usize> = BTreeMap::new();
    raw.into_iter()
        .map(|h| {
            let h = h.trim().to_string();
            let n = seen.entry(h.clone()).or_insert(0);
            let name = if *n == 0 { h } else { format!("{h}.{n}") };
            *n += 1;
            name
        })
        .collect()
}

/// Map each known column to the header position it is read from.
fn resolve_columns(headers: &[String]) -> BTreeMap<Column, usize> {
    Column::ALL
        .into_iter()
        .filter_map(|col| {
            col.headers()
                .iter()
                .find_map(|alias| headers.iter().position(|h| h == alias))
                .map(|idx| (col, idx))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Dataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(BufReader::new(open(path)?));

    let headers = normalize_headers(reader.headers()?.iter());
    if headers.iter().all(|h| h.is_empty()) {
        return Err(LoadError::NoColumns);
    }

    let positions = resolve_columns(&headers);
    if positions.is_empty() {
        log::warn!("None of the headers {headers:?} match a known column");
    }

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result?;
        let mut record = Record::default();
        for (&col, &idx) in &positions {
            // Short rows leave trailing cells missing.
            if let Some(raw) = row.get(idx) {
                record.set(col, parse_cell(raw));
            }
        }
        records.push(record);
    }

    Ok(Dataset::from_records(
        records,
        positions.into_keys().collect(),
    ))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON (the default `df.to_json(orient='records')`).
fn load_json(path: &Path) -> Result<Dataset, LoadError> {
    let root: JsonValue = serde_json::from_reader(BufReader::new(open(path)?))?;

    let rows = root
        .as_array()
        .ok_or_else(|| LoadError::Malformed("expected a top-level JSON array".into()))?;

    let mut all_keys = BTreeSet::new();
    let mut columns = BTreeSet::new();
    let mut records = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .ok_or_else(|| LoadError::Malformed(format!("row {i} is not a JSON object")))?;

        let mut record = Record::default();
        for (key, val) in obj {
            let key = key.trim();
            all_keys.insert(key.to_string());
            let Some(col) = Column::from_header(key) else {
                continue;
            };
            columns.insert(col);
            record.set(col, json_to_cell(val));
        }
        records.push(record);
    }

    if all_keys.is_empty() {
        return Err(LoadError::NoColumns);
    }
    Ok(Dataset::from_records(records, columns))
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::Null => CellValue::Missing,
        JsonValue::String(s) => parse_cell(s),
        other => CellValue::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn temp_file(suffix: &str, content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        write!(file, "{content}").unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn csv_headers_are_trimmed() {
        let file = temp_file(
            ".csv",
            " Confirmation ,End Day,  End point seq\nYes,Day 2,High\nNo,Day 3,Low\n",
        );
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert!(ds.has_column(Column::Confirmation));
        assert!(ds.has_column(Column::EndPointSeq));
        assert_eq!(ds.records[0].confirmation.as_str(), Some("Yes"));
        assert_eq!(ds.records[1].end_point_seq.as_str(), Some("Low"));
    }

    #[test]
    fn duplicate_start_high_low_reads_second_occurrence() {
        let file = temp_file(
            ".csv",
            "Start High/Low,Start High/Low,End Day\nHigh,Low,Day 1\n",
        );
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.records[0].start_high_low.as_str(), Some("Low"));
    }

    #[test]
    fn single_start_high_low_is_used_directly() {
        let file = temp_file(".csv", "Start High/Low,End Day\nHigh,Day 1\n");
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.records[0].start_high_low.as_str(), Some("High"));
    }

    #[test]
    fn empty_and_na_cells_are_missing() {
        let file = temp_file(".csv", "Model,End Day,End High/Low\n,NaN,High\nRX\n");
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.records[0].model, CellValue::Missing);
        assert_eq!(ds.records[0].end_day, CellValue::Missing);
        assert_eq!(ds.records[1].end_day, CellValue::Missing);
        assert_eq!(ds.records[1].end_high_low, CellValue::Missing);
        assert_eq!(ds.distinct(Column::Model).len(), 1);
    }

    #[test]
    fn every_pandas_na_marker_is_missing() {
        let mut content = String::from("Model,End Day\n");
        for marker in NA_MARKERS {
            content.push_str(&format!("{marker},Day 1\n"));
        }
        content.push_str("n.a.,Day 1\n");
        let file = temp_file(".csv", &content);
        let ds = load_file(file.path()).unwrap();

        assert_eq!(ds.len(), NA_MARKERS.len() + 1);
        let (missing, kept) = ds.records.split_at(NA_MARKERS.len());
        assert!(missing.iter().all(|r| r.model == CellValue::Missing));
        assert_eq!(kept[0].model.as_str(), Some("n.a."));
        assert_eq!(ds.distinct(Column::Model), BTreeSet::from(["n.a.".to_string()]));
    }

    #[test]
    fn unknown_headers_are_ignored() {
        let file = temp_file(".csv", "Notes,Model\nfoo,RX\n");
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.columns, BTreeSet::from([Column::Model]));
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = load_file(Path::new("definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, LoadError::NotFound(_)));
    }

    #[test]
    fn empty_file_has_no_columns() {
        let file = temp_file(".csv", "");
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::NoColumns), "got {err:?}");
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let file = temp_file(".xlsx", "Model\nRX\n");
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedExtension(ext) if ext == "xlsx"));
    }

    #[test]
    fn json_records_load() {
        let file = temp_file(
            ".json",
            r#"[{"End Day": "Day 2", "End point seq": "High", "Model": null},
                {" End Day ": "Day 4", "End point seq": "Low", "Model": 7}]"#,
        );
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].model, CellValue::Missing);
        assert_eq!(ds.records[1].end_day.as_str(), Some("Day 4"));
        assert_eq!(ds.records[1].model.as_str(), Some("7"));
    }

    #[test]
    fn json_must_be_an_array_of_objects() {
        let file = temp_file(".json", r#"{"End Day": "Day 2"}"#);
        assert!(matches!(
            load_file(file.path()).unwrap_err(),
            LoadError::Malformed(_)
        ));

        let file = temp_file(".json", "[]");
        assert!(matches!(
            load_file(file.path()).unwrap_err(),
            LoadError::NoColumns
        ));
    }

    #[test]
    fn header_dedup_matches_pandas() {
        let headers = normalize_headers(["A", " A", "B", "A "]);
        assert_eq!(headers, vec!["A", "A.1", "B", "A.2"]);
    }
}
