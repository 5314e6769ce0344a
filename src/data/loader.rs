use std::path::Path;

use anyhow::{Context, Result};
use arrow::array::{
    Array, ArrayRef, Float32Array, Float64Array, Int32Array, Int64Array, LargeStringArray, StringArray,
};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::model::{LaunchDataset, LaunchRecord, Outcome};
use crate::error::DatasetError;

pub const COL_LAUNCH_SITE: &str = "Launch Site";
pub const COL_CLASS: &str = "class";
pub const COL_PAYLOAD_MASS: &str = "Payload Mass (kg)";
pub const COL_BOOSTER_CATEGORY: &str = "Booster Version Category";

const REQUIRED_COLUMNS: [&str; 4] = [
    COL_LAUNCH_SITE,
    COL_CLASS,
    COL_PAYLOAD_MASS,
    COL_BOOSTER_CATEGORY,
];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one launch per line (the usual export)
/// * `.json`    – `[{ "Launch Site": "...", "class": 1, ... }, ...]`
/// * `.parquet` – flat columns with the same names
///
/// Columns other than the four required ones are ignored.
pub fn load_file(path: &Path) -> Result<LaunchDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(DatasetError::UnsupportedExtension(other.to_string()).into()),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::info!(
        "Loaded {} launch records from {} ({} sites)",
        dataset.len(),
        path.display(),
        dataset.sites().len()
    );
    Ok(dataset)
}

fn check_columns(mut present: impl FnMut(&str) -> bool) -> Result<(), DatasetError> {
    match REQUIRED_COLUMNS.iter().find(|c| !present(**c)) {
        Some(missing) => Err(DatasetError::MissingColumn(missing.to_string())),
        None => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Launch Site")]
    launch_site: String,
    #[serde(rename = "class")]
    class: String,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass: f64,
    #[serde(rename = "Booster Version Category")]
    booster_version_category: String,
}

fn load_csv(path: &Path) -> Result<LaunchDataset> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .context("opening CSV")?;
    let headers = reader.headers().context("reading CSV headers")?.clone();
    check_columns(|col| headers.iter().any(|h| h == col))?;

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<CsvRow>().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        let outcome = Outcome::parse(&row.class, row_no)?;
        records.push(LaunchRecord::new(
            row_no,
            row.launch_site,
            outcome,
            row.payload_mass,
            row.booster_version_category,
        )?);
    }

    Ok(LaunchDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Launch Site": "CCAFS LC-40",
///     "class": 0,
///     "Payload Mass (kg)": 525.0,
///     "Booster Version Category": "v1.0"
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<LaunchDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = root.as_array().context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        check_columns(|col| obj.contains_key(col))?;

        let launch_site = json_string(&obj[COL_LAUNCH_SITE], i, COL_LAUNCH_SITE)?;
        let outcome = match &obj[COL_CLASS] {
            JsonValue::Number(n) => {
                let v = n
                    .as_f64()
                    .with_context(|| format!("Row {i}: '{COL_CLASS}' is not a number"))?;
                Outcome::from_f64(v, i)?
            }
            JsonValue::String(s) => Outcome::parse(s, i)?,
            other => {
                return Err(DatasetError::InvalidOutcome {
                    row: i,
                    value: other.to_string(),
                }
                .into())
            }
        };
        let payload_mass = obj[COL_PAYLOAD_MASS]
            .as_f64()
            .with_context(|| format!("Row {i}: '{COL_PAYLOAD_MASS}' is not a number"))?;
        let booster = json_string(&obj[COL_BOOSTER_CATEGORY], i, COL_BOOSTER_CATEGORY)?;

        records.push(LaunchRecord::new(i, launch_site, outcome, payload_mass, booster)?);
    }

    Ok(LaunchDataset::from_records(records))
}

fn json_string(val: &JsonValue, row: usize, col: &str) -> Result<String> {
    val.as_str()
        .map(str::to_string)
        .with_context(|| format!("Row {row}: '{col}' is not a string"))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one flat column per field.
///
/// Accepted column types:
/// - `Launch Site`, `Booster Version Category`: Utf8 / LargeUtf8
/// - `class`: Int32 / Int64 / Float64
/// - `Payload Mass (kg)`: Float64 / Float32 / Int64 / Int32
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<LaunchDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    let mut row_offset = 0;

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();
        check_columns(|col| schema.index_of(col).is_ok())?;

        let site_col = column(&batch, COL_LAUNCH_SITE)?;
        let class_col = column(&batch, COL_CLASS)?;
        let payload_col = column(&batch, COL_PAYLOAD_MASS)?;
        let booster_col = column(&batch, COL_BOOSTER_CATEGORY)?;

        for i in 0..batch.num_rows() {
            let row = row_offset + i;
            let launch_site = extract_string(site_col, i, row, COL_LAUNCH_SITE)?;
            let class = extract_f64(class_col, i, row, COL_CLASS)?;
            let outcome = Outcome::from_f64(class, row)?;
            let payload_mass = extract_f64(payload_col, i, row, COL_PAYLOAD_MASS)?;
            let booster = extract_string(booster_col, i, row, COL_BOOSTER_CATEGORY)?;

            records.push(LaunchRecord::new(row, launch_site, outcome, payload_mass, booster)?);
        }
        row_offset += batch.num_rows();
    }

    Ok(LaunchDataset::from_records(records))
}

// -- Parquet / Arrow helpers --

fn column<'b>(batch: &'b RecordBatch, name: &str) -> Result<&'b ArrayRef> {
    let idx = batch.schema().index_of(name)?;
    Ok(batch.column(idx))
}

fn unsupported(col: &ArrayRef, row: usize, column: &str) -> DatasetError {
    DatasetError::UnsupportedColumnType {
        row,
        column: column.to_string(),
        data_type: format!("{:?}", col.data_type()),
    }
}

/// Read a string cell; nulls become an empty string (rejected later for the
/// site column).
fn extract_string(col: &ArrayRef, i: usize, row: usize, column: &str) -> Result<String> {
    if col.is_null(i) {
        return Ok(String::new());
    }
    let value = match col.data_type() {
        DataType::Utf8 => col
            .as_any()
            .downcast_ref::<StringArray>()
            .map(|a| a.value(i).to_string()),
        DataType::LargeUtf8 => col
            .as_any()
            .downcast_ref::<LargeStringArray>()
            .map(|a| a.value(i).to_string()),
        _ => None,
    };
    value.ok_or_else(|| unsupported(col, row, column).into())
}

/// Read a numeric cell as `f64`; nulls become NaN (rejected by validation).
fn extract_f64(col: &ArrayRef, i: usize, row: usize, column: &str) -> Result<f64> {
    if col.is_null(i) {
        return Ok(f64::NAN);
    }
    let any = col.as_any();
    let value = match col.data_type() {
        DataType::Float64 => any.downcast_ref::<Float64Array>().map(|a| a.value(i)),
        DataType::Float32 => any.downcast_ref::<Float32Array>().map(|a| a.value(i) as f64),
        DataType::Int64 => any.downcast_ref::<Int64Array>().map(|a| a.value(i) as f64),
        DataType::Int32 => any.downcast_ref::<Int32Array>().map(|a| a.value(i) as f64),
        _ => None,
    };
    value.ok_or_else(|| unsupported(col, row, column).into())
}
