use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::util::display::array_value_to_string;
use calamine::{Data, Range, Reader, open_workbook_auto};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::ingest::RawTable;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a sieve table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv` / `.txt` – header row, delimiter `;`, tab or `,` (sniffed)
/// * `.json`        – `[[sieve, opening, mass], ...]` or
///                    `{ "columns": [...], "rows": [[...], ...] }`
/// * `.parquet`     – any schema; the first three fields are used
/// * `.xls` / `.xlsx` / `.ods` – first worksheet, first row is the header
pub fn load_file(path: &Path) -> Result<RawTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" | "txt" => {
            let mut text = String::new();
            File::open(path)
                .context("opening CSV")?
                .read_to_string(&mut text)
                .context("reading CSV as UTF-8")?;
            parse_csv(&text)
        }
        "json" => {
            let text = std::fs::read_to_string(path).context("reading JSON file")?;
            parse_json(&text)
        }
        "parquet" | "pq" => load_parquet(path),
        "xls" | "xlsx" | "xlsm" | "ods" => load_spreadsheet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Pick the field delimiter from the header line.
///
/// Spreadsheets in locales with a decimal comma export `;`-separated files,
/// so a `;` anywhere in the header wins over `,`.
pub fn sniff_delimiter(header_line: &str) -> u8 {
    if header_line.contains(';') {
        b';'
    } else if header_line.contains('\t') {
        b'\t'
    } else {
        b','
    }
}

/// A `,`-delimited row longer than its header most likely holds an unquoted
/// decimal comma (`4,4,75,0`), which shifts every following cell.
pub fn suspect_decimal_comma(delimiter: u8, header_len: usize, row_len: usize) -> bool {
    delimiter == b',' && header_len > 0 && row_len > header_len
}

/// CSV layout: one header row, then one row per sieve.
fn parse_csv(text: &str) -> Result<RawTable> {
    let text = text.trim_start_matches('\u{feff}');
    let header_line = text.lines().next().unwrap_or("");
    let delimiter = sniff_delimiter(header_line);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        if record.iter().all(|c| c.is_empty()) {
            continue;
        }
        if suspect_decimal_comma(delimiter, headers.len(), record.len()) {
            log::warn!(
                "CSV row {row_no} has {} cells but the header has {}; \
                 an unquoted decimal comma may have split a value",
                record.len(),
                headers.len()
            );
        }
        rows.push(record.iter().map(|c| c.to_string()).collect());
    }

    Ok(RawTable::new(headers, rows))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Accepted JSON shapes:
///
/// ```json
/// [[4, 4.75, 0], [10, 2.0, 20]]
/// ```
///
/// ```json
/// { "columns": ["Sieve", "Opening", "Mass"], "rows": [[4, 4.75, 0]] }
/// ```
fn parse_json(text: &str) -> Result<RawTable> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;

    let (headers, records) = match &root {
        JsonValue::Array(records) => (Vec::new(), records),
        JsonValue::Object(obj) => {
            let headers = match obj.get("columns") {
                Some(cols) => cols
                    .as_array()
                    .context("'columns' must be an array")?
                    .iter()
                    .map(json_to_cell)
                    .collect(),
                None => Vec::new(),
            };
            let records = obj
                .get("rows")
                .and_then(|r| r.as_array())
                .context("Expected a 'rows' array")?;
            (headers, records)
        }
        _ => bail!("Expected a JSON array of rows or an object with 'rows'"),
    };

    let rows = records
        .iter()
        .enumerate()
        .map(|(i, rec)| {
            rec.as_array()
                .map(|cells| cells.iter().map(json_to_cell).collect())
                .with_context(|| format!("Row {i} is not a JSON array"))
        })
        .collect::<Result<Vec<Vec<String>>>>()?;

    Ok(RawTable::new(headers, rows))
}

fn json_to_cell(val: &JsonValue) -> String {
    match val {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file written by Pandas (`df.to_parquet()`) or Polars.
///
/// Columns may be numeric or text; every cell is rendered to text and
/// interpreted later, exactly like CSV cells.
fn load_parquet(path: &Path) -> Result<RawTable> {
    let file = File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        for row in 0..batch.num_rows() {
            let cells = batch
                .columns()
                .iter()
                .map(|col| {
                    if col.is_null(row) {
                        Ok(String::new())
                    } else {
                        array_value_to_string(col, row)
                            .with_context(|| format!("Row {}: unreadable cell", rows.len()))
                    }
                })
                .collect::<Result<Vec<String>>>()?;
            rows.push(cells);
        }
    }

    Ok(RawTable::new(headers, rows))
}

// ---------------------------------------------------------------------------
// Spreadsheet loader
// ---------------------------------------------------------------------------

/// Load the first worksheet of an Excel or OpenDocument workbook.
fn load_spreadsheet(path: &Path) -> Result<RawTable> {
    let mut workbook = open_workbook_auto(path).context("opening workbook")?;
    let range = workbook
        .worksheet_range_at(0)
        .context("workbook has no worksheets")?
        .context("reading first worksheet")?;
    Ok(range_to_table(&range))
}

/// First non-empty row becomes the header; blank rows are skipped.
fn range_to_table(range: &Range<Data>) -> RawTable {
    let mut rows = range
        .rows()
        .map(|row| row.iter().map(spreadsheet_cell).collect::<Vec<String>>())
        .filter(|cells| cells.iter().any(|c| !c.is_empty()));

    let headers = rows.next().unwrap_or_default();
    RawTable::new(headers, rows.collect())
}

fn spreadsheet_cell(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::{Float64Array, StringArray};
    use arrow::datatypes::{DataType, Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    use super::*;
    use crate::data::ingest::parse_decimal;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn sniffs_delimiters() {
        assert_eq!(sniff_delimiter("Peneira;Abertura;Massa"), b';');
        assert_eq!(sniff_delimiter("a\tb\tc"), b'\t');
        assert_eq!(sniff_delimiter("a,b,c"), b',');
    }

    #[test]
    fn semicolon_csv_with_decimal_comma() {
        let file = write_temp(
            ".csv",
            "Peneira;Abertura;Massa Retida\n4;4,75;0\n10;2,00;20\n\n20;0,85;40\n",
        );
        let table = load_file(file.path()).unwrap();
        assert_eq!(table.headers, vec!["Peneira", "Abertura", "Massa Retida"]);
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.rows[1], vec!["10", "2,00", "20"]);
    }

    #[test]
    fn comma_csv_with_ragged_rows() {
        let file = write_temp(".csv", "\u{feff}Sieve,Opening,Mass\n4, 4.75 ,0\n10,2.00\n");
        let table = load_file(file.path()).unwrap();
        assert_eq!(table.headers[0], "Sieve");
        assert_eq!(table.rows[0], vec!["4", "4.75", "0"]);
        assert_eq!(table.rows[1].len(), 2);
    }

    #[test]
    fn flags_rows_split_by_decimal_comma() {
        assert!(suspect_decimal_comma(b',', 3, 4));
        assert!(!suspect_decimal_comma(b',', 3, 3));
        assert!(!suspect_decimal_comma(b';', 3, 4));
        assert!(!suspect_decimal_comma(b',', 0, 4));
    }

    #[test]
    fn comma_csv_with_unquoted_decimal_comma_is_still_loaded() {
        let file = write_temp(".csv", "Sieve,Opening,Mass\n4,4,75,0\n");
        let table = load_file(file.path()).unwrap();
        assert_eq!(table.rows[0], vec!["4", "4", "75", "0"]);
    }

    #[test]
    fn json_array_of_rows() {
        let table = parse_json(r#"[[4, 4.75, 0], ["Pan", 0, null]]"#).unwrap();
        assert!(table.headers.is_empty());
        assert_eq!(table.rows[0], vec!["4", "4.75", "0"]);
        assert_eq!(table.rows[1], vec!["Pan", "0", ""]);
    }

    #[test]
    fn json_object_with_columns() {
        let table = parse_json(r#"{"columns": ["Sieve", "Opening", "Mass"], "rows": [[10, 2.0, 20]]}"#)
            .unwrap();
        assert_eq!(table.headers, vec!["Sieve", "Opening", "Mass"]);
        assert_eq!(table.rows[0], vec!["10", "2.0", "20"]);
    }

    #[test]
    fn json_rejects_non_array_row() {
        assert!(parse_json(r#"[[4, 4.75, 0], {"a": 1}]"#).is_err());
        assert!(parse_json("42").is_err());
    }

    #[test]
    fn parquet_table() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("sieve", DataType::Utf8, false),
            Field::new("opening_mm", DataType::Float64, false),
            Field::new("retained_g", DataType::Float64, true),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["4", "10"])),
                Arc::new(Float64Array::from(vec![4.75, 2.0])),
                Arc::new(Float64Array::from(vec![Some(0.0), None])),
            ],
        )
        .unwrap();

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let table = load_file(file.path()).unwrap();
        assert_eq!(table.headers, vec!["sieve", "opening_mm", "retained_g"]);
        assert_eq!(table.rows[0][0], "4");
        assert_eq!(parse_decimal(&table.rows[0][1]), Some(4.75));
        assert_eq!(parse_decimal(&table.rows[0][2]), Some(0.0));
        assert_eq!(table.rows[1][2], "");
    }

    #[test]
    fn spreadsheet_range_to_table() {
        let mut range = Range::new((0, 0), (4, 3));
        range.set_value((0, 0), Data::String("Peneira".into()));
        range.set_value((0, 1), Data::String("Abertura".into()));
        range.set_value((0, 2), Data::String("Massa Retida".into()));
        range.set_value((1, 0), Data::Int(4));
        range.set_value((1, 1), Data::Float(4.75));
        range.set_value((1, 2), Data::Float(0.0));
        range.set_value((3, 0), Data::String(" Pan ".into()));
        range.set_value((3, 1), Data::String("0,075".into()));
        range.set_value((3, 2), Data::Float(12.5));

        let table = range_to_table(&range);
        assert_eq!(table.headers, vec!["Peneira", "Abertura", "Massa Retida", ""]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0][..3], ["4", "4.75", "0"]);
        assert_eq!(table.rows[1][..3], ["Pan", "0,075", "12.5"]);
    }

    #[test]
    fn missing_workbook_is_an_error() {
        let err = load_file(Path::new("/nonexistent/sieves.xlsx")).unwrap_err();
        assert!(format!("{err:#}").contains("opening workbook"));
    }

    #[test]
    fn unsupported_extension() {
        let err = load_file(Path::new("results.docx")).unwrap_err();
        assert!(err.to_string().contains(".docx"));
    }
}
