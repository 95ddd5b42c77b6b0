use crate::error::{EtlError, Result};
use csv::{ByteRecord, ReaderBuilder};
use shared::models::{Record, Table, Value};
use shared::utils::{parse_finite, unique_column_name};
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

/// Cell contents that mean "no value" in the spreadsheet exports we receive.
pub const NA_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND",
    "1.#QNAN", "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn is_na(raw: &str) -> bool {
    NA_TOKENS.contains(&raw) || NA_TOKENS.contains(&raw.trim())
}

pub fn infer_value(raw: &str) -> Value {
    if is_na(raw) {
        return Value::Missing;
    }
    match parse_finite(raw) {
        Some(n) => Value::Number(n),
        None => Value::Text(raw.to_string()),
    }
}

/// Reads a cell of a column that is never numeric, such as an identifier:
/// `007` stays `007`.
pub fn text_value(raw: &str) -> Value {
    if is_na(raw) {
        Value::Missing
    } else {
        Value::Text(raw.to_string())
    }
}

/// Makes header names unique ignoring case, as Excel tables require: repeats
/// get `.1`, `.2`, ... and blank headers become `Unnamed: <index>`.
pub fn unique_headers<'a, I>(headers: I) -> Vec<String>
where
    I: IntoIterator<Item = Cow<'a, str>>,
{
    let mut columns: Vec<String> = Vec::new();
    for (idx, header) in headers.into_iter().enumerate() {
        let base = if header.trim().is_empty() {
            format!("Unnamed: {}", idx)
        } else {
            header.into_owned()
        };
        let name = unique_column_name(&columns, &base);
        columns.push(name);
    }
    columns
}

pub struct CsvTableParser;

impl CsvTableParser {
    /// Loads `path`. Columns named in `text_columns` keep their raw text;
    /// every other cell is typed on its own.
    pub fn load_table(path: &Path, delimiter: u8, text_columns: &[String]) -> Result<Table> {
        let file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => EtlError::MissingSource {
                path: path.to_path_buf(),
            },
            _ => EtlError::from(e),
        })?;
        Self::read_table(BufReader::new(file), delimiter, text_columns)
    }

    // Cells are decoded lossily: exports saved as Latin-1 keep their rows and
    // only the offending characters are replaced.
    pub fn read_table<R: Read>(reader: R, delimiter: u8, text_columns: &[String]) -> Result<Table> {
        let mut rdr = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = rdr.byte_headers()?.clone();
        if headers.is_empty() || (headers.len() == 1 && headers[0].is_empty()) {
            return Err(EtlError::CsvDataFormatError(
                "No columns to parse from file".to_string(),
            ));
        }
        let columns = unique_headers(headers.iter().map(String::from_utf8_lossy));
        let width = columns.len();
        let is_text: Vec<bool> = columns.iter().map(|c| text_columns.contains(c)).collect();
        let mut table = Table::new(columns);

        let mut record = ByteRecord::new();
        let mut line = 1;
        while rdr.read_byte_record(&mut record)? {
            line = record.position().map_or(line + 1, |p| p.line());
            if record.len() > width {
                return Err(EtlError::CsvDataFormatError(format!(
                    "Expected {} fields in line {}, saw {}",
                    width,
                    line,
                    record.len()
                )));
            }
            let values = record
                .iter()
                .zip(&is_text)
                .map(|(field, text)| {
                    let raw = String::from_utf8_lossy(field);
                    if *text {
                        text_value(&raw)
                    } else {
                        infer_value(&raw)
                    }
                })
                .collect();
            table.push(Record::new(values));
        }
        Ok(table)
    }
}
