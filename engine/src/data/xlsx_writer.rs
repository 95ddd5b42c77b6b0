use crate::error::{EtlError, Result};
use crate::parsing::dates::format_date;
use rust_xlsxwriter::{Table as XlsxTable, TableColumn, TableStyle, Workbook, Worksheet};
use shared::models::{Table, Value};
use std::fmt;
use std::path::Path;

/// Presentation of the output sheet: a named Excel table with banded rows
/// and banded columns.
#[derive(Clone)]
pub struct TableOptions {
    pub name: String,
    pub style: TableStyle,
}

// TableStyle has no Debug impl.
impl fmt::Debug for TableOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableOptions")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Maps a style name as Excel shows it ("TableStyleMedium9", or just "Medium9").
pub fn table_style(name: &str) -> Result<TableStyle> {
    let short = name.trim().strip_prefix("TableStyle").unwrap_or(name.trim());
    let style = match short {
        "None" => TableStyle::None,
        "Light1" => TableStyle::Light1,
        "Light2" => TableStyle::Light2,
        "Light3" => TableStyle::Light3,
        "Light4" => TableStyle::Light4,
        "Light5" => TableStyle::Light5,
        "Light6" => TableStyle::Light6,
        "Light7" => TableStyle::Light7,
        "Light8" => TableStyle::Light8,
        "Light9" => TableStyle::Light9,
        "Light10" => TableStyle::Light10,
        "Light11" => TableStyle::Light11,
        "Light12" => TableStyle::Light12,
        "Light13" => TableStyle::Light13,
        "Light14" => TableStyle::Light14,
        "Light15" => TableStyle::Light15,
        "Light16" => TableStyle::Light16,
        "Light17" => TableStyle::Light17,
        "Light18" => TableStyle::Light18,
        "Light19" => TableStyle::Light19,
        "Light20" => TableStyle::Light20,
        "Light21" => TableStyle::Light21,
        "Medium1" => TableStyle::Medium1,
        "Medium2" => TableStyle::Medium2,
        "Medium3" => TableStyle::Medium3,
        "Medium4" => TableStyle::Medium4,
        "Medium5" => TableStyle::Medium5,
        "Medium6" => TableStyle::Medium6,
        "Medium7" => TableStyle::Medium7,
        "Medium8" => TableStyle::Medium8,
        "Medium9" => TableStyle::Medium9,
        "Medium10" => TableStyle::Medium10,
        "Medium11" => TableStyle::Medium11,
        "Medium12" => TableStyle::Medium12,
        "Medium13" => TableStyle::Medium13,
        "Medium14" => TableStyle::Medium14,
        "Medium15" => TableStyle::Medium15,
        "Medium16" => TableStyle::Medium16,
        "Medium17" => TableStyle::Medium17,
        "Medium18" => TableStyle::Medium18,
        "Medium19" => TableStyle::Medium19,
        "Medium20" => TableStyle::Medium20,
        "Medium21" => TableStyle::Medium21,
        "Medium22" => TableStyle::Medium22,
        "Medium23" => TableStyle::Medium23,
        "Medium24" => TableStyle::Medium24,
        "Medium25" => TableStyle::Medium25,
        "Medium26" => TableStyle::Medium26,
        "Medium27" => TableStyle::Medium27,
        "Medium28" => TableStyle::Medium28,
        "Dark1" => TableStyle::Dark1,
        "Dark2" => TableStyle::Dark2,
        "Dark3" => TableStyle::Dark3,
        "Dark4" => TableStyle::Dark4,
        "Dark5" => TableStyle::Dark5,
        "Dark6" => TableStyle::Dark6,
        "Dark7" => TableStyle::Dark7,
        "Dark8" => TableStyle::Dark8,
        "Dark9" => TableStyle::Dark9,
        "Dark10" => TableStyle::Dark10,
        "Dark11" => TableStyle::Dark11,
        _ => {
            return Err(EtlError::ConfigError(format!("Unknown table style '{}'", name)));
        }
    };
    Ok(style)
}

pub struct XlsxTableWriter;

impl XlsxTableWriter {
    pub fn write_table(table: &Table, path: &Path, options: &TableOptions) -> Result<()> {
        let mut workbook = Self::build_workbook(table, options)?;
        workbook.save(path)?;
        Ok(())
    }

    /// Lays the table out on a single worksheet: header row, then one row per record.
    pub fn build_workbook(table: &Table, options: &TableOptions) -> Result<Workbook> {
        if table.columns().is_empty() {
            return Err(EtlError::ProcessingError(
                "Cannot write a table without columns".to_string(),
            ));
        }
        let last_col = u16::try_from(table.columns().len() - 1).map_err(|_| {
            EtlError::ProcessingError(format!("Too many columns: {}", table.columns().len()))
        })?;
        // Excel tables need at least one data row, even if it stays blank.
        let last_row = u32::try_from(table.len().max(1)).map_err(|_| {
            EtlError::ProcessingError(format!("Too many rows: {}", table.len()))
        })?;

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        for (row_idx, record) in table.records().iter().enumerate() {
            let row = row_idx as u32 + 1;
            for (col_idx, value) in record.values().iter().enumerate().take(table.columns().len()) {
                Self::write_cell(worksheet, row, col_idx as u16, value)?;
            }
        }

        let columns: Vec<TableColumn> = table
            .columns()
            .iter()
            .map(|name| TableColumn::new().set_header(name))
            .collect();
        let xlsx_table = XlsxTable::new()
            .set_name(&options.name)
            .set_style(options.style)
            .set_banded_rows(true)
            .set_banded_columns(true)
            .set_first_column(false)
            .set_last_column(false)
            .set_columns(&columns);
        worksheet.add_table(0, 0, last_row, last_col, &xlsx_table)?;
        worksheet.autofit();

        Ok(workbook)
    }

    fn write_cell(worksheet: &mut Worksheet, row: u32, col: u16, value: &Value) -> Result<()> {
        match value {
            Value::Text(s) => {
                worksheet.write_string(row, col, s)?;
            }
            Value::Number(n) => {
                worksheet.write_number(row, col, *n)?;
            }
            Value::Date(d) => {
                worksheet.write_string(row, col, format_date(*d))?;
            }
            Value::Missing => {}
        }
        Ok(())
    }
}
