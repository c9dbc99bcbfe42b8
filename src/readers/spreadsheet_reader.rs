use crate::error::{ProcessingError, Result};
use crate::readers::Table;
use crate::utils::constants::SPREADSHEET_EXTENSIONS;
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;
use tracing::debug;

/// Reads one worksheet of an Excel/OpenDocument workbook into a [`Table`].
pub struct SpreadsheetReader {
    sheet: Option<String>,
}

impl SpreadsheetReader {
    pub fn new() -> Self {
        Self { sheet: None }
    }

    /// Read the named worksheet instead of the first one
    pub fn with_sheet(sheet: &str) -> Self {
        Self {
            sheet: Some(sheet.to_string()),
        }
    }

    /// Read the worksheet: first row of the used range is the header, every
    /// later row a record. Rows with only empty cells are dropped.
    pub fn read_table(&self, path: &Path) -> Result<Table> {
        let mut workbook = open_workbook_auto(path)?;
        let sheet_names = workbook.sheet_names();

        let sheet_name = match &self.sheet {
            Some(wanted) => sheet_names
                .iter()
                .find(|name| *name == wanted)
                .cloned()
                .ok_or_else(|| {
                    ProcessingError::InvalidFormat(format!(
                        "Sheet '{}' not found (available: {})",
                        wanted,
                        sheet_names.join(", ")
                    ))
                })?,
            None => sheet_names.first().cloned().ok_or_else(|| {
                ProcessingError::InvalidFormat("Workbook has no sheets".to_string())
            })?,
        };

        let range = workbook.worksheet_range(&sheet_name)?;
        let mut rows = range.rows();

        let headers: Vec<String> = match rows.next() {
            Some(header_row) => header_row.iter().map(cell_text).collect(),
            None => Vec::new(),
        };
        if headers.iter().all(|h| h.is_empty()) {
            return Err(ProcessingError::InvalidFormat(format!(
                "Sheet '{}' has no header row",
                sheet_name
            )));
        }

        let rows: Vec<Vec<String>> = rows
            .map(|row| row.iter().map(cell_text).collect::<Vec<_>>())
            .filter(|cells| cells.iter().any(|cell| !cell.trim().is_empty()))
            .collect();

        debug!(
            path = %path.display(),
            sheet = %sheet_name,
            columns = headers.len(),
            rows = rows.len(),
            "parsed worksheet"
        );

        Ok(Table::new(headers, rows))
    }
}

impl Default for SpreadsheetReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether `path` has a workbook extension (case-insensitive).
pub fn is_spreadsheet(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            SPREADSHEET_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

/// Text form of a worksheet cell. Whole floats print without a fraction
/// (`650000`), empty and error cells become blank.
pub fn cell_text(value: &Data) -> String {
    match value {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.as_f64().to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
    }
}
