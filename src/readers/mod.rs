pub mod column_map;
pub mod spreadsheet_reader;
pub mod table_reader;

pub use column_map::{detect_name_column, ColumnMap};
pub use spreadsheet_reader::{is_spreadsheet, SpreadsheetReader};
pub use table_reader::{decode_text, sniff_delimiter, Table, TableReader};

use crate::error::Result;
use std::path::Path;

/// Read `path` as a workbook or as delimited text, by file extension.
///
/// `sheet` only applies to workbooks, `delimiter` only to text files.
pub fn read_input_table(
    path: &Path,
    delimiter: Option<u8>,
    sheet: Option<&str>,
) -> Result<Table> {
    if is_spreadsheet(path) {
        let reader = match sheet {
            Some(name) => SpreadsheetReader::with_sheet(name),
            None => SpreadsheetReader::new(),
        };
        return reader.read_table(path);
    }

    let reader = match delimiter {
        Some(delimiter) => TableReader::with_delimiter(delimiter),
        None => TableReader::new(),
    };
    reader.read_table(path)
}
