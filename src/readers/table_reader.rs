use crate::error::{ProcessingError, Result};
use crate::utils::constants::CANDIDATE_DELIMITERS;
use csv::ReaderBuilder;
use encoding_rs::WINDOWS_1252;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Parsed delimited-text table: a header row and string cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Cell at `(row, column)`; `None` for ragged rows shorter than the header.
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map(|s| s.as_str())
    }
}

pub struct TableReader {
    delimiter: Option<u8>,
}

impl TableReader {
    pub fn new() -> Self {
        Self { delimiter: None }
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self {
            delimiter: Some(delimiter),
        }
    }

    /// Read a CSV/TSV file into a table
    pub fn read_table(&self, path: &Path) -> Result<Table> {
        let bytes = fs::read(path)?;
        let content = decode_text(&bytes);
        debug!(path = %path.display(), bytes = bytes.len(), "read input file");
        self.parse_table(&content)
    }

    /// Parse already-decoded delimited text
    pub fn parse_table(&self, content: &str) -> Result<Table> {
        let delimiter = self
            .delimiter
            .unwrap_or_else(|| sniff_delimiter(content));

        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(content.as_bytes());

        let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
        if headers.iter().all(|h| h.is_empty()) {
            return Err(ProcessingError::InvalidFormat(
                "Input has no header row".to_string(),
            ));
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            // Fully empty lines carry no row
            if record.iter().all(|cell| cell.trim().is_empty()) && record.len() <= 1 {
                continue;
            }
            rows.push(record.iter().map(|cell| cell.to_string()).collect());
        }

        debug!(
            columns = headers.len(),
            rows = rows.len(),
            delimiter = %(delimiter as char).escape_default(),
            "parsed table"
        );

        Ok(Table::new(headers, rows))
    }
}

impl Default for TableReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode file bytes as UTF-8 (BOM stripped), falling back to Windows-1252
/// for legacy spreadsheet exports.
pub fn decode_text(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            let (text, _, _) = WINDOWS_1252.decode(bytes);
            text.into_owned()
        }
    }
}

/// Pick the candidate delimiter occurring most often in the header line;
/// comma wins ties and headers without any candidate.
pub fn sniff_delimiter(content: &str) -> u8 {
    let header = content.lines().next().unwrap_or("");
    let mut best = CANDIDATE_DELIMITERS[0];
    let mut best_count = 0;
    for &candidate in CANDIDATE_DELIMITERS.iter() {
        let count = header.bytes().filter(|&b| b == candidate).count();
        if count > best_count {
            best = candidate;
            best_count = count;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_comma_table() {
        let reader = TableReader::new();
        let table = reader
            .parse_table("Nome Grotta,Est,Nord\nGrotta A,650000,4850000\nGrotta B,651500,4851000\n")
            .unwrap();

        assert_eq!(table.headers, vec!["Nome Grotta", "Est", "Nord"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.cell(1, 0), Some("Grotta B"));
        assert_eq!(table.cell(0, 2), Some("4850000"));
    }

    #[test]
    fn test_sniff_delimiter() {
        assert_eq!(sniff_delimiter("Est;Nord;Quota\n1;2;3"), b';');
        assert_eq!(sniff_delimiter("Est\tNord\n1\t2"), b'\t');
        assert_eq!(sniff_delimiter("Est,Nord\n1,2"), b',');
        assert_eq!(sniff_delimiter("Est"), b',');
    }

    #[test]
    fn test_ragged_rows_keep_headers_verbatim() {
        let reader = TableReader::with_delimiter(b';');
        let table = reader.parse_table(" Est ;Nord;CP\n650000;4850000\n").unwrap();

        assert_eq!(table.headers, vec![" Est ", "Nord", "CP"]);
        assert_eq!(table.cell(0, 1), Some("4850000"));
        assert_eq!(table.cell(0, 2), None);
    }

    #[test]
    fn test_empty_input_rejected() {
        let reader = TableReader::new();
        assert!(reader.parse_table("").is_err());
    }

    #[test]
    fn test_decode_windows_1252() {
        // "Comune\nCant\xF9" with a Latin-1 u-grave
        let bytes = b"Comune\nCant\xf9\n";
        assert_eq!(decode_text(bytes), "Comune\nCant\u{f9}\n");
        assert_eq!(decode_text(b"\xEF\xBB\xBFEst"), "Est");
    }

    #[test]
    fn test_read_table_file() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        writeln!(temp_file, "Est;Nord;Comune")?;
        writeln!(temp_file, "650000;4850000;Bardonecchia")?;
        writeln!(temp_file)?;
        writeln!(temp_file, "651500;4851000;Oulx")?;

        let table = TableReader::new().read_table(temp_file.path())?;
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.cell(1, 2), Some("Oulx"));

        Ok(())
    }
}
