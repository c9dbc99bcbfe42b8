use crate::error::{ProcessingError, Result};
use crate::models::InputRecord;
use crate::readers::Table;
use crate::utils::constants::{
    COLUMN_AREA, COLUMN_COMUNE, COLUMN_CP, COLUMN_EST, COLUMN_NORD, COLUMN_QUOTA,
    NAME_COLUMN_CANDIDATES,
};
use crate::utils::coordinates::clean_cell;
use std::collections::HashMap;

/// Header positions resolved once per batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    pub est: usize,
    pub nord: usize,
    pub name: Option<usize>,
    pub quota: Option<usize>,
    pub cp: Option<usize>,
    pub area: Option<usize>,
    pub comune: Option<usize>,
    name_header: Option<String>,
}

impl ColumnMap {
    /// Resolve required, optional and name columns from a header row.
    ///
    /// `Est`/`Nord` must be present by exact name. The name column is either
    /// `name_override` or the first entry of the candidate list matching a
    /// header (trimmed, case-insensitive).
    pub fn resolve(headers: &[String], name_override: Option<&str>) -> Result<Self> {
        let exact = |name: &str| headers.iter().position(|h| h == name);

        let missing: Vec<String> = [COLUMN_EST, COLUMN_NORD]
            .iter()
            .filter(|c| exact(**c).is_none())
            .map(|c| c.to_string())
            .collect();

        let (est, nord) = match (exact(COLUMN_EST), exact(COLUMN_NORD)) {
            (Some(est), Some(nord)) => (est, nord),
            _ => return Err(ProcessingError::MissingColumns(missing)),
        };

        let name = match name_override {
            Some(column) => Some(
                find_header_case_insensitive(headers, column)
                    .ok_or_else(|| ProcessingError::UnknownColumn(column.to_string()))?,
            ),
            None => detect_name_column(headers),
        };

        Ok(Self {
            est,
            nord,
            name,
            quota: exact(COLUMN_QUOTA),
            cp: exact(COLUMN_CP),
            area: exact(COLUMN_AREA),
            comune: exact(COLUMN_COMUNE),
            name_header: name.map(|i| headers[i].clone()),
        })
    }

    /// Original header text of the name column, if one was identified
    pub fn name_header(&self) -> Option<&str> {
        self.name_header.as_deref()
    }

    /// Build the typed record for row `index` of `table`.
    pub fn map_row(&self, table: &Table, index: usize) -> InputRecord {
        let cell = |column: Option<usize>| {
            column
                .and_then(|c| table.cell(index, c))
                .and_then(clean_cell)
        };

        InputRecord {
            index,
            est: cell(Some(self.est)),
            nord: cell(Some(self.nord)),
            name: cell(self.name),
            quota: cell(self.quota),
            cp: cell(self.cp),
            area: cell(self.area),
            comune: cell(self.comune),
        }
    }

    pub fn map_rows(&self, table: &Table) -> Vec<InputRecord> {
        (0..table.row_count())
            .map(|index| self.map_row(table, index))
            .collect()
    }
}

/// First candidate name header present in `headers` (trimmed, case-insensitive).
pub fn detect_name_column(headers: &[String]) -> Option<usize> {
    let lowered: HashMap<String, usize> = headers
        .iter()
        .enumerate()
        .rev()
        .map(|(i, h)| (h.trim().to_lowercase(), i))
        .collect();

    NAME_COLUMN_CANDIDATES
        .iter()
        .find_map(|candidate| lowered.get(*candidate).copied())
}

fn find_header_case_insensitive(headers: &[String], column: &str) -> Option<usize> {
    let wanted = column.trim().to_lowercase();
    headers
        .iter()
        .position(|h| h.trim().to_lowercase() == wanted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::readers::TableReader;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_resolve_all_columns() {
        let h = headers(&["Nome Grotta", "Est", "Nord", "Quota", "CP", "Area", "Comune"]);
        let map = ColumnMap::resolve(&h, None).unwrap();

        assert_eq!(map.est, 1);
        assert_eq!(map.nord, 2);
        assert_eq!(map.name, Some(0));
        assert_eq!(map.name_header(), Some("Nome Grotta"));
        assert_eq!(map.quota, Some(3));
        assert_eq!(map.comune, Some(6));
    }

    #[test]
    fn test_missing_required_columns() {
        let h = headers(&["Nome", "est", "Quota"]);
        match ColumnMap::resolve(&h, None) {
            Err(ProcessingError::MissingColumns(missing)) => {
                assert_eq!(missing, vec!["Est".to_string(), "Nord".to_string()]);
            }
            other => panic!("expected MissingColumns, got {:?}", other),
        }
    }

    #[test]
    fn test_padded_required_header_is_missing() {
        let table = TableReader::with_delimiter(b';')
            .parse_table(" Est ;Nord\n650000;4850000\n")
            .unwrap();
        match ColumnMap::resolve(&table.headers, None) {
            Err(ProcessingError::MissingColumns(missing)) => {
                assert_eq!(missing, vec!["Est".to_string()]);
            }
            other => panic!("expected MissingColumns, got {:?}", other),
        }
    }

    #[test]
    fn test_name_detection_priority_and_case() {
        let h = headers(&["Name", "  NOME GROTTA ", "Est", "Nord"]);
        assert_eq!(detect_name_column(&h), Some(1));

        let h = headers(&["Denominazione", "Grotta", "Est", "Nord"]);
        assert_eq!(detect_name_column(&h), Some(1));

        let h = headers(&["Est", "Nord", "Sigla"]);
        assert_eq!(detect_name_column(&h), None);
    }

    #[test]
    fn test_name_override() {
        let h = headers(&["Sigla", "Nome", "Est", "Nord"]);
        let map = ColumnMap::resolve(&h, Some("sigla")).unwrap();
        assert_eq!(map.name, Some(0));

        assert!(matches!(
            ColumnMap::resolve(&h, Some("Codice")),
            Err(ProcessingError::UnknownColumn(_))
        ));
    }

    #[test]
    fn test_map_row_blank_cells() {
        let table = Table::new(
            headers(&["Nome", "Est", "Nord", "Quota", "CP"]),
            vec![vec![
                "  ".to_string(),
                "650000".to_string(),
                "NaN".to_string(),
                "1200".to_string(),
            ]],
        );
        let map = ColumnMap::resolve(&table.headers, None).unwrap();
        let record = map.map_row(&table, 0);

        assert_eq!(record.index, 0);
        assert_eq!(record.name, None);
        assert_eq!(record.est.as_deref(), Some("650000"));
        assert_eq!(record.nord, None);
        assert_eq!(record.quota.as_deref(), Some("1200"));
        assert_eq!(record.cp, None);
    }
}
