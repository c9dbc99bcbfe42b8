use crate::error::{ProcessingError, Result};
use crate::models::{
    ConversionOutcome, ConversionStats, InputRecord, OutputDocument, RowDiagnostic, SkipReason,
    Waypoint, ZoneSpec,
};
use crate::processors::CoordinateTransformer;
use crate::readers::{ColumnMap, Table};
use crate::utils::coordinates::parse_number;
use crate::utils::progress::ProgressReporter;
use tracing::{debug, warn};

/// Converts table rows into GPX waypoints for one UTM zone.
pub struct RecordConverter {
    zone: ZoneSpec,
    name_column: Option<String>,
}

impl RecordConverter {
    pub fn new(zone: ZoneSpec) -> Self {
        Self {
            zone,
            name_column: None,
        }
    }

    /// Use `column` for point names instead of auto-detection
    pub fn with_name_column(mut self, column: Option<String>) -> Self {
        self.name_column = column;
        self
    }

    pub fn convert(&self, table: &Table) -> Result<ConversionOutcome> {
        self.convert_with_progress(table, None)
    }

    /// Convert every row of `table`.
    ///
    /// Only structural problems (missing `Est`/`Nord` headers, unknown name
    /// column override) fail the call. Row-level problems become `skipped`
    /// plus a diagnostic.
    pub fn convert_with_progress(
        &self,
        table: &Table,
        progress: Option<&ProgressReporter>,
    ) -> Result<ConversionOutcome> {
        let columns = ColumnMap::resolve(&table.headers, self.name_column.as_deref())?;
        let records = columns.map_rows(table);

        debug!(
            zone = %self.zone,
            crs = %self.zone.epsg_id(),
            rows = records.len(),
            name_column = columns.name_header().unwrap_or("<none>"),
            "starting conversion"
        );

        let outcome = self.convert_records(&records, progress);

        Ok(ConversionOutcome {
            name_column: columns.name_header().map(|s| s.to_string()),
            ..outcome
        })
    }

    /// Convert already-mapped records; never fails as a whole.
    pub fn convert_records(
        &self,
        records: &[InputRecord],
        progress: Option<&ProgressReporter>,
    ) -> ConversionOutcome {
        let transformer = CoordinateTransformer::new(self.zone);
        if let Err(e) = &transformer {
            warn!(zone = %self.zone, error = %e, "projection setup failed, every row will be skipped");
        }

        let mut document = OutputDocument::new();
        let mut stats = ConversionStats::default();
        let mut diagnostics = Vec::new();

        for record in records {
            match self.convert_record(record, transformer.as_ref()) {
                Ok(waypoint) => {
                    document.push_waypoint(waypoint);
                    stats.converted += 1;
                }
                Err(diagnostic) => {
                    warn!(
                        row = diagnostic.row,
                        reason = diagnostic.reason.display_name(),
                        "skipping row: {}",
                        diagnostic.message
                    );
                    diagnostics.push(diagnostic);
                    stats.skipped += 1;
                }
            }

            if let Some(p) = progress {
                p.increment(1);
            }
        }

        debug!(
            converted = stats.converted,
            skipped = stats.skipped,
            "conversion finished"
        );

        ConversionOutcome {
            document,
            stats,
            diagnostics,
            name_column: None,
        }
    }

    fn convert_record(
        &self,
        record: &InputRecord,
        transformer: std::result::Result<&CoordinateTransformer, &ProcessingError>,
    ) -> std::result::Result<Waypoint, RowDiagnostic> {
        let skip = |reason: SkipReason, message: String| RowDiagnostic {
            row: record.index,
            reason,
            message,
        };

        let (est, nord) = match (&record.est, &record.nord) {
            (Some(est), Some(nord)) => (est, nord),
            (None, _) => return Err(skip(SkipReason::MissingRequiredField, "Est is blank".into())),
            (_, None) => return Err(skip(SkipReason::MissingRequiredField, "Nord is blank".into())),
        };

        let name = record.display_name();

        let easting = parse_number(est).map_err(|e| skip(SkipReason::InvalidNumber, e.to_string()))?;
        let northing =
            parse_number(nord).map_err(|e| skip(SkipReason::InvalidNumber, e.to_string()))?;

        let transformer =
            transformer.map_err(|e| skip(SkipReason::TransformFailure, e.to_string()))?;
        let (latitude, longitude) = transformer
            .transform_point(easting, northing)
            .map_err(|e| skip(SkipReason::TransformFailure, e.to_string()))?;

        let description = record.description();

        let elevation = record
            .quota
            .as_deref()
            .map(parse_number)
            .transpose()
            .map_err(|e| skip(SkipReason::RowProcessing, format!("Quota: {}", e)))?;

        Ok(Waypoint::new(latitude, longitude, elevation, name, description))
    }
}

/// Convert `table` in `zone`, auto-detecting the name column.
pub fn convert(table: &Table, zone: ZoneSpec) -> Result<ConversionOutcome> {
    RecordConverter::new(zone).convert(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn table(headers: &[&str], rows: &[&[&str]]) -> Table {
        Table::new(
            headers.iter().map(|s| s.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
    }

    fn zone_32n() -> ZoneSpec {
        ZoneSpec::parse("32N").unwrap()
    }

    #[test]
    fn test_reference_scenario() {
        let input = table(
            &["Est", "Nord", "Nome Grotta", "Quota", "CP", "Area", "Comune"],
            &[&[
                "650000",
                "4850000",
                "Grotta A",
                "1200",
                "TO-001",
                "Val di Susa",
                "Bardonecchia",
            ]],
        );

        let outcome = convert(&input, zone_32n()).unwrap();

        assert_eq!(outcome.stats, ConversionStats { converted: 1, skipped: 0 });
        assert_eq!(outcome.document.waypoints.len(), 1);
        let wpt = &outcome.document.waypoints[0];
        assert_eq!(wpt.name, "Grotta A");
        assert_eq!(
            wpt.description,
            "CP: TO-001 | Area: Val di Susa | Comune: Bardonecchia"
        );
        assert_eq!(wpt.elevation, Some(1200.0));
        assert_eq!(outcome.name_column.as_deref(), Some("Nome Grotta"));
    }

    #[test]
    fn test_missing_nord_is_skipped() {
        let input = table(&["Est", "Nord"], &[&["650000", ""]]);
        let outcome = convert(&input, zone_32n()).unwrap();

        assert_eq!(outcome.stats, ConversionStats { converted: 0, skipped: 1 });
        assert!(outcome.document.waypoints.is_empty());
        assert_eq!(outcome.diagnostics[0].reason, SkipReason::MissingRequiredField);
    }

    #[test]
    fn test_non_numeric_coordinates_do_not_abort_batch() {
        let input = table(
            &["Est", "Nord", "Nome"],
            &[
                &["abc", "4850000", "Bad"],
                &["650000", "4850000", "Good"],
            ],
        );
        let outcome = convert(&input, zone_32n()).unwrap();

        assert_eq!(outcome.stats, ConversionStats { converted: 1, skipped: 1 });
        assert_eq!(outcome.document.waypoints[0].name, "Good");
        assert_eq!(outcome.diagnostics[0].row, 0);
        assert_eq!(outcome.diagnostics[0].reason, SkipReason::InvalidNumber);
    }

    #[test]
    fn test_generated_names_keep_original_index() {
        let input = table(
            &["Est", "Nord", "Nome Grotta"],
            &[
                &["650000", "", "Skipped"],
                &["650000", "4850000", ""],
                &["651500", "4851000", "Grotta B"],
            ],
        );
        let outcome = convert(&input, zone_32n()).unwrap();

        let names: Vec<&str> = outcome
            .document
            .waypoints
            .iter()
            .map(|w| w.name.as_str())
            .collect();
        assert_eq!(names, vec!["Punto_1", "Grotta B"]);
    }

    #[test]
    fn test_no_name_column_numbers_all_points() {
        let input = table(
            &["Est", "Nord"],
            &[&["650000", "4850000"], &["651500", "4851000"]],
        );
        let outcome = convert(&input, zone_32n()).unwrap();

        assert_eq!(outcome.name_column, None);
        assert_eq!(outcome.document.waypoints[0].name, "Punto_0");
        assert_eq!(outcome.document.waypoints[1].name, "Punto_1");
    }

    #[test]
    fn test_blank_metadata_and_elevation() {
        let input = table(
            &["Est", "Nord", "Quota", "CP", "Area", "Comune"],
            &[&["650000", "4850000", "", " ", "", "NaN"]],
        );
        let outcome = convert(&input, zone_32n()).unwrap();

        let wpt = &outcome.document.waypoints[0];
        assert_eq!(wpt.description, "");
        assert_eq!(wpt.elevation, None);
    }

    #[test]
    fn test_dash_cells_are_kept_as_text() {
        let input = table(
            &["Est", "Nord", "Nome", "CP"],
            &[&["650000", "4850000", "-", "-"]],
        );
        let outcome = convert(&input, zone_32n()).unwrap();

        let wpt = &outcome.document.waypoints[0];
        assert_eq!(wpt.name, "-");
        assert_eq!(wpt.description, "CP: -");
    }

    #[test]
    fn test_bad_quota_skips_row() {
        let input = table(
            &["Est", "Nord", "Quota"],
            &[&["650000", "4850000", "alta"]],
        );
        let outcome = convert(&input, zone_32n()).unwrap();

        assert_eq!(outcome.stats, ConversionStats { converted: 0, skipped: 1 });
        assert_eq!(outcome.diagnostics[0].reason, SkipReason::RowProcessing);
    }

    #[test]
    fn test_unprojectable_row_between_valid_rows() {
        let input = table(
            &["Est", "Nord", "Nome"],
            &[
                &["650000", "4850000", "A"],
                &["1000000000", "1000000000", "Lontano"],
                &["651500", "4851000", "B"],
            ],
        );
        let outcome = convert(&input, zone_32n()).unwrap();

        assert_eq!(outcome.stats, ConversionStats { converted: 2, skipped: 1 });
        assert_eq!(outcome.diagnostics.len(), 1);
        assert_eq!(outcome.diagnostics[0].row, 1);
        assert_eq!(outcome.diagnostics[0].reason, SkipReason::TransformFailure);
        let names: Vec<&str> = outcome
            .document
            .waypoints
            .iter()
            .map(|w| w.name.as_str())
            .collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn test_counts_cover_every_row() {
        let input = table(
            &["Est", "Nord"],
            &[
                &["650000", "4850000"],
                &["", "4850000"],
                &["x", "y"],
                &["651500", "4851000"],
                &["652000"],
            ],
        );
        let outcome = convert(&input, zone_32n()).unwrap();

        assert_eq!(outcome.stats.total(), input.row_count());
        assert_eq!(outcome.stats.converted, 2);
        assert_eq!(outcome.diagnostics.len(), outcome.stats.skipped);
    }

    #[test]
    fn test_missing_header_is_fatal() {
        let input = table(&["Est", "Quota"], &[&["650000", "100"]]);
        assert!(matches!(
            convert(&input, zone_32n()),
            Err(ProcessingError::MissingColumns(_))
        ));
    }

    #[test]
    fn test_name_column_override() {
        let input = table(
            &["Est", "Nord", "Nome", "Sigla"],
            &[&["650000", "4850000", "Grotta A", "TO-1"]],
        );
        let outcome = RecordConverter::new(zone_32n())
            .with_name_column(Some("Sigla".to_string()))
            .convert(&input)
            .unwrap();

        assert_eq!(outcome.document.waypoints[0].name, "TO-1");
        assert_eq!(outcome.name_column.as_deref(), Some("Sigla"));
    }

    #[test]
    fn test_waypoints_follow_input_order() {
        let input = table(
            &["Est", "Nord", "Nome"],
            &[
                &["652000", "4852000", "C"],
                &["650000", "4850000", "A"],
                &["651500", "4851000", "B"],
            ],
        );
        let outcome = convert(&input, zone_32n()).unwrap();
        let names: Vec<&str> = outcome
            .document
            .waypoints
            .iter()
            .map(|w| w.name.as_str())
            .collect();
        assert_eq!(names, vec!["C", "A", "B"]);
    }
}
