use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::OutputDocument;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionStats {
    pub converted: usize,
    pub skipped: usize,
}

impl ConversionStats {
    pub fn total(&self) -> usize {
        self.converted + self.skipped
    }

    pub fn has_skipped(&self) -> bool {
        self.skipped > 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkipReason {
    MissingRequiredField,
    InvalidNumber,
    TransformFailure,
    RowProcessing,
}

impl SkipReason {
    pub fn display_name(&self) -> &'static str {
        match self {
            SkipReason::MissingRequiredField => "missing Est/Nord",
            SkipReason::InvalidNumber => "non-numeric coordinate",
            SkipReason::TransformFailure => "transformation failed",
            SkipReason::RowProcessing => "row processing error",
        }
    }
}

/// Advisory message for a skipped row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowDiagnostic {
    pub row: usize,
    pub reason: SkipReason,
    pub message: String,
}

impl fmt::Display for RowDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "row {}: {} ({})",
            self.row,
            self.reason.display_name(),
            self.message
        )
    }
}

/// Everything one conversion pass produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionOutcome {
    pub document: OutputDocument,
    pub stats: ConversionStats,
    pub diagnostics: Vec<RowDiagnostic>,
    pub name_column: Option<String>,
}

impl ConversionOutcome {
    pub fn summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str("=== Conversion Report ===\n");
        summary.push_str(&format!("Rows Read: {}\n", self.stats.total()));
        summary.push_str(&format!("Points Converted: {}\n", self.stats.converted));
        summary.push_str(&format!("Points Skipped: {}\n", self.stats.skipped));
        match &self.name_column {
            Some(column) => summary.push_str(&format!("Name Column: {}\n", column)),
            None => summary.push_str("Name Column: none (points numbered automatically)\n"),
        }

        if !self.diagnostics.is_empty() {
            summary.push_str("\nFirst 10 Skipped Rows:\n");
            for (i, diagnostic) in self.diagnostics.iter().take(10).enumerate() {
                summary.push_str(&format!("  {}. {}\n", i + 1, diagnostic));
            }
        }

        summary
    }

    /// Skipped-row counts per reason, in a stable order.
    pub fn skip_breakdown(&self) -> Vec<(SkipReason, usize)> {
        [
            SkipReason::MissingRequiredField,
            SkipReason::InvalidNumber,
            SkipReason::TransformFailure,
            SkipReason::RowProcessing,
        ]
        .into_iter()
        .map(|reason| {
            let count = self.diagnostics.iter().filter(|d| d.reason == reason).count();
            (reason, count)
        })
        .filter(|(_, count)| *count > 0)
        .collect()
    }
}
