use serde::{Deserialize, Serialize};

use crate::utils::constants::{DESCRIPTION_SEPARATOR, GENERATED_NAME_PREFIX};

/// One input row after header resolution.
///
/// Cells are raw text; blank cells (empty or NA markers) are already `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputRecord {
    /// 0-based position of the row in the input, kept even when earlier rows are skipped
    pub index: usize,
    pub est: Option<String>,
    pub nord: Option<String>,
    pub name: Option<String>,
    pub quota: Option<String>,
    pub cp: Option<String>,
    pub area: Option<String>,
    pub comune: Option<String>,
}

impl InputRecord {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            ..Default::default()
        }
    }

    /// Point name, falling back to `Punto_<index>` when the row has none.
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("{}{}", GENERATED_NAME_PREFIX, self.index),
        }
    }

    /// `CP`, `Area`, `Comune` joined with `" | "`, skipping absent fields.
    pub fn description(&self) -> String {
        let fields = [
            ("CP", self.cp.as_deref()),
            ("Area", self.area.as_deref()),
            ("Comune", self.comune.as_deref()),
        ];

        fields
            .iter()
            .filter_map(|(label, value)| value.map(|v| format!("{}: {}", label, v)))
            .collect::<Vec<_>>()
            .join(DESCRIPTION_SEPARATOR)
    }
}
