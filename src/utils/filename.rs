use std::path::{Path, PathBuf};

use crate::utils::constants::{DEFAULT_OUTPUT_FILE, GPX_EXTENSION};

/// Default GPX path for an input file: `<stem>.gpx` next to the input
pub fn default_output_path(input: &Path) -> PathBuf {
    match input.file_stem().and_then(|s| s.to_str()) {
        Some(stem) if !stem.is_empty() => input.with_file_name(format!("{}.{}", stem, GPX_EXTENSION)),
        _ => input
            .parent()
            .map(|p| p.join(DEFAULT_OUTPUT_FILE))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILE)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_path() {
        let path = default_output_path(Path::new("data/grotte_piemonte.csv"));
        assert_eq!(path, PathBuf::from("data/grotte_piemonte.gpx"));

        let path = default_output_path(Path::new("catasto.txt"));
        assert_eq!(path, PathBuf::from("catasto.gpx"));
    }

    #[test]
    fn test_default_output_path_without_stem() {
        let path = default_output_path(Path::new("data/.."));
        assert!(path.to_string_lossy().ends_with(DEFAULT_OUTPUT_FILE));
    }
}
