//! City list loading
//!
//! The list is a plain UTF-8 file with one city per line. It is read on
//! every request so operators can edit it without a restart.

use crate::error::{BoardError, Result};
use std::path::Path;
use tracing::debug;

/// Split a city list into trimmed, non-blank names.
///
/// Order and duplicates are preserved.
pub fn parse_cities(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read and parse the city list at `path`
pub async fn load_cities(path: &Path) -> Result<Vec<String>> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| BoardError::CityList {
            path: path.to_path_buf(),
            source,
        })?;

    let cities = parse_cities(&text);
    debug!("Loaded {} cities from {}", cities.len(), path.display());

    Ok(cities)
}
