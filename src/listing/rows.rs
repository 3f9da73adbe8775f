use std::path::Path;

use serde_json::{Map, Value};

use crate::listing::error::ListingError;

/// One listing row: column name to value.
pub type Row = Map<String, Value>;

/// Load rows from a JSON (`.json`) or YAML file holding a list of objects.
pub fn load_rows(path: impl AsRef<Path>) -> Result<Vec<Row>, ListingError> {
    let path = path.as_ref();
    let display = path.display().to_string();
    let content = std::fs::read_to_string(path).map_err(|source| ListingError::Read {
        path: display.clone(),
        source,
    })?;

    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    let parsed = if is_json {
        serde_json::from_str::<Vec<Row>>(&content).map_err(|e| e.to_string())
    } else {
        serde_yaml::from_str::<Vec<Row>>(&content).map_err(|e| e.to_string())
    };

    parsed.map_err(|reason| ListingError::RowFormat {
        path: display,
        reason,
    })
}
