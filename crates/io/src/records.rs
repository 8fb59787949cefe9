use serde_json::Value;

use gridcanvas_engine::{Grid, GridError};

/// Why a bulk import was rejected. Validation runs before any cell is
/// written, so a failed import leaves the grid untouched.
#[derive(Debug)]
pub enum ImportError {
    Parse(serde_json::Error),
    NotAnArray,
    Empty,
    /// Array element at `index` is not a JSON object.
    BadRecord { index: usize },
    Grid(GridError),
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportError::Parse(e) => write!(f, "invalid JSON: {}", e),
            ImportError::NotAnArray => write!(f, "input must be an array of objects"),
            ImportError::Empty => write!(f, "input contains no records"),
            ImportError::BadRecord { index } => {
                write!(f, "record {} is not an object", index)
            }
            ImportError::Grid(e) => write!(f, "grid rejected a write: {}", e),
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImportError::Parse(e) => Some(e),
            ImportError::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for ImportError {
    fn from(e: GridError) -> Self {
        ImportError::Grid(e)
    }
}

/// What an import wrote, for the caller's status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub records: usize,
    pub columns: usize,
}

/// Parse a JSON document and load its records into `grid`.
pub fn load_json(grid: &mut Grid, text: &str) -> Result<ImportSummary, ImportError> {
    let data: Value = serde_json::from_str(text).map_err(ImportError::Parse)?;
    let records = data.as_array().ok_or(ImportError::NotAnArray)?;
    load_records(grid, records)
}

/// Load an array of JSON objects into `grid`: the first record's keys
/// become uppercased headers in row 0, then one record per row from row 1
/// on. Writes stop silently at the grid's row and column capacity. The
/// import bypasses the undo history, like any bulk load.
pub fn load_records(grid: &mut Grid, records: &[Value]) -> Result<ImportSummary, ImportError> {
    if records.is_empty() {
        return Err(ImportError::Empty);
    }
    let mut objects = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        match record.as_object() {
            Some(obj) => objects.push(obj),
            None => return Err(ImportError::BadRecord { index }),
        }
    }
    let headers: Vec<&String> = objects[0].keys().collect();

    let col_limit = grid.col_count().min(headers.len());
    if grid.row_count() == 0 || col_limit == 0 {
        return Ok(ImportSummary { records: 0, columns: 0 });
    }

    for (col, header) in headers.iter().take(col_limit).enumerate() {
        grid.set_cell_text(0, col, header.to_uppercase())?;
    }

    let row_limit = grid.row_count() - 1;
    let mut written = 0;
    for obj in objects.iter().take(row_limit) {
        written += 1;
        for (col, header) in headers.iter().take(col_limit).enumerate() {
            let text = obj.get(*header).map(cell_value).unwrap_or_default();
            grid.set_cell_text(written, col, text)?;
        }
    }

    log::info!("loaded {} records with {} columns", written, col_limit);
    Ok(ImportSummary { records: written, columns: col_limit })
}

/// Cell text for a JSON value. Strings are taken verbatim, null and
/// missing become empty, everything else keeps its JSON rendering.
fn cell_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
