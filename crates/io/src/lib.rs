pub mod records;

pub use records::{load_json, load_records, ImportError, ImportSummary};
