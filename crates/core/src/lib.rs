pub mod selection;

pub use selection::{ActiveSelection, Range, Selection};
