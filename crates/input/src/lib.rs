pub mod autoscroll;
pub mod dispatcher;
pub mod gesture;
pub mod session;

pub use autoscroll::{Direction, AUTO_SCROLL_INTERVAL_MS};
pub use dispatcher::{Dispatcher, Key, Response, Tuning};
pub use gesture::{CursorHint, Gesture};
pub use session::GridState;
