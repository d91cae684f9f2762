//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the known catalogs, the
//! records of the selected one, the cursor, marks, filter and input state.

mod model;

pub use model::*;
