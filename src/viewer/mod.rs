//! Read-only display of a backing file.
//!
//! [`ViewerState`] holds everything the UI shows and is independent of the
//! toolkit; [`FaqViewer`] draws it with egui.

mod state;
#[cfg(feature = "gui")]
mod app;

pub use state::{Section, ViewerState};
#[cfg(feature = "gui")]
pub use app::{run, FaqViewer};
