//! Shared widgets for the equipHelper TUI.

mod catalog_panel;
mod input_bar;
mod status_bar;
mod transcript;

pub use catalog_panel::CatalogPanel;
pub use input_bar::InputBar;
pub use status_bar::StatusBar;
pub use transcript::TranscriptView;
