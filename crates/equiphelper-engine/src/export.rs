//! Transcript export as a paged, styled document.
//!
//! The layout logic walks the message sequence and drives an opaque
//! [`DocumentRenderer`], so pagination and coloring are testable
//! against a recording fake without a real rendering backend.

use std::path::Path;

use thiserror::Error;

use crate::format::wrap_for_export;
use crate::message::{Message, Sender};

/// Title placed at the top of page one.
pub const DOCUMENT_TITLE: &str = "equipHelper Chat History";

/// Default file name of the exported document.
pub const DOCUMENT_FILE_NAME: &str = "equipHelper_Chat_History.pdf";

/// Width budget for message text, in layout units (mm).
pub const TEXT_WIDTH_UNITS: u32 = 180;

/// Left margin for text lines.
pub const LEFT_MARGIN: f32 = 10.0;

/// Vertical cursor position of the first body line on page one; the
/// title occupies the band above it.
const BODY_TOP: f32 = 20.0;

/// Cursor advance per wrapped line.
const LINE_HEIGHT: f32 = 10.0;

/// Cursor threshold past which a new page starts.
const PAGE_BOTTOM: f32 = 280.0;

/// Cursor position at the top of a continuation page.
const TOP_MARGIN: f32 = 10.0;

/// An RGB text color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Color for user lines.
pub const USER_COLOR: Color = Color { r: 0, g: 102, b: 204 };

/// Color for assistant lines.
pub const ASSISTANT_COLOR: Color = Color { r: 255, g: 165, b: 0 };

/// Error type for export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("renderer error: {0}")]
    Renderer(String),
}

/// Capability interface over the external document renderer.
///
/// Coordinates are layout units from the top-left of the page.
pub trait DocumentRenderer {
    /// Start a document with its title placed at a fixed position.
    fn begin_document(&mut self, title: &str) -> Result<(), ExportError>;

    /// Set the text color for subsequent lines.
    fn set_color(&mut self, color: Color) -> Result<(), ExportError>;

    /// Write one line of body text at the given position.
    fn write_line(&mut self, x: f32, y: f32, text: &str) -> Result<(), ExportError>;

    /// Start a new page.
    fn new_page(&mut self) -> Result<(), ExportError>;

    /// Serialize the document to a file.
    fn save(&mut self, path: &Path) -> Result<(), ExportError>;
}

fn color_for(sender: Sender) -> Color {
    match sender {
        Sender::User => USER_COLOR,
        Sender::Ai => ASSISTANT_COLOR,
    }
}

/// Render the full message sequence through the given renderer and
/// save it under `path`.
///
/// Each message becomes a `"<Sender>: <text>"` block wrapped to the
/// fixed width budget, colored by sender; the vertical cursor advances
/// one line height per wrapped line and pagination starts a new page
/// once the cursor passes the page-bottom threshold.
pub fn export_transcript<R: DocumentRenderer>(
    renderer: &mut R,
    messages: &[Message],
    path: &Path,
) -> Result<(), ExportError> {
    renderer.begin_document(DOCUMENT_TITLE)?;

    let mut y = BODY_TOP;
    for message in messages {
        let block = format!("{}: {}", message.display_sender(), message.text);
        renderer.set_color(color_for(message.sender))?;

        for line in wrap_for_export(&block, TEXT_WIDTH_UNITS) {
            renderer.write_line(LEFT_MARGIN, y, &line)?;
            y += LINE_HEIGHT;
        }

        if y > PAGE_BOTTOM {
            renderer.new_page()?;
            y = TOP_MARGIN;
        }
    }

    renderer.save(path)
}
