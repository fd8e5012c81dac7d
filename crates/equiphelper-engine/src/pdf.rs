//! PDF backend for the document exporter.
//!
//! Renders onto A4 portrait pages with the built-in Helvetica font.
//! Layout-unit coordinates from [`crate::export`] map directly to
//! millimeters from the top-left of the page.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use printpdf::{
    BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerIndex,
    PdfLayerReference, PdfPageIndex, Rgb,
};

use crate::export::{Color, DocumentRenderer, ExportError};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const LAYER_NAME: &str = "Layer 1";

const TITLE_X_MM: f32 = 10.0;
const TITLE_Y_MM: f32 = 10.0;
const TITLE_FONT_SIZE: f32 = 20.0;
const BODY_FONT_SIZE: f32 = 12.0;

struct OpenDocument {
    doc: PdfDocumentReference,
    font: IndirectFontRef,
    page: PdfPageIndex,
    layer: PdfLayerIndex,
}

impl OpenDocument {
    fn current_layer(&self) -> PdfLayerReference {
        self.doc.get_page(self.page).get_layer(self.layer)
    }
}

/// Concrete [`DocumentRenderer`] over the `printpdf` crate.
#[derive(Default)]
pub struct PdfRenderer {
    open: Option<OpenDocument>,
    color: Option<Color>,
}

impl PdfRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    fn open_mut(&mut self) -> Result<&mut OpenDocument, ExportError> {
        self.open
            .as_mut()
            .ok_or_else(|| ExportError::Renderer("no document begun".into()))
    }

    fn apply_color(layer: &PdfLayerReference, color: Color) {
        let rgb = Rgb::new(
            f32::from(color.r) / 255.0,
            f32::from(color.g) / 255.0,
            f32::from(color.b) / 255.0,
            None,
        );
        layer.set_fill_color(printpdf::Color::Rgb(rgb));
    }

    /// Map a top-left layout y coordinate to PDF space (bottom-left).
    fn to_pdf_y(y: f32) -> Mm {
        Mm(PAGE_HEIGHT_MM - y)
    }
}

impl DocumentRenderer for PdfRenderer {
    fn begin_document(&mut self, title: &str) -> Result<(), ExportError> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), LAYER_NAME);
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ExportError::Renderer(e.to_string()))?;

        let open = OpenDocument { doc, font, page, layer };
        open.current_layer().use_text(
            title,
            TITLE_FONT_SIZE,
            Mm(TITLE_X_MM),
            Self::to_pdf_y(TITLE_Y_MM),
            &open.font,
        );

        self.open = Some(open);
        self.color = None;
        Ok(())
    }

    fn set_color(&mut self, color: Color) -> Result<(), ExportError> {
        let open = self.open_mut()?;
        Self::apply_color(&open.current_layer(), color);
        self.color = Some(color);
        Ok(())
    }

    fn write_line(&mut self, x: f32, y: f32, text: &str) -> Result<(), ExportError> {
        let open = self.open_mut()?;
        open.current_layer()
            .use_text(text, BODY_FONT_SIZE, Mm(x), Self::to_pdf_y(y), &open.font);
        Ok(())
    }

    fn new_page(&mut self) -> Result<(), ExportError> {
        let color = self.color;
        let open = self.open_mut()?;
        let (page, layer) = open
            .doc
            .add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), LAYER_NAME);
        open.page = page;
        open.layer = layer;

        // Fill color is per-layer state; carry it onto the fresh page.
        if let Some(color) = color {
            Self::apply_color(&open.current_layer(), color);
        }
        Ok(())
    }

    fn save(&mut self, path: &Path) -> Result<(), ExportError> {
        let open = self
            .open
            .take()
            .ok_or_else(|| ExportError::Renderer("no document begun".into()))?;
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        open.doc
            .save(&mut writer)
            .map_err(|e| ExportError::Renderer(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::{export_transcript, DOCUMENT_FILE_NAME, USER_COLOR};
    use crate::message::Message;
    use tempfile::TempDir;

    #[test]
    fn test_renders_real_pdf_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(DOCUMENT_FILE_NAME);

        let messages = vec![
            Message::user("How do I inspect my helmet for damage?"),
            Message::ai("Check the shell for cracks. Replace after any impact."),
        ];
        let mut renderer = PdfRenderer::new();
        export_transcript(&mut renderer, &messages, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_write_before_begin_is_an_error() {
        let mut renderer = PdfRenderer::new();
        assert!(renderer.write_line(10.0, 20.0, "text").is_err());
        assert!(renderer.set_color(USER_COLOR).is_err());
        assert!(renderer.save(Path::new("nowhere.pdf")).is_err());
    }

    #[test]
    fn test_save_consumes_the_document() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.pdf");

        let mut renderer = PdfRenderer::new();
        renderer.begin_document("title").unwrap();
        renderer.save(&path).unwrap();
        assert!(renderer.save(&path).is_err());
    }
}
