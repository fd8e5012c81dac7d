//! Equipment catalog side panel.
//!
//! Lists the equipment categories and the suggested questions for the
//! highlighted one.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use equiphelper_engine::catalog;

use crate::theme::Styles;

/// Catalog pane widget.
pub struct CatalogPanel {
    selected_category: usize,
    selected_question: Option<usize>,
    focused: bool,
}

impl CatalogPanel {
    /// Create a catalog panel.
    pub fn new(selected_category: usize, selected_question: Option<usize>) -> Self {
        Self {
            selected_category,
            selected_question,
            focused: false,
        }
    }

    /// Set whether this pane is focused.
    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn build_lines(&self, width: usize) -> Vec<Line<'static>> {
        let mut lines = Vec::new();

        for (i, name) in catalog::categories().enumerate() {
            let is_selected = i == self.selected_category;
            let marker = if is_selected { "> " } else { "  " };
            let style = if is_selected && self.focused && self.selected_question.is_none() {
                Styles::highlight()
            } else if is_selected {
                Styles::default()
            } else {
                Styles::dim()
            };
            lines.push(Line::from(Span::styled(format!("{marker}{name}"), style)));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Suggested questions".to_string(),
            Styles::dim(),
        )));

        let questions =
            catalog::questions_for(catalog::categories().nth(self.selected_category).unwrap_or_default());
        for (i, question) in questions.iter().enumerate() {
            let is_selected = self.selected_question == Some(i) && self.focused;
            let style = if is_selected {
                Styles::highlight()
            } else {
                Styles::default()
            };
            let numbered = format!("[{}] {question}", i + 1);
            let mut first = true;
            for wrapped in textwrap::wrap(&numbered, width.max(8)) {
                let text = if first {
                    wrapped.into_owned()
                } else {
                    format!("    {wrapped}")
                };
                first = false;
                lines.push(Line::from(Span::styled(text, style)));
            }
        }

        lines
    }
}

impl Widget for CatalogPanel {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Styles::border_active()
        } else {
            Styles::border()
        };
        let block = Block::default()
            .title(" Equipment ")
            .borders(Borders::ALL)
            .border_style(border_style)
            .style(Styles::default());
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let lines = self.build_lines(inner.width as usize);
        Paragraph::new(lines).render(inner, buf);
    }
}
