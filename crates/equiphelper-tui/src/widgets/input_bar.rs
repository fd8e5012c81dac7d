//! Question input bar.
//!
//! Always visible at the bottom of the screen. While a request is
//! outstanding a spinner is shown in the border title; the field itself
//! stays editable, since submission is not blocked while waiting.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::input::TextInputState;
use crate::theme::{Styles, Symbols};

const PROMPT: &str = "> ";
const PLACEHOLDER: &str = "Ask about your equipment...";

/// Input bar widget.
pub struct InputBar<'a> {
    input: &'a TextInputState,
    focused: bool,
    loading: bool,
    tick: usize,
}

impl<'a> InputBar<'a> {
    /// Create a new input bar widget.
    pub fn new(input: &'a TextInputState) -> Self {
        Self {
            input,
            focused: false,
            loading: false,
            tick: 0,
        }
    }

    /// Set whether the input bar is focused.
    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Set the loading indicator state.
    #[must_use]
    pub fn loading(mut self, loading: bool, tick: usize) -> Self {
        self.loading = loading;
        self.tick = tick;
        self
    }

    /// Build the display line, clipped from the left so the cursor
    /// stays visible on narrow terminals.
    fn build_line(&self, available: usize) -> Line<'static> {
        if self.input.is_empty() {
            let mut spans = vec![Span::styled(PROMPT.to_string(), Styles::highlight())];
            if self.focused {
                spans.push(Span::styled("\u{2588}".to_string(), Styles::default()));
            } else {
                spans.push(Span::styled(PLACEHOLDER.to_string(), Styles::dim()));
            }
            return Line::from(spans);
        }

        let chars: Vec<char> = self.input.content().chars().collect();
        let cursor = self.input.cursor.min(chars.len());

        let mut display: Vec<String> = chars.iter().map(ToString::to_string).collect();
        if self.focused {
            display.insert(cursor, "\u{2588}".to_string());
        }

        // Drop characters from the front until the tail fits.
        let budget = available.saturating_sub(PROMPT.len());
        let mut start = 0;
        let mut width: usize = display.iter().map(|s| s.as_str().width()).sum();
        while width > budget && start < display.len() {
            width -= display[start].as_str().width();
            start += 1;
        }

        let mut spans = vec![Span::styled(PROMPT.to_string(), Styles::highlight())];
        spans.push(Span::styled(
            display[start..].concat(),
            Styles::default(),
        ));
        Line::from(spans)
    }
}

impl Widget for InputBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Styles::border_active()
        } else {
            Styles::border()
        };

        let title = if self.loading {
            let frame = Symbols::SPINNER[self.tick % Symbols::SPINNER.len()];
            format!(" Ask equipHelper {frame} ")
        } else {
            " Ask equipHelper ".to_string()
        };

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style)
            .style(Styles::default());
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let line = self.build_line(inner.width as usize);
        Paragraph::new(vec![line]).render(inner, buf);
    }
}
