//! Status bar with key hints and transient notifications.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::app::{Focus, Notification};
use crate::theme::Styles;

const INPUT_HINTS: &str =
    "Enter send \u{2502} Tab equipment \u{2502} Ctrl+E export \u{2502} Ctrl+L clear \u{2502} Ctrl+C quit";
const CATALOG_HINTS: &str =
    "\u{2191}\u{2193} browse \u{2502} Enter/1-3 ask \u{2502} Esc back \u{2502} Ctrl+E export \u{2502} Ctrl+L clear";

/// Status bar widget.
pub struct StatusBar<'a> {
    focus: Focus,
    notification: Option<&'a Notification>,
}

impl<'a> StatusBar<'a> {
    /// Create a status bar.
    pub fn new(focus: Focus, notification: Option<&'a Notification>) -> Self {
        Self { focus, notification }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let line = match self.notification {
            Some(n) => {
                let style = if n.is_error {
                    Styles::error()
                } else {
                    Styles::success()
                };
                Line::from(Span::styled(n.text.clone(), style))
            }
            None => {
                let hints = match self.focus {
                    Focus::Input => INPUT_HINTS,
                    Focus::Catalog => CATALOG_HINTS,
                };
                Line::from(Span::styled(hints, Styles::dim()))
            }
        };
        Paragraph::new(vec![line]).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn draw(bar: StatusBar<'_>, width: u16) -> String {
        let backend = TestBackend::new(width, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| frame.render_widget(bar, frame.area()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn test_hints_follow_focus() {
        let content = draw(StatusBar::new(Focus::Input, None), 90);
        assert!(content.contains("Enter send"));

        let content = draw(StatusBar::new(Focus::Catalog, None), 90);
        assert!(content.contains("browse"));
    }

    #[test]
    fn test_notification_replaces_hints() {
        let note = Notification {
            text: "Saved equipHelper_Chat_History.pdf".into(),
            is_error: false,
        };
        let content = draw(StatusBar::new(Focus::Input, Some(&note)), 90);
        assert!(content.contains("Saved"));
        assert!(!content.contains("Enter send"));
    }
}
