//! Scroll-anchored transcript view.
//!
//! Renders the message sequence with per-sender colors; assistant
//! answers are broken into display paragraphs. The view stays anchored
//! to the newest message unless the user scrolls back.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use equiphelper_engine::{split_paragraphs, Sender, Transcript};

use crate::theme::{Styles, Symbols};

/// Transcript pane widget.
pub struct TranscriptView<'a> {
    transcript: &'a Transcript,
    scroll_from_bottom: usize,
    tick: usize,
}

impl<'a> TranscriptView<'a> {
    /// Create a transcript view.
    pub fn new(transcript: &'a Transcript) -> Self {
        Self {
            transcript,
            scroll_from_bottom: 0,
            tick: 0,
        }
    }

    /// Lines scrolled up from the newest message.
    #[must_use]
    pub fn scroll_from_bottom(mut self, lines: usize) -> Self {
        self.scroll_from_bottom = lines;
        self
    }

    /// Tick counter driving the typing spinner.
    #[must_use]
    pub fn tick(mut self, tick: usize) -> Self {
        self.tick = tick;
        self
    }

    /// Build the full line list at the given wrap width.
    fn build_lines(&self, width: usize) -> Vec<Line<'static>> {
        let mut lines = Vec::new();

        for message in self.transcript.messages() {
            let (name_style, text_style) = match message.sender {
                Sender::User => (Styles::user().add_modifier(Modifier::BOLD), Styles::default()),
                Sender::Ai => (
                    Styles::assistant().add_modifier(Modifier::BOLD),
                    Styles::default(),
                ),
            };
            lines.push(Line::from(Span::styled(
                message.display_sender().to_string(),
                name_style,
            )));

            match message.sender {
                Sender::User => {
                    push_wrapped(&mut lines, &message.text, width, text_style);
                }
                Sender::Ai => {
                    let mut first = true;
                    for paragraph in split_paragraphs(&message.text) {
                        if !first {
                            lines.push(Line::from(""));
                        }
                        first = false;
                        push_wrapped(&mut lines, &paragraph, width, text_style);
                    }
                    if first {
                        // An answer with no splittable content still
                        // occupies a line.
                        push_wrapped(&mut lines, &message.text, width, text_style);
                    }
                }
            }
            lines.push(Line::from(""));
        }

        if self.transcript.is_loading() {
            let frame = Symbols::SPINNER[self.tick % Symbols::SPINNER.len()];
            lines.push(Line::from(Span::styled(
                format!("{frame} equipHelper is thinking..."),
                Styles::dim(),
            )));
        }

        lines
    }
}

fn push_wrapped(lines: &mut Vec<Line<'static>>, text: &str, width: usize, style: ratatui::style::Style) {
    if width == 0 {
        return;
    }
    for wrapped in textwrap::wrap(text, width) {
        lines.push(Line::from(Span::styled(wrapped.into_owned(), style)));
    }
}

impl Widget for TranscriptView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" equipHelper ")
            .title_style(Styles::highlight())
            .borders(Borders::ALL)
            .border_style(Styles::border())
            .style(Styles::default());
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let lines = self.build_lines(inner.width as usize);
        let total = lines.len();
        let visible = inner.height as usize;

        // Anchor to the bottom, then back off by the scroll offset.
        let max_offset = total.saturating_sub(visible);
        let offset = max_offset.saturating_sub(self.scroll_from_bottom.min(max_offset));

        #[allow(clippy::cast_possible_truncation)]
        Paragraph::new(lines)
            .scroll((offset as u16, 0))
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use equiphelper_engine::Message;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn buffer_content(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    fn draw(transcript: &Transcript, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                let view = TranscriptView::new(transcript);
                frame.render_widget(view, frame.area());
            })
            .unwrap();
        buffer_content(&terminal)
    }

    #[test]
    fn test_renders_welcome_on_first_visit() {
        let transcript = Transcript::first_visit();
        let content = draw(&transcript, 60, 20);
        assert!(content.contains("equipHelper"));
        assert!(content.contains("Hey there"));
    }

    #[test]
    fn test_renders_both_senders() {
        let transcript = Transcript::resumed(vec![
            Message::user("my question"),
            Message::ai("my answer."),
        ]);
        let content = draw(&transcript, 60, 20);
        assert!(content.contains("User"));
        assert!(content.contains("my question"));
        assert!(content.contains("my answer."));
    }

    #[test]
    fn test_answer_paragraphs_are_split() {
        let transcript =
            Transcript::resumed(vec![Message::ai("First point. Second point.")]);
        let view = TranscriptView::new(&transcript);
        let lines = view.build_lines(60);
        let texts: Vec<String> = lines.iter().map(ToString::to_string).collect();
        assert!(texts.contains(&"First point.".to_string()));
        assert!(texts.contains(&"Second point.".to_string()));
    }

    #[test]
    fn test_loading_shows_typing_indicator() {
        let mut transcript = Transcript::first_visit();
        transcript.begin_submission("q").unwrap();
        let content = draw(&transcript, 60, 20);
        assert!(content.contains("thinking"));
    }

    #[test]
    fn test_anchored_to_newest_message() {
        let messages: Vec<Message> = (0..40)
            .map(|i| Message::user(format!("question {i}")))
            .collect();
        let transcript = Transcript::resumed(messages);
        let content = draw(&transcript, 40, 12);
        assert!(content.contains("question 39"));
        assert!(!content.contains("question 0 "));
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let transcript = Transcript::first_visit();
        let _ = draw(&transcript, 3, 2);
    }
}
