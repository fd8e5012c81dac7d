//! Application state and update logic for the equipHelper TUI.

use std::path::PathBuf;
use std::sync::Arc;

use equiphelper_engine::{
    catalog, export_transcript, Config, DispatchError, PdfRenderer, QueryDispatcher, StoreError,
    SubmissionTicket, Transcript, TranscriptStore, DOCUMENT_FILE_NAME,
};
use thiserror::Error;
use tracing::warn;

use crate::input::TextInputState;

/// Ticks a notification stays visible (3 s at the 4 Hz tick rate).
const NOTIFICATION_TTL: usize = 12;

/// Upper bound on manual transcript scrollback.
const MAX_SCROLLBACK: usize = 500;

/// Lines scrolled per page key.
const PAGE_SCROLL: usize = 10;

/// Errors preventing the TUI from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

/// Which pane receives key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Input,
    Catalog,
}

/// A submission the event loop still has to dispatch.
#[derive(Debug)]
pub struct PendingAsk {
    pub ticket: SubmissionTicket,
    pub question: String,
}

/// A transient status-line notification.
#[derive(Debug, Clone)]
pub struct Notification {
    pub text: String,
    pub is_error: bool,
}

/// Application state.
pub struct App {
    /// Whether the app should quit.
    pub should_quit: bool,

    /// Which pane has focus.
    pub focus: Focus,

    /// Conversation state.
    pub transcript: Transcript,

    /// Durable transcript storage.
    store: TranscriptStore,

    /// Shared handle for spawned dispatch tasks.
    pub dispatcher: Arc<QueryDispatcher>,

    /// Question input field.
    pub input: TextInputState,

    /// Highlighted category index.
    pub selected_category: usize,

    /// Highlighted suggestion within the category, if the suggestion
    /// list is entered.
    pub selected_question: Option<usize>,

    /// Lines scrolled up from the newest message (0 = anchored).
    pub scroll_from_bottom: usize,

    /// Tick counter for the loading spinner.
    pub tick: usize,

    /// Transient notification shown in the status bar.
    pub notification: Option<Notification>,
    notification_ttl: usize,

    /// Directory the exported document is written to.
    export_dir: PathBuf,
}

impl App {
    /// Build the app from configuration: open the store, load or start
    /// a transcript, and construct the dispatcher.
    pub fn new(config: &Config) -> Result<Self, StartupError> {
        let store = TranscriptStore::new(config.resolve_data_dir())?;
        let transcript = match store.load()? {
            Some(messages) => Transcript::resumed(messages),
            None => Transcript::first_visit(),
        };
        let dispatcher = Arc::new(QueryDispatcher::new(
            config.endpoint_url.clone(),
            config.request_timeout_seconds,
        )?);
        let export_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

        Ok(Self {
            should_quit: false,
            focus: Focus::default(),
            transcript,
            store,
            dispatcher,
            input: TextInputState::new(),
            selected_category: 0,
            selected_question: None,
            scroll_from_bottom: 0,
            tick: 0,
            notification: None,
            notification_ttl: 0,
            export_dir,
        })
    }

    /// Name of the highlighted category.
    pub fn selected_category_name(&self) -> &'static str {
        catalog::categories()
            .nth(self.selected_category)
            .unwrap_or_default()
    }

    /// Suggested questions for the highlighted category.
    pub fn suggestions(&self) -> &'static [&'static str] {
        catalog::questions_for(self.selected_category_name())
    }

    /// Submit whatever is in the input field.
    ///
    /// The field is cleared immediately on submission; an empty or
    /// whitespace-only question clears the field but dispatches
    /// nothing.
    pub fn submit_input(&mut self) -> Option<PendingAsk> {
        let question = self.input.submit();
        self.start_submission(question)
    }

    /// Submit the `n`-th (1-based) suggested question of the
    /// highlighted category.
    pub fn submit_suggestion(&mut self, n: usize) -> Option<PendingAsk> {
        let question = (*self.suggestions().get(n.checked_sub(1)?)?).to_string();
        self.start_submission(question)
    }

    fn start_submission(&mut self, question: String) -> Option<PendingAsk> {
        let ticket = self.transcript.begin_submission(&question)?;
        self.persist();
        self.scroll_from_bottom = 0;
        Some(PendingAsk { ticket, question })
    }

    /// Record a reply arriving from a dispatch task.
    pub fn on_reply(&mut self, ticket: SubmissionTicket, reply: String) {
        if self.transcript.complete_submission(ticket, reply) {
            self.persist();
            self.scroll_from_bottom = 0;
        }
    }

    /// Persistence choke point: mirror the message sequence to disk
    /// after every mutation. Storage trouble is reported, never fatal.
    fn persist(&mut self) {
        if let Err(e) = self.store.persist(self.transcript.messages()) {
            warn!(error = %e, "Failed to persist transcript");
            self.notify_error(format!("Could not save history: {e}"));
        }
    }

    /// Export the transcript as a PDF next to the working directory.
    pub fn export_document(&mut self) {
        let path = self.export_dir.join(DOCUMENT_FILE_NAME);
        let mut renderer = PdfRenderer::new();
        match export_transcript(&mut renderer, self.transcript.messages(), &path) {
            Ok(()) => self.notify(format!("Saved {}", path.display())),
            Err(e) => {
                warn!(error = %e, "Export failed");
                self.notify_error(format!("Export failed: {e}"));
            }
        }
    }

    /// Clear the conversation and its persisted copy.
    pub fn clear_history(&mut self) {
        self.transcript.reset();
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "Failed to clear persisted transcript");
            self.notify_error(format!("Could not clear history: {e}"));
            return;
        }
        self.scroll_from_bottom = 0;
        self.notify("History cleared");
    }

    /// Apply a non-text action; returns a submission for the event
    /// loop to dispatch, if the action started one.
    pub fn apply_action(&mut self, action: crate::event::Action) -> Option<PendingAsk> {
        use crate::event::Action;

        match action {
            Action::Quit => self.should_quit = true,
            Action::FocusNext => {
                self.focus = match self.focus {
                    Focus::Input => Focus::Catalog,
                    Focus::Catalog => Focus::Input,
                };
                self.selected_question = None;
            }
            Action::Export => self.export_document(),
            Action::ClearHistory => self.clear_history(),
            Action::Up => self.move_up(),
            Action::Down => self.move_down(),
            Action::PageUp => self.scroll_up(PAGE_SCROLL),
            Action::PageDown => self.scroll_down(PAGE_SCROLL),
            Action::Select => {
                if self.focus == Focus::Catalog {
                    match self.selected_question {
                        None => self.selected_question = Some(0),
                        Some(i) => return self.submit_suggestion(i + 1),
                    }
                }
            }
            Action::Back => match (self.focus, self.selected_question) {
                (Focus::Catalog, Some(_)) => self.selected_question = None,
                (Focus::Catalog, None) => self.focus = Focus::Input,
                _ => {}
            },
            Action::Suggestion(n) => {
                if self.focus == Focus::Catalog {
                    return self.submit_suggestion(n);
                }
            }
            Action::None => {}
        }
        None
    }

    fn move_up(&mut self) {
        match (self.focus, self.selected_question) {
            (Focus::Catalog, Some(i)) => {
                self.selected_question = Some(i.saturating_sub(1));
            }
            (Focus::Catalog, None) => {
                self.selected_category = self.selected_category.saturating_sub(1);
            }
            (Focus::Input, _) => self.scroll_up(1),
        }
    }

    fn move_down(&mut self) {
        match (self.focus, self.selected_question) {
            (Focus::Catalog, Some(i)) => {
                let last = self.suggestions().len().saturating_sub(1);
                self.selected_question = Some((i + 1).min(last));
            }
            (Focus::Catalog, None) => {
                let last = catalog::category_count().saturating_sub(1);
                self.selected_category = (self.selected_category + 1).min(last);
            }
            (Focus::Input, _) => self.scroll_down(1),
        }
    }

    /// Scroll the transcript away from the newest message.
    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll_from_bottom = (self.scroll_from_bottom + lines).min(MAX_SCROLLBACK);
    }

    /// Scroll the transcript back toward the newest message.
    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll_from_bottom = self.scroll_from_bottom.saturating_sub(lines);
    }

    /// Advance animations and expire the notification.
    pub fn tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
        if self.notification_ttl > 0 {
            self.notification_ttl -= 1;
            if self.notification_ttl == 0 {
                self.notification = None;
            }
        }
    }

    /// Show a transient status notification.
    pub fn notify(&mut self, text: impl Into<String>) {
        self.notification = Some(Notification {
            text: text.into(),
            is_error: false,
        });
        self.notification_ttl = NOTIFICATION_TTL;
    }

    fn notify_error(&mut self, text: impl Into<String>) {
        self.notification = Some(Notification {
            text: text.into(),
            is_error: true,
        });
        self.notification_ttl = NOTIFICATION_TTL;
    }
}
