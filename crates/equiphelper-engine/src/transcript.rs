//! Transcript state machine.
//!
//! Holds the ordered message sequence plus the transient `loading` and
//! `first_visit` flags as explicit fields, so the submission lifecycle
//! can be driven and tested without a UI attached.

use crate::message::{welcome_message, Message};

/// Proof that a submission was started.
///
/// Carries a monotonic sequence number; only the ticket of the most
/// recent outstanding submission is accepted by
/// [`Transcript::complete_submission`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionTicket {
    seq: u64,
}

/// Conversation state: message sequence plus transient flags.
///
/// Invariant: the sequence is never empty — it holds at least the
/// welcome message immediately after construction or reset.
#[derive(Debug, Clone)]
pub struct Transcript {
    messages: Vec<Message>,
    loading: bool,
    first_visit: bool,
    next_seq: u64,
    active_seq: Option<u64>,
}

impl Transcript {
    /// State for a first visit: a single welcome message.
    pub fn first_visit() -> Self {
        Self {
            messages: vec![welcome_message()],
            loading: false,
            first_visit: true,
            next_seq: 0,
            active_seq: None,
        }
    }

    /// State resumed from a persisted transcript.
    ///
    /// An empty sequence (which the store never writes) falls back to a
    /// first visit, preserving the never-empty invariant.
    pub fn resumed(messages: Vec<Message>) -> Self {
        if messages.is_empty() {
            return Self::first_visit();
        }
        Self {
            messages,
            loading: false,
            first_visit: false,
            next_seq: 0,
            active_seq: None,
        }
    }

    /// The message sequence, in conversation order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Whether a submission is outstanding.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether no real conversation has started yet.
    pub fn is_first_visit(&self) -> bool {
        self.first_visit
    }

    /// Start a submission.
    ///
    /// Returns `None` without any effect if the question trims to
    /// empty. Otherwise appends the user message (with the verbatim
    /// question text) ahead of any network activity, sets `loading`,
    /// and returns a ticket for [`Self::complete_submission`]. On the
    /// first real submission the welcome message is dropped first: it
    /// is decoration, not part of the saved conversation.
    pub fn begin_submission(&mut self, question: &str) -> Option<SubmissionTicket> {
        if question.trim().is_empty() {
            return None;
        }

        if self.first_visit {
            self.first_visit = false;
            self.messages.remove(0);
        }
        self.messages.push(Message::user(question));

        self.loading = true;
        let seq = self.next_seq;
        self.next_seq += 1;
        self.active_seq = Some(seq);
        Some(SubmissionTicket { seq })
    }

    /// Record the reply for a submission.
    ///
    /// Appends an assistant message and clears `loading` if the ticket
    /// is still the most recent outstanding submission. A stale ticket
    /// (superseded by a newer submission, or invalidated by a reset) is
    /// discarded; returns whether the reply was recorded.
    pub fn complete_submission(
        &mut self,
        ticket: SubmissionTicket,
        reply: impl Into<String>,
    ) -> bool {
        if self.active_seq != Some(ticket.seq) {
            return false;
        }
        self.messages.push(Message::ai(reply));
        self.loading = false;
        self.active_seq = None;
        true
    }

    /// Clear the conversation back to a single welcome message.
    ///
    /// Restores first-visit status and invalidates any outstanding
    /// submission, so a reply still in flight cannot resurface in the
    /// fresh transcript.
    pub fn reset(&mut self) {
        self.messages = vec![welcome_message()];
        self.loading = false;
        self.first_visit = true;
        self.active_seq = None;
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::first_visit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{Sender, DISPATCH_FAILURE_REPLY};

    #[test]
    fn test_first_visit_holds_only_welcome() {
        let t = Transcript::first_visit();
        assert_eq!(t.messages().len(), 1);
        assert_eq!(t.messages()[0], welcome_message());
        assert!(t.is_first_visit());
        assert!(!t.is_loading());
    }

    #[test]
    fn test_resumed_is_not_first_visit() {
        let t = Transcript::resumed(vec![Message::user("q"), Message::ai("a")]);
        assert!(!t.is_first_visit());
        assert_eq!(t.messages().len(), 2);
    }

    #[test]
    fn test_resumed_empty_falls_back_to_welcome() {
        let t = Transcript::resumed(Vec::new());
        assert_eq!(t.messages(), &[welcome_message()]);
        assert!(t.is_first_visit());
    }

    #[test]
    fn test_empty_question_is_ignored() {
        let mut t = Transcript::first_visit();
        assert!(t.begin_submission("").is_none());
        assert!(t.begin_submission("   \t\n").is_none());
        assert!(!t.is_loading());
        assert_eq!(t.messages().len(), 1);
        assert!(t.is_first_visit());
    }

    #[test]
    fn test_successful_submission_appends_user_then_answer() {
        let mut t = Transcript::resumed(vec![Message::user("old"), Message::ai("reply")]);
        let ticket = t.begin_submission("How do I inspect my gloves for damage?").unwrap();

        // User message is visible before the reply arrives.
        assert!(t.is_loading());
        assert_eq!(t.messages().len(), 3);
        assert_eq!(t.messages()[2].sender, Sender::User);

        assert!(t.complete_submission(ticket, "Check the stitching."));
        assert!(!t.is_loading());
        assert_eq!(t.messages().len(), 4);
        assert_eq!(t.messages()[3], Message::ai("Check the stitching."));
    }

    #[test]
    fn test_verbatim_question_text_is_kept() {
        let mut t = Transcript::first_visit();
        t.begin_submission("  padded question  ").unwrap();
        assert_eq!(t.messages()[0].text, "  padded question  ");
    }

    #[test]
    fn test_first_submission_drops_welcome() {
        let mut t = Transcript::first_visit();
        let ticket = t.begin_submission("How do I inspect my helmet for damage?").unwrap();
        t.complete_submission(ticket, "Look for cracks.");

        // [user, answer], not [welcome, user, answer].
        assert_eq!(t.messages().len(), 2);
        assert_eq!(t.messages()[0], Message::user("How do I inspect my helmet for damage?"));
        assert_eq!(t.messages()[1], Message::ai("Look for cracks."));
        assert!(!t.is_first_visit());
    }

    #[test]
    fn test_failure_reply_is_recorded_like_any_answer() {
        let mut t = Transcript::first_visit();
        let ticket = t.begin_submission("q").unwrap();
        t.complete_submission(ticket, DISPATCH_FAILURE_REPLY);
        assert_eq!(t.messages()[1], Message::ai(DISPATCH_FAILURE_REPLY));
        assert!(!t.is_loading());
    }

    // The original client had no mutual exclusion between overlapping
    // requests, so replies could land out of submission order. That gap
    // is deliberately strengthened here: only the latest outstanding
    // ticket is accepted.
    #[test]
    fn test_stale_reply_from_superseded_submission_is_discarded() {
        let mut t = Transcript::first_visit();
        let first = t.begin_submission("first question").unwrap();
        let second = t.begin_submission("second question").unwrap();

        assert!(!t.complete_submission(first, "late answer to first"));
        assert!(t.is_loading());

        assert!(t.complete_submission(second, "answer to second"));
        assert!(!t.is_loading());

        let texts: Vec<&str> = t.messages().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["first question", "second question", "answer to second"]);
    }

    #[test]
    fn test_reset_restores_welcome_and_first_visit() {
        let mut t = Transcript::first_visit();
        let ticket = t.begin_submission("q").unwrap();
        t.complete_submission(ticket, "a");

        t.reset();
        assert_eq!(t.messages(), &[welcome_message()]);
        assert!(t.is_first_visit());
        assert!(!t.is_loading());
    }

    #[test]
    fn test_reset_invalidates_in_flight_submission() {
        let mut t = Transcript::first_visit();
        let ticket = t.begin_submission("q").unwrap();
        t.reset();

        assert!(!t.complete_submission(ticket, "orphaned answer"));
        assert_eq!(t.messages(), &[welcome_message()]);
    }
}
