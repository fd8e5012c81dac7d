//! Message model for equipHelper conversations.

use serde::{Deserialize, Serialize};

/// Display name used for assistant-authored lines.
pub const ASSISTANT_NAME: &str = "equipHelper";

/// Fixed reply substituted when a dispatch fails.
pub const DISPATCH_FAILURE_REPLY: &str = "Sorry, something went wrong.";

/// Greeting shown before any real conversation begins.
///
/// The welcome message is transient decoration: it is dropped from the
/// transcript as soon as the first real question is submitted.
pub const WELCOME_TEXT: &str = "\u{1f468}\u{200d}\u{1f692} Hey there! I'm equipHelper, your expert \
assistant for all things firefighting equipment! \u{1f9f0} Need help with maintaining your gear, \
or have questions about equipment care and inspection? Let's make sure you're well-prepared for \
every emergency with properly maintained gear! \u{1f692}\u{1f4a1}";

/// Author of a message.
///
/// Serialized as the lowercase tags `"user"` / `"ai"`, matching the
/// transcripts persisted by earlier clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// A question typed or selected by the user.
    User,
    /// An answer (or failure notice) from the assistant.
    Ai,
}

/// A single message in a conversation.
///
/// Messages are immutable once created; ordering is conversation order
/// and there is no identifier beyond position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Message content.
    pub text: String,
    /// Author of the message.
    #[serde(rename = "type")]
    pub sender: Sender,
}

impl Message {
    /// Create a user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::User,
        }
    }

    /// Create an assistant message.
    pub fn ai(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::Ai,
        }
    }

    /// The sender name used in exported documents.
    pub fn display_sender(&self) -> &'static str {
        match self.sender {
            Sender::User => "User",
            Sender::Ai => ASSISTANT_NAME,
        }
    }
}

/// Build the welcome message.
pub fn welcome_message() -> Message {
    Message::ai(WELCOME_TEXT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let user = Message::user("How often should I inspect my SCBA?");
        assert_eq!(user.sender, Sender::User);
        assert_eq!(user.display_sender(), "User");

        let ai = Message::ai("Inspect it monthly.");
        assert_eq!(ai.sender, Sender::Ai);
        assert_eq!(ai.display_sender(), "equipHelper");
    }

    #[test]
    fn test_wire_format_uses_lowercase_type_tag() {
        let json = serde_json::to_value(Message::user("hi")).unwrap();
        assert_eq!(json["type"], "user");
        assert_eq!(json["text"], "hi");

        let json = serde_json::to_value(Message::ai("hello")).unwrap();
        assert_eq!(json["type"], "ai");
    }

    #[test]
    fn test_parses_legacy_transcript_entry() {
        let msg: Message =
            serde_json::from_str(r#"{"text":"What should I do if my boots get damaged?","type":"user"}"#)
                .unwrap();
        assert_eq!(msg.sender, Sender::User);
    }

    #[test]
    fn test_welcome_message_is_from_assistant() {
        let welcome = welcome_message();
        assert_eq!(welcome.sender, Sender::Ai);
        assert!(welcome.text.contains("equipHelper"));
    }
}
