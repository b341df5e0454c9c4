//! Chat transcript model.
//!
//! The ordered user/assistant entries and the pending-placeholder bookkeeping,
//! kept separate from terminal rendering so the submit contract is testable.

use serde_json::Value;

/// Placeholder text shown while a request is in flight.
pub const THINKING: &str = "Thinking...";
/// Rendered when the server answers without a `reply` field.
pub const NO_RESPONSE: &str = "No response.";
/// Rendered when the request fails or the server returns an error status.
pub const SERVER_ERROR: &str = "Server error. Try again.";

/// Author of a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// One line of the conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub role: Role,
    pub text: String,
}

/// Ordered sequence of user and assistant messages.
#[derive(Debug, Default)]
pub struct Transcript {
    entries: Vec<Entry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize a submission. Whitespace-only input yields `None` and must
    /// produce no transcript entry and no request.
    pub fn prepare(text: &str) -> Option<&str> {
        let trimmed = text.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    /// Record the user's message and a pending placeholder for its reply.
    /// Each submit owns its own placeholder.
    pub fn push_exchange(&mut self, text: &str) {
        self.entries.push(Entry {
            role: Role::User,
            text: text.to_string(),
        });
        self.entries.push(Entry {
            role: Role::Assistant,
            text: THINKING.to_string(),
        });
    }

    /// Replace the most recent pending placeholder with the reply text.
    pub fn resolve(&mut self, reply: &str) {
        if let Some(entry) = self
            .entries
            .iter_mut()
            .rev()
            .find(|e| e.role == Role::Assistant && e.text == THINKING)
        {
            entry.text = reply.to_string();
        }
    }

    #[allow(dead_code)] // Used by tests; rendering happens line by line.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }
}

/// Extract the reply text from a chat response body, falling back to the
/// documented literal when the field is absent or not a string.
pub fn reply_text(body: &Value) -> String {
    body.get("reply")
        .and_then(Value::as_str)
        .unwrap_or(NO_RESPONSE)
        .to_string()
}
