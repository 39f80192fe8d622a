//! Application state definitions

use super::forms::{ContentRecord, ContentType, FormFocus, FormSession};
use std::collections::VecDeque;

/// Everything the shell keeps between key events
#[derive(Debug, Clone)]
pub struct AppState {
    /// The live form session; replaced when a new one is started
    pub session: FormSession,
    /// Keyboard focus within the session
    pub focus: FormFocus,
    /// Content type new sessions start with
    pub default_content_type: ContentType,
    /// Last record accepted by the sink
    pub last_record: Option<ContentRecord>,
    /// Transient one-line message for the status bar
    pub status_message: Option<String>,
    /// Errors waiting to be shown in the modal dialog, oldest first
    error_queue: VecDeque<String>,
}

impl AppState {
    pub fn new(default_content_type: ContentType) -> Self {
        Self {
            session: FormSession::new(default_content_type),
            focus: FormFocus::default(),
            default_content_type,
            last_record: None,
            status_message: None,
            error_queue: VecDeque::new(),
        }
    }

    /// Discard the current session and start an empty one
    pub fn start_new_session(&mut self) {
        tracing::info!("Starting new form session");
        self.session = FormSession::new(self.default_content_type);
        self.focus = FormFocus::default();
        self.status_message = None;
    }

    pub fn push_error(&mut self, message: String) {
        tracing::warn!(%message, "Error queued");
        self.error_queue.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.error_queue.is_empty()
    }

    pub fn current_error(&self) -> Option<&str> {
        self.error_queue.front().map(String::as_str)
    }

    /// Errors queued behind the one on screen
    pub fn pending_errors(&self) -> usize {
        self.error_queue.len().saturating_sub(1)
    }

    pub fn dismiss_error(&mut self) {
        self.error_queue.pop_front();
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ContentType::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::{BaseField, SessionState};

    #[test]
    fn test_error_queue_is_fifo() {
        let mut state = AppState::default();
        assert!(!state.has_errors());
        state.push_error("first".to_string());
        state.push_error("second".to_string());
        assert_eq!(state.current_error(), Some("first"));
        assert_eq!(state.pending_errors(), 1);
        state.dismiss_error();
        assert_eq!(state.current_error(), Some("second"));
        state.dismiss_error();
        assert!(!state.has_errors());
    }

    #[test]
    fn test_dismiss_on_empty_queue_is_noop() {
        let mut state = AppState::default();
        state.dismiss_error();
        assert!(state.current_error().is_none());
    }

    #[test]
    fn test_new_session_uses_default_content_type() {
        let mut state = AppState::new(ContentType::Event);
        state.session.set_base(BaseField::Title, "Old");
        state.start_new_session();
        assert_eq!(state.session.content_type(), "Event");
        assert_eq!(state.session.base(BaseField::Title), "");
        assert_eq!(state.session.state(), SessionState::Editing);
    }
}
