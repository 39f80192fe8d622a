//! Application state and core logic

use crate::config::FormConfig;
use crate::sink::{self, SubmissionSink};
use crate::state::{
    focus_order, AppState, BaseField, FieldEdit, FieldPath, FieldSpec, FocusTarget, FormSession,
    SubmitError, MAX_ENTRIES,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Where submitted records go
    sink: Box<dyn SubmissionSink>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App from the user's configuration
    pub fn new(config: &FormConfig) -> Self {
        let sink = sink::from_config(config);
        tracing::info!(sink = %sink.describe(), "Submission sink ready");
        Self::with_sink(AppState::new(config.content_type()), sink)
    }

    pub fn with_sink(state: AppState, sink: Box<dyn SubmissionSink>) -> Self {
        Self {
            state,
            sink,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn sink_description(&self) -> String {
        self.sink.describe()
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Handle a key press
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if ctrl && key.code == KeyCode::Char('c') {
            self.quit = true;
            return Ok(());
        }

        // Copy last record (Cmd+Y / Ctrl+Y)
        if key.code == KeyCode::Char('y')
            && (ctrl || key.modifiers.contains(crate::platform::COPY_MODIFIER))
        {
            self.copy_last_record();
            return Ok(());
        }

        if self.state.session.is_submitted() {
            self.handle_submitted_key(key);
            return Ok(());
        }

        self.state.status_message = None;

        match key.code {
            KeyCode::Esc => self.quit = true,
            KeyCode::Char('s') if ctrl => self.submit().await,
            KeyCode::Char('n') if ctrl => self.add_entry(),
            KeyCode::Char('d') if ctrl => self.remove_focused_entry(),
            KeyCode::Tab | KeyCode::Down => self.state.focus.next(&self.state.session),
            KeyCode::BackTab | KeyCode::Up => self.state.focus.prev(&self.state.session),
            KeyCode::Left => {
                self.edit_focused(FieldEdit::PrevOption);
            }
            KeyCode::Right => {
                self.edit_focused(FieldEdit::NextOption);
            }
            KeyCode::Enter => self.activate_focused().await,
            KeyCode::Backspace => {
                self.edit_focused(FieldEdit::Backspace);
            }
            KeyCode::Delete if ctrl => {
                self.edit_focused(FieldEdit::Clear);
            }
            KeyCode::Char(' ') if self.focused_spec().is_some_and(|s| s.is_select()) => {
                self.edit_focused(FieldEdit::NextOption);
            }
            KeyCode::Char(c) if !ctrl => {
                self.edit_focused(FieldEdit::Insert(c));
            }
            _ => {}
        }
        Ok(())
    }

    /// Keys accepted once the session has been submitted
    fn handle_submitted_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('n') | KeyCode::Enter => self.state.start_new_session(),
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            _ => {}
        }
    }

    /// Enter: press buttons, break lines in multiline fields, otherwise advance
    async fn activate_focused(&mut self) {
        match self.state.focus.target() {
            FocusTarget::Submit => self.submit().await,
            FocusTarget::AddEntry => self.add_entry(),
            FocusTarget::RemoveEntry(_) => self.remove_focused_entry(),
            _ => {
                if !self.edit_focused(FieldEdit::Newline) {
                    self.state.focus.next(&self.state.session);
                }
            }
        }
    }

    /// Descriptor of the focused field, if focus is on a field
    fn focused_spec(&self) -> Option<FieldSpec> {
        match self.state.focus.target() {
            FocusTarget::Base(field) => Some(field.spec()),
            FocusTarget::EntryField { field, .. } => {
                let content_type = self.state.session.active_content_type()?;
                FormSession::field_spec(content_type, field)
            }
            _ => None,
        }
    }

    /// Apply an edit to the focused field and call back into the session with
    /// the new value. Returns false when the edit did not apply.
    fn edit_focused(&mut self, edit: FieldEdit) -> bool {
        let Some(spec) = self.focused_spec() else {
            return false;
        };
        let session = &mut self.state.session;
        let applied = match self.state.focus.target() {
            FocusTarget::Base(field) => match spec.apply(session.base(field), edit) {
                Some(value) => session.set_base(field, value),
                None => false,
            },
            FocusTarget::EntryField { key, field } => {
                let Some(content_type) = session.active_content_type() else {
                    return false;
                };
                let new_value = session
                    .entry_value(content_type, key, field)
                    .and_then(|current| spec.apply(current, edit));
                match new_value {
                    Some(value) => session.set_entry_field(content_type, key, field, value),
                    None => false,
                }
            }
            _ => false,
        };
        if applied && self.state.focus.target() == FocusTarget::Base(BaseField::ContentType) {
            // The set of entry targets depends on the content type
            self.state.focus.settle(&self.state.session);
        }
        applied
    }

    /// Append an entry to the active group and focus its first field
    fn add_entry(&mut self) {
        let Some(content_type) = self.state.session.active_content_type() else {
            return;
        };
        match self.state.session.append_entry(content_type) {
            Some(key) => {
                if let Some(first) = FormSession::fields(content_type).first() {
                    let target = FocusTarget::EntryField {
                        key,
                        field: first.name,
                    };
                    self.state.focus.focus(&self.state.session, target);
                }
            }
            None => {
                self.state.status_message = Some(format!(
                    "At most {} entries per content type",
                    MAX_ENTRIES
                ));
            }
        }
        self.state.focus.settle(&self.state.session);
    }

    /// Remove the entry that currently holds focus
    fn remove_focused_entry(&mut self) {
        let Some(key) = self.state.focus.target().entry_key() else {
            return;
        };
        let Some(content_type) = self.state.session.content_type_of(key) else {
            return;
        };
        if !self.state.session.remove_entry(content_type, key) {
            self.state.status_message = Some("At least one entry is required".to_string());
        }
        self.state.focus.settle(&self.state.session);
    }

    /// Validate, build the record and hand it to the sink
    async fn submit(&mut self) {
        match self.state.session.submit() {
            Ok(record) => {
                match self.sink.submit(&record).await {
                    Ok(()) => {
                        self.state.status_message =
                            Some(format!("Submitted to {}", self.sink.describe()));
                    }
                    Err(e) => {
                        self.push_error(format!("Failed to deliver record: {e}"));
                    }
                }
                self.state.last_record = Some(record);
            }
            Err(SubmitError::Invalid(errors)) => {
                self.state.status_message = Some(errors.to_string());
                if let Some(target) = self.first_invalid_target() {
                    self.state.focus.focus(&self.state.session, target);
                }
            }
            Err(SubmitError::AlreadySubmitted) => {}
        }
    }

    /// First focus target, in display order, whose field has an error
    fn first_invalid_target(&self) -> Option<FocusTarget> {
        let session = &self.state.session;
        focus_order(session).into_iter().find(|target| match target {
            FocusTarget::Base(field) => session.error_for(&FieldPath::Base(field.name())).is_some(),
            FocusTarget::EntryField { key, field } => session
                .active_content_type()
                .and_then(|t| session.entry_error(t, *key, *field))
                .is_some(),
            _ => false,
        })
    }

    /// Copy the last submitted record to the clipboard as pretty JSON
    fn copy_last_record(&mut self) {
        let Some(record) = &self.state.last_record else {
            self.state.status_message = Some("Nothing submitted yet".to_string());
            return;
        };
        let result = serde_json::to_string_pretty(record)
            .map_err(anyhow::Error::from)
            .and_then(|json| copy_to_clipboard(&json));
        match result {
            Ok(()) => self.state.status_message = Some("Copied record to clipboard".to_string()),
            Err(e) => self.push_error(format!("Failed to copy: {e}")),
        }
    }
}

fn copy_to_clipboard(text: &str) -> Result<()> {
    use arboard::Clipboard;
    let mut clipboard = Clipboard::new()?;
    clipboard.set_text(text)?;
    Ok(())
}
