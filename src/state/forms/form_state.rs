//! Form session: owns the working record and drives validation and submission

use super::error::{FieldPath, SubmitError, ValidationErrors};
use super::field::FieldSpec;
use super::group::EntryKey;
use super::options::ContentType;
use super::record::{BaseField, ContentRecord, FormValues};
use super::schema::{BlogPostEntry, EntrySchema, EventEntry, ProductListingEntry};
use super::validator::{self, ActiveSchema};

/// Borrow the group for a content type and evaluate `$body` against it
macro_rules! with_group {
    ($values:expr, $content_type:expr, |mut $group:ident| $body:expr) => {
        match $content_type {
            ContentType::BlogPost => {
                let $group = &mut $values.blog_posts;
                $body
            }
            ContentType::ProductListing => {
                let $group = &mut $values.product_listings;
                $body
            }
            ContentType::Event => {
                let $group = &mut $values.events;
                $body
            }
        }
    };
    ($values:expr, $content_type:expr, |$group:ident| $body:expr) => {
        match $content_type {
            ContentType::BlogPost => {
                let $group = &$values.blog_posts;
                $body
            }
            ContentType::ProductListing => {
                let $group = &$values.product_listings;
                $body
            }
            ContentType::Event => {
                let $group = &$values.events;
                $body
            }
        }
    };
}

/// Lifecycle of one form session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Editing,
    /// Terminal: reached only after a passing validation
    Submitted,
}

/// Owns everything entered into one instance of the form
#[derive(Debug, Clone)]
pub struct FormSession {
    values: FormValues,
    state: SessionState,
    errors: ValidationErrors,
    /// Once set, every mutation re-runs validation
    submit_attempted: bool,
}

impl FormSession {
    pub fn new(content_type: ContentType) -> Self {
        tracing::debug!(%content_type, "Starting form session");
        Self {
            values: FormValues::new(content_type),
            state: SessionState::Editing,
            errors: ValidationErrors::new(),
            submit_attempted: false,
        }
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_submitted(&self) -> bool {
        self.state() == SessionState::Submitted
    }

    /// Raw discriminant value
    pub fn content_type(&self) -> &str {
        &self.values.content_type
    }

    /// Schema for the current discriminant, resolved on each call
    pub fn active_schema(&self) -> ActiveSchema {
        ActiveSchema::resolve(&self.values.content_type)
    }

    /// Content type whose group is shown, if any
    pub fn active_content_type(&self) -> Option<ContentType> {
        self.active_schema().content_type()
    }

    pub fn base(&self, field: BaseField) -> &str {
        self.values.base(field)
    }

    /// Change the discriminant. Groups of other content types are kept.
    pub fn set_content_type(&mut self, value: impl Into<String>) -> bool {
        let value = value.into();
        if !self.can_edit() {
            return false;
        }
        if value != self.values.content_type {
            tracing::info!(from = %self.values.content_type, to = %value, "Content type changed");
        }
        self.values.content_type = value;
        self.after_change();
        true
    }

    pub fn set_base(&mut self, field: BaseField, value: impl Into<String>) -> bool {
        if field == BaseField::ContentType {
            return self.set_content_type(value);
        }
        if !self.can_edit() {
            return false;
        }
        *self.values.base_mut(field) = value.into();
        self.after_change();
        true
    }

    pub fn fields(content_type: ContentType) -> &'static [FieldSpec] {
        match content_type {
            ContentType::BlogPost => BlogPostEntry::FIELDS,
            ContentType::ProductListing => ProductListingEntry::FIELDS,
            ContentType::Event => EventEntry::FIELDS,
        }
    }

    /// Descriptor of one entry field
    pub fn field_spec(content_type: ContentType, name: &str) -> Option<FieldSpec> {
        let spec = match content_type {
            ContentType::BlogPost => BlogPostEntry::field(name),
            ContentType::ProductListing => ProductListingEntry::field(name),
            ContentType::Event => EventEntry::field(name),
        };
        spec.copied()
    }

    pub fn group_key(content_type: ContentType) -> &'static str {
        match content_type {
            ContentType::BlogPost => BlogPostEntry::GROUP,
            ContentType::ProductListing => ProductListingEntry::GROUP,
            ContentType::Event => EventEntry::GROUP,
        }
    }

    pub fn entry_keys(&self, content_type: ContentType) -> Vec<EntryKey> {
        with_group!(self.values, content_type, |group| group.keys().collect())
    }

    pub fn entry_count(&self, content_type: ContentType) -> usize {
        with_group!(self.values, content_type, |group| group.len())
    }

    pub fn entry_position(&self, content_type: ContentType, key: EntryKey) -> Option<usize> {
        with_group!(self.values, content_type, |group| group.position(key))
    }

    pub fn entry_value(&self, content_type: ContentType, key: EntryKey, field: &str) -> Option<&str> {
        with_group!(self.values, content_type, |group| group
            .get(key)
            .and_then(|entry| entry.value(field)))
    }

    /// Find which content type's group holds an entry
    pub fn content_type_of(&self, key: EntryKey) -> Option<ContentType> {
        ContentType::ALL
            .into_iter()
            .find(|t| self.entry_position(*t, key).is_some())
    }

    pub fn can_append(&self, content_type: ContentType) -> bool {
        !self.is_submitted() && with_group!(self.values, content_type, |group| group.can_append())
    }

    pub fn can_remove(&self, content_type: ContentType) -> bool {
        !self.is_submitted() && with_group!(self.values, content_type, |group| group.can_remove())
    }

    /// Append an empty entry; `None` at capacity or after submission
    pub fn append_entry(&mut self, content_type: ContentType) -> Option<EntryKey> {
        if !self.can_edit() {
            return None;
        }
        let key = with_group!(self.values, content_type, |mut group| group.append_default());
        if key.is_some() {
            self.after_change();
        }
        key
    }

    /// Remove an entry by identity; no-op when it is the last one
    pub fn remove_entry(&mut self, content_type: ContentType, key: EntryKey) -> bool {
        if !self.can_edit() {
            return false;
        }
        let removed = with_group!(self.values, content_type, |mut group| group.remove_key(key));
        if removed {
            self.after_change();
        }
        removed
    }

    /// Set one field of one entry. False for unknown entries or fields.
    pub fn set_entry_field(
        &mut self,
        content_type: ContentType,
        key: EntryKey,
        field: &str,
        value: impl Into<String>,
    ) -> bool {
        if !self.can_edit() {
            return false;
        }
        let slot = with_group!(self.values, content_type, |mut group| group
            .get_mut(key)
            .and_then(|entry| entry.value_mut(field))
            .map(|slot| *slot = value.into()));
        if slot.is_some() {
            self.after_change();
            true
        } else {
            false
        }
    }

    /// Validate the current values without changing session state
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        validator::validate(self.values())
    }

    /// Errors from the last submit attempt, kept current on each change
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn error_for(&self, path: &FieldPath) -> Option<String> {
        self.errors.message(path)
    }

    /// Error message for one field of one entry, looked up by its current position
    pub fn entry_error(&self, content_type: ContentType, key: EntryKey, field: &'static str) -> Option<String> {
        let index = self.entry_position(content_type, key)?;
        self.error_for(&FieldPath::Entry {
            group: Self::group_key(content_type),
            index,
            field,
        })
    }

    /// Validate and, on success, produce the filtered record and move to `Submitted`
    pub fn submit(&mut self) -> Result<ContentRecord, SubmitError> {
        if self.is_submitted() {
            return Err(SubmitError::AlreadySubmitted);
        }
        self.submit_attempted = true;

        if let Err(errors) = self.validate() {
            tracing::info!(count = errors.len(), "Submit blocked by validation errors");
            tracing::debug!(errors = ?errors.to_messages(), "Validation failures");
            self.errors = errors.clone();
            return Err(SubmitError::Invalid(errors));
        }

        self.errors.clear();
        let record = self.build_record();
        self.state = SessionState::Submitted;
        tracing::info!(
            content_type = %record.content_type,
            branch = record.branch_key().unwrap_or("none"),
            entries = record.entry_count(),
            "Form submitted"
        );
        Ok(record)
    }

    fn build_record(&self) -> ContentRecord {
        let mut record = ContentRecord {
            content_type: self.values.content_type.clone(),
            title: self.values.title.clone(),
            author: self.values.author.clone(),
            blog_posts: None,
            product_listings: None,
            events: None,
        };
        match self.active_schema() {
            ActiveSchema::BlogPost => record.blog_posts = Some(self.values.blog_posts.to_vec()),
            ActiveSchema::ProductListing => {
                record.product_listings = Some(self.values.product_listings.to_vec())
            }
            ActiveSchema::Event => record.events = Some(self.values.events.to_vec()),
            ActiveSchema::BaseOnly => {}
        }
        record
    }

    fn can_edit(&self) -> bool {
        if self.is_submitted() {
            tracing::debug!("Ignoring edit to a submitted form");
            return false;
        }
        true
    }

    fn after_change(&mut self) {
        if self.submit_attempted {
            self.errors = self.validate().err().unwrap_or_default();
        }
    }
}

impl Default for FormSession {
    fn default() -> Self {
        Self::new(ContentType::default())
    }
}
