//! Validation and submission error types

use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// The price checks, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceCheck {
    NotANumber,
    NotPositive,
    BelowMinimum,
}

impl PriceCheck {
    pub fn message(&self) -> &'static str {
        match self {
            Self::NotANumber => "Price must be a number",
            Self::NotPositive => "Price must be a positive number",
            Self::BelowMinimum => "Price must be at least 1",
        }
    }
}

/// A single field-level validation failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// Field is empty or absent
    #[error("{0}")]
    Required(&'static str),

    /// Value present but of the wrong shape
    #[error("{0}")]
    InvalidType(&'static str),

    #[error("{}", .0.message())]
    Price(PriceCheck),

    /// Active group has no entries
    #[error("{0}")]
    TooFew(&'static str),
}

/// Location of a validation failure within the working record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldPath {
    /// A shared top-level field (`title`)
    Base(&'static str),
    /// A whole repeatable group (`events`)
    Group(&'static str),
    /// One field of one entry (`productListings.1.price`)
    Entry {
        group: &'static str,
        index: usize,
        field: &'static str,
    },
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base(name) | Self::Group(name) => f.write_str(name),
            Self::Entry {
                group,
                index,
                field,
            } => write!(f, "{group}.{index}.{field}"),
        }
    }
}

/// Mapping of field path to its first failing check
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<FieldPath, FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error; an earlier error for the same path wins
    pub fn insert(&mut self, path: FieldPath, error: FieldError) {
        self.0.entry(path).or_insert(error);
    }

    pub fn get(&self, path: &FieldPath) -> Option<&FieldError> {
        self.0.get(path)
    }

    /// Message for a path, as delivered to the rendering layer
    pub fn message(&self, path: &FieldPath) -> Option<String> {
        self.get(path).map(ToString::to_string)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldPath, &FieldError)> {
        self.0.iter()
    }

    /// Path/message pairs keyed by the dotted path string
    pub fn to_messages(&self) -> BTreeMap<String, String> {
        self.iter()
            .map(|(path, error)| (path.to_string(), error.to_string()))
            .collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.len() {
            1 => write!(f, "1 field failed validation"),
            n => write!(f, "{n} fields failed validation"),
        }
    }
}

impl std::error::Error for ValidationErrors {}

/// Why a submit did not produce an output record
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("Validation failed: {0}")]
    Invalid(ValidationErrors),

    #[error("Form has already been submitted")]
    AlreadySubmitted,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_error_messages() {
        assert_eq!(
            FieldError::Required("Title is required").to_string(),
            "Title is required"
        );
        assert_eq!(
            FieldError::Price(PriceCheck::BelowMinimum).to_string(),
            "Price must be at least 1"
        );
    }

    #[test]
    fn test_path_display() {
        assert_eq!(FieldPath::Base("title").to_string(), "title");
        assert_eq!(FieldPath::Group("events").to_string(), "events");
        let path = FieldPath::Entry {
            group: "productListings",
            index: 1,
            field: "price",
        };
        assert_eq!(path.to_string(), "productListings.1.price");
    }

    #[test]
    fn test_first_insert_wins() {
        let mut errors = ValidationErrors::new();
        let path = FieldPath::Base("title");
        errors.insert(path, FieldError::Required("first"));
        errors.insert(path, FieldError::Required("second"));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.message(&path).as_deref(), Some("first"));
    }

    #[test]
    fn test_to_messages() {
        let mut errors = ValidationErrors::new();
        errors.insert(FieldPath::Base("author"), FieldError::Required("Author is required"));
        let messages = errors.to_messages();
        assert_eq!(messages.get("author").map(String::as_str), Some("Author is required"));
    }

    #[test]
    fn test_display_counts_fields() {
        let mut errors = ValidationErrors::new();
        errors.insert(FieldPath::Base("title"), FieldError::Required("Title is required"));
        assert_eq!(errors.to_string(), "1 field failed validation");
        errors.insert(FieldPath::Base("author"), FieldError::Required("Author is required"));
        assert_eq!(errors.to_string(), "2 fields failed validation");
    }
}
