//! Discriminated validation of the working record
//!
//! The base fields are always checked. Which repeatable group is required,
//! and with which entry rules, depends on the content type at the moment of
//! validation; the schema is resolved on every pass rather than fixed when the
//! form is built.

use super::error::{FieldError, FieldPath, ValidationErrors};
use super::options::ContentType;
use super::record::{BaseField, FormValues};
use super::schema::EntrySchema;

/// The schema shape selected by the discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveSchema {
    BlogPost,
    ProductListing,
    Event,
    /// Unrecognized discriminant: base fields only
    BaseOnly,
}

impl ActiveSchema {
    /// Resolve from the raw discriminant. Empty selects the blog post branch.
    pub fn resolve(content_type: &str) -> Self {
        if content_type.is_empty() {
            return Self::BlogPost;
        }
        match ContentType::from_value(content_type) {
            Some(t) => t.into(),
            None => Self::BaseOnly,
        }
    }

    pub fn content_type(&self) -> Option<ContentType> {
        match self {
            Self::BlogPost => Some(ContentType::BlogPost),
            Self::ProductListing => Some(ContentType::ProductListing),
            Self::Event => Some(ContentType::Event),
            Self::BaseOnly => None,
        }
    }
}

impl From<ContentType> for ActiveSchema {
    fn from(content_type: ContentType) -> Self {
        match content_type {
            ContentType::BlogPost => Self::BlogPost,
            ContentType::ProductListing => Self::ProductListing,
            ContentType::Event => Self::Event,
        }
    }
}

/// Validate the working record against the schema for its current discriminant
pub fn validate(values: &FormValues) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    for field in BaseField::ALL {
        if values.base(field).is_empty() {
            errors.insert(
                FieldPath::Base(field.name()),
                FieldError::Required(field.required_message()),
            );
        }
    }

    match ActiveSchema::resolve(&values.content_type) {
        ActiveSchema::BlogPost => validate_group(values.blog_posts.values(), &mut errors),
        ActiveSchema::ProductListing => {
            validate_group(values.product_listings.values(), &mut errors)
        }
        ActiveSchema::Event => validate_group(values.events.values(), &mut errors),
        ActiveSchema::BaseOnly => {}
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Check the group's cardinality, then every entry's fields
pub fn validate_group<'a, T, I>(entries: I, errors: &mut ValidationErrors)
where
    T: EntrySchema + 'a,
    I: ExactSizeIterator<Item = &'a T>,
{
    if entries.len() == 0 {
        errors.insert(FieldPath::Group(T::GROUP), FieldError::TooFew(T::MIN_MESSAGE));
        return;
    }
    for (index, entry) in entries.enumerate() {
        for (field, error) in entry.validate() {
            errors.insert(
                FieldPath::Entry {
                    group: T::GROUP,
                    index,
                    field,
                },
                error,
            );
        }
    }
}
