//! Working record edited by the form and the filtered output record

use super::field::FieldSpec;
use super::group::RepeatableGroup;
use super::options::{ContentType, CONTENT_TYPE_OPTIONS};
use super::schema::{BlogPostEntry, EventEntry, ProductListingEntry};
use serde::{Deserialize, Serialize};

/// Shared top-level fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseField {
    ContentType,
    Title,
    Author,
}

impl BaseField {
    pub const ALL: [BaseField; 3] = [Self::ContentType, Self::Title, Self::Author];

    pub fn name(&self) -> &'static str {
        match self {
            Self::ContentType => "contentType",
            Self::Title => "title",
            Self::Author => "author",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::ContentType => "Content Type",
            Self::Title => "Title",
            Self::Author => "Author",
        }
    }

    /// Descriptor used by the rendering layer
    pub fn spec(&self) -> FieldSpec {
        match self {
            Self::ContentType => {
                FieldSpec::select(self.name(), self.label(), CONTENT_TYPE_OPTIONS)
            }
            Self::Title | Self::Author => FieldSpec::text(self.name(), self.label()),
        }
    }

    pub fn required_message(&self) -> &'static str {
        match self {
            Self::ContentType => "Content type is required",
            Self::Title => "Title is required",
            Self::Author => "Author is required",
        }
    }
}

/// Everything the user has entered, across all branches
#[derive(Debug, Clone, PartialEq)]
pub struct FormValues {
    /// Raw discriminant; may be empty or unrecognized
    pub content_type: String,
    pub title: String,
    pub author: String,
    pub blog_posts: RepeatableGroup<BlogPostEntry>,
    pub product_listings: RepeatableGroup<ProductListingEntry>,
    pub events: RepeatableGroup<EventEntry>,
}

impl FormValues {
    pub fn new(content_type: ContentType) -> Self {
        Self {
            content_type: content_type.value().to_string(),
            title: String::new(),
            author: String::new(),
            blog_posts: RepeatableGroup::new(),
            product_listings: RepeatableGroup::new(),
            events: RepeatableGroup::new(),
        }
    }

    pub fn base(&self, field: BaseField) -> &str {
        match field {
            BaseField::ContentType => &self.content_type,
            BaseField::Title => &self.title,
            BaseField::Author => &self.author,
        }
    }

    pub fn base_mut(&mut self, field: BaseField) -> &mut String {
        match field {
            BaseField::ContentType => &mut self.content_type,
            BaseField::Title => &mut self.title,
            BaseField::Author => &mut self.author,
        }
    }
}

impl Default for FormValues {
    fn default() -> Self {
        Self::new(ContentType::default())
    }
}

/// The filtered record handed to the submission sink.
///
/// At most one branch is present; the others are omitted from the JSON form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRecord {
    pub content_type: String,
    pub title: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blog_posts: Option<Vec<BlogPostEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_listings: Option<Vec<ProductListingEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<EventEntry>>,
}

impl ContentRecord {
    /// Key of the branch carried by this record, if any
    pub fn branch_key(&self) -> Option<&'static str> {
        if self.blog_posts.is_some() {
            Some("blogPosts")
        } else if self.product_listings.is_some() {
            Some("productListings")
        } else if self.events.is_some() {
            Some("events")
        } else {
            None
        }
    }

    pub fn entry_count(&self) -> usize {
        self.blog_posts.as_ref().map_or(0, Vec::len)
            + self.product_listings.as_ref().map_or(0, Vec::len)
            + self.events.as_ref().map_or(0, Vec::len)
    }
}
