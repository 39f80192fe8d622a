//! Constant option sources for select fields

use serde::{Deserialize, Serialize};
use std::fmt;

/// A selectable `{value, label}` pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

impl SelectOption {
    pub const fn new(value: &'static str, label: &'static str) -> Self {
        Self { value, label }
    }
}

/// Content type discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ContentType {
    #[default]
    #[serde(rename = "Blog Post")]
    BlogPost,
    #[serde(rename = "Product Listing")]
    ProductListing,
    #[serde(rename = "Event")]
    Event,
}

impl ContentType {
    pub const ALL: [ContentType; 3] = [Self::BlogPost, Self::ProductListing, Self::Event];

    /// Wire value stored in the form and emitted in the output record
    pub fn value(&self) -> &'static str {
        match self {
            Self::BlogPost => "Blog Post",
            Self::ProductListing => "Product Listing",
            Self::Event => "Event",
        }
    }

    pub fn label(&self) -> &'static str {
        self.value()
    }

    /// Parse a wire value; `None` for empty or unrecognized values
    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.value() == value)
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

pub const CONTENT_TYPE_OPTIONS: &[SelectOption] = &[
    SelectOption::new("Blog Post", "Blog Post"),
    SelectOption::new("Product Listing", "Product Listing"),
    SelectOption::new("Event", "Event"),
];

pub const PRODUCT_CATEGORY_OPTIONS: &[SelectOption] = &[
    SelectOption::new("Electronics", "Electronics"),
    SelectOption::new("Clothing", "Clothing"),
    SelectOption::new("Home & Garden", "Home & Garden"),
    SelectOption::new("Books", "Books"),
    SelectOption::new("Toys", "Toys"),
];

/// Find the label for a value in an option list
pub fn label_for(options: &[SelectOption], value: &str) -> Option<&'static str> {
    options.iter().find(|o| o.value == value).map(|o| o.label)
}
