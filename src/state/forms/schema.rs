//! Per-content-type entry types and their field rules
//!
//! Each entry type knows its wire field names, labels and the ordered checks
//! for every field. Nothing here knows about the discriminant or the UI.

use super::error::{FieldError, PriceCheck};
use super::field::FieldSpec;
use super::options::PRODUCT_CATEGORY_OPTIONS;
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// A repeatable sub-record with a fixed set of string fields
pub trait EntrySchema: Debug + Clone + Default + PartialEq {
    /// Key of the group in the working and output records
    const GROUP: &'static str;
    /// Message reported when the group is empty
    const MIN_MESSAGE: &'static str;
    /// Fields in display and evaluation order
    const FIELDS: &'static [FieldSpec];

    fn value(&self, field: &str) -> Option<&str>;
    fn value_mut(&mut self, field: &str) -> Option<&mut String>;

    /// Run every field's checks; at most one error per field, in field order
    fn validate(&self) -> Vec<(&'static str, FieldError)>;

    fn field(name: &str) -> Option<&'static FieldSpec> {
        Self::FIELDS.iter().find(|f| f.name == name)
    }
}

/// Fails when the value is empty
pub fn required(value: &str, message: &'static str) -> Result<(), FieldError> {
    if value.is_empty() {
        Err(FieldError::Required(message))
    } else {
        Ok(())
    }
}

/// Price checks: required, finite number, > 0, >= 1. First failure wins.
pub fn validate_price(value: &str) -> Result<(), FieldError> {
    required(value, "Price is required")?;
    let price = value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite())
        .ok_or(FieldError::Price(PriceCheck::NotANumber))?;
    if price <= 0.0 {
        return Err(FieldError::Price(PriceCheck::NotPositive));
    }
    if price < 1.0 {
        return Err(FieldError::Price(PriceCheck::BelowMinimum));
    }
    Ok(())
}

/// Date checks: required, then a real calendar date
pub fn validate_event_date(value: &str) -> Result<(), FieldError> {
    required(value, "Event Date is required")?;
    parse_calendar_date(value)
        .map(|_| ())
        .ok_or(FieldError::InvalidType("Please enter a valid date"))
}

/// Accepts zero-padded `YYYY-MM-DD` and RFC 3339 timestamps, exactly as typed
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .filter(|date| date.format("%Y-%m-%d").to_string() == value)
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

fn collect(checks: &[(&'static str, Result<(), FieldError>)]) -> Vec<(&'static str, FieldError)> {
    checks
        .iter()
        .filter_map(|(name, result)| result.clone().err().map(|e| (*name, e)))
        .collect()
}

// Blog Post

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPostEntry {
    #[serde(rename = "blogPostBody")]
    pub body: String,
    #[serde(rename = "blogPostTags")]
    pub tags: String,
}

impl EntrySchema for BlogPostEntry {
    const GROUP: &'static str = "blogPosts";
    const MIN_MESSAGE: &'static str = "At least one blog post is required";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::multiline("blogPostBody", "Body"),
        FieldSpec::text("blogPostTags", "Tags"),
    ];

    fn value(&self, field: &str) -> Option<&str> {
        match field {
            "blogPostBody" => Some(&self.body),
            "blogPostTags" => Some(&self.tags),
            _ => None,
        }
    }

    fn value_mut(&mut self, field: &str) -> Option<&mut String> {
        match field {
            "blogPostBody" => Some(&mut self.body),
            "blogPostTags" => Some(&mut self.tags),
            _ => None,
        }
    }

    fn validate(&self) -> Vec<(&'static str, FieldError)> {
        collect(&[
            ("blogPostBody", required(&self.body, "Body is required")),
            ("blogPostTags", required(&self.tags, "Tags are required")),
        ])
    }
}

// Product Listing

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductListingEntry {
    #[serde(rename = "productName")]
    pub name: String,
    pub price: String,
    pub category: String,
}

impl EntrySchema for ProductListingEntry {
    const GROUP: &'static str = "productListings";
    const MIN_MESSAGE: &'static str = "At least one product listing is required";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::text("productName", "Product Name"),
        FieldSpec::text("price", "Price"),
        FieldSpec::select("category", "Category", PRODUCT_CATEGORY_OPTIONS),
    ];

    fn value(&self, field: &str) -> Option<&str> {
        match field {
            "productName" => Some(&self.name),
            "price" => Some(&self.price),
            "category" => Some(&self.category),
            _ => None,
        }
    }

    fn value_mut(&mut self, field: &str) -> Option<&mut String> {
        match field {
            "productName" => Some(&mut self.name),
            "price" => Some(&mut self.price),
            "category" => Some(&mut self.category),
            _ => None,
        }
    }

    fn validate(&self) -> Vec<(&'static str, FieldError)> {
        collect(&[
            ("productName", required(&self.name, "Product Name is required")),
            ("price", validate_price(&self.price)),
            ("category", required(&self.category, "Category is required")),
        ])
    }
}

// Event

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEntry {
    #[serde(rename = "eventDate")]
    pub date: String,
    pub location: String,
    pub description: String,
}

impl EntrySchema for EventEntry {
    const GROUP: &'static str = "events";
    const MIN_MESSAGE: &'static str = "At least one event is required";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::date("eventDate", "Event Date"),
        FieldSpec::text("location", "Location"),
        FieldSpec::multiline("description", "Description"),
    ];

    fn value(&self, field: &str) -> Option<&str> {
        match field {
            "eventDate" => Some(&self.date),
            "location" => Some(&self.location),
            "description" => Some(&self.description),
            _ => None,
        }
    }

    fn value_mut(&mut self, field: &str) -> Option<&mut String> {
        match field {
            "eventDate" => Some(&mut self.date),
            "location" => Some(&mut self.location),
            "description" => Some(&mut self.description),
            _ => None,
        }
    }

    fn validate(&self) -> Vec<(&'static str, FieldError)> {
        collect(&[
            ("eventDate", validate_event_date(&self.date)),
            ("location", required(&self.location, "Location is required")),
            ("description", required(&self.description, "Description is required")),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    mod price {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_empty_is_required() {
            assert_eq!(validate_price(""), Err(FieldError::Required("Price is required")));
        }

        #[test]
        fn test_non_numeric_reports_not_a_number_first() {
            assert_eq!(
                validate_price("abc"),
                Err(FieldError::Price(PriceCheck::NotANumber))
            );
        }

        #[test]
        fn test_trailing_garbage_is_not_a_number() {
            assert_eq!(
                validate_price("12abc"),
                Err(FieldError::Price(PriceCheck::NotANumber))
            );
        }

        #[test]
        fn test_infinity_is_not_a_number() {
            assert_eq!(
                validate_price("inf"),
                Err(FieldError::Price(PriceCheck::NotANumber))
            );
            assert_eq!(
                validate_price("NaN"),
                Err(FieldError::Price(PriceCheck::NotANumber))
            );
        }

        #[test]
        fn test_zero_is_not_positive() {
            assert_eq!(
                validate_price("0"),
                Err(FieldError::Price(PriceCheck::NotPositive))
            );
        }

        #[test]
        fn test_negative_is_not_positive() {
            assert_eq!(
                validate_price("-3"),
                Err(FieldError::Price(PriceCheck::NotPositive))
            );
        }

        #[test]
        fn test_fraction_below_one() {
            assert_eq!(
                validate_price("0.5"),
                Err(FieldError::Price(PriceCheck::BelowMinimum))
            );
        }

        #[test]
        fn test_valid_prices() {
            assert!(validate_price("1").is_ok());
            assert!(validate_price("19.99").is_ok());
            assert!(validate_price(" 5 ").is_ok());
            assert!(validate_price("1e3").is_ok());
        }
    }

    mod event_date {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_empty_is_required_not_type_error() {
            assert_eq!(
                validate_event_date(""),
                Err(FieldError::Required("Event Date is required"))
            );
        }

        #[test]
        fn test_garbage_is_type_error() {
            assert_eq!(
                validate_event_date("next tuesday"),
                Err(FieldError::InvalidType("Please enter a valid date"))
            );
        }

        #[test]
        fn test_impossible_date_is_type_error() {
            assert!(validate_event_date("2023-02-30").is_err());
        }

        #[test]
        fn test_iso_date_and_timestamp() {
            assert!(validate_event_date("2024-05-01").is_ok());
            assert!(validate_event_date("2024-05-01T10:00:00Z").is_ok());
        }

        #[test]
        fn test_surrounding_whitespace_is_type_error() {
            assert_eq!(
                validate_event_date(" 2024-05-01 "),
                Err(FieldError::InvalidType("Please enter a valid date"))
            );
        }

        #[test]
        fn test_unpadded_date_is_type_error() {
            assert_eq!(
                validate_event_date("2024-5-1"),
                Err(FieldError::InvalidType("Please enter a valid date"))
            );
            assert_eq!(
                parse_calendar_date("2024-05-01"),
                NaiveDate::from_ymd_opt(2024, 5, 1)
            );
        }
    }

    mod entries {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_empty_blog_post_reports_both_fields() {
            let errors = BlogPostEntry::default().validate();
            assert_eq!(
                errors,
                vec![
                    ("blogPostBody", FieldError::Required("Body is required")),
                    ("blogPostTags", FieldError::Required("Tags are required")),
                ]
            );
        }

        #[test]
        fn test_product_listing_one_error_per_field() {
            let entry = ProductListingEntry {
                name: "Lamp".to_string(),
                price: "abc".to_string(),
                category: String::new(),
            };
            assert_eq!(
                entry.validate(),
                vec![
                    ("price", FieldError::Price(PriceCheck::NotANumber)),
                    ("category", FieldError::Required("Category is required")),
                ]
            );
        }

        #[test]
        fn test_valid_event_has_no_errors() {
            let entry = EventEntry {
                date: "2024-05-01".to_string(),
                location: "Main Hall".to_string(),
                description: "Launch".to_string(),
            };
            assert!(entry.validate().is_empty());
        }

        #[test]
        fn test_value_accessors_match_field_specs() {
            let mut entry = EventEntry::default();
            for spec in EventEntry::FIELDS {
                assert_eq!(entry.value(spec.name), Some(""));
                entry.value_mut(spec.name).unwrap().push('x');
            }
            assert_eq!(entry.location, "x");
            assert!(entry.value("unknown").is_none());
        }

        #[test]
        fn test_field_lookup() {
            let spec = ProductListingEntry::field("category").unwrap();
            assert!(spec.is_select());
            assert!(ProductListingEntry::field("nope").is_none());
        }

        #[test]
        fn test_wire_names() {
            let entry = BlogPostEntry {
                body: "b".to_string(),
                tags: "t".to_string(),
            };
            let json = serde_json::to_value(&entry).unwrap();
            assert_eq!(json, serde_json::json!({"blogPostBody": "b", "blogPostTags": "t"}));
        }
    }
}
