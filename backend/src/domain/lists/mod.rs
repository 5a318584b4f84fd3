//! Lists and the items they contain.
//!
//! A [`List`] is created together with its [`Item`]s through
//! [`NewList::new`], which validates every field before any identifier is
//! handed out. Item membership is owned by the item's back-reference
//! ([`Item::list_id`]); a list's ordered item ids are derived from it.

use std::fmt;

mod item;
mod list;
mod search;
mod validation;

pub use item::{Item, ItemDraft, ItemId, Price};
pub use list::{List, ListDraft, ListId, ListSummary, NewList};
pub use search::{ItemSearch, ItemSearchBuilder};

/// Validation errors returned by list and item constructors.
#[derive(Debug, Clone, PartialEq)]
pub enum ListingValidationError {
    MissingField {
        field: &'static str,
    },
    EmptyField {
        field: &'static str,
    },
    InvalidPrice {
        field: &'static str,
        value: f64,
    },
    /// The item at `index` (zero-based, in submission order) is invalid.
    Item {
        index: usize,
        error: Box<ListingValidationError>,
    },
}

impl ListingValidationError {
    /// Name of the offending field, without any item index.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingField { field }
            | Self::EmptyField { field }
            | Self::InvalidPrice { field, .. } => field,
            Self::Item { error, .. } => error.field(),
        }
    }

    /// The field-level failure with any item wrapping removed.
    pub fn leaf(&self) -> &Self {
        match self {
            Self::Item { error, .. } => error.leaf(),
            other => other,
        }
    }

    /// Index of the offending item, when the failure concerns an item.
    pub fn item_index(&self) -> Option<usize> {
        match self {
            Self::Item { index, .. } => Some(*index),
            _ => None,
        }
    }
}

impl fmt::Display for ListingValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField { field } => write!(f, "missing required field: {field}"),
            Self::EmptyField { field } => write!(f, "{field} must not be empty"),
            Self::InvalidPrice { field, value } => {
                write!(f, "{field} must be a finite, non-negative number (got {value})")
            }
            Self::Item { index, error } => write!(f, "items[{index}]: {error}"),
        }
    }
}

impl std::error::Error for ListingValidationError {}
