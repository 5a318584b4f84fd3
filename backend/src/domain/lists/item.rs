//! Item entity.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ListingValidationError;
use super::list::ListId;
use super::validation::{ensure_valid_price, require_field, validate_non_empty_field};
use crate::domain::UserId;

/// Stable item identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(Uuid);

impl ItemId {
    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap a stored UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Item price: finite and never negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Price(f64);

impl Price {
    /// Validate and wrap a price.
    ///
    /// # Examples
    /// ```
    /// use marketplace::domain::Price;
    ///
    /// assert_eq!(Price::new(10.0).map(|p| p.value()), Ok(10.0));
    /// assert!(Price::new(-1.0).is_err());
    /// ```
    pub fn new(value: f64) -> Result<Self, ListingValidationError> {
        ensure_valid_price(value, "price").map(Self)
    }

    /// Numeric value.
    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Price {
    type Error = ListingValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Price> for f64 {
    fn from(value: Price) -> Self {
        value.0
    }
}

/// Unvalidated item fields as submitted alongside a new list.
///
/// Fields are optional so an absent value is reported against the item's
/// index once the owner has been resolved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDraft {
    pub name: Option<String>,
    pub photo: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
}

impl ItemDraft {
    /// Draft with every field present.
    pub fn new(
        name: impl Into<String>,
        photo: impl Into<String>,
        description: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            name: Some(name.into()),
            photo: Some(photo.into()),
            description: Some(description.into()),
            price: Some(price),
        }
    }
}

/// Item belonging to exactly one list.
///
/// ## Invariants
/// - `name`, `photo` and `description` are non-blank.
/// - `price` is finite and non-negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    id: ItemId,
    list_id: ListId,
    owner_id: UserId,
    name: String,
    photo: String,
    description: String,
    price: Price,
}

impl Item {
    /// Validate `draft` and bind it to its list and owner.
    pub fn new(
        id: ItemId,
        list_id: ListId,
        owner_id: UserId,
        draft: ItemDraft,
    ) -> Result<Self, ListingValidationError> {
        let name = validate_non_empty_field(require_field(draft.name, "name")?, "name")?;
        let photo = validate_non_empty_field(require_field(draft.photo, "photo")?, "photo")?;
        let description = validate_non_empty_field(
            require_field(draft.description, "description")?,
            "description",
        )?;
        let price = Price::new(require_field(draft.price, "price")?)?;
        Ok(Self {
            id,
            list_id,
            owner_id,
            name,
            photo,
            description,
            price,
        })
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Back-reference to the owning list; the authoritative membership link.
    pub fn list_id(&self) -> ListId {
        self.list_id
    }

    pub fn owner_id(&self) -> UserId {
        self.owner_id
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn photo(&self) -> &str {
        self.photo.as_str()
    }

    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    pub fn price(&self) -> Price {
        self.price
    }
}
