//! List aggregate and the creation draft.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ListingValidationError;
use super::item::{Item, ItemDraft, ItemId};
use super::validation::{ensure_non_blank, validate_non_empty_field};
use crate::domain::UserId;

/// Stable list identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListId(Uuid);

impl ListId {
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

impl fmt::Display for ListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ListId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Unvalidated input for creating a list together with its items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDraft {
    pub listname: String,
    pub category: String,
    pub owner: UserId,
    #[serde(default)]
    pub items: Vec<ItemDraft>,
}

impl ListDraft {
    /// Check the list's own text fields without looking at its items.
    pub fn validate_list_fields(&self) -> Result<(), ListingValidationError> {
        ensure_non_blank(&self.listname, "listname")?;
        ensure_non_blank(&self.category, "category")
    }
}

/// Named, categorised collection of items.
///
/// ## Invariants
/// - `listname` and `category` are non-blank.
/// - every id in `item_ids` belongs to an item whose `list_id` is this
///   list's id, in submission order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct List {
    id: ListId,
    listname: String,
    category: String,
    owner_id: UserId,
    item_ids: Vec<ItemId>,
}

impl List {
    /// Rebuild a list from stored values.
    ///
    /// `item_ids` must be the ids of the items whose back-reference points at
    /// `id`, ordered by position.
    pub fn from_parts(
        id: ListId,
        listname: String,
        category: String,
        owner_id: UserId,
        item_ids: Vec<ItemId>,
    ) -> Result<Self, ListingValidationError> {
        Ok(Self {
            id,
            listname: validate_non_empty_field(listname, "listname")?,
            category: validate_non_empty_field(category, "category")?,
            owner_id,
            item_ids,
        })
    }

    pub fn id(&self) -> ListId {
        self.id
    }

    pub fn listname(&self) -> &str {
        self.listname.as_str()
    }

    pub fn category(&self) -> &str {
        self.category.as_str()
    }

    pub fn owner_id(&self) -> UserId {
        self.owner_id
    }

    /// Ids of the list's items in submission order.
    pub fn item_ids(&self) -> &[ItemId] {
        &self.item_ids
    }

    /// Summary projection joined onto items in search results.
    pub fn summary(&self) -> ListSummary {
        ListSummary {
            id: self.id,
            listname: self.listname.clone(),
            category: self.category.clone(),
        }
    }
}

/// List fields exposed next to an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSummary {
    pub id: ListId,
    pub listname: String,
    pub category: String,
}

/// A validated list and its items, ready to be persisted in one unit.
#[derive(Debug, Clone, PartialEq)]
pub struct NewList {
    list: List,
    items: Vec<Item>,
}

impl NewList {
    /// Validate a draft and assign fresh identifiers.
    ///
    /// Every item is checked before the aggregate exists, so a failure never
    /// leaves a partial list behind. Item errors report the zero-based index
    /// of the first offending item.
    ///
    /// # Examples
    /// ```
    /// use marketplace::domain::{ItemDraft, ListDraft, NewList, UserId};
    ///
    /// let draft = ListDraft {
    ///     listname: "Garage Sale".into(),
    ///     category: "Tools".into(),
    ///     owner: UserId::random(),
    ///     items: vec![ItemDraft::new("Hammer", "http://x/1.jpg", "steel", 10.0)],
    /// };
    /// let new_list = NewList::new(draft).expect("valid draft");
    /// assert_eq!(new_list.list().item_ids().len(), 1);
    /// assert_eq!(new_list.items()[0].list_id(), new_list.list().id());
    /// ```
    pub fn new(draft: ListDraft) -> Result<Self, ListingValidationError> {
        let ListDraft {
            listname,
            category,
            owner,
            items,
        } = draft;
        let listname = validate_non_empty_field(listname, "listname")?;
        let category = validate_non_empty_field(category, "category")?;
        let list_id = ListId::random();

        let items = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                Item::new(ItemId::random(), list_id, owner, item).map_err(|error| {
                    ListingValidationError::Item {
                        index,
                        error: Box::new(error),
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let list = List {
            id: list_id,
            listname,
            category,
            owner_id: owner,
            item_ids: items.iter().map(Item::id).collect(),
        };
        Ok(Self { list, items })
    }

    pub fn list(&self) -> &List {
        &self.list
    }

    /// Items in submission order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Split into the list and its items.
    pub fn into_parts(self) -> (List, Vec<Item>) {
        (self.list, self.items)
    }
}
