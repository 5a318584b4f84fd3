//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    Item, ItemDraft, ItemId, List, ListId, ListSummary, ListingValidationError, Owner, UserId,
};

use super::schema::{items, lists, users};

/// Owner columns read from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
}

impl From<UserRow> for Owner {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId::from_uuid(row.id),
            first_name: row.firstname,
            last_name: row.lastname,
            email: row.email,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = lists)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ListRow {
    pub id: Uuid,
    pub listname: String,
    pub category: String,
    pub owner_id: Uuid,
}

impl ListRow {
    /// Rebuild the domain list; `item_ids` must already be in position order.
    pub fn into_list(self, item_ids: Vec<ItemId>) -> Result<List, ListingValidationError> {
        List::from_parts(
            ListId::from_uuid(self.id),
            self.listname,
            self.category,
            UserId::from_uuid(self.owner_id),
            item_ids,
        )
    }

    pub fn summary(&self) -> ListSummary {
        ListSummary {
            id: ListId::from_uuid(self.id),
            listname: self.listname.clone(),
            category: self.category.clone(),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ItemRow {
    pub id: Uuid,
    pub list_id: Uuid,
    pub owner_id: Uuid,
    pub position: i32,
    pub name: String,
    pub photo: String,
    pub description: String,
    pub price: f64,
}

impl TryFrom<ItemRow> for Item {
    type Error = ListingValidationError;

    fn try_from(row: ItemRow) -> Result<Self, Self::Error> {
        Item::new(
            ItemId::from_uuid(row.id),
            ListId::from_uuid(row.list_id),
            UserId::from_uuid(row.owner_id),
            ItemDraft::new(row.name, row.photo, row.description, row.price),
        )
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = lists)]
pub(crate) struct NewListRow<'a> {
    pub id: Uuid,
    pub listname: &'a str,
    pub category: &'a str,
    pub owner_id: Uuid,
}

impl<'a> From<&'a List> for NewListRow<'a> {
    fn from(list: &'a List) -> Self {
        Self {
            id: *list.id().as_uuid(),
            listname: list.listname(),
            category: list.category(),
            owner_id: *list.owner_id().as_uuid(),
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = items)]
pub(crate) struct NewItemRow<'a> {
    pub id: Uuid,
    pub list_id: Uuid,
    pub owner_id: Uuid,
    pub position: i32,
    pub name: &'a str,
    pub photo: &'a str,
    pub description: &'a str,
    pub price: f64,
}

impl<'a> NewItemRow<'a> {
    pub fn new(item: &'a Item, position: i32) -> Self {
        Self {
            id: *item.id().as_uuid(),
            list_id: *item.list_id().as_uuid(),
            owner_id: *item.owner_id().as_uuid(),
            position,
            name: item.name(),
            photo: item.photo(),
            description: item.description(),
            price: item.price().value(),
        }
    }
}
