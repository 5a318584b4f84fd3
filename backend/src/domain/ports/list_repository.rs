//! Driven port for list and item persistence.
//!
//! Adapters own the storage layout. The contract they must honour:
//! a list's items are the rows whose back-reference names the list, in
//! submission order, and `create` persists a list with all of its items or
//! nothing at all.

use async_trait::async_trait;

use crate::domain::{Item, ItemSearch, List, ListId, ListSummary, NewList, Owner};

use super::define_port_error;

define_port_error! {
    /// Errors raised by list repository adapters.
    pub enum ListRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "list repository connection failed: {message}",
        /// Query or mutation failed during execution or row conversion.
        Query { message: String } =>
            "list repository query failed: {message}",
    }
}

/// A list with its owner and items expanded.
#[derive(Debug, Clone, PartialEq)]
pub struct ListDetails {
    pub list: List,
    pub owner: Owner,
    /// Items whose back-reference names `list`, in submission order.
    pub items: Vec<Item>,
}

/// An item joined to its list and owner.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemListing {
    pub item: Item,
    pub list: ListSummary,
    pub owner: Owner,
}

/// Port for storing and reading lists and their items.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListRepository: Send + Sync {
    /// Persist a list and all of its items atomically.
    async fn create(&self, new_list: &NewList) -> Result<(), ListRepositoryError>;

    /// Every list, ordered by list name then id.
    async fn find_all(&self) -> Result<Vec<ListDetails>, ListRepositoryError>;

    /// One list, or `None` when the id is unknown.
    async fn find_by_id(&self, id: &ListId) -> Result<Option<ListDetails>, ListRepositoryError>;

    /// Items matching `search`, ordered by item name then id.
    ///
    /// Items are inner-joined to their list, so a category constraint
    /// excludes the item rather than dropping the join.
    async fn search_items(
        &self,
        search: &ItemSearch,
    ) -> Result<Vec<ItemListing>, ListRepositoryError>;

    /// Distinct list categories, sorted ascending.
    async fn distinct_categories(&self) -> Result<Vec<String>, ListRepositoryError>;
}

/// Fixture repository used when no database is configured.
///
/// Writes are accepted and discarded; reads are always empty.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureListRepository;

#[async_trait]
impl ListRepository for FixtureListRepository {
    async fn create(&self, _new_list: &NewList) -> Result<(), ListRepositoryError> {
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<ListDetails>, ListRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_by_id(&self, _id: &ListId) -> Result<Option<ListDetails>, ListRepositoryError> {
        Ok(None)
    }

    async fn search_items(
        &self,
        _search: &ItemSearch,
    ) -> Result<Vec<ItemListing>, ListRepositoryError> {
        Ok(Vec::new())
    }

    async fn distinct_categories(&self) -> Result<Vec<String>, ListRepositoryError> {
        Ok(Vec::new())
    }
}
