//! Driving port for list and item reads.

use async_trait::async_trait;

use crate::domain::{Error, ItemSearch, ListId};

use super::list_repository::{ItemListing, ListDetails};

/// Request to fetch one list by identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetListRequest {
    pub list_id: ListId,
}

/// Request to search items across every list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchItemsRequest {
    pub search: ItemSearch,
}

/// Every list with owners and items expanded.
#[derive(Debug, Clone, PartialEq)]
pub struct ListListsResponse {
    pub lists: Vec<ListDetails>,
}

/// One list with owner and items expanded.
#[derive(Debug, Clone, PartialEq)]
pub struct GetListResponse {
    pub details: ListDetails,
}

/// Items matching a search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchItemsResponse {
    pub items: Vec<ItemListing>,
}

/// Distinct list categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListCategoriesResponse {
    pub categories: Vec<String>,
}

/// Driving port for list read operations.
///
/// # Examples
///
/// ```rust,no_run
/// # async fn example() -> Result<(), marketplace::domain::Error> {
/// use marketplace::domain::ports::{FixtureListsQuery, ListsQuery};
///
/// let response = FixtureListsQuery.list_categories().await?;
/// assert!(response.categories.is_empty());
/// # Ok(())
/// # }
/// ```
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListsQuery: Send + Sync {
    /// Every list ordered by list name.
    async fn list_lists(&self) -> Result<ListListsResponse, Error>;

    /// One list; `NotFound` when the id is unknown.
    async fn get_list(&self, request: GetListRequest) -> Result<GetListResponse, Error>;

    /// Items matching the request's search, ordered by item name.
    async fn search_items(&self, request: SearchItemsRequest)
    -> Result<SearchItemsResponse, Error>;

    /// Distinct categories sorted ascending.
    async fn list_categories(&self) -> Result<ListCategoriesResponse, Error>;
}

/// Fixture query implementation backed by an empty store.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureListsQuery;

#[async_trait]
impl ListsQuery for FixtureListsQuery {
    async fn list_lists(&self) -> Result<ListListsResponse, Error> {
        Ok(ListListsResponse { lists: Vec::new() })
    }

    async fn get_list(&self, request: GetListRequest) -> Result<GetListResponse, Error> {
        Err(Error::not_found(format!("list {} not found", request.list_id)))
    }

    async fn search_items(
        &self,
        _request: SearchItemsRequest,
    ) -> Result<SearchItemsResponse, Error> {
        Ok(SearchItemsResponse { items: Vec::new() })
    }

    async fn list_categories(&self) -> Result<ListCategoriesResponse, Error> {
        Ok(ListCategoriesResponse {
            categories: Vec::new(),
        })
    }
}
