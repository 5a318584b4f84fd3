//! List domain service.
//!
//! Implements the lists driving ports on top of the list and user
//! repositories. Creation checks the list's own fields, then resolves the
//! owner, then validates every item. Nothing is written until all three
//! succeed.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::domain::ports::{
    CreateListRequest, CreateListResponse, GetListRequest, GetListResponse,
    ListCategoriesResponse, ListListsResponse, ListRepository, ListRepositoryError, ListsCommand,
    ListsQuery, SearchItemsRequest, SearchItemsResponse, UserRepository, UserRepositoryError,
};
use crate::domain::{Error, ListingValidationError, NewList};

/// Message returned when no lists exist.
pub const NO_LISTS_FOUND_MESSAGE: &str = "No lists found.";

fn map_list_repository_error(error: ListRepositoryError) -> Error {
    match error {
        ListRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("list repository unavailable: {message}"))
        }
        ListRepositoryError::Query { message } => {
            Error::internal(format!("list repository error: {message}"))
        }
    }
}

fn map_user_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

/// Convert a listing validation failure into a 400 with field details.
pub(crate) fn map_validation_error(error: &ListingValidationError) -> Error {
    let code = match error.leaf() {
        ListingValidationError::MissingField { .. } => "missing_field",
        ListingValidationError::InvalidPrice { .. } => "invalid_price",
        _ => "empty_field",
    };
    let mut details = json!({
        "field": error.field(),
        "code": code,
    });
    if let Some(index) = error.item_index() {
        details["index"] = json!(index);
    }
    Error::invalid_request(error.to_string()).with_details(details)
}

/// Service implementing [`ListsCommand`] and [`ListsQuery`].
pub struct ListService<L, U> {
    lists: Arc<L>,
    users: Arc<U>,
    empty_lists_ok: bool,
}

impl<L, U> Clone for ListService<L, U> {
    fn clone(&self) -> Self {
        Self {
            lists: Arc::clone(&self.lists),
            users: Arc::clone(&self.users),
            empty_lists_ok: self.empty_lists_ok,
        }
    }
}

impl<L, U> ListService<L, U> {
    /// Create a service over the given repositories.
    pub fn new(lists: Arc<L>, users: Arc<U>) -> Self {
        Self {
            lists,
            users,
            empty_lists_ok: false,
        }
    }

    /// Answer an empty list collection with an empty success instead of
    /// `NotFound`.
    #[must_use]
    pub fn with_empty_lists_ok(mut self, enabled: bool) -> Self {
        self.empty_lists_ok = enabled;
        self
    }
}

#[async_trait]
impl<L, U> ListsCommand for ListService<L, U>
where
    L: ListRepository,
    U: UserRepository,
{
    async fn create_list(&self, request: CreateListRequest) -> Result<CreateListResponse, Error> {
        let draft = request.draft;
        draft
            .validate_list_fields()
            .map_err(|err| map_validation_error(&err))?;

        self.users
            .find_by_id(&draft.owner)
            .await
            .map_err(map_user_repository_error)?
            .ok_or_else(|| Error::not_found("Owner not found."))?;

        let new_list = NewList::new(draft).map_err(|err| map_validation_error(&err))?;

        self.lists
            .create(&new_list)
            .await
            .map_err(map_list_repository_error)?;

        debug!(
            list_id = %new_list.list().id(),
            items = new_list.items().len(),
            "list created"
        );
        Ok(CreateListResponse::from(new_list))
    }
}

#[async_trait]
impl<L, U> ListsQuery for ListService<L, U>
where
    L: ListRepository,
    U: UserRepository,
{
    async fn list_lists(&self) -> Result<ListListsResponse, Error> {
        let lists = self
            .lists
            .find_all()
            .await
            .map_err(map_list_repository_error)?;
        if lists.is_empty() && !self.empty_lists_ok {
            return Err(Error::not_found(NO_LISTS_FOUND_MESSAGE));
        }
        Ok(ListListsResponse { lists })
    }

    async fn get_list(&self, request: GetListRequest) -> Result<GetListResponse, Error> {
        let details = self
            .lists
            .find_by_id(&request.list_id)
            .await
            .map_err(map_list_repository_error)?
            .ok_or_else(|| Error::not_found("List not found"))?;
        Ok(GetListResponse { details })
    }

    async fn search_items(
        &self,
        request: SearchItemsRequest,
    ) -> Result<SearchItemsResponse, Error> {
        let items = self
            .lists
            .search_items(&request.search)
            .await
            .map_err(map_list_repository_error)?;
        Ok(SearchItemsResponse { items })
    }

    async fn list_categories(&self) -> Result<ListCategoriesResponse, Error> {
        let categories = self
            .lists
            .distinct_categories()
            .await
            .map_err(map_list_repository_error)?;
        Ok(ListCategoriesResponse { categories })
    }
}

#[cfg(test)]
#[path = "list_service_tests.rs"]
mod tests;
