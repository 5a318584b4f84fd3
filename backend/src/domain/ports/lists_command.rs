//! Driving port for list write operations.
//!
//! Inbound adapters hand over an unvalidated [`ListDraft`]; implementations
//! validate it in full before anything is stored.

use async_trait::async_trait;

use crate::domain::{Error, ItemId, List, ListDraft, NewList};

/// Request to create a list together with its items.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateListRequest {
    pub draft: ListDraft,
}

/// Result of a successful list creation.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateListResponse {
    pub list: List,
    /// Ids of the created items in submission order.
    pub item_ids: Vec<ItemId>,
}

impl From<NewList> for CreateListResponse {
    fn from(value: NewList) -> Self {
        let (list, _) = value.into_parts();
        let item_ids = list.item_ids().to_vec();
        Self { list, item_ids }
    }
}

/// Driving port for creating lists.
///
/// # Examples
///
/// ```rust,no_run
/// # async fn example() -> Result<(), marketplace::domain::Error> {
/// use marketplace::domain::ports::{CreateListRequest, FixtureListsCommand, ListsCommand};
/// use marketplace::domain::{ListDraft, UserId};
///
/// let request = CreateListRequest {
///     draft: ListDraft {
///         listname: "Garage Sale".into(),
///         category: "Tools".into(),
///         owner: UserId::random(),
///         items: Vec::new(),
///     },
/// };
/// let response = FixtureListsCommand.create_list(request).await?;
/// assert!(response.item_ids.is_empty());
/// # Ok(())
/// # }
/// ```
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListsCommand: Send + Sync {
    /// Validate and persist a list with all of its items, or nothing.
    async fn create_list(&self, request: CreateListRequest) -> Result<CreateListResponse, Error>;
}

/// Fixture command that validates drafts without storing them.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureListsCommand;

#[async_trait]
impl ListsCommand for FixtureListsCommand {
    async fn create_list(&self, request: CreateListRequest) -> Result<CreateListResponse, Error> {
        NewList::new(request.draft)
            .map(CreateListResponse::from)
            .map_err(|err| Error::invalid_request(err.to_string()))
    }
}
