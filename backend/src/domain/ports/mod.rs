//! Domain ports for the hexagonal boundary.
//!
//! Driving ports (`ListsCommand`, `ListsQuery`) are consumed by inbound
//! adapters; driven ports (`ListRepository`, `UserRepository`) are
//! implemented by outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod list_repository;
mod lists_command;
mod lists_query;
mod user_repository;

#[cfg(test)]
pub use list_repository::MockListRepository;
pub use list_repository::{
    FixtureListRepository, ItemListing, ListDetails, ListRepository, ListRepositoryError,
};
#[cfg(test)]
pub use lists_command::MockListsCommand;
pub use lists_command::{
    CreateListRequest, CreateListResponse, FixtureListsCommand, ListsCommand,
};
#[cfg(test)]
pub use lists_query::MockListsQuery;
pub use lists_query::{
    FixtureListsQuery, GetListRequest, GetListResponse, ListCategoriesResponse,
    ListListsResponse, ListsQuery, SearchItemsRequest, SearchItemsResponse,
};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{FixtureUserRepository, UserRepository, UserRepositoryError};
