//! Driven port for reading user records.
use async_trait::async_trait;

use crate::domain::{Owner, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch the owner projection of a user.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<Owner>, UserRepositoryError>;
}

/// Fixture repository that knows no users.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserRepository;

#[async_trait]
impl UserRepository for FixtureUserRepository {
    async fn find_by_id(&self, _id: &UserId) -> Result<Option<Owner>, UserRepositoryError> {
        Ok(None)
    }
}
