//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{EmailAddress, User};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The email address is already registered (unique index hit).
        DuplicateEmail => "email already registered",
    }
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account. The adapter must surface a violation of the
    /// email uniqueness constraint as [`UserPersistenceError::DuplicateEmail`],
    /// never as a silent merge.
    async fn create(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Fetch an account by its login key.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError>;
}
