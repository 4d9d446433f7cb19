//! Port abstraction for pet listing persistence adapters and their errors.
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{ListingStatus, Pet, PetId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by pet repository adapters.
    pub enum PetPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "pet repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "pet repository query failed: {message}",
    }
}

#[async_trait]
pub trait PetRepository: Send + Sync {
    /// Persist a freshly created listing.
    async fn create(&self, pet: &Pet) -> Result<(), PetPersistenceError>;

    /// Fetch a listing by identifier.
    async fn find_by_id(&self, id: &PetId) -> Result<Option<Pet>, PetPersistenceError>;

    /// Fetch listings whose stored status equals `status` verbatim, newest
    /// first by creation timestamp. Unrecognised values simply match
    /// nothing; the filter is not validated against the enum.
    async fn list_by_status(&self, status: &str) -> Result<Vec<Pet>, PetPersistenceError>;

    /// Stamp a listing `ADOPTED` at `at` and return the updated record, or
    /// `None` when no such listing exists. Re-stamps an already adopted
    /// listing.
    async fn set_adopted(
        &self,
        id: &PetId,
        at: DateTime<Utc>,
    ) -> Result<Option<Pet>, PetPersistenceError>;

    /// Count listings in the given state.
    async fn count_by_status(
        &self,
        status: ListingStatus,
    ) -> Result<u64, PetPersistenceError>;
}
