//! Listing service: state transitions and visibility rules for pet
//! listings.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::domain::ports::{PetPersistenceError, PetRepository};
use crate::domain::{Error, ListingStatus, Pet, PetDraft, PetId, UserId};

/// Default status filter applied when a listing query omits one.
pub const DEFAULT_STATUS_FILTER: &str = "AVAILABLE";

/// Enforces creation, filtering, and the one-way `AVAILABLE -> ADOPTED`
/// transition over a [`PetRepository`].
#[derive(Clone)]
pub struct ListingService {
    pets: Arc<dyn PetRepository>,
}

fn map_persistence_error(error: PetPersistenceError) -> Error {
    match error {
        PetPersistenceError::Connection { message } => Error::service_unavailable(message),
        PetPersistenceError::Query { message } => Error::internal(message),
    }
}

/// Normalise a raw status filter: absent or blank defaults to
/// `AVAILABLE`, everything else is upper-cased and filtered verbatim.
/// Unrecognised values are not rejected; they simply match nothing.
pub fn normalise_status_filter(raw: Option<&str>) -> String {
    match raw {
        Some(value) if !value.trim().is_empty() => value.trim().to_uppercase(),
        _ => DEFAULT_STATUS_FILTER.to_owned(),
    }
}

impl ListingService {
    /// Create a new service backed by the given repository.
    pub fn new(pets: Arc<dyn PetRepository>) -> Self {
        Self { pets }
    }

    /// Persist a validated draft as a fresh `AVAILABLE` listing.
    pub async fn create_listing(&self, draft: PetDraft) -> Result<Pet, Error> {
        let pet = draft.into_pet(PetId::random(), Utc::now());
        self.pets
            .create(&pet)
            .await
            .map_err(map_persistence_error)?;
        info!(pet_id = %pet.id, species = %pet.species, "listing created");
        Ok(pet)
    }

    /// Fetch listings matching the (normalised) status filter, newest
    /// first.
    pub async fn list_listings(&self, status: Option<&str>) -> Result<Vec<Pet>, Error> {
        let filter = normalise_status_filter(status);
        self.pets
            .list_by_status(&filter)
            .await
            .map_err(map_persistence_error)
    }

    /// Fetch a single listing.
    pub async fn get_listing(&self, id: &PetId) -> Result<Pet, Error> {
        self.pets
            .find_by_id(id)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| Error::not_found("pet not found"))
    }

    /// Stamp a listing adopted on behalf of an authenticated user.
    ///
    /// The stamp is unconditional: adopting an already adopted listing
    /// refreshes its adoption timestamp rather than failing.
    pub async fn mark_adopted(&self, id: &PetId, acting_user: &UserId) -> Result<Pet, Error> {
        let adopted = self
            .pets
            .set_adopted(id, Utc::now())
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| Error::not_found("pet not found"))?;
        info!(pet_id = %adopted.id, user_id = %acting_user, "listing adopted");
        Ok(adopted)
    }

    /// Count listings in the given state (used by the FAQ responder).
    pub async fn count_by_status(&self, status: ListingStatus) -> Result<u64, Error> {
        self.pets
            .count_by_status(status)
            .await
            .map_err(map_persistence_error)
    }
}
