//! Shared in-memory doubles for handler tests.
//!
//! These substitute the Diesel repositories and the security adapters so
//! HTTP tests run without a database or real cryptography.

use std::sync::{Arc, Mutex};

use actix_web::web;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::ports::{
    AccessToken, PasswordHashError, PasswordHasher, PetPersistenceError, PetRepository,
    TokenError, TokenService, UserPersistenceError, UserRepository,
};
use crate::domain::{
    AccountService, ChatService, EmailAddress, ListingService, ListingStatus, Pet, PetId, User,
    UserId,
};

use super::state::HttpState;

/// In-memory `PetRepository` mirroring the Diesel adapter's contract.
#[derive(Default)]
pub(crate) struct InMemoryPetRepository {
    pets: Mutex<Vec<Pet>>,
}

impl InMemoryPetRepository {
    pub(crate) fn with_pets(pets: Vec<Pet>) -> Self {
        Self {
            pets: Mutex::new(pets),
        }
    }

    pub(crate) fn stored(&self) -> Vec<Pet> {
        self.pets.lock().expect("pets lock").clone()
    }
}

#[async_trait]
impl PetRepository for InMemoryPetRepository {
    async fn create(&self, pet: &Pet) -> Result<(), PetPersistenceError> {
        self.pets.lock().expect("pets lock").push(pet.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &PetId) -> Result<Option<Pet>, PetPersistenceError> {
        Ok(self
            .pets
            .lock()
            .expect("pets lock")
            .iter()
            .find(|pet| pet.id == *id)
            .cloned())
    }

    async fn list_by_status(&self, status: &str) -> Result<Vec<Pet>, PetPersistenceError> {
        let mut matching: Vec<Pet> = self
            .pets
            .lock()
            .expect("pets lock")
            .iter()
            .filter(|pet| pet.status.as_str() == status)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching)
    }

    async fn set_adopted(
        &self,
        id: &PetId,
        at: DateTime<Utc>,
    ) -> Result<Option<Pet>, PetPersistenceError> {
        let mut pets = self.pets.lock().expect("pets lock");
        let Some(pet) = pets.iter_mut().find(|pet| pet.id == *id) else {
            return Ok(None);
        };
        pet.status = ListingStatus::Adopted;
        pet.adopted_at = Some(at);
        Ok(Some(pet.clone()))
    }

    async fn count_by_status(&self, status: ListingStatus) -> Result<u64, PetPersistenceError> {
        let count = self
            .pets
            .lock()
            .expect("pets lock")
            .iter()
            .filter(|pet| pet.status == status)
            .count();
        Ok(count as u64)
    }
}

/// In-memory `UserRepository` enforcing the unique-email contract.
#[derive(Default)]
pub(crate) struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut users = self.users.lock().expect("users lock");
        if users.iter().any(|existing| existing.email == user.email) {
            return Err(UserPersistenceError::duplicate_email());
        }
        users.push(user.clone());
        Ok(())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .users
            .lock()
            .expect("users lock")
            .iter()
            .find(|user| user.email == *email)
            .cloned())
    }
}

/// Transparent stand-in for the Argon2 adapter.
pub(crate) struct PlainPasswordHasher;

impl PasswordHasher for PlainPasswordHasher {
    fn hash(&self, password: &str) -> Result<String, PasswordHashError> {
        Ok(format!("hashed:{password}"))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordHashError> {
        Ok(hash == format!("hashed:{password}"))
    }
}

/// Transparent stand-in for the JWT adapter: `token:<uuid>`.
pub(crate) struct PrefixTokenService;

impl TokenService for PrefixTokenService {
    fn issue(&self, user_id: &UserId, _email: &EmailAddress) -> Result<AccessToken, TokenError> {
        Ok(AccessToken::new(format!("token:{user_id}")))
    }

    fn verify(&self, token: &str) -> Result<UserId, TokenError> {
        token
            .strip_prefix("token:")
            .and_then(|raw| Uuid::parse_str(raw).ok())
            .map(UserId::from_uuid)
            .ok_or_else(TokenError::invalid)
    }
}

/// Build handler state over fresh in-memory doubles.
pub(crate) fn state_with_pets(pets: Vec<Pet>) -> (web::Data<HttpState>, Arc<InMemoryPetRepository>) {
    let pet_repository = Arc::new(InMemoryPetRepository::with_pets(pets));
    let user_repository = Arc::new(InMemoryUserRepository::default());
    let state = HttpState::new(
        ListingService::new(pet_repository.clone()),
        AccountService::new(
            user_repository,
            Arc::new(PlainPasswordHasher),
            Arc::new(PrefixTokenService),
        ),
        ChatService::new(pet_repository.clone()),
        Arc::new(PrefixTokenService),
    );
    (web::Data::new(state), pet_repository)
}

/// Build handler state with no seeded listings.
pub(crate) fn empty_state() -> web::Data<HttpState> {
    state_with_pets(Vec::new()).0
}

/// A bearer header for an arbitrary authenticated user.
pub(crate) fn bearer_for(user_id: &UserId) -> (&'static str, String) {
    ("Authorization", format!("Bearer token:{user_id}"))
}
