//! Domain ports: trait seams between the core services and their external
//! collaborators (store, hasher, token signer).
//!
//! Adapters live under `outbound/`; handlers and services depend only on
//! these traits so tests can substitute doubles without wiring I/O.

mod macros;
mod password_hasher;
mod pet_repository;
mod token_service;
mod user_repository;

pub(crate) use macros::define_port_error;
pub use password_hasher::{PasswordHashError, PasswordHasher};
pub use pet_repository::{PetPersistenceError, PetRepository};
pub use token_service::{AccessToken, TokenError, TokenService};
pub use user_repository::{UserPersistenceError, UserRepository};
