//! Diesel-backed persistence adapters for the domain's repository ports.

mod diesel_pet_repository;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;

pub use diesel_pet_repository::DieselPetRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
