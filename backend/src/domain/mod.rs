//! Domain primitives, services, and ports.
//!
//! Purpose: define the strongly typed entities and the three core services
//! (listings, accounts, FAQ responder) used by the inbound and outbound
//! adapters. Types are immutable where practical; invariants and
//! serialisation contracts are documented on each type.
//!
//! Public surface:
//! - [`Error`] / [`ErrorCode`] — transport-agnostic error payload.
//! - [`Pet`] / [`PetDraft`] / [`Species`] / [`ListingStatus`] — listing model.
//! - [`User`] / [`Registration`] / [`LoginCredentials`] — account model.
//! - [`ListingService`] / [`AccountService`] / [`ChatService`] — core services.
//! - [`ports`] — trait seams for the store, hasher, and token signer.

pub mod accounts;
pub mod error;
pub mod faq;
pub mod listings;
pub mod pet;
pub mod ports;
pub mod user;

pub use self::accounts::{AccountService, INVALID_CREDENTIALS};
pub use self::error::{Error, ErrorCode};
pub use self::faq::ChatService;
pub use self::listings::{ListingService, normalise_status_filter};
pub use self::pet::{ListingStatus, Pet, PetDraft, PetId, PetValidationError, Species};
pub use self::user::{
    EmailAddress, LoginCredentials, Registration, User, UserId, UserSummary,
    UserValidationError,
};

/// Convenient result alias for domain operations.
pub type ApiResult<T> = Result<T, Error>;
