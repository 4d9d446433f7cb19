//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on the domain services and the token-verification port, and
//! remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::TokenService;
use crate::domain::{AccountService, ChatService, ListingService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub listings: Arc<ListingService>,
    pub accounts: Arc<AccountService>,
    pub chat: Arc<ChatService>,
    pub tokens: Arc<dyn TokenService>,
}

impl HttpState {
    /// Bundle the core services and the token verifier.
    pub fn new(
        listings: ListingService,
        accounts: AccountService,
        chat: ChatService,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            listings: Arc::new(listings),
            accounts: Arc::new(accounts),
            chat: Arc::new(chat),
            tokens,
        }
    }
}
