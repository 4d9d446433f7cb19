//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use crate::outbound::persistence::DbPool;
use crate::outbound::security::DEFAULT_TOKEN_VALIDITY;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
    pub(crate) token_secret: Vec<u8>,
    pub(crate) token_validity: Duration,
}

impl ServerConfig {
    /// Construct a server configuration.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, db_pool: DbPool, token_secret: Vec<u8>) -> Self {
        Self {
            bind_addr,
            db_pool,
            token_secret,
            token_validity: DEFAULT_TOKEN_VALIDITY,
        }
    }

    /// Override the bearer-token validity window.
    #[must_use]
    pub fn with_token_validity(mut self, validity: Duration) -> Self {
        self.token_validity = validity;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
