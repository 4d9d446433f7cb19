//! Port abstraction for one-way password hashing.

use super::define_port_error;

define_port_error! {
    /// Failures raised by password hasher adapters.
    pub enum PasswordHashError {
        /// Hashing the password failed.
        Hash { message: String } => "password hashing failed: {message}",
        /// The stored hash could not be parsed or compared.
        Verify { message: String } => "password verification failed: {message}",
    }
}

/// One-way hash and verify over raw passwords.
///
/// A wrong password is `Ok(false)` from `verify`, not an error; errors are
/// reserved for hasher-level failures such as a malformed stored hash.
pub trait PasswordHasher: Send + Sync {
    /// Derive an opaque hash string from a raw password.
    fn hash(&self, password: &str) -> Result<String, PasswordHashError>;

    /// Check a raw password against a stored hash string.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordHashError>;
}
