//! Account service: registration and login invariants.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::domain::ports::{
    AccessToken, PasswordHashError, PasswordHasher, TokenError, TokenService,
    UserPersistenceError, UserRepository,
};
use crate::domain::{Error, LoginCredentials, Registration, User, UserId, UserSummary};

/// Login failure message. Identical for an unknown email and a wrong
/// password so callers cannot tell which case occurred.
pub const INVALID_CREDENTIALS: &str = "invalid email or password";

/// Enforces registration and login invariants over the user store, the
/// password hasher, and the token issuer.
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenService>,
}

fn map_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => Error::service_unavailable(message),
        UserPersistenceError::Query { message } => Error::internal(message),
        UserPersistenceError::DuplicateEmail => Error::conflict("email already registered"),
    }
}

fn map_hash_error(error: PasswordHashError) -> Error {
    Error::internal(error.to_string())
}

fn map_issue_error(error: TokenError) -> Error {
    Error::internal(error.to_string())
}

impl AccountService {
    /// Create a new service over the given collaborators.
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    /// Register a new account.
    ///
    /// The registration input is already validated (including the
    /// password/confirmation comparison). A duplicate email is a conflict:
    /// checked up front for a clean error, and backstopped by the store's
    /// unique index for the concurrent case.
    pub async fn register(&self, registration: Registration) -> Result<UserSummary, Error> {
        let existing = self
            .users
            .find_by_email(&registration.email)
            .await
            .map_err(map_persistence_error)?;
        if existing.is_some() {
            return Err(Error::conflict("email already registered"));
        }

        let password_hash = self
            .hasher
            .hash(registration.password())
            .map_err(map_hash_error)?;

        let user = User {
            id: UserId::random(),
            full_name: registration.full_name,
            email: registration.email,
            phone_number: registration.phone_number,
            password_hash,
            created_at: Utc::now(),
        };

        self.users
            .create(&user)
            .await
            .map_err(map_persistence_error)?;
        info!(user_id = %user.id, "account registered");
        Ok(UserSummary::from(user))
    }

    /// Authenticate credentials and issue an access token.
    ///
    /// Both failure paths produce the same [`INVALID_CREDENTIALS`] message.
    pub async fn login(&self, credentials: LoginCredentials) -> Result<AccessToken, Error> {
        let user = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| Error::unauthorized(INVALID_CREDENTIALS))?;

        let verified = self
            .hasher
            .verify(credentials.password(), &user.password_hash)
            .map_err(map_hash_error)?;
        if !verified {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }

        let token = self
            .tokens
            .issue(&user.id, &user.email)
            .map_err(map_issue_error)?;
        info!(user_id = %user.id, "login succeeded");
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for registration and login invariants.
    use std::sync::Mutex;

    use async_trait::async_trait;
    use rstest::rstest;
    use uuid::Uuid;

    use super::*;
    use crate::domain::{EmailAddress, ErrorCode};

    #[derive(Default)]
    struct StubUserRepository {
        users: Mutex<Vec<User>>,
        reject_duplicates: bool,
    }

    impl StubUserRepository {
        fn with_user(user: User) -> Self {
            Self {
                users: Mutex::new(vec![user]),
                reject_duplicates: true,
            }
        }

        fn row_count(&self) -> usize {
            self.users.lock().expect("users lock").len()
        }
    }

    #[async_trait]
    impl UserRepository for StubUserRepository {
        async fn create(&self, user: &User) -> Result<(), UserPersistenceError> {
            let mut users = self.users.lock().expect("users lock");
            if self.reject_duplicates && users.iter().any(|u| u.email == user.email) {
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

    /// Reversible stand-in for a real hasher; good enough to check the
    /// service routes raw passwords through the port.
    struct StubPasswordHasher;

    impl PasswordHasher for StubPasswordHasher {
        fn hash(&self, password: &str) -> Result<String, PasswordHashError> {
            Ok(format!("hashed:{password}"))
        }

        fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordHashError> {
            Ok(hash == format!("hashed:{password}"))
        }
    }

    struct StubTokenService;

    impl TokenService for StubTokenService {
        fn issue(
            &self,
            user_id: &UserId,
            _email: &EmailAddress,
        ) -> Result<AccessToken, TokenError> {
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

    fn service(repository: Arc<StubUserRepository>) -> AccountService {
        AccountService::new(
            repository,
            Arc::new(StubPasswordHasher),
            Arc::new(StubTokenService),
        )
    }

    fn registration(email: &str) -> Registration {
        Registration::try_new(
            "Ada Lovelace",
            email,
            "07000000000",
            "s3cret-pass",
            "s3cret-pass",
        )
        .expect("valid registration")
    }

    fn credentials(email: &str, password: &str) -> LoginCredentials {
        LoginCredentials::try_from_parts(email, password).expect("valid credentials shape")
    }

    #[tokio::test]
    async fn register_persists_a_hashed_user_and_returns_a_summary() {
        let repository = Arc::new(StubUserRepository::default());
        let summary = service(repository.clone())
            .register(registration("ada@example.org"))
            .await
            .expect("registration succeeds");

        assert_eq!(summary.email.as_ref(), "ada@example.org");
        let users = repository.users.lock().expect("users lock");
        let stored = users.first().expect("user stored");
        assert_eq!(stored.password_hash, "hashed:s3cret-pass");
    }

    #[tokio::test]
    async fn register_rejects_a_duplicate_email_without_writing() {
        let existing = User {
            id: UserId::random(),
            full_name: "Ada Lovelace".into(),
            email: EmailAddress::new("ada@example.org").expect("valid email"),
            phone_number: "07000000000".into(),
            password_hash: "hashed:s3cret-pass".into(),
            created_at: Utc::now(),
        };
        let repository = Arc::new(StubUserRepository::with_user(existing));

        let err = service(repository.clone())
            .register(registration("ada@example.org"))
            .await
            .expect_err("duplicate email must conflict");

        assert_eq!(err.code(), ErrorCode::Conflict);
        assert_eq!(repository.row_count(), 1);
    }

    #[tokio::test]
    async fn register_then_login_round_trips_the_raw_password() {
        let repository = Arc::new(StubUserRepository::default());
        let svc = service(repository.clone());

        let summary = svc
            .register(registration("ada@example.org"))
            .await
            .expect("registration succeeds");
        let token = svc
            .login(credentials("ada@example.org", "s3cret-pass"))
            .await
            .expect("login succeeds");

        let verified = StubTokenService
            .verify(token.as_str())
            .expect("issued token verifies");
        assert_eq!(verified, summary.id);
    }

    #[rstest]
    #[case("nobody@example.org", "s3cret-pass")]
    #[case("ada@example.org", "wrong-password")]
    #[tokio::test]
    async fn login_failures_share_one_message(#[case] email: &str, #[case] password: &str) {
        let repository = Arc::new(StubUserRepository::default());
        let svc = service(repository);
        svc.register(registration("ada@example.org"))
            .await
            .expect("registration succeeds");

        let err = svc
            .login(credentials(email, password))
            .await
            .expect_err("login must fail");

        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), INVALID_CREDENTIALS);
    }

    #[tokio::test]
    async fn register_surfaces_the_store_level_duplicate_backstop() {
        // Simulates the concurrent-registration race: the pre-check sees no
        // user, the insert hits the unique index.
        struct RacingRepository {
            inner: StubUserRepository,
        }

        #[async_trait]
        impl UserRepository for RacingRepository {
            async fn create(&self, _user: &User) -> Result<(), UserPersistenceError> {
                Err(UserPersistenceError::duplicate_email())
            }

            async fn find_by_email(
                &self,
                email: &EmailAddress,
            ) -> Result<Option<User>, UserPersistenceError> {
                self.inner.find_by_email(email).await
            }
        }

        let repository = Arc::new(RacingRepository {
            inner: StubUserRepository::default(),
        });
        let svc = AccountService::new(
            repository,
            Arc::new(StubPasswordHasher),
            Arc::new(StubTokenService),
        );

        let err = svc
            .register(registration("ada@example.org"))
            .await
            .expect_err("unique index violation must conflict");
        assert_eq!(err.code(), ErrorCode::Conflict);
    }
}
