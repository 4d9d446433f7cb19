//! PostgreSQL-backed `UserRepository` implementation using Diesel.
//!
//! The unique index on `users.email` is the write-time uniqueness
//! guarantee; a violation surfaces as the typed `DuplicateEmail` variant so
//! the account service can reject the registration instead of merging it.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, User, UserId};

use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain user repository errors.
fn map_pool_error(error: PoolError) -> UserPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            UserPersistenceError::connection(message)
        }
    }
}

/// Map Diesel errors to domain user repository errors.
///
/// A unique violation can only come from the email index (the primary key
/// is a freshly generated UUID), so it maps to `DuplicateEmail`.
fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => UserPersistenceError::query("record not found"),
        DieselError::QueryBuilderError(_) => UserPersistenceError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            UserPersistenceError::duplicate_email()
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserPersistenceError::connection("database connection error")
        }
        DieselError::DatabaseError(_, _) => UserPersistenceError::query("database error"),
        _ => UserPersistenceError::query("database error"),
    }
}

/// Convert a database row to a domain User.
fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let email = EmailAddress::new(row.email)
        .map_err(|err| UserPersistenceError::query(format!("stored email: {err}")))?;

    Ok(User {
        id: UserId::from_uuid(row.id),
        full_name: row.full_name,
        email,
        phone_number: row.phone_number,
        password_hash: row.password_hash,
        created_at: row.created_at,
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewUserRow {
            id: *user.id.as_uuid(),
            full_name: &user.full_name,
            email: user.email.as_ref(),
            phone_number: &user.phone_number,
            password_hash: &user.password_hash,
            created_at: user.created_at,
        };

        diesel::insert_into(users::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for error mapping and row conversion.
    use chrono::Utc;
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let repo_err = map_pool_error(PoolError::checkout("connection refused"));

        assert!(matches!(repo_err, UserPersistenceError::Connection { .. }));
    }

    #[rstest]
    fn unique_violation_maps_to_duplicate_email() {
        let diesel_err = diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key value violates unique constraint \"users_email_key\""
                .to_owned()),
        );

        assert_eq!(
            map_diesel_error(diesel_err),
            UserPersistenceError::DuplicateEmail
        );
    }

    #[rstest]
    fn row_conversion_validates_the_stored_email() {
        let row = UserRow {
            id: uuid::Uuid::new_v4(),
            full_name: "Ada Lovelace".into(),
            email: "not-an-email".into(),
            phone_number: "07000000000".into(),
            password_hash: "$argon2id$opaque".into(),
            created_at: Utc::now(),
        };

        let err = row_to_user(row).expect_err("corrupt email must not convert");
        assert!(matches!(err, UserPersistenceError::Query { .. }));
    }

    #[rstest]
    fn row_conversion_round_trips_a_valid_row() {
        let id = uuid::Uuid::new_v4();
        let row = UserRow {
            id,
            full_name: "Ada Lovelace".into(),
            email: "ada@example.org".into(),
            phone_number: "07000000000".into(),
            password_hash: "$argon2id$opaque".into(),
            created_at: Utc::now(),
        };

        let user = row_to_user(row).expect("valid row converts");
        assert_eq!(user.id.as_uuid(), &id);
        assert_eq!(user.email.as_ref(), "ada@example.org");
    }
}
