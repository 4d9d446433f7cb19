//! PostgreSQL-backed `PetRepository` implementation using Diesel.
//!
//! Adoption is a single `UPDATE ... RETURNING` statement: the stamp is
//! unconditional, so a second adoption of the same listing refreshes the
//! timestamp instead of failing, and concurrent adoptions race benignly
//! (last write wins).

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{PetPersistenceError, PetRepository};
use crate::domain::{ListingStatus, Pet, PetId, Species};

use super::models::{NewPetRow, PetRow};
use super::pool::{DbPool, PoolError};
use super::schema::pets;

/// Diesel-backed implementation of the `PetRepository` port.
#[derive(Clone)]
pub struct DieselPetRepository {
    pool: DbPool,
}

impl DieselPetRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain pet repository errors.
fn map_pool_error(error: PoolError) -> PetPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            PetPersistenceError::connection(message)
        }
    }
}

/// Map Diesel errors to domain pet repository errors.
fn map_diesel_error(error: diesel::result::Error) -> PetPersistenceError {
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
        DieselError::NotFound => PetPersistenceError::query("record not found"),
        DieselError::QueryBuilderError(_) => PetPersistenceError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            PetPersistenceError::connection("database connection error")
        }
        DieselError::DatabaseError(_, _) => PetPersistenceError::query("database error"),
        _ => PetPersistenceError::query("database error"),
    }
}

/// Convert a database row to a domain Pet.
///
/// Rows are only ever written through the domain, so an unparseable
/// species or status token means the table was edited out of band; that
/// surfaces as a query error rather than a silent default.
fn row_to_pet(row: PetRow) -> Result<Pet, PetPersistenceError> {
    let species = Species::from_str(&row.species)
        .map_err(|err| PetPersistenceError::query(format!("stored species: {err}")))?;
    let status = ListingStatus::from_str(&row.status)
        .map_err(|err| PetPersistenceError::query(format!("stored status: {err}")))?;

    Ok(Pet {
        id: PetId::from_uuid(row.id),
        title: row.title,
        species,
        description: row.description,
        photo_url: row.photo_url,
        location_url: row.location_url,
        location_text: row.location_text,
        status,
        created_at: row.created_at,
        adopted_at: row.adopted_at,
    })
}

fn pet_to_new_row(pet: &Pet) -> NewPetRow<'_> {
    NewPetRow {
        id: *pet.id.as_uuid(),
        title: &pet.title,
        species: pet.species.as_str(),
        description: pet.description.as_deref(),
        photo_url: pet.photo_url.as_deref(),
        location_url: &pet.location_url,
        location_text: pet.location_text.as_deref(),
        status: pet.status.as_str(),
        created_at: pet.created_at,
        adopted_at: pet.adopted_at,
    }
}

#[async_trait]
impl PetRepository for DieselPetRepository {
    async fn create(&self, pet: &Pet) -> Result<(), PetPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(pets::table)
            .values(&pet_to_new_row(pet))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &PetId) -> Result<Option<Pet>, PetPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<PetRow> = pets::table
            .filter(pets::id.eq(id.as_uuid()))
            .select(PetRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_pet).transpose()
    }

    async fn list_by_status(&self, status: &str) -> Result<Vec<Pet>, PetPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<PetRow> = pets::table
            .filter(pets::status.eq(status))
            .select(PetRow::as_select())
            .order_by(pets::created_at.desc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_pet).collect()
    }

    async fn set_adopted(
        &self,
        id: &PetId,
        at: DateTime<Utc>,
    ) -> Result<Option<Pet>, PetPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<PetRow> = diesel::update(pets::table.filter(pets::id.eq(id.as_uuid())))
            .set((
                pets::status.eq(ListingStatus::Adopted.as_str()),
                pets::adopted_at.eq(Some(at)),
            ))
            .returning(PetRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_pet).transpose()
    }

    async fn count_by_status(
        &self,
        status: ListingStatus,
    ) -> Result<u64, PetPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let count: i64 = pets::table
            .filter(pets::status.eq(status.as_str()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        // COUNT(*) is never negative.
        Ok(u64::try_from(count).unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for error mapping and row conversion.
    use super::*;
    use rstest::rstest;

    fn row(species: &str, status: &str) -> PetRow {
        PetRow {
            id: uuid::Uuid::new_v4(),
            title: "Buddy".into(),
            species: species.into(),
            description: None,
            photo_url: None,
            location_url: "http://maps.example/1".into(),
            location_text: Some("Near the old mill".into()),
            status: status.into(),
            created_at: Utc::now(),
            adopted_at: None,
        }
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let repo_err = map_pool_error(PoolError::checkout("connection refused"));

        assert!(matches!(repo_err, PetPersistenceError::Connection { .. }));
        assert!(repo_err.to_string().contains("connection refused"));
    }

    #[rstest]
    fn diesel_not_found_maps_to_query_error() {
        let repo_err = map_diesel_error(diesel::result::Error::NotFound);

        assert!(matches!(repo_err, PetPersistenceError::Query { .. }));
        assert!(repo_err.to_string().contains("record not found"));
    }

    #[rstest]
    fn row_conversion_round_trips_valid_tokens() {
        let pet = row_to_pet(row("DOG", "AVAILABLE")).expect("valid row converts");

        assert_eq!(pet.species, Species::Dog);
        assert_eq!(pet.status, ListingStatus::Available);
        assert_eq!(pet.location_text.as_deref(), Some("Near the old mill"));
    }

    #[rstest]
    #[case("HAMSTER", "AVAILABLE")]
    #[case("DOG", "PENDING")]
    fn row_conversion_rejects_out_of_band_tokens(#[case] species: &str, #[case] status: &str) {
        let err = row_to_pet(row(species, status)).expect_err("corrupt row must not convert");
        assert!(matches!(err, PetPersistenceError::Query { .. }));
    }

    #[rstest]
    fn new_row_uses_canonical_tokens() {
        let pet = row_to_pet(row("CAT", "ADOPTED")).expect("valid row");
        let new_row = pet_to_new_row(&pet);

        assert_eq!(new_row.species, "CAT");
        assert_eq!(new_row.status, "ADOPTED");
    }
}
