//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the deployed schema exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL
//! generation.

diesel::table! {
    /// Pet listings table.
    ///
    /// One row per adoption post. Listings are not attributed to an owner;
    /// there is no foreign key to `users`.
    pets (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Listing title (max 150 characters).
        #[max_length = 150]
        title -> Varchar,
        /// Species token: `DOG` or `CAT`.
        #[max_length = 10]
        species -> Varchar,
        /// Optional free-text description (max 500 characters).
        #[max_length = 500]
        description -> Nullable<Varchar>,
        /// Optional opaque photo URL (max 500 characters).
        #[max_length = 500]
        photo_url -> Nullable<Varchar>,
        /// Opaque map URL for the sighting location (max 500 characters).
        #[max_length = 500]
        location_url -> Varchar,
        /// Optional human-readable location text (max 150 characters).
        #[max_length = 150]
        location_text -> Nullable<Varchar>,
        /// Lifecycle token: `AVAILABLE` or `ADOPTED`.
        #[max_length = 10]
        status -> Varchar,
        /// Record creation timestamp, set once.
        created_at -> Timestamptz,
        /// Adoption timestamp; null until the listing is adopted.
        adopted_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// User accounts table.
    ///
    /// The `email` column carries a unique index; it is the login key.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Full name (max 150 characters).
        #[max_length = 150]
        full_name -> Varchar,
        /// Login email, unique across all users.
        #[max_length = 150]
        email -> Varchar,
        /// Contact phone number (max 20 characters).
        #[max_length = 20]
        phone_number -> Varchar,
        /// Opaque PHC password hash; never serialised outward.
        #[max_length = 255]
        password_hash -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}
