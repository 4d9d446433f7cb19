//! Pet listing data model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum allowed length for a listing title.
pub const TITLE_MAX: usize = 150;
/// Maximum allowed length for a listing description.
pub const DESCRIPTION_MAX: usize = 500;
/// Maximum allowed length for photo and location URLs.
pub const URL_MAX: usize = 500;
/// Maximum allowed length for the human-readable location text.
pub const LOCATION_TEXT_MAX: usize = 150;

/// Validation errors returned by [`PetDraft::try_new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PetValidationError {
    EmptyTitle,
    TitleTooLong { max: usize },
    InvalidSpecies { value: String },
    DescriptionTooLong { max: usize },
    PhotoUrlTooLong { max: usize },
    EmptyLocationUrl,
    LocationUrlTooLong { max: usize },
    LocationTextTooLong { max: usize },
}

impl fmt::Display for PetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::TitleTooLong { max } => {
                write!(f, "title must be at most {max} characters")
            }
            Self::InvalidSpecies { value } => {
                write!(f, "species must be DOG or CAT, got {value:?}")
            }
            Self::DescriptionTooLong { max } => {
                write!(f, "description must be at most {max} characters")
            }
            Self::PhotoUrlTooLong { max } => {
                write!(f, "photo url must be at most {max} characters")
            }
            Self::EmptyLocationUrl => write!(f, "location url must not be empty"),
            Self::LocationUrlTooLong { max } => {
                write!(f, "location url must be at most {max} characters")
            }
            Self::LocationTextTooLong { max } => {
                write!(f, "location text must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for PetValidationError {}

/// Stable pet identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PetId(Uuid);

impl PetId {
    /// Generate a new random [`PetId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for PetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Species accepted for a listing.
///
/// The wire form is the exact upper-case token (`DOG` / `CAT`); anything
/// else is rejected at write time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Species {
    Dog,
    Cat,
}

impl Species {
    /// Canonical wire token for the species.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dog => "DOG",
            Self::Cat => "CAT",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Species {
    type Err = PetValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DOG" => Ok(Self::Dog),
            "CAT" => Ok(Self::Cat),
            other => Err(PetValidationError::InvalidSpecies {
                value: other.to_owned(),
            }),
        }
    }
}

/// Lifecycle state of a listing.
///
/// A listing starts `AVAILABLE` and moves to `ADOPTED` exactly once; there
/// is no reverse transition and no other state is reachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ListingStatus {
    Available,
    Adopted,
}

impl ListingStatus {
    /// Canonical wire token for the status.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "AVAILABLE",
            Self::Adopted => "ADOPTED",
        }
    }
}

impl fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AVAILABLE" => Ok(Self::Available),
            "ADOPTED" => Ok(Self::Adopted),
            other => Err(format!("unrecognised listing status {other:?}")),
        }
    }
}

/// A pet-adoption listing.
///
/// ## Invariants
/// - `adopted_at` is `Some` if and only if `status` is
///   [`ListingStatus::Adopted`].
/// - `created_at` is set once at creation and never changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Pet {
    pub id: PetId,
    pub title: String,
    pub species: Species,
    pub description: Option<String>,
    pub photo_url: Option<String>,
    pub location_url: String,
    pub location_text: Option<String>,
    pub status: ListingStatus,
    pub created_at: DateTime<Utc>,
    pub adopted_at: Option<DateTime<Utc>>,
}

/// Validated input for creating a listing.
///
/// Construction through [`PetDraft::try_new`] enforces the field rules, so
/// a draft in hand is always persistable.
#[derive(Debug, Clone, PartialEq)]
pub struct PetDraft {
    title: String,
    species: Species,
    description: Option<String>,
    photo_url: Option<String>,
    location_url: String,
    location_text: Option<String>,
}

fn check_optional(
    value: Option<String>,
    max: usize,
    too_long: PetValidationError,
) -> Result<Option<String>, PetValidationError> {
    match value {
        Some(text) if text.chars().count() > max => Err(too_long),
        other => Ok(other),
    }
}

impl PetDraft {
    /// Validate and construct a draft listing.
    pub fn try_new(
        title: impl Into<String>,
        species: &str,
        description: Option<String>,
        photo_url: Option<String>,
        location_url: impl Into<String>,
        location_text: Option<String>,
    ) -> Result<Self, PetValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(PetValidationError::EmptyTitle);
        }
        if title.chars().count() > TITLE_MAX {
            return Err(PetValidationError::TitleTooLong { max: TITLE_MAX });
        }

        let species = Species::from_str(species)?;

        let description = check_optional(
            description,
            DESCRIPTION_MAX,
            PetValidationError::DescriptionTooLong {
                max: DESCRIPTION_MAX,
            },
        )?;
        let photo_url = check_optional(
            photo_url,
            URL_MAX,
            PetValidationError::PhotoUrlTooLong { max: URL_MAX },
        )?;

        let location_url = location_url.into();
        if location_url.trim().is_empty() {
            return Err(PetValidationError::EmptyLocationUrl);
        }
        if location_url.chars().count() > URL_MAX {
            return Err(PetValidationError::LocationUrlTooLong { max: URL_MAX });
        }

        let location_text = check_optional(
            location_text,
            LOCATION_TEXT_MAX,
            PetValidationError::LocationTextTooLong {
                max: LOCATION_TEXT_MAX,
            },
        )?;

        Ok(Self {
            title,
            species,
            description,
            photo_url,
            location_url,
            location_text,
        })
    }

    /// Materialise the draft into a fresh `AVAILABLE` listing.
    pub fn into_pet(self, id: PetId, created_at: DateTime<Utc>) -> Pet {
        let Self {
            title,
            species,
            description,
            photo_url,
            location_url,
            location_text,
        } = self;
        Pet {
            id,
            title,
            species,
            description,
            photo_url,
            location_url,
            location_text,
            status: ListingStatus::Available,
            created_at,
            adopted_at: None,
        }
    }
}
