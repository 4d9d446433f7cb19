//! Pet listing API handlers.
//!
//! ```text
//! POST /api/v1/pets
//! GET  /api/v1/pets?status=ADOPTED
//! GET  /api/v1/pets/{id}
//! POST /api/v1/pets/{id}/adopt   (bearer-authenticated)
//! ```

use actix_web::{HttpRequest, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{Error, Pet, PetDraft, PetId, PetValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::require_user;
use crate::inbound::http::state::HttpState;

/// Request payload for creating a listing.
///
/// Example JSON:
/// `{"title":"Buddy","species":"DOG","locationUrl":"http://maps.example/1"}`
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePetRequest {
    pub title: String,
    pub species: String,
    pub description: Option<String>,
    pub photo_url: Option<String>,
    pub location_url: String,
    pub location_text: Option<String>,
}

impl TryFrom<CreatePetRequest> for PetDraft {
    type Error = PetValidationError;

    fn try_from(value: CreatePetRequest) -> Result<Self, Self::Error> {
        Self::try_new(
            value.title,
            &value.species,
            value.description,
            value.photo_url,
            value.location_url,
            value.location_text,
        )
    }
}

/// Response payload for a listing.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PetResponse {
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: Uuid,
    pub title: String,
    #[schema(example = "DOG")]
    pub species: String,
    pub description: Option<String>,
    pub photo_url: Option<String>,
    pub location_url: String,
    pub location_text: Option<String>,
    #[schema(example = "AVAILABLE")]
    pub status: String,
    pub created_at: String,
    pub adopted_at: Option<String>,
}

impl From<Pet> for PetResponse {
    fn from(value: Pet) -> Self {
        Self {
            id: *value.id.as_uuid(),
            title: value.title,
            species: value.species.as_str().to_owned(),
            description: value.description,
            photo_url: value.photo_url,
            location_url: value.location_url,
            location_text: value.location_text,
            status: value.status.as_str().to_owned(),
            created_at: value.created_at.to_rfc3339(),
            adopted_at: value.adopted_at.map(|at| at.to_rfc3339()),
        }
    }
}

/// Status filter for listing queries. Blank or absent defaults to
/// `AVAILABLE`; unrecognised values match nothing.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListPetsQuery {
    pub status: Option<String>,
}

fn map_pet_validation_error(err: PetValidationError) -> Error {
    let (field, code) = match err {
        PetValidationError::EmptyTitle => ("title", "missing_field"),
        PetValidationError::TitleTooLong { .. } => ("title", "too_long"),
        PetValidationError::InvalidSpecies { .. } => ("species", "invalid_species"),
        PetValidationError::DescriptionTooLong { .. } => ("description", "too_long"),
        PetValidationError::PhotoUrlTooLong { .. } => ("photoUrl", "too_long"),
        PetValidationError::EmptyLocationUrl => ("locationUrl", "missing_field"),
        PetValidationError::LocationUrlTooLong { .. } => ("locationUrl", "too_long"),
        PetValidationError::LocationTextTooLong { .. } => ("locationText", "too_long"),
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field, "code": code }))
}

fn parse_pet_id(raw: &str) -> ApiResult<PetId> {
    Uuid::parse_str(raw)
        .map(PetId::from_uuid)
        .map_err(|_| {
            Error::invalid_request("pet id must be a UUID")
                .with_details(json!({ "field": "id", "code": "invalid_uuid" }))
        })
}

/// Create a listing.
#[utoipa::path(
    post,
    path = "/api/v1/pets",
    request_body = CreatePetRequest,
    responses(
        (status = 200, description = "Listing created", body = PetResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["pets"],
    operation_id = "createPet",
    security([])
)]
#[post("/pets")]
pub async fn create_pet(
    state: web::Data<HttpState>,
    payload: web::Json<CreatePetRequest>,
) -> ApiResult<web::Json<PetResponse>> {
    let draft = PetDraft::try_from(payload.into_inner()).map_err(map_pet_validation_error)?;
    let pet = state.listings.create_listing(draft).await?;
    Ok(web::Json(PetResponse::from(pet)))
}

/// List listings filtered by status (default `AVAILABLE`), newest first.
#[utoipa::path(
    get,
    path = "/api/v1/pets",
    params(ListPetsQuery),
    responses(
        (status = 200, description = "Listings", body = [PetResponse]),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["pets"],
    operation_id = "listPets",
    security([])
)]
#[get("/pets")]
pub async fn list_pets(
    state: web::Data<HttpState>,
    query: web::Query<ListPetsQuery>,
) -> ApiResult<web::Json<Vec<PetResponse>>> {
    let pets = state
        .listings
        .list_listings(query.status.as_deref())
        .await?;
    Ok(web::Json(pets.into_iter().map(PetResponse::from).collect()))
}

/// Fetch a single listing.
#[utoipa::path(
    get,
    path = "/api/v1/pets/{id}",
    params(("id" = String, Path, description = "Listing id")),
    responses(
        (status = 200, description = "Listing", body = PetResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["pets"],
    operation_id = "getPet",
    security([])
)]
#[get("/pets/{id}")]
pub async fn get_pet(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<PetResponse>> {
    let id = parse_pet_id(&path.into_inner())?;
    let pet = state.listings.get_listing(&id).await?;
    Ok(web::Json(PetResponse::from(pet)))
}

/// Adopt a listing. Only authenticated users can adopt.
///
/// The adoption stamp is unconditional: repeating the call on an already
/// adopted listing refreshes the adoption timestamp.
#[utoipa::path(
    post,
    path = "/api/v1/pets/{id}/adopt",
    params(("id" = String, Path, description = "Listing id")),
    responses(
        (status = 200, description = "Listing adopted", body = PetResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["pets"],
    operation_id = "adoptPet"
)]
#[post("/pets/{id}/adopt")]
pub async fn adopt_pet(
    req: HttpRequest,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<PetResponse>> {
    let acting_user = require_user(&req, state.tokens.as_ref())?;
    let id = parse_pet_id(&path.into_inner())?;
    let pet = state.listings.mark_adopted(&id, &acting_user).await?;
    Ok(web::Json(PetResponse::from(pet)))
}
