//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API: all HTTP endpoints from the inbound
//! layer, their request/response schemas, and the bearer-token security
//! scheme. The generated specification backs Swagger UI in debug builds.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::chat::{ChatRequest, ChatResponse};
use crate::inbound::http::pets::{CreatePetRequest, PetResponse};
use crate::inbound::http::users::{LoginRequest, RegisterRequest, TokenResponse, UserResponse};

/// Enrich the generated document with the bearer-token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Token issued by POST /api/v1/auth/login."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "PawTrack backend API",
        description = "HTTP interface for pet-adoption listings, accounts, \
                       the FAQ chat endpoint, and health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = [])),
    paths(
        crate::inbound::http::pets::create_pet,
        crate::inbound::http::pets::list_pets,
        crate::inbound::http::pets::get_pet,
        crate::inbound::http::pets::adopt_pet,
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::chat::chat,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CreatePetRequest,
        PetResponse,
        RegisterRequest,
        UserResponse,
        LoginRequest,
        TokenResponse,
        ChatRequest,
        ChatResponse,
        Error,
        ErrorCode,
    ))
)]
pub struct ApiDoc;
