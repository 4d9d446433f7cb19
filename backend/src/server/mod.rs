//! Server construction and route wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::ports::TokenService;
use crate::domain::{AccountService, ChatService, ListingService};
use crate::inbound::http::chat::chat;
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::pets::{adopt_pet, create_pet, get_pet, list_pets};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::{login, register};
use crate::outbound::persistence::{DieselPetRepository, DieselUserRepository};
use crate::outbound::security::{Argon2PasswordHasher, JwtTokenService};

/// Wire the Diesel repositories and security adapters into handler state.
fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let pets = Arc::new(DieselPetRepository::new(config.db_pool.clone()));
    let users = Arc::new(DieselUserRepository::new(config.db_pool.clone()));
    let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::with_validity(
        &config.token_secret,
        config.token_validity,
    ));

    web::Data::new(HttpState::new(
        ListingService::new(pets.clone()),
        AccountService::new(users, Arc::new(Argon2PasswordHasher), tokens.clone()),
        ChatService::new(pets),
        tokens,
    ))
}

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let api = web::scope("/api/v1")
        .service(create_pet)
        .service(list_pets)
        .service(get_pet)
        .service(adopt_pet)
        .service(register)
        .service(login)
        .service(chat);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and
/// configuration.
///
/// # Parameters
/// - `health_state`: shared readiness state updated once the server is
///   initialised.
/// - `config`: pre-built [`ServerConfig`] with binding, pool, and token
///   settings.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = build_http_state(&config);
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        })
    })
    .bind(config.bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
