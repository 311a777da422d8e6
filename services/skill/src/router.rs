//! Axum Router Configuration
//!
//! This module defines the complete HTTP routing for the application,
//! including the skill endpoint, the health check, and OpenAPI
//! documentation.

use crate::{
    handlers,
    models::{
        Application, Card, ErrorResponse, Intent, OutputSpeech, Reprompt, Request,
        RequestEnvelope, ResponseBody, ResponseEnvelope, SessionInfo, Slot,
    },
    state::AppState,
};

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(handlers::handle_skill_request, handlers::health),
    components(
        schemas(RequestEnvelope, SessionInfo, Application, Request, Intent, Slot, ResponseEnvelope, ResponseBody, OutputSpeech, Card, Reprompt, ErrorResponse)
    ),
    tags(
        (name = "Headway Skill", description = "Voice-skill endpoint for Metrorail arrival times and service advisories")
    )
)]
pub struct ApiDoc;

/// Creates the main Axum router for the application.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    // Group all routes that require AppState into their own router.
    let api_router = Router::new()
        .route("/skill", post(handlers::handle_skill_request))
        .route("/health", get(handlers::health))
        // Apply the state ONLY to this group of routes.
        .with_state(app_state);

    // Create the final router that merges the stateful routes
    // with the stateless routes (like Swagger UI).
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(api_router)
}
