//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the account, profile and health endpoints, the
//! error schema wrappers from [`crate::inbound::http::schemas`] and the
//! bearer token security scheme. The document backs Swagger UI in debug
//! builds and is printed by the `openapi-dump` binary.

use crate::inbound::http::accounts::{AuthResponse, LoginRequest, SignupRequest, UserSummary};
use crate::inbound::http::profile::{ActivityResponse, DashboardResponse, ProfileResponse};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the bearer token security scheme.
pub const BEARER_SCHEME: &str = "BearerToken";

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Token returned by POST /api/signup or POST /api/login."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Gatehouse API",
        description = "Account signup, login and bearer-token protected profile views."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = [])),
    paths(
        crate::inbound::http::accounts::signup,
        crate::inbound::http::accounts::login,
        crate::inbound::http::profile::profile,
        crate::inbound::http::profile::dashboard,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        SignupRequest,
        LoginRequest,
        UserSummary,
        AuthResponse,
        ProfileResponse,
        DashboardResponse,
        ActivityResponse,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "accounts", description = "Signup and login"),
        (name = "profile", description = "Views for the authenticated user"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
