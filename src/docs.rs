// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::signup,
        handlers::auth::register_admin,
        handlers::auth::signin,
        handlers::auth::refresh,
        handlers::auth::get_me,

        // --- Users ---
        handlers::users::get_user_profile,
        handlers::users::update_user_profile,

        // --- Analytics ---
        handlers::analytics::get_dashboard,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::Role,
            models::auth::User,
            models::auth::SignupPayload,
            models::auth::SigninPayload,
            models::auth::AuthResponse,
            models::auth::RefreshPayload,
            models::auth::TokenPair,
            models::auth::UpdateProfilePayload,

            // --- Analytics ---
            models::analytics::DashboardSnapshot,
            models::analytics::Metrics,
            models::analytics::ServiceSummary,
            models::analytics::ProviderSummary,
            models::analytics::LocationSummary,
        )
    ),
    tags(
        (name = "Auth", description = "Cadastro, login e sessão"),
        (name = "Users", description = "Perfis de usuários"),
        (name = "Analytics", description = "Painel gerencial do administrador")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}
