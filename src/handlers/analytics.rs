// src/handlers/analytics.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AdminUser,
    models::analytics::DashboardSnapshot,
};

// GET /api/analytics/admin/dashboard
#[utoipa::path(
    get,
    path = "/api/analytics/admin/dashboard",
    tag = "Analytics",
    responses(
        (status = 200, description = "Métricas, top serviços, top prestadores e regiões", body = DashboardSnapshot),
        (status = 401, description = "Não autenticado"),
        (status = 403, description = "Apenas administradores"),
        (status = 500, description = "Falha ao ler os dados do marketplace")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn get_dashboard(
    State(app_state): State<AppState>,
    AdminUser(admin): AdminUser,
) -> Result<impl IntoResponse, AppError> {
    tracing::debug!("Painel de analytics solicitado por {}", admin.email);

    let dashboard = app_state.analytics_service.get_dashboard().await?;

    Ok((StatusCode::OK, Json(dashboard)))
}
