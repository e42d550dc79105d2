// src/handlers/users.rs

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::auth::{Role, UpdateProfilePayload, User},
};

// GET /api/users/{id} (público, usado pelo chat)
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "Users",
    params(
        ("id" = Uuid, Path, description = "ID do usuário")
    ),
    responses(
        (status = 200, description = "Perfil público do usuário", body = User),
        (status = 404, description = "Usuário não encontrado")
    )
)]
pub async fn get_user_profile(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, AppError> {
    let user = app_state.user_repo
        .find_by_id(id)
        .await?
        .ok_or(AppError::UserNotFound)?;

    Ok(Json(user))
}

// PUT /api/users/{id}
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "Users",
    params(
        ("id" = Uuid, Path, description = "ID do usuário")
    ),
    request_body = UpdateProfilePayload,
    responses(
        (status = 200, description = "Perfil atualizado", body = User),
        (status = 400, description = "Dados inválidos"),
        (status = 403, description = "Só o próprio usuário ou um admin"),
        (status = 404, description = "Usuário não encontrado"),
        (status = 409, description = "E-mail já cadastrado")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn update_user_profile(
    State(app_state): State<AppState>,
    AuthenticatedUser(current): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProfilePayload>,
) -> Result<Json<User>, AppError> {
    ensure_can_edit(&current, id)?;
    payload.validate()?;

    let user = app_state.user_repo
        .update_profile(id, &payload)
        .await?
        .ok_or(AppError::UserNotFound)?;

    tracing::info!("✏️ Perfil {} atualizado por {}", user.id, current.id);
    Ok(Json(user))
}

fn ensure_can_edit(current: &User, target: Uuid) -> Result<(), AppError> {
    if current.id == target || current.role == Role::Admin {
        return Ok(());
    }
    Err(AppError::Forbidden("Você só pode editar o seu próprio perfil.".into()))
}
