// src/handlers/auth.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::auth::{AuthResponse, RefreshPayload, SigninPayload, SignupPayload, TokenPair, User},
};

// POST /api/auth/signup
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    tag = "Auth",
    request_body = SignupPayload,
    responses(
        (status = 201, description = "Usuário criado", body = User),
        (status = 400, description = "Dados inválidos"),
        (status = 403, description = "Papel não permitido no cadastro público"),
        (status = 409, description = "E-mail já cadastrado")
    )
)]
pub async fn signup(
    State(app_state): State<AppState>,
    Json(payload): Json<SignupPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let user = app_state.auth_service.signup(payload).await?;

    Ok((StatusCode::CREATED, Json(user)))
}

// POST /api/auth/admin-register
#[utoipa::path(
    post,
    path = "/api/auth/admin-register",
    tag = "Auth",
    request_body = SignupPayload,
    responses(
        (status = 201, description = "Administrador criado", body = User),
        (status = 403, description = "Cadastro de administradores desabilitado"),
        (status = 409, description = "E-mail já cadastrado")
    )
)]
pub async fn register_admin(
    State(app_state): State<AppState>,
    Json(payload): Json<SignupPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let admin = app_state.auth_service.register_admin(payload).await?;

    Ok((StatusCode::CREATED, Json(admin)))
}

// POST /api/auth/signin
#[utoipa::path(
    post,
    path = "/api/auth/signin",
    tag = "Auth",
    request_body = SigninPayload,
    responses(
        (status = 200, description = "Token de acesso", body = AuthResponse),
        (status = 401, description = "Credenciais inválidas"),
        (status = 403, description = "Prestador aguardando aprovação")
    )
)]
pub async fn signin(
    State(app_state): State<AppState>,
    Json(payload): Json<SigninPayload>,
) -> Result<Json<AuthResponse>, AppError> {
    payload.validate()?;

    let response = app_state.auth_service
        .signin(&payload.email, &payload.password)
        .await?;

    Ok(Json(response))
}

// POST /api/auth/refresh
#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    tag = "Auth",
    request_body = RefreshPayload,
    responses(
        (status = 200, description = "Novo access token", body = TokenPair),
        (status = 401, description = "Refresh token inválido ou expirado")
    )
)]
pub async fn refresh(
    State(app_state): State<AppState>,
    Json(payload): Json<RefreshPayload>,
) -> Result<Json<TokenPair>, AppError> {
    payload.validate()?;

    let tokens = app_state.auth_service.refresh(&payload.refresh_token).await?;

    Ok(Json(tokens))
}

// GET /api/auth/me
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "Auth",
    responses(
        (status = 200, description = "Usuário logado", body = User),
        (status = 401, description = "Não autenticado")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn get_me(AuthenticatedUser(user): AuthenticatedUser) -> Json<User> {
    Json(user)
}
