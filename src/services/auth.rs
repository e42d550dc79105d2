// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::{
    common::error::AppError,
    db::{user_repo::NewUser, UserRepository},
    models::auth::{AuthResponse, Claims, RefreshClaims, Role, SignupPayload, TokenKind, TokenPair, User},
};

const TOKEN_TTL_DAYS: i64 = 7;
const REFRESH_TTL_DAYS: i64 = 30;

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    jwt_secret: String,
    allow_admin_signup: bool,
}

impl AuthService {
    pub fn new(user_repo: UserRepository, jwt_secret: String, allow_admin_signup: bool) -> Self {
        Self { user_repo, jwt_secret, allow_admin_signup }
    }

    // Cadastro público: só CUSTOMER ou PROVIDER.
    // Prestadores entram não verificados e esperam aprovação do admin.
    pub async fn signup(&self, payload: SignupPayload) -> Result<User, AppError> {
        let (role, is_verified) = public_signup_role(payload.role)?;
        self.create_account(payload, role, is_verified).await
    }

    pub async fn register_admin(&self, payload: SignupPayload) -> Result<User, AppError> {
        if !self.allow_admin_signup {
            return Err(AppError::Forbidden("Cadastro de administradores desabilitado.".into()));
        }

        let admin = self.create_account(payload, Role::Admin, true).await?;
        tracing::info!("👤 Administrador registrado: {} ({})", admin.email, admin.id);
        Ok(admin)
    }

    async fn create_account(
        &self,
        payload: SignupPayload,
        role: Role,
        is_verified: bool,
    ) -> Result<User, AppError> {
        // Hashing é CPU-bound, fica fora do runtime assíncrono
        let password = payload.password;
        let password_hash = tokio::task::spawn_blocking(move || hash(&password, bcrypt::DEFAULT_COST))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        self.user_repo
            .create_user(NewUser {
                name: &payload.name,
                email: &payload.email,
                password_hash: &password_hash,
                role,
                location: payload.location.as_deref(),
                phone: payload.phone.as_deref(),
                is_verified,
            })
            .await
    }

    pub async fn signin(&self, email: &str, password: &str) -> Result<AuthResponse, AppError> {
        let user = self.user_repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid = tokio::task::spawn_blocking(move || {
            verify(&password_clone, &password_hash_clone)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        if user.role == Role::Provider && !user.is_verified {
            return Err(AppError::ProviderNotVerified);
        }

        let access_token = encode_token(&self.jwt_secret, &user)?;
        let refresh_token = encode_refresh_token(&self.jwt_secret, &user)?;
        Ok(AuthResponse::bearer(access_token, refresh_token, &user))
    }

    // Troca um refresh token válido por um novo access token.
    // O mesmo refresh token volta na resposta.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AppError> {
        let claims = decode_refresh_token(&self.jwt_secret, refresh_token)?;

        let user = self.user_repo
            .find_by_id(claims.sub)
            .await?
            .ok_or(AppError::InvalidToken)?;

        Ok(TokenPair {
            access_token: encode_token(&self.jwt_secret, &user)?,
            refresh_token: refresh_token.to_string(),
        })
    }

    pub async fn validate_token(&self, token: &str) -> Result<User, AppError> {
        let claims = decode_token(&self.jwt_secret, token)?;

        self.user_repo
            .find_by_id(claims.sub)
            .await?
            // Usuário apagado depois de emitir o token
            .ok_or(AppError::InvalidToken)
    }
}

// Papel e verificação de uma conta criada pelo cadastro público.
// ADMIN é recusado; PROVIDER começa não verificado.
pub fn public_signup_role(requested: Option<Role>) -> Result<(Role, bool), AppError> {
    match requested.unwrap_or(Role::Customer) {
        Role::Admin => Err(AppError::Forbidden(
            "Contas de administrador não podem ser criadas pelo cadastro público.".into(),
        )),
        Role::Provider => Ok((Role::Provider, false)),
        Role::Customer => Ok((Role::Customer, true)),
    }
}

pub fn encode_token(secret: &str, user: &User) -> Result<String, AppError> {
    let now = Utc::now();
    let expires_at = now + chrono::Duration::days(TOKEN_TTL_DAYS);

    let claims = Claims {
        sub: user.id,
        role: user.role,
        exp: expires_at.timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )?)
}

pub fn decode_token(secret: &str, token: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::InvalidToken)
}

pub fn encode_refresh_token(secret: &str, user: &User) -> Result<String, AppError> {
    let now = Utc::now();
    let expires_at = now + chrono::Duration::days(REFRESH_TTL_DAYS);

    let claims = RefreshClaims {
        sub: user.id,
        kind: TokenKind::Refresh,
        exp: expires_at.timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )?)
}

pub fn decode_refresh_token(secret: &str, token: &str) -> Result<RefreshClaims, AppError> {
    decode::<RefreshClaims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::InvalidToken)
}
