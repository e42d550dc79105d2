// src/db/user_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::auth::{Role, UpdateProfilePayload, User},
};

const USER_COLUMNS: &str = r#"
    id, name, email, password_hash, role, location, phone,
    is_verified, is_deleted, created_at, updated_at
"#;

// Dados já validados e com a senha em hash, prontos para o INSERT
#[derive(Debug)]
pub struct NewUser<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub role: Role,
    pub location: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub is_verified: bool,
}

// O repositório de usuários, responsável por todas as interações com a tabela 'users'
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Busca um usuário (não apagado) pelo seu e-mail
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let maybe_user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1 AND is_deleted = false"
        ))
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe_user)
    }

    // Busca um usuário (não apagado) pelo seu ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let maybe_user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1 AND is_deleted = false"
        ))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe_user)
    }

    // Cria um novo usuário no banco de dados
    pub async fn create_user(&self, new_user: NewUser<'_>) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (name, email, password_hash, role, location, phone, is_verified)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {USER_COLUMNS}
            "#
        ))
            .bind(new_user.name)
            .bind(new_user.email)
            .bind(new_user.password_hash)
            .bind(new_user.role)
            .bind(new_user.location)
            .bind(new_user.phone)
            .bind(new_user.is_verified)
            .fetch_one(&self.pool)
            .await
            .map_err(map_unique_email)
    }

    // Atualização parcial: COALESCE mantém o valor atual quando o campo vem nulo.
    // Retorna None se o usuário não existe (ou foi apagado).
    pub async fn update_profile(
        &self,
        id: Uuid,
        changes: &UpdateProfilePayload,
    ) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone),
                location = COALESCE($5, location),
                updated_at = NOW()
            WHERE id = $1 AND is_deleted = false
            RETURNING {USER_COLUMNS}
            "#
        ))
            .bind(id)
            .bind(changes.name.as_deref())
            .bind(changes.email.as_deref())
            .bind(changes.phone.as_deref())
            .bind(changes.location.as_deref())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_unique_email)
    }
}

// Violação de UNIQUE em users.email vira 409 em vez de erro 500
fn map_unique_email(e: sqlx::Error) -> AppError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return AppError::EmailAlreadyExists;
        }
    }
    AppError::DatabaseError(e)
}
