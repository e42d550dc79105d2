// src/db/marketplace_repo.rs

use async_trait::async_trait;
use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::{
        auth::User,
        marketplace::{Booking, Review, Service, ServiceFilter, UserFilter},
    },
};

/// Leitura completa das quatro coleções usadas pelo painel de analytics.
#[derive(Debug, Clone, Default)]
pub struct MarketplaceSnapshot {
    pub bookings: Vec<Booking>,
    pub services: Vec<Service>,
    pub users: Vec<User>,
    pub reviews: Vec<Review>,
}

/// Capacidade de leitura que o agregador consome.
///
/// Implementações precisam ser `Send + Sync` para ficar no `AppState`.
/// Qualquer falha deve voltar como `AppError::DatabaseError`.
#[async_trait]
pub trait MarketplaceSource: Send + Sync {
    async fn list_all_bookings(&self) -> Result<Vec<Booking>, AppError>;

    async fn list_services(&self, filter: ServiceFilter) -> Result<Vec<Service>, AppError>;

    async fn list_users(&self, filter: UserFilter) -> Result<Vec<User>, AppError>;

    async fn list_all_reviews(&self) -> Result<Vec<Review>, AppError>;

    /// Carrega as quatro coleções de uma vez.
    ///
    /// Serviços apagados também vêm: o faturamento ainda usa o preço deles.
    /// A implementação padrão faz quatro leituras independentes; quem tiver
    /// transações deve sobrescrever para ler tudo no mesmo ponto no tempo.
    async fn load_snapshot(&self) -> Result<MarketplaceSnapshot, AppError> {
        Ok(MarketplaceSnapshot {
            bookings: self.list_all_bookings().await?,
            services: self.list_services(ServiceFilter::default()).await?,
            users: self.list_users(UserFilter::default()).await?,
            reviews: self.list_all_reviews().await?,
        })
    }
}

#[derive(Clone)]
pub struct MarketplaceRepository {
    pool: PgPool,
}

impl MarketplaceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_bookings<'e, E>(executor: E) -> Result<Vec<Booking>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query_as::<_, Booking>(
            r#"
            SELECT id, service_id, provider_id, customer_id, created_at
            FROM bookings
            ORDER BY created_at, id
            "#,
        )
            .fetch_all(executor)
            .await?;
        Ok(rows)
    }

    async fn fetch_services<'e, E>(executor: E, filter: ServiceFilter) -> Result<Vec<Service>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        // NULL no parâmetro = sem filtro naquele campo
        let rows = sqlx::query_as::<_, Service>(
            r#"
            SELECT id, provider_id, title, category, price, is_active, is_deleted, created_at
            FROM services
            WHERE ($1::boolean IS NULL OR is_active = $1)
              AND ($2::boolean IS NULL OR is_deleted = $2)
            ORDER BY created_at, id
            "#,
        )
            .bind(filter.active)
            .bind(filter.deleted)
            .fetch_all(executor)
            .await?;
        Ok(rows)
    }

    async fn fetch_users<'e, E>(executor: E, filter: UserFilter) -> Result<Vec<User>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, role, location, phone,
                   is_verified, is_deleted, created_at, updated_at
            FROM users
            WHERE ($1::user_role IS NULL OR role = $1)
              AND ($2::boolean IS NULL OR is_deleted = $2)
            ORDER BY created_at, id
            "#,
        )
            .bind(filter.role)
            .bind(filter.deleted)
            .fetch_all(executor)
            .await?;
        Ok(rows)
    }

    async fn fetch_reviews<'e, E>(executor: E) -> Result<Vec<Review>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query_as::<_, Review>(
            r#"
            SELECT id, provider_id, rating
            FROM reviews
            ORDER BY created_at, id
            "#,
        )
            .fetch_all(executor)
            .await?;
        Ok(rows)
    }
}

#[async_trait]
impl MarketplaceSource for MarketplaceRepository {
    async fn list_all_bookings(&self) -> Result<Vec<Booking>, AppError> {
        Self::fetch_bookings(&self.pool).await
    }

    async fn list_services(&self, filter: ServiceFilter) -> Result<Vec<Service>, AppError> {
        Self::fetch_services(&self.pool, filter).await
    }

    async fn list_users(&self, filter: UserFilter) -> Result<Vec<User>, AppError> {
        Self::fetch_users(&self.pool, filter).await
    }

    async fn list_all_reviews(&self) -> Result<Vec<Review>, AppError> {
        Self::fetch_reviews(&self.pool).await
    }

    async fn load_snapshot(&self) -> Result<MarketplaceSnapshot, AppError> {
        // Iniciamos uma transação (Snapshot consistente dos dados)
        let mut tx = self.pool.begin().await?;

        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await?;

        let bookings = Self::fetch_bookings(&mut *tx).await?;
        let services = Self::fetch_services(&mut *tx, ServiceFilter::default()).await?;
        let users = Self::fetch_users(&mut *tx, UserFilter::default()).await?;
        let reviews = Self::fetch_reviews(&mut *tx).await?;

        // Só leitura, mas commit é mais limpo que deixar o rollback no drop
        tx.commit().await?;

        Ok(MarketplaceSnapshot { bookings, services, users, reviews })
    }
}
