// src/models/marketplace.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use super::auth::Role;

// Serviço oferecido por um prestador.
// `provider_id` e `price` podem vir nulos do banco (dados legados).
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: Uuid,
    pub provider_id: Option<Uuid>,
    pub title: String,
    pub category: String,
    pub price: Option<Decimal>,
    pub is_active: bool,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
}

impl Service {
    pub fn is_live(&self) -> bool {
        !self.is_deleted
    }
}

// Agendamento de um cliente para um serviço.
// O valor é sempre o preço ATUAL do serviço vinculado (não há snapshot do preço).
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub service_id: Option<Uuid>,
    pub provider_id: Option<Uuid>,
    pub customer_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: Uuid,
    pub provider_id: Option<Uuid>,
    pub rating: i32,
}

// --- Filtros de consulta ---
// `None` significa "não filtrar por este campo".

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServiceFilter {
    pub active: Option<bool>,
    pub deleted: Option<bool>,
}

impl ServiceFilter {
    pub fn matches(&self, service: &Service) -> bool {
        self.active.is_none_or(|a| service.is_active == a)
            && self.deleted.is_none_or(|d| service.is_deleted == d)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub role: Option<Role>,
    pub deleted: Option<bool>,
}

impl UserFilter {
    pub fn matches(&self, user: &super::auth::User) -> bool {
        self.role.is_none_or(|r| user.role == r)
            && self.deleted.is_none_or(|d| user.is_deleted == d)
    }
}
