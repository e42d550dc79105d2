// src/models/analytics.rs

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

// Painel consolidado do admin. Recalculado a cada requisição, nada é persistido.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub metrics: Metrics,
    pub top_services: Vec<ServiceSummary>,
    pub top_providers: Vec<ProviderSummary>,
    pub location_trends: Vec<LocationSummary>,
}

// 1. Os Cards do Topo
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    #[schema(example = 128)]
    pub total_bookings: u64,
    #[schema(example = 5120.0)]
    pub total_revenue: Decimal,
    #[schema(example = 42)]
    pub active_services: u64,
    #[schema(example = 310)]
    pub total_users: u64,
    #[schema(example = 4.5)]
    pub avg_rating: f64,
}

// 2. Serviços mais agendados
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSummary {
    pub id: Uuid,
    #[schema(example = "Conserto de encanamento")]
    pub title: String,
    #[schema(example = "Plumbing")]
    pub category: String,
    pub booking_count: u64,
}

// 3. Prestadores melhor avaliados
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProviderSummary {
    pub id: Uuid,
    pub name: String,
    pub avg_rating: f64,
    pub booking_count: u64,
    pub total_earnings: Decimal,
}

// 4. Regiões com mais agendamentos (localização do PRESTADOR, não do cliente)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocationSummary {
    #[schema(example = "NY")]
    pub location: String,
    pub booking_count: u64,
}
