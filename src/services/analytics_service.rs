// src/services/analytics_service.rs

use std::{collections::HashMap, sync::Arc};

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{MarketplaceSnapshot, MarketplaceSource},
    models::{
        analytics::{DashboardSnapshot, LocationSummary, Metrics, ProviderSummary, ServiceSummary},
        auth::{Role, User},
        marketplace::{Booking, Service, ServiceFilter, UserFilter},
    },
};

/// Média exibida quando ainda não existe nenhuma avaliação.
pub const DEFAULT_AVG_RATING: f64 = 4.5;

/// Tamanho de cada ranking do painel.
pub const TOP_LIMIT: usize = 5;

#[derive(Clone)]
pub struct AnalyticsService {
    source: Arc<dyn MarketplaceSource>,
}

impl AnalyticsService {
    pub fn new(source: Arc<dyn MarketplaceSource>) -> Self {
        Self { source }
    }

    /// Lê as quatro coleções e monta o painel do admin.
    ///
    /// O único erro possível é de acesso a dados; dados incompletos
    /// nunca falham, só deixam de contar no agregado afetado.
    pub async fn get_dashboard(&self) -> Result<DashboardSnapshot, AppError> {
        let snapshot = self.source.load_snapshot().await?;

        tracing::debug!(
            bookings = snapshot.bookings.len(),
            services = snapshot.services.len(),
            users = snapshot.users.len(),
            reviews = snapshot.reviews.len(),
            "Snapshot do marketplace carregado"
        );

        let dashboard = compute_dashboard(&snapshot);

        tracing::info!(
            total_bookings = dashboard.metrics.total_bookings,
            top_services = dashboard.top_services.len(),
            top_providers = dashboard.top_providers.len(),
            location_trends = dashboard.location_trends.len(),
            "📊 Painel de analytics calculado"
        );

        Ok(dashboard)
    }
}

// Índices montados uma vez por cálculo.
// `services` tem todos os serviços carregados e serve só para o faturamento;
// os rankings resolvem o serviço em `live_services` (sem os apagados).
struct Lookup<'a> {
    services: HashMap<Uuid, &'a Service>,
    live_services: HashMap<Uuid, &'a Service>,
    users: HashMap<Uuid, &'a User>,
}

impl<'a> Lookup<'a> {
    fn new(snapshot: &'a MarketplaceSnapshot) -> Self {
        let services: HashMap<Uuid, &'a Service> =
            snapshot.services.iter().map(|s| (s.id, s)).collect();
        let live_services = services
            .iter()
            .filter(|(_, s)| s.is_live())
            .map(|(id, s)| (*id, *s))
            .collect();

        Self {
            services,
            live_services,
            users: snapshot.users.iter().map(|u| (u.id, u)).collect(),
        }
    }

    // Preço atual do serviço vinculado, mesmo que o serviço tenha sido apagado
    fn price_of(&self, booking: &Booking) -> Option<Decimal> {
        let service = booking.service_id.and_then(|id| self.services.get(&id).copied())?;
        service.price
    }

    fn service_of(&self, booking: &Booking) -> Option<&'a Service> {
        booking
            .service_id
            .and_then(|id| self.live_services.get(&id).copied())
    }

    fn owner_location(&self, booking: &Booking) -> Option<&'a str> {
        let provider_id = self.service_of(booking)?.provider_id?;
        let owner = self.users.get(&provider_id).copied()?;
        owner.location.as_deref()
    }
}

/// Redução pura do snapshot no painel. Mesma entrada, mesma saída.
pub fn compute_dashboard(snapshot: &MarketplaceSnapshot) -> DashboardSnapshot {
    let lookup = Lookup::new(snapshot);

    DashboardSnapshot {
        metrics: compute_metrics(snapshot, &lookup),
        top_services: top_services(snapshot),
        top_providers: top_providers(snapshot, &lookup),
        location_trends: location_trends(snapshot, &lookup),
    }
}

fn compute_metrics(snapshot: &MarketplaceSnapshot, lookup: &Lookup<'_>) -> Metrics {
    let active = ServiceFilter { active: Some(true), deleted: Some(false) };
    let not_deleted = UserFilter { role: None, deleted: Some(false) };

    let total_revenue = snapshot
        .bookings
        .iter()
        .filter_map(|b| lookup.price_of(b))
        .sum();

    let avg_rating = mean_rating(snapshot.reviews.iter().map(|r| r.rating))
        .unwrap_or(DEFAULT_AVG_RATING);

    Metrics {
        total_bookings: snapshot.bookings.len() as u64,
        total_revenue,
        active_services: snapshot.services.iter().filter(|s| active.matches(s)).count() as u64,
        total_users: snapshot.users.iter().filter(|u| not_deleted.matches(u)).count() as u64,
        avg_rating,
    }
}

// Conta agendamentos por (serviço, prestador atribuído ao agendamento).
fn top_services(snapshot: &MarketplaceSnapshot) -> Vec<ServiceSummary> {
    let mut counts: HashMap<(Uuid, Uuid), u64> = HashMap::new();
    for booking in &snapshot.bookings {
        if let (Some(service_id), Some(provider_id)) = (booking.service_id, booking.provider_id) {
            *counts.entry((service_id, provider_id)).or_default() += 1;
        }
    }

    let mut ranked: Vec<ServiceSummary> = snapshot
        .services
        .iter()
        .filter(|s| s.is_live())
        .filter_map(|s| {
            let provider_id = s.provider_id?;
            let booking_count = counts.get(&(s.id, provider_id)).copied().unwrap_or(0);
            (booking_count > 0).then(|| ServiceSummary {
                id: s.id,
                title: s.title.clone(),
                category: s.category.clone(),
                booking_count,
            })
        })
        .collect();

    // sort_by é estável: empates mantêm a ordem de entrada
    ranked.sort_by(|a, b| b.booking_count.cmp(&a.booking_count));
    ranked.truncate(TOP_LIMIT);
    ranked
}

#[derive(Default)]
struct ProviderTotals {
    bookings: u64,
    earnings: Decimal,
}

// Ranking por NOTA média, não por faturamento nem volume.
fn top_providers(snapshot: &MarketplaceSnapshot, lookup: &Lookup<'_>) -> Vec<ProviderSummary> {
    let mut totals: HashMap<Uuid, ProviderTotals> = HashMap::new();
    for booking in &snapshot.bookings {
        let Some(service) = lookup.service_of(booking) else { continue };
        let Some(owner) = service.provider_id else { continue };

        let entry = totals.entry(owner).or_default();
        entry.bookings += 1;
        if let Some(price) = service.price {
            entry.earnings += price;
        }
    }

    let mut ratings: HashMap<Uuid, Vec<i32>> = HashMap::new();
    for review in &snapshot.reviews {
        if let Some(provider_id) = review.provider_id {
            ratings.entry(provider_id).or_default().push(review.rating);
        }
    }

    let eligible = UserFilter { role: Some(Role::Provider), deleted: Some(false) };

    let mut ranked: Vec<ProviderSummary> = snapshot
        .users
        .iter()
        .filter(|u| eligible.matches(u))
        .filter_map(|provider| {
            let provider_totals = totals.get(&provider.id)?;
            if provider_totals.bookings == 0 {
                return None;
            }
            let avg_rating = ratings
                .get(&provider.id)
                .and_then(|r| mean_rating(r.iter().copied()))
                .unwrap_or(0.0);

            Some(ProviderSummary {
                id: provider.id,
                name: provider.name.clone(),
                avg_rating,
                booking_count: provider_totals.bookings,
                total_earnings: provider_totals.earnings,
            })
        })
        .collect();

    ranked.sort_by(|a, b| b.avg_rating.total_cmp(&a.avg_rating));
    ranked.truncate(TOP_LIMIT);
    ranked
}

// Agrupa pela localização do PRESTADOR dono do serviço.
fn location_trends(snapshot: &MarketplaceSnapshot, lookup: &Lookup<'_>) -> Vec<LocationSummary> {
    let mut ranked: Vec<LocationSummary> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for location in snapshot.bookings.iter().filter_map(|b| lookup.owner_location(b)) {
        match index.get(location) {
            Some(&i) => ranked[i].booking_count += 1,
            None => {
                index.insert(location, ranked.len());
                ranked.push(LocationSummary {
                    location: location.to_string(),
                    booking_count: 1,
                });
            }
        }
    }

    // Empates ficam na ordem em que a localização apareceu pela primeira vez
    ranked.sort_by(|a, b| b.booking_count.cmp(&a.booking_count));
    ranked.truncate(TOP_LIMIT);
    ranked
}

fn mean_rating(ratings: impl Iterator<Item = i32>) -> Option<f64> {
    let (sum, count) = ratings.fold((0i64, 0u64), |(sum, count), r| (sum + i64::from(r), count + 1));
    (count > 0).then(|| sum as f64 / count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::marketplace::Review;
    use async_trait::async_trait;
    use chrono::Utc;

    fn id(n: u128) -> Uuid {
        Uuid::from_u128(n)
    }

    fn money(units: i64) -> Decimal {
        Decimal::new(units * 100, 2)
    }

    fn user(n: u128, role: Role, location: Option<&str>) -> User {
        User {
            id: id(n),
            name: format!("user-{n}"),
            email: format!("user-{n}@fixitnow.test"),
            password_hash: String::new(),
            role,
            location: location.map(str::to_string),
            phone: None,
            is_verified: true,
            is_deleted: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn provider(n: u128, location: &str) -> User {
        user(n, Role::Provider, Some(location))
    }

    fn service(n: u128, owner: u128, price: Option<i64>) -> Service {
        Service {
            id: id(n),
            provider_id: Some(id(owner)),
            title: format!("service-{n}"),
            category: "Plumbing".to_string(),
            price: price.map(money),
            is_active: true,
            is_deleted: false,
            created_at: Utc::now(),
        }
    }

    // Agendamento já atribuído ao dono do serviço
    fn booking(n: u128, service: &Service) -> Booking {
        Booking {
            id: id(n),
            service_id: Some(service.id),
            provider_id: service.provider_id,
            customer_id: None,
            created_at: Utc::now(),
        }
    }

    fn review(n: u128, provider: u128, rating: i32) -> Review {
        Review { id: id(n), provider_id: Some(id(provider)), rating }
    }

    // 3 agendamentos: 2 no serviço A (X, NY, $10) e 1 no B (Y, LA, $20)
    fn scenario_ny_la() -> MarketplaceSnapshot {
        let a = service(10, 1, Some(10));
        let b = service(20, 2, Some(20));
        MarketplaceSnapshot {
            bookings: vec![booking(100, &a), booking(101, &a), booking(102, &b)],
            services: vec![a, b],
            users: vec![provider(1, "NY"), provider(2, "LA"), user(3, Role::Customer, Some("SF"))],
            reviews: vec![],
        }
    }

    #[test]
    fn test_two_providers_two_locations() {
        let dashboard = compute_dashboard(&scenario_ny_la());

        assert_eq!(dashboard.metrics.total_bookings, 3);
        assert_eq!(dashboard.metrics.total_revenue, money(40));
        assert_eq!(dashboard.metrics.active_services, 2);
        assert_eq!(dashboard.metrics.total_users, 3);

        let services: Vec<(Uuid, u64)> = dashboard
            .top_services
            .iter()
            .map(|s| (s.id, s.booking_count))
            .collect();
        assert_eq!(services, vec![(id(10), 2), (id(20), 1)]);

        let locations: Vec<(&str, u64)> = dashboard
            .location_trends
            .iter()
            .map(|l| (l.location.as_str(), l.booking_count))
            .collect();
        assert_eq!(locations, vec![("NY", 2), ("LA", 1)]);

        // Sem avaliações: nota 0.0 para todos, empate mantém a ordem de entrada
        assert_eq!(dashboard.top_providers.len(), 2);
        assert_eq!(dashboard.top_providers[0].id, id(1));
        assert_eq!(dashboard.top_providers[0].total_earnings, money(20));
        assert_eq!(dashboard.top_providers[0].avg_rating, 0.0);
        assert_eq!(dashboard.top_providers[1].id, id(2));
        assert_eq!(dashboard.top_providers[1].booking_count, 1);
    }

    #[test]
    fn test_empty_marketplace_uses_default_rating() {
        let dashboard = compute_dashboard(&MarketplaceSnapshot::default());

        assert_eq!(dashboard.metrics.total_bookings, 0);
        assert_eq!(dashboard.metrics.total_revenue, Decimal::ZERO);
        assert_eq!(dashboard.metrics.avg_rating, DEFAULT_AVG_RATING);
        assert!(dashboard.top_services.is_empty());
        assert!(dashboard.top_providers.is_empty());
        assert!(dashboard.location_trends.is_empty());
    }

    #[test]
    fn test_avg_rating_is_the_mean_of_all_reviews() {
        let mut snapshot = scenario_ny_la();
        snapshot.reviews = vec![review(1, 1, 5), review(2, 1, 4), review(3, 2, 3)];

        let dashboard = compute_dashboard(&snapshot);
        assert_eq!(dashboard.metrics.avg_rating, 4.0);
    }

    #[test]
    fn test_booking_on_deleted_service_keeps_revenue_but_leaves_rankings() {
        let mut gone = service(10, 1, Some(50));
        gone.is_deleted = true;
        let snapshot = MarketplaceSnapshot {
            bookings: vec![booking(100, &gone)],
            services: vec![gone],
            users: vec![provider(1, "NY")],
            reviews: vec![],
        };

        let dashboard = compute_dashboard(&snapshot);
        assert_eq!(dashboard.metrics.total_bookings, 1);
        // O preço do serviço apagado continua somando no faturamento
        assert_eq!(dashboard.metrics.total_revenue, money(50));
        assert_eq!(dashboard.metrics.active_services, 0);
        assert!(dashboard.top_services.is_empty());
        assert!(dashboard.top_providers.is_empty());
        assert!(dashboard.location_trends.is_empty());
    }

    #[test]
    fn test_missing_relations_are_skipped_not_errors() {
        let priced = service(10, 1, Some(10));
        let unpriced = service(20, 1, None);
        let mut orphan = service(30, 9, Some(99));
        orphan.provider_id = None;
        let homeless_owner = service(40, 2, Some(7));

        let mut no_service = booking(104, &priced);
        no_service.service_id = None;

        let snapshot = MarketplaceSnapshot {
            bookings: vec![
                booking(100, &priced),
                booking(101, &unpriced),
                booking(102, &orphan),
                booking(103, &homeless_owner),
                no_service,
            ],
            services: vec![priced, unpriced, orphan, homeless_owner],
            users: vec![provider(1, "NY"), user(2, Role::Provider, None)],
            reviews: vec![Review { id: id(1), provider_id: None, rating: 1 }],
        };

        let dashboard = compute_dashboard(&snapshot);

        assert_eq!(dashboard.metrics.total_bookings, 5);
        // 10 (priced) + 99 (orphan, sem dono mas com preço) + 7
        assert_eq!(dashboard.metrics.total_revenue, money(116));
        assert_eq!(dashboard.metrics.avg_rating, 1.0);

        // Serviço sem dono nunca aparece no ranking de serviços
        assert!(dashboard.top_services.iter().all(|s| s.id != id(30)));

        // Prestador 1: priced + unpriced, só o preço conhecido soma
        let p1 = dashboard.top_providers.iter().find(|p| p.id == id(1)).unwrap();
        assert_eq!(p1.booking_count, 2);
        assert_eq!(p1.total_earnings, money(10));

        // Prestador 2 não tem localização: fora das tendências
        assert_eq!(dashboard.location_trends.len(), 1);
        assert_eq!(dashboard.location_trends[0].location, "NY");
        assert_eq!(dashboard.location_trends[0].booking_count, 2);
    }

    #[test]
    fn test_top_services_require_provider_attribution() {
        let a = service(10, 1, Some(10));
        let mut misattributed = booking(101, &a);
        misattributed.provider_id = Some(id(2));
        let mut unattributed = booking(102, &a);
        unattributed.provider_id = None;

        let snapshot = MarketplaceSnapshot {
            bookings: vec![booking(100, &a), misattributed, unattributed],
            services: vec![a],
            users: vec![provider(1, "NY"), provider(2, "LA")],
            reviews: vec![],
        };

        let dashboard = compute_dashboard(&snapshot);
        assert_eq!(dashboard.top_services.len(), 1);
        assert_eq!(dashboard.top_services[0].booking_count, 1);

        // O dono do serviço ainda recebe os três agendamentos
        assert_eq!(dashboard.top_providers[0].id, id(1));
        assert_eq!(dashboard.top_providers[0].booking_count, 3);
        assert_eq!(dashboard.metrics.total_revenue, money(30));
    }

    #[test]
    fn test_top_providers_rank_by_rating_not_volume() {
        let busy = service(10, 1, Some(100));
        let quiet = service(20, 2, Some(5));
        let idle = service(30, 3, Some(5));

        let mut bookings: Vec<Booking> = (0..10).map(|n| booking(100 + n, &busy)).collect();
        bookings.push(booking(200, &quiet));

        let mut deleted = provider(4, "SP");
        deleted.is_deleted = true;
        let gone_service = service(40, 4, Some(5));
        bookings.push(booking(300, &gone_service));

        let snapshot = MarketplaceSnapshot {
            bookings,
            services: vec![busy, quiet, idle, gone_service],
            users: vec![
                provider(1, "NY"),
                provider(2, "LA"),
                provider(3, "SF"),
                deleted,
                user(5, Role::Customer, Some("NY")),
            ],
            reviews: vec![
                review(1, 1, 3),
                review(2, 2, 5),
                review(3, 3, 5), // sem agendamentos, não entra
                review(4, 4, 5), // apagado, não entra
            ],
        };

        let dashboard = compute_dashboard(&snapshot);
        let ids: Vec<Uuid> = dashboard.top_providers.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![id(2), id(1)]);
        assert_eq!(dashboard.top_providers[0].avg_rating, 5.0);
        assert_eq!(dashboard.top_providers[1].total_earnings, money(1000));
        assert_eq!(dashboard.metrics.total_users, 4);
    }

    #[test]
    fn test_rankings_are_capped_and_non_increasing() {
        let mut users = Vec::new();
        let mut services = Vec::new();
        let mut bookings = Vec::new();
        let mut reviews = Vec::new();
        let mut next_booking = 1000;

        for n in 1..=8u128 {
            let owner = provider(n, &format!("city-{n}"));
            let svc = service(100 + n, n, Some(10));
            for _ in 0..n {
                bookings.push(booking(next_booking, &svc));
                next_booking += 1;
            }
            reviews.push(review(n, n, (n % 5) as i32 + 1));
            users.push(owner);
            services.push(svc);
        }

        let snapshot = MarketplaceSnapshot { bookings, services, users, reviews };
        let dashboard = compute_dashboard(&snapshot);

        assert_eq!(dashboard.top_services.len(), TOP_LIMIT);
        assert_eq!(dashboard.top_providers.len(), TOP_LIMIT);
        assert_eq!(dashboard.location_trends.len(), TOP_LIMIT);

        assert!(dashboard.top_services.windows(2).all(|w| w[0].booking_count >= w[1].booking_count));
        assert!(dashboard.top_providers.windows(2).all(|w| w[0].avg_rating >= w[1].avg_rating));
        assert!(dashboard.location_trends.windows(2).all(|w| w[0].booking_count >= w[1].booking_count));
        assert!(dashboard.top_services.iter().all(|s| s.booking_count > 0));
        assert!(dashboard.top_providers.iter().all(|p| p.booking_count > 0));

        assert_eq!(dashboard.top_services[0].id, id(108));
        assert_eq!(dashboard.location_trends[0].location, "city-8");
    }

    #[test]
    fn test_location_ties_keep_first_appearance() {
        let sf = service(10, 1, Some(1));
        let la = service(20, 2, Some(1));
        let snapshot = MarketplaceSnapshot {
            bookings: vec![booking(100, &sf), booking(101, &la), booking(102, &la), booking(103, &sf)],
            services: vec![la, sf],
            users: vec![provider(2, "LA"), provider(1, "SF")],
            reviews: vec![],
        };

        let dashboard = compute_dashboard(&snapshot);
        let locations: Vec<&str> = dashboard.location_trends.iter().map(|l| l.location.as_str()).collect();
        assert_eq!(locations, vec!["SF", "LA"]);
    }

    #[test]
    fn test_inactive_service_still_ranks_but_is_not_active() {
        let mut paused = service(10, 1, Some(10));
        paused.is_active = false;
        let snapshot = MarketplaceSnapshot {
            bookings: vec![booking(100, &paused)],
            services: vec![paused],
            users: vec![provider(1, "NY")],
            reviews: vec![],
        };

        let dashboard = compute_dashboard(&snapshot);
        assert_eq!(dashboard.metrics.active_services, 0);
        assert_eq!(dashboard.metrics.total_revenue, money(10));
        assert_eq!(dashboard.top_services.len(), 1);
    }

    #[test]
    fn test_compute_is_idempotent() {
        let mut snapshot = scenario_ny_la();
        snapshot.reviews = vec![review(1, 2, 4), review(2, 1, 4)];
        assert_eq!(compute_dashboard(&snapshot), compute_dashboard(&snapshot));
    }

    #[test]
    fn test_snapshot_serializes_in_camel_case() {
        let json = serde_json::to_value(compute_dashboard(&scenario_ny_la())).unwrap();

        assert_eq!(json["metrics"]["totalBookings"], 3);
        assert_eq!(json["metrics"]["totalRevenue"], 40.0);
        assert_eq!(json["metrics"]["avgRating"], 4.5);
        assert_eq!(json["topServices"][0]["bookingCount"], 2);
        assert_eq!(json["topProviders"][0]["totalEarnings"], 20.0);
        assert_eq!(json["locationTrends"][0]["location"], "NY");
    }

    // --- Fonte em memória para testar o serviço ---

    struct InMemorySource {
        snapshot: MarketplaceSnapshot,
    }

    #[async_trait]
    impl MarketplaceSource for InMemorySource {
        async fn list_all_bookings(&self) -> Result<Vec<Booking>, AppError> {
            Ok(self.snapshot.bookings.clone())
        }

        async fn list_services(&self, filter: ServiceFilter) -> Result<Vec<Service>, AppError> {
            Ok(self.snapshot.services.iter().filter(|s| filter.matches(s)).cloned().collect())
        }

        async fn list_users(&self, filter: UserFilter) -> Result<Vec<User>, AppError> {
            Ok(self.snapshot.users.iter().filter(|u| filter.matches(u)).cloned().collect())
        }

        async fn list_all_reviews(&self) -> Result<Vec<Review>, AppError> {
            Ok(self.snapshot.reviews.clone())
        }
    }

    struct UnreachableSource;

    #[async_trait]
    impl MarketplaceSource for UnreachableSource {
        async fn list_all_bookings(&self) -> Result<Vec<Booking>, AppError> {
            Err(sqlx::Error::PoolTimedOut.into())
        }

        async fn list_services(&self, _filter: ServiceFilter) -> Result<Vec<Service>, AppError> {
            Ok(vec![])
        }

        async fn list_users(&self, _filter: UserFilter) -> Result<Vec<User>, AppError> {
            Ok(vec![])
        }

        async fn list_all_reviews(&self) -> Result<Vec<Review>, AppError> {
            Ok(vec![])
        }
    }

    #[tokio::test]
    async fn test_service_matches_pure_computation() {
        let snapshot = scenario_ny_la();
        let expected = compute_dashboard(&snapshot);

        let service = AnalyticsService::new(Arc::new(InMemorySource { snapshot }));
        let dashboard = service.get_dashboard().await.unwrap();

        assert_eq!(dashboard, expected);
        assert_eq!(service.get_dashboard().await.unwrap(), dashboard);
    }

    #[tokio::test]
    async fn test_default_snapshot_keeps_deleted_services() {
        let mut snapshot = scenario_ny_la();
        snapshot.services[1].is_deleted = true;

        let source = InMemorySource { snapshot };
        let loaded = source.load_snapshot().await.unwrap();
        assert_eq!(loaded.services.len(), 2);
        assert_eq!(loaded.users.len(), 3);

        let dashboard = AnalyticsService::new(Arc::new(source)).get_dashboard().await.unwrap();
        assert_eq!(dashboard.metrics.total_bookings, 3);
        assert_eq!(dashboard.metrics.total_revenue, money(40));
        assert_eq!(dashboard.metrics.active_services, 1);
        assert_eq!(dashboard.top_services.len(), 1);
        assert_eq!(dashboard.top_providers.len(), 1);
        assert_eq!(dashboard.location_trends.len(), 1);
    }

    #[tokio::test]
    async fn test_data_access_failure_is_propagated() {
        let service = AnalyticsService::new(Arc::new(UnreachableSource));
        let err = service.get_dashboard().await.unwrap_err();
        assert!(matches!(err, AppError::DatabaseError(sqlx::Error::PoolTimedOut)));
    }
}
