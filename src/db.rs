pub mod user_repo;
pub use user_repo::UserRepository;
pub mod marketplace_repo;
pub use marketplace_repo::{MarketplaceRepository, MarketplaceSnapshot, MarketplaceSource};
