pub mod analytics_service;
pub mod auth;
