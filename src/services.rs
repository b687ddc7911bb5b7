pub mod auth;
pub mod dashboard_service;
pub mod export_service;
pub mod frequency_service;
pub mod registry_service;
pub mod seed_service;
pub mod settings_service;
