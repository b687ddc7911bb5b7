pub mod auth;
pub mod dashboard;
pub mod frequency;
pub mod registry;
pub mod settings;
