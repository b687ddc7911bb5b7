pub mod admin;
pub mod auth;
pub mod dashboard;
pub mod documents;
pub mod employees;
pub mod event_codes;
pub mod frequency;
pub mod settings;
pub mod units;
pub mod users;
