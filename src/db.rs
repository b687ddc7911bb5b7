pub mod dashboard_repo;
pub use dashboard_repo::DashboardRepository;
pub mod employee_repo;
pub use employee_repo::EmployeeRepository;
pub mod event_code_repo;
pub use event_code_repo::EventCodeRepository;
pub mod frequency_repo;
pub use frequency_repo::FrequencyRepository;
pub mod org_repo;
pub use org_repo::OrganizationRepository;
pub mod unit_repo;
pub use unit_repo::UnitRepository;
pub mod user_repo;
pub use user_repo::UserRepository;
