//! Application services — use-case orchestration over the backend port.

pub mod dashboard_service;

pub use dashboard_service::DashboardService;
