//! Domain layer - business logic and services

pub mod lifecycle;
pub mod repository;
pub mod service;

pub use lifecycle::{CascadePlan, ChildEvent, ChildState};
pub use repository::{EmployeeRepository, OnboardingRepository, ReviewRepository};
pub use service::Service;
