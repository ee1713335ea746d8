//! Contract layer - public API of the employee records module
//!
//! This layer contains transport-agnostic models and the native client trait.
//! NO serde derives on models - these are pure domain types.

pub mod client;
pub mod error;
pub mod model;

pub use client::EmployeeRecordsApi;
pub use error::RecordsError;
pub use model::{
    Employee, EmployeeRef, NewEmployee, NewOnboarding, NewReview, Onboarding, Review,
};
