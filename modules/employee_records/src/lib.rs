//! Employee Records Module
//!
//! Persistence module for an employee aggregate: an Employee owns a
//! collection of Review records (one-to-many) and at most one Onboarding
//! record (one-to-one). Children hold the foreign key; cascade and
//! delete-orphan rules are enforced explicitly at commit time so no orphan
//! rows survive a detach or a parent delete.

// Public exports
pub mod contract;
pub use contract::{
    client::EmployeeRecordsApi, error::RecordsError, Employee, EmployeeRef, NewEmployee,
    NewOnboarding, NewReview, Onboarding, Review,
};

pub mod domain;
pub use domain::Service;

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod infra;

pub use config::Config;
