//! Repository traits for data access
//!
//! These traits define the interface for data access operations.
//! Implementations are in infra/storage/repositories.rs

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use crate::contract::{Employee, NewEmployee, Onboarding, Review};
use crate::domain::lifecycle::CascadePlan;

/// Repository for employees
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Insert a new employee and return it with its assigned id
    async fn insert(&self, new: &NewEmployee) -> Result<Employee>;

    /// Find an employee by id
    async fn find_by_id(&self, id: i64) -> Result<Option<Employee>>;

    /// List all employees ordered by id
    async fn list_all(&self) -> Result<Vec<Employee>>;

    /// Check whether an employee exists
    async fn exists(&self, id: i64) -> Result<bool>;

    /// Delete an employee together with the children named in the plan,
    /// atomically (all staged deletes apply or none do)
    async fn delete_cascade(&self, id: i64, plan: &CascadePlan) -> Result<()>;
}

/// Repository for reviews
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Insert a new review and return it with its assigned id
    async fn insert(
        &self,
        year: i32,
        summary: &str,
        employee_id: Option<i64>,
    ) -> Result<Review>;

    /// Find a review by id
    async fn find_by_id(&self, id: i64) -> Result<Option<Review>>;

    /// All reviews for an employee, in insertion (id) order
    async fn find_by_employee(&self, employee_id: i64) -> Result<Vec<Review>>;

    /// Set or clear a review's employee foreign key
    async fn set_employee(&self, review_id: i64, employee_id: Option<i64>) -> Result<Review>;

    /// Delete a review by id
    async fn delete(&self, id: i64) -> Result<()>;
}

/// Repository for onboarding records
#[async_trait]
pub trait OnboardingRepository: Send + Sync {
    /// Insert a new onboarding record and return it with its assigned id
    async fn insert(
        &self,
        orientation: DateTime<Utc>,
        forms_complete: bool,
        employee_id: Option<i64>,
    ) -> Result<Onboarding>;

    /// Find an onboarding record by id
    async fn find_by_id(&self, id: i64) -> Result<Option<Onboarding>>;

    /// The onboarding record for an employee, if any
    async fn find_by_employee(&self, employee_id: i64) -> Result<Option<Onboarding>>;

    /// Set or clear an onboarding record's employee foreign key
    async fn set_employee(
        &self,
        onboarding_id: i64,
        employee_id: Option<i64>,
    ) -> Result<Onboarding>;

    /// Replace the employee's assigned record: delete the previous one and
    /// attach the replacement, atomically (both changes commit or neither)
    async fn replace_for_employee(
        &self,
        employee_id: i64,
        onboarding_id: i64,
        previous_id: i64,
    ) -> Result<Onboarding>;

    /// Delete an onboarding record by id
    async fn delete(&self, id: i64) -> Result<()>;
}
