//! Native client trait for inter-module communication
//!
//! This trait defines the API that other modules use to interact with the
//! employee records module. NO HTTP - direct function calls for performance.

use async_trait::async_trait;
use super::{
    error::RecordsError,
    model::{Employee, EmployeeRef, NewEmployee, NewOnboarding, NewReview, Onboarding, Review},
};

/// Employee records API for inter-module communication
#[async_trait]
pub trait EmployeeRecordsApi: Send + Sync {
    // ===== Employee Operations =====

    /// Create an employee
    async fn create_employee(&self, new: NewEmployee) -> Result<Employee, RecordsError>;

    /// Get an employee by id
    async fn get_employee(&self, id: i64) -> Result<Employee, RecordsError>;

    /// List all employees
    async fn list_employees(&self) -> Result<Vec<Employee>, RecordsError>;

    /// Delete an employee and cascade-delete its reviews and onboarding
    async fn delete_employee(&self, id: i64) -> Result<(), RecordsError>;

    // ===== Review Operations =====

    /// Create a review, optionally attached to an employee
    async fn create_review(&self, new: NewReview) -> Result<Review, RecordsError>;

    /// Get a review by id
    async fn get_review(&self, id: i64) -> Result<Review, RecordsError>;

    /// All reviews attached to an employee, in insertion order
    async fn reviews_of(&self, employee_id: i64) -> Result<Vec<Review>, RecordsError>;

    /// The employee a review is attached to, if any
    async fn review_employee(&self, review_id: i64) -> Result<Option<Employee>, RecordsError>;

    /// Attach a review to an employee
    async fn attach_review(
        &self,
        review_id: i64,
        employee: EmployeeRef,
    ) -> Result<Review, RecordsError>;

    /// Detach a review from its employee; the orphaned review is deleted
    async fn detach_review(&self, review_id: i64) -> Result<(), RecordsError>;

    /// Remove a review from an employee's collection; the review is deleted
    async fn remove_review(&self, employee_id: i64, review_id: i64) -> Result<(), RecordsError>;

    // ===== Onboarding Operations =====

    /// Create an onboarding record, optionally attached to an employee
    async fn create_onboarding(&self, new: NewOnboarding) -> Result<Onboarding, RecordsError>;

    /// Get an onboarding record by id
    async fn get_onboarding(&self, id: i64) -> Result<Onboarding, RecordsError>;

    /// The onboarding record attached to an employee, if any
    async fn onboarding_of(&self, employee_id: i64) -> Result<Option<Onboarding>, RecordsError>;

    /// The employee an onboarding record is attached to, if any
    async fn onboarding_employee(
        &self,
        onboarding_id: i64,
    ) -> Result<Option<Employee>, RecordsError>;

    /// Assign an onboarding record to an employee, replacing and deleting
    /// any previously assigned one
    async fn assign_onboarding(
        &self,
        employee_id: i64,
        onboarding_id: i64,
    ) -> Result<Onboarding, RecordsError>;

    /// Detach and delete an employee's onboarding record, returning it
    async fn pop_onboarding(&self, employee_id: i64) -> Result<Onboarding, RecordsError>;
}
