//! Domain service - relationship accessors and cascade orchestration
//!
//! Both directions of each relationship go through explicit service
//! operations: setting or clearing a child's foreign key returns the updated
//! child in the same call, so callers never need a reload to see a
//! consistent pair of accessors. Removal from a parent's collection/slot is
//! the delete-orphan path and always ends with the child row gone.

use async_trait::async_trait;
use crate::contract::{
    Employee, EmployeeRecordsApi, EmployeeRef, NewEmployee, NewOnboarding, NewReview, Onboarding,
    RecordsError, Review,
};
use std::sync::Arc;
use super::lifecycle::{detach_and_reap, CascadePlan, ChildState};
use super::repository::{EmployeeRepository, OnboardingRepository, ReviewRepository};

/// Domain service for employee records
pub struct Service {
    employees: Arc<dyn EmployeeRepository>,
    reviews: Arc<dyn ReviewRepository>,
    onboardings: Arc<dyn OnboardingRepository>,
}

/// Recover a typed domain error carried through the repository seam,
/// falling back to `Internal` for anything unclassified.
fn repo_err(err: anyhow::Error) -> RecordsError {
    match err.downcast_ref::<RecordsError>() {
        Some(e) => e.clone(),
        None => {
            tracing::error!("repository error: {:?}", err);
            RecordsError::Internal
        }
    }
}

impl Service {
    /// Create a new service instance
    pub fn new(
        employees: Arc<dyn EmployeeRepository>,
        reviews: Arc<dyn ReviewRepository>,
        onboardings: Arc<dyn OnboardingRepository>,
    ) -> Self {
        Self {
            employees,
            reviews,
            onboardings,
        }
    }

    /// Resolve an employee reference (id or live record) against the store.
    /// An unresolvable reference is a referential-integrity failure on the
    /// child being committed.
    async fn resolve_employee(
        &self,
        employee: &EmployeeRef,
        child: &str,
    ) -> Result<i64, RecordsError> {
        let id = employee.id();
        let exists = self.employees.exists(id).await.map_err(repo_err)?;
        if !exists {
            return Err(RecordsError::ReferentialIntegrity {
                child: child.to_string(),
                employee_id: id,
            });
        }
        Ok(id)
    }

    async fn require_employee(&self, id: i64) -> Result<Employee, RecordsError> {
        self.employees
            .find_by_id(id)
            .await
            .map_err(repo_err)?
            .ok_or_else(|| RecordsError::NotFound {
                resource: "employee".to_string(),
                id: id.to_string(),
            })
    }

    async fn require_review(&self, id: i64) -> Result<Review, RecordsError> {
        self.reviews
            .find_by_id(id)
            .await
            .map_err(repo_err)?
            .ok_or_else(|| RecordsError::NotFound {
                resource: "review".to_string(),
                id: id.to_string(),
            })
    }

    async fn require_onboarding(&self, id: i64) -> Result<Onboarding, RecordsError> {
        self.onboardings
            .find_by_id(id)
            .await
            .map_err(repo_err)?
            .ok_or_else(|| RecordsError::NotFound {
                resource: "onboarding".to_string(),
                id: id.to_string(),
            })
    }

    // ===== Employee Operations =====

    /// Create an employee
    pub async fn create_employee(&self, new: NewEmployee) -> Result<Employee, RecordsError> {
        self.employees.insert(&new).await.map_err(repo_err)
    }

    /// Get an employee by id
    pub async fn get_employee(&self, id: i64) -> Result<Employee, RecordsError> {
        self.require_employee(id).await
    }

    /// List all employees
    pub async fn list_employees(&self) -> Result<Vec<Employee>, RecordsError> {
        self.employees.list_all().await.map_err(repo_err)
    }

    /// Delete an employee and every child attached to it
    ///
    /// The cascade plan is computed from the employee's current children and
    /// executed atomically with the parent delete; on failure nothing is
    /// applied and the error is surfaced.
    pub async fn delete_employee(&self, id: i64) -> Result<(), RecordsError> {
        let employee = self.require_employee(id).await?;
        let reviews = self.reviews.find_by_employee(id).await.map_err(repo_err)?;
        let onboarding = self
            .onboardings
            .find_by_employee(id)
            .await
            .map_err(repo_err)?;

        let plan = CascadePlan::for_employee_delete(&reviews, onboarding.as_ref())?;
        if !plan.is_empty() {
            tracing::info!(
                "cascade delete of employee {}: {} review(s), onboarding: {}",
                employee.id,
                plan.review_ids.len(),
                plan.onboarding_id.is_some()
            );
        }
        self.employees
            .delete_cascade(id, &plan)
            .await
            .map_err(repo_err)
    }

    // ===== Review Operations =====

    /// Create a review; a supplied employee reference must resolve at commit
    pub async fn create_review(&self, new: NewReview) -> Result<Review, RecordsError> {
        let employee_id = match &new.employee {
            Some(employee) => Some(self.resolve_employee(employee, "review").await?),
            None => None,
        };
        self.reviews
            .insert(new.year, &new.summary, employee_id)
            .await
            .map_err(repo_err)
    }

    /// Get a review by id
    pub async fn get_review(&self, id: i64) -> Result<Review, RecordsError> {
        self.require_review(id).await
    }

    /// All reviews attached to an employee, in insertion order
    pub async fn reviews_of(&self, employee_id: i64) -> Result<Vec<Review>, RecordsError> {
        self.require_employee(employee_id).await?;
        self.reviews
            .find_by_employee(employee_id)
            .await
            .map_err(repo_err)
    }

    /// The employee a review is attached to, if any
    pub async fn review_employee(&self, review_id: i64) -> Result<Option<Employee>, RecordsError> {
        let review = self.require_review(review_id).await?;
        match review.employee_id {
            Some(employee_id) => self.employees.find_by_id(employee_id).await.map_err(repo_err),
            None => Ok(None),
        }
    }

    /// Attach a review to an employee; both accessors are consistent on
    /// return without a reload
    pub async fn attach_review(
        &self,
        review_id: i64,
        employee: EmployeeRef,
    ) -> Result<Review, RecordsError> {
        self.require_review(review_id).await?;
        let employee_id = self.resolve_employee(&employee, "review").await?;
        self.reviews
            .set_employee(review_id, Some(employee_id))
            .await
            .map_err(repo_err)
    }

    /// Detach a review from its employee and delete the orphan
    pub async fn detach_review(&self, review_id: i64) -> Result<(), RecordsError> {
        let review = self.require_review(review_id).await?;
        detach_and_reap(ChildState::of_review(&review))?;
        self.reviews.delete(review_id).await.map_err(repo_err)
    }

    /// Remove a review from an employee's collection; the review is deleted
    pub async fn remove_review(
        &self,
        employee_id: i64,
        review_id: i64,
    ) -> Result<(), RecordsError> {
        self.require_employee(employee_id).await?;
        let review = self.require_review(review_id).await?;
        if review.employee_id != Some(employee_id) {
            return Err(RecordsError::NotFound {
                resource: "review".to_string(),
                id: format!("{} in employee {} collection", review_id, employee_id),
            });
        }
        detach_and_reap(ChildState::of_review(&review))?;
        self.reviews.delete(review_id).await.map_err(repo_err)
    }

    // ===== Onboarding Operations =====

    /// Create an onboarding record
    ///
    /// Creating a second record for an employee that already has one is a
    /// uniqueness violation; reassignment goes through `assign_onboarding`.
    pub async fn create_onboarding(
        &self,
        new: NewOnboarding,
    ) -> Result<Onboarding, RecordsError> {
        let employee_id = match &new.employee {
            Some(employee) => {
                let id = self.resolve_employee(employee, "onboarding").await?;
                let existing = self
                    .onboardings
                    .find_by_employee(id)
                    .await
                    .map_err(repo_err)?;
                if existing.is_some() {
                    return Err(RecordsError::UniquenessViolation { employee_id: id });
                }
                Some(id)
            }
            None => None,
        };
        self.onboardings
            .insert(new.orientation, new.forms_complete, employee_id)
            .await
            .map_err(repo_err)
    }

    /// Get an onboarding record by id
    pub async fn get_onboarding(&self, id: i64) -> Result<Onboarding, RecordsError> {
        self.require_onboarding(id).await
    }

    /// The onboarding record attached to an employee, if any
    pub async fn onboarding_of(
        &self,
        employee_id: i64,
    ) -> Result<Option<Onboarding>, RecordsError> {
        self.require_employee(employee_id).await?;
        self.onboardings
            .find_by_employee(employee_id)
            .await
            .map_err(repo_err)
    }

    /// The employee an onboarding record is attached to, if any
    pub async fn onboarding_employee(
        &self,
        onboarding_id: i64,
    ) -> Result<Option<Employee>, RecordsError> {
        let onboarding = self.require_onboarding(onboarding_id).await?;
        match onboarding.employee_id {
            Some(employee_id) => self.employees.find_by_id(employee_id).await.map_err(repo_err),
            None => Ok(None),
        }
    }

    /// Assign an onboarding record to an employee's slot
    ///
    /// Replace semantics: a previously assigned record is orphaned and
    /// deleted in the same operation, keeping the one-to-one invariant
    /// without surfacing a conflict for the parent-side accessor.
    pub async fn assign_onboarding(
        &self,
        employee_id: i64,
        onboarding_id: i64,
    ) -> Result<Onboarding, RecordsError> {
        self.require_employee(employee_id).await?;
        self.require_onboarding(onboarding_id).await?;

        if let Some(previous) = self
            .onboardings
            .find_by_employee(employee_id)
            .await
            .map_err(repo_err)?
        {
            if previous.id == onboarding_id {
                return Ok(previous);
            }
            detach_and_reap(ChildState::of_onboarding(&previous))?;
            // One repository commit for both changes: if the replacement
            // cannot be attached, the previous record must survive.
            let replaced = self
                .onboardings
                .replace_for_employee(employee_id, onboarding_id, previous.id)
                .await
                .map_err(repo_err)?;
            tracing::info!(
                "replaced onboarding {} for employee {}",
                previous.id,
                employee_id
            );
            return Ok(replaced);
        }

        self.onboardings
            .set_employee(onboarding_id, Some(employee_id))
            .await
            .map_err(repo_err)
    }

    /// Detach and delete an employee's onboarding record, returning it
    pub async fn pop_onboarding(&self, employee_id: i64) -> Result<Onboarding, RecordsError> {
        self.require_employee(employee_id).await?;
        let onboarding = self
            .onboardings
            .find_by_employee(employee_id)
            .await
            .map_err(repo_err)?
            .ok_or_else(|| RecordsError::NotFound {
                resource: "onboarding".to_string(),
                id: format!("employee {}", employee_id),
            })?;

        detach_and_reap(ChildState::of_onboarding(&onboarding))?;
        self.onboardings
            .delete(onboarding.id)
            .await
            .map_err(repo_err)?;
        Ok(onboarding)
    }
}

#[async_trait]
impl EmployeeRecordsApi for Service {
    async fn create_employee(&self, new: NewEmployee) -> Result<Employee, RecordsError> {
        Service::create_employee(self, new).await
    }

    async fn get_employee(&self, id: i64) -> Result<Employee, RecordsError> {
        Service::get_employee(self, id).await
    }

    async fn list_employees(&self) -> Result<Vec<Employee>, RecordsError> {
        Service::list_employees(self).await
    }

    async fn delete_employee(&self, id: i64) -> Result<(), RecordsError> {
        Service::delete_employee(self, id).await
    }

    async fn create_review(&self, new: NewReview) -> Result<Review, RecordsError> {
        Service::create_review(self, new).await
    }

    async fn get_review(&self, id: i64) -> Result<Review, RecordsError> {
        Service::get_review(self, id).await
    }

    async fn reviews_of(&self, employee_id: i64) -> Result<Vec<Review>, RecordsError> {
        Service::reviews_of(self, employee_id).await
    }

    async fn review_employee(&self, review_id: i64) -> Result<Option<Employee>, RecordsError> {
        Service::review_employee(self, review_id).await
    }

    async fn attach_review(
        &self,
        review_id: i64,
        employee: EmployeeRef,
    ) -> Result<Review, RecordsError> {
        Service::attach_review(self, review_id, employee).await
    }

    async fn detach_review(&self, review_id: i64) -> Result<(), RecordsError> {
        Service::detach_review(self, review_id).await
    }

    async fn remove_review(&self, employee_id: i64, review_id: i64) -> Result<(), RecordsError> {
        Service::remove_review(self, employee_id, review_id).await
    }

    async fn create_onboarding(&self, new: NewOnboarding) -> Result<Onboarding, RecordsError> {
        Service::create_onboarding(self, new).await
    }

    async fn get_onboarding(&self, id: i64) -> Result<Onboarding, RecordsError> {
        Service::get_onboarding(self, id).await
    }

    async fn onboarding_of(&self, employee_id: i64) -> Result<Option<Onboarding>, RecordsError> {
        Service::onboarding_of(self, employee_id).await
    }

    async fn onboarding_employee(
        &self,
        onboarding_id: i64,
    ) -> Result<Option<Employee>, RecordsError> {
        Service::onboarding_employee(self, onboarding_id).await
    }

    async fn assign_onboarding(
        &self,
        employee_id: i64,
        onboarding_id: i64,
    ) -> Result<Onboarding, RecordsError> {
        Service::assign_onboarding(self, employee_id, onboarding_id).await
    }

    async fn pop_onboarding(&self, employee_id: i64) -> Result<Onboarding, RecordsError> {
        Service::pop_onboarding(self, employee_id).await
    }
}
