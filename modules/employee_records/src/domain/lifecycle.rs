//! Cascade lifecycle rules for child records
//!
//! A child record (review or onboarding) is `Attached` while its employee
//! foreign key is set, `Orphaned` once the key is cleared while the parent
//! still exists, and `Deleted` once the row is gone. Orphans must never
//! persist past commit: detaching a child always ends in deletion, and
//! deleting a parent deletes every attached child in the same transaction.

use crate::contract::{Onboarding, RecordsError, Review};

/// Persistence state of a child record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildState {
    /// Foreign key set, parent exists
    Attached,
    /// Foreign key cleared while the parent still exists
    Orphaned,
    /// Row removed from the store
    Deleted,
}

/// Lifecycle event applied to a child record at commit time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildEvent {
    /// The owning employee is being deleted
    ParentDeleted,
    /// The child was removed from the parent's collection/slot
    Detached,
    /// An orphaned child is reaped
    Reaped,
}

impl ChildState {
    /// Apply a lifecycle event, rejecting transitions the cascade rules do
    /// not allow. An invalid transition is a programming error in the
    /// caller, surfaced as `Internal` rather than silently ignored.
    pub fn apply(self, event: ChildEvent) -> Result<ChildState, RecordsError> {
        match (self, event) {
            (ChildState::Attached, ChildEvent::ParentDeleted) => Ok(ChildState::Deleted),
            (ChildState::Attached, ChildEvent::Detached) => Ok(ChildState::Orphaned),
            (ChildState::Orphaned, ChildEvent::Reaped) => Ok(ChildState::Deleted),
            _ => Err(RecordsError::Internal),
        }
    }

    /// State of a review as currently persisted
    pub fn of_review(review: &Review) -> ChildState {
        if review.employee_id.is_some() {
            ChildState::Attached
        } else {
            ChildState::Orphaned
        }
    }

    /// State of an onboarding record as currently persisted
    pub fn of_onboarding(onboarding: &Onboarding) -> ChildState {
        if onboarding.employee_id.is_some() {
            ChildState::Attached
        } else {
            ChildState::Orphaned
        }
    }
}

/// Staged child deletions for one employee delete
///
/// Computed from the parent's children immediately before commit and
/// executed inside a single transaction together with the parent delete.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CascadePlan {
    /// Reviews to delete, in collection order
    pub review_ids: Vec<i64>,
    /// Onboarding record to delete, if one is attached
    pub onboarding_id: Option<i64>,
}

impl CascadePlan {
    /// Build the plan for deleting an employee, walking every attached
    /// child through the `Attached -> Deleted` transition.
    pub fn for_employee_delete(
        reviews: &[Review],
        onboarding: Option<&Onboarding>,
    ) -> Result<Self, RecordsError> {
        let mut plan = CascadePlan::default();
        for review in reviews {
            ChildState::of_review(review).apply(ChildEvent::ParentDeleted)?;
            plan.review_ids.push(review.id);
        }
        if let Some(onboarding) = onboarding {
            ChildState::of_onboarding(onboarding).apply(ChildEvent::ParentDeleted)?;
            plan.onboarding_id = Some(onboarding.id);
        }
        Ok(plan)
    }

    /// True when the plan deletes nothing beyond the employee row itself
    pub fn is_empty(&self) -> bool {
        self.review_ids.is_empty() && self.onboarding_id.is_none()
    }
}

/// Validate the detach-then-reap path for a child in the given state
///
/// An attached child is first orphaned, then reaped; a child whose key is
/// already clear skips straight to the reap. Either way the end state is
/// `Deleted`, which is what makes delete-orphan safe to run at commit time.
pub fn detach_and_reap(state: ChildState) -> Result<ChildState, RecordsError> {
    let orphaned = match state {
        ChildState::Attached => state.apply(ChildEvent::Detached)?,
        ChildState::Orphaned => state,
        ChildState::Deleted => return Err(RecordsError::Internal),
    };
    orphaned.apply(ChildEvent::Reaped)
}
