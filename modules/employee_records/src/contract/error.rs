//! Contract error types for employee records
//!
//! These errors are transport-agnostic and surfaced synchronously at the
//! failing operation. There is no retry and no partial-commit recovery;
//! correctness relies on the atomicity of the underlying commit.

use thiserror::Error;

/// Employee records domain errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordsError {
    /// Record not found
    #[error("{resource} not found: {id}")]
    NotFound {
        /// Resource type (employee, review, onboarding)
        resource: String,
        /// Resource identifier
        id: String,
    },
    /// A child record's foreign key does not resolve to an existing employee
    /// at commit time
    #[error("{child} references nonexistent employee: {employee_id}")]
    ReferentialIntegrity {
        /// Child record type (review, onboarding)
        child: String,
        /// The unresolvable employee id
        employee_id: i64,
    },
    /// A second onboarding was associated with an employee that already has
    /// one (violates the one-to-one unique constraint)
    #[error("employee {employee_id} already has an onboarding record")]
    UniquenessViolation {
        /// Employee already holding an onboarding
        employee_id: i64,
    },
    /// A migration script failed to apply cleanly; surfaced unchanged from
    /// the migration tool
    #[error("schema migration failed: {message}")]
    Migration {
        /// Underlying migration error text
        message: String,
    },
    /// Internal error
    #[error("internal error")]
    Internal,
}
