//! Contract models for employee records
//!
//! These models are transport-agnostic and used for inter-module communication.
//! NO serde derives - these are pure domain models.

use chrono::{DateTime, NaiveDate, Utc};

/// Employee record - the aggregate root
///
/// Owns a collection of [`Review`] records (one-to-many) and at most one
/// [`Onboarding`] record (one-to-one). Both child types hold the foreign
/// key; the parent side is a derived view queried through the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    /// Auto-assigned identifier
    pub id: i64,
    /// Display name
    pub name: String,
    /// Date of hire
    pub hire_date: NaiveDate,
}

/// Input for creating an employee
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    pub name: String,
    pub hire_date: NaiveDate,
}

/// Performance review - "many" side of the one-to-many relationship
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    /// Auto-assigned identifier
    pub id: i64,
    /// Review year
    pub year: i32,
    /// Review text
    pub summary: String,
    /// Owning employee, if attached
    pub employee_id: Option<i64>,
}

/// Input for creating a review
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub year: i32,
    pub summary: String,
    /// Owning employee; may be absent until attached later
    pub employee: Option<EmployeeRef>,
}

/// Onboarding record - "belongs to" side of the one-to-one relationship
///
/// The unique constraint on `employee_id` enforces the one-to-one
/// cardinality at the store level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Onboarding {
    /// Auto-assigned identifier
    pub id: i64,
    /// Orientation session timestamp
    pub orientation: DateTime<Utc>,
    /// Whether the paperwork is done
    pub forms_complete: bool,
    /// Owning employee, if attached
    pub employee_id: Option<i64>,
}

/// Input for creating an onboarding record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOnboarding {
    pub orientation: DateTime<Utc>,
    pub forms_complete: bool,
    /// Owning employee; may be absent until attached later
    pub employee: Option<EmployeeRef>,
}

/// Reference to an employee, either by id or by a live record
///
/// Both forms resolve to the same persisted relationship; a live record is
/// only a convenience for callers that already hold one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmployeeRef {
    Id(i64),
    Record(Employee),
}

impl EmployeeRef {
    /// Identifier this reference resolves to
    pub fn id(&self) -> i64 {
        match self {
            Self::Id(id) => *id,
            Self::Record(employee) => employee.id,
        }
    }
}

impl From<i64> for EmployeeRef {
    fn from(id: i64) -> Self {
        Self::Id(id)
    }
}

impl From<Employee> for EmployeeRef {
    fn from(employee: Employee) -> Self {
        Self::Record(employee)
    }
}

impl From<&Employee> for EmployeeRef {
    fn from(employee: &Employee) -> Self {
        Self::Record(employee.clone())
    }
}
