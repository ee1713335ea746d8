//! Entity to model mappers
//!
//! Conversions between SeaORM entities and contract models

use crate::contract::{Employee, NewEmployee, Onboarding, Review};
use super::entity;

// ===== Employee Conversions =====

impl From<entity::employee::Model> for Employee {
    fn from(entity: entity::employee::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            hire_date: entity.hire_date,
        }
    }
}

impl From<&NewEmployee> for entity::employee::ActiveModel {
    fn from(new: &NewEmployee) -> Self {
        use sea_orm::ActiveValue::{NotSet, Set};

        Self {
            id: NotSet,
            name: Set(new.name.clone()),
            hire_date: Set(new.hire_date),
        }
    }
}

// ===== Review Conversions =====

impl From<entity::review::Model> for Review {
    fn from(entity: entity::review::Model) -> Self {
        Self {
            id: entity.id,
            year: entity.year,
            summary: entity.summary,
            employee_id: entity.employee_id,
        }
    }
}

// ===== Onboarding Conversions =====

impl From<entity::onboarding::Model> for Onboarding {
    fn from(entity: entity::onboarding::Model) -> Self {
        Self {
            id: entity.id,
            orientation: entity.orientation,
            forms_complete: entity.forms_complete,
            employee_id: entity.employee_id,
        }
    }
}
