//! Common test fixtures

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use employee_records::{NewEmployee, NewOnboarding, NewReview};

pub fn hire_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

pub fn orientation(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 9, 0, 0)
        .single()
        .expect("valid test timestamp")
}

/// Employee fixture from the lesson scenario: Uri Lee, hired 2022-05-17
pub fn uri_lee() -> NewEmployee {
    NewEmployee {
        name: "Uri Lee".to_string(),
        hire_date: hire_date(2022, 5, 17),
    }
}

/// Employee fixture with a multi-year review history
pub fn tristan_tal() -> NewEmployee {
    NewEmployee {
        name: "Tristan Tal".to_string(),
        hire_date: hire_date(2020, 1, 30),
    }
}

pub fn review_for(employee: impl Into<employee_records::EmployeeRef>, year: i32) -> NewReview {
    NewReview {
        year,
        summary: format!("Review for {}", year),
        employee: Some(employee.into()),
    }
}

pub fn onboarding_for(
    employee: impl Into<employee_records::EmployeeRef>,
    orientation: DateTime<Utc>,
) -> NewOnboarding {
    NewOnboarding {
        orientation,
        forms_complete: false,
        employee: Some(employee.into()),
    }
}

pub fn onboarding_unattached(orientation: DateTime<Utc>) -> NewOnboarding {
    NewOnboarding {
        orientation,
        forms_complete: true,
        employee: None,
    }
}
