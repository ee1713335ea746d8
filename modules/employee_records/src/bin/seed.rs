//! Seeding entry point
//!
//! Constructs sample employee, review and onboarding records and commits
//! them through the service. Pure data, intended for ad hoc inspection of a
//! freshly migrated database.

use chrono::{NaiveDate, TimeZone, Utc};
use employee_records::domain::Service;
use employee_records::infra::storage::connect;
use employee_records::infra::storage::repositories::{
    SeaOrmEmployeeRepository, SeaOrmOnboardingRepository, SeaOrmReviewRepository,
};
use employee_records::{Config, EmployeeRef, NewEmployee, NewOnboarding, NewReview};
use std::sync::Arc;

fn date(year: i32, month: u32, day: u32) -> anyhow::Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| anyhow::anyhow!("invalid date {}-{}-{}", year, month, day))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut config = Config::default();
    if let Ok(url) = std::env::var("DATABASE_URL") {
        config.database_url = url;
    }

    let db = Arc::new(connect(&config).await?);
    let service = Service::new(
        Arc::new(SeaOrmEmployeeRepository::new(db.clone())),
        Arc::new(SeaOrmReviewRepository::new(db.clone())),
        Arc::new(SeaOrmOnboardingRepository::new(db.clone())),
    );

    let uri = service
        .create_employee(NewEmployee {
            name: "Uri Lee".to_string(),
            hire_date: date(2022, 5, 17)?,
        })
        .await?;
    let tristan = service
        .create_employee(NewEmployee {
            name: "Tristan Tal".to_string(),
            hire_date: date(2020, 1, 30)?,
        })
        .await?;

    service
        .create_review(NewReview {
            year: 2023,
            summary: "Great web developer!".to_string(),
            employee: Some(EmployeeRef::Record(uri.clone())),
        })
        .await?;
    for (year, summary) in [
        (2021, "Good coder, cold coffee"),
        (2022, "Strong year, shipped the scheduler"),
        (2023, "Mentored two new hires"),
    ] {
        service
            .create_review(NewReview {
                year,
                summary: summary.to_string(),
                employee: Some(EmployeeRef::Id(tristan.id)),
            })
            .await?;
    }

    service
        .create_onboarding(NewOnboarding {
            orientation: Utc
                .with_ymd_and_hms(2023, 3, 27, 9, 0, 0)
                .single()
                .ok_or_else(|| anyhow::anyhow!("invalid orientation timestamp"))?,
            forms_complete: false,
            employee: Some(EmployeeRef::Id(uri.id)),
        })
        .await?;

    let employees = service.list_employees().await?;
    for employee in &employees {
        let reviews = service.reviews_of(employee.id).await?;
        let onboarding = service.onboarding_of(employee.id).await?;
        println!(
            "{} (hired {}): {} review(s), onboarding: {}",
            employee.name,
            employee.hire_date,
            reviews.len(),
            onboarding.is_some()
        );
    }

    Ok(())
}
