//! SeaORM repository implementations

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use crate::contract::{Employee, NewEmployee, Onboarding, RecordsError, Review};
use crate::domain::lifecycle::CascadePlan;
use crate::domain::repository::{EmployeeRepository, OnboardingRepository, ReviewRepository};
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, SqlErr, TransactionError, TransactionTrait,
};
use std::sync::Arc;

use super::entity;

/// Classify a constraint violation raised by the store while committing a
/// child row keyed to `employee_id`. Anything that is not a foreign-key or
/// uniqueness failure passes through unclassified.
fn classify_constraint(err: sea_orm::DbErr, child: &str, employee_id: i64) -> anyhow::Error {
    match err.sql_err() {
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => RecordsError::ReferentialIntegrity {
            child: child.to_string(),
            employee_id,
        }
        .into(),
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            RecordsError::UniquenessViolation { employee_id }.into()
        }
        _ => err.into(),
    }
}

fn flatten_txn_err(err: TransactionError<sea_orm::DbErr>) -> anyhow::Error {
    match err {
        TransactionError::Connection(db) => db.into(),
        TransactionError::Transaction(db) => db.into(),
    }
}

// ===== Employee Repository =====

pub struct SeaOrmEmployeeRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmEmployeeRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EmployeeRepository for SeaOrmEmployeeRepository {
    async fn insert(&self, new: &NewEmployee) -> Result<Employee> {
        let active: entity::employee::ActiveModel = new.into();
        let model = active.insert(&*self.db).await?;
        Ok(model.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Employee>> {
        let result = entity::employee::Entity::find_by_id(id)
            .one(&*self.db)
            .await?;

        Ok(result.map(|e| e.into()))
    }

    async fn list_all(&self) -> Result<Vec<Employee>> {
        let results = entity::employee::Entity::find()
            .order_by_asc(entity::employee::Column::Id)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(|e| e.into()).collect())
    }

    async fn exists(&self, id: i64) -> Result<bool> {
        let count = entity::employee::Entity::find_by_id(id)
            .count(&*self.db)
            .await?;

        Ok(count > 0)
    }

    async fn delete_cascade(&self, id: i64, plan: &CascadePlan) -> Result<()> {
        // Children first: the Restrict foreign keys refuse to drop the
        // parent row while any child still points at it.
        let plan = plan.clone();
        self.db
            .transaction::<_, (), sea_orm::DbErr>(move |txn| {
                Box::pin(async move {
                    if !plan.review_ids.is_empty() {
                        entity::review::Entity::delete_many()
                            .filter(entity::review::Column::Id.is_in(plan.review_ids.clone()))
                            .exec(txn)
                            .await?;
                    }
                    if let Some(onboarding_id) = plan.onboarding_id {
                        entity::onboarding::Entity::delete_by_id(onboarding_id)
                            .exec(txn)
                            .await?;
                    }
                    entity::employee::Entity::delete_by_id(id).exec(txn).await?;
                    Ok(())
                })
            })
            .await
            .map_err(flatten_txn_err)?;

        Ok(())
    }
}

// ===== Review Repository =====

pub struct SeaOrmReviewRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmReviewRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReviewRepository for SeaOrmReviewRepository {
    async fn insert(
        &self,
        year: i32,
        summary: &str,
        employee_id: Option<i64>,
    ) -> Result<Review> {
        let active = entity::review::ActiveModel {
            id: NotSet,
            year: Set(year),
            summary: Set(summary.to_string()),
            employee_id: Set(employee_id),
        };

        let model = match employee_id {
            Some(eid) => active
                .insert(&*self.db)
                .await
                .map_err(|err| classify_constraint(err, "review", eid))?,
            None => active.insert(&*self.db).await?,
        };

        Ok(model.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Review>> {
        let result = entity::review::Entity::find_by_id(id).one(&*self.db).await?;

        Ok(result.map(|e| e.into()))
    }

    async fn find_by_employee(&self, employee_id: i64) -> Result<Vec<Review>> {
        let results = entity::review::Entity::find()
            .filter(entity::review::Column::EmployeeId.eq(employee_id))
            .order_by_asc(entity::review::Column::Id)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(|e| e.into()).collect())
    }

    async fn set_employee(&self, review_id: i64, employee_id: Option<i64>) -> Result<Review> {
        let active = entity::review::ActiveModel {
            id: Set(review_id),
            employee_id: Set(employee_id),
            ..Default::default()
        };

        let model = match employee_id {
            Some(eid) => active
                .update(&*self.db)
                .await
                .map_err(|err| classify_constraint(err, "review", eid))?,
            None => active.update(&*self.db).await?,
        };

        Ok(model.into())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        entity::review::Entity::delete_by_id(id).exec(&*self.db).await?;

        Ok(())
    }
}

// ===== Onboarding Repository =====

pub struct SeaOrmOnboardingRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmOnboardingRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OnboardingRepository for SeaOrmOnboardingRepository {
    async fn insert(
        &self,
        orientation: DateTime<Utc>,
        forms_complete: bool,
        employee_id: Option<i64>,
    ) -> Result<Onboarding> {
        let active = entity::onboarding::ActiveModel {
            id: NotSet,
            orientation: Set(orientation),
            forms_complete: Set(forms_complete),
            employee_id: Set(employee_id),
        };

        let model = match employee_id {
            Some(eid) => active
                .insert(&*self.db)
                .await
                .map_err(|err| classify_constraint(err, "onboarding", eid))?,
            None => active.insert(&*self.db).await?,
        };

        Ok(model.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Onboarding>> {
        let result = entity::onboarding::Entity::find_by_id(id)
            .one(&*self.db)
            .await?;

        Ok(result.map(|e| e.into()))
    }

    async fn find_by_employee(&self, employee_id: i64) -> Result<Option<Onboarding>> {
        let result = entity::onboarding::Entity::find()
            .filter(entity::onboarding::Column::EmployeeId.eq(employee_id))
            .one(&*self.db)
            .await?;

        Ok(result.map(|e| e.into()))
    }

    async fn set_employee(
        &self,
        onboarding_id: i64,
        employee_id: Option<i64>,
    ) -> Result<Onboarding> {
        let active = entity::onboarding::ActiveModel {
            id: Set(onboarding_id),
            employee_id: Set(employee_id),
            ..Default::default()
        };

        let model = match employee_id {
            Some(eid) => active
                .update(&*self.db)
                .await
                .map_err(|err| classify_constraint(err, "onboarding", eid))?,
            None => active.update(&*self.db).await?,
        };

        Ok(model.into())
    }

    async fn replace_for_employee(
        &self,
        employee_id: i64,
        onboarding_id: i64,
        previous_id: i64,
    ) -> Result<Onboarding> {
        // The previous row must go first, inside the transaction: setting
        // the new foreign key while it still exists would trip the unique
        // index on employee_id.
        let model = self
            .db
            .transaction::<_, entity::onboarding::Model, sea_orm::DbErr>(move |txn| {
                Box::pin(async move {
                    entity::onboarding::Entity::delete_by_id(previous_id)
                        .exec(txn)
                        .await?;
                    let active = entity::onboarding::ActiveModel {
                        id: Set(onboarding_id),
                        employee_id: Set(Some(employee_id)),
                        ..Default::default()
                    };
                    active.update(txn).await
                })
            })
            .await
            .map_err(flatten_txn_err)?;

        Ok(model.into())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        entity::onboarding::Entity::delete_by_id(id)
            .exec(&*self.db)
            .await?;

        Ok(())
    }
}
