//! Integration tests for the employee records service
//!
//! These tests drive the domain service against in-memory mock
//! repositories; storage_tests.rs covers the same semantics against a real
//! SQLite database.

use employee_records::domain::Service;
use employee_records::{EmployeeRecordsApi, EmployeeRef, NewReview, RecordsError};
use std::sync::Arc;

mod common;
use common::{
    hire_date, onboarding_for, onboarding_unattached, orientation, review_for, tristan_tal,
    uri_lee,
};

fn print_test_header(test_name: &str, purpose: &str) {
    println!("\n🧪 TEST: {}", test_name);
    println!("📋 PURPOSE: {}", purpose);
}

// Mock repository implementations for testing
pub mod mocks {
    use anyhow::Result;
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use employee_records::domain::lifecycle::CascadePlan;
    use employee_records::domain::repository::{
        EmployeeRepository, OnboardingRepository, ReviewRepository,
    };
    use employee_records::{Employee, NewEmployee, Onboarding, Review};
    use parking_lot::RwLock;
    use std::collections::BTreeMap;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicI64, Ordering};

    /// Shared in-memory tables standing in for the database
    #[derive(Default)]
    pub struct MockStore {
        next_id: AtomicI64,
        pub employees: RwLock<BTreeMap<i64, Employee>>,
        pub reviews: RwLock<BTreeMap<i64, Review>>,
        pub onboardings: RwLock<BTreeMap<i64, Onboarding>>,
    }

    impl MockStore {
        fn next_id(&self) -> i64 {
            self.next_id.fetch_add(1, Ordering::SeqCst) + 1
        }

        pub fn review_count(&self) -> usize {
            self.reviews.read().len()
        }

        pub fn onboarding_count(&self) -> usize {
            self.onboardings.read().len()
        }
    }

    #[derive(Clone)]
    pub struct MockEmployeeRepo {
        store: Arc<MockStore>,
    }

    impl MockEmployeeRepo {
        pub fn new(store: Arc<MockStore>) -> Self {
            Self { store }
        }
    }

    #[async_trait]
    impl EmployeeRepository for MockEmployeeRepo {
        async fn insert(&self, new: &NewEmployee) -> Result<Employee> {
            let employee = Employee {
                id: self.store.next_id(),
                name: new.name.clone(),
                hire_date: new.hire_date,
            };
            self.store.employees.write().insert(employee.id, employee.clone());
            Ok(employee)
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<Employee>> {
            Ok(self.store.employees.read().get(&id).cloned())
        }

        async fn list_all(&self) -> Result<Vec<Employee>> {
            Ok(self.store.employees.read().values().cloned().collect())
        }

        async fn exists(&self, id: i64) -> Result<bool> {
            Ok(self.store.employees.read().contains_key(&id))
        }

        async fn delete_cascade(&self, id: i64, plan: &CascadePlan) -> Result<()> {
            let mut reviews = self.store.reviews.write();
            for review_id in &plan.review_ids {
                reviews.remove(review_id);
            }
            if let Some(onboarding_id) = plan.onboarding_id {
                self.store.onboardings.write().remove(&onboarding_id);
            }
            self.store.employees.write().remove(&id);
            Ok(())
        }
    }

    #[derive(Clone)]
    pub struct MockReviewRepo {
        store: Arc<MockStore>,
    }

    impl MockReviewRepo {
        pub fn new(store: Arc<MockStore>) -> Self {
            Self { store }
        }
    }

    #[async_trait]
    impl ReviewRepository for MockReviewRepo {
        async fn insert(
            &self,
            year: i32,
            summary: &str,
            employee_id: Option<i64>,
        ) -> Result<Review> {
            let review = Review {
                id: self.store.next_id(),
                year,
                summary: summary.to_string(),
                employee_id,
            };
            self.store.reviews.write().insert(review.id, review.clone());
            Ok(review)
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<Review>> {
            Ok(self.store.reviews.read().get(&id).cloned())
        }

        async fn find_by_employee(&self, employee_id: i64) -> Result<Vec<Review>> {
            Ok(self
                .store
                .reviews
                .read()
                .values()
                .filter(|r| r.employee_id == Some(employee_id))
                .cloned()
                .collect())
        }

        async fn set_employee(&self, review_id: i64, employee_id: Option<i64>) -> Result<Review> {
            let mut reviews = self.store.reviews.write();
            let review = reviews
                .get_mut(&review_id)
                .ok_or_else(|| anyhow::anyhow!("review {} not found", review_id))?;
            review.employee_id = employee_id;
            Ok(review.clone())
        }

        async fn delete(&self, id: i64) -> Result<()> {
            self.store.reviews.write().remove(&id);
            Ok(())
        }
    }

    #[derive(Clone)]
    pub struct MockOnboardingRepo {
        store: Arc<MockStore>,
    }

    impl MockOnboardingRepo {
        pub fn new(store: Arc<MockStore>) -> Self {
            Self { store }
        }
    }

    #[async_trait]
    impl OnboardingRepository for MockOnboardingRepo {
        async fn insert(
            &self,
            orientation: DateTime<Utc>,
            forms_complete: bool,
            employee_id: Option<i64>,
        ) -> Result<Onboarding> {
            let onboarding = Onboarding {
                id: self.store.next_id(),
                orientation,
                forms_complete,
                employee_id,
            };
            self.store
                .onboardings
                .write()
                .insert(onboarding.id, onboarding.clone());
            Ok(onboarding)
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<Onboarding>> {
            Ok(self.store.onboardings.read().get(&id).cloned())
        }

        async fn find_by_employee(&self, employee_id: i64) -> Result<Option<Onboarding>> {
            Ok(self
                .store
                .onboardings
                .read()
                .values()
                .find(|o| o.employee_id == Some(employee_id))
                .cloned())
        }

        async fn set_employee(
            &self,
            onboarding_id: i64,
            employee_id: Option<i64>,
        ) -> Result<Onboarding> {
            let mut onboardings = self.store.onboardings.write();
            let onboarding = onboardings
                .get_mut(&onboarding_id)
                .ok_or_else(|| anyhow::anyhow!("onboarding {} not found", onboarding_id))?;
            onboarding.employee_id = employee_id;
            Ok(onboarding.clone())
        }

        async fn replace_for_employee(
            &self,
            employee_id: i64,
            onboarding_id: i64,
            previous_id: i64,
        ) -> Result<Onboarding> {
            // Single write lock so the delete and the attach land together,
            // or not at all, like the transactional implementation
            let mut onboardings = self.store.onboardings.write();
            if !onboardings.contains_key(&onboarding_id) {
                anyhow::bail!("onboarding {} not found", onboarding_id);
            }
            onboardings.remove(&previous_id);
            let onboarding = onboardings
                .get_mut(&onboarding_id)
                .ok_or_else(|| anyhow::anyhow!("onboarding {} not found", onboarding_id))?;
            onboarding.employee_id = Some(employee_id);
            Ok(onboarding.clone())
        }

        async fn delete(&self, id: i64) -> Result<()> {
            self.store.onboardings.write().remove(&id);
            Ok(())
        }
    }

    /// Onboarding repository whose replace operation always fails without
    /// touching the store, for asserting that a rejected replacement leaves
    /// no partial state behind
    #[derive(Clone)]
    pub struct RejectingReplaceOnboardingRepo {
        inner: MockOnboardingRepo,
    }

    impl RejectingReplaceOnboardingRepo {
        pub fn new(store: Arc<MockStore>) -> Self {
            Self {
                inner: MockOnboardingRepo::new(store),
            }
        }
    }

    #[async_trait]
    impl OnboardingRepository for RejectingReplaceOnboardingRepo {
        async fn insert(
            &self,
            orientation: DateTime<Utc>,
            forms_complete: bool,
            employee_id: Option<i64>,
        ) -> Result<Onboarding> {
            self.inner.insert(orientation, forms_complete, employee_id).await
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<Onboarding>> {
            self.inner.find_by_id(id).await
        }

        async fn find_by_employee(&self, employee_id: i64) -> Result<Option<Onboarding>> {
            self.inner.find_by_employee(employee_id).await
        }

        async fn set_employee(
            &self,
            onboarding_id: i64,
            employee_id: Option<i64>,
        ) -> Result<Onboarding> {
            self.inner.set_employee(onboarding_id, employee_id).await
        }

        async fn replace_for_employee(
            &self,
            _employee_id: i64,
            _onboarding_id: i64,
            _previous_id: i64,
        ) -> Result<Onboarding> {
            anyhow::bail!("replacement rejected")
        }

        async fn delete(&self, id: i64) -> Result<()> {
            self.inner.delete(id).await
        }
    }
}

use mocks::{
    MockEmployeeRepo, MockOnboardingRepo, MockReviewRepo, MockStore,
    RejectingReplaceOnboardingRepo,
};

fn create_test_service() -> (Service, Arc<MockStore>) {
    let store = Arc::new(MockStore::default());
    let service = Service::new(
        Arc::new(MockEmployeeRepo::new(store.clone())),
        Arc::new(MockReviewRepo::new(store.clone())),
        Arc::new(MockOnboardingRepo::new(store.clone())),
    );
    (service, store)
}

#[tokio::test]
async fn test_create_and_get_employee() {
    let (service, _store) = create_test_service();

    let created = service.create_employee(uri_lee()).await.expect("create");
    assert_eq!(created.name, "Uri Lee");
    assert_eq!(created.hire_date, hire_date(2022, 5, 17));

    let fetched = service.get_employee(created.id).await.expect("get");
    assert_eq!(fetched, created);

    let all = service.list_employees().await.expect("list");
    assert_eq!(all, vec![created]);
}

#[tokio::test]
async fn test_get_missing_employee_is_not_found() {
    let (service, _store) = create_test_service();

    let err = service.get_employee(404).await.expect_err("should fail");
    assert!(matches!(err, RecordsError::NotFound { .. }));
}

#[tokio::test]
async fn test_review_attaches_bidirectionally() {
    let (service, _store) = create_test_service();

    print_test_header(
        "test_review_attaches_bidirectionally",
        "A review created against Uri Lee appears in Uri's collection and resolves back to Uri.",
    );

    let uri = service.create_employee(uri_lee()).await.expect("create employee");

    let review = service
        .create_review(NewReview {
            year: 2023,
            summary: "Great web developer!".to_string(),
            employee: Some(EmployeeRef::Record(uri.clone())),
        })
        .await
        .expect("create review");

    assert_eq!(review.employee_id, Some(uri.id));

    let reviews = service.reviews_of(uri.id).await.expect("reviews_of");
    assert_eq!(reviews, vec![review.clone()]);

    let owner = service.review_employee(review.id).await.expect("review_employee");
    assert_eq!(owner, Some(uri));
}

#[tokio::test]
async fn test_id_and_record_refs_resolve_to_same_relationship() {
    let (service, _store) = create_test_service();

    let uri = service.create_employee(uri_lee()).await.expect("create employee");

    let by_record = service
        .create_review(review_for(&uri, 2022))
        .await
        .expect("create by record");
    let by_id = service
        .create_review(review_for(uri.id, 2023))
        .await
        .expect("create by id");

    assert_eq!(by_record.employee_id, Some(uri.id));
    assert_eq!(by_id.employee_id, Some(uri.id));

    let reviews = service.reviews_of(uri.id).await.expect("reviews_of");
    assert_eq!(reviews, vec![by_record, by_id]);
}

#[tokio::test]
async fn test_reviews_keep_insertion_order() {
    let (service, _store) = create_test_service();

    let tristan = service.create_employee(tristan_tal()).await.expect("create");
    let mut expected = Vec::new();
    for year in [2021, 2022, 2023] {
        expected.push(service.create_review(review_for(tristan.id, year)).await.expect("create"));
    }

    let reviews = service.reviews_of(tristan.id).await.expect("reviews_of");
    assert_eq!(reviews, expected);
}

#[tokio::test]
async fn test_create_review_with_invalid_employee_fails() {
    let (service, store) = create_test_service();

    let err = service
        .create_review(review_for(999, 2023))
        .await
        .expect_err("should fail");
    assert_eq!(
        err,
        RecordsError::ReferentialIntegrity {
            child: "review".to_string(),
            employee_id: 999,
        }
    );
    // Nothing committed
    assert_eq!(store.review_count(), 0);
}

#[tokio::test]
async fn test_attach_review_to_invalid_employee_fails() {
    let (service, _store) = create_test_service();

    let unattached = service
        .create_review(NewReview {
            year: 2023,
            summary: "floating".to_string(),
            employee: None,
        })
        .await
        .expect("create unattached");
    assert_eq!(unattached.employee_id, None);

    let err = service
        .attach_review(unattached.id, EmployeeRef::Id(999))
        .await
        .expect_err("should fail");
    assert!(matches!(err, RecordsError::ReferentialIntegrity { .. }));
}

#[tokio::test]
async fn test_attach_then_detach_review_deletes_orphan() {
    let (service, store) = create_test_service();

    let uri = service.create_employee(uri_lee()).await.expect("create");
    let review = service
        .create_review(NewReview {
            year: 2023,
            summary: "late attach".to_string(),
            employee: None,
        })
        .await
        .expect("create");

    let attached = service
        .attach_review(review.id, EmployeeRef::Id(uri.id))
        .await
        .expect("attach");
    assert_eq!(attached.employee_id, Some(uri.id));

    service.detach_review(review.id).await.expect("detach");
    assert_eq!(store.review_count(), 0);

    let err = service.get_review(review.id).await.expect_err("gone");
    assert!(matches!(err, RecordsError::NotFound { .. }));
}

#[tokio::test]
async fn test_remove_review_from_collection_deletes_it() {
    let (service, store) = create_test_service();

    print_test_header(
        "test_remove_review_from_collection_deletes_it",
        "Removing a review from an employee's collection deletes the row; no orphan survives.",
    );

    let uri = service.create_employee(uri_lee()).await.expect("create");
    let keep = service.create_review(review_for(uri.id, 2022)).await.expect("create");
    let remove = service.create_review(review_for(uri.id, 2023)).await.expect("create");

    service
        .remove_review(uri.id, remove.id)
        .await
        .expect("remove");

    let reviews = service.reviews_of(uri.id).await.expect("reviews_of");
    assert_eq!(reviews, vec![keep]);
    assert_eq!(store.review_count(), 1);

    let err = service.get_review(remove.id).await.expect_err("gone");
    assert!(matches!(err, RecordsError::NotFound { .. }));
}

#[tokio::test]
async fn test_remove_review_not_in_collection_fails() {
    let (service, store) = create_test_service();

    let uri = service.create_employee(uri_lee()).await.expect("create");
    let tristan = service.create_employee(tristan_tal()).await.expect("create");
    let review = service.create_review(review_for(tristan.id, 2023)).await.expect("create");

    let err = service
        .remove_review(uri.id, review.id)
        .await
        .expect_err("should fail");
    assert!(matches!(err, RecordsError::NotFound { .. }));
    // Tristan's review untouched
    assert_eq!(store.review_count(), 1);
}

#[tokio::test]
async fn test_delete_employee_cascades_to_all_children() {
    let (service, store) = create_test_service();

    print_test_header(
        "test_delete_employee_cascades_to_all_children",
        "Deleting Tristan Tal removes his three reviews and onboarding record; no orphan rows remain.",
    );

    let tristan = service.create_employee(tristan_tal()).await.expect("create");
    let mut review_ids = Vec::new();
    for year in [2021, 2022, 2023] {
        let review = service
            .create_review(review_for(tristan.id, year))
            .await
            .expect("create review");
        review_ids.push(review.id);
    }
    service
        .create_onboarding(onboarding_for(tristan.id, orientation(2020, 2, 3)))
        .await
        .expect("create onboarding");

    service.delete_employee(tristan.id).await.expect("delete");

    assert_eq!(store.review_count(), 0);
    assert_eq!(store.onboarding_count(), 0);
    for review_id in review_ids {
        let err = service.get_review(review_id).await.expect_err("review gone");
        assert!(matches!(err, RecordsError::NotFound { .. }));
    }
    let err = service.get_employee(tristan.id).await.expect_err("employee gone");
    assert!(matches!(err, RecordsError::NotFound { .. }));
}

#[tokio::test]
async fn test_delete_employee_leaves_other_employees_alone() {
    let (service, store) = create_test_service();

    let uri = service.create_employee(uri_lee()).await.expect("create");
    let tristan = service.create_employee(tristan_tal()).await.expect("create");
    let uris_review = service.create_review(review_for(uri.id, 2023)).await.expect("create");
    service.create_review(review_for(tristan.id, 2023)).await.expect("create");

    service.delete_employee(tristan.id).await.expect("delete");

    assert_eq!(store.review_count(), 1);
    let reviews = service.reviews_of(uri.id).await.expect("reviews_of");
    assert_eq!(reviews, vec![uris_review]);
}

#[tokio::test]
async fn test_onboarding_scenario() {
    let (service, store) = create_test_service();

    print_test_header(
        "test_onboarding_scenario",
        "Uri's onboarding is readable from both sides; popping it deletes the record from storage.",
    );

    let uri = service.create_employee(uri_lee()).await.expect("create");
    let when = orientation(2023, 3, 27);
    let onboarding = service
        .create_onboarding(onboarding_for(&uri, when))
        .await
        .expect("create onboarding");
    assert!(!onboarding.forms_complete);

    let fetched = service
        .onboarding_of(uri.id)
        .await
        .expect("onboarding_of")
        .expect("present");
    assert_eq!(fetched.orientation, when);

    let owner = service
        .onboarding_employee(onboarding.id)
        .await
        .expect("onboarding_employee");
    assert_eq!(owner, Some(uri.clone()));

    let popped = service.pop_onboarding(uri.id).await.expect("pop");
    assert_eq!(popped.id, onboarding.id);
    assert_eq!(store.onboarding_count(), 0);
    assert_eq!(service.onboarding_of(uri.id).await.expect("onboarding_of"), None);
}

#[tokio::test]
async fn test_second_onboarding_is_uniqueness_violation() {
    let (service, store) = create_test_service();

    let uri = service.create_employee(uri_lee()).await.expect("create");
    service
        .create_onboarding(onboarding_for(uri.id, orientation(2023, 3, 27)))
        .await
        .expect("first onboarding");

    let err = service
        .create_onboarding(onboarding_for(uri.id, orientation(2023, 4, 1)))
        .await
        .expect_err("should fail");
    assert_eq!(err, RecordsError::UniquenessViolation { employee_id: uri.id });
    assert_eq!(store.onboarding_count(), 1);
}

#[tokio::test]
async fn test_assign_onboarding_replaces_previous() {
    let (service, store) = create_test_service();

    print_test_header(
        "test_assign_onboarding_replaces_previous",
        "Parent-side reassignment orphans and deletes the previous onboarding record.",
    );

    let uri = service.create_employee(uri_lee()).await.expect("create");
    let first = service
        .create_onboarding(onboarding_for(uri.id, orientation(2023, 3, 27)))
        .await
        .expect("first");
    let replacement = service
        .create_onboarding(onboarding_unattached(orientation(2023, 4, 1)))
        .await
        .expect("replacement");

    let assigned = service
        .assign_onboarding(uri.id, replacement.id)
        .await
        .expect("assign");
    assert_eq!(assigned.employee_id, Some(uri.id));

    // The replaced record is gone, not retained as an orphan
    assert_eq!(store.onboarding_count(), 1);
    let err = service.get_onboarding(first.id).await.expect_err("gone");
    assert!(matches!(err, RecordsError::NotFound { .. }));

    let current = service
        .onboarding_of(uri.id)
        .await
        .expect("onboarding_of")
        .expect("present");
    assert_eq!(current.id, replacement.id);
}

#[tokio::test]
async fn test_assign_same_onboarding_is_idempotent() {
    let (service, store) = create_test_service();

    let uri = service.create_employee(uri_lee()).await.expect("create");
    let onboarding = service
        .create_onboarding(onboarding_for(uri.id, orientation(2023, 3, 27)))
        .await
        .expect("create");

    let assigned = service
        .assign_onboarding(uri.id, onboarding.id)
        .await
        .expect("assign");
    assert_eq!(assigned.id, onboarding.id);
    assert_eq!(store.onboarding_count(), 1);
}

#[tokio::test]
async fn test_failed_replacement_leaves_previous_onboarding_intact() {
    let store = Arc::new(MockStore::default());
    let service = Service::new(
        Arc::new(MockEmployeeRepo::new(store.clone())),
        Arc::new(MockReviewRepo::new(store.clone())),
        Arc::new(RejectingReplaceOnboardingRepo::new(store.clone())),
    );

    print_test_header(
        "test_failed_replacement_leaves_previous_onboarding_intact",
        "A reassignment the store refuses applies neither half: the previous record stays assigned.",
    );

    let uri = service.create_employee(uri_lee()).await.expect("create");
    let first = service
        .create_onboarding(onboarding_for(uri.id, orientation(2023, 3, 27)))
        .await
        .expect("first");
    let replacement = service
        .create_onboarding(onboarding_unattached(orientation(2023, 4, 1)))
        .await
        .expect("replacement");

    let err = service
        .assign_onboarding(uri.id, replacement.id)
        .await
        .expect_err("store refuses the swap");
    assert!(matches!(err, RecordsError::Internal));

    // Neither the delete nor the attach went through
    assert_eq!(store.onboarding_count(), 2);
    let current = service
        .onboarding_of(uri.id)
        .await
        .expect("onboarding_of")
        .expect("previous record survives");
    assert_eq!(current.id, first.id);
    let floating = service.get_onboarding(replacement.id).await.expect("get");
    assert_eq!(floating.employee_id, None);
}

#[tokio::test]
async fn test_detach_never_attached_review_still_deletes_it() {
    let (service, store) = create_test_service();

    let review = service
        .create_review(NewReview {
            year: 2023,
            summary: "never attached".to_string(),
            employee: None,
        })
        .await
        .expect("create unattached");
    assert_eq!(review.employee_id, None);

    // Already orphaned at birth; detaching reaps it straight away
    service.detach_review(review.id).await.expect("detach");
    assert_eq!(store.review_count(), 0);
    let err = service.get_review(review.id).await.expect_err("gone");
    assert!(matches!(err, RecordsError::NotFound { .. }));
}

#[tokio::test]
async fn test_service_works_through_the_api_trait() {
    let (service, _store) = create_test_service();
    let api: Arc<dyn EmployeeRecordsApi> = Arc::new(service);

    let uri = api.create_employee(uri_lee()).await.expect("create");
    let review = api.create_review(review_for(uri.id, 2023)).await.expect("create");

    api.remove_review(uri.id, review.id).await.expect("remove");
    assert!(api.reviews_of(uri.id).await.expect("reviews_of").is_empty());
}

#[tokio::test]
async fn test_pop_onboarding_without_one_is_not_found() {
    let (service, _store) = create_test_service();

    let uri = service.create_employee(uri_lee()).await.expect("create");
    let err = service.pop_onboarding(uri.id).await.expect_err("should fail");
    assert!(matches!(err, RecordsError::NotFound { .. }));
}
