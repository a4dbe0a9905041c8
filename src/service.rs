//! Subscription use cases
//!
//! Thin layer over a [`SubscriptionRepository`]: every failure is tagged with
//! the use case it happened in, and update/delete check that the row exists
//! first so a missing id surfaces as not-found.

use std::sync::Arc;

use store_object::StoreError;
use thiserror::Error;

use crate::domain::{
    FilterParams, NewSubscription, QueryCriteria, Subscription, SubscriptionList,
    UpdateSubscription,
};
use crate::repository::SubscriptionRepository;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("SubscriptionService.{operation}: {source}")]
    Repository {
        operation: &'static str,
        #[source]
        source: StoreError,
    },
}

impl ServiceError {
    fn repository(operation: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| Self::Repository { operation, source }
    }

    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Repository { source, .. } => source.is_not_found(),
        }
    }
}

#[derive(Clone)]
pub struct SubscriptionService {
    repository: Arc<dyn SubscriptionRepository>,
}

impl SubscriptionService {
    pub fn new(repository: Arc<dyn SubscriptionRepository>) -> Self {
        Self { repository }
    }

    pub async fn create(&self, subscription: NewSubscription) -> Result<Subscription, ServiceError> {
        self.repository
            .create(subscription)
            .await
            .map_err(ServiceError::repository("create"))
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Subscription, ServiceError> {
        self.repository
            .get_by_id(id)
            .await
            .map_err(ServiceError::repository("get_by_id"))
    }

    pub async fn list(&self, criteria: &QueryCriteria) -> Result<SubscriptionList, ServiceError> {
        self.repository
            .list(criteria)
            .await
            .map_err(ServiceError::repository("list"))
    }

    pub async fn update(
        &self,
        id: i64,
        changes: UpdateSubscription,
    ) -> Result<Subscription, ServiceError> {
        let current = self
            .repository
            .get_by_id(id)
            .await
            .map_err(ServiceError::repository("update: get_by_id"))?;

        if changes.is_empty() {
            return Ok(current);
        }

        self.repository
            .update(id, changes)
            .await
            .map_err(ServiceError::repository("update"))
    }

    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        self.repository
            .get_by_id(id)
            .await
            .map_err(ServiceError::repository("delete: get_by_id"))?;

        self.repository
            .delete(id)
            .await
            .map_err(ServiceError::repository("delete"))
    }

    pub async fn get_cost(&self, filter: &FilterParams) -> Result<i64, ServiceError> {
        self.repository
            .get_cost(filter)
            .await
            .map_err(ServiceError::repository("get_cost"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DateRange, PaginationParams};
    use crate::test_support::{InMemoryRepository, new_subscription};
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn service_with(repository: InMemoryRepository) -> SubscriptionService {
        SubscriptionService::new(Arc::new(repository))
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let service = service_with(InMemoryRepository::default());
        let created = service.create(new_subscription("Netflix", 100)).await.unwrap();

        let fetched = service.get_by_id(created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let service = service_with(InMemoryRepository::default());
        let err = service.get_by_id(42).await.unwrap_err();

        assert!(err.is_not_found());
        assert!(err.to_string().starts_with("SubscriptionService.get_by_id:"));
    }

    #[tokio::test]
    async fn test_update_checks_existence_first() {
        let repository = InMemoryRepository::default();
        let service = service_with(repository.clone());

        let err = service
            .update(7, UpdateSubscription::default())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("update: get_by_id"));
        assert_eq!(repository.update_calls(), 0);
    }

    #[tokio::test]
    async fn test_empty_update_returns_current_row() {
        let repository = InMemoryRepository::default();
        let service = service_with(repository.clone());
        let created = service.create(new_subscription("Netflix", 100)).await.unwrap();

        let unchanged = service
            .update(created.id, UpdateSubscription::default())
            .await
            .unwrap();

        assert_eq!(unchanged, created);
        assert_eq!(repository.update_calls(), 0);
    }

    #[tokio::test]
    async fn test_update_applies_changes() {
        let service = service_with(InMemoryRepository::default());
        let created = service.create(new_subscription("Netflix", 100)).await.unwrap();

        let updated = service
            .update(
                created.id,
                UpdateSubscription {
                    price: Some(250),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.price, 250);
        assert_eq!(updated.service_name, "Netflix");
    }

    #[tokio::test]
    async fn test_delete() {
        let service = service_with(InMemoryRepository::default());
        let created = service.create(new_subscription("Spotify", 299)).await.unwrap();

        service.delete(created.id).await.unwrap();
        assert!(service.get_by_id(created.id).await.unwrap_err().is_not_found());
        assert!(service.delete(created.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_list_reports_corrected_page() {
        let service = service_with(InMemoryRepository::default());
        for i in 0..13_i64 {
            service
                .create(new_subscription(&format!("Service {}", i), 100))
                .await
                .unwrap();
        }

        let criteria = QueryCriteria {
            pagination: PaginationParams::new(8, 20).unwrap(),
            ..Default::default()
        };
        let list = service.list(&criteria).await.unwrap();

        assert_eq!(list.data.len(), 13);
        assert_eq!(list.info.page, 1);
        assert_eq!(list.info.page_size, 13);
        assert_eq!(list.info.total_count, 13);
        assert_eq!(list.info.total_pages, 1);
    }

    #[tokio::test]
    async fn test_cost_sums_matching_rows() {
        let service = service_with(InMemoryRepository::default());
        let owner = Uuid::new_v4();

        let mut first = new_subscription("Netflix", 100);
        first.user_id = owner;
        let mut second = new_subscription("Netflix", 250);
        second.user_id = owner;
        second.start_date = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let other = new_subscription("Spotify", 999);

        for subscription in [first, second, other] {
            service.create(subscription).await.unwrap();
        }

        let filter = FilterParams {
            service_name: Some("Netflix".to_string()),
            user_id: owner,
            start_date: DateRange::default(),
        };
        assert_eq!(service.get_cost(&filter).await.unwrap(), 350);

        let filter = FilterParams {
            start_date: DateRange {
                from: None,
                to: NaiveDate::from_ymd_opt(2025, 12, 1),
            },
            ..filter
        };
        assert_eq!(service.get_cost(&filter).await.unwrap(), 100);

        let nothing = FilterParams {
            service_name: Some("Nobody".to_string()),
            ..Default::default()
        };
        assert_eq!(service.get_cost(&nothing).await.unwrap(), 0);
    }
}
