//! Subscription persistence

pub mod postgres;
pub mod query_criteria;

use async_trait::async_trait;
use store_object::StoreError;

use crate::domain::{
    FilterParams, NewSubscription, QueryCriteria, Subscription, SubscriptionList,
    UpdateSubscription,
};

pub use postgres::{PgSubscriptionRepository, subscription_table};

#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    async fn create(&self, subscription: NewSubscription) -> Result<Subscription, StoreError>;

    async fn get_by_id(&self, id: i64) -> Result<Subscription, StoreError>;

    /// Filtered, sorted page plus pagination metadata
    async fn list(&self, criteria: &QueryCriteria) -> Result<SubscriptionList, StoreError>;

    async fn update(
        &self,
        id: i64,
        changes: UpdateSubscription,
    ) -> Result<Subscription, StoreError>;

    async fn delete(&self, id: i64) -> Result<(), StoreError>;

    /// Sum of `price` over matching rows, 0 when nothing matches
    async fn get_cost(&self, filter: &FilterParams) -> Result<i64, StoreError>;
}
