//! PostgreSQL subscription repository

use async_trait::async_trait;
use sqlx::PgPool;
use store_object::{
    InsertBuilder, QueryBuilder, QueryFilter, SelectField, StoreError, TableSpec, UpdateSet,
    ValidationError,
};

use super::SubscriptionRepository;
use super::query_criteria::{apply_pagination, apply_sort, cost_filters, list_filters, total_pages};
use crate::domain::{
    FilterParams, NewSubscription, PaginationInfo, QueryCriteria, Subscription, SubscriptionList,
    UpdateSubscription,
};

pub const SUBSCRIPTION_TABLE: &str = "subscription";

const SUBSCRIPTION_COLUMNS: &[&str] = &[
    "id",
    "service_name",
    "user_id",
    "price",
    "start_date",
    "end_date",
    "created_at",
    "updated_at",
];

/// Table spec for the `subscription` table with every entity column selected
pub fn subscription_table() -> Result<TableSpec, ValidationError> {
    TableSpec::new(SUBSCRIPTION_TABLE, SUBSCRIPTION_COLUMNS)
}

#[derive(Clone)]
pub struct PgSubscriptionRepository {
    pool: PgPool,
    table: TableSpec,
}

impl PgSubscriptionRepository {
    pub fn new(pool: PgPool, table: TableSpec) -> Self {
        Self { pool, table }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn db_error(&self, operation: &str, source: sqlx::Error) -> StoreError {
        StoreError::database_operation(self.table.name(), operation, source)
    }

    fn by_id(id: i64) -> QueryBuilder {
        QueryBuilder::new().filter(QueryFilter::eq("id", id))
    }
}

#[async_trait]
impl SubscriptionRepository for PgSubscriptionRepository {
    async fn create(&self, subscription: NewSubscription) -> Result<Subscription, StoreError> {
        let statement = InsertBuilder::new()
            .value("service_name", subscription.service_name)
            .value("user_id", subscription.user_id)
            .value("price", subscription.price)
            .value("start_date", subscription.start_date)
            .value("end_date", subscription.end_date)
            .build(&self.table)?;

        crate::debug_log!(sql = %statement.sql, "subscription.create");

        statement
            .query_as::<Subscription>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| self.db_error("create: insert", e))
    }

    async fn get_by_id(&self, id: i64) -> Result<Subscription, StoreError> {
        let statement = Self::by_id(id).select(&self.table)?;

        statement
            .query_as::<Subscription>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| self.db_error("get_by_id: select", e))?
            .ok_or_else(|| StoreError::not_found(self.table.name(), id))
    }

    async fn list(&self, criteria: &QueryCriteria) -> Result<SubscriptionList, StoreError> {
        let filters = list_filters(&criteria.filter);

        let count_statement = QueryBuilder::new()
            .filters(filters.clone())
            .count(&self.table)?;
        crate::debug_log!(sql = %count_statement.sql, "subscription.list: count");

        let total: i64 = count_statement
            .query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| self.db_error("list: count", e))?;
        // COUNT(*) is never negative
        let total_count = u64::try_from(total).unwrap_or_default();

        let (builder, window) = apply_pagination(
            QueryBuilder::new().filters(filters),
            total_count,
            &criteria.pagination,
        );
        let statement = apply_sort(builder, &criteria.sort).select(&self.table)?;
        crate::debug_log!(
            sql = %statement.sql,
            page = window.page,
            limit = window.limit,
            offset = window.offset,
            "subscription.list: select"
        );
        crate::trace_log!(values = ?statement.values, "subscription.list: bind values");

        let data = statement
            .query_as::<Subscription>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| self.db_error("list: select", e))?;

        Ok(SubscriptionList {
            data,
            info: PaginationInfo {
                page: window.page,
                page_size: window.limit,
                total_count,
                total_pages: total_pages(total_count, criteria.pagination.limit()),
            },
        })
    }

    async fn update(
        &self,
        id: i64,
        changes: UpdateSubscription,
    ) -> Result<Subscription, StoreError> {
        let set = UpdateSet::new()
            .set_some("service_name", changes.service_name)
            .set_some("user_id", changes.user_id)
            .set_some("price", changes.price)
            .set_some("start_date", changes.start_date)
            .set_some("end_date", changes.end_date)
            .touch("updated_at");

        let statement = Self::by_id(id).update(&self.table, &set)?;
        crate::debug_log!(sql = %statement.sql, "subscription.update");

        statement
            .query_as::<Subscription>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| self.db_error("update: exec", e))?
            .ok_or_else(|| StoreError::not_found(self.table.name(), id))
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let statement = Self::by_id(id).delete(&self.table)?;

        let result = statement
            .query()
            .execute(&self.pool)
            .await
            .map_err(|e| self.db_error("delete: exec", e))?;

        match result.rows_affected() {
            0 => Err(StoreError::not_found(self.table.name(), id)),
            1 => Ok(()),
            actual => Err(StoreError::UnexpectedRows {
                operation: "subscription.delete".to_string(),
                expected: 1,
                actual,
            }),
        }
    }

    async fn get_cost(&self, filter: &FilterParams) -> Result<i64, StoreError> {
        let statement = QueryBuilder::new()
            .filters(cost_filters(filter))
            .select_fields(
                &self.table,
                &[SelectField::sum("price").or_zero().with_alias("total")],
            )?;
        crate::debug_log!(sql = %statement.sql, "subscription.get_cost");

        statement
            .query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| self.db_error("get_cost: select", e))
    }
}
