//! In-memory repository for service and HTTP tests

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use store_object::{SortOrder, StoreError};
use uuid::Uuid;

use crate::domain::{
    FilterParams, NewSubscription, PaginationInfo, QueryCriteria, SortBy, Subscription,
    SubscriptionList, UpdateSubscription,
};
use crate::repository::SubscriptionRepository;
use crate::repository::query_criteria::{correct_pagination, total_pages};

const TABLE: &str = "subscription";

pub fn new_subscription(service_name: &str, price: i64) -> NewSubscription {
    NewSubscription {
        service_name: service_name.to_string(),
        user_id: Uuid::new_v4(),
        price,
        start_date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
        end_date: None,
    }
}

#[derive(Default)]
struct State {
    rows: Vec<Subscription>,
    next_id: i64,
    update_calls: usize,
}

#[derive(Clone, Default)]
pub struct InMemoryRepository {
    state: Arc<Mutex<State>>,
}

impl InMemoryRepository {
    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    pub fn update_calls(&self) -> usize {
        self.state().update_calls
    }
}

/// SQL LIKE with `%` and `_` wildcards, no escape character
fn like_matches(pattern: &str, value: &str) -> bool {
    fn matches(pattern: &[char], value: &[char]) -> bool {
        match pattern.split_first() {
            None => value.is_empty(),
            Some(('%', rest)) => (0..=value.len()).any(|skip| matches(rest, &value[skip..])),
            Some(('_', rest)) => !value.is_empty() && matches(rest, &value[1..]),
            Some((c, rest)) => value.first() == Some(c) && matches(rest, &value[1..]),
        }
    }

    let pattern: Vec<char> = pattern.chars().collect();
    let value: Vec<char> = value.chars().collect();
    matches(&pattern, &value)
}

fn matches_filter(row: &Subscription, filter: &FilterParams, exact_name: bool) -> bool {
    let name_ok = match filter.service_name() {
        Some(name) if exact_name => row.service_name == name,
        Some(pattern) => like_matches(pattern, &row.service_name),
        None => true,
    };
    let owner_ok = filter.owner().is_none_or(|owner| row.user_id == owner);
    let from_ok = filter.start_date.from.is_none_or(|from| row.start_date >= from);
    let to_ok = filter.start_date.to.is_none_or(|to| row.start_date <= to);

    name_ok && owner_ok && from_ok && to_ok
}

#[async_trait]
impl SubscriptionRepository for InMemoryRepository {
    async fn create(&self, subscription: NewSubscription) -> Result<Subscription, StoreError> {
        let mut state = self.state();
        state.next_id += 1;
        let now = Utc::now();

        let row = Subscription {
            id: state.next_id,
            service_name: subscription.service_name,
            user_id: subscription.user_id,
            price: subscription.price,
            start_date: subscription.start_date,
            end_date: subscription.end_date,
            created_at: now,
            updated_at: now,
        };
        state.rows.push(row.clone());
        Ok(row)
    }

    async fn get_by_id(&self, id: i64) -> Result<Subscription, StoreError> {
        self.state()
            .rows
            .iter()
            .find(|row| row.id == id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(TABLE, id))
    }

    async fn list(&self, criteria: &QueryCriteria) -> Result<SubscriptionList, StoreError> {
        let mut rows: Vec<Subscription> = self
            .state()
            .rows
            .iter()
            .filter(|row| matches_filter(row, &criteria.filter, false))
            .cloned()
            .collect();

        if let Some(sort_by) = criteria.sort.sort_by {
            rows.sort_by(|a, b| {
                let ordering = match sort_by {
                    SortBy::Id => a.id.cmp(&b.id),
                    SortBy::ServiceName => a.service_name.cmp(&b.service_name),
                };
                match criteria.sort.sort_order {
                    SortOrder::Asc => ordering,
                    SortOrder::Desc => ordering.reverse(),
                }
            });
        }

        let total_count = rows.len() as u64;
        let window = correct_pagination(total_count, &criteria.pagination);
        let data = rows
            .into_iter()
            .skip(window.offset as usize)
            .take(window.limit as usize)
            .collect();

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
        let mut state = self.state();
        state.update_calls += 1;

        let row = state
            .rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or_else(|| StoreError::not_found(TABLE, id))?;

        if let Some(service_name) = changes.service_name {
            row.service_name = service_name;
        }
        if let Some(user_id) = changes.user_id {
            row.user_id = user_id;
        }
        if let Some(price) = changes.price {
            row.price = price;
        }
        if let Some(start_date) = changes.start_date {
            row.start_date = start_date;
        }
        if let Some(end_date) = changes.end_date {
            row.end_date = Some(end_date);
        }
        row.updated_at = Utc::now();

        Ok(row.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let mut state = self.state();
        let before = state.rows.len();
        state.rows.retain(|row| row.id != id);

        if state.rows.len() == before {
            return Err(StoreError::not_found(TABLE, id));
        }
        Ok(())
    }

    async fn get_cost(&self, filter: &FilterParams) -> Result<i64, StoreError> {
        Ok(self
            .state()
            .rows
            .iter()
            .filter(|row| matches_filter(row, filter, true))
            .map(|row| row.price)
            .sum())
    }
}

#[cfg(test)]
mod tests {
    use super::like_matches;

    #[test]
    fn test_like_matches() {
        assert!(like_matches("Netflix", "Netflix"));
        assert!(like_matches("Net%", "Netflix"));
        assert!(like_matches("%flix", "Netflix"));
        assert!(like_matches("N_tflix", "Netflix"));
        assert!(like_matches("%", ""));
        assert!(!like_matches("Net", "Netflix"));
        assert!(!like_matches("_", ""));
    }
}
