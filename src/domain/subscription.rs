//! Subscription entity and its write models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use uuid::Uuid;

/// A stored subscription row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Subscription {
    pub id: i64,
    pub service_name: String,
    pub user_id: Uuid,
    pub price: i64,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a subscription
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubscription {
    pub service_name: String,
    pub user_id: Uuid,
    pub price: i64,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

/// Partial update; `None` leaves the column untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateSubscription {
    pub service_name: Option<String>,
    pub user_id: Option<Uuid>,
    pub price: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl UpdateSubscription {
    pub fn is_empty(&self) -> bool {
        self.service_name.is_none()
            && self.user_id.is_none()
            && self.price.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
    }
}

/// Pagination metadata returned with a list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationInfo {
    pub page: u64,
    pub page_size: u64,
    pub total_count: u64,
    pub total_pages: u64,
}

impl PaginationInfo {
    pub fn has_next_page(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_prev_page(&self) -> bool {
        self.page > 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionList {
    pub data: Vec<Subscription>,
    pub info: PaginationInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid month '{0}', expected MM-YYYY")]
pub struct MonthParseError(pub String);

/// Parse `MM-YYYY` into the first day of that month
pub fn parse_month(value: &str) -> Result<NaiveDate, MonthParseError> {
    let invalid = || MonthParseError(value.to_string());

    let (month, year) = value.split_once('-').ok_or_else(invalid)?;
    if month.len() != 2 || year.len() != 4 {
        return Err(invalid());
    }
    if !month.bytes().chain(year.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let month: u32 = month.parse().map_err(|_| invalid())?;
    let year: i32 = year.parse().map_err(|_| invalid())?;

    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)
}

/// Render a date as `MM-YYYY`
pub fn format_month(date: NaiveDate) -> String {
    date.format("%m-%Y").to_string()
}
