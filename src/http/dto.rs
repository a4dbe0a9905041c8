//! Request and response bodies for the subscription API

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, de};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::domain::criteria::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
use crate::domain::subscription::{format_month, parse_month};
use crate::domain::{
    DateRange, FilterParams, NewSubscription, PaginationParams, QueryCriteria, SortBy,
    SortParams, Subscription, UpdateSubscription,
};
use crate::http::error::ApiError;
use store_object::SortOrder;

fn validate_sort_by(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<SortBy>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("sort_by").with_message("must be id or service_name".into()))
}

fn validate_sort_order(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<SortOrder>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("sort_order").with_message("must be asc or desc".into()))
}

fn validate_uuid(value: &str) -> Result<(), ValidationError> {
    Uuid::parse_str(value)
        .map(|_| ())
        .map_err(|_| ValidationError::new("uuid").with_message("must be a UUID".into()))
}

fn validate_month(value: &str) -> Result<(), ValidationError> {
    parse_month(value)
        .map(|_| ())
        .map_err(|_| ValidationError::new("month").with_message("must be MM-YYYY".into()))
}

fn month_or_422(value: &str) -> Result<chrono::NaiveDate, ApiError> {
    parse_month(value).map_err(|e| ApiError::Validation(e.to_string()))
}

fn uuid_or_422(value: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(value).map_err(|e| ApiError::Validation(e.to_string()))
}

/// Query string value where `key=` counts as not given
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match Option::<String>::deserialize(deserializer)?.as_deref() {
        None | Some("") => Ok(None),
        Some(raw) => raw.parse().map(Some).map_err(de::Error::custom),
    }
}

/// `GET /list` query string
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ListQuery {
    #[validate(custom(function = "validate_sort_by"))]
    #[serde(default, deserialize_with = "empty_as_none")]
    pub sort: Option<String>,
    #[validate(custom(function = "validate_sort_order"))]
    #[serde(default, deserialize_with = "empty_as_none")]
    pub order: Option<String>,
    #[validate(length(min = 1, max = 255))]
    #[serde(default, deserialize_with = "empty_as_none")]
    pub service_name: Option<String>,
    #[validate(custom(function = "validate_uuid"))]
    #[serde(default, deserialize_with = "empty_as_none")]
    pub user_id: Option<String>,
    #[validate(custom(function = "validate_month"))]
    #[serde(default, deserialize_with = "empty_as_none")]
    pub start_date: Option<String>,
    #[validate(custom(function = "validate_month"))]
    #[serde(default, deserialize_with = "empty_as_none")]
    pub end_date: Option<String>,
    #[validate(range(min = 1))]
    #[serde(default, deserialize_with = "empty_as_none")]
    pub page: Option<i64>,
    #[validate(range(min = 1, max = 100))]
    #[serde(default, deserialize_with = "empty_as_none")]
    pub page_size: Option<i64>,
}

/// `GET /cost` query string
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CostQuery {
    #[validate(length(min = 1, max = 255))]
    #[serde(default, deserialize_with = "empty_as_none")]
    pub service_name: Option<String>,
    #[validate(custom(function = "validate_uuid"))]
    #[serde(default, deserialize_with = "empty_as_none")]
    pub user_id: Option<String>,
    #[validate(custom(function = "validate_month"))]
    #[serde(default, deserialize_with = "empty_as_none")]
    pub start_date: Option<String>,
    #[validate(custom(function = "validate_month"))]
    #[serde(default, deserialize_with = "empty_as_none")]
    pub end_date: Option<String>,
}

fn filter_params(
    service_name: Option<String>,
    user_id: Option<&str>,
    start_date: Option<&str>,
    end_date: Option<&str>,
) -> Result<FilterParams, ApiError> {
    Ok(FilterParams {
        service_name,
        user_id: user_id.map(uuid_or_422).transpose()?.unwrap_or_default(),
        start_date: DateRange {
            from: start_date.map(month_or_422).transpose()?,
            to: end_date.map(month_or_422).transpose()?,
        },
    })
}

impl ListQuery {
    /// Validate and apply defaults: sort `id ASC`, page 1, 20 per page
    pub fn into_criteria(self) -> Result<QueryCriteria, ApiError> {
        self.validate()?;

        let sort_by = match self.sort.as_deref() {
            Some(sort) => sort.parse::<SortBy>(),
            None => Ok(SortBy::Id),
        }
        .map_err(|e| ApiError::Validation(e.to_string()))?;

        let sort_order = match self.order.as_deref() {
            Some(order) => order.parse::<SortOrder>(),
            None => Ok(SortOrder::Asc),
        }
        .map_err(|e| ApiError::Validation(e.to_string()))?;

        let page = self.page.map_or(Ok(DEFAULT_PAGE), u64::try_from);
        let page_size = self.page_size.map_or(Ok(DEFAULT_PAGE_SIZE), u64::try_from);
        let pagination = match (page, page_size) {
            (Ok(page), Ok(page_size)) => PaginationParams::new(page, page_size)
                .map_err(|e| ApiError::Validation(e.to_string()))?,
            _ => {
                return Err(ApiError::Validation(
                    "page and page_size must be positive".to_string(),
                ));
            }
        };

        let filter = filter_params(
            self.service_name,
            self.user_id.as_deref(),
            self.start_date.as_deref(),
            self.end_date.as_deref(),
        )?;

        Ok(QueryCriteria {
            filter,
            pagination,
            sort: SortParams {
                sort_by: Some(sort_by),
                sort_order,
            },
        })
    }
}

impl CostQuery {
    pub fn into_filter(self) -> Result<FilterParams, ApiError> {
        self.validate()?;

        filter_params(
            self.service_name,
            self.user_id.as_deref(),
            self.start_date.as_deref(),
            self.end_date.as_deref(),
        )
    }
}

/// `POST /create` body
#[derive(Debug, Deserialize, Validate)]
pub struct SubscriptionRequest {
    #[validate(length(min = 1, max = 255))]
    pub service_name: String,
    pub user_id: Uuid,
    #[validate(range(min = 1, max = 4_294_967_295_i64))]
    pub price: i64,
    #[validate(custom(function = "validate_month"))]
    pub start_date: String,
    #[validate(custom(function = "validate_month"))]
    pub end_date: Option<String>,
}

impl SubscriptionRequest {
    pub fn into_new_subscription(self) -> Result<NewSubscription, ApiError> {
        self.validate()?;

        Ok(NewSubscription {
            start_date: month_or_422(&self.start_date)?,
            end_date: self.end_date.as_deref().map(month_or_422).transpose()?,
            service_name: self.service_name,
            user_id: self.user_id,
            price: self.price,
        })
    }
}

/// `PATCH /{id}` body; absent fields are left unchanged
#[derive(Debug, Default, Deserialize, Validate)]
pub struct SubscriptionUpdateRequest {
    #[validate(length(min = 1, max = 255))]
    pub service_name: Option<String>,
    pub user_id: Option<Uuid>,
    #[validate(range(min = 1, max = 4_294_967_295_i64))]
    pub price: Option<i64>,
    #[validate(custom(function = "validate_month"))]
    pub start_date: Option<String>,
    #[validate(custom(function = "validate_month"))]
    pub end_date: Option<String>,
}

impl SubscriptionUpdateRequest {
    pub fn into_update(self) -> Result<UpdateSubscription, ApiError> {
        self.validate()?;

        Ok(UpdateSubscription {
            start_date: self.start_date.as_deref().map(month_or_422).transpose()?,
            end_date: self.end_date.as_deref().map(month_or_422).transpose()?,
            service_name: self.service_name,
            user_id: self.user_id,
            price: self.price,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubscriptionResponse {
    pub id: i64,
    pub service_name: String,
    pub user_id: Uuid,
    pub price: i64,
    pub start_date: String,
    pub end_date: Option<String>,
}

impl From<Subscription> for SubscriptionResponse {
    fn from(subscription: Subscription) -> Self {
        Self {
            id: subscription.id,
            service_name: subscription.service_name,
            user_id: subscription.user_id,
            price: subscription.price,
            start_date: format_month(subscription.start_date),
            end_date: subscription.end_date.map(format_month),
        }
    }
}
