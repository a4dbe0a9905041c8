//! List and cost query criteria
//!
//! These types describe *what* the caller asked for. Turning them into SQL
//! happens in [`crate::repository::query_criteria`].

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use store_object::SortOrder;
use thiserror::Error;
use uuid::Uuid;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_PAGE_SIZE: u64 = 20;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CriteriaError {
    #[error("page must be at least 1")]
    ZeroPage,
    #[error("page size must be at least 1")]
    ZeroLimit,
}

/// Inclusive range over `start_date`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// Filters shared by the list and cost queries; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterParams {
    pub service_name: Option<String>,
    /// `Uuid::nil()` means "any owner"
    pub user_id: Uuid,
    pub start_date: DateRange,
}

impl FilterParams {
    /// Service name, ignoring an empty string
    pub fn service_name(&self) -> Option<&str> {
        self.service_name.as_deref().filter(|name| !name.is_empty())
    }

    pub fn owner(&self) -> Option<Uuid> {
        (!self.user_id.is_nil()).then_some(self.user_id)
    }
}

/// Requested page window, 1-based
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationParams {
    page: u64,
    limit: u64,
}

impl PaginationParams {
    pub fn new(page: u64, limit: u64) -> Result<Self, CriteriaError> {
        if page == 0 {
            return Err(CriteriaError::ZeroPage);
        }
        if limit == 0 {
            return Err(CriteriaError::ZeroLimit);
        }
        Ok(Self { page, limit })
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Columns a list may be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortBy {
    Id,
    ServiceName,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort field '{0}', expected id or service_name")]
pub struct ParseSortByError(pub String);

impl SortBy {
    pub fn as_column(&self) -> &'static str {
        match self {
            SortBy::Id => "id",
            SortBy::ServiceName => "service_name",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_column())
    }
}

impl FromStr for SortBy {
    type Err = ParseSortByError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(SortBy::Id),
            "service_name" => Ok(SortBy::ServiceName),
            _ => Err(ParseSortByError(s.to_string())),
        }
    }
}

/// `sort_by: None` leaves the row order to the database
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortParams {
    pub sort_by: Option<SortBy>,
    pub sort_order: SortOrder,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryCriteria {
    pub filter: FilterParams,
    pub pagination: PaginationParams,
    pub sort: SortParams,
}
