//! Query criteria → statement clauses
//!
//! Filters become bound `$N` predicates in a fixed order (service name,
//! owner, start date from, start date to), the sort becomes an ORDER BY
//! rendered from enums only, and the requested page is clamped against the
//! row count before it becomes LIMIT/OFFSET.

use store_object::{Pagination, QueryBuilder, QueryFilter};

use crate::domain::{FilterParams, PaginationParams, SortParams};

pub const SERVICE_NAME: &str = "service_name";
pub const USER_ID: &str = "user_id";
pub const START_DATE: &str = "start_date";

/// Predicates for the list query; the service name is a LIKE pattern
pub fn list_filters(filter: &FilterParams) -> Vec<QueryFilter> {
    build_filters(filter, QueryFilter::like)
}

/// Predicates for the cost query; the service name must match exactly
pub fn cost_filters(filter: &FilterParams) -> Vec<QueryFilter> {
    build_filters(filter, |field, name| QueryFilter::eq(field, name))
}

fn build_filters(
    filter: &FilterParams,
    service_name_match: impl Fn(&str, &str) -> QueryFilter,
) -> Vec<QueryFilter> {
    let mut filters = Vec::with_capacity(4);

    if let Some(name) = filter.service_name() {
        filters.push(service_name_match(SERVICE_NAME, name));
    }

    if let Some(owner) = filter.owner() {
        filters.push(QueryFilter::eq(USER_ID, owner));
    }

    if let Some(from) = filter.start_date.from {
        filters.push(QueryFilter::gte(START_DATE, from));
    }

    if let Some(to) = filter.start_date.to {
        filters.push(QueryFilter::lte(START_DATE, to));
    }

    filters
}

/// Add the ORDER BY, if a sort column was requested
pub fn apply_sort(builder: QueryBuilder, sort: &SortParams) -> QueryBuilder {
    match sort.sort_by {
        Some(sort_by) => builder.order_by(sort_by.as_column(), sort.sort_order),
        None => builder,
    }
}

/// The page actually served after clamping against the row count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: u64,
    pub limit: u64,
    pub offset: u64,
}

impl PageWindow {
    pub fn to_pagination(&self) -> Pagination {
        Pagination::new()
            .with_limit(self.limit)
            .with_offset(self.offset)
    }
}

/// Clamp a requested page to the rows that exist
///
/// When the request reaches past `total_count`, the window becomes the
/// trailing `total_count % limit` rows and the page number is recomputed
/// from the new offset using the requested limit. When `total_count` is an
/// exact multiple of the limit this yields an empty window at the end.
pub fn correct_pagination(total_count: u64, params: &PaginationParams) -> PageWindow {
    let page = params.page();
    let limit = params.limit();

    if total_count < page.saturating_mul(limit) {
        let clamped_limit = total_count % limit;
        let offset = total_count - clamped_limit;

        return PageWindow {
            page: offset / limit + 1,
            limit: clamped_limit,
            offset,
        };
    }

    PageWindow {
        page,
        limit,
        offset: (page - 1) * limit,
    }
}

/// Clamp the request and apply the resulting LIMIT/OFFSET
pub fn apply_pagination(
    builder: QueryBuilder,
    total_count: u64,
    params: &PaginationParams,
) -> (QueryBuilder, PageWindow) {
    let window = correct_pagination(total_count, params);
    (builder.pagination(window.to_pagination()), window)
}

/// `ceil(total_count / limit)`
pub fn total_pages(total_count: u64, limit: u64) -> u64 {
    if limit == 0 {
        return 0;
    }
    total_count.div_ceil(limit)
}
