pub mod criteria;
pub mod subscription;

pub use criteria::{
    CriteriaError, DateRange, FilterParams, PaginationParams, QueryCriteria, SortBy, SortParams,
};
pub use subscription::{
    NewSubscription, PaginationInfo, Subscription, SubscriptionList, UpdateSubscription,
};
