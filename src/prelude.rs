//! Convenience re-exports for common subscription-service usage
//!
//! ```rust
//! use subscription_service::prelude::*;
//! ```

pub use crate::core::App;
pub use crate::domain::{
    DateRange, FilterParams, NewSubscription, PaginationInfo, PaginationParams, QueryCriteria,
    SortBy, SortParams, Subscription, SubscriptionList, UpdateSubscription,
};
pub use crate::errors::AppError;
pub use crate::http::{AppState, build_router};
pub use crate::repository::query_criteria::{PageWindow, correct_pagination};
pub use crate::repository::{PgSubscriptionRepository, SubscriptionRepository};
pub use crate::service::{ServiceError, SubscriptionService};

pub use config::{AppConfig, DatabaseConfig, LoggingConfig, ServerConfig};
pub use store_object::prelude::*;
