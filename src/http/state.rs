use std::sync::Arc;

use crate::service::SubscriptionService;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub subscriptions: Arc<SubscriptionService>,
}

impl AppState {
    pub fn new(subscriptions: SubscriptionService) -> Self {
        Self {
            subscriptions: Arc::new(subscriptions),
        }
    }
}
