//! Application wiring
//!
//! Owns the connection pool and hands out the subscription service built
//! on top of it.

use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;

use crate::errors::AppError;
use crate::repository::{PgSubscriptionRepository, subscription_table};
use crate::service::SubscriptionService;
use config::DatabaseConfig;

pub struct App {
    pool: PgPool,
}

impl App {
    /// Connect to PostgreSQL using the pool settings from `config`
    pub async fn new(config: &DatabaseConfig) -> Result<Self, AppError> {
        let connection_string = config.connection_string();

        let mut pool_options = sqlx::postgres::PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds));

        if config.max_lifetime_seconds > 0 {
            pool_options =
                pool_options.max_lifetime(Duration::from_secs(config.max_lifetime_seconds));
        }

        let pool = pool_options.connect(&connection_string).await?;
        tracing::info!(
            host = %config.host,
            port = config.port,
            database = %config.database,
            "connected to database"
        );

        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Check database connection health
    pub async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }

    pub fn subscription_service(&self) -> Result<SubscriptionService, AppError> {
        let repository = PgSubscriptionRepository::new(self.pool.clone(), subscription_table()?);
        Ok(SubscriptionService::new(Arc::new(repository)))
    }
}
