//! Idempotent schema bootstrap for the `subscription` table

use crate::core::App;
use crate::errors::AppError;
use crate::repository::postgres::SUBSCRIPTION_TABLE;

const CREATE_TABLE_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS subscription (
    id BIGSERIAL PRIMARY KEY,
    service_name VARCHAR(255) NOT NULL,
    user_id UUID NOT NULL,
    price BIGINT NOT NULL CHECK (price > 0),
    start_date DATE NOT NULL,
    end_date DATE NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

const CREATE_INDEXES_SQL: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_subscription_user_id ON subscription (user_id)",
    "CREATE INDEX IF NOT EXISTS idx_subscription_service_name ON subscription (service_name)",
    "CREATE INDEX IF NOT EXISTS idx_subscription_start_date ON subscription (start_date)",
];

const TRIGGER_FUNCTION_SQL: &str = r#"
CREATE OR REPLACE FUNCTION update_updated_at_column()
RETURNS TRIGGER AS $$
BEGIN
    NEW.updated_at = NOW();
    RETURN NEW;
END;
$$ language 'plpgsql';
"#;

impl App {
    /// Create the table, its indexes and the `updated_at` trigger if missing
    pub async fn bootstrap_schema(&self) -> Result<(), AppError> {
        tracing::info!(table = SUBSCRIPTION_TABLE, "bootstrapping schema");

        crate::debug_log!(sql = CREATE_TABLE_SQL, "creating table");
        sqlx::query(CREATE_TABLE_SQL).execute(self.pool()).await?;

        for index_sql in CREATE_INDEXES_SQL {
            crate::debug_log!(sql = *index_sql, "creating index");
            sqlx::query(index_sql).execute(self.pool()).await?;
        }

        sqlx::query(TRIGGER_FUNCTION_SQL)
            .execute(self.pool())
            .await?;

        // CREATE TRIGGER has no IF NOT EXISTS before PostgreSQL 14
        let trigger_check_sql = format!(
            "DO $$
             BEGIN
                 IF NOT EXISTS (SELECT 1 FROM pg_trigger WHERE tgname = 'update_{table}_updated_at') THEN
                     CREATE TRIGGER update_{table}_updated_at
                     BEFORE UPDATE ON {table}
                     FOR EACH ROW
                     EXECUTE FUNCTION update_updated_at_column();
                 END IF;
             END $$",
            table = SUBSCRIPTION_TABLE
        );
        sqlx::query(&trigger_check_sql).execute(self.pool()).await?;

        tracing::info!(table = SUBSCRIPTION_TABLE, "schema ready");
        Ok(())
    }
}
