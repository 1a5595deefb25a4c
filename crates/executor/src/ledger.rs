use crate::error::ExecutorError;
use std::collections::HashSet;

const SQL_CREATE_LEDGER: &str = "
CREATE TABLE IF NOT EXISTS migrations (
    id SERIAL PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    executed_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
)
";

const SQL_SELECT_APPLIED: &str = "SELECT name FROM migrations";

const SQL_INSERT_APPLIED: &str = "INSERT INTO migrations (name) VALUES ($1)";

/// Creates the ledger table if it is absent. Idempotent; runs outside any
/// script transaction.
pub async fn ensure_ledger(pool: &sqlx::PgPool) -> Result<(), ExecutorError> {
    sqlx::query(SQL_CREATE_LEDGER)
        .execute(pool)
        .await
        .map_err(|e| ExecutorError::LedgerInitFailed {
            message: e.to_string(),
        })?;

    Ok(())
}

pub async fn applied_names(pool: &sqlx::PgPool) -> Result<HashSet<String>, ExecutorError> {
    let rows: Vec<(String,)> = sqlx::query_as(SQL_SELECT_APPLIED)
        .fetch_all(pool)
        .await
        .map_err(|e| ExecutorError::LedgerQueryFailed {
            operation: "select_applied".to_string(),
            message: e.to_string(),
        })?;

    let mut out = HashSet::with_capacity(rows.len());
    for (name,) in rows {
        out.insert(name);
    }

    Ok(out)
}

/// Records a script as applied, inside the same transaction that ran it, so
/// the ledger row and the script's schema changes commit or roll back
/// together.
pub async fn record_applied(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    script: &str,
) -> Result<(), ExecutorError> {
    sqlx::query(SQL_INSERT_APPLIED)
        .bind(script)
        .execute(&mut **tx)
        .await
        .map_err(|e| ExecutorError::LedgerInsertFailed {
            script: script.to_string(),
            message: e.to_string(),
        })?;

    Ok(())
}
