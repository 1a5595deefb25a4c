use crate::error::ExecutorError;
use sqlx::Connection;

pub async fn begin<'c>(
    conn: &'c mut sqlx::PgConnection,
    script: &str,
) -> Result<sqlx::Transaction<'c, sqlx::Postgres>, ExecutorError> {
    conn.begin()
        .await
        .map_err(|e| ExecutorError::TransactionBeginFailed {
            script: script.to_string(),
            message: e.to_string(),
        })
}

pub async fn commit(
    tx: sqlx::Transaction<'_, sqlx::Postgres>,
    script: &str,
) -> Result<(), ExecutorError> {
    tx.commit()
        .await
        .map_err(|e| ExecutorError::TransactionCommitFailed {
            script: script.to_string(),
            message: e.to_string(),
        })
}

pub async fn rollback(
    tx: sqlx::Transaction<'_, sqlx::Postgres>,
    script: &str,
    original_error: &ExecutorError,
) -> Result<(), ExecutorError> {
    tx.rollback()
        .await
        .map_err(|e| ExecutorError::TransactionRollbackFailed {
            script: script.to_string(),
            message: e.to_string(),
            original_error: original_error.to_string(),
        })
}
