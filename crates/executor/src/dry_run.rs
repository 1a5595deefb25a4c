use crate::error::ExecutorError;
use crate::ledger;
use crate::runner::{pending_scripts, RunObserver, RunReport};
use soundcheck_migration::Script;

/// Executes every pending script inside one transaction that is rolled back
/// unconditionally. Nothing durable is written, including ledger rows. All
/// pending work shares the transaction because later scripts may depend on
/// schema changes made by earlier ones.
pub async fn run(
    pool: &sqlx::PgPool,
    scripts: &[Script],
    observer: &dyn RunObserver,
) -> Result<RunReport, ExecutorError> {
    ledger::ensure_ledger(pool).await?;
    let applied_names = ledger::applied_names(pool).await?;

    let pending = pending_scripts(scripts, &applied_names);
    let skipped = scripts.len() - pending.len();

    let mut tx = pool
        .begin()
        .await
        .map_err(|e| ExecutorError::DryRunTransactionError {
            operation: "begin".to_string(),
            message: e.to_string(),
            original_error: None,
        })?;

    for script in &pending {
        observer.script_started(script);

        if let Err(err) = validate_one(&mut tx, script).await {
            if let Err(rollback_err) = tx.rollback().await {
                return Err(ExecutorError::DryRunTransactionError {
                    operation: "rollback_after_failure".to_string(),
                    message: rollback_err.to_string(),
                    original_error: Some(err.to_string()),
                });
            }
            return Err(err);
        }

        observer.script_applied(script);
    }

    tx.rollback()
        .await
        .map_err(|e| ExecutorError::DryRunTransactionError {
            operation: "rollback".to_string(),
            message: e.to_string(),
            original_error: None,
        })?;

    Ok(RunReport {
        applied: pending.len(),
        skipped,
    })
}

async fn validate_one(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    script: &Script,
) -> Result<(), ExecutorError> {
    let sql = script
        .read_sql()
        .map_err(|e| ExecutorError::ScriptReadFailed {
            script: script.name.clone(),
            message: e.to_string(),
        })?;

    sqlx::raw_sql(&sql)
        .execute(&mut **tx)
        .await
        .map_err(|e| ExecutorError::ScriptExecutionFailed {
            script: script.name.clone(),
            message: e.to_string(),
        })?;

    Ok(())
}
