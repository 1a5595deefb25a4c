use crate::dry_run;
use crate::error::ExecutorError;
use crate::ledger;
use crate::mode::ExecutionMode;
use crate::transaction;
use soundcheck_migration::Script;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    pub applied: usize,
    pub skipped: usize,
}

/// Per-script progress seam between the executor and whatever front end is
/// driving it.
pub trait RunObserver {
    fn script_started(&self, _script: &Script) {}
    fn script_applied(&self, _script: &Script) {}
    fn script_skipped(&self, _script: &Script) {}
}

/// Scripts present on disk but absent from the ledger, in application order.
/// Membership is decided by name alone; applied scripts are never read.
pub fn pending_scripts<'a>(scripts: &'a [Script], applied: &HashSet<String>) -> Vec<&'a Script> {
    scripts
        .iter()
        .filter(|s| !applied.contains(&s.name))
        .collect()
}

#[derive(Clone)]
pub struct Runner {
    pool: sqlx::PgPool,
}

impl Runner {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }

    pub async fn run_with_mode(
        &self,
        mode: ExecutionMode,
        scripts: &[Script],
        observer: &dyn RunObserver,
    ) -> Result<RunReport, ExecutorError> {
        match mode {
            ExecutionMode::Apply => self.run(scripts, observer).await,
            ExecutionMode::DryRun => dry_run::run(&self.pool, scripts, observer).await,
        }
    }

    /// Applies every script not yet recorded in the ledger, in order, one
    /// transaction per script. Aborts on the first failure; scripts already
    /// committed stay applied.
    pub async fn run(
        &self,
        scripts: &[Script],
        observer: &dyn RunObserver,
    ) -> Result<RunReport, ExecutorError> {
        ledger::ensure_ledger(&self.pool).await?;
        let applied_names = ledger::applied_names(&self.pool).await?;

        let mut applied = 0usize;
        let mut skipped = 0usize;

        for script in scripts {
            if applied_names.contains(&script.name) {
                observer.script_skipped(script);
                skipped += 1;
                continue;
            }

            observer.script_started(script);
            execute_one(&self.pool, script).await?;
            observer.script_applied(script);
            applied += 1;
        }

        Ok(RunReport { applied, skipped })
    }
}

async fn execute_one(pool: &sqlx::PgPool, script: &Script) -> Result<(), ExecutorError> {
    let sql = script
        .read_sql()
        .map_err(|e| ExecutorError::ScriptReadFailed {
            script: script.name.clone(),
            message: e.to_string(),
        })?;

    let mut conn = pool
        .acquire()
        .await
        .map_err(|e| ExecutorError::ConnectionAcquireFailed {
            script: script.name.clone(),
            message: e.to_string(),
        })?;

    let mut tx = transaction::begin(&mut conn, &script.name).await?;

    if let Err(err) = apply_in_tx(&mut tx, script, &sql).await {
        return match transaction::rollback(tx, &script.name, &err).await {
            Ok(()) => Err(err),
            Err(rollback_err) => Err(rollback_err),
        };
    }

    transaction::commit(tx, &script.name).await
}

async fn apply_in_tx(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    script: &Script,
    sql: &str,
) -> Result<(), ExecutorError> {
    sqlx::raw_sql(sql)
        .execute(&mut **tx)
        .await
        .map_err(|e| ExecutorError::ScriptExecutionFailed {
            script: script.name.clone(),
            message: e.to_string(),
        })?;

    ledger::record_applied(tx, &script.name).await
}

#[cfg(test)]
mod tests {
    use super::pending_scripts;
    use soundcheck_migration::Script;
    use std::collections::HashSet;
    use std::path::PathBuf;

    fn script(name: &str) -> Script {
        Script::new(name.to_string(), PathBuf::from(format!("/nonexistent/{name}")))
    }

    #[test]
    fn pending_preserves_order_and_filters_applied() {
        let scripts = vec![script("001_a.sql"), script("002_b.sql"), script("010_c.sql")];
        let mut applied = HashSet::new();
        applied.insert("002_b.sql".to_string());

        let pending = pending_scripts(&scripts, &applied);
        let names: Vec<&str> = pending.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["001_a.sql", "010_c.sql"]);
    }

    #[test]
    fn fully_covered_ledger_yields_empty_pending() {
        let scripts = vec![script("001_a.sql"), script("002_b.sql")];
        let mut applied = HashSet::new();
        applied.insert("001_a.sql".to_string());
        applied.insert("002_b.sql".to_string());

        assert!(pending_scripts(&scripts, &applied).is_empty());
    }

    #[test]
    fn recorded_scripts_are_filtered_without_touching_disk() {
        // The descriptor paths do not exist; membership alone must decide.
        let scripts = vec![script("001_a.sql")];
        let mut applied = HashSet::new();
        applied.insert("001_a.sql".to_string());

        let pending = pending_scripts(&scripts, &applied);
        assert!(pending.is_empty());
    }
}
