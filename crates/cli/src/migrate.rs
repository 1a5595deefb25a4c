use crate::args::MigrateArgs;
use crate::error::CliError;
use crate::output;
use crate::style::Style;
use crate::ui::Ui;
use soundcheck_executor::{ExecutionMode, ExecutorError, RunObserver, Runner};
use soundcheck_migration::{discover_scripts, Script, ScriptDiscoveryError};

pub async fn run(args: &MigrateArgs, database_url: Option<&str>) -> Result<(), CliError> {
    let database_url = resolve_database_url(database_url)?;

    let scripts = discover_scripts(&args.dir).map_err(map_discovery_error)?;

    let pool = sqlx::PgPool::connect(&database_url).await.map_err(|e| {
        CliError::migration_failed("Database connection failed")
            .with_reason(e.to_string())
            .with_action("Check that the database is reachable and DATABASE_URL is correct")
    })?;

    let mode = if args.dry_run {
        ExecutionMode::DryRun
    } else {
        ExecutionMode::Apply
    };

    let runner = Runner::new(pool.clone());
    let observer = ConsoleObserver::new(mode);

    let result = runner.run_with_mode(mode, &scripts, &observer).await;

    // Close the pool on success and failure alike.
    pool.close().await;

    let report = result.map_err(map_executor_error)?;

    output::line(format!("mode: {}", mode.as_str()));
    output::line(format!("applied: {}", report.applied));
    output::line(format!("skipped: {}", report.skipped));

    Ok(())
}

struct ConsoleObserver {
    ui: Ui,
    mode: ExecutionMode,
}

impl ConsoleObserver {
    fn new(mode: ExecutionMode) -> Self {
        Self {
            ui: Ui::new(Style::detect()),
            mode,
        }
    }
}

impl RunObserver for ConsoleObserver {
    fn script_started(&self, script: &Script) {
        let verb = match self.mode {
            ExecutionMode::Apply => "applying",
            ExecutionMode::DryRun => "validating",
        };
        output::line(self.ui.info_line(&format!("{verb} {}", script.name)));
    }

    fn script_applied(&self, script: &Script) {
        let verb = match self.mode {
            ExecutionMode::Apply => "applied",
            ExecutionMode::DryRun => "validated",
        };
        output::line(self.ui.ok_line(&format!("{verb} {}", script.name)));
    }
}

fn resolve_database_url(flag: Option<&str>) -> Result<String, CliError> {
    if let Some(url) = flag {
        if !url.trim().is_empty() {
            return Ok(url.to_string());
        }
    }

    match std::env::var("DATABASE_URL") {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(CliError::user_error("DATABASE_URL is required")
            .with_meaning("No database connection target was provided")
            .with_action("Set DATABASE_URL in the environment (or .env) or pass --database-url")),
    }
}

fn map_discovery_error(err: ScriptDiscoveryError) -> CliError {
    let action = match &err {
        ScriptDiscoveryError::DuplicateName { .. } => {
            "Rename the conflicting scripts so every filename is unique"
        }
        ScriptDiscoveryError::Io { .. } => {
            "Check that the migrations directory exists and is readable"
        }
    };

    CliError::user_error("Script discovery failed")
        .with_reason(err.to_string())
        .with_action(action)
}

fn map_executor_error(err: ExecutorError) -> CliError {
    let title = match &err {
        ExecutorError::LedgerInitFailed { .. } => "Ledger initialization failed".to_string(),
        ExecutorError::LedgerQueryFailed { .. } => "Ledger query failed".to_string(),
        ExecutorError::DryRunTransactionError { operation, .. } => {
            format!("Dry-run failed ({operation})")
        }
        _ => match err.script() {
            Some(script) => format!("Migration failed at {script}"),
            None => "Migration failed".to_string(),
        },
    };

    CliError::migration_failed(title)
        .with_reason(err.to_string())
        .with_action("Fix the failing script and re-run; scripts already recorded are not re-applied")
}
