use crate::args::StatusArgs;
use crate::error::CliError;
use crate::output;
use crate::style::Style;
use crate::ui::Ui;
use soundcheck_executor::pending_scripts;
use soundcheck_migration::{discover_scripts, Script, ScriptDiscoveryError};
use std::collections::HashSet;

pub async fn run(args: &StatusArgs, database_url: Option<&str>) -> Result<(), CliError> {
    let database_url = resolve_database_url(database_url)?;

    let scripts = discover_scripts(&args.dir).map_err(map_discovery_error)?;

    let pool = sqlx::PgPool::connect(&database_url).await.map_err(|e| {
        CliError::user_error("Database connection failed")
            .with_reason(e.to_string())
            .with_action("Check that the database is reachable and DATABASE_URL is correct")
    })?;

    let result = report(&pool, &scripts).await;

    pool.close().await;

    result
}

async fn report(pool: &sqlx::PgPool, scripts: &[Script]) -> Result<(), CliError> {
    let applied = select_applied_names(pool).await?;
    let last_applied = select_last_applied(pool).await?;

    let pending = pending_scripts(scripts, &applied);

    match last_applied {
        Some((name, executed_at)) => {
            output::line(format!("last_applied: {name} ({executed_at})"));
        }
        None => {
            output::line("last_applied: none");
        }
    }

    output::line(format!("applied: {}", applied.len()));
    output::line(format!("pending: {}", pending.len()));

    if !pending.is_empty() {
        let ui = Ui::new(Style::detect());
        let arrow = ui.style().arrow();
        for script in &pending {
            output::line(ui.list_item(&script.name, &arrow));
        }
    }

    Ok(())
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
    CliError::user_error("Script discovery failed").with_reason(err.to_string())
}

async fn select_applied_names(pool: &sqlx::PgPool) -> Result<HashSet<String>, CliError> {
    let rows: Result<Vec<(String,)>, sqlx::Error> =
        sqlx::query_as("SELECT name FROM migrations").fetch_all(pool).await;

    let rows = match rows {
        Ok(r) => r,
        Err(e) => return Err(map_status_sql_error(e)),
    };

    let mut out = HashSet::with_capacity(rows.len());
    for (name,) in rows {
        out.insert(name);
    }

    Ok(out)
}

async fn select_last_applied(pool: &sqlx::PgPool) -> Result<Option<(String, String)>, CliError> {
    let row: Result<Option<(String, String)>, sqlx::Error> = sqlx::query_as(
        "SELECT name, executed_at::text FROM migrations ORDER BY id DESC LIMIT 1",
    )
    .fetch_optional(pool)
    .await;

    match row {
        Ok(r) => Ok(r),
        Err(e) => Err(map_status_sql_error(e)),
    }
}

fn map_status_sql_error(err: sqlx::Error) -> CliError {
    let msg = err.to_string();
    if msg.contains("migrations") && (msg.contains("does not exist") || msg.contains("undefined_table"))
    {
        return CliError::user_error("Migration ledger is not initialized")
            .with_meaning("The migrations table has not been created in this database yet")
            .with_action("Run `soundcheck migrate` first");
    }

    CliError::user_error("Status query failed").with_reason(msg)
}
