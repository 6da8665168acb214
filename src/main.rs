use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use comfy_table::Table;
use configuration::{LogFormat, load_config};
use database::{Database, DbError, Params, TracingLogger};

/// The main entry point for the pgwrap command-line tool.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command-line arguments
    let cli = Cli::parse();

    let mut config = load_config().context("Failed to load configuration")?;
    if let Some(url) = cli.database_url {
        config.database.url = url;
    }
    if let Some(format) = cli.log_format {
        config.logging.format = format;
    }
    config.validate()?;

    // Keep the guard alive until exit so buffered file logs are flushed.
    let _guard = configuration::init_tracing(&config.logging)?;

    let mut db = Database::connect(&config.database.url, Arc::new(TracingLogger)).await?;
    tracing::debug!("Connected to the database");

    // Execute the appropriate command
    let result = match cli.command {
        Commands::Ping => handle_ping(&mut db).await,
        Commands::Exec(args) => handle_exec(&mut db, args).await,
        Commands::Query(args) => handle_query(&mut db, args).await,
        Commands::Script(args) => handle_script(&mut db, args).await,
    };

    // Close even when the command failed; its error takes precedence.
    let closed = db.close().await;
    result?;
    closed?;
    Ok(())
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// A thin, logging front end to a single PostgreSQL connection.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Connection string; overrides `database.url` and DATABASE_URL.
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// Console log style.
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the database is reachable.
    Ping,
    /// Execute a statement and print how many rows it affected.
    Exec(StatementArgs),
    /// Run a query and print the rows as a table.
    ///
    /// The SQL is run as a subquery, so it must be a single SELECT, VALUES or
    /// TABLE statement; use `exec` for anything else. The statement log shows
    /// the wrapped query.
    Query(StatementArgs),
    /// Execute several statements atomically in one transaction.
    Script(ScriptArgs),
}

#[derive(Parser)]
struct StatementArgs {
    /// SQL with `$1`, `$2`, ... placeholders.
    sql: String,

    /// Values for the placeholders, bound as TEXT (cast in SQL, e.g. `$1::int`).
    args: Vec<String>,
}

#[derive(Parser)]
struct ScriptArgs {
    /// Statements to execute in order; all of them or none take effect.
    #[arg(required = true)]
    statements: Vec<String>,
}

// ==============================================================================
// Command Logic
// ==============================================================================

#[derive(Debug, sqlx::FromRow)]
struct Pong {
    ok: i32,
}

async fn handle_ping(db: &mut Database) -> anyhow::Result<()> {
    let mut rows: Vec<Pong> = Vec::new();
    db.query(&mut rows, "SELECT 1 AS ok", Params::new()).await?;
    anyhow::ensure!(rows.len() == 1 && rows[0].ok == 1, "unexpected reply to SELECT 1");
    println!("ok");
    Ok(())
}

async fn handle_exec(db: &mut Database, args: StatementArgs) -> anyhow::Result<()> {
    let params: Params = args.args.into_iter().collect();
    let tag = db.exec(&args.sql, params).await?;
    println!("{tag}");
    Ok(())
}

/// One result row, serialized by PostgreSQL so that any column type can be shown.
#[derive(Debug, sqlx::FromRow)]
struct JsonRow {
    json: String,
}

async fn handle_query(db: &mut Database, args: StatementArgs) -> anyhow::Result<()> {
    let sql = format!(
        "SELECT row_to_json(q)::text AS json FROM ({}) AS q",
        args.sql.trim().trim_end_matches(';')
    );
    let params: Params = args.args.into_iter().collect();

    let mut rows: Vec<JsonRow> = Vec::new();
    db.query(&mut rows, &sql, params).await?;

    let rows = rows
        .iter()
        .map(|r| serde_json::from_str::<serde_json::Map<String, serde_json::Value>>(&r.json))
        .collect::<Result<Vec<_>, _>>()
        .context("Failed to decode a row")?;

    println!("{}", render_table(&rows));
    println!("({} rows)", rows.len());
    Ok(())
}

fn render_table(rows: &[serde_json::Map<String, serde_json::Value>]) -> Table {
    let mut table = Table::new();
    let Some(first) = rows.first() else {
        return table;
    };
    table.set_header(first.keys());
    for row in rows {
        table.add_row(row.values().map(|value| match value {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Null => String::new(),
            other => other.to_string(),
        }));
    }
    table
}

async fn handle_script(db: &mut Database, args: ScriptArgs) -> anyhow::Result<()> {
    let affected = db
        .transaction(|tx| {
            Box::pin(async move {
                let mut affected = 0;
                for statement in &args.statements {
                    affected += tx.exec(statement, Params::new()).await?.rows_affected();
                }
                Ok::<_, DbError>(affected)
            })
        })
        .await?;
    println!("committed, {affected} rows affected");
    Ok(())
}
