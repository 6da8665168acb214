//! Statement execution shared by [`Database`](crate::Database) and
//! [`Transaction`](crate::Transaction).

use futures::TryStreamExt;
use sqlx::postgres::{PgConnection, PgQueryResult, PgRow};
use sqlx::{Executor, FromRow};

use crate::error::DbError;
use crate::logger::Logger;
use crate::params::Params;

/// Outcome of a non-query statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CommandTag {
    rows_affected: u64,
}

impl CommandTag {
    pub fn rows_affected(&self) -> u64 {
        self.rows_affected
    }
}

impl From<PgQueryResult> for CommandTag {
    fn from(result: PgQueryResult) -> Self {
        Self {
            rows_affected: result.rows_affected(),
        }
    }
}

impl std::fmt::Display for CommandTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.rows_affected {
            1 => write!(f, "1 row affected"),
            n => write!(f, "{n} rows affected"),
        }
    }
}

pub(crate) async fn exec(
    conn: &mut PgConnection,
    logger: &dyn Logger,
    query: &str,
    params: Params,
) -> Result<CommandTag, DbError> {
    logger.log(&format!("Executing query: {query}"));

    // Without parameters the statement goes over the simple protocol, which
    // accepts several `;`-separated commands in one string.
    let result = if params.is_empty() {
        conn.execute(sqlx::raw_sql(query)).await
    } else {
        match params.into_arguments() {
            Ok(args) => conn.execute(sqlx::query_with(query, args)).await,
            Err(e) => Err(e),
        }
    };

    result.map(CommandTag::from).map_err(|e| {
        logger.log(&format!("Query execution failed: {e}"));
        DbError::Exec(e)
    })
}

/// Runs `query` and replaces the contents of `dest` with one `T` per row.
///
/// `dest` is left untouched when the query or the scan fails.
pub(crate) async fn query<T>(
    conn: &mut PgConnection,
    logger: &dyn Logger,
    dest: &mut Vec<T>,
    query: &str,
    params: Params,
) -> Result<(), DbError>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    logger.log(&format!("Querying: {query}"));

    let query_failed = |e: sqlx::Error| {
        logger.log(&format!("Query failed: {e}"));
        DbError::Query(e)
    };

    let args = params.into_arguments().map_err(query_failed)?;

    // The cursor borrows the connection and is released when `rows` drops,
    // on every path out of this function.
    let mut rows = sqlx::query_with(query, args).fetch(conn);
    let mut scanned = Vec::new();
    while let Some(row) = rows.try_next().await.map_err(query_failed)? {
        let item = T::from_row(&row).map_err(|e| {
            logger.log(&format!("Scanning failed: {e}"));
            DbError::Scan(e)
        })?;
        scanned.push(item);
    }

    *dest = scanned;
    Ok(())
}
