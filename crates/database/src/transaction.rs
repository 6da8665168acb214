use std::sync::Arc;

use sqlx::postgres::{PgRow, Postgres};
use sqlx::FromRow;

use crate::error::DbError;
use crate::exec::{self, CommandTag};
use crate::logger::Logger;
use crate::params::Params;

/// An open transaction, handed to the body passed to
/// [`Database::transaction`](crate::Database::transaction).
///
/// Statements run through it are logged the same way as on the
/// [`Database`](crate::Database) itself. Commit and rollback are driven by
/// the outcome of the body. If the body's future is dropped mid-way, the
/// underlying `sqlx` transaction rolls back when it is dropped.
pub struct Transaction<'c> {
    inner: sqlx::Transaction<'c, Postgres>,
    logger: Arc<dyn Logger>,
}

impl std::fmt::Debug for Transaction<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transaction").finish_non_exhaustive()
    }
}

impl<'c> Transaction<'c> {
    pub(crate) fn new(inner: sqlx::Transaction<'c, Postgres>, logger: Arc<dyn Logger>) -> Self {
        Self { inner, logger }
    }

    /// Executes a statement that returns no rows, inside the transaction.
    pub async fn exec(&mut self, query: &str, params: Params) -> Result<CommandTag, DbError> {
        exec::exec(&mut self.inner, &*self.logger, query, params).await
    }

    /// Runs a query inside the transaction, see
    /// [`Database::query`](crate::Database::query).
    pub async fn query<T>(
        &mut self,
        dest: &mut Vec<T>,
        query: &str,
        params: Params,
    ) -> Result<(), DbError>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        exec::query(&mut self.inner, &*self.logger, dest, query, params).await
    }

    /// The raw `sqlx` transaction, for anything not covered above.
    pub fn inner(&mut self) -> &mut sqlx::Transaction<'c, Postgres> {
        &mut self.inner
    }

    pub(crate) async fn commit(self) -> Result<(), DbError> {
        self.inner.commit().await.map_err(|e| {
            self.logger.log(&format!("Transaction commit failed: {e}"));
            DbError::Commit(e)
        })
    }

    pub(crate) async fn rollback(self) -> Result<(), DbError> {
        self.inner.rollback().await.map_err(|e| {
            self.logger.log(&format!("Transaction rollback failed: {e}"));
            DbError::Rollback(e)
        })
    }
}
