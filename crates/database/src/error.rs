use thiserror::Error;

/// Coarse classification of a [`DbError`], grouping variants by the
/// operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Opening or closing the connection.
    Connection,
    /// Running a statement or a query.
    Execution,
    /// Mapping result rows into the destination type.
    Scan,
    /// Beginning, committing or rolling back a transaction.
    Transaction,
}

#[derive(Error, Debug)]
pub enum DbError {
    #[error("failed to connect to database: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("failed to close database connection: {0}")]
    Close(#[source] sqlx::Error),

    #[error("failed to execute query: {0}")]
    Exec(#[source] sqlx::Error),

    #[error("failed to query: {0}")]
    Query(#[source] sqlx::Error),

    #[error("failed to scan rows: {0}")]
    Scan(#[source] sqlx::Error),

    #[error("failed to begin transaction: {0}")]
    Begin(#[source] sqlx::Error),

    #[error("failed to commit transaction: {0}")]
    Commit(#[source] sqlx::Error),

    #[error("failed to roll back transaction: {0}")]
    Rollback(#[source] sqlx::Error),
}

impl DbError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DbError::Connect(_) | DbError::Close(_) => ErrorKind::Connection,
            DbError::Exec(_) | DbError::Query(_) => ErrorKind::Execution,
            DbError::Scan(_) => ErrorKind::Scan,
            DbError::Begin(_) | DbError::Commit(_) | DbError::Rollback(_) => {
                ErrorKind::Transaction
            }
        }
    }

    /// The driver error this failure wraps.
    pub fn driver_error(&self) -> &sqlx::Error {
        match self {
            DbError::Connect(e)
            | DbError::Close(e)
            | DbError::Exec(e)
            | DbError::Query(e)
            | DbError::Scan(e)
            | DbError::Begin(e)
            | DbError::Commit(e)
            | DbError::Rollback(e) => e,
        }
    }
}
