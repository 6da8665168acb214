//! Helpers shared by the integration tests.

use std::sync::Arc;
use std::time::Duration;

use backon::{ExponentialBuilder, Retryable};
use database::{Database, DbError, Logger, MemoryLogger};

/// Connects to a freshly started `pgtemp` instance.
///
/// Retries while PostgreSQL still reports that it is starting up
/// (SQLSTATE 57P03).
pub async fn connect(url: &str, logger: Arc<dyn Logger>) -> Database {
    let retry_policy = ExponentialBuilder::default()
        .with_min_delay(Duration::from_millis(10))
        .with_max_delay(Duration::from_millis(100))
        .with_max_times(20);

    (|| Database::connect(url, logger.clone()))
        .retry(retry_policy)
        .when(is_db_starting_up)
        .await
        .expect("Failed to connect to the temporary database")
}

/// Connects with a fresh [`MemoryLogger`] and returns both.
pub async fn connect_logged(url: &str) -> (Database, Arc<MemoryLogger>) {
    let logger = Arc::new(MemoryLogger::new());
    let db = connect(url, logger.clone()).await;
    (db, logger)
}

fn is_db_starting_up(err: &DbError) -> bool {
    match err.driver_error() {
        sqlx::Error::Database(db_err) => db_err.code().is_some_and(|code| code == "57P03"),
        _ => false,
    }
}

/// Creates the `accounts` table used across tests.
pub async fn create_accounts(db: &mut Database) {
    db.exec(
        "CREATE TABLE accounts (id BIGINT PRIMARY KEY, owner TEXT NOT NULL, balance BIGINT NOT NULL)",
        database::params![],
    )
    .await
    .expect("Failed to create the accounts table");
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Account {
    pub id: i64,
    pub owner: String,
    pub balance: i64,
}
