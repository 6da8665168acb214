//! # pgwrap Database Crate
//!
//! A thin convenience layer over a single PostgreSQL connection: open it,
//! log every statement, execute, scan rows into caller-supplied structs, and
//! run closures inside transactions that commit or roll back on their own.
//!
//! The wire protocol, statement execution and value decoding all belong to
//! `sqlx`; this crate only formats the log lines and wraps the errors.
//!
//! ## Public API
//!
//! - `Database`: owns the connection and a shared `Logger`; provides `connect`,
//!   `exec`, `query`, `transaction` and `close`.
//! - `Transaction`: the handle a transaction body receives.
//! - `Params` / `params!`: ordered bind parameters for `$1`, `$2`, ...
//! - `Logger`, `TracingLogger`, `MemoryLogger`: sinks for the statement log.
//! - `DbError`: the errors returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
mod exec;
pub mod logger;
pub mod params;
pub mod transaction;

// Re-export the key components to create a clean, public-facing API.
pub use connection::Database;
pub use error::{DbError, ErrorKind};
pub use exec::CommandTag;
pub use logger::{Logger, MemoryLogger, TracingLogger};
pub use params::Params;
pub use transaction::Transaction;

// Callers derive `FromRow` for their destination types and box transaction
// bodies; re-exported so they don't need to match our versions by hand.
pub use futures::future::BoxFuture;
pub use sqlx;
pub use sqlx::FromRow;
