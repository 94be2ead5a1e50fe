//! Database access for marketplace content

pub mod queries;

pub use queries::*;

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

use crate::config::Config;

/// Build the Postgres pool from configuration.
///
/// The pool connects lazily so the service can start before the store is
/// reachable; the first query surfaces connection errors.
pub fn create_pool(config: &Config) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect_lazy(&config.database_url)
}
