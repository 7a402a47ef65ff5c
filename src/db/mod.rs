pub mod repository;
pub mod schema;
pub mod store;

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::info;

pub use schema::SCHEMA_VERSION;
pub use store::{SqliteTodoStore, TodoStore};

/// Opens the process-wide pool. The database file is created if missing.
///
/// An in-memory database lives only as long as its connection, so those
/// pools are pinned to a single connection that is never recycled.
pub async fn open_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool = if database_url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?
    } else {
        SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?
    };

    info!("opened database {}", database_url);
    Ok(pool)
}
