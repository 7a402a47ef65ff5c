use sqlx::{Executor, Sqlite, SqlitePool};
use tracing::{debug, info};

use crate::db::repository;
use crate::error::AppError;

/// Version the running binary expects `PRAGMA user_version` to hold.
pub const SCHEMA_VERSION: i64 = 1;

const CREATE_TODOS: &str = r#"
CREATE TABLE IF NOT EXISTS todos (
    id        TEXT PRIMARY KEY NOT NULL,
    text      TEXT NOT NULL,
    status    TEXT NOT NULL CHECK(status IN ('pending', 'done')),
    createdAt TEXT NOT NULL
)
"#;

pub async fn schema_version<'e, E>(db: E) -> Result<i64, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_scalar::<_, i64>("PRAGMA user_version")
        .fetch_one(db)
        .await
}

async fn write_schema_version<'e, E>(db: E, version: i64) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    // PRAGMA statements do not take bound parameters.
    let sql = format!("PRAGMA user_version = {}", version);
    sqlx::query(&sql).execute(db).await?;
    Ok(())
}

/// Brings the store up to `target_version`.
///
/// Returns early when the persisted version already matches. Otherwise the
/// 0 -> 1 step creates the table and inserts `seed`, and `target_version` is
/// written back whichever steps ran. Steps and the version write commit
/// together, so a failed seed leaves the store at version 0 with no rows.
pub async fn migrate(
    db: &SqlitePool,
    target_version: i64,
    seed: &[String],
) -> Result<(), AppError> {
    for text in seed {
        repository::validate_text(text)?;
    }

    let mut tx = db.begin().await?;

    let mut current = schema_version(&mut *tx).await?;
    if current == target_version {
        debug!("schema already at version {}", current);
        return Ok(());
    }

    info!("migrating schema: version {} -> {}", current, target_version);

    if current == 0 {
        sqlx::query(CREATE_TODOS).execute(&mut *tx).await?;
        for text in seed {
            repository::insert_todo(&mut *tx, text).await?;
        }
        info!("created todos table ({} seed rows)", seed.len());
        current = 1;
    }

    debug!("migration steps finished at version {}", current);
    write_schema_version(&mut *tx, target_version).await?;
    tx.commit().await?;

    Ok(())
}
