//! Catalog database initialization and schema setup.

use sqlx::sqlite::{SqliteConnection, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use tracing::{debug, info};

const IN_MEMORY: &str = ":memory:";

/// Open (creating if needed) the catalog database and apply the schema.
///
/// `":memory:"` opens a private in-memory database held by a single pooled connection.
pub async fn init_db(db_path: &str) -> Result<SqlitePool, sqlx::Error> {
    let (url, max_connections) = if db_path == IN_MEMORY {
        ("sqlite::memory:".to_string(), 1)
    } else {
        if let Some(parent) = Path::new(db_path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).ok();
            }
        }
        (format!("sqlite:{}?mode=rwc", db_path), 5)
    };

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .min_connections(if max_connections == 1 { 1 } else { 0 })
        .idle_timeout(None)
        .max_lifetime(None)
        .after_connect(|conn, _meta| Box::pin(async move { configure_pragmas(conn).await }))
        .connect(&url)
        .await?;

    apply_schema(&pool).await?;

    info!(path = %db_path, "Catalog database ready");
    Ok(pool)
}

/// Apply `schema.sql`; every statement is idempotent.
async fn apply_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let schema_sql = include_str!("schema.sql");
    let mut applied = 0usize;

    for statement in schema_sql.split(';').map(str::trim).filter(|s| !s.is_empty()) {
        sqlx::query(statement).execute(pool).await?;
        applied += 1;
    }

    debug!(statements = applied, "Catalog schema applied");
    Ok(())
}

async fn configure_pragmas(conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    use sqlx::Row;

    // journal_mode reports the mode actually in effect; in-memory databases stay on "memory".
    let row = sqlx::query("PRAGMA journal_mode = WAL")
        .fetch_one(&mut *conn)
        .await?;
    let journal_mode: String = row.get(0);
    debug!(journal_mode = %journal_mode, "SQLite journal mode");

    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(&mut *conn)
        .await?;
    sqlx::query("PRAGMA synchronous = NORMAL")
        .execute(&mut *conn)
        .await?;

    Ok(())
}
