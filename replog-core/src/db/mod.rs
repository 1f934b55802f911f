pub mod import;
pub mod models;
pub mod operations;

use anyhow::Result;
use log::{debug, info};
use sqlx::SqlitePool;
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
};
use std::env;
use std::path::Path;
use std::time::Duration;
use tokio::sync::OnceCell;

use crate::catalog;

static DB_PATH: OnceCell<String> = OnceCell::const_new();
static POOL: OnceCell<SqlitePool> = OnceCell::const_new();

#[inline(always)]
pub async fn get_db_path() -> &'static String {
    DB_PATH
        .get_or_init(|| async {
            env::var("DATABASE_URL").unwrap_or_else(|_| default_db_path())
        })
        .await
}

fn default_db_path() -> String {
    dirs::data_dir()
        .map(|dir| {
            dir.join("replog")
                .join("replog.db")
                .to_string_lossy()
                .into_owned()
        })
        .unwrap_or_else(|| "replog.db".to_string())
}

pub async fn set_db_path(path: &str) -> Result<()> {
    DB_PATH
        .set(path.to_string())
        .map_err(|e| anyhow::anyhow!(format!("Failed to set DB_PATH: {:?}", e)))
}

/// Process-wide handle. The first call opens the database and runs schema
/// setup; every later call returns the same pool without re-running it.
/// Safe under concurrent first calls.
pub async fn get_pool() -> Result<&'static SqlitePool> {
    POOL.get_or_try_init(|| async {
        let path = get_db_path().await;
        connect(path).await
    })
    .await
}

/// Close the process-wide handle. A no-op when the pool was never opened,
/// and callable any number of times.
pub async fn close() {
    if let Some(pool) = POOL.get() {
        pool.close().await;
    }
}

/// Open (or create) the database file at `path` and bring its schema up to
/// date. Callers own the returned pool; `get_pool` is the memoized variant.
pub async fn connect(path: &str) -> Result<SqlitePool> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await.ok();
        }
    }

    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(Duration::from_millis(5000))
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new().connect_with(options).await?;
    init_database(&pool).await?;
    Ok(pool)
}

/// In-memory database for tests. Pinned to a single connection so the
/// database lives as long as the pool.
pub async fn connect_in_memory() -> Result<SqlitePool> {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;
    init_database(&pool).await?;
    Ok(pool)
}

pub async fn clear_all_data(pool: &SqlitePool) -> Result<()> {
    sqlx::query("DELETE FROM sets").execute(pool).await?;
    sqlx::query("DELETE FROM workouts").execute(pool).await?;
    sqlx::query("DELETE FROM exercises").execute(pool).await?;
    Ok(())
}

struct Migration {
    name: &'static str,
    up_sql: &'static str,
}

const MIGRATION_2026_05_14_091200_0000_SETUP_TABLES: &str =
    include_str!("../../../migrations/2026-05-14-091200-0000_setup_tables/up.sql");
const MIGRATION_2026_07_02_104500_0000_ADD_EXERCISE_I18N_KEY: &str =
    include_str!("../../../migrations/2026-07-02-104500-0000_add_exercise_i18n_key/up.sql");

const MIGRATIONS: &[Migration] = &[
    Migration {
        name: "2026-05-14-091200-0000_setup_tables",
        up_sql: MIGRATION_2026_05_14_091200_0000_SETUP_TABLES,
    },
    Migration {
        name: "2026-07-02-104500-0000_add_exercise_i18n_key",
        up_sql: MIGRATION_2026_07_02_104500_0000_ADD_EXERCISE_I18N_KEY,
    },
];

async fn init_migrations_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS _migrations (
            id INTEGER NOT NULL PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            applied_at INTEGER NOT NULL DEFAULT (CAST(strftime('%s','now') AS INTEGER))
        )",
    )
    .execute(pool)
    .await?;
    Ok(())
}

async fn is_migration_applied(pool: &SqlitePool, migration_name: &str) -> Result<bool> {
    let result =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM _migrations WHERE name = ?1")
            .bind(migration_name)
            .fetch_one(pool)
            .await?;
    Ok(result > 0)
}

async fn mark_migration_applied(pool: &SqlitePool, migration_name: &str) -> Result<()> {
    sqlx::query("INSERT INTO _migrations (name) VALUES (?1)")
        .bind(migration_name)
        .execute(pool)
        .await?;
    Ok(())
}

fn parse_sql_statements(sql: &str) -> Vec<String> {
    sql.lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with("--")
        })
        .collect::<Vec<_>>()
        .join("\n")
        .split(';')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

// Databases written by app versions that added the column outside the
// runner report "duplicate column name" when the ALTER re-runs.
fn is_tolerable_duplicate_column(statement: &str, error: &sqlx::Error) -> bool {
    statement
        .trim_start()
        .to_ascii_uppercase()
        .starts_with("ALTER TABLE")
        && error.to_string().contains("duplicate column name")
}

/// Bring the schema up to date and run the i18n-key backfill. Every step
/// is idempotent; calling this on an already-initialized file is a no-op.
pub async fn init_database(pool: &SqlitePool) -> Result<()> {
    init_migrations_table(pool).await?;

    for migration in MIGRATIONS {
        if is_migration_applied(pool, migration.name).await? {
            debug!("Migration {} already applied, skipping", migration.name);
            continue;
        }

        info!("Applying migration: {}", migration.name);
        let statements = parse_sql_statements(migration.up_sql);

        for statement in statements {
            if let Err(e) = sqlx::query(&statement).execute(pool).await {
                if is_tolerable_duplicate_column(&statement, &e) {
                    debug!(
                        "Column already present, skipping statement in {}: {}",
                        migration.name, statement
                    );
                    continue;
                }
                return Err(anyhow::anyhow!(
                    "Failed to execute migration statement in {}: {} - Error: {}",
                    migration.name,
                    statement,
                    e
                ));
            }
        }

        mark_migration_applied(pool, migration.name).await?;
        info!("Migration {} applied successfully", migration.name);
    }

    backfill_exercise_i18n_keys(pool).await?;

    Ok(())
}

/// Assign translation keys to pre-existing exercises whose name matches a
/// known default in any supported locale. Rows already carrying a key are
/// never revisited, so rerunning on every start is harmless.
pub async fn backfill_exercise_i18n_keys(pool: &SqlitePool) -> Result<u64> {
    let unkeyed: Vec<(i64, String)> =
        sqlx::query_as("SELECT id, name FROM exercises WHERE i18n_key IS NULL")
            .fetch_all(pool)
            .await?;

    let mut updated = 0;
    for (id, name) in unkeyed {
        if let Some(key) = catalog::i18n_key_for_name(&name) {
            updated += sqlx::query(
                "UPDATE exercises SET i18n_key = ?1 WHERE id = ?2 AND i18n_key IS NULL",
            )
            .bind(key)
            .bind(id)
            .execute(pool)
            .await?
            .rows_affected();
        }
    }

    if updated > 0 {
        info!("Backfilled i18n keys for {} exercises", updated);
    }
    Ok(updated)
}
