//! Embedded PostgreSQL helpers for integration tests.
//!
//! Test databases come from `pg-embed-setup-unpriv`'s shared cluster, and
//! schema setup runs the crate's embedded Diesel migrations so test schemas
//! cannot drift from `migrations/`.

use std::time::Duration;

use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::Connection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use pg_embedded_setup_unpriv::{BootstrapResult, ClusterHandle, TemporaryDatabase};

/// Embedded migrations from the backend/migrations directory.
const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

const CLUSTER_RETRIES: usize = 5;
const CLUSTER_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Returns the shared cluster handle, retrying transient bootstrap failures.
fn cluster_handle() -> BootstrapResult<&'static ClusterHandle> {
    ensure_stable_password();
    let mut attempt = 1;
    loop {
        match pg_embedded_setup_unpriv::test_support::shared_cluster_handle() {
            Ok(handle) => return Ok(handle),
            Err(error) => {
                if attempt >= CLUSTER_RETRIES {
                    return Err(error);
                }
                std::thread::sleep(CLUSTER_RETRY_DELAY);
                attempt += 1;
            }
        }
    }
}

/// Pins `PG_PASSWORD` so the password stays consistent across processes that
/// reuse the same data directory. `setup()` skips `initdb` when the directory
/// already exists, leaving the cluster configured with the original password.
fn ensure_stable_password() {
    if std::env::var_os("PG_PASSWORD").is_none() {
        // SAFETY: runs before the cluster library spawns any threads. The
        // shared cluster singleton serialises access, so this runs at most
        // once per process.
        unsafe {
            std::env::set_var("PG_PASSWORD", "restaurant_embedded_test");
        }
    }
}

/// Provisions a fresh database on the shared cluster with all migrations
/// applied, seed rows included.
pub fn provision_database() -> Result<TemporaryDatabase, String> {
    let cluster = cluster_handle().map_err(|err| err.to_string())?;
    let database = cluster
        .temporary_database(unique_database_name())
        .map_err(|err| format!("create test database: {err:?}"))?;
    migrate_schema(database.url())?;
    Ok(database)
}

/// Generates a database name unique per process and per call so concurrent
/// suites on the shared cluster do not collide.
fn unique_database_name() -> String {
    use std::sync::atomic::{AtomicU64, Ordering};
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let pid = std::process::id();
    let sequence = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("restaurant_test_{pid}_{sequence}")
}

/// Runs all pending Diesel migrations against the given database.
fn migrate_schema(url: &str) -> Result<(), String> {
    let mut conn = PgConnection::establish(url).map_err(|err| format!("connect: {err}"))?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|err| format!("migration: {err}"))?;
    Ok(())
}

/// Drops the named table so a suite can simulate schema loss.
pub fn drop_table(url: &str, table_name: &str) -> Result<(), String> {
    let mut conn = PgConnection::establish(url).map_err(|err| format!("connect: {err}"))?;
    let escaped_name = table_name.replace('"', "\"\"");
    conn.batch_execute(&format!(r#"DROP TABLE IF EXISTS "{escaped_name}" CASCADE"#))
        .map_err(|err| format!("drop table: {err}"))
}

/// Handles cluster setup failures consistently across suites.
///
/// When `SKIP_TEST_CLUSTER` is truthy ("1", "true", "yes"), prints a skip
/// marker and returns `None`. Otherwise panics so CI breakage is not masked.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}

fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}
