//! Embedded schema steps for the quote catalog.
//!
//! # Invariants
//! - Steps are numbered `1..=latest_version()` without gaps.
//! - All pending steps run in one transaction; `PRAGMA user_version` records
//!   the last applied step.
//! - Each applied step is logged by version and name.

use crate::db::{DbError, DbResult};
use log::{debug, info};
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "catalog",
        sql: include_str!("0001_catalog.sql"),
    },
    Migration {
        version: 2,
        name: "quote_search",
        sql: include_str!("0002_quote_search.sql"),
    },
];

/// Returns the latest schema version this build knows how to create.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Brings `conn` up to [`latest_version`].
///
/// Returns the versions applied by this call, in order; empty when the
/// schema was already current.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<Vec<u32>> {
    let current_version = current_user_version(conn)?;
    let latest = latest_version();

    if current_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current_version,
            latest_supported: latest,
        });
    }

    let pending: Vec<&Migration> = MIGRATIONS
        .iter()
        .filter(|migration| migration.version > current_version)
        .collect();
    if pending.is_empty() {
        debug!("event=db_migrate module=db status=skip version={current_version}");
        return Ok(Vec::new());
    }

    let tx = conn.transaction()?;
    for migration in &pending {
        tx.execute_batch(migration.sql)?;
        tx.pragma_update(None, "user_version", migration.version)?;
        debug!(
            "event=db_migrate_step module=db status=ok version={} name={}",
            migration.version, migration.name
        );
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from_version={current_version} to_version={latest} steps={}",
        pending.len()
    );
    Ok(pending.iter().map(|migration| migration.version).collect())
}

fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}

#[cfg(test)]
mod tests {
    use super::{apply_migrations, latest_version, MIGRATIONS};
    use rusqlite::Connection;

    #[test]
    fn steps_are_numbered_without_gaps() {
        for (idx, migration) in MIGRATIONS.iter().enumerate() {
            assert_eq!(migration.version as usize, idx + 1, "{}", migration.name);
        }
    }

    #[test]
    fn fresh_database_applies_every_step_once() {
        let mut conn = Connection::open_in_memory().unwrap();

        let applied = apply_migrations(&mut conn).unwrap();
        assert_eq!(applied, (1..=latest_version()).collect::<Vec<_>>());
        assert!(apply_migrations(&mut conn).unwrap().is_empty());
    }

    #[test]
    fn partially_migrated_database_applies_only_pending_steps() {
        let mut conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(MIGRATIONS[0].sql).unwrap();
        conn.pragma_update(None, "user_version", 1).unwrap();

        assert_eq!(apply_migrations(&mut conn).unwrap(), vec![2]);
    }
}
