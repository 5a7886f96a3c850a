//! Database migrations

use rusqlite::Connection;

use super::db::DatabaseError;

const CURRENT_VERSION: i32 = 1;

/// Run all pending migrations
///
/// # Errors
/// Returns an error if migrations fail
pub fn run_migrations(conn: &Connection) -> Result<(), DatabaseError> {
    let version: i32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

    if version > CURRENT_VERSION {
        return Err(DatabaseError::Migration(format!(
            "database schema version {version} is newer than supported version {CURRENT_VERSION}"
        )));
    }

    if version < 1 {
        migrate_v1(conn)?;
    }

    conn.pragma_update(None, "user_version", CURRENT_VERSION)?;
    Ok(())
}

fn migrate_v1(conn: &Connection) -> Result<(), DatabaseError> {
    conn.execute_batch(
        r"
        -- Execution profiles
        -- name_key is the Unicode-lowercased name and carries uniqueness;
        -- NOCASE only folds ASCII. Full record kept as JSON in data
        CREATE TABLE IF NOT EXISTS execution_profiles (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            name_key TEXT NOT NULL UNIQUE,
            source_connection_name TEXT NOT NULL,
            selected_report_id TEXT NOT NULL,
            data TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        -- Report cache
        -- One row per connection, reports stored as a JSON array in retrieval order
        CREATE TABLE IF NOT EXISTS report_cache (
            connection_name TEXT PRIMARY KEY,
            reports TEXT NOT NULL,
            fetched_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_profiles_connection
            ON execution_profiles(source_connection_name);
        ",
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();

        let version: i32 = conn
            .pragma_query_value(None, "user_version", |row| row.get(0))
            .unwrap();
        assert_eq!(version, CURRENT_VERSION);
    }

    #[test]
    fn test_rejects_newer_schema() {
        let conn = Connection::open_in_memory().unwrap();
        conn.pragma_update(None, "user_version", CURRENT_VERSION + 1)
            .unwrap();
        assert!(matches!(
            run_migrations(&conn),
            Err(DatabaseError::Migration(_))
        ));
    }

    #[test]
    fn test_name_key_is_unique() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();

        let insert = r"
            INSERT INTO execution_profiles
                (id, name, name_key, source_connection_name, selected_report_id, data, created_at, updated_at)
            VALUES (?1, ?2, ?3, 'Prod', 'r1', '{}', '', '')
            ";
        conn.execute(insert, ["a", "Über", "über"]).unwrap();
        assert!(conn.execute(insert, ["b", "über", "über"]).is_err());
    }
}
