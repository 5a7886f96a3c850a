//! Storage tests
//!
//! Tests for the profile and report cache stores.

use reprofile_core::storage::{Database, DatabaseError, ProfileStore, ReportCacheStore};
use reprofile_core::{ExecutionProfile, Report, ReportId};
use tempfile::TempDir;

fn profile(name: &str, connection: &str, report: &str) -> ExecutionProfile {
    ExecutionProfile::new(name, connection, ReportId::new(report))
}

#[test]
fn test_load_all_on_empty_store() {
    let db = Database::in_memory().expect("Failed to create database");
    let store = ProfileStore::new(db.connection());

    assert!(store.load_all().expect("Failed to load").is_empty());
}

#[test]
fn test_save_and_get_by_name_ignores_case() {
    let db = Database::in_memory().expect("Failed to create database");
    let store = ProfileStore::new(db.connection());

    let p = profile("Weekly", "Prod", "2");
    store.save(&p).expect("Failed to save profile");

    let retrieved = store
        .get_by_name("WEEKLY")
        .expect("Failed to get profile")
        .expect("Profile not found");
    assert_eq!(retrieved, p);
}

#[test]
fn test_save_upserts_by_name() {
    let db = Database::in_memory().expect("Failed to create database");
    let store = ProfileStore::new(db.connection());

    store.save(&profile("Weekly", "Prod", "1")).unwrap();
    store.save(&profile("weekly", "Dev", "9")).unwrap();

    let all = store.load_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "weekly");
    assert_eq!(all[0].source_connection_name, "Dev");
    assert_eq!(all[0].selected_report_id, ReportId::new("9"));
}

#[test]
fn test_save_with_same_id_renames() {
    let db = Database::in_memory().expect("Failed to create database");
    let store = ProfileStore::new(db.connection());

    let mut p = profile("Weekly", "Prod", "1");
    store.save(&p).unwrap();

    p.name = "Monthly".to_string();
    store.save(&p).unwrap();

    let all = store.load_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "Monthly");
    assert!(store.get_by_name("Weekly").unwrap().is_none());
}

#[test]
fn test_load_all_is_ordered_by_name() {
    let db = Database::in_memory().expect("Failed to create database");
    let store = ProfileStore::new(db.connection());

    store.save(&profile("zeta", "Prod", "1")).unwrap();
    store.save(&profile("Alpha", "Prod", "1")).unwrap();
    store.save(&profile("beta", "Prod", "1")).unwrap();

    let names: Vec<_> = store
        .load_all()
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["Alpha", "beta", "zeta"]);
}

#[test]
fn test_delete_is_case_insensitive_and_idempotent() {
    let db = Database::in_memory().expect("Failed to create database");
    let store = ProfileStore::new(db.connection());

    store.save(&profile("Weekly", "Prod", "1")).unwrap();

    assert!(store.delete("wEEKLY").unwrap());
    assert!(!store.delete("Weekly").unwrap());
    assert!(store.load_all().unwrap().is_empty());
}

#[test]
fn test_non_ascii_names_fold_case() {
    let db = Database::in_memory().expect("Failed to create database");
    let store = ProfileStore::new(db.connection());

    let original = profile("Über", "Prod", "1");
    store.save(&original).unwrap();

    let found = store
        .get_by_name("über")
        .unwrap()
        .expect("Lowercase lookup missed the profile");
    assert_eq!(found.id, original.id);

    store.save(&profile("über", "Dev", "2")).unwrap();
    let all = store.load_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "über");
    assert_eq!(all[0].source_connection_name, "Dev");

    assert!(store.delete("ÜBER").unwrap());
    assert!(store.load_all().unwrap().is_empty());
}

#[test]
fn test_failed_save_leaves_records_unchanged() {
    let db = Database::in_memory().expect("Failed to create database");
    let store = ProfileStore::new(db.connection());

    let original = profile("Weekly", "Prod", "1");
    store.save(&original).unwrap();

    db.connection()
        .execute_batch(
            "CREATE TRIGGER reject_writes BEFORE INSERT ON execution_profiles
             BEGIN SELECT RAISE(ABORT, 'read only'); END;",
        )
        .unwrap();

    assert!(store.save(&profile("Weekly", "Dev", "7")).is_err());

    let all = store.load_all().unwrap();
    assert_eq!(all, vec![original]);
}

#[test]
fn test_unparseable_record_is_corrupt() {
    let db = Database::in_memory().expect("Failed to create database");
    db.connection()
        .execute(
            r"
            INSERT INTO execution_profiles
                (id, name, name_key, source_connection_name, selected_report_id, data, created_at, updated_at)
            VALUES ('x', 'Weekly', 'weekly', 'Prod', '1', 'not json', '', '')
            ",
            [],
        )
        .unwrap();

    let store = ProfileStore::new(db.connection());
    assert!(matches!(store.load_all(), Err(DatabaseError::Corrupt(_))));
    assert!(matches!(
        store.get_by_name("weekly"),
        Err(DatabaseError::Corrupt(_))
    ));
}

#[test]
fn test_report_cache_read_missing_is_empty() {
    let db = Database::in_memory().expect("Failed to create database");
    let cache = ReportCacheStore::new(db.connection());

    assert!(cache.read("Prod").unwrap().is_empty());
    assert!(cache.entry("Prod").unwrap().is_none());
}

#[test]
fn test_report_cache_write_replaces() {
    let db = Database::in_memory().expect("Failed to create database");
    let cache = ReportCacheStore::new(db.connection());

    let first = vec![
        Report::new("1", "Sales").with_description("Monthly sales"),
        Report::new("2", "Ops"),
    ];
    cache.write("Prod", &first).unwrap();
    assert_eq!(cache.read("Prod").unwrap(), first);

    let second = vec![Report::new("3", "Finance")];
    cache.write("Prod", &second).unwrap();
    assert_eq!(cache.read("Prod").unwrap(), second);

    cache.write("Prod", &second).unwrap();
    assert_eq!(cache.read("Prod").unwrap(), second);
}

#[test]
fn test_report_cache_is_per_connection() {
    let db = Database::in_memory().expect("Failed to create database");
    let cache = ReportCacheStore::new(db.connection());

    cache.write("Prod", &[Report::new("1", "Sales")]).unwrap();
    cache.write("Dev", &[Report::new("9", "Debug")]).unwrap();
    cache.write("Empty", &[]).unwrap();

    assert_eq!(cache.read("Prod").unwrap()[0].name, "Sales");
    assert_eq!(cache.read("Dev").unwrap()[0].name, "Debug");
    assert!(cache.read("Empty").unwrap().is_empty());

    let names: Vec<_> = cache
        .list()
        .unwrap()
        .into_iter()
        .map(|e| e.connection_name)
        .collect();
    assert_eq!(names, vec!["Dev", "Empty", "Prod"]);
}

#[test]
fn test_file_database_persists_across_opens() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("reprofile.db");

    {
        let db = Database::open(&path).expect("Failed to open database");
        ProfileStore::new(db.connection())
            .save(&profile("Weekly", "Prod", "2"))
            .unwrap();
        ReportCacheStore::new(db.connection())
            .write("Prod", &[Report::new("2", "Ops")])
            .unwrap();
        db.close().unwrap();
    }

    let db = Database::open(&path).expect("Failed to reopen database");
    let profiles = ProfileStore::new(db.connection()).load_all().unwrap();
    assert_eq!(profiles.len(), 1);
    assert_eq!(profiles[0].name, "Weekly");
    assert_eq!(
        ReportCacheStore::new(db.connection()).read("Prod").unwrap(),
        vec![Report::new("2", "Ops")]
    );
}
