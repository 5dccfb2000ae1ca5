use rusqlite::types::Value;
use sqlbench_core::storage::schema::SchemaScripts;
use sqlbench_core::storage::store::{render_rows, SqlPolicy, Store};
use std::path::PathBuf;
use tempfile::tempdir;

const GROUPS_SCHEMA: &str = "CREATE TABLE user_groups (user_id INTEGER NOT NULL, group_id TEXT NOT NULL, PRIMARY KEY (user_id, group_id));";
const GROUPS_SEED: &str = "INSERT INTO user_groups VALUES (1, 'A'), (1, 'B'), (2, 'A');";

fn fixture_scripts() -> anyhow::Result<SchemaScripts> {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../fixtures/habits");
    SchemaScripts::read(&dir.join("setup.sql"), &dir.join("setupData.sql"))
}

#[test]
fn users_in_more_than_one_group() -> anyhow::Result<()> {
    let store = Store::memory()?;
    store.apply(&SchemaScripts::new(GROUPS_SCHEMA, GROUPS_SEED))?;

    let rows = store.execute(
        "SELECT user_id FROM user_groups GROUP BY user_id HAVING COUNT(DISTINCT group_id) > 1;",
    )?;
    assert_eq!(rows, vec![vec![Value::Integer(1)]]);
    assert_eq!(render_rows(&rows), "[(1,)]");
    Ok(())
}

#[test]
fn rebuild_discards_previous_database() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let db_path = dir.path().join("aidb.sqlite");
    let scripts = SchemaScripts::new(GROUPS_SCHEMA, GROUPS_SEED);

    {
        let store = Store::rebuild(&db_path, &scripts)?;
        store.execute("INSERT INTO user_groups VALUES (9, 'Z')")?;
        let rows = store.execute("SELECT COUNT(*) FROM user_groups")?;
        assert_eq!(rows, vec![vec![Value::Integer(4)]]);
    }

    // a second run starts from the seed alone; re-applying the schema onto
    // the old file would fail on the existing table
    let store = Store::rebuild(&db_path, &scripts)?;
    let rows = store.execute("SELECT COUNT(*) FROM user_groups")?;
    assert_eq!(rows, vec![vec![Value::Integer(3)]]);
    Ok(())
}

#[test]
fn malformed_schema_is_a_setup_error() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let scripts = SchemaScripts::new("CREATE TABLE broken (", "");
    let err = Store::rebuild(&dir.path().join("db.sqlite"), &scripts)
        .err()
        .expect("schema should fail");
    assert!(format!("{:#}", err).contains("schema script failed"));
    Ok(())
}

#[test]
fn missing_script_file_is_a_setup_error() {
    let dir = tempdir().unwrap();
    let res = SchemaScripts::read(&dir.path().join("nope.sql"), &dir.path().join("nope2.sql"));
    assert!(res.is_err());
}

#[test]
fn invalid_and_multi_statement_sql_fail() -> anyhow::Result<()> {
    let store = Store::memory()?;
    store.apply(&SchemaScripts::new(GROUPS_SCHEMA, GROUPS_SEED))?;

    assert!(store.execute("I am sorry, I cannot help with that.").is_err());
    assert!(store.execute("SELECT * FROM no_such_table").is_err());

    let err = store
        .execute("SELECT 1; SELECT 2;")
        .expect_err("two statements");
    assert!(err.to_string().contains("one statement"));

    assert!(store.execute("   ")?.is_empty());
    Ok(())
}

#[test]
fn unrestricted_policy_runs_mutations() -> anyhow::Result<()> {
    let store = Store::memory()?;
    store.apply(&SchemaScripts::new(GROUPS_SCHEMA, GROUPS_SEED))?;
    assert_eq!(store.policy(), SqlPolicy::Unrestricted);

    let rows = store.execute("DELETE FROM user_groups WHERE user_id = 2")?;
    assert!(rows.is_empty());
    let rows = store.execute("SELECT COUNT(*) FROM user_groups")?;
    assert_eq!(rows, vec![vec![Value::Integer(2)]]);
    Ok(())
}

#[test]
fn read_only_policy_rejects_mutations() -> anyhow::Result<()> {
    let store = Store::memory()?.with_policy(SqlPolicy::ReadOnly);
    store.apply(&SchemaScripts::new(GROUPS_SCHEMA, GROUPS_SEED))?;

    let err = store
        .execute("DELETE FROM user_groups")
        .expect_err("delete must be rejected");
    assert!(err.to_string().contains("read-only"));

    let rows = store.execute("SELECT COUNT(*) FROM user_groups")?;
    assert_eq!(rows, vec![vec![Value::Integer(3)]]);
    Ok(())
}

#[test]
fn fixture_seed_puts_every_user_in_a_group() -> anyhow::Result<()> {
    let store = Store::memory()?;
    store.apply(&fixture_scripts()?)?;

    let rows = store.execute(
        "SELECT u.user_id FROM users u LEFT JOIN user_groups ug ON u.user_id = ug.user_id WHERE ug.group_id IS NULL;",
    )?;
    assert_eq!(render_rows(&rows), "[]");

    let rows = store.execute(
        "SELECT name, allowed_misses FROM groups WHERE rule_type = 'custom' ORDER BY group_id",
    )?;
    assert_eq!(
        render_rows(&rows),
        "[('Language Lab', 2), ('Desk Stretchers', 0)]"
    );
    Ok(())
}
