use crate::db::{connect_with_config, test_connection};
use anyhow::Result;
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

/// In-memory SQLite answers a ping and a trivial query
#[tokio::test]
async fn test_in_memory_connection() -> Result<()> {
    let db = connect_with_config(&configs::DatabaseConfig::in_memory()).await?;
    test_connection(&db).await?;

    let stmt = Statement::from_string(DatabaseBackend::Sqlite, "SELECT 1 as test".to_string());
    let row = db.query_one(stmt).await?.expect("one row");
    let value: i32 = row.try_get("", "test")?;
    assert_eq!(value, 1);
    Ok(())
}

/// Unsupported schemes are rejected before a connection is attempted
#[tokio::test]
async fn test_invalid_url_fails() {
    let cfg = configs::DatabaseConfig { url: "not-a-url".into(), ..configs::DatabaseConfig::in_memory() };
    assert!(connect_with_config(&cfg).await.is_err());
}

/// Migrations create every table
#[tokio::test]
async fn test_schema_created() -> Result<()> {
    let db = super::setup_test_db().await?;
    for table in ["vehicle", "collaborator", "service_record", "part", "user"] {
        let stmt = Statement::from_string(
            DatabaseBackend::Sqlite,
            format!("SELECT name FROM sqlite_master WHERE type = 'table' AND name = '{table}'"),
        );
        assert!(db.query_one(stmt).await?.is_some(), "missing table {table}");
    }
    Ok(())
}
