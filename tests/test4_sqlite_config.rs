#![cfg(feature = "sqlite")]

use sql_connector::prelude::*;
use tempfile::tempdir;

#[tokio::test]
async fn file_database_survives_reconnect() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("connector.db");
    let raw = format!(
        r#"{{"backend": "sqlite", "db_path": {}}}"#,
        serde_json::to_string(&path.to_string_lossy())?
    );
    let config: ConnectionConfig = serde_json::from_str(&raw)?;

    {
        let mut db = Connector::connect(&config).await?;
        db.prepare("CREATE TABLE notes (id INTEGER PRIMARY KEY, body TEXT)", ())
            .modify()
            .await?;
        db.quick_insert("notes", &Payload::new().with("body", "kept"))
            .await?;
    }

    let mut db = Connector::sqlite_builder(path.to_string_lossy())
        .build()
        .await?;
    let body = db
        .prepare("SELECT body FROM notes WHERE id = :id", Params::new().with_value("id", 1))
        .query()
        .await?;
    assert_eq!(body, Some(RowValues::Text("kept".into())));
    Ok(())
}

#[tokio::test]
async fn in_memory_databases_are_private_to_their_connector() -> Result<(), Box<dyn std::error::Error>>
{
    let mut first = Connector::connect_sqlite(SqliteOptions::in_memory()).await?;
    first
        .prepare("CREATE TABLE t (id INTEGER PRIMARY KEY)", ())
        .modify()
        .await?;

    let mut second = Connector::connect_sqlite(SqliteOptions::in_memory()).await?;
    let err = second.delete("t", 1).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Schema);
    Ok(())
}
