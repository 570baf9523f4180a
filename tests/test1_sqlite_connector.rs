#![cfg(feature = "sqlite")]

use serde_json::json;
use sql_connector::prelude::*;

async fn users_db() -> Result<Connector, ConnectorError> {
    let mut db = Connector::connect_sqlite(SqliteOptions::in_memory()).await?;
    db.prepare(
        "CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT NOT NULL, age INTEGER)",
        (),
    )
    .modify()
    .await?;
    Ok(db)
}

fn by_id(id: i64) -> Params {
    Params::new().with_value("id", id)
}

#[tokio::test]
async fn insert_then_select_by_generated_key() -> Result<(), Box<dyn std::error::Error>> {
    let mut db = users_db().await?;

    let ann = Payload::new().with("name", "Ann").with("age", 30);
    assert!(db.quick_insert("users", &ann).await?);
    let id = db.last_insert_id().await?;
    assert_eq!(id, 1);

    let selection = db
        .prepare("SELECT * FROM users WHERE id = :id", by_id(id))
        .select()
        .await?;
    let row = selection.single().expect("one row");
    assert_eq!(row.get("name"), Some(&RowValues::Text("Ann".into())));
    assert_eq!(
        serde_json::to_value(&selection)?,
        json!({"id": 1, "name": "Ann", "age": 30})
    );
    Ok(())
}

#[tokio::test]
async fn select_shape_depends_on_row_count() -> Result<(), Box<dyn std::error::Error>> {
    let mut db = users_db().await?;
    let rows: Vec<Payload> = ["Ann", "Bob", "Cy"]
        .iter()
        .map(|name| Payload::new().with("name", *name).with("age", 40))
        .collect();
    db.bulk_insert("users", &rows).await?;

    let none = db
        .prepare("SELECT * FROM users WHERE age > :age", Params::new().with_value("age", 99))
        .select()
        .await?;
    assert_eq!(none, Selection::Empty);
    assert_eq!(serde_json::to_value(&none)?, json!([]));

    let one = db
        .prepare("SELECT name FROM users WHERE id = :id", by_id(2))
        .select()
        .await?;
    assert_eq!(serde_json::to_value(&one)?, json!({"name": "Bob"}));

    let all = db
        .prepare("SELECT name FROM users ORDER BY id", ())
        .select()
        .await?;
    assert_eq!(all.len(), 3);
    assert_eq!(
        serde_json::to_value(&all)?,
        json!([{"name": "Ann"}, {"name": "Bob"}, {"name": "Cy"}])
    );
    Ok(())
}

#[tokio::test]
async fn update_touches_only_given_columns() -> Result<(), Box<dyn std::error::Error>> {
    let mut db = users_db().await?;
    db.quick_insert("users", &Payload::new().with("name", "Ann").with("age", 30))
        .await?;

    assert!(
        db.quick_update("users", 1, &Payload::new().with("age", 31))
            .await?
    );

    let row = db
        .prepare("SELECT * FROM users WHERE id = :id", by_id(1))
        .select()
        .await?;
    assert_eq!(
        serde_json::to_value(&row)?,
        json!({"id": 1, "name": "Ann", "age": 31})
    );
    Ok(())
}

#[tokio::test]
async fn delete_removes_the_row_and_tolerates_missing_ids() -> Result<(), Box<dyn std::error::Error>>
{
    let mut db = users_db().await?;
    db.bulk_insert(
        "users",
        &[
            Payload::new().with("name", "Ann").with("age", 30),
            Payload::new().with("name", "Bob").with("age", 25),
        ],
    )
    .await?;

    assert!(db.delete("users", 1).await?);
    let gone = db
        .prepare("SELECT * FROM users WHERE id = :id", by_id(1))
        .row_count()
        .await?;
    assert_eq!(gone, 0);

    assert!(db.delete("users", 999).await?);
    let remaining = db.prepare("SELECT COUNT(*) FROM users", ()).query().await?;
    assert_eq!(remaining, Some(RowValues::Int(1)));
    Ok(())
}

#[tokio::test]
async fn row_count_keeps_the_statement_prepared() -> Result<(), Box<dyn std::error::Error>> {
    let mut db = users_db().await?;
    db.quick_insert("users", &Payload::new().with("name", "Ann").with("age", 30))
        .await?;

    db.prepare("SELECT * FROM users", ());
    assert_eq!(db.row_count().await?, 1);
    assert!(db.is_prepared());
    assert_eq!(db.row_count().await?, 1);

    let changed = db
        .prepare("UPDATE users SET age = age + 1", ())
        .row_count()
        .await?;
    assert_eq!(changed, 1);
    Ok(())
}

#[tokio::test]
async fn helpers_leave_a_pending_statement_alone() -> Result<(), Box<dyn std::error::Error>> {
    let mut db = users_db().await?;

    db.prepare("SELECT name FROM users ORDER BY id", ());
    db.quick_insert("users", &Payload::new().with("name", "Ann").with("age", 30))
        .await?;
    let _ = db.last_insert_id().await?;

    assert!(db.is_prepared());
    let names = db.select().await?;
    assert_eq!(serde_json::to_value(&names)?, json!({"name": "Ann"}));
    Ok(())
}

#[tokio::test]
async fn query_returns_none_when_nothing_matches() -> Result<(), Box<dyn std::error::Error>> {
    let mut db = users_db().await?;
    let value = db
        .prepare("SELECT name FROM users WHERE id = :id", by_id(7))
        .query()
        .await?;
    assert_eq!(value, None);
    Ok(())
}

#[tokio::test]
async fn unprepared_and_mismatched_calls_are_usage_errors() -> Result<(), Box<dyn std::error::Error>>
{
    let mut db = users_db().await?;

    assert_eq!(db.select().await.unwrap_err().kind(), ErrorKind::Usage);
    assert_eq!(db.modify().await.unwrap_err().kind(), ErrorKind::Usage);
    assert_eq!(db.query().await.unwrap_err().kind(), ErrorKind::Usage);
    assert_eq!(db.row_count().await.unwrap_err().kind(), ErrorKind::Usage);
    assert_eq!(db.m_modify().await.unwrap_err().kind(), ErrorKind::Usage);

    let err = db
        .prepare("SELECT * FROM users WHERE id = :id", Params::new().with_value("uid", 1))
        .select()
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Usage);
    assert!(!db.is_prepared());
    Ok(())
}

#[tokio::test]
async fn driver_failures_keep_their_message() -> Result<(), Box<dyn std::error::Error>> {
    let mut db = users_db().await?;
    let err = db
        .prepare("INSERT INTO users (nme) VALUES (:nme)", Params::new().with_value("nme", "x"))
        .modify()
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Database);
    assert!(err.to_string().contains("nme"), "{err}");
    Ok(())
}
