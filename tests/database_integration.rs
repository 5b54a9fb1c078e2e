//! Database integration tests with DuckDB
//!
//! Uses in-memory and temporary on-disk databases, so no external
//! services are needed.

use query_paginate::database::DatabaseEngine;
use query_paginate::loader::load_source_from_str;
use query_paginate::{paginate, PageNumber, PageRequest, Query};
use serde_json::json;

fn users_engine() -> DatabaseEngine {
    let engine = DatabaseEngine::open_in_memory().unwrap();
    engine
        .execute_batch(
            "CREATE TABLE users (id INTEGER, name VARCHAR, active BOOLEAN);
             INSERT INTO users VALUES
               (1, 'ada', true), (2, 'brian', false), (3, 'carla', true),
               (4, 'dmitri', true), (5, 'edsger', false), (6, 'frances', true),
               (7, 'grace', true), (8, 'hedy', false);",
        )
        .unwrap();
    engine
}

#[tokio::test]
async fn test_paginate_table() {
    let engine = users_engine();
    let query = engine.table("users").order_by("id");

    let page = paginate(query, &PageRequest::new(1, 3)).await.unwrap();

    assert_eq!(page.item_count, 8);
    assert_eq!(page.page_count, PageNumber::from(3));
    assert_eq!(page.next, Some(PageNumber::from(2)));
    assert_eq!(page.previous, None);
    assert_eq!(
        page.items,
        vec![
            json!({"id": 1, "name": "ada", "active": true}),
            json!({"id": 2, "name": "brian", "active": false}),
            json!({"id": 3, "name": "carla", "active": true}),
        ]
    );
}

#[tokio::test]
async fn test_paginate_table_last_page() {
    let engine = users_engine();
    let query = engine.table("users").order_by("id");

    let page = paginate(query, &PageRequest::new("3", "3")).await.unwrap();

    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[1]["name"], json!("hedy"));
    assert!(!page.has_next);
    assert_eq!(page.previous, Some(PageNumber::from(2)));
}

#[tokio::test]
async fn test_paginate_filtered_query() {
    let engine = users_engine();
    let query = engine
        .query("SELECT id, name FROM users WHERE active")
        .order_by("id DESC");

    let page = paginate(query, &PageRequest::new(2, 2)).await.unwrap();

    assert_eq!(page.item_count, 5);
    assert_eq!(page.page_count, PageNumber::from(3));
    assert_eq!(
        page.items,
        vec![json!({"id": 4, "name": "dmitri"}), json!({"id": 3, "name": "carla"})]
    );
}

#[tokio::test]
async fn test_paginate_missing_table_propagates_error() {
    let engine = users_engine();
    let query = engine.table("no_such_table");

    let err = paginate(query, &PageRequest::new(1, 3)).await.unwrap_err();
    assert!(err.to_string().starts_with("Database error"));
}

#[tokio::test]
async fn test_source_definition_with_setup() {
    let def = load_source_from_str(
        r"
name: squares
query: SELECT i, i * i AS square FROM range(1, 11) t(i)
order_by: i
",
    )
    .unwrap();

    let engine = DatabaseEngine::for_source(&def).unwrap();
    let query = engine.source_query(&def).unwrap();

    assert_eq!(query.count().await.unwrap(), 10);

    let page = paginate(query, &PageRequest::new(4, 3)).await.unwrap();
    assert_eq!(page.items, vec![json!({"i": 10, "square": 100})]);
    assert_eq!(page.page_count, PageNumber::from(4));
    assert!(!page.has_next);
}

#[tokio::test]
async fn test_file_database_round_trip() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("pages.duckdb");
    let location = path.to_string_lossy().to_string();

    {
        let engine = DatabaseEngine::open(&location).unwrap();
        engine
            .execute_batch(
                "CREATE TABLE items AS SELECT i AS id FROM range(25) t(i);",
            )
            .unwrap();
    }

    let engine = DatabaseEngine::open(&location).unwrap();
    assert_eq!(engine.list_tables().unwrap(), vec!["main.items".to_string()]);

    let page = paginate(engine.table("items").order_by("id"), &PageRequest::new(3, 10))
        .await
        .unwrap();

    assert_eq!(page.item_count, 25);
    assert_eq!(page.page_count, PageNumber::from(3));
    assert_eq!(page.items.len(), 5);
    assert_eq!(page.items[0], json!({"id": 20}));
}
