//! PostgreSQL integration tests
//!
//! These tests use a shared PostgreSQL container and need a Docker daemon.
//! Each test works on its own uniquely-coded notes, so they can run in
//! parallel against the same database. Run with:
//!
//! ```bash
//! cargo test -p note-store --test postgres_integration -- --ignored
//! ```

use std::sync::Arc;

use chrono::NaiveDate;
use model::{DeliveryNote, DeliveryState, NewDeliveryItem, NewDeliveryNote, NoteId};
use note_store::{NoteStore, PostgresNoteStore, StoreError};
use rust_decimal::Decimal;
use testcontainers::{ContainerAsync, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

/// Shared container info - container stays alive for all tests
struct ContainerInfo {
    #[allow(dead_code)] // Container must stay alive for tests
    container: ContainerAsync<Postgres>,
    connection_string: String,
}

/// Global shared container
static CONTAINER: OnceCell<Arc<ContainerInfo>> = OnceCell::const_new();

async fn get_container_info() -> Arc<ContainerInfo> {
    CONTAINER
        .get_or_init(|| async {
            let container = Postgres::default().start().await.unwrap();

            let host = container.get_host().await.unwrap();
            let port = container.get_host_port_ipv4(5432).await.unwrap();

            let connection_string =
                format!("postgres://postgres:postgres@{}:{}/postgres", host, port);

            // Migrations run once through the embedded migrator
            let store = PostgresNoteStore::connect(&connection_string, 1)
                .await
                .unwrap();
            store.run_migrations().await.unwrap();
            store.pool().close().await;

            Arc::new(ContainerInfo {
                container,
                connection_string,
            })
        })
        .await
        .clone()
}

/// Get a fresh store with its own pool
async fn get_test_store() -> PostgresNoteStore {
    let info = get_container_info().await;
    PostgresNoteStore::connect(&info.connection_string, 5)
        .await
        .unwrap()
}

fn unique_code(prefix: &str) -> String {
    format!("{prefix}-{}", &NoteId::new().to_string()[..8])
}

fn create_test_note(code: &str, items: usize) -> DeliveryNote {
    let mut input = NewDeliveryNote::new(
        code,
        10,
        20,
        "Main Square Site",
        NaiveDate::from_ymd_opt(2025, 9, 26).unwrap(),
    )
    .with_notes("Unloaded at gate B");
    for i in 0..items {
        input = input.with_item(NewDeliveryItem::new(
            format!("Concrete H25 batch {i}"),
            Decimal::new(35, 1),
            "m3",
            Decimal::new(9500, 2),
        ));
    }
    DeliveryNote::draft(input).unwrap()
}

async fn item_rows_for(store: &PostgresNoteStore, id: NoteId) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM delivery_items WHERE delivery_note_id = $1")
        .bind(id.as_uuid())
        .fetch_one(store.pool())
        .await
        .unwrap()
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn save_and_get_roundtrip() {
    let store = get_test_store().await;
    let note = create_test_note(&unique_code("DN"), 3);

    store.save(&note).await.unwrap();

    let loaded = store.get(note.id()).await.unwrap().unwrap();
    assert_eq!(loaded, note);
    assert_eq!(loaded.state(), DeliveryState::Draft);
    assert_eq!(loaded.notes(), Some("Unloaded at gate B"));
    // Item order survives storage
    let descriptions: Vec<_> = loaded.items().iter().map(|i| i.description.as_str()).collect();
    assert_eq!(
        descriptions,
        vec![
            "Concrete H25 batch 0",
            "Concrete H25 batch 1",
            "Concrete H25 batch 2"
        ]
    );
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn save_note_without_items() {
    let store = get_test_store().await;
    let note = create_test_note(&unique_code("DN"), 0);

    store.save(&note).await.unwrap();

    let loaded = store.get(note.id()).await.unwrap().unwrap();
    assert!(loaded.items().is_empty());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn get_missing_note_returns_none() {
    let store = get_test_store().await;
    assert!(store.get(NoteId::new()).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn duplicate_code_is_rejected_without_side_effects() {
    let store = get_test_store().await;
    let code = unique_code("DUP");
    let first = create_test_note(&code, 1);
    store.save(&first).await.unwrap();

    let second = create_test_note(&code, 2);
    let result = store.save(&second).await;

    assert!(matches!(result, Err(StoreError::DuplicateCode(ref c)) if *c == code));
    assert!(store.get(second.id()).await.unwrap().is_none());
    assert_eq!(item_rows_for(&store, second.id()).await, 0);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn save_updates_state_in_place() {
    let store = get_test_store().await;
    let mut note = create_test_note(&unique_code("DN"), 2);
    store.save(&note).await.unwrap();

    note.send().unwrap();
    store.save(&note).await.unwrap();

    let loaded = store.get(note.id()).await.unwrap().unwrap();
    assert_eq!(loaded.state(), DeliveryState::PendingSign);
    assert_eq!(loaded.items().len(), 2);
    assert_eq!(item_rows_for(&store, note.id()).await, 2);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn list_includes_saved_notes_with_items() {
    let store = get_test_store().await;
    let a = create_test_note(&unique_code("LIST-A"), 1);
    let b = create_test_note(&unique_code("LIST-B"), 2);
    store.save(&a).await.unwrap();
    store.save(&b).await.unwrap();

    let notes = store.list().await.unwrap();

    let found_a = notes.iter().find(|n| n.id() == a.id()).unwrap();
    let found_b = notes.iter().find(|n| n.id() == b.id()).unwrap();
    assert_eq!(found_a, &a);
    assert_eq!(found_b.items().len(), 2);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn deleting_a_note_cascades_to_items() {
    let store = get_test_store().await;
    let note = create_test_note(&unique_code("CASCADE"), 3);
    store.save(&note).await.unwrap();
    assert_eq!(item_rows_for(&store, note.id()).await, 3);

    sqlx::query("DELETE FROM delivery_notes WHERE id = $1")
        .bind(note.id().as_uuid())
        .execute(store.pool())
        .await
        .unwrap();

    assert!(store.get(note.id()).await.unwrap().is_none());
    assert_eq!(item_rows_for(&store, note.id()).await, 0);
}
