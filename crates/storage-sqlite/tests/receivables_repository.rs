use std::sync::Arc;

use receivables_core::dates::RawDate;
use receivables_core::metrics::BalanceValue;
use receivables_core::receivables::{
    NewReceivable, ReceivablePatch, ReceivableRepositoryTrait,
};
use receivables_storage_sqlite::{
    create_pool, init, run_migrations, spawn_writer, ReceivableRepository,
};
use tempfile::TempDir;

fn setup() -> (TempDir, ReceivableRepository) {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("db").join("receivables.db");
    let db_path = init(db_path.to_str().unwrap()).unwrap();
    let pool = create_pool(&db_path).unwrap();
    run_migrations(&pool).unwrap();
    let writer = spawn_writer(pool.as_ref().clone());
    (dir, ReceivableRepository::new(Arc::clone(&pool), writer))
}

fn invoice(num: Option<&str>, customer: &str, due: &str, balance: &str) -> NewReceivable {
    NewReceivable {
        id: num.map(str::to_string),
        document_number: num.map(str::to_string),
        customer_name: customer.to_string(),
        due_date: Some(RawDate::from(due)),
        open_balance: Some(BalanceValue::from(balance)),
        transaction_type: Some("Invoice".to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_upsert_and_list() {
    let (_dir, repository) = setup();
    let written = repository
        .upsert_many(vec![
            invoice(Some("1001"), "Baker Inc", "05/31/2025", "1,000.50"),
            invoice(Some("1002"), "Adams Ltd", "6/15/25", "250"),
            invoice(None, "Carter Co", "2025-06-01", "75"),
        ])
        .await
        .unwrap();
    assert_eq!(written, 3);

    let records = repository.list().unwrap();
    let customers: Vec<&str> = records.iter().map(|r| r.customer_name.as_str()).collect();
    assert_eq!(customers, vec!["Adams Ltd", "Baker Inc", "Carter Co"]);
    assert!(!records[2].id.is_empty());

    let baker = repository.get_by_id("1001").unwrap();
    assert_eq!(baker.due_date, Some(RawDate::Text("05/31/2025".to_string())));
    assert_eq!(baker.normalized_open_balance().to_string(), "1000.50");
    assert!(!baker.follow_up);
}

#[tokio::test]
async fn test_update_persists_workflow_fields() {
    let (_dir, repository) = setup();
    repository
        .upsert_many(vec![invoice(Some("1001"), "Baker Inc", "05/31/2025", "100")])
        .await
        .unwrap();

    let patch = ReceivablePatch {
        action_taken: Some(Some("Called".to_string())),
        escalation: Some(true),
        ..Default::default()
    };
    let updated = repository.update("1001", patch).await.unwrap();
    assert_eq!(updated.action_taken.as_deref(), Some("Called"));
    assert!(updated.escalation);
    assert!(!updated.slack_updated);
    assert_eq!(repository.get_by_id("1001").unwrap(), updated);

    let cleared = repository
        .update(
            "1001",
            ReceivablePatch {
                action_taken: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(cleared.action_taken, None);
    assert!(cleared.escalation);
}

#[tokio::test]
async fn test_reimport_keeps_workflow_fields() {
    let (_dir, repository) = setup();
    repository
        .upsert_many(vec![invoice(Some("1001"), "Baker Inc", "05/31/2025", "100")])
        .await
        .unwrap();
    repository
        .update(
            "1001",
            ReceivablePatch {
                follow_up: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    repository
        .upsert_many(vec![invoice(Some("1001"), "Baker Inc", "05/31/2025", "40")])
        .await
        .unwrap();

    let record = repository.get_by_id("1001").unwrap();
    assert!(record.follow_up);
    assert_eq!(record.open_balance, Some(BalanceValue::Text("40".to_string())));
    assert_eq!(repository.list().unwrap().len(), 1);
}

#[tokio::test]
async fn test_missing_id_is_not_found() {
    let (_dir, repository) = setup();
    let err = repository
        .update(
            "missing",
            ReceivablePatch {
                follow_up: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert!(repository.get_by_id("missing").unwrap_err().is_not_found());
}
