//! End-to-end invocation through the gateway against a seeded SQLite file

use std::sync::Arc;
use std::time::Duration;

use agent_core::{
    FailureKind, GatewayConfig, InvocationGateway, InvocationOutcome, InvocationRequest, render,
};
use corporate_data::{SqliteStore, StoreConfig, build_registry};
use serde_json::json;
use tempfile::TempDir;

fn store_config(dir: &TempDir) -> StoreConfig {
    StoreConfig {
        path: dir.path().join("corporate.db"),
        max_results: 50,
        busy_timeout: Duration::from_secs(1),
    }
}

fn gateway_over(store: SqliteStore) -> InvocationGateway {
    let registry = build_registry(Arc::new(store)).unwrap();
    InvocationGateway::new(Arc::new(registry), GatewayConfig::default())
}

async fn seeded_gateway() -> (TempDir, InvocationGateway) {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteStore::initialize(&store_config(&dir)).await.unwrap();
    (dir, gateway_over(store))
}

#[tokio::test]
async fn employees_in_engineering() {
    let (_dir, gateway) = seeded_gateway().await;

    let outcome = gateway
        .invoke(&InvocationRequest::new("query_employees").arg("query", "Engineering"))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        InvocationOutcome::Found {
            count: 2,
            truncated: false,
            payload: json!([
                {"id": 1, "name": "John Doe", "department": "Engineering", "email": "john@company.com"},
                {"id": 3, "name": "Bob Wilson", "department": "Engineering", "email": "bob@company.com"},
            ]),
        }
    );
}

#[tokio::test]
async fn sales_department_stats() {
    let (_dir, gateway) = seeded_gateway().await;

    let outcome = gateway
        .invoke(&InvocationRequest::new("get_department_stats").arg("department", "Sales"))
        .await
        .unwrap();

    let InvocationOutcome::Found { payload, .. } = outcome else {
        panic!("expected stats");
    };
    assert_eq!(payload, json!({"department": "Sales", "employee_count": 1}));
    // field order is part of the contract
    assert_eq!(
        payload.to_string(),
        r#"{"department":"Sales","employee_count":1}"#
    );
}

#[tokio::test]
async fn document_search_without_matches() {
    let (_dir, gateway) = seeded_gateway().await;

    let outcome = gateway
        .invoke(&InvocationRequest::new("search_documents").arg("query", "nonexistent"))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        InvocationOutcome::NoRecords {
            message: "No documents found matching 'nonexistent'".into(),
        }
    );
}

#[tokio::test]
async fn employee_search_without_matches() {
    let (_dir, gateway) = seeded_gateway().await;

    let outcome = gateway
        .invoke(&InvocationRequest::new("query_employees").arg("query", "Nobody"))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        InvocationOutcome::NoRecords {
            message: "No employees found matching 'Nobody'".into(),
        }
    );
}

#[tokio::test]
async fn mutating_tool_is_unknown() {
    let (dir, gateway) = seeded_gateway().await;

    let failure = gateway
        .invoke(&InvocationRequest::new("delete_employee").arg("id", 1))
        .await
        .unwrap_err();
    assert_eq!(failure.kind, FailureKind::UnknownTool);

    // nothing was removed
    let store = SqliteStore::new(&store_config(&dir)).unwrap();
    let gateway = gateway_over(store);
    let outcome = gateway
        .invoke(&InvocationRequest::new("query_employees").arg("query", ""))
        .await
        .unwrap();
    assert!(matches!(outcome, InvocationOutcome::Found { count: 3, .. }));
}

#[tokio::test]
async fn missing_argument_is_a_schema_violation() {
    let (_dir, gateway) = seeded_gateway().await;

    let failure = gateway
        .invoke(&InvocationRequest::new("search_documents"))
        .await
        .unwrap_err();

    assert_eq!(failure.kind, FailureKind::SchemaViolation);
    assert_eq!(failure.field.as_deref(), Some("query"));
}

#[tokio::test]
async fn wrongly_typed_argument_is_a_schema_violation() {
    let (_dir, gateway) = seeded_gateway().await;

    let failure = gateway
        .invoke(&InvocationRequest::new("get_department_stats").arg("department", 7))
        .await
        .unwrap_err();

    assert_eq!(failure.kind, FailureKind::SchemaViolation);
    assert_eq!(failure.field.as_deref(), Some("department"));
}

#[tokio::test]
async fn repeated_invocation_is_identical() {
    let (_dir, gateway) = seeded_gateway().await;
    let request = InvocationRequest::new("search_documents").arg("query", "policy");

    let first = gateway.invoke(&request).await;
    let second = gateway.invoke(&request).await;

    assert!(first.is_ok());
    assert_eq!(first, second);
}

#[tokio::test]
async fn empty_query_returns_every_row() {
    let (_dir, gateway) = seeded_gateway().await;

    for tool in ["query_employees", "search_documents"] {
        let outcome = gateway
            .invoke(&InvocationRequest::new(tool).arg("query", ""))
            .await
            .unwrap();
        assert!(
            matches!(outcome, InvocationOutcome::Found { count: 3, .. }),
            "{tool}: {outcome:?}"
        );
    }
}

#[tokio::test]
async fn descriptors_are_stable() {
    let (_dir, gateway) = seeded_gateway().await;

    let names: Vec<_> = gateway.descriptors().into_iter().map(|d| d.name).collect();
    assert_eq!(
        names,
        vec!["query_employees", "get_department_stats", "search_documents"]
    );
    assert_eq!(gateway.descriptors(), gateway.descriptors());
}

#[tokio::test]
async fn concurrent_invocations_are_independent() {
    let (_dir, gateway) = seeded_gateway().await;
    let gateway = Arc::new(gateway);

    let mut handles = Vec::new();
    for _ in 0..8 {
        let gateway = Arc::clone(&gateway);
        handles.push(tokio::spawn(async move {
            gateway
                .invoke(&InvocationRequest::new("get_department_stats").arg("department", "Engineering"))
                .await
        }));
    }

    for handle in handles {
        let outcome = handle.await.unwrap().unwrap();
        assert_eq!(
            outcome,
            InvocationOutcome::Found {
                count: 1,
                truncated: false,
                payload: json!({"department": "Engineering", "employee_count": 2}),
            }
        );
    }
}

#[tokio::test]
async fn capped_lookup_reports_truncation() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig {
        max_results: 2,
        ..store_config(&dir)
    };
    let gateway = gateway_over(SqliteStore::initialize(&config).await.unwrap());

    let result = gateway
        .invoke(&InvocationRequest::new("query_employees").arg("query", ""))
        .await;
    let Ok(InvocationOutcome::Found {
        count,
        truncated,
        payload,
    }) = &result
    else {
        panic!("expected employees, got {result:?}");
    };
    assert_eq!(*count, 2);
    assert!(*truncated);
    assert_eq!(payload[1]["name"], "Jane Smith");
    assert!(render(&result).contains("more records exist"));

    // two matches under a cap of two is a complete answer
    let outcome = gateway
        .invoke(&InvocationRequest::new("query_employees").arg("query", "Engineering"))
        .await
        .unwrap();
    assert!(matches!(
        outcome,
        InvocationOutcome::Found {
            count: 2,
            truncated: false,
            ..
        }
    ));
}

#[tokio::test]
async fn missing_database_is_store_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let gateway = gateway_over(SqliteStore::new(&store_config(&dir)).unwrap());

    let failure = gateway
        .invoke(&InvocationRequest::new("query_employees").arg("query", "John"))
        .await
        .unwrap_err();

    assert_eq!(failure.kind, FailureKind::StoreUnavailable);
}

#[tokio::test]
async fn corrupt_database_is_store_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let config = store_config(&dir);
    std::fs::write(&config.path, vec![b'x'; 4096]).unwrap();
    let gateway = gateway_over(SqliteStore::new(&config).unwrap());

    let failure = gateway
        .invoke(&InvocationRequest::new("search_documents").arg("query", "sales"))
        .await
        .unwrap_err();

    assert_eq!(failure.kind, FailureKind::StoreUnavailable);
}
