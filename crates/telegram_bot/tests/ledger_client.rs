use std::time::Duration;

use api_types::{TransactionKind, analysis::Period, transaction::FieldValue};
use serde_json::json;
use telegram_bot::api::{ApiError, LedgerClient};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const OWNER: u64 = 42;

async fn client(server: &MockServer) -> LedgerClient {
    LedgerClient::new(
        &format!("{}/exec", server.uri()),
        OWNER,
        Duration::from_secs(5),
    )
    .unwrap()
}

#[tokio::test]
async fn summary_posts_command_with_owner_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/exec"))
        .and(body_partial_json(json!({"cmd": "summary_month", "user_id": OWNER})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "data": {
                "month_label": "Октябрь 2026",
                "expenses": 1200.5,
                "incomes": 50000,
                "balance": 48799.5,
                "initial_balance": 1000,
                "current_balance": 49799.5
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let summary = client(&server).await.summary_month().await.unwrap();
    assert_eq!(summary.month_label, "Октябрь 2026");
    assert_eq!(summary.expenses, 1200.5);
    assert_eq!(summary.current_balance, 49799.5);
}

#[tokio::test]
async fn failed_envelope_becomes_ledger_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"ok": false, "error": "Sheet locked"})),
        )
        .mount(&server)
        .await;

    let err = client(&server).await.set_balance(100.0).await.unwrap_err();
    assert!(matches!(err, ApiError::Ledger(message) if message == "Sheet locked"));
}

#[tokio::test]
async fn failed_envelope_without_message_uses_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": false})))
        .mount(&server)
        .await;

    let err = client(&server).await.delete_transaction(5).await.unwrap_err();
    assert!(matches!(err, ApiError::Ledger(message) if message == "GAS error"));
}

#[tokio::test]
async fn html_body_is_reported_as_non_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>Authorization needed</html>"))
        .mount(&server)
        .await;

    let err = client(&server).await.summary_month().await.unwrap_err();
    assert!(matches!(err, ApiError::NonJson { body } if body.contains("Authorization")));
}

#[tokio::test]
async fn recent_transactions_tolerate_null_data() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"cmd": "get_recent_transactions", "limit": 10})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true, "data": null})))
        .mount(&server)
        .await;

    let recent = client(&server).await.recent_transactions(10).await.unwrap();
    assert!(recent.transactions.is_empty());
}

#[tokio::test]
async fn recent_transactions_are_decoded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "data": {"transactions": [{
                "row_id": 17,
                "date": "2026-10-18T09:30:00.000Z",
                "type": "доход",
                "category": "Зарплата",
                "amount": 50000,
                "comment": ""
            }]}
        })))
        .mount(&server)
        .await;

    let recent = client(&server).await.recent_transactions(10).await.unwrap();
    assert_eq!(recent.transactions.len(), 1);
    let row = &recent.transactions[0];
    assert_eq!(row.row_id, 17);
    assert_eq!(row.kind, TransactionKind::Income);
    assert_eq!(row.subcategory, None);
}

#[tokio::test]
async fn numeric_comment_cell_does_not_break_the_list() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "data": {"transactions": [
                {
                    "row_id": 20,
                    "date": "2026-10-18 12:00:00",
                    "type": "расход",
                    "category": "Дом",
                    "subcategory": "Мебель",
                    "amount": 15000,
                    "comment": "диван"
                },
                {
                    "row_id": 21,
                    "date": "2026-10-18 13:00:00",
                    "type": "расход",
                    "category": "Еда",
                    "subcategory": "Продукты",
                    "amount": 500,
                    "comment": 500
                }
            ]}
        })))
        .mount(&server)
        .await;

    let recent = client(&server).await.recent_transactions(10).await.unwrap();
    let comments: Vec<_> = recent
        .transactions
        .iter()
        .map(|row| row.comment.as_deref())
        .collect();
    assert_eq!(comments, vec![Some("диван"), Some("500")]);
}

#[tokio::test]
async fn update_picks_field_from_value() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "cmd": "update_transaction",
            "row_id": 9,
            "field": "amount",
            "value": 250.0
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "cmd": "update_transaction",
            "row_id": 9,
            "field": "comment",
            "value": "обед"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let ledger = client(&server).await;
    ledger
        .update_transaction(9, FieldValue::Amount(250.0))
        .await
        .unwrap();
    ledger
        .update_transaction(9, FieldValue::Text("обед".to_string()))
        .await
        .unwrap();
}

#[tokio::test]
async fn analysis_without_data_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"cmd": "analysis", "kind": "расход", "period": "month"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&server)
        .await;

    let err = client(&server)
        .await
        .analysis(TransactionKind::Expense, Period::Month)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Ledger(_)));
}
