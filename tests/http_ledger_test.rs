//! HTTP ledger client against a mock server

use donor_dashboard::{
    Dashboard, DashboardConfig, FetchError, LedgerConfig, LedgerHttpClient, LedgerService,
    ViewModel, WalletIdentity,
};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn ledger_config(base_url: String) -> LedgerConfig {
    LedgerConfig {
        base_url,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_fetches_bare_history() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/donations/0xA"))
        .and(header("authorization", "Bearer secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "c1", "project_id": "p1", "amount": "2500000000"},
            {"id": "c2", "project_id": "p2", "amount": 1000000000u64}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = LedgerHttpClient::new(LedgerConfig {
        api_key: Some("secret".into()),
        ..ledger_config(server.uri())
    })
    .unwrap();

    let records = client.get_donation_history("0xA").await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].certificate_id, "c1");
    assert_eq!(records[1].raw_amount, "1000000000");
}

#[tokio::test]
async fn test_fetches_enveloped_history() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/donations/0xA"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "message": "success",
            "data": [{"id": "c1", "project_id": "p1", "amount": "5"}],
            "request_id": "req-42"
        })))
        .mount(&server)
        .await;

    let client = LedgerHttpClient::new(ledger_config(server.uri())).unwrap();
    let records = client.get_donation_history("0xA").await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].raw_amount, "5");
}

#[tokio::test]
async fn test_service_error_carries_backend_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({
            "code": 503,
            "message": "ledger unavailable",
            "details": "rpc timeout"
        })))
        .mount(&server)
        .await;

    let client = LedgerHttpClient::new(ledger_config(server.uri())).unwrap();
    let err = client.get_donation_history("0xA").await.unwrap_err();

    assert_eq!(
        err,
        FetchError::Service {
            status: 503,
            message: "ledger unavailable: rpc timeout".into()
        }
    );
    assert!(err.is_transient());
}

#[tokio::test]
async fn test_missing_amount_is_malformed_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"id": "c1", "project_id": "p1"}])),
        )
        .mount(&server)
        .await;

    let client = LedgerHttpClient::new(ledger_config(server.uri())).unwrap();
    let err = client.get_donation_history("0xA").await.unwrap_err();
    assert!(matches!(err, FetchError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_unrecognised_object_is_malformed_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"unexpected": "shape"})))
        .mount(&server)
        .await;

    let client = LedgerHttpClient::new(ledger_config(server.uri())).unwrap();
    let err = client.get_donation_history("0xA").await.unwrap_err();
    assert!(matches!(err, FetchError::MalformedResponse(_)), "got {:?}", err);

    let config = DashboardConfig {
        ledger: ledger_config(server.uri()),
        ..Default::default()
    };
    let dashboard = Dashboard::new(LedgerHttpClient::new(config.ledger.clone()).unwrap(), config);
    dashboard.identity_changed(WalletIdentity::connected("0xA")).await;
    assert!(matches!(dashboard.view().await, ViewModel::Failed { .. }));
}

#[tokio::test]
async fn test_unreachable_ledger_is_transport_error() {
    let client = LedgerHttpClient::new(ledger_config("http://127.0.0.1:1".into())).unwrap();
    let err = client.get_donation_history("0xA").await.unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_dashboard_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/donations/0xA"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "0x9f3c2b1a00d4e5f6", "project_id": "0x11aa22bb33cc44dd", "amount": "2500000000"}
        ])))
        .mount(&server)
        .await;

    let config = DashboardConfig {
        ledger: ledger_config(server.uri()),
        ..Default::default()
    };
    let client = LedgerHttpClient::new(config.ledger.clone()).unwrap();
    let dashboard = Dashboard::new(client, config);

    dashboard.identity_changed(WalletIdentity::connected("0xA")).await;

    match dashboard.view().await {
        ViewModel::Populated(view) => {
            assert_eq!(view.rows[0].certificate_id_short, "0x9f3c2b1a00...");
            assert_eq!(view.rows[0].project_id, "0x11aa22bb33cc44dd");
            assert_eq!(view.rows[0].amount_display, "2.5000 SUI");
            assert_eq!(view.summary.total_display, "2.50 SUI");
        }
        other => panic!("unexpected view: {:?}", other),
    }
}
