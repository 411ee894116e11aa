use chrono::{TimeZone, Utc};
use ethernity_core::traits::ExplorerProvider;
use ethernity_core::utils::hex_to_address;
use ethernity_core::Error;
use ethernity_explorer::{fetch_wallet_data, BlockscoutClient, ExplorerConfig};
use ethernity_reputation::ReputationEngine;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const WALLET: &str = "0x00000000000000000000000000000000000000aa";
const ROUTER: &str = "0x7a250d5630b4cf539739df2c5dacb4c659f2488d";

fn client_for(server: &MockServer) -> BlockscoutClient {
    BlockscoutClient::new(ExplorerConfig::with_base_url(format!("{}/api/v2", server.uri()))).unwrap()
}

fn endpoint(suffix: &str) -> String {
    format!("/api/v2/addresses/{}{}", WALLET, suffix)
}

async fn mount_json(server: &MockServer, suffix: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(endpoint(suffix)))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn comprehensive_fetch_feeds_the_engine() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "",
        json!({ "hash": WALLET, "coin_balance": "2000000000000000000", "is_contract": false }),
    )
    .await;
    Mock::given(method("GET"))
        .and(path(endpoint("/transactions")))
        .and(query_param("limit", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {
                    "hash": "0x5c504ed432cb51138bcf09aa5e8a410dd4a1e204ef84bfed1be16dfba1b22060",
                    "to": { "hash": ROUTER, "is_contract": true, "is_verified": true },
                    "value": "500000000000000000",
                    "timestamp": "2024-05-28T09:00:00.000000Z"
                },
                {
                    "to": { "hash": ROUTER, "is_contract": true, "is_verified": true },
                    "value": "700000000000000000",
                    "timestamp": "2024-05-29T09:00:00.000000Z"
                }
            ],
            "next_page_params": null
        })))
        .mount(&server)
        .await;
    mount_json(&server, "/tokens", json!({ "items": [{ "token": { "address": ROUTER }, "value": "1" }] })).await;
    mount_json(&server, "/internal-transactions", json!({ "items": [] })).await;
    mount_json(&server, "/token-transfers", json!({ "items": [] })).await;
    mount_json(&server, "/coin-balance-history", json!({ "items": [] })).await;
    mount_json(&server, "/counters", json!({ "transactions_count": "2", "gas_usage_count": "42000" })).await;

    let data = client_for(&server).fetch_wallet_data(WALLET).await.unwrap();
    assert!(data.failed_sources.is_empty());
    assert_eq!(data.address, hex_to_address(WALLET).unwrap());
    assert_eq!(data.transactions.len(), 2);
    assert_eq!(data.tokens.len(), 1);

    let as_of = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
    let result = ReputationEngine::shared().compute_at(&data.into_input(), as_of);
    let verified = format!("Interaction with verified contract: {}", ROUTER);
    assert_eq!(result.merits().iter().filter(|m| **m == verified).count(), 2);
    assert!(result.merits().contains(&"Highly efficient gas usage".to_string()));
    assert_eq!(result.unique_contract_count(), 1);
}

#[tokio::test]
async fn failing_endpoints_yield_empty_collections() {
    let server = MockServer::start().await;
    mount_json(&server, "", json!({ "hash": WALLET, "coin_balance": "0" })).await;
    mount_json(&server, "/transactions", json!({ "items": [] })).await;
    Mock::given(method("GET"))
        .and(path(endpoint("/tokens")))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(endpoint("/counters")))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;
    // demais endpoints sem mock respondem 404

    let data = fetch_wallet_data(&client_for(&server), WALLET).await.unwrap();
    assert!(data.wallet.is_some());
    assert!(data.tokens.is_empty());
    assert!(data.internal_transactions.is_empty());
    assert!(data.balance_history.is_empty());
    assert!(data.counters.is_none());
    assert_eq!(
        data.failed_sources,
        vec!["tokens", "internal_transactions", "token_transfers", "balance_history", "counters"]
    );
}

#[tokio::test]
async fn missing_wallet_summary_scores_default() {
    let server = MockServer::start().await;
    mount_json(&server, "/transactions", json!({ "items": [] })).await;

    let data = client_for(&server).fetch_wallet_data(WALLET).await.unwrap();
    assert!(data.wallet.is_none());

    let result = ReputationEngine::shared().compute(&data.into_input());
    assert_eq!(result.score, 30);
    assert_eq!(result.grade.as_str(), "D");
}

#[tokio::test]
async fn http_and_decode_errors_are_typed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(endpoint("/transactions")))
        .respond_with(ResponseTemplate::new(200).set_body_string("{ not json"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(endpoint("/counters")))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let address = hex_to_address(WALLET).unwrap();

    let err = client.get_transactions(address, 10).await.unwrap_err();
    assert!(matches!(err, Error::DecodeError(_)), "{:?}", err);

    let err = client.get_counters(address).await.unwrap_err();
    assert!(matches!(err, Error::RpcError(_)), "{:?}", err);
}

#[tokio::test]
async fn repeated_requests_are_served_from_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(endpoint("")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "hash": WALLET })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let address = hex_to_address(WALLET).unwrap();
    let first = client.get_wallet_info(address).await.unwrap();
    let second = client.get_wallet_info(address).await.unwrap();
    assert_eq!(first, second);

    let stats = client.cache_stats();
    assert_eq!(stats.total_entries, 1);
    assert_eq!((stats.hits, stats.misses), (1, 1));

    client.clear_cache();
    assert_eq!(client.cache_stats().total_entries, 0);
}

#[tokio::test]
async fn transaction_details_use_hash_path() {
    let server = MockServer::start().await;
    let hash = "0x5c504ed432cb51138bcf09aa5e8a410dd4a1e204ef84bfed1be16dfba1b22060";
    Mock::given(method("GET"))
        .and(path(format!("/api/v2/transactions/{}", hash)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "hash": hash, "status": "ok" })))
        .mount(&server)
        .await;

    let tx_hash = ethernity_core::utils::hex_to_h256(hash).unwrap();
    let body = client_for(&server).get_transaction(tx_hash).await.unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn invalid_address_is_rejected_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_wallet_data("0x1234").await.unwrap_err();
    assert!(matches!(err, Error::ValidationError(_)));
}
