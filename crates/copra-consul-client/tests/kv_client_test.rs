// Wire-level tests for the Consul KV client against a mock Consul agent

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use wiremock::matchers::{body_string, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use copra_consul_client::{ConsulClientConfig, ConsulClientFactory, KvError};

// Template mapping each setup to a path prefix on the mock server
fn factory_for(server: &MockServer) -> ConsulClientFactory {
    let template = format!("{}/{{setup}}", server.uri());
    ConsulClientFactory::new(ConsulClientConfig::new(&template).with_probe_timeout(1000))
        .expect("factory")
}

#[tokio::test]
async fn validate_setup_probes_management_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/prod/ui/dc1/kv"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let factory = factory_for(&server);
    assert!(factory.setup_client("prod").validate_setup().await);
    assert!(!factory.setup_client("stage").validate_setup().await);
}

#[tokio::test]
async fn validate_setup_is_false_when_unreachable() {
    let factory =
        ConsulClientFactory::new(ConsulClientConfig::new("http://127.0.0.1:1/{setup}"))
            .expect("factory");
    assert!(!factory.setup_client("prod").validate_setup().await);
}

#[tokio::test]
async fn list_services_extracts_second_segment_in_first_seen_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/prod/v1/kv/config/"))
        .and(query_param("keys", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![
            "config/auth/timeout",
            "config/",
            "config/billing/rate",
            "config/auth/retries",
            "other/ignored/key",
        ]))
        .mount(&server)
        .await;

    let factory = factory_for(&server);
    let services = factory.setup_client("prod").list_services().await.unwrap();
    assert_eq!(services, vec!["auth", "billing"]);
}

#[tokio::test]
async fn list_services_treats_404_as_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/prod/v1/kv/config/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let factory = factory_for(&server);
    let services = factory.setup_client("prod").list_services().await.unwrap();
    assert!(services.is_empty());
}

#[tokio::test]
async fn list_services_surfaces_transport_failure_as_unreachable() {
    let factory =
        ConsulClientFactory::new(ConsulClientConfig::new("http://127.0.0.1:1/{setup}"))
            .expect("factory");
    let err = factory
        .setup_client("prod")
        .list_services()
        .await
        .unwrap_err();
    assert!(matches!(err, KvError::Unreachable { ref setup, .. } if setup == "prod"));
}

#[tokio::test]
async fn get_all_keys_decodes_values_and_drops_empty_keys() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/prod/v1/kv/config/auth"))
        .and(query_param("recurse", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "Key": "config/auth/timeout", "Value": BASE64.encode("30") },
            { "Key": "config/auth/", "Value": null },
            { "Key": "config/auth/flag", "Value": null },
            { "Key": "config/auth/nested/retries", "Value": BASE64.encode("3") },
        ])))
        .mount(&server)
        .await;

    let factory = factory_for(&server);
    let properties = factory.client("prod", "auth").get_all_keys().await.unwrap();

    assert_eq!(properties.len(), 3);
    assert_eq!(properties["timeout"], "30");
    assert_eq!(properties["flag"], "");
    assert_eq!(properties["retries"], "3");
    assert!(!properties.contains_key(""));
}

#[tokio::test]
async fn get_all_keys_treats_404_as_empty_map() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/prod/v1/kv/config/ghost"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let factory = factory_for(&server);
    let properties = factory
        .client("prod", "ghost")
        .get_all_keys()
        .await
        .unwrap();
    assert!(properties.is_empty());
}

#[tokio::test]
async fn get_all_keys_rejects_undecodable_values() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/prod/v1/kv/config/auth"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "Key": "config/auth/bad", "Value": "%%%not-base64%%%" },
        ])))
        .mount(&server)
        .await;

    let factory = factory_for(&server);
    let err = factory
        .client("prod", "auth")
        .get_all_keys()
        .await
        .unwrap_err();
    assert!(matches!(err, KvError::Decode { ref key, .. } if key == "config/auth/bad"));
}

#[tokio::test]
async fn set_key_value_puts_raw_body() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/stage/v1/kv/config/auth/timeout"))
        .and(body_string("60"))
        .respond_with(ResponseTemplate::new(200).set_body_json(true))
        .expect(1)
        .mount(&server)
        .await;

    let factory = factory_for(&server);
    factory
        .client("stage", "auth")
        .set_key_value("timeout", "60")
        .await
        .unwrap();
}

#[tokio::test]
async fn set_key_value_reports_store_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/stage/v1/kv/config/auth/timeout"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let factory = factory_for(&server);
    let err = factory
        .client("stage", "auth")
        .set_key_value("timeout", "60")
        .await
        .unwrap_err();
    assert!(matches!(err, KvError::Api { status: 500, .. }));
}
