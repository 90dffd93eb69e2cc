use std::time::Duration;

use flag_explorer::{CountryFetcher, FetchError};
use flag_explorer_restcountries::{RestCountriesClient, UpstreamConfig};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, timeout: Duration) -> RestCountriesClient {
    RestCountriesClient::new(UpstreamConfig {
        url: format!("{}/v3.1/all", server.uri()),
        timeout,
    })
    .unwrap()
}

#[tokio::test]
async fn fetch_all_returns_records_as_sent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3.1/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "name": { "common": "Country A", "official": "Country A Official" },
                "population": 1000000,
                "capital": ["Capital A"],
                "flags": { "png": "flag-a.png", "svg": "flag-a.svg", "alt": "Flag A" },
                "cca3": "CTA"
            },
            {
                "name": { "common": "Country B", "official": "Country B Official" },
                "population": 0,
                "flags": {}
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Duration::from_secs(5));
    let records = client.fetch_all().await.unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].name.common, "Country A");
    assert_eq!(records[0].name.official, "Country A Official");
    assert_eq!(records[0].population, 1_000_000);
    assert_eq!(records[0].capital.as_deref(), Some(&["Capital A".to_owned()][..]));
    assert_eq!(records[0].flags.svg.as_deref(), Some("flag-a.svg"));
    assert_eq!(records[0].flags.png.as_deref(), Some("flag-a.png"));
    assert!(records[1].capital.is_none());
    assert!(records[1].flags.svg.is_none());
}

#[tokio::test]
async fn fetch_all_preserves_upstream_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3.1/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "name": { "common": "Zeta" }, "population": 5, "flags": { "svg": "z.svg" } },
            { "name": { "common": "Alpha" }, "population": 3, "flags": { "png": "a.png" } }
        ])))
        .mount(&server)
        .await;

    let client = client_for(&server, Duration::from_secs(5));
    let names: Vec<String> = client
        .fetch_all()
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.name.common)
        .collect();

    assert_eq!(names, vec!["Zeta", "Alpha"]);
}

#[tokio::test]
async fn empty_array_is_not_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3.1/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = client_for(&server, Duration::from_secs(5));
    let records = client.fetch_all().await.unwrap();

    assert!(records.is_empty());
}

#[tokio::test]
async fn server_error_is_a_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3.1/all"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Duration::from_secs(5));
    let err = client.fetch_all().await.unwrap_err();

    match err {
        FetchError::Transport(msg) => assert!(msg.contains("503"), "message was {msg}"),
        other => panic!("expected Transport, got {other:?}"),
    }
}

#[tokio::test]
async fn not_found_is_a_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3.1/all"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client_for(&server, Duration::from_secs(5));
    let result = client.fetch_all().await;

    assert!(matches!(result, Err(FetchError::Transport(_))));
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3.1/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": 400 })))
        .mount(&server)
        .await;

    let client = client_for(&server, Duration::from_secs(5));
    let result = client.fetch_all().await;

    assert!(matches!(result, Err(FetchError::Decode(_))));
}

#[tokio::test]
async fn slow_upstream_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3.1/all"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let client = client_for(&server, Duration::from_millis(100));
    let result = client.fetch_all().await;

    assert!(matches!(result, Err(FetchError::Transport(_))));
}

#[tokio::test]
async fn unreachable_upstream_is_a_transport_error() {
    let client = RestCountriesClient::new(UpstreamConfig {
        url: "http://127.0.0.1:1/v3.1/all".to_owned(),
        timeout: Duration::from_millis(500),
    })
    .unwrap();

    let err = client.fetch_all().await.unwrap_err();

    assert!(matches!(err, FetchError::Transport(_)));
    assert!(err.to_string().starts_with("External API Error: "));
}

#[tokio::test]
async fn redirects_are_followed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3.1/all"))
        .respond_with(
            ResponseTemplate::new(301).insert_header("Location", format!("{}/v3.1/moved", server.uri())),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v3.1/moved"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "name": { "common": "Moved" }, "population": 1, "flags": {} }
        ])))
        .mount(&server)
        .await;

    let client = client_for(&server, Duration::from_secs(5));
    let records = client.fetch_all().await.unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name.common, "Moved");
}
