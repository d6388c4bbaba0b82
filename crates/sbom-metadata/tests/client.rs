use sbom_metadata::{DepsDevClient, MetadataClient};
use sbom_model::Coordinate;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn fetch_graph_parses_200_response() {
    let server = MockServer::start().await;
    let body = serde_json::json!({
        "nodes": [
            {"versionKey": {"system": "maven", "name": "commons:io", "version": "2.11.0"}, "relation": "SELF"},
            {"versionKey": {"system": "maven", "name": "commons:lang", "version": "3.1"}, "relation": "DIRECT"}
        ],
        "edges": [{"fromNode": 0, "toNode": 1}]
    });

    Mock::given(method("GET"))
        .and(path("/maven/packages/commons%3Aio/versions/2.11.0:dependencies"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = DepsDevClient::with_base_url(server.uri()).unwrap();
    let coord = Coordinate::new("maven", "commons:io", "2.11.0");
    let graph = client.fetch_graph(&coord).await.expect("expected a graph");

    assert_eq!(graph.nodes.len(), 2);
    assert_eq!(graph.self_index(), Some(0));
}

#[tokio::test]
async fn fetch_graph_returns_none_on_404() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = DepsDevClient::with_base_url(server.uri()).unwrap();
    let coord = Coordinate::new("maven", "does:not-exist", "9.9.9");
    assert!(client.fetch_graph(&coord).await.is_none());
}

#[tokio::test]
async fn fetch_graph_translates_herodevs_version_for_the_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/maven/packages/commons%3Acompress/versions/1.2.3:dependencies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "nodes": [{"versionKey": {"system": "maven", "name": "commons:compress", "version": "1.2.3"}, "relation": "SELF"}],
            "edges": []
        })))
        .mount(&server)
        .await;

    let client = DepsDevClient::with_base_url(server.uri()).unwrap();
    let coord = Coordinate::new("maven", "commons:compress", "1.2.3-commons-compress-1.2.4");
    let graph = client.fetch_graph(&coord).await;
    assert!(graph.is_some(), "query should have hit the upstream-version path");
}

#[tokio::test]
async fn fetch_graph_returns_none_on_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = DepsDevClient::with_base_url(server.uri()).unwrap();
    let coord = Coordinate::new("maven", "a:b", "1.0.0");
    assert!(client.fetch_graph(&coord).await.is_none());
}
