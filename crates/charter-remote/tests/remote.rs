//! Remote fetching against a mock server

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use charter_core::CascadePatterns;
use charter_remote::{Image, RemoteClient, RemoteError};

async fn mock_refs(server: &MockServer, image: &str, tags: &[&str]) {
    let body: Vec<serde_json::Value> = tags
        .iter()
        .map(|tag| serde_json::json!({ "ref": format!("refs/tags/{tag}"), "object": { "type": "commit" } }))
        .collect();

    Mock::given(method("GET"))
        .and(path(format!(
            "/repos/linuxserver/docker-{image}/git/refs/tags"
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn resolves_versions_from_listed_refs() {
    let server = MockServer::start().await;
    mock_refs(&server, "radarr", &["v1.2.3", "v1.3.0", "v1.2.9"]).await;

    let client = RemoteClient::with_bases(server.uri(), server.uri()).unwrap();
    let patterns = CascadePatterns::new();

    let mut image = Image::new("radarr");
    let versions = image.versions(&client, &patterns).await.unwrap();

    assert_eq!(versions.len(), 1);
    assert_eq!(versions[0].raw, "v1.3.0");
}

#[tokio::test]
async fn config_decodes_and_interpolates() {
    let server = MockServer::start().await;
    let yaml = "project_name: radarr\nproject_blurb: \"{{ project_name }} manages movies\"\n";

    Mock::given(method("GET"))
        .and(path("/linuxserver/docker-radarr/v1.3.0/readme-vars.yml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(yaml))
        .mount(&server)
        .await;

    let client = RemoteClient::with_bases(server.uri(), server.uri()).unwrap();
    let config = Image::new("radarr")
        .config(&client, "v1.3.0")
        .await
        .unwrap();

    assert_eq!(config.project_blurb, "radarr manages movies");
}

#[tokio::test]
async fn ports_prefer_declared_lists() {
    let server = MockServer::start().await;
    let yaml = "param_ports:\n  - { internal_port: \"7878\" }\n";

    Mock::given(method("GET"))
        .and(path("/linuxserver/docker-radarr/v1.3.0/readme-vars.yml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(yaml))
        .mount(&server)
        .await;

    let client = RemoteClient::with_bases(server.uri(), server.uri()).unwrap();
    let image = Image::new("radarr");
    let config = image.config(&client, "v1.3.0").await.unwrap();

    // No Dockerfile mock mounted: the declared list must short-circuit the
    // fallback fetch.
    let ports = image.ports(&client, "v1.3.0", &config).await.unwrap();
    assert_eq!(ports.len(), 1);
    assert_eq!(ports[0].number, 7878);
}

#[tokio::test]
async fn ports_fall_back_to_dockerfile() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/linuxserver/docker-plex/v1.0.0/Dockerfile"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("FROM alpine\nEXPOSE 80/tcp 443\n"),
        )
        .mount(&server)
        .await;

    let client = RemoteClient::with_bases(server.uri(), server.uri()).unwrap();
    let image = Image::new("plex");
    let config = charter_core::Config::default();

    let ports = image.ports(&client, "v1.0.0", &config).await.unwrap();
    let numbers: Vec<u16> = ports.iter().map(|p| p.number).collect();
    assert_eq!(numbers, vec![80, 443]);
}

#[tokio::test]
async fn missing_file_is_a_status_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/linuxserver/docker-gone/v1.0.0/readme-vars.yml"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = RemoteClient::with_bases(server.uri(), server.uri()).unwrap();
    let err = Image::new("gone")
        .config(&client, "v1.0.0")
        .await
        .unwrap_err();

    assert!(matches!(err, RemoteError::Status { .. }));
}
