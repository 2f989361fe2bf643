//! Project settings endpoint tests.
//!
//! # Invariants
//! - Settings round-trip through GET and POST with env order preserved
//! - Missing fields fall back to dashboard defaults
//! - An empty success body decodes as `{}`

mod common;

use common::*;
use deploydash_client::{DbType, ProjectSettings};
use secrecy::SecretString;
use wiremock::matchers::{body_json, header, method, path};

#[tokio::test]
async fn test_get_settings_decodes_fixture() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/proj-1/settings"))
        .respond_with(fixture_response("projects/settings.json"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let settings = client_for(&mock_server, 0)
        .get_settings("proj-1")
        .await
        .unwrap();

    assert_eq!(settings.install_command.as_deref(), Some("npm ci"));
    assert_eq!(settings.port, 3000);
    assert_eq!(settings.db_type, DbType::Postgresql);
    assert!(settings.use_redis);
    let keys: Vec<&str> = settings.env_variables.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["NODE_ENV", "DATABASE_URL", "API_KEY"]);
}

#[tokio::test]
async fn test_get_settings_empty_body_uses_defaults() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/fresh/settings"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let settings = client_for(&mock_server, 0).get_settings("fresh").await.unwrap();

    assert_eq!(settings, ProjectSettings::default());
}

#[tokio::test]
async fn test_get_settings_sends_bearer_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/p/settings"))
        .and(header("authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = DeployClient::builder()
        .base_url(mock_server.uri())
        .api_token(SecretString::new("secret-token".to_string().into()))
        .build()
        .unwrap();

    assert!(client.get_settings("p").await.is_ok());
}

#[tokio::test]
async fn test_get_settings_invalid_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/p/settings"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server, 0).get_settings("p").await;

    assert!(matches!(result, Err(ClientError::InvalidResponse(_))));
}

#[tokio::test]
async fn test_update_settings_posts_camel_case_body() {
    let mock_server = MockServer::start().await;

    let mut settings = ProjectSettings::default();
    settings.output_dir = Some("build".to_string());
    settings
        .env_variables
        .insert("FOO".to_string(), "bar".to_string());

    Mock::given(method("POST"))
        .and(path("/projects/p/settings"))
        .and(body_json(serde_json::json!({
            "outputDir": "build",
            "port": 30001,
            "dbType": "none",
            "useRedis": false,
            "useElasticsearch": false,
            "envVariables": {"FOO": "bar"}
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&mock_server)
        .await;

    client_for(&mock_server, 0)
        .update_settings("p", &settings)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_blank_project_id_rejected_before_request() {
    let mock_server = MockServer::start().await;

    let result = client_for(&mock_server, 0).get_settings(" ").await;

    assert!(matches!(result, Err(ClientError::InvalidRequest(_))));
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}
