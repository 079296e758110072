use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::{ANKI_CONNECT_API_VERSION, RETRIEVE_MEDIA_FILE_ACTION};

/// Outcome of asking the remote API for a media file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum MediaLookup {
    /// Base64 payload exactly as returned by the remote API.
    Found(String),
    /// The remote API answered but has no such file; carries its reason.
    Missing(String),
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum MediaSourceError {
    #[error("AnkiConnect request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("AnkiConnect returned an unexpected response: {0}")]
    InvalidResponse(String),
}

/// Upstream that owns the authoritative media files.
#[async_trait]
pub(crate) trait MediaSource: Send + Sync {
    async fn retrieve_media_file(&self, filename: &str) -> Result<MediaLookup, MediaSourceError>;
}

#[derive(Debug, Serialize)]
struct AnkiConnectRequest<'a, P> {
    action: &'a str,
    version: u32,
    params: P,
}

#[derive(Debug, Serialize)]
struct RetrieveMediaFileParams<'a> {
    filename: &'a str,
}

#[derive(Debug, Deserialize)]
struct AnkiConnectResponse {
    #[serde(default)]
    result: Value,
    #[serde(default)]
    error: Value,
}

/// Reason carried by a truthy `error` field. `null`, `false`, `0` and the
/// empty string mean "no error".
fn error_reason(error: Value) -> Option<String> {
    match error {
        Value::Null | Value::Bool(false) => None,
        Value::String(reason) if reason.is_empty() => None,
        Value::Number(number) if number.as_f64() == Some(0.0) => None,
        Value::String(reason) => Some(reason),
        other => Some(other.to_string()),
    }
}

fn interpret_response(response: AnkiConnectResponse) -> Result<MediaLookup, MediaSourceError> {
    if let Some(reason) = error_reason(response.error) {
        return Ok(MediaLookup::Missing(reason));
    }

    match response.result {
        Value::String(payload) => Ok(MediaLookup::Found(payload)),
        other => Err(MediaSourceError::InvalidResponse(format!(
            "expected a base64 string result, got {other}"
        ))),
    }
}

#[derive(Debug, Clone)]
pub(crate) struct AnkiConnectClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl AnkiConnectClient {
    /// AnkiConnect is a loopback service, so system proxy settings are
    /// ignored.
    pub(crate) fn new(endpoint: Url) -> Result<Self, MediaSourceError> {
        let http = reqwest::Client::builder().no_proxy().build()?;
        Ok(Self { http, endpoint })
    }
}

#[async_trait]
impl MediaSource for AnkiConnectClient {
    async fn retrieve_media_file(&self, filename: &str) -> Result<MediaLookup, MediaSourceError> {
        let request = AnkiConnectRequest {
            action: RETRIEVE_MEDIA_FILE_ACTION,
            version: ANKI_CONNECT_API_VERSION,
            params: RetrieveMediaFileParams { filename },
        };

        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await?
            .json::<AnkiConnectResponse>()
            .await?;

        interpret_response(response)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::{
        matchers::{body_json, header, method},
        Mock, MockServer, ResponseTemplate,
    };

    use super::*;

    fn parse_response(value: Value) -> AnkiConnectResponse {
        serde_json::from_value(value).expect("fixture should deserialize")
    }

    #[test]
    fn interpret_response_returns_payload_for_string_result() {
        let lookup = interpret_response(parse_response(json!({"result": "aGk=", "error": null})))
            .expect("string result should be accepted");
        assert_eq!(lookup, MediaLookup::Found("aGk=".to_string()));
    }

    #[test]
    fn interpret_response_prefers_error_field() {
        let lookup = interpret_response(parse_response(json!({"result": null, "error": "not found"})))
            .expect("error field should map to a lookup");
        assert_eq!(lookup, MediaLookup::Missing("not found".to_string()));
    }

    #[test]
    fn interpret_response_rejects_false_result() {
        let result = interpret_response(parse_response(json!({"result": false, "error": null})));
        assert!(matches!(result, Err(MediaSourceError::InvalidResponse(_))));
    }

    #[test]
    fn interpret_response_ignores_falsy_error_values() {
        for error in [json!(null), json!(""), json!(false), json!(0)] {
            let lookup = interpret_response(parse_response(json!({"result": "aGk=", "error": error})))
                .expect("falsy error should not block the result");
            assert_eq!(lookup, MediaLookup::Found("aGk=".to_string()), "error: {error}");
        }
    }

    #[test]
    fn interpret_response_accepts_non_string_error_reason() {
        let lookup = interpret_response(parse_response(
            json!({"result": null, "error": {"code": 1}}),
        ))
        .expect("object error should map to a lookup");
        assert_eq!(lookup, MediaLookup::Missing(r#"{"code":1}"#.to_string()));
    }

    #[test]
    fn interpret_response_rejects_unexpected_result_shapes() {
        for body in [json!({}), json!({"result": 42}), json!({"result": true}), json!({"result": ["a"]})] {
            let result = interpret_response(parse_response(body.clone()));
            assert!(
                matches!(result, Err(MediaSourceError::InvalidResponse(_))),
                "body: {body}"
            );
        }
    }

    #[tokio::test]
    async fn client_posts_retrieve_media_file_action() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({
                "action": "retrieveMediaFile",
                "version": 6,
                "params": { "filename": "kanji 日.png" }
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"result": "aGk=", "error": null})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = AnkiConnectClient::new(Url::parse(&server.uri()).expect("mock uri"))
            .expect("client should build");
        let lookup = client
            .retrieve_media_file("kanji 日.png")
            .await
            .expect("request should succeed");

        assert_eq!(lookup, MediaLookup::Found("aGk=".to_string()));
    }

    #[tokio::test]
    async fn client_reports_upstream_error_as_missing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"result": null, "error": "file not found"})),
            )
            .mount(&server)
            .await;

        let client = AnkiConnectClient::new(Url::parse(&server.uri()).expect("mock uri"))
            .expect("client should build");
        let lookup = client
            .retrieve_media_file("gone.png")
            .await
            .expect("request should succeed");

        assert_eq!(lookup, MediaLookup::Missing("file not found".to_string()));
    }

    #[tokio::test]
    async fn client_rejects_non_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>nope</html>"))
            .mount(&server)
            .await;

        let client = AnkiConnectClient::new(Url::parse(&server.uri()).expect("mock uri"))
            .expect("client should build");
        let result = client.retrieve_media_file("cat.png").await;

        assert!(matches!(result, Err(MediaSourceError::Request(_))));
    }

    #[tokio::test]
    async fn client_reports_connection_failure() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind probe port");
        let address = listener.local_addr().expect("probe address");
        drop(listener);

        let endpoint = Url::parse(&format!("http://{address}/")).expect("endpoint url");
        let client = AnkiConnectClient::new(endpoint).expect("client should build");
        let result = client.retrieve_media_file("cat.png").await;

        assert!(matches!(result, Err(MediaSourceError::Request(_))));
    }

    #[tokio::test]
    async fn client_bypasses_system_proxy_settings() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": "aGk="})))
            .expect(1)
            .mount(&server)
            .await;

        for key in ["HTTP_PROXY", "http_proxy", "ALL_PROXY", "all_proxy"] {
            std::env::set_var(key, "http://127.0.0.1:1");
        }
        let client = AnkiConnectClient::new(Url::parse(&server.uri()).expect("mock uri"))
            .expect("client should build");
        let result = client.retrieve_media_file("cat.png").await;
        for key in ["HTTP_PROXY", "http_proxy", "ALL_PROXY", "all_proxy"] {
            std::env::remove_var(key);
        }

        assert_eq!(
            result.expect("request should reach the server"),
            MediaLookup::Found("aGk=".to_string())
        );
    }
}
