//! HTTP client for the Wayfarer API, used by every CLI command except `serve`.

use std::time::Duration;

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;

use wayfarer_types::auth::AccessToken;
use wayfarer_types::user::{TravelPreferences, UserProfile};

/// Default server address.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Chat turns can take several LLM round trips.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// Errors surfaced to the CLI user.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The server answered with an error; `detail` is its message.
    #[error("{detail}")]
    Api { status: StatusCode, detail: String },

    #[error("could not reach the Wayfarer API: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Not logged in. Run `wayfarer login --email <EMAIL>` first.")]
    NotLoggedIn,

    /// Rejected before sending.
    #[error("{0}")]
    Invalid(String),
}

/// Thin typed wrapper over the REST endpoints.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, builder: RequestBuilder) -> Result<RequestBuilder, ClientError> {
        let token = self.token.as_deref().ok_or(ClientError::NotLoggedIn)?;
        Ok(builder.bearer_auth(token))
    }

    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        full_name: Option<&str>,
    ) -> Result<UserProfile, ClientError> {
        let body = json!({"email": email, "password": password, "full_name": full_name});
        let response = self.http.post(self.url("/signup")).json(&body).send().await?;
        parse(response).await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AccessToken, ClientError> {
        let response = self
            .http
            .post(self.url("/login"))
            .form(&[("username", email), ("password", password)])
            .send()
            .await?;
        parse(response).await
    }

    pub async fn profile(&self) -> Result<UserProfile, ClientError> {
        let response = self
            .authorized(self.http.get(self.url("/profile")))?
            .send()
            .await?;
        parse(response).await
    }

    pub async fn update_profile(
        &self,
        full_name: Option<&str>,
        travel_preferences: &TravelPreferences,
    ) -> Result<UserProfile, ClientError> {
        let body = json!({"full_name": full_name, "travel_preferences": travel_preferences});
        let response = self
            .authorized(self.http.put(self.url("/profile")))?
            .json(&body)
            .send()
            .await?;
        parse(response).await
    }

    /// Send one chat query. Blank queries are rejected without a request.
    pub async fn chat(&self, query: &str) -> Result<String, ClientError> {
        if query.trim().is_empty() {
            return Err(ClientError::Invalid("Query cannot be empty.".to_string()));
        }

        #[derive(serde::Deserialize)]
        struct ChatReply {
            response: String,
        }

        let response = self
            .authorized(self.http.post(self.url("/chat")))?
            .json(&json!({"query": query}))
            .send()
            .await?;
        let reply: ChatReply = parse(response).await?;
        Ok(reply.response)
    }
}

/// Parse `--preferences` input. Must be a JSON object.
pub fn parse_preferences(raw: &str) -> Result<TravelPreferences, ClientError> {
    serde_json::from_str(raw)
        .map_err(|_| ClientError::Invalid("Invalid JSON for travel preferences.".to_string()))
}

async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ClientError::Api {
        status,
        detail: error_detail(status, &body),
    })
}

/// The server's `detail` string, else the raw body, else a fixed message.
fn error_detail(status: StatusCode, body: &str) -> String {
    let detail = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(str::to_string));

    match detail {
        Some(detail) => detail,
        None if !body.trim().is_empty() => body.trim().to_string(),
        None => format!("Request failed with status {status}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_parse_preferences() {
        let prefs = parse_preferences(r#"{"climate": "warm", "budget": 900}"#).unwrap();
        assert_eq!(prefs["budget"], 900);

        for bad in ["not json", "[1, 2]", "\"warm\""] {
            let err = parse_preferences(bad).unwrap_err();
            assert_eq!(err.to_string(), "Invalid JSON for travel preferences.");
        }
    }

    #[test]
    fn test_error_detail_fallbacks() {
        let status = StatusCode::BAD_REQUEST;
        assert_eq!(
            error_detail(status, r#"{"detail":"Email already registered"}"#),
            "Email already registered"
        );
        assert_eq!(error_detail(status, "upstream exploded"), "upstream exploded");
        assert_eq!(
            error_detail(status, ""),
            "Request failed with status 400 Bad Request"
        );
    }

    #[tokio::test]
    async fn test_login_sends_form_and_parses_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string_contains("username=a%40x.com"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "tok", "token_type": "bearer"
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri(), None).unwrap();
        let token = client.login("a@x.com", "pw").await.unwrap();
        assert_eq!(token.access_token, "tok");
    }

    #[tokio::test]
    async fn test_server_detail_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/signup"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(serde_json::json!({"detail": "Email already registered"})),
            )
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri(), None).unwrap();
        let err = client.signup("a@x.com", "pw", Some("A")).await.unwrap_err();
        assert!(matches!(err, ClientError::Api { status, .. } if status == StatusCode::BAD_REQUEST));
        assert_eq!(err.to_string(), "Email already registered");
    }

    #[tokio::test]
    async fn test_chat_sends_bearer() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .and(header("authorization", "Bearer tok"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"response": "Go in May."})),
            )
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri(), Some("tok".to_string())).unwrap();
        assert_eq!(client.chat("when to visit Rome").await.unwrap(), "Go in May.");
    }

    #[tokio::test]
    async fn test_blank_chat_rejected_locally() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri(), Some("tok".to_string())).unwrap();
        let err = client.chat("   ").await.unwrap_err();
        assert_eq!(err.to_string(), "Query cannot be empty.");
    }

    #[tokio::test]
    async fn test_profile_without_session() {
        let client = ApiClient::new(DEFAULT_API_URL, None).unwrap();
        assert!(matches!(client.profile().await, Err(ClientError::NotLoggedIn)));
    }
}
