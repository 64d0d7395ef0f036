use crate::config::ApiConfig;
use crate::error::Error;
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use std::time::Duration;

/// Thin transport contract over the passport API.
///
/// Every tool handler issues exactly one call through this trait and returns
/// the response body unchanged. Retry, recovery, and timeout policy live
/// behind the implementation, never in the handlers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// GET `path`, with `query` appended only when non-empty.
    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value, Error>;

    /// PUT `body` as JSON to `path`.
    async fn put(&self, path: &str, body: Value) -> Result<Value, Error>;

    /// POST `body` as JSON to `path`.
    async fn post(&self, path: &str, body: Value) -> Result<Value, Error>;
}

/// reqwest-backed [`ApiClient`] against a configured base URL, with optional
/// bearer authentication.
pub struct HttpApiClient {
    http: reqwest::Client,
    base_url: String,
    api_token: Option<SecretString>,
}

impl HttpApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| Error::Config(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_token: config.api_token.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_token {
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        }
    }

    async fn execute(&self, request: reqwest::RequestBuilder) -> Result<Value, Error> {
        let response = request
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| Error::Network(e.to_string()))
    }
}

#[async_trait]
impl ApiClient for HttpApiClient {
    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value, Error> {
        let mut request = self.http.get(self.url(path));
        if !query.is_empty() {
            request = request.query(query);
        }
        self.execute(self.authorize(request)).await
    }

    async fn put(&self, path: &str, body: Value) -> Result<Value, Error> {
        let request = self.http.put(self.url(path)).json(&body);
        self.execute(self.authorize(request)).await
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value, Error> {
        let request = self.http.post(self.url(path)).json(&body);
        self.execute(self.authorize(request)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str) -> ApiConfig {
        ApiConfig {
            base_url: base_url.to_string(),
            api_token: None,
            timeout_seconds: 5,
        }
    }

    #[test]
    fn url_joins_base_and_path() {
        let client = HttpApiClient::new(&config("https://passport.example.com")).unwrap();

        assert_eq!(
            client.url("/api/passports/p1/constraints"),
            "https://passport.example.com/api/passports/p1/constraints"
        );
    }

    #[test]
    fn url_strips_trailing_slash_from_base() {
        let client = HttpApiClient::new(&config("https://passport.example.com/")).unwrap();

        assert_eq!(
            client.url("/api/constraint-templates"),
            "https://passport.example.com/api/constraint-templates"
        );
    }

    #[test]
    fn new_accepts_config_without_token() {
        let client = HttpApiClient::new(&config("http://localhost:3000"));
        assert!(client.is_ok());
    }
}
