//! HTTP client for making requests to the geocoding provider

use crate::config::OutgoingSettings;
use crate::geocode::FetchError;
use anyhow::Result;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Response};
use std::time::Duration;

/// HTTP client wrapper configured from [`OutgoingSettings`]
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    default_timeout: Duration,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self> {
        Self::with_settings(&OutgoingSettings::default())
    }

    /// Create a new HTTP client with custom settings
    pub fn with_settings(settings: &OutgoingSettings) -> Result<Self> {
        let mut headers = HeaderMap::new();
        for (key, value) in &settings.extra_headers {
            headers.insert(
                HeaderName::from_bytes(key.as_bytes())?,
                HeaderValue::from_str(value)?,
            );
        }

        let mut builder = Client::builder()
            .timeout(Duration::from_secs_f64(settings.request_timeout))
            .pool_max_idle_per_host(settings.pool_maxsize)
            .user_agent(settings.user_agent.clone())
            .default_headers(headers)
            .gzip(true)
            .brotli(true);

        // SSL verification
        if !settings.verify_ssl {
            builder = builder.danger_accept_invalid_certs(true);
        }

        // Proxy settings
        if let Some(ref proxy_url) = settings.proxies.all {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        } else {
            if let Some(ref http) = settings.proxies.http {
                builder = builder.proxy(reqwest::Proxy::http(http)?);
            }
            if let Some(ref https) = settings.proxies.https {
                builder = builder.proxy(reqwest::Proxy::https(https)?);
            }
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            default_timeout: Duration::from_secs_f64(settings.request_timeout),
        })
    }

    /// GET request with ordered query parameters
    pub async fn get_with_params(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<HttpResponse, FetchError> {
        let response = self
            .client
            .get(url)
            .timeout(self.default_timeout)
            .header("Accept", "application/json")
            .query(params)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Parse response into HttpResponse
    async fn parse_response(response: Response) -> Result<HttpResponse, FetchError> {
        let status = response.status().as_u16();
        let text = response.text().await?;

        Ok(HttpResponse { status, text })
    }
}

/// HTTP response from the provider
#[derive(Debug)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub text: String,
}

impl HttpResponse {
    /// Parse response as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, FetchError> {
        Ok(serde_json::from_str(&self.text)?)
    }

    /// Check if response is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_client_creation() {
        let client = HttpClient::new();
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_rejects_bad_header_name() {
        let mut settings = OutgoingSettings::default();
        settings
            .extra_headers
            .insert("bad header".to_string(), "x".to_string());
        assert!(HttpClient::with_settings(&settings).is_err());
    }

    #[tokio::test]
    async fn test_sends_params_and_user_agent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/"))
            .and(query_param("q", "Rua Augusta"))
            .and(header("user-agent", "tests/1.0"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(1)
            .mount(&server)
            .await;

        let settings = OutgoingSettings {
            user_agent: "tests/1.0".to_string(),
            ..Default::default()
        };
        let client = HttpClient::with_settings(&settings).unwrap();
        let response = client
            .get_with_params(
                &format!("{}/api/", server.uri()),
                &[("q", "Rua Augusta".to_string())],
            )
            .await
            .unwrap();

        assert!(response.is_success());
        assert_eq!(response.text, "{}");
    }

    #[test]
    fn test_status_classification() {
        let ok = HttpResponse {
            status: 204,
            text: String::new(),
        };
        let not_found = HttpResponse {
            status: 404,
            text: String::new(),
        };
        assert!(ok.is_success());
        assert!(!not_found.is_success());
    }
}
