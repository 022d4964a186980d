//! HTTP client for the policy API

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::{debug, info};

use super::{ApiError, PolicySource};
use crate::config::Config;
use crate::models::PolicyRow;

/// reqwest-backed [`PolicySource`]
#[derive(Debug, Clone)]
pub struct PolicyApi {
    client: Client,
    base_url: String,
}

impl PolicyApi {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(&config.api.user_agent)
            .timeout(config.http_timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.api.base_url.clone(),
        })
    }

    /// `{base}/policies?search={search}`, with the search text percent-encoded
    pub fn policies_url(&self, search: &str) -> Result<Url, ApiError> {
        policies_url(&self.base_url, search)
    }
}

pub fn policies_url(base_url: &str, search: &str) -> Result<Url, ApiError> {
    let invalid = |message: String| ApiError::InvalidUrl {
        url: base_url.to_string(),
        message,
    };

    let mut url = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| invalid("URL cannot be a base".to_string()))?
        .pop_if_empty()
        .push("policies");
    url.query_pairs_mut().append_pair("search", search);
    Ok(url)
}

#[async_trait]
impl PolicySource for PolicyApi {
    async fn fetch_policies(&self, search: &str) -> Result<Vec<PolicyRow>, ApiError> {
        let url = self.policies_url(search)?;
        debug!("Fetching policies: {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status_code: status.as_u16(),
                message: body,
            });
        }

        let policies: Vec<PolicyRow> =
            serde_json::from_str(&body).map_err(|source| ApiError::Decode { source })?;
        info!("Fetched {} policies (search: '{}')", policies.len(), search);
        Ok(policies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned HTTP response on a local port and return an API pointed at it
    async fn serve_once(status_line: &'static str, body: &'static str) -> PolicyApi {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });

        let config = Config::default().with_base_url(Some(format!("http://{}", addr)));
        PolicyApi::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_decodes_policies() {
        let body = r#"[{"id":"p1","customer":{"id":7,"firstName":"Lena","lastName":"Smithers","dateOfBirth":"1990-02-03"},"provider":"DAK","insuranceType":"HEALTH","status":"ACTIVE","startDate":"2023-01-01","endDate":null,"createdAt":"2023-01-01T00:00:00.000Z"}]"#;
        let api = serve_once("200 OK", body).await;

        let rows = api.fetch_policies("smith").await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].customer.last_name, "Smithers");
    }

    #[tokio::test]
    async fn test_fetch_maps_error_status() {
        let api = serve_once("500 Internal Server Error", r#"{"error":"boom"}"#).await;

        match api.fetch_policies("").await {
            Err(ApiError::Status {
                status_code,
                message,
            }) => {
                assert_eq!(status_code, 500);
                assert!(message.contains("boom"));
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_maps_malformed_body() {
        let api = serve_once("200 OK", r#"[{"id":"p1","status":"ACTIVE"}"#).await;

        let err = api.fetch_policies("").await.unwrap_err();
        assert!(matches!(err, ApiError::Decode { .. }));
    }

    #[test]
    fn test_policies_url_encodes_search() {
        let url = policies_url("http://localhost:4000", "anna smith&co").unwrap();
        assert_eq!(url.path(), "/policies");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs, vec![("search".to_string(), "anna smith&co".to_string())]);
        assert!(!url.as_str().contains("smith&co"));
    }

    #[test]
    fn test_policies_url_keeps_base_path() {
        let url = policies_url("http://api.test/v1/", "").unwrap();
        assert_eq!(url.as_str(), "http://api.test/v1/policies?search=");
    }

    #[test]
    fn test_policies_url_rejects_invalid_base() {
        let err = policies_url("localhost", "x").unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl { .. }));
    }

    #[test]
    fn test_client_builds_from_config() {
        let api = PolicyApi::new(&Config::default()).unwrap();
        let url = api.policies_url("dak").unwrap();
        assert_eq!(url.as_str(), "http://localhost:4000/policies?search=dak");
    }
}
