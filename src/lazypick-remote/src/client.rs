//! HTTP client for the paginated people directory.

use async_trait::async_trait;
use lazypick_core::{FetchError, PageFetcher, RemotePage};

use crate::models::{PersonPage, PersonRecord};
use crate::{CONNECT_TIMEOUT, DEFAULT_DIRECTORY_URL, REQUEST_TIMEOUT, USER_AGENT};

/// Fields requested from the directory; the projection needs nothing else.
const FIELD_SELECT: &str = "firstName,lastName";

/// Projection from a wire record to its display label.
pub type RecordFormatter = fn(&PersonRecord) -> String;

fn full_name(record: &PersonRecord) -> String {
    record.full_name()
}

/// Client for the paginated `/users` directory endpoint.
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    client: reqwest::Client,
    base_url: String,
    formatter: RecordFormatter,
}

impl DirectoryClient {
    /// Create a client against the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .tcp_nodelay(true)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: base_url.into(),
            formatter: full_name,
        }
    }

    /// Replace the record-to-label projection.
    pub fn with_formatter(mut self, formatter: RecordFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// The base URL being used.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch one page of raw person records.
    ///
    /// Non-2xx responses classify as [`FetchError::Remote`] carrying the
    /// status; a body that fails to decode classifies as
    /// [`FetchError::Local`].
    pub async fn fetch_people(&self, skip: usize, limit: usize) -> Result<PersonPage, FetchError> {
        let url = format!("{}/users", self.base_url.trim_end_matches('/'));
        let response = self
            .client
            .get(&url)
            .query(&[("limit", limit), ("skip", skip)])
            .query(&[("select", FIELD_SELECT)])
            .send()
            .await
            .map_err(|err| FetchError::remote(err.status().map(|s| s.as_u16()), err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::remote(
                Some(status.as_u16()),
                format!("directory returned {status}"),
            ));
        }

        response.json::<PersonPage>().await.map_err(|err| {
            if err.is_decode() {
                FetchError::local(format!("malformed directory payload: {err}"))
            } else {
                FetchError::remote(err.status().map(|s| s.as_u16()), err.to_string())
            }
        })
    }
}

impl Default for DirectoryClient {
    fn default() -> Self {
        Self::new(DEFAULT_DIRECTORY_URL)
    }
}

#[async_trait]
impl PageFetcher for DirectoryClient {
    async fn fetch_page(&self, offset: usize, limit: usize) -> lazypick_core::Result<RemotePage> {
        let page = self.fetch_people(offset, limit).await?;
        tracing::debug!(
            offset,
            fetched = page.users.len(),
            total = page.total,
            "fetched directory page"
        );
        Ok(RemotePage {
            labels: page.users.iter().map(self.formatter).collect(),
            total: page.total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn page_body(first: usize, count: usize, total: usize) -> serde_json::Value {
        let users: Vec<_> = (first..first + count)
            .map(|i| {
                json!({
                    "id": i + 1,
                    "firstName": format!("First{i}"),
                    "lastName": format!("Last{i}"),
                })
            })
            .collect();
        json!({ "users": users, "total": total, "skip": first, "limit": count })
    }

    #[tokio::test]
    async fn test_fetch_people_sends_pagination_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users"))
            .and(query_param("limit", "20"))
            .and(query_param("skip", "40"))
            .and(query_param("select", FIELD_SELECT))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(page_body(40, 15, 55)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = DirectoryClient::new(server.uri());
        let page = client.fetch_people(40, 20).await.expect("fetch page");
        assert_eq!(page.users.len(), 15);
        assert_eq!(page.total, 55);
    }

    #[tokio::test]
    async fn test_fetch_page_formats_labels() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_body(0, 2, 2)))
            .mount(&server)
            .await;

        let client = DirectoryClient::new(server.uri());
        let page = client.fetch_page(0, 20).await.expect("fetch page");
        assert_eq!(page.labels, vec!["First0 Last0", "First1 Last1"]);
    }

    #[tokio::test]
    async fn test_custom_formatter() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_body(0, 1, 1)))
            .mount(&server)
            .await;

        fn last_first(record: &PersonRecord) -> String {
            format!("{}, {}", record.last_name, record.first_name)
        }

        let client = DirectoryClient::new(server.uri()).with_formatter(last_first);
        let page = client.fetch_page(0, 20).await.expect("fetch page");
        assert_eq!(page.labels, vec!["Last0, First0"]);
    }

    #[tokio::test]
    async fn test_server_error_classifies_remote() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = DirectoryClient::new(server.uri());
        let err = client.fetch_people(0, 20).await.expect_err("must fail");
        match err {
            FetchError::Remote { status, .. } => assert_eq!(status, Some(500)),
            FetchError::Local(message) => panic!("expected remote error, got local: {message}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_payload_classifies_local() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("{\"users\": \"not a list\"}", "application/json"),
            )
            .mount(&server)
            .await;

        let client = DirectoryClient::new(server.uri());
        let err = client.fetch_people(0, 20).await.expect_err("must fail");
        assert!(matches!(err, FetchError::Local(_)), "got: {err:?}");
    }
}
