use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;

use crate::domain::entities::query::PageRequest;
use crate::domain::entities::record::PageResponse;
use crate::infra::http::query_params::{build_query_params, endpoint_url};
use crate::usecase::ports::page_source::{FetchError, PageSource};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpSourceConfig {
    pub data_source: String,
    pub token: String,
    pub filter_field: String,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

pub struct HttpPageSource {
    http: reqwest::Client,
    config: HttpSourceConfig,
}

impl HttpPageSource {
    pub fn new(config: HttpSourceConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|err| FetchError::ClientBuild(err.to_string()))?;
        Ok(Self { http, config })
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn fetch_page(&self, request: &PageRequest) -> Result<PageResponse, FetchError> {
        let params = build_query_params(request, &self.config.filter_field);
        let url = endpoint_url(&self.config.data_source, &params)?;

        // The token goes out as-is; callers include any scheme themselves.
        let response = self
            .http
            .get(url)
            .header(AUTHORIZATION, &self.config.token)
            .send()
            .await
            .map_err(|err| FetchError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|err| FetchError::Transport(err.to_string()))?;
        serde_json::from_str::<PageResponse>(&body).map_err(|err| FetchError::Decode(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::query::{FilterDescriptor, QuerySignature, SortOrder};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serves one canned HTTP/1.1 response and hands back the raw request head.
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("should bind loopback listener");
        let addr = listener.local_addr().expect("listener should have an address");
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.expect("should accept client");
            let mut head = Vec::new();
            let mut buf = [0_u8; 1024];
            while !head.windows(4).any(|window| window == b"\r\n\r\n") {
                let read = socket.read(&mut buf).await.expect("should read request");
                if read == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..read]);
            }
            let response = format!(
                "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket
                .write_all(response.as_bytes())
                .await
                .expect("should write response");
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&head).into_owned()
        });
        (format!("http://{addr}/api/items"), handle)
    }

    fn source(data_source: String) -> HttpPageSource {
        HttpPageSource::new(HttpSourceConfig {
            data_source,
            token: "abc123".to_string(),
            filter_field: "title".to_string(),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(5),
        })
        .expect("client should build")
    }

    fn first_page() -> PageRequest {
        PageRequest {
            page: 1,
            signature: QuerySignature::default(),
        }
    }

    #[tokio::test]
    async fn sends_raw_token_and_ordered_query() {
        let (url, server) =
            serve_once("200 OK", r#"{"_data":[{"name":"a"}],"_meta":{"pageCount":3,"totalCount":21}}"#)
                .await;
        let request = PageRequest {
            page: 2,
            signature: QuerySignature {
                order_by: Some(SortOrder::descending("created")),
                filters: vec![FilterDescriptor::new("status", "open")],
                search: "foo bar".to_string(),
            },
        };

        let response = source(url)
            .fetch_page(&request)
            .await
            .expect("page should decode");
        let head = server.await.expect("server task should finish");

        assert_eq!(response.rows.len(), 1);
        assert_eq!(response.meta.page_count, 3);
        assert_eq!(response.meta.total_count, 21);
        let request_line = head.lines().next().unwrap_or_default();
        assert_eq!(
            request_line,
            "GET /api/items?page=2&orderby=-created&title=foo+bar&status=open HTTP/1.1"
        );
        assert!(
            head.lines()
                .any(|line| line.eq_ignore_ascii_case("authorization: abc123")),
            "token should be sent without a scheme prefix: {head}"
        );
    }

    #[tokio::test]
    async fn non_success_status_maps_to_status_error() {
        let (url, server) = serve_once("401 Unauthorized", "{}").await;

        let err = source(url)
            .fetch_page(&first_page())
            .await
            .expect_err("401 should fail");
        server.await.expect("server task should finish");

        assert!(matches!(err, FetchError::Status { status: 401 }));
        assert_eq!(err.to_string(), "Request failed with status code 401");
    }

    #[tokio::test]
    async fn body_without_meta_is_a_decode_error() {
        let (url, server) = serve_once("200 OK", r#"{"_data":[]}"#).await;

        let err = source(url)
            .fetch_page(&first_page())
            .await
            .expect_err("missing _meta should fail");
        server.await.expect("server task should finish");

        assert!(matches!(err, FetchError::Decode(_)), "got {err:?}");
    }
}
