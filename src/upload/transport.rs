use crate::error::UploadError;
use reqwest::Client;
use reqwest::header::{ACCEPT_CHARSET, CONTENT_TYPE};
use std::future::Future;
use tracing::debug;

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=UTF-8";

/// Channel the upload scheduler submits form bodies over.
pub trait UploadTransport: Send + Sync + 'static {
    /// POSTs `body` to `url`. A missing URL is a transport failure.
    fn post_form(
        &self,
        url: Option<&str>,
        body: &str,
    ) -> impl Future<Output = Result<(), UploadError>> + Send;
}

/// Plain HTTP(S) transport backed by `reqwest`.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a preconfigured client, e.g. one with a user agent or timeouts.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl UploadTransport for HttpTransport {
    async fn post_form(&self, url: Option<&str>, body: &str) -> Result<(), UploadError> {
        let url = url.ok_or(UploadError::MissingUrl)?;
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .header(ACCEPT_CHARSET, "UTF-8")
            .body(body.to_string())
            .send()
            .await
            .map_err(UploadError::Request)?;

        let text = response
            .error_for_status()
            .map_err(UploadError::Response)?
            .text()
            .await
            .map_err(UploadError::Response)?;
        for line in text.lines() {
            debug!("{line}");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_url_fails_without_network() {
        let transport = HttpTransport::new();
        let result = transport.post_form(None, "coords=x").await;
        assert!(matches!(result, Err(UploadError::MissingUrl)));
    }

    #[tokio::test]
    async fn test_malformed_url_is_a_request_error() {
        let transport = HttpTransport::new();
        let result = transport.post_form(Some("not a url"), "coords=x").await;
        assert!(matches!(result, Err(UploadError::Request(_))));
    }

    #[tokio::test]
    async fn test_refused_connection_is_a_request_error() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let client = Client::builder()
            .connect_timeout(std::time::Duration::from_secs(2))
            .build()
            .unwrap();
        let transport = HttpTransport::with_client(client);

        let url = format!("http://127.0.0.1:{port}/upload");
        let result = transport.post_form(Some(&url), "coords=x").await;
        assert!(matches!(result, Err(UploadError::Request(_))));
    }
}
