use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{Client, StatusCode};
use stepbox_config::{OPEN_FILE_ENDPOINT, OPEN_FILE_PATH_PARAM};
use stepbox_core::{HostOpenError, HostOpener};
use tracing::{debug, warn};

/// Characters left alone by `encodeURIComponent`; everything else is escaped, `/` included.
pub const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn open_file_url(server_root: &str, path: &str) -> String {
    format!(
        "{}{}?{}={}",
        server_root.trim_end_matches('/'),
        OPEN_FILE_ENDPOINT,
        OPEN_FILE_PATH_PARAM,
        utf8_percent_encode(path, URI_COMPONENT)
    )
}

/// Talks to the host's open-file endpoint over HTTP.
pub struct HttpHostOpener {
    client: Client,
    server_root: String,
}

impl HttpHostOpener {
    pub fn new(client: Client, server_root: impl Into<String>) -> Self {
        Self {
            client,
            server_root: server_root.into(),
        }
    }

    pub fn server_root(&self) -> &str {
        &self.server_root
    }
}

#[async_trait]
impl HostOpener for HttpHostOpener {
    async fn open_path(&self, path: &str) -> Result<(), HostOpenError> {
        let url = open_file_url(&self.server_root, path);
        debug!(%url, "requesting host open");

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| HostOpenError::Transport(e.to_string()))?;

        let status = resp.status();
        if status == StatusCode::OK {
            return Ok(());
        }

        let body = match resp.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!("Failed to read open-file error body from {}: {}", url, e);
                e.to_string()
            }
        };
        Err(HostOpenError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}
