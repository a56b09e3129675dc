use async_trait::async_trait;
use thiserror::Error;

/// Wall clock in milliseconds since the Unix epoch.
pub trait Clock: Send + Sync + 'static {
    fn now_ms(&self) -> i64;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostOpenError {
    #[error("host refused to open the file (HTTP {status}): {body}")]
    Rejected { status: u16, body: String },
    #[error("open request failed: {0}")]
    Transport(String),
}

impl HostOpenError {
    /// Text meant for the user: the server's own message when it sent one.
    pub fn user_message(&self) -> &str {
        match self {
            HostOpenError::Rejected { body, .. } => body,
            HostOpenError::Transport(message) => message,
        }
    }
}

/// Asks the process serving the UI to open a local path with the OS default handler.
#[async_trait]
pub trait HostOpener: Send + Sync + 'static {
    async fn open_path(&self, path: &str) -> Result<(), HostOpenError>;
}
