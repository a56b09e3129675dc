//! Central configuration constants for the host connection.

/// Server root used when `STEPBOX_SERVER_ROOT` is not set.
pub const DEFAULT_SERVER_ROOT: &str = "http://127.0.0.1:3000";

/// Environment variable overriding the server root.
pub const SERVER_ROOT_ENV: &str = "STEPBOX_SERVER_ROOT";

/// Path of the host endpoint that opens a local file natively.
pub const OPEN_FILE_ENDPOINT: &str = "/dagit/open";

/// Query parameter carrying the path for [`OPEN_FILE_ENDPOINT`].
pub const OPEN_FILE_PATH_PARAM: &str = "path";

/// Server root from the environment, or the default. Trailing slashes are dropped.
pub fn server_root() -> String {
    let raw = std::env::var(SERVER_ROOT_ENV).unwrap_or_else(|_| DEFAULT_SERVER_ROOT.to_owned());
    normalize_server_root(&raw)
}

pub fn normalize_server_root(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_SERVER_ROOT.to_owned()
    } else {
        trimmed.to_owned()
    }
}
