/// Prefix that marks a link target as a path on the host machine.
pub const LOCAL_FILE_SCHEME: &str = "file://";

/// Turns a materialization location into a link target. Absolute paths get the `file://`
/// prefix as-is (no escaping here); anything else is assumed to already be a URL.
pub fn file_location_to_href(location: &str) -> String {
    if location.starts_with('/') {
        format!("{LOCAL_FILE_SCHEME}{location}")
    } else {
        location.to_owned()
    }
}

/// A classified link target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileLink {
    /// Opened by the host process, never by navigation.
    LocalPath { href: String, path: String },
    /// Left to the default navigation behavior.
    Url { href: String },
}

impl FileLink {
    pub fn from_location(location: &str) -> Self {
        Self::from_href(file_location_to_href(location))
    }

    pub fn from_href(href: String) -> Self {
        match href.strip_prefix(LOCAL_FILE_SCHEME) {
            Some(path) => FileLink::LocalPath {
                path: path.to_owned(),
                href,
            },
            None => FileLink::Url { href },
        }
    }

    pub fn href(&self) -> &str {
        match self {
            FileLink::LocalPath { href, .. } | FileLink::Url { href } => href,
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, FileLink::LocalPath { .. })
    }
}
