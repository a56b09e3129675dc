use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};

use stepbox_core::{FileLink, HostOpenError, HostOpener};
use tokio::runtime::Handle;
use tracing::{info, warn};

use crate::scheduler::RepaintHook;

const OPEN_FAILED_TITLE: &str = "Unable to open file";
const OPEN_FAILED_PREFIX: &str = "The host was unable to open the file.";

/// What the UI should do with a click on a materialization link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkAction {
    /// Not ours; navigate as usual, in a new browsing context.
    FollowDefault { href: String },
    /// Navigation suppressed; the host was asked to open `path`.
    Intercepted { path: String },
}

/// A message the user has to acknowledge before continuing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserNotice {
    pub title: String,
    pub message: String,
}

impl UserNotice {
    pub fn open_failed(err: &HostOpenError) -> Self {
        Self {
            title: OPEN_FAILED_TITLE.to_owned(),
            message: format!("{OPEN_FAILED_PREFIX}\n\n{}", err.user_message()),
        }
    }
}

/// Asks the host to open `path` and converts any failure into a notice.
pub async fn open_local_path(opener: &dyn HostOpener, path: &str) -> Option<UserNotice> {
    info!(path, "asking host to open file");
    match opener.open_path(path).await {
        Ok(()) => None,
        Err(e) => {
            warn!("Host failed to open {}: {}", path, e);
            Some(UserNotice::open_failed(&e))
        }
    }
}

/// Routes materialization link clicks. Host-open requests run in the background; their failures
/// come back through [`FileLinkResolver::poll_notices`].
pub struct FileLinkResolver {
    opener: Arc<dyn HostOpener>,
    handle: Handle,
    repaint: RepaintHook,
    in_flight: Arc<AtomicUsize>,
    tx: mpsc::Sender<UserNotice>,
    rx: mpsc::Receiver<UserNotice>,
}

impl FileLinkResolver {
    pub fn new(opener: Arc<dyn HostOpener>, handle: Handle, repaint: RepaintHook) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            opener,
            handle,
            repaint,
            in_flight: Arc::new(AtomicUsize::new(0)),
            tx,
            rx,
        }
    }

    pub fn on_click(&self, link: &FileLink) -> LinkAction {
        match link {
            FileLink::Url { href } => LinkAction::FollowDefault { href: href.clone() },
            FileLink::LocalPath { path, .. } => {
                self.spawn_open(path.clone());
                LinkAction::Intercepted { path: path.clone() }
            }
        }
    }

    /// Notices produced since the last call, oldest first.
    pub fn poll_notices(&self) -> Vec<UserNotice> {
        self.rx.try_iter().collect()
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    fn spawn_open(&self, path: String) {
        let opener = self.opener.clone();
        let tx = self.tx.clone();
        let repaint = self.repaint.clone();
        let in_flight = self.in_flight.clone();

        in_flight.fetch_add(1, Ordering::SeqCst);
        self.handle.spawn(async move {
            if let Some(notice) = open_local_path(opener.as_ref(), &path).await {
                let _ = tx.send(notice);
            }
            in_flight.fetch_sub(1, Ordering::SeqCst);
            repaint();
        });
    }
}
