use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use stepbox_app_core::{open_local_path, FileLinkResolver, LinkAction, RepaintHook, UserNotice};
use stepbox_core::{FileLink, HostOpenError, HostOpener};
use tokio::runtime::Handle;

struct FakeOpener {
    result: Result<(), HostOpenError>,
    calls: Mutex<Vec<String>>,
}

impl FakeOpener {
    fn new(result: Result<(), HostOpenError>) -> Arc<Self> {
        Arc::new(Self {
            result,
            calls: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl HostOpener for FakeOpener {
    async fn open_path(&self, path: &str) -> Result<(), HostOpenError> {
        self.calls.lock().unwrap().push(path.to_owned());
        self.result.clone()
    }
}

fn resolver(opener: Arc<FakeOpener>) -> FileLinkResolver {
    let hook: RepaintHook = Arc::new(|| {});
    FileLinkResolver::new(opener, Handle::current(), hook)
}

async fn settle(resolver: &FileLinkResolver) -> Vec<UserNotice> {
    for _ in 0..100 {
        if resolver.in_flight() == 0 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    resolver.poll_notices()
}

#[tokio::test]
async fn urls_follow_default_navigation_and_never_reach_the_host() {
    let opener = FakeOpener::new(Ok(()));
    let resolver = resolver(opener.clone());

    let action = resolver.on_click(&FileLink::from_location("https://example.com/out.csv"));

    assert_eq!(
        action,
        LinkAction::FollowDefault {
            href: "https://example.com/out.csv".into()
        }
    );
    assert!(settle(&resolver).await.is_empty());
    assert!(opener.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn local_paths_are_intercepted_and_sent_to_the_host() {
    let opener = FakeOpener::new(Ok(()));
    let resolver = resolver(opener.clone());

    let action = resolver.on_click(&FileLink::from_location("/var/data/out.csv"));

    assert_eq!(
        action,
        LinkAction::Intercepted {
            path: "/var/data/out.csv".into()
        }
    );
    assert!(settle(&resolver).await.is_empty());
    assert_eq!(
        opener.calls.lock().unwrap().as_slice(),
        ["/var/data/out.csv".to_string()]
    );
}

#[tokio::test]
async fn host_rejection_becomes_a_notice_with_the_server_text() {
    let opener = FakeOpener::new(Err(HostOpenError::Rejected {
        status: 500,
        body: "permission denied".into(),
    }));
    let resolver = resolver(opener);

    resolver.on_click(&FileLink::from_location("/root/secret.txt"));
    let notices = settle(&resolver).await;

    assert_eq!(notices.len(), 1);
    assert!(notices[0].message.contains("permission denied"));
    assert!(resolver.poll_notices().is_empty());
}

#[tokio::test]
async fn each_failed_click_gets_its_own_notice() {
    let opener = FakeOpener::new(Err(HostOpenError::Transport("connection refused".into())));
    let resolver = resolver(opener);

    resolver.on_click(&FileLink::from_location("/a"));
    resolver.on_click(&FileLink::from_location("/b"));
    let notices = settle(&resolver).await;

    assert_eq!(notices.len(), 2);
    assert!(notices
        .iter()
        .all(|n| n.message.contains("connection refused")));
}

#[tokio::test]
async fn open_local_path_reports_success_as_no_notice() {
    let opener = FakeOpener::new(Ok(()));
    assert_eq!(open_local_path(opener.as_ref(), "/tmp/x").await, None);
}
