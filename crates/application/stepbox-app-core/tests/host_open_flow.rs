use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::RawQuery;
use axum::http::StatusCode;
use axum::{routing::get, Router};
use stepbox_app_core::{FileLinkResolver, LinkAction, RepaintHook};
use stepbox_core::FileLink;
use stepbox_infra::HttpHostOpener;
use tokio::runtime::Handle;

async fn start_server(
    status: StatusCode,
    body: &'static str,
) -> (SocketAddr, Arc<Mutex<Vec<String>>>, tokio::task::JoinHandle<()>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let route_seen = seen.clone();
    let app = Router::new().route(
        "/dagit/open",
        get(move |RawQuery(query): RawQuery| {
            let seen = route_seen.clone();
            async move {
                seen.lock().unwrap().push(query.unwrap_or_default());
                (status, body)
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, seen, handle)
}

fn http_resolver(addr: SocketAddr) -> FileLinkResolver {
    let opener = HttpHostOpener::new(reqwest::Client::new(), format!("http://{addr}"));
    let hook: RepaintHook = Arc::new(|| {});
    FileLinkResolver::new(Arc::new(opener), Handle::current(), hook)
}

async fn wait_idle(resolver: &FileLinkResolver) {
    for _ in 0..200 {
        if resolver.in_flight() == 0 {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("host open request did not finish");
}

#[tokio::test]
async fn clicking_a_local_file_asks_the_host_with_an_encoded_path() {
    let (addr, seen, handle) = start_server(StatusCode::OK, "").await;
    let resolver = http_resolver(addr);

    let action = resolver.on_click(&FileLink::from_location("/var/data/out.csv"));
    assert!(matches!(action, LinkAction::Intercepted { .. }));
    wait_idle(&resolver).await;

    assert_eq!(
        seen.lock().unwrap().as_slice(),
        ["path=%2Fvar%2Fdata%2Fout.csv".to_string()]
    );
    assert!(resolver.poll_notices().is_empty());
    handle.abort();
}

#[tokio::test]
async fn server_error_text_reaches_the_user() {
    let (addr, _seen, handle) =
        start_server(StatusCode::INTERNAL_SERVER_ERROR, "permission denied").await;
    let resolver = http_resolver(addr);

    resolver.on_click(&FileLink::from_location("/var/data/out.csv"));
    wait_idle(&resolver).await;

    let notices = resolver.poll_notices();
    assert_eq!(notices.len(), 1);
    assert!(notices[0].message.contains("permission denied"));
    handle.abort();
}
