use anyhow::Result;
use std::sync::OnceLock;
use tokio::runtime::Handle;

static RUNTIME: OnceLock<std::result::Result<tokio::runtime::Runtime, String>> = OnceLock::new();

fn runtime() -> Result<&'static tokio::runtime::Runtime> {
    match RUNTIME.get_or_init(|| {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("stepbox-timers")
            .enable_all()
            .build()
            .map_err(|e| e.to_string())
    }) {
        Ok(rt) => Ok(rt),
        Err(message) => Err(anyhow::anyhow!(message.clone())),
    }
}

/// Handle for spawning timers and host-open requests. Reuses the ambient runtime when called
/// from inside one, otherwise the process-wide background runtime.
pub fn runtime_handle() -> Result<Handle> {
    match Handle::try_current() {
        Ok(handle) => Ok(handle),
        Err(_) => Ok(runtime()?.handle().clone()),
    }
}
