use std::sync::Arc;

use anyhow::Result;
use stepbox_core::{Clock, HostOpener};
use stepbox_infra::{HttpHostOpener, SystemClock};
use tokio::runtime::Handle;
use tracing::info;

use crate::links::FileLinkResolver;
use crate::scheduler::{RepaintHook, TickScheduler};
use crate::visual::StepVisual;

/// Shared wiring for every step box in a window: clock, runtime, repaint hook, link resolver.
pub struct StepBoxContext {
    clock: Arc<dyn Clock>,
    handle: Handle,
    repaint: RepaintHook,
    resolver: FileLinkResolver,
}

impl StepBoxContext {
    /// System clock and the HTTP host opener pointed at the configured server root.
    pub fn new(repaint: RepaintHook) -> Result<Self> {
        let server_root = stepbox_config::server_root();
        info!(%server_root, "host open endpoint configured");
        let opener = HttpHostOpener::new(reqwest::Client::new(), server_root);
        Self::with_parts(Arc::new(SystemClock), Arc::new(opener), repaint)
    }

    pub fn with_parts(
        clock: Arc<dyn Clock>,
        opener: Arc<dyn HostOpener>,
        repaint: RepaintHook,
    ) -> Result<Self> {
        let handle = crate::runtime_handle()?;
        let resolver = FileLinkResolver::new(opener, handle.clone(), repaint.clone());
        Ok(Self {
            clock,
            handle,
            repaint,
            resolver,
        })
    }

    pub fn new_visual(&self) -> StepVisual {
        let scheduler = TickScheduler::new(self.handle.clone(), self.repaint.clone());
        StepVisual::new(self.clock.clone(), scheduler)
    }

    pub fn resolver(&self) -> &FileLinkResolver {
        &self.resolver
    }

    pub fn now_ms(&self) -> i64 {
        self.clock.now_ms()
    }
}
