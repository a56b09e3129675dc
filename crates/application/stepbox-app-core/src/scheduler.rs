use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use stepbox_core::{next_tick_delay_ms, StepState};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::debug;

/// Called after every tick so the UI schedules a new frame.
pub type RepaintHook = Arc<dyn Fn() + Send + Sync>;

#[derive(Debug)]
struct TickState {
    ticks: u64,
    alive: bool,
}

struct TickShared {
    state: Mutex<TickState>,
    repaint: RepaintHook,
}

impl TickShared {
    fn fire(&self) {
        {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            if !state.alive {
                return;
            }
            state.ticks += 1;
            debug!(tick = state.ticks, "elapsed tick fired");
        }
        (self.repaint)();
    }
}

/// Single-shot wakeup owned by one step box.
///
/// At most one wakeup is ever pending: arming cancels the previous one first. Firing bumps the
/// tick counter and calls the repaint hook; the owner then re-arms on its next render. After
/// [`TickScheduler::teardown`] nothing fires and the counter is frozen.
pub struct TickScheduler {
    handle: Handle,
    shared: Arc<TickShared>,
    pending: Option<JoinHandle<()>>,
    arms: u64,
}

impl TickScheduler {
    pub fn new(handle: Handle, repaint: RepaintHook) -> Self {
        Self {
            handle,
            shared: Arc::new(TickShared {
                state: Mutex::new(TickState {
                    ticks: 0,
                    alive: true,
                }),
                repaint,
            }),
            pending: None,
            arms: 0,
        }
    }

    pub fn ticks(&self) -> u64 {
        self.lock_state().ticks
    }

    pub fn is_torn_down(&self) -> bool {
        !self.lock_state().alive
    }

    /// Wakeups scheduled but not yet fired or cancelled. Zero or one.
    pub fn pending_timers(&self) -> usize {
        self.pending
            .iter()
            .filter(|task| !task.is_finished())
            .count()
    }

    /// Total number of times a wakeup was scheduled.
    pub fn arm_count(&self) -> u64 {
        self.arms
    }

    pub fn disarm(&mut self) {
        if let Some(task) = self.pending.take() {
            task.abort();
        }
    }

    pub fn arm(&mut self, delay: Duration) {
        self.disarm();
        if self.is_torn_down() {
            return;
        }

        let shared = self.shared.clone();
        self.pending = Some(self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            shared.fire();
        }));
        self.arms += 1;
        debug!(delay_ms = delay.as_millis() as u64, "elapsed tick armed");
    }

    /// Render-cycle hook: always disarms, then arms for the next second boundary if the step is
    /// running and has a start timestamp. Returns the scheduled delay.
    pub fn ensure(
        &mut self,
        state: StepState,
        start_ms: Option<i64>,
        now_ms: i64,
    ) -> Option<Duration> {
        self.disarm();
        match start_ms {
            Some(start) if state.is_running() => {
                let delay = Duration::from_millis(next_tick_delay_ms(start, now_ms) as u64);
                self.arm(delay);
                Some(delay)
            }
            _ => None,
        }
    }

    pub fn teardown(&mut self) {
        self.lock_state().alive = false;
        self.disarm();
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, TickState> {
        self.shared
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for TickScheduler {
    fn drop(&mut self) {
        self.teardown();
    }
}
