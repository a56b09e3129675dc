use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use stepbox_app_core::{RepaintHook, TickScheduler};
use stepbox_core::StepState;
use tokio::runtime::Handle;

fn counting_hook() -> (RepaintHook, Arc<AtomicUsize>) {
    let count = Arc::new(AtomicUsize::new(0));
    let hook_count = count.clone();
    let hook: RepaintHook = Arc::new(move || {
        hook_count.fetch_add(1, Ordering::SeqCst);
    });
    (hook, count)
}

async fn let_time_pass(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
    tokio::task::yield_now().await;
}

#[tokio::test(start_paused = true)]
async fn arms_for_next_second_boundary_while_running() {
    let (hook, _) = counting_hook();
    let mut scheduler = TickScheduler::new(Handle::current(), hook);

    let delay = scheduler.ensure(StepState::Running, Some(10_000), 12_300);

    assert_eq!(delay, Some(Duration::from_millis(700)));
    assert_eq!(scheduler.pending_timers(), 1);
}

#[tokio::test(start_paused = true)]
async fn delay_is_a_full_second_exactly_on_a_boundary() {
    let (hook, _) = counting_hook();
    let mut scheduler = TickScheduler::new(Handle::current(), hook);

    let delay = scheduler.ensure(StepState::Running, Some(10_000), 13_000);

    assert_eq!(delay, Some(Duration::from_millis(1000)));
}

#[tokio::test(start_paused = true)]
async fn stays_idle_unless_running_with_a_start() {
    let (hook, _) = counting_hook();
    let mut scheduler = TickScheduler::new(Handle::current(), hook);

    for state in [StepState::Waiting, StepState::Succeeded, StepState::Failed] {
        assert_eq!(scheduler.ensure(state, Some(0), 500), None);
        assert_eq!(scheduler.pending_timers(), 0);
    }
    assert_eq!(scheduler.ensure(StepState::Running, None, 500), None);
    assert_eq!(scheduler.pending_timers(), 0);
    assert_eq!(scheduler.arm_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn rearming_never_leaves_two_timers() {
    let (hook, repaints) = counting_hook();
    let mut scheduler = TickScheduler::new(Handle::current(), hook);

    scheduler.ensure(StepState::Running, Some(0), 250);
    scheduler.ensure(StepState::Running, Some(0), 250);

    assert_eq!(scheduler.pending_timers(), 1);
    assert_eq!(scheduler.arm_count(), 2);

    let_time_pass(800).await;

    // The cancelled first wakeup never fires.
    assert_eq!(scheduler.ticks(), 1);
    assert_eq!(repaints.load(Ordering::SeqCst), 1);
    assert_eq!(scheduler.pending_timers(), 0);
}

#[tokio::test(start_paused = true)]
async fn firing_bumps_the_counter_once_and_requests_repaint() {
    let (hook, repaints) = counting_hook();
    let mut scheduler = TickScheduler::new(Handle::current(), hook);

    scheduler.ensure(StepState::Running, Some(0), 400);
    let_time_pass(599).await;
    assert_eq!(scheduler.ticks(), 0);

    let_time_pass(2).await;
    assert_eq!(scheduler.ticks(), 1);
    assert_eq!(repaints.load(Ordering::SeqCst), 1);

    // Single shot: nothing more until re-armed.
    let_time_pass(5_000).await;
    assert_eq!(scheduler.ticks(), 1);
}

#[tokio::test(start_paused = true)]
async fn disarm_cancels_pending_wakeup() {
    let (hook, _) = counting_hook();
    let mut scheduler = TickScheduler::new(Handle::current(), hook);

    scheduler.ensure(StepState::Running, Some(0), 0);
    scheduler.ensure(StepState::Succeeded, Some(0), 10);

    assert_eq!(scheduler.pending_timers(), 0);
    let_time_pass(2_000).await;
    assert_eq!(scheduler.ticks(), 0);
}

#[tokio::test(start_paused = true)]
async fn teardown_cancels_and_refuses_new_wakeups() {
    let (hook, repaints) = counting_hook();
    let mut scheduler = TickScheduler::new(Handle::current(), hook);

    scheduler.ensure(StepState::Running, Some(0), 100);
    scheduler.teardown();

    assert!(scheduler.is_torn_down());
    assert_eq!(scheduler.pending_timers(), 0);

    scheduler.ensure(StepState::Running, Some(0), 100);
    assert_eq!(scheduler.pending_timers(), 0);

    let_time_pass(3_000).await;
    assert_eq!(scheduler.ticks(), 0);
    assert_eq!(repaints.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn dropping_the_scheduler_stops_its_timer() {
    let (hook, repaints) = counting_hook();
    let mut scheduler = TickScheduler::new(Handle::current(), hook);
    scheduler.ensure(StepState::Running, Some(0), 100);
    drop(scheduler);

    let_time_pass(3_000).await;
    assert_eq!(repaints.load(Ordering::SeqCst), 0);
}
