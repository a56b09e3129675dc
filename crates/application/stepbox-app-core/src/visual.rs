use std::sync::Arc;

use stepbox_core::{
    displayed_elapsed_ms, format_elapsed, Clock, FileLink, Materialization, StepClickTarget,
    StepState,
};
use tracing::debug;

use crate::scheduler::TickScheduler;

/// Handlers owned by the view that lists the steps.
pub trait StepCallbacks {
    fn on_show_state_details(&mut self, name: &str);
    fn on_apply_step_filter(&mut self, name: &str);
}

/// Everything the data provider knows about one step, for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct StepVisualProps {
    pub state: StepState,
    pub name: String,
    /// Epoch milliseconds. Only meaningful while running.
    pub start: Option<i64>,
    /// Milliseconds. Authoritative once the step is no longer running.
    pub elapsed: Option<f64>,
    /// Presentation stagger in milliseconds; styling only.
    pub delay: u64,
    pub materializations: Vec<Materialization>,
}

impl StepVisualProps {
    pub fn new(name: impl Into<String>, state: StepState) -> Self {
        Self {
            state,
            name: name.into(),
            start: None,
            elapsed: None,
            delay: 0,
            materializations: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    Busy,
    Dot(StepState),
}

impl Indicator {
    pub fn for_state(state: StepState) -> Self {
        match state {
            StepState::Running => Indicator::Busy,
            other => Indicator::Dot(other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializationLinkView {
    /// List key; the raw location.
    pub key: String,
    pub label: String,
    /// Hover text; the raw location.
    pub title: String,
    pub link: FileLink,
}

impl From<&Materialization> for MaterializationLinkView {
    fn from(m: &Materialization) -> Self {
        Self {
            key: m.file_location.clone(),
            label: m.file_name.clone(),
            title: m.file_location.clone(),
            link: m.link(),
        }
    }
}

/// Computed content of a step box.
#[derive(Debug, Clone, PartialEq)]
pub struct StepView {
    pub state: StepState,
    pub name: String,
    pub indicator: Indicator,
    pub elapsed_ms: Option<f64>,
    pub elapsed_label: Option<String>,
    pub links: Vec<MaterializationLinkView>,
}

impl StepView {
    pub fn compute(props: &StepVisualProps, now_ms: i64) -> Self {
        let elapsed_ms = displayed_elapsed_ms(props.state, props.start, props.elapsed, now_ms);
        Self {
            state: props.state,
            name: props.name.clone(),
            indicator: Indicator::for_state(props.state),
            elapsed_ms,
            elapsed_label: elapsed_ms.map(format_elapsed),
            links: props
                .materializations
                .iter()
                .map(MaterializationLinkView::from)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct RenderKey {
    state: StepState,
    name: String,
    elapsed: Option<f64>,
    tick: u64,
}

impl RenderKey {
    fn of(props: &StepVisualProps, tick: u64) -> Self {
        Self {
            state: props.state,
            name: props.name.clone(),
            elapsed: props.elapsed,
            tick,
        }
    }
}

struct Rendered {
    key: RenderKey,
    view: StepView,
}

/// One step box. Caches its view and only recomputes when state, name, supplied elapsed time
/// or its own tick counter changed; each recompute re-arms the tick scheduler.
pub struct StepVisual {
    clock: Arc<dyn Clock>,
    scheduler: TickScheduler,
    rendered: Option<Rendered>,
    renders: u64,
}

impl StepVisual {
    pub fn new(clock: Arc<dyn Clock>, scheduler: TickScheduler) -> Self {
        Self {
            clock,
            scheduler,
            rendered: None,
            renders: 0,
        }
    }

    pub fn render(&mut self, props: &StepVisualProps) -> &StepView {
        let key = RenderKey::of(props, self.scheduler.ticks());
        let rendered = match self.rendered.take() {
            Some(cached) if cached.key == key => cached,
            _ => {
                let now = self.clock.now_ms();
                let view = StepView::compute(props, now);
                self.renders += 1;
                let delay = self.scheduler.ensure(props.state, props.start, now);
                debug!(
                    step = %props.name,
                    state = props.state.as_str(),
                    next_tick_ms = delay.map(|d| d.as_millis() as u64),
                    "step box rendered"
                );
                Rendered { key, view }
            }
        };
        &self.rendered.insert(rendered).view
    }

    /// Invokes the handler for `target`. A click reaches exactly one handler.
    pub fn click(&self, target: StepClickTarget, name: &str, callbacks: &mut dyn StepCallbacks) {
        match target {
            StepClickTarget::Indicator => callbacks.on_show_state_details(name),
            StepClickTarget::Box => callbacks.on_apply_step_filter(name),
        }
    }

    pub fn render_count(&self) -> u64 {
        self.renders
    }

    pub fn scheduler(&self) -> &TickScheduler {
        &self.scheduler
    }

    pub fn teardown(&mut self) {
        self.scheduler.teardown();
    }
}
