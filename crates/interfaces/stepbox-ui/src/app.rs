use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use crate::components::{details, header, notice, step_box};
use crate::sim::SimulatedRun;
use eframe::egui;
use egui_taffy::taffy::prelude::{auto, length, percent};
use egui_taffy::{taffy, tui, TuiBuilderLogic};
use stepbox_app_core::{StepBoxContext, StepCallbacks, StepVisual, UserNotice};
use stepbox_core::StepState;

/// Parent-view state driven by step box clicks.
#[derive(Debug, Default)]
struct RunViewState {
    filter: Option<String>,
    details: Option<String>,
}

impl RunViewState {
    fn shows(&self, name: &str) -> bool {
        self.filter.as_deref().map_or(true, |f| f == name)
    }
}

impl StepCallbacks for RunViewState {
    fn on_show_state_details(&mut self, name: &str) {
        tracing::debug!(step = name, "show state details");
        self.details = Some(name.to_owned());
    }

    fn on_apply_step_filter(&mut self, name: &str) {
        tracing::debug!(step = name, "apply step filter");
        self.filter = Some(name.to_owned());
    }
}

pub struct StepBoxApp {
    context: StepBoxContext,
    run: SimulatedRun,
    visuals: HashMap<String, StepVisual>,
    view: RunViewState,
    notices: VecDeque<UserNotice>,
}

impl StepBoxApp {
    pub fn new(context: StepBoxContext) -> Self {
        let run = SimulatedRun::demo(context.now_ms());
        Self {
            context,
            run,
            visuals: HashMap::new(),
            view: RunViewState::default(),
            notices: VecDeque::new(),
        }
    }
}

impl eframe::App for StepBoxApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.notices.extend(self.context.resolver().poll_notices());

        let now = self.context.now_ms();
        let steps = self.run.snapshot(now);
        let visible: Vec<_> = steps.iter().filter(|s| self.view.shows(&s.name)).collect();

        // Boxes leaving the list are dropped, which tears down their timers.
        self.visuals
            .retain(|name, _| visible.iter().any(|s| &s.name == name));

        let running = steps
            .iter()
            .filter(|s| s.state == StepState::Running)
            .count();

        if let Some(name) = self.view.details.clone() {
            let step = steps.iter().find(|s| s.name == name);
            let resp = egui::SidePanel::right("step-details")
                .resizable(false)
                .exact_width(260.0)
                .show(ctx, |ui| details::draw(ui, &name, step, now))
                .inner;
            if resp.close {
                self.view.details = None;
            }
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            tui(ui, ui.id().with("root"))
                .reserve_available_space()
                .style(taffy::Style {
                    flex_direction: taffy::FlexDirection::Column,
                    size: percent(1.),
                    min_size: taffy::Size {
                        width: percent(1.),
                        height: length(0.0),
                    },
                    ..Default::default()
                })
                .show(|tui| {
                    tui.style(taffy::Style {
                        size: taffy::Size {
                            width: percent(1.),
                            height: length(32.0),
                        },
                        flex_shrink: 0.0,
                        ..Default::default()
                    })
                    .add(|tui| {
                        let resp = header::draw(
                            tui,
                            running,
                            steps.len(),
                            self.view.filter.as_deref(),
                        );
                        if resp.restart_clicked {
                            tracing::info!("restarting simulated run");
                            self.run.restart(now);
                        }
                        if resp.clear_filter_clicked {
                            self.view.filter = None;
                        }
                    });

                    tui.style(taffy::Style {
                        flex_direction: taffy::FlexDirection::Column,
                        flex_grow: 1.0,
                        flex_basis: length(0.0),
                        size: taffy::Size {
                            width: percent(1.),
                            height: auto(),
                        },
                        min_size: taffy::Size {
                            width: length(0.0),
                            height: length(0.0),
                        },
                        overflow: taffy::Point {
                            x: taffy::Overflow::Hidden,
                            y: taffy::Overflow::Hidden,
                        },
                        padding: length(8.0),
                        ..Default::default()
                    })
                    .add(|tui| {
                        tui.ui(|ui| {
                            egui::ScrollArea::vertical()
                                .auto_shrink([false, false])
                                .show(ui, |ui| {
                                    for props in &visible {
                                        let visual = self
                                            .visuals
                                            .entry(props.name.clone())
                                            .or_insert_with(|| self.context.new_visual());
                                        step_box::draw(
                                            ui,
                                            visual,
                                            props,
                                            self.context.resolver(),
                                            &mut self.view,
                                        );
                                    }
                                });
                        });
                    });
                });
        });

        if let Some(front) = self.notices.front() {
            if notice::draw(ctx, front) {
                self.notices.pop_front();
            }
        }

        if let Some(ms) = self.run.next_change_in(now) {
            ctx.request_repaint_after(Duration::from_millis(ms as u64));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_limits_the_list_to_one_step() {
        let mut view = RunViewState::default();
        assert!(view.shows("a"));

        view.on_apply_step_filter("a");
        assert!(view.shows("a"));
        assert!(!view.shows("b"));
        assert_eq!(view.details, None);
    }

    #[test]
    fn details_click_leaves_the_filter_alone() {
        let mut view = RunViewState::default();
        view.on_show_state_details("b");
        assert_eq!(view.details.as_deref(), Some("b"));
        assert_eq!(view.filter, None);
    }
}
