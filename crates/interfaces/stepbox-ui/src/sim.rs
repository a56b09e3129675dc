//! Scripted stand-in for the run data provider: a fixed plan whose step states follow the clock.

use stepbox_app_core::StepVisualProps;
use stepbox_core::{Materialization, StepState};

const STAGGER_MS: u64 = 50;

#[derive(Debug, Clone)]
struct ScriptedStep {
    name: &'static str,
    offset_ms: i64,
    run_ms: i64,
    outcome: StepState,
    materializations: Vec<Materialization>,
}

#[derive(Debug, Clone)]
pub struct SimulatedRun {
    started_at_ms: i64,
    steps: Vec<ScriptedStep>,
}

impl SimulatedRun {
    pub fn demo(now_ms: i64) -> Self {
        let step = |name, offset_ms, run_ms, outcome| ScriptedStep {
            name,
            offset_ms,
            run_ms,
            outcome,
            materializations: Vec::new(),
        };

        let mut clean = step("clean_rows.transform", 1_800, 4_200, StepState::Succeeded);
        clean.materializations = vec![Materialization::new(
            "/tmp/stepbox/clean_rows.csv",
            "clean_rows.csv",
        )];

        let mut publish = step("publish.materialize", 71_000, 3_000, StepState::Succeeded);
        publish.materializations = vec![
            Materialization::new("/tmp/stepbox/report.html", "report.html"),
            Materialization::new("https://example.com/runs/latest/report.html", "shared report"),
        ];

        Self {
            started_at_ms: now_ms,
            steps: vec![
                step("load_raw_data.transform", 0, 1_800, StepState::Succeeded),
                clean,
                step("score_rows.transform", 6_000, 420, StepState::Succeeded),
                step("fit_model.transform", 6_000, 65_000, StepState::Succeeded),
                step("export_metrics.transform", 71_000, 2_500, StepState::Failed),
                publish,
            ],
        }
    }

    pub fn restart(&mut self, now_ms: i64) {
        self.started_at_ms = now_ms;
    }

    pub fn snapshot(&self, now_ms: i64) -> Vec<StepVisualProps> {
        self.steps
            .iter()
            .enumerate()
            .map(|(i, step)| {
                let start = self.started_at_ms + step.offset_ms;
                let finish = start + step.run_ms;
                let mut props = StepVisualProps::new(step.name, StepState::Waiting);
                props.delay = i as u64 * STAGGER_MS;

                if now_ms >= finish {
                    props.state = step.outcome;
                    props.start = Some(start);
                    props.elapsed = Some(step.run_ms as f64);
                    if step.outcome == StepState::Succeeded {
                        props.materializations = step.materializations.clone();
                    }
                } else if now_ms >= start {
                    props.state = StepState::Running;
                    props.start = Some(start);
                }
                props
            })
            .collect()
    }

    /// Milliseconds until some step changes state, if any still will.
    pub fn next_change_in(&self, now_ms: i64) -> Option<i64> {
        self.steps
            .iter()
            .flat_map(|step| {
                let start = self.started_at_ms + step.offset_ms;
                [start, start + step.run_ms]
            })
            .filter(|at| *at > now_ms)
            .map(|at| at - now_ms)
            .min()
    }
}
