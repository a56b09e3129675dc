use crate::theme::*;
use crate::utils::{cmd_button, section_label};
use eframe::egui;
use stepbox_app_core::StepVisualProps;
use stepbox_core::{displayed_elapsed_ms, format_elapsed};

pub struct DetailsResponse {
    pub close: bool,
}

fn format_start(start_ms: i64) -> String {
    chrono::DateTime::from_timestamp_millis(start_ms)
        .map(|t| {
            t.with_timezone(&chrono::Local)
                .format("%H:%M:%S%.3f")
                .to_string()
        })
        .unwrap_or_else(|| "-".to_owned())
}

pub fn draw(
    ui: &mut egui::Ui,
    name: &str,
    step: Option<&StepVisualProps>,
    now_ms: i64,
) -> DetailsResponse {
    let mut close = false;

    ui.horizontal(|ui| {
        section_label(ui, "STATE DETAILS");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            close = cmd_button(ui, "CLOSE", false, true).clicked();
        });
    });
    ui.separator();
    ui.label(egui::RichText::new(name).strong().color(COL_WHITE));

    let Some(step) = step else {
        ui.label(egui::RichText::new("Step is no longer part of this run").color(COL_GRAY3));
        return DetailsResponse { close };
    };

    egui::Grid::new("step-details-grid")
        .num_columns(2)
        .spacing([12.0, 4.0])
        .show(ui, |ui| {
            ui.label(egui::RichText::new("State").color(COL_GRAY3));
            ui.label(step.state.as_str());
            ui.end_row();

            ui.label(egui::RichText::new("Started").color(COL_GRAY3));
            ui.label(step.start.map(format_start).unwrap_or_else(|| "-".into()));
            ui.end_row();

            ui.label(egui::RichText::new("Elapsed").color(COL_GRAY3));
            let elapsed = displayed_elapsed_ms(step.state, step.start, step.elapsed, now_ms);
            ui.label(elapsed.map(format_elapsed).unwrap_or_else(|| "-".into()));
            ui.end_row();
        });

    if !step.materializations.is_empty() {
        ui.add_space(8.0);
        section_label(ui, "MATERIALIZATIONS");
        for m in &step.materializations {
            ui.label(egui::RichText::new(m.file_name.as_str()).color(COL_LIGHT_GRAY2));
            ui.label(
                egui::RichText::new(m.file_location.as_str())
                    .monospace()
                    .size(10.0)
                    .color(COL_GRAY3),
            );
        }
    }

    DetailsResponse { close }
}
