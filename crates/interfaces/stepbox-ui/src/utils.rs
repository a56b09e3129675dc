use crate::theme::*;
use eframe::egui;
use eframe::egui::Color32;

pub fn section_label(ui: &mut egui::Ui, text: &str) {
    ui.label(
        egui::RichText::new(text)
            .size(10.0)
            .color(COL_GRAY3)
            .strong(),
    );
}

pub fn cmd_button(ui: &mut egui::Ui, label: &str, primary: bool, enabled: bool) -> egui::Response {
    let text_col = match (enabled, primary) {
        (false, _) => COL_GRAY1,
        (true, true) => COL_DARK_GRAY1,
        (true, false) => COL_BLUE5,
    };

    let btn = egui::Button::new(egui::RichText::new(label).size(10.0).color(text_col))
        .min_size(egui::vec2(80.0, 22.0))
        .fill(if enabled && primary {
            COL_BLUE5
        } else {
            Color32::TRANSPARENT
        })
        .stroke(egui::Stroke::new(
            1.0,
            if enabled { COL_BLUE5 } else { COL_DARK_GRAY5 },
        ));

    ui.add_enabled(enabled, btn)
}
