use crate::theme::*;
use crate::utils::cmd_button;
use eframe::egui;
use stepbox_app_core::UserNotice;

/// Blocking notice. Returns true once the user dismissed it.
pub fn draw(ctx: &egui::Context, notice: &UserNotice) -> bool {
    let modal = egui::Modal::new(egui::Id::new("stepbox-notice")).show(ctx, |ui| {
        ui.set_width(360.0);
        ui.label(
            egui::RichText::new(notice.title.as_str())
                .size(14.0)
                .strong()
                .color(COL_WHITE),
        );
        ui.add_space(6.0);
        ui.label(notice.message.as_str());
        ui.add_space(10.0);
        cmd_button(ui, "OK", true, true).clicked()
    });
    modal.inner || modal.should_close()
}
