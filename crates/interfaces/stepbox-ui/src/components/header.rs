use crate::theme::*;
use crate::utils::cmd_button;
use eframe::egui;
use egui_taffy::bg::simple::{TuiBackground, TuiBuilderLogicWithBackground};
use egui_taffy::taffy::prelude::{length, percent};
use egui_taffy::{taffy, TuiBuilderLogic};

pub struct HeaderResponse {
    pub restart_clicked: bool,
    pub clear_filter_clicked: bool,
}

pub fn draw<'a>(
    tui: impl TuiBuilderLogic<'a>,
    running_steps: usize,
    total_steps: usize,
    filter: Option<&str>,
) -> HeaderResponse {
    let mut restart_clicked = false;
    let mut clear_filter_clicked = false;

    tui.style(taffy::Style {
        flex_direction: taffy::FlexDirection::Row,
        justify_content: Some(taffy::JustifyContent::SpaceBetween),
        align_items: Some(taffy::AlignItems::Center),
        padding: length(6.0),
        size: taffy::Size {
            width: percent(1.),
            height: percent(1.),
        },
        ..Default::default()
    })
    .bg_add(
        TuiBackground::new()
            .with_background_color(COL_DARK_GRAY1)
            .with_border_color(COL_DARK_GRAY5)
            .with_border_width(1.0),
        |tui| {
            tui.style(taffy::Style {
                flex_direction: taffy::FlexDirection::Row,
                align_items: Some(taffy::AlignItems::Center),
                gap: length(8.0),
                ..Default::default()
            })
            .add(|tui| {
                tui.label(
                    egui::RichText::new("EXECUTION PLAN")
                        .size(12.0)
                        .extra_letter_spacing(2.0)
                        .strong()
                        .color(COL_WHITE),
                );
                tui.label(
                    egui::RichText::new(format!("{total_steps} steps"))
                        .size(10.0)
                        .color(COL_GRAY3),
                );
                if let Some(filter) = filter {
                    tui.label(
                        egui::RichText::new(format!("FILTER: {filter}"))
                            .size(10.0)
                            .color(COL_BLUE5),
                    );
                    let resp = tui.ui(|ui| cmd_button(ui, "CLEAR", false, true));
                    clear_filter_clicked |= resp.clicked();
                }
            });

            tui.style(taffy::Style {
                flex_direction: taffy::FlexDirection::Row,
                align_items: Some(taffy::AlignItems::Center),
                gap: length(6.0),
                ..Default::default()
            })
            .add(|tui| {
                if running_steps > 0 {
                    tui.ui_add(egui::Spinner::new());
                    tui.label(
                        egui::RichText::new(format!("RUNNING: {running_steps}"))
                            .color(COL_GRAY3)
                            .size(10.0),
                    );
                } else {
                    tui.label(
                        egui::RichText::new("STATUS: IDLE")
                            .color(COL_GRAY3)
                            .size(10.0),
                    );
                }
                let resp = tui.ui(|ui| cmd_button(ui, "RESTART", true, true));
                restart_clicked |= resp.clicked();
            });
        },
    );

    HeaderResponse {
        restart_clicked,
        clear_filter_clicked,
    }
}
