use crate::theme::*;
use eframe::egui::{
    self, pos2, vec2, Color32, CursorIcon, FontId, Rect, Sense, Stroke, StrokeKind,
};
use stepbox_app_core::{
    FileLinkResolver, Indicator, LinkAction, MaterializationLinkView, StepCallbacks, StepView,
    StepVisual, StepVisualProps,
};
use stepbox_core::{route_click, StepClickTarget, StepState};

const BOX_MARGIN_LEFT: f32 = 15.0;
const BOX_MARGIN_TOP: f32 = 6.0;
const BOX_MIN_WIDTH: f32 = 150.0;
const BOX_PAD: f32 = 4.0;
const BOX_PAD_RIGHT: f32 = 10.0;
const BOX_RADIUS: f32 = 3.0;
const BORDER: f32 = 2.0;
const DOT_SIZE: f32 = 11.0;
const DOT_GAP: f32 = 9.0;
const TIME_GAP: f32 = 10.0;
// Reserved per character so the box keeps its width while seconds tick.
const TIME_CHAR_WIDTH: f32 = 6.8;
const LINK_INDENT: f32 = 23.0;
const FLASH_WIDTH: f32 = 40.0;
const FLASH_TRAVEL: f32 = 150.0;

const DOT_FADE_SECS: f64 = 0.2;
const FLASH_SECS: f64 = 0.4;

/// Last state seen for a box, and when it changed (UI time, seconds).
#[derive(Debug, Clone, Copy)]
struct StateTransition {
    from: StepState,
    to: StepState,
    changed_at: Option<f64>,
}

/// Draws one step box followed by its materialization links.
pub fn draw(
    ui: &mut egui::Ui,
    visual: &mut StepVisual,
    props: &StepVisualProps,
    resolver: &FileLinkResolver,
    callbacks: &mut dyn StepCallbacks,
) {
    let view = visual.render(props).clone();
    let id = ui.make_persistent_id(("step-box", view.name.as_str()));
    let now = ui.input(|i| i.time);
    let delay = props.delay as f64 / 1000.0;
    let transition = track_transition(ui, id, view.state, now);

    ui.vertical(|ui| {
        ui.add_space(BOX_MARGIN_TOP);
        ui.horizontal(|ui| {
            ui.add_space(BOX_MARGIN_LEFT);
            if let Some(target) = draw_box(ui, id, &view, transition, now, delay) {
                visual.click(target, &view.name, callbacks);
            }
        });
        for link in &view.links {
            draw_link(ui, link, resolver);
        }
    });
}

fn track_transition(ui: &egui::Ui, id: egui::Id, state: StepState, now: f64) -> StateTransition {
    let key = id.with("transition");
    ui.data_mut(|d| {
        let next = match d.get_temp::<StateTransition>(key) {
            Some(prev) if prev.to == state => prev,
            Some(prev) => StateTransition {
                from: prev.to,
                to: state,
                changed_at: Some(now),
            },
            None => StateTransition {
                from: state,
                to: state,
                changed_at: None,
            },
        };
        d.insert_temp(key, next);
        next
    })
}

fn draw_box(
    ui: &mut egui::Ui,
    id: egui::Id,
    view: &StepView,
    transition: StateTransition,
    now: f64,
    delay: f64,
) -> Option<StepClickTarget> {
    let name_galley =
        ui.painter()
            .layout_no_wrap(view.name.clone(), FontId::proportional(13.0), COL_DARK_GRAY3);
    let time_galley = view.elapsed_label.as_ref().map(|text| {
        ui.painter()
            .layout_no_wrap(text.clone(), FontId::proportional(11.5), COL_DARK_GRAY3)
    });

    let time_width = match (&time_galley, &view.elapsed_label) {
        (Some(galley), Some(text)) => {
            TIME_GAP + galley.size().x.max(text.len() as f32 * TIME_CHAR_WIDTH)
        }
        _ => 0.0,
    };
    let content_height = name_galley.size().y.max(DOT_SIZE);
    let width = (BORDER * 2.0
        + BOX_PAD
        + DOT_SIZE
        + DOT_GAP
        + name_galley.size().x
        + time_width
        + BOX_PAD_RIGHT)
        .max(BOX_MIN_WIDTH);
    let height = BORDER * 2.0 + BOX_PAD * 2.0 + content_height;

    let (rect, box_resp) = ui.allocate_exact_size(vec2(width, height), Sense::click());
    let inner = rect.shrink(BORDER);
    let dot_rect = Rect::from_min_size(
        pos2(inner.left() + BOX_PAD, inner.center().y - DOT_SIZE / 2.0),
        vec2(DOT_SIZE, DOT_SIZE),
    );
    // Registered after the box so it sits on top and takes the click.
    let indicator_resp = ui
        .interact(dot_rect.expand(2.0), id.with("indicator"), Sense::click())
        .on_hover_cursor(CursorIcon::PointingHand);
    let hovered = box_resp.hovered() || indicator_resp.hovered();

    if ui.is_rect_visible(rect) {
        let mut animating = false;
        let painter = ui.painter();

        painter.rect_filled(
            rect.translate(vec2(0.0, 2.0)),
            BOX_RADIUS,
            Color32::from_black_alpha(76),
        );
        let border = if hovered {
            Stroke::new(BORDER, box_hover_border(view.state))
        } else {
            Stroke::NONE
        };
        painter.rect(
            rect,
            BOX_RADIUS,
            box_fill(view.state),
            border,
            StrokeKind::Inside,
        );

        animating |= paint_finished_flash(painter, rect, view.state, transition, now, delay);

        match view.indicator {
            Indicator::Busy => {
                egui::Spinner::new()
                    .size(DOT_SIZE)
                    .color(COL_GRAY1)
                    .paint_at(ui, dot_rect);
            }
            Indicator::Dot(state) => {
                let (color, fading) =
                    dot_color(state, transition, indicator_resp.hovered(), now, delay);
                animating |= fading;
                painter.circle_filled(dot_rect.center(), DOT_SIZE / 2.0, color);
            }
        }

        let text_color = if hovered { COL_BLACK } else { COL_DARK_GRAY3 };
        let name_pos = pos2(
            dot_rect.right() + DOT_GAP,
            inner.center().y - name_galley.size().y / 2.0,
        );
        let name_right = name_pos.x + name_galley.size().x;
        painter.galley_with_override_text_color(name_pos, name_galley, text_color);

        if let Some(galley) = time_galley {
            let pos = pos2(
                name_right + TIME_GAP,
                inner.center().y - galley.size().y / 2.0,
            );
            painter.galley_with_override_text_color(pos, galley, text_color.gamma_multiply(0.7));
        }

        if animating {
            ui.ctx().request_repaint();
        }
    }

    route_click(indicator_resp.clicked(), box_resp.clicked())
}

fn dot_color(
    state: StepState,
    transition: StateTransition,
    hovered: bool,
    now: f64,
    delay: f64,
) -> (Color32, bool) {
    let style = state_style(state);
    let target = if hovered { style.dot_hover } else { style.dot };
    match transition.changed_at {
        Some(at) => {
            let t = (now - at - delay) / DOT_FADE_SECS;
            if t < 1.0 {
                (mix(state_style(transition.from).dot, target, t as f32), true)
            } else {
                (target, false)
            }
        }
        None => (target, false),
    }
}

/// White sweep across the box once a step succeeds. Returns true while still playing.
fn paint_finished_flash(
    painter: &egui::Painter,
    rect: Rect,
    state: StepState,
    transition: StateTransition,
    now: f64,
    delay: f64,
) -> bool {
    let Some(at) = transition.changed_at else {
        return false;
    };
    if state != StepState::Succeeded {
        return false;
    }

    let progress = (now - at - delay) / FLASH_SECS;
    if progress >= 1.0 {
        return false;
    }
    if progress < 0.0 {
        return true;
    }

    let span = rect.width() + FLASH_TRAVEL * 2.0;
    let x = rect.left() - FLASH_TRAVEL + span * progress as f32;
    let band = Rect::from_min_max(
        pos2(x, rect.top()),
        pos2(x + FLASH_WIDTH, rect.bottom()),
    );
    painter
        .with_clip_rect(rect)
        .rect_filled(band, 0.0, Color32::from_white_alpha(178));
    true
}

fn draw_link(ui: &mut egui::Ui, link: &MaterializationLinkView, resolver: &FileLinkResolver) {
    let galley =
        ui.painter()
            .layout_no_wrap(link.label.clone(), FontId::proportional(12.0), COL_GRAY3);
    let size = vec2(
        BOX_MARGIN_LEFT + LINK_INDENT + galley.size().x + 3.0,
        galley.size().y + 12.0,
    );
    let (rect, resp) = ui.allocate_exact_size(size, Sense::click());
    let color = if resp.hovered() { COL_WHITE } else { COL_GRAY3 };

    if ui.is_rect_visible(rect) {
        let painter = ui.painter();
        let text_pos = pos2(
            rect.left() + BOX_MARGIN_LEFT + LINK_INDENT,
            rect.center().y - galley.size().y / 2.0,
        );
        let glyph = Rect::from_center_size(
            pos2(text_pos.x - 12.0, rect.center().y),
            vec2(16.0, 11.0),
        );
        paint_file_glyph(painter, glyph, color);
        painter.galley_with_override_text_color(text_pos, galley, color);
    }

    let resp = resp
        .on_hover_text(link.title.as_str())
        .on_hover_cursor(CursorIcon::PointingHand);
    if resp.clicked() {
        match resolver.on_click(&link.link) {
            LinkAction::FollowDefault { href } => {
                ui.ctx().open_url(egui::OpenUrl::new_tab(href));
            }
            LinkAction::Intercepted { path } => {
                tracing::debug!(%path, key = %link.key, "materialization handed to host");
            }
        }
    }
}

fn paint_file_glyph(painter: &egui::Painter, rect: Rect, color: Color32) {
    let stroke = Stroke::new(1.0, color);
    let page_left = rect.right() - rect.width() * 0.55;
    let fold = (rect.right() - page_left) * 0.3;
    let fold_x = rect.right() - fold;

    painter.add(egui::Shape::closed_line(
        vec![
            pos2(page_left, rect.top()),
            pos2(fold_x, rect.top()),
            pos2(rect.right(), rect.top() + fold),
            pos2(rect.right(), rect.bottom()),
            pos2(page_left, rect.bottom()),
        ],
        stroke,
    ));
    painter.line_segment(
        [pos2(fold_x, rect.top()), pos2(fold_x, rect.top() + fold)],
        stroke,
    );
    painter.line_segment(
        [pos2(fold_x, rect.top() + fold), pos2(rect.right(), rect.top() + fold)],
        stroke,
    );

    let lead_y = rect.top() + rect.height() * 0.4;
    painter.line_segment(
        [pos2(rect.left(), lead_y), pos2(page_left, lead_y)],
        stroke,
    );
}
