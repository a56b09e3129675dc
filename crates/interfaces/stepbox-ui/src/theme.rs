use eframe::egui::{self, Color32, FontFamily, FontId, Stroke, TextStyle, Visuals};
use stepbox_core::StepState;

// Blueprint palette
pub const COL_BLACK: Color32 = Color32::from_rgb(16, 22, 26);
pub const COL_DARK_GRAY1: Color32 = Color32::from_rgb(24, 32, 38);
pub const COL_DARK_GRAY3: Color32 = Color32::from_rgb(41, 55, 66);
pub const COL_DARK_GRAY5: Color32 = Color32::from_rgb(57, 75, 89);
pub const COL_GRAY1: Color32 = Color32::from_rgb(92, 112, 128);
pub const COL_GRAY2: Color32 = Color32::from_rgb(115, 134, 148);
pub const COL_GRAY3: Color32 = Color32::from_rgb(138, 155, 168);
pub const COL_GRAY4: Color32 = Color32::from_rgb(167, 182, 194);
pub const COL_LIGHT_GRAY2: Color32 = Color32::from_rgb(216, 225, 232);
pub const COL_LIGHT_GRAY4: Color32 = Color32::from_rgb(235, 241, 245);
pub const COL_WHITE: Color32 = Color32::from_rgb(255, 255, 255);
pub const COL_GREEN2: Color32 = Color32::from_rgb(13, 128, 80);
pub const COL_GREEN3: Color32 = Color32::from_rgb(15, 153, 96);
pub const COL_RED3: Color32 = Color32::from_rgb(219, 55, 55);
pub const COL_RED5: Color32 = Color32::from_rgb(255, 115, 115);
pub const COL_BLUE5: Color32 = Color32::from_rgb(72, 175, 240);

/// Indicator dot colors for one state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateStyle {
    pub dot: Color32,
    pub dot_hover: Color32,
}

pub fn state_style(state: StepState) -> StateStyle {
    match state {
        StepState::Waiting => StateStyle {
            dot: COL_GRAY1,
            dot_hover: COL_GRAY2,
        },
        StepState::Running => StateStyle {
            dot: COL_GRAY3,
            dot_hover: COL_GRAY4,
        },
        StepState::Succeeded => StateStyle {
            dot: COL_GREEN2,
            dot_hover: COL_GREEN3,
        },
        StepState::Failed => StateStyle {
            dot: COL_RED3,
            dot_hover: COL_RED5,
        },
    }
}

pub fn box_fill(state: StepState) -> Color32 {
    match state {
        StepState::Waiting => COL_GRAY3,
        StepState::Running | StepState::Succeeded | StepState::Failed => COL_LIGHT_GRAY2,
    }
}

pub fn box_hover_border(state: StepState) -> Color32 {
    match state {
        StepState::Waiting => COL_LIGHT_GRAY4,
        StepState::Running | StepState::Succeeded | StepState::Failed => COL_WHITE,
    }
}

/// Linear blend of two opaque colors.
pub fn mix(from: Color32, to: Color32, t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let channel = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
    Color32::from_rgb(
        channel(from.r(), to.r()),
        channel(from.g(), to.g()),
        channel(from.b(), to.b()),
    )
}

pub fn setup(ctx: &egui::Context) {
    let mut visuals = Visuals::dark();
    visuals.window_fill = COL_DARK_GRAY3;
    visuals.panel_fill = COL_DARK_GRAY3;

    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, COL_DARK_GRAY5);
    visuals.widgets.inactive.bg_fill = COL_DARK_GRAY1;
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, COL_GRAY3);

    visuals.widgets.hovered.bg_fill = COL_BLUE5.linear_multiply(0.1);
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, COL_BLUE5);
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, COL_WHITE);

    visuals.selection.bg_fill = COL_BLUE5.linear_multiply(0.3);
    visuals.selection.stroke = Stroke::new(1.0, COL_BLUE5);

    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();
    style.text_styles = [
        (TextStyle::Heading, FontId::new(16.0, FontFamily::Proportional)),
        (TextStyle::Body, FontId::new(13.0, FontFamily::Proportional)),
        (
            TextStyle::Monospace,
            FontId::new(12.0, FontFamily::Monospace),
        ),
        (TextStyle::Button, FontId::new(11.0, FontFamily::Proportional)),
        (TextStyle::Small, FontId::new(10.0, FontFamily::Proportional)),
    ]
    .into();
    style.spacing.item_spacing = egui::vec2(6.0, 6.0);

    ctx.set_style(style);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_state_has_a_distinct_dot_color() {
        let dots: Vec<Color32> = StepState::ALL.iter().map(|s| state_style(*s).dot).collect();
        for (i, a) in dots.iter().enumerate() {
            for b in &dots[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn hovering_changes_the_dot_for_every_state() {
        for state in StepState::ALL {
            let style = state_style(state);
            assert_ne!(style.dot, style.dot_hover, "{state:?}");
        }
    }

    #[test]
    fn mix_hits_both_ends() {
        assert_eq!(mix(COL_BLACK, COL_WHITE, 0.0), COL_BLACK);
        assert_eq!(mix(COL_BLACK, COL_WHITE, 1.0), COL_WHITE);
        assert_eq!(mix(COL_BLACK, COL_WHITE, 7.0), COL_WHITE);
    }
}
