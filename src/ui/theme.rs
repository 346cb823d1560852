use egui::{Color32, FontId, Rounding, Stroke, Visuals};

use crate::model::{InterventionKind, ReservationStatus};

// ── Palette ──────────────────────────────────────────────────────────────────

pub const BG_DARK: Color32 = Color32::from_rgb(22, 23, 30);
pub const BG_PANEL: Color32 = Color32::from_rgb(28, 30, 39);
pub const BG_HEADER: Color32 = Color32::from_rgb(33, 36, 47);
pub const BG_ROW_EVEN: Color32 = Color32::from_rgba_premultiplied(255, 255, 255, 6);

pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(48, 51, 63);
pub const ACCENT: Color32 = Color32::from_rgb(86, 148, 224);

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(228, 231, 240);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(152, 158, 176);
pub const TEXT_DIM: Color32 = Color32::from_rgb(98, 104, 120);
pub const TEXT_ON_BAR: Color32 = Color32::from_rgb(255, 255, 255);

pub const TODAY_LINE: Color32 = Color32::from_rgb(240, 82, 82);
pub const GRID_LINE: Color32 = Color32::from_rgb(42, 45, 57);
pub const TICK_LINE: Color32 = Color32::from_rgb(52, 55, 68);
pub const WEEKEND_SHADE: Color32 = Color32::from_rgba_premultiplied(255, 255, 255, 4);

/// Outline drawn along jigsaw joints so the tab reads against both bars.
pub const JOINT_OUTLINE: Color32 = Color32::from_rgba_premultiplied(255, 255, 255, 48);

// ── Sizes ────────────────────────────────────────────────────────────────────

pub const PROPERTY_COL_WIDTH: f32 = 190.0;
pub const HEADER_HEIGHT: f32 = 44.0;
pub const ROW_HEIGHT: f32 = 64.0;
pub const ROW_GAP: f32 = 2.0;

/// Vertical inset of the reservation band within its row.
pub const RESERVATION_BAR_TOP: f32 = 7.0;
pub const RESERVATION_BAR_HEIGHT: f32 = 26.0;
pub const INTERVENTION_BAR_HEIGHT: f32 = 18.0;
/// Downward shift per extra intervention linked to the same reservation.
pub const LINKED_STACK_OFFSET: f32 = 6.0;

pub const BAR_ROUNDING: f32 = 5.0;

// ── Fonts ────────────────────────────────────────────────────────────────────

pub fn font_header() -> FontId {
    FontId::proportional(12.0)
}

pub fn font_sub() -> FontId {
    FontId::proportional(10.5)
}

pub fn font_bar() -> FontId {
    FontId::proportional(11.5)
}

pub fn font_small() -> FontId {
    FontId::proportional(9.5)
}

pub fn font_menu() -> FontId {
    FontId::proportional(12.5)
}

pub fn font_status() -> FontId {
    FontId::proportional(11.0)
}

// ── Record colors ────────────────────────────────────────────────────────────

pub fn status_color(status: ReservationStatus) -> Color32 {
    match status {
        ReservationStatus::Pending => Color32::from_rgb(222, 168, 36),
        ReservationStatus::Confirmed => Color32::from_rgb(66, 133, 244),
        ReservationStatus::CheckedIn => Color32::from_rgb(52, 168, 83),
        ReservationStatus::CheckedOut => Color32::from_rgb(110, 116, 132),
        ReservationStatus::Cancelled => Color32::from_rgb(171, 66, 66),
    }
}

pub fn kind_color(kind: InterventionKind) -> Color32 {
    match kind {
        InterventionKind::Cleaning => Color32::from_rgb(0, 172, 193),
        InterventionKind::Maintenance => Color32::from_rgb(235, 129, 27),
    }
}

// ── Apply custom visuals ─────────────────────────────────────────────────────

pub fn apply_theme(ctx: &egui::Context) {
    let mut visuals = Visuals::dark();

    visuals.override_text_color = Some(TEXT_PRIMARY);
    visuals.panel_fill = BG_PANEL;
    visuals.window_fill = BG_PANEL;
    visuals.extreme_bg_color = Color32::from_rgb(18, 19, 26);
    visuals.faint_bg_color = BG_ROW_EVEN;

    visuals.widgets.noninteractive.bg_fill = BG_PANEL;
    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, TEXT_SECONDARY);
    visuals.widgets.noninteractive.rounding = Rounding::same(4.0);

    visuals.widgets.inactive.bg_fill = Color32::from_rgb(40, 43, 55);
    visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);
    visuals.widgets.inactive.rounding = Rounding::same(4.0);

    visuals.widgets.hovered.bg_fill = Color32::from_rgb(50, 53, 67);
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, ACCENT);
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);
    visuals.widgets.hovered.rounding = Rounding::same(4.0);

    visuals.widgets.active.bg_fill = Color32::from_rgb(58, 61, 75);
    visuals.widgets.active.bg_stroke = Stroke::new(1.0, ACCENT);
    visuals.widgets.active.fg_stroke = Stroke::new(2.0, Color32::WHITE);
    visuals.widgets.active.rounding = Rounding::same(4.0);

    visuals.widgets.open.bg_fill = Color32::from_rgb(48, 51, 65);
    visuals.widgets.open.bg_stroke = Stroke::new(1.0, ACCENT);
    visuals.widgets.open.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);
    visuals.widgets.open.rounding = Rounding::same(4.0);

    visuals.selection.bg_fill = Color32::from_rgba_premultiplied(86, 148, 224, 45);
    visuals.selection.stroke = Stroke::new(1.0, ACCENT);

    visuals.window_rounding = Rounding::same(8.0);
    visuals.window_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.striped = false;

    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(8.0, 4.0);
    style.spacing.button_padding = egui::vec2(8.0, 4.0);
    ctx.set_style(style);
}
