use std::collections::HashSet;
use std::time::Instant;

use chrono::{Datelike, NaiveDate};
use egui::{pos2, vec2, Color32, Pos2, Rect, Rounding, Sense, Stroke, Ui};
use uuid::Uuid;

use crate::app::StaygridApp;
use crate::model::rows::PropertyRow;
use crate::model::{geometry, jigsaw, property, rows};
use crate::model::{Intervention, Reservation, VisibleRange, ZoomLevel};
use crate::ui::theme;

const HEADER_HEIGHT: f32 = theme::HEADER_HEIGHT;
const ROW_HEIGHT: f32 = theme::ROW_HEIGHT;
const ROW_GAP: f32 = theme::ROW_GAP;

/// Render the operations grid: fixed property column on the left, the
/// horizontally scrollable day canvas on the right.
pub fn show_timeline_grid(app: &mut StaygridApp, ui: &mut Ui) {
    let range = app.controller.range;
    let zoom = app.zoom;
    let today = app.controller.today;
    let show_interventions = app.show_interventions;

    let reservations = app.filtered_reservations();
    let interventions = app.filtered_interventions();
    let page = property::page_slice(&app.portfolio.properties, app.property_page).to_vec();
    let grid_rows = rows::assemble_rows(&page, &reservations, &interventions);

    let grid_height = HEADER_HEIGHT + grid_rows.len() as f32 * (ROW_HEIGHT + ROW_GAP) + 8.0;
    let data_ready = !app.portfolio.properties.is_empty();

    // Today-scroll wins over a zoom re-center; both are one-shot.
    let pending_scroll = if data_ready {
        app.sync
            .take_today_scroll(&range, zoom, today)
            .or_else(|| app.sync.take_scroll_target())
    } else {
        app.sync.take_scroll_target()
    };

    ui.horizontal_top(|ui| {
        draw_property_column(&grid_rows, grid_height, ui);

        let viewport_width = ui.available_width();
        let canvas_width = range.total_width_px(zoom);

        let mut area = egui::ScrollArea::horizontal()
            .id_salt("timeline_grid")
            .auto_shrink([false, false]);
        if let Some(target) = pending_scroll {
            area = area.scroll_offset(vec2(target, 0.0));
        }

        let output = area.show(ui, |ui| {
            let (response, painter) = ui.allocate_painter(
                vec2(canvas_width.max(viewport_width), grid_height),
                Sense::hover(),
            );
            let origin = response.rect.min;

            painter.rect_filled(response.rect, 0.0, theme::BG_DARK);
            draw_header(&painter, origin, &range, zoom, grid_height);

            for (i, row) in grid_rows.iter().enumerate() {
                let row_top = origin.y + HEADER_HEIGHT + i as f32 * (ROW_HEIGHT + ROW_GAP);
                draw_row_background(&painter, origin, row_top, canvas_width, i);
                draw_row_bars(
                    ui,
                    &painter,
                    origin,
                    row_top,
                    row,
                    row_background_color(i),
                    &range,
                    zoom,
                    today,
                    show_interventions,
                );
            }

            draw_today_line(&painter, origin, &range, zoom, today, grid_height);
        });

        let now = Instant::now();
        if let Some((year, month)) = app.sync.on_frame(
            output.state.offset.x,
            viewport_width,
            canvas_width,
            &range,
            zoom,
            now,
        ) {
            app.month_title = month_title(year, month);
        }
    });
}

fn month_title(year: i32, month: u32) -> String {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.format("%B %Y").to_string())
        .unwrap_or_default()
}

fn draw_property_column(grid_rows: &[PropertyRow], grid_height: f32, ui: &mut Ui) {
    let (response, painter) = ui.allocate_painter(
        vec2(theme::PROPERTY_COL_WIDTH, grid_height),
        Sense::hover(),
    );
    let origin = response.rect.min;

    painter.rect_filled(response.rect, 0.0, theme::BG_PANEL);
    painter.rect_filled(
        Rect::from_min_size(origin, vec2(theme::PROPERTY_COL_WIDTH, HEADER_HEIGHT)),
        0.0,
        theme::BG_HEADER,
    );
    painter.text(
        pos2(origin.x + 10.0, origin.y + HEADER_HEIGHT / 2.0),
        egui::Align2::LEFT_CENTER,
        "Properties",
        theme::font_header(),
        theme::TEXT_SECONDARY,
    );

    for (i, row) in grid_rows.iter().enumerate() {
        let y = origin.y + HEADER_HEIGHT + i as f32 * (ROW_HEIGHT + ROW_GAP);
        painter.text(
            pos2(origin.x + 10.0, y + 22.0),
            egui::Align2::LEFT_CENTER,
            &row.property.name,
            theme::font_bar(),
            theme::TEXT_PRIMARY,
        );
        painter.text(
            pos2(origin.x + 10.0, y + 40.0),
            egui::Align2::LEFT_CENTER,
            format!("{} · {}", row.property.address, row.property.city),
            theme::font_small(),
            theme::TEXT_DIM,
        );
        painter.line_segment(
            [
                pos2(origin.x, y + ROW_HEIGHT + ROW_GAP),
                pos2(origin.x + theme::PROPERTY_COL_WIDTH, y + ROW_HEIGHT + ROW_GAP),
            ],
            Stroke::new(0.5, theme::BORDER_SUBTLE),
        );
    }

    painter.line_segment(
        [
            pos2(response.rect.right(), origin.y),
            pos2(response.rect.right(), origin.y + grid_height),
        ],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );
}

fn draw_header(
    painter: &egui::Painter,
    origin: Pos2,
    range: &VisibleRange,
    zoom: ZoomLevel,
    grid_height: f32,
) {
    let w = zoom.day_width_px();
    painter.rect_filled(
        Rect::from_min_size(origin, vec2(range.total_width_px(zoom), HEADER_HEIGHT)),
        0.0,
        theme::BG_HEADER,
    );

    let ticks = zoom.tick_marks();
    for (i, day) in range.days().enumerate() {
        let x = origin.x + i as f32 * w;

        painter.line_segment(
            [
                pos2(x, origin.y + HEADER_HEIGHT),
                pos2(x, origin.y + grid_height),
            ],
            Stroke::new(0.5, theme::GRID_LINE),
        );

        let is_weekend = day.weekday().num_days_from_monday() >= 5;
        if is_weekend {
            painter.rect_filled(
                Rect::from_min_max(
                    pos2(x, origin.y + HEADER_HEIGHT),
                    pos2(x + w, origin.y + grid_height),
                ),
                0.0,
                theme::WEEKEND_SHADE,
            );
        }

        let day_color = if is_weekend {
            theme::TEXT_DIM
        } else {
            theme::TEXT_SECONDARY
        };
        let label = match zoom {
            ZoomLevel::Compact => day.format("%d").to_string(),
            _ => day.format("%a %d").to_string(),
        };
        painter.text(
            pos2(x + 4.0, origin.y + 28.0),
            egui::Align2::LEFT_CENTER,
            label,
            theme::font_sub(),
            day_color,
        );

        if day.day() == 1 {
            painter.text(
                pos2(x + 4.0, origin.y + 12.0),
                egui::Align2::LEFT_CENTER,
                day.format("%b %Y").to_string(),
                theme::font_header(),
                theme::TEXT_PRIMARY,
            );
        }

        for t in &ticks {
            let tick_x = x + t / 24.0 * w;
            painter.line_segment(
                [
                    pos2(tick_x, origin.y + HEADER_HEIGHT - 7.0),
                    pos2(tick_x, origin.y + HEADER_HEIGHT),
                ],
                Stroke::new(0.5, theme::TICK_LINE),
            );
        }
    }

    painter.line_segment(
        [
            pos2(origin.x, origin.y + HEADER_HEIGHT),
            pos2(origin.x + range.total_width_px(zoom), origin.y + HEADER_HEIGHT),
        ],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );
}

fn draw_row_background(
    painter: &egui::Painter,
    origin: Pos2,
    row_top: f32,
    canvas_width: f32,
    index: usize,
) {
    if index % 2 == 0 {
        painter.rect_filled(
            Rect::from_min_size(
                pos2(origin.x, row_top),
                vec2(canvas_width, ROW_HEIGHT + ROW_GAP),
            ),
            0.0,
            theme::BG_ROW_EVEN,
        );
    }
    painter.line_segment(
        [
            pos2(origin.x, row_top + ROW_HEIGHT + ROW_GAP),
            pos2(origin.x + canvas_width, row_top + ROW_HEIGHT + ROW_GAP),
        ],
        Stroke::new(0.5, theme::BORDER_SUBTLE),
    );
}

fn row_background_color(index: usize) -> Color32 {
    if index % 2 == 0 {
        Color32::from_rgb(27, 28, 36)
    } else {
        theme::BG_DARK
    }
}

fn draw_today_line(
    painter: &egui::Painter,
    origin: Pos2,
    range: &VisibleRange,
    zoom: ZoomLevel,
    today: NaiveDate,
    grid_height: f32,
) {
    let off = range.day_offset(today);
    if off < 0 || off >= range.total_days() {
        return;
    }
    let x = origin.x + off as f32 * zoom.day_width_px();

    painter.line_segment(
        [
            pos2(x, origin.y + HEADER_HEIGHT),
            pos2(x, origin.y + grid_height),
        ],
        Stroke::new(1.5, theme::TODAY_LINE),
    );

    let badge_w = 42.0;
    let badge_rect = Rect::from_min_size(
        pos2(x - badge_w / 2.0, origin.y + HEADER_HEIGHT - 1.0),
        vec2(badge_w, 14.0),
    );
    painter.rect_filled(badge_rect, Rounding::same(3.0), theme::TODAY_LINE);
    painter.text(
        badge_rect.center(),
        egui::Align2::CENTER_CENTER,
        "Today",
        theme::font_small(),
        Color32::WHITE,
    );
}

#[allow(clippy::too_many_arguments)]
fn draw_row_bars(
    ui: &mut Ui,
    painter: &egui::Painter,
    origin: Pos2,
    row_top: f32,
    row: &PropertyRow,
    row_bg: Color32,
    range: &VisibleRange,
    zoom: ZoomLevel,
    today: NaiveDate,
    show_interventions: bool,
) {
    let linked_ids: HashSet<Uuid> = row.linked.iter().map(|l| l.reservation_id).collect();
    let band_top = row_top + theme::RESERVATION_BAR_TOP + theme::RESERVATION_BAR_HEIGHT;

    // Interventions go down first so a reservation's tab fills the carved
    // notch of its linked bar.
    if show_interventions {
        for iv in &row.standalone {
            let label = iv.display_label();
            if let Some(bar) = geometry::intervention_bar(
                iv,
                &label,
                range,
                zoom,
                band_top,
                theme::INTERVENTION_BAR_HEIGHT,
            ) {
                draw_intervention_bar(ui, painter, origin, &bar, iv, &label, None);
            }
        }

        for li in &row.linked {
            let Some(res) = row.reservations.iter().find(|r| r.id == li.reservation_id) else {
                continue;
            };
            let label = li.intervention.display_label();
            let top = band_top + li.stack_index as f32 * theme::LINKED_STACK_OFFSET;
            if let Some(bar) = geometry::linked_intervention_bar(
                res,
                &label,
                range,
                zoom,
                top,
                theme::INTERVENTION_BAR_HEIGHT,
            ) {
                draw_intervention_bar(
                    ui,
                    painter,
                    origin,
                    &bar,
                    &li.intervention,
                    &label,
                    Some(row_bg),
                );
            }
        }
    }

    for res in &row.reservations {
        let has_link = show_interventions && linked_ids.contains(&res.id);
        if let Some(bar) = geometry::reservation_bar(
            res,
            range,
            zoom,
            row_top + theme::RESERVATION_BAR_TOP,
            theme::RESERVATION_BAR_HEIGHT,
            has_link,
        ) {
            draw_reservation_bar(ui, painter, origin, &bar, res, today, has_link);
        }
    }
}

fn draw_reservation_bar(
    ui: &mut Ui,
    painter: &egui::Painter,
    origin: Pos2,
    bar: &geometry::BarRect,
    res: &Reservation,
    today: NaiveDate,
    has_link: bool,
) {
    let rect = Rect::from_min_size(
        pos2(origin.x + bar.left, bar.top),
        vec2(bar.width, bar.height),
    );
    let effective = res.effective_status(today);
    let color = theme::status_color(effective);
    let rounding = Rounding::same(theme::BAR_ROUNDING);

    let shadow_rect = rect.translate(vec2(1.0, 2.0));
    painter.rect_filled(shadow_rect, rounding, Color32::from_black_alpha(35));
    painter.rect_filled(rect, rounding, color);

    // Lighter top highlight
    let highlight_rect = Rect::from_min_size(
        rect.min,
        vec2(rect.width(), (rect.height() * 0.45).max(4.0)),
    );
    painter.rect_filled(
        highlight_rect,
        Rounding {
            nw: theme::BAR_ROUNDING,
            ne: theme::BAR_ROUNDING,
            sw: 0.0,
            se: 0.0,
        },
        Color32::from_white_alpha(22),
    );

    if has_link {
        let cx = rect.right() - jigsaw::LINK_OVERLAP_PX * 0.5;
        fill_tab(painter, cx, rect.bottom(), color, None);
        let outline = jigsaw::male_outline(rect.width(), rect.height(), jigsaw::LINK_OVERLAP_PX)
            .into_iter()
            .map(|p| pos2(p.x + rect.left(), p.y + rect.top()))
            .collect();
        painter.add(egui::Shape::closed_line(
            outline,
            Stroke::new(1.0, theme::JOINT_OUTLINE),
        ));
    }

    if rect.width() > 30.0 {
        let galley = painter.layout_no_wrap(
            res.guest_name.clone(),
            theme::font_bar(),
            theme::TEXT_ON_BAR,
        );
        let clipped = painter.with_clip_rect(rect);
        let text_y = rect.top() + (rect.height() - galley.size().y) / 2.0;
        clipped.galley(
            pos2(rect.left() + 6.0, text_y),
            galley,
            Color32::TRANSPARENT,
        );
    }

    let response = ui.interact(
        rect,
        ui.make_persistent_id(("reservation-bar", res.id)),
        Sense::hover(),
    );
    if response.hovered() {
        egui::show_tooltip_at_pointer(
            ui.ctx(),
            ui.layer_id(),
            egui::Id::new(("reservation-tip", res.id)),
            |ui| {
                ui.strong(&res.guest_name);
                ui.label(format!(
                    "{} → {}",
                    res.check_in.format("%d/%m/%Y"),
                    res.check_out.format("%d/%m/%Y"),
                ));
                ui.label(format!("{} · {} guests", effective.label(), res.guest_count));
                ui.label(format!("{} · {:.2} €", res.source, res.total_price));
            },
        );
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_intervention_bar(
    ui: &mut Ui,
    painter: &egui::Painter,
    origin: Pos2,
    bar: &geometry::BarRect,
    iv: &Intervention,
    label: &str,
    notch_bg: Option<Color32>,
) {
    let rect = Rect::from_min_size(
        pos2(origin.x + bar.left, bar.top),
        vec2(bar.width, bar.height),
    );
    let color = theme::kind_color(iv.kind);

    match notch_bg {
        Some(bg) => {
            // Female side of the joint: sharp rectangle with the notch carved
            // from the top edge in the row background color.
            painter.rect_filled(rect, Rounding::ZERO, color);
            let cx = rect.left() + jigsaw::LINK_OVERLAP_PX * 0.5;
            fill_tab(painter, cx, rect.top(), bg, Some(rect));
            let outline =
                jigsaw::female_outline(rect.width(), rect.height(), jigsaw::LINK_OVERLAP_PX)
                    .into_iter()
                    .map(|p| pos2(p.x + rect.left(), p.y + rect.top()))
                    .collect();
            painter.add(egui::Shape::closed_line(
                outline,
                Stroke::new(1.0, theme::JOINT_OUTLINE),
            ));
        }
        None => {
            painter.rect_filled(rect, Rounding::same(4.0), color);
        }
    }

    let icon = match iv.kind {
        crate::model::InterventionKind::Cleaning => egui_phosphor::regular::BROOM,
        crate::model::InterventionKind::Maintenance => egui_phosphor::regular::WRENCH,
    };
    let galley = painter.layout_no_wrap(
        format!("{icon} {label}"),
        theme::font_small(),
        theme::TEXT_ON_BAR,
    );
    let clipped = painter.with_clip_rect(rect);
    let text_y = rect.top() + (rect.height() - galley.size().y) / 2.0;
    clipped.galley(
        pos2(rect.left() + 5.0, text_y.max(rect.top() + 2.0)),
        galley,
        Color32::TRANSPARENT,
    );

    let response = ui.interact(
        rect,
        ui.make_persistent_id(("intervention-bar", iv.id)),
        Sense::hover(),
    );
    if response.hovered() {
        egui::show_tooltip_at_pointer(
            ui.ctx(),
            ui.layer_id(),
            egui::Id::new(("intervention-tip", iv.id)),
            |ui| {
                ui.strong(label);
                ui.label(format!(
                    "{} → {}",
                    iv.start_date.format("%d/%m/%Y"),
                    iv.end_date.format("%d/%m/%Y"),
                ));
                ui.label(format!(
                    "{} · est. {:.1} h",
                    iv.status.label(),
                    iv.estimated_duration_hours
                ));
            },
        );
    }
}

/// Approximate fill for the tab/notch interior: a neck quad flowing into the
/// round bulb. The sampled outline stroked on top gives the crisp boundary;
/// `clip` confines the notch fill to the female bar.
fn fill_tab(painter: &egui::Painter, cx: f32, seam_y: f32, color: Color32, clip: Option<Rect>) {
    let painter = match clip {
        Some(rect) => painter.with_clip_rect(rect),
        None => painter.clone(),
    };
    let n = jigsaw::NECK_HALF_WIDTH_PX;
    let d = jigsaw::TAB_DEPTH_PX;
    let k = jigsaw::KNOB_HALF_WIDTH_PX;

    painter.rect_filled(
        Rect::from_min_max(pos2(cx - n, seam_y), pos2(cx + n, seam_y + d * 0.6)),
        Rounding::ZERO,
        color,
    );
    let radius = k * 0.8;
    painter.circle_filled(pos2(cx, seam_y + d - radius), radius, color);
}
