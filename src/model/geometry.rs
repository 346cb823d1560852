use super::intervention::Intervention;
use super::jigsaw::LINK_OVERLAP_PX;
use super::reservation::Reservation;
use super::timeline::{hour_offset_px, VisibleRange, ZoomLevel};

/// Horizontal inset on an unlinked reservation's right edge so bars on
/// adjacent days never visually touch.
pub const RESERVATION_EDGE_GAP_PX: f32 = 2.0;

/// Narrowest a reservation bar is allowed to render.
pub const MIN_RESERVATION_WIDTH_PX: f32 = 6.0;

/// Fixed icon-and-padding allowance inside an intervention bar.
pub const INTERVENTION_ICON_ALLOWANCE_PX: f32 = 30.0;

/// Estimated rendered width per label character.
pub const INTERVENTION_PER_CHAR_PX: f32 = 6.5;

/// Narrowest an intervention bar is allowed to render.
pub const MIN_INTERVENTION_WIDTH_PX: f32 = 56.0;

/// An absolutely positioned bar within the scrollable canvas. Derived output,
/// recomputed every render; never mutated in place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarRect {
    pub left: f32,
    pub width: f32,
    pub top: f32,
    pub height: f32,
}

impl BarRect {
    pub fn right(&self) -> f32 {
        self.left + self.width
    }
}

/// Pixel offset of a reservation's checkout instant from the range start.
/// Day-aligned when the checkout time is absent or suppressed by the zoom.
pub fn checkout_offset_px(res: &Reservation, range: &VisibleRange, zoom: ZoomLevel) -> f32 {
    range.day_offset(res.check_out) as f32 * zoom.day_width_px()
        + hour_offset_px(res.check_out_time.as_deref(), zoom)
}

/// Rectangle for a reservation bar, or `None` when the stay does not
/// intersect the visible window.
///
/// Edges are day-aligned first, then refined by check-in/checkout times,
/// but only for an edge whose day lies inside the window; an edge clipped by
/// the range keeps its day-aligned position since its true time is
/// off-screen. Unlinked bars give up a small gap on the right edge; a linked
/// bar keeps its exact checkout edge so the jigsaw joint lines up.
pub fn reservation_bar(
    res: &Reservation,
    range: &VisibleRange,
    zoom: ZoomLevel,
    top: f32,
    height: f32,
    has_link: bool,
) -> Option<BarRect> {
    let total = range.total_days();
    let start_off = range.day_offset(res.check_in);
    let end_off = range.day_offset(res.check_out);
    if start_off >= total || end_off <= 0 {
        return None;
    }

    let w = zoom.day_width_px();
    let mut left = start_off.max(0) as f32 * w;
    let mut right = end_off.min(total) as f32 * w;
    if start_off >= 0 {
        left = start_off as f32 * w + hour_offset_px(res.check_in_time.as_deref(), zoom);
    }
    if end_off < total {
        right = end_off as f32 * w + hour_offset_px(res.check_out_time.as_deref(), zoom);
    }
    if !has_link {
        right -= RESERVATION_EDGE_GAP_PX;
    }

    Some(BarRect {
        left,
        width: (right - left).max(MIN_RESERVATION_WIDTH_PX),
        top,
        height,
    })
}

/// Content-driven width of an intervention bar: icon allowance plus a
/// per-character estimate, floored so short labels stay clickable.
pub fn intervention_width_px(label: &str) -> f32 {
    (INTERVENTION_ICON_ALLOWANCE_PX + label.chars().count() as f32 * INTERVENTION_PER_CHAR_PX)
        .max(MIN_INTERVENTION_WIDTH_PX)
}

/// Rectangle for a standalone intervention bar, positioned from its own
/// start date, or `None` when its date span misses the window entirely.
pub fn intervention_bar(
    iv: &Intervention,
    label: &str,
    range: &VisibleRange,
    zoom: ZoomLevel,
    top: f32,
    height: f32,
) -> Option<BarRect> {
    let total = range.total_days();
    let start_off = range.day_offset(iv.start_date);
    let end_off = range.day_offset(iv.end_date) + 1;
    if start_off >= total || end_off <= 0 {
        return None;
    }

    let w = zoom.day_width_px();
    let mut left = start_off.max(0) as f32 * w;
    if start_off >= 0 {
        left = start_off as f32 * w + hour_offset_px(iv.start_time.as_deref(), zoom);
    }

    Some(BarRect {
        left,
        width: intervention_width_px(label),
        top,
        height,
    })
}

/// Rectangle for an intervention welded to its reservation: the left edge
/// comes from the reservation's checkout offset minus the joint overlap, not
/// from the intervention's own dates.
pub fn linked_intervention_bar(
    res: &Reservation,
    label: &str,
    range: &VisibleRange,
    zoom: ZoomLevel,
    top: f32,
    height: f32,
) -> Option<BarRect> {
    let checkout_day = range.day_offset(res.check_out);
    if checkout_day < 0 || checkout_day >= range.total_days() {
        return None;
    }

    Some(BarRect {
        left: checkout_offset_px(res, range, zoom) - LINK_OVERLAP_PX,
        width: intervention_width_px(label),
        top,
        height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn march_range() -> VisibleRange {
        VisibleRange::new(date(2024, 3, 1), date(2024, 5, 30))
    }

    fn stay(check_in: NaiveDate, check_out: NaiveDate) -> Reservation {
        Reservation::new(Uuid::new_v4(), "Ada", check_in, check_out)
    }

    #[test]
    fn standard_zoom_scenario_offsets() {
        // 2024-03-10 15:00 → 2024-03-12 11:00 in a range starting 2024-03-01,
        // at 136 px/day: left = 9*136 + (15/24)*136, right = 11*136 + (11/24)*136.
        let res = stay(date(2024, 3, 10), date(2024, 3, 12));
        let rect = reservation_bar(&res, &march_range(), ZoomLevel::Standard, 0.0, 26.0, true)
            .unwrap();
        assert_abs_diff_eq!(rect.left, 1309.0, epsilon = 1.0);
        assert_abs_diff_eq!(rect.right(), 1558.3, epsilon = 1.0);
    }

    #[test]
    fn unlinked_bar_gives_up_edge_gap() {
        let res = stay(date(2024, 3, 10), date(2024, 3, 12));
        let linked =
            reservation_bar(&res, &march_range(), ZoomLevel::Standard, 0.0, 26.0, true).unwrap();
        let unlinked =
            reservation_bar(&res, &march_range(), ZoomLevel::Standard, 0.0, 26.0, false).unwrap();
        assert_abs_diff_eq!(
            unlinked.right(),
            linked.right() - RESERVATION_EDGE_GAP_PX,
            epsilon = 0.01
        );
        assert_eq!(unlinked.left, linked.left);
    }

    #[test]
    fn fully_outside_spans_short_circuit() {
        let range = march_range();
        let before = stay(date(2024, 1, 5), date(2024, 1, 8));
        let after = stay(date(2024, 9, 5), date(2024, 9, 8));
        for zoom in ZoomLevel::ALL {
            assert!(reservation_bar(&before, &range, zoom, 0.0, 26.0, false).is_none());
            assert!(reservation_bar(&after, &range, zoom, 0.0, 26.0, false).is_none());
        }
    }

    #[test]
    fn range_clipped_edge_keeps_day_aligned_position() {
        // Check-in precedes the window; the left edge pins to the window start
        // even though a check-in time is present.
        let res = stay(date(2024, 2, 20), date(2024, 3, 5));
        let rect = reservation_bar(&res, &march_range(), ZoomLevel::Standard, 0.0, 26.0, true)
            .unwrap();
        assert_eq!(rect.left, 0.0);
        // Checkout inside the window is still time-refined.
        assert_abs_diff_eq!(
            rect.right(),
            4.0 * 136.0 + 11.0 / 24.0 * 136.0,
            epsilon = 0.5
        );
    }

    #[test]
    fn compact_zoom_pins_edges_to_day_boundaries() {
        let res = stay(date(2024, 3, 10), date(2024, 3, 12));
        let rect = reservation_bar(&res, &march_range(), ZoomLevel::Compact, 0.0, 26.0, true)
            .unwrap();
        assert_abs_diff_eq!(rect.left, 9.0 * 56.0, epsilon = 0.01);
        assert_abs_diff_eq!(rect.right(), 11.0 * 56.0, epsilon = 0.01);
    }

    #[test]
    fn bar_rect_is_pure() {
        let res = stay(date(2024, 3, 10), date(2024, 3, 12));
        let a = reservation_bar(&res, &march_range(), ZoomLevel::Detailed, 4.0, 26.0, false);
        let b = reservation_bar(&res, &march_range(), ZoomLevel::Detailed, 4.0, 26.0, false);
        assert_eq!(a, b);
    }

    #[test]
    fn intervention_width_is_content_driven_with_floor() {
        assert_eq!(intervention_width_px(""), MIN_INTERVENTION_WIDTH_PX);
        let wide = intervention_width_px("Maintenance · Alexandra");
        assert!(wide > intervention_width_px("Cleaning"));
        assert_abs_diff_eq!(
            wide,
            INTERVENTION_ICON_ALLOWANCE_PX + 23.0 * INTERVENTION_PER_CHAR_PX,
            epsilon = 0.01
        );
    }

    #[test]
    fn linked_bar_starts_under_the_reservation_tail() {
        let res = stay(date(2024, 3, 10), date(2024, 3, 12));
        let range = march_range();
        let rect =
            linked_intervention_bar(&res, "Cleaning · Marta", &range, ZoomLevel::Standard, 0.0, 18.0)
                .unwrap();
        assert_abs_diff_eq!(
            rect.left,
            checkout_offset_px(&res, &range, ZoomLevel::Standard) - LINK_OVERLAP_PX,
            epsilon = 0.01
        );
    }

    #[test]
    fn standalone_intervention_positions_from_its_own_start() {
        use crate::model::intervention::InterventionKind;
        let mut iv = Intervention::new(
            Uuid::new_v4(),
            InterventionKind::Maintenance,
            "Rui",
            date(2024, 3, 8),
        );
        iv.start_time = Some("09:00".into());
        let rect = intervention_bar(
            &iv,
            "Maintenance · Rui",
            &march_range(),
            ZoomLevel::Standard,
            0.0,
            18.0,
        )
        .unwrap();
        assert_abs_diff_eq!(
            rect.left,
            7.0 * 136.0 + 9.0 / 24.0 * 136.0,
            epsilon = 0.5
        );

        iv.start_date = date(2024, 9, 1);
        iv.end_date = date(2024, 9, 2);
        assert!(intervention_bar(
            &iv,
            "Maintenance · Rui",
            &march_range(),
            ZoomLevel::Standard,
            0.0,
            18.0
        )
        .is_none());
    }

    #[test]
    fn linked_bar_anchored_offscreen_is_not_rendered() {
        let res = stay(date(2024, 1, 2), date(2024, 1, 4));
        assert!(linked_intervention_bar(
            &res,
            "Cleaning",
            &march_range(),
            ZoomLevel::Standard,
            0.0,
            18.0
        )
        .is_none());
    }
}
