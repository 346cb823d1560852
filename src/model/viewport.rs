use chrono::Datelike;
use std::time::{Duration, Instant};

use super::timeline::{VisibleRange, ZoomLevel, EXTENSION_THRESHOLD};

/// Quiet time after the last scroll movement before the extension threshold
/// is checked.
pub const SCROLL_SETTLE: Duration = Duration::from_millis(150);

/// Keeps the horizontal scroll position coherent across zoom changes and
/// today-resets, and watches scrolling for month changes and range
/// extension.
///
/// Deferred work is modeled as `Instant`-stamped pending state polled by the
/// frame loop; superseding events overwrite or clear it, and dropping the
/// struct cancels everything.
#[derive(Debug, Clone, Default)]
pub struct ViewportSync {
    pub scroll_x: f32,
    pub visible_width: f32,
    pub content_width: f32,
    pending_today_scroll: bool,
    pending_scroll_target: Option<f32>,
    extension_check_due: Option<Instant>,
    reported_month: Option<(i32, u32)>,
}

/// The calendar month occupying roughly the first third of the viewport.
pub fn dominant_month(
    scroll_x: f32,
    visible_width: f32,
    range: &VisibleRange,
    zoom: ZoomLevel,
) -> (i32, u32) {
    let probe = scroll_x + visible_width / 3.0;
    let day = (probe / zoom.day_width_px()).floor() as i64;
    let day = day.clamp(0, (range.total_days() - 1).max(0));
    let date = range.start + chrono::Duration::days(day);
    (date.year(), date.month())
}

impl ViewportSync {
    pub fn new() -> Self {
        Self {
            pending_today_scroll: true,
            ..Default::default()
        }
    }

    /// Arm the one-shot scroll that puts today's column at the left edge.
    /// Supersedes any pending re-centering or extension check.
    pub fn arm_scroll_to_today(&mut self) {
        self.pending_today_scroll = true;
        self.pending_scroll_target = None;
        self.extension_check_due = None;
    }

    /// Consume the armed today-scroll, returning the target offset. Fires at
    /// most once per arming; returns `None` until armed again.
    pub fn take_today_scroll(
        &mut self,
        range: &VisibleRange,
        zoom: ZoomLevel,
        today: chrono::NaiveDate,
    ) -> Option<f32> {
        if !self.pending_today_scroll {
            return None;
        }
        self.pending_today_scroll = false;
        let off = range.day_offset(today).clamp(0, range.total_days());
        Some(off as f32 * zoom.day_width_px())
    }

    /// A zoom change is about to happen: compute the scroll offset that keeps
    /// the currently centered day centered under the new column width. A
    /// newer zoom change overwrites any in-flight target.
    pub fn recenter_on_zoom(&mut self, old: ZoomLevel, new: ZoomLevel) {
        let center_day = (self.scroll_x + self.visible_width * 0.5) / old.day_width_px();
        let target = center_day * new.day_width_px() - self.visible_width * 0.5;
        self.pending_scroll_target = Some(target.max(0.0));
        self.extension_check_due = None;
    }

    /// Consume a pending programmatic scroll target.
    pub fn take_scroll_target(&mut self) -> Option<f32> {
        self.pending_scroll_target.take()
    }

    /// Per-frame viewport bookkeeping. Month detection runs immediately and
    /// reports only actual changes; a scroll movement arms the deferred
    /// extension check, which is allowed to lag by one settle window while
    /// the month display is not.
    pub fn on_frame(
        &mut self,
        scroll_x: f32,
        visible_width: f32,
        content_width: f32,
        range: &VisibleRange,
        zoom: ZoomLevel,
        now: Instant,
    ) -> Option<(i32, u32)> {
        let scrolled = (scroll_x - self.scroll_x).abs() > 0.5;
        self.scroll_x = scroll_x;
        self.visible_width = visible_width;
        self.content_width = content_width;

        let month = dominant_month(scroll_x, visible_width, range, zoom);
        let changed = self.reported_month != Some(month);
        if changed {
            self.reported_month = Some(month);
        }

        if scrolled {
            self.extension_check_due = Some(now + SCROLL_SETTLE);
        }

        changed.then_some(month)
    }

    /// Deferred path of the scroll handler: true once the settle window has
    /// elapsed and the scroll position sits past the extension threshold.
    pub fn extension_check(&mut self, now: Instant) -> bool {
        match self.extension_check_due {
            Some(due) if now >= due => {
                self.extension_check_due = None;
                self.scroll_x + self.visible_width >= self.content_width * EXTENSION_THRESHOLD
            }
            _ => false,
        }
    }

    /// Whether any deferred action is waiting on time to pass.
    pub fn has_deferred_work(&self) -> bool {
        self.extension_check_due.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn range() -> VisibleRange {
        VisibleRange::new(date(2024, 2, 23), date(2024, 5, 23))
    }

    #[test]
    fn today_scroll_fires_exactly_once_per_arming() {
        let mut sync = ViewportSync::new();
        let today = date(2024, 3, 4);
        let first = sync.take_today_scroll(&range(), ZoomLevel::Standard, today);
        assert_abs_diff_eq!(first.unwrap(), 10.0 * 136.0, epsilon = 0.01);
        assert!(sync
            .take_today_scroll(&range(), ZoomLevel::Standard, today)
            .is_none());
        sync.arm_scroll_to_today();
        assert!(sync
            .take_today_scroll(&range(), ZoomLevel::Standard, today)
            .is_some());
    }

    #[test]
    fn zoom_change_keeps_the_centered_day_centered() {
        let mut sync = ViewportSync::new();
        sync.visible_width = 800.0;
        // Day index 20 centered under 136 px columns.
        sync.scroll_x = 20.0 * 136.0 - 400.0;
        sync.recenter_on_zoom(ZoomLevel::Standard, ZoomLevel::Detailed);
        let target = sync.take_scroll_target().unwrap();
        let centered = (target + 400.0) / ZoomLevel::Detailed.day_width_px();
        assert_abs_diff_eq!(centered, 20.0, epsilon = 0.01);
        assert!(sync.take_scroll_target().is_none());
    }

    #[test]
    fn newer_zoom_change_supersedes_the_old_target() {
        let mut sync = ViewportSync::new();
        sync.visible_width = 800.0;
        sync.scroll_x = 2000.0;
        sync.recenter_on_zoom(ZoomLevel::Standard, ZoomLevel::Detailed);
        sync.recenter_on_zoom(ZoomLevel::Standard, ZoomLevel::Compact);
        let target = sync.take_scroll_target().unwrap();
        let centered = (target + 400.0) / ZoomLevel::Compact.day_width_px();
        assert_abs_diff_eq!(centered, 2400.0 / 136.0, epsilon = 0.01);
        assert!(sync.take_scroll_target().is_none());
    }

    #[test]
    fn month_is_reported_only_on_change() {
        let mut sync = ViewportSync::new();
        let r = range();
        let t = Instant::now();
        let first = sync.on_frame(0.0, 600.0, 12000.0, &r, ZoomLevel::Standard, t);
        assert_eq!(first, Some((2024, 2)));
        // Small scroll, same month: nothing reported.
        assert_eq!(
            sync.on_frame(40.0, 600.0, 12000.0, &r, ZoomLevel::Standard, t),
            None
        );
        // Jump far enough that the first third lands in April.
        let jump = 45.0 * 136.0;
        assert_eq!(
            sync.on_frame(jump, 600.0, 12000.0, &r, ZoomLevel::Standard, t),
            Some((2024, 4))
        );
    }

    #[test]
    fn extension_check_waits_for_the_settle_window() {
        let mut sync = ViewportSync::new();
        let r = range();
        let t0 = Instant::now();
        let content = r.total_width_px(ZoomLevel::Standard);
        let near_end = content * 0.9;
        sync.on_frame(near_end, 600.0, content, &r, ZoomLevel::Standard, t0);
        assert!(!sync.extension_check(t0));
        assert!(sync.extension_check(t0 + SCROLL_SETTLE));
        // Consumed: does not re-fire until another scroll arms it.
        assert!(!sync.extension_check(t0 + SCROLL_SETTLE * 2));
    }

    #[test]
    fn extension_check_ignores_positions_before_the_threshold() {
        let mut sync = ViewportSync::new();
        let r = range();
        let t0 = Instant::now();
        let content = r.total_width_px(ZoomLevel::Standard);
        sync.on_frame(content * 0.2, 600.0, content, &r, ZoomLevel::Standard, t0);
        assert!(!sync.extension_check(t0 + SCROLL_SETTLE));
    }

    #[test]
    fn today_reset_cancels_deferred_work() {
        let mut sync = ViewportSync::new();
        let r = range();
        let t0 = Instant::now();
        let content = r.total_width_px(ZoomLevel::Standard);
        sync.on_frame(content * 0.9, 600.0, content, &r, ZoomLevel::Standard, t0);
        assert!(sync.has_deferred_work());
        sync.arm_scroll_to_today();
        assert!(!sync.has_deferred_work());
        assert!(!sync.extension_check(t0 + SCROLL_SETTLE));
    }
}
