use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Day-column width below which sub-day precision is suppressed entirely.
const SUBDAY_MIN_DAY_WIDTH: f32 = 100.0;

/// Minimum gap between two range extensions.
pub const EXTENSION_DEBOUNCE: Duration = Duration::from_millis(300);

/// Days appended to the range end per extension.
pub const EXTENSION_CHUNK_DAYS: i64 = 30;

/// Scroll position (as a fraction of total scrollable width) past which the
/// range is extended.
pub const EXTENSION_THRESHOLD: f32 = 0.8;

/// Controls what granularity the timeline displays.
///
/// Each level maps to a fixed day-column width and a fixed set of intra-day
/// tick marks; `Compact` drops the ticks and all sub-day positioning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoomLevel {
    Compact,
    Standard,
    Detailed,
}

impl ZoomLevel {
    pub const ALL: [ZoomLevel; 3] = [ZoomLevel::Compact, ZoomLevel::Standard, ZoomLevel::Detailed];

    pub fn label(self) -> &'static str {
        match self {
            ZoomLevel::Compact => "Compact",
            ZoomLevel::Standard => "Standard",
            ZoomLevel::Detailed => "Detailed",
        }
    }

    /// Width of one day column in pixels.
    pub fn day_width_px(self) -> f32 {
        match self {
            ZoomLevel::Compact => 56.0,
            ZoomLevel::Standard => 136.0,
            ZoomLevel::Detailed => 260.0,
        }
    }

    /// Fractional-hour tick positions inside a day column, ascending, in `[0, 24)`.
    /// The day boundary itself is drawn by the column grid line, so ticks start
    /// past hour zero.
    pub fn tick_marks(self) -> Vec<f32> {
        match self {
            ZoomLevel::Compact => Vec::new(),
            ZoomLevel::Standard => (1..24).map(|h| h as f32).collect(),
            ZoomLevel::Detailed => (1..48).map(|t| t as f32 * 0.5).collect(),
        }
    }

    /// Whether times of day shift bar edges at this zoom level.
    pub fn subday_precision(self) -> bool {
        self.day_width_px() >= SUBDAY_MIN_DAY_WIDTH
    }
}

/// Parse a lenient `HH:mm` clock string into fractional hours.
///
/// Returns `None` for anything that does not look like a clock time; callers
/// treat that the same as an absent time. Out-of-range values are kept here
/// and clamped at the pixel conversion.
pub fn parse_clock_hours(time: &str) -> Option<f32> {
    let (h, m) = time.trim().split_once(':')?;
    let hours: u32 = h.trim().parse().ok()?;
    let minutes: u32 = m.trim().parse().ok()?;
    Some(hours as f32 + minutes as f32 / 60.0)
}

/// Sub-day pixel offset of a clock time within its day column.
///
/// Absent or malformed times and low zoom levels pin to the day boundary;
/// out-of-range hours clamp into `[0, 24]` rather than erroring.
pub fn hour_offset_px(time: Option<&str>, zoom: ZoomLevel) -> f32 {
    if !zoom.subday_precision() {
        return 0.0;
    }
    match time.and_then(parse_clock_hours) {
        Some(hours) => hours.clamp(0.0, 24.0) / 24.0 * zoom.day_width_px(),
        None => 0.0,
    }
}

/// The visible date window, half-open: `start` is the first visible day,
/// `end` is the first day past the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl VisibleRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        debug_assert!(end > start);
        Self { start, end }
    }

    /// Number of whole days in the window.
    pub fn total_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Calendar-day offset of `date` from the range start. Date-only
    /// subtraction, so daylight-saving shifts cannot skew it.
    pub fn day_offset(&self, date: NaiveDate) -> i64 {
        (date - self.start).num_days()
    }

    /// Iterate every day of the window in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (0..self.total_days()).map(|i| self.start + chrono::Duration::days(i))
    }

    /// Total scrollable width of the window at the given zoom.
    pub fn total_width_px(&self, zoom: ZoomLevel) -> f32 {
        self.total_days() as f32 * zoom.day_width_px()
    }
}

/// One navigation step for prev/next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavUnit {
    Week,
    Month,
}

/// Owns the visible window and the session's "today" anchor.
///
/// The range is mutated only through navigation and extension; rendering
/// treats it as read-only input.
#[derive(Debug, Clone)]
pub struct DateRangeController {
    pub range: VisibleRange,
    /// Captured once at construction and reused for every status and
    /// geometry comparison for the rest of the session.
    pub today: NaiveDate,
    last_extension: Option<Instant>,
}

/// Days before the anchor month that a freshly anchored window starts at.
const RANGE_LEAD_IN_DAYS: i64 = 7;

/// Length of a freshly anchored window.
const RANGE_INITIAL_DAYS: i64 = 90;

impl DateRangeController {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            range: Self::anchored_range(today),
            today,
            last_extension: None,
        }
    }

    /// Window around an anchor date: first of its month minus a short
    /// lead-in, extending `RANGE_INITIAL_DAYS` forward.
    fn anchored_range(anchor: NaiveDate) -> VisibleRange {
        let first_of_month =
            NaiveDate::from_ymd_opt(anchor.year(), anchor.month(), 1).unwrap_or(anchor);
        let start = first_of_month - chrono::Duration::days(RANGE_LEAD_IN_DAYS);
        VisibleRange::new(start, start + chrono::Duration::days(RANGE_INITIAL_DAYS))
    }

    /// Shift the window one unit into the past. No clamping.
    pub fn go_prev(&mut self, unit: NavUnit) {
        self.shift(unit, -1);
    }

    /// Shift the window one unit into the future. No clamping.
    pub fn go_next(&mut self, unit: NavUnit) {
        self.shift(unit, 1);
    }

    fn shift(&mut self, unit: NavUnit, direction: i64) {
        let (start, end) = match unit {
            NavUnit::Week => {
                let d = chrono::Duration::days(7 * direction);
                (self.range.start + d, self.range.end + d)
            }
            NavUnit::Month => {
                let step = Months::new(1);
                if direction >= 0 {
                    (self.range.start + step, self.range.end + step)
                } else {
                    (self.range.start - step, self.range.end - step)
                }
            }
        };
        self.range = VisibleRange::new(start, end);
    }

    /// Re-anchor the window around the session's today.
    pub fn go_today(&mut self) {
        self.range = Self::anchored_range(self.today);
        self.last_extension = None;
    }

    /// Append days to the window end, leaving `start` and every already
    /// visible day untouched. Debounced: calls within `EXTENSION_DEBOUNCE`
    /// of the previous extension are dropped.
    ///
    /// Returns whether the range actually grew.
    pub fn extend_range(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last_extension {
            if now.duration_since(last) < EXTENSION_DEBOUNCE {
                return false;
            }
        }
        self.last_extension = Some(now);
        self.range = VisibleRange::new(
            self.range.start,
            self.range.end + chrono::Duration::days(EXTENSION_CHUNK_DAYS),
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn tick_marks_sorted_and_in_range() {
        for zoom in ZoomLevel::ALL {
            let ticks = zoom.tick_marks();
            for pair in ticks.windows(2) {
                assert!(pair[0] < pair[1]);
            }
            for t in &ticks {
                assert!((0.0..24.0).contains(t));
            }
        }
        assert!(ZoomLevel::Compact.tick_marks().is_empty());
    }

    #[test]
    fn hour_offset_monotone_and_saturating() {
        for zoom in [ZoomLevel::Standard, ZoomLevel::Detailed] {
            let mut prev = -1.0;
            for h in 0..=26 {
                let s = format!("{h:02}:00");
                let off = hour_offset_px(Some(&s), zoom);
                assert!(off >= prev);
                prev = off;
            }
            assert_abs_diff_eq!(
                hour_offset_px(Some("24:00"), zoom),
                zoom.day_width_px(),
                epsilon = 0.01
            );
            assert_abs_diff_eq!(
                hour_offset_px(Some("25:30"), zoom),
                zoom.day_width_px(),
                epsilon = 0.01
            );
        }
    }

    #[test]
    fn hour_offset_suppressed_at_compact_or_absent() {
        assert_eq!(hour_offset_px(Some("15:00"), ZoomLevel::Compact), 0.0);
        assert_eq!(hour_offset_px(None, ZoomLevel::Standard), 0.0);
    }

    #[test]
    fn malformed_times_are_ignored_not_rejected() {
        assert_eq!(parse_clock_hours("noon"), None);
        assert_eq!(parse_clock_hours("15"), None);
        assert_eq!(parse_clock_hours("-1:30"), None);
        assert_eq!(parse_clock_hours("25:30"), Some(25.5));
        assert_eq!(hour_offset_px(Some("garbage"), ZoomLevel::Detailed), 0.0);
    }

    #[test]
    fn range_navigation_shifts_without_clamping() {
        let mut ctl = DateRangeController::new(date(2024, 3, 15));
        let before = ctl.range;
        ctl.go_next(NavUnit::Month);
        assert!(ctl.range.start > before.start);
        ctl.go_prev(NavUnit::Month);
        ctl.go_next(NavUnit::Week);
        assert_eq!(ctl.range.start, before.start + chrono::Duration::days(7));
        ctl.go_prev(NavUnit::Week);
        assert_eq!(ctl.range.start, before.start);
        for _ in 0..240 {
            ctl.go_prev(NavUnit::Month);
        }
        assert!(ctl.range.start.year() < 2010);
        assert!(ctl.range.end > ctl.range.start);
    }

    #[test]
    fn extension_grows_end_only() {
        let mut ctl = DateRangeController::new(date(2024, 3, 15));
        let before = ctl.range;
        assert!(ctl.extend_range(Instant::now()));
        assert_eq!(ctl.range.start, before.start);
        assert_eq!(
            ctl.range.end,
            before.end + chrono::Duration::days(EXTENSION_CHUNK_DAYS)
        );
        assert!(ctl.range.total_days() > before.total_days());
    }

    #[test]
    fn extension_is_debounced() {
        let mut ctl = DateRangeController::new(date(2024, 3, 15));
        let t0 = Instant::now();
        assert!(ctl.extend_range(t0));
        assert!(!ctl.extend_range(t0 + Duration::from_millis(100)));
        assert!(ctl.extend_range(t0 + Duration::from_millis(350)));
    }

    #[test]
    fn go_today_covers_today() {
        let today = date(2024, 7, 4);
        let mut ctl = DateRangeController::new(today);
        ctl.go_next(NavUnit::Month);
        ctl.go_next(NavUnit::Month);
        ctl.go_today();
        assert!(ctl.range.start <= today && today < ctl.range.end);
    }
}
