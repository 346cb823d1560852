use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stored booking status as delivered by the data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    CheckedIn,
    CheckedOut,
    Cancelled,
}

impl ReservationStatus {
    pub const ALL: [ReservationStatus; 5] = [
        ReservationStatus::Pending,
        ReservationStatus::Confirmed,
        ReservationStatus::CheckedIn,
        ReservationStatus::CheckedOut,
        ReservationStatus::Cancelled,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ReservationStatus::Pending => "Pending",
            ReservationStatus::Confirmed => "Confirmed",
            ReservationStatus::CheckedIn => "Checked in",
            ReservationStatus::CheckedOut => "Checked out",
            ReservationStatus::Cancelled => "Cancelled",
        }
    }
}

/// A guest booking on one property.
///
/// Check-in/check-out times come over the wire as raw `HH:mm` strings and may
/// be absent or malformed; they are parsed leniently where used.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    pub id: Uuid,
    pub property_id: Uuid,
    pub check_in: NaiveDate,
    pub check_in_time: Option<String>,
    pub check_out: NaiveDate,
    pub check_out_time: Option<String>,
    pub status: ReservationStatus,
    pub guest_name: String,
    pub guest_count: u32,
    pub source: String,
    pub total_price: f64,
}

impl Reservation {
    pub fn new(
        property_id: Uuid,
        guest_name: impl Into<String>,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            property_id,
            check_in,
            check_in_time: Some("15:00".into()),
            check_out,
            check_out_time: Some("11:00".into()),
            status: ReservationStatus::Confirmed,
            guest_name: guest_name.into(),
            guest_count: 2,
            source: "Direct".into(),
            total_price: 0.0,
        }
    }

    /// Display status recomputed against the session's today, distinct from
    /// the stored status.
    ///
    /// Stored `Cancelled` and `Pending` are authoritative. Everything else is
    /// overridden by the today-relative comparison: past the checkout day the
    /// stay is checked out, inside `[check_in, check_out]` it is checked in,
    /// and a future stay keeps its stored status.
    pub fn effective_status(&self, today: NaiveDate) -> ReservationStatus {
        match self.status {
            ReservationStatus::Cancelled | ReservationStatus::Pending => self.status,
            stored => {
                if today > self.check_out {
                    ReservationStatus::CheckedOut
                } else if today >= self.check_in {
                    ReservationStatus::CheckedIn
                } else {
                    stored
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn booking(status: ReservationStatus) -> Reservation {
        let mut r = Reservation::new(
            Uuid::new_v4(),
            "Ada",
            date(2024, 3, 10),
            date(2024, 3, 12),
        );
        r.status = status;
        r
    }

    #[test]
    fn confirmed_follows_today() {
        let r = booking(ReservationStatus::Confirmed);
        assert_eq!(
            r.effective_status(date(2024, 3, 1)),
            ReservationStatus::Confirmed
        );
        assert_eq!(
            r.effective_status(date(2024, 3, 10)),
            ReservationStatus::CheckedIn
        );
        assert_eq!(
            r.effective_status(date(2024, 3, 12)),
            ReservationStatus::CheckedIn
        );
        assert_eq!(
            r.effective_status(date(2024, 3, 13)),
            ReservationStatus::CheckedOut
        );
    }

    #[test]
    fn cancelled_and_pending_are_invariant() {
        for status in [ReservationStatus::Cancelled, ReservationStatus::Pending] {
            let r = booking(status);
            for day in [date(2024, 3, 1), date(2024, 3, 11), date(2024, 4, 1)] {
                assert_eq!(r.effective_status(day), status);
            }
        }
    }
}
