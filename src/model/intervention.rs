use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What kind of service task an intervention is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterventionKind {
    Cleaning,
    Maintenance,
}

impl InterventionKind {
    pub const ALL: [InterventionKind; 2] =
        [InterventionKind::Cleaning, InterventionKind::Maintenance];

    pub fn label(self) -> &'static str {
        match self {
            InterventionKind::Cleaning => "Cleaning",
            InterventionKind::Maintenance => "Maintenance",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterventionStatus {
    Scheduled,
    InProgress,
    Completed,
}

impl InterventionStatus {
    pub fn label(self) -> &'static str {
        match self {
            InterventionStatus::Scheduled => "Scheduled",
            InterventionStatus::InProgress => "In progress",
            InterventionStatus::Completed => "Completed",
        }
    }
}

/// A service task on one property.
///
/// An intervention whose `linked_reservation_id` resolves to a reservation in
/// the same property row is positioned relative to that reservation's
/// checkout instead of its own dates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Intervention {
    pub id: Uuid,
    pub property_id: Uuid,
    pub kind: InterventionKind,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub status: InterventionStatus,
    pub assignee_name: String,
    pub estimated_duration_hours: f32,
    pub linked_reservation_id: Option<Uuid>,
}

impl Intervention {
    pub fn new(
        property_id: Uuid,
        kind: InterventionKind,
        assignee_name: impl Into<String>,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            property_id,
            kind,
            start_date,
            end_date: start_date,
            start_time: None,
            end_time: None,
            status: InterventionStatus::Scheduled,
            assignee_name: assignee_name.into(),
            estimated_duration_hours: 2.0,
            linked_reservation_id: None,
        }
    }

    /// Grid label: kind plus the assignee, e.g. "Cleaning · Marta".
    pub fn display_label(&self) -> String {
        if self.assignee_name.is_empty() {
            self.kind.label().to_string()
        } else {
            format!("{} · {}", self.kind.label(), self.assignee_name)
        }
    }
}
