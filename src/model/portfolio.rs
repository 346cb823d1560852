use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::intervention::Intervention;
use super::property::Property;
use super::reservation::Reservation;

/// A managed property portfolio: the full record set the console operates on,
/// as delivered by the data source (or loaded from a local dataset file).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Portfolio {
    pub name: String,
    pub properties: Vec<Property>,
    pub reservations: Vec<Reservation>,
    pub interventions: Vec<Intervention>,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl Default for Portfolio {
    fn default() -> Self {
        Self {
            name: "Untitled Portfolio".to_string(),
            properties: Vec::new(),
            reservations: Vec::new(),
            interventions: Vec::new(),
            created: Utc::now(),
            modified: Utc::now(),
        }
    }
}

impl Portfolio {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Touch the modified timestamp.
    pub fn touch(&mut self) {
        self.modified = Utc::now();
    }
}
