pub mod geometry;
pub mod intervention;
pub mod jigsaw;
pub mod portfolio;
pub mod property;
pub mod reservation;
pub mod rows;
pub mod timeline;
pub mod viewport;

pub use intervention::{Intervention, InterventionKind, InterventionStatus};
pub use portfolio::Portfolio;
pub use property::Property;
pub use reservation::{Reservation, ReservationStatus};
pub use rows::PropertyRow;
pub use timeline::{DateRangeController, NavUnit, VisibleRange, ZoomLevel};
pub use viewport::ViewportSync;
