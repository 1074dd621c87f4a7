//! Schedule reference data: locations, time blocks, time slots.

use conplan_core::schedule;
use conplan_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A physical or virtual space a game can be assigned to.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Location {
    pub id: DbId,
    pub convention_id: DbId,
    pub text: String,
}

/// A named, ordered calendar bucket such as "Friday Night" or
/// "Saturday Midnight". The text's first word classifies the day for grid
/// placement; see [`conplan_core::schedule::block_offset`].
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TimeBlock {
    pub id: DbId,
    pub text: String,
    pub sort_id: i32,
}

/// A reusable hour-of-day window, e.g. 14.0 - 16.0. `stop < start` wraps
/// past midnight.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TimeSlot {
    pub id: DbId,
    pub start: f64,
    pub stop: f64,
}

impl TimeSlot {
    /// Display label, e.g. `"2 PM - 4 PM"`.
    pub fn label(&self) -> String {
        schedule::slot_label(self.start, self.stop)
    }

    /// Grid width of this window, accounting for midnight wraparound.
    pub fn width(&self) -> f64 {
        schedule::slot_width(Some((self.start, self.stop)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(start: f64, stop: f64) -> TimeSlot {
        TimeSlot { id: 1, start, stop }
    }

    #[test]
    fn label_uses_am_pm_convention() {
        assert_eq!(slot(14.0, 16.0).label(), "2 PM - 4 PM");
        assert_eq!(slot(0.0, 12.0).label(), "Midnight - Noon");
    }

    #[test]
    fn width_handles_wraparound() {
        assert_eq!(slot(22.0, 2.0).width(), 4.0);
        assert_eq!(slot(18.5, 23.75).width(), 5.25);
    }
}
