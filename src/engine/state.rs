use chrono::NaiveDate;

use crate::engine::CompensationBreakdown;
use crate::model::CompensationInput;

/// An employee's compensation being edited, with its latest breakdown.
///
/// Replaced wholesale on every edit; committing consumes it.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    pub effective_date: NaiveDate,
    pub input: CompensationInput,
    pub breakdown: CompensationBreakdown,
}

impl Draft {
    pub fn is_hourly(&self) -> bool {
        self.input.structure.is_hourly()
    }
}
