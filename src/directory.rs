//! Employee directory lookup.

use std::collections::HashMap;

use crate::Amount;
use crate::model::{EmployeeId, EmploymentMode};

/// What the directory knows about an employee's compensation.
///
/// The suggested range is yearly CTC and is advisory only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmployeeProfile {
    pub employment_mode: EmploymentMode,
    pub suggested_min_ctc: Option<Amount>,
    pub suggested_max_ctc: Option<Amount>,
    pub average_ctc: Option<Amount>,
}

impl EmployeeProfile {
    pub fn new(employment_mode: EmploymentMode) -> Self {
        Self {
            employment_mode,
            suggested_min_ctc: None,
            suggested_max_ctc: None,
            average_ctc: None,
        }
    }

    /// Whether `yearly_ctc` falls inside the suggested range. Missing
    /// bounds are open.
    pub fn within_suggested(&self, yearly_ctc: Amount) -> bool {
        self.suggested_min_ctc.is_none_or(|min| yearly_ctc >= min)
            && self.suggested_max_ctc.is_none_or(|max| yearly_ctc <= max)
    }
}

/// Source of employee classification.
pub trait EmployeeDirectory {
    fn lookup(&self, employee: EmployeeId) -> Option<EmployeeProfile>;
}

/// Directory held in memory, e.g. loaded from a csv export.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    profiles: HashMap<EmployeeId, EmployeeProfile>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, employee: EmployeeId, profile: EmployeeProfile) {
        self.profiles.insert(employee, profile);
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl EmployeeDirectory for InMemoryDirectory {
    fn lookup(&self, employee: EmployeeId) -> Option<EmployeeProfile> {
        self.profiles.get(&employee).copied()
    }
}

impl FromIterator<(EmployeeId, EmployeeProfile)> for InMemoryDirectory {
    fn from_iter<I: IntoIterator<Item = (EmployeeId, EmployeeProfile)>>(iter: I) -> Self {
        Self {
            profiles: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_known_and_unknown() {
        let directory: InMemoryDirectory =
            [(7, EmployeeProfile::new(EmploymentMode::Hourly))].into_iter().collect();

        assert_eq!(directory.len(), 1);
        assert_eq!(
            directory.lookup(7).map(|p| p.employment_mode),
            Some(EmploymentMode::Hourly)
        );
        assert_eq!(directory.lookup(8), None);
    }

    #[test]
    fn suggested_range_is_inclusive() {
        let profile = EmployeeProfile {
            suggested_min_ctc: Some(Amount::from_units(600_000)),
            suggested_max_ctc: Some(Amount::from_units(900_000)),
            ..EmployeeProfile::new(EmploymentMode::Salaried)
        };
        assert!(profile.within_suggested(Amount::from_units(600_000)));
        assert!(profile.within_suggested(Amount::from_units(900_000)));
        assert!(!profile.within_suggested(Amount::from_units(599_999)));
        assert!(!profile.within_suggested(Amount::from_units(900_001)));
    }

    #[test]
    fn missing_bounds_are_open() {
        let profile = EmployeeProfile {
            suggested_max_ctc: Some(Amount::from_units(100)),
            ..EmployeeProfile::new(EmploymentMode::Salaried)
        };
        assert!(profile.within_suggested(Amount::ZERO));
        assert!(!profile.within_suggested(Amount::from_units(101)));
        assert!(
            EmployeeProfile::new(EmploymentMode::Salaried).within_suggested(Amount::from_units(1))
        );
    }
}
