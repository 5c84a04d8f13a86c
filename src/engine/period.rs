use crate::Amount;
use crate::model::Period;

/// A gross figure expressed in both periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodGross {
    pub monthly: Amount,
    pub yearly: Amount,
}

/// Express `gross`, given in `period`, as both a monthly and a yearly figure.
pub fn normalize(gross: Amount, period: Period) -> PeriodGross {
    PeriodGross {
        monthly: period.to_monthly(gross),
        yearly: period.to_yearly(gross),
    }
}
