use crate::Amount;

/// Display hourly rate in whole currency units.
///
/// Informational only; it never feeds back into allocation.
pub fn hourly_rate(monthly_basic: Amount, working_hours_per_month: f64) -> Amount {
    if !(working_hours_per_month > 0.0) {
        return Amount::ZERO;
    }
    monthly_basic
        .mul_ratio(1.0, working_hours_per_month)
        .round_units()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn even_rate() {
        assert_eq!(
            hourly_rate(Amount::from_units(24_000), 240.0),
            Amount::from_units(100)
        );
    }

    #[test]
    fn rate_is_rounded() {
        // 25_000 / 160 = 156.25
        assert_eq!(
            hourly_rate(Amount::from_units(25_000), 160.0),
            Amount::from_units(156)
        );
        // 20_000 / 176 = 113.636...
        assert_eq!(
            hourly_rate(Amount::from_units(20_000), 176.0),
            Amount::from_units(114)
        );
    }

    #[test]
    fn no_hours_is_zero() {
        assert_eq!(hourly_rate(Amount::from_units(24_000), 0.0), Amount::ZERO);
        assert_eq!(hourly_rate(Amount::from_units(24_000), -8.0), Amount::ZERO);
        assert_eq!(hourly_rate(Amount::from_units(24_000), f64::NAN), Amount::ZERO);
    }
}
