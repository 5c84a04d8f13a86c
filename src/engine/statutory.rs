//! Statutory deductions and employer contributions.
//!
//! Figures are worked out on a monthly basis and then expressed in the
//! active period. ESI, professional tax and income tax have no automatic
//! rule yet: they always calculate to zero and only take a value through
//! a manual override.

use crate::Amount;
use crate::model::{Applicability, DeductionKey, Period};

/// Rates and caps for the automatic statutory figures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatutoryRules {
    /// Share of monthly Basic paid into EPF by the employee (and matched by the employer).
    pub epf_rate_percent: f64,
    /// Monthly ceiling on the employee EPF contribution.
    pub epf_monthly_cap: Amount,
}

impl Default for StatutoryRules {
    fn default() -> Self {
        Self {
            epf_rate_percent: 12.0,
            epf_monthly_cap: Amount::from_units(1800),
        }
    }
}

/// Automatically calculated figures, before any manual override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CalculatedValues {
    pub epf_employee: Amount,
    pub epf_employer: Amount,
    pub esi_employee: Amount,
    pub esi_employer: Amount,
    pub professional_tax: Amount,
    pub income_tax: Amount,
}

impl CalculatedValues {
    /// Calculated value for `key`. Recurring deposit and health insurance
    /// are manual-only and calculate to zero.
    pub fn get(&self, key: DeductionKey) -> Amount {
        match key {
            DeductionKey::EpfEmployee => self.epf_employee,
            DeductionKey::EpfEmployer => self.epf_employer,
            DeductionKey::EsiEmployee => self.esi_employee,
            DeductionKey::EsiEmployer => self.esi_employer,
            DeductionKey::ProfessionalTax => self.professional_tax,
            DeductionKey::IncomeTax => self.income_tax,
            DeductionKey::RecurringDeposit | DeductionKey::HealthInsurance => Amount::ZERO,
        }
    }
}

/// Calculate statutory figures from `basic`, expressed in `period`.
pub fn calculate(
    basic: Amount,
    period: Period,
    applicability: &Applicability,
    rules: &StatutoryRules,
) -> CalculatedValues {
    let basic_for_epf = period.to_monthly(basic);
    let epf_employee = period.from_monthly(epf_contribution(
        basic_for_epf,
        applicability.epf,
        rules,
    ));

    CalculatedValues {
        epf_employee,
        // employer matches the employee 1:1, up to the same cap
        epf_employer: epf_employee,
        // no eligibility threshold or rate for ESI yet, whatever the toggle says
        esi_employee: Amount::ZERO,
        esi_employer: Amount::ZERO,
        professional_tax: Amount::ZERO,
        income_tax: Amount::ZERO,
    }
}

/// Monthly employee EPF contribution.
pub fn epf_contribution(monthly_basic: Amount, applicable: bool, rules: &StatutoryRules) -> Amount {
    if !applicable || !monthly_basic.is_positive() {
        return Amount::ZERO;
    }
    monthly_basic
        .mul_ratio(rules.epf_rate_percent, 100.0)
        .min(rules.epf_monthly_cap)
}
