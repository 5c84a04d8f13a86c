use crate::Amount;
use crate::engine::statutory::CalculatedValues;
use crate::model::{ComponentKey, Components, DeductionKey, Deductions, EmploymentMode, Period};

/// Employer-side statutory contributions, paid on top of gross.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EmployerContributions {
    pub epf_employer: Amount,
    pub esi_employer: Amount,
}

impl EmployerContributions {
    pub fn total(&self) -> Amount {
        self.epf_employer + self.esi_employer
    }
}

/// A complete payroll breakdown in the period of the input it was built from.
///
/// Built fresh on every recalculation and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompensationBreakdown {
    pub period: Period,
    pub employment_mode: EmploymentMode,
    pub earnings: Components<Amount>,
    pub gross_salary: Amount,
    /// Automatic figures, kept so an overridden field can be reset.
    pub calculated: CalculatedValues,
    /// Effective value of every deduction-side field, employer ones included.
    /// Employer EPF/ESI are reported in `employer_contributions` instead.
    pub deductions: Deductions<Amount>,
    /// Sum of [`employee_deductions`](Self::employee_deductions), not of
    /// every entry in `deductions`.
    pub total_deductions: Amount,
    pub employer_contributions: EmployerContributions,
    pub total_employer_contribution: Amount,
    pub net_salary: Amount,
    pub net_annual_salary: Amount,
    pub net_monthly_salary: Amount,
    pub total_ctc: Amount,
    pub monthly_ctc: Amount,
    pub yearly_ctc: Amount,
    pub final_ctc: Amount,
    /// Only set for hourly employment.
    pub hourly_rate: Option<Amount>,
}

impl CompensationBreakdown {
    /// Sum everything up from the allocated earnings and resolved deductions.
    pub(crate) fn aggregate(
        period: Period,
        employment_mode: EmploymentMode,
        earnings: Components<Amount>,
        calculated: CalculatedValues,
        deductions: Deductions<Amount>,
        hourly_rate: Option<Amount>,
    ) -> Self {
        let gross_salary: Amount = earnings.values().sum();

        let total_deductions: Amount = deductions
            .iter()
            .filter(|(key, _)| !key.is_employer_side())
            .map(|(_, amount)| *amount)
            .sum();

        let employer_contributions = EmployerContributions {
            epf_employer: deductions[DeductionKey::EpfEmployer],
            esi_employer: deductions[DeductionKey::EsiEmployer],
        };
        let total_employer_contribution = employer_contributions.total();

        let net_salary = gross_salary - total_deductions;
        let total_ctc = gross_salary + total_employer_contribution;

        // Hourly CTC is current-period gross plus contributions and is never
        // annualized; for salaried pay this is the period-scaled CTC itself.
        let final_ctc = match employment_mode {
            EmploymentMode::Hourly => gross_salary + total_employer_contribution,
            EmploymentMode::Salaried => total_ctc,
        };

        Self {
            period,
            employment_mode,
            earnings,
            gross_salary,
            calculated,
            deductions,
            total_deductions,
            employer_contributions,
            total_employer_contribution,
            net_salary,
            net_annual_salary: period.to_yearly(net_salary),
            net_monthly_salary: period.to_monthly(net_salary),
            total_ctc,
            monthly_ctc: period.to_monthly(total_ctc),
            yearly_ctc: period.to_yearly(total_ctc),
            final_ctc,
            hourly_rate,
        }
    }

    /// Breakdown where every figure is zero.
    pub fn zero(period: Period, employment_mode: EmploymentMode) -> Self {
        let hourly_rate = match employment_mode {
            EmploymentMode::Hourly => Some(Amount::ZERO),
            EmploymentMode::Salaried => None,
        };
        Self::aggregate(
            period,
            employment_mode,
            Components::default(),
            CalculatedValues::default(),
            Deductions::default(),
            hourly_rate,
        )
    }

    pub fn earning(&self, key: ComponentKey) -> Amount {
        self.earnings[key]
    }

    pub fn deduction(&self, key: DeductionKey) -> Amount {
        self.deductions[key]
    }

    /// Employee-side deductions, the ones that make up `total_deductions`.
    pub fn employee_deductions(&self) -> impl Iterator<Item = (DeductionKey, Amount)> + '_ {
        self.deductions
            .iter()
            .filter(|(key, _)| !key.is_employer_side())
            .map(|(key, amount)| (key, *amount))
    }
}
