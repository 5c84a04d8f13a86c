//! Core domain types for the compensation engine.

use std::fmt;
use std::ops::{Index, IndexMut};

use chrono::NaiveDate;

use crate::Amount;
use crate::engine::ValidationError;

/// Employee identifier.
pub type EmployeeId = u32;

/// Period a gross figure (and every derived figure) is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    #[default]
    Monthly,
    Yearly,
}

impl Period {
    /// Express a monthly figure in this period.
    pub fn from_monthly(self, monthly: Amount) -> Amount {
        match self {
            Period::Monthly => monthly,
            Period::Yearly => monthly * 12,
        }
    }

    /// Express a figure of this period as a monthly one.
    pub fn to_monthly(self, value: Amount) -> Amount {
        match self {
            Period::Monthly => value,
            Period::Yearly => value / 12,
        }
    }

    /// Express a figure of this period as a yearly one.
    pub fn to_yearly(self, value: Amount) -> Amount {
        match self {
            Period::Monthly => value * 12,
            Period::Yearly => value,
        }
    }
}

/// Employment classification of an employee, as known to the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmploymentMode {
    Salaried,
    Hourly,
}

/// Which half of a [`ComponentShare`] drives salaried allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Percentage,
    Amount,
}

/// Employment mode and allocation mode combined.
///
/// Hourly pay always allocates by percentage, so there is no way to
/// ask for fixed amounts under hourly employment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PayStructure {
    Salaried { input_mode: InputMode },
    Hourly { working_hours_per_month: f64 },
}

impl PayStructure {
    pub fn employment_mode(&self) -> EmploymentMode {
        match self {
            PayStructure::Salaried { .. } => EmploymentMode::Salaried,
            PayStructure::Hourly { .. } => EmploymentMode::Hourly,
        }
    }

    pub fn is_hourly(&self) -> bool {
        matches!(self, PayStructure::Hourly { .. })
    }

    /// Working hours per month, zero for salaried pay.
    pub fn working_hours(&self) -> f64 {
        match self {
            PayStructure::Salaried { .. } => 0.0,
            PayStructure::Hourly {
                working_hours_per_month,
            } => *working_hours_per_month,
        }
    }

    /// Switch to `mode`, keeping whatever detail is still meaningful.
    ///
    /// Switching to hourly drops the input mode (percentage is implied);
    /// switching to salaried starts from percentage allocation.
    pub fn with_mode(self, mode: EmploymentMode, working_hours_per_month: f64) -> Self {
        match (self, mode) {
            (PayStructure::Salaried { .. }, EmploymentMode::Salaried)
            | (PayStructure::Hourly { .. }, EmploymentMode::Hourly) => self,
            (PayStructure::Hourly { .. }, EmploymentMode::Salaried) => PayStructure::Salaried {
                input_mode: InputMode::Percentage,
            },
            (PayStructure::Salaried { .. }, EmploymentMode::Hourly) => PayStructure::Hourly {
                working_hours_per_month,
            },
        }
    }
}

impl Default for PayStructure {
    fn default() -> Self {
        PayStructure::Salaried {
            input_mode: InputMode::Percentage,
        }
    }
}

/// Earning components that together make up gross salary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKey {
    Basic,
    Hra,
    Da,
    Lta,
    SpecialAllowance,
    PerformanceBonus,
}

impl ComponentKey {
    pub const ALL: [ComponentKey; 6] = [
        ComponentKey::Basic,
        ComponentKey::Hra,
        ComponentKey::Da,
        ComponentKey::Lta,
        ComponentKey::SpecialAllowance,
        ComponentKey::PerformanceBonus,
    ];

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ComponentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ComponentKey::Basic => "basic",
            ComponentKey::Hra => "hra",
            ComponentKey::Da => "da",
            ComponentKey::Lta => "lta",
            ComponentKey::SpecialAllowance => "special_allowance",
            ComponentKey::PerformanceBonus => "performance_bonus",
        };
        f.write_str(name)
    }
}

/// One value per [`ComponentKey`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Components<T>([T; 6]);

impl<T> Components<T> {
    pub fn from_fn(mut f: impl FnMut(ComponentKey) -> T) -> Self {
        Components(ComponentKey::ALL.map(&mut f))
    }

    pub fn iter(&self) -> impl Iterator<Item = (ComponentKey, &T)> + '_ {
        ComponentKey::ALL.into_iter().zip(self.0.iter())
    }

    pub fn values(&self) -> impl Iterator<Item = &T> + '_ {
        self.0.iter()
    }
}

impl<T> Index<ComponentKey> for Components<T> {
    type Output = T;

    fn index(&self, key: ComponentKey) -> &T {
        &self.0[key.index()]
    }
}

impl<T> IndexMut<ComponentKey> for Components<T> {
    fn index_mut(&mut self, key: ComponentKey) -> &mut T {
        &mut self.0[key.index()]
    }
}

/// Allocation setting for one component: a relative weight and a fixed amount.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ComponentShare {
    pub percentage: f64,
    pub fixed_amount: Amount,
}

impl ComponentShare {
    pub fn percentage(percentage: f64) -> Self {
        Self {
            percentage,
            fixed_amount: Amount::ZERO,
        }
    }

    pub fn fixed(fixed_amount: Amount) -> Self {
        Self {
            percentage: 0.0,
            fixed_amount,
        }
    }
}

pub type ComponentConfig = Components<ComponentShare>;

/// Statutory toggles, each independent of the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Applicability {
    pub epf: bool,
    pub esi: bool,
    pub professional_tax: bool,
}

/// Every deduction-side field an operator may override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeductionKey {
    EpfEmployee,
    EpfEmployer,
    EsiEmployee,
    EsiEmployer,
    ProfessionalTax,
    IncomeTax,
    RecurringDeposit,
    HealthInsurance,
}

impl DeductionKey {
    pub const ALL: [DeductionKey; 8] = [
        DeductionKey::EpfEmployee,
        DeductionKey::EpfEmployer,
        DeductionKey::EsiEmployee,
        DeductionKey::EsiEmployer,
        DeductionKey::ProfessionalTax,
        DeductionKey::IncomeTax,
        DeductionKey::RecurringDeposit,
        DeductionKey::HealthInsurance,
    ];

    /// Employer-side keys are contributions on top of gross, not deductions from it.
    pub const fn is_employer_side(self) -> bool {
        matches!(self, DeductionKey::EpfEmployer | DeductionKey::EsiEmployer)
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for DeductionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DeductionKey::EpfEmployee => "epf_employee",
            DeductionKey::EpfEmployer => "epf_employer",
            DeductionKey::EsiEmployee => "esi_employee",
            DeductionKey::EsiEmployer => "esi_employer",
            DeductionKey::ProfessionalTax => "professional_tax",
            DeductionKey::IncomeTax => "income_tax",
            DeductionKey::RecurringDeposit => "rd",
            DeductionKey::HealthInsurance => "health_insurance",
        };
        f.write_str(name)
    }
}

/// One value per [`DeductionKey`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Deductions<T>([T; 8]);

impl<T> Deductions<T> {
    pub fn from_fn(mut f: impl FnMut(DeductionKey) -> T) -> Self {
        Deductions(DeductionKey::ALL.map(&mut f))
    }

    pub fn iter(&self) -> impl Iterator<Item = (DeductionKey, &T)> + '_ {
        DeductionKey::ALL.into_iter().zip(self.0.iter())
    }
}

impl<T> Index<DeductionKey> for Deductions<T> {
    type Output = T;

    fn index(&self, key: DeductionKey) -> &T {
        &self.0[key.index()]
    }
}

impl<T> IndexMut<DeductionKey> for Deductions<T> {
    fn index_mut(&mut self, key: DeductionKey) -> &mut T {
        &mut self.0[key.index()]
    }
}

/// Operator-entered values, one optional slot per deduction field.
///
/// A slot is only filled by text that parses as a number; blank or
/// unparseable text leaves it empty so the calculated value applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ManualOverrides(Deductions<Option<Amount>>);

impl ManualOverrides {
    pub fn get(&self, key: DeductionKey) -> Option<Amount> {
        self.0[key]
    }

    pub fn set(&mut self, key: DeductionKey, value: Amount) {
        self.0[key] = Some(value);
    }

    /// Record what the operator typed into `key`. Returns whether the
    /// text was accepted as an override.
    pub fn set_text(&mut self, key: DeductionKey, text: &str) -> bool {
        let parsed = if text.trim().is_empty() {
            None
        } else {
            text.parse::<Amount>().ok()
        };
        self.0[key] = parsed;
        parsed.is_some()
    }

    pub fn clear(&mut self, key: DeductionKey) {
        self.0[key] = None;
    }

    pub fn with(mut self, key: DeductionKey, value: Amount) -> Self {
        self.set(key, value);
        self
    }
}

/// Everything the operator controls for one recalculation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompensationInput {
    pub gross_amount: Amount,
    pub period: Period,
    pub structure: PayStructure,
    pub components: ComponentConfig,
    pub applicability: Applicability,
    pub overrides: ManualOverrides,
}

impl CompensationInput {
    /// Gross the allocation is anchored on: the entered figure, or the sum
    /// of fixed amounts when allocating by amount.
    pub fn effective_gross(&self) -> Amount {
        match self.structure {
            PayStructure::Salaried {
                input_mode: InputMode::Amount,
            } => self.components.values().map(|share| share.fixed_amount).sum(),
            _ => self.gross_amount,
        }
    }

    /// Check the input is fit to commit. The engine computes a breakdown
    /// either way.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (key, share) in self.components.iter() {
            if !(share.percentage >= 0.0) || share.fixed_amount.is_negative() {
                return Err(ValidationError::NegativeComponent(key));
            }
        }

        let gross = self.effective_gross();
        if !gross.is_positive() {
            return Err(ValidationError::NonPositiveGross(gross));
        }

        if let PayStructure::Hourly {
            working_hours_per_month,
        } = self.structure
        {
            if !(working_hours_per_month > 0.0) {
                return Err(ValidationError::NonPositiveWorkingHours(
                    working_hours_per_month,
                ));
            }
        }

        Ok(())
    }
}

/// One operator edit of an employee's compensation draft.
#[derive(Debug, Clone, PartialEq)]
pub struct Edit {
    pub employee: EmployeeId,
    pub effective_date: NaiveDate,
    pub input: CompensationInput,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_conversions() {
        let amount = Amount::from_units(1200);
        assert_eq!(Period::Monthly.to_monthly(amount), amount);
        assert_eq!(Period::Monthly.to_yearly(amount), Amount::from_units(14_400));
        assert_eq!(Period::Yearly.to_monthly(amount), Amount::from_units(100));
        assert_eq!(Period::Yearly.to_yearly(amount), amount);
        assert_eq!(Period::Yearly.from_monthly(amount), Amount::from_units(14_400));
    }

    #[test]
    fn pay_structure_mode_switch() {
        let salaried = PayStructure::Salaried {
            input_mode: InputMode::Amount,
        };
        let hourly = salaried.with_mode(EmploymentMode::Hourly, 160.0);
        assert_eq!(
            hourly,
            PayStructure::Hourly {
                working_hours_per_month: 160.0
            }
        );
        assert_eq!(
            hourly.with_mode(EmploymentMode::Salaried, 0.0),
            PayStructure::Salaried {
                input_mode: InputMode::Percentage
            }
        );
        assert_eq!(salaried.with_mode(EmploymentMode::Salaried, 0.0), salaried);
    }

    #[test]
    fn components_index_by_key() {
        let mut components = Components::<Amount>::default();
        components[ComponentKey::Hra] = Amount::from_units(5);
        assert_eq!(components[ComponentKey::Hra], Amount::from_units(5));
        assert_eq!(components[ComponentKey::Basic], Amount::ZERO);
        let keys: Vec<_> = components.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ComponentKey::ALL.to_vec());
    }

    #[test]
    fn employer_side_keys() {
        let employer: Vec<_> = DeductionKey::ALL
            .into_iter()
            .filter(|k| k.is_employer_side())
            .collect();
        assert_eq!(
            employer,
            vec![DeductionKey::EpfEmployer, DeductionKey::EsiEmployer]
        );
    }

    #[test]
    fn override_text_blank_is_absent() {
        let mut overrides = ManualOverrides::default();
        assert!(overrides.set_text(DeductionKey::IncomeTax, "2500"));
        assert_eq!(
            overrides.get(DeductionKey::IncomeTax),
            Some(Amount::from_units(2500))
        );

        assert!(!overrides.set_text(DeductionKey::IncomeTax, "   "));
        assert_eq!(overrides.get(DeductionKey::IncomeTax), None);
    }

    #[test]
    fn override_text_unparseable_is_absent() {
        let mut overrides =
            ManualOverrides::default().with(DeductionKey::EpfEmployee, Amount::from_units(1));
        assert!(!overrides.set_text(DeductionKey::EpfEmployee, "12x"));
        assert_eq!(overrides.get(DeductionKey::EpfEmployee), None);
    }

    fn valid_input() -> CompensationInput {
        let mut input = CompensationInput {
            gross_amount: Amount::from_units(40_000),
            ..CompensationInput::default()
        };
        input.components[ComponentKey::Basic] = ComponentShare::percentage(100.0);
        input
    }

    #[test]
    fn validate_accepts_positive_gross() {
        assert_eq!(valid_input().validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_zero_gross() {
        let input = CompensationInput {
            gross_amount: Amount::ZERO,
            ..valid_input()
        };
        assert_eq!(
            input.validate(),
            Err(ValidationError::NonPositiveGross(Amount::ZERO))
        );
    }

    #[test]
    fn validate_uses_fixed_amounts_in_amount_mode() {
        let mut input = CompensationInput {
            gross_amount: Amount::ZERO,
            structure: PayStructure::Salaried {
                input_mode: InputMode::Amount,
            },
            ..valid_input()
        };
        assert!(input.validate().is_err());

        input.components[ComponentKey::Hra] = ComponentShare::fixed(Amount::from_units(5_000));
        assert_eq!(input.effective_gross(), Amount::from_units(5_000));
        assert_eq!(input.validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_hourly_without_hours() {
        let input = CompensationInput {
            structure: PayStructure::Hourly {
                working_hours_per_month: 0.0,
            },
            ..valid_input()
        };
        assert_eq!(
            input.validate(),
            Err(ValidationError::NonPositiveWorkingHours(0.0))
        );
    }

    #[test]
    fn validate_rejects_negative_share() {
        let mut input = valid_input();
        input.components[ComponentKey::Lta] = ComponentShare::percentage(-5.0);
        assert_eq!(
            input.validate(),
            Err(ValidationError::NegativeComponent(ComponentKey::Lta))
        );
    }

    #[test]
    fn override_zero_is_present() {
        let mut overrides = ManualOverrides::default();
        assert!(overrides.set_text(DeductionKey::EpfEmployee, "0"));
        assert_eq!(overrides.get(DeductionKey::EpfEmployee), Some(Amount::ZERO));
        overrides.clear(DeductionKey::EpfEmployee);
        assert_eq!(overrides.get(DeductionKey::EpfEmployee), None);
    }
}
