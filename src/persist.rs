//! Monthly-normalized records handed to storage on commit.

use std::io;

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use crate::Amount;
use crate::engine::Draft;
use crate::model::{ComponentKey, DeductionKey, EmployeeId};

/// Errors raised by a [`RecordSink`].
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to write record: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to flush records: {0}")]
    Io(#[from] io::Error),

    #[error("record rejected: {0}")]
    Rejected(String),
}

/// A committed compensation, always in monthly figures whatever period
/// the operator worked in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyRecord {
    pub employee_id: EmployeeId,
    pub is_hourly: bool,
    pub ctc_amount: Amount,
    pub hourly_rate: Amount,
    pub working_hours: f64,
    pub monthly_basic_pay: Amount,
    pub basic_salary: Amount,
    pub hra: Amount,
    pub da: Amount,
    pub lta: Amount,
    pub special_allowance: Amount,
    pub performance_bonus: Amount,
    pub gross_salary: Amount,
    pub net_annual_salary: Amount,
    pub net_monthly_payable: Amount,
    pub epf_employee: Amount,
    pub rd: Amount,
    pub health_insurance: Amount,
    pub epf_applicable: bool,
    pub professional_tax_applicable: bool,
    pub esi_applicable: bool,
    pub effective_date: NaiveDate,
}

impl MonthlyRecord {
    /// Normalize a draft to monthly figures.
    pub fn from_draft(employee_id: EmployeeId, draft: &Draft) -> Self {
        let breakdown = &draft.breakdown;
        let period = breakdown.period;
        let monthly = |amount: Amount| period.to_monthly(amount);
        let earning = |key: ComponentKey| monthly(breakdown.earning(key));
        let deduction = |key: DeductionKey| monthly(breakdown.deduction(key));

        let is_hourly = draft.is_hourly();
        let basic_salary = earning(ComponentKey::Basic);

        Self {
            employee_id,
            is_hourly,
            ctc_amount: monthly(breakdown.final_ctc),
            hourly_rate: breakdown.hourly_rate.unwrap_or_default(),
            working_hours: draft.input.structure.working_hours(),
            monthly_basic_pay: if is_hourly { basic_salary } else { Amount::ZERO },
            basic_salary,
            hra: earning(ComponentKey::Hra),
            da: earning(ComponentKey::Da),
            lta: earning(ComponentKey::Lta),
            special_allowance: earning(ComponentKey::SpecialAllowance),
            performance_bonus: earning(ComponentKey::PerformanceBonus),
            gross_salary: monthly(breakdown.gross_salary),
            net_annual_salary: breakdown.net_annual_salary,
            net_monthly_payable: breakdown.net_monthly_salary,
            epf_employee: deduction(DeductionKey::EpfEmployee),
            rd: deduction(DeductionKey::RecurringDeposit),
            health_insurance: deduction(DeductionKey::HealthInsurance),
            epf_applicable: draft.input.applicability.epf,
            professional_tax_applicable: draft.input.applicability.professional_tax,
            esi_applicable: draft.input.applicability.esi,
            effective_date: draft.effective_date,
        }
    }
}

/// Destination for committed records.
pub trait RecordSink {
    fn commit(&mut self, record: &MonthlyRecord) -> Result<(), PersistError>;
}

impl RecordSink for Vec<MonthlyRecord> {
    fn commit(&mut self, record: &MonthlyRecord) -> Result<(), PersistError> {
        self.push(record.clone());
        Ok(())
    }
}
