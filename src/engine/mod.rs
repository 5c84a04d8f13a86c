//! Compensation (CTC) resolution engine.
//!
//! [`compute_breakdown`] turns a single gross figure into a full payroll
//! breakdown: earnings per component, statutory deductions, employer
//! contributions, net pay and CTC. It is pure and total, so it can run on
//! every edit.
//!
//! [`Engine`] wraps it for the editing workflow: it keeps the latest draft
//! per employee and commits drafts to a [`RecordSink`] as monthly records.
//! Also supports async stream of edits.

use std::collections::HashMap;
use tokio_stream::{Stream, StreamExt};
use tracing::{debug, info, warn};

use crate::directory::EmployeeDirectory;
use crate::model::{ComponentKey, CompensationInput, Edit, EmployeeId, PayStructure};
use crate::persist::{MonthlyRecord, RecordSink};

pub mod allocation;
pub mod hourly;
pub mod overrides;
pub mod period;
pub mod statutory;

mod breakdown;
pub use breakdown::{CompensationBreakdown, EmployerContributions};

mod state;
pub use state::Draft;

mod error;
pub use error::{EngineError, ValidationError};

pub use statutory::{CalculatedValues, StatutoryRules};

/// Compute a breakdown with the default statutory rules.
pub fn compute_breakdown(input: &CompensationInput) -> CompensationBreakdown {
    compute_breakdown_with(input, &StatutoryRules::default())
}

/// Compute a breakdown:
/// - Normalize gross to monthly and yearly figures
/// - Allocate gross across earning components
/// - Calculate statutory figures from Basic
/// - Resolve manual overrides field by field
/// - Aggregate totals, net pay and CTC
///
/// Input that cannot produce a breakdown (no positive gross, or hourly
/// without working hours) yields an all-zero one. Overrides are ignored.
pub fn compute_breakdown_with(
    input: &CompensationInput,
    rules: &StatutoryRules,
) -> CompensationBreakdown {
    let mode = input.structure.employment_mode();
    if !is_computable(input) {
        return CompensationBreakdown::zero(input.period, mode);
    }

    let gross = period::normalize(input.gross_amount, input.period);
    let earnings = allocation::allocate(input.gross_amount, &input.structure, &input.components);
    let calculated = statutory::calculate(
        earnings[ComponentKey::Basic],
        input.period,
        &input.applicability,
        rules,
    );
    let deductions = overrides::resolve_all(&calculated, &input.overrides);
    let hourly_rate = input
        .structure
        .is_hourly()
        .then(|| hourly::hourly_rate(gross.monthly, input.structure.working_hours()));

    CompensationBreakdown::aggregate(
        input.period,
        mode,
        earnings,
        calculated,
        deductions,
        hourly_rate,
    )
}

fn is_computable(input: &CompensationInput) -> bool {
    let hours_ok = match input.structure {
        PayStructure::Hourly {
            working_hours_per_month,
        } => working_hours_per_month > 0.0,
        PayStructure::Salaried { .. } => true,
    };
    hours_ok && input.effective_gross().is_positive()
}

/// The compensation editing engine.
///
/// Holds the latest draft per employee until it is committed.
pub struct Engine {
    rules: StatutoryRules,
    directory: Option<Box<dyn EmployeeDirectory + Send + Sync>>,
    drafts: HashMap<EmployeeId, Draft>,
}

/// Public API
impl Engine {
    pub fn new() -> Self {
        Self::with_rules(StatutoryRules::default())
    }

    pub fn with_rules(rules: StatutoryRules) -> Self {
        Self {
            rules,
            directory: None,
            drafts: HashMap::new(),
        }
    }

    /// Use `directory` to classify employees on every edit.
    pub fn with_directory(
        mut self,
        directory: impl EmployeeDirectory + Send + Sync + 'static,
    ) -> Self {
        self.directory = Some(Box::new(directory));
        self
    }

    /// Run the engine with the given edit stream
    pub async fn run(&mut self, mut stream: impl Stream<Item = Edit> + Unpin) {
        while let Some(edit) = stream.next().await {
            self.apply(edit);
        }
    }

    /// Return the current drafts.
    pub fn drafts(&self) -> impl Iterator<Item = (EmployeeId, &Draft)> + '_ {
        self.drafts.iter().map(|(id, draft)| (*id, draft))
    }

    /// Return the current draft of one employee
    pub fn get_draft(&self, employee: EmployeeId) -> Option<&Draft> {
        self.drafts.get(&employee)
    }

    /// Recalculate an employee's draft from an edit.
    ///
    /// The new draft replaces any previous one: the latest edit wins.
    pub fn apply(&mut self, edit: Edit) -> &CompensationBreakdown {
        let Edit {
            employee,
            effective_date,
            mut input,
        } = edit;

        let profile = self.directory.as_ref().and_then(|d| d.lookup(employee));
        if let Some(profile) = &profile {
            let mode = input.structure.employment_mode();
            if profile.employment_mode != mode {
                warn!(
                    employee,
                    edit = ?mode,
                    directory = ?profile.employment_mode,
                    "employment mode taken from directory"
                );
                input.structure = input
                    .structure
                    .with_mode(profile.employment_mode, input.structure.working_hours());
            }
        }

        let breakdown = compute_breakdown_with(&input, &self.rules);
        debug!(
            employee,
            gross = %breakdown.gross_salary,
            deductions = %breakdown.total_deductions,
            net = %breakdown.net_salary,
            ctc = %breakdown.final_ctc,
            "breakdown recalculated"
        );

        if let Some(profile) = &profile {
            if !profile.within_suggested(breakdown.yearly_ctc) {
                warn!(
                    employee,
                    yearly_ctc = %breakdown.yearly_ctc,
                    "ctc outside suggested range"
                );
            }
        }

        let draft = Draft {
            effective_date,
            input,
            breakdown,
        };
        if self.drafts.insert(employee, draft).is_some() {
            debug!(employee, "previous draft discarded");
        }

        // just inserted
        &self.drafts[&employee].breakdown
    }

    /// Commit one employee's draft to `sink`:
    /// - Ensure there is a draft
    /// - Validate its input
    /// - Hand the monthly record to the sink
    /// - Drop the draft
    ///
    /// On failure the draft is kept so it can be corrected.
    pub fn commit<S: RecordSink + ?Sized>(
        &mut self,
        employee: EmployeeId,
        sink: &mut S,
    ) -> Result<MonthlyRecord, EngineError> {
        let draft = self
            .drafts
            .get(&employee)
            .ok_or(EngineError::NoDraft(employee))?;

        draft
            .input
            .validate()
            .map_err(|source| EngineError::Invalid { employee, source })?;

        let record = MonthlyRecord::from_draft(employee, draft);
        sink.commit(&record)
            .map_err(|source| EngineError::Persist { employee, source })?;

        self.drafts.remove(&employee);
        info!(
            employee,
            ctc = %record.ctc_amount,
            net = %record.net_monthly_payable,
            effective_date = %record.effective_date,
            "compensation committed"
        );
        Ok(record)
    }

    /// Commit every draft in employee order. Failures are logged and do
    /// not stop the remaining commits. Returns how many were committed.
    pub fn commit_all<S: RecordSink + ?Sized>(&mut self, sink: &mut S) -> usize {
        let mut employees: Vec<EmployeeId> = self.drafts.keys().copied().collect();
        employees.sort_unstable();

        let mut committed = 0;
        for employee in employees {
            match self.commit(employee, sink) {
                Ok(_) => committed += 1,
                Err(e) => warn!(employee, reason = %e, "commit rejected"),
            }
        }
        committed
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
