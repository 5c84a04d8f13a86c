use chrono::NaiveDate;
use serde::Deserialize;
use std::io;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

use crate::Amount;
use crate::directory::{EmployeeProfile, InMemoryDirectory};
use crate::model::{
    Applicability, ComponentKey, ComponentShare, CompensationInput, DeductionKey, Edit, EmployeeId,
    EmploymentMode, InputMode, PayStructure, Period,
};
use crate::persist::{MonthlyRecord, PersistError, RecordSink};

/// Errors that can occur when reading csv files
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("failed to open {path}: {source}")]
    Open { path: String, source: csv::Error },

    #[error("line {line}: failed to parse row: {source}")]
    Parse { line: usize, source: csv::Error },

    #[error("line {line}: unrecognized period '{value}'")]
    UnrecognizedPeriod { line: usize, value: String },

    #[error("line {line}: unrecognized employment mode '{value}'")]
    UnrecognizedMode { line: usize, value: String },

    #[error("line {line}: unrecognized input mode '{value}'")]
    UnrecognizedInputMode { line: usize, value: String },
}

#[derive(Debug, Deserialize)]
struct EditRow {
    employee: EmployeeId,
    effective_date: NaiveDate,
    period: String,
    mode: String,
    input_mode: Option<String>,
    gross: Option<f64>,
    working_hours: Option<f64>,

    basic_pct: Option<f64>,
    hra_pct: Option<f64>,
    da_pct: Option<f64>,
    lta_pct: Option<f64>,
    special_pct: Option<f64>,
    bonus_pct: Option<f64>,

    basic_amt: Option<f64>,
    hra_amt: Option<f64>,
    da_amt: Option<f64>,
    lta_amt: Option<f64>,
    special_amt: Option<f64>,
    bonus_amt: Option<f64>,

    epf: Option<bool>,
    esi: Option<bool>,
    pt: Option<bool>,

    // operator text, blank when untouched
    epf_employee: Option<String>,
    epf_employer: Option<String>,
    esi_employee: Option<String>,
    esi_employer: Option<String>,
    professional_tax: Option<String>,
    income_tax: Option<String>,
    rd: Option<String>,
    health_insurance: Option<String>,
}

impl EditRow {
    fn share(&self, key: ComponentKey) -> ComponentShare {
        let (pct, amt) = match key {
            ComponentKey::Basic => (self.basic_pct, self.basic_amt),
            ComponentKey::Hra => (self.hra_pct, self.hra_amt),
            ComponentKey::Da => (self.da_pct, self.da_amt),
            ComponentKey::Lta => (self.lta_pct, self.lta_amt),
            ComponentKey::SpecialAllowance => (self.special_pct, self.special_amt),
            ComponentKey::PerformanceBonus => (self.bonus_pct, self.bonus_amt),
        };
        ComponentShare {
            percentage: pct.unwrap_or_default(),
            fixed_amount: Amount::from_float(amt.unwrap_or_default()),
        }
    }

    fn override_text(&self, key: DeductionKey) -> Option<&str> {
        let text = match key {
            DeductionKey::EpfEmployee => &self.epf_employee,
            DeductionKey::EpfEmployer => &self.epf_employer,
            DeductionKey::EsiEmployee => &self.esi_employee,
            DeductionKey::EsiEmployer => &self.esi_employer,
            DeductionKey::ProfessionalTax => &self.professional_tax,
            DeductionKey::IncomeTax => &self.income_tax,
            DeductionKey::RecurringDeposit => &self.rd,
            DeductionKey::HealthInsurance => &self.health_insurance,
        };
        text.as_deref()
    }

    fn into_edit(self, line: usize) -> Result<Edit, CsvError> {
        let period = parse_period(&self.period, line)?;
        let structure = match parse_mode(&self.mode, line)? {
            EmploymentMode::Hourly => PayStructure::Hourly {
                working_hours_per_month: self.working_hours.unwrap_or_default(),
            },
            EmploymentMode::Salaried => PayStructure::Salaried {
                input_mode: parse_input_mode(self.input_mode.as_deref(), line)?,
            },
        };

        let mut input = CompensationInput {
            gross_amount: Amount::from_float(self.gross.unwrap_or_default()),
            period,
            structure,
            applicability: Applicability {
                epf: self.epf.unwrap_or_default(),
                esi: self.esi.unwrap_or_default(),
                professional_tax: self.pt.unwrap_or_default(),
            },
            ..CompensationInput::default()
        };
        for key in ComponentKey::ALL {
            input.components[key] = self.share(key);
        }
        for key in DeductionKey::ALL {
            let Some(text) = self.override_text(key) else {
                continue;
            };
            if !input.overrides.set_text(key, text) && !text.trim().is_empty() {
                warn!(line, field = %key, text, "override is not a number, using calculated value");
            }
        }

        Ok(Edit {
            employee: self.employee,
            effective_date: self.effective_date,
            input,
        })
    }
}

#[derive(Debug, Deserialize)]
struct DirectoryRow {
    employee: EmployeeId,
    mode: String,
    suggested_min_ctc: Option<f64>,
    suggested_max_ctc: Option<f64>,
    average_ctc: Option<f64>,
}

fn parse_period(value: &str, line: usize) -> Result<Period, CsvError> {
    match value.to_ascii_lowercase().as_str() {
        "monthly" => Ok(Period::Monthly),
        "yearly" => Ok(Period::Yearly),
        _ => Err(CsvError::UnrecognizedPeriod {
            line,
            value: value.to_string(),
        }),
    }
}

fn parse_mode(value: &str, line: usize) -> Result<EmploymentMode, CsvError> {
    match value.to_ascii_lowercase().as_str() {
        "salaried" => Ok(EmploymentMode::Salaried),
        "hourly" => Ok(EmploymentMode::Hourly),
        _ => Err(CsvError::UnrecognizedMode {
            line,
            value: value.to_string(),
        }),
    }
}

fn parse_input_mode(value: Option<&str>, line: usize) -> Result<InputMode, CsvError> {
    match value.map(str::to_ascii_lowercase).as_deref() {
        None | Some("percentage") => Ok(InputMode::Percentage),
        Some("amount") => Ok(InputMode::Amount),
        Some(other) => Err(CsvError::UnrecognizedInputMode {
            line,
            value: other.to_string(),
        }),
    }
}

fn open(path: &Path) -> Result<csv::Reader<std::fs::File>, CsvError> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|source| CsvError::Open {
            path: path.display().to_string(),
            source,
        })
}

/// Read compensation edits from a csv file
pub fn read_edits(
    path: &Path,
) -> Result<impl Iterator<Item = Result<Edit, CsvError>> + use<>, CsvError> {
    let reader = open(path)?;

    Ok(reader
        .into_deserialize::<EditRow>()
        .enumerate()
        .map(|(idx, result)| {
            let line = idx + 2; // 1-indexed, skip header
            let row = result.map_err(|source| CsvError::Parse { line, source })?;
            row.into_edit(line)
        }))
}

/// Read an employee directory from a csv file. Bad rows are skipped with a warning.
pub fn read_directory(path: impl AsRef<Path>) -> Result<InMemoryDirectory, CsvError> {
    let reader = open(path.as_ref())?;
    let mut directory = InMemoryDirectory::new();

    for (idx, result) in reader.into_deserialize::<DirectoryRow>().enumerate() {
        let line = idx + 2;
        let parsed = result
            .map_err(|source| CsvError::Parse { line, source })
            .and_then(|row| {
                let mode = parse_mode(&row.mode, line)?;
                Ok((row, mode))
            });
        match parsed {
            Ok((row, mode)) => directory.insert(
                row.employee,
                EmployeeProfile {
                    employment_mode: mode,
                    suggested_min_ctc: row.suggested_min_ctc.map(Amount::from_float),
                    suggested_max_ctc: row.suggested_max_ctc.map(Amount::from_float),
                    average_ctc: row.average_ctc.map(Amount::from_float),
                },
            ),
            Err(e) => warn!("{e}"),
        }
    }

    Ok(directory)
}

/// Record sink writing monthly records as csv rows
pub struct CsvSink<W: io::Write> {
    writer: csv::Writer<W>,
}

impl<W: io::Write> CsvSink<W> {
    pub fn new(inner: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(inner),
        }
    }

    pub fn into_inner(self) -> Result<W, PersistError> {
        self.writer
            .into_inner()
            .map_err(|e| PersistError::Io(e.into_error()))
    }
}

impl<W: io::Write> RecordSink for CsvSink<W> {
    fn commit(&mut self, record: &MonthlyRecord) -> Result<(), PersistError> {
        self.writer.serialize(record)?;
        self.writer.flush()?;
        Ok(())
    }
}
