use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use ctc_engine::model::{
    Applicability, ComponentKey, ComponentShare, DeductionKey, InputMode, PayStructure, Period,
};
use ctc_engine::persist::MonthlyRecord;
use ctc_engine::{Amount, CompensationInput, Edit, EmployeeId, Engine, compute_breakdown};

/// Generates edit sessions for benchmarking.
///
/// Each employee gets `edits_per_employee` edits, alternating salaried and
/// hourly pay and nudging gross up on every keystroke-like edit, so only the
/// last one per employee survives.
pub struct EditGenerator {
    num_employees: EmployeeId,
    edits_per_employee: u32,
    current_employee: EmployeeId,
    current_step: u32,
}

impl EditGenerator {
    pub fn new(num_employees: EmployeeId, edits_per_employee: u32) -> Self {
        Self {
            num_employees,
            edits_per_employee,
            current_employee: 1,
            current_step: 0,
        }
    }

    /// Total number of edits this generator will produce
    pub fn total_edits(&self) -> u64 {
        self.num_employees as u64 * self.edits_per_employee as u64
    }
}

impl Iterator for EditGenerator {
    type Item = Edit;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_employee > self.num_employees {
            return None;
        }

        let gross = 20_000 + 1_000 * self.current_step as i64;
        let input = if self.current_employee % 2 == 0 {
            hourly_input(gross)
        } else {
            salaried_input(gross)
        };
        let edit = Edit {
            employee: self.current_employee,
            effective_date: NaiveDate::from_ymd_opt(2026, 4, 1).unwrap(),
            input,
        };

        self.current_step += 1;
        if self.current_step >= self.edits_per_employee {
            self.current_step = 0;
            self.current_employee += 1;
        }

        Some(edit)
    }
}

fn salaried_input(gross: i64) -> CompensationInput {
    let mut input = CompensationInput {
        gross_amount: Amount::from_units(gross),
        period: Period::Monthly,
        structure: PayStructure::Salaried {
            input_mode: InputMode::Percentage,
        },
        applicability: Applicability {
            epf: true,
            esi: true,
            professional_tax: true,
        },
        ..CompensationInput::default()
    };
    for (key, pct) in [
        (ComponentKey::Basic, 40.0),
        (ComponentKey::Hra, 20.0),
        (ComponentKey::Da, 10.0),
        (ComponentKey::Lta, 5.0),
        (ComponentKey::SpecialAllowance, 20.0),
        (ComponentKey::PerformanceBonus, 5.0),
    ] {
        input.components[key] = ComponentShare::percentage(pct);
    }
    input
        .overrides
        .set(DeductionKey::ProfessionalTax, Amount::from_units(200));
    input
}

fn hourly_input(gross: i64) -> CompensationInput {
    CompensationInput {
        structure: PayStructure::Hourly {
            working_hours_per_month: 176.0,
        },
        ..salaried_input(gross)
    }
}

fn bench_compute(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_breakdown");

    for (name, input) in [
        ("salaried", salaried_input(85_000)),
        ("hourly", hourly_input(32_000)),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(name), &input, |b, input| {
            b.iter(|| compute_breakdown(black_box(input)));
        });
    }

    group.finish();
}

fn bench_sessions(c: &mut Criterion) {
    let mut group = c.benchmark_group("edit_sessions");

    for (employees, edits) in [(100, 10), (1_000, 10), (1_000, 50)] {
        let total = EditGenerator::new(employees, edits).total_edits();
        group.throughput(criterion::Throughput::Elements(total));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{employees}x{edits}")),
            &(employees, edits),
            |b, &(employees, edits)| {
                b.iter(|| {
                    let mut engine = Engine::new();
                    for edit in EditGenerator::new(employees, edits) {
                        engine.apply(edit);
                    }
                    let mut sink: Vec<MonthlyRecord> = Vec::new();
                    black_box(engine.commit_all(&mut sink))
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_compute, bench_sessions);
criterion_main!(benches);
