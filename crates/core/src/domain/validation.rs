use crate::domain::compensation::CompensationInputs;
use serde::Serialize;
use std::fmt;

const ALLOCATION_TOLERANCE: f64 = 1e-3;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum Violation {
    Negative { field: &'static str, value: f64 },
    NonPositiveHours { value: f64 },
    RiskToleranceOutOfRange { value: f64 },
    FractionOutOfRange { field: &'static str, value: f64 },
    AllocationTotal { total: f64 },
    NoWorkingDays { working_days: f64 },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Negative { field, value } => {
                write!(f, "{field} must not be negative (got {value})")
            }
            Violation::NonPositiveHours { value } => {
                write!(f, "hoursPerDay must be greater than 0 (got {value})")
            }
            Violation::RiskToleranceOutOfRange { value } => {
                write!(f, "riskTolerancePct must be in (0, 1] (got {value})")
            }
            Violation::FractionOutOfRange { field, value } => {
                write!(f, "{field} must be between 0 and 1 (got {value})")
            }
            Violation::AllocationTotal { total } => {
                write!(f, "time allocation must add up to 100% (got {:.1}%)", total * 100.0)
            }
            Violation::NoWorkingDays { working_days } => {
                write!(f, "leave leaves no working days in the year (got {working_days})")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationErrors {
    pub violations: Vec<Violation>,
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid compensation inputs: ")?;
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl CompensationInputs {
    /// Collects every violation rather than stopping at the first.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let r = self.resolve();
        let mut violations = Vec::new();

        for (field, value) in [
            ("baseSalary", r.base_salary),
            ("annualBonus", r.annual_bonus),
            ("annualEquityFmv", r.annual_equity_fmv),
            ("fractionalHourlyInput", r.fractional_hourly_input),
            ("overheadPct", r.overhead.get()),
            ("vacationDays", r.vacation_days),
            ("publicHolidays", r.public_holidays),
            ("otherLeaveDays", r.other_leave_days),
            ("trainingDays", r.training_days),
        ] {
            if !(value >= 0.0) {
                violations.push(Violation::Negative { field, value });
            }
        }

        if !(r.hours_per_day > 0.0) {
            violations.push(Violation::NonPositiveHours {
                value: r.hours_per_day,
            });
        }

        let risk = r.risk_tolerance.get();
        if !(risk > 0.0 && risk <= 1.0) {
            violations.push(Violation::RiskToleranceOutOfRange { value: risk });
        }

        for (field, value) in [
            ("projectWorkPct", r.project_work.get()),
            ("bdPct", r.bd.get()),
            ("invoicingPct", r.invoicing.get()),
            ("adminPct", r.admin.get()),
        ] {
            if !(0.0..=1.0).contains(&value) {
                violations.push(Violation::FractionOutOfRange { field, value });
            }
        }

        if self.has_allocation() {
            let total = r.allocation_total().get();
            if (total - 1.0).abs() > ALLOCATION_TOLERANCE {
                violations.push(Violation::AllocationTotal { total });
            }
        }

        let working_days = r.working_days_per_year();
        if working_days < 1.0 {
            violations.push(Violation::NoWorkingDays { working_days });
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors { violations })
        }
    }
}
