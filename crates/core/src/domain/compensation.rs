//! Salary ⇄ fractional-rate conversion.
//!
//! [`compute`] is total: it never rejects input. Missing fields take the defaults below, and
//! degenerate values (zero hours per day, zero risk tolerance) flow through as infinities or NaN.
//! Callers that want a guard use [`compute_checked`].

use crate::domain::units::Fraction;
use crate::domain::validation::ValidationErrors;
use serde::{Deserialize, Serialize};

/// 52 weeks × 5 days.
pub const BASE_WORKING_DAYS: f64 = 260.0;
pub const MONTHS_PER_YEAR: f64 = 12.0;

pub const DEFAULT_OVERHEAD: Fraction = Fraction::new(0.25);
pub const DEFAULT_HOURS_PER_DAY: f64 = 8.0;
pub const DEFAULT_RISK_TOLERANCE: Fraction = Fraction::new(0.50);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompensationInputs {
    pub base_salary: Option<f64>,
    pub annual_bonus: Option<f64>,
    pub annual_equity_fmv: Option<f64>,
    /// Only used when no salary-based compensation is supplied.
    pub fractional_hourly_input: Option<f64>,
    pub overhead_pct: Option<Fraction>,
    pub hours_per_day: Option<f64>,
    pub vacation_days: Option<f64>,
    pub public_holidays: Option<f64>,
    pub other_leave_days: Option<f64>,
    pub training_days: Option<f64>,
    /// Accepted for the allocation total only; rates never read it.
    pub project_work_pct: Option<Fraction>,
    pub bd_pct: Option<Fraction>,
    pub invoicing_pct: Option<Fraction>,
    pub admin_pct: Option<Fraction>,
    pub risk_tolerance_pct: Option<Fraction>,
}

/// Inputs with every default applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedInputs {
    pub base_salary: f64,
    pub annual_bonus: f64,
    pub annual_equity_fmv: f64,
    pub fractional_hourly_input: f64,
    pub overhead: Fraction,
    pub hours_per_day: f64,
    pub vacation_days: f64,
    pub public_holidays: f64,
    pub other_leave_days: f64,
    pub training_days: f64,
    pub project_work: Fraction,
    pub bd: Fraction,
    pub invoicing: Fraction,
    pub admin: Fraction,
    pub risk_tolerance: Fraction,
}

impl CompensationInputs {
    pub fn resolve(&self) -> ResolvedInputs {
        ResolvedInputs {
            base_salary: self.base_salary.unwrap_or(0.0),
            annual_bonus: self.annual_bonus.unwrap_or(0.0),
            annual_equity_fmv: self.annual_equity_fmv.unwrap_or(0.0),
            fractional_hourly_input: self.fractional_hourly_input.unwrap_or(0.0),
            overhead: self.overhead_pct.unwrap_or(DEFAULT_OVERHEAD),
            hours_per_day: self.hours_per_day.unwrap_or(DEFAULT_HOURS_PER_DAY),
            vacation_days: self.vacation_days.unwrap_or(0.0),
            public_holidays: self.public_holidays.unwrap_or(0.0),
            other_leave_days: self.other_leave_days.unwrap_or(0.0),
            training_days: self.training_days.unwrap_or(0.0),
            project_work: self.project_work_pct.unwrap_or(Fraction::ZERO),
            bd: self.bd_pct.unwrap_or(Fraction::ZERO),
            invoicing: self.invoicing_pct.unwrap_or(Fraction::ZERO),
            admin: self.admin_pct.unwrap_or(Fraction::ZERO),
            risk_tolerance: self.risk_tolerance_pct.unwrap_or(DEFAULT_RISK_TOLERANCE),
        }
    }

    /// True when any of the four time-allocation fields was supplied.
    pub fn has_allocation(&self) -> bool {
        self.project_work_pct.is_some()
            || self.bd_pct.is_some()
            || self.invoicing_pct.is_some()
            || self.admin_pct.is_some()
    }
}

impl ResolvedInputs {
    pub fn non_billable(&self) -> Fraction {
        Fraction::new(self.bd.get() + self.invoicing.get() + self.admin.get())
    }

    pub fn allocation_total(&self) -> Fraction {
        Fraction::new(self.project_work.get() + self.non_billable().get())
    }

    /// Raw day count; may be zero or negative for extreme leave inputs.
    pub fn working_days_per_year(&self) -> f64 {
        let leave = self.vacation_days
            + self.public_holidays
            + self.other_leave_days
            + self.training_days;
        BASE_WORKING_DAYS - leave
    }

    pub fn salary_sum(&self) -> f64 {
        self.base_salary + self.annual_bonus + self.annual_equity_fmv
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompensationResults {
    /// Salary + bonus + equity as entered.
    pub total_annual_comp_input: f64,
    /// Salary sum, or the annualized hourly rate when no salary was entered.
    pub total_annual_comp: f64,
    #[serde(rename = "annualCostIncludingOH")]
    pub annual_cost_including_oh: f64,
    #[serde(rename = "monthlyCostIncludingOH")]
    pub monthly_cost_including_oh: f64,
    pub monthly_comp: f64,

    pub direct_hourly: f64,
    pub direct_daily: f64,
    pub direct_effective_hourly: f64,

    pub fully_loaded_hourly: f64,
    pub fully_loaded_daily: f64,
    pub fully_loaded_effective_hourly: f64,

    pub nominal_hourly: f64,
    pub nominal_daily: f64,
    pub effective_hourly: f64,

    pub risk_adjusted_hourly: f64,
    pub non_billable_pct: Fraction,
    /// Unfloored; rates above were computed against `max(1, working_days_per_year)`.
    pub working_days_per_year: f64,
}

pub fn compute(inputs: &CompensationInputs) -> CompensationResults {
    let r = inputs.resolve();

    let non_billable = r.non_billable();
    let working_days_per_year = r.working_days_per_year();
    let divisor_days = working_days_per_year.max(1.0);
    if working_days_per_year < 1.0 {
        tracing::debug!(
            working_days_per_year,
            "leave exceeds the working year; flooring rate divisor to one day"
        );
    }

    let total_annual_comp_input = r.salary_sum();
    let total_annual_comp = if r.fractional_hourly_input > 0.0 && total_annual_comp_input == 0.0 {
        r.fractional_hourly_input * working_days_per_year * r.hours_per_day
    } else {
        total_annual_comp_input
    };

    let annual_cost_including_oh =
        r.base_salary * (1.0 + r.overhead.get()) + r.annual_bonus + r.annual_equity_fmv;

    let billable_share = 1.0 - non_billable.get();
    let hours_per_year = divisor_days * r.hours_per_day;

    let direct_hourly = total_annual_comp / hours_per_year;
    let direct_daily = direct_hourly * r.hours_per_day;
    let direct_effective_hourly = direct_hourly * billable_share;

    let fully_loaded_hourly = annual_cost_including_oh / hours_per_year;
    let fully_loaded_daily = fully_loaded_hourly * r.hours_per_day;
    let fully_loaded_effective_hourly = fully_loaded_hourly * billable_share;

    let risk_adjusted_hourly = direct_effective_hourly / r.risk_tolerance.get();

    CompensationResults {
        total_annual_comp_input,
        total_annual_comp,
        annual_cost_including_oh,
        monthly_cost_including_oh: annual_cost_including_oh / MONTHS_PER_YEAR,
        monthly_comp: total_annual_comp / MONTHS_PER_YEAR,
        direct_hourly,
        direct_daily,
        direct_effective_hourly,
        fully_loaded_hourly,
        fully_loaded_daily,
        fully_loaded_effective_hourly,
        nominal_hourly: direct_hourly,
        nominal_daily: direct_daily,
        effective_hourly: direct_hourly,
        risk_adjusted_hourly,
        non_billable_pct: non_billable,
        working_days_per_year,
    }
}

/// Rejects degenerate input before computing. Defaults are applied exactly as in [`compute`].
pub fn compute_checked(
    inputs: &CompensationInputs,
) -> Result<CompensationResults, ValidationErrors> {
    inputs.validate()?;
    Ok(compute(inputs))
}

/// Rate to charge clients so that `target_effective_hourly` remains after non-billable time.
pub fn billing_rate(target_effective_hourly: f64, non_billable: Fraction) -> f64 {
    target_effective_hourly / (1.0 - non_billable.get())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= EPS * a.abs().max(b.abs()).max(1.0)
    }

    fn scenario() -> CompensationInputs {
        CompensationInputs {
            base_salary: Some(120_000.0),
            annual_bonus: Some(20_000.0),
            annual_equity_fmv: Some(15_000.0),
            overhead_pct: Some(Fraction::new(0.25)),
            hours_per_day: Some(8.0),
            vacation_days: Some(15.0),
            public_holidays: Some(10.0),
            other_leave_days: Some(10.0),
            training_days: Some(4.0),
            ..Default::default()
        }
    }

    #[test]
    fn salary_scenario_matches_hand_calculation() {
        let out = compute(&scenario());
        assert_eq!(out.working_days_per_year, 221.0);
        assert_eq!(out.total_annual_comp, 155_000.0);
        assert_eq!(out.total_annual_comp_input, 155_000.0);
        assert!(close(out.direct_hourly, 155_000.0 / (221.0 * 8.0)));
        assert!((out.direct_hourly - 87.669).abs() < 1e-3);
        assert_eq!(out.annual_cost_including_oh, 185_000.0);
        assert!(close(out.fully_loaded_hourly, 185_000.0 / (221.0 * 8.0)));
        assert!((out.fully_loaded_hourly - 104.638).abs() < 1e-3);
    }

    #[test]
    fn empty_inputs_use_defaults() {
        let out = compute(&CompensationInputs::default());
        assert_eq!(out.working_days_per_year, 260.0);
        assert_eq!(out.total_annual_comp, 0.0);
        assert_eq!(out.direct_hourly, 0.0);
        assert_eq!(out.non_billable_pct, Fraction::ZERO);

        let r = CompensationInputs::default().resolve();
        assert_eq!(r.overhead, Fraction::new(0.25));
        assert_eq!(r.hours_per_day, 8.0);
        assert_eq!(r.risk_tolerance, Fraction::new(0.5));
    }

    #[test]
    fn hourly_mode_annualizes_rate_when_no_salary() {
        let inputs = CompensationInputs {
            fractional_hourly_input: Some(150.0),
            hours_per_day: Some(7.5),
            vacation_days: Some(20.0),
            ..Default::default()
        };
        let out = compute(&inputs);
        assert_eq!(out.working_days_per_year, 240.0);
        assert_eq!(out.total_annual_comp, 150.0 * 240.0 * 7.5);
        assert_eq!(out.total_annual_comp_input, 0.0);
        assert!(close(out.direct_hourly, 150.0));
        // No salary means no organizational cost.
        assert_eq!(out.annual_cost_including_oh, 0.0);
    }

    #[test]
    fn salary_wins_over_hourly_rate() {
        let inputs = CompensationInputs {
            annual_bonus: Some(1.0),
            fractional_hourly_input: Some(500.0),
            ..Default::default()
        };
        let out = compute(&inputs);
        assert_eq!(out.total_annual_comp, 1.0);
    }

    #[test]
    fn salary_sum_is_exact_when_hourly_is_zero() {
        for (base, bonus, equity) in [
            (50_000.0, 0.0, 0.0),
            (0.0, 12_345.67, 0.0),
            (1.5, 2.25, 3.125),
        ] {
            let inputs = CompensationInputs {
                base_salary: Some(base),
                annual_bonus: Some(bonus),
                annual_equity_fmv: Some(equity),
                fractional_hourly_input: Some(0.0),
                ..Default::default()
            };
            assert_eq!(compute(&inputs).total_annual_comp, base + bonus + equity);
        }
    }

    #[test]
    fn overhead_applies_to_base_salary_only() {
        let inputs = CompensationInputs {
            base_salary: Some(100_000.0),
            annual_bonus: Some(10_000.0),
            annual_equity_fmv: Some(5_000.0),
            overhead_pct: Some(Fraction::new(0.5)),
            ..Default::default()
        };
        let out = compute(&inputs);
        assert_eq!(out.annual_cost_including_oh, 165_000.0);
        assert!(out.fully_loaded_hourly >= out.direct_hourly);
    }

    #[test]
    fn fully_loaded_never_below_direct_with_salary() {
        for overhead in [0.0, 0.1, 0.25, 1.3] {
            let inputs = CompensationInputs {
                overhead_pct: Some(Fraction::new(overhead)),
                ..scenario()
            };
            let out = compute(&inputs);
            assert!(out.fully_loaded_hourly >= out.direct_hourly);
        }
    }

    #[test]
    fn daily_and_monthly_identities_hold() {
        let inputs = CompensationInputs {
            bd_pct: Some(Fraction::new(0.1)),
            invoicing_pct: Some(Fraction::new(0.05)),
            admin_pct: Some(Fraction::new(0.05)),
            hours_per_day: Some(6.5),
            ..scenario()
        };
        let out = compute(&inputs);
        assert!(close(out.direct_daily, out.direct_hourly * 6.5));
        assert!(close(out.fully_loaded_daily, out.fully_loaded_hourly * 6.5));
        assert!(close(out.monthly_comp * 12.0, out.total_annual_comp));
        assert!(close(
            out.monthly_cost_including_oh * 12.0,
            out.annual_cost_including_oh
        ));
    }

    #[test]
    fn effective_rates_discount_non_billable_time() {
        let inputs = CompensationInputs {
            project_work_pct: Some(Fraction::new(0.7)),
            bd_pct: Some(Fraction::new(0.15)),
            invoicing_pct: Some(Fraction::new(0.05)),
            admin_pct: Some(Fraction::new(0.1)),
            ..scenario()
        };
        let out = compute(&inputs);
        assert!(close(out.non_billable_pct.get(), 0.3));
        assert!(close(out.direct_effective_hourly, out.direct_hourly * 0.7));
        assert!(close(
            out.fully_loaded_effective_hourly,
            out.fully_loaded_hourly * 0.7
        ));
    }

    #[test]
    fn project_share_does_not_affect_rates() {
        let a = compute(&CompensationInputs {
            project_work_pct: Some(Fraction::new(0.2)),
            ..scenario()
        });
        let b = compute(&CompensationInputs {
            project_work_pct: Some(Fraction::new(0.9)),
            ..scenario()
        });
        assert_eq!(a, b);
    }

    #[test]
    fn risk_adjustment_divides_by_tolerance() {
        let inputs = CompensationInputs {
            risk_tolerance_pct: Some(Fraction::new(0.25)),
            ..scenario()
        };
        let out = compute(&inputs);
        assert!(close(out.risk_adjusted_hourly, out.direct_effective_hourly * 4.0));

        let default_risk = compute(&scenario());
        assert!(close(
            default_risk.risk_adjusted_hourly,
            default_risk.direct_effective_hourly * 2.0
        ));
    }

    #[test]
    fn legacy_aliases_copy_direct_rates() {
        let out = compute(&scenario());
        assert_eq!(out.nominal_hourly, out.direct_hourly);
        assert_eq!(out.nominal_daily, out.direct_daily);
        assert_eq!(out.effective_hourly, out.direct_hourly);
    }

    #[test]
    fn excessive_leave_floors_divisor_but_reports_raw_days() {
        let inputs = CompensationInputs {
            base_salary: Some(80_000.0),
            vacation_days: Some(300.0),
            ..Default::default()
        };
        let out = compute(&inputs);
        assert_eq!(out.working_days_per_year, -40.0);
        assert!(close(out.direct_hourly, 80_000.0 / 8.0));
        assert!(out.direct_hourly.is_finite());
    }

    #[test]
    fn zero_hours_per_day_is_unguarded() {
        let out = compute(&CompensationInputs {
            hours_per_day: Some(0.0),
            ..scenario()
        });
        assert!(out.direct_hourly.is_infinite());
        assert!(out.fully_loaded_hourly.is_infinite());
        // inf * 0
        assert!(out.direct_daily.is_nan());

        let empty = compute(&CompensationInputs {
            hours_per_day: Some(0.0),
            ..Default::default()
        });
        assert!(empty.direct_hourly.is_nan());
    }

    #[test]
    fn zero_risk_tolerance_is_unguarded() {
        let out = compute(&CompensationInputs {
            risk_tolerance_pct: Some(Fraction::ZERO),
            ..scenario()
        });
        assert!(out.risk_adjusted_hourly.is_infinite());
    }

    #[test]
    fn checked_compute_rejects_degenerate_input() {
        assert!(compute_checked(&scenario()).is_ok());
        assert!(compute_checked(&CompensationInputs {
            hours_per_day: Some(0.0),
            ..scenario()
        })
        .is_err());
    }

    #[test]
    fn billing_rate_grosses_up_for_non_billable_time() {
        assert!(close(billing_rate(70.0, Fraction::new(0.3)), 100.0));
        assert_eq!(billing_rate(90.0, Fraction::ZERO), 90.0);
    }

    #[test]
    fn inputs_deserialize_from_camel_case_json() {
        let inputs: CompensationInputs = serde_json::from_str(
            r#"{"baseSalary": 90000, "overheadPct": 0.3, "riskTolerancePct": 0.75}"#,
        )
        .unwrap();
        assert_eq!(inputs.base_salary, Some(90_000.0));
        assert_eq!(inputs.overhead_pct, Some(Fraction::new(0.3)));
        assert_eq!(inputs.hours_per_day, None);

        let json = serde_json::to_value(compute(&inputs)).unwrap();
        assert!(json.get("annualCostIncludingOH").is_some());
        assert!(json.get("workingDaysPerYear").is_some());
    }
}
