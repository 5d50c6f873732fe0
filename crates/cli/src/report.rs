use std::fmt::Write;

use ratecard_core::advice::{Advice, RenderedRecommendation, Severity};
use ratecard_core::domain::compensation::billing_rate;
use ratecard_core::format::Presenter;
use ratecard_core::wizard::{StageStatus, WizardState};
use ratecard_core::CompensationResults;

pub fn compensation(r: &CompensationResults, p: &impl Presenter) -> String {
    let rows: [(&str, String); 16] = [
        ("Working days / year", format!("{}", r.working_days_per_year)),
        ("Non-billable time", p.percent(r.non_billable_pct)),
        ("Total annual comp", p.currency(r.total_annual_comp)),
        ("Monthly comp", p.currency(r.monthly_comp)),
        ("Annual cost incl. overhead", p.currency(r.annual_cost_including_oh)),
        ("Monthly cost incl. overhead", p.currency(r.monthly_cost_including_oh)),
        ("Direct hourly", p.currency(r.direct_hourly)),
        ("Direct daily", p.currency(r.direct_daily)),
        ("Direct effective hourly", p.currency(r.direct_effective_hourly)),
        ("Fully-loaded hourly", p.currency(r.fully_loaded_hourly)),
        ("Fully-loaded daily", p.currency(r.fully_loaded_daily)),
        ("Fully-loaded effective hourly", p.currency(r.fully_loaded_effective_hourly)),
        ("Risk-adjusted hourly", p.currency(r.risk_adjusted_hourly)),
        (
            "Billing rate to net direct hourly",
            p.currency(billing_rate(r.direct_hourly, r.non_billable_pct)),
        ),
        ("Salary inputs total", p.currency(r.total_annual_comp_input)),
        ("Nominal hourly", p.currency(r.nominal_hourly)),
    ];

    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    let mut out = String::new();
    for (label, value) in rows {
        let _ = writeln!(out, "{label:<width$}  {value}");
    }
    out
}

pub fn recommendation(r: &RenderedRecommendation) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "[{} utilization / {} pipeline]",
        r.utilization_category, r.pipeline_health
    );
    let _ = writeln!(out, "{}", r.situation);
    for (i, rec) in r.recommendations.iter().enumerate() {
        let _ = writeln!(out, "  {}. {rec}", i + 1);
    }
    out
}

pub fn advice(a: &Advice) -> String {
    let severity = match a.severity {
        Severity::Critical => "CRITICAL",
        Severity::Warning => "WARNING",
        Severity::Success => "OK",
    };
    let mut out = String::new();
    let _ = writeln!(out, "{severity}: {}", a.title);
    let _ = writeln!(out, "{}", a.description);
    for action in a.actions {
        let _ = writeln!(out, "  - {action}");
    }
    let _ = writeln!(out, "> {}", a.call_to_action);
    out
}

pub fn progress(state: &WizardState, p: &impl Presenter) -> String {
    let mut out = String::new();
    for (stage, status) in state.statuses() {
        let marker = match status {
            StageStatus::Completed => "[x]",
            StageStatus::Active => "[>]",
            StageStatus::Locked => "[ ]",
        };
        let _ = writeln!(out, "{marker} {stage}");
    }
    let _ = writeln!(out, "{} complete", p.percent(state.progress()));
    out
}
