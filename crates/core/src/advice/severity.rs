use super::PipelineHealth;
use crate::domain::units::Percentage;
use serde::Serialize;

const LOW_UTILIZATION: f64 = 50.0;
const HIGH_UTILIZATION: f64 = 70.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    Critical,
    Warning,
    Success,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Advice {
    pub severity: Severity,
    pub title: &'static str,
    pub description: &'static str,
    pub actions: &'static [&'static str],
    pub call_to_action: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Band {
    Low,
    Moderate,
    High,
}

fn band(utilization: Percentage) -> Band {
    let u = utilization.get();
    if u.is_nan() || u < LOW_UTILIZATION {
        Band::Low
    } else if u < HIGH_UTILIZATION {
        Band::Moderate
    } else {
        Band::High
    }
}

/// Coarse advice: three utilization bands crossed with the four pipeline buckets.
pub fn assess(utilization: Percentage, pipeline: PipelineHealth) -> &'static Advice {
    &ADVICE[pipeline as usize][band(utilization) as usize]
}

// Rows: pipeline health (poor, fair, good, excellent).
// Columns: utilization band (<50, 50-70, >=70).
static ADVICE: [[Advice; 3]; 4] = [
    [
        Advice {
            severity: Severity::Critical,
            title: "Revenue emergency",
            description: "Low utilization and a poor pipeline leave you with little income now and little coming.",
            actions: &[
                "Contact every past client this week",
                "Offer a fixed-price starter engagement",
                "Review your cash runway",
            ],
            call_to_action: "Build a pipeline plan",
        },
        Advice {
            severity: Severity::Critical,
            title: "Pipeline about to run dry",
            description: "Current work covers part of your time, but nothing is lined up to replace it.",
            actions: &[
                "Reserve two half-days a week for outreach",
                "Ask current clients about follow-on work",
            ],
            call_to_action: "Schedule outreach time",
        },
        Advice {
            severity: Severity::Warning,
            title: "Busy now, empty later",
            description: "You are well utilized, but a poor pipeline means income will drop when this work ends.",
            actions: &[
                "Start next-engagement conversations now",
                "Negotiate extensions with current clients",
                "Delegate admin to free outreach time",
            ],
            call_to_action: "Plan your next engagement",
        },
    ],
    [
        Advice {
            severity: Severity::Critical,
            title: "Utilization too low",
            description: "A fair pipeline is not converting fast enough to keep you billable.",
            actions: &[
                "Follow up on every open proposal",
                "Shorten your sales cycle with paid discovery",
            ],
            call_to_action: "Review open proposals",
        },
        Advice {
            severity: Severity::Warning,
            title: "Steady but exposed",
            description: "Moderate utilization and a fair pipeline are workable, with little margin for a lost client.",
            actions: &[
                "Keep weekly outreach on the calendar",
                "Qualify leads more strictly",
                "Test a modest rate increase on new work",
            ],
            call_to_action: "Strengthen your pipeline",
        },
        Advice {
            severity: Severity::Warning,
            title: "Strong month, thin follow-up",
            description: "High utilization today, but a fair pipeline may not fill the next gap.",
            actions: &[
                "Nurture your two warmest leads",
                "Collect testimonials from current clients",
            ],
            call_to_action: "Line up the next client",
        },
    ],
    [
        Advice {
            severity: Severity::Warning,
            title: "Leads not converting",
            description: "Your pipeline looks good, yet utilization stays low. Something in the sales process is stalling.",
            actions: &[
                "Audit recent proposals for pricing or scope issues",
                "Ask prospects for firm start dates",
            ],
            call_to_action: "Fix your conversion",
        },
        Advice {
            severity: Severity::Success,
            title: "Healthy and growing",
            description: "Moderate utilization with a good pipeline gives you room to be selective.",
            actions: &[
                "Prioritize longer engagements",
                "Raise rates for new clients",
            ],
            call_to_action: "Update your rate card",
        },
        Advice {
            severity: Severity::Success,
            title: "Well balanced",
            description: "High utilization and a good pipeline: your practice is in a strong position.",
            actions: &[
                "Raise your rates",
                "Decline poorly fitting work",
                "Invest in premium skills",
            ],
            call_to_action: "Raise your rates",
        },
    ],
    [
        Advice {
            severity: Severity::Warning,
            title: "Demand is not turning into work",
            description: "An excellent pipeline with low utilization means signed work is being delayed.",
            actions: &[
                "Remove blockers to contract signature",
                "Request deposits to lock start dates",
            ],
            call_to_action: "Close your best leads",
        },
        Advice {
            severity: Severity::Success,
            title: "Ready to scale",
            description: "Moderate utilization and an excellent pipeline put growth within reach.",
            actions: &[
                "Move top opportunities to contract",
                "Price new work at the top of your range",
                "Plan capacity for overlapping starts",
            ],
            call_to_action: "Plan your capacity",
        },
        Advice {
            severity: Severity::Success,
            title: "At capacity with demand to spare",
            description: "High utilization and an excellent pipeline mean your time is the constraint.",
            actions: &[
                "Raise rates until demand matches capacity",
                "Bring in trusted associates",
                "Protect time off",
            ],
            call_to_action: "Grow beyond your hours",
        },
    ],
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn twelve_distinct_outcomes() {
        let mut titles = HashSet::new();
        for p in PipelineHealth::ALL {
            for u in [10.0, 55.0, 90.0] {
                let advice = assess(Percentage::new(u), p);
                assert!(!advice.description.is_empty());
                assert!(!advice.actions.is_empty());
                assert!(!advice.call_to_action.is_empty());
                titles.insert(advice.title);
            }
        }
        assert_eq!(titles.len(), 12);
    }

    #[test]
    fn band_boundaries() {
        let p = PipelineHealth::Fair;
        assert_eq!(assess(Percentage::new(49.99), p).title, "Utilization too low");
        assert_eq!(assess(Percentage::new(50.0), p).title, "Steady but exposed");
        assert_eq!(assess(Percentage::new(69.99), p).title, "Steady but exposed");
        assert_eq!(assess(Percentage::new(70.0), p).title, "Strong month, thin follow-up");
    }

    #[test]
    fn severities_follow_the_risk() {
        assert_eq!(
            assess(Percentage::new(20.0), PipelineHealth::Poor).severity,
            Severity::Critical
        );
        assert_eq!(
            assess(Percentage::new(80.0), PipelineHealth::Excellent).severity,
            Severity::Success
        );
        assert_eq!(
            assess(Percentage::new(f64::NAN), PipelineHealth::Good).severity,
            Severity::Warning
        );
    }

    #[test]
    fn serializes_camel_case_keys_and_kebab_case_severity() {
        let json =
            serde_json::to_value(assess(Percentage::new(30.0), PipelineHealth::Poor)).unwrap();
        assert_eq!(json["severity"], "critical");
        assert_eq!(json["callToAction"], "Build a pipeline plan");
        assert!(json.get("call_to_action").is_none());
    }
}
