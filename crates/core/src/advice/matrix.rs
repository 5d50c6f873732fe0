use super::{PipelineHealth, UtilizationCategory};
use crate::domain::units::Percentage;
use serde::Serialize;

/// Replaced with the rounded utilization percentage before display.
pub const UTILIZATION_PLACEHOLDER: &str = "{utilization}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommendationEntry {
    pub situation: &'static str,
    pub recommendations: &'static [&'static str],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedRecommendation {
    pub utilization_category: UtilizationCategory,
    pub pipeline_health: PipelineHealth,
    pub situation: String,
    pub recommendations: Vec<String>,
}

impl RecommendationEntry {
    pub fn render(
        &self,
        utilization_category: UtilizationCategory,
        pipeline_health: PipelineHealth,
        utilization: Percentage,
    ) -> RenderedRecommendation {
        let pct = utilization.rounded().to_string();
        RenderedRecommendation {
            utilization_category,
            pipeline_health,
            situation: self.situation.replace(UTILIZATION_PLACEHOLDER, &pct),
            recommendations: self
                .recommendations
                .iter()
                .map(|r| r.replace(UTILIZATION_PLACEHOLDER, &pct))
                .collect(),
        }
    }
}

pub fn get_recommendation(
    utilization: UtilizationCategory,
    pipeline: PipelineHealth,
) -> &'static RecommendationEntry {
    &MATRIX[pipeline as usize][utilization as usize]
}

/// Classifies `utilization`, looks up the entry, and substitutes the placeholder.
pub fn recommend(utilization: Percentage, pipeline: PipelineHealth) -> RenderedRecommendation {
    let category = super::classify_utilization(utilization);
    get_recommendation(category, pipeline).render(category, pipeline, utilization)
}

// Rows: pipeline health (poor, fair, good, excellent).
// Columns: utilization (very-low, acceptable, good, great, excellent).
static MATRIX: [[RecommendationEntry; 5]; 4] = [
    [
        RecommendationEntry {
            situation: "At {utilization}% utilization with a thin pipeline, revenue is at immediate risk.",
            recommendations: &[
                "Spend at least half of every week on business development until two new leads are qualified.",
                "Reach out to past clients and ask for referrals or follow-on work.",
                "Offer a short, fixed-price diagnostic engagement to shorten the sales cycle.",
                "Review your runway and cut discretionary spending now.",
            ],
        },
        RecommendationEntry {
            situation: "You are billing {utilization}% of your time, but nothing is lined up behind it.",
            recommendations: &[
                "Block recurring calendar time for outreach before current work ends.",
                "Ask current clients about upcoming needs you could cover.",
                "Publish one case study from recent work to support new conversations.",
            ],
        },
        RecommendationEntry {
            situation: "Current work keeps you {utilization}% utilized, yet the pipeline is empty.",
            recommendations: &[
                "Protect a few hours each week for pipeline building even while busy.",
                "Propose an extension or next phase to your largest client.",
                "Reconnect with your network before the current engagement wraps up.",
            ],
        },
        RecommendationEntry {
            situation: "At {utilization}% utilization you are busy now, but a poor pipeline means a cliff is coming.",
            recommendations: &[
                "Start conversations for the next engagement today; lead times are longer than you expect.",
                "Negotiate renewal terms with current clients early.",
                "Delegate or automate admin work to free time for outreach.",
            ],
        },
        RecommendationEntry {
            situation: "You are fully booked at {utilization}% with no follow-on work in sight.",
            recommendations: &[
                "Treat business development as billable-critical: schedule it like client work.",
                "Ask for retainers or multi-month commitments from current clients.",
                "Build a short list of prospects to contact as soon as capacity frees up.",
            ],
        },
    ],
    [
        RecommendationEntry {
            situation: "Utilization of {utilization}% is too low to sustain your rate, and the pipeline is only fair.",
            recommendations: &[
                "Prioritize converting the warmest leads in your pipeline this month.",
                "Consider a short-term discounted engagement to rebuild momentum.",
                "Tighten your positioning so prospects understand exactly what you solve.",
            ],
        },
        RecommendationEntry {
            situation: "At {utilization}% utilization there is room to grow, and the pipeline has some promise.",
            recommendations: &[
                "Follow up on every open proposal within the week.",
                "Offer smaller starter projects to move fair leads forward.",
                "Track where your best leads come from and double down on that channel.",
            ],
        },
        RecommendationEntry {
            situation: "You are {utilization}% utilized with a fair pipeline, a workable but fragile position.",
            recommendations: &[
                "Keep steady outreach running so the pipeline does not thin out.",
                "Qualify leads harder; drop the ones unlikely to close.",
                "Raise your rate for new clients by a modest step.",
            ],
        },
        RecommendationEntry {
            situation: "Utilization is strong at {utilization}%, and the pipeline could support the next gap.",
            recommendations: &[
                "Nurture two or three promising leads so they are ready when capacity opens.",
                "Ask satisfied clients for testimonials while the work is fresh.",
                "Quote new work at a higher rate to test demand.",
            ],
        },
        RecommendationEntry {
            situation: "You are at {utilization}% utilization; the fair pipeline will matter once this work ends.",
            recommendations: &[
                "Schedule next-engagement conversations for the final month of current projects.",
                "Watch for burnout; sustained utilization this high rarely lasts.",
                "Set expectations with prospects about your earliest start date.",
            ],
        },
    ],
    [
        RecommendationEntry {
            situation: "A good pipeline but only {utilization}% utilization means leads are not converting.",
            recommendations: &[
                "Review recent proposals for pricing or scope issues that stall decisions.",
                "Shorten your sales process with clear next steps after every call.",
                "Offer a paid discovery phase to get started sooner.",
            ],
        },
        RecommendationEntry {
            situation: "Utilization of {utilization}% is acceptable and the pipeline is healthy.",
            recommendations: &[
                "Focus on closing the strongest opportunities in the next few weeks.",
                "Prefer longer engagements over many small ones to cut non-billable time.",
                "Keep invoicing and admin tight so billable hours are not lost.",
            ],
        },
        RecommendationEntry {
            situation: "At {utilization}% utilization with a good pipeline, your practice is on solid footing.",
            recommendations: &[
                "Be selective: favor clients who value your expertise over the lowest bidder.",
                "Raise rates for new engagements.",
                "Document repeatable methods to deliver faster.",
            ],
        },
        RecommendationEntry {
            situation: "You are {utilization}% utilized with a good pipeline, a strong and balanced position.",
            recommendations: &[
                "Increase your rate for all new work.",
                "Turn down poorly fitting projects to keep capacity for better ones.",
                "Invest some non-billable time in skills that command premium rates.",
            ],
        },
        RecommendationEntry {
            situation: "At {utilization}% utilization and a good pipeline, demand exceeds your capacity.",
            recommendations: &[
                "Raise rates meaningfully; demand supports it.",
                "Consider subcontracting or partnering to take on overflow work.",
                "Guard against burnout by protecting time off.",
            ],
        },
    ],
    [
        RecommendationEntry {
            situation: "An excellent pipeline but only {utilization}% utilization; something is blocking starts.",
            recommendations: &[
                "Identify what is delaying signed work and remove those blockers.",
                "Ask top prospects for a firm start date and a deposit.",
                "Offer flexible starting scopes to get engagements moving.",
            ],
        },
        RecommendationEntry {
            situation: "At {utilization}% utilization with an excellent pipeline, growth is within reach.",
            recommendations: &[
                "Convert the best opportunities and move them to contract quickly.",
                "Set your rate for new work at the top of your range.",
                "Plan your capacity so new engagements do not overlap badly.",
            ],
        },
        RecommendationEntry {
            situation: "You are {utilization}% utilized with an excellent pipeline.",
            recommendations: &[
                "Raise rates and let the pipeline absorb any lost leads.",
                "Choose the engagements that best fit your long-term positioning.",
                "Keep some capacity free for high-value opportunities.",
            ],
        },
        RecommendationEntry {
            situation: "Utilization of {utilization}% and an excellent pipeline put you in a position of strength.",
            recommendations: &[
                "Raise your rates significantly for new clients.",
                "Move recurring clients to retainers at updated pricing.",
                "Consider productizing part of your service.",
            ],
        },
        RecommendationEntry {
            situation: "At {utilization}% utilization and an excellent pipeline, you are at capacity with more demand waiting.",
            recommendations: &[
                "Raise rates until demand matches your capacity.",
                "Build a bench of trusted associates to scale delivery.",
                "Waitlist new clients rather than overcommitting.",
                "Schedule rest; this pace is hard to sustain.",
            ],
        },
    ],
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_combination_is_populated() {
        for p in PipelineHealth::ALL {
            for c in UtilizationCategory::ALL {
                let entry = get_recommendation(c, p);
                assert!(!entry.situation.trim().is_empty(), "{p}/{c} situation");
                assert!(!entry.recommendations.is_empty(), "{p}/{c} recommendations");
                assert!(entry.recommendations.iter().all(|r| !r.trim().is_empty()));
            }
        }
    }

    #[test]
    fn entries_are_distinct() {
        let mut seen = HashSet::new();
        for p in PipelineHealth::ALL {
            for c in UtilizationCategory::ALL {
                assert!(seen.insert(get_recommendation(c, p).situation));
            }
        }
        assert_eq!(seen.len(), 20);
    }

    #[test]
    fn render_substitutes_rounded_percentage() {
        let out = recommend(Percentage::new(72.6), PipelineHealth::Good);
        assert_eq!(out.utilization_category, UtilizationCategory::Great);
        assert_eq!(
            out.situation,
            "You are 73% utilized with a good pipeline, a strong and balanced position."
        );
        assert!(!out.situation.contains(UTILIZATION_PLACEHOLDER));
        assert!(out
            .recommendations
            .iter()
            .all(|r| !r.contains(UTILIZATION_PLACEHOLDER)));
    }

    #[test]
    fn rendered_keys_are_camel_case() {
        let json =
            serde_json::to_value(recommend(Percentage::new(45.0), PipelineHealth::Fair)).unwrap();
        assert_eq!(json["utilizationCategory"], "acceptable");
        assert_eq!(json["pipelineHealth"], "fair");
        assert!(json.get("utilization_category").is_none());
    }

    #[test]
    fn render_replaces_every_occurrence() {
        let entry = RecommendationEntry {
            situation: "{utilization}% now, {utilization}% later",
            recommendations: &["keep {utilization}%"],
        };
        let out = entry.render(
            UtilizationCategory::VeryLow,
            PipelineHealth::Poor,
            Percentage::new(12.4),
        );
        assert_eq!(out.situation, "12% now, 12% later");
        assert_eq!(out.recommendations, vec!["keep 12%".to_string()]);
    }
}
