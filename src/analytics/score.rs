use serde::Deserialize;

use crate::models::{BillingFrequency, UsageFrequency};

fn default_expensive_daily_cost() -> f64 {
    2.0
}
fn default_usage_weight() -> f64 {
    0.6
}
fn default_cost_weight() -> f64 {
    0.4
}
fn default_usage_daily() -> f64 {
    100.0
}
fn default_usage_weekly() -> f64 {
    70.0
}
fn default_usage_monthly() -> f64 {
    30.0
}
fn default_usage_untracked() -> f64 {
    10.0
}
fn default_low_value_threshold() -> u8 {
    40
}

/// Tunable constants for the value score. These are heuristics, not figures
/// derived from data, so they are exposed through configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoreTuning {
    /// Daily spend at or above which the cost score bottoms out at 0.
    #[serde(default = "default_expensive_daily_cost")]
    pub expensive_daily_cost: f64,
    #[serde(default = "default_usage_weight")]
    pub usage_weight: f64,
    #[serde(default = "default_cost_weight")]
    pub cost_weight: f64,
    #[serde(default = "default_usage_daily")]
    pub usage_daily: f64,
    #[serde(default = "default_usage_weekly")]
    pub usage_weekly: f64,
    #[serde(default = "default_usage_monthly")]
    pub usage_monthly: f64,
    #[serde(default = "default_usage_untracked")]
    pub usage_untracked: f64,
    /// Scores below this flag a subscription as a cancellation candidate.
    #[serde(default = "default_low_value_threshold")]
    pub low_value_threshold: u8,
}

impl Default for ScoreTuning {
    fn default() -> Self {
        Self {
            expensive_daily_cost: default_expensive_daily_cost(),
            usage_weight: default_usage_weight(),
            cost_weight: default_cost_weight(),
            usage_daily: default_usage_daily(),
            usage_weekly: default_usage_weekly(),
            usage_monthly: default_usage_monthly(),
            usage_untracked: default_usage_untracked(),
            low_value_threshold: default_low_value_threshold(),
        }
    }
}

impl ScoreTuning {
    fn usage_score(&self, usage: UsageFrequency) -> f64 {
        match usage {
            UsageFrequency::Daily => self.usage_daily,
            UsageFrequency::Weekly => self.usage_weekly,
            UsageFrequency::Monthly => self.usage_monthly,
            // Untracked usage still gets a small base score
            _ => self.usage_untracked,
        }
    }
}

/// Calculates a value score as a percentage (0-100).
///
/// Higher score means better value. The score combines low cost and high
/// usage: the per-cycle cost is spread into a daily figure (over 30 days for
/// monthly billing, 365 otherwise), mapped linearly so that
/// `expensive_daily_cost` per day or more scores 0, then blended with a
/// discrete usage score, weighted 60% usage / 40% cost by default. The
/// weighted result is truncated, not rounded.
///
/// Degenerate costs (negative or non-finite) score 0 rather than producing a
/// meaningless figure.
pub fn value_score(
    cost: f64,
    billing: BillingFrequency,
    usage: UsageFrequency,
    tuning: &ScoreTuning,
) -> u8 {
    if !cost.is_finite() || cost < 0.0 {
        return 0;
    }

    let cost_per_day = cost / billing.days_per_cycle();
    // Lower cost is better: 0/day scores 100, expensive_daily_cost/day or
    // more scores 0. Floored at 0, no upper cap before the blend.
    let cost_score = (100.0 - (cost_per_day / tuning.expensive_daily_cost * 100.0)).max(0.0);
    let usage_score = tuning.usage_score(usage);

    let combined = usage_score * tuning.usage_weight + cost_score * tuning.cost_weight;
    combined.clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expensive_daily_subscription() {
        // $60/month is $2/day: cost score 0, usage score 100
        let score = value_score(
            60.0,
            BillingFrequency::Monthly,
            UsageFrequency::Daily,
            &ScoreTuning::default(),
        );
        assert_eq!(score, 60);
    }

    #[test]
    fn test_free_untracked_subscription() {
        // $0/month: cost score 100, usage score 10
        let score = value_score(
            0.0,
            BillingFrequency::Monthly,
            UsageFrequency::NotTracked,
            &ScoreTuning::default(),
        );
        assert_eq!(score, 46);
    }

    #[test]
    fn test_yearly_billing_spreads_over_365_days() {
        // $730/year is $2/day: cost score 0, usage score 70
        let score = value_score(
            730.0,
            BillingFrequency::Yearly,
            UsageFrequency::Weekly,
            &ScoreTuning::default(),
        );
        assert_eq!(score, 42);
    }

    #[test]
    fn test_score_truncates_instead_of_rounding() {
        // $1/month -> cost_per_day = 1/30, cost_score = 98.33..
        // daily usage: 100*0.6 + 98.33*0.4 = 99.33.. -> 99
        let score = value_score(
            1.0,
            BillingFrequency::Monthly,
            UsageFrequency::Daily,
            &ScoreTuning::default(),
        );
        assert_eq!(score, 99);
    }

    #[test]
    fn test_score_stays_in_range() {
        let tuning = ScoreTuning::default();
        let costs = [0.0, 0.01, 1.0, 9.99, 15.49, 60.0, 120.0, 730.0, 10_000.0];
        let usages = [
            UsageFrequency::Daily,
            UsageFrequency::Weekly,
            UsageFrequency::Monthly,
            UsageFrequency::NotTracked,
        ];
        for &cost in &costs {
            for &billing in &[BillingFrequency::Monthly, BillingFrequency::Yearly] {
                for &usage in &usages {
                    let score = value_score(cost, billing, usage, &tuning);
                    assert!(score <= 100, "score {} out of range for cost {}", score, cost);
                }
            }
        }
    }

    #[test]
    fn test_degenerate_cost_scores_zero() {
        let tuning = ScoreTuning::default();
        assert_eq!(
            value_score(
                f64::NAN,
                BillingFrequency::Monthly,
                UsageFrequency::Daily,
                &tuning
            ),
            0
        );
        assert_eq!(
            value_score(
                f64::INFINITY,
                BillingFrequency::Yearly,
                UsageFrequency::Daily,
                &tuning
            ),
            0
        );
        assert_eq!(
            value_score(
                -5.0,
                BillingFrequency::Monthly,
                UsageFrequency::Daily,
                &tuning
            ),
            0
        );
    }

    #[test]
    fn test_usage_dominates_cost() {
        let tuning = ScoreTuning::default();
        // An expensive but daily-used subscription outscores a cheap unused one.
        let expensive_used = value_score(
            45.0,
            BillingFrequency::Monthly,
            UsageFrequency::Daily,
            &tuning,
        );
        let cheap_unused = value_score(
            3.0,
            BillingFrequency::Monthly,
            UsageFrequency::NotTracked,
            &tuning,
        );
        assert!(expensive_used > cheap_unused);
    }
}
