use chrono::{Duration, NaiveDate};
use std::collections::{BTreeMap, HashMap};

use super::score::{value_score, ScoreTuning};
use crate::models::{Category, Subscription};

/// Payments due within this many days of today count as upcoming (inclusive).
pub const UPCOMING_WINDOW_DAYS: i64 = 14;

/// Everything the dashboard view needs, derived from one user's
/// subscriptions and the current date.
#[derive(Debug, Clone)]
pub struct DashboardSummary {
    /// Total monthly-equivalent spend across all subscriptions.
    pub monthly_total: f64,
    /// Monthly-equivalent spend per category, in stable category order.
    pub category_spending: BTreeMap<Category, f64>,
    /// Value score per subscription id.
    pub scores: HashMap<String, u8>,
    /// Subscriptions scoring below the low-value threshold.
    pub recommendations: Vec<Subscription>,
    /// Monthly-equivalent cost of the recommendations.
    pub potential_savings: f64,
    /// Subscriptions billing within the upcoming window.
    pub upcoming: Vec<Subscription>,
}

/// Derives the dashboard summary. Pure: no side effects, the input is not
/// mutated, and the same subscriptions and date always produce the same
/// summary.
pub fn summarize(
    subscriptions: &[Subscription],
    today: NaiveDate,
    tuning: &ScoreTuning,
) -> DashboardSummary {
    let reminder_threshold = today + Duration::days(UPCOMING_WINDOW_DAYS);

    let mut monthly_total = 0.0;
    let mut category_spending: BTreeMap<Category, f64> = BTreeMap::new();
    let mut scores = HashMap::new();
    let mut recommendations = Vec::new();
    let mut potential_savings = 0.0;
    let mut upcoming = Vec::new();

    for subscription in subscriptions {
        let monthly_cost = subscription.monthly_cost();
        monthly_total += monthly_cost;
        *category_spending.entry(subscription.category).or_insert(0.0) += monthly_cost;

        let score = value_score(
            subscription.cost,
            subscription.billing_frequency,
            subscription.usage_frequency,
            tuning,
        );
        scores.insert(subscription.id.clone(), score);

        if score < tuning.low_value_threshold {
            recommendations.push(subscription.clone());
            potential_savings += monthly_cost;
        }

        if subscription.next_billing_date >= today
            && subscription.next_billing_date <= reminder_threshold
        {
            upcoming.push(subscription.clone());
        }
    }

    DashboardSummary {
        monthly_total,
        category_spending,
        scores,
        recommendations,
        potential_savings,
        upcoming,
    }
}
