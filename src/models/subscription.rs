use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How often a subscription charges its owner.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BillingFrequency {
    Monthly,
    Yearly,
}

impl BillingFrequency {
    /// Days one billing cycle is spread over when deriving a daily cost.
    /// Anything that is not monthly spreads over a full year.
    pub fn days_per_cycle(self) -> f64 {
        match self {
            BillingFrequency::Monthly => 30.0,
            _ => 365.0,
        }
    }

    /// Normalizes a per-cycle cost to its monthly equivalent.
    pub fn monthly_equivalent(self, cost: f64) -> f64 {
        match self {
            BillingFrequency::Monthly => cost,
            BillingFrequency::Yearly => cost / 12.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BillingFrequency::Monthly => "monthly",
            BillingFrequency::Yearly => "yearly",
        }
    }
}

impl fmt::Display for BillingFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Self-reported usage cadence.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum UsageFrequency {
    Daily,
    Weekly,
    Monthly,
    #[default]
    NotTracked,
}

impl UsageFrequency {
    pub fn as_str(self) -> &'static str {
        match self {
            UsageFrequency::Daily => "daily",
            UsageFrequency::Weekly => "weekly",
            UsageFrequency::Monthly => "monthly",
            UsageFrequency::NotTracked => "not_tracked",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            UsageFrequency::Daily => "Daily",
            UsageFrequency::Weekly => "Weekly",
            UsageFrequency::Monthly => "Monthly",
            UsageFrequency::NotTracked => "Not Tracked",
        }
    }
}

impl fmt::Display for UsageFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Spend grouping label.
#[derive(
    Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
pub enum Category {
    Entertainment,
    Productivity,
    Fitness,
    Education,
    #[default]
    Other,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Entertainment => "Entertainment",
            Category::Productivity => "Productivity",
            Category::Fitness => "Fitness",
            Category::Education => "Education",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Subscription {
    pub id: String,
    pub owner: String, // Username of the owning user
    pub name: String,
    pub cost: f64, // Amount charged per billing cycle
    pub billing_frequency: BillingFrequency,
    pub next_billing_date: NaiveDate, // User-edited, not advanced automatically
    pub usage_frequency: UsageFrequency,
    pub category: Category,
    pub created_at: DateTime<Utc>,
}

impl Subscription {
    /// Monthly-equivalent cost of this subscription.
    pub fn monthly_cost(&self) -> f64 {
        self.billing_frequency.monthly_equivalent(self.cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_billing_frequency_wire_format() {
        assert_eq!(
            serde_json::to_string(&BillingFrequency::Monthly).unwrap(),
            "\"monthly\""
        );
        assert_eq!(
            serde_json::from_str::<BillingFrequency>("\"yearly\"").unwrap(),
            BillingFrequency::Yearly
        );
    }

    #[test]
    fn test_usage_frequency_wire_format() {
        assert_eq!(
            serde_json::to_string(&UsageFrequency::NotTracked).unwrap(),
            "\"not_tracked\""
        );
        assert_eq!(
            serde_json::from_str::<UsageFrequency>("\"weekly\"").unwrap(),
            UsageFrequency::Weekly
        );
    }

    #[test]
    fn test_category_wire_format() {
        assert_eq!(
            serde_json::to_string(&Category::Entertainment).unwrap(),
            "\"Entertainment\""
        );
        assert_eq!(
            serde_json::from_str::<Category>("\"Other\"").unwrap(),
            Category::Other
        );
    }

    #[test]
    fn test_monthly_equivalent() {
        assert_eq!(BillingFrequency::Monthly.monthly_equivalent(10.0), 10.0);
        assert_eq!(BillingFrequency::Yearly.monthly_equivalent(120.0), 10.0);
    }

    #[test]
    fn test_days_per_cycle() {
        assert_eq!(BillingFrequency::Monthly.days_per_cycle(), 30.0);
        assert_eq!(BillingFrequency::Yearly.days_per_cycle(), 365.0);
    }
}
