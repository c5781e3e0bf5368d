use chrono::NaiveDate;
use serde::Deserialize;

use super::subscription::{BillingFrequency, Category, UsageFrequency};

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<(), String> {
        if self.username.len() < 4 || self.username.len() > 20 {
            return Err("Username must be between 4 and 20 characters".into());
        }
        if !self.email.contains('@') || !self.email.contains('.') {
            return Err("Please enter a valid email address".into());
        }
        if self.password.len() < 6 {
            return Err("Password must be at least 6 characters".into());
        }
        if self.password != self.confirm_password {
            return Err("Passwords don't match".into());
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SubscriptionForm {
    pub name: String,
    pub cost: f64,
    pub billing_frequency: BillingFrequency,
    pub next_billing_date: NaiveDate,
    #[serde(default)]
    pub usage_frequency: UsageFrequency,
    #[serde(default)]
    pub category: Category,
}

impl SubscriptionForm {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Subscription name is required".into());
        }
        if !self.cost.is_finite() || self.cost <= 0.0 {
            return Err("Cost must be a positive amount".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subscription_form(cost: f64) -> SubscriptionForm {
        SubscriptionForm {
            name: "Netflix".into(),
            cost,
            billing_frequency: BillingFrequency::Monthly,
            next_billing_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            usage_frequency: UsageFrequency::Daily,
            category: Category::Entertainment,
        }
    }

    #[test]
    fn test_subscription_form_rejects_non_positive_cost() {
        assert!(subscription_form(0.0).validate().is_err());
        assert!(subscription_form(-4.99).validate().is_err());
        assert!(subscription_form(f64::NAN).validate().is_err());
        assert!(subscription_form(15.99).validate().is_ok());
    }

    #[test]
    fn test_subscription_form_rejects_blank_name() {
        let mut form = subscription_form(9.99);
        form.name = "   ".into();
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_register_form_validation() {
        let mut form = RegisterForm {
            username: "alice".into(),
            email: "alice@example.com".into(),
            password: "secret1".into(),
            confirm_password: "secret1".into(),
        };
        assert!(form.validate().is_ok());

        form.username = "al".into();
        assert!(form.validate().is_err());
        form.username = "alice".into();

        form.email = "not-an-email".into();
        assert!(form.validate().is_err());
        form.email = "alice@example.com".into();

        form.password = "short".into();
        assert!(form.validate().is_err());
        form.password = "secret1".into();

        form.confirm_password = "different".into();
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_form_decodes_urlencoded_enums() {
        let form: SubscriptionForm = serde_urlencoded::from_str(
            "name=Gym&cost=30&billing_frequency=monthly\
             &next_billing_date=2026-08-20&usage_frequency=not_tracked&category=Fitness",
        )
        .unwrap();
        assert_eq!(form.billing_frequency, BillingFrequency::Monthly);
        assert_eq!(form.usage_frequency, UsageFrequency::NotTracked);
        assert_eq!(form.category, Category::Fitness);
        assert_eq!(
            form.next_billing_date,
            NaiveDate::from_ymd_opt(2026, 8, 20).unwrap()
        );
    }
}
