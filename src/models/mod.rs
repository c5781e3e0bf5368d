mod forms;
mod subscription;
mod user;

pub use forms::{LoginForm, RegisterForm, SubscriptionForm};
pub use subscription::{BillingFrequency, Category, Subscription, UsageFrequency};
pub use user::User;
