use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
};
use chrono::Utc;
use tower_sessions::Session;

use crate::analytics::{summarize, DashboardSummary};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::Subscription;
use crate::services::RedisService;

use super::{escape_html, subscription::session_username};

pub async fn serve_dashboard(
    State((redis_service, config)): State<(RedisService, Config)>,
    session: Session,
) -> AppResult<Response> {
    tracing::info!("Accessing dashboard");

    let username = session_username(&session).await?;

    let user = redis_service
        .get_user(&username)
        .await?
        .ok_or_else(|| AppError::Auth("User not found".into()))?;

    tracing::debug!("User subscriptions: {:?}", user.subscriptions);

    // Fetch each owned subscription, skipping dangling ids
    let mut subscriptions = Vec::new();
    for subscription_id in &user.subscriptions {
        match redis_service.get_subscription(subscription_id).await {
            Ok(Some(subscription)) => subscriptions.push(subscription),
            Ok(None) => tracing::warn!(
                "Subscription {} not found for user {}",
                subscription_id,
                username
            ),
            Err(e) => tracing::error!("Failed to fetch subscription {}: {}", subscription_id, e),
        }
    }

    // Soonest bill first
    subscriptions.sort_by(|a, b| a.next_billing_date.cmp(&b.next_billing_date));

    let today = Utc::now().date_naive();
    let summary = summarize(&subscriptions, today, &config.scoring);

    let dashboard_html = std::fs::read_to_string("templates/dashboard.html").map_err(|e| {
        tracing::error!("Failed to read dashboard template: {}", e);
        AppError::File(e)
    })?;

    let dashboard_html = dashboard_html
        .replace("{{username}}", &username)
        .replace("{{today}}", &today.format("%Y-%m-%d").to_string())
        .replace("{{monthly_total}}", &format!("{:.2}", summary.monthly_total))
        .replace(
            "{{subscription_count}}",
            &subscriptions.len().to_string(),
        )
        .replace(
            "{{subscription_rows}}",
            &render_subscription_rows(&subscriptions, &summary),
        )
        .replace("{{category_rows}}", &render_category_rows(&summary))
        .replace("{{upcoming_items}}", &render_upcoming(&summary))
        .replace(
            "{{recommendation_items}}",
            &render_recommendations(&summary),
        )
        .replace(
            "{{potential_savings}}",
            &format!("{:.2}", summary.potential_savings),
        );

    tracing::info!("Successfully rendered dashboard for user: {}", username);
    Ok(Html(dashboard_html).into_response())
}

fn render_subscription_rows(subscriptions: &[Subscription], summary: &DashboardSummary) -> String {
    if subscriptions.is_empty() {
        return r#"<tr><td colspan="7" class="empty">No subscriptions yet. Add one to get started.</td></tr>"#
            .to_string();
    }

    subscriptions
        .iter()
        .map(|subscription| {
            let score = summary.scores.get(&subscription.id).copied().unwrap_or(0);
            format!(
                r#"<tr>
                    <td>{}</td>
                    <td>{}</td>
                    <td>${:.2} / {}</td>
                    <td>{}</td>
                    <td>{}</td>
                    <td class="score">{}</td>
                    <td class="action-cell">
                        <a href="/edit/{}" class="edit-btn">Edit</a>
                        <form method="post" action="/delete/{}" class="inline-form">
                            <button type="submit" class="delete-btn">Delete</button>
                        </form>
                    </td>
                </tr>"#,
                escape_html(&subscription.name),
                subscription.category,
                subscription.cost,
                subscription.billing_frequency,
                subscription.next_billing_date.format("%Y-%m-%d"),
                subscription.usage_frequency.label(),
                score,
                subscription.id,
                subscription.id
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_category_rows(summary: &DashboardSummary) -> String {
    summary
        .category_spending
        .iter()
        .map(|(category, spend)| {
            format!(
                r#"<tr><td>{}</td><td>${:.2}</td></tr>"#,
                category, spend
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_upcoming(summary: &DashboardSummary) -> String {
    if summary.upcoming.is_empty() {
        return r#"<li class="empty">No payments due in the next two weeks.</li>"#.to_string();
    }

    summary
        .upcoming
        .iter()
        .map(|subscription| {
            format!(
                r#"<li><strong>{}</strong> — ${:.2} due {}</li>"#,
                escape_html(&subscription.name),
                subscription.cost,
                subscription.next_billing_date.format("%Y-%m-%d")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_recommendations(summary: &DashboardSummary) -> String {
    if summary.recommendations.is_empty() {
        return r#"<li class="empty">Nothing worth cancelling right now.</li>"#.to_string();
    }

    summary
        .recommendations
        .iter()
        .map(|subscription| {
            let score = summary.scores.get(&subscription.id).copied().unwrap_or(0);
            format!(
                r#"<li><strong>{}</strong> — value score {}, ${:.2}/month</li>"#,
                escape_html(&subscription.name),
                score,
                subscription.monthly_cost()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::ScoreTuning;
    use crate::models::{BillingFrequency, Category, UsageFrequency};
    use chrono::{NaiveDate, TimeZone};

    fn sample_subscription(name: &str) -> Subscription {
        Subscription {
            id: name.to_string(),
            owner: "alice".to_string(),
            name: name.to_string(),
            cost: 90.0,
            billing_frequency: BillingFrequency::Monthly,
            next_billing_date: NaiveDate::from_ymd_opt(2026, 8, 10).unwrap(),
            usage_frequency: UsageFrequency::NotTracked,
            category: Category::Entertainment,
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Bob" & Co</b>"#),
            "&lt;b&gt;&quot;Bob&quot; &amp; Co&lt;/b&gt;"
        );
    }

    #[test]
    fn test_rows_escape_subscription_names() {
        let mut subscription = sample_subscription("sub");
        subscription.name = "<script>alert(1)</script>".to_string();
        let subscriptions = vec![subscription];
        let summary = summarize(
            &subscriptions,
            NaiveDate::from_ymd_opt(2026, 8, 6).unwrap(),
            &ScoreTuning::default(),
        );
        let rows = render_subscription_rows(&subscriptions, &summary);
        assert!(!rows.contains("<script>"));
        assert!(rows.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_empty_rows_render_placeholder() {
        let summary = summarize(
            &[],
            NaiveDate::from_ymd_opt(2026, 8, 6).unwrap(),
            &ScoreTuning::default(),
        );
        assert!(render_subscription_rows(&[], &summary).contains("No subscriptions yet"));
        assert!(render_upcoming(&summary).contains("No payments due"));
        assert!(render_recommendations(&summary).contains("Nothing worth cancelling"));
    }
}
