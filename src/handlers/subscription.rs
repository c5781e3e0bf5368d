use axum::{
    extract::{Form, Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use chrono::Utc;
use std::fs;
use tower_sessions::Session;

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::{Subscription, SubscriptionForm};
use crate::services::RedisService;

use super::escape_html;

pub async fn serve_add_page() -> AppResult<Response> {
    let add_html = fs::read_to_string("templates/add_subscription.html")?;
    Ok(Html(add_html).into_response())
}

#[axum::debug_handler]
pub async fn handle_add(
    State((redis_service, _)): State<(RedisService, Config)>,
    session: Session,
    Form(form): Form<SubscriptionForm>,
) -> AppResult<Response> {
    let username = session_username(&session).await?;

    if let Err(msg) = form.validate() {
        return Ok(form_error_redirect("/add", &msg));
    }

    let subscription = Subscription {
        id: uuid::Uuid::new_v4().to_string(),
        owner: username.clone(),
        name: form.name,
        cost: form.cost,
        billing_frequency: form.billing_frequency,
        next_billing_date: form.next_billing_date,
        usage_frequency: form.usage_frequency,
        category: form.category,
        created_at: Utc::now(),
    };

    let mut user = redis_service
        .get_user(&username)
        .await?
        .ok_or_else(|| AppError::Auth("User not found".into()))?;

    redis_service.save_subscription(&subscription).await?;
    user.subscriptions.push(subscription.id.clone());
    redis_service.save_user(&user).await?;

    tracing::info!(
        "Added subscription {} ({}) for user {}",
        subscription.name,
        subscription.id,
        username
    );
    Ok(notice_redirect("Subscription added!"))
}

pub async fn serve_edit_page(
    State((redis_service, _)): State<(RedisService, Config)>,
    session: Session,
    Path(subscription_id): Path<String>,
) -> AppResult<Response> {
    let username = session_username(&session).await?;
    let subscription = owned_subscription(&redis_service, &subscription_id, &username).await?;

    let template = fs::read_to_string("templates/edit_subscription.html")?;
    let html = template
        .replace("{{id}}", &subscription.id)
        .replace("{{name}}", &escape_html(&subscription.name))
        .replace("{{cost}}", &format!("{:.2}", subscription.cost))
        .replace(
            "{{next_billing_date}}",
            &subscription.next_billing_date.format("%Y-%m-%d").to_string(),
        );
    let html = fill_select(
        html,
        "billing",
        &["monthly", "yearly"],
        subscription.billing_frequency.as_str(),
    );
    let html = fill_select(
        html,
        "usage",
        &["daily", "weekly", "monthly", "not_tracked"],
        subscription.usage_frequency.as_str(),
    );
    let html = fill_select(
        html,
        "category",
        &[
            "Entertainment",
            "Productivity",
            "Fitness",
            "Education",
            "Other",
        ],
        subscription.category.as_str(),
    );

    Ok(Html(html).into_response())
}

#[axum::debug_handler]
pub async fn handle_edit(
    State((redis_service, _)): State<(RedisService, Config)>,
    session: Session,
    Path(subscription_id): Path<String>,
    Form(form): Form<SubscriptionForm>,
) -> AppResult<Response> {
    let username = session_username(&session).await?;
    let mut subscription = owned_subscription(&redis_service, &subscription_id, &username).await?;

    if let Err(msg) = form.validate() {
        return Ok(form_error_redirect(
            &format!("/edit/{}", subscription_id),
            &msg,
        ));
    }

    // Everything but id and owner is replaceable
    subscription.name = form.name;
    subscription.cost = form.cost;
    subscription.billing_frequency = form.billing_frequency;
    subscription.next_billing_date = form.next_billing_date;
    subscription.usage_frequency = form.usage_frequency;
    subscription.category = form.category;

    redis_service.save_subscription(&subscription).await?;

    tracing::info!("Updated subscription {} for user {}", subscription_id, username);
    Ok(notice_redirect("Subscription updated!"))
}

#[axum::debug_handler]
pub async fn handle_delete(
    State((redis_service, _)): State<(RedisService, Config)>,
    session: Session,
    Path(subscription_id): Path<String>,
) -> AppResult<Response> {
    let username = session_username(&session).await?;
    owned_subscription(&redis_service, &subscription_id, &username).await?;

    let mut user = redis_service
        .get_user(&username)
        .await?
        .ok_or_else(|| AppError::Auth("User not found".into()))?;

    // Drop the id from the owner's list before removing the record itself
    user.subscriptions.retain(|id| id != &subscription_id);
    redis_service.save_user(&user).await?;
    redis_service.delete_subscription(&subscription_id).await?;

    tracing::info!("Deleted subscription {} for user {}", subscription_id, username);
    Ok(notice_redirect("Subscription deleted!"))
}

pub async fn session_username(session: &Session) -> AppResult<String> {
    session
        .get::<String>("user_session")
        .await
        .map_err(|e| AppError::Auth(format!("Session error: {}", e)))?
        .ok_or_else(|| AppError::Auth("Not authenticated".into()))
}

// Fetches a subscription and enforces that the session user owns it
async fn owned_subscription(
    redis_service: &RedisService,
    subscription_id: &str,
    username: &str,
) -> AppResult<Subscription> {
    let subscription = redis_service
        .get_subscription(subscription_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Subscription {}", subscription_id)))?;

    if subscription.owner != username {
        tracing::warn!(
            "User {} attempted to access subscription {} owned by {}",
            username,
            subscription_id,
            subscription.owner
        );
        return Err(AppError::Forbidden);
    }

    Ok(subscription)
}

fn notice_redirect(msg: &str) -> Response {
    Redirect::to(&format!("/dashboard?notice={}", urlencoding::encode(msg))).into_response()
}

fn form_error_redirect(path: &str, msg: &str) -> Response {
    Redirect::to(&format!("{}?error={}", path, urlencoding::encode(msg))).into_response()
}

// Marks the <option> matching `current` as selected; the template carries a
// {{sel_<field>_<option>}} marker on every option tag.
fn fill_select(html: String, field: &str, options: &[&str], current: &str) -> String {
    options.iter().fold(html, |acc, option| {
        let marker = format!("{{{{sel_{}_{}}}}}", field, option);
        acc.replace(&marker, if *option == current { "selected" } else { "" })
    })
}
