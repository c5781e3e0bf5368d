use axum::{
    extract::{Form, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use bcrypt::{hash, verify, DEFAULT_COST};
use std::fs;
use tower_sessions::Session;

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::{LoginForm, RegisterForm, User};
use crate::services::RedisService;

pub async fn serve_landing_page() -> impl IntoResponse {
    let landing_html = fs::read_to_string("templates/landing.html")
        .unwrap_or_else(|_| "Error loading landing page".to_string());
    Html(landing_html)
}

pub async fn serve_login_page() -> impl IntoResponse {
    let login_html = fs::read_to_string("templates/login.html")
        .unwrap_or_else(|_| "Error loading login page".to_string());
    Html(login_html)
}

pub async fn serve_register_page() -> impl IntoResponse {
    let register_html = fs::read_to_string("templates/register.html")
        .unwrap_or_else(|_| "Error loading register page".to_string());
    Html(register_html)
}

#[axum::debug_handler]
pub async fn handle_login(
    State((redis_service, _)): State<(RedisService, Config)>,
    session: Session,
    Form(login_form): Form<LoginForm>,
) -> AppResult<Response> {
    tracing::info!("Login attempt for email: {}", login_form.email);

    let username = match redis_service.find_username_by_email(&login_form.email).await? {
        Some(username) => username,
        None => {
            tracing::info!("No account for email: {}", login_form.email);
            return Ok(login_failed_redirect());
        }
    };

    let user = match redis_service.get_user(&username).await? {
        Some(user) => user,
        None => {
            tracing::warn!("Email index points at missing user: {}", username);
            return Ok(login_failed_redirect());
        }
    };

    if !verify(&login_form.password, &user.password_hash).unwrap_or(false) {
        tracing::info!("Invalid password for user: {}", user.username);
        return Ok(login_failed_redirect());
    }

    session
        .insert("user_session", user.username.clone())
        .await
        .map_err(|e| AppError::Auth(format!("Session error: {}", e)))?;

    tracing::info!("User logged in: {}", user.username);
    Ok(Redirect::to("/dashboard").into_response())
}

// Unknown email and wrong password get the same message
fn login_failed_redirect() -> Response {
    Redirect::to(&format!(
        "/login?error={}",
        urlencoding::encode("Login unsuccessful. Please check email and password")
    ))
    .into_response()
}

#[axum::debug_handler]
pub async fn handle_register(
    State((redis_service, _)): State<(RedisService, Config)>,
    Form(register_form): Form<RegisterForm>,
) -> AppResult<Response> {
    if let Err(msg) = register_form.validate() {
        return Ok(register_error_redirect(&msg));
    }

    // Username and email must both be unique
    if redis_service.get_user(&register_form.username).await?.is_some() {
        return Ok(register_error_redirect("Username already taken"));
    }
    if redis_service
        .find_username_by_email(&register_form.email)
        .await?
        .is_some()
    {
        return Ok(register_error_redirect("Email already registered"));
    }

    let password_hash = hash(register_form.password.as_bytes(), DEFAULT_COST)
        .map_err(|e| AppError::Auth(format!("Failed to hash password: {}", e)))?;
    let user = User {
        username: register_form.username,
        email: register_form.email,
        password_hash,
        subscriptions: Vec::new(),
    };

    redis_service.save_user(&user).await?;
    tracing::info!("Registered new user: {}", user.username);

    Ok(Redirect::to(&format!(
        "/login?notice={}",
        urlencoding::encode("Your account has been created! You are now able to log in")
    ))
    .into_response())
}

fn register_error_redirect(msg: &str) -> Response {
    Redirect::to(&format!("/register?error={}", urlencoding::encode(msg))).into_response()
}

#[axum::debug_handler]
pub async fn handle_logout(session: Session) -> Response {
    if let Err(e) = session.remove::<String>("user_session").await {
        tracing::warn!("Session removal error: {}", e);
    }
    Redirect::to("/").into_response()
}
