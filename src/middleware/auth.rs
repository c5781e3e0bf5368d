use axum::{
    body::Body,
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

pub async fn require_auth(session: Session, req: Request<Body>, next: Next) -> Response {
    let path = req.uri().path();

    if path == "/"
        || path == "/login"
        || path == "/register"
        || path.starts_with("/static")
    {
        return next.run(req).await;
    }

    match session.get::<String>("user_session").await {
        Ok(Some(_)) => next.run(req).await,
        _ => Redirect::to("/login").into_response(),
    }
}
