mod auth;
mod dashboard;
mod subscription;

pub use auth::{
    handle_login, handle_logout, handle_register, serve_landing_page, serve_login_page,
    serve_register_page,
};
pub use dashboard::serve_dashboard;
pub use subscription::{
    handle_add, handle_delete, handle_edit, serve_add_page, serve_edit_page,
};

// Subscription names are the only free-text user input rendered into HTML
fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
