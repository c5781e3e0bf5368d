use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct User {
    pub username: String,
    pub email: String,
    pub password_hash: String,      // We store hashed passwords, not plain text
    pub subscriptions: Vec<String>, // List of subscription IDs
}
