use redis::{AsyncCommands, Client};
use std::sync::Arc;

use crate::errors::AppResult;
use crate::models::{Subscription, User};

pub struct RedisService {
    client: Arc<Client>,
}

impl RedisService {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }

    fn user_key(username: &str) -> String {
        format!("user:{}", username)
    }

    // Secondary index so login can look users up by email
    fn email_key(email: &str) -> String {
        format!("user_email:{}", email)
    }

    fn subscription_key(id: &str) -> String {
        format!("sub:{}", id)
    }

    pub async fn get_user(&self, username: &str) -> AppResult<Option<User>> {
        let mut conn = self.client.get_async_connection().await?;
        let user_data: Option<String> = conn.get(Self::user_key(username)).await?;
        user_data
            .map(|data| serde_json::from_str(&data))
            .transpose()
            .map_err(Into::into)
    }

    pub async fn save_user(&self, user: &User) -> AppResult<()> {
        let mut conn = self.client.get_async_connection().await?;
        conn.set::<_, _, ()>(Self::user_key(&user.username), serde_json::to_string(user)?)
            .await?;
        conn.set::<_, _, ()>(Self::email_key(&user.email), user.username.clone())
            .await?;
        Ok(())
    }

    pub async fn find_username_by_email(&self, email: &str) -> AppResult<Option<String>> {
        let mut conn = self.client.get_async_connection().await?;
        let username: Option<String> = conn.get(Self::email_key(email)).await?;
        Ok(username)
    }

    pub async fn get_subscription(&self, id: &str) -> AppResult<Option<Subscription>> {
        let mut conn = self.client.get_async_connection().await?;
        let sub_data: Option<String> = conn.get(Self::subscription_key(id)).await?;
        sub_data
            .map(|data| serde_json::from_str(&data))
            .transpose()
            .map_err(Into::into)
    }

    pub async fn save_subscription(&self, subscription: &Subscription) -> AppResult<()> {
        let mut conn = self.client.get_async_connection().await?;
        conn.set::<_, _, ()>(
            Self::subscription_key(&subscription.id),
            serde_json::to_string(subscription)?,
        )
        .await?;
        Ok(())
    }

    pub async fn delete_subscription(&self, id: &str) -> AppResult<()> {
        let mut conn = self.client.get_async_connection().await?;
        conn.del::<_, ()>(Self::subscription_key(id)).await?;
        Ok(())
    }
}

impl Clone for RedisService {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
        }
    }
}
