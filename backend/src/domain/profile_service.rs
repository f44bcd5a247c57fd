//! Read-side services for the signed-in user: profile and dashboard.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{DashboardQuery, UserProfileQuery, UserRepository};
use crate::domain::{DashboardSummary, Error, User, UserId};

/// Profile and dashboard queries over the user repository.
#[derive(Clone)]
pub struct UserProfileService<R> {
    users: Arc<R>,
}

impl<R> UserProfileService<R> {
    /// Create a service reading from `users`.
    #[must_use]
    pub const fn new(users: Arc<R>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl<R> UserProfileQuery for UserProfileService<R>
where
    R: UserRepository,
{
    async fn fetch_profile(&self, user_id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| Error::not_found("User not found"))
    }
}

#[async_trait]
impl<R> DashboardQuery for UserProfileService<R>
where
    R: UserRepository,
{
    async fn fetch_dashboard(&self, _viewer: &UserId) -> Result<DashboardSummary, Error> {
        let total_users = self.users.count().await?;
        Ok(DashboardSummary::with_placeholder_metrics(total_users))
    }
}
