//! Driving port for the authenticated dashboard summary.

use async_trait::async_trait;

use crate::domain::{DashboardSummary, Error, UserId};

/// Domain use-case port for the dashboard summary.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DashboardQuery: Send + Sync {
    /// Build the dashboard summary shown to `viewer`.
    async fn fetch_dashboard(&self, viewer: &UserId) -> Result<DashboardSummary, Error>;
}
