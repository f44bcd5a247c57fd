//! Dashboard summary shown to signed-in users.
//!
//! Only `total_users` is live. Revenue, active sessions and the activity feed
//! are fixed demonstration values until real sources exist.

/// Placeholder revenue figure.
pub const PLACEHOLDER_REVENUE: u64 = 45_678;
/// Placeholder active session count.
pub const PLACEHOLDER_ACTIVE_SESSIONS: u64 = 892;

/// One line of the recent activity feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityEntry {
    id: u32,
    description: String,
    time: String,
}

impl ActivityEntry {
    /// Build a feed entry.
    #[must_use]
    pub fn new(id: u32, description: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            id,
            description: description.into(),
            time: time.into(),
        }
    }

    /// Position of the entry in the feed.
    #[must_use]
    pub const fn id(&self) -> u32 {
        self.id
    }

    /// What happened.
    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Human-readable relative time, for example `"2 hours ago"`.
    #[must_use]
    pub fn time(&self) -> &str {
        self.time.as_str()
    }
}

/// Aggregate figures for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSummary {
    total_users: u64,
    revenue: u64,
    active_sessions: u64,
    recent_activity: Vec<ActivityEntry>,
}

impl DashboardSummary {
    /// Assemble a summary from explicit figures.
    #[must_use]
    pub const fn new(
        total_users: u64,
        revenue: u64,
        active_sessions: u64,
        recent_activity: Vec<ActivityEntry>,
    ) -> Self {
        Self {
            total_users,
            revenue,
            active_sessions,
            recent_activity,
        }
    }

    /// Combine a live user count with the placeholder metrics.
    ///
    /// # Examples
    /// ```
    /// use gatehouse::domain::DashboardSummary;
    ///
    /// let summary = DashboardSummary::with_placeholder_metrics(3);
    /// assert_eq!(summary.total_users(), 3);
    /// assert_eq!(summary.recent_activity().len(), 3);
    /// ```
    #[must_use]
    pub fn with_placeholder_metrics(total_users: u64) -> Self {
        Self::new(
            total_users,
            PLACEHOLDER_REVENUE,
            PLACEHOLDER_ACTIVE_SESSIONS,
            vec![
                ActivityEntry::new(1, "New user registered", "2 hours ago"),
                ActivityEntry::new(2, "Payment received", "5 hours ago"),
                ActivityEntry::new(3, "System update completed", "1 day ago"),
            ],
        )
    }

    /// Number of registered accounts.
    #[must_use]
    pub const fn total_users(&self) -> u64 {
        self.total_users
    }

    /// Revenue figure in whole currency units.
    #[must_use]
    pub const fn revenue(&self) -> u64 {
        self.revenue
    }

    /// Number of sessions considered active.
    #[must_use]
    pub const fn active_sessions(&self) -> u64 {
        self.active_sessions
    }

    /// Newest-first activity feed.
    #[must_use]
    pub fn recent_activity(&self) -> &[ActivityEntry] {
        &self.recent_activity
    }
}
