//! Overview screen with headline counters and the activity chart

use crate::components::Table;
use chrono::{DateTime, Utc};
use skillup_client::ApiClient;
use skillup_protocol::fallback::{self, MonthlyActivity};
use skillup_types::DashboardStats;
use std::fmt;
use tracing::{info, warn};

/// Overview screen state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardPage {
    /// Headline counters
    pub stats: DashboardStats,
    /// Chart series
    pub activity: Vec<MonthlyActivity>,
    /// Banner text after a failed load
    pub error: Option<String>,
    /// Consecutive failed loads triggered by [`DashboardPage::retry`]
    pub retry_count: u32,
}

impl Default for DashboardPage {
    fn default() -> Self {
        Self {
            stats: DashboardStats::default(),
            activity: fallback::monthly_activity(),
            error: None,
            retry_count: 0,
        }
    }
}

impl DashboardPage {
    /// Open the screen
    pub async fn open(client: &ApiClient) -> Self {
        let mut page = Self::default();
        page.load(client, Utc::now()).await;
        page
    }

    /// Fetch the counters, falling back to demo values stamped at `now`
    pub async fn load(&mut self, client: &ApiClient, now: DateTime<Utc>) {
        match client.dashboard_stats().await {
            Ok(stats) => {
                self.stats = stats;
                self.error = None;
                self.retry_count = 0;
            }
            Err(e) => {
                warn!(error = %e, "dashboard stats unavailable, showing demo data");
                self.error = Some(format!("Server unavailable (Error 500). {e}"));
                self.stats = fallback::demo_dashboard_stats(now);
            }
        }
    }

    /// Load again after a failure
    pub async fn retry(&mut self, client: &ApiClient) {
        self.retry_count += 1;
        info!(attempt = self.retry_count, "retrying dashboard load");
        self.load(client, Utc::now()).await;
    }

    /// Label of the retry button
    #[must_use]
    pub fn retry_label(&self) -> String {
        if self.retry_count > 0 {
            format!("Retry ({})", self.retry_count)
        } else {
            "Retry".to_string()
        }
    }
}

impl fmt::Display for DashboardPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Dashboard Overview")?;
        if let Some(error) = &self.error {
            writeln!(
                f,
                "! Connection Issue: {error} Showing demo data. [{}]",
                self.retry_label()
            )?;
        }
        writeln!(f)?;

        let s = &self.stats;
        let mut counters = Table::new(&["Metric", "Value"]);
        counters.row(["Total Users".to_string(), s.total_users.to_string()]);
        counters.row(["Instructors".to_string(), s.total_instructors.to_string()]);
        counters.row(["Students".to_string(), s.total_students.to_string()]);
        counters.row(["Total Courses".to_string(), s.total_courses.to_string()]);
        counters.row(["Enrollments".to_string(), s.total_enrollments.to_string()]);
        write!(f, "{counters}")?;
        writeln!(f)?;

        writeln!(f, "Platform Activity")?;
        let mut chart = Table::new(&["Month", "Users", "Courses"]);
        for month in &self.activity {
            chart.row([
                month.name.to_string(),
                month.users.to_string(),
                month.courses.to_string(),
            ]);
        }
        write!(f, "{chart}")?;

        if !s.recent_users.is_empty() {
            writeln!(f)?;
            writeln!(f, "Recent Users")?;
            for user in &s.recent_users {
                writeln!(f, "  {} <{}> {}", user.name, user.email, user.role)?;
            }
        }
        if !s.recent_courses.is_empty() {
            writeln!(f)?;
            writeln!(f, "Recent Courses")?;
            for course in &s.recent_courses {
                writeln!(f, "  {} ({})", course.title, course.category)?;
            }
        }
        Ok(())
    }
}
