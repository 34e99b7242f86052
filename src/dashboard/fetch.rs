// File: ./src/dashboard/fetch.rs
// Runs dashboard fetch cycles against the API.
use crate::client::{ApiClient, ApiError};
use crate::config::DashboardConfig;
use crate::model::{DashboardData, GoalStats, TaskStatistics, TaskSummary};
use rust_i18n::t;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// First cycle after the dashboard is mounted (full-screen loading).
    Initial,
    /// Pull-to-refresh (content stays visible).
    Refresh,
}

/// Identifies one fetch cycle. Cycle numbers grow monotonically per dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub cycle: u64,
    pub mode: FetchMode,
}

pub type CycleResult = Result<DashboardData, String>;

/// Requests and validates every statistics resource the dashboard shows.
///
/// Cycles started through [`FetchOrchestrator::run`] never overlap: they
/// queue behind a mutex, and a queued cycle that has been superseded by a
/// newer ticket is dropped instead of being run.
#[derive(Debug)]
pub struct FetchOrchestrator {
    client: ApiClient,
    sections: DashboardConfig,
    gate: Mutex<()>,
    latest: AtomicU64,
}

impl FetchOrchestrator {
    pub fn new(client: ApiClient, sections: DashboardConfig) -> Self {
        Self {
            client,
            sections,
            gate: Mutex::new(()),
            latest: AtomicU64::new(0),
        }
    }

    /// Runs `ticket`'s cycle once every earlier cycle has finished.
    /// Returns `None` when a newer ticket arrived while this one was queued.
    pub async fn run(&self, ticket: FetchTicket) -> Option<CycleResult> {
        self.latest.fetch_max(ticket.cycle, Ordering::SeqCst);
        let _guard = self.gate.lock().await;

        let latest = self.latest.load(Ordering::SeqCst);
        if ticket.cycle < latest {
            log::debug!(
                "Skipping dashboard cycle {} (superseded by {})",
                ticket.cycle,
                latest
            );
            return None;
        }
        log::debug!("Starting dashboard cycle {} ({:?})", ticket.cycle, ticket.mode);
        Some(self.fetch_cycle().await)
    }

    /// One fetch cycle. The first failing request aborts the cycle, so the
    /// result is either every section or a single user-facing message.
    pub async fn fetch_cycle(&self) -> CycleResult {
        log::info!("Fetching dashboard data from {}", self.client.base_url());
        match self.try_fetch().await {
            Ok(data) => {
                log::info!(
                    "Dashboard cycle complete ({} tasks, goals: {}, stats: {})",
                    data.tasks.len(),
                    data.goal_stats.is_some(),
                    data.task_stats.is_some()
                );
                Ok(data)
            }
            Err(e) => {
                log::warn!("Dashboard cycle failed: {:?}", e);
                Err(e.user_message(&t!("load_failed")))
            }
        }
    }

    async fn try_fetch(&self) -> Result<DashboardData, ApiError> {
        let mut data = DashboardData::default();

        if self.sections.tasks_today {
            let payload = self.client.tasks_today().await?;
            data.tasks = TaskSummary::list_from_payload(&payload)
                .ok_or_else(|| ApiError::InvalidData(t!("invalid_tasks").to_string()))?;
        }

        if self.sections.goal_stats {
            let payload = self.client.goal_stats().await?;
            data.goal_stats = Some(
                GoalStats::from_payload(&payload)
                    .ok_or_else(|| ApiError::InvalidData(t!("invalid_goal_stats").to_string()))?,
            );
        }

        let payload = self.client.task_statistics().await?;
        data.task_stats = Some(
            TaskStatistics::from_payload(&payload)
                .ok_or_else(|| ApiError::InvalidData(t!("invalid_task_stats").to_string()))?,
        );

        Ok(data)
    }
}
