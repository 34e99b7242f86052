// File: ./src/model/display.rs
// Shapes validated statistics into chart-ready data.
use crate::color_utils;
use crate::model::item::{GoalStats, TaskStatistics, TaskSummary};
use chrono::{DateTime, NaiveDate};
use rust_i18n::t;
use strum::{EnumIter, IntoEnumIterator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum StatKind {
    Completed,
    Pending,
    Overdue,
}

impl StatKind {
    pub fn label(&self) -> String {
        match self {
            StatKind::Completed => t!("stat_completed").to_string(),
            StatKind::Pending => t!("stat_pending").to_string(),
            StatKind::Overdue => t!("stat_overdue").to_string(),
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            StatKind::Completed => color_utils::SUCCESS,
            StatKind::Pending => color_utils::WARNING,
            StatKind::Overdue => color_utils::OVERDUE,
        }
    }

    fn pick(&self, stats: &TaskStatistics) -> f64 {
        match self {
            StatKind::Completed => stats.completed,
            StatKind::Pending => stats.pending,
            StatKind::Overdue => stats.overdue,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSlice {
    pub kind: StatKind,
    pub label: String,
    pub value: f64,
    pub color: &'static str,
}

/// Quick statistics chart: one slice per `StatKind`, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsChart {
    pub slices: Vec<ChartSlice>,
}

impl StatsChart {
    pub fn from_stats(stats: &TaskStatistics) -> Self {
        let slices = StatKind::iter()
            .map(|kind| ChartSlice {
                kind,
                label: kind.label(),
                value: kind.pick(stats).max(0.0),
                color: kind.color(),
            })
            .collect();
        Self { slices }
    }

    pub fn values(&self) -> Vec<f64> {
        self.slices.iter().map(|s| s.value).collect()
    }

    pub fn total(&self) -> f64 {
        self.slices.iter().map(|s| s.value).sum()
    }
}

/// Goal progress chart: completed vs remaining, plus the progress label.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalChart {
    pub completed: f64,
    pub remaining: f64,
    pub progress: f64,
}

impl GoalChart {
    pub fn from_stats(stats: &GoalStats) -> Self {
        Self {
            completed: stats.completed,
            remaining: stats.remaining(),
            progress: stats.progress,
        }
    }

    pub fn bars(&self) -> [(String, f64); 2] {
        [
            (t!("goal_completed").to_string(), self.completed),
            (t!("goal_remaining").to_string(), self.remaining),
        ]
    }

    pub fn progress_label(&self) -> String {
        t!("goal_progress_label", value = format!("{:.1}", self.progress)).to_string()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskRow {
    pub id: String,
    pub title: String,
    pub status: String,
    pub due: String,
}

impl TaskRow {
    pub fn from_summary(task: &TaskSummary) -> Self {
        Self {
            id: task.id.clone(),
            title: task.title.clone(),
            status: task.status.clone(),
            due: t!("task_due", date = format_due_date(&task.due_date)).to_string(),
        }
    }
}

/// ISO dates and RFC 3339 timestamps are shortened to `YYYY-MM-DD`; anything
/// else is shown as sent.
pub fn format_due_date(raw: &str) -> String {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%Y-%m-%d").to_string();
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.date_naive().format("%Y-%m-%d").to_string();
    }
    raw.to_string()
}

/// Formats a count without a trailing `.0` for whole numbers.
pub fn format_count(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{:.1}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_due_date_formats() {
        assert_eq!(format_due_date("2025-03-04"), "2025-03-04");
        assert_eq!(format_due_date("2025-03-04T10:00:00Z"), "2025-03-04");
        assert_eq!(format_due_date("next week"), "next week");
    }

    #[test]
    fn test_count_format() {
        assert_eq!(format_count(5.0), "5");
        assert_eq!(format_count(2.5), "2.5");
        assert_eq!(format_count(0.0), "0");
    }

    #[test]
    fn test_goal_chart_clamps_remaining() {
        let chart = GoalChart::from_stats(&GoalStats {
            total: 4.0,
            completed: 4.0,
            progress: 100.0,
        });
        assert_eq!(chart.remaining, 0.0);
        assert_eq!(chart.completed, 4.0);
    }
}
