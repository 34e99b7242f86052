// File: ./src/model/item.rs
// Value types returned by the statistics API and their shape validators.
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

/// One entry of the "today's tasks" list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskSummary {
    pub id: String,
    pub title: String,
    pub status: String,
    #[serde(rename = "dueDate")]
    pub due_date: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalStats {
    pub total: f64,
    pub completed: f64,
    pub progress: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaskStatistics {
    pub completed: f64,
    pub pending: f64,
    pub overdue: f64,
}

/// The committed result of one fetch cycle. Sections that were not requested
/// (or not returned) are empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardData {
    pub tasks: Vec<TaskSummary>,
    pub goal_stats: Option<GoalStats>,
    pub task_stats: Option<TaskStatistics>,
}

fn number_field(payload: &Value, name: &str) -> Option<f64> {
    payload.get(name).filter(|v| v.is_number())?.as_f64()
}

impl GoalStats {
    /// Narrows an untyped payload into `GoalStats`.
    ///
    /// Accepts only objects with numeric `total`, `completed` and `progress`
    /// where `total >= completed` and `0 <= progress <= 100`.
    pub fn from_payload(payload: &Value) -> Option<Self> {
        if !payload.is_object() {
            return None;
        }
        let total = number_field(payload, "total")?;
        let completed = number_field(payload, "completed")?;
        let progress = number_field(payload, "progress")?;

        if total < completed || !(0.0..=100.0).contains(&progress) {
            return None;
        }
        Some(Self {
            total,
            completed,
            progress,
        })
    }

    /// Completed and remaining counts, as plotted by the goal chart.
    pub fn remaining(&self) -> f64 {
        (self.total - self.completed).max(0.0)
    }
}

impl TaskStatistics {
    /// Narrows an untyped payload into `TaskStatistics`.
    ///
    /// Accepts only objects with numeric, non-negative `completed`, `pending`
    /// and `overdue`.
    pub fn from_payload(payload: &Value) -> Option<Self> {
        if !payload.is_object() {
            return None;
        }
        let completed = number_field(payload, "completed")?;
        let pending = number_field(payload, "pending")?;
        let overdue = number_field(payload, "overdue")?;

        if completed < 0.0 || pending < 0.0 || overdue < 0.0 {
            return None;
        }
        Some(Self {
            completed,
            pending,
            overdue,
        })
    }

    pub fn total(&self) -> f64 {
        self.completed + self.pending + self.overdue
    }
}

impl TaskSummary {
    /// Narrows a payload into a task list. Every entry must carry string
    /// `id`, `title`, `status` and `dueDate`, and ids must be unique.
    pub fn list_from_payload(payload: &Value) -> Option<Vec<Self>> {
        let entries = payload.as_array()?;
        let mut seen = HashSet::new();
        let mut tasks = Vec::with_capacity(entries.len());

        for entry in entries {
            let task: TaskSummary = serde_json::from_value(entry.clone()).ok()?;
            if !seen.insert(task.id.clone()) {
                return None;
            }
            tasks.push(task);
        }
        Some(tasks)
    }
}

pub fn is_goal_stats(payload: &Value) -> bool {
    GoalStats::from_payload(payload).is_some()
}

pub fn is_task_stats(payload: &Value) -> bool {
    TaskStatistics::from_payload(payload).is_some()
}
