// File: ./src/model/mod.rs
pub mod display;
pub mod item;

pub use display::{ChartSlice, GoalChart, StatKind, StatsChart, TaskRow};
pub use item::{
    DashboardData, GoalStats, TaskStatistics, TaskSummary, is_goal_stats, is_task_stats,
};
