// File: ./src/dashboard/view.rs
// Render state machine for the dashboard screen.
use crate::dashboard::fetch::{CycleResult, FetchMode, FetchTicket};
use crate::model::display::format_count;
use crate::model::{DashboardData, GoalChart, StatsChart, TaskRow};
use rust_i18n::t;
use std::fmt;

/// What the dashboard currently shows.
///
/// `Refreshing` always wraps a settled `Error` or `Content`, which stays on
/// screen (with a refresh indicator) until the refresh settles.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Loading,
    Refreshing(Box<ViewState>),
    Error(String),
    Content(Box<DashboardData>),
}

impl ViewState {
    fn from_result(result: CycleResult) -> Self {
        match result {
            Ok(data) => ViewState::Content(Box::new(data)),
            Err(message) => ViewState::Error(message),
        }
    }
}

/// Owns the view state and hands out fetch tickets.
#[derive(Debug)]
pub struct Dashboard {
    state: ViewState,
    issued: u64,
    committed: u64,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Dashboard {
    pub fn new() -> Self {
        Self {
            state: ViewState::Loading,
            issued: 0,
            committed: 0,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, ViewState::Loading)
    }

    pub fn is_refreshing(&self) -> bool {
        matches!(self.state, ViewState::Refreshing(_))
    }

    /// Enters `Loading`, dropping whatever was shown, and issues the initial ticket.
    pub fn mount(&mut self) -> FetchTicket {
        self.state = ViewState::Loading;
        self.issue(FetchMode::Initial)
    }

    /// Starts a refresh in place. Does nothing while the initial load is
    /// still in flight.
    pub fn refresh(&mut self) -> Option<FetchTicket> {
        let current = std::mem::replace(&mut self.state, ViewState::Loading);
        self.state = match current {
            ViewState::Loading => return None,
            ViewState::Refreshing(prev) => ViewState::Refreshing(prev),
            settled => ViewState::Refreshing(Box::new(settled)),
        };
        Some(self.issue(FetchMode::Refresh))
    }

    /// Applies a cycle's result. Returns false when the result was ignored.
    ///
    /// Results older than the last committed cycle are dropped. A result that
    /// is not from the newest ticket replaces what a refresh shows but keeps
    /// the refresh running.
    pub fn settle(&mut self, ticket: FetchTicket, result: CycleResult) -> bool {
        if ticket.cycle <= self.committed || ticket.cycle > self.issued {
            log::debug!(
                "Ignoring dashboard result for cycle {} (committed {}, issued {})",
                ticket.cycle,
                self.committed,
                self.issued
            );
            return false;
        }
        self.committed = ticket.cycle;
        let settled = ViewState::from_result(result);

        if ticket.cycle == self.issued {
            self.state = settled;
            return true;
        }

        match &mut self.state {
            ViewState::Refreshing(prev) => {
                **prev = settled;
                true
            }
            // A newer initial load is pending; keep the spinner.
            _ => false,
        }
    }

    pub fn render(&self) -> DashboardRender {
        match &self.state {
            ViewState::Loading => DashboardRender::Loading,
            ViewState::Refreshing(prev) => Self::render_settled(prev, true),
            settled => Self::render_settled(settled, false),
        }
    }

    fn issue(&mut self, mode: FetchMode) -> FetchTicket {
        self.issued += 1;
        FetchTicket {
            cycle: self.issued,
            mode,
        }
    }

    fn render_settled(state: &ViewState, refreshing: bool) -> DashboardRender {
        match state {
            ViewState::Error(message) => DashboardRender::Error {
                message: message.clone(),
                refreshing,
            },
            ViewState::Content(data) => DashboardRender::Content {
                sections: DashboardSections::from_data(data),
                refreshing,
            },
            ViewState::Loading | ViewState::Refreshing(_) => DashboardRender::Loading,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Placeholder {
    pub text: String,
    pub hint: Option<String>,
}

/// A dashboard section: either data to draw or its empty-state text.
#[derive(Debug, Clone, PartialEq)]
pub enum Section<T> {
    Ready(T),
    Empty(Placeholder),
}

impl<T> Section<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Section::Ready(v) => Some(v),
            Section::Empty(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSections {
    pub tasks: Section<Vec<TaskRow>>,
    pub goals: Section<GoalChart>,
    pub stats: Section<StatsChart>,
}

impl DashboardSections {
    pub fn from_data(data: &DashboardData) -> Self {
        let tasks = if data.tasks.is_empty() {
            Section::Empty(Placeholder {
                text: t!("no_tasks_today").to_string(),
                hint: Some(t!("no_tasks_hint").to_string()),
            })
        } else {
            Section::Ready(data.tasks.iter().map(TaskRow::from_summary).collect())
        };

        let goals = match &data.goal_stats {
            Some(stats) => Section::Ready(GoalChart::from_stats(stats)),
            None => Section::Empty(Placeholder {
                text: t!("no_goal_data").to_string(),
                hint: None,
            }),
        };

        let stats = match &data.task_stats {
            Some(stats) => Section::Ready(StatsChart::from_stats(stats)),
            None => Section::Empty(Placeholder {
                text: t!("no_stats_data").to_string(),
                hint: None,
            }),
        };

        Self {
            tasks,
            goals,
            stats,
        }
    }
}

/// Input of the render layer: one of the three mutually exclusive screens.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardRender {
    Loading,
    Error {
        message: String,
        refreshing: bool,
    },
    Content {
        sections: DashboardSections,
        refreshing: bool,
    },
}

impl DashboardRender {
    pub fn stats_chart(&self) -> Option<&StatsChart> {
        match self {
            DashboardRender::Content { sections, .. } => sections.stats.ready(),
            _ => None,
        }
    }

    /// Number of task rows on screen, zero while loading or on error.
    pub fn task_row_count(&self) -> usize {
        match self {
            DashboardRender::Content { sections, .. } => sections.tasks.ready().map_or(0, Vec::len),
            _ => 0,
        }
    }

    pub fn is_refreshing(&self) -> bool {
        match self {
            DashboardRender::Loading => false,
            DashboardRender::Error { refreshing, .. }
            | DashboardRender::Content { refreshing, .. } => *refreshing,
        }
    }
}

fn write_placeholder(f: &mut fmt::Formatter<'_>, p: &Placeholder) -> fmt::Result {
    writeln!(f, "  {}", p.text)?;
    if let Some(hint) = &p.hint {
        writeln!(f, "  {}", hint)?;
    }
    Ok(())
}

/// Plain-text rendering used by the headless `stats` command.
impl fmt::Display for DashboardRender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sections = match self {
            DashboardRender::Loading => return writeln!(f, "{}", t!("loading")),
            DashboardRender::Error { message, .. } => return writeln!(f, "{}", message),
            DashboardRender::Content { sections, .. } => sections,
        };

        writeln!(f, "{}", t!("section_tasks"))?;
        match &sections.tasks {
            Section::Ready(rows) => {
                for row in rows {
                    writeln!(f, "  - {} [{}] {}", row.title, row.status, row.due)?;
                }
            }
            Section::Empty(p) => write_placeholder(f, p)?,
        }

        writeln!(f)?;
        writeln!(f, "{}", t!("section_goals"))?;
        match &sections.goals {
            Section::Ready(chart) => {
                for (label, value) in chart.bars() {
                    writeln!(f, "  {}: {}", label, format_count(value))?;
                }
                writeln!(f, "  {}", chart.progress_label())?;
            }
            Section::Empty(p) => write_placeholder(f, p)?,
        }

        writeln!(f)?;
        writeln!(f, "{}", t!("section_stats"))?;
        match &sections.stats {
            Section::Ready(chart) => {
                for slice in &chart.slices {
                    writeln!(f, "  {}: {}", slice.label, format_count(slice.value))?;
                }
            }
            Section::Empty(p) => write_placeholder(f, p)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TaskStatistics;

    fn stats(completed: f64) -> DashboardData {
        DashboardData {
            task_stats: Some(TaskStatistics {
                completed,
                pending: 0.0,
                overdue: 0.0,
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_ticket_modes() {
        let mut dash = Dashboard::new();
        let first = dash.mount();
        assert_eq!(first.mode, FetchMode::Initial);
        dash.settle(first, Ok(stats(1.0)));
        let next = dash.refresh().unwrap();
        assert_eq!(next.mode, FetchMode::Refresh);
        assert!(next.cycle > first.cycle);
    }

    #[test]
    fn test_refresh_ignored_while_loading() {
        let mut dash = Dashboard::new();
        dash.mount();
        assert!(dash.refresh().is_none());
        assert!(dash.is_loading());
    }

    #[test]
    fn test_stale_result_after_remount_keeps_spinner() {
        let mut dash = Dashboard::new();
        let first = dash.mount();
        let second = dash.mount();
        assert!(!dash.settle(first, Ok(stats(1.0))));
        assert!(dash.is_loading());
        assert!(dash.settle(second, Ok(stats(2.0))));
        assert_eq!(dash.state(), &ViewState::Content(Box::new(stats(2.0))));
    }

    #[test]
    fn test_result_older_than_committed_dropped() {
        let mut dash = Dashboard::new();
        let t1 = dash.mount();
        dash.settle(t1, Ok(stats(1.0)));
        let t2 = dash.refresh().unwrap();
        let t3 = dash.refresh().unwrap();
        assert!(dash.settle(t3, Ok(stats(3.0))));
        assert!(!dash.settle(t2, Ok(stats(2.0))));
        assert_eq!(dash.state(), &ViewState::Content(Box::new(stats(3.0))));
    }
}
