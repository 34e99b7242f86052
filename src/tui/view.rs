// File: src/tui/view.rs
use crate::auth::AlertKind;
use crate::color_utils;
use crate::dashboard::{DashboardRender, DashboardSections, Placeholder, Section};
use crate::model::display::format_count;
use crate::model::{GoalChart, StatsChart, TaskRow};
use crate::navigation::Screen;
use crate::tui::state::{AppState, Field};

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Clear, Gauge, Paragraph, Wrap},
};
use rust_i18n::t;
use unicode_width::UnicodeWidthStr;

const PASSWORD_MASK: char = '•';

fn hex(color: &str) -> Color {
    color_utils::parse_hex_to_u8(color)
        .map(|(r, g, b)| Color::Rgb(r, g, b))
        .unwrap_or(Color::Reset)
}

pub fn draw(f: &mut Frame, state: &AppState) {
    match state.screen() {
        Screen::Splash => draw_splash(f),
        Screen::Login | Screen::Register => draw_form(f, state),
        Screen::Home => draw_dashboard(f, state),
    }

    if let Some(alert) = &state.alert {
        let area = centered_rect(60, 30, f.area());
        let accent = match alert.kind {
            AlertKind::Success => hex(color_utils::SUCCESS),
            AlertKind::Error => hex(color_utils::ERROR),
        };
        let block = Block::default()
            .title(format!(" {} ", alert.title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent));

        let lines = vec![
            Line::from(""),
            Line::from(alert.message.as_str()),
            Line::from(""),
            Line::from(Span::styled(
                format!(" [Enter] {} ", t!("ok")),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
        ];
        let p = Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });

        f.render_widget(Clear, area);
        f.render_widget(p, area);
    }
}

const LOGO: [&str; 5] = [
    "  ___ _             ___           __ _   ",
    " | _ \\ |__ _ _ _  / __|_ _ __ _ / _| |_ ",
    " |  _/ / _` | ' \\| (__| '_/ _` |  _|  _|",
    " |_| |_\\__,_|_||_|\\___|_| \\__,_|_|  \\__|",
    "",
];

fn draw_splash(f: &mut Frame) {
    let area = centered_rect(60, 50, f.area());
    let mut lines: Vec<Line> = LOGO
        .iter()
        .map(|l| {
            Line::from(Span::styled(
                *l,
                Style::default().fg(hex(color_utils::PRIMARY)),
            ))
        })
        .collect();
    lines.push(Line::from(Span::styled(
        t!("app_name").to_string(),
        Style::default()
            .fg(hex(color_utils::TEXT))
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(Span::styled(
        format!("v{}", env!("CARGO_PKG_VERSION")),
        Style::default().fg(hex(color_utils::MUTED)),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        t!("splash_hint").to_string(),
        Style::default().fg(hex(color_utils::MUTED)),
    )));
    let p = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(p, area);
}

// --- AUTH FORMS ---

fn field_label(field: Field) -> String {
    match field {
        Field::Name => t!("field_name").to_string(),
        Field::Email => t!("field_email").to_string(),
        Field::Password => t!("field_password").to_string(),
        Field::Submit | Field::SwitchScreen => String::new(),
    }
}

fn field_value(state: &AppState, field: Field) -> String {
    let raw = match (state.screen(), field) {
        (Screen::Login, Field::Email) => &state.login.email,
        (Screen::Login, Field::Password) => &state.login.password,
        (Screen::Register, Field::Name) => &state.register.name,
        (Screen::Register, Field::Email) => &state.register.email,
        (Screen::Register, Field::Password) => &state.register.password,
        _ => return String::new(),
    };
    if field == Field::Password {
        PASSWORD_MASK.to_string().repeat(raw.chars().count())
    } else {
        raw.clone()
    }
}

fn draw_form(f: &mut Frame, state: &AppState) {
    let is_login = state.screen() == Screen::Login;
    let title = if is_login {
        t!("login_title")
    } else {
        t!("register_title")
    };

    let fields = state.fields();
    let height = (fields.len() as u16) * 3 + 4;
    let outer = centered_rect(60, 100, f.area());
    let area = Rect {
        y: outer.y + outer.height.saturating_sub(height) / 2,
        height: height.min(outer.height),
        ..outer
    };

    let block = Block::default()
        .title(format!(" {} ", title))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(hex(color_utils::PRIMARY)));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            fields
                .iter()
                .map(|field| {
                    if field.is_text() {
                        Constraint::Length(3)
                    } else {
                        Constraint::Length(2)
                    }
                })
                .chain(std::iter::once(Constraint::Min(0))),
        )
        .split(inner);

    let focused = state.focused_field();
    for (idx, field) in fields.iter().enumerate() {
        let row = rows[idx];
        let is_focused = focused == Some(*field);
        let accent = if is_focused {
            Style::default().fg(hex(color_utils::PRIMARY))
        } else {
            Style::default().fg(hex(color_utils::MUTED))
        };

        match field {
            Field::Name | Field::Email | Field::Password => {
                let value = field_value(state, *field);
                let p = Paragraph::new(value.as_str()).block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(format!(" {} ", field_label(*field)))
                        .border_style(accent),
                );
                f.render_widget(p, row);

                if is_focused && state.alert.is_none() {
                    let width = value.width() as u16;
                    let max_x = row.x + row.width.saturating_sub(2);
                    f.set_cursor_position(((row.x + 1 + width).min(max_x), row.y + 1));
                }
            }
            Field::Submit => {
                let label = if state.pending_request {
                    t!("please_wait")
                } else if is_login {
                    t!("login_button")
                } else {
                    t!("register_button")
                };
                let style = if is_focused {
                    Style::default()
                        .fg(Color::White)
                        .bg(hex(color_utils::PRIMARY))
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(hex(color_utils::PRIMARY))
                };
                let p = Paragraph::new(Line::from(Span::styled(format!(" {} ", label), style)))
                    .alignment(Alignment::Center);
                f.render_widget(p, row);
            }
            Field::SwitchScreen => {
                let label = if is_login {
                    t!("goto_register")
                } else {
                    t!("goto_login")
                };
                let mut style = Style::default().fg(hex(color_utils::PRIMARY));
                if is_focused {
                    style = style.add_modifier(Modifier::UNDERLINED | Modifier::BOLD);
                }
                let p = Paragraph::new(Line::from(Span::styled(label.to_string(), style)))
                    .alignment(Alignment::Center);
                f.render_widget(p, row);
            }
        }
    }

    let hint = Paragraph::new(t!("form_hint").to_string())
        .style(Style::default().fg(hex(color_utils::MUTED)))
        .alignment(Alignment::Center);
    if let Some(last) = rows.last() {
        f.render_widget(hint, *last);
    }
}

// --- DASHBOARD ---

fn draw_dashboard(f: &mut Frame, state: &AppState) {
    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(f.area());

    let render = state.dashboard.render();
    match &render {
        DashboardRender::Loading => {
            let p = Paragraph::new(t!("loading").to_string())
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title(title_line(false)));
            f.render_widget(p, v_chunks[0]);
        }
        DashboardRender::Error {
            message,
            refreshing,
        } => {
            let p = Paragraph::new(Line::from(Span::styled(
                message.as_str(),
                Style::default().fg(hex(color_utils::ERROR)),
            )))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title_line(*refreshing)),
            );
            f.render_widget(p, v_chunks[0]);
        }
        DashboardRender::Content {
            sections,
            refreshing,
        } => draw_sections(f, v_chunks[0], sections, *refreshing, state.scroll),
    }

    let help = Paragraph::new(t!("dashboard_hint").to_string())
        .style(Style::default().fg(hex(color_utils::MUTED)))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, v_chunks[1]);
}

fn title_line(refreshing: bool) -> Line<'static> {
    let mut spans = vec![Span::styled(
        format!(" {} ", t!("app_name")),
        Style::default()
            .fg(hex(color_utils::PRIMARY))
            .add_modifier(Modifier::BOLD),
    )];
    if refreshing {
        spans.push(Span::styled(
            format!("({}) ", t!("refreshing")),
            Style::default().fg(hex(color_utils::WARNING)),
        ));
    }
    Line::from(spans)
}

fn draw_sections(
    f: &mut Frame,
    area: Rect,
    sections: &DashboardSections,
    refreshing: bool,
    scroll: u16,
) {
    let outer = Block::default()
        .borders(Borders::ALL)
        .title(title_line(refreshing));
    let inner = outer.inner(area);
    f.render_widget(outer, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
        ])
        .split(inner);

    draw_tasks(f, chunks[0], &sections.tasks, scroll);

    let goal_block = Block::default()
        .borders(Borders::TOP)
        .title(format!(" {} ", t!("section_goals")));
    match &sections.goals {
        Section::Ready(chart) => draw_goal_chart(f, chunks[1], goal_block, chart),
        Section::Empty(p) => draw_placeholder(f, chunks[1], goal_block, p),
    }

    let stats_block = Block::default()
        .borders(Borders::TOP)
        .title(format!(" {} ", t!("section_stats")));
    match &sections.stats {
        Section::Ready(chart) => draw_stats_chart(f, chunks[2], stats_block, chart),
        Section::Empty(p) => draw_placeholder(f, chunks[2], stats_block, p),
    }
}

fn draw_placeholder(f: &mut Frame, area: Rect, block: Block, placeholder: &Placeholder) {
    let mut lines = vec![Line::from(Span::styled(
        placeholder.text.clone(),
        Style::default().fg(hex(color_utils::MUTED)),
    ))];
    if let Some(hint) = &placeholder.hint {
        lines.push(Line::from(Span::styled(
            hint.clone(),
            Style::default()
                .fg(hex(color_utils::MUTED))
                .add_modifier(Modifier::ITALIC),
        )));
    }
    let p = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(block);
    f.render_widget(p, area);
}

fn draw_tasks(f: &mut Frame, area: Rect, tasks: &Section<Vec<TaskRow>>, scroll: u16) {
    let block = Block::default()
        .borders(Borders::TOP)
        .title(format!(" {} ", t!("section_tasks")));

    let rows = match tasks {
        Section::Ready(rows) => rows,
        Section::Empty(p) => return draw_placeholder(f, area, block, p),
    };

    let lines: Vec<Line> = rows
        .iter()
        .map(|row| {
            Line::from(vec![
                Span::raw(" • "),
                Span::styled(
                    row.title.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  [{}]", row.status),
                    Style::default().fg(hex(color_utils::PRIMARY)),
                ),
                Span::styled(
                    format!("  {}", row.due),
                    Style::default().fg(hex(color_utils::MUTED)),
                ),
            ])
        })
        .collect();

    let max_scroll = (lines.len() as u16).saturating_sub(1);
    let p = Paragraph::new(lines)
        .block(block)
        .scroll((scroll.min(max_scroll), 0));
    f.render_widget(p, area);
}

fn draw_goal_chart(f: &mut Frame, area: Rect, block: Block, chart: &GoalChart) {
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);

    let colors = [hex(color_utils::SUCCESS), hex(color_utils::MUTED)];
    let bars: Vec<Bar> = chart
        .bars()
        .into_iter()
        .zip(colors)
        .map(|((label, value), color)| {
            Bar::default()
                .value(value.max(0.0).round() as u64)
                .text_value(format_count(value))
                .label(Line::from(label))
                .style(Style::default().fg(color))
        })
        .collect();
    let bar_chart = BarChart::default()
        .data(BarGroup::default().bars(&bars))
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(1);
    f.render_widget(bar_chart, chunks[0]);

    let percent = chart.progress.clamp(0.0, 100.0).round() as u16;
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(hex(color_utils::PRIMARY)))
        .percent(percent)
        .label(chart.progress_label());
    f.render_widget(gauge, chunks[1]);
}

fn draw_stats_chart(f: &mut Frame, area: Rect, block: Block, chart: &StatsChart) {
    let bars: Vec<Bar> = chart
        .slices
        .iter()
        .map(|slice| {
            Bar::default()
                .value(slice.value.round() as u64)
                .text_value(format_count(slice.value))
                .label(Line::from(slice.label.clone()))
                .style(Style::default().fg(hex(slice.color)))
        })
        .collect();
    let bar_chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(10)
        .bar_gap(3);
    f.render_widget(bar_chart, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
