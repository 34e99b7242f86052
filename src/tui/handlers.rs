// File: src/tui/handlers.rs
// Handles keyboard input and background events for the TUI.
use crate::navigation::Screen;
use crate::tui::action::{Action, AppEvent};
use crate::tui::state::{AppState, Field};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub fn handle_app_event(state: &mut AppState, event: AppEvent) -> Option<Action> {
    match event {
        AppEvent::SplashElapsed => {
            state.splash = None;
            if state.screen() == Screen::Splash {
                return state.replace_screen(Screen::Login);
            }
            None
        }
        AppEvent::LoggedIn(alert) => {
            state.pending_request = false;
            state.login.password.clear();
            state.alert = Some(alert);
            state.replace_screen(Screen::Home)
        }
        AppEvent::LoginFailed(alert) | AppEvent::RegisterFailed(alert) => {
            state.pending_request = false;
            state.alert = Some(alert);
            None
        }
        AppEvent::Registered(alert) => {
            state.pending_request = false;
            state.register = Default::default();
            state.alert = Some(alert);
            state.navigate_to(Screen::Login)
        }
        AppEvent::DashboardSettled(ticket, result) => {
            if !state.dashboard.settle(ticket, result) {
                log::debug!("Dropped stale dashboard result for cycle {}", ticket.cycle);
            }
            None
        }
        // The dashboard keeps its cycle counter so results from before the
        // logout can never settle into the next session.
        AppEvent::LoggedOut => state.replace_screen(Screen::Login),
        AppEvent::Error(msg) => {
            state.pending_request = false;
            state.alert = Some(crate::auth::Alert::error(msg));
            None
        }
    }
}

pub fn handle_key_event(key: KeyEvent, state: &mut AppState) -> Option<Action> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Action::Quit);
    }

    // --- ALERT INTERCEPTION ---
    if state.alert.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            state.alert = None;
        }
        return None;
    }

    match state.screen() {
        Screen::Splash => {
            state.splash = None;
            state.replace_screen(Screen::Login)
        }
        Screen::Login | Screen::Register => handle_form_key(key, state),
        Screen::Home => handle_dashboard_key(key, state),
    }
}

fn handle_form_key(key: KeyEvent, state: &mut AppState) -> Option<Action> {
    match key.code {
        KeyCode::Tab | KeyCode::Down => state.focus_next(),
        KeyCode::BackTab | KeyCode::Up => state.focus_previous(),
        KeyCode::Esc => {
            return match state.screen() {
                Screen::Register if state.navigator.stack().len() > 1 => state.go_back(),
                Screen::Register => state.replace_screen(Screen::Login),
                _ => Some(Action::Quit),
            };
        }
        KeyCode::Enter => match state.focused_field() {
            Some(Field::SwitchScreen) => {
                let target = if state.screen() == Screen::Login {
                    Screen::Register
                } else {
                    Screen::Login
                };
                return state.navigate_to(target);
            }
            Some(Field::Submit) | None => return submit(state),
            // Enter in a text field moves on, the last one submits.
            Some(_) => {
                if state.fields().get(state.focus + 1) == Some(&Field::Submit) {
                    return submit(state);
                }
                state.focus_next();
            }
        },
        KeyCode::Char(c) => {
            if let Some(input) = state.focused_input_mut() {
                input.push(c);
            }
        }
        KeyCode::Backspace => {
            if let Some(input) = state.focused_input_mut() {
                input.pop();
            }
        }
        _ => {}
    }
    None
}

fn submit(state: &mut AppState) -> Option<Action> {
    if state.pending_request {
        return None;
    }
    let validation = match state.screen() {
        Screen::Login => state
            .login
            .validate()
            .map(|_| Action::Login(state.login.clone())),
        Screen::Register => state
            .register
            .validate()
            .map(|_| Action::Register(state.register.clone())),
        _ => return None,
    };
    match validation {
        Ok(action) => {
            state.pending_request = true;
            Some(action)
        }
        Err(alert) => {
            state.alert = Some(alert);
            None
        }
    }
}

fn handle_dashboard_key(key: KeyEvent, state: &mut AppState) -> Option<Action> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('r') | KeyCode::F(5) => state.dashboard.refresh().map(Action::FetchDashboard),
        KeyCode::Char('L') => Some(Action::Logout),
        KeyCode::Char('j') | KeyCode::Down => {
            let last_row = state.dashboard.render().task_row_count().saturating_sub(1);
            let max = u16::try_from(last_row).unwrap_or(u16::MAX);
            state.scroll = state.scroll.saturating_add(1).min(max);
            None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.scroll = state.scroll.saturating_sub(1);
            None
        }
        KeyCode::Home => {
            state.scroll = 0;
            None
        }
        _ => None,
    }
}
