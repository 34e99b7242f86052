// File: ./src/tui/state.rs
// Manages the application state for the TUI.
use crate::auth::{Alert, LoginForm, RegisterForm};
use crate::dashboard::Dashboard;
use crate::navigation::{Navigator, Screen, SplashTimer};
use crate::tui::action::Action;

/// Focusable elements of the login/register forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Password,
    Submit,
    /// "No account yet? Register" / "Already have an account? Log in"
    SwitchScreen,
}

impl Field {
    pub fn is_text(&self) -> bool {
        matches!(self, Field::Name | Field::Email | Field::Password)
    }
}

const LOGIN_FIELDS: &[Field] = &[Field::Email, Field::Password, Field::Submit, Field::SwitchScreen];
const REGISTER_FIELDS: &[Field] = &[
    Field::Name,
    Field::Email,
    Field::Password,
    Field::Submit,
    Field::SwitchScreen,
];

pub struct AppState {
    // Navigation
    pub navigator: Navigator,
    pub splash: Option<SplashTimer>,

    // Forms
    pub login: LoginForm,
    pub register: RegisterForm,
    pub focus: usize,
    /// An auth request is in flight; further submits are ignored.
    pub pending_request: bool,

    // Dashboard
    pub dashboard: Dashboard,
    pub scroll: u16,

    // Modal alert; blocks all other input while shown.
    pub alert: Option<Alert>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            navigator: Navigator::new(Screen::Splash),
            splash: None,
            login: LoginForm::default(),
            register: RegisterForm::default(),
            focus: 0,
            pending_request: false,
            dashboard: Dashboard::new(),
            scroll: 0,
            alert: None,
        }
    }

    pub fn screen(&self) -> Screen {
        self.navigator.current()
    }

    pub fn fields(&self) -> &'static [Field] {
        match self.screen() {
            Screen::Login => LOGIN_FIELDS,
            Screen::Register => REGISTER_FIELDS,
            Screen::Splash | Screen::Home => &[],
        }
    }

    pub fn focused_field(&self) -> Option<Field> {
        self.fields().get(self.focus).copied()
    }

    pub fn focus_next(&mut self) {
        let len = self.fields().len();
        if len > 0 {
            self.focus = (self.focus + 1) % len;
        }
    }

    pub fn focus_previous(&mut self) {
        let len = self.fields().len();
        if len > 0 {
            self.focus = (self.focus + len - 1) % len;
        }
    }

    /// The text buffer behind the focused field, if it is a text field.
    pub fn focused_input_mut(&mut self) -> Option<&mut String> {
        let field = self.focused_field()?;
        match (self.screen(), field) {
            (Screen::Login, Field::Email) => Some(&mut self.login.email),
            (Screen::Login, Field::Password) => Some(&mut self.login.password),
            (Screen::Register, Field::Name) => Some(&mut self.register.name),
            (Screen::Register, Field::Email) => Some(&mut self.register.email),
            (Screen::Register, Field::Password) => Some(&mut self.register.password),
            _ => None,
        }
    }

    // --- NAVIGATION ---
    // Each returns the action the newly entered screen needs, if any.

    pub fn replace_screen(&mut self, screen: Screen) -> Option<Action> {
        self.navigator.replace(screen);
        self.on_enter()
    }

    pub fn navigate_to(&mut self, screen: Screen) -> Option<Action> {
        self.navigator.navigate(screen);
        self.on_enter()
    }

    pub fn go_back(&mut self) -> Option<Action> {
        if self.navigator.go_back() {
            self.on_enter()
        } else {
            None
        }
    }

    fn on_enter(&mut self) -> Option<Action> {
        self.focus = 0;
        let screen = self.screen();
        if screen != Screen::Splash
            && let Some(mut timer) = self.splash.take()
        {
            timer.cancel();
        }
        match screen {
            Screen::Home => {
                self.scroll = 0;
                Some(Action::FetchDashboard(self.dashboard.mount()))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_wraps() {
        let mut state = AppState::new();
        state.navigator.replace(Screen::Login);
        state.focus_previous();
        assert_eq!(state.focused_field(), Some(Field::SwitchScreen));
        state.focus_next();
        assert_eq!(state.focused_field(), Some(Field::Email));
    }

    #[test]
    fn test_entering_home_mounts_dashboard() {
        let mut state = AppState::new();
        let action = state.replace_screen(Screen::Home);
        assert!(matches!(action, Some(Action::FetchDashboard(t)) if t.cycle == 1));
        assert!(state.dashboard.is_loading());
    }
}
