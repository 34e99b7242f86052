// Defines actions and events for TUI interaction and state updates.
use crate::auth::{Alert, LoginForm, RegisterForm};
use crate::dashboard::{CycleResult, FetchTicket};

/// Requests from the UI loop to the network actor.
#[derive(Debug)]
pub enum Action {
    Login(LoginForm),
    Register(RegisterForm),
    FetchDashboard(FetchTicket),
    Logout,
    Quit,
}

/// Replies from the network actor and timers to the UI loop.
#[derive(Debug)]
pub enum AppEvent {
    LoggedIn(Alert),
    LoginFailed(Alert),
    Registered(Alert),
    RegisterFailed(Alert),
    DashboardSettled(FetchTicket, CycleResult),
    LoggedOut,
    SplashElapsed,
    Error(String),
}
