// Manages background network operations for the TUI.
use crate::auth;
use crate::client::ApiClient;
use crate::dashboard::FetchOrchestrator;
use crate::session::SessionStore;
use crate::tui::action::{Action, AppEvent};
use std::sync::Arc;
use tokio::sync::mpsc::{Receiver, Sender};

/// Processes UI actions until `Quit` or until the UI drops its sender.
///
/// Auth requests are handled inline. Dashboard cycles are spawned onto the
/// orchestrator, which serializes them, so a slow statistics endpoint does
/// not hold up a logout.
pub async fn run_network_actor(
    client: ApiClient,
    session: Arc<dyn SessionStore>,
    orchestrator: Arc<FetchOrchestrator>,
    mut action_rx: Receiver<Action>,
    event_tx: Sender<AppEvent>,
) {
    while let Some(action) = action_rx.recv().await {
        match action {
            Action::Quit => break,

            Action::Login(form) => {
                let event = match auth::login(&client, session.as_ref(), &form).await {
                    Ok(alert) => AppEvent::LoggedIn(alert),
                    Err(alert) => AppEvent::LoginFailed(alert),
                };
                let _ = event_tx.send(event).await;
            }

            Action::Register(form) => {
                let event = match auth::register(&client, &form).await {
                    Ok(alert) => AppEvent::Registered(alert),
                    Err(alert) => AppEvent::RegisterFailed(alert),
                };
                let _ = event_tx.send(event).await;
            }

            Action::FetchDashboard(ticket) => {
                let orchestrator = orchestrator.clone();
                let tx = event_tx.clone();
                tokio::spawn(async move {
                    if let Some(result) = orchestrator.run(ticket).await {
                        let _ = tx.send(AppEvent::DashboardSettled(ticket, result)).await;
                    }
                });
            }

            Action::Logout => {
                let event = match auth::logout(session.as_ref()) {
                    Ok(()) => AppEvent::LoggedOut,
                    Err(e) => AppEvent::Error(format!("{:#}", e)),
                };
                let _ = event_tx.send(event).await;
            }
        }
    }
    log::debug!("Network actor stopped");
}
