// File: ./src/tui/mod.rs
// Entry point and main loop for the TUI application.
pub mod action;
pub mod handlers;
pub mod network;
pub mod state;
pub mod view;

use crate::client::ApiClient;
use crate::config::Config;
use crate::dashboard::FetchOrchestrator;
use crate::navigation::SplashTimer;
use crate::session::SessionStore;
use crate::tui::action::{Action, AppEvent};
use crate::tui::state::AppState;
use crate::tui::view::draw;

use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{io, sync::Arc, time::Duration};
use tokio::sync::mpsc;

pub async fn run(cfg: Config, session: Arc<dyn SessionStore>) -> Result<()> {
    // --- 1. PREAMBLE ---
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        use std::io::Write;
        if let Ok(mut file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("plancraft_panic.log")
        {
            let _ = writeln!(file, "PANIC: {:?}", info);
        }
        default_hook(info);
    }));

    // Fails before the terminal is taken over, so the error stays readable.
    let client = ApiClient::new(&cfg.api_url, session.clone(), cfg.request_timeout())?;
    let orchestrator = Arc::new(FetchOrchestrator::new(
        client.clone(),
        cfg.dashboard.clone(),
    ));
    log::info!("Starting TUI against {}", client.base_url());

    // --- 2. TERMINAL SETUP ---
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // --- 3. STATE INIT ---
    let mut app_state = AppState::new();

    let (action_tx, action_rx) = mpsc::channel(10);
    let (event_tx, mut event_rx) = mpsc::channel(10);

    app_state.splash = Some(SplashTimer::start(
        cfg.splash_delay(),
        event_tx.clone(),
        AppEvent::SplashElapsed,
    ));

    // --- 4. NETWORK THREAD ---
    tokio::spawn(network::run_network_actor(
        client,
        session,
        orchestrator,
        action_rx,
        event_tx,
    ));

    // --- 5. UI LOOP ---
    let loop_result = async {
        loop {
            terminal.draw(|f| draw(f, &app_state))?;

            // A. Network & timer events
            while let Ok(event) = event_rx.try_recv() {
                if let Some(action) = handlers::handle_app_event(&mut app_state, event) {
                    let _ = action_tx.send(action).await;
                }
            }

            // B. Input events
            if event::poll(Duration::from_millis(50))? {
                let Event::Key(key) = event::read()? else {
                    continue;
                };
                // Filter out KeyRelease events to prevent double input on Windows
                if key.kind == event::KeyEventKind::Release {
                    continue;
                }

                if let Some(action) = handlers::handle_key_event(key, &mut app_state) {
                    if matches!(action, Action::Quit) {
                        let _ = action_tx.send(Action::Quit).await;
                        break;
                    }
                    let _ = action_tx.send(action).await;
                }
            }
        }
        Ok::<(), anyhow::Error>(())
    }
    .await;

    // --- 6. CLEANUP ---
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    log::info!("TUI closed");
    loop_result
}
