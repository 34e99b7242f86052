// File: tests/tui_network.rs
#![cfg(feature = "tui")]
use mockito::Server;
use plancraft::auth::LoginForm;
use plancraft::client::ApiClient;
use plancraft::config::DashboardConfig;
use plancraft::dashboard::{FetchMode, FetchOrchestrator, FetchTicket};
use plancraft::session::{MemorySessionStore, SessionStore};
use plancraft::tui::action::{Action, AppEvent};
use plancraft::tui::network::run_network_actor;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

struct Harness {
    session: Arc<MemorySessionStore>,
    action_tx: mpsc::Sender<Action>,
    event_rx: mpsc::Receiver<AppEvent>,
}

fn spawn_actor(url: &str) -> Harness {
    let session = Arc::new(MemorySessionStore::new());
    let client = ApiClient::new(url, session.clone(), Duration::from_secs(5))
        .expect("Client creation failed");
    let orchestrator = Arc::new(FetchOrchestrator::new(
        client.clone(),
        DashboardConfig::default(),
    ));
    let (action_tx, action_rx) = mpsc::channel(10);
    let (event_tx, event_rx) = mpsc::channel(10);

    tokio::spawn(run_network_actor(
        client,
        session.clone(),
        orchestrator,
        action_rx,
        event_tx,
    ));
    Harness {
        session,
        action_tx,
        event_rx,
    }
}

async fn next_event(rx: &mut mpsc::Receiver<AppEvent>) -> AppEvent {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("Timed out waiting for event")
        .expect("Actor dropped the channel")
}

#[tokio::test]
async fn test_login_then_dashboard_then_logout() {
    let mut server = Server::new_async().await;
    let _login = server
        .mock("POST", "/api/auth/login")
        .with_status(200)
        .with_body(r#"{"token":"jwt-1"}"#)
        .create_async()
        .await;
    let stats = server
        .mock("GET", "/api/tasks/statistics")
        .match_header("authorization", "Bearer jwt-1")
        .with_status(200)
        .with_body(r#"{"completed":5,"pending":2,"overdue":1}"#)
        .create_async()
        .await;

    let mut h = spawn_actor(&server.url());

    h.action_tx
        .send(Action::Login(LoginForm::new("a@b.c", "pw")))
        .await
        .unwrap();
    assert!(matches!(next_event(&mut h.event_rx).await, AppEvent::LoggedIn(_)));
    assert_eq!(h.session.load().unwrap().as_deref(), Some("jwt-1"));

    let ticket = FetchTicket {
        cycle: 1,
        mode: FetchMode::Initial,
    };
    h.action_tx
        .send(Action::FetchDashboard(ticket))
        .await
        .unwrap();
    match next_event(&mut h.event_rx).await {
        AppEvent::DashboardSettled(t, Ok(data)) => {
            assert_eq!(t, ticket);
            assert_eq!(data.task_stats.map(|s| s.total()), Some(8.0));
        }
        other => panic!("expected settled dashboard, got {:?}", other),
    }
    stats.assert();

    h.action_tx.send(Action::Logout).await.unwrap();
    assert!(matches!(next_event(&mut h.event_rx).await, AppEvent::LoggedOut));
    assert_eq!(h.session.load().unwrap(), None);

    h.action_tx.send(Action::Quit).await.unwrap();
}

#[tokio::test]
async fn test_failed_login_reports_alert() {
    let mut server = Server::new_async().await;
    let _login = server
        .mock("POST", "/api/auth/login")
        .with_status(401)
        .with_body(r#"{"message":"Wrong password"}"#)
        .create_async()
        .await;

    let mut h = spawn_actor(&server.url());
    h.action_tx
        .send(Action::Login(LoginForm::new("a@b.c", "bad")))
        .await
        .unwrap();

    match next_event(&mut h.event_rx).await {
        AppEvent::LoginFailed(alert) => assert_eq!(alert.message, "Wrong password"),
        other => panic!("expected login failure, got {:?}", other),
    }
    assert_eq!(h.session.load().unwrap(), None);
}
