// File: tests/dashboard_flow.rs
use mockito::Server;
use plancraft::client::ApiClient;
use plancraft::config::DashboardConfig;
use plancraft::dashboard::{
    Dashboard, DashboardRender, FetchMode, FetchOrchestrator, FetchTicket, Section, ViewState,
};
use plancraft::session::MemorySessionStore;
use serial_test::serial;
use std::sync::Arc;
use std::time::Duration;

fn orchestrator(url: &str, sections: DashboardConfig) -> Arc<FetchOrchestrator> {
    let client = ApiClient::new(
        url,
        Arc::new(MemorySessionStore::with_token("tok")),
        Duration::from_secs(5),
    )
    .expect("Client creation failed");
    Arc::new(FetchOrchestrator::new(client, sections))
}

#[tokio::test]
#[serial]
async fn test_valid_statistics_reach_content_with_chart() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/tasks/statistics")
        .with_status(200)
        .with_body(r#"{"completed":5,"pending":2,"overdue":1}"#)
        .create_async()
        .await;
    // Extension endpoints stay untouched by default.
    let today = server
        .mock("GET", "/api/tasks/today")
        .expect(0)
        .create_async()
        .await;
    let goals = server
        .mock("GET", "/api/goals/stats")
        .expect(0)
        .create_async()
        .await;

    let orch = orchestrator(&server.url(), DashboardConfig::default());
    let mut dash = Dashboard::new();
    let ticket = dash.mount();
    let result = orch.run(ticket).await.expect("cycle should run");
    assert!(dash.settle(ticket, result));

    let render = dash.render();
    let chart = render.stats_chart().expect("chart should render");
    assert_eq!(chart.values(), vec![5.0, 2.0, 1.0]);
    assert_eq!(chart.total(), 8.0);

    // Sections that were not requested show their placeholders.
    match &render {
        DashboardRender::Content { sections, refreshing } => {
            assert!(!refreshing);
            assert!(matches!(sections.tasks, Section::Empty(_)));
            assert!(matches!(sections.goals, Section::Empty(_)));
        }
        other => panic!("expected content, got {:?}", other),
    }

    mock.assert();
    today.assert();
    goals.assert();
}

#[tokio::test]
#[serial]
async fn test_negative_statistics_reach_error_without_chart() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/api/tasks/statistics")
        .with_status(200)
        .with_body(r#"{"completed":-1,"pending":2,"overdue":1}"#)
        .create_async()
        .await;

    let orch = orchestrator(&server.url(), DashboardConfig::default());
    let mut dash = Dashboard::new();
    let ticket = dash.mount();
    let result = orch.run(ticket).await.unwrap();
    dash.settle(ticket, result);

    assert!(matches!(dash.state(), ViewState::Error(_)));
    assert!(dash.render().stats_chart().is_none());
    assert!(matches!(dash.render(), DashboardRender::Error { .. }));
}

#[tokio::test]
#[serial]
async fn test_unauthorized_shows_server_message() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/api/tasks/statistics")
        .with_status(401)
        .with_body(r#"{"message":"Invalid token"}"#)
        .create_async()
        .await;

    let orch = orchestrator(&server.url(), DashboardConfig::default());
    let mut dash = Dashboard::new();
    let ticket = dash.mount();
    let result = orch.run(ticket).await.unwrap();
    dash.settle(ticket, result);

    assert_eq!(dash.state(), &ViewState::Error("Invalid token".to_string()));
    assert_eq!(dash.render().to_string().trim(), "Invalid token");
}

#[tokio::test]
#[serial]
async fn test_server_error_without_message_shows_status() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/api/tasks/statistics")
        .with_status(500)
        .create_async()
        .await;

    let orch = orchestrator(&server.url(), DashboardConfig::default());
    let result = orch.fetch_cycle().await;
    assert_eq!(
        result.unwrap_err(),
        "Request failed with status code 500"
    );
}

#[tokio::test]
#[serial]
async fn test_enabled_sections_are_fetched_and_validated() {
    let mut server = Server::new_async().await;
    let today = server
        .mock("GET", "/api/tasks/today")
        .with_status(200)
        .with_body(
            r#"[{"id":"1","title":"Write report","status":"pending","dueDate":"2026-10-17T09:00:00Z"}]"#,
        )
        .create_async()
        .await;
    let goals = server
        .mock("GET", "/api/goals/stats")
        .with_status(200)
        .with_body(r#"{"total":10,"completed":4,"progress":40}"#)
        .create_async()
        .await;
    let stats = server
        .mock("GET", "/api/tasks/statistics")
        .with_status(200)
        .with_body(r#"{"completed":0,"pending":0,"overdue":0}"#)
        .create_async()
        .await;

    let sections = DashboardConfig {
        tasks_today: true,
        goal_stats: true,
    };
    let orch = orchestrator(&server.url(), sections);
    let data = orch.fetch_cycle().await.unwrap();

    assert_eq!(data.tasks.len(), 1);
    assert_eq!(data.tasks[0].title, "Write report");
    assert_eq!(data.goal_stats.map(|g| g.remaining()), Some(6.0));

    let mut dash = Dashboard::new();
    let ticket = dash.mount();
    dash.settle(ticket, Ok(data));
    let text = dash.render().to_string();
    assert!(text.contains("Write report"));
    assert!(text.contains("Due: 2026-10-17"));
    assert!(text.contains("Progress: 40.0%"));

    today.assert();
    goals.assert();
    stats.assert();
}

#[tokio::test]
#[serial]
async fn test_invalid_goal_stats_abort_the_cycle() {
    let mut server = Server::new_async().await;
    let _goals = server
        .mock("GET", "/api/goals/stats")
        .with_status(200)
        .with_body(r#"{"total":1,"completed":4,"progress":40}"#)
        .create_async()
        .await;
    let stats = server
        .mock("GET", "/api/tasks/statistics")
        .expect(0)
        .create_async()
        .await;

    let sections = DashboardConfig {
        tasks_today: false,
        goal_stats: true,
    };
    let orch = orchestrator(&server.url(), sections);
    assert!(orch.fetch_cycle().await.is_err());
    stats.assert();
}

#[tokio::test]
#[serial]
async fn test_double_refresh_never_shows_loading() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/api/tasks/statistics")
        .with_status(200)
        .with_body(r#"{"completed":3,"pending":1,"overdue":0}"#)
        .create_async()
        .await;

    let orch = orchestrator(&server.url(), DashboardConfig::default());
    let mut dash = Dashboard::new();
    let first = dash.mount();
    let result = orch.run(first).await.unwrap();
    dash.settle(first, result);

    let r1 = dash.refresh().expect("refresh allowed after settle");
    assert!(!dash.is_loading());
    let r2 = dash.refresh().expect("second refresh allowed");
    assert!(!dash.is_loading());
    assert!(dash.is_refreshing());

    let (a, b) = tokio::join!(orch.run(r1), orch.run(r2));
    for (ticket, result) in [(r1, a), (r2, b)] {
        if let Some(result) = result {
            dash.settle(ticket, result);
        }
        assert!(!matches!(dash.render(), DashboardRender::Loading));
    }

    assert!(!dash.is_refreshing());
    assert_eq!(
        dash.render().stats_chart().map(|c| c.values()),
        Some(vec![3.0, 1.0, 0.0])
    );
}

#[tokio::test]
async fn test_superseded_ticket_is_skipped() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/tasks/statistics")
        .with_status(200)
        .with_body(r#"{"completed":1,"pending":1,"overdue":1}"#)
        .expect(1)
        .create_async()
        .await;

    let orch = orchestrator(&server.url(), DashboardConfig::default());
    let old = FetchTicket {
        cycle: 1,
        mode: FetchMode::Refresh,
    };
    let new = FetchTicket {
        cycle: 2,
        mode: FetchMode::Refresh,
    };

    // The newer ticket registers first, so the older one is dropped unrun.
    assert!(orch.run(new).await.is_some());
    assert!(orch.run(old).await.is_none());
    mock.assert();
}
