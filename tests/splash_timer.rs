// File: tests/splash_timer.rs
use plancraft::navigation::SplashTimer;
use std::time::Duration;
use tokio::sync::mpsc;

#[tokio::test]
async fn test_timer_fires_once_after_delay() {
    let (tx, mut rx) = mpsc::channel(1);
    let timer = SplashTimer::start(Duration::from_millis(20), tx, "elapsed");
    assert!(timer.is_active());

    let msg = tokio::time::timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("timer should fire");
    assert_eq!(msg, Some("elapsed"));
    // Sender is gone once the task finishes.
    assert_eq!(rx.recv().await, None);
}

#[tokio::test]
async fn test_cancelled_timer_never_fires() {
    let (tx, mut rx) = mpsc::channel(1);
    let mut timer = SplashTimer::start(Duration::from_millis(50), tx, "elapsed");
    timer.cancel();
    assert!(!timer.is_active());

    assert_eq!(rx.recv().await, None);
}

#[tokio::test]
async fn test_dropped_timer_never_fires() {
    let (tx, mut rx) = mpsc::channel(1);
    drop(SplashTimer::start(Duration::from_millis(50), tx, 1u8));
    assert_eq!(rx.recv().await, None);
}
