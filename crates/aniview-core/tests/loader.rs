use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use aniview_core::{FetchError, LoadController, LoadState};
use tokio::time::sleep;

#[tokio::test(start_paused = true)]
async fn latest_request_wins_under_burst() {
    let controller = LoadController::new(|key: u32| async move {
        sleep(Duration::from_millis(10)).await;
        Ok(key * 10)
    });
    let mut rx = controller.observe();
    assert!(rx.borrow().is_idle());

    for key in 1..=5 {
        controller.request(key).unwrap();
    }

    let state = rx.wait_for(|s| s.is_settled()).await.unwrap().clone();
    assert_eq!(state, LoadState::Success(50));
    assert_eq!(controller.current_key(), Some(5));
}

#[tokio::test(start_paused = true)]
async fn slow_predecessor_cannot_overwrite_newer_result() {
    let controller = LoadController::new(|key: &'static str| async move {
        let latency = if key == "slow" { 200 } else { 10 };
        sleep(Duration::from_millis(latency)).await;
        Ok(format!("{}-loaded", key))
    });
    let mut rx = controller.observe();

    controller.request("slow").unwrap();
    controller.request("fast").unwrap();

    let state = rx.wait_for(|s| s.is_settled()).await.unwrap().clone();
    assert_eq!(state, LoadState::Success("fast-loaded".to_string()));

    // Sleep past the slow fetch's horizon; the result must not flip.
    sleep(Duration::from_millis(500)).await;
    assert_eq!(
        controller.state(),
        LoadState::Success("fast-loaded".to_string())
    );
    assert_eq!(controller.current_key(), Some("fast"));
}

#[tokio::test(start_paused = true)]
async fn same_key_restarts_unconditionally() {
    let calls = Arc::new(AtomicUsize::new(0));
    let controller = LoadController::new({
        let calls = Arc::clone(&calls);
        move |key: u32| {
            let calls = Arc::clone(&calls);
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                sleep(Duration::from_millis(10)).await;
                Ok(key)
            }
        }
    });
    let mut rx = controller.observe();

    controller.request(7).unwrap();
    rx.wait_for(|s| s.is_settled()).await.unwrap();

    controller.request(7).unwrap();
    assert!(controller.state().is_loading());
    let state = rx.wait_for(|s| s.is_settled()).await.unwrap().clone();
    assert_eq!(state, LoadState::Success(7));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn dispose_during_flight_lands_on_disposed() {
    let controller = LoadController::new(|key: u32| async move {
        sleep(Duration::from_secs(3600)).await;
        Ok(key)
    });
    let mut rx = controller.observe();

    controller.request(1).unwrap();
    assert!(controller.state().is_loading());
    controller.dispose();

    let state = rx.wait_for(|s| s.is_disposed()).await.unwrap().clone();
    assert!(state.is_disposed());

    // Give the aborted task every chance to run; the state must not move.
    sleep(Duration::from_secs(7200)).await;
    assert!(controller.state().is_disposed());
}

#[tokio::test(start_paused = true)]
async fn settled_success_reaches_every_observer_once() {
    let controller = LoadController::new(|key: u32| async move {
        sleep(Duration::from_millis(5)).await;
        Ok(key + 1)
    });
    let mut first = controller.observe();
    let mut second = controller.observe();

    controller.request(41).unwrap();

    for rx in [&mut first, &mut second] {
        let state = rx.wait_for(|s| s.is_settled()).await.unwrap().clone();
        assert_eq!(state, LoadState::Success(42));
    }

    // The channel stays quiet after settlement.
    let quiet = tokio::time::timeout(Duration::from_millis(50), first.changed()).await;
    assert!(quiet.is_err());
}

#[tokio::test(start_paused = true)]
async fn network_failure_surfaces_and_retry_recovers() {
    let attempts = Arc::new(AtomicUsize::new(0));
    let controller = LoadController::new({
        let attempts = Arc::clone(&attempts);
        move |key: u32| {
            let attempts = Arc::clone(&attempts);
            async move {
                if attempts.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(FetchError::Network("connection reset".into()))
                } else {
                    Ok(key)
                }
            }
        }
    });
    let mut rx = controller.observe();

    controller.request(9).unwrap();
    let state = rx.wait_for(|s| s.is_settled()).await.unwrap().clone();
    assert_eq!(
        state,
        LoadState::Failure(FetchError::Network("connection reset".into()))
    );

    assert_eq!(controller.retry(), Ok(true));
    let state = rx.wait_for(|s| s.is_success()).await.unwrap().clone();
    assert_eq!(state, LoadState::Success(9));
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn timeout_surfaces_as_network_failure() {
    let controller = LoadController::with_timeout(
        |key: u32| async move {
            let latency = if key == 3 { 600_000 } else { 1 };
            sleep(Duration::from_millis(latency)).await;
            Ok(key)
        },
        Duration::from_millis(50),
    );
    let mut rx = controller.observe();

    controller.request(3).unwrap();
    let state = rx.wait_for(|s| s.is_settled()).await.unwrap().clone();
    match state {
        LoadState::Failure(FetchError::Network(detail)) => {
            assert!(detail.contains("timed out"), "detail: {}", detail);
        }
        other => panic!("expected network failure, got {:?}", other),
    }

    // The controller stays usable after a timeout.
    controller.request(4).unwrap();
    let state = rx.wait_for(|s| s.is_success()).await.unwrap().clone();
    assert_eq!(state, LoadState::Success(4));
}

#[tokio::test]
async fn observe_after_dispose_sees_terminal_state() {
    let controller = LoadController::new(|key: u32| async move { Ok(key) });
    controller.dispose();
    let rx = controller.observe();
    assert!(rx.borrow().is_disposed());
}

#[tokio::test(start_paused = true)]
async fn dropping_the_controller_disposes_it() {
    let controller = LoadController::new(|key: u32| async move {
        sleep(Duration::from_secs(3600)).await;
        Ok(key)
    });
    let mut rx = controller.observe();
    controller.request(5).unwrap();
    drop(controller);

    let state = rx.wait_for(|s| s.is_disposed()).await.unwrap().clone();
    assert!(state.is_disposed());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn alternating_request_storm_settles_on_last_key() {
    let controller = LoadController::new(|key: &'static str| async move {
        let jitter = rand::random::<u64>() % 3;
        sleep(Duration::from_millis(jitter)).await;
        Ok(format!("{}-loaded", key))
    });

    for i in 0..1000 {
        let key = if i % 2 == 0 { "anime" } else { "manga" };
        controller.request(key).unwrap();
    }

    let mut rx = controller.observe();
    let state = rx.wait_for(|s| s.is_settled()).await.unwrap().clone();
    assert_eq!(state, LoadState::Success("manga-loaded".to_string()));
    assert_eq!(controller.current_key(), Some("manga"));
}
