use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;

use task_deadline::delay::random_between;
use task_deadline::{with_deadline, DeadlineError, Outcome};

#[tokio::test]
async fn source_beats_deadline() {
    let source = tokio::spawn(async {
        sleep(Duration::from_millis(50)).await;
        42
    });

    match with_deadline(source, Duration::from_millis(250)).await {
        Outcome::Completed(value) => assert_eq!(value, 42),
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[tokio::test]
async fn deadline_beats_source() {
    let delay = random_between(Duration::from_millis(300), Duration::from_millis(500));
    let source = tokio::spawn(async move {
        sleep(delay).await;
        0
    });

    let outcome = with_deadline(source, Duration::from_millis(250)).await;
    assert!(matches!(outcome, Outcome::Failed(DeadlineError::Elapsed)));
}

#[tokio::test]
async fn zero_duration_times_out_immediately() {
    // the task cannot have started yet on the single-threaded test runtime,
    // so the terminal-source short-circuit does not apply
    let source = tokio::spawn(async { 1 });

    let outcome = with_deadline(source, Duration::ZERO).await;
    assert!(matches!(outcome, Outcome::Failed(DeadlineError::Elapsed)));
}

#[tokio::test]
async fn terminal_source_short_circuits() {
    let source = tokio::spawn(async { 9 });

    while !source.is_finished() {
        tokio::task::yield_now().await;
    }

    // a terminal source wins over the zero-duration case
    match with_deadline(source, Duration::ZERO).await {
        Outcome::Completed(value) => assert_eq!(value, 9),
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[tokio::test]
async fn infinite_duration_passes_value_through() {
    let source = tokio::spawn(async {
        sleep(Duration::from_millis(20)).await;
        7
    });

    match with_deadline(source, Duration::MAX).await {
        Outcome::Completed(value) => assert_eq!(value, 7),
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[tokio::test]
async fn infinite_duration_passes_failure_through() {
    let source: tokio::task::JoinHandle<u32> = tokio::spawn(async {
        sleep(Duration::from_millis(10)).await;
        panic!("boom")
    });

    match with_deadline(source, Duration::MAX).await {
        Outcome::Failed(DeadlineError::Source(cause)) => assert!(cause.is_panic()),
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[tokio::test]
async fn source_failure_cause_is_preserved() {
    let source: tokio::task::JoinHandle<u32> = tokio::spawn(async { panic!("boom") });

    match with_deadline(source, Duration::from_millis(250)).await {
        Outcome::Failed(DeadlineError::Source(cause)) => {
            assert!(cause.is_panic());
            let payload = cause.into_panic();
            assert_eq!(payload.downcast_ref::<&str>(), Some(&"boom"));
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[tokio::test]
async fn source_cancellation_passes_through() {
    let source = tokio::spawn(async {
        sleep(Duration::from_secs(10)).await;
        0
    });
    source.abort();

    let outcome = with_deadline(source, Duration::from_millis(250)).await;
    assert!(matches!(outcome, Outcome::Canceled));
}

#[tokio::test]
async fn source_keeps_running_after_timeout() {
    let finished = Arc::new(AtomicBool::new(false));

    let flag = finished.clone();
    let source = tokio::spawn(async move {
        sleep(Duration::from_millis(100)).await;
        flag.store(true, Ordering::SeqCst);
    });

    let outcome = with_deadline(source, Duration::from_millis(10)).await;
    assert!(matches!(outcome, Outcome::Failed(DeadlineError::Elapsed)));
    assert!(!finished.load(Ordering::SeqCst));

    // the source was detached, not cancelled, and runs to completion
    sleep(Duration::from_millis(200)).await;
    assert!(finished.load(Ordering::SeqCst));
}

#[tokio::test]
async fn unit_source_completes() {
    let source = tokio::spawn(async {
        sleep(Duration::from_millis(10)).await;
    });

    let outcome = with_deadline(source, Duration::from_millis(250)).await;
    assert!(matches!(outcome, Outcome::Completed(())));
}
