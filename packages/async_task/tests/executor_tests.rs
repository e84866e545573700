//! Executor dispatch tests: runtime and thread paths, concurrency limit, failures

use async_task::{BlockingExecutor, ExecutorConfig, TaskError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_spawn_inside_runtime() {
    let executor = BlockingExecutor::default();
    let result = executor.spawn(|| (1..=10u64).product::<u64>()).await;
    assert_eq!(result, Ok(3_628_800));
}

#[test]
fn test_spawn_without_runtime_uses_worker_thread() {
    let executor = BlockingExecutor::new(ExecutorConfig::default().with_thread_name("test-worker"));
    let handle = executor.spawn(|| std::thread::current().name().map(str::to_owned));
    let name = tokio_test::block_on(handle).expect("job should complete");
    assert_eq!(name.as_deref(), Some("test-worker"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrency_limit_is_respected() {
    let executor = BlockingExecutor::new(ExecutorConfig::default().with_max_concurrent_tasks(2));
    let running = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let running = Arc::clone(&running);
            let peak = Arc::clone(&peak);
            executor.spawn(move || {
                let now = running.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                std::thread::sleep(Duration::from_millis(20));
                running.fetch_sub(1, Ordering::SeqCst);
            })
        })
        .collect();

    for result in futures::future::join_all(handles).await {
        assert_eq!(result, Ok(()));
    }
    assert!(peak.load(Ordering::SeqCst) <= 2);
    assert_eq!(executor.available_slots(), 2);
}

#[tokio::test]
async fn test_slot_is_released_before_result_arrives() {
    let executor = BlockingExecutor::new(ExecutorConfig::default().with_max_concurrent_tasks(1));
    for value in 0..20u32 {
        assert_eq!(executor.spawn(move || value + 1).await, Ok(value + 1));
        assert_eq!(executor.available_slots(), 1, "job {value}");
    }
}

#[tokio::test]
async fn test_panicking_job_reports_dropped() {
    let executor = BlockingExecutor::default();
    let result: Result<u8, _> = executor
        .spawn(|| panic!("job failure injected by test"))
        .await;
    assert_eq!(result, Err(TaskError::Dropped));
}

#[tokio::test]
async fn test_timeout_leaves_job_running() {
    let executor = BlockingExecutor::default();
    let finished = Arc::new(AtomicUsize::new(0));
    let flag = Arc::clone(&finished);

    let result = executor
        .spawn(move || {
            std::thread::sleep(Duration::from_millis(150));
            flag.fetch_add(1, Ordering::SeqCst);
        })
        .with_timeout(Duration::from_millis(10))
        .await;
    assert_eq!(result, Err(TaskError::Timeout(Duration::from_millis(10))));

    tokio::time::sleep(Duration::from_millis(400)).await;
    assert_eq!(finished.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_metrics_track_completed_jobs() {
    let executor = BlockingExecutor::default();
    for value in 0..3u32 {
        assert_eq!(executor.spawn(move || value * 2).await, Ok(value * 2));
    }

    let metrics = executor.metrics();
    assert_eq!(metrics.tasks_dispatched, 3);
    assert_eq!(metrics.tasks_completed, 3);
}

#[test]
fn test_metrics_start_empty() {
    let metrics = BlockingExecutor::default().metrics();
    assert_eq!(metrics.tasks_completed, 0);
    assert_eq!(metrics.average_execution_time, Duration::ZERO);
}
