use regatta_config::{BoatScheduleConfig, ManagerConfig, MatchMatrixConfig, OptimizationConfig};
use regatta_test::{quick_optimization, shape};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};

use super::*;
use crate::event::PhaseKind;

fn quick_optimizer() -> Optimizer {
    Optimizer::new(shape(6, 2, 3), quick_optimization(20)).unwrap()
}

/// Runs long enough to be cancelled, checking the flag every iteration.
fn endless_optimizer() -> Optimizer {
    let config = OptimizationConfig::new()
        .with_match_matrix(MatchMatrixConfig {
            loops: usize::MAX,
            individuals: 5,
            show_every_n: Some(1),
            ..MatchMatrixConfig::default()
        })
        .with_boat_schedule(BoatScheduleConfig::default());
    Optimizer::new(shape(12, 3, 4), config).unwrap()
}

fn drain(receiver: &mut UnboundedReceiver<SolverEvent>) -> Vec<SolverEvent> {
    let mut events = Vec::new();
    while let Some(event) = receiver.blocking_recv() {
        let terminal = event.is_terminal();
        events.push(event);
        if terminal {
            break;
        }
    }
    events
}

fn manager(worker_count: usize, queue_capacity: usize) -> SolverManager {
    SolverManager::new(&ManagerConfig {
        worker_count,
        queue_capacity,
    })
    .unwrap()
}

#[test]
fn completed_run_reports_lifecycle() {
    let manager = manager(2, 10);
    let (sender, mut receiver) = unbounded_channel();
    manager.submit(7, quick_optimizer(), sender).unwrap();

    let events = drain(&mut receiver);
    assert!(matches!(events.first(), Some(SolverEvent::Started { run_id: 7 })));
    assert!(events.iter().any(|e| matches!(
        e,
        SolverEvent::PhaseStarted { phase: PhaseKind::MatchMatrix, .. }
    )));
    assert!(events.iter().any(|e| matches!(
        e,
        SolverEvent::PhaseCompleted { phase: PhaseKind::BoatSchedule, .. }
    )));
    assert!(events.iter().any(|e| matches!(e, SolverEvent::Progress { .. })));
    match events.last() {
        Some(SolverEvent::Completed { run_id, result }) => {
            assert_eq!(*run_id, 7);
            assert_eq!(result.schedule.len(), 3);
        }
        other => panic!("unexpected terminal event {other:?}"),
    }
    assert!(events.iter().all(|e| e.run_id() == 7));
    assert!(!manager.is_running(7));
}

#[test]
fn duplicate_run_is_rejected() {
    let manager = manager(1, 4);
    let (sender, mut receiver) = unbounded_channel();
    manager.submit(1, endless_optimizer(), sender.clone()).unwrap();

    assert_eq!(
        manager.submit(1, quick_optimizer(), sender),
        Err(ManagerError::AlreadyRunning(1))
    );
    assert!(manager.is_running(1));

    assert!(manager.cancel(1));
    let events = drain(&mut receiver);
    assert!(matches!(events.last(), Some(SolverEvent::Cancelled { run_id: 1 })));
    assert!(!manager.is_running(1));
    assert!(!manager.cancel(1));
}

#[test]
fn full_queue_rejects_submissions() {
    let manager = manager(1, 1);
    let (sender, mut receiver) = unbounded_channel();

    manager.submit(1, endless_optimizer(), sender.clone()).unwrap();
    // run 1 is either still queued or occupies the only worker; either way
    // the queue cannot take both run 2 and run 3
    let second = manager.submit(2, endless_optimizer(), sender.clone());
    let third = manager.submit(3, endless_optimizer(), sender.clone());
    assert_eq!(third, Err(ManagerError::QueueFull));
    assert!(!manager.is_running(3));

    manager.cancel(1);
    if second.is_ok() {
        manager.cancel(2);
    }
    drop(sender);
    let mut cancelled = 0;
    while let Some(event) = receiver.blocking_recv() {
        if matches!(event, SolverEvent::Cancelled { .. }) {
            cancelled += 1;
        }
        if cancelled == 1 + usize::from(second.is_ok()) {
            break;
        }
    }
    assert_eq!(manager.active_runs(), 0);
}

#[test]
fn drop_cancels_outstanding_runs() {
    let (sender, mut receiver) = unbounded_channel();
    {
        let manager = manager(1, 2);
        manager.submit(1, endless_optimizer(), sender.clone()).unwrap();
        manager.submit(2, endless_optimizer(), sender.clone()).unwrap();
    }
    drop(sender);

    let mut terminal = Vec::new();
    while let Some(event) = receiver.blocking_recv() {
        if event.is_terminal() {
            terminal.push(event.run_id());
        }
    }
    terminal.sort_unstable();
    assert_eq!(terminal, vec![1, 2]);
}

#[test]
fn zero_workers_is_a_config_error() {
    let err = SolverManager::new(&ManagerConfig {
        worker_count: 0,
        queue_capacity: 1,
    })
    .unwrap_err();
    assert!(matches!(err, RegattaError::Config(_)));
}

#[test]
fn panicking_run_reports_failure() {
    let event = terminal_event(5, || panic!("scorer exploded"));
    match event {
        SolverEvent::Failed { run_id, message } => {
            assert_eq!(run_id, 5);
            assert!(message.contains("scorer exploded"), "{message}");
        }
        other => panic!("unexpected terminal event {other:?}"),
    }

    let event = terminal_event(6, || Err(RegattaError::Cancelled));
    assert!(matches!(event, SolverEvent::Cancelled { run_id: 6 }));
}
