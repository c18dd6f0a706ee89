use wordfreq_core::{CoreError, RunPhase, RunState};

fn dispatching(chunks: usize) -> RunState {
    let mut state = RunState::new();
    state.begin_split(chunks * 10).unwrap();
    state.begin_dispatch(chunks).unwrap();
    for _ in 0..chunks {
        state.record_dispatched().unwrap();
    }
    state
}

#[test]
fn run_moves_through_every_phase_in_order() {
    let mut state = RunState::new();
    assert_eq!(state.phase(), RunPhase::Idle);

    state.begin_split(6).unwrap();
    assert_eq!(state.phase(), RunPhase::Splitting);

    state.begin_dispatch(3).unwrap();
    assert_eq!(state.phase(), RunPhase::DispatchingAndReducing);
    for _ in 0..3 {
        state.record_dispatched().unwrap();
    }

    state.complete(3, 0).unwrap();
    let view = state.view();
    assert_eq!(view.phase, RunPhase::Complete);
    assert_eq!(view.tokens, 6);
    assert_eq!(view.chunks_planned, 3);
    assert_eq!(view.chunks_dispatched, 3);
    assert_eq!(view.chunks_merged, 3);
}

#[test]
fn run_cannot_go_backwards() {
    let mut state = dispatching(1);
    state.complete(1, 0).unwrap();

    let err = state.begin_split(1).unwrap_err();
    assert_eq!(
        err,
        CoreError::IllegalTransition {
            from: RunPhase::Complete,
            to: RunPhase::Splitting,
        }
    );
    assert!(state.record_dispatched().is_err());
}

#[test]
fn dispatch_requires_split_first() {
    let mut state = RunState::new();
    assert!(matches!(
        state.begin_dispatch(2),
        Err(CoreError::IllegalTransition {
            from: RunPhase::Idle,
            ..
        })
    ));
    assert!(state.record_dispatched().is_err());
}

#[test]
fn completion_requires_every_chunk_settled() {
    let mut state = dispatching(4);
    assert_eq!(
        state.complete(2, 1),
        Err(CoreError::Unsettled {
            dispatched: 4,
            settled: 3,
        })
    );
    assert_eq!(state.phase(), RunPhase::DispatchingAndReducing);

    state.complete(3, 1).unwrap();
    assert_eq!(state.view().chunks_failed, 1);
}

#[test]
fn empty_run_completes_with_zero_chunks() {
    let mut state = dispatching(0);
    state.complete(0, 0).unwrap();
    assert_eq!(state.phase(), RunPhase::Complete);
}
