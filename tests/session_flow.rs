use vims_randomizer::{
    DrawConfig, DrawError, ErrorKind, EventRecorder, ManualClock, ParticipantId, SequenceRandom,
    SessionController, SessionEvent, SessionState, StatusLevel, StdRandom,
};

const TICK: u64 = 80;

fn create_session(rng: SequenceRandom) -> (SessionController, ManualClock, EventRecorder) {
    create_session_with_config(DrawConfig::default(), rng)
}

fn create_session_with_config(
    config: DrawConfig,
    rng: SequenceRandom,
) -> (SessionController, ManualClock, EventRecorder) {
    let clock = ManualClock::new();
    let session = SessionController::new(config, Box::new(clock.clone()), Box::new(rng));
    let recorder = EventRecorder::new();
    session.subscribe(Box::new(recorder.clone()));
    (session, clock, recorder)
}

/// Advances one tick interval at a time until the reveal is over
fn run_reveal(session: &mut SessionController, clock: &ManualClock) {
    for _ in 0..100 {
        if !session.is_drawing() {
            return;
        }
        clock.advance(TICK);
        session.poll();
    }
    panic!("reveal did not finish");
}

#[test]
fn test_full_draw_reveals_a_winner() {
    let (mut session, clock, recorder) = create_session(SequenceRandom::constant(0.0));
    session.add_participants(5).unwrap();
    recorder.drain();

    assert_eq!(session.start_draw().unwrap(), 10);
    assert!(session.session_state().is_drawing);
    assert!(session.session_state().active_timer.is_some());

    run_reveal(&mut session, &clock);

    assert!(!session.session_state().is_drawing);
    assert_eq!(session.session_state().active_timer, None);
    assert_eq!(session.pool().history().len(), 1);
    assert_eq!(session.pool().remaining().len(), 4);
    assert_eq!(session.current().map(|p| p.id()), Some(ParticipantId(1)));
    assert_eq!(session.undo_depth(), 1);

    assert_eq!(recorder.count("draw_started"), 1);
    assert_eq!(recorder.count("preview_tick"), 10);
    assert_eq!(recorder.count("emphasis_pulse"), 2);
    assert_eq!(recorder.count("winner_revealed"), 1);

    let events = recorder.events();
    let winner_at = events
        .iter()
        .position(|e| matches!(e, SessionEvent::WinnerRevealed { .. }))
        .unwrap();
    let last_preview_at = events
        .iter()
        .rposition(|e| matches!(e, SessionEvent::PreviewTick { .. }))
        .unwrap();
    assert!(last_preview_at < winner_at);
}

#[test]
fn test_highlights_clear_after_their_delays() {
    let (mut session, clock, recorder) = create_session(SequenceRandom::constant(0.0));
    session.add_participants(3).unwrap();
    session.start_draw().unwrap();
    run_reveal(&mut session, &clock);

    assert!(session.is_highlighting_winner());
    assert!(session.next_deadline().is_some());

    clock.advance(400);
    session.poll();
    assert!(!session.is_highlighting_winner());
    assert!(!session.is_emphasized());
    assert_eq!(recorder.count("winner_highlight_cleared"), 1);
    assert_eq!(recorder.count("emphasis_cleared"), 2);
    assert_eq!(session.next_deadline(), None);
}

#[test]
fn test_start_draw_while_running_is_rejected() {
    let (mut session, _clock, recorder) = create_session(SequenceRandom::constant(0.0));
    session.add_participants(5).unwrap();
    session.start_draw().unwrap();

    assert_eq!(session.start_draw(), Err(DrawError::DrawInProgress));
    assert_eq!(session.add_participants(3), Err(DrawError::DrawInProgress));
    assert_eq!(session.add_more(3), Err(DrawError::DrawInProgress));
    assert_eq!(session.pool().all().len(), 5);
    assert_eq!(recorder.count("operation_failed"), 3);
}

#[test]
fn test_exhausted_pool_rejects_start() {
    let (mut session, clock, recorder) = create_session(SequenceRandom::constant(0.0));
    session.add_participants(1).unwrap();
    session.start_draw().unwrap();
    run_reveal(&mut session, &clock);
    assert!(session.pool().remaining().is_empty());

    assert_eq!(session.start_draw(), Err(DrawError::PoolExhausted));
    assert!(matches!(
        recorder.last(),
        Some(SessionEvent::OperationFailed { kind: ErrorKind::PoolExhausted, .. })
    ));
}

#[test]
fn test_undo_restores_previous_draw_as_current() {
    let (mut session, clock, recorder) = create_session(SequenceRandom::constant(0.0));
    session.add_participants(4).unwrap();
    let start = session.pool().clone();

    session.start_draw().unwrap();
    run_reveal(&mut session, &clock);
    let after_first = session.pool().clone();
    session.start_draw().unwrap();
    run_reveal(&mut session, &clock);
    assert_eq!(session.current().map(|p| p.id()), Some(ParticipantId(2)));

    recorder.drain();
    session.undo_last().unwrap();
    assert_eq!(session.pool(), &after_first);
    assert!(recorder.events().contains(&SessionEvent::CurrentChanged {
        current: after_first.last_drawn().cloned(),
    }));

    session.undo_last().unwrap();
    assert_eq!(session.pool(), &start);
    assert_eq!(session.current(), None);
    assert_eq!(
        recorder.last(),
        Some(SessionEvent::Status {
            level: StatusLevel::Success,
            message: "Last draw undone".to_owned(),
        })
    );

    let before = session.pool().clone();
    assert_eq!(session.undo_last(), Err(DrawError::NothingToUndo));
    assert_eq!(session.pool(), &before);
}

#[test]
fn test_add_participants_clears_undo_history() {
    let (mut session, clock, _recorder) = create_session(SequenceRandom::constant(0.0));
    session.add_participants(4).unwrap();
    session.start_draw().unwrap();
    run_reveal(&mut session, &clock);
    assert!(session.can_undo());

    session.add_participants(6).unwrap();
    assert!(!session.can_undo());
    assert_eq!(session.pool().remaining().len(), 6);
    assert_eq!(session.current(), None);
}

#[test]
fn test_reset_during_draw_leaves_no_stale_tick() {
    let (mut session, clock, recorder) = create_session(SequenceRandom::constant(0.0));
    session.add_participants(5).unwrap();
    session.start_draw().unwrap();
    clock.advance(TICK);
    session.poll();
    assert!(session.is_emphasized());

    session.reset_all();
    assert_eq!(session.session_state(), SessionState::default());
    assert!(session.pool().all().is_empty());
    assert!(!session.can_undo());
    assert_eq!(recorder.count("draw_cancelled"), 1);

    recorder.drain();
    clock.advance(10_000);
    session.poll();
    assert!(recorder.events().is_empty());
    assert_eq!(session.next_deadline(), None);
}

#[test]
fn test_reset_all_never_fails_on_empty_session() {
    let (mut session, _clock, recorder) = create_session(SequenceRandom::constant(0.0));
    session.reset_all();
    assert_eq!(recorder.count("operation_failed"), 0);
    assert_eq!(recorder.count("draw_cancelled"), 0);
}

#[test]
fn test_add_more_during_rounds_keeps_history() {
    let (mut session, clock, _recorder) = create_session(SequenceRandom::constant(0.0));
    session.add_participants(5).unwrap();
    session.start_draw().unwrap();
    run_reveal(&mut session, &clock);

    let added = session.add_more(2).unwrap();
    let added: Vec<u32> = added.iter().map(|p| p.id().get()).collect();
    assert_eq!(added, vec![6, 7]);
    assert_eq!(session.pool().all().len(), 7);
    assert_eq!(session.pool().history().len(), 1);
}

#[test]
fn test_invalid_count_reports_and_changes_nothing() {
    let (mut session, _clock, recorder) = create_session(SequenceRandom::constant(0.0));
    session.add_participants(3).unwrap();
    let before = session.pool().clone();

    assert!(matches!(session.add_participants(0), Err(DrawError::InvalidCount { .. })));
    assert!(matches!(session.add_more(1001), Err(DrawError::InvalidCount { .. })));
    assert_eq!(session.pool(), &before);

    match recorder.last() {
        Some(SessionEvent::OperationFailed { kind, message }) => {
            assert_eq!(kind, ErrorKind::InvalidCount);
            assert!(message.contains("1001"));
        }
        other => panic!("expected a failure notification, got {:?}", other),
    }
}

#[test]
fn test_return_to_pool_through_session() {
    let (mut session, clock, recorder) = create_session(SequenceRandom::constant(0.0));
    session.add_participants(3).unwrap();
    session.start_draw().unwrap();
    run_reveal(&mut session, &clock);
    let drawn = session.current().cloned().unwrap();

    session.return_to_pool(drawn.id()).unwrap();
    let remaining: Vec<u32> = session.pool().remaining().iter().map(|p| p.id().get()).collect();
    assert_eq!(remaining, vec![1, 2, 3]);
    assert_eq!(session.current(), None);

    assert_eq!(
        session.return_to_pool(drawn.id()),
        Err(DrawError::AlreadyAvailable(drawn.id()))
    );
    assert_eq!(session.return_to_pool(ParticipantId(42)), Err(DrawError::NotFound(ParticipantId(42))));
    assert_eq!(recorder.count("operation_failed"), 2);
}

#[test]
fn test_random_sessions_draw_everyone_once() {
    let clock = ManualClock::new();
    let mut session = SessionController::new(
        DrawConfig::default(),
        Box::new(clock.clone()),
        Box::new(StdRandom::seeded(2024)),
    );
    session.add_participants(12).unwrap();
    while !session.pool().is_exhausted() {
        session.start_draw().unwrap();
        run_reveal(&mut session, &clock);
    }

    let mut drawn: Vec<u32> = session.pool().history().iter().map(|p| p.id().get()).collect();
    drawn.sort_unstable();
    assert_eq!(drawn, (1..=12).collect::<Vec<_>>());
    assert_eq!(session.undo_depth(), 10);
}

#[test]
fn test_undo_capacity_override_limits_depth() {
    let config = DrawConfig {
        undo_capacity: 3,
        ..DrawConfig::default()
    };
    let (mut session, clock, _recorder) = create_session_with_config(config, SequenceRandom::constant(0.0));
    session.add_participants(10).unwrap();

    for _ in 0..5 {
        session.start_draw().unwrap();
        run_reveal(&mut session, &clock);
    }
    assert_eq!(session.pool().history().len(), 5);
    assert_eq!(session.undo_depth(), 3);

    for _ in 0..3 {
        session.undo_last().unwrap();
    }
    assert_eq!(session.undo_last(), Err(DrawError::NothingToUndo));
    assert_eq!(session.pool().history().len(), 2);
}

#[test]
fn test_tick_and_emphasis_overrides_drive_the_reveal() {
    let config = DrawConfig {
        tick_interval_ms: 40,
        emphasis_frequency: 2,
        ..DrawConfig::default()
    };
    let (mut session, clock, recorder) = create_session_with_config(config, SequenceRandom::constant(0.0));
    session.add_participants(4).unwrap();
    recorder.drain();
    assert_eq!(session.start_draw().unwrap(), 10);

    clock.advance(39);
    session.poll();
    assert_eq!(recorder.count("preview_tick"), 0);
    clock.advance(1);
    session.poll();
    assert_eq!(recorder.count("preview_tick"), 1);

    while session.is_drawing() {
        assert!(session.now_ms() < 400);
        clock.advance(40);
        session.poll();
    }
    assert_eq!(session.now_ms(), 400);
    assert_eq!(recorder.count("preview_tick"), 10);
    // ticks 0, 2, 4, 6 and 8
    assert_eq!(recorder.count("emphasis_pulse"), 5);
    assert_eq!(recorder.count("winner_revealed"), 1);
}

#[test]
fn test_participant_bound_override_rejects_larger_counts() {
    let config = DrawConfig {
        max_participants: 50,
        ..DrawConfig::default()
    };
    let (mut session, _clock, _recorder) = create_session_with_config(config, SequenceRandom::constant(0.0));

    assert_eq!(
        session.add_participants(51),
        Err(DrawError::InvalidCount { count: 51, min: 1, max: 50 })
    );
    assert!(session.pool().is_empty());
    session.add_participants(50).unwrap();
    assert_eq!(session.pool().all().len(), 50);
}
