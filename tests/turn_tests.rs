use naval_battle::{Phase, SessionError, SessionRegistry, TurnController, TurnError, NO_PLAYER};

#[test]
fn test_controller_lifecycle() {
    let mut turns = TurnController::new();
    assert_eq!(turns.phase(), Phase::Registration);
    assert_eq!(turns.current(), NO_PLAYER);
    assert_eq!(turns.check(1), Err(TurnError::NotStarted));

    turns.begin_placement();
    assert_eq!(turns.phase(), Phase::Placement);
    assert!(turns.start(1, 2));
    assert_eq!(turns.phase(), Phase::Playing);
    assert_eq!(turns.current(), 1);
    assert!(!turns.start(2, 1));
    assert_eq!(turns.current(), 1);

    assert_eq!(turns.check(1), Ok(()));
    assert_eq!(turns.check(2), Err(TurnError::NotYourTurn { current: 1 }));
    assert_eq!(turns.advance(), 2);
    assert_eq!(turns.advance(), 1);

    assert!(turns.finish(1));
    assert!(!turns.finish(2));
    assert_eq!(turns.phase(), Phase::Finished);
    assert_eq!(turns.winner(), 1);
    assert_eq!(turns.current(), NO_PLAYER);
    assert_eq!(turns.check(1), Err(TurnError::Finished));
}

#[test]
fn test_opponent_lookup() {
    let mut turns = TurnController::new();
    assert_eq!(turns.opponent_of(1), None);
    turns.start(4, 7);
    assert_eq!(turns.opponent_of(4), Some(7));
    assert_eq!(turns.opponent_of(7), Some(4));
    assert_eq!(turns.opponent_of(5), None);
}

#[test]
fn test_reopen_only_from_placement() {
    let mut turns = TurnController::new();
    turns.begin_placement();
    turns.reopen_registration();
    assert_eq!(turns.phase(), Phase::Registration);

    turns.start(1, 2);
    turns.reopen_registration();
    assert_eq!(turns.phase(), Phase::Playing);
}

#[test]
fn test_registry_ids_are_never_reused() {
    let mut registry = SessionRegistry::new();
    let a = registry.register("a", Phase::Registration).unwrap();
    let b = registry.register("b", Phase::Registration).unwrap();
    assert_eq!((a, b), (1, 2));
    assert_eq!(
        registry.register("c", Phase::Registration),
        Err(SessionError::SessionFull)
    );

    let removed = registry.remove(a, Phase::Registration).unwrap();
    assert_eq!(removed.name, "a");
    assert_eq!(registry.seats(), None);
    let c = registry.register("c", Phase::Registration).unwrap();
    assert_eq!(c, 3);
    assert_eq!(registry.names(), vec!["b", "c"]);
    assert_eq!(registry.seats(), Some((b, c)));
}

#[test]
fn test_registry_phase_gates() {
    let mut registry = SessionRegistry::new();
    assert_eq!(
        registry.register("a", Phase::Placement),
        Err(SessionError::WrongPhase(Phase::Placement))
    );
    let a = registry.register("a", Phase::Registration).unwrap();
    assert!(matches!(
        registry.remove(a, Phase::Playing),
        Err(SessionError::WrongPhase(Phase::Playing))
    ));
    assert!(matches!(
        registry.remove(9, Phase::Placement),
        Err(SessionError::UnknownPlayer(9))
    ));
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_registry_readiness() {
    let mut registry = SessionRegistry::new();
    let a = registry.register("a", Phase::Registration).unwrap();
    assert_eq!(registry.set_ready(a), Ok(true));
    assert_eq!(registry.set_ready(a), Ok(false));
    assert!(!registry.all_ready());

    let b = registry.register("b", Phase::Registration).unwrap();
    assert_eq!(registry.opponent_of(a).map(|p| p.id), Some(b));
    assert_eq!(registry.set_ready(b), Ok(true));
    assert!(registry.all_ready());
    assert_eq!(registry.set_ready(5), Err(SessionError::UnknownPlayer(5)));
}
