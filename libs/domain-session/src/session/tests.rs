//! # Session Tests

use super::*;
use planar_domain::SignedCurve;
use sizing_field::FieldError;

fn point(x: f64, y: f64) -> Command {
    Command::Point { id: None, x, y, z: 0.0, size: None }
}

/// Unit square surface: points 1-4, lines 1-4, loop 1, surface 1.
fn square_session() -> Session {
    let mut session = Session::default();
    for (x, y) in [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)] {
        session.apply(point(x, y)).unwrap();
    }
    for i in 0..4 {
        session
            .apply(Command::Line { id: None, start: i + 1, end: (i + 1) % 4 + 1 })
            .unwrap();
    }
    let curves = (1..=4_i64).map(|c| SignedCurve::try_from(c).unwrap()).collect();
    session.apply(Command::CurveLoop { id: None, curves }).unwrap();
    session.apply(Command::PlaneSurface { id: None, loops: vec![1] }).unwrap();
    session
}

#[test]
fn test_created_outcome_reports_ids() {
    let mut session = Session::default();
    assert_eq!(
        session.apply(point(0.0, 0.0)).unwrap(),
        Outcome::Created { kind: EntityKind::Point, id: 1 }
    );
    assert_eq!(
        session.apply(Command::Point { id: Some(10), x: 1.0, y: 0.0, z: 0.0, size: None }).unwrap(),
        Outcome::Created { kind: EntityKind::Point, id: 10 }
    );
}

#[test]
fn test_failed_command_not_journaled() {
    let mut session = Session::default();
    session.apply(point(0.0, 0.0)).unwrap();
    let err = session.apply(Command::Line { id: None, start: 1, end: 2 }).unwrap_err();
    assert_eq!(
        err,
        SessionError::Topology(TopologyError::NotFound { kind: EntityKind::Point, id: 2 })
    );
    assert_eq!(session.journal().len(), 1);
}

#[test]
fn test_journal_records_assigned_ids() {
    let mut session = Session::default();
    session.apply(point(0.0, 0.0)).unwrap();
    assert_eq!(
        session.journal()[0],
        Command::Point { id: Some(1), x: 0.0, y: 0.0, z: 0.0, size: None }
    );
}

#[test]
fn test_export_empty_session_is_incomplete() {
    let session = Session::default();
    assert!(matches!(
        session.export_domain(),
        Err(SessionError::IncompleteDomain { .. })
    ));
}

#[test]
fn test_export_without_background_is_incomplete() {
    let session = square_session();
    let err = session.export_domain().unwrap_err();
    assert!(err.to_string().contains("background"), "{err}");
}

#[test]
fn test_set_background_twice() {
    let mut session = square_session();
    session
        .apply(Command::MathEval { id: None, expr: "0.1".into(), deps: BTreeMap::new() })
        .unwrap();
    session.apply(Command::Background { field: 1 }).unwrap();
    assert_eq!(
        session.apply(Command::Background { field: 1 }),
        Err(SessionError::Field(FieldError::AlreadySet { current: FieldId(1) }))
    );
}

#[test]
fn test_plane_surface_without_loops() {
    let mut session = Session::default();
    assert!(matches!(
        session.apply(Command::PlaneSurface { id: None, loops: vec![] }),
        Err(SessionError::Topology(TopologyError::Geometry { .. }))
    ));
}

#[test]
fn test_delete_field_through_session() {
    let mut session = Session::default();
    session
        .apply(Command::MathEval { id: None, expr: "1".into(), deps: BTreeMap::new() })
        .unwrap();
    assert_eq!(
        session.apply(Command::Delete { kind: EntityKind::Field, id: 1 }).unwrap(),
        Outcome::Deleted { kind: EntityKind::Field, id: 1 }
    );
    assert!(matches!(
        session.apply(Command::Delete { kind: EntityKind::Field, id: 1 }),
        Err(SessionError::Field(FieldError::NotFound { .. }))
    ));
}

#[test]
fn test_invalid_bounds_rejected() {
    let mut session = Session::default();
    session.apply(Command::LengthMax { value: 0.1 }).unwrap();
    assert!(matches!(
        session.apply(Command::LengthMin { value: 0.5 }),
        Err(SessionError::Config(_))
    ));
    assert_eq!(session.bounds().max, 0.1);
    assert_eq!(session.bounds().min, 0.0);
}

#[test]
fn test_point_sizes_are_clamped() {
    let mut session = square_session();
    session
        .apply(Command::Point { id: None, x: 0.5, y: 0.5, z: 0.0, size: Some(5.0) })
        .unwrap();
    session
        .apply(Command::MathEval { id: None, expr: "0.1".into(), deps: BTreeMap::new() })
        .unwrap();
    session.apply(Command::Background { field: 1 }).unwrap();
    session.apply(Command::LengthMax { value: 0.2 }).unwrap();

    let domain = session.export_domain().unwrap();
    assert_eq!(domain.point_sizes.get(&PointId(5)), Some(&0.2));
    assert_eq!(domain.point_sizes.len(), 1);
}

#[test]
fn test_replay_rebuilds_same_domain() {
    let mut session = square_session();
    session
        .apply(Command::Attractor { id: None, points: vec![1], curves: vec![] })
        .unwrap();
    session.apply(Command::Background { field: 1 }).unwrap();
    session.apply(Command::LengthMin { value: 0.01 }).unwrap();

    let text = session.to_jsonl().unwrap();
    let replayed = Session::from_jsonl(DomainConfig::default(), &text).unwrap();
    assert_eq!(replayed.journal(), session.journal());

    let (a, b) = (session.export_domain().unwrap(), replayed.export_domain().unwrap());
    assert_eq!(a.surfaces, b.surfaces);
    let q = DVec3::new(0.3, 0.4, 0.0);
    assert_eq!(a.size_at(q).unwrap(), b.size_at(q).unwrap());
}

#[test]
fn test_overly_nested_formula_leaves_session_usable() {
    let mut session = Session::default();
    let expr = format!("{}1{}", "(".repeat(100_000), ")".repeat(100_000));
    assert!(matches!(
        session.apply(Command::MathEval { id: None, expr, deps: BTreeMap::new() }),
        Err(SessionError::Field(FieldError::Expression { .. }))
    ));
    assert!(session.journal().is_empty());
    assert_eq!(
        session
            .apply(Command::MathEval { id: None, expr: "0.1".into(), deps: BTreeMap::new() })
            .unwrap(),
        Outcome::Created { kind: EntityKind::Field, id: 1 }
    );
}
