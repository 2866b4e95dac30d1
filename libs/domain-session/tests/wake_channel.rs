//! # Wake Channel Scenario
//!
//! A 10 × 1 fluid box perforated by a thin curved channel, refined near the
//! channel's upper endpoints by a distance-based formula.

use approx::assert_relative_eq;
use domain_session::{Command, Session, SessionError};
use glam::DVec3;
use planar_domain::{EntityKind, Orientation, PrimitiveKind, SignedCurve, TopologyError};
use std::collections::BTreeMap;

fn point(id: u32, x: f64, y: f64) -> Command {
    Command::Point { id: Some(id), x, y, z: 0.0, size: None }
}

fn signed(ids: &[i64]) -> Vec<SignedCurve> {
    ids.iter().map(|&c| SignedCurve::try_from(c).unwrap()).collect()
}

/// Geometry: box loop 1 (curves 1-4), channel loop 2 (curves 5-8), and a
/// coarse surface 1 without the hole.
fn geometry() -> Vec<Command> {
    vec![
        point(1, 0.0, 0.0),
        point(2, 10.0, 0.0),
        point(3, 10.0, 1.0),
        point(4, 0.0, 1.0),
        Command::Line { id: Some(1), start: 1, end: 2 },
        Command::Line { id: Some(2), start: 2, end: 3 },
        Command::Line { id: Some(3), start: 3, end: 4 },
        Command::Line { id: Some(4), start: 4, end: 1 },
        Command::CurveLoop { id: Some(1), curves: signed(&[1, 2, 3, 4]) },
        Command::PlaneSurface { id: Some(1), loops: vec![1] },
        // Channel: lower arc 5 → 6, upper arc 7 → 8, centers 9 and 10.
        point(5, 4.0, 0.4),
        point(6, 6.0, 0.4),
        point(7, 4.0, 0.5),
        point(8, 6.0, 0.5),
        point(9, 5.0, 2.4),
        point(10, 5.0, 2.5),
        Command::Arc { id: Some(5), start: 5, center: 9, end: 6 },
        Command::Line { id: Some(6), start: 6, end: 8 },
        Command::Arc { id: Some(7), start: 7, center: 10, end: 8 },
        Command::Line { id: Some(8), start: 7, end: 5 },
        Command::CurveLoop { id: Some(2), curves: signed(&[5, 6, -7, 8]) },
    ]
}

fn sizing() -> Vec<Command> {
    vec![
        Command::Attractor { id: Some(1), points: vec![7, 8], curves: vec![] },
        Command::MathEval {
            id: Some(2),
            expr: "0.05*F1 + 0.001".to_string(),
            deps: BTreeMap::from([("F1".to_string(), 1)]),
        },
        Command::Background { field: 2 },
        Command::LengthMin { value: 0.02 },
        Command::LengthMax { value: 0.1 },
    ]
}

fn channel_session() -> Session {
    let mut session = Session::default();
    for command in geometry() {
        session.apply(command).unwrap();
    }
    session.apply(Command::Delete { kind: EntityKind::Surface, id: 1 }).unwrap();
    session.apply(Command::PlaneSurface { id: Some(2), loops: vec![1, 2] }).unwrap();
    for command in sizing() {
        session.apply(command).unwrap();
    }
    session
}

#[test]
fn test_sizes_at_attractor_and_far_field() {
    let session = channel_session();
    let domain = session.export_domain().unwrap();

    // Raw 0.001 at the attractor, clamped up.
    assert_relative_eq!(domain.size_at(DVec3::new(4.0, 0.5, 0.0)).unwrap(), 0.02);
    // Raw 0.05 * 4 + 0.001 = 0.201 at the inlet, clamped down.
    let raw = session.fields().evaluate(sizing_field::FieldId(2), DVec3::new(0.0, 0.5, 0.0)).unwrap();
    assert_relative_eq!(raw, 0.201, epsilon = 1e-12);
    assert_relative_eq!(domain.size_at(DVec3::new(0.0, 0.5, 0.0)).unwrap(), 0.1);
    // Unclamped in between.
    assert_relative_eq!(
        domain.size_at(DVec3::new(5.0, 0.5, 0.0)).unwrap(),
        0.051,
        epsilon = 1e-12
    );
}

#[test]
fn test_exported_boundary_orientation() {
    let domain = channel_session().export_domain().unwrap();
    assert_eq!(domain.surfaces.len(), 1);
    let surface = &domain.surfaces[0];
    assert_eq!(surface.outer.orientation, Orientation::CounterClockwise);
    assert_eq!(surface.holes.len(), 1);
    assert_eq!(surface.holes[0].orientation, Orientation::Clockwise);

    let arcs: Vec<_> = surface.holes[0]
        .primitives
        .iter()
        .filter_map(|p| match p.kind {
            PrimitiveKind::Arc { center, .. } => Some(center.0),
            PrimitiveKind::Line => None,
        })
        .collect();
    assert_eq!(arcs.len(), 2);
    assert!(arcs.contains(&9) && arcs.contains(&10));
}

#[test]
fn test_surface_delete_twice_keeps_curves() {
    let mut session = channel_session();
    session.apply(Command::Delete { kind: EntityKind::Surface, id: 2 }).unwrap();
    assert_eq!(
        session.apply(Command::Delete { kind: EntityKind::Surface, id: 2 }),
        Err(SessionError::Topology(TopologyError::NotFound {
            kind: EntityKind::Surface,
            id: 2
        }))
    );

    for curve in 1..=8 {
        assert!(session.store().curve(planar_domain::CurveId(curve)).is_ok());
    }
    assert!(matches!(
        session.export_domain(),
        Err(SessionError::IncompleteDomain { .. })
    ));

    // The loops are still usable for a new surface.
    session.apply(Command::PlaneSurface { id: None, loops: vec![1, 2] }).unwrap();
    assert!(session.export_domain().is_ok());
}

#[test]
fn test_journal_replay() {
    let session = channel_session();
    let text = session.to_jsonl().unwrap();
    assert_eq!(text.lines().count(), session.journal().len());

    let replayed = Session::from_jsonl(Default::default(), &text).unwrap();
    let q = DVec3::new(4.5, 0.7, 0.0);
    assert_eq!(
        replayed.export_domain().unwrap().size_at(q).unwrap(),
        session.export_domain().unwrap().size_at(q).unwrap()
    );
}

#[test]
fn test_export_before_background_is_incomplete() {
    let mut session = Session::default();
    for command in geometry() {
        session.apply(command).unwrap();
    }
    assert!(matches!(
        session.export_domain(),
        Err(SessionError::IncompleteDomain { .. })
    ));
}

#[test]
fn test_batch_sizes_respect_bounds() {
    let domain = channel_session().export_domain().unwrap();
    let grid: Vec<_> = (0..=50)
        .flat_map(|i| (0..=5).map(move |j| DVec3::new(i as f64 * 0.2, j as f64 * 0.2, 0.0)))
        .collect();
    let sizes = domain.background.evaluate_many(&grid).unwrap();
    assert!(sizes.iter().all(|&s| (0.02..=0.1).contains(&s)));
}
