//! # Surface Builder Tests

use super::*;
use crate::ids::SignedCurve;
use glam::DVec3;

/// Build an axis-aligned rectangle loop from fresh points and lines.
///
/// `ccw` selects the winding of the stored loop.
fn rect(store: &mut EntityStore, min: (f64, f64), max: (f64, f64), ccw: bool) -> LoopId {
    let corners = [(min.0, min.1), (max.0, min.1), (max.0, max.1), (min.0, max.1)];
    let ids: Vec<_> = corners
        .iter()
        .map(|&(x, y)| store.add_point(DVec3::new(x, y, 0.0), None).unwrap())
        .collect();
    let mut refs: Vec<_> = (0..4)
        .map(|i| SignedCurve::forward(store.add_line(ids[i], ids[(i + 1) % 4]).unwrap()))
        .collect();
    if !ccw {
        refs = refs.iter().rev().map(|r| r.flipped()).collect();
    }
    store.build_loop(&refs).unwrap()
}

fn assert_chained(resolved: &ResolvedLoop) {
    let n = resolved.primitives.len();
    for i in 0..n {
        let (cur, next) = (&resolved.primitives[i], &resolved.primitives[(i + 1) % n]);
        assert_eq!(cur.end, next.start, "primitive {i} does not meet its successor");
        assert_eq!(cur.end_position, next.start_position);
    }
}

#[test]
fn test_surface_with_hole() {
    let mut store = EntityStore::default();
    let outer = rect(&mut store, (0.0, 0.0), (10.0, 1.0), true);
    let hole = rect(&mut store, (4.0, 0.4), (6.0, 0.6), true);

    let id = store.build_surface(outer, &[hole]).unwrap();
    let surface = store.surface(id).unwrap();
    assert!(!surface.outer.reversed);
    assert!(surface.holes[0].reversed);

    // The stored loop keeps its own winding.
    assert_eq!(store.curve_loop(hole).unwrap().orientation, Orientation::CounterClockwise);

    let resolved = store.resolve_surface(id).unwrap();
    assert_eq!(resolved.outer.orientation, Orientation::CounterClockwise);
    assert_eq!(resolved.holes[0].orientation, Orientation::Clockwise);
    assert_chained(&resolved.outer);
    assert_chained(&resolved.holes[0]);
    assert!(resolved.holes[0].primitives.iter().all(|p| p.reversed));
}

#[test]
fn test_clockwise_outer_is_reversed_for_surface() {
    let mut store = EntityStore::default();
    let outer = rect(&mut store, (0.0, 0.0), (4.0, 4.0), false);
    let id = store.build_surface(outer, &[]).unwrap();
    let resolved = store.resolve_surface(id).unwrap();
    assert_eq!(resolved.outer.orientation, Orientation::CounterClockwise);
    assert_chained(&resolved.outer);
}

#[test]
fn test_arc_primitive_keeps_center() {
    let mut store = EntityStore::default();
    let a = store.add_point(DVec3::new(0.0, 0.0, 0.0), None).unwrap();
    let b = store.add_point(DVec3::new(2.0, 0.0, 0.0), None).unwrap();
    let c = store.add_point(DVec3::new(0.0, 2.0, 0.0), None).unwrap();
    let ab = store.add_line(a, b).unwrap();
    let bc = store.add_arc(b, a, c).unwrap();
    let ca = store.add_line(c, a).unwrap();
    let l = store
        .build_loop(&[SignedCurve::forward(ab), SignedCurve::forward(bc), SignedCurve::forward(ca)])
        .unwrap();
    let id = store.build_surface(l, &[]).unwrap();
    let resolved = store.resolve_surface(id).unwrap();
    assert_eq!(
        resolved.outer.primitives[1].kind,
        PrimitiveKind::Arc { center: a, center_position: DVec3::ZERO }
    );
}

#[test]
fn test_hole_outside_is_containment_error() {
    let mut store = EntityStore::default();
    let outer = rect(&mut store, (0.0, 0.0), (1.0, 1.0), true);
    let hole = rect(&mut store, (2.0, 2.0), (3.0, 3.0), true);
    assert!(matches!(
        store.build_surface(outer, &[hole]),
        Err(TopologyError::Containment { .. })
    ));
    assert_eq!(store.count(EntityKind::Surface), 0);
}

#[test]
fn test_straddling_hole_is_containment_error() {
    let mut store = EntityStore::default();
    let outer = rect(&mut store, (0.0, 0.0), (4.0, 4.0), true);
    let hole = rect(&mut store, (3.0, 1.0), (5.0, 2.0), true);
    assert!(matches!(
        store.build_surface(outer, &[hole]),
        Err(TopologyError::Containment { .. })
    ));
}

#[test]
fn test_hole_touching_outer_is_containment_error() {
    let mut store = EntityStore::default();
    let outer = rect(&mut store, (0.0, 0.0), (4.0, 4.0), true);
    let hole = rect(&mut store, (0.0, 1.0), (1.0, 2.0), true);
    assert!(matches!(
        store.build_surface(outer, &[hole]),
        Err(TopologyError::Containment { .. })
    ));
}

#[test]
fn test_outer_as_hole_is_rejected() {
    let mut store = EntityStore::default();
    let outer = rect(&mut store, (0.0, 0.0), (4.0, 4.0), true);
    assert!(matches!(
        store.build_surface(outer, &[outer]),
        Err(TopologyError::Containment { .. })
    ));
}

#[test]
fn test_overlapping_holes() {
    let mut store = EntityStore::default();
    let outer = rect(&mut store, (0.0, 0.0), (10.0, 10.0), true);
    let first = rect(&mut store, (1.0, 1.0), (4.0, 4.0), true);
    let second = rect(&mut store, (3.0, 3.0), (6.0, 6.0), false);
    match store.build_surface(outer, &[first, second]) {
        Err(TopologyError::Overlap { first: f, second: s, .. }) => {
            assert_eq!((f, s), (first, second));
        }
        other => panic!("expected overlap, got {other:?}"),
    }
}

#[test]
fn test_nested_holes() {
    let mut store = EntityStore::default();
    let outer = rect(&mut store, (0.0, 0.0), (10.0, 10.0), true);
    let big = rect(&mut store, (1.0, 1.0), (8.0, 8.0), true);
    let small = rect(&mut store, (2.0, 2.0), (3.0, 3.0), true);
    let err = store.build_surface(outer, &[small, big]).unwrap_err();
    assert!(err.to_string().contains("nested"), "{err}");
}

#[test]
fn test_touching_holes() {
    let mut store = EntityStore::default();
    let outer = rect(&mut store, (0.0, 0.0), (10.0, 10.0), true);
    let left = rect(&mut store, (1.0, 1.0), (3.0, 3.0), true);
    let right = rect(&mut store, (3.0, 1.0), (5.0, 3.0), true);
    assert!(matches!(
        store.build_surface(outer, &[left, right]),
        Err(TopologyError::Overlap { .. })
    ));
}

#[test]
fn test_duplicate_hole() {
    let mut store = EntityStore::default();
    let outer = rect(&mut store, (0.0, 0.0), (10.0, 10.0), true);
    let hole = rect(&mut store, (1.0, 1.0), (3.0, 3.0), true);
    assert!(matches!(
        store.build_surface(outer, &[hole, hole]),
        Err(TopologyError::Overlap { .. })
    ));
}

#[test]
fn test_disjoint_holes_accepted() {
    let mut store = EntityStore::default();
    let outer = rect(&mut store, (0.0, 0.0), (10.0, 10.0), true);
    let a = rect(&mut store, (1.0, 1.0), (3.0, 3.0), false);
    let b = rect(&mut store, (5.0, 5.0), (7.0, 7.0), true);
    let id = store.build_surface(outer, &[a, b]).unwrap();
    let surface = store.surface(id).unwrap();
    assert!(!surface.holes[0].reversed);
    assert!(surface.holes[1].reversed);
}

/// Hole bounded below by two collinear lines at height `y` and above by an
/// arc around `center` from `(3, y)` to `(7, y)`.
fn arc_cap(store: &mut EntityStore, center: PointId, y: f64) -> LoopId {
    let left = store.add_point(DVec3::new(3.0, y, 0.0), None).unwrap();
    let mid = store.add_point(DVec3::new(5.0, y, 0.0), None).unwrap();
    let right = store.add_point(DVec3::new(7.0, y, 0.0), None).unwrap();
    let cap = store.add_arc(left, center, right).unwrap();
    let back = store.add_line(right, mid).unwrap();
    let home = store.add_line(mid, left).unwrap();
    store
        .build_loop(&[SignedCurve::forward(cap), SignedCurve::forward(back), SignedCurve::forward(home)])
        .unwrap()
}

#[test]
fn test_holes_sharing_only_an_arc_center_are_disjoint() {
    let mut store = EntityStore::default();
    let outer = rect(&mut store, (0.0, 0.0), (10.0, 4.0), true);
    let center = store.add_point(DVec3::new(5.0, -3.0, 0.0), None).unwrap();
    let lower = arc_cap(&mut store, center, 1.0);
    let upper = arc_cap(&mut store, center, 2.5);

    let id = store.build_surface(outer, &[lower, upper]).unwrap();
    let resolved = store.resolve_surface(id).unwrap();
    assert_eq!(resolved.holes.len(), 2);
    assert!(resolved.holes.iter().all(|h| h.orientation == Orientation::Clockwise));
}

#[test]
fn test_delete_surface_keeps_loops() {
    let mut store = EntityStore::default();
    let outer = rect(&mut store, (0.0, 0.0), (1.0, 1.0), true);
    let id = store.build_surface(outer, &[]).unwrap();
    store.delete_surface(id).unwrap();
    assert_eq!(
        store.delete_surface(id),
        Err(TopologyError::NotFound { kind: EntityKind::Surface, id: id.0 })
    );
    assert!(store.curve_loop(outer).is_ok());
    store.build_surface(outer, &[]).unwrap();
}

#[test]
fn test_resolve_after_point_deletion_fails() {
    let mut store = EntityStore::default();
    let outer = rect(&mut store, (0.0, 0.0), (1.0, 1.0), true);
    let id = store.build_surface(outer, &[]).unwrap();
    store.delete(EntityKind::Point, 1).unwrap();
    assert_eq!(
        store.resolve_surface(id),
        Err(TopologyError::DeletedReference { kind: EntityKind::Point, id: 1 })
    );
}
