//! # Channel Domain Tests
//!
//! A rectangular box perforated by a thin curved channel: two arcs joined by
//! straight segments.

use glam::DVec3;
use planar_domain::{
    EntityKind, EntityStore, LoopId, Orientation, PrimitiveKind, SignedCurve, TopologyError,
};

fn point(store: &mut EntityStore, x: f64, y: f64) -> planar_domain::PointId {
    store.add_point(DVec3::new(x, y, 0.0), None).unwrap()
}

fn outer_box(store: &mut EntityStore) -> LoopId {
    let p: Vec<_> = [(0.0, 0.0), (10.0, 0.0), (10.0, 1.0), (0.0, 1.0)]
        .iter()
        .map(|&(x, y)| point(store, x, y))
        .collect();
    let refs: Vec<_> = (0..4)
        .map(|i| SignedCurve::forward(store.add_line(p[i], p[(i + 1) % 4]).unwrap()))
        .collect();
    store.build_loop(&refs).unwrap()
}

/// Channel between x=4 and x=6: a lower arc, a right segment, an upper arc
/// traversed backwards, and a left segment.
fn channel(store: &mut EntityStore, y0: f64) -> LoopId {
    let ls = point(store, 4.0, y0);
    let le = point(store, 6.0, y0);
    let lc = point(store, 5.0, y0 + 2.0);
    let us = point(store, 4.0, y0 + 0.1);
    let ue = point(store, 6.0, y0 + 0.1);
    let uc = point(store, 5.0, y0 + 2.1);

    let lower = store.add_arc(ls, lc, le).unwrap();
    let right = store.add_line(le, ue).unwrap();
    let upper = store.add_arc(us, uc, ue).unwrap();
    let left = store.add_line(us, ls).unwrap();

    store
        .build_loop(&[
            SignedCurve::forward(lower),
            SignedCurve::forward(right),
            SignedCurve::backward(upper),
            SignedCurve::forward(left),
        ])
        .unwrap()
}

#[test]
fn test_box_with_channel_hole() {
    let mut store = EntityStore::default();
    let outer = outer_box(&mut store);
    let hole = channel(&mut store, 0.4);

    let id = store.build_surface(outer, &[hole]).unwrap();
    let resolved = store.resolve_surface(id).unwrap();

    assert_eq!(resolved.outer.orientation, Orientation::CounterClockwise);
    assert_eq!(resolved.holes[0].orientation, Orientation::Clockwise);
    let arcs = resolved.holes[0]
        .primitives
        .iter()
        .filter(|p| matches!(p.kind, PrimitiveKind::Arc { .. }))
        .count();
    assert_eq!(arcs, 2);
}

#[test]
fn test_channel_poking_through_outer_fails() {
    let mut store = EntityStore::default();
    let outer = outer_box(&mut store);
    let hole = channel(&mut store, 0.95);
    assert!(matches!(
        store.build_surface(outer, &[hole]),
        Err(TopologyError::Containment { .. })
    ));
}

#[test]
fn test_coarse_surface_rebuilt_with_hole() {
    let mut store = EntityStore::default();
    let outer = outer_box(&mut store);
    let coarse = store.build_surface(outer, &[]).unwrap();

    let hole = channel(&mut store, 0.4);
    store.delete(EntityKind::Surface, coarse.0).unwrap();
    assert_eq!(
        store.delete(EntityKind::Surface, coarse.0),
        Err(TopologyError::NotFound { kind: EntityKind::Surface, id: coarse.0 })
    );

    let refined = store.build_surface(outer, &[hole]).unwrap();
    assert_ne!(refined, coarse);
    assert_eq!(store.surfaces().count(), 1);
    for curve in store.curve_loop(outer).unwrap().curve_ids() {
        assert!(store.curve(curve).is_ok());
    }
}

#[test]
fn test_reversed_channel_has_same_points() {
    let mut store = EntityStore::default();
    let hole = channel(&mut store, 0.4);
    let original = store.curve_loop(hole).unwrap().clone();
    let reversed: Vec<_> = original
        .signed_curves()
        .iter()
        .rev()
        .map(|r| r.flipped())
        .collect();
    let flipped = store.build_loop(&reversed).unwrap();
    let flipped = store.curve_loop(flipped).unwrap();

    assert_eq!(flipped.orientation, original.orientation.reversed());
    assert_eq!(flipped.point_ids, original.point_ids);
}
