//! # Planar Domain
//!
//! Boundary representation of 2D meshing domains: points, lines and circular
//! arcs stored under stable ids, composed into closed curve loops and then
//! into plane surfaces with holes.
//!
//! ## Architecture
//!
//! ```text
//! Points → Curves (line / arc) → CurveLoops → Surfaces → ResolvedSurface
//!        ╰──────────────── EntityStore (tombstoned arenas) ───────────────╯
//! ```
//!
//! Every entity lives in an [`EntityStore`]. Entities never change after
//! creation; deletion tombstones the id and references taken before the
//! deletion keep failing with [`TopologyError::DeletedReference`].
//!
//! ## Example
//!
//! ```rust
//! use glam::DVec3;
//! use planar_domain::{EntityStore, Orientation, SignedCurve};
//!
//! let mut store = EntityStore::default();
//! let corners = [(0.0, 0.0), (10.0, 0.0), (10.0, 1.0), (0.0, 1.0)];
//! let points: Vec<_> = corners
//!     .iter()
//!     .map(|&(x, y)| store.add_point(DVec3::new(x, y, 0.0), None).unwrap())
//!     .collect();
//! let curves: Vec<_> = (0..4)
//!     .map(|i| SignedCurve::forward(store.add_line(points[i], points[(i + 1) % 4]).unwrap()))
//!     .collect();
//!
//! let outer = store.build_loop(&curves).unwrap();
//! let surface = store.build_surface(outer, &[]).unwrap();
//! let resolved = store.resolve_surface(surface).unwrap();
//! assert_eq!(resolved.outer.orientation, Orientation::CounterClockwise);
//! assert_eq!(resolved.outer.primitives.len(), 4);
//! ```

pub mod arena;
pub mod curve;
pub mod error;
pub mod ids;
pub mod loops;
pub mod polygon;
pub mod store;
pub mod surface;

pub use arena::Handle;
pub use curve::{Curve, CurveGeometry, CurveKind, Point};
pub use error::{TopologyError, TopologyResult};
pub use ids::{CurveId, EntityId, EntityKind, LoopId, PointId, SignedCurve, SurfaceId};
pub use loops::{CurveLoop, LoopEdge, Orientation};
pub use store::EntityStore;
pub use surface::{BoundaryPrimitive, PrimitiveKind, ResolvedLoop, ResolvedSurface, Surface, SurfaceLoop};

/// Re-exported so callers can pass geometry settings without a direct
/// dependency on the config crate.
pub use config::constants::DomainConfig;
