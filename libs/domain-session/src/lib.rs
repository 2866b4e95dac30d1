//! # Domain Session
//!
//! Command-driven construction of a planar meshing domain: geometry in an
//! [`EntityStore`](planar_domain::EntityStore), sizing in a
//! [`FieldGraph`](sizing_field::FieldGraph), and an export step producing the
//! [`MeshDomain`] a triangulator consumes.
//!
//! ## Example
//!
//! ```rust
//! use domain_session::{Command, Session};
//! use glam::DVec3;
//! use planar_domain::SignedCurve;
//!
//! let mut session = Session::default();
//! let corners = [(0.0, 0.0), (10.0, 0.0), (10.0, 1.0), (0.0, 1.0)];
//! for (x, y) in corners {
//!     session.apply(Command::Point { id: None, x, y, z: 0.0, size: None }).unwrap();
//! }
//! for i in 0..4 {
//!     let (start, end) = (i + 1, (i + 1) % 4 + 1);
//!     session.apply(Command::Line { id: None, start, end }).unwrap();
//! }
//! let curves = (1..=4_i64).map(|c| SignedCurve::try_from(c).unwrap()).collect();
//! session.apply(Command::CurveLoop { id: None, curves }).unwrap();
//! session.apply(Command::PlaneSurface { id: None, loops: vec![1] }).unwrap();
//! session.apply(Command::Attractor { id: None, points: vec![1], curves: vec![] }).unwrap();
//! session.apply(Command::Background { field: 1 }).unwrap();
//! session.apply(Command::LengthMin { value: 0.05 }).unwrap();
//!
//! let domain = session.export_domain().unwrap();
//! assert_eq!(domain.surfaces.len(), 1);
//! assert_eq!(domain.size_at(DVec3::ZERO).unwrap(), 0.05);
//! ```

pub mod command;
pub mod error;
pub mod export;
pub mod journal;
pub mod session;

pub use command::Command;
pub use error::{SessionError, SessionResult};
pub use export::MeshDomain;
pub use session::{Outcome, Session};
