//! # Sizing Field
//!
//! Target element size as a scalar function of position, built from a DAG of
//! field definitions and exported to the mesher as a clamped, thread-safe
//! [`BackgroundField`].
//!
//! ## Architecture
//!
//! ```text
//! EntityStore ──snapshot──→ Attractor ─┐
//!                                      ├─→ MathEval / Threshold / Min ─→ background
//!                     x, y, z ─────────┘                                     │
//!                                                        BackgroundField ←───┘ (Arc snapshot + SizeBounds)
//! ```
//!
//! ## Field Kinds
//!
//! | Kind | Value at `q` |
//! |------|--------------|
//! | Attractor | distance to the nearest snapshotted point or curve |
//! | MathEval | formula over dependency values and `x`, `y`, `z` |
//! | Threshold | size ramp over another field's value |
//! | Min | smallest dependency value |

pub mod background;
pub mod error;
pub mod field;
pub mod graph;

pub use background::BackgroundField;
pub use error::{FieldError, FieldResult};
pub use field::{AttractorSource, FieldId, FieldKind, MathEvalSource, ThresholdParams};
pub use graph::{FieldGraph, COORDINATE_SYMBOLS};
