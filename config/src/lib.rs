//! # Config Crate
//!
//! Centralized configuration constants for the planar meshing domain.
//! Tolerances, arc sampling resolution and characteristic-length bounds are
//! defined here so that the geometry store, the field engine and the session
//! agree on the same numbers.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{EPSILON, DomainConfig, SizeBounds};
//!
//! // Use EPSILON for floating-point comparisons
//! let value: f64 = 0.00000000001; // 1e-11, smaller than EPSILON (1e-9)
//! assert!(value.abs() < EPSILON);
//!
//! // Default domain settings
//! let cfg = DomainConfig::default();
//! assert!(cfg.arc_segments >= 2);
//!
//! // Unset bounds clamp to [0, +inf)
//! let bounds = SizeBounds::default();
//! assert_eq!(bounds.clamp(0.5), 0.5);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Validated Values**: Runtime settings go through checked constructors
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;
