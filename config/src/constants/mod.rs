//! # Configuration Constants
//!
//! Centralized constants for the planar meshing domain. All geometric
//! tolerances, arc sampling parameters and size bounds are defined here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Sampling**: Polyline resolution used for circular arcs
//! - **Recursion Limits**: Bounds on formula nesting and field chains
//! - **Size Bounds**: Characteristic length clamp applied to sizing fields

use std::fmt;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Geometric tolerance (ε) used for endpoint matching, equidistance checks
/// and degenerate-area detection.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-11));
/// ```
pub const EPSILON: f64 = 1e-9;

// =============================================================================
// SAMPLING CONSTANTS
// =============================================================================

/// Default number of polyline segments used to approximate a full turn of a
/// circular arc. Arcs sweeping less than a full turn get a proportional share.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_ARC_SEGMENTS;
/// assert!(DEFAULT_ARC_SEGMENTS >= 8);
/// ```
pub const DEFAULT_ARC_SEGMENTS: u32 = 64;

/// Minimum number of polyline segments for any arc.
///
/// Two segments keep a sampled arc from collapsing onto its chord.
pub const MIN_ARC_SEGMENTS: u32 = 2;

/// Maximum number of polyline segments for any arc.
pub const MAX_ARC_SEGMENTS: u32 = 4096;

// =============================================================================
// SIZE BOUND CONSTANTS
// =============================================================================

/// Lower clamp applied to sizing-field output when no minimum is configured.
pub const DEFAULT_LENGTH_MIN: f64 = 0.0;

/// Upper clamp applied to sizing-field output when no maximum is configured.
pub const DEFAULT_LENGTH_MAX: f64 = f64::INFINITY;

// =============================================================================
// RECURSION LIMITS
// =============================================================================

/// Deepest formula a MathEval field accepts, counted as AST nesting levels.
///
/// Parentheses, unary minus and every binary operator add one level, so a
/// left-leaning chain like `1 + 1 + ... + 1` counts one level per operator.
///
/// # Example
///
/// ```rust
/// use config::constants::MAX_EXPRESSION_DEPTH;
///
/// let nesting = 40;
/// assert!(nesting < MAX_EXPRESSION_DEPTH);
/// ```
pub const MAX_EXPRESSION_DEPTH: usize = 512;

/// Longest dependency chain between sizing fields, counted in fields.
///
/// A definition that would make any chain longer is rejected.
pub const MAX_FIELD_DEPTH: usize = 1000;

/// Bytes of stack space reserved when growing recursion limits using the
/// `stacker` crate.
///
/// # Examples
/// ```
/// use config::constants::STACKER_STACK_SIZE_BYTES;
/// assert!(STACKER_STACK_SIZE_BYTES >= 1024);
/// ```
pub const STACKER_STACK_SIZE_BYTES: usize = 8 * 1024 * 1024;

/// Remaining stack below which recursive walks switch to a fresh segment of
/// `STACKER_STACK_SIZE_BYTES`.
pub const STACKER_RED_ZONE_BYTES: usize = 256 * 1024;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Computes the number of polyline segments for an arc of the given sweep.
///
/// `segments_per_turn` is the resolution of a full circle; the result is
/// proportional to `|sweep| / 2π`, rounded up and clamped to
/// `MIN_ARC_SEGMENTS..=MAX_ARC_SEGMENTS`.
///
/// # Example
///
/// ```rust
/// use config::constants::{arc_segments_for_sweep, MIN_ARC_SEGMENTS};
/// use std::f64::consts::PI;
///
/// assert_eq!(arc_segments_for_sweep(PI / 2.0, 64), 16);
/// assert_eq!(arc_segments_for_sweep(1e-3, 64), MIN_ARC_SEGMENTS);
/// ```
pub fn arc_segments_for_sweep(sweep: f64, segments_per_turn: u32) -> u32 {
    let share = sweep.abs() / std::f64::consts::TAU;
    let segments = (share * segments_per_turn as f64).ceil() as u32;
    segments.clamp(MIN_ARC_SEGMENTS, MAX_ARC_SEGMENTS)
}

// =============================================================================
// DOMAIN CONFIG
// =============================================================================

/// Geometry settings shared by the entity store, loop composer and surface
/// builder.
///
/// # Examples
/// ```
/// use config::constants::DomainConfig;
/// let config = DomainConfig::default();
/// assert!(config.tolerance > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomainConfig {
    /// Numeric tolerance (ε) for closure, equidistance and area checks.
    pub tolerance: f64,
    /// Polyline segments per full turn when sampling arcs.
    pub arc_segments: u32,
}

impl DomainConfig {
    /// Builds a configuration, rejecting a non-positive tolerance and a
    /// sampling resolution below `MIN_ARC_SEGMENTS`.
    ///
    /// # Examples
    /// ```
    /// use config::constants::DomainConfig;
    /// let cfg = DomainConfig::new(1.0e-6, 128).expect("valid config");
    /// assert_eq!(cfg.arc_segments, 128);
    /// ```
    pub fn new(tolerance: f64, arc_segments: u32) -> Result<Self, ConfigError> {
        if !(tolerance > 0.0) || !tolerance.is_finite() {
            return Err(ConfigError::InvalidTolerance(tolerance));
        }
        if arc_segments < MIN_ARC_SEGMENTS {
            return Err(ConfigError::InvalidArcSegments(arc_segments));
        }
        Ok(Self {
            tolerance,
            arc_segments,
        })
    }
}

impl Default for DomainConfig {
    fn default() -> Self {
        Self {
            tolerance: EPSILON,
            arc_segments: DEFAULT_ARC_SEGMENTS,
        }
    }
}

// =============================================================================
// SIZE BOUNDS
// =============================================================================

/// Characteristic length bounds clamping every sizing value before it
/// reaches the mesher.
///
/// An unset minimum defaults to `0`, an unset maximum to `+inf`.
///
/// # Examples
/// ```
/// use config::constants::SizeBounds;
/// let bounds = SizeBounds::new(Some(0.02), Some(0.1)).expect("valid bounds");
/// assert_eq!(bounds.clamp(0.001), 0.02);
/// assert_eq!(bounds.clamp(0.2011), 0.1);
/// assert_eq!(bounds.clamp(0.05), 0.05);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeBounds {
    /// Smallest admissible element size.
    pub min: f64,
    /// Largest admissible element size.
    pub max: f64,
}

impl SizeBounds {
    /// Builds bounds from optional limits.
    pub fn new(min: Option<f64>, max: Option<f64>) -> Result<Self, ConfigError> {
        let min = min.unwrap_or(DEFAULT_LENGTH_MIN);
        let max = max.unwrap_or(DEFAULT_LENGTH_MAX);
        if min.is_nan() || min < 0.0 || min.is_infinite() {
            return Err(ConfigError::InvalidLengthMin(min));
        }
        if max.is_nan() || max <= 0.0 {
            return Err(ConfigError::InvalidLengthMax(max));
        }
        if min > max {
            return Err(ConfigError::InvertedBounds { min, max });
        }
        Ok(Self { min, max })
    }

    /// Returns a copy with the lower bound replaced.
    pub fn with_min(self, min: f64) -> Result<Self, ConfigError> {
        Self::new(Some(min), Some(self.max))
    }

    /// Returns a copy with the upper bound replaced.
    pub fn with_max(self, max: f64) -> Result<Self, ConfigError> {
        Self::new(Some(self.min), Some(max))
    }

    /// Clamps a raw sizing value into `[min, max]`.
    #[inline]
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

impl Default for SizeBounds {
    fn default() -> Self {
        Self {
            min: DEFAULT_LENGTH_MIN,
            max: DEFAULT_LENGTH_MAX,
        }
    }
}

// =============================================================================
// ERRORS
// =============================================================================

/// Error returned when invalid configuration values are provided.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Raised when tolerance is zero, negative or not finite.
    InvalidTolerance(f64),
    /// Raised when the arc resolution is too coarse to approximate a curve.
    InvalidArcSegments(u32),
    /// Raised when the minimum characteristic length is negative or not finite.
    InvalidLengthMin(f64),
    /// Raised when the maximum characteristic length is not positive.
    InvalidLengthMax(f64),
    /// Raised when the minimum exceeds the maximum.
    InvertedBounds {
        /// Requested lower bound.
        min: f64,
        /// Requested upper bound.
        max: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTolerance(value) => {
                write!(f, "tolerance must be positive and finite: {value}")
            }
            ConfigError::InvalidArcSegments(value) => {
                write!(f, "arc_segments must be >= {MIN_ARC_SEGMENTS}: {value}")
            }
            ConfigError::InvalidLengthMin(value) => {
                write!(f, "characteristic length min must be finite and >= 0: {value}")
            }
            ConfigError::InvalidLengthMax(value) => {
                write!(f, "characteristic length max must be > 0: {value}")
            }
            ConfigError::InvertedBounds { min, max } => {
                write!(f, "characteristic length min {min} exceeds max {max}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
