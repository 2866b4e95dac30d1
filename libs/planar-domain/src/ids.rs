//! # Entity Identifiers
//!
//! Typed integer ids for every entity kind, plus signed curve references used
//! inside loops.
//!
//! ## Example
//!
//! ```rust
//! use planar_domain::{CurveId, SignedCurve};
//!
//! let reversed = SignedCurve::try_from(-3).unwrap();
//! assert_eq!(reversed.curve, CurveId(3));
//! assert!(reversed.reversed);
//! assert_eq!(reversed.to_signed(), -3);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;

use crate::error::TopologyError;

// =============================================================================
// ENTITY KIND
// =============================================================================

/// Kinds of entities that carry an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Geometric point.
    Point,
    /// Line segment or circular arc.
    Curve,
    /// Closed curve loop.
    Loop,
    /// Plane surface.
    Surface,
    /// Sizing field.
    Field,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Point => "point",
            Self::Curve => "curve",
            Self::Loop => "curve loop",
            Self::Surface => "surface",
            Self::Field => "field",
        };
        f.write_str(name)
    }
}

// =============================================================================
// ID TRAIT
// =============================================================================

/// Common behaviour of typed entity ids.
pub trait EntityId: Copy + Eq + Ord + Hash + fmt::Debug + fmt::Display {
    /// Kind reported in lookup errors.
    const KIND: EntityKind;

    /// Wrap a raw integer.
    fn from_raw(raw: u32) -> Self;

    /// Raw integer value.
    fn raw(self) -> u32;
}

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident => $kind:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl EntityId for $name {
            const KIND: EntityKind = EntityKind::$kind;

            fn from_raw(raw: u32) -> Self {
                Self(raw)
            }

            fn raw(self) -> u32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{} {}", Self::KIND, self.0)
            }
        }
    };
}

entity_id!(
    /// Identity of a [`Point`](crate::Point).
    PointId => Point
);
entity_id!(
    /// Identity of a [`Curve`](crate::Curve).
    CurveId => Curve
);
entity_id!(
    /// Identity of a [`CurveLoop`](crate::CurveLoop).
    LoopId => Loop
);
entity_id!(
    /// Identity of a [`Surface`](crate::Surface).
    SurfaceId => Surface
);

// =============================================================================
// SIGNED CURVE REFERENCE
// =============================================================================

/// A curve used forwards (`+id`) or backwards (`-id`) inside a loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct SignedCurve {
    /// Referenced curve.
    pub curve: CurveId,
    /// True when traversed end → start.
    pub reversed: bool,
}

impl SignedCurve {
    /// Forward reference.
    pub fn forward(curve: CurveId) -> Self {
        Self { curve, reversed: false }
    }

    /// Backward reference.
    pub fn backward(curve: CurveId) -> Self {
        Self { curve, reversed: true }
    }

    /// Same curve, opposite direction.
    pub fn flipped(self) -> Self {
        Self {
            curve: self.curve,
            reversed: !self.reversed,
        }
    }

    /// Signed integer form (`-id` when reversed).
    pub fn to_signed(self) -> i64 {
        let id = i64::from(self.curve.0);
        if self.reversed {
            -id
        } else {
            id
        }
    }
}

impl TryFrom<i64> for SignedCurve {
    type Error = TopologyError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        let raw = u32::try_from(value.unsigned_abs())
            .map_err(|_| TopologyError::geometry(format!("curve reference {value} out of range")))?;
        if raw == 0 {
            return Err(TopologyError::geometry("curve reference 0 has no direction"));
        }
        Ok(Self {
            curve: CurveId(raw),
            reversed: value < 0,
        })
    }
}

impl From<SignedCurve> for i64 {
    fn from(value: SignedCurve) -> Self {
        value.to_signed()
    }
}

impl fmt::Display for SignedCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_signed())
    }
}

// =============================================================================
// TESTS
// =============================================================================
