//! # Generational Arena
//!
//! Id-keyed storage with tombstones. Each id slot remembers a generation that
//! is bumped whenever the id is re-used after deletion, so a [`Handle`]
//! captured before the deletion keeps failing instead of aliasing the new
//! entity.
//!
//! ## Lookup Rules
//!
//! - id never created → [`ArenaError::NotFound`]
//! - id tombstoned, or handle from an older generation → [`ArenaError::Deleted`]
//! - deleting an id that is not live → [`ArenaError::NotFound`]
//!
//! ## Example
//!
//! ```rust
//! use planar_domain::arena::{Arena, ArenaError};
//! use planar_domain::PointId;
//!
//! let mut arena: Arena<PointId, &str> = Arena::new();
//! let old = arena.insert(PointId(1), "a").unwrap();
//! arena.remove(PointId(1)).unwrap();
//! arena.insert(PointId(1), "b").unwrap();
//!
//! assert!(matches!(arena.resolve(old), Err(ArenaError::Deleted { .. })));
//! assert_eq!(arena.get(PointId(1)), Ok(&"b"));
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::marker::PhantomData;
use thiserror::Error;

use crate::ids::{EntityId, EntityKind};

// =============================================================================
// HANDLE
// =============================================================================

/// An id pinned to the generation that was live when the handle was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Handle<I> {
    /// Entity id.
    pub id: I,
    /// Slot generation at capture time.
    pub generation: u32,
}

// =============================================================================
// ERRORS
// =============================================================================

/// Lookup and insertion failures of an [`Arena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ArenaError {
    /// The id was never created, or is not live when deleting.
    #[error("{kind} {id} not found")]
    NotFound {
        /// Entity kind.
        kind: EntityKind,
        /// Raw id.
        id: u32,
    },

    /// The id (or the handle's generation) was deleted.
    #[error("{kind} {id} was deleted")]
    Deleted {
        /// Entity kind.
        kind: EntityKind,
        /// Raw id.
        id: u32,
    },

    /// Insertion at an id that is still live.
    #[error("{kind} {id} already exists")]
    InUse {
        /// Entity kind.
        kind: EntityKind,
        /// Raw id.
        id: u32,
    },

    /// Ids start at 1.
    #[error("{kind} id 0 is reserved")]
    ZeroId {
        /// Entity kind.
        kind: EntityKind,
    },
}

// =============================================================================
// ARENA
// =============================================================================

#[derive(Debug, Clone)]
struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// Tombstoning map from typed ids to values.
#[derive(Debug, Clone)]
pub struct Arena<I, T> {
    slots: BTreeMap<u32, Slot<T>>,
    next_auto: u32,
    _id: PhantomData<I>,
}

impl<I: EntityId, T> Default for Arena<I, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: EntityId, T> Arena<I, T> {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self {
            slots: BTreeMap::new(),
            next_auto: 1,
            _id: PhantomData,
        }
    }

    /// Next id handed out by automatic allocation.
    ///
    /// Automatic ids grow past every id ever inserted, so they never land on
    /// a tombstoned slot.
    pub fn next_id(&self) -> I {
        I::from_raw(self.next_auto)
    }

    /// Whether `id` is currently live.
    pub fn contains(&self, id: I) -> bool {
        self.slots
            .get(&id.raw())
            .is_some_and(|slot| slot.value.is_some())
    }

    /// Insert `value` at `id`.
    pub fn insert(&mut self, id: I, value: T) -> Result<Handle<I>, ArenaError> {
        let raw = id.raw();
        if raw == 0 {
            return Err(ArenaError::ZeroId { kind: I::KIND });
        }
        let generation = match self.slots.get_mut(&raw) {
            Some(slot) if slot.value.is_some() => {
                return Err(ArenaError::InUse { kind: I::KIND, id: raw });
            }
            Some(slot) => {
                slot.generation += 1;
                slot.value = Some(value);
                slot.generation
            }
            None => {
                self.slots.insert(raw, Slot { generation: 0, value: Some(value) });
                0
            }
        };
        self.next_auto = self.next_auto.max(raw.saturating_add(1));
        Ok(Handle { id, generation })
    }

    /// Insert `value` at the next automatic id.
    pub fn push(&mut self, value: T) -> Result<Handle<I>, ArenaError> {
        self.insert(self.next_id(), value)
    }

    /// Look up a live entity by id.
    pub fn get(&self, id: I) -> Result<&T, ArenaError> {
        match self.slots.get(&id.raw()) {
            None => Err(ArenaError::NotFound { kind: I::KIND, id: id.raw() }),
            Some(Slot { value: None, .. }) => Err(ArenaError::Deleted { kind: I::KIND, id: id.raw() }),
            Some(Slot { value: Some(value), .. }) => Ok(value),
        }
    }

    /// Current handle of a live id.
    pub fn handle(&self, id: I) -> Result<Handle<I>, ArenaError> {
        self.get(id)?;
        let generation = self.slots.get(&id.raw()).map_or(0, |slot| slot.generation);
        Ok(Handle { id, generation })
    }

    /// Look up through a handle, failing if its generation is gone.
    pub fn resolve(&self, handle: Handle<I>) -> Result<&T, ArenaError> {
        match self.slots.get(&handle.id.raw()) {
            None => Err(ArenaError::NotFound { kind: I::KIND, id: handle.id.raw() }),
            Some(slot) if slot.generation != handle.generation => {
                Err(ArenaError::Deleted { kind: I::KIND, id: handle.id.raw() })
            }
            Some(Slot { value: None, .. }) => {
                Err(ArenaError::Deleted { kind: I::KIND, id: handle.id.raw() })
            }
            Some(Slot { value: Some(value), .. }) => Ok(value),
        }
    }

    /// Tombstone a live id and return its value.
    pub fn remove(&mut self, id: I) -> Result<T, ArenaError> {
        self.slots
            .get_mut(&id.raw())
            .and_then(|slot| slot.value.take())
            .ok_or(ArenaError::NotFound { kind: I::KIND, id: id.raw() })
    }

    /// Live entries in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (I, &T)> + '_ {
        self.slots
            .iter()
            .filter_map(|(raw, slot)| slot.value.as_ref().map(|v| (I::from_raw(*raw), v)))
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.slots.values().filter(|slot| slot.value.is_some()).count()
    }

    /// Whether no entry is live.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// =============================================================================
// TESTS
// =============================================================================
