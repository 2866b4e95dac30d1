//! # Session
//!
//! Owns the entity store, the field graph and the size bounds of one domain.
//! Commands are applied synchronously; each one either succeeds and is
//! journaled, or fails and leaves the session as it was.
//!
//! ## Example
//!
//! ```rust
//! use domain_session::{Command, Session, SessionError};
//!
//! let mut session = Session::default();
//! session.apply(Command::Point { id: None, x: 4.0, y: 0.5, z: 0.0, size: None }).unwrap();
//! assert_eq!(session.journal().len(), 1);
//!
//! assert!(matches!(
//!     session.export_domain(),
//!     Err(SessionError::IncompleteDomain { .. })
//! ));
//! ```

#[cfg(test)]
mod tests;

use glam::DVec3;
use std::collections::BTreeMap;

use config::constants::{DomainConfig, SizeBounds};
use planar_domain::{CurveId, EntityKind, EntityStore, LoopId, PointId, SurfaceId, TopologyError};
use sizing_field::{FieldGraph, FieldId, ThresholdParams};

use crate::command::Command;
use crate::error::{SessionError, SessionResult};
use crate::export::MeshDomain;
use crate::journal;

/// Effect of a successfully applied command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// An entity or field was created.
    Created {
        /// Kind of the new entity.
        kind: EntityKind,
        /// Its id.
        id: u32,
    },
    /// An entity or field was deleted.
    Deleted {
        /// Kind of the deleted entity.
        kind: EntityKind,
        /// Its id.
        id: u32,
    },
    /// Background selection or size bounds changed.
    Updated,
}

/// A meshing domain under construction.
#[derive(Debug, Clone, Default)]
pub struct Session {
    store: EntityStore,
    fields: FieldGraph,
    bounds: SizeBounds,
    journal: Vec<Command>,
}

impl Session {
    /// Create an empty session.
    pub fn new(config: DomainConfig) -> Self {
        Self {
            store: EntityStore::new(config),
            ..Self::default()
        }
    }

    /// Rebuild a session by applying `commands` in order.
    pub fn replay(config: DomainConfig, commands: impl IntoIterator<Item = Command>) -> SessionResult<Self> {
        let mut session = Self::new(config);
        for command in commands {
            session.apply(command)?;
        }
        Ok(session)
    }

    /// Rebuild a session from a JSON-lines journal.
    pub fn from_jsonl(config: DomainConfig, text: &str) -> SessionResult<Self> {
        Self::replay(config, journal::from_jsonl(text)?)
    }

    /// Entity store.
    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    /// Field graph.
    pub fn fields(&self) -> &FieldGraph {
        &self.fields
    }

    /// Current size bounds.
    pub fn bounds(&self) -> SizeBounds {
        self.bounds
    }

    /// Successfully applied commands, with assigned ids filled in.
    pub fn journal(&self) -> &[Command] {
        &self.journal
    }

    /// Journal as JSON lines.
    pub fn to_jsonl(&self) -> SessionResult<String> {
        journal::to_jsonl(&self.journal)
    }

    // =========================================================================
    // COMMANDS
    // =========================================================================

    /// Apply one command.
    pub fn apply(&mut self, command: Command) -> SessionResult<Outcome> {
        let outcome = self.execute(&command)?;
        let recorded = match outcome {
            Outcome::Created { id, .. } => command.with_assigned_id(id),
            _ => command,
        };
        self.journal.push(recorded);
        Ok(outcome)
    }

    fn execute(&mut self, command: &Command) -> SessionResult<Outcome> {
        let store = &mut self.store;
        let fields = &mut self.fields;
        let outcome = match command {
            Command::Point { id, x, y, z, size } => {
                let position = DVec3::new(*x, *y, *z);
                let id = match id {
                    Some(id) => store.insert_point(PointId(*id), position, *size)?,
                    None => store.add_point(position, *size)?,
                };
                created(EntityKind::Point, id.0)
            }
            Command::Line { id, start, end } => {
                let (start, end) = (PointId(*start), PointId(*end));
                let id = match id {
                    Some(id) => store.insert_line(CurveId(*id), start, end)?,
                    None => store.add_line(start, end)?,
                };
                created(EntityKind::Curve, id.0)
            }
            Command::Arc { id, start, center, end } => {
                let (start, center, end) = (PointId(*start), PointId(*center), PointId(*end));
                let id = match id {
                    Some(id) => store.insert_arc(CurveId(*id), start, center, end)?,
                    None => store.add_arc(start, center, end)?,
                };
                created(EntityKind::Curve, id.0)
            }
            Command::CurveLoop { id, curves } => {
                let id = match id {
                    Some(id) => store.insert_loop(LoopId(*id), curves)?,
                    None => store.build_loop(curves)?,
                };
                created(EntityKind::Loop, id.0)
            }
            Command::PlaneSurface { id, loops } => {
                let Some((&outer, holes)) = loops.split_first() else {
                    return Err(TopologyError::geometry("plane surface needs an outer loop").into());
                };
                let holes: Vec<_> = holes.iter().copied().map(LoopId).collect();
                let id = match id {
                    Some(id) => store.insert_surface(SurfaceId(*id), LoopId(outer), &holes)?,
                    None => store.build_surface(LoopId(outer), &holes)?,
                };
                created(EntityKind::Surface, id.0)
            }
            Command::Delete { kind, id } => {
                match kind {
                    EntityKind::Field => fields.delete(FieldId(*id))?,
                    _ => store.delete(*kind, *id)?,
                }
                Outcome::Deleted { kind: *kind, id: *id }
            }
            Command::Attractor { id, points, curves } => {
                let points: Vec<_> = points.iter().copied().map(PointId).collect();
                let curves: Vec<_> = curves.iter().copied().map(CurveId).collect();
                let id = match id {
                    Some(id) => fields.insert_attractor(FieldId(*id), store, &points, &curves)?,
                    None => fields.define_attractor(store, &points, &curves)?,
                };
                created(EntityKind::Field, id.0)
            }
            Command::MathEval { id, expr, deps } => {
                let deps: BTreeMap<_, _> = deps.iter().map(|(name, f)| (name.clone(), FieldId(*f))).collect();
                let id = match id {
                    Some(id) => fields.insert_math_eval(FieldId(*id), expr, &deps)?,
                    None => fields.define_math_eval(expr, &deps)?,
                };
                created(EntityKind::Field, id.0)
            }
            Command::Threshold {
                id,
                input,
                size_min,
                size_max,
                dist_min,
                dist_max,
                sigmoid,
            } => {
                let params = ThresholdParams {
                    size_min: *size_min,
                    size_max: *size_max,
                    dist_min: *dist_min,
                    dist_max: *dist_max,
                    sigmoid: *sigmoid,
                };
                let id = match id {
                    Some(id) => fields.insert_threshold(FieldId(*id), FieldId(*input), params)?,
                    None => fields.define_threshold(FieldId(*input), params)?,
                };
                created(EntityKind::Field, id.0)
            }
            Command::Min { id, fields: inputs } => {
                let inputs: Vec<_> = inputs.iter().copied().map(FieldId).collect();
                let id = match id {
                    Some(id) => fields.insert_min(FieldId(*id), &inputs)?,
                    None => fields.define_min(&inputs)?,
                };
                created(EntityKind::Field, id.0)
            }
            Command::Background { field } => {
                fields.set_background(FieldId(*field))?;
                Outcome::Updated
            }
            Command::ClearBackground => {
                fields.clear_background();
                Outcome::Updated
            }
            Command::LengthMin { value } => {
                self.bounds = self.bounds.with_min(*value)?;
                Outcome::Updated
            }
            Command::LengthMax { value } => {
                self.bounds = self.bounds.with_max(*value)?;
                Outcome::Updated
            }
        };
        Ok(outcome)
    }

    // =========================================================================
    // EXPORT
    // =========================================================================

    /// Assemble the mesher input.
    ///
    /// Fails with `IncompleteDomain` when there is no live surface or no
    /// background field.
    pub fn export_domain(&self) -> SessionResult<MeshDomain> {
        if self.store.count(EntityKind::Surface) == 0 {
            return Err(SessionError::incomplete("no plane surface has been defined"));
        }
        let background = self
            .fields
            .background_field(self.bounds)?
            .ok_or_else(|| SessionError::incomplete("no background field is set"))?;

        let surfaces = self
            .store
            .surfaces()
            .map(|(id, _)| self.store.resolve_surface(id))
            .collect::<Result<Vec<_>, _>>()?;

        let point_sizes = self
            .store
            .points()
            .filter_map(|(id, point)| point.size_hint.map(|size| (id, self.bounds.clamp(size))))
            .collect();

        log::info!(
            "Exported {} surface(s) with background {} clamped to [{}, {}]",
            surfaces.len(),
            background.field(),
            self.bounds.min,
            self.bounds.max
        );
        Ok(MeshDomain {
            surfaces,
            background,
            point_sizes,
        })
    }
}

fn created(kind: EntityKind, id: u32) -> Outcome {
    Outcome::Created { kind, id }
}
