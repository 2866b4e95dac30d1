//! # Field Graph
//!
//! Stores sizing fields as nodes of a dependency DAG and evaluates them at
//! query points.
//!
//! ## Evaluation
//!
//! `evaluate` takes `&self` and keeps its memo table on the stack, so a graph
//! can be queried from many threads at once. Each dependency is evaluated at
//! most once per query point.
//!
//! ## Example
//!
//! ```rust
//! use glam::DVec3;
//! use planar_domain::EntityStore;
//! use sizing_field::FieldGraph;
//! use std::collections::BTreeMap;
//!
//! let mut store = EntityStore::default();
//! let p = store.add_point(DVec3::new(4.0, 0.5, 0.0), None).unwrap();
//!
//! let mut graph = FieldGraph::new();
//! let distance = graph.define_attractor(&store, &[p], &[]).unwrap();
//! let deps = BTreeMap::from([("F1".to_string(), distance)]);
//! let size = graph.define_math_eval("0.05*F1 + 0.001", &deps).unwrap();
//!
//! let value = graph.evaluate(size, DVec3::new(0.0, 0.5, 0.0)).unwrap();
//! assert!((value - 0.201).abs() < 1e-12);
//! ```


use glam::DVec3;
use std::collections::{BTreeMap, HashMap};

use config::constants::{SizeBounds, MAX_FIELD_DEPTH, STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
use stacker::maybe_grow;
use planar_domain::arena::{Arena, Handle};
use planar_domain::{CurveId, EntityStore, PointId};

use crate::background::BackgroundField;
use crate::error::{FieldError, FieldResult};
use crate::field::{AttractorSource, FieldId, FieldKind, MathEvalSource, ThresholdParams};

/// Symbols bound to the query point inside formulas.
pub const COORDINATE_SYMBOLS: [&str; 3] = ["x", "y", "z"];

/// Sizing fields keyed by id, plus the background selection.
#[derive(Debug, Clone, Default)]
pub struct FieldGraph {
    nodes: Arena<FieldId, FieldKind>,
    background: Option<FieldId>,
}

impl FieldGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Id the next `define_*` call will use.
    pub fn next_id(&self) -> FieldId {
        self.nodes.next_id()
    }

    // =========================================================================
    // DEFINITION
    // =========================================================================

    /// Define an attractor at the next free id.
    pub fn define_attractor(
        &mut self,
        store: &EntityStore,
        points: &[PointId],
        curves: &[CurveId],
    ) -> FieldResult<FieldId> {
        self.insert_attractor(self.next_id(), store, points, curves)
    }

    /// Define an attractor at `id`.
    ///
    /// Point coordinates and curve geometry are copied now; later deletion
    /// of the source entities does not affect the field.
    pub fn insert_attractor(
        &mut self,
        id: FieldId,
        store: &EntityStore,
        points: &[PointId],
        curves: &[CurveId],
    ) -> FieldResult<FieldId> {
        if points.is_empty() && curves.is_empty() {
            return Err(FieldError::definition("attractor needs at least one point or curve"));
        }
        let points = points
            .iter()
            .map(|&p| -> FieldResult<_> { Ok((p, store.point(p)?.position)) })
            .collect::<FieldResult<Vec<_>>>()?;
        let curves = curves
            .iter()
            .map(|&c| -> FieldResult<_> { Ok((c, store.curve(c)?.geometry)) })
            .collect::<FieldResult<Vec<_>>>()?;
        self.insert_node(id, FieldKind::Attractor(AttractorSource { points, curves }))
    }

    /// Define a formula field at the next free id.
    pub fn define_math_eval(&mut self, expr: &str, deps: &BTreeMap<String, FieldId>) -> FieldResult<FieldId> {
        self.insert_math_eval(self.next_id(), expr, deps)
    }

    /// Define a formula field at `id`.
    ///
    /// Every symbol of `expr` must be a key of `deps` or a coordinate symbol;
    /// dependency names may not shadow coordinates.
    pub fn insert_math_eval(
        &mut self,
        id: FieldId,
        expr: &str,
        deps: &BTreeMap<String, FieldId>,
    ) -> FieldResult<FieldId> {
        let parsed = sizing_expr::parse(expr)?;

        if let Some(name) = deps.keys().find(|name| COORDINATE_SYMBOLS.contains(&name.as_str())) {
            return Err(FieldError::expression(format!(
                "dependency name `{name}` shadows a coordinate"
            )));
        }
        if let Some(name) = parsed
            .symbols()
            .into_iter()
            .find(|name| !COORDINATE_SYMBOLS.contains(name) && !deps.contains_key(*name))
        {
            return Err(FieldError::expression(format!("unknown symbol `{name}`")));
        }

        let dep_ids: Vec<_> = deps.values().copied().collect();
        self.check_dependencies(id, &dep_ids)?;
        let deps = deps
            .iter()
            .map(|(name, &dep)| -> FieldResult<_> { Ok((name.clone(), self.nodes.handle(dep)?)) })
            .collect::<FieldResult<BTreeMap<_, _>>>()?;

        let source = MathEvalSource {
            source: expr.to_string(),
            expr: parsed,
            deps,
        };
        self.insert_node(id, FieldKind::MathEval(source))
    }

    /// Define a threshold ramp at the next free id.
    pub fn define_threshold(&mut self, input: FieldId, params: ThresholdParams) -> FieldResult<FieldId> {
        self.insert_threshold(self.next_id(), input, params)
    }

    /// Define a threshold ramp at `id`.
    pub fn insert_threshold(&mut self, id: FieldId, input: FieldId, params: ThresholdParams) -> FieldResult<FieldId> {
        params.validate()?;
        self.check_dependencies(id, &[input])?;
        let input = self.nodes.handle(input)?;
        self.insert_node(id, FieldKind::Threshold { input, params })
    }

    /// Define a pointwise minimum at the next free id.
    pub fn define_min(&mut self, fields: &[FieldId]) -> FieldResult<FieldId> {
        self.insert_min(self.next_id(), fields)
    }

    /// Define a pointwise minimum at `id`.
    pub fn insert_min(&mut self, id: FieldId, fields: &[FieldId]) -> FieldResult<FieldId> {
        if fields.is_empty() {
            return Err(FieldError::definition("min field needs at least one input"));
        }
        self.check_dependencies(id, fields)?;
        let fields = fields
            .iter()
            .map(|&f| -> FieldResult<_> { Ok(self.nodes.handle(f)?) })
            .collect::<FieldResult<Vec<_>>>()?;
        self.insert_node(id, FieldKind::Min { fields })
    }

    fn insert_node(&mut self, id: FieldId, kind: FieldKind) -> FieldResult<FieldId> {
        let name = kind.name();
        self.nodes.insert(id, kind)?;
        log::debug!("Defined {id} ({name})");
        Ok(id)
    }

    /// Walk the live graph below a new node, by id, without recursion.
    ///
    /// Reaching `id` again means the definition closes a cycle. The longest
    /// chain through the new node, counted in fields, may not exceed
    /// `MAX_FIELD_DEPTH`.
    fn check_dependencies(&self, id: FieldId, deps: &[FieldId]) -> FieldResult<()> {
        let mut chain: HashMap<FieldId, usize> = HashMap::new();
        let mut stack = vec![DependencyFrame::new(id, deps.to_vec())];

        while let Some(frame) = stack.last_mut() {
            if let Some(&next) = frame.deps.get(frame.next) {
                frame.next += 1;
                if next == id {
                    let mut path: Vec<_> = stack.iter().map(|f| f.field).collect();
                    path.push(next);
                    return Err(FieldError::Cyclic { field: id, path });
                }
                if chain.contains_key(&next) {
                    continue;
                }
                let below = match self.nodes.get(next) {
                    Ok(kind) => kind.dependencies().into_iter().map(|h| h.id).collect(),
                    Err(_) => Vec::new(),
                };
                stack.push(DependencyFrame::new(next, below));
            } else {
                let depth = 1 + frame
                    .deps
                    .iter()
                    .map(|dep| chain.get(dep).copied().unwrap_or(0))
                    .max()
                    .unwrap_or(0);
                let field = frame.field;
                stack.pop();
                if field == id {
                    if depth > MAX_FIELD_DEPTH {
                        return Err(FieldError::definition(format!(
                            "{id} would end a dependency chain of {depth} fields (limit {MAX_FIELD_DEPTH})"
                        )));
                    }
                    return Ok(());
                }
                chain.insert(field, depth);
            }
        }
        Ok(())
    }

    // =========================================================================
    // LOOKUP AND DELETION
    // =========================================================================

    /// Look up a live field.
    pub fn get(&self, id: FieldId) -> FieldResult<&FieldKind> {
        Ok(self.nodes.get(id)?)
    }

    /// Live fields in id order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldId, &FieldKind)> + '_ {
        self.nodes.iter()
    }

    /// Tombstone a field.
    ///
    /// Dependents are kept and fail with `DeletedReference` when evaluated.
    /// Deleting the background field clears the background selection.
    pub fn delete(&mut self, id: FieldId) -> FieldResult<()> {
        self.nodes.remove(id)?;
        if self.background == Some(id) {
            self.background = None;
            log::warn!("Deleted {id} was the background field; background cleared");
        }
        log::debug!("Deleted {id}");
        Ok(())
    }

    // =========================================================================
    // BACKGROUND
    // =========================================================================

    /// Mark a live field as the background field.
    pub fn set_background(&mut self, id: FieldId) -> FieldResult<()> {
        self.nodes.get(id)?;
        if let Some(current) = self.background {
            return Err(FieldError::AlreadySet { current });
        }
        self.background = Some(id);
        log::info!("Background field set to {id}");
        Ok(())
    }

    /// Unmark the background field, returning the previous selection.
    pub fn clear_background(&mut self) -> Option<FieldId> {
        let previous = self.background.take();
        if let Some(id) = previous {
            log::info!("Background field {id} cleared");
        }
        previous
    }

    /// Current background field.
    pub fn background(&self) -> Option<FieldId> {
        self.background
    }

    /// Snapshot the graph as a thread-safe background field, or `None` when
    /// no background is selected.
    pub fn background_field(&self, bounds: SizeBounds) -> FieldResult<Option<BackgroundField>> {
        match self.background {
            None => Ok(None),
            Some(id) => {
                let handle = self.nodes.handle(id)?;
                Ok(Some(BackgroundField::new(self.clone(), handle, bounds)))
            }
        }
    }

    // =========================================================================
    // EVALUATION
    // =========================================================================

    /// Raw value of a field at `q`.
    pub fn evaluate(&self, id: FieldId, q: DVec3) -> FieldResult<f64> {
        let handle = self.nodes.handle(id)?;
        self.evaluate_handle(handle, q, &mut HashMap::new())
    }

    /// Value through a generation-checked handle.
    ///
    /// The memo is keyed by handle, so a stale reference never picks up the
    /// value of a field re-created under the same id.
    pub(crate) fn evaluate_handle(
        &self,
        handle: Handle<FieldId>,
        q: DVec3,
        memo: &mut HashMap<Handle<FieldId>, f64>,
    ) -> FieldResult<f64> {
        if let Some(value) = memo.get(&handle) {
            return Ok(*value);
        }
        let kind = self.nodes.resolve(handle)?;
        let value = maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || {
            self.evaluate_node(handle.id, kind, q, memo)
        })?;
        memo.insert(handle, value);
        Ok(value)
    }

    fn evaluate_node(
        &self,
        id: FieldId,
        kind: &FieldKind,
        q: DVec3,
        memo: &mut HashMap<Handle<FieldId>, f64>,
    ) -> FieldResult<f64> {
        let value = match kind {
            FieldKind::Attractor(source) => source.distance(q),
            FieldKind::MathEval(source) => source.expr.evaluate(
                &mut |name| match name {
                    "x" => Ok(q.x),
                    "y" => Ok(q.y),
                    "z" => Ok(q.z),
                    _ => match source.deps.get(name) {
                        Some(dep) => self.evaluate_handle(*dep, q, memo),
                        None => Err(FieldError::expression(format!("unknown symbol `{name}`"))),
                    },
                },
                &mut |divisor| {
                    if divisor == 0.0 {
                        Err(FieldError::domain(id, "division by zero"))
                    } else {
                        Ok(())
                    }
                },
            )?,
            FieldKind::Threshold { input, params } => params.apply(self.evaluate_handle(*input, q, memo)?),
            FieldKind::Min { fields } => {
                let mut min = f64::INFINITY;
                for field in fields {
                    min = min.min(self.evaluate_handle(*field, q, memo)?);
                }
                min
            }
        };
        if !value.is_finite() {
            return Err(FieldError::domain(id, format!("value {value} at {q} is not finite")));
        }
        Ok(value)
    }
}

/// One field on the explicit stack of `check_dependencies`.
struct DependencyFrame {
    field: FieldId,
    deps: Vec<FieldId>,
    next: usize,
}

impl DependencyFrame {
    fn new(field: FieldId, deps: Vec<FieldId>) -> Self {
        Self { field, deps, next: 0 }
    }
}
