//! MetricMap — resolves label-value tuples to persistent metric slots.
//!
//! Every labeled slot is identified by a 64-bit XXH64 digest over the
//! metric's `fqname` followed by each label value in declared order. Slots
//! are kept in an insertion-ordered `Vec` with a hash index beside it, so
//! lookups are O(1) on average while iteration order stays stable for
//! exporters.
//!
//! ```text
//! MetricMap
//!   ├── label_keys  ["host", "pid"]
//!   ├── static      (zero-label tuple)
//!   ├── metrics     [Metric{a,1}, Metric{a,2}, ...]   insertion order
//!   └── index       hash → position in `metrics`
//! ```
//!
//! Hash equality is trusted as tuple equality; no secondary comparison of
//! label values is made on a hit.

use std::collections::HashMap;

use tracing::debug;
use xxhash_rust::xxh64::Xxh64;

use crate::error::{MapError, MapResult};
use crate::label::{LabelKeys, LabelValue, try_copy};
use crate::metric::Metric;
use crate::opts::Opts;
use crate::types::{MetricType, SlotId};

/// Terminates each hashed component. Never occurs inside valid UTF-8, so
/// `["ab", "c"]` and `["a", "bc"]` hash differently.
const COMPONENT_SEPARATOR: u8 = 0xff;

/// Label-keyed storage for one metric definition.
#[derive(Debug)]
pub struct MetricMap {
    kind: MetricType,
    opts: Opts,
    label_keys: LabelKeys,
    metrics: Vec<Metric>,
    index: HashMap<u64, usize>,
    static_metric: Metric,
    static_active: bool,
}

impl MetricMap {
    /// Create a store for `opts` with the given label dimensions.
    ///
    /// With no label keys the static slot is active from the start.
    pub fn new<K: AsRef<str>>(kind: MetricType, opts: Opts, label_keys: &[K]) -> MapResult<Self> {
        let label_keys = LabelKeys::new(label_keys)?;
        let static_active = label_keys.is_empty();

        debug!(
            fqname = %opts.fqname,
            %kind,
            labels = label_keys.len(),
            "metric map created"
        );

        Ok(Self {
            kind,
            opts,
            label_keys,
            metrics: Vec::new(),
            index: HashMap::new(),
            static_metric: Metric::new(0, Vec::new()),
            static_active,
        })
    }

    pub fn kind(&self) -> MetricType {
        self.kind
    }

    pub fn opts(&self) -> &Opts {
        &self.opts
    }

    pub fn label_keys(&self) -> &LabelKeys {
        &self.label_keys
    }

    pub fn label_count(&self) -> usize {
        self.label_keys.len()
    }

    /// Number of labeled slots (the static slot is not counted).
    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    pub fn is_static_active(&self) -> bool {
        self.static_active
    }

    /// Resolve a label-value tuple to its slot.
    ///
    /// An empty tuple addresses the static slot, activating it when
    /// `create` is set. Otherwise `values` must carry exactly
    /// [`label_count`](Self::label_count) entries. A miss returns
    /// `Ok(None)` unless `create` is set, in which case a zero-valued slot
    /// is allocated.
    pub fn resolve<V: LabelValue>(
        &mut self,
        values: &[V],
        create: bool,
    ) -> MapResult<Option<SlotId>> {
        self.check_cardinality(values.len())?;

        if values.is_empty() {
            if !self.static_active && create {
                self.static_active = true;
                debug!(fqname = %self.opts.fqname, "static metric slot activated");
            }
            return Ok(self.static_active.then_some(SlotId::Static));
        }

        let hash = self.identity_hash(values)?;
        if let Some(&pos) = self.index.get(&hash) {
            return Ok(Some(SlotId::Labeled(pos)));
        }
        if !create {
            return Ok(None);
        }

        self.insert(hash, values).map(|pos| Some(SlotId::Labeled(pos)))
    }

    /// Read-only resolution; never creates a slot or activates the static one.
    pub fn lookup<V: LabelValue>(&self, values: &[V]) -> MapResult<Option<SlotId>> {
        self.check_cardinality(values.len())?;

        if values.is_empty() {
            return Ok(self.static_active.then_some(SlotId::Static));
        }

        let hash = self.identity_hash(values)?;
        Ok(self.index.get(&hash).map(|&pos| SlotId::Labeled(pos)))
    }

    /// Current value of an existing slot.
    pub fn get_value<V: LabelValue>(&self, values: &[V]) -> MapResult<f64> {
        self.lookup(values)?
            .and_then(|id| self.metric(id))
            .map(Metric::value)
            .ok_or_else(|| not_found(&self.opts.fqname))
    }

    pub fn metric(&self, id: SlotId) -> Option<&Metric> {
        match id {
            SlotId::Static => self.static_active.then_some(&self.static_metric),
            SlotId::Labeled(pos) => self.metrics.get(pos),
        }
    }

    pub fn metric_mut(&mut self, id: SlotId) -> Option<&mut Metric> {
        match id {
            SlotId::Static if self.static_active => Some(&mut self.static_metric),
            SlotId::Static => None,
            SlotId::Labeled(pos) => self.metrics.get_mut(pos),
        }
    }

    /// The static slot, if active.
    pub fn static_metric(&self) -> Option<&Metric> {
        self.metric(SlotId::Static)
    }

    /// Labeled slots in creation order.
    pub fn metrics(&self) -> &[Metric] {
        &self.metrics
    }

    pub fn set<V: LabelValue>(&mut self, timestamp: u64, value: f64, values: &[V]) -> MapResult<()> {
        self.resolve_for_write(values)?.set(timestamp, value);
        Ok(())
    }

    pub fn inc<V: LabelValue>(&mut self, timestamp: u64, values: &[V]) -> MapResult<()> {
        self.resolve_for_write(values)?.inc(timestamp);
        Ok(())
    }

    pub fn dec<V: LabelValue>(&mut self, timestamp: u64, values: &[V]) -> MapResult<()> {
        self.resolve_for_write(values)?.dec(timestamp);
        Ok(())
    }

    pub fn add<V: LabelValue>(&mut self, timestamp: u64, delta: f64, values: &[V]) -> MapResult<()> {
        self.resolve_for_write(values)?.add(timestamp, delta);
        Ok(())
    }

    pub fn sub<V: LabelValue>(&mut self, timestamp: u64, delta: f64, values: &[V]) -> MapResult<()> {
        self.resolve_for_write(values)?.sub(timestamp, delta);
        Ok(())
    }

    fn resolve_for_write<V: LabelValue>(&mut self, values: &[V]) -> MapResult<&mut Metric> {
        let id = self.resolve(values, true)?;
        let Self {
            opts,
            metrics,
            static_metric,
            static_active,
            ..
        } = self;

        let slot = match id {
            Some(SlotId::Static) if *static_active => Some(static_metric),
            Some(SlotId::Labeled(pos)) => metrics.get_mut(pos),
            _ => None,
        };
        slot.ok_or_else(|| not_found(&opts.fqname))
    }

    fn check_cardinality(&self, count: usize) -> MapResult<()> {
        if count > 0 && count != self.label_keys.len() {
            return Err(MapError::InvalidArgument(format!(
                "metric '{}' expects {} label values, got {count}",
                self.opts.fqname,
                self.label_keys.len()
            )));
        }
        Ok(())
    }

    fn identity_hash<V: LabelValue>(&self, values: &[V]) -> MapResult<u64> {
        let mut state = Xxh64::new(0);
        state.update(self.opts.fqname.as_bytes());
        state.update(&[COMPONENT_SEPARATOR]);

        for (i, value) in values.iter().enumerate() {
            let value = value.label_str().ok_or_else(|| self.missing_value(i))?;
            state.update(value.as_bytes());
            state.update(&[COMPONENT_SEPARATOR]);
        }

        Ok(state.digest())
    }

    /// Allocate and index a new slot. Nothing is inserted unless every
    /// allocation succeeds.
    fn insert<V: LabelValue>(&mut self, hash: u64, values: &[V]) -> MapResult<usize> {
        let mut labels = Vec::new();
        labels.try_reserve_exact(values.len())?;
        for (i, value) in values.iter().enumerate() {
            let value = value.label_str().ok_or_else(|| self.missing_value(i))?;
            labels.push(try_copy(value)?);
        }

        self.metrics.try_reserve(1)?;
        self.index.try_reserve(1)?;

        let pos = self.metrics.len();
        self.metrics.push(Metric::new(hash, labels));
        self.index.insert(hash, pos);

        debug!(
            fqname = %self.opts.fqname,
            hash,
            slots = self.metrics.len(),
            "metric slot created"
        );
        Ok(pos)
    }

    fn missing_value(&self, position: usize) -> MapError {
        let key = self.label_keys.get(position).unwrap_or("?");
        MapError::InvalidArgument(format!(
            "metric '{}' has no value for label '{key}'",
            self.opts.fqname
        ))
    }
}

fn not_found(fqname: &str) -> MapError {
    MapError::NotFound(format!("no series for metric '{fqname}'"))
}
