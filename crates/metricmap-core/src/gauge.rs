//! Gauge — a thin instrument wrapper over [`MetricMap`].

use crate::error::MapResult;
use crate::label::LabelValue;
use crate::map::MetricMap;
use crate::opts::Opts;
use crate::types::MetricType;

/// A gauge instrument: a value that can move in either direction.
#[derive(Debug)]
pub struct Gauge {
    map: MetricMap,
}

impl Gauge {
    /// Create a gauge. `name` and `help` must be non-empty.
    pub fn new<K: AsRef<str>>(
        namespace: &str,
        subsystem: &str,
        name: &str,
        help: &str,
        label_keys: &[K],
    ) -> MapResult<Self> {
        let opts = Opts::new(namespace, subsystem, name, help)?;
        let map = MetricMap::new(MetricType::Gauge, opts, label_keys)?;
        Ok(Self { map })
    }

    pub fn opts(&self) -> &Opts {
        self.map.opts()
    }

    pub fn map(&self) -> &MetricMap {
        &self.map
    }

    pub fn set<V: LabelValue>(&mut self, timestamp: u64, value: f64, labels: &[V]) -> MapResult<()> {
        self.map.set(timestamp, value, labels)
    }

    pub fn inc<V: LabelValue>(&mut self, timestamp: u64, labels: &[V]) -> MapResult<()> {
        self.map.inc(timestamp, labels)
    }

    pub fn dec<V: LabelValue>(&mut self, timestamp: u64, labels: &[V]) -> MapResult<()> {
        self.map.dec(timestamp, labels)
    }

    pub fn add<V: LabelValue>(&mut self, timestamp: u64, value: f64, labels: &[V]) -> MapResult<()> {
        self.map.add(timestamp, value, labels)
    }

    pub fn sub<V: LabelValue>(&mut self, timestamp: u64, value: f64, labels: &[V]) -> MapResult<()> {
        self.map.sub(timestamp, value, labels)
    }

    /// Current value; fails with `NotFound` if the tuple was never written.
    pub fn get<V: LabelValue>(&self, labels: &[V]) -> MapResult<f64> {
        self.map.get_value(labels)
    }
}
