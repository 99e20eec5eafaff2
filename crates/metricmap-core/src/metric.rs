//! A single time-series slot and the numeric operations applied to it.

use serde::Serialize;

/// One time series: the current value for a specific label-value tuple.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metric {
    hash: u64,
    value: f64,
    timestamp: u64,
    labels: Vec<String>,
}

impl Metric {
    pub(crate) fn new(hash: u64, labels: Vec<String>) -> Self {
        Self {
            hash,
            value: 0.0,
            timestamp: 0,
            labels,
        }
    }

    /// Identity hash; `0` for the static slot.
    pub fn hash(&self) -> u64 {
        self.hash
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Timestamp of the last write, as supplied by the writer.
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Label values, ordered like the owning store's key set.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn set(&mut self, timestamp: u64, value: f64) {
        self.value = value;
        self.timestamp = timestamp;
    }

    pub fn inc(&mut self, timestamp: u64) {
        self.add(timestamp, 1.0);
    }

    pub fn dec(&mut self, timestamp: u64) {
        self.sub(timestamp, 1.0);
    }

    pub fn add(&mut self, timestamp: u64, delta: f64) {
        self.value += delta;
        self.timestamp = timestamp;
    }

    pub fn sub(&mut self, timestamp: u64, delta: f64) {
        self.value -= delta;
        self.timestamp = timestamp;
    }
}
