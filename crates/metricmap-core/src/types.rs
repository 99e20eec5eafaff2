//! Shared metric store types.

use serde::Serialize;

/// Kind of instrument a store backs. Carried, never interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricType {
    Counter,
    Gauge,
    Histogram,
    Summary,
    Untyped,
}

impl std::fmt::Display for MetricType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MetricType::Counter => "counter",
            MetricType::Gauge => "gauge",
            MetricType::Histogram => "histogram",
            MetricType::Summary => "summary",
            MetricType::Untyped => "untyped",
        };
        f.write_str(s)
    }
}

/// Stable handle to a slot inside one [`MetricMap`](crate::MetricMap).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotId {
    /// The distinguished slot used for the zero-label tuple.
    Static,
    /// A labeled slot, by insertion position.
    Labeled(usize),
}
