//! metricmap-core — label-keyed metric storage.
//!
//! Resolves a metric's label-value tuples to persistent numeric slots,
//! creating each slot on first write and returning the same slot on every
//! later access with identical values.
//!
//! # Architecture
//!
//! ```text
//! Gauge
//!   └── MetricMap (one per metric definition)
//!         ├── Opts        fqname seeds the identity hash
//!         ├── LabelKeys   ordered dimension names
//!         ├── static slot zero-label tuple
//!         └── [Metric]    one per distinct label-value tuple
//! ```
//!
//! Stores are single-threaded: every mutating path takes `&mut self`, and
//! callers sharing a store across threads wrap it in their own lock.

pub mod error;
pub mod gauge;
pub mod label;
pub mod map;
pub mod metric;
pub mod opts;
pub mod types;

pub use error::{MapError, MapResult};
pub use gauge::Gauge;
pub use label::{LabelKeys, LabelValue, NO_LABELS};
pub use map::MetricMap;
pub use metric::Metric;
pub use opts::Opts;
pub use types::{MetricType, SlotId};
