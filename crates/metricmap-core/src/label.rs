//! Label dimensions: the key set fixed at store creation and the value
//! tuples callers resolve against it.

use std::collections::{HashSet, TryReserveError};

use serde::Serialize;

use crate::error::{MapError, MapResult};

/// An empty label tuple, addressing the static slot.
pub const NO_LABELS: &[&str] = &[];

/// Anything usable as one positional label value.
///
/// `None` models a missing value; resolving a tuple that contains one
/// fails with [`MapError::InvalidArgument`].
pub trait LabelValue {
    fn label_str(&self) -> Option<&str>;
}

impl LabelValue for str {
    fn label_str(&self) -> Option<&str> {
        Some(self)
    }
}

impl LabelValue for String {
    fn label_str(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl<T: LabelValue> LabelValue for Option<T> {
    fn label_str(&self) -> Option<&str> {
        self.as_ref().and_then(LabelValue::label_str)
    }
}

impl<T: LabelValue + ?Sized> LabelValue for &T {
    fn label_str(&self) -> Option<&str> {
        (**self).label_str()
    }
}

/// Copy a string, reporting heap exhaustion instead of aborting.
pub(crate) fn try_copy(s: &str) -> Result<String, TryReserveError> {
    let mut out = String::new();
    out.try_reserve_exact(s.len())?;
    out.push_str(s);
    Ok(out)
}

/// Ordered, immutable list of dimension names for one metric definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LabelKeys {
    keys: Vec<String>,
}

impl LabelKeys {
    /// Copy `keys` in order.
    ///
    /// Empty and duplicate names are rejected; a failed copy surfaces as
    /// [`MapError::AllocationFailure`] with every earlier copy released.
    pub fn new<K: AsRef<str>>(keys: &[K]) -> MapResult<Self> {
        let mut seen = HashSet::with_capacity(keys.len());
        let mut out = Vec::new();
        out.try_reserve_exact(keys.len())?;

        for key in keys {
            let key = key.as_ref();
            if key.is_empty() {
                return Err(MapError::InvalidArgument("empty label key".to_string()));
            }
            if !seen.insert(key) {
                return Err(MapError::InvalidArgument(format!(
                    "duplicate label key '{key}'"
                )));
            }
            out.push(try_copy(key)?);
        }

        Ok(Self { keys: out })
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.keys.get(index).map(String::as_str)
    }

    /// Position of a key in declaration order.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.keys.iter().position(|k| k == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }
}
