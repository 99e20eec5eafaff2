//! Metric naming options.

use serde::Serialize;

use crate::error::{MapError, MapResult};

/// Naming options for one metric definition.
///
/// The fully-qualified name (`fqname`) seeds every identity hash computed
/// by the owning [`MetricMap`](crate::MetricMap), so two stores with the
/// same label values but different names never share a hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Opts {
    pub namespace: String,
    pub subsystem: String,
    pub name: String,
    pub help: String,
    pub fqname: String,
}

impl Opts {
    /// Build options, composing `fqname` as `namespace_subsystem_name`.
    ///
    /// Empty namespace or subsystem parts are skipped. Fails with
    /// [`MapError::InvalidArgument`] if `name` or `help` is empty.
    pub fn new(namespace: &str, subsystem: &str, name: &str, help: &str) -> MapResult<Self> {
        let fqname = [namespace, subsystem, name]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join("_");
        Self::with_fqname(namespace, subsystem, name, help, &fqname)
    }

    /// Build options around a precomputed fully-qualified name.
    pub fn with_fqname(
        namespace: &str,
        subsystem: &str,
        name: &str,
        help: &str,
        fqname: &str,
    ) -> MapResult<Self> {
        if name.is_empty() {
            return Err(MapError::InvalidArgument("metric name is empty".to_string()));
        }
        if help.is_empty() {
            return Err(MapError::InvalidArgument(format!(
                "help text for metric '{name}' is empty"
            )));
        }

        Ok(Self {
            namespace: namespace.to_string(),
            subsystem: subsystem.to_string(),
            name: name.to_string(),
            help: help.to_string(),
            fqname: fqname.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fqname_joins_all_parts() {
        let opts = Opts::new("app", "http", "requests", "Total requests").unwrap();
        assert_eq!(opts.fqname, "app_http_requests");
    }

    #[test]
    fn fqname_skips_empty_parts() {
        let opts = Opts::new("", "http", "requests", "help").unwrap();
        assert_eq!(opts.fqname, "http_requests");

        let opts = Opts::new("app", "", "requests", "help").unwrap();
        assert_eq!(opts.fqname, "app_requests");

        let opts = Opts::new("", "", "requests", "help").unwrap();
        assert_eq!(opts.fqname, "requests");
    }

    #[test]
    fn empty_name_or_help_rejected() {
        assert!(matches!(
            Opts::new("app", "", "", "help"),
            Err(MapError::InvalidArgument(_))
        ));
        assert!(matches!(
            Opts::new("app", "", "requests", ""),
            Err(MapError::InvalidArgument(_))
        ));
    }

    #[test]
    fn precomputed_fqname_kept_verbatim() {
        let opts = Opts::with_fqname("x", "y", "z", "help", "app_requests").unwrap();
        assert_eq!(opts.fqname, "app_requests");
        assert_eq!(opts.name, "z");
    }
}
