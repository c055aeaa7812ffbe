use pbs_metrics::KnownBidders;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{engine::FacadeEngine, registration, series::SeriesSet};

/// Errors that could occur while building a [`FacadeEngine`].
#[derive(Debug, Error)]
pub enum BuildError {
    /// The namespace is not a valid metric name prefix.
    #[error("invalid namespace {namespace:?}: must match [a-zA-Z_][a-zA-Z0-9_]*")]
    InvalidNamespace {
        /// The rejected namespace.
        namespace: String,
    },
}

fn is_valid_namespace(namespace: &str) -> bool {
    let mut chars = namespace.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Builder for a [`FacadeEngine`].
pub struct FacadeEngineBuilder {
    namespace: Option<String>,
    known_bidders: KnownBidders,
    account_labels: bool,
    preregistration: bool,
}

impl FacadeEngineBuilder {
    /// Creates a new [`FacadeEngineBuilder`].
    pub fn new() -> Self {
        FacadeEngineBuilder {
            namespace: None,
            known_bidders: KnownBidders::default(),
            account_labels: false,
            preregistration: true,
        }
    }

    /// Sets a prefix for every series name.
    ///
    /// Series are named `<namespace>_<name>`, for example `pbs_requests`.
    ///
    /// Defaults to no prefix.
    #[must_use]
    pub fn with_namespace<N>(mut self, namespace: N) -> Self
    where
        N: Into<String>,
    {
        self.namespace = Some(namespace.into());
        self
    }

    /// Sets the bidders configured for this process.
    ///
    /// The bidder named in a `/setuid` request is recorded as-is only when it is in this set, and as
    /// `unknown` otherwise. Per-adapter series are pre-registered for every bidder in the set.
    ///
    /// Defaults to an empty set.
    #[must_use]
    pub fn with_known_bidders(mut self, known_bidders: KnownBidders) -> Self {
        self.known_bidders = known_bidders;
        self
    }

    /// Sets whether request and adapter request series carry the publisher ID as an `account` label.
    ///
    /// Publisher IDs are not bounded, so each active publisher multiplies the number of series for
    /// those two metrics. Only enable this when the metrics backend is sized for it.
    ///
    /// Defaults to `false`.
    #[must_use]
    pub fn with_account_labels(mut self, account_labels: bool) -> Self {
        self.account_labels = account_labels;
        self
    }

    /// Sets whether every bounded series is described and registered at zero when the engine is
    /// built.
    ///
    /// Registration happens against the recorder that is current when [`build`](Self::build) is
    /// called, so the exporter should be installed first.
    ///
    /// Defaults to `true`.
    #[must_use]
    pub fn with_preregistration(mut self, preregistration: bool) -> Self {
        self.preregistration = preregistration;
        self
    }

    /// Builds the engine.
    ///
    /// # Errors
    ///
    /// If the namespace is not a valid metric name prefix, an error is returned.
    pub fn build(self) -> Result<FacadeEngine, BuildError> {
        if let Some(namespace) = &self.namespace {
            if !is_valid_namespace(namespace) {
                return Err(BuildError::InvalidNamespace { namespace: namespace.clone() });
            }
        }

        if self.account_labels {
            warn!("Account labels enabled; request series grow with the number of publishers.");
        }

        let engine = FacadeEngine {
            series: SeriesSet::new(self.namespace.as_deref()),
            known_bidders: self.known_bidders,
            account_labels: self.account_labels,
        };

        if self.preregistration {
            registration::describe(&engine);
            let registered = registration::preregister(&engine);
            let bidders = engine.known_bidders.len();
            debug!(registered, bidders, "Pre-registered bounded series.");
        }

        Ok(engine)
    }
}

impl Default for FacadeEngineBuilder {
    fn default() -> Self {
        FacadeEngineBuilder::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{is_valid_namespace, BuildError, FacadeEngineBuilder};

    #[test]
    fn namespace_validation() {
        assert!(is_valid_namespace("pbs"));
        assert!(is_valid_namespace("_prebid_server2"));
        assert!(!is_valid_namespace(""));
        assert!(!is_valid_namespace("2pbs"));
        assert!(!is_valid_namespace("pbs-metrics"));
        assert!(!is_valid_namespace("pbs metrics"));
    }

    #[test]
    fn invalid_namespace_fails_build() {
        let result = FacadeEngineBuilder::new()
            .with_namespace("bad.name")
            .with_preregistration(false)
            .build();
        match result {
            Err(BuildError::InvalidNamespace { namespace }) => assert_eq!(namespace, "bad.name"),
            Ok(_) => panic!("build should have failed"),
        }
    }
}
