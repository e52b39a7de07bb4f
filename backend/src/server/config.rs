//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use backend::domain::{ConsensusPolicy, Friendship, User, Venue};

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;

/// Seed data loaded into the engine's read-only directories at startup.
///
/// Identity, catalogue, and social-graph management live outside the engine;
/// this bundle is the snapshot the engine serves from.
#[derive(Debug, Clone, Default)]
pub struct DirectorySeed {
    pub users: Vec<User>,
    pub venues: Vec<Venue>,
    pub friendships: Vec<Friendship>,
}

#[cfg(feature = "example-data")]
impl From<backend::domain::DemoData> for DirectorySeed {
    fn from(data: backend::domain::DemoData) -> Self {
        Self {
            users: data.users,
            venues: data.venues,
            friendships: data.friendships,
        }
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) policy: ConsensusPolicy,
    pub(crate) seed: DirectorySeed,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    /// Construct a server configuration from a bind address and a validated
    /// consensus policy.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, policy: ConsensusPolicy) -> Self {
        Self {
            bind_addr,
            policy,
            seed: DirectorySeed::default(),
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    /// Attach directory seed data.
    ///
    /// Without a seed the engine starts with empty directories and every
    /// request referencing a user or venue resolves to not-found.
    #[must_use]
    pub fn with_seed(mut self, seed: DirectorySeed) -> Self {
        self.seed = seed;
        self
    }

    /// Return the socket address the server will bind to.
    #[cfg_attr(
        not(any(test, doctest)),
        expect(
            dead_code,
            reason = "Exercised by integration tests; retained for fixture access"
        )
    )]
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    #[cfg(feature = "metrics")]
    /// Attach Prometheus middleware to the configuration.
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }

    #[cfg(feature = "metrics")]
    /// Return the configured Prometheus middleware, if any.
    #[cfg_attr(
        not(any(test, doctest)),
        expect(
            dead_code,
            reason = "Exercised by integration tests behind feature flags"
        )
    )]
    #[must_use]
    pub fn metrics(&self) -> Option<&PrometheusMetrics> {
        self.prometheus.as_ref()
    }
}
