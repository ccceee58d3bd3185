//! Run configuration.

use crate::error::DriverError;
use neon_env::Endpoint;

/// Host the driver connects to by default.
pub const DEFAULT_HOST: &str = "neon.cyberpunk.net";

/// `host:port` form of the default endpoint, as accepted by `--endpoint`.
pub const DEFAULT_ENDPOINT: &str = "neon.cyberpunk.net:2077";

/// Configuration for a driver run.
#[derive(Debug, Clone)]
pub struct MatrixConfig {
    /// Master seed (0 = pick a random seed at startup)
    pub seed: u64,

    /// Mainframe address
    pub endpoint: Endpoint,

    /// Matrix size passed to `NeonMatrix::with_size`
    pub matrix_size: usize,

    /// Nodes added after a successful connection
    pub node_count: usize,

    /// Node coordinates are drawn from `[-node_spread, node_spread)`
    pub node_spread: f64,

    /// Data points generated for the summary
    pub sample_count: usize,

    /// `data_flow` above which a node counts as high-flow
    pub high_flow_threshold: f64,

    /// Hex characters of the obfuscated payload shown on the console
    pub preview_len: usize,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            endpoint: Endpoint::with_default_port(DEFAULT_HOST),
            matrix_size: 2048,
            node_count: 10,
            node_spread: 50.0,
            sample_count: 50,
            high_flow_threshold: 5.0,
            preview_len: 50,
        }
    }
}

impl MatrixConfig {
    /// Sets the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the mainframe endpoint.
    pub fn with_endpoint(mut self, endpoint: Endpoint) -> Self {
        self.endpoint = endpoint;
        self
    }

    /// Sets the number of nodes to add.
    pub fn with_nodes(mut self, node_count: usize) -> Self {
        self.node_count = node_count;
        self
    }

    /// Sets the number of data points to generate.
    pub fn with_samples(mut self, sample_count: usize) -> Self {
        self.sample_count = sample_count;
        self
    }

    /// Sets the high-flow threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.high_flow_threshold = threshold;
        self
    }

    /// Checks values the driver would otherwise panic on.
    pub fn validate(&self) -> Result<(), DriverError> {
        if !(self.node_spread.is_finite() && self.node_spread > 0.0) {
            return Err(DriverError::InvalidConfig(format!(
                "node_spread must be a positive number, got {}",
                self.node_spread
            )));
        }
        if !self.high_flow_threshold.is_finite() {
            return Err(DriverError::InvalidConfig(format!(
                "high_flow_threshold must be finite, got {}",
                self.high_flow_threshold
            )));
        }
        Ok(())
    }
}
