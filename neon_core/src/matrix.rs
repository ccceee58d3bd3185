//! The neural node matrix.
//!
//! Holds the nodes keyed by id, the mainframe connection status and the
//! obfuscation key. The status is a closed four-state enum written only by
//! [`NeonMatrix::connect_to_mainframe`].

use crate::cipher;
use crate::error::MatrixError;
use crate::node::NeuralNode;
use crate::stream::DataPoint;
use crate::summary::{self, DataSummary};

use nalgebra::Vector3;
use neon_env::{Endpoint, MatrixContext};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Default matrix size.
pub const NEON_MATRIX_SIZE: usize = 1024;

/// Static obfuscation key (see [`crate::cipher`]).
pub const DEFAULT_ENCRYPTION_KEY: &str = "cyberpunk2077";

/// Simulated handshake latency.
pub const CONNECT_LATENCY: Duration = Duration::from_millis(500);

/// Required host prefix.
pub const HOST_PREFIX: &str = "neon.";

/// Hosts must be strictly longer than this.
pub const MIN_HOST_LEN: usize = 10;

/// Half-open range `[low, high)` a new node's `data_flow` is drawn from.
pub const DATA_FLOW_RANGE: (f64, f64) = (0.1, 10.0);

// ============================================================================
// CONNECTION STATUS
// ============================================================================

/// Mainframe connection state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    #[default]
    Disconnected,
    Connecting,
    Connected,
    Error,
}

impl ConnectionStatus {
    pub fn name(&self) -> &'static str {
        match self {
            ConnectionStatus::Disconnected => "disconnected",
            ConnectionStatus::Connecting => "connecting",
            ConnectionStatus::Connected => "connected",
            ConnectionStatus::Error => "error",
        }
    }
}

impl std::fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Host check applied during the handshake.
pub fn validate_host(host: &str) -> bool {
    host.starts_with(HOST_PREFIX) && host.len() > MIN_HOST_LEN
}

// ============================================================================
// NEON MATRIX
// ============================================================================

/// In-memory container of [`NeuralNode`]s.
#[derive(Debug, Clone)]
pub struct NeonMatrix {
    size: usize,
    nodes: HashMap<String, NeuralNode>,
    status: ConnectionStatus,
    last_error: Option<String>,
    encryption_key: String,
}

impl NeonMatrix {
    /// Creates an empty, disconnected matrix of [`NEON_MATRIX_SIZE`].
    pub fn new() -> Self {
        Self::with_size(NEON_MATRIX_SIZE)
    }

    /// Creates an empty, disconnected matrix of the given size.
    pub fn with_size(size: usize) -> Self {
        Self {
            size,
            nodes: HashMap::new(),
            status: ConnectionStatus::Disconnected,
            last_error: None,
            encryption_key: DEFAULT_ENCRYPTION_KEY.to_string(),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn status(&self) -> ConnectionStatus {
        self.status
    }

    /// Why the most recent handshake failed; cleared by a successful one.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns a node by id.
    pub fn node(&self, id: &str) -> Option<&NeuralNode> {
        self.nodes.get(id)
    }

    /// Stores a prebuilt node.
    ///
    /// # Errors
    /// `MatrixError::DuplicateNode` if the id is taken; the stored node is
    /// left as it was.
    pub fn insert_node(&mut self, node: NeuralNode) -> Result<&NeuralNode, MatrixError> {
        match self.nodes.entry(node.id.clone()) {
            Entry::Occupied(existing) => Err(MatrixError::DuplicateNode(existing.key().clone())),
            Entry::Vacant(slot) => Ok(&*slot.insert(node)),
        }
    }

    /// Adds a new active node with a random `data_flow` in [`DATA_FLOW_RANGE`].
    ///
    /// # Errors
    /// `MatrixError::DuplicateNode` if `node_id` already exists.
    pub fn add_neural_node<R: Rng + ?Sized>(
        &mut self,
        node_id: impl Into<String>,
        position: Vector3<f64>,
        rng: &mut R,
    ) -> Result<&NeuralNode, MatrixError> {
        let node_id = node_id.into();
        if self.nodes.contains_key(&node_id) {
            return Err(MatrixError::DuplicateNode(node_id));
        }

        let data_flow = rng.gen_range(DATA_FLOW_RANGE.0..DATA_FLOW_RANGE.1);
        debug!(node = %node_id, data_flow, "adding neural node");
        self.insert_node(NeuralNode::new(node_id, position).with_data_flow(data_flow))
    }

    /// All nodes with `is_active` set, in map order.
    pub fn active_nodes(&self) -> Vec<&NeuralNode> {
        self.nodes.values().filter(|node| node.is_active).collect()
    }

    /// Ids of active nodes with `data_flow > threshold`, sorted.
    pub fn high_flow_nodes(&self, threshold: f64) -> Vec<&str> {
        let mut ids: Vec<&str> = self
            .active_nodes()
            .into_iter()
            .filter(|node| node.data_flow > threshold)
            .map(|node| node.id.as_str())
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Simulated mainframe handshake.
    ///
    /// Sets status to `Connecting`, waits [`CONNECT_LATENCY`] on `ctx`, then
    /// validates the host. Ends in `Connected` (returns `true`) or `Error`
    /// (returns `false`). Every failure inside the attempt is caught here.
    pub async fn connect_to_mainframe<Ctx>(&mut self, ctx: &Ctx, endpoint: &Endpoint) -> bool
    where
        Ctx: MatrixContext + ?Sized,
    {
        self.status = ConnectionStatus::Connecting;
        debug!("🔌 Connecting to {}...", endpoint);

        match Self::handshake(ctx, endpoint).await {
            Ok(()) => {
                self.status = ConnectionStatus::Connected;
                self.last_error = None;
                debug!("✅ Connection established!");
                true
            }
            Err(e) => {
                self.status = ConnectionStatus::Error;
                warn!("❌ Connection failed: {}", e);
                self.last_error = Some(e.to_string());
                false
            }
        }
    }

    async fn handshake<Ctx>(ctx: &Ctx, endpoint: &Endpoint) -> Result<(), MatrixError>
    where
        Ctx: MatrixContext + ?Sized,
    {
        ctx.sleep(CONNECT_LATENCY).await;

        if validate_host(&endpoint.host) {
            Ok(())
        } else {
            Err(MatrixError::ConnectionRejected(endpoint.host.clone()))
        }
    }

    /// Summarizes a batch of data points (see [`crate::summary`]).
    pub fn process_data_stream(&self, data: &[DataPoint]) -> DataSummary {
        let summary = summary::summarize(data);
        debug!(
            input = data.len(),
            groups = summary.groups.len(),
            kept = summary.total_count(),
            "processed data stream"
        );
        summary
    }

    /// XOR-obfuscates `data` with the matrix key; returns hex.
    ///
    /// Not a security mechanism (see [`crate::cipher`]).
    pub fn encrypt_data(&self, data: &str) -> String {
        cipher::obfuscate(data, &self.encryption_key)
    }

    /// Reverses [`encrypt_data`](Self::encrypt_data).
    pub fn decrypt_data(&self, encoded: &str) -> Result<String, MatrixError> {
        cipher::reveal(encoded, &self.encryption_key)
    }
}

impl Default for NeonMatrix {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for NeonMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NeonMatrix(size={}, nodes={})", self.size, self.nodes.len())
    }
}
