//! The neural node record held by a [`NeonMatrix`](crate::NeonMatrix).

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// A single node in the cyberpunk neural network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeuralNode {
    /// Unique identifier within a matrix
    pub id: String,

    /// Position [x, y, z]
    pub position: Vector3<f64>,

    /// Ids of linked nodes.
    ///
    /// Not checked against the matrix: an id here may name a node that was
    /// never added.
    pub connections: Vec<String>,

    /// Flow magnitude
    pub data_flow: f64,

    /// Node participates in `active_nodes()`
    pub is_active: bool,
}

impl NeuralNode {
    /// Creates an active node with no connections and zero flow.
    pub fn new(id: impl Into<String>, position: Vector3<f64>) -> Self {
        Self {
            id: id.into(),
            position,
            connections: Vec::new(),
            data_flow: 0.0,
            is_active: true,
        }
    }

    /// Sets the flow magnitude.
    pub fn with_data_flow(mut self, data_flow: f64) -> Self {
        self.data_flow = data_flow;
        self
    }

    /// Sets the connection list.
    pub fn with_connections<I, S>(mut self, connections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.connections = connections.into_iter().map(Into::into).collect();
        self
    }

    /// Marks the node inactive.
    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Formats the position as `(x, y, z)`.
    pub fn position_label(&self) -> String {
        format!(
            "({:.3}, {:.3}, {:.3})",
            self.position.x, self.position.y, self.position.z
        )
    }
}
