//! Neon Matrix Core
//!
//! A toy in-memory network of neural nodes and the helpers around it:
//! 1. **Matrix**: nodes keyed by id, a four-state mainframe connection status
//! 2. **Stream**: lazy synthetic data points and their grouped summary
//! 3. **Cipher**: reversible XOR obfuscation (not encryption)
//! 4. **Perf**: higher-order wall-clock timing wrappers

pub mod cipher;
pub mod error;
pub mod geometry;
pub mod matrix;
pub mod node;
pub mod perf;
pub mod stream;
pub mod summary;

// Re-export key types for convenience
pub use error::MatrixError;
pub use matrix::{ConnectionStatus, NeonMatrix};
pub use node::NeuralNode;
pub use stream::{neon_data_generator, DataPoint, DataStream};
pub use summary::{CategoryStats, DataSummary};
