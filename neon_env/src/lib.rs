//! Neon Matrix Environment Abstraction Layer
//!
//! Everything the matrix needs from the outside world goes through this
//! crate, so the same code runs against the real clock (tokio) and against a
//! virtual clock in tests and simulated runs:
//! - Time (`now()`, `system_time()`, `sleep()`)
//! - Randomness seed (`seed()`)
//!
//! # Example
//!
//! ```ignore
//! use neon_env::{Endpoint, MatrixContext};
//!
//! async fn handshake<Ctx: MatrixContext>(ctx: &Ctx, endpoint: &Endpoint) {
//!     ctx.sleep(Duration::from_millis(500)).await;
//!     tracing::info!(%endpoint, "latency elapsed");
//! }
//! ```

mod context;
mod types;
mod error;
mod tokio_impl;

pub use context::MatrixContext;
pub use types::{Endpoint, DEFAULT_PORT};
pub use error::EnvError;
pub use tokio_impl::TokioContext;
