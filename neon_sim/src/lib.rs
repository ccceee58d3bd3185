//! Neon Matrix Runner
//!
//! Drives the neon matrix through its fixed demonstration sequence:
//! - **Driver**: connect, populate, summarize, obfuscate, filter, log
//! - **Context**: a virtual clock so the simulated handshake costs nothing
//!   in tests and `--simulate` runs
//! - **Fault demo**: a caught division by zero with guaranteed cleanup
//!
//! # Usage
//!
//! ```ignore
//! use neon_sim::{driver, MatrixConfig, SimContext};
//!
//! let ctx = SimContext::new(42);
//! let mut rng = ctx.rng(0);
//! let report = driver::run(&ctx, &mut rng, &MatrixConfig::default(), &mut std::io::stdout()).await?;
//! ```

mod config;
mod console;
mod context;
mod error;
pub mod driver;
pub mod fault;
pub mod logger;

pub use config::{MatrixConfig, DEFAULT_ENDPOINT, DEFAULT_HOST};
pub use console::LineCounter;
pub use context::SimContext;
pub use driver::RunReport;
pub use error::DriverError;
pub use fault::FaultOutcome;
pub use logger::NeonLogger;
