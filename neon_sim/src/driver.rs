//! The fixed demonstration sequence.
//!
//! ```text
//! init ─► connect ──fail──► "Exiting..." ─┐
//!            │                            │
//!            ▼                            │
//!        add nodes ─► stream + summary    │
//!            ─► obfuscate payload         │
//!            ─► high-flow list            │
//!            ─► logger scope              │
//!            │                            │
//!            ▼                            ▼
//!        fault demo (always) ─► shutdown line
//! ```
//!
//! Steps from `connect` through the logger scope form the main sequence and
//! are timed as one unit.

use crate::config::MatrixConfig;
use crate::console::LineCounter;
use crate::error::DriverError;
use crate::fault::{self, FaultOutcome};
use crate::logger::NeonLogger;

use chrono::{DateTime, Utc};
use nalgebra::Vector3;
use neon_core::geometry::{calculate_distance, color_brightness, NEON_COLORS};
use neon_core::perf::{monitor_future, monitor_performance};
use neon_core::{neon_data_generator, ConnectionStatus, DataPoint, DataSummary, NeonMatrix};
use neon_env::MatrixContext;
use rand::Rng;
use serde::Serialize;
use std::io::Write;
use tracing::{debug, info, warn};

pub const INIT_MESSAGE: &str = "🌃 Initializing Neon Cyberpunk Matrix...";
pub const ABORT_MESSAGE: &str = "Failed to establish connection. Exiting...";
pub const SHUTDOWN_MESSAGE: &str = "🌃 Matrix shutdown complete. Stay neon! ⚡";
pub const HIGH_FLOW_PREFIX: &str = "🚀 High-flow nodes:";

/// Payload obfuscated in step 6.
#[derive(Debug, Serialize)]
struct AccessPayload<'a> {
    access_code: &'a str,
    user_level: &'a str,
    neural_patterns: Vec<&'a str>,
}

/// Everything a run produced.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub seed: u64,
    pub endpoint: String,
    pub connected: bool,
    pub status: ConnectionStatus,
    /// `NeonMatrix(size=.., nodes=..)`
    pub matrix: String,
    pub node_count: usize,
    pub summary: Option<DataSummary>,
    /// Full hex string, not just the console preview
    pub encrypted_payload: Option<String>,
    pub high_flow_nodes: Option<Vec<String>>,
    /// Largest distance between any two active nodes
    pub max_node_span: Option<f64>,
    pub color_brightness: Vec<usize>,
    pub fault: FaultOutcome,
    /// Lines written to the console sink
    pub console_lines: usize,
}

/// Results of the main sequence; the optional parts stay `None` when the
/// connection fails.
struct MainSequence {
    matrix: NeonMatrix,
    connected: bool,
    summary: Option<DataSummary>,
    encrypted_payload: Option<String>,
    high_flow_nodes: Option<Vec<String>>,
}

/// Runs the whole demonstration, writing console lines to `out`.
pub async fn run<Ctx, R, W>(
    ctx: &Ctx,
    rng: &mut R,
    config: &MatrixConfig,
    out: &mut W,
) -> Result<RunReport, DriverError>
where
    Ctx: MatrixContext + ?Sized,
    R: Rng + ?Sized,
    W: Write,
{
    config.validate()?;
    info!(seed = config.seed, endpoint = %config.endpoint, "starting neon matrix run");

    let mut console = LineCounter::new(out);
    writeln!(console, "{INIT_MESSAGE}")?;

    let main = monitor_future("main", run_main(ctx, rng, config, &mut console)).await?;

    let max_node_span = max_span(&main.matrix);
    let brightness = color_brightness(&NEON_COLORS);
    debug!(?max_node_span, ?brightness, "closure demos");

    let fault = fault::run_fault_demo(&mut console)?;

    writeln!(console, "{SHUTDOWN_MESSAGE}")?;
    console.flush()?;

    Ok(RunReport {
        seed: config.seed,
        endpoint: config.endpoint.to_string(),
        connected: main.connected,
        status: main.matrix.status(),
        matrix: main.matrix.to_string(),
        node_count: main.matrix.len(),
        summary: main.summary,
        encrypted_payload: main.encrypted_payload,
        high_flow_nodes: main.high_flow_nodes,
        max_node_span,
        color_brightness: brightness,
        fault,
        console_lines: console.lines(),
    })
}

async fn run_main<Ctx, R, W>(
    ctx: &Ctx,
    rng: &mut R,
    config: &MatrixConfig,
    out: &mut W,
) -> Result<MainSequence, DriverError>
where
    Ctx: MatrixContext + ?Sized,
    R: Rng + ?Sized,
    W: Write,
{
    let mut matrix = NeonMatrix::with_size(config.matrix_size);

    // Connect
    writeln!(out, "🔌 Connecting to {}...", config.endpoint)?;
    if !matrix.connect_to_mainframe(ctx, &config.endpoint).await {
        let reason = matrix.last_error().unwrap_or("unknown failure");
        writeln!(out, "❌ Connection failed: {reason}")?;
        writeln!(out, "{ABORT_MESSAGE}")?;
        return Ok(MainSequence {
            matrix,
            connected: false,
            summary: None,
            encrypted_payload: None,
            high_flow_nodes: None,
        });
    }
    writeln!(out, "✅ Connection established!")?;

    // Nodes
    let spread = config.node_spread;
    for i in 0..config.node_count {
        let position = Vector3::new(
            rng.gen_range(-spread..spread),
            rng.gen_range(-spread..spread),
            rng.gen_range(-spread..spread),
        );
        let node = matrix.add_neural_node(format!("neural_node_{i}"), position, rng)?;
        writeln!(out, "🧠 Added node: {} at {}", node.id, node.position_label())?;
    }

    // Data stream
    let generated_at: DateTime<Utc> = ctx.system_time().into();
    let data: Vec<DataPoint> = neon_data_generator(rng, config.sample_count)
        .with_timestamp(generated_at)
        .collect();
    let summary = {
        let mut process = monitor_performance("process_data_stream", |points: &[DataPoint]| {
            matrix.process_data_stream(points)
        });
        process(&data)
    };
    writeln!(out, "\n📊 Processed Data Summary:")?;
    writeln!(out, "{summary}")?;

    // Payload
    let mut neural_patterns: Vec<&str> = matrix
        .active_nodes()
        .into_iter()
        .map(|node| node.id.as_str())
        .collect();
    neural_patterns.sort_unstable();
    let payload = serde_json::to_string(&AccessPayload {
        access_code: "NEON_MATRIX_2077",
        user_level: "cyberpunk_elite",
        neural_patterns,
    })?;
    let encrypted = matrix.encrypt_data(&payload);
    let preview = &encrypted[..encrypted.len().min(config.preview_len)];
    writeln!(out, "\n🔐 Encrypted data: {preview}...")?;

    // High-flow filter
    let high_flow: Vec<String> = matrix
        .high_flow_nodes(config.high_flow_threshold)
        .into_iter()
        .map(str::to_string)
        .collect();
    writeln!(out, "\n{HIGH_FLOW_PREFIX} {high_flow:?}")?;
    if high_flow.is_empty() {
        warn!(threshold = config.high_flow_threshold, "no high-flow nodes");
    }

    // Logger scope
    {
        let mut logger = NeonLogger::enter(out)?;
        logger.log("Matrix operations completed successfully!")?;
    }

    Ok(MainSequence {
        matrix,
        connected: true,
        summary: Some(summary),
        encrypted_payload: Some(encrypted),
        high_flow_nodes: Some(high_flow),
    })
}

fn max_span(matrix: &NeonMatrix) -> Option<f64> {
    let nodes = matrix.active_nodes();
    let mut best: Option<f64> = None;
    for (i, a) in nodes.iter().enumerate() {
        for b in &nodes[i + 1..] {
            let d = calculate_distance(a.position.as_slice(), b.position.as_slice());
            best = Some(best.map_or(d, |current| current.max(d)));
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::SimContext;
    use crate::fault::CLEANUP_MESSAGE;
    use crate::logger::{ENTER_BANNER, EXIT_BANNER};
    use neon_core::matrix::CONNECT_LATENCY;
    use neon_env::Endpoint;
    use std::time::Duration;

    async fn run_with(config: MatrixConfig) -> (RunReport, String, SimContext) {
        let ctx = SimContext::new(config.seed);
        let mut rng = ctx.rng(0);
        let mut buf = Vec::new();
        let report = run(&ctx, &mut rng, &config, &mut buf).await.unwrap();
        (report, String::from_utf8(buf).unwrap(), ctx)
    }

    fn count_lines(out: &str, needle: &str) -> usize {
        out.lines().filter(|line| line.contains(needle)).count()
    }

    #[tokio::test]
    async fn test_full_run_with_valid_host() {
        let (report, out, ctx) = run_with(MatrixConfig::default().with_seed(42)).await;

        assert!(report.connected);
        assert_eq!(report.status, ConnectionStatus::Connected);
        assert_eq!(report.node_count, 10);
        assert_eq!(report.matrix, "NeonMatrix(size=2048, nodes=10)");
        assert_eq!(ctx.now(), CONNECT_LATENCY);

        assert_eq!(count_lines(&out, "🧠 Added node: neural_node_"), 10);
        assert!(out.contains("📊 Processed Data Summary:"));
        assert_eq!(count_lines(&out, HIGH_FLOW_PREFIX), 1);
        assert_eq!(count_lines(&out, CLEANUP_MESSAGE), 1);
        assert_eq!(count_lines(&out, ENTER_BANNER), 1);
        assert_eq!(count_lines(&out, EXIT_BANNER), 1);

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.first().copied(), Some(INIT_MESSAGE));
        assert_eq!(lines.last().copied(), Some(SHUTDOWN_MESSAGE));
    }

    #[tokio::test]
    async fn test_summary_covers_all_positive_samples() {
        let (report, _, _) = run_with(MatrixConfig::default().with_seed(7)).await;
        let summary = report.summary.unwrap();

        // Exponential samples are non-negative; zero has probability ~0
        assert_eq!(summary.total_count(), 50);
        for group in &summary.groups {
            assert!(neon_core::stream::CATEGORIES.contains(&group.category.as_str()));
            assert!(group.max >= group.mean);
        }
    }

    #[tokio::test]
    async fn test_payload_decrypts_to_active_node_list() {
        let (report, out, _) = run_with(MatrixConfig::default().with_seed(3).with_nodes(2)).await;
        let encrypted = report.encrypted_payload.unwrap();

        let plain = NeonMatrix::new().decrypt_data(&encrypted).unwrap();
        let value: serde_json::Value = serde_json::from_str(&plain).unwrap();
        assert_eq!(value["access_code"], "NEON_MATRIX_2077");
        assert_eq!(value["user_level"], "cyberpunk_elite");
        assert_eq!(
            value["neural_patterns"],
            serde_json::json!(["neural_node_0", "neural_node_1"])
        );

        // Console shows a 50-character preview only
        assert!(out.contains(&format!("🔐 Encrypted data: {}...", &encrypted[..50])));
    }

    #[tokio::test]
    async fn test_high_flow_nodes_respect_threshold() {
        let (everything, _, _) =
            run_with(MatrixConfig::default().with_seed(11).with_threshold(0.0)).await;
        assert_eq!(everything.high_flow_nodes.unwrap().len(), 10);

        let (nothing, out, _) =
            run_with(MatrixConfig::default().with_seed(11).with_threshold(10.0)).await;
        assert!(nothing.high_flow_nodes.unwrap().is_empty());
        assert!(out.contains(&format!("{HIGH_FLOW_PREFIX} []")));
    }

    #[tokio::test]
    async fn test_invalid_host_stops_main_sequence() {
        let config = MatrixConfig::default()
            .with_seed(42)
            .with_endpoint(Endpoint::new("corp.arasaka.jp", 2077));
        let (report, out, _) = run_with(config).await;

        assert!(!report.connected);
        assert_eq!(report.status, ConnectionStatus::Error);
        assert_eq!(report.node_count, 0);
        assert!(report.summary.is_none());
        assert!(report.high_flow_nodes.is_none());

        assert_eq!(count_lines(&out, ABORT_MESSAGE), 1);
        assert_eq!(
            count_lines(&out, "❌ Connection failed: Invalid host credentials: corp.arasaka.jp"),
            1
        );
        assert_eq!(count_lines(&out, HIGH_FLOW_PREFIX), 0);
        assert_eq!(count_lines(&out, ENTER_BANNER), 0);
        // Fault demo and shutdown still run
        assert_eq!(count_lines(&out, CLEANUP_MESSAGE), 1);
        assert_eq!(out.lines().last(), Some(SHUTDOWN_MESSAGE));
        assert_eq!(
            report.fault,
            FaultOutcome::MathError("division by zero".to_string())
        );
    }

    #[tokio::test]
    async fn test_report_counts_console_lines() {
        let (report, out, _) = run_with(MatrixConfig::default().with_seed(42)).await;
        assert_eq!(report.console_lines, out.lines().count());

        let config = MatrixConfig::default()
            .with_seed(42)
            .with_endpoint(Endpoint::new("corp.arasaka.jp", 2077));
        let (aborted, out, _) = run_with(config).await;
        assert_eq!(aborted.console_lines, out.lines().count());
        assert!(aborted.console_lines < report.console_lines);
    }

    #[tokio::test]
    async fn test_same_seed_same_report() {
        let (a, _, _) = run_with(MatrixConfig::default().with_seed(2077)).await;
        let (b, _, _) = run_with(MatrixConfig::default().with_seed(2077)).await;

        assert_eq!(a.encrypted_payload, b.encrypted_payload);
        assert_eq!(a.high_flow_nodes, b.high_flow_nodes);
        assert_eq!(a.summary, b.summary);
    }

    #[tokio::test]
    async fn test_max_span_present_for_two_or_more_nodes() {
        let (one, _, _) = run_with(MatrixConfig::default().with_seed(1).with_nodes(1)).await;
        assert_eq!(one.max_node_span, None);

        let (many, _, _) = run_with(MatrixConfig::default().with_seed(1)).await;
        let span = many.max_node_span.unwrap();
        // Coordinates lie in [-50, 50), so no pair is further apart than the cube diagonal
        assert!(span > 0.0 && span < 100.0 * 3f64.sqrt());
        assert_eq!(many.color_brightness, vec![6; 5]);
    }

    #[tokio::test]
    async fn test_invalid_config_rejected_before_output() {
        let mut config = MatrixConfig::default();
        config.node_spread = -1.0;
        let ctx = SimContext::new(0);
        let mut rng = ctx.rng(0);
        let mut buf = Vec::new();

        let err = run(&ctx, &mut rng, &config, &mut buf).await.unwrap_err();
        assert!(matches!(err, DriverError::InvalidConfig(_)));
        assert!(buf.is_empty());
        assert_eq!(ctx.now(), Duration::ZERO);
    }
}
