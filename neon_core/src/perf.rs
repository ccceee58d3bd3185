//! Wall-clock timing wrappers.
//!
//! ```ignore
//! let mut square = monitor_performance("square", |x: u64| x * x);
//! assert_eq!(square(4), 16); // logs "⚡ square executed in 0.0000s"
//! ```

use std::future::Future;
use std::time::{Duration, Instant};
use tracing::info;

/// A value together with how long it took to produce.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timed<T> {
    pub value: T,
    pub elapsed: Duration,
}

/// Runs `f` and measures it.
pub fn timed<T>(f: impl FnOnce() -> T) -> Timed<T> {
    let start = Instant::now();
    let value = f();
    Timed {
        value,
        elapsed: start.elapsed(),
    }
}

fn report(name: &str, elapsed: Duration) {
    info!("⚡ {} executed in {:.4}s", name, elapsed.as_secs_f64());
}

/// Wraps `f` so every call logs its elapsed time.
///
/// The wrapper takes the same single argument as `f`; pass `()` for
/// zero-argument operations and a tuple for several. Return values,
/// including `Err`s, come back untouched.
pub fn monitor_performance<A, R, F>(name: impl Into<String>, mut f: F) -> impl FnMut(A) -> R
where
    F: FnMut(A) -> R,
{
    let name = name.into();
    move |args| {
        let Timed { value, elapsed } = timed(|| f(args));
        report(&name, elapsed);
        value
    }
}

/// Async counterpart of [`monitor_performance`]: awaits `fut` and logs the
/// elapsed time.
pub async fn monitor_future<F: Future>(name: &str, fut: F) -> F::Output {
    let start = Instant::now();
    let output = fut.await;
    report(name, start.elapsed());
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapper_returns_result_unchanged() {
        let mut add = monitor_performance("add", |(a, b): (i32, i32)| a + b);
        assert_eq!(add((2, 3)), 5);
        assert_eq!(add((-1, 1)), 0);
    }

    #[test]
    fn test_wrapper_zero_args() {
        let mut answer = monitor_performance("answer", |()| 42);
        assert_eq!(answer(()), 42);
    }

    #[test]
    fn test_wrapper_propagates_errors() {
        let mut parse = monitor_performance("parse", |s: &str| s.parse::<u8>());
        assert!(parse("300").is_err());
        assert_eq!(parse("7"), Ok(7));
    }

    #[test]
    fn test_wrapper_keeps_closure_state() {
        let mut calls = 0;
        {
            let mut bump = monitor_performance("bump", |()| {
                calls += 1;
                calls
            });
            bump(());
            bump(());
        }
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_timed_measures() {
        let t = timed(|| std::thread::sleep(Duration::from_millis(5)));
        assert!(t.elapsed >= Duration::from_millis(5));
    }

    #[tokio::test]
    async fn test_monitor_future_passes_output() {
        let out = monitor_future("ready", async { "neon" }).await;
        assert_eq!(out, "neon");
    }
}
