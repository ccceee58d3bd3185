//! Scoped console logger.
//!
//! [`NeonLogger::enter`] prints the entry banner and returns a guard; the
//! exit banner is printed when the guard drops, whether the scope ends
//! normally, returns early through `?`, or unwinds.

use std::io::{self, Write};

pub const ENTER_BANNER: &str = "🌟 Entering neon logging mode...";
pub const EXIT_BANNER: &str = "🌟 Exiting neon logging mode...";

/// Guard for a neon logging scope.
pub struct NeonLogger<'a, W: Write> {
    out: &'a mut W,
}

impl<'a, W: Write> NeonLogger<'a, W> {
    /// Prints the entry banner and opens the scope.
    pub fn enter(out: &'a mut W) -> io::Result<Self> {
        writeln!(out, "{ENTER_BANNER}")?;
        Ok(Self { out })
    }

    /// Prints one log line inside the scope.
    pub fn log(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "💫 NEON LOG: {message}")
    }
}

impl<W: Write> Drop for NeonLogger<'_, W> {
    fn drop(&mut self) {
        // Drop cannot report a failed write
        let _ = writeln!(self.out, "{EXIT_BANNER}");
        let _ = self.out.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{self, AssertUnwindSafe};

    fn lines(buf: &[u8]) -> Vec<String> {
        String::from_utf8_lossy(buf).lines().map(str::to_string).collect()
    }

    #[test]
    fn test_enter_log_exit_order() {
        let mut buf = Vec::new();
        {
            let mut logger = NeonLogger::enter(&mut buf).unwrap();
            logger.log("Matrix operations completed successfully!").unwrap();
        }
        assert_eq!(
            lines(&buf),
            vec![
                ENTER_BANNER.to_string(),
                "💫 NEON LOG: Matrix operations completed successfully!".to_string(),
                EXIT_BANNER.to_string(),
            ]
        );
    }

    #[test]
    fn test_exit_on_early_return() {
        fn scoped(out: &mut Vec<u8>) -> Result<(), String> {
            let mut logger = NeonLogger::enter(out).map_err(|e| e.to_string())?;
            logger.log("about to bail").map_err(|e| e.to_string())?;
            Err("bail".to_string())
        }

        let mut buf = Vec::new();
        assert!(scoped(&mut buf).is_err());
        assert_eq!(lines(&buf).last().map(String::as_str), Some(EXIT_BANNER));
    }

    #[test]
    fn test_exit_on_panic() {
        let mut buf = Vec::new();
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            let _logger = NeonLogger::enter(&mut buf).unwrap();
            panic!("glitch in the matrix");
        }));

        assert!(result.is_err());
        let out = lines(&buf);
        assert_eq!(out.first().map(String::as_str), Some(ENTER_BANNER));
        assert_eq!(out.last().map(String::as_str), Some(EXIT_BANNER));
    }
}
