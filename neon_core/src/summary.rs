//! Grouped summary of a data stream.
//!
//! Pipeline:
//! 1. Keep records with `value > 0`
//! 2. Group by category
//! 3. Per group: mean / max / sample std of `value`, count of timestamps
//! 4. Round to 3 decimals

use crate::stream::DataPoint;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Decimal places kept in every aggregate.
pub const SUMMARY_PRECISION: i32 = 3;

/// A flat record the summary can consume.
pub trait FlatRecord {
    fn category(&self) -> &str;
    fn value(&self) -> f64;
    /// `None` means a missing timestamp, which is left out of `count`.
    fn timestamp(&self) -> Option<DateTime<Utc>>;
}

impl FlatRecord for DataPoint {
    fn category(&self) -> &str {
        &self.category
    }

    fn value(&self) -> f64 {
        self.value
    }

    fn timestamp(&self) -> Option<DateTime<Utc>> {
        Some(self.timestamp)
    }
}

/// Aggregates for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryStats {
    pub category: String,
    pub mean: f64,
    pub max: f64,
    /// Sample standard deviation (n - 1). `None` for a single-value group.
    pub std: Option<f64>,
    /// Number of non-missing timestamps
    pub count: usize,
}

/// Result of [`summarize`], one row per category in name order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataSummary {
    pub groups: Vec<CategoryStats>,
}

impl DataSummary {
    /// Looks up the row for `category`.
    pub fn group(&self, category: &str) -> Option<&CategoryStats> {
        self.groups.iter().find(|g| g.category == category)
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Sum of `count` over all groups.
    pub fn total_count(&self) -> usize {
        self.groups.iter().map(|g| g.count).sum()
    }
}

impl std::fmt::Display for DataSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{:<10} {:>8} {:>8} {:>8} {:>6}",
            "category", "mean", "max", "std", "count"
        )?;
        if self.groups.is_empty() {
            return write!(f, "(empty)");
        }
        for (i, g) in self.groups.iter().enumerate() {
            let std = match g.std {
                Some(s) => format!("{s:.3}"),
                None => "NaN".to_string(),
            };
            write!(
                f,
                "{:<10} {:>8.3} {:>8.3} {:>8} {:>6}",
                g.category, g.mean, g.max, std, g.count
            )?;
            if i + 1 < self.groups.len() {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Summarizes `records` per category.
pub fn summarize<R: FlatRecord>(records: &[R]) -> DataSummary {
    let mut groups: BTreeMap<&str, Vec<&R>> = BTreeMap::new();
    for record in records.iter().filter(|r| r.value() > 0.0) {
        groups.entry(record.category()).or_default().push(record);
    }

    let groups = groups
        .into_iter()
        .map(|(category, members)| {
            let n = members.len() as f64;
            let mean = members.iter().map(|r| r.value()).sum::<f64>() / n;
            let max = members
                .iter()
                .map(|r| r.value())
                .fold(f64::NEG_INFINITY, f64::max);
            let std = (members.len() > 1).then(|| {
                let ss: f64 = members.iter().map(|r| (r.value() - mean).powi(2)).sum();
                (ss / (n - 1.0)).sqrt()
            });
            let count = members.iter().filter(|r| r.timestamp().is_some()).count();

            CategoryStats {
                category: category.to_string(),
                mean: round_to(mean, SUMMARY_PRECISION),
                max: round_to(max, SUMMARY_PRECISION),
                std: std.map(|s| round_to(s, SUMMARY_PRECISION)),
                count,
            }
        })
        .collect();

    DataSummary { groups }
}
