//! Synthetic data point generator.

use chrono::{DateTime, Utc};
use rand::distributions::Uniform;
use rand::Rng;
use rand_distr::{Distribution, Exp1};
use serde::{Deserialize, Serialize};
use std::iter::FusedIterator;

/// Categories a data point is drawn from.
pub const CATEGORIES: [&str; 4] = ["neural", "quantum", "bio", "cyber"];

/// Number of points produced when the caller does not say.
pub const DEFAULT_STREAM_COUNT: usize = 100;

/// Scale (mean) of the exponential value distribution.
pub const VALUE_SCALE: f64 = 2.0;

/// Half-open coordinate range `[low, high)`.
pub const COORDINATE_RANGE: (f64, f64) = (-100.0, 100.0);

/// One synthetic observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    /// `node_0000`, `node_0001`, ...
    pub id: String,
    pub category: String,
    pub value: f64,
    pub timestamp: DateTime<Utc>,
    pub coordinates: [f64; 3],
}

/// Lazy, finite stream of [`DataPoint`]s.
///
/// Created by [`neon_data_generator`]. Borrows the caller's RNG so a seeded
/// RNG yields a reproducible stream.
pub struct DataStream<'a, R: Rng + ?Sized> {
    rng: &'a mut R,
    next_index: usize,
    count: usize,
    coordinates: Uniform<f64>,
    pinned_timestamp: Option<DateTime<Utc>>,
}

impl<'a, R: Rng + ?Sized> DataStream<'a, R> {
    /// Stamps every point with `timestamp` instead of the wall clock.
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.pinned_timestamp = Some(timestamp);
        self
    }

    fn sample_point(&mut self, index: usize) -> DataPoint {
        let category = CATEGORIES[self.rng.gen_range(0..CATEGORIES.len())];
        let unit: f64 = Exp1.sample(&mut *self.rng);
        let coordinates = [
            self.coordinates.sample(&mut *self.rng),
            self.coordinates.sample(&mut *self.rng),
            self.coordinates.sample(&mut *self.rng),
        ];

        DataPoint {
            id: format!("node_{index:04}"),
            category: category.to_string(),
            value: unit * VALUE_SCALE,
            timestamp: self.pinned_timestamp.unwrap_or_else(Utc::now),
            coordinates,
        }
    }
}

impl<'a, R: Rng + ?Sized> Iterator for DataStream<'a, R> {
    type Item = DataPoint;

    fn next(&mut self) -> Option<DataPoint> {
        if self.next_index >= self.count {
            return None;
        }
        let index = self.next_index;
        self.next_index += 1;
        Some(self.sample_point(index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.next_index;
        (remaining, Some(remaining))
    }
}

impl<'a, R: Rng + ?Sized> ExactSizeIterator for DataStream<'a, R> {}

impl<'a, R: Rng + ?Sized> FusedIterator for DataStream<'a, R> {}

/// Returns a generator of `count` cyberpunk-themed data points.
///
/// Calling it again starts a fresh stream.
pub fn neon_data_generator<R: Rng + ?Sized>(rng: &mut R, count: usize) -> DataStream<'_, R> {
    DataStream {
        rng,
        next_index: 0,
        count,
        coordinates: Uniform::new(COORDINATE_RANGE.0, COORDINATE_RANGE.1),
        pinned_timestamp: None,
    }
}
