//! Weighted random status codes.

use axum::http::StatusCode;
use rand::Rng;

/// 200 twice as likely as each of 300, 400 and 500.
pub const DEFAULT_WEIGHTS: [(StatusCode, u32); 4] = [
    (StatusCode::OK, 2),
    (StatusCode::MULTIPLE_CHOICES, 1),
    (StatusCode::BAD_REQUEST, 1),
    (StatusCode::INTERNAL_SERVER_ERROR, 1),
];

const fn total_weight(entries: &[(StatusCode, u32)]) -> u32 {
    let mut total = 0;
    let mut i = 0;
    while i < entries.len() {
        total += entries[i].1;
        i += 1;
    }
    total
}

const _: () = assert!(total_weight(&DEFAULT_WEIGHTS) > 0);

/// Table of status codes with relative weights.
#[derive(Debug, Clone)]
pub struct StatusTable {
    statuses: Vec<StatusCode>,
    /// Running sum of weights; entry `i` owns draws below `bounds[i]`.
    bounds: Vec<u32>,
    total: u32,
}

impl StatusTable {
    /// Build a table from `(status, weight)` pairs.
    ///
    /// Returns `None` when the table is empty, every weight is zero, or the
    /// weights overflow `u32`.
    pub fn new(entries: &[(StatusCode, u32)]) -> Option<Self> {
        let mut bounds = Vec::with_capacity(entries.len());
        let mut total: u32 = 0;
        for (_, weight) in entries {
            total = total.checked_add(*weight)?;
            bounds.push(total);
        }
        if total == 0 {
            return None;
        }

        Some(Self {
            statuses: entries.iter().map(|(status, _)| *status).collect(),
            bounds,
            total,
        })
    }

    /// Draw a status from the thread-local RNG.
    pub fn choose(&self) -> StatusCode {
        self.choose_with(&mut rand::thread_rng())
    }

    pub fn choose_with<R: Rng + ?Sized>(&self, rng: &mut R) -> StatusCode {
        let draw = rng.gen_range(0..self.total);
        // draw < total == last bound, so the index is always in range
        self.statuses[self.bounds.partition_point(|&bound| bound <= draw)]
    }
}

impl Default for StatusTable {
    fn default() -> Self {
        let mut bounds = Vec::with_capacity(DEFAULT_WEIGHTS.len());
        let mut total = 0;
        for (_, weight) in DEFAULT_WEIGHTS {
            total += weight;
            bounds.push(total);
        }
        Self {
            statuses: DEFAULT_WEIGHTS.iter().map(|(status, _)| *status).collect(),
            bounds,
            total,
        }
    }
}
