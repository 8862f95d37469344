//! CPU-bound busy work.

use std::hint::black_box;

/// Cube every integer below `iterations`, discarding the results.
pub fn burn_cpu(iterations: u64) {
    for i in 0..iterations {
        black_box(i.wrapping_mul(i).wrapping_mul(i));
    }
}
