//! Preparation Estimates

use std::fmt::Debug;

use rand::Rng;

/// Shortest preparation estimate, in minutes.
pub const MIN_PREP_MINUTES: u32 = 15;

/// Longest preparation estimate, in minutes.
pub const MAX_PREP_MINUTES: u32 = 20;

/// Assigns the preparation estimate shown to the customer when an order is placed.
pub trait PrepTimeEstimator: Debug + Send + Sync {
    /// Estimated minutes until the order is ready.
    fn estimate_minutes(&self) -> u32;
}

/// Uniformly random estimate between [`MIN_PREP_MINUTES`] and [`MAX_PREP_MINUTES`] inclusive.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPrepTime;

impl PrepTimeEstimator for RandomPrepTime {
    fn estimate_minutes(&self) -> u32 {
        rand::thread_rng().gen_range(MIN_PREP_MINUTES..=MAX_PREP_MINUTES)
    }
}

/// Always the same estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedPrepTime(pub u32);

impl PrepTimeEstimator for FixedPrepTime {
    fn estimate_minutes(&self) -> u32 {
        self.0
    }
}
