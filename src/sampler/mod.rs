//! Random post selection under a temporal-distribution strategy.
//!
//! Every draw is a pure function of the view, the histogram, and an injected
//! [`rand::Rng`]. Seeding the generator (`StdRng::seed_from_u64`) makes draws reproducible.

pub mod select;
pub mod strategy;

pub use select::{Selection, balanced_buckets, bucket_size, pick_index, recent_window_len, select};
pub use strategy::{ParseStrategyError, Strategy};
