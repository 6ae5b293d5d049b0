pub mod engine;

pub use engine::{compute_total, lookup_rank, rank, RankedEntry};
