//! Cleaning stages: duplicate-row removal and column dropping.

mod dedupe;
mod drop;

pub use dedupe::remove_duplicates;
pub use drop::{drop_columns, drop_columns_in_place};
