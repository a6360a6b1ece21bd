//! Expense split construction and checks.

pub mod allocation;
pub mod builder;
pub mod error;

pub use allocation::{allocate_by_percentages, allocate_equal};
pub use builder::{SplitStrategy, build_splits, validate_expense};
pub use error::SplitError;
