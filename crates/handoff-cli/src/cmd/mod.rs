pub mod list;
pub mod staleness;
pub mod steps;
pub mod validate;
