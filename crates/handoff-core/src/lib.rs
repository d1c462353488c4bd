pub mod config;
pub mod document;
pub mod error;
pub mod io;
pub mod listing;
pub mod paths;
pub mod staleness;
pub mod steps;
pub mod validate;
pub mod vcs;

pub use error::{HandoffError, Result};
