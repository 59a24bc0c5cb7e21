//! Centralized error type for the switchbox umbrella crate.
//!
//! Wraps engine errors so `?` propagates naturally across crate boundaries.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] switchbox_core::Error),

    /// The host did not provide a feature this plugin requires, given by URI.
    #[error("Missing required host feature: {0}")]
    MissingFeature(&'static str),

    #[error("Unknown plugin URI: {0}")]
    UnknownPlugin(String),
}

pub type Result<T> = std::result::Result<T, Error>;
