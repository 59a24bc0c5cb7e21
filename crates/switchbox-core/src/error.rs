//! Error types for switchbox-core.
//!
//! Errors only come out of construction. Once an engine exists, `process()`
//! has no failure path: malformed MIDI passes through and full buffers drop.

use core::fmt;

use thiserror::Error;

/// Which side of the engine a port belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortDirection {
    Input,
    Output,
}

impl fmt::Display for PortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortDirection::Input => f.write_str("input"),
            PortDirection::Output => f.write_str("output"),
        }
    }
}

/// Error type for switchbox-core operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Routing table has no routes")]
    NoRoutes,

    #[error("Invalid {direction} port count: {count}. Must be between 1 and {max}")]
    PortCount {
        direction: PortDirection,
        count: usize,
        max: usize,
    },

    #[error("Route {route} uses {direction} {index}, but only {count} exist")]
    PortOutOfRange {
        route: usize,
        direction: PortDirection,
        index: usize,
        count: usize,
    },

    #[error("Route {route} connects input {input} to output {output} more than once")]
    DuplicateConnection {
        route: usize,
        input: usize,
        output: usize,
    },

    #[error("Threshold selection needs exactly {expected} routes, found {found}")]
    RouteCountMismatch { expected: usize, found: usize },
}

/// Result type alias.
pub type Result<T> = core::result::Result<T, Error>;
