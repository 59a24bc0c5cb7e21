//! Block-based MIDI routing engine.
//!
//! One engine covers every switchbox variant: the number of inputs and outputs,
//! the route → (input, output) wiring, how the control value picks a route and
//! how stuck notes are cleaned up are all data in [`EngineConfig`].
//!
//! # Primary API
//!
//! - [`RoutingEngine`]: the per-block driver (`reset()` + `process()`)
//! - [`EngineConfig`]: arity, [`RouteMap`], [`SelectorMode`], [`CleanupPolicy`], [`EventFilter`]
//! - [`NoteTable`]: per-route sounding-note sets
//! - [`RouteSelector`]: control value → route, with edge detection
//!
//! # RT Safety
//!
//! `RoutingEngine::process()` does not allocate, lock, log or block. All
//! storage is sized in `RoutingEngine::new()`.
//!
//! # Example
//!
//! ```ignore
//! use switchbox_core::prelude::*;
//!
//! let config = EngineConfig::new(1, 2)
//!     .routes(RouteMap::new().with_route(&[(0, 0)]).with_route(&[(0, 1)]))
//!     .selector(SelectorMode::Threshold)
//!     .cleanup(CleanupPolicy::ExactNote);
//! let mut engine = RoutingEngine::new(config, midi_urid)?;
//! engine.reset();
//! engine.process(control, &inputs, &mut outputs);
//! ```

#![no_std]

#[cfg(feature = "std")]
extern crate std;

#[macro_use]
extern crate alloc;

pub mod error;
pub use error::{Error, PortDirection, Result};

/// Compatibility layer for no_std + alloc.
pub mod compat;

pub mod cleanup;
pub use cleanup::{CleanupPolicy, CleanupTarget, COARSE_CHANNELS};

pub mod config;
pub use config::{EngineConfig, EventFilter};

pub mod engine;
pub use engine::{BlockPhase, RoutingEngine};

pub mod forward;
pub use forward::{BlockStats, Forwarder};

pub mod note_table;
pub use note_table::{Drain, NoteTable};

pub mod route_map;
pub use route_map::{Connection, OutputSet, RouteMap, RouteSnapshot, MAX_PORTS};

pub mod selector;
pub use selector::{Route, RouteSelector, SelectorMode, Transition};

// Codec types the engine API is expressed in
pub use switchbox_midi::{Event, RawMidiEvent, Sequence, SequenceBuffer, Urid};

/// Convenience prelude for common imports
pub mod prelude {
    pub use crate::{
        CleanupPolicy, CleanupTarget, EngineConfig, EventFilter, RouteMap, RoutingEngine,
        SelectorMode,
    };
    pub use switchbox_midi::{Event, RawMidiEvent, Sequence, SequenceBuffer, Urid};
}
