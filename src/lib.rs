//! # Switchbox - MIDI route switching without stuck notes
//!
//! A control value picks one of several routes; events from the inputs are
//! forwarded to the outputs that route connects them to. When the route
//! changes, notes that went down the old route are released so nothing is
//! left hanging.
//!
//! ## Architecture
//!
//! Switchbox is an umbrella crate over:
//! - **switchbox-midi** - MIDI classification and the event sequence format
//! - **switchbox-core** - The routing engine (note table, selector, cleanup, forwarding)
//!
//! This crate adds the five shipped plugins, host features and the instance
//! lifecycle.
//!
//! ## Quick Start
//!
//! ```ignore
//! use switchbox::prelude::*;
//!
//! let descriptor = switchbox::descriptor(4).unwrap();
//! let mut plugin = Switchbox::instantiate(descriptor, HostFeatures::new().with_urid_map(&map))?;
//!
//! plugin.activate();
//! loop {
//!     plugin.run(control, &inputs, &mut outputs);
//! }
//! ```

/// Re-export of switchbox-core for direct access
pub use switchbox_core as core;

/// Re-export of switchbox-midi for direct access
pub use switchbox_midi as midi;

// Engine types
pub use switchbox_core::{
    BlockStats, CleanupPolicy, CleanupTarget, EngineConfig, EventFilter, RouteMap, RoutingEngine,
    SelectorMode,
};

// Wire types
pub use switchbox_midi::{Event, RawMidiEvent, Sequence, SequenceBuffer, Urid};

mod builder;
pub mod descriptor;
mod error;
pub mod host;
mod instance;

pub use builder::SwitchboxBuilder;
pub use descriptor::{descriptor, find, Descriptor, PortKind, Variant};
pub use error::{Error, Result};
pub use host::{HostFeatures, UridMap, MIDI_EVENT, URID_MAP};
pub use instance::Switchbox;

/// Convenience prelude for common imports
pub mod prelude {
    pub use crate::{Descriptor, HostFeatures, Switchbox, SwitchboxBuilder, UridMap, Variant};

    // Engine configuration
    pub use crate::core::{
        CleanupPolicy, CleanupTarget, EngineConfig, EventFilter, RouteMap, SelectorMode,
    };

    // Buffers
    pub use crate::midi::{Event, RawMidiEvent, Sequence, SequenceBuffer, Urid};
}
