//! MIDI codec and event-sequence buffers for the switchbox router.
//!
//! - [`event`]: raw 1-3 byte MIDI messages and their allocation-free
//!   classification ([`classify`], [`MidiKind`])
//! - [`status`] / [`cc`]: status-byte and controller constants
//! - [`sequence`]: the host's timestamped event-sequence layout, with a
//!   zero-copy reader ([`Sequence`]) and a capacity-bounded writer
//!   ([`SequenceBuffer`])
//!
//! # Example
//!
//! ```ignore
//! use switchbox_midi::{classify, MidiKind, RawMidiEvent};
//!
//! let on = RawMidiEvent::note_on(0, 0, 60, 100);
//! assert_eq!(classify(on.bytes()), MidiKind::NoteOn { channel: 0, note: 60 });
//! ```

#![no_std]

pub mod event;
pub mod sequence;
pub mod status;

pub use event::{classify, MidiKind, RawMidiEvent, Urid};
pub use sequence::{Event, Sequence, SequenceBuffer, SequenceIter, EVENT_HEADER_SIZE};
pub use status::cc;

// Re-export the typed message types so callers don't need midi-msg directly
pub use midi_msg::{Channel, ChannelVoiceMsg, MidiMsg, ParseError};
