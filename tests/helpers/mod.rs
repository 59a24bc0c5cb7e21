//! Test helpers and fixtures for switchbox integration tests
//!
//! A fake host: a URI map, input sequences encoded from events, output
//! buffers of a chosen capacity and a reader that turns outputs back into
//! plain byte vectors.

#![allow(dead_code)]

use switchbox::midi::sequence::record_size;
use switchbox::prelude::*;
use switchbox::{MIDI_EVENT, URID_MAP};

/// Id the fake host gives MIDI events.
pub const MIDI: Urid = 17;

/// Id of some non-MIDI event type (e.g. an atom object).
pub const OBJECT: Urid = 23;

/// Output capacity large enough that nothing is ever dropped.
pub const ROOMY: usize = 8192;

fn map_uri(uri: &str) -> Urid {
    match uri {
        MIDI_EVENT => MIDI,
        URID_MAP => 1,
        _ => 99,
    }
}

static MAP: fn(&str) -> Urid = map_uri;

/// Host features with a working URI map.
pub fn features() -> HostFeatures<'static> {
    HostFeatures::new().with_urid_map(&MAP)
}

/// Instantiate and activate a shipped plugin.
pub fn plugin(variant: Variant) -> Switchbox {
    let mut plugin = Switchbox::instantiate(variant.descriptor(), features())
        .expect("Failed to instantiate plugin");
    plugin.activate();
    plugin
}

/// Install a test subscriber so `RUST_LOG` output shows up with `--nocapture`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Encode events as a host input sequence.
pub fn encode(events: &[Event<'_>]) -> Vec<u8> {
    let mut bytes = vec![0u8; events.iter().map(|e| record_size(e.body.len())).sum()];
    let used = {
        let mut writer = SequenceBuffer::new(&mut bytes);
        for event in events {
            assert!(writer.push(event), "input sequence overflow");
        }
        writer.len()
    };
    bytes.truncate(used);
    bytes
}

/// MIDI events at their frame offsets, encoded as one input.
pub fn midi_input(events: &[RawMidiEvent]) -> Vec<u8> {
    let events: Vec<_> = events.iter().map(|e| Event::midi(e, MIDI)).collect();
    encode(&events)
}

/// One event as read back from an output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Received {
    pub frames: i64,
    pub type_id: Urid,
    pub body: Vec<u8>,
}

impl Received {
    pub fn midi(frames: i64, body: &[u8]) -> Self {
        Self {
            frames,
            type_id: MIDI,
            body: body.to_vec(),
        }
    }
}

/// Run one block and return what each output received.
pub fn run_block(
    plugin: &mut Switchbox,
    control: f32,
    inputs: &[Vec<u8>],
    output_capacity: usize,
) -> Vec<Vec<Received>> {
    let outputs = plugin.engine().config().outputs;
    let mut storage = vec![vec![0u8; output_capacity]; outputs];
    let mut buffers: Vec<SequenceBuffer<'_>> = storage
        .iter_mut()
        .map(|bytes| SequenceBuffer::new(bytes))
        .collect();

    let sequences: Vec<Sequence<'_>> = inputs.iter().map(|bytes| Sequence::new(bytes)).collect();
    plugin.run(control, &sequences, &mut buffers);

    buffers
        .iter()
        .map(|buffer| {
            assert!(buffer.len() <= buffer.capacity());
            buffer
                .iter()
                .map(|event| Received {
                    frames: event.frames,
                    type_id: event.type_id,
                    body: event.body.to_vec(),
                })
                .collect()
        })
        .collect()
}

/// Just the MIDI bytes of one output.
pub fn bodies(received: &[Received]) -> Vec<Vec<u8>> {
    received.iter().map(|event| event.body.clone()).collect()
}
