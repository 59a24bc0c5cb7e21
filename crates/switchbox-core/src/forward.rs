//! Bounded, order-preserving fan-out into the block's output buffers.

use switchbox_midi::{Event, SequenceBuffer};

use crate::route_map::OutputSet;

/// What happened to the output buffers during one block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlockStats {
    /// Corrective messages appended (counted once per output).
    pub corrective: u32,
    /// Inbound events appended (counted once per output).
    pub forwarded: u32,
    /// Appends refused for lack of capacity.
    pub dropped: u32,
}

impl BlockStats {
    #[inline]
    pub fn appended(&self) -> u32 {
        self.corrective + self.forwarded
    }
}

/// Borrows the host's output buffers for one block.
///
/// Creating a forwarder clears every buffer; each one then receives events in
/// exactly the order they are appended here. A refused event is counted and
/// otherwise forgotten.
pub struct Forwarder<'o, 'a> {
    outputs: &'o mut [SequenceBuffer<'a>],
    stats: BlockStats,
}

impl<'o, 'a> Forwarder<'o, 'a> {
    pub fn new(outputs: &'o mut [SequenceBuffer<'a>]) -> Self {
        for buffer in outputs.iter_mut() {
            buffer.clear();
        }
        Self {
            outputs,
            stats: BlockStats::default(),
        }
    }

    /// Append to one output. Returns `false` if the event was dropped;
    /// a missing output counts as a drop.
    #[inline]
    pub fn append(&mut self, output: usize, event: &Event<'_>) -> bool {
        let appended = self
            .outputs
            .get_mut(output)
            .is_some_and(|buffer| buffer.push(event));
        if !appended {
            self.stats.dropped += 1;
        }
        appended
    }

    /// Append a synthesized cleanup message to each target.
    #[inline]
    pub fn emit_corrective(&mut self, targets: OutputSet, event: &Event<'_>) {
        for output in targets.iter() {
            if self.append(output, event) {
                self.stats.corrective += 1;
            }
        }
    }

    /// Append an inbound event to each target.
    #[inline]
    pub fn forward(&mut self, targets: OutputSet, event: &Event<'_>) {
        for output in targets.iter() {
            if self.append(output, event) {
                self.stats.forwarded += 1;
            }
        }
    }

    #[inline]
    pub fn stats(&self) -> BlockStats {
        self.stats
    }

    pub fn finish(self) -> BlockStats {
        self.stats
    }
}
