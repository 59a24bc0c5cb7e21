//! Per-block driver.
//!
//! ```text
//!          ┌──────────────────────── process() ───────────────────────┐
//!          │                                                          │
//!  Idle ──▶ RouteResolved ──┬─▶ CleanupEmitted ──┬─▶ Forwarding ──▶ Idle
//!                           └─▶ CleanupSkipped ──┘
//! ```
//!
//! Within one output buffer, corrective messages come first, then forwarded
//! events in arrival order, inputs visited in index order.

use switchbox_midi::{classify, Event, MidiKind, Sequence, SequenceBuffer, Urid};

use crate::config::{EngineConfig, EventFilter};
use crate::forward::{BlockStats, Forwarder};
use crate::note_table::NoteTable;
use crate::route_map::RouteSnapshot;
use crate::selector::{Route, RouteSelector};
use crate::Result;

/// Where the driver is within a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockPhase {
    /// Between blocks.
    #[default]
    Idle,
    RouteResolved,
    CleanupEmitted,
    CleanupSkipped,
    Forwarding,
}

impl BlockPhase {
    /// Legal single-step transitions of the block state machine.
    pub fn can_advance_to(self, next: BlockPhase) -> bool {
        use BlockPhase::*;
        matches!(
            (self, next),
            (Idle, RouteResolved)
                | (RouteResolved, CleanupEmitted)
                | (RouteResolved, CleanupSkipped)
                | (CleanupEmitted, Forwarding)
                | (CleanupSkipped, Forwarding)
                | (Forwarding, Idle)
        )
    }
}

/// One switchbox: route selection, note tracking, cleanup and forwarding.
///
/// All storage is sized in [`RoutingEngine::new`]. [`process`](Self::process)
/// never allocates, logs or fails.
#[derive(Debug)]
pub struct RoutingEngine {
    config: EngineConfig,
    routes: RouteSnapshot,
    notes: NoteTable,
    selector: RouteSelector,
    midi_type: Urid,
    phase: BlockPhase,
    last_block: BlockStats,
}

impl RoutingEngine {
    /// Validate `config` and allocate the engine's state.
    ///
    /// `midi_type` is the host's id for MIDI events. It is only compared
    /// against event type ids, so any value works when the configuration
    /// neither filters nor cleans up.
    pub fn new(config: EngineConfig, midi_type: Urid) -> Result<Self> {
        config.validate()?;

        let routes = config.routes.snapshot();
        let notes = NoteTable::new(config.route_count());
        let selector = RouteSelector::new(config.selector, config.route_count());

        tracing::debug!(
            inputs = config.inputs,
            outputs = config.outputs,
            routes = config.route_count(),
            midi_type,
            "routing engine created"
        );

        Ok(Self {
            config,
            routes,
            notes,
            selector,
            midi_type,
            phase: BlockPhase::Idle,
            last_block: BlockStats::default(),
        })
    }

    /// Forget every sounding note and the previous route.
    pub fn reset(&mut self) {
        self.notes.reset();
        self.selector.reset();
        self.last_block = BlockStats::default();
        self.phase = BlockPhase::Idle;
    }

    /// Run one block.
    ///
    /// Every buffer in `outputs` is cleared first. Inputs and outputs beyond
    /// the configured counts are ignored; missing ones carry nothing.
    pub fn process(
        &mut self,
        control: f32,
        inputs: &[Sequence<'_>],
        outputs: &mut [SequenceBuffer<'_>],
    ) {
        let mut forwarder = Forwarder::new(outputs);

        let transition = self.selector.resolve(control);
        let route = transition.route;
        self.advance(BlockPhase::RouteResolved);

        match transition.vacated {
            Some(vacated) => {
                let midi_type = self.midi_type;
                self.config.cleanup.synthesize(
                    vacated,
                    route,
                    &mut self.notes,
                    &self.routes,
                    self.config.outputs,
                    |targets, message| {
                        forwarder.emit_corrective(targets, &Event::midi(message, midi_type))
                    },
                );
                self.advance(BlockPhase::CleanupEmitted);
            }
            None => self.advance(BlockPhase::CleanupSkipped),
        }

        self.advance(BlockPhase::Forwarding);
        for (input, sequence) in inputs.iter().take(self.config.inputs).enumerate() {
            self.forward_input(route, input, sequence, &mut forwarder);
        }

        self.last_block = forwarder.finish();
        self.advance(BlockPhase::Idle);
    }

    #[inline]
    fn forward_input(
        &mut self,
        route: Route,
        input: usize,
        sequence: &Sequence<'_>,
        forwarder: &mut Forwarder<'_, '_>,
    ) {
        let targets = self.routes.targets(route, input);
        if targets.is_empty() {
            return;
        }

        let tracks_notes = self.config.cleanup.tracks_notes();
        for event in sequence.iter() {
            let is_midi = event.type_id == self.midi_type;
            if !is_midi && self.config.filter == EventFilter::MidiOnly {
                continue;
            }

            // The table follows what was sent toward the outputs, not what
            // fit: a Note-Off dropped for lack of room still clears its entry.
            if tracks_notes && is_midi {
                match classify(event.body) {
                    MidiKind::NoteOn { channel, note } => {
                        self.notes.mark(route, channel, note, true)
                    }
                    MidiKind::NoteOff { channel, note } => {
                        self.notes.mark(route, channel, note, false)
                    }
                    MidiKind::Other => {}
                }
            }

            forwarder.forward(targets, &event);
        }
    }

    #[inline]
    fn advance(&mut self, next: BlockPhase) {
        debug_assert!(
            self.phase.can_advance_to(next),
            "illegal block phase transition {:?} -> {:?}",
            self.phase,
            next
        );
        self.phase = next;
    }

    #[inline]
    pub fn phase(&self) -> BlockPhase {
        self.phase
    }

    #[inline]
    pub fn notes(&self) -> &NoteTable {
        &self.notes
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[inline]
    pub fn midi_type(&self) -> Urid {
        self.midi_type
    }

    /// Counters from the most recent block.
    #[inline]
    pub fn last_block(&self) -> BlockStats {
        self.last_block
    }

    /// Route selected by the most recent block, `None` right after a reset.
    #[inline]
    pub fn previous_route(&self) -> Option<Route> {
        self.selector.previous()
    }
}
