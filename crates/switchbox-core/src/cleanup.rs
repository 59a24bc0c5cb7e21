//! Corrective messages for notes left sounding by a route change.

use serde::{Deserialize, Serialize};
use switchbox_midi::RawMidiEvent;

use crate::note_table::NoteTable;
use crate::route_map::{OutputSet, RouteSnapshot};
use crate::selector::Route;

/// Coarse cleanup sweeps channels `0..COARSE_CHANNELS`. Channel 15 is not
/// included; receivers listening on it get no sustain-off/all-notes-off.
pub const COARSE_CHANNELS: u8 = 15;

/// Which outputs receive coarse cleanup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleanupTarget {
    /// Outputs fed by the route being left (source side).
    #[default]
    Vacated,
    /// Outputs fed by the route being entered (sink side).
    Entered,
    /// Every output of the engine.
    AllOutputs,
}

/// What to send when the route changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleanupPolicy {
    /// Send nothing.
    #[default]
    None,
    /// One Note-Off per note still sounding on the vacated route, sent to
    /// every output of that route.
    ExactNote,
    /// Sustain-off then all-notes-off on each channel, without looking at
    /// note state.
    Coarse { target: CleanupTarget },
}

impl CleanupPolicy {
    /// Only exact-note cleanup reads the note table, so only it needs notes
    /// recorded while forwarding.
    #[inline]
    pub fn tracks_notes(&self) -> bool {
        matches!(self, CleanupPolicy::ExactNote)
    }

    /// Emit the corrective messages for a change from `vacated` to `entered`.
    ///
    /// `emit` receives each message with the outputs it goes to, in the order
    /// they must be appended. Exact-note cleanup drains `vacated` from
    /// `notes`; the other policies leave the table alone.
    pub fn synthesize<F>(
        &self,
        vacated: Route,
        entered: Route,
        notes: &mut NoteTable,
        routes: &RouteSnapshot,
        output_count: usize,
        mut emit: F,
    ) where
        F: FnMut(OutputSet, &RawMidiEvent),
    {
        match *self {
            CleanupPolicy::None => {}
            CleanupPolicy::ExactNote => {
                let targets = routes.outputs(vacated);
                for (channel, note) in notes.drain(vacated) {
                    emit(targets, &RawMidiEvent::note_off(0, channel, note));
                }
            }
            CleanupPolicy::Coarse { target } => {
                let targets = match target {
                    CleanupTarget::Vacated => routes.outputs(vacated),
                    CleanupTarget::Entered => routes.outputs(entered),
                    CleanupTarget::AllOutputs => OutputSet::all(output_count),
                };
                for channel in 0..COARSE_CHANNELS {
                    emit(targets, &RawMidiEvent::sustain_off(channel));
                    emit(targets, &RawMidiEvent::all_notes_off(channel));
                }
            }
        }
    }
}
