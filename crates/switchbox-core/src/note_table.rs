//! Per-route record of which notes are currently sounding.
//!
//! Storage is one 128-bit set per channel per route, allocated once in
//! [`NoteTable::new`]. Marking and draining never allocate.

use crate::compat::Vec;
use crate::selector::Route;

/// MIDI channels per route.
pub const CHANNELS: usize = 16;
/// Note numbers per channel.
pub const NOTES: usize = 128;

type ChannelNotes = [u128; CHANNELS];

/// `(route, channel, note) -> sounding`.
///
/// An entry is set while a Note-On forwarded on that route has not yet been
/// answered by a Note-Off or swept by a drain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteTable {
    routes: Vec<ChannelNotes>,
}

impl NoteTable {
    pub fn new(route_count: usize) -> Self {
        Self {
            routes: vec![[0; CHANNELS]; route_count],
        }
    }

    #[inline]
    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    /// Set or clear one entry. Out-of-range coordinates are ignored.
    #[inline]
    pub fn mark(&mut self, route: Route, channel: u8, note: u8, sounding: bool) {
        let Some(notes) = self.routes.get_mut(route) else {
            return;
        };
        if channel as usize >= CHANNELS || note as usize >= NOTES {
            return;
        }
        let bit = 1u128 << note;
        let slot = &mut notes[channel as usize];
        if sounding {
            *slot |= bit;
        } else {
            *slot &= !bit;
        }
    }

    #[inline]
    pub fn is_sounding(&self, route: Route, channel: u8, note: u8) -> bool {
        if channel as usize >= CHANNELS || note as usize >= NOTES {
            return false;
        }
        self.routes
            .get(route)
            .is_some_and(|notes| notes[channel as usize] & (1u128 << note) != 0)
    }

    pub fn sounding_count(&self, route: Route) -> usize {
        self.routes.get(route).map_or(0, |notes| {
            notes.iter().map(|bits| bits.count_ones() as usize).sum()
        })
    }

    /// Take every sounding entry of `route`, clearing it.
    ///
    /// The route is cleared before the first item is yielded, so dropping the
    /// iterator early does not leave stale entries behind. Items come out in
    /// descending channel order, then descending note order.
    pub fn drain(&mut self, route: Route) -> Drain {
        let notes = self
            .routes
            .get_mut(route)
            .map(core::mem::take)
            .unwrap_or_default();
        Drain {
            notes,
            channel: CHANNELS,
        }
    }

    /// Clear every route.
    pub fn reset(&mut self) {
        for notes in self.routes.iter_mut() {
            *notes = [0; CHANNELS];
        }
    }
}

/// Iterator returned by [`NoteTable::drain`], yielding `(channel, note)`.
#[derive(Debug, Clone)]
pub struct Drain {
    notes: ChannelNotes,
    /// One past the channel currently being emptied.
    channel: usize,
}

impl Iterator for Drain {
    type Item = (u8, u8);

    fn next(&mut self) -> Option<Self::Item> {
        while self.channel > 0 {
            let index = self.channel - 1;
            let bits = self.notes[index];
            if bits == 0 {
                self.channel -= 1;
                continue;
            }
            let note = 127 - bits.leading_zeros();
            self.notes[index] &= !(1u128 << note);
            return Some((index as u8, note as u8));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::collections::BTreeSet;
    use proptest::prelude::*;

    #[test]
    fn test_mark_and_query() {
        let mut table = NoteTable::new(2);
        table.mark(0, 0, 60, true);
        assert!(table.is_sounding(0, 0, 60));
        assert!(!table.is_sounding(1, 0, 60));
        assert_eq!(table.sounding_count(0), 1);

        table.mark(0, 0, 60, false);
        assert!(!table.is_sounding(0, 0, 60));
        assert_eq!(table.sounding_count(0), 0);
    }

    #[test]
    fn test_drain_order_is_descending() {
        let mut table = NoteTable::new(1);
        table.mark(0, 0, 60, true);
        table.mark(0, 15, 0, true);
        table.mark(0, 0, 127, true);
        table.mark(0, 9, 36, true);
        table.mark(0, 9, 42, true);

        let drained: Vec<_> = table.drain(0).collect();
        assert_eq!(drained, vec![(15, 0), (9, 42), (9, 36), (0, 127), (0, 60)]);
        assert_eq!(table.sounding_count(0), 0);
    }

    #[test]
    fn test_drain_clears_even_when_dropped_early() {
        let mut table = NoteTable::new(1);
        table.mark(0, 1, 10, true);
        table.mark(0, 2, 20, true);

        let mut drain = table.drain(0);
        assert_eq!(drain.next(), Some((2, 20)));
        drop(drain);

        assert_eq!(table.sounding_count(0), 0);
    }

    #[test]
    fn test_drain_only_touches_one_route() {
        let mut table = NoteTable::new(2);
        table.mark(0, 0, 60, true);
        table.mark(1, 0, 62, true);

        assert_eq!(table.drain(0).count(), 1);
        assert!(table.is_sounding(1, 0, 62));
    }

    #[test]
    fn test_out_of_range_is_ignored() {
        let mut table = NoteTable::new(1);
        table.mark(3, 0, 60, true);
        table.mark(0, 16, 60, true);
        table.mark(0, 0, 128, true);
        assert_eq!(table.sounding_count(0), 0);
        assert!(!table.is_sounding(0, 0, 200));
        assert_eq!(table.drain(5).count(), 0);
    }

    #[test]
    fn test_reset() {
        let mut table = NoteTable::new(3);
        for route in 0..3 {
            table.mark(route, 4, 64, true);
        }
        table.reset();
        assert!((0..3).all(|route| table.sounding_count(route) == 0));
    }

    proptest! {
        /// Draining yields each marked note once, highest channel then
        /// highest note first, and leaves the route empty.
        #[test]
        fn test_drain_matches_marked_set(
            marks in prop::collection::vec((0u8..16, 0u8..128, any::<bool>()), 0..64),
        ) {
            let mut table = NoteTable::new(2);
            let mut model = BTreeSet::new();
            for &(channel, note, sounding) in &marks {
                table.mark(0, channel, note, sounding);
                if sounding {
                    model.insert((channel, note));
                } else {
                    model.remove(&(channel, note));
                }
            }
            table.mark(1, 0, 0, true);
            prop_assert_eq!(table.sounding_count(0), model.len());

            let drained: Vec<_> = table.drain(0).collect();
            let expected: Vec<_> = model.iter().rev().copied().collect();
            prop_assert_eq!(drained, expected);
            prop_assert_eq!(table.sounding_count(0), 0);
            prop_assert!(table.is_sounding(1, 0, 0));
        }
    }
}
