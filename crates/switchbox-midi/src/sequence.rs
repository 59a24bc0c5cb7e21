//! Timestamped event sequences in host-owned byte buffers.
//!
//! Each record is a 16-byte header followed by the body, padded to 8 bytes:
//!
//! ```text
//! 0        8        12       16
//! ┌────────┬────────┬────────┬──────────────┬─────┐
//! │ frames │  size  │  type  │ body (size)  │ pad │
//! │  i64   │  u32   │  u32   │              │     │
//! └────────┴────────┴────────┴──────────────┴─────┘
//! ```
//!
//! All integers are little-endian. The writer never allocates: the host hands
//! in a byte region and its length is the capacity.

use crate::event::{RawMidiEvent, Urid};

/// Size of a record header in bytes.
pub const EVENT_HEADER_SIZE: usize = 16;

const ALIGN: usize = 8;

/// Bytes one record with a `body_len` byte body occupies, padding included.
#[inline]
pub const fn record_size(body_len: usize) -> usize {
    (EVENT_HEADER_SIZE + body_len + ALIGN - 1) & !(ALIGN - 1)
}

/// A borrowed event: timestamp, host type id and raw body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Event<'a> {
    pub frames: i64,
    pub type_id: Urid,
    pub body: &'a [u8],
}

impl<'a> Event<'a> {
    #[inline]
    pub fn new(frames: i64, type_id: Urid, body: &'a [u8]) -> Self {
        Self {
            frames,
            type_id,
            body,
        }
    }

    #[inline]
    pub fn midi(event: &'a RawMidiEvent, type_id: Urid) -> Self {
        Self::new(event.frame_offset, type_id, event.bytes())
    }
}

/// Read-only view of a sequence.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sequence<'a> {
    bytes: &'a [u8],
}

impl<'a> Sequence<'a> {
    /// `bytes` must hold only the used part of the buffer.
    #[inline]
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    #[inline]
    pub fn empty() -> Self {
        Self { bytes: &[] }
    }

    #[inline]
    pub fn iter(&self) -> SequenceIter<'a> {
        SequenceIter {
            bytes: self.bytes,
            offset: 0,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    #[inline]
    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }
}

impl<'a> IntoIterator for Sequence<'a> {
    type Item = Event<'a>;
    type IntoIter = SequenceIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the records of a [`Sequence`]. Stops at the first truncated record.
#[derive(Clone, Debug)]
pub struct SequenceIter<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Iterator for SequenceIter<'a> {
    type Item = Event<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let header = self
            .bytes
            .get(self.offset..self.offset.checked_add(EVENT_HEADER_SIZE)?)?;
        let frames = i64::from_le_bytes(header[0..8].try_into().ok()?);
        let size = u32::from_le_bytes(header[8..12].try_into().ok()?) as usize;
        let type_id = u32::from_le_bytes(header[12..16].try_into().ok()?);

        let body_start = self.offset + EVENT_HEADER_SIZE;
        let body = self.bytes.get(body_start..body_start.checked_add(size)?)?;

        self.offset = self.offset.saturating_add(record_size(size));
        Some(Event::new(frames, type_id, body))
    }
}

/// Capacity-bounded sequence writer over a host-supplied byte region.
///
/// Once a push is refused the buffer stays refused until [`clear`](Self::clear),
/// so later, smaller events can't jump ahead of a dropped one.
#[derive(Debug)]
pub struct SequenceBuffer<'a> {
    bytes: &'a mut [u8],
    len: usize,
    overflowed: bool,
}

impl<'a> SequenceBuffer<'a> {
    /// Empty buffer whose capacity is `bytes.len()`.
    #[inline]
    pub fn new(bytes: &'a mut [u8]) -> Self {
        Self {
            bytes,
            len: 0,
            overflowed: false,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }

    /// Bytes written so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.len
    }

    /// True if any push was refused since the last clear.
    #[inline]
    pub fn has_overflowed(&self) -> bool {
        self.overflowed
    }

    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
        self.overflowed = false;
    }

    /// Append one record. Returns `false` and writes nothing if it doesn't fit.
    pub fn push(&mut self, event: &Event<'_>) -> bool {
        let total = record_size(event.body.len());
        let Ok(size) = u32::try_from(event.body.len()) else {
            self.overflowed = true;
            return false;
        };
        if self.overflowed || total > self.remaining() {
            self.overflowed = true;
            return false;
        }

        let record = &mut self.bytes[self.len..self.len + total];
        record[0..8].copy_from_slice(&event.frames.to_le_bytes());
        record[8..12].copy_from_slice(&size.to_le_bytes());
        record[12..16].copy_from_slice(&event.type_id.to_le_bytes());
        let body_end = EVENT_HEADER_SIZE + event.body.len();
        record[EVENT_HEADER_SIZE..body_end].copy_from_slice(event.body);
        record[body_end..].fill(0);

        self.len += total;
        true
    }

    /// The written records.
    #[inline]
    pub fn as_sequence(&self) -> Sequence<'_> {
        Sequence::new(&self.bytes[..self.len])
    }

    #[inline]
    pub fn iter(&self) -> SequenceIter<'_> {
        self.as_sequence().iter()
    }
}
