//! Raw MIDI messages with sample-accurate frame offsets.

use midi_msg::{MidiMsg, ParseError};

use crate::status::{self, cc};

/// Host-mapped integer id for an event type URI.
pub type Urid = u32;

/// What the router needs to know about a message.
///
/// Only note messages carry state; everything else passes through untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MidiKind {
    NoteOn { channel: u8, note: u8 },
    NoteOff { channel: u8, note: u8 },
    Other,
}

/// Classify a raw message. Never allocates, never fails.
///
/// A Note-On with velocity 0 stays a `NoteOn`. Messages too short to carry a
/// note number, or whose note byte has the high bit set, are `Other`.
#[inline]
pub fn classify(bytes: &[u8]) -> MidiKind {
    let (Some(&status_byte), Some(&note)) = (bytes.first(), bytes.get(1)) else {
        return MidiKind::Other;
    };
    if note > 0x7F {
        return MidiKind::Other;
    }

    let channel = status_byte & status::CHANNEL_MASK;
    match status_byte & status::TYPE_MASK {
        status::NOTE_ON => MidiKind::NoteOn { channel, note },
        status::NOTE_OFF => MidiKind::NoteOff { channel, note },
        _ => MidiKind::Other,
    }
}

/// Raw 1-3 byte MIDI message, stored inline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RawMidiEvent {
    /// Offset within the current block (0 = first frame).
    pub frame_offset: i64,
    pub data: [u8; 3],
    /// Valid bytes in `data` (1-3).
    pub len: u8,
}

impl RawMidiEvent {
    #[inline]
    pub fn new(frame_offset: i64, data: [u8; 3], len: u8) -> Self {
        Self {
            frame_offset,
            data,
            len: len.min(3),
        }
    }

    /// Returns `None` unless `bytes` holds 1-3 bytes.
    pub fn from_bytes(frame_offset: i64, bytes: &[u8]) -> Option<Self> {
        if bytes.is_empty() || bytes.len() > 3 {
            return None;
        }
        let mut data = [0u8; 3];
        data[..bytes.len()].copy_from_slice(bytes);
        Some(Self::new(frame_offset, data, bytes.len() as u8))
    }

    #[inline]
    pub fn note_on(frame_offset: i64, channel: u8, note: u8, velocity: u8) -> Self {
        Self::channel_message(frame_offset, status::NOTE_ON, channel, note, velocity)
    }

    /// Note-Off with release velocity 0.
    #[inline]
    pub fn note_off(frame_offset: i64, channel: u8, note: u8) -> Self {
        Self::channel_message(frame_offset, status::NOTE_OFF, channel, note, 0)
    }

    #[inline]
    pub fn control_change(frame_offset: i64, channel: u8, controller: u8, value: u8) -> Self {
        Self::channel_message(frame_offset, status::CONTROL_CHANGE, channel, controller, value)
    }

    /// Sustain pedal up (CC 64 = 0) at the start of the block.
    #[inline]
    pub fn sustain_off(channel: u8) -> Self {
        Self::control_change(0, channel, cc::SUSTAIN, 0)
    }

    /// All Notes Off (CC 123 = 0) at the start of the block.
    #[inline]
    pub fn all_notes_off(channel: u8) -> Self {
        Self::control_change(0, channel, cc::ALL_NOTES_OFF, 0)
    }

    #[inline]
    fn channel_message(frame_offset: i64, kind: u8, channel: u8, data1: u8, data2: u8) -> Self {
        Self {
            frame_offset,
            data: [
                kind | (channel & status::CHANNEL_MASK),
                data1 & 0x7F,
                data2 & 0x7F,
            ],
            len: 3,
        }
    }

    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.data[..self.len as usize]
    }

    #[inline]
    pub fn status(&self) -> u8 {
        self.data[0] & status::TYPE_MASK
    }

    #[inline]
    pub fn channel(&self) -> u8 {
        self.data[0] & status::CHANNEL_MASK
    }

    #[inline]
    pub fn kind(&self) -> MidiKind {
        classify(self.bytes())
    }

    /// Typed view of the message, for diagnostics. Not used on the audio path.
    pub fn to_midi_msg(&self) -> Result<MidiMsg, ParseError> {
        MidiMsg::from_midi(self.bytes()).map(|(msg, _len)| msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use midi_msg::{Channel, ChannelVoiceMsg};

    #[test]
    fn test_classify_note_on() {
        let event = RawMidiEvent::note_on(0, 3, 60, 100);
        assert_eq!(event.kind(), MidiKind::NoteOn { channel: 3, note: 60 });
        assert_eq!(event.bytes(), &[0x93, 60, 100]);
    }

    #[test]
    fn test_classify_note_off() {
        assert_eq!(
            classify(&[0x8F, 64, 40]),
            MidiKind::NoteOff {
                channel: 15,
                note: 64
            }
        );
    }

    #[test]
    fn test_note_on_zero_velocity_stays_note_on() {
        assert_eq!(
            classify(&[0x90, 60, 0]),
            MidiKind::NoteOn { channel: 0, note: 60 }
        );
    }

    #[test]
    fn test_classify_other() {
        // Control change, program change, clock, sysex start
        assert_eq!(classify(&[0xB0, 7, 100]), MidiKind::Other);
        assert_eq!(classify(&[0xC2, 5]), MidiKind::Other);
        assert_eq!(classify(&[0xF8]), MidiKind::Other);
        assert_eq!(classify(&[0xF0, 0x7E, 0x7F]), MidiKind::Other);
    }

    #[test]
    fn test_classify_malformed() {
        assert_eq!(classify(&[]), MidiKind::Other);
        assert_eq!(classify(&[0x90]), MidiKind::Other);
        assert_eq!(classify(&[0x90, 0x80, 100]), MidiKind::Other);
    }

    #[test]
    fn test_corrective_messages() {
        assert_eq!(RawMidiEvent::note_off(0, 2, 61).bytes(), &[0x82, 61, 0]);
        assert_eq!(RawMidiEvent::sustain_off(14).bytes(), &[0xBE, 0x40, 0]);
        assert_eq!(RawMidiEvent::all_notes_off(0).bytes(), &[0xB0, 0x7B, 0]);
        assert_eq!(RawMidiEvent::all_notes_off(0).frame_offset, 0);
    }

    #[test]
    fn test_from_bytes() {
        let event = RawMidiEvent::from_bytes(12, &[0xC0, 5]).unwrap();
        assert_eq!(event.frame_offset, 12);
        assert_eq!(event.bytes(), &[0xC0, 5]);
        assert_eq!(event.channel(), 0);
        assert_eq!(event.status(), status::PROGRAM_CHANGE);

        assert!(RawMidiEvent::from_bytes(0, &[]).is_none());
        assert!(RawMidiEvent::from_bytes(0, &[1, 2, 3, 4]).is_none());
    }

    #[test]
    fn test_to_midi_msg() {
        let msg = RawMidiEvent::note_on(0, 1, 60, 100).to_midi_msg().unwrap();
        match msg {
            MidiMsg::ChannelVoice { channel, msg } => {
                assert_eq!(channel, Channel::Ch2);
                assert_eq!(
                    msg,
                    ChannelVoiceMsg::NoteOn {
                        note: 60,
                        velocity: 100
                    }
                );
            }
            other => panic!("Expected ChannelVoice, got {:?}", other),
        }
    }
}
