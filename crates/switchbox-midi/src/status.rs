//! MIDI 1.0 status nibbles and the controller numbers used for cleanup.

pub const NOTE_OFF: u8 = 0x80;
pub const NOTE_ON: u8 = 0x90;
pub const POLY_PRESSURE: u8 = 0xA0;
pub const CONTROL_CHANGE: u8 = 0xB0;
pub const PROGRAM_CHANGE: u8 = 0xC0;
pub const CHANNEL_PRESSURE: u8 = 0xD0;
pub const PITCH_BEND: u8 = 0xE0;
pub const SYSTEM: u8 = 0xF0;

/// Mask selecting the message type from a status byte.
pub const TYPE_MASK: u8 = 0xF0;
/// Mask selecting the channel from a status byte.
pub const CHANNEL_MASK: u8 = 0x0F;

/// Controller numbers.
pub mod cc {
    pub const SUSTAIN: u8 = 0x40;
    pub const ALL_NOTES_OFF: u8 = 0x7B;
}
