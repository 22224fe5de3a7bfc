use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// What to do with a note pushed outside 0..=127.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutOfRangePolicy {
    /// Pin to the nearest valid note.
    #[default]
    Clamp,
    /// Fail the whole transposition.
    Reject,
}

/// Shift a single key by `semitones` following `policy`.
pub fn shift_key(key: u8, semitones: i32, policy: OutOfRangePolicy) -> Result<u8> {
    let shifted = (key as i32).saturating_add(semitones);
    match policy {
        OutOfRangePolicy::Clamp => Ok(shifted.clamp(0, 127) as u8),
        OutOfRangePolicy::Reject if (0..=127).contains(&shifted) => Ok(shifted as u8),
        OutOfRangePolicy::Reject => Err(Error::NoteOutOfRange(shifted)),
    }
}

/// Apply transpose in-place to a raw MIDI message buffer.
/// Note-off (0x8x), note-on (0x9x) and poly aftertouch (0xAx) carry a key at byte 1.
pub fn apply_transpose(buf: &mut [u8], semitones: i32) {
    if buf.len() < 2 {
        return;
    }
    match buf[0] & 0xF0 {
        0x80 | 0x90 | 0xA0 => {
            // Clamp cannot fail
            if let Ok(key) = shift_key(buf[1] & 0x7F, semitones, OutOfRangePolicy::Clamp) {
                buf[1] = key;
            }
        }
        _ => {
            // other messages unchanged
        }
    }
}
