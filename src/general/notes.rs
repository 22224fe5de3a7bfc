use midly::num::u7;

use crate::error::{Error, Result};

/// Pitch classes in semitone order starting at C.
pub const NOTE_NAMES: [&str; 12] = ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"];

/// Octaves offered in the full "to" list.
const FULL_RANGE_OCTAVES: std::ops::Range<i32> = 0..8;

/// Convert a MIDI note number to its name, e.g. 60 -> "C3", 0 -> "C-2", 127 -> "G8".
pub fn note_number_to_name(note_number: u8) -> Result<String> {
    if note_number > 127 {
        return Err(Error::NoteOutOfRange(note_number as i32));
    }
    Ok(key_name(u7::new(note_number)))
}

/// Name of a key that is already known to be in range.
pub fn key_name(key: u7) -> String {
    let shifted = key.as_int() as i32 - 12;
    let pitch = NOTE_NAMES[shifted.rem_euclid(12) as usize];
    let octave = shifted.div_euclid(12) - 1;
    format!("{}{}", pitch, octave)
}

/// Parse a note name such as "C3", "f#4" or "A#-1" into a MIDI note number.
///
/// The pitch class is matched case-insensitively. The octave may be negative.
/// A syntactically valid name outside 0..=127 yields `Error::NoteOutOfRange`.
pub fn note_name_to_number(note_name: &str) -> Result<u8> {
    let name = note_name.trim();
    let invalid = || Error::InvalidNoteName(note_name.to_string());

    // Octave starts at the first '-' or digit after the pitch class
    let split = name
        .char_indices()
        .skip(1)
        .find(|(_, c)| *c == '-' || c.is_ascii_digit())
        .map(|(i, _)| i)
        .ok_or_else(invalid)?;
    let (pitch, octave) = name.split_at(split);

    let index = NOTE_NAMES
        .iter()
        .position(|n| n.eq_ignore_ascii_case(pitch))
        .ok_or_else(invalid)?;
    let octave: i64 = octave.parse().map_err(|_| invalid())?;

    let number = octave
        .checked_add(2)
        .and_then(|o| o.checked_mul(12))
        .and_then(|o| o.checked_add(index as i64));
    match number {
        Some(n) if (0..=127).contains(&n) => Ok(n as u8),
        Some(n) => Err(Error::NoteOutOfRange(n.clamp(i32::MIN as i64, i32::MAX as i64) as i32)),
        None if octave > 0 => Err(Error::NoteOutOfRange(i32::MAX)),
        None => Err(Error::NoteOutOfRange(i32::MIN)),
    }
}

/// Shift a note name by `delta` semitones and return the resulting name.
pub fn transpose_note_name(note_name: &str, delta: i32) -> Result<String> {
    let original = note_name_to_number(note_name)? as i32;
    let shifted = original.saturating_add(delta);
    let shifted = u8::try_from(shifted)
        .ok()
        .filter(|n| *n <= 127)
        .ok_or(Error::NoteOutOfRange(shifted))?;
    note_number_to_name(shifted)
}

/// Semitone distance from `from` to `to` (positive means up).
pub fn interval_between(from: &str, to: &str) -> Result<i32> {
    Ok(note_name_to_number(to)? as i32 - note_name_to_number(from)? as i32)
}

/// Every name from C0 to B7, the list offered as transposition targets.
pub fn full_note_range() -> Vec<String> {
    FULL_RANGE_OCTAVES
        .flat_map(|octave| NOTE_NAMES.iter().map(move |pitch| format!("{}{}", pitch, octave)))
        .collect()
}
