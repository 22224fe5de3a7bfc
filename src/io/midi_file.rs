//! Standard MIDI File loading, note inventory and whole-file transposition.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use midly::num::u7;
use midly::{MidiMessage, Smf, Timing, TrackEventKind};

use crate::error::{Error, Result};
use crate::general::notes::key_name;
use crate::general::transpose::{shift_key, OutOfRangePolicy};

/// Zero-based index of General MIDI channel 10.
pub const DRUM_CHANNEL: u8 = 9;

/// Occurrences of a single note across the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteUsage {
    pub key: u8,
    pub name: String,
    /// Velocity of the first note-on/note-off seen for this key.
    pub velocity: u8,
    /// Delta time of every event, in file order.
    pub times: Vec<u32>,
}

impl NoteUsage {
    pub fn count(&self) -> usize {
        self.times.len()
    }
}

/// Notes present in a file, ordered by key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteSummary {
    notes: BTreeMap<u8, NoteUsage>,
}

impl NoteSummary {
    fn record(&mut self, key: u7, velocity: u8, delta: u32) {
        self.notes
            .entry(key.as_int())
            .or_insert_with(|| NoteUsage {
                key: key.as_int(),
                name: key_name(key),
                velocity,
                times: Vec::new(),
            })
            .times
            .push(delta);
    }

    pub fn names(&self) -> Vec<String> {
        self.notes.values().map(|u| u.name.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NoteUsage> {
        self.notes.values()
    }

    pub fn get(&self, key: u8) -> Option<&NoteUsage> {
        self.notes.get(&key)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

/// A parsed MIDI file that owns its event data.
#[derive(Debug, Clone)]
pub struct MidiDocument {
    path: PathBuf,
    smf: Smf<'static>,
}

impl MidiDocument {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|e| Error::io(path, e))?;
        Self::parse(&data, path)
    }

    pub fn parse(data: &[u8], path: impl Into<PathBuf>) -> Result<Self> {
        let smf = Smf::parse(data)?.make_static();
        Ok(Self {
            path: path.into(),
            smf,
        })
    }

    pub fn from_smf(smf: Smf<'static>, path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            smf,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn smf(&self) -> &Smf<'static> {
        &self.smf
    }

    pub fn track_count(&self) -> usize {
        self.smf.tracks.len()
    }

    /// Ticks per beat for metrical files, `None` for timecode timing.
    pub fn ticks_per_beat(&self) -> Option<u16> {
        match self.smf.header.timing {
            Timing::Metrical(tpb) => Some(tpb.as_int()),
            Timing::Timecode(..) => None,
        }
    }

    /// Group every note-on and note-off by key.
    pub fn note_summary(&self) -> NoteSummary {
        let mut summary = NoteSummary::default();
        for track in &self.smf.tracks {
            for event in track {
                if let TrackEventKind::Midi { message, .. } = event.kind {
                    match message {
                        MidiMessage::NoteOn { key, vel } | MidiMessage::NoteOff { key, vel } => {
                            summary.record(key, vel.as_int(), event.delta.as_int());
                        }
                        _ => {}
                    }
                }
            }
        }
        summary
    }

    /// Shift every keyed event by `semitones`. Returns the number of events whose key moved.
    ///
    /// With `OutOfRangePolicy::Reject` the document is left unchanged when any
    /// event would leave 0..=127.
    pub fn transpose(&mut self, semitones: i32, policy: OutOfRangePolicy, skip_drums: bool) -> Result<usize> {
        if policy == OutOfRangePolicy::Reject {
            // Dry run so a failure leaves nothing half-shifted
            for track in &self.smf.tracks {
                for event in track {
                    if let Some(key) = keyed(&event.kind, skip_drums) {
                        shift_key(key, semitones, policy)?;
                    }
                }
            }
        }

        let mut changed = 0;
        for track in self.smf.tracks.iter_mut() {
            for event in track.iter_mut() {
                let TrackEventKind::Midi { channel, message } = &mut event.kind else {
                    continue;
                };
                if skip_drums && channel.as_int() == DRUM_CHANNEL {
                    continue;
                }
                let key = match message {
                    MidiMessage::NoteOn { key, .. }
                    | MidiMessage::NoteOff { key, .. }
                    | MidiMessage::Aftertouch { key, .. } => key,
                    _ => continue,
                };
                let shifted = shift_key(key.as_int(), semitones, policy)?;
                if shifted != key.as_int() {
                    *key = u7::new(shifted);
                    changed += 1;
                }
            }
        }
        log::debug!("shifted {} events by {} semitones", changed, semitones);
        Ok(changed)
    }

    /// Write the document to `path`. The source path is left as loaded.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.smf.save(path).map_err(|e| Error::io(path, e))?;
        Ok(())
    }
}

fn keyed(kind: &TrackEventKind, skip_drums: bool) -> Option<u8> {
    match kind {
        TrackEventKind::Midi { channel, .. } if skip_drums && channel.as_int() == DRUM_CHANNEL => None,
        TrackEventKind::Midi { message, .. } => match message {
            MidiMessage::NoteOn { key, .. }
            | MidiMessage::NoteOff { key, .. }
            | MidiMessage::Aftertouch { key, .. } => Some(key.as_int()),
            _ => None,
        },
        _ => None,
    }
}
