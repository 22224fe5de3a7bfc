//! Editing session: the loaded file, the from/to selection and the save target.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::general::notes::{full_note_range, interval_between, note_name_to_number, note_number_to_name};
use crate::io::midi_file::{MidiDocument, NoteSummary};

/// Result of a successful apply/shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Applied {
    pub semitones: i32,
    pub events: usize,
    /// Sum of every interval applied since the file was loaded.
    pub total_offset: i32,
}

pub struct Session {
    config: Config,
    document: Option<MidiDocument>,
    summary: NoteSummary,
    from_note: Option<String>,
    to_note: Option<String>,
    total_offset: i32,
    last_saved: Option<PathBuf>,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            document: None,
            summary: NoteSummary::default(),
            from_note: None,
            to_note: None,
            total_offset: 0,
            last_saved: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn document(&self) -> Option<&MidiDocument> {
        self.document.as_ref()
    }

    pub fn summary(&self) -> &NoteSummary {
        &self.summary
    }

    pub fn total_offset(&self) -> i32 {
        self.total_offset
    }

    /// Where the current document was last written, if anywhere.
    pub fn last_saved(&self) -> Option<&Path> {
        self.last_saved.as_deref()
    }

    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<&MidiDocument> {
        let document = MidiDocument::load(path)?;
        self.install(document)
    }

    /// Replace the current document and reset the selection.
    pub fn install(&mut self, document: MidiDocument) -> Result<&MidiDocument> {
        self.summary = document.note_summary();
        self.from_note = None;
        self.to_note = None;
        self.total_offset = 0;
        self.last_saved = None;
        log::info!(
            "loaded {} ({} tracks, {} distinct notes)",
            document.path().display(),
            document.track_count(),
            self.summary.len()
        );
        let document = self.document.insert(document);
        Ok(&*document)
    }

    /// Names of the notes present in the file.
    pub fn available_notes(&self) -> Vec<String> {
        self.summary.names()
    }

    /// Transposition targets: the file's own notes followed by C0..B7.
    pub fn to_candidates(&self) -> Vec<String> {
        let mut candidates = self.available_notes();
        candidates.extend(full_note_range());
        candidates
    }

    pub fn select_from(&mut self, name: &str) -> Result<String> {
        let canonical = canonical_name(name)?;
        self.from_note = Some(canonical.clone());
        Ok(canonical)
    }

    pub fn select_to(&mut self, name: &str) -> Result<String> {
        let canonical = canonical_name(name)?;
        self.to_note = Some(canonical.clone());
        Ok(canonical)
    }

    pub fn selection(&self) -> (Option<&str>, Option<&str>) {
        (self.from_note.as_deref(), self.to_note.as_deref())
    }

    /// Interval implied by the current from/to pair, if both are set.
    pub fn pending_interval(&self) -> Option<i32> {
        match (&self.from_note, &self.to_note) {
            (Some(from), Some(to)) => interval_between(from, to).ok(),
            _ => None,
        }
    }

    /// Transpose by the from/to interval. The selection is kept for reapplying.
    pub fn apply(&mut self) -> Result<Applied> {
        if self.document.is_none() {
            return Err(Error::NoFileLoaded);
        }
        let semitones = self.pending_interval().ok_or(Error::MissingSelection)?;
        self.shift(semitones)
    }

    pub fn shift(&mut self, semitones: i32) -> Result<Applied> {
        let document = self.document.as_mut().ok_or(Error::NoFileLoaded)?;
        let total_offset = self
            .total_offset
            .checked_add(semitones)
            .ok_or(Error::OffsetOverflow {
                total: self.total_offset,
                semitones,
            })?;
        let events = document.transpose(
            semitones,
            self.config.out_of_range,
            self.config.skip_drum_channel,
        )?;
        self.summary = document.note_summary();
        self.total_offset = total_offset;
        Ok(Applied {
            semitones,
            events,
            total_offset: self.total_offset,
        })
    }

    /// Save to `path`, or beside the source as `<stem>_transposed.<ext>`.
    pub fn save(&mut self, path: Option<&Path>) -> Result<PathBuf> {
        let document = self.document.as_ref().ok_or(Error::NoFileLoaded)?;
        let target = match path {
            Some(p) => with_default_extension(p, &self.config.default_extension),
            None => default_save_path(document.path(), &self.config.default_extension),
        };
        document.save(&target)?;
        log::info!("saved {}", target.display());
        self.last_saved = Some(target.clone());
        Ok(target)
    }
}

/// Normalise user input such as "f#3" to "F#3".
fn canonical_name(name: &str) -> Result<String> {
    note_number_to_name(note_name_to_number(name)?)
}

pub fn with_default_extension(path: &Path, extension: &str) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(extension)
    }
}

pub fn default_save_path(source: &Path, extension: &str) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    source.with_file_name(format!("{}_transposed.{}", stem, extension))
}
