use std::path::PathBuf;

/// Errors raised by note handling, MIDI file I/O and the audition port.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid note name '{0}' (expected e.g. C3, F#4, A#-1)")]
    InvalidNoteName(String),

    #[error("note {0} is outside the MIDI range 0..=127")]
    NoteOutOfRange(i32),

    #[error("shifting {semitones:+} on top of {total:+} semitones overflows the running offset")]
    OffsetOverflow { total: i32, semitones: i32 },

    #[error("no MIDI file loaded")]
    NoFileLoaded,

    #[error("select both a 'from' and a 'to' note first")]
    MissingSelection,

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse MIDI file: {0}")]
    Parse(#[from] midly::Error),

    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("MIDI port error: {0}")]
    Port(String),

    #[error("invalid output port selected")]
    InvalidPortSelection,
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
