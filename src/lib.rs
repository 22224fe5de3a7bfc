//! Load a MIDI file, transpose every note by an interval picked as a pair of
//! note names, and save the result.

pub mod config;
pub mod error;
pub mod general;
pub mod io;
pub mod session;

pub use config::Config;
pub use error::{Error, Result};
pub use session::Session;
