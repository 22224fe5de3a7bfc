pub mod midi_file;
pub mod output;
