use std::sync::mpsc::{channel, Receiver};
use std::thread;
use std::time::Duration;

use midir::{MidiOutput, MidiOutputConnection};

use crate::config::AuditionConfig;
use crate::error::{Error, Result};
use crate::general::transpose::apply_transpose;

/// Spawn a forwarding thread that owns the provided `conn_out` and listens on `rx`.
/// Each incoming raw MIDI message is transposed by `semitones` and sent to the port.
pub fn spawn_forwarder(
    mut conn_out: MidiOutputConnection,
    rx: Receiver<Vec<u8>>,
    semitones: i32,
) -> thread::JoinHandle<MidiOutputConnection> {
    thread::spawn(move || {
        for msg in rx {
            if msg.is_empty() {
                continue;
            }
            let mut out_msg = msg;
            apply_transpose(&mut out_msg, semitones);
            if let Err(err) = conn_out.send(&out_msg) {
                log::error!("Error sending MIDI message to output: {}", err);
            }
        }
        // Receiver closed -> hand the connection back
        conn_out
    })
}

/// Note-on/note-off pair on channel 1. Key and velocity are clamped to 127.
pub fn note_messages(key: u8, velocity: u8) -> ([u8; 3], [u8; 3]) {
    let key = key.min(127);
    ([0x90, key, velocity.min(127)], [0x80, key, 0])
}

/// Play `keys` one after another on an output port, shifted by `semitones`.
pub fn audition(keys: &[u8], semitones: i32, config: &AuditionConfig) -> Result<()> {
    if keys.is_empty() {
        return Ok(());
    }
    let midi_out = MidiOutput::new("midi-note-editor audition").map_err(|e| Error::Port(e.to_string()))?;
    let port_idx = crate::io::output::choose_output_port(&midi_out, &config.output_port)?;
    let ports = midi_out.ports();
    let port = ports.get(port_idx).ok_or(Error::InvalidPortSelection)?;
    let conn_out = midi_out
        .connect(port, "midi-note-editor-audition")
        .map_err(|e| Error::Port(e.to_string()))?;

    let (tx, rx) = channel::<Vec<u8>>();
    let handle = spawn_forwarder(conn_out, rx, semitones);
    let hold = Duration::from_millis(config.note_ms);

    for &key in keys {
        let (on, off) = note_messages(key, config.velocity);
        log::debug!("audition key {} (+{} semitones)", key, semitones);
        if tx.send(on.to_vec()).is_err() {
            break;
        }
        thread::sleep(hold);
        if tx.send(off.to_vec()).is_err() {
            break;
        }
    }

    drop(tx);
    let conn_out = handle
        .join()
        .map_err(|_| Error::Port("audition thread panicked".to_string()))?;
    conn_out.close();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_pair_is_on_then_off() {
        let (on, off) = note_messages(60, 100);
        assert_eq!(on, [0x90, 60, 100]);
        assert_eq!(off, [0x80, 60, 0]);
    }

    #[test]
    fn oversized_values_are_clamped() {
        let (on, off) = note_messages(200, 200);
        assert_eq!(on, [0x90, 127, 127]);
        assert_eq!(off, [0x80, 127, 0]);
    }

    #[test]
    fn pair_survives_transpose() {
        let (mut on, mut off) = note_messages(60, 100);
        apply_transpose(&mut on, 4);
        apply_transpose(&mut off, 4);
        assert_eq!(on[1], 64);
        assert_eq!(off[1], 64);
    }
}
